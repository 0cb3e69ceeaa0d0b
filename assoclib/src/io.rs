use std::fs::File;
use std::io::{Read, Seek};
use lazy_static::lazy_static;
use regex::Regex;
use crate::error::{ParseError, TraceError};

lazy_static! {
    static ref SEPARATOR: Regex = Regex::new(r"[\s,]+").unwrap();
    static ref HEX_TOKEN: Regex = Regex::new(r"^(?:0[xX])?([0-9a-fA-F]+)$").unwrap();
    static ref PREFIXED_HEX_TOKEN: Regex = Regex::new(r"^0[xX]([0-9a-fA-F]+)$").unwrap();
    static ref DECIMAL_TOKEN: Regex = Regex::new(r"^([0-9]+)$").unwrap();
}

/// How unprefixed address tokens are read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Radix {
    /// Every token is hexadecimal, with or without a `0x` prefix
    #[default]
    Hex,
    /// Unprefixed tokens are decimal, `0x` tokens are still hexadecimal
    Decimal,
}

/// Parses a list of hexadecimal addresses separated by commas and/or whitespace
///
/// Anything after a `#` on a line is a comment. Empty tokens are ignored.
///
/// # Examples
///
/// ```
/// use assoclib::io::parse_address_list;
/// let addresses = parse_address_list("0x0A, 0x522, 1034 # trailing comment").unwrap();
/// assert_eq!(addresses, vec![0x0A, 0x522, 0x1034]);
/// ```
pub fn parse_address_list(input: &str) -> Result<Vec<u64>, ParseError> {
    parse_address_list_with(input, Radix::Hex)
}

/// Parses a list of addresses, reading unprefixed tokens in the given radix
///
/// # Examples
///
/// ```
/// use assoclib::io::{parse_address_list_with, Radix};
/// let addresses = parse_address_list_with("10 0x10", Radix::Decimal).unwrap();
/// assert_eq!(addresses, vec![10, 16]);
/// ```
pub fn parse_address_list_with(input: &str, radix: Radix) -> Result<Vec<u64>, ParseError> {
    input
        .lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .flat_map(|line| SEPARATOR.split(line))
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(position, token)| parse_token(token, radix).ok_or_else(|| ParseError {
            token: token.to_string(),
            position,
        }))
        .collect()
}

fn parse_token(token: &str, radix: Radix) -> Option<u64> {
    let (pattern, base): (&Regex, u32) = match radix {
        Radix::Hex => (&*HEX_TOKEN, 16),
        Radix::Decimal if PREFIXED_HEX_TOKEN.is_match(token) => (&*PREFIXED_HEX_TOKEN, 16),
        Radix::Decimal => (&*DECIMAL_TOKEN, 10),
    };
    let digits = pattern.captures(token)?.get(1)?.as_str();
    u64::from_str_radix(digits, base).ok()
}

pub fn get_reader(file: File) -> Result<impl Read + Seek, TraceError> {
    // Compatibility on other systems
    #[cfg(not(unix))]
    {
        use std::io::BufReader;
        const BUFFER_SIZE: usize = 64 * 4096;
        Ok(BufReader::with_capacity(BUFFER_SIZE, file))
    }
    // Memory map the file on unix systems, traces are read once front to back
    #[cfg(unix)]
    {
        use std::io::Cursor;
        use memmap2::{Advice, Mmap};
        // Safety: the trace must not be modified by another process while it is mapped
        unsafe {
            let m = Mmap::map(&file)?;
            m.advise(Advice::Sequential)?;
            Ok(Cursor::new(m))
        }
    }
}

/// Reads and parses an address list from a file
pub fn read_address_file(file: File, radix: Radix) -> Result<Vec<u64>, TraceError> {
    let mut reader = get_reader(file)?;
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = String::from_utf8(bytes)?;
    Ok(parse_address_list_with(&text, radix)?)
}
