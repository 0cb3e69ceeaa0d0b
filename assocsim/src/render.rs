//! Plain text tables for the trace, the cache contents and the statistics

use std::fmt::Write;
use assoclib::model::{AccessRecord, CacheStats, SetSnapshot};

const TRACE_RULE: usize = 250;
const CONTENTS_RULE: usize = 120;
const STATS_RULE: usize = 60;

pub fn trace_table(records: &[AccessRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<15}{:<40}{:<40}{:<40}{:<40}{:<30}", "WordAddr", "BinAddr", "Tag", "Index", "Offset", "Hit/Miss");
    let _ = writeln!(out, "{}", "-".repeat(TRACE_RULE));
    for record in records {
        let _ = writeln!(
            out,
            "{:<15}{:<40}{:<40}{:<40}{:<40}{:<30}",
            record.word_address,
            record.binary_address,
            record.tag_binary,
            record.index,
            record.offset,
            record.outcome.to_string(),
        );
    }
    let _ = writeln!(out, "{}", "-".repeat(TRACE_RULE));
    out
}

pub fn cache_contents(snapshot: &[SetSnapshot]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Cache");
    let _ = writeln!(out, "{}", "-".repeat(CONTENTS_RULE));
    for set in snapshot {
        let _ = write!(out, "Set {:<2} | ", set.index);
        for tag in &set.tags_binary {
            let _ = write!(out, "{tag:<32} ");
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "-".repeat(CONTENTS_RULE));
    }
    out
}

pub fn statistics(stats: &CacheStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "-".repeat(STATS_RULE));
    let _ = writeln!(out, "Simulation Statistics");
    let _ = writeln!(out, "Replacement Policy: {}", stats.policy);
    let _ = writeln!(out, "Cache Size: {} bytes", stats.cache_size_bytes);
    let _ = writeln!(out, "Block Size: {} bytes", stats.block_size_bytes);
    let _ = writeln!(out, "Associativity: {}", stats.associativity);
    let _ = writeln!(out, "Number of Sets: {}", stats.num_sets);
    let _ = writeln!(out, "Hits: {}", stats.hits);
    let _ = writeln!(out, "Misses: {}", stats.misses);
    if stats.rejected > 0 {
        let _ = writeln!(out, "Skipped Addresses: {}", stats.rejected);
    }
    match stats.hit_rate_percent() {
        Some(rate) => { let _ = writeln!(out, "Hit Rate: {rate:.2}%"); }
        None => { let _ = writeln!(out, "Hit Rate: N/A"); }
    }
    out
}

#[cfg(test)]
mod tests {
    use assoclib::config::{CacheConfig, ReplacementPolicyConfig};
    use assoclib::model::CacheModel;
    use super::*;

    fn model() -> CacheModel {
        CacheModel::new(CacheConfig::new(1024, 64, 2, ReplacementPolicyConfig::FirstInFirstOut)).unwrap()
    }

    #[test]
    fn statistics_before_any_access() {
        let text = statistics(&model().stats());
        assert!(text.contains("Replacement Policy: FIFO"));
        assert!(text.contains("Number of Sets: 8"));
        assert!(text.contains("Hit Rate: N/A"));
        assert!(!text.contains("Skipped"));
    }

    #[test]
    fn statistics_with_hits() {
        let mut model = model();
        model.simulate([0x0, 0x0, 0x0, 0x40]);
        let text = statistics(&model.stats());
        assert!(text.contains("Hits: 2"));
        assert!(text.contains("Misses: 2"));
        assert!(text.contains("Hit Rate: 50.00%"));
    }

    #[test]
    fn trace_rows() {
        let mut model = model();
        let simulation = model.simulate([0x142, 0x142]);
        let text = trace_table(&simulation.records);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("WordAddr"));
        assert!(lines[2].starts_with("80 "));
        assert!(lines[2].contains("00000000000000000000000101000010"));
        assert!(lines[2].trim_end().ends_with("MISS"));
        assert!(lines[3].trim_end().ends_with("HIT"));
    }

    #[test]
    fn contents_list_every_set() {
        let mut model = model();
        model.simulate([0x0]);
        let text = cache_contents(&model.snapshot());
        assert_eq!(text.lines().filter(|line| line.starts_with("Set ")).count(), 8);
        assert!(text.contains(&format!("Set 0  | {:<32} ", "0".repeat(23))));
    }
}
