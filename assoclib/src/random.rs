use std::time::{SystemTime, UNIX_EPOCH};

/// A source of slot numbers for random replacement
///
/// The model holds one of these rather than reaching for global randomness, so a simulation can
/// be replayed exactly by injecting a deterministic source
pub trait RandomSource {
    /// Returns a slot in `[0, bound)`. `bound` is never zero.
    fn next_slot(&mut self, bound: usize) -> usize;
}

impl<S: RandomSource + ?Sized> RandomSource for Box<S> {
    fn next_slot(&mut self, bound: usize) -> usize {
        (**self).next_slot(bound)
    }
}

/// xorshift64 generator. The same seed always produces the same eviction choices.
#[derive(Debug, Clone)]
pub struct XorShiftSource {
    state: u64,
}

impl XorShiftSource {
    // xorshift never leaves the all-zero state
    const ZERO_SEED_REPLACEMENT: u64 = 123456789;

    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { Self::ZERO_SEED_REPLACEMENT } else { seed };
        Self { state }
    }

    /// Seeds from the system clock, for runs where reproducibility doesn't matter
    pub fn from_time() -> Self {
        Self::new(time_seed())
    }
}

impl RandomSource for XorShiftSource {
    fn next_slot(&mut self, bound: usize) -> usize {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        (x % bound as u64) as usize
    }
}

/// Replays a fixed list of slots in a loop, reduced modulo the bound
#[derive(Debug, Clone)]
pub struct SequenceSource {
    slots: Vec<usize>,
    next: usize,
}

impl SequenceSource {
    /// An empty list always yields slot 0
    pub fn new(slots: Vec<usize>) -> Self {
        Self { slots, next: 0 }
    }
}

impl RandomSource for SequenceSource {
    fn next_slot(&mut self, bound: usize) -> usize {
        if self.slots.is_empty() {
            return 0;
        }
        let slot = self.slots[self.next % self.slots.len()];
        self.next = (self.next + 1) % self.slots.len();
        slot % bound
    }
}

/// A seed taken from the wall clock
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(XorShiftSource::ZERO_SEED_REPLACEMENT)
}
