use crate::random::RandomSource;
use crate::replacement_policies::{FirstInFirstOut, LeastRecentlyUsed, RandomReplacement, ReplacementPolicy};
use crate::set::CacheSet;

/// The random source held by a type-erased random cache
pub type BoxedRandomSource = Box<dyn RandomSource + Send>;

/// What a lookup did to its set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The tag was resident
    Hit,
    /// Miss into a set with a free way; nothing was evicted
    Fill,
    /// Miss into a full set; the contained tag was evicted
    Evict(u64),
}

impl Lookup {
    pub fn is_hit(&self) -> bool {
        matches!(self, Lookup::Hit)
    }
}

/// A generic trait for caches
///
/// Technically not required as we're using static dispatch instead of dyn Cache, but it keeps
/// the per-policy caches and `GenericCache` interchangeable
///
/// The trait assumes that decoding addresses into a set index and a tag is the responsibility of
/// the caller, and that the index is in range
pub trait CacheTrait {
    /// Looks up a tag in a set, returning what happened
    ///
    /// On both hits and misses, the implementation must update the set and the replacement
    /// policy
    ///
    /// # Arguments
    ///
    /// * `index`: The set the address maps to
    /// * `tag`: The tag of the address
    ///
    /// returns: Lookup
    fn lookup_and_update(&mut self, index: usize, tag: u64) -> Lookup;

    /// All sets, in index order
    fn sets(&self) -> &[CacheSet];

    /// Empties every set. The replacement policy keeps its state (e.g. its random source).
    fn clear(&mut self);

    /// Gets the number of ways which have never been filled. Useful for analysing cache
    /// performance or debugging
    fn get_uninitialised_line_count(&self) -> usize {
        self.sets().iter().map(|set| set.capacity() - set.len()).sum()
    }
}

/// A generic set-associative cache, parameterised by a replacement policy
///
/// Lookup and the filling of empty ways are the same for every policy; the policy only decides
/// what a hit does to the order of a set and which tag leaves a full set
pub struct Cache<R: ReplacementPolicy> {
    sets: Vec<CacheSet>,
    replacement_policy: R,
}

impl<R: ReplacementPolicy> Cache<R> {
    pub fn new(num_sets: usize, associativity: usize, policy: R) -> Self {
        Self {
            sets: (0..num_sets).map(|_| CacheSet::new(associativity)).collect(),
            replacement_policy: policy,
        }
    }
}

impl<R: ReplacementPolicy> CacheTrait for Cache<R> {
    fn lookup_and_update(&mut self, index: usize, tag: u64) -> Lookup {
        let set = &mut self.sets[index];
        if let Some(slot) = set.position(tag) {
            self.replacement_policy.update_on_hit(set, slot);
            return Lookup::Hit;
        }
        // Compulsory fill, no replacement needed
        if set.push_back(tag) {
            return Lookup::Fill;
        }
        match self.replacement_policy.replace(set, tag) {
            Some(evicted) => Lookup::Evict(evicted),
            None => Lookup::Fill,
        }
    }

    fn sets(&self) -> &[CacheSet] {
        &self.sets
    }

    fn clear(&mut self) {
        self.sets.iter_mut().for_each(CacheSet::clear);
    }
}

/// Enum for the 3 types of cache provided by the library
///
/// It's faster to explicitly branch on all implementations than to go through a trait object on
/// every access, as the compiler can reason about the concrete types, perform function inlining etc
pub enum GenericCache {
    LeastRecentlyUsed(Cache<LeastRecentlyUsed>),
    FirstInFirstOut(Cache<FirstInFirstOut>),
    Random(Cache<RandomReplacement<BoxedRandomSource>>),
}

impl From<Cache<LeastRecentlyUsed>> for GenericCache {
    fn from(value: Cache<LeastRecentlyUsed>) -> Self {
        Self::LeastRecentlyUsed(value)
    }
}

impl From<Cache<FirstInFirstOut>> for GenericCache {
    fn from(value: Cache<FirstInFirstOut>) -> Self {
        Self::FirstInFirstOut(value)
    }
}

impl From<Cache<RandomReplacement<BoxedRandomSource>>> for GenericCache {
    fn from(value: Cache<RandomReplacement<BoxedRandomSource>>) -> Self {
        Self::Random(value)
    }
}

impl CacheTrait for GenericCache {
    fn lookup_and_update(&mut self, index: usize, tag: u64) -> Lookup {
        match self {
            GenericCache::LeastRecentlyUsed(c) => c.lookup_and_update(index, tag),
            GenericCache::FirstInFirstOut(c) => c.lookup_and_update(index, tag),
            GenericCache::Random(c) => c.lookup_and_update(index, tag),
        }
    }

    fn sets(&self) -> &[CacheSet] {
        match self {
            GenericCache::LeastRecentlyUsed(c) => c.sets(),
            GenericCache::FirstInFirstOut(c) => c.sets(),
            GenericCache::Random(c) => c.sets(),
        }
    }

    fn clear(&mut self) {
        match self {
            GenericCache::LeastRecentlyUsed(c) => c.clear(),
            GenericCache::FirstInFirstOut(c) => c.clear(),
            GenericCache::Random(c) => c.clear(),
        }
    }
}
