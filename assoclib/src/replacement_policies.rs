use crate::random::RandomSource;
use crate::set::CacheSet;

/// A generic trait for replacement policies. Used to parameterise a Cache.
///
/// Policies act directly on the tag order of a set: the front of a `CacheSet` is always the
/// next tag a queue based policy evicts
pub trait ReplacementPolicy {
    /// Updates the policy when a resident tag is read
    ///
    /// Not applicable for some policies, a default which does nothing is provided
    ///
    /// # Arguments
    ///
    /// * `set`: The set the hit occurred in
    /// * `slot`: The slot of the tag which was read
    ///
    /// returns: ()
    fn update_on_hit(&mut self, _set: &mut CacheSet, _slot: usize) {}

    /// Inserts `tag` into a full set, evicting a resident tag to make room
    ///
    /// Only called on a miss when `set.is_full()`; filling empty ways is done by the cache
    ///
    /// returns: Option<u64>, the evicted tag
    fn replace(&mut self, set: &mut CacheSet, tag: u64) -> Option<u64>;
}

/// Least Recently Used replacement policy
///
/// A hit moves the tag to the back of its set, so the front is always the least recently used
#[derive(Debug, Default, Clone, Copy)]
pub struct LeastRecentlyUsed;

impl ReplacementPolicy for LeastRecentlyUsed {
    fn update_on_hit(&mut self, set: &mut CacheSet, slot: usize) {
        if let Some(tag) = set.remove_at(slot) {
            set.push_back(tag);
        }
    }

    fn replace(&mut self, set: &mut CacheSet, tag: u64) -> Option<u64> {
        let evicted = set.pop_front();
        set.push_back(tag);
        evicted
    }
}

/// First In First Out replacement policy
///
/// Evicts in insertion order. Hits never reorder the set.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstInFirstOut;

impl ReplacementPolicy for FirstInFirstOut {
    fn replace(&mut self, set: &mut CacheSet, tag: u64) -> Option<u64> {
        let evicted = set.pop_front();
        set.push_back(tag);
        evicted
    }
}

/// Random replacement policy
///
/// Overwrites a uniformly chosen way in place. This is positional, so after the first random
/// eviction the order of the set no longer reflects age.
pub struct RandomReplacement<S: RandomSource> {
    source: S,
}

impl<S: RandomSource> RandomReplacement<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: RandomSource> ReplacementPolicy for RandomReplacement<S> {
    fn replace(&mut self, set: &mut CacheSet, tag: u64) -> Option<u64> {
        let slot = self.source.next_slot(set.capacity());
        set.overwrite(slot, tag)
    }
}
