/// The resident tags of a single cache set
///
/// Storage is allocated once with exactly `associativity` slots and a count of how many are in
/// use, so a set can never hold more tags than it has ways. Slot 0 is the front (the next
/// eviction candidate for the queue based policies), slot `len - 1` is the back (the most
/// recently inserted or used tag).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSet {
    slots: Box<[u64]>,
    len: usize,
}

impl CacheSet {
    pub fn new(associativity: usize) -> Self {
        Self {
            slots: vec![0; associativity].into_boxed_slice(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// The slot holding `tag`, if it is resident
    pub fn position(&self, tag: u64) -> Option<usize> {
        self.slots[..self.len].iter().position(|resident| *resident == tag)
    }

    pub fn contains(&self, tag: u64) -> bool {
        self.position(tag).is_some()
    }

    /// Appends a tag at the back. Returns false, leaving the set unchanged, if the set is full.
    pub fn push_back(&mut self, tag: u64) -> bool {
        if self.is_full() {
            return false;
        }
        self.slots[self.len] = tag;
        self.len += 1;
        true
    }

    /// Removes the tag in `slot`, shifting everything behind it forward by one
    pub fn remove_at(&mut self, slot: usize) -> Option<u64> {
        if slot >= self.len {
            return None;
        }
        let tag = self.slots[slot];
        self.slots.copy_within(slot + 1..self.len, slot);
        self.len -= 1;
        Some(tag)
    }

    pub fn pop_front(&mut self) -> Option<u64> {
        self.remove_at(0)
    }

    /// Replaces the tag in an occupied slot in place, returning the old tag
    pub fn overwrite(&mut self, slot: usize, tag: u64) -> Option<u64> {
        if slot >= self.len {
            return None;
        }
        Some(std::mem::replace(&mut self.slots[slot], tag))
    }

    /// Resident tags, front to back
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.slots[..self.len].iter().copied()
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }
}
