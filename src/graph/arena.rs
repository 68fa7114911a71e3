//! Generational slot arena backing the graph container.
//!
//! Vertices and edges live in vector-backed arenas and are addressed by
//! `(index, generation)` keys. Removing a record frees its slot onto an
//! intrusive free list and bumps the slot generation, so a key held across
//! a removal is recognized as stale instead of silently addressing whatever
//! record reused the slot.
//!
//! ### Performance Characteristics
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `insert` | \(O(1)\) amortized | Reuses the lowest freed slot first |
//! | `get` / `get_mut` | \(O(1)\) | Generation-checked index |
//! | `remove` | \(O(1)\) | Pushes the slot onto the free list |
//! | `iter` | \(O(\text{slots})\) | Slot order, which is insertion order until a removal |

/// Sentinel for "no further free slot" in the intrusive free list.
const FREE_END: u32 = u32::MAX;

/// Key addressing one occupied slot of an [`Arena`].
///
/// Keys are cheap to copy and remain stable while their record is alive.
/// A key outliving its record fails the generation check and behaves like
/// a key from a different arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SlotKey {
    index: u32,
    generation: u32,
}

impl SlotKey {
    /// Dense position of the slot, usable to index side tables.
    pub(crate) fn index(self) -> usize {
        self.index as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Slot<T> {
    Occupied { generation: u32, value: T },
    Vacant { generation: u32, next_free: u32 },
}

/// Vector-backed store with generational keys and slot reuse.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: u32,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: FREE_END,
            len: 0,
        }
    }

    /// Number of live records.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Upper bound (exclusive) on `SlotKey::index` values ever handed out.
    ///
    /// Side tables indexed by slot can be sized with this.
    pub(crate) fn slot_bound(&self) -> usize {
        self.slots.len()
    }

    /// Stores `value` and returns its key.
    ///
    /// # Panics
    /// Panics if the arena would exceed `u32::MAX - 1` slots.
    pub(crate) fn insert(&mut self, value: T) -> SlotKey {
        self.len += 1;
        if self.free_head != FREE_END {
            let index = self.free_head;
            let slot = &mut self.slots[index as usize];
            let Slot::Vacant {
                generation,
                next_free,
            } = *slot
            else {
                unreachable!("free list points at an occupied slot");
            };
            self.free_head = next_free;
            *slot = Slot::Occupied { generation, value };
            return SlotKey { index, generation };
        }

        assert!(
            self.slots.len() < FREE_END as usize,
            "arena capacity exceeded"
        );
        let index = self.slots.len() as u32;
        self.slots.push(Slot::Occupied {
            generation: 0,
            value,
        });
        SlotKey {
            index,
            generation: 0,
        }
    }

    pub(crate) fn get(&self, key: SlotKey) -> Option<&T> {
        match self.slots.get(key.index as usize) {
            Some(Slot::Occupied { generation, value }) if *generation == key.generation => {
                Some(value)
            }
            _ => None,
        }
    }

    pub(crate) fn get_mut(&mut self, key: SlotKey) -> Option<&mut T> {
        match self.slots.get_mut(key.index as usize) {
            Some(Slot::Occupied { generation, value }) if *generation == key.generation => {
                Some(value)
            }
            _ => None,
        }
    }

    pub(crate) fn contains(&self, key: SlotKey) -> bool {
        self.get(key).is_some()
    }

    /// Frees the record behind `key`, returning its value.
    ///
    /// The slot's generation is bumped so the removed key (and any copy of
    /// it) goes stale. Returns `None` if the key is already stale.
    pub(crate) fn remove(&mut self, key: SlotKey) -> Option<T> {
        let slot = self.slots.get_mut(key.index as usize)?;
        match slot {
            Slot::Occupied { generation, .. } if *generation == key.generation => {
                let vacant = Slot::Vacant {
                    generation: key.generation.wrapping_add(1),
                    next_free: self.free_head,
                };
                let Slot::Occupied { value, .. } = core::mem::replace(slot, vacant) else {
                    unreachable!("slot occupancy checked above");
                };
                self.free_head = key.index;
                self.len -= 1;
                Some(value)
            }
            _ => None,
        }
    }

    /// Frees every record while keeping all slots stale-detectable.
    ///
    /// Every slot survives as vacant with a bumped generation and the free
    /// list is rebuilt in ascending slot order, so insertion after a clear
    /// fills the arena front to back again.
    pub(crate) fn clear(&mut self) {
        let bound = self.slots.len();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let generation = match *slot {
                Slot::Occupied { generation, .. } => generation.wrapping_add(1),
                Slot::Vacant { generation, .. } => generation,
            };
            let next_free = if i + 1 < bound {
                (i + 1) as u32
            } else {
                FREE_END
            };
            *slot = Slot::Vacant {
                generation,
                next_free,
            };
        }
        self.free_head = if bound == 0 { FREE_END } else { 0 };
        self.len = 0;
    }

    /// Iterates live records in slot order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (SlotKey, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                Slot::Occupied { generation, value } => Some((
                    SlotKey {
                        index: index as u32,
                        generation: *generation,
                    },
                    value,
                )),
                Slot::Vacant { .. } => None,
            })
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}
