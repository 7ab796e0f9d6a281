//! Slot arena with a free list
//!
//! Gold pieces are spawned and retired several times a second. Instead of
//! allocating each one, the pool keeps every slot it ever created and hands
//! retired slots back out, resetting them in place.
//!
//! - `slots` owns the storage and never shrinks
//! - `free` is a stack of slot indices ready for reuse
//! - `active` lists in-play slot indices in spawn order
//!
//! A slot index is in exactly one of `free` or `active`.

/// Reference to a pooled object. Handles go stale once their slot is released,
/// so a released-then-reused slot cannot be released twice by an old handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    item: T,
    generation: u32,
    active: bool,
}

/// Reusable object container
#[derive(Debug, Clone)]
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    active: Vec<u32>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            active: Vec::new(),
        }
    }

    /// Number of objects in play
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Number of retired objects waiting for reuse
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Total slots ever created
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn slot(&self, handle: Handle) -> Option<&Slot<T>> {
        self.slots
            .get(handle.index())
            .filter(|s| s.active && s.generation == handle.generation)
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slot(handle).map(|s| &s.item)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.index())
            .filter(|s| s.active && s.generation == handle.generation)
            .map(|s| &mut s.item)
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.slot(handle).is_some()
    }

    /// Return an object to the free list. Unknown or already released
    /// handles are ignored and report `false`.
    pub fn release(&mut self, handle: Handle) -> bool {
        if !self.contains(handle) {
            return false;
        }
        if let Some(pos) = self.active.iter().position(|&i| i == handle.index) {
            self.active.remove(pos);
        }
        self.retire(handle.index);
        true
    }

    fn retire(&mut self, index: u32) {
        if let Some(slot) = self.slots.get_mut(index as usize) {
            slot.active = false;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(index);
        }
    }

    /// Active objects in spawn order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Handle, &T)> + '_ {
        self.active.iter().filter_map(move |&index| {
            let slot = self.slots.get(index as usize)?;
            Some((
                Handle {
                    index,
                    generation: slot.generation,
                },
                &slot.item,
            ))
        })
    }

    /// Mutable access to every active object, in spawn order
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut T)) {
        for &index in &self.active {
            if let Some(slot) = self.slots.get_mut(index as usize) {
                f(&mut slot.item);
            }
        }
    }

    /// Visit active objects newest first and release every one for which `f`
    /// returns `false`. Spawn order of the survivors is preserved.
    pub fn retain_rev(&mut self, mut f: impl FnMut(&mut T) -> bool) {
        let mut released = false;
        for &index in self.active.iter().rev() {
            let Some(slot) = self.slots.get_mut(index as usize) else {
                continue;
            };
            if !f(&mut slot.item) {
                slot.active = false;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index);
                released = true;
            }
        }
        if released {
            let slots = &self.slots;
            self.active
                .retain(|&i| slots.get(i as usize).is_some_and(|s| s.active));
        }
    }

    /// Retire every active object. Storage is kept for reuse and every
    /// outstanding handle goes stale.
    pub fn clear(&mut self) {
        for &index in &self.active {
            if let Some(slot) = self.slots.get_mut(index as usize) {
                slot.active = false;
                slot.generation = slot.generation.wrapping_add(1);
            }
        }
        self.active.clear();
        // Lowest index on top so refills reuse slots front to back
        self.free = (0..self.slots.len() as u32).rev().collect();
    }
}

impl<T: Default> Pool<T> {
    /// Take a retired slot (or grow by one) and let `init` reset it to a
    /// fresh spawn state.
    pub fn acquire(&mut self, init: impl FnOnce(&mut T)) -> Handle {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot {
                    item: T::default(),
                    generation: 0,
                    active: false,
                });
                (self.slots.len() - 1) as u32
            }
        };

        let slot = &mut self.slots[index as usize];
        init(&mut slot.item);
        slot.active = true;
        self.active.push(index);

        Handle {
            index,
            generation: slot.generation,
        }
    }
}
