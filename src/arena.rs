//! Generational slot arena backing the node-based containers.
//!
//! Nodes of the search tree and of the linked list live in an [`Arena`] and
//! refer to each other through plain slot indices. Handles given out to
//! callers carry the slot's generation as well, so a handle to an erased
//! element (even if its slot was reused later) is detected as stale instead
//! of silently aliasing a different element.

use std::ops::{Index, IndexMut};

/// A stable, generation-checked reference to an arena slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct SlotId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// A vector of reusable slots with a free list.
#[derive(Clone, Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    live: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Number of occupied slots.
    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.live
    }

    /// Upper bound on the number of elements an arena of `T` can address.
    pub(crate) const fn max_len() -> usize {
        let slot_size = std::mem::size_of::<Slot<T>>();
        if slot_size == 0 {
            usize::MAX
        } else {
            isize::MAX.unsigned_abs() / slot_size
        }
    }

    /// Stores `value`, reusing a free slot when one exists, and returns its index.
    pub(crate) fn insert(&mut self, value: T) -> usize {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            self.slots[index].value = Some(value);
            index
        } else {
            self.slots.push(Slot {
                generation: 0,
                value: Some(value),
            });
            self.slots.len() - 1
        }
    }

    /// Empties the slot at `index`, bumping its generation so outstanding
    /// handles become stale.
    pub(crate) fn remove(&mut self, index: usize) -> T {
        let slot = &mut self.slots[index];
        let Some(value) = slot.value.take() else {
            unreachable!("arena slot {index} removed twice")
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        self.live -= 1;
        value
    }

    /// Drops every element while keeping the slot storage, invalidating all
    /// handles.
    pub(crate) fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index);
        }
        self.live = 0;
    }

    /// The handle for an occupied slot.
    #[inline]
    pub(crate) fn id(&self, index: usize) -> SlotId {
        SlotId {
            index,
            generation: self.slots[index].generation,
        }
    }

    /// Resolves a handle back to a slot index if it still refers to a live element.
    pub(crate) fn resolve(&self, id: SlotId) -> Option<usize> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation && slot.value.is_some())
            .map(|_| id.index)
    }

    /// Hands out one mutable reference per occupied slot, indexed by slot.
    ///
    /// Vacant slots map to `None`. Callers pick entries out of the returned
    /// vector in whatever order they need.
    pub(crate) fn values_mut(&mut self) -> Vec<Option<&mut T>> {
        self.slots
            .iter_mut()
            .map(|slot| slot.value.as_mut())
            .collect()
    }

    /// Consumes the arena, returning the raw slot contents indexed by slot.
    pub(crate) fn into_values(self) -> Vec<Option<T>> {
        self.slots.into_iter().map(|slot| slot.value).collect()
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for Arena<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.slots[index].value.as_ref() {
            Some(value) => value,
            None => unreachable!("link to vacant arena slot {index}"),
        }
    }
}

impl<T> IndexMut<usize> for Arena<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.slots[index].value.as_mut() {
            Some(value) => value,
            None => unreachable!("link to vacant arena slot {index}"),
        }
    }
}
