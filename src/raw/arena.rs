use alloc::vec::Vec;

use super::handle::{Handle, Link};

enum Slot<T> {
    Occupied(T),
    // Vacant slots form an intrusive singly linked free list.
    Vacant { next_free: Link },
}

/// Slot storage for tree nodes and values. Freed slots are threaded onto a free list
/// and reused by later allocations, so releasing a subtree never needs recursion.
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Link,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        let handle = if let Some(h) = self.free_head {
            let slot = &mut self.slots[h.to_index()];
            let Slot::Vacant { next_free } = *slot else {
                panic!("`Arena::alloc()` - free list points at an occupied slot!");
            };
            self.free_head = next_free;
            *slot = Slot::Occupied(element);
            h
        } else {
            assert!(
                self.slots.len() <= Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX + 1
            );
            self.slots.push(Slot::Occupied(element));
            Handle::from_index(self.slots.len() - 1)
        };
        self.len += 1;
        handle
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        match self.slots.get(handle.to_index()) {
            Some(Slot::Occupied(element)) => element,
            _ => panic!("`Arena::get()` - `handle` is invalid!"),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        match self.slots.get_mut(handle.to_index()) {
            Some(Slot::Occupied(element)) => element,
            _ => panic!("`Arena::get_mut()` - `handle` is invalid!"),
        }
    }

    /// Returns a mutable reference to one element through a raw arena pointer, without
    /// borrowing any other slot.
    ///
    /// # Safety
    /// - `ptr` must point to a valid `Arena<T>` that outlives `'a`.
    /// - No other reference to the slot named by `handle` may be live during `'a`, and
    ///   the arena must not be resized or otherwise mutated during `'a`.
    #[inline]
    pub(crate) unsafe fn get_mut_ptr<'a>(ptr: *mut Self, handle: Handle) -> &'a mut T {
        // SAFETY: The caller guarantees `ptr` is valid. Only the `Vec` header is borrowed
        // here; the element is reached through a raw pointer so slots handed out earlier
        // for other handles stay untouched.
        unsafe {
            let slots = &mut (*ptr).slots;
            let index = handle.to_index();
            assert!(index < slots.len(), "`Arena::get_mut_ptr()` - `handle` is invalid!");
            match &mut *slots.as_mut_ptr().add(index) {
                Slot::Occupied(element) => element,
                Slot::Vacant { .. } => panic!("`Arena::get_mut_ptr()` - `handle` is invalid!"),
            }
        }
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let slot = self.slots.get_mut(handle.to_index()).expect("`Arena::take()` - `handle` is invalid!");
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        match core::mem::replace(slot, vacant) {
            Slot::Occupied(element) => {
                self.free_head = Some(handle);
                self.len -= 1;
                element
            }
            already_vacant @ Slot::Vacant { .. } => {
                // Put the vacant marker back untouched before reporting the misuse.
                *slot = already_vacant;
                panic!("`Arena::take()` - `handle` is invalid!");
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn arena_capacity() {
        let arena: Arena<u32> = Arena::with_capacity(10);
        assert_eq!(arena.capacity(), 10);
        assert!(arena.is_empty());
    }

    #[test]
    fn freed_slots_are_reused_last_in_first_out() {
        let mut arena = Arena::new();
        let a = arena.alloc('a');
        let b = arena.alloc('b');
        let _c = arena.alloc('c');

        assert_eq!(arena.take(a), 'a');
        assert_eq!(arena.take(b), 'b');
        assert_eq!(arena.len(), 1);

        assert_eq!(arena.alloc('d'), b);
        assert_eq!(arena.alloc('e'), a);
        assert_eq!(*arena.get(a), 'e');
        assert_eq!(arena.len(), 3);
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is invalid!")]
    fn get_after_take_panics() {
        let mut arena = Arena::new();
        let h = arena.alloc(1u8);
        arena.take(h);
        let _ = arena.get(h);
    }

    #[test]
    #[should_panic(expected = "`Arena::take()` - `handle` is invalid!")]
    fn double_take_panics() {
        let mut arena = Arena::new();
        let h = arena.alloc(1u8);
        arena.take(h);
        arena.take(h);
    }

    #[test]
    fn raw_pointer_access_is_disjoint() {
        let mut arena = Arena::new();
        let a = arena.alloc(1);
        let b = arena.alloc(2);
        let ptr: *mut Arena<i32> = &raw mut arena;

        // SAFETY: `a` and `b` are distinct live handles and the arena is not touched otherwise.
        let (x, y) = unsafe { (Arena::get_mut_ptr(ptr, a), Arena::get_mut_ptr(ptr, b)) };
        *x += 10;
        *y += 20;

        assert_eq!(*arena.get(a), 11);
        assert_eq!(*arena.get(b), 22);
    }

    proptest! {
        #[test]
        fn arena_behaves_like_vec(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(Handle, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for operation in operations {
                match operation {
                    Operation::Alloc(value) => {
                        let handle = arena.alloc(value);
                        prop_assert!(model.iter().all(|&(h, _)| h != handle));
                        model.push((handle, value));
                    }
                    Operation::GetMut(which, value) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let handle = model[index].0;
                        *arena.get_mut(handle) = value;
                        model[index].1 = value;
                    }
                    Operation::Take(which) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let handle = model[index].0;
                        let value1 = arena.take(handle);
                        let (_, value2) = model.swap_remove(index);
                        prop_assert_eq!(value1, value2);
                    }
                    Operation::Clear => {
                        arena.clear();
                        model.clear();
                    }
                }

                prop_assert_eq!(arena.len(), model.len());
                prop_assert_eq!(arena.is_empty(), model.is_empty());

                for &(handle, value) in &model {
                    prop_assert_eq!(*arena.get(handle), value);
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Alloc(u32),
        GetMut(usize, u32),
        Take(usize),
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => any::<u32>().prop_map(Operation::Alloc),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::GetMut(which, value)),
            10 => any::<usize>().prop_map(Operation::Take),
            1 => Just(Operation::Clear),
        ]
    }
}
