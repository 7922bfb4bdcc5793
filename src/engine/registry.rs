//! Component Registry - Index allocation for parallel arrays.
//!
//! One [`Registry`] per thread owns every bookkeeping table: allocated and
//! free indices, explicit ids, the parent stack and destroy callbacks. A
//! separate generation signal lets deriveds follow the component set.
//!
//! The registry borrow is never held across a call out (array writes,
//! callbacks, signal sets), since any of those can synchronously re-run an
//! effect that reads the registry again.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

use spark_signals::{signal, Signal};

use super::arrays;

type DestroyCallback = Box<dyn FnOnce()>;

#[derive(Default)]
struct Registry {
    /// Sorted so child order follows allocation order.
    allocated: BTreeSet<usize>,
    free: Vec<usize>,
    next: usize,
    by_id: HashMap<String, usize>,
    ids: HashMap<usize, String>,
    parents: Vec<usize>,
    on_destroy: HashMap<usize, Vec<DestroyCallback>>,
}

impl Registry {
    fn take_index(&mut self) -> usize {
        self.free.pop().unwrap_or_else(|| {
            self.next += 1;
            self.next - 1
        })
    }

    fn children_of(&self, index: usize) -> Vec<usize> {
        self.allocated
            .iter()
            .copied()
            .filter(|&child| arrays::core::get_parent_index(child) == Some(index))
            .collect()
    }

    /// Forget `index`. Returns true when it was the last component.
    fn forget(&mut self, index: usize) -> bool {
        self.allocated.remove(&index);
        if let Some(id) = self.ids.remove(&index) {
            self.by_id.remove(&id);
        }
        if self.allocated.is_empty() {
            self.free.clear();
            self.next = 0;
            true
        } else {
            self.free.push(index);
            false
        }
    }
}

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::default());

    /// Bumped on every allocate and release.
    static GENERATION: Signal<u64> = signal(0);
}

fn with_registry<R>(f: impl FnOnce(&mut Registry) -> R) -> R {
    REGISTRY.with(|registry| f(&mut registry.borrow_mut()))
}

fn bump_generation() {
    GENERATION.with(|g| g.set(g.get().wrapping_add(1)));
}

// =============================================================================
// Parent Context Stack
// =============================================================================

/// Current parent index, `None` at the root.
pub fn get_current_parent_index() -> Option<usize> {
    with_registry(|r| r.parents.last().copied())
}

pub fn push_parent_context(index: usize) {
    with_registry(|r| r.parents.push(index));
}

pub fn pop_parent_context() {
    with_registry(|r| r.parents.pop());
}

// =============================================================================
// Allocation
// =============================================================================

/// Allocate an index for a new component.
///
/// An `id` that is already registered returns its existing index.
pub fn allocate_index(id: Option<&str>) -> usize {
    let index = with_registry(|r| {
        if let Some(&existing) = id.and_then(|id| r.by_id.get(id)) {
            return Err(existing);
        }
        let index = r.take_index();
        r.allocated.insert(index);
        if let Some(id) = id {
            r.by_id.insert(id.to_string(), index);
            r.ids.insert(index, id.to_string());
        }
        Ok(index)
    });

    match index {
        Ok(index) => {
            arrays::ensure_all_capacity(index);
            bump_generation();
            tracing::trace!(index, ?id, "allocated component index");
            index
        }
        Err(existing) => existing,
    }
}

/// Release an index and everything below it.
///
/// Children go first, then the component's destroy callbacks, then its
/// slots. Releasing the last component resets every array.
pub fn release_index(index: usize) {
    if !is_allocated(index) {
        return;
    }

    for child in with_registry(|r| r.children_of(index)) {
        release_index(child);
    }

    let callbacks = with_registry(|r| r.on_destroy.remove(&index)).unwrap_or_default();
    for callback in callbacks {
        callback();
    }

    arrays::clear_all_at_index(index);
    if with_registry(|r| r.forget(index)) {
        arrays::reset_all_arrays();
    }

    bump_generation();
    tracing::trace!(index, "released component index");
}

/// Run `callback` when the component at `index` is released.
pub fn on_destroy(index: usize, callback: impl FnOnce() + 'static) {
    with_registry(|r| r.on_destroy.entry(index).or_default().push(Box::new(callback)));
}

// =============================================================================
// Lookups
// =============================================================================

pub fn get_index(id: &str) -> Option<usize> {
    with_registry(|r| r.by_id.get(id).copied())
}

/// The explicit id given at allocation, if any.
pub fn get_id(index: usize) -> Option<String> {
    with_registry(|r| r.ids.get(&index).cloned())
}

/// All currently allocated indices in ascending order.
///
/// Reactive: a derived or effect calling this re-runs when components are
/// added or removed.
pub fn get_allocated_indices() -> Vec<usize> {
    let _ = GENERATION.with(|g| g.get());
    with_registry(|r| r.allocated.iter().copied().collect())
}

pub fn is_allocated(index: usize) -> bool {
    with_registry(|r| r.allocated.contains(&index))
}

pub fn get_allocated_count() -> usize {
    with_registry(|r| r.allocated.len())
}

/// Drop all registry state without running destroy callbacks (for tests).
pub fn reset_registry() {
    with_registry(|r| *r = Registry::default());
    arrays::reset_all_arrays();
    bump_generation();
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_signals::derived;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_allocate_and_lookup() {
        reset_registry();

        let a = allocate_index(None);
        let b = allocate_index(Some("greeting"));
        assert_eq!((a, b), (0, 1));
        assert_eq!(get_index("greeting"), Some(b));
        assert_eq!(get_id(b), Some("greeting".to_string()));
        assert_eq!(get_id(a), None);

        assert_eq!(allocate_index(Some("greeting")), b);
        assert_eq!(get_allocated_count(), 2);
    }

    #[test]
    fn test_release_reuses_index() {
        reset_registry();

        let first = allocate_index(Some("first"));
        let second = allocate_index(None);

        release_index(first);
        assert!(!is_allocated(first));
        assert!(is_allocated(second));
        assert_eq!(get_index("first"), None);

        assert_eq!(allocate_index(None), first);
    }

    #[test]
    fn test_release_is_recursive_and_runs_callbacks() {
        reset_registry();

        let parent = allocate_index(None);
        let child = allocate_index(None);
        arrays::core::set_parent_index(child, Some(parent));
        let other = allocate_index(None);

        let destroyed = Rc::new(Cell::new(0));
        let seen = destroyed.clone();
        on_destroy(child, move || seen.set(seen.get() + 1));

        release_index(parent);
        assert!(!is_allocated(child));
        assert!(is_allocated(other));
        assert_eq!(destroyed.get(), 1);

        // A second release is a no-op.
        release_index(parent);
        assert_eq!(destroyed.get(), 1);
    }

    #[test]
    fn test_last_release_starts_over() {
        reset_registry();

        let a = allocate_index(None);
        let b = allocate_index(None);
        release_index(b);
        release_index(a);

        assert_eq!(get_allocated_count(), 0);
        assert_eq!(allocate_index(None), 0);
    }

    #[test]
    fn test_parent_context() {
        reset_registry();

        assert_eq!(get_current_parent_index(), None);
        push_parent_context(5);
        push_parent_context(10);
        assert_eq!(get_current_parent_index(), Some(10));
        pop_parent_context();
        assert_eq!(get_current_parent_index(), Some(5));
        pop_parent_context();
        assert_eq!(get_current_parent_index(), None);
    }

    #[test]
    fn test_destroy_callback_may_query_registry() {
        reset_registry();

        let idx = allocate_index(None);
        let count_seen = Rc::new(Cell::new(usize::MAX));
        let seen = count_seen.clone();
        on_destroy(idx, move || seen.set(get_allocated_count()));

        release_index(idx);
        assert_eq!(count_seen.get(), 1);
    }

    #[test]
    fn test_allocated_indices_is_reactive() {
        reset_registry();

        let count = derived(|| get_allocated_indices().len());
        assert_eq!(count.get(), 0);

        let idx = allocate_index(None);
        assert_eq!(count.get(), 1);

        release_index(idx);
        assert_eq!(count.get(), 0);
    }
}
