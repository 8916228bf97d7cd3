//! Request-scoped memoization cell.

use std::cell::RefCell;

/// A request-scoped memo cell.
///
/// Holds one computed value for the duration of a request. The first call to
/// [`get_or_compute`](Self::get_or_compute) runs the closure and stores the
/// result; later calls return a clone. [`reset`](Self::reset) clears the cell
/// and must be called at request boundaries — the memo deliberately has no
/// other expiry.
///
/// Built on `RefCell`: a memo (and anything holding one) is single-threaded
/// by contract, matching the request-scoped execution model of the render
/// pipeline. Process-wide sharing goes through the [`Cache`](crate::Cache)
/// port instead.
#[derive(Debug, Default)]
pub struct Memo<T: Clone> {
    slot: RefCell<Option<T>>,
}

impl<T: Clone> Memo<T> {
    /// Create an empty memo cell.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: RefCell::new(None),
        }
    }

    /// Return the memoized value, computing it on first access.
    pub fn get_or_compute(&self, compute: impl FnOnce() -> T) -> T {
        let mut slot = self.slot.borrow_mut();
        if let Some(value) = slot.as_ref() {
            return value.clone();
        }
        let value = compute();
        *slot = Some(value.clone());
        value
    }

    /// Clear the memoized value.
    pub fn reset(&self) {
        *self.slot.borrow_mut() = None;
    }

    /// Whether a value has been memoized.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.slot.borrow().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computes_once() {
        let memo = Memo::new();
        let mut calls = 0;

        let first = memo.get_or_compute(|| {
            calls += 1;
            42
        });
        let second = memo.get_or_compute(|| {
            calls += 1;
            99
        });

        assert_eq!(first, 42);
        assert_eq!(second, 42);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_reset_recomputes() {
        let memo = Memo::new();

        assert_eq!(memo.get_or_compute(|| 1), 1);
        assert!(memo.is_filled());

        memo.reset();
        assert!(!memo.is_filled());
        assert_eq!(memo.get_or_compute(|| 2), 2);
    }
}
