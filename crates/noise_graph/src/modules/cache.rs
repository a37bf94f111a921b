//! Single-entry memo backing the cache module.
//!
//! A cache module remembers the last coordinate it was asked for and the value its source
//! produced there. A repeated query for exactly the same coordinate is answered without
//! evaluating the source again.
//!
//! The memo is not a synchronisation point. It is only ever accessed with `try_lock`: when two
//! threads hit the same cache module at once, the loser skips the memo and evaluates the source
//! itself, and its result may or may not be the one left behind. Returned values are always
//! correct because the source is pure; only the hit/miss bookkeeping is racy.
use std::sync::Mutex;

#[derive(Clone, Copy, Debug, PartialEq)]
struct MemoEntry {
    point: [f64; 3],
    value: f64,
}

/// Last-coordinate memo of a cache module.
#[derive(Debug, Default)]
pub struct CacheMemo {
    entry: Mutex<Option<MemoEntry>>,
}

impl CacheMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the memoized value when `(x, y, z)` equals the last stored coordinate, otherwise
    /// runs `compute`, stores its result and returns it.
    pub fn get_or_compute(&self, x: f64, y: f64, z: f64, compute: impl FnOnce() -> f64) -> f64 {
        let point = [x, y, z];
        if let Ok(guard) = self.entry.try_lock() {
            if let Some(entry) = *guard {
                if entry.point == point {
                    return entry.value;
                }
            }
        }

        let value = compute();
        if let Ok(mut guard) = self.entry.try_lock() {
            *guard = Some(MemoEntry { point, value });
        }
        value
    }

    /// Forgets the stored entry.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.entry.lock() {
            *guard = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn repeated_coordinate_hits_memo() {
        let memo = CacheMemo::new();
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            0.25
        };

        assert_eq!(memo.get_or_compute(1.0, 2.0, 3.0, compute), 0.25);
        assert_eq!(memo.get_or_compute(1.0, 2.0, 3.0, compute), 0.25);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn new_coordinate_replaces_entry() {
        let memo = CacheMemo::new();
        assert_eq!(memo.get_or_compute(0.0, 0.0, 0.0, || 1.0), 1.0);
        assert_eq!(memo.get_or_compute(0.0, 0.0, 1.0, || 2.0), 2.0);
        assert_eq!(memo.get_or_compute(0.0, 0.0, 1.0, || 3.0), 2.0);
        assert_eq!(memo.get_or_compute(0.0, 0.0, 0.0, || 4.0), 4.0);
    }

    #[test]
    fn clear_forces_recompute() {
        let memo = CacheMemo::new();
        memo.get_or_compute(1.0, 1.0, 1.0, || 1.0);
        memo.clear();
        assert_eq!(memo.get_or_compute(1.0, 1.0, 1.0, || 5.0), 5.0);
    }

    #[test]
    fn nan_coordinates_never_hit() {
        let memo = CacheMemo::new();
        memo.get_or_compute(f64::NAN, 0.0, 0.0, || 1.0);
        assert_eq!(memo.get_or_compute(f64::NAN, 0.0, 0.0, || 2.0), 2.0);
    }
}
