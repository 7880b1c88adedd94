//! Compute-and-publish-once cells.
//!
//! Lazily computed values of embedded definitions (attribute sets, the frozen type list) may be
//! requested by several compilation threads at the same time. Instead of blocking, every
//! requester computes a candidate on its own and tries to publish it. The first publication
//! wins; every caller observes the winning value, and only the diagnostics of the winning
//! computation are handed back.

use std::sync::OnceLock;

use crate::embed::diagnostics::DiagnosticBag;

/// A value that is computed optimistically and published exactly once
#[derive(Debug)]
pub struct PublishOnce<T> {
    cell: OnceLock<T>,
}

impl<T> Default for PublishOnce<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PublishOnce<T> {
    /// Create an unpublished cell
    #[must_use]
    pub const fn new() -> Self {
        PublishOnce {
            cell: OnceLock::new(),
        }
    }

    /// The published value, if any
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    /// Returns true once a value has been published
    pub fn is_published(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Return the published value, computing and publishing a candidate if there is none.
    ///
    /// `compute` runs outside of any lock and reports into a private bag. The bag is returned
    /// only if this call published its candidate; a caller that lost the race (or found the
    /// value already published) gets `None` and its diagnostics are dropped.
    pub fn get_or_publish<F>(&self, compute: F) -> (&T, Option<DiagnosticBag>)
    where
        F: FnOnce(&DiagnosticBag) -> T,
    {
        if let Some(value) = self.cell.get() {
            return (value, None);
        }

        let diagnostics = DiagnosticBag::new();
        let candidate = compute(&diagnostics);

        let mut published = false;
        let value = self.cell.get_or_init(|| {
            published = true;
            candidate
        });

        (value, published.then_some(diagnostics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::diagnostics::{DiagnosticCode, Location};
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Barrier,
    };

    #[test]
    fn test_first_publication_wins() {
        let cell = PublishOnce::new();
        assert!(!cell.is_published());

        let (first, bag) = cell.get_or_publish(|d| {
            d.report(DiagnosticCode::NoPiaNestedType, Location::None, Vec::new());
            vec![1, 2, 3]
        });
        assert_eq!(first, &vec![1, 2, 3]);
        assert_eq!(bag.map(|b| b.len()), Some(1));

        let (second, bag) = cell.get_or_publish(|_| vec![4]);
        assert!(std::ptr::eq(first, second));
        assert!(bag.is_none());
    }

    #[test]
    fn test_racing_publishers_report_once() {
        let cell: PublishOnce<usize> = PublishOnce::new();
        let barrier = Barrier::new(8);
        let computed = AtomicUsize::new(0);
        let reported = AtomicUsize::new(0);

        std::thread::scope(|s| {
            for i in 0..8 {
                let (cell, barrier, computed, reported) = (&cell, &barrier, &computed, &reported);
                s.spawn(move || {
                    barrier.wait();
                    let (_, bag) = cell.get_or_publish(|d| {
                        computed.fetch_add(1, Ordering::SeqCst);
                        d.report(DiagnosticCode::NoPiaNestedType, Location::None, Vec::new());
                        i
                    });
                    if let Some(bag) = bag {
                        reported.fetch_add(bag.len(), Ordering::SeqCst);
                    }
                });
            }
        });

        assert!(computed.load(Ordering::SeqCst) >= 1);
        assert_eq!(reported.load(Ordering::SeqCst), 1);
        assert!(cell.get().is_some());
    }
}
