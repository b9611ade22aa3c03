//! Bounded worker pool and the two submission strategies.
//!
//! A run owns one fixed-size rayon pool. [`Scheduler`] applies it to exactly
//! one axis, images or tiles, and runs the other axis inline on the calling
//! thread, so the pool is never entered from inside itself.

use crate::error::BatchError;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

/// Axis the worker pool is spread across.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parallelism {
    /// One task per source image; tiles of an image render in sequence.
    AcrossImages,
    /// Images in sequence; one task per tile of the current image.
    AcrossTiles,
}

pub struct Scheduler {
    pool: ThreadPool,
    threads: usize,
    parallelism: Parallelism,
}

impl Scheduler {
    pub fn new(threads: usize, parallelism: Parallelism) -> Result<Self, BatchError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("tiler-{i}"))
            .build()?;
        Ok(Self {
            pool,
            threads,
            parallelism,
        })
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn parallelism(&self) -> Parallelism {
        self.parallelism
    }

    /// Map `f` over source images; results keep input order.
    pub fn for_images<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        self.run(Parallelism::AcrossImages, items, f)
    }

    /// Map `f` over the tiles of one image; results keep input order.
    pub fn for_tiles<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        self.run(Parallelism::AcrossTiles, items, f)
    }

    fn run<T, R, F>(&self, axis: Parallelism, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        if axis == self.parallelism {
            self.pool.install(|| items.par_iter().map(f).collect())
        } else {
            items.iter().map(f).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[test]
    fn pooled_axis_preserves_order() {
        let scheduler = Scheduler::new(4, Parallelism::AcrossTiles).unwrap();
        let items: Vec<usize> = (0..100).collect();
        let out = scheduler.for_tiles(&items, |&i| i * 2);
        assert_eq!(out, items.iter().map(|i| i * 2).collect::<Vec<_>>());
    }

    #[test]
    fn only_selected_axis_uses_workers() {
        let scheduler = Scheduler::new(2, Parallelism::AcrossImages).unwrap();
        let caller = std::thread::current().id();
        let seen = Mutex::new(HashSet::new());
        let items: Vec<usize> = (0..8).collect();

        scheduler.for_tiles(&items, |_| {
            seen.lock().unwrap().insert(std::thread::current().id());
        });
        assert_eq!(*seen.lock().unwrap(), HashSet::from([caller]));

        seen.lock().unwrap().clear();
        scheduler.for_images(&items, |_| {
            seen.lock().unwrap().insert(std::thread::current().id());
        });
        let workers = seen.into_inner().unwrap();
        assert!(!workers.contains(&caller));
        assert!(workers.len() <= 2);
    }
}
