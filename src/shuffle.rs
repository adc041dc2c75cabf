//! Random orderings of sample indices.
//!
//! Every partitioning call draws exactly one `Permutation` from an `IndexShuffler`. The
//! shuffler is a parameter rather than global state, so tests and callers that need a known
//! ordering can inject one with `FixedShuffler`, or seed the generator of a `RandomShuffler`.

use std::ops::Deref;

use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};

/// An ordering of the integers `0..n`, each appearing exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// the ordering `0, 1, ..., n-1`
    pub fn identity(n: usize) -> Self {
        Permutation((0..n).collect())
    }

    /// Check that `order` contains every index below its length exactly once.
    pub fn from_vec(order: Vec<usize>) -> Result<Self> {
        let n = order.len();
        let mut seen = vec![false; n];
        for &i in &order {
            if i >= n {
                return Err(Error::InvalidPermutation(format!(
                    "index {} out of range for length {}",
                    i, n
                )));
            }
            if seen[i] {
                return Err(Error::InvalidPermutation(format!("index {} appears twice", i)));
            }
            seen[i] = true;
        }
        Ok(Permutation(order))
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }
}

impl Deref for Permutation {
    type Target = [usize];

    #[inline(always)]
    fn deref(&self) -> &[usize] {
        &self.0
    }
}

/// Source of index orderings used by the partitioners.
pub trait IndexShuffler {
    /// produce an ordering of `0..n`
    fn shuffle(&mut self, n: usize) -> Result<Permutation>;
}

impl<'a, S: IndexShuffler + ?Sized> IndexShuffler for &'a mut S {
    #[inline(always)]
    fn shuffle(&mut self, n: usize) -> Result<Permutation> {
        (**self).shuffle(n)
    }
}

/// Uniformly random orderings drawn from a general purpose (non-cryptographic) generator.
#[derive(Debug, Clone)]
pub struct RandomShuffler<R = ThreadRng> {
    rng: R,
}

impl RandomShuffler<ThreadRng> {
    /// shuffle with the thread-local generator
    pub fn new() -> Self {
        RandomShuffler {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for RandomShuffler<ThreadRng> {
    fn default() -> Self {
        RandomShuffler::new()
    }
}

impl<R: Rng> RandomShuffler<R> {
    /// shuffle with a caller-supplied generator
    pub fn with_rng(rng: R) -> Self {
        RandomShuffler { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> IndexShuffler for RandomShuffler<R> {
    fn shuffle(&mut self, n: usize) -> Result<Permutation> {
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(&mut self.rng);
        trace!("Shuffled {} indices", n);
        Ok(Permutation(order))
    }
}

/// Hands out the same ordering on every call. Used to replay or test a partitioning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedShuffler {
    permutation: Permutation,
}

impl FixedShuffler {
    pub fn new(permutation: Permutation) -> Self {
        FixedShuffler { permutation }
    }

    /// no shuffling at all: samples keep their original order
    pub fn identity(n: usize) -> Self {
        FixedShuffler::new(Permutation::identity(n))
    }
}

impl IndexShuffler for FixedShuffler {
    fn shuffle(&mut self, n: usize) -> Result<Permutation> {
        if self.permutation.len() != n {
            return Err(Error::InvalidPermutation(format!(
                "fixed ordering has length {}, but {} samples were requested",
                self.permutation.len(),
                n
            )));
        }
        Ok(self.permutation.clone())
    }
}
