//! Delivery of generated folds, either into a returned `Vec` or straight into a training
//! callback.

use std::fmt;
use std::result::Result as StdResult;

use crate::error::{CallbackError, Error, Result};

/// What a training callback returns. Any error type converts into the boxed error with `?`.
pub type CallbackResult = StdResult<(), CallbackError>;

/// Destination of the folds produced by a partitioner.
pub enum FoldSink<'a, T> {
    /// keep every fold and return them all, in fold order, once generation completes
    Collect,
    /// hand each fold to the callback as soon as it exists; nothing is kept
    Invoke(Box<dyn FnMut(T) -> CallbackResult + 'a>),
}

impl<'a, T> FoldSink<'a, T> {
    pub fn invoke<F>(callback: F) -> Self
    where
        F: FnMut(T) -> CallbackResult + 'a,
    {
        FoldSink::Invoke(Box::new(callback))
    }

    pub fn is_collect(&self) -> bool {
        match *self {
            FoldSink::Collect => true,
            FoldSink::Invoke(_) => false,
        }
    }
}

impl<'a, T> Default for FoldSink<'a, T> {
    fn default() -> Self {
        FoldSink::Collect
    }
}

impl<'a, T> fmt::Debug for FoldSink<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            FoldSink::Collect => write!(f, "Collect"),
            FoldSink::Invoke(_) => write!(f, "Invoke(..)"),
        }
    }
}

/// Feeds folds into a `FoldSink`, one at a time and in order.
pub(crate) struct Emitter<'a, T> {
    sink: FoldSink<'a, T>,
    folds: Vec<T>,
    emitted: usize,
}

impl<'a, T> Emitter<'a, T> {
    pub(crate) fn new(sink: FoldSink<'a, T>, expected: usize) -> Self {
        let folds = if sink.is_collect() {
            Vec::with_capacity(expected)
        } else {
            Vec::new()
        };

        Emitter {
            sink,
            folds,
            emitted: 0,
        }
    }

    /// Deliver one fold. A failing callback aborts the whole run.
    pub(crate) fn emit(&mut self, fold: T) -> Result<()> {
        match self.sink {
            FoldSink::Collect => self.folds.push(fold),
            FoldSink::Invoke(ref mut callback) => callback(fold).map_err(Error::Callback)?,
        }
        trace!("Emitted fold {}", self.emitted);
        self.emitted += 1;
        Ok(())
    }

    /// The collected folds; empty when a callback consumed them.
    pub(crate) fn finish(self) -> Vec<T> {
        debug!("Generated {} folds", self.emitted);
        self.folds
    }
}
