use crate::error::{Error, Result};

/// Feature records paired positionally with their labels.
///
/// A `DataSet` only borrows the two columns; partitioners copy the rows they need into each
/// fold and never modify the source.
#[derive(Debug)]
pub struct DataSet<'a, X, Y> {
    x: &'a [X],
    y: &'a [Y],
}

impl<'a, X, Y> Clone for DataSet<'a, X, Y> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, X, Y> Copy for DataSet<'a, X, Y> {}

impl<'a, X, Y> DataSet<'a, X, Y> {
    /// Pair features and labels. Both must have the same length.
    pub fn new(x: &'a [X], y: &'a [Y]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::LengthMismatch {
                features: x.len(),
                labels: y.len(),
            });
        }
        Ok(DataSet { x, y })
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn features(&self) -> &'a [X] {
        self.x
    }

    pub fn labels(&self) -> &'a [Y] {
        self.y
    }

    pub fn get(&self, i: usize) -> Option<(&'a X, &'a Y)> {
        match (self.x.get(i), self.y.get(i)) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        }
    }
}

impl<'a, X: Clone, Y: Clone> DataSet<'a, X, Y> {
    /// Copy the rows named by `indices`, in that order, into fresh feature and label columns.
    pub fn select(&self, indices: &[usize]) -> Result<(Vec<X>, Vec<Y>)> {
        let mut x = Vec::with_capacity(indices.len());
        let mut y = Vec::with_capacity(indices.len());
        for &i in indices {
            let (xi, yi) = self.get(i).ok_or(Error::IndexOutOfBounds {
                index: i,
                len: self.len(),
            })?;
            x.push(xi.clone());
            y.push(yi.clone());
        }
        Ok((x, y))
    }
}
