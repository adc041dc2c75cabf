/// A single cross-validation fold: a training set and a testing set, copied out of the data.
///
/// For k-fold splits the test part is a block of rows (`Vec<X>`, `Vec<Y>`). Leave-one-out holds
/// out exactly one row, so its test part is the bare record and label; see `LeaveOneOutFold`.
#[derive(Debug, Clone, PartialEq)]
pub struct Fold<X, Y, TX = Vec<X>, TY = Vec<Y>> {
    pub train_x: Vec<X>,
    pub train_y: Vec<Y>,
    pub test_x: TX,
    pub test_y: TY,
}

/// Fold with a single held-out example.
pub type LeaveOneOutFold<X, Y> = Fold<X, Y, X, Y>;

impl<X, Y, TX, TY> Fold<X, Y, TX, TY> {
    /// number of training examples
    pub fn n_train(&self) -> usize {
        self.train_x.len()
    }

    /// `(train_x, train_y, test_x, test_y)`
    pub fn into_tuple(self) -> (Vec<X>, Vec<Y>, TX, TY) {
        (self.train_x, self.train_y, self.test_x, self.test_y)
    }
}

impl<X, Y> Fold<X, Y> {
    /// number of testing examples
    pub fn n_test(&self) -> usize {
        self.test_x.len()
    }
}

#[test]
fn fold_shapes() {
    let block: Fold<i32, u8> = Fold {
        train_x: vec![1, 2, 3],
        train_y: vec![0, 1, 0],
        test_x: vec![4],
        test_y: vec![1],
    };
    assert_eq!(block.n_train(), 3);
    assert_eq!(block.n_test(), 1);

    let single: LeaveOneOutFold<i32, u8> = Fold {
        train_x: vec![1, 2, 3],
        train_y: vec![0, 1, 0],
        test_x: 4,
        test_y: 1,
    };
    let (train_x, _, test_x, test_y) = single.into_tuple();
    assert_eq!(train_x, vec![1, 2, 3]);
    assert_eq!((test_x, test_y), (4, 1));
}
