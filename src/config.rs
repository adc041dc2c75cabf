//! Serializable description of a validation procedure.
//!
//! ```
//! # use crossval::config::Strategy;
//! let strategy = Strategy::from_json(r#"{"type": "k_fold", "k": 10}"#).unwrap();
//! assert_eq!(strategy, Strategy::KFold { k: 10 });
//! ```

use crate::error::Result;
use crate::procedures::{IndexFold, KFold, LeaveOneOut, Procedure, DEFAULT_FOLDS};
use crate::shuffle::Permutation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Strategy {
    KFold {
        #[serde(default = "default_folds")]
        k: usize,
    },
    LeaveOneOut,
}

fn default_folds() -> usize {
    DEFAULT_FOLDS
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::KFold { k: DEFAULT_FOLDS }
    }
}

impl Strategy {
    /// Parse and validate a strategy from JSON.
    pub fn from_json(s: &str) -> Result<Self> {
        let strategy: Strategy = serde_json::from_str(s)?;
        strategy.validate()?;
        Ok(strategy)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Procedure for Strategy {
    fn index_folds(&self, permutation: &Permutation) -> Result<Vec<IndexFold>> {
        match *self {
            Strategy::KFold { k } => KFold::new(k)?.index_folds(permutation),
            Strategy::LeaveOneOut => LeaveOneOut.index_folds(permutation),
        }
    }

    /// fails with `Error::InvalidFoldCount` for `k < 1`
    fn validate(&self) -> Result<()> {
        if let Strategy::KFold { k } = *self {
            KFold::new(k)?;
        }
        Ok(())
    }
}
