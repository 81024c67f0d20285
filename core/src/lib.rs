//! textdiff: a library for comparing token sequences.
//!
//! This crate provides functionality for:
//! - Normalizing and tokenizing raw text into comparable word streams
//! - Computing a fuzzy, order-preserving diff between two token sequences
//! - Rearranging a shuffled sequence to mirror a reference ordering
//! - Deriving evaluation metrics (precision/recall, distance/similarity)
//!
//! # Quick Start
//!
//! ```
//! use textdiff::{diff, DiffConfig};
//!
//! let report = diff(&["Hello", "World"], &["Hello", "World"], &DiffConfig::exact())?;
//! assert!(report.is_identical());
//! # Ok::<(), textdiff::DiffError>(())
//! ```

use std::cell::RefCell;

mod config;
mod diff;
mod engine;
pub(crate) mod error_codes;
pub(crate) mod fuzzy_index;
mod metric;
mod metrics;
mod rearrange;
mod session;
mod token_pool;
mod tokenize;

thread_local! {
    static DEFAULT_SESSION: RefCell<DiffSession> = RefCell::new(DiffSession::new());
}

#[doc(hidden)]
pub fn with_default_session<T>(f: impl FnOnce(&mut DiffSession) -> T) -> T {
    DEFAULT_SESSION.with(|session| {
        let mut session = session.borrow_mut();
        f(&mut session)
    })
}

/// Diffs two token sequences using a thread-local session.
pub fn diff<S: AsRef<str>>(
    old: &[S],
    new: &[S],
    config: &DiffConfig,
) -> Result<DiffReport, DiffError> {
    with_default_session(|session| session.diff(old, new, config))
}

/// Reorders `new` to mirror `old` using a thread-local session.
pub fn rearrange<S: AsRef<str>>(
    old: &[S],
    new: &[S],
    config: &DiffConfig,
) -> Result<Vec<String>, DiffError> {
    with_default_session(|session| session.rearrange(old, new, config))
}

pub use config::{ConfigError, DiffConfig, DiffConfigBuilder};
pub use diff::{
    CommonItem, DeleteItem, DiffError, DiffReport, InsertItem, MergedItem, ReplaceGroup,
    serialize_diff_report,
};
pub use metric::{EditDistance, TokenMetric};
pub use metrics::{DistanceSimilarity, PrecisionRecall, distance_similarity, precision_recall};
pub use session::DiffSession;
pub use token_pool::{TokenId, TokenPool};
pub use tokenize::{TokenizeConfig, Tokenizer};
