//! Diff result types for token sequence comparison.
//!
//! This module defines the types produced by the diff engine:
//! - [`CommonItem`], [`DeleteItem`], [`InsertItem`]: per-token outcomes with
//!   their aligned positions
//! - [`ReplaceGroup`]: a maximal contiguous mismatch region
//! - [`DiffReport`]: a versioned collection of commons and replace groups
//! - [`DiffError`]: errors surfaced by the diffing APIs

use crate::config::ConfigError;
use crate::token_pool::TokenId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A token present in both sequences at the given aligned positions.
///
/// `pos_old` advances only across old-side consumption, `pos_new` only across
/// new-side consumption; both are indices into the conceptual merged output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonItem {
    pub pos_old: u32,
    pub pos_new: u32,
    pub token: TokenId,
}

/// A token present only in the old sequence.
///
/// `matched` starts false and flips once the rearrangement pass associates
/// this deletion with an insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteItem {
    pub pos_old: u32,
    pub pos_new: u32,
    pub token: TokenId,
    #[serde(default)]
    pub matched: bool,
}

/// A token present only in the new sequence.
///
/// Positions are rewritten by the rearrangement pass when the insertion is
/// matched to a deletion (it moves next to the deleted slot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertItem {
    pub pos_old: u32,
    pub pos_new: u32,
    pub token: TokenId,
    #[serde(default)]
    pub matched: bool,
}

/// A maximal contiguous region where the sequences diverge, bounded by
/// commons or by the sequence boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReplaceGroup {
    pub deletes: Vec<DeleteItem>,
    pub inserts: Vec<InsertItem>,
}

/// One entry of the merged position-ordered view of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MergedItem {
    Common {
        pos_old: u32,
        pos_new: u32,
        token: TokenId,
    },
    Delete {
        pos_old: u32,
        pos_new: u32,
        token: TokenId,
    },
    Insert {
        pos_old: u32,
        pos_new: u32,
        token: TokenId,
    },
}

impl MergedItem {
    pub fn positions(&self) -> (u32, u32) {
        match *self {
            MergedItem::Common { pos_old, pos_new, .. }
            | MergedItem::Delete { pos_old, pos_new, .. }
            | MergedItem::Insert { pos_old, pos_new, .. } => (pos_old, pos_new),
        }
    }

    pub fn token(&self) -> TokenId {
        match *self {
            MergedItem::Common { token, .. }
            | MergedItem::Delete { token, .. }
            | MergedItem::Insert { token, .. } => token,
        }
    }
}

/// Errors produced by diffing APIs.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum DiffError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A versioned collection of diff items between two token sequences.
///
/// Invariant (maintained by the engine and checked by tests, not by the type
/// system): concatenating commons and all deletes in position order yields
/// the old sequence; commons and all inserts yield the new sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    /// Schema version (currently "1").
    pub version: String,
    /// Interned token table used by ids referenced in this report.
    #[serde(default)]
    pub strings: Vec<String>,
    /// Tokens common to both sequences, in position order.
    pub commons: Vec<CommonItem>,
    /// Mismatch regions, in position order.
    pub replaces: Vec<ReplaceGroup>,
}

impl DiffReport {
    pub const SCHEMA_VERSION: &'static str = "1";

    pub fn new(commons: Vec<CommonItem>, replaces: Vec<ReplaceGroup>) -> DiffReport {
        DiffReport {
            version: Self::SCHEMA_VERSION.to_string(),
            strings: Vec::new(),
            commons,
            replaces,
        }
    }

    /// Resolve an interned [`TokenId`] against this report's string table.
    pub fn resolve(&self, id: TokenId) -> Option<&str> {
        self.strings.get(id.0 as usize).map(|s| s.as_str())
    }

    /// True when the sequences matched completely.
    pub fn is_identical(&self) -> bool {
        self.replaces.is_empty()
    }

    pub fn num_commons(&self) -> usize {
        self.commons.len()
    }

    pub fn num_deletes(&self) -> usize {
        self.replaces.iter().map(|r| r.deletes.len()).sum()
    }

    pub fn num_inserts(&self) -> usize {
        self.replaces.iter().map(|r| r.inserts.len()).sum()
    }

    /// All items merged and stably sorted by `(pos_old, pos_new)`; within one
    /// position pair the discovery order (commons, then per-group deletes and
    /// inserts) is preserved.
    pub fn merged_items(&self) -> Vec<MergedItem> {
        let mut items: Vec<MergedItem> = Vec::with_capacity(
            self.commons.len() + self.num_deletes() + self.num_inserts(),
        );
        for c in &self.commons {
            items.push(MergedItem::Common {
                pos_old: c.pos_old,
                pos_new: c.pos_new,
                token: c.token,
            });
        }
        for group in &self.replaces {
            for d in &group.deletes {
                items.push(MergedItem::Delete {
                    pos_old: d.pos_old,
                    pos_new: d.pos_new,
                    token: d.token,
                });
            }
            for i in &group.inserts {
                items.push(MergedItem::Insert {
                    pos_old: i.pos_old,
                    pos_new: i.pos_new,
                    token: i.token,
                });
            }
        }
        items.sort_by_key(|item| item.positions());
        items
    }

    /// Reconstructs the old sequence from commons and deletes.
    pub fn old_tokens(&self) -> Vec<TokenId> {
        let mut items: Vec<(u32, TokenId)> = self
            .commons
            .iter()
            .map(|c| (c.pos_old, c.token))
            .chain(
                self.replaces
                    .iter()
                    .flat_map(|r| r.deletes.iter().map(|d| (d.pos_old, d.token))),
            )
            .collect();
        items.sort_by_key(|&(pos, _)| pos);
        items.into_iter().map(|(_, t)| t).collect()
    }

    /// Reconstructs the new sequence from commons and inserts.
    pub fn new_tokens(&self) -> Vec<TokenId> {
        let mut items: Vec<(u32, TokenId)> = self
            .commons
            .iter()
            .map(|c| (c.pos_new, c.token))
            .chain(
                self.replaces
                    .iter()
                    .flat_map(|r| r.inserts.iter().map(|i| (i.pos_new, i.token))),
            )
            .collect();
        items.sort_by_key(|&(pos, _)| pos);
        items.into_iter().map(|(_, t)| t).collect()
    }
}

/// Serializes a report as pretty-printed JSON.
pub fn serialize_diff_report(report: &DiffReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
