//! Core diffing engine: longest-common-overlap partition of two token
//! sequences into commons and replace groups.
//!
//! The classic formulation is recursive: find the largest run of tokens
//! consecutive in both sequences, then recurse on the left and right
//! remainders. Recursion depth is bounded only by the number of mismatch
//! regions, so an adversarial input could exhaust the call stack; segments
//! are processed through an explicit LIFO work-stack instead, with the
//! position counters threaded as plain accumulators.

use crate::config::{DiffConfig, JunkFilter};
use crate::diff::{CommonItem, DeleteItem, InsertItem, ReplaceGroup};
use crate::fuzzy_index::FuzzyIndex;
use crate::metric::{MatchPolicy, TokenMetric};
use crate::token_pool::{TokenId, TokenPool};
use rustc_hash::FxHashMap;

/// The largest run of tokens consecutive in both sequences, relative to the
/// segment it was searched in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Overlap {
    start_old: u32,
    start_new: u32,
    len: u32,
}

enum WorkItem {
    /// An unresolved pair of segment ranges (absolute indices, half-open).
    Segment {
        old_start: u32,
        old_end: u32,
        new_start: u32,
        new_end: u32,
    },
    /// A resolved common run; tokens are taken from the new sequence.
    EmitCommon { new_start: u32, len: u32 },
}

pub(crate) fn diff_slices(
    pool: &TokenPool,
    old: &[TokenId],
    new: &[TokenId],
    config: &DiffConfig,
    metric: &dyn TokenMetric,
    junk: &JunkFilter,
) -> (Vec<CommonItem>, Vec<ReplaceGroup>) {
    let policy = config.policy();
    let mut commons = Vec::new();
    let mut replaces = Vec::new();
    let mut pos_old = 0u32;
    let mut pos_new = 0u32;

    let mut stack = vec![WorkItem::Segment {
        old_start: 0,
        old_end: old.len() as u32,
        new_start: 0,
        new_end: new.len() as u32,
    }];

    while let Some(item) = stack.pop() {
        match item {
            WorkItem::EmitCommon { new_start, len } => {
                for j in new_start..new_start + len {
                    commons.push(CommonItem {
                        pos_old,
                        pos_new,
                        token: new[j as usize],
                    });
                    pos_old += 1;
                    pos_new += 1;
                }
            }
            WorkItem::Segment {
                old_start,
                old_end,
                new_start,
                new_end,
            } => {
                let old_seg = &old[old_start as usize..old_end as usize];
                let new_seg = &new[new_start as usize..new_end as usize];

                match longest_overlap(pool, old_seg, new_seg, policy, metric) {
                    Some(overlap) => {
                        // Pop order must be left, common, right so the
                        // position counters stay monotonic.
                        stack.push(WorkItem::Segment {
                            old_start: old_start + overlap.start_old + overlap.len,
                            old_end,
                            new_start: new_start + overlap.start_new + overlap.len,
                            new_end,
                        });
                        stack.push(WorkItem::EmitCommon {
                            new_start: new_start + overlap.start_new,
                            len: overlap.len,
                        });
                        stack.push(WorkItem::Segment {
                            old_start,
                            old_end: old_start + overlap.start_old,
                            new_start,
                            new_end: new_start + overlap.start_new,
                        });
                    }
                    None => {
                        if old_seg.is_empty() && new_seg.is_empty() {
                            continue;
                        }
                        if junk.suppresses(pool, old_seg) {
                            continue;
                        }

                        let mut deletes = Vec::with_capacity(old_seg.len());
                        for &token in old_seg {
                            deletes.push(DeleteItem {
                                pos_old,
                                pos_new,
                                token,
                                matched: false,
                            });
                            pos_old += 1;
                        }
                        let mut inserts = Vec::with_capacity(new_seg.len());
                        for &token in new_seg {
                            inserts.push(InsertItem {
                                pos_old,
                                pos_new,
                                token,
                                matched: false,
                            });
                            pos_new += 1;
                        }
                        replaces.push(ReplaceGroup { deletes, inserts });
                    }
                }
            }
        }
    }

    debug_assert_eq!(
        pos_old as usize,
        commons.len() + replaces.iter().map(|r| r.deletes.len()).sum::<usize>(),
        "old-side positions must cover commons and deletes without gaps"
    );
    debug_assert_eq!(
        pos_new as usize,
        commons.len() + replaces.iter().map(|r| r.inserts.len()).sum::<usize>(),
        "new-side positions must cover commons and inserts without gaps"
    );

    (commons, replaces)
}

/// Scans `new_seg` left to right, keeping for each position in `old_seg` the
/// length of the common suffix ending there, and returns the globally
/// longest run. `None` when the segments share nothing.
fn longest_overlap(
    pool: &TokenPool,
    old_seg: &[TokenId],
    new_seg: &[TokenId],
    policy: MatchPolicy,
    metric: &dyn TokenMetric,
) -> Option<Overlap> {
    if old_seg.is_empty() || new_seg.is_empty() {
        return None;
    }

    let index = FuzzyIndex::build(pool, old_seg);
    let mut overlap: FxHashMap<u32, u32> = FxHashMap::default();
    let mut best: Option<Overlap> = None;
    let mut best_len = 0u32;

    for (j, &token) in new_seg.iter().enumerate() {
        let mut next: FxHashMap<u32, u32> = FxHashMap::default();
        for i in index.lookup(token, policy, metric) {
            let prev = if i > 0 {
                overlap.get(&(i - 1)).copied().unwrap_or(0)
            } else {
                0
            };
            let run = prev + 1;
            next.insert(i, run);
            if run > best_len {
                best_len = run;
                best = Some(Overlap {
                    start_old: i + 1 - run,
                    start_new: j as u32 + 1 - run,
                    len: run,
                });
            }
        }
        overlap = next;
    }

    best
}
