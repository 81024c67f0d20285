//! Rearrangement engine: reorders the new sequence to mirror the old one.
//!
//! After a baseline diff, every insertion is mapped to the deletions its
//! token fuzzily matches. Chains of insertions whose matched deletions sit at
//! strictly consecutive old positions form "runs"; the longest run is
//! repeatedly extracted and applied, repositioning its insertions next to
//! the deleted slots, until no run remains. Insertions without any deletion
//! candidate ride along with the nearest matched neighbor so genuinely novel
//! tokens stay close to related text instead of floating free.
//!
//! Items live in the report's own vectors and are addressed by
//! `(group, index)` handles; runs own their item lists outright, so growing
//! one run can never mutate another behind the engine's back.

use crate::config::{DiffConfig, JunkFilter};
use crate::diff::{DeleteItem, DiffReport, InsertItem, ReplaceGroup};
use crate::engine::diff_slices;
use crate::fuzzy_index::FuzzyIndex;
use crate::metric::TokenMetric;
use crate::token_pool::{TokenId, TokenPool};

/// Handle of a delete item: (replace group, index within its deletes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DeleteRef {
    group: u32,
    index: u32,
}

/// Handle of an insert item: (replace group, index within its inserts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InsertRef {
    group: u32,
    index: u32,
}

/// One insertion plus the deletions its token matches, best match first.
/// `candidates` holds a single `None` when nothing matches.
struct MappingItem {
    candidates: Vec<Option<DeleteRef>>,
    insert: InsertRef,
}

/// A candidate pairing inside a run.
#[derive(Debug, Clone, Copy)]
struct RunItem {
    deletion: Option<DeleteRef>,
    insertion: InsertRef,
}

/// A live candidate run: the chain built so far plus the old position its
/// virtual end currently sits at (unmatched items advance it by one).
struct ActiveRun {
    items: Vec<RunItem>,
    end_pos: u32,
}

/// The replace groups of the baseline diff, owned for in-place mutation of
/// matched flags and positions.
struct Arena {
    replaces: Vec<ReplaceGroup>,
}

impl Arena {
    fn delete(&self, r: DeleteRef) -> &DeleteItem {
        &self.replaces[r.group as usize].deletes[r.index as usize]
    }

    fn delete_mut(&mut self, r: DeleteRef) -> &mut DeleteItem {
        &mut self.replaces[r.group as usize].deletes[r.index as usize]
    }

    fn insert(&self, r: InsertRef) -> &InsertItem {
        &self.replaces[r.group as usize].inserts[r.index as usize]
    }

    fn insert_mut(&mut self, r: InsertRef) -> &mut InsertItem {
        &mut self.replaces[r.group as usize].inserts[r.index as usize]
    }
}

/// Produces a permutation of `new` whose order approximates `old` as closely
/// as the matched deletions allow. Every token of `new` appears exactly once.
pub(crate) fn rearrange_tokens(
    pool: &TokenPool,
    old: &[TokenId],
    new: &[TokenId],
    config: &DiffConfig,
    metric: &dyn TokenMetric,
) -> Vec<TokenId> {
    // Baseline diff without junk suppression: suppressed groups would drop
    // tokens from the permutation.
    let no_junk = JunkFilter::default();
    let (commons, replaces) = diff_slices(pool, old, new, config, metric, &no_junk);
    let mut arena = Arena { replaces };

    let mappings = build_mappings(pool, &arena, config, metric);

    loop {
        let run = find_longest_run(&arena, &mappings);
        if run.is_empty() {
            break;
        }
        apply_run(&mut arena, &run);
    }

    // Commons keep their positions; inserts have been repositioned. The
    // merged stable sort on (pos_old, pos_new) is the final order.
    let mut merged: Vec<(u32, u32, TokenId)> = Vec::new();
    for c in &commons {
        merged.push((c.pos_old, c.pos_new, c.token));
    }
    for group in &arena.replaces {
        for ins in &group.inserts {
            merged.push((ins.pos_old, ins.pos_new, ins.token));
        }
    }
    merged.sort_by_key(|&(pos_old, pos_new, _)| (pos_old, pos_new));
    merged.into_iter().map(|(_, _, token)| token).collect()
}

/// Maps every insertion to its candidate deletions via a fuzzy index over
/// the flattened delete list. Candidate order is metric rank, then original
/// delete order (ascending `pos_old`).
fn build_mappings(
    pool: &TokenPool,
    arena: &Arena,
    config: &DiffConfig,
    metric: &dyn TokenMetric,
) -> Vec<Vec<MappingItem>> {
    let mut delete_tokens: Vec<TokenId> = Vec::new();
    let mut delete_refs: Vec<DeleteRef> = Vec::new();
    for (g, group) in arena.replaces.iter().enumerate() {
        for (i, del) in group.deletes.iter().enumerate() {
            delete_tokens.push(del.token);
            delete_refs.push(DeleteRef {
                group: g as u32,
                index: i as u32,
            });
        }
    }
    let index = FuzzyIndex::build(pool, &delete_tokens);
    let policy = config.policy();

    let mut mappings = Vec::with_capacity(arena.replaces.len());
    for (g, group) in arena.replaces.iter().enumerate() {
        let mut mapping = Vec::with_capacity(group.inserts.len());
        for (i, ins) in group.inserts.iter().enumerate() {
            let hits = index.lookup(ins.token, policy, metric);
            let candidates: Vec<Option<DeleteRef>> = if hits.is_empty() {
                vec![None]
            } else {
                hits.into_iter()
                    .map(|pos| Some(delete_refs[pos as usize]))
                    .collect()
            };
            mapping.push(MappingItem {
                candidates,
                insert: InsertRef {
                    group: g as u32,
                    index: i as u32,
                },
            });
        }
        mappings.push(mapping);
    }
    mappings
}

/// The longest run across all mappings; ties go to the first mapping found.
fn find_longest_run(arena: &Arena, mappings: &[Vec<MappingItem>]) -> Vec<RunItem> {
    let mut longest: Vec<RunItem> = Vec::new();
    for mapping in mappings {
        let run = find_longest_run_in_mapping(arena, mapping);
        if run.len() > longest.len() {
            longest = run;
        }
    }
    longest
}

/// Builds candidate runs over one mapping and returns the longest.
///
/// A matched deletion at old position `p` extends every live run whose end
/// sits at `p - 1` (each extension is an owned copy) or, failing that, opens
/// a new run seeded with the queued leading unmatched insertions. An
/// unmatched insertion extends every live run by one virtual position and is
/// also queued in case a new run starts later. Already-consumed insertions
/// and deletions (matched flag set by a previous application) do not
/// participate. When no run with a matched deletion exists, the trailing
/// unmatched queue is returned so orphan insertions still get consumed.
fn find_longest_run_in_mapping(arena: &Arena, mapping: &[MappingItem]) -> Vec<RunItem> {
    let mut longest: Vec<RunItem> = Vec::new();
    let mut active: Vec<ActiveRun> = Vec::new();
    let mut queue: Vec<RunItem> = Vec::new();

    for item in mapping {
        if arena.insert(item.insert).matched {
            // Consumed insertions are transparent: live runs stay live.
            continue;
        }

        let prev = std::mem::take(&mut active);

        for candidate in &item.candidates {
            match candidate {
                Some(del_ref) => {
                    if arena.delete(*del_ref).matched {
                        continue;
                    }
                    let pos = arena.delete(*del_ref).pos_old;
                    let run_item = RunItem {
                        deletion: Some(*del_ref),
                        insertion: item.insert,
                    };

                    let mut extended = false;
                    for run in prev.iter().filter(|r| r.end_pos + 1 == pos) {
                        let mut items = run.items.clone();
                        items.push(run_item);
                        if items.len() > longest.len() {
                            longest = items.clone();
                        }
                        active.push(ActiveRun {
                            items,
                            end_pos: pos,
                        });
                        extended = true;
                    }
                    if !extended {
                        let mut items = queue.clone();
                        items.push(run_item);
                        if items.len() > longest.len() {
                            longest = items.clone();
                        }
                        active.push(ActiveRun {
                            items,
                            end_pos: pos,
                        });
                    }
                    queue.clear();
                }
                None => {
                    let run_item = RunItem {
                        deletion: None,
                        insertion: item.insert,
                    };
                    queue.push(run_item);
                    for run in &prev {
                        let mut items = run.items.clone();
                        items.push(run_item);
                        if items.len() > longest.len() {
                            longest = items.clone();
                        }
                        active.push(ActiveRun {
                            items,
                            end_pos: run.end_pos + 1,
                        });
                    }
                }
            }
        }
    }

    if longest.is_empty() {
        queue
    } else {
        longest
    }
}

/// Applies a run: repositions each insertion next to its matched deletion
/// and marks both sides consumed. Queued unmatched insertions preceding a
/// matched one take consecutive offsets starting at the deletion's position;
/// unmatched insertions after a matched one chain behind it.
fn apply_run(arena: &mut Arena, run: &[RunItem]) {
    let mut last_matched: Option<InsertRef> = None;
    let mut queued: Vec<InsertRef> = Vec::new();

    for item in run {
        match item.deletion {
            Some(del_ref) => {
                let (del_pos_old, del_pos_new) = {
                    let del = arena.delete(del_ref);
                    (del.pos_old, del.pos_new)
                };

                for (offset, &queued_ref) in queued.iter().enumerate() {
                    let ins = arena.insert_mut(queued_ref);
                    ins.pos_old = del_pos_old;
                    ins.pos_new = del_pos_new + offset as u32;
                    ins.matched = true;
                }
                let skipped = queued.len() as u32;
                queued.clear();

                let ins = arena.insert_mut(item.insertion);
                ins.pos_old = del_pos_old;
                ins.pos_new = del_pos_new + skipped;
                ins.matched = true;
                arena.delete_mut(del_ref).matched = true;
                last_matched = Some(item.insertion);
            }
            None => {
                if let Some(last_ref) = last_matched {
                    let (last_pos_old, last_pos_new) = {
                        let last = arena.insert(last_ref);
                        (last.pos_old, last.pos_new)
                    };
                    let ins = arena.insert_mut(item.insertion);
                    ins.pos_old = last_pos_old;
                    ins.pos_new = last_pos_new + 1;
                    ins.matched = true;
                    last_matched = Some(item.insertion);
                } else {
                    queued.push(item.insertion);
                    arena.insert_mut(item.insertion).matched = true;
                }
            }
        }
    }
}

/// Diffs with optional rearrangement; the entry point used by the session.
pub(crate) fn diff_tokens(
    pool: &TokenPool,
    old: &[TokenId],
    new: &[TokenId],
    config: &DiffConfig,
    metric: &dyn TokenMetric,
    junk: &JunkFilter,
) -> DiffReport {
    if config.rearrange {
        let rearranged = rearrange_tokens(pool, old, new, config, metric);
        let (commons, replaces) = diff_slices(pool, old, &rearranged, config, metric, junk);
        DiffReport::new(commons, replaces)
    } else {
        let (commons, replaces) = diff_slices(pool, old, new, config, metric, junk);
        DiffReport::new(commons, replaces)
    }
}
