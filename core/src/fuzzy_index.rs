//! Position index with fuzzy lookup over a token sequence.

use crate::metric::{MatchPolicy, TokenMetric};
use crate::token_pool::{TokenId, TokenPool};
use rustc_hash::FxHashMap;

/// Multi-map from token to the positions at which it occurs in a reference
/// sequence. Lookup returns positions best match first: exact hits are
/// distance 0, fuzzy hits are ranked by the injected metric.
pub(crate) struct FuzzyIndex<'p> {
    pool: &'p TokenPool,
    positions: FxHashMap<TokenId, Vec<u32>>,
    /// Distinct tokens in first-occurrence order; the fuzzy scan iterates
    /// this so candidate order is independent of map iteration order.
    distinct: Vec<TokenId>,
}

impl<'p> FuzzyIndex<'p> {
    pub fn build(pool: &'p TokenPool, sequence: &[TokenId]) -> Self {
        let mut positions: FxHashMap<TokenId, Vec<u32>> = FxHashMap::default();
        let mut distinct = Vec::new();
        for (i, &token) in sequence.iter().enumerate() {
            let slot = positions.entry(token).or_default();
            if slot.is_empty() {
                distinct.push(token);
            }
            slot.push(i as u32);
        }
        Self {
            pool,
            positions,
            distinct,
        }
    }

    /// Positions whose token is equal to `query` under `policy`, ordered by
    /// ascending distance, then descending similarity, then ascending
    /// position. Returns an empty vec when nothing matches.
    pub fn lookup(
        &self,
        query: TokenId,
        policy: MatchPolicy,
        metric: &dyn TokenMetric,
    ) -> Vec<u32> {
        if policy.is_exact() {
            return self.positions.get(&query).cloned().unwrap_or_default();
        }

        let query_text = self.pool.resolve(query);
        let mut candidates: Vec<(u32, f64, u32)> = Vec::new();
        for &token in &self.distinct {
            let (dist, sim) = if token == query {
                (0, 1.0)
            } else {
                let text = self.pool.resolve(token);
                (
                    metric.distance(query_text, text),
                    metric.similarity(query_text, text),
                )
            };
            if policy.accepts(dist, sim) {
                for &pos in &self.positions[&token] {
                    candidates.push((dist, sim, pos));
                }
            }
        }

        candidates.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then_with(|| b.1.total_cmp(&a.1))
                .then_with(|| a.2.cmp(&b.2))
        });

        candidates.into_iter().map(|(_, _, pos)| pos).collect()
    }
}
