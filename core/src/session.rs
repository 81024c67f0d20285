use crate::config::DiffConfig;
use crate::diff::{DiffError, DiffReport};
use crate::metric::{EditDistance, TokenMetric};
use crate::rearrange;
use crate::token_pool::TokenPool;

/// Holds shared diffing state such as the token pool.
///
/// Interned ids are stable across calls on the same session, so reports from
/// repeated comparisons share one growing token table.
pub struct DiffSession {
    pub tokens: TokenPool,
}

impl Default for DiffSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffSession {
    pub fn new() -> Self {
        Self {
            tokens: TokenPool::new(),
        }
    }

    pub fn tokens(&self) -> &TokenPool {
        &self.tokens
    }

    pub fn tokens_mut(&mut self) -> &mut TokenPool {
        &mut self.tokens
    }

    /// Diffs two token sequences with the default edit-distance metric.
    pub fn diff<S: AsRef<str>>(
        &mut self,
        old: &[S],
        new: &[S],
        config: &DiffConfig,
    ) -> Result<DiffReport, DiffError> {
        self.diff_with_metric(old, new, config, &EditDistance)
    }

    /// Diffs with an injected comparison metric.
    pub fn diff_with_metric<S: AsRef<str>>(
        &mut self,
        old: &[S],
        new: &[S],
        config: &DiffConfig,
        metric: &dyn TokenMetric,
    ) -> Result<DiffReport, DiffError> {
        config.validate()?;
        let junk = config.junk_filter()?;
        let old_ids = self.tokens.intern_seq(old);
        let new_ids = self.tokens.intern_seq(new);
        let mut report =
            rearrange::diff_tokens(&self.tokens, &old_ids, &new_ids, config, metric, &junk);
        report.strings = self.tokens.strings().to_vec();
        Ok(report)
    }

    /// Reorders `new` to mirror `old` with the default metric.
    pub fn rearrange<S: AsRef<str>>(
        &mut self,
        old: &[S],
        new: &[S],
        config: &DiffConfig,
    ) -> Result<Vec<String>, DiffError> {
        self.rearrange_with_metric(old, new, config, &EditDistance)
    }

    /// Reorders `new` to mirror `old` with an injected metric.
    pub fn rearrange_with_metric<S: AsRef<str>>(
        &mut self,
        old: &[S],
        new: &[S],
        config: &DiffConfig,
        metric: &dyn TokenMetric,
    ) -> Result<Vec<String>, DiffError> {
        config.validate()?;
        let old_ids = self.tokens.intern_seq(old);
        let new_ids = self.tokens.intern_seq(new);
        let rearranged =
            rearrange::rearrange_tokens(&self.tokens, &old_ids, &new_ids, config, metric);
        Ok(rearranged
            .into_iter()
            .map(|id| self.tokens.resolve(id).to_string())
            .collect())
    }
}
