//! Configuration for the diff and rearrange engines.
//!
//! `DiffConfig` centralizes the fuzzy-equality thresholds and the junk
//! patterns so the engines carry no hardcoded knobs. Invalid settings are
//! rejected here, at the boundary, before any algorithm runs.

use crate::error_codes;
use crate::metric::MatchPolicy;
use crate::token_pool::{TokenId, TokenPool};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Two tokens are equal when their edit distance is at most this.
    /// 0 restricts matching to exact equality.
    pub max_dist: u32,
    /// Two tokens are equal when their similarity is at least this.
    /// 1.0 restricts matching to exact equality. OR'ed with `max_dist`.
    pub min_sim: f64,
    /// Reorder the new sequence to mirror the old one before diffing.
    pub rearrange: bool,
    /// Regex patterns; a mismatch region whose old side consists entirely of
    /// junk-matching tokens is dropped from the result.
    pub junk: Vec<String>,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            max_dist: 0,
            min_sim: 1.0,
            rearrange: false,
            junk: Vec::new(),
        }
    }
}

impl DiffConfig {
    /// Exact token equality, no reordering.
    pub fn exact() -> Self {
        Self::default()
    }

    /// Accept tokens within the given edit distance.
    pub fn edit_distance(max_dist: u32) -> Self {
        Self {
            max_dist,
            ..Default::default()
        }
    }

    /// Accept tokens at or above the given similarity.
    pub fn similarity(min_sim: f64) -> Self {
        Self {
            min_sim,
            ..Default::default()
        }
    }

    pub fn builder() -> DiffConfigBuilder {
        DiffConfigBuilder {
            inner: DiffConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_sim.is_finite() || self.min_sim < 0.0 || self.min_sim > 1.0 {
            return Err(ConfigError::InvalidMinSimilarity {
                value: self.min_sim,
            });
        }
        for pattern in &self.junk {
            if let Err(e) = Regex::new(pattern) {
                return Err(ConfigError::InvalidJunkPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn policy(&self) -> MatchPolicy {
        MatchPolicy {
            max_dist: self.max_dist,
            min_sim: self.min_sim,
        }
    }

    /// Compiles the junk patterns. Callers validate first; this re-reports
    /// compile failures for the direct-construction path.
    pub(crate) fn junk_filter(&self) -> Result<JunkFilter, ConfigError> {
        let mut patterns = Vec::with_capacity(self.junk.len());
        for pattern in &self.junk {
            let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidJunkPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
            patterns.push(regex);
        }
        Ok(JunkFilter { patterns })
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error(
        "[TXDIFF_CFG_001] min_sim must be in [0.0, 1.0] and finite (got {value}). Suggestion: use 1.0 for exact matching."
    )]
    InvalidMinSimilarity { value: f64 },

    #[error(
        "[TXDIFF_CFG_002] junk pattern {pattern:?} is not a valid regex: {reason}. Suggestion: check the pattern's escaping."
    )]
    InvalidJunkPattern { pattern: String, reason: String },

    #[error(
        "[TXDIFF_CFG_003] protect pattern {pattern:?} is not a valid regex: {reason}. Suggestion: check the pattern's escaping."
    )]
    InvalidProtectPattern { pattern: String, reason: String },
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::InvalidMinSimilarity { .. } => error_codes::CONFIG_INVALID_MIN_SIM,
            ConfigError::InvalidJunkPattern { .. } => error_codes::CONFIG_INVALID_JUNK,
            ConfigError::InvalidProtectPattern { .. } => error_codes::CONFIG_INVALID_PROTECT,
        }
    }
}

/// Compiled junk patterns. A token is junk when any pattern matches a
/// substring of it (search, not full-match, like the original patterns).
#[derive(Debug, Default)]
pub(crate) struct JunkFilter {
    patterns: Vec<Regex>,
}

impl JunkFilter {
    pub fn matches(&self, token: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(token))
    }

    /// True when the segment is non-empty and every token is junk.
    pub fn suppresses(&self, pool: &TokenPool, segment: &[TokenId]) -> bool {
        !self.patterns.is_empty()
            && !segment.is_empty()
            && segment.iter().all(|&id| self.matches(pool.resolve(id)))
    }
}

#[derive(Debug, Clone)]
pub struct DiffConfigBuilder {
    inner: DiffConfig,
}

impl Default for DiffConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffConfigBuilder {
    pub fn new() -> Self {
        DiffConfig::builder()
    }

    pub fn max_dist(mut self, value: u32) -> Self {
        self.inner.max_dist = value;
        self
    }

    pub fn min_sim(mut self, value: f64) -> Self {
        self.inner.min_sim = value;
        self
    }

    pub fn rearrange(mut self, value: bool) -> Self {
        self.inner.rearrange = value;
        self
    }

    pub fn junk_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.inner.junk.push(pattern.into());
        self
    }

    pub fn build(self) -> Result<DiffConfig, ConfigError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}
