//! Evaluation metrics computed over a [`DiffReport`].
//!
//! Commons are true positives, inserts are false positives (extracted but
//! not in the ground truth), deletes are false negatives (in the ground
//! truth but not extracted). Junk-suppressed groups never reach the report,
//! so they are excluded by construction.

use crate::diff::DiffReport;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrecisionRecall {
    pub precision: f64,
    pub recall: f64,
    pub true_positives: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceSimilarity {
    /// Σ max(|inserts|, |deletes|) over all replace groups.
    pub distance: u64,
    /// 1 − distance / max(effective old length, effective new length).
    pub similarity: f64,
}

pub fn precision_recall(report: &DiffReport) -> PrecisionRecall {
    let tp = report.num_commons() as u64;
    let fp = report.num_inserts() as u64;
    let fn_ = report.num_deletes() as u64;

    let precision = if tp + fp > 0 {
        tp as f64 / (tp + fp) as f64
    } else {
        0.0
    };
    let recall = if tp + fn_ > 0 {
        tp as f64 / (tp + fn_) as f64
    } else {
        0.0
    };

    PrecisionRecall {
        precision,
        recall,
        true_positives: tp,
        false_positives: fp,
        false_negatives: fn_,
    }
}

pub fn distance_similarity(report: &DiffReport) -> DistanceSimilarity {
    let mut distance = 0u64;
    let mut num_deletes = 0u64;
    let mut num_inserts = 0u64;
    for group in &report.replaces {
        num_deletes += group.deletes.len() as u64;
        num_inserts += group.inserts.len() as u64;
        distance += group.deletes.len().max(group.inserts.len()) as u64;
    }

    let num_commons = report.num_commons() as u64;
    let len_old = num_commons + num_deletes;
    let len_new = num_commons + num_inserts;
    let longest = len_old.max(len_new);

    // Two empty sequences are identical, not dissimilar.
    let similarity = if longest > 0 {
        1.0 - distance as f64 / longest as f64
    } else {
        1.0
    };

    DistanceSimilarity {
        distance,
        similarity,
    }
}
