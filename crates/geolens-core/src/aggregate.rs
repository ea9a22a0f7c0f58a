//! Weighted aggregation of findings into an audit result

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::TierWeights;
use crate::finding::{CheckName, Finding, MAX_SCORE, Tier, to_score};
use crate::grade::Grade;

/// Passed/total counts for one tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSummary {
    pub passed: usize,
    pub total: usize,
}

/// Outcome of one audit run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    pub overall_score: u8,
    pub max_score: u8,
    pub grade: Grade,
    pub items: Vec<Finding>,
    pub summary: BTreeMap<Tier, TierSummary>,
}

impl AuditResult {
    /// Aggregate findings with the given tier weights
    pub fn from_findings(items: Vec<Finding>, weights: &TierWeights) -> Self {
        let overall_score = overall_score(&items, weights);
        Self {
            overall_score,
            max_score: MAX_SCORE,
            grade: Grade::from_score(overall_score),
            summary: summarize(&items),
            items,
        }
    }

    /// Finding for a check, if it was evaluated
    pub fn item(&self, name: CheckName) -> Option<&Finding> {
        self.items.iter().find(|item| item.name == name)
    }
}

/// `round(Σ score·w / Σ max·w × 100)`, zero when the denominator is zero
pub fn overall_score(items: &[Finding], weights: &TierWeights) -> u8 {
    let (earned, possible) = items.iter().fold((0.0, 0.0), |(earned, possible), item| {
        let weight = weights.weight(item.tier);
        (
            earned + f64::from(item.score) * weight,
            possible + f64::from(item.max_score) * weight,
        )
    });

    if possible <= 0.0 {
        return 0;
    }
    to_score(earned / possible * 100.0)
}

/// Per-tier passed/total counts; every tier is present, possibly at 0/0
pub fn summarize(items: &[Finding]) -> BTreeMap<Tier, TierSummary> {
    let mut summary: BTreeMap<Tier, TierSummary> = Tier::ALL
        .iter()
        .map(|tier| (*tier, TierSummary::default()))
        .collect();

    for item in items {
        let entry = summary.entry(item.tier).or_default();
        entry.total += 1;
        if item.status.counts_as_passed() {
            entry.passed += 1;
        }
    }

    summary
}
