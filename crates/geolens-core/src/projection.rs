//! Before/after projection of a generated remediation package
//!
//! Rewrites every finding named in the projection table to the score it
//! would reach once the generated file is deployed, then re-aggregates.
//! Findings outside the table, or already at their target, pass through
//! untouched, so no finding ever scores lower after projection.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::AuditResult;
use crate::config::{PACKAGE_RECOMMENDATION, ProjectionTable, TierWeights};
use crate::finding::{CheckName, Finding, Status};

/// Projected findings at or above this score pass
const PROJECTED_PASS_AT: u8 = 70;

/// Current audit alongside its projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedAudit {
    pub current: AuditResult,
    pub projected: AuditResult,
    /// Overall score gained by deploying the package
    pub improvement: i16,
    /// Checks whose finding was rewritten
    pub improved_checks: Vec<CheckName>,
}

/// Derive the audit that deploying the generated package would produce
pub fn project(current: &AuditResult, table: &ProjectionTable, weights: &TierWeights) -> AuditResult {
    let items = current
        .items
        .iter()
        .map(|item| project_item(item, table))
        .collect();
    AuditResult::from_findings(items, weights)
}

/// Project an audit and pair it with the original
pub fn compare(current: AuditResult, table: &ProjectionTable, weights: &TierWeights) -> ProjectedAudit {
    let projected = project(&current, table, weights);
    let improved_checks = current
        .items
        .iter()
        .zip(&projected.items)
        .filter(|(before, after)| before.score != after.score)
        .map(|(before, _)| before.name)
        .collect();
    let improvement = i16::from(projected.overall_score) - i16::from(current.overall_score);

    ProjectedAudit {
        current,
        projected,
        improvement,
        improved_checks,
    }
}

fn project_item(item: &Finding, table: &ProjectionTable) -> Finding {
    let Some(target) = table.get(item.name) else {
        return item.clone();
    };
    if item.score >= target.score {
        return item.clone();
    }

    debug!(check = %item.name, from = item.score, to = target.score, "projecting finding");

    let status = if target.score >= PROJECTED_PASS_AT {
        Status::Pass
    } else {
        Status::Partial
    };
    Finding::new(
        item.name,
        target.score,
        status,
        target.note.clone(),
        PACKAGE_RECOMMENDATION,
    )
}
