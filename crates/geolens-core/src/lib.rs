//! # geolens-core
//!
//! Scoring and projection engine for AI-crawler readiness audits.
//!
//! This library provides:
//! - Rule evaluators that grade one facet of a crawled site each
//! - A robots.txt directive scanner for AI crawler access
//! - Weighted aggregation into a 0-100 score and letter grade
//! - Projection of the score after deploying a generated remediation package
//!
//! The engine performs no I/O. It consumes a fully materialized
//! [`CrawlResult`] and returns plain values.
//!
//! ## Example
//!
//! ```
//! use geolens_core::{AuditConfig, CrawlResult, audit_with_projection};
//!
//! # fn example() -> geolens_core::Result<()> {
//! let crawl = CrawlResult::from_json_str(r#"{"baseUrl": "https://example.com"}"#)?;
//! let report = audit_with_projection(&crawl, &AuditConfig::default(), chrono::Utc::now());
//! assert!(report.projected.overall_score >= report.current.overall_score);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod aggregate;
pub mod audit;
pub mod config;
pub mod error;
pub mod finding;
pub mod grade;
pub mod json_ld;
pub mod projection;
pub mod robots_txt;
pub mod rules;
pub mod sitemap;
pub mod types;
pub mod url_utils;

// Re-export commonly used types
pub use aggregate::{AuditResult, TierSummary};
pub use audit::{CHECK_ORDER, audit, audit_with_projection, evaluate};
pub use config::{AuditConfig, ProjectedImprovement, ProjectionTable, TierWeights};
pub use error::{AuditError, Result};
pub use finding::{CheckName, Finding, MAX_SCORE, Status, Tier};
pub use grade::Grade;
pub use projection::{ProjectedAudit, compare, project};
pub use types::{CrawlResult, PageRecord};
