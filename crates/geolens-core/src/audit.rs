//! Audit entry points

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::aggregate::AuditResult;
use crate::config::AuditConfig;
use crate::finding::{CheckName, Finding};
use crate::projection::{self, ProjectedAudit};
use crate::rules;
use crate::types::{CrawlResult, non_blank};

/// Order in which checks appear in an audit result
pub const CHECK_ORDER: [CheckName; 20] = [
    CheckName::RobotsTxt,
    CheckName::AiCrawlerAccess,
    CheckName::Sitemap,
    CheckName::LlmsTxt,
    CheckName::LlmsFullTxt,
    CheckName::StructuredData,
    CheckName::ServerSideRendering,
    CheckName::MetaDescriptions,
    CheckName::OpenGraph,
    CheckName::AiContentDirectives,
    CheckName::HeadingHierarchy,
    CheckName::ContentFreshness,
    CheckName::ContentStructure,
    CheckName::SearchEngineIndexing,
    CheckName::FaqContent,
    CheckName::AiPolicy,
    CheckName::SecurityTxt,
    CheckName::TdmRep,
    CheckName::HumansTxt,
    CheckName::WebManifest,
];

/// Run a single check against the crawl
pub fn evaluate(
    name: CheckName,
    crawl: &CrawlResult,
    config: &AuditConfig,
    now: DateTime<Utc>,
) -> Finding {
    let files = &crawl.existing_files;
    let pages = &crawl.pages;

    match name {
        CheckName::RobotsTxt => rules::check_robots_txt(non_blank(&files.robots_txt), &config.key_crawlers),
        CheckName::AiCrawlerAccess => {
            rules::check_ai_crawler_access(non_blank(&files.robots_txt), &config.ai_crawlers)
        }
        CheckName::Sitemap => rules::check_sitemap(non_blank(&files.sitemap_xml), &crawl.origin()),
        CheckName::LlmsTxt => rules::check_llms_txt(non_blank(&files.llms_txt)),
        CheckName::LlmsFullTxt => rules::check_llms_full_txt(non_blank(&files.llms_full_txt)),
        CheckName::StructuredData => rules::check_structured_data(pages),
        CheckName::ServerSideRendering => rules::check_server_rendering(pages),
        CheckName::MetaDescriptions => rules::check_meta_descriptions(pages),
        CheckName::OpenGraph => rules::check_open_graph(pages),
        CheckName::AiContentDirectives => rules::check_ai_directives(pages),
        CheckName::HeadingHierarchy => rules::check_heading_hierarchy(pages),
        CheckName::ContentFreshness => rules::check_content_freshness(pages, now),
        CheckName::ContentStructure => rules::check_content_structure(pages),
        CheckName::SearchEngineIndexing => rules::check_indexing(crawl),
        CheckName::FaqContent => rules::check_faq(pages),
        CheckName::AiPolicy => {
            rules::check_ai_policy(non_blank(&files.ai_txt), non_blank(&files.ai_json))
        }
        CheckName::SecurityTxt => rules::check_security_txt(non_blank(&files.security_txt)),
        CheckName::TdmRep => rules::check_tdmrep(non_blank(&files.tdmrep_json)),
        CheckName::HumansTxt => rules::check_humans_txt(non_blank(&files.humans_txt)),
        CheckName::WebManifest => rules::check_manifest(non_blank(&files.manifest_json)),
    }
}

/// Audit a crawl, judging freshness relative to `now`
pub fn audit(crawl: &CrawlResult, config: &AuditConfig, now: DateTime<Utc>) -> AuditResult {
    if crawl.pages.is_empty() {
        warn!(base_url = %crawl.base_url, "crawl has no pages; page checks are not applicable");
    }

    let items: Vec<Finding> = CHECK_ORDER
        .iter()
        .map(|name| {
            let finding = evaluate(*name, crawl, config, now);
            debug!(check = %finding.name, score = finding.score, status = ?finding.status, "evaluated");
            finding
        })
        .collect();

    let result = AuditResult::from_findings(items, &config.tier_weights);
    info!(
        base_url = %crawl.base_url,
        pages = crawl.pages.len(),
        score = result.overall_score,
        grade = %result.grade,
        "audit complete"
    );
    result
}

/// Audit a crawl and project the effect of deploying the generated package
pub fn audit_with_projection(
    crawl: &CrawlResult,
    config: &AuditConfig,
    now: DateTime<Utc>,
) -> ProjectedAudit {
    let current = audit(crawl, config, now);
    let report = projection::compare(current, &config.projections, &config.tier_weights);
    info!(
        from = report.current.overall_score,
        to = report.projected.overall_score,
        improved = report.improved_checks.len(),
        "projection complete"
    );
    report
}
