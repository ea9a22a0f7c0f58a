//! Per-page head metadata coverage

use crate::finding::{CheckName, Finding, Status, ratio, to_score};
use crate::types::PageRecord;

const PASS_RATIO: f64 = 0.8;
const PARTIAL_RATIO: f64 = 0.5;

fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

fn coverage_finding(
    name: CheckName,
    pages: &[PageRecord],
    covered: impl Fn(&PageRecord) -> bool,
    what: &str,
    recommendation: &str,
) -> Finding {
    if pages.is_empty() {
        return Finding::not_applicable(name);
    }

    let count = pages.iter().filter(|&page| covered(page)).count();
    let coverage = ratio(count, pages.len());
    let status = Status::from_ratio(coverage, PASS_RATIO, PARTIAL_RATIO);
    let recommendation = if count == pages.len() {
        format!("All pages have {}", what)
    } else {
        format!("{} ({} pages missing)", recommendation, pages.len() - count)
    };

    Finding::new(
        name,
        to_score(coverage * 100.0),
        status,
        format!("{}/{} pages have {}", count, pages.len(), what),
        recommendation,
    )
}

pub fn check_meta_descriptions(pages: &[PageRecord]) -> Finding {
    coverage_finding(
        CheckName::MetaDescriptions,
        pages,
        |page| filled(&page.meta.description),
        "a meta description",
        "Write a unique meta description for every page",
    )
}

/// A page counts when it has both `og:title` and `og:description`
pub fn check_open_graph(pages: &[PageRecord]) -> Finding {
    coverage_finding(
        CheckName::OpenGraph,
        pages,
        |page| filled(&page.meta.open_graph.title) && filled(&page.meta.open_graph.description),
        "og:title and og:description",
        "Add og:title and og:description to every page",
    )
}

/// `max-snippet` / `max-image-preview` in meta robots or `X-Robots-Tag`
pub fn check_ai_directives(pages: &[PageRecord]) -> Finding {
    coverage_finding(
        CheckName::AiContentDirectives,
        pages,
        has_ai_directive,
        "max-snippet or max-image-preview directives",
        "Add <meta name=\"robots\" content=\"max-snippet:-1, max-image-preview:large\">",
    )
}

fn has_ai_directive(page: &PageRecord) -> bool {
    let mentions = |value: &str| {
        let value = value.to_ascii_lowercase();
        value.contains("max-snippet") || value.contains("max-image-preview")
    };
    page.meta.robots.as_deref().is_some_and(mentions)
        || page.header("x-robots-tag").is_some_and(mentions)
}
