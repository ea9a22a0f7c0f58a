//! JSON-LD coverage and entity quality

use crate::finding::{CheckName, Finding, Status, ratio, to_score};
use crate::json_ld::{JsonLdView, distinct_types};
use crate::types::PageRecord;

const PASS_AT: u8 = 60;

/// Distinct schema types earning the variety bonus
const VARIETY_MIN_TYPES: usize = 3;

/// Page coverage (up to 50) plus Organization, WebSite and type-variety bonuses
pub fn check_structured_data(pages: &[PageRecord]) -> Finding {
    if pages.is_empty() {
        return Finding::not_applicable(CheckName::StructuredData);
    }

    let pages_with_items = pages.iter().filter(|page| !page.json_ld.is_empty()).count();
    if pages_with_items == 0 {
        return Finding::new(
            CheckName::StructuredData,
            0,
            Status::Fail,
            "No JSON-LD structured data found on any page",
            "Add Organization and WebSite JSON-LD to the homepage and page-specific schema elsewhere",
        );
    }

    let blocks = || pages.iter().flat_map(|page| page.json_ld.iter());
    let nodes: Vec<JsonLdView> = blocks().flat_map(JsonLdView::nodes).collect();
    let types = distinct_types(blocks());
    let organization = nodes.iter().find(|node| node.has_type("Organization"));
    let has_website = nodes.iter().any(|node| node.has_type("WebSite"));

    let coverage = ratio(pages_with_items, pages.len());
    let mut score = coverage * 50.0;
    let mut missing = Vec::new();
    if organization.is_some() {
        score += 20.0;
    } else {
        missing.push("Organization");
    }
    if has_website {
        score += 15.0;
    } else {
        missing.push("WebSite");
    }
    if types.len() >= VARIETY_MIN_TYPES {
        score += 15.0;
    }
    let score = to_score(score);

    let mut details = format!(
        "JSON-LD on {}/{} pages; types: {}",
        pages_with_items,
        pages.len(),
        if types.is_empty() {
            "none declared".to_string()
        } else {
            types.iter().copied().collect::<Vec<_>>().join(", ")
        }
    );
    if let Some(org) = organization {
        if org.object_field("address").is_none() && org.str_field("address").is_none() {
            details.push_str("; Organization has no address");
        }
    }

    let recommendation = if !missing.is_empty() {
        format!("Add {} schema", missing.join(" and "))
    } else if coverage < 1.0 {
        "Extend JSON-LD to every page".to_string()
    } else if types.len() < VARIETY_MIN_TYPES {
        "Describe more entity types (Article, Product, FAQPage, BreadcrumbList)".to_string()
    } else {
        "Structured data is comprehensive".to_string()
    };

    let status = if score >= PASS_AT {
        Status::Pass
    } else {
        Status::Partial
    };
    Finding::new(CheckName::StructuredData, score, status, details, recommendation)
}
