//! Search engine indexing readiness
//!
//! Five independent 20 point signals: Google verification, Bing verification,
//! a `Sitemap:` directive in robots.txt, no `noindex` pages, and canonical
//! coverage.

use crate::finding::{CheckName, Finding, Status, ratio, to_score};
use crate::robots_txt::RobotsTxt;
use crate::types::{CrawlResult, non_blank};

const SIGNAL_POINTS: f64 = 20.0;

/// Canonical coverage earning the full canonical signal
const CANONICAL_TARGET: f64 = 0.8;

pub fn check_indexing(crawl: &CrawlResult) -> Finding {
    let pages = &crawl.pages;
    let mut score = 0.0;
    let mut found = Vec::new();
    let mut missing = Vec::new();

    let mut signal = |present: bool, label: &'static str| {
        if present {
            found.push(label);
        } else {
            missing.push(label);
        }
        present
    };

    let google = pages.iter().any(|page| {
        page.meta
            .google_site_verification
            .as_deref()
            .is_some_and(|v| !v.trim().is_empty())
    });
    if signal(google, "Google Search Console verification") {
        score += SIGNAL_POINTS;
    }

    let bing_meta = pages.iter().any(|page| {
        page.meta
            .bing_verification
            .as_deref()
            .is_some_and(|v| !v.trim().is_empty())
    });
    let bing_file = non_blank(&crawl.existing_files.bing_site_auth).is_some();
    if signal(bing_meta || bing_file, "Bing Webmaster verification") {
        score += SIGNAL_POINTS;
    }

    let sitemap_directive = non_blank(&crawl.existing_files.robots_txt)
        .is_some_and(|robots| !RobotsTxt::parse(robots).sitemaps.is_empty());
    if signal(sitemap_directive, "Sitemap directive in robots.txt") {
        score += SIGNAL_POINTS;
    }

    let noindex_pages = pages.iter().filter(|page| page.is_noindex()).count();
    if signal(!pages.is_empty() && noindex_pages == 0, "no noindex pages") {
        score += SIGNAL_POINTS;
    }

    let canonical_pages = pages
        .iter()
        .filter(|page| page.meta.canonical.as_deref().is_some_and(|c| !c.trim().is_empty()))
        .count();
    let canonical_coverage = ratio(canonical_pages, pages.len());
    signal(canonical_coverage >= CANONICAL_TARGET, "canonical URLs");
    score += SIGNAL_POINTS * (canonical_coverage / CANONICAL_TARGET).min(1.0);

    let score = to_score(score);
    let status = if score >= 100 {
        Status::Pass
    } else if score >= 50 {
        Status::Partial
    } else {
        Status::Fail
    };

    let mut details = if found.is_empty() {
        "No indexing signals found".to_string()
    } else {
        format!("Found {}", found.join(", "))
    };
    if noindex_pages > 0 {
        details.push_str(&format!("; {} pages marked noindex", noindex_pages));
    }
    let recommendation = if missing.is_empty() {
        "Site is fully set up for search engine indexing".to_string()
    } else {
        format!("Add {}", missing.join(", "))
    };

    Finding::new(
        CheckName::SearchEngineIndexing,
        score,
        status,
        details,
        recommendation,
    )
}
