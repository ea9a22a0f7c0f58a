//! Page content checks: rendering, headings, freshness, depth and FAQs

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

use crate::finding::{CheckName, Finding, Status, ratio, to_score};
use crate::json_ld::JsonLdView;
use crate::types::PageRecord;

/// Words a page needs before it counts as server-rendered
const RENDERED_MIN_WORDS: usize = 50;
const THIN_MAX_WORDS: usize = 300;
const SUBSTANTIVE_MIN_WORDS: usize = 500;
const WELL_STRUCTURED_MIN_HEADINGS: usize = 3;
const FRESH_WITHIN_DAYS: i64 = 365;
const FAQ_POINTS_PER_ITEM: usize = 15;
const FAQ_ITEM_CAP: usize = 60;
const FAQ_SCHEMA_BONUS: u8 = 40;

/// Share of pages with real text before any script runs
pub fn check_server_rendering(pages: &[PageRecord]) -> Finding {
    if pages.is_empty() {
        return Finding::not_applicable(CheckName::ServerSideRendering);
    }

    let rendered = pages
        .iter()
        .filter(|page| page.content.word_count > RENDERED_MIN_WORDS)
        .count();
    let coverage = ratio(rendered, pages.len());
    let recommendation = if rendered == pages.len() {
        "Content is available without JavaScript".to_string()
    } else {
        format!(
            "Render content on the server; {} pages show little text without JavaScript",
            pages.len() - rendered
        )
    };

    Finding::new(
        CheckName::ServerSideRendering,
        to_score(coverage * 100.0),
        Status::from_ratio(coverage, 0.8, 0.5),
        format!(
            "{}/{} pages have more than {} words in the initial HTML",
            rendered,
            pages.len(),
            RENDERED_MIN_WORDS
        ),
        recommendation,
    )
}

/// Exactly one H1 and no skipped levels, over pages that have headings
pub fn check_heading_hierarchy(pages: &[PageRecord]) -> Finding {
    let headed: Vec<&PageRecord> = pages
        .iter()
        .filter(|page| !page.content.headings.is_empty())
        .collect();
    if headed.is_empty() {
        if pages.is_empty() {
            return Finding::not_applicable(CheckName::HeadingHierarchy);
        }
        return Finding::new(
            CheckName::HeadingHierarchy,
            0,
            Status::NotApplicable,
            "No headings found on any page",
            "Structure pages with a single H1 followed by H2/H3 sections",
        );
    }

    let correct = headed
        .iter()
        .filter(|page| has_clean_hierarchy(page))
        .count();
    let coverage = ratio(correct, headed.len());
    let recommendation = if correct == headed.len() {
        "Heading structure is consistent".to_string()
    } else {
        "Use exactly one H1 per page and do not skip heading levels".to_string()
    };

    Finding::new(
        CheckName::HeadingHierarchy,
        to_score(coverage * 100.0),
        Status::from_ratio(coverage, 0.8, 0.5),
        format!(
            "{}/{} pages have a single H1 and sequential heading levels",
            correct,
            headed.len()
        ),
        recommendation,
    )
}

fn has_clean_hierarchy(page: &PageRecord) -> bool {
    let headings = &page.content.headings;
    let h1_count = headings.iter().filter(|h| h.level == 1).count();
    let skips = headings
        .windows(2)
        .any(|pair| u16::from(pair[1].level) > u16::from(pair[0].level) + 1);
    h1_count == 1 && !skips
}

/// 50% dated pages, 30% recently updated among dated, 20% JSON-LD dates
pub fn check_content_freshness(pages: &[PageRecord], now: DateTime<Utc>) -> Finding {
    if pages.is_empty() {
        return Finding::not_applicable(CheckName::ContentFreshness);
    }

    let window = TimeDelta::days(FRESH_WITHIN_DAYS);
    let mut dated = 0;
    let mut recent = 0;
    let mut schema_dated = 0;

    for page in pages {
        let signals = date_signals(page);
        if !signals.is_empty() {
            dated += 1;
            let newest = signals.iter().filter_map(|raw| parse_date(raw)).max();
            let age = newest.map(|date| now.signed_duration_since(date));
            // Future dates never count as recent
            if age.is_some_and(|age| age >= TimeDelta::zero() && age <= window) {
                recent += 1;
            }
        }
        let has_schema_date = page
            .json_ld
            .iter()
            .flat_map(JsonLdView::nodes)
            .any(|node| node.date().is_some());
        if has_schema_date {
            schema_dated += 1;
        }
    }

    let dated_ratio = ratio(dated, pages.len());
    let recent_ratio = ratio(recent, dated);
    let schema_ratio = ratio(schema_dated, pages.len());
    let score = to_score(dated_ratio * 50.0 + recent_ratio * 30.0 + schema_ratio * 20.0);

    let recommendation = if dated < pages.len() {
        "Expose article:modified_time or Last-Modified on every page"
    } else if recent < dated {
        "Refresh content older than a year"
    } else if schema_dated < pages.len() {
        "Add dateModified to page JSON-LD"
    } else {
        "Content carries current date signals"
    };

    Finding::new(
        CheckName::ContentFreshness,
        score,
        Status::from_score(score, 60, 30),
        format!(
            "{}/{} pages dated, {} updated within a year, {} with JSON-LD dates",
            dated,
            pages.len(),
            recent,
            schema_dated
        ),
        recommendation,
    )
}

fn date_signals(page: &PageRecord) -> Vec<&str> {
    [
        page.meta.modified_date.as_deref(),
        page.meta.published_date.as_deref(),
        page.meta.last_modified.as_deref(),
        page.header("last-modified"),
    ]
    .into_iter()
    .flatten()
    .filter(|raw| !raw.trim().is_empty())
    .collect()
}

/// Parse RFC 3339, RFC 2822 (HTTP dates) or a leading `YYYY-MM-DD`
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(raw) {
        return Some(date.with_timezone(&Utc));
    }
    let day = raw.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

/// `(1 − thin)×30 + substantive×40 + well-structured-among-substantive×30`
pub fn check_content_structure(pages: &[PageRecord]) -> Finding {
    if pages.is_empty() {
        return Finding::not_applicable(CheckName::ContentStructure);
    }

    let thin = pages
        .iter()
        .filter(|page| page.content.word_count < THIN_MAX_WORDS)
        .count();
    let substantive: Vec<&PageRecord> = pages
        .iter()
        .filter(|page| page.content.word_count > SUBSTANTIVE_MIN_WORDS)
        .collect();
    let well_structured = substantive
        .iter()
        .filter(|page| page.content.headings.len() >= WELL_STRUCTURED_MIN_HEADINGS)
        .count();

    let score = to_score(
        (1.0 - ratio(thin, pages.len())) * 30.0
            + ratio(substantive.len(), pages.len()) * 40.0
            + ratio(well_structured, substantive.len()) * 30.0,
    );

    let recommendation = if thin > 0 {
        format!(
            "Expand or consolidate {} thin pages under {} words",
            thin, THIN_MAX_WORDS
        )
    } else if well_structured < substantive.len() {
        "Break long pages into sections with descriptive headings".to_string()
    } else {
        "Content depth and structure are solid".to_string()
    };

    Finding::new(
        CheckName::ContentStructure,
        score,
        Status::from_score(score, 70, 40),
        format!(
            "{} thin, {} substantive ({} well structured) of {} pages",
            thin,
            substantive.len(),
            well_structured,
            pages.len()
        ),
        recommendation,
    )
}

/// 15 points per FAQ item up to 60, plus 40 for FAQPage schema
pub fn check_faq(pages: &[PageRecord]) -> Finding {
    let items: usize = pages.iter().map(|page| page.content.faq_items.len()).sum();
    let has_schema = pages
        .iter()
        .flat_map(|page| page.json_ld.iter())
        .flat_map(JsonLdView::nodes)
        .any(|node| node.has_type("FAQPage"));

    if items == 0 {
        return Finding::new(
            CheckName::FaqContent,
            0,
            Status::Fail,
            "No FAQ content found",
            "Add an FAQ section answering the questions users ask AI assistants, marked up as FAQPage",
        );
    }

    let mut score = (items * FAQ_POINTS_PER_ITEM).min(FAQ_ITEM_CAP) as u8;
    if has_schema {
        score += FAQ_SCHEMA_BONUS;
    }

    let recommendation = if !has_schema {
        "Mark up FAQ content with FAQPage JSON-LD"
    } else if score < 100 {
        "Add more questions and answers"
    } else {
        "FAQ content is well covered"
    };

    Finding::new(
        CheckName::FaqContent,
        score,
        Status::from_score(score, 60, 1),
        format!(
            "{} FAQ items{}",
            items,
            if has_schema { " with FAQPage schema" } else { "" }
        ),
        recommendation,
    )
}
