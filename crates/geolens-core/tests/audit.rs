use chrono::{DateTime, Utc};
use geolens_core::{
    AuditConfig, AuditResult, CHECK_ORDER, CheckName, CrawlResult, Grade, MAX_SCORE, Status,
    Tier, audit, audit_with_projection,
};
use serde_json::{Value, json};

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-06-01T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn crawl(value: Value) -> CrawlResult {
    CrawlResult::from_json_str(&value.to_string()).unwrap()
}

fn page(url: &str, words: usize, faq_items: usize) -> Value {
    let faq: Vec<Value> = (0..faq_items)
        .map(|i| json!({"question": format!("Question {}?", i), "answer": "Answer."}))
        .collect();
    json!({
        "url": url,
        "meta": {
            "title": "Example",
            "description": "An example page",
            "canonical": url,
            "openGraph": {"title": "Example", "description": "An example page"},
            "modifiedDate": "2025-05-01"
        },
        "content": {
            "wordCount": words,
            "headings": [
                {"level": 1, "text": "Example"},
                {"level": 2, "text": "Details"}
            ],
            "faqItems": faq
        },
        "jsonLd": [{
            "@context": "https://schema.org",
            "@graph": [
                {"@type": "Organization", "name": "Example", "address": "1 Main St"},
                {"@type": "WebSite", "name": "Example"}
            ]
        }]
    })
}

fn realistic_crawl() -> CrawlResult {
    crawl(json!({
        "baseUrl": "https://example.com/",
        "pages": [
            page("https://example.com/", 800, 0),
            page("https://example.com/about", 450, 0),
            page("https://example.com/help", 300, 2)
        ],
        "existingFiles": {
            "robots.txt": "User-agent: GPTBot\nAllow: /\n\nUser-agent: *\nDisallow: /admin\n",
            "sitemap.xml": "<urlset><url><loc>https://example.com/</loc></url></urlset>",
            "humans.txt": "Made by people"
        }
    }))
}

fn assert_well_formed(result: &AuditResult) {
    assert_eq!(result.max_score, MAX_SCORE);
    assert!(result.overall_score <= result.max_score);
    assert_eq!(result.grade, Grade::from_score(result.overall_score));
    for item in &result.items {
        assert!(item.score <= item.max_score, "{} out of range", item.name);
        assert_eq!(item.tier, item.name.tier());
    }

    let mut total = 0;
    for tier in Tier::ALL {
        let summary = result.summary[&tier];
        assert!(summary.passed <= summary.total);
        total += summary.total;
    }
    assert_eq!(total, result.items.len());
}

fn score(result: &AuditResult, name: CheckName) -> u8 {
    result.item(name).unwrap().score
}

#[test]
fn test_missing_robots() {
    let result = audit(&CrawlResult::default(), &AuditConfig::default(), now());
    assert_eq!(score(&result, CheckName::RobotsTxt), 0);
    assert_eq!(score(&result, CheckName::AiCrawlerAccess), 100);
    assert_well_formed(&result);
}

#[test]
fn test_wildcard_allow_names_no_crawler() {
    let crawl = crawl(json!({
        "baseUrl": "https://example.com",
        "existingFiles": {"robots.txt": "User-agent: *\nAllow: /"}
    }));
    let result = audit(&crawl, &AuditConfig::default(), now());
    assert_eq!(score(&result, CheckName::RobotsTxt), 30);
    assert_eq!(score(&result, CheckName::AiCrawlerAccess), 100);
}

#[test]
fn test_sitemap_lastmod() {
    let undated = crawl(json!({
        "baseUrl": "https://example.com",
        "existingFiles": {"sitemap.xml": "<urlset><url><loc>https://example.com/</loc></url></urlset>"}
    }));
    let result = audit(&undated, &AuditConfig::default(), now());
    assert_eq!(score(&result, CheckName::Sitemap), 75);

    let dated = crawl(json!({
        "baseUrl": "https://example.com",
        "existingFiles": {"sitemap.xml": "<urlset><url><loc>https://example.com/</loc><lastmod>2025-01-01</lastmod></url></urlset>"}
    }));
    let result = audit(&dated, &AuditConfig::default(), now());
    assert_eq!(score(&result, CheckName::Sitemap), 100);
}

#[test]
fn test_complete_llms_txt() {
    let crawl = crawl(json!({
        "existingFiles": {"llms.txt": "# Site\n> Summary\n## Docs\n- [Page](url)"}
    }));
    let result = audit(&crawl, &AuditConfig::default(), now());
    assert_eq!(score(&result, CheckName::LlmsTxt), 100);
    assert_eq!(result.item(CheckName::LlmsTxt).unwrap().status, Status::Pass);
}

#[test]
fn test_faq_content() {
    let without = crawl(json!({"pages": [page("https://example.com/", 400, 0)]}));
    let result = audit(&without, &AuditConfig::default(), now());
    let faq = result.item(CheckName::FaqContent).unwrap();
    assert_eq!(faq.score, 0);
    assert_eq!(faq.status, Status::Fail);

    let mut with = page("https://example.com/faq", 400, 4);
    with["jsonLd"]
        .as_array_mut()
        .unwrap()
        .push(json!({"@type": "FAQPage", "mainEntity": []}));
    let result = audit(&crawl(json!({"pages": [with]})), &AuditConfig::default(), now());
    assert_eq!(score(&result, CheckName::FaqContent), 100);
}

#[test]
fn test_projection_raises_robots() {
    let config = AuditConfig::default();
    let report = audit_with_projection(&CrawlResult::default(), &config, now());

    assert_eq!(score(&report.current, CheckName::RobotsTxt), 0);
    assert_eq!(score(&report.projected, CheckName::RobotsTxt), 100);
    assert!(report.projected.overall_score > report.current.overall_score);
    assert_eq!(
        report.improvement,
        i16::from(report.projected.overall_score) - i16::from(report.current.overall_score)
    );
    assert!(report.improved_checks.contains(&CheckName::RobotsTxt));
    assert!(!report.improved_checks.contains(&CheckName::AiCrawlerAccess));
}

#[test]
fn test_projection_is_monotonic() {
    let report = audit_with_projection(&realistic_crawl(), &AuditConfig::default(), now());
    assert_well_formed(&report.projected);
    for (before, after) in report.current.items.iter().zip(&report.projected.items) {
        assert_eq!(before.name, after.name);
        assert!(after.score >= before.score, "{} regressed", before.name);
    }
    assert!(report.improvement >= 0);
}

#[test]
fn test_realistic_crawl() {
    let result = audit(&realistic_crawl(), &AuditConfig::default(), now());
    assert_well_formed(&result);
    assert_eq!(result.items.len(), CHECK_ORDER.len());

    let names: Vec<CheckName> = result.items.iter().map(|item| item.name).collect();
    assert_eq!(names, CHECK_ORDER.to_vec());

    // 30 + 1/5 * 70
    assert_eq!(score(&result, CheckName::RobotsTxt), 44);
    assert_eq!(score(&result, CheckName::AiCrawlerAccess), 100);
    assert_eq!(score(&result, CheckName::Sitemap), 75);
    assert_eq!(score(&result, CheckName::HumansTxt), 70);
    assert_eq!(
        result.item(CheckName::ServerSideRendering).unwrap().status,
        Status::Pass
    );
    assert_eq!(
        result.item(CheckName::HeadingHierarchy).unwrap().status,
        Status::Pass
    );
    assert_eq!(
        result.item(CheckName::ContentFreshness).unwrap().status,
        Status::Pass
    );
    assert_eq!(
        result.item(CheckName::LlmsTxt).unwrap().status,
        Status::Fail
    );
}

#[test]
fn test_audit_is_deterministic() {
    let crawl = realistic_crawl();
    let config = AuditConfig::default();
    let first = serde_json::to_string(&audit(&crawl, &config, now())).unwrap();
    let second = serde_json::to_string(&audit(&crawl, &config, now())).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_custom_weights() {
    let config = AuditConfig::from_json_str(
        r#"{"tierWeights": {"critical": 1, "high": 1, "medium": 1, "low": 1}}"#,
    )
    .unwrap();
    let result = audit(&CrawlResult::default(), &config, now());
    // Only AI Crawler Access scores: 100 / 2000
    assert_eq!(result.overall_score, 5);
}

#[test]
fn test_result_json_shape() {
    let result = audit(&realistic_crawl(), &AuditConfig::default(), now());
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["maxScore"], 100);
    assert_eq!(value["summary"]["critical"]["total"], 4);
    let first = &value["items"][0];
    assert_eq!(first["name"], "robots.txt");
    assert_eq!(first["priority"], "critical");
    assert_eq!(first["maxScore"], 100);
}
