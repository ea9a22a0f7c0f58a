//! Presence and quality checks for well-known policy files
//!
//! Each file earns a base score for existing at all, plus increments for the
//! structural signals crawlers actually read.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value as JsonValue;

use crate::finding::{CheckName, Finding, Status};
use crate::sitemap::{SitemapKind, analyze_sitemap};

/// Presence checks pass from this score on
const PRESENCE_PASS_AT: u8 = 70;

static MARKDOWN_LINK_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*[-*]\s*\[[^\]]+\]\([^)]+\)").expect("invalid link regex"));
static MARKDOWN_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#{1,6}\s+\S").expect("invalid heading regex"));

fn presence_status(score: u8) -> Status {
    Status::from_score(score, PRESENCE_PASS_AT, 1)
}

/// Score accumulated from named signals
struct Signals {
    score: u32,
    found: Vec<&'static str>,
    missing: Vec<&'static str>,
}

impl Signals {
    fn base(score: u32) -> Self {
        Self {
            score,
            found: Vec::new(),
            missing: Vec::new(),
        }
    }

    fn add(&mut self, present: bool, points: u32, label: &'static str) {
        if present {
            self.score += points;
            self.found.push(label);
        } else {
            self.missing.push(label);
        }
    }

    fn score(&self) -> u8 {
        self.score.min(100) as u8
    }

    fn describe(&self, file: &str) -> String {
        if self.found.is_empty() {
            format!("{} present", file)
        } else {
            format!("{} present with {}", file, self.found.join(", "))
        }
    }

    fn recommend(&self, file: &str) -> String {
        if self.missing.is_empty() {
            format!("{} is complete", file)
        } else {
            format!("Add {} to {}", self.missing.join(", "), file)
        }
    }

    fn into_finding(self, name: CheckName) -> Finding {
        let score = self.score();
        Finding::new(
            name,
            score,
            presence_status(score),
            self.describe(name.as_str()),
            self.recommend(name.as_str()),
        )
    }
}

/// sitemap.xml: 50 for existing, +25 with entries, +25 when every entry is dated
pub fn check_sitemap(content: Option<&str>, origin: &str) -> Finding {
    let Some(content) = content else {
        return Finding::missing(
            CheckName::Sitemap,
            "Publish a sitemap.xml listing every page with <lastmod> dates",
        );
    };

    let stats = analyze_sitemap(content, origin);
    let mut signals = Signals::base(50);
    signals.add(stats.entries > 0, 25, "URL entries");
    signals.add(stats.fully_dated(), 25, "lastmod on every entry");
    let score = signals.score();

    let kind = match stats.kind {
        SitemapKind::Index => "sitemap index",
        SitemapKind::Standard => "sitemap",
        SitemapKind::Unknown => "unrecognized sitemap",
    };
    let mut details = format!(
        "{} with {} entries, {} dated",
        kind, stats.entries, stats.entries_with_lastmod
    );
    if stats.foreign_entries > 0 {
        details.push_str(&format!(", {} on another domain", stats.foreign_entries));
    }

    Finding::new(
        CheckName::Sitemap,
        score,
        presence_status(score),
        details,
        signals.recommend("sitemap.xml"),
    )
}

/// llms.txt: 40 for existing, +15 per structural element of the llms.txt format
pub fn check_llms_txt(content: Option<&str>) -> Finding {
    let Some(content) = content else {
        return Finding::missing(
            CheckName::LlmsTxt,
            "Publish /llms.txt with a title, a one-line summary and links to key pages",
        );
    };

    let lines: Vec<&str> = content.lines().map(str::trim).collect();
    let mut signals = Signals::base(40);
    signals.add(
        lines.iter().any(|l| l.starts_with("# ")),
        15,
        "a title heading",
    );
    signals.add(
        lines.iter().any(|l| l.starts_with('>')),
        15,
        "a summary blockquote",
    );
    signals.add(
        lines.iter().any(|l| l.starts_with("## ")),
        15,
        "section headings",
    );
    signals.add(MARKDOWN_LINK_ITEM.is_match(content), 15, "link lists");
    signals.into_finding(CheckName::LlmsTxt)
}

/// llms-full.txt: 50 for existing, +25 substantial text, +25 sectioned
pub fn check_llms_full_txt(content: Option<&str>) -> Finding {
    let Some(content) = content else {
        return Finding::missing(
            CheckName::LlmsFullTxt,
            "Publish /llms-full.txt with the full text of your key pages",
        );
    };

    let words = content.split_whitespace().count();
    let headings = MARKDOWN_HEADING.find_iter(content).count();
    let mut signals = Signals::base(50);
    signals.add(words >= 1000, 25, "at least 1000 words");
    signals.add(headings >= 3, 25, "at least 3 headings");
    signals.into_finding(CheckName::LlmsFullTxt)
}

/// security.txt: 50 for existing, +30 `Contact:`, +20 `Expires:` (RFC 9116)
pub fn check_security_txt(content: Option<&str>) -> Finding {
    let Some(content) = content else {
        return Finding::missing(
            CheckName::SecurityTxt,
            "Publish /.well-known/security.txt with Contact and Expires fields",
        );
    };

    let mut signals = Signals::base(50);
    signals.add(has_field(content, "contact"), 30, "a Contact field");
    signals.add(has_field(content, "expires"), 20, "an Expires field");
    signals.into_finding(CheckName::SecurityTxt)
}

/// tdmrep.json: 60 for existing, +40 when it declares `tdm-reservation`
pub fn check_tdmrep(content: Option<&str>) -> Finding {
    let Some(content) = content else {
        return Finding::missing(
            CheckName::TdmRep,
            "Publish /.well-known/tdmrep.json to declare your text and data mining policy",
        );
    };

    let declares = serde_json::from_str::<JsonValue>(content)
        .map(|value| declares_tdm_reservation(&value))
        .unwrap_or(false);
    let mut signals = Signals::base(60);
    signals.add(declares, 40, "a tdm-reservation declaration");
    signals.into_finding(CheckName::TdmRep)
}

fn declares_tdm_reservation(value: &JsonValue) -> bool {
    match value {
        JsonValue::Object(map) => map.contains_key("tdm-reservation"),
        JsonValue::Array(items) => items.iter().any(declares_tdm_reservation),
        _ => false,
    }
}

/// humans.txt: 70 for existing, +30 with a `/* TEAM */` section
pub fn check_humans_txt(content: Option<&str>) -> Finding {
    let Some(content) = content else {
        return Finding::missing(
            CheckName::HumansTxt,
            "Publish /humans.txt crediting the people behind the site",
        );
    };

    let has_team = content.to_ascii_uppercase().contains("/* TEAM */");
    let mut signals = Signals::base(70);
    signals.add(has_team, 30, "a TEAM section");
    signals.into_finding(CheckName::HumansTxt)
}

/// manifest.json: 50 for existing, +25 named, +25 with icons
pub fn check_manifest(content: Option<&str>) -> Finding {
    let Some(content) = content else {
        return Finding::missing(
            CheckName::WebManifest,
            "Publish a web app manifest with name and icons",
        );
    };

    let parsed = serde_json::from_str::<JsonValue>(content).ok();
    let named = parsed
        .as_ref()
        .and_then(|v| v.get("name"))
        .and_then(JsonValue::as_str)
        .is_some_and(|name| !name.trim().is_empty());
    let has_icons = parsed
        .as_ref()
        .and_then(|v| v.get("icons"))
        .and_then(JsonValue::as_array)
        .is_some_and(|icons| !icons.is_empty());

    let mut signals = Signals::base(50);
    signals.add(named, 25, "a name");
    signals.add(has_icons, 25, "icons");
    signals.into_finding(CheckName::WebManifest)
}

/// ai.txt and ai.json score 50 each, independently
pub fn check_ai_policy(ai_txt: Option<&str>, ai_json: Option<&str>) -> Finding {
    let mut signals = Signals::base(0);
    signals.add(ai_txt.is_some(), 50, "ai.txt");
    signals.add(ai_json.is_some(), 50, "ai.json");
    let score = signals.score();

    let details = if signals.found.is_empty() {
        "No AI usage policy files found".to_string()
    } else {
        format!("Found {}", signals.found.join(" and "))
    };
    let recommendation = if signals.missing.is_empty() {
        "AI usage policy is declared in both formats".to_string()
    } else {
        format!(
            "Publish {} to declare how AI systems may use your content",
            signals.missing.join(" and ")
        )
    };

    let status = match score {
        100 => Status::Pass,
        0 => Status::Fail,
        _ => Status::Partial,
    };
    Finding::new(CheckName::AiPolicy, score, status, details, recommendation)
}

fn has_field(content: &str, field: &str) -> bool {
    content.lines().any(|line| {
        line.split_once(':')
            .is_some_and(|(key, value)| key.trim().eq_ignore_ascii_case(field) && !value.trim().is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sitemap_missing() {
        let finding = check_sitemap(None, "https://example.com");
        assert_eq!(finding.score, 0);
        assert_eq!(finding.status, Status::Fail);
    }

    #[test]
    fn test_sitemap_scores() {
        let undated = "<urlset><url><loc>https://example.com/</loc></url></urlset>";
        assert_eq!(check_sitemap(Some(undated), "https://example.com").score, 75);

        let dated = "<urlset><url><loc>https://example.com/</loc><lastmod>2025-01-01</lastmod></url></urlset>";
        let finding = check_sitemap(Some(dated), "https://example.com");
        assert_eq!(finding.score, 100);
        assert_eq!(finding.status, Status::Pass);

        let empty = "<urlset></urlset>";
        assert_eq!(check_sitemap(Some(empty), "https://example.com").score, 50);
    }

    #[test]
    fn test_llms_txt_full_structure() {
        let finding = check_llms_txt(Some("# Site\n> Summary\n## Docs\n- [Page](url)"));
        assert_eq!(finding.score, 100);
        assert_eq!(finding.status, Status::Pass);
    }

    #[test]
    fn test_llms_txt_unstructured() {
        let finding = check_llms_txt(Some("just some words"));
        assert_eq!(finding.score, 40);
        assert_eq!(finding.status, Status::Partial);
        assert!(finding.recommendation.contains("a title heading"));
    }

    #[test]
    fn test_llms_full_txt() {
        let long = format!("# A\n## B\n## C\n{}", "word ".repeat(1000));
        assert_eq!(check_llms_full_txt(Some(&long)).score, 100);
        assert_eq!(check_llms_full_txt(Some("short")).score, 50);
    }

    #[test]
    fn test_security_txt_fields() {
        let full = "Contact: mailto:security@example.com\nExpires: 2027-01-01T00:00:00Z\n";
        assert_eq!(check_security_txt(Some(full)).score, 100);
        assert_eq!(check_security_txt(Some("Contact: x")).score, 80);
        assert_eq!(check_security_txt(Some("Contact:")).score, 50);
    }

    #[test]
    fn test_tdmrep_declaration() {
        let json = r#"[{"location": "/", "tdm-reservation": 1}]"#;
        assert_eq!(check_tdmrep(Some(json)).score, 100);
        assert_eq!(check_tdmrep(Some("{not json")).score, 60);
    }

    #[test]
    fn test_humans_txt() {
        assert_eq!(check_humans_txt(Some("/* TEAM */\nDev: Jo")).score, 100);
        assert_eq!(check_humans_txt(Some("hello")).score, 70);
    }

    #[test]
    fn test_manifest() {
        let json = r#"{"name": "Example", "icons": [{"src": "/icon.png"}]}"#;
        assert_eq!(check_manifest(Some(json)).score, 100);
        assert_eq!(check_manifest(Some(r#"{"name": ""}"#)).score, 50);
    }

    #[test]
    fn test_ai_policy_scores_each_artifact() {
        assert_eq!(check_ai_policy(None, None).status, Status::Fail);
        let half = check_ai_policy(Some("User-Agent: *"), None);
        assert_eq!(half.score, 50);
        assert_eq!(half.status, Status::Partial);
        assert_eq!(check_ai_policy(Some("x"), Some("{}")).score, 100);
    }
}
