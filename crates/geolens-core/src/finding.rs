//! Findings produced by the rule evaluators
//!
//! A [`Finding`] is identified by its [`CheckName`]. The serialized names are
//! the strings report renderers key off, so they live in one enum shared by
//! the evaluators, the projection table and every consumer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum score of every finding
pub const MAX_SCORE: u8 = 100;

/// Identity of an audit check
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CheckName {
    #[serde(rename = "robots.txt")]
    RobotsTxt,
    #[serde(rename = "AI Crawler Access")]
    AiCrawlerAccess,
    #[serde(rename = "Structured Data (JSON-LD)")]
    StructuredData,
    #[serde(rename = "Server-Side Rendering")]
    ServerSideRendering,
    #[serde(rename = "sitemap.xml")]
    Sitemap,
    #[serde(rename = "llms.txt")]
    LlmsTxt,
    #[serde(rename = "Meta Descriptions")]
    MetaDescriptions,
    #[serde(rename = "Heading Hierarchy")]
    HeadingHierarchy,
    #[serde(rename = "Search Engine Indexing")]
    SearchEngineIndexing,
    #[serde(rename = "llms-full.txt")]
    LlmsFullTxt,
    #[serde(rename = "Open Graph Tags")]
    OpenGraph,
    #[serde(rename = "AI Content Directives")]
    AiContentDirectives,
    #[serde(rename = "Content Freshness")]
    ContentFreshness,
    #[serde(rename = "Content Structure & Depth")]
    ContentStructure,
    #[serde(rename = "FAQ Content")]
    FaqContent,
    #[serde(rename = "AI Policy (ai.txt / ai.json)")]
    AiPolicy,
    #[serde(rename = "security.txt")]
    SecurityTxt,
    #[serde(rename = "tdmrep.json")]
    TdmRep,
    #[serde(rename = "humans.txt")]
    HumansTxt,
    #[serde(rename = "manifest.json")]
    WebManifest,
}

impl CheckName {
    /// Stable display name, identical to the serialized form
    pub fn as_str(self) -> &'static str {
        match self {
            CheckName::RobotsTxt => "robots.txt",
            CheckName::AiCrawlerAccess => "AI Crawler Access",
            CheckName::StructuredData => "Structured Data (JSON-LD)",
            CheckName::ServerSideRendering => "Server-Side Rendering",
            CheckName::Sitemap => "sitemap.xml",
            CheckName::LlmsTxt => "llms.txt",
            CheckName::MetaDescriptions => "Meta Descriptions",
            CheckName::HeadingHierarchy => "Heading Hierarchy",
            CheckName::SearchEngineIndexing => "Search Engine Indexing",
            CheckName::LlmsFullTxt => "llms-full.txt",
            CheckName::OpenGraph => "Open Graph Tags",
            CheckName::AiContentDirectives => "AI Content Directives",
            CheckName::ContentFreshness => "Content Freshness",
            CheckName::ContentStructure => "Content Structure & Depth",
            CheckName::FaqContent => "FAQ Content",
            CheckName::AiPolicy => "AI Policy (ai.txt / ai.json)",
            CheckName::SecurityTxt => "security.txt",
            CheckName::TdmRep => "tdmrep.json",
            CheckName::HumansTxt => "humans.txt",
            CheckName::WebManifest => "manifest.json",
        }
    }

    /// Priority tier this check is weighted with
    pub fn tier(self) -> Tier {
        match self {
            CheckName::RobotsTxt
            | CheckName::AiCrawlerAccess
            | CheckName::StructuredData
            | CheckName::ServerSideRendering => Tier::Critical,
            CheckName::Sitemap
            | CheckName::LlmsTxt
            | CheckName::MetaDescriptions
            | CheckName::HeadingHierarchy
            | CheckName::SearchEngineIndexing => Tier::High,
            CheckName::LlmsFullTxt
            | CheckName::OpenGraph
            | CheckName::AiContentDirectives
            | CheckName::ContentFreshness
            | CheckName::ContentStructure
            | CheckName::FaqContent => Tier::Medium,
            CheckName::AiPolicy
            | CheckName::SecurityTxt
            | CheckName::TdmRep
            | CheckName::HumansTxt
            | CheckName::WebManifest => Tier::Low,
        }
    }
}

impl fmt::Display for CheckName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority tier of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Blocks AI discovery outright
    Critical,

    /// Strongly recommended
    High,

    /// Recommended
    Medium,

    /// Nice to have
    Low,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Critical, Tier::High, Tier::Medium, Tier::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Critical => "critical",
            Tier::High => "high",
            Tier::Medium => "medium",
            Tier::Low => "low",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pass,
    Partial,
    Fail,
    NotApplicable,
}

impl Status {
    /// `pass` and `partial` both count toward a tier's passed total
    pub fn counts_as_passed(self) -> bool {
        matches!(self, Status::Pass | Status::Partial)
    }

    /// Map a score onto a status with the given pass/partial floors
    pub fn from_score(score: u8, pass_at: u8, partial_at: u8) -> Self {
        if score >= pass_at {
            Status::Pass
        } else if score >= partial_at && score > 0 {
            Status::Partial
        } else {
            Status::Fail
        }
    }

    /// Map a coverage ratio onto a status with the given floors
    pub fn from_ratio(ratio: f64, pass_at: f64, partial_at: f64) -> Self {
        if ratio >= pass_at {
            Status::Pass
        } else if ratio >= partial_at && ratio > 0.0 {
            Status::Partial
        } else {
            Status::Fail
        }
    }
}

/// One evaluated check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub name: CheckName,
    #[serde(rename = "priority")]
    pub tier: Tier,
    pub score: u8,
    pub max_score: u8,
    pub status: Status,
    pub details: String,
    pub recommendation: String,
}

impl Finding {
    /// Build a finding for `name`, clamping the score into range
    pub fn new(
        name: CheckName,
        score: u8,
        status: Status,
        details: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            name,
            tier: name.tier(),
            score: score.min(MAX_SCORE),
            max_score: MAX_SCORE,
            status,
            details: details.into(),
            recommendation: recommendation.into(),
        }
    }

    /// The policy file is missing entirely
    pub fn missing(name: CheckName, recommendation: impl Into<String>) -> Self {
        Self::new(
            name,
            0,
            Status::Fail,
            format!("{} not found", name),
            recommendation,
        )
    }

    /// The check depends on pages and the crawl has none
    pub fn not_applicable(name: CheckName) -> Self {
        Self::new(
            name,
            0,
            Status::NotApplicable,
            "No pages were crawled",
            "Crawl at least one page to evaluate this check",
        )
    }
}

/// Round a 0-100 float score into a finding score
pub fn to_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, f64::from(MAX_SCORE)) as u8
}

/// Fraction of `part` in `whole`, zero for an empty whole
pub fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
