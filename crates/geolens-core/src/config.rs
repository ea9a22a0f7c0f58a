//! Audit configuration
//!
//! All reference tables the engine reads live in one immutable value that is
//! passed in explicitly. Any field omitted from a JSON config falls back to
//! its default.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{AuditError, Result};
use crate::finding::{CheckName, Tier, MAX_SCORE};

/// Crawlers whose presence in robots.txt signals deliberate AI policy
pub const KEY_AI_CRAWLERS: &[&str] = &[
    "GPTBot",          // OpenAI
    "ClaudeBot",       // Anthropic
    "PerplexityBot",   // Perplexity
    "Google-Extended", // Google Gemini training
    "CCBot",           // Common Crawl
];

/// Crawlers checked for being blocked
pub const AI_CRAWLERS: &[&str] = &[
    "GPTBot",
    "ChatGPT-User",
    "OAI-SearchBot",
    "ClaudeBot",
    "Claude-Web",
    "anthropic-ai",
    "PerplexityBot",
    "Google-Extended",
    "Applebot-Extended",
    "CCBot",
    "Bytespider",
    "cohere-ai",
    "Meta-ExternalAgent",
];

/// Recommendation attached to projected findings
pub const PACKAGE_RECOMMENDATION: &str = "Included in generated package";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuditConfig {
    pub key_crawlers: Vec<String>,
    pub ai_crawlers: Vec<String>,
    pub tier_weights: TierWeights,
    pub projections: ProjectionTable,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            key_crawlers: KEY_AI_CRAWLERS.iter().map(|s| s.to_string()).collect(),
            ai_crawlers: AI_CRAWLERS.iter().map(|s| s.to_string()).collect(),
            tier_weights: TierWeights::default(),
            projections: ProjectionTable::default(),
        }
    }
}

impl AuditConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AuditConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.key_crawlers.is_empty() {
            return Err(invalid("keyCrawlers must not be empty"));
        }
        if self.ai_crawlers.is_empty() {
            return Err(invalid("aiCrawlers must not be empty"));
        }
        for (tier, weight) in &self.tier_weights.0 {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(invalid(format!("weight for {} must be a non-negative number", tier)));
            }
        }
        for (name, target) in &self.projections.0 {
            if target.score > MAX_SCORE {
                return Err(invalid(format!(
                    "projected score for {} exceeds {}",
                    name, MAX_SCORE
                )));
            }
        }
        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> AuditError {
    AuditError::InvalidConfig {
        reason: reason.into(),
    }
}

/// Weight of each tier in the overall score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierWeights(pub BTreeMap<Tier, f64>);

impl TierWeights {
    /// Weight for `tier`; a tier missing from the table weighs 1
    pub fn weight(&self, tier: Tier) -> f64 {
        self.0.get(&tier).copied().unwrap_or(1.0)
    }
}

impl Default for TierWeights {
    fn default() -> Self {
        Self(BTreeMap::from([
            (Tier::Critical, 3.0),
            (Tier::High, 2.0),
            (Tier::Medium, 1.0),
            (Tier::Low, 0.5),
        ]))
    }
}

/// Score a check reaches once the generated file is deployed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedImprovement {
    pub score: u8,
    pub note: String,
}

/// Checks eligible for projection and their targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectionTable(pub BTreeMap<CheckName, ProjectedImprovement>);

impl ProjectionTable {
    pub fn get(&self, name: CheckName) -> Option<&ProjectedImprovement> {
        self.0.get(&name)
    }
}

impl Default for ProjectionTable {
    fn default() -> Self {
        let entries = [
            (
                CheckName::RobotsTxt,
                100,
                "Generated robots.txt names every major AI crawler and references the sitemap",
            ),
            (
                CheckName::AiCrawlerAccess,
                100,
                "Generated robots.txt grants AI crawlers explicit access",
            ),
            (
                CheckName::Sitemap,
                100,
                "Generated sitemap.xml lists every crawled page with lastmod dates",
            ),
            (
                CheckName::LlmsTxt,
                100,
                "Generated llms.txt with title, summary, sections and page links",
            ),
            (
                CheckName::LlmsFullTxt,
                100,
                "Generated llms-full.txt with the full text of crawled pages",
            ),
            (
                CheckName::StructuredData,
                80,
                "Generated Organization and WebSite JSON-LD ready to embed",
            ),
            (
                CheckName::AiContentDirectives,
                80,
                "Generated meta robots snippet with max-snippet and max-image-preview",
            ),
            (
                CheckName::AiPolicy,
                100,
                "Generated ai.txt and ai.json declaring AI usage policy",
            ),
            (
                CheckName::SecurityTxt,
                100,
                "Generated security.txt with Contact and Expires fields",
            ),
            (
                CheckName::TdmRep,
                100,
                "Generated tdmrep.json declaring text and data mining reservation",
            ),
            (
                CheckName::HumansTxt,
                100,
                "Generated humans.txt with team section",
            ),
            (
                CheckName::WebManifest,
                100,
                "Generated manifest.json with name and icons",
            ),
        ];

        Self(
            entries
                .into_iter()
                .map(|(name, score, note)| {
                    (
                        name,
                        ProjectedImprovement {
                            score,
                            note: note.to_string(),
                        },
                    )
                })
                .collect(),
        )
    }
}
