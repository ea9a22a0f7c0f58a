//! Crawl result types consumed by the audit engine
//!
//! These mirror what the crawl and extraction stages hand over. Every field is
//! optional on the wire so that a sparse or partially extracted crawl still
//! deserializes; absent values are treated as "no signal" by the rules.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use crate::error::Result;
use crate::url_utils::normalize_origin;

/// A fully materialized crawl of one site
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CrawlResult {
    /// URL the crawl started from
    pub base_url: String,

    /// Crawled pages in discovery order
    pub pages: Vec<PageRecord>,

    /// Site-wide identity summary
    pub identity: SiteIdentity,

    /// Policy files fetched from well-known locations
    pub existing_files: ExistingFiles,

    /// Crawl statistics
    pub stats: CrawlStats,
}

impl CrawlResult {
    /// Parse a crawl result from its JSON representation
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Origin (scheme + host + port) of the crawled site
    pub fn origin(&self) -> String {
        normalize_origin(&self.base_url)
    }
}

/// One crawled page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageRecord {
    pub url: String,
    pub meta: PageMeta,
    pub content: PageContent,

    /// Raw JSON-LD blocks as extracted from the page
    pub json_ld: Vec<JsonValue>,

    pub navigation: Vec<NavLink>,

    /// HTTP response headers
    pub headers: BTreeMap<String, String>,
}

impl PageRecord {
    /// Case-insensitive response header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Whether the page asks not to be indexed, via meta robots or `X-Robots-Tag`
    pub fn is_noindex(&self) -> bool {
        let in_meta = self
            .meta
            .robots
            .as_deref()
            .is_some_and(|robots| robots.to_ascii_lowercase().contains("noindex"));
        let in_header = self
            .header("x-robots-tag")
            .is_some_and(|tag| tag.to_ascii_lowercase().contains("noindex"));
        in_meta || in_header
    }
}

/// Metadata extracted from a page's head and headers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub canonical: Option<String>,

    /// Content of `<meta name="robots">`
    pub robots: Option<String>,

    pub open_graph: OpenGraph,

    /// `google-site-verification` meta tag content
    pub google_site_verification: Option<String>,

    /// `msvalidate.01` meta tag content
    pub bing_verification: Option<String>,

    pub modified_date: Option<String>,
    pub published_date: Option<String>,

    /// `Last-Modified` as reported by the crawler
    pub last_modified: Option<String>,

    pub language: Option<String>,
}

/// Open Graph properties
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OpenGraph {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    #[serde(rename = "type")]
    pub og_type: Option<String>,
}

/// Extracted body content of a page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageContent {
    /// Words in the server-rendered body text
    pub word_count: usize,

    /// Headings in document order
    pub headings: Vec<Heading>,

    pub faq_items: Vec<FaqItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

/// Site identity summary assembled during extraction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteIdentity {
    pub name: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub social_profiles: Vec<String>,
}

/// Policy files found on the site, keyed by their well-known names
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExistingFiles {
    #[serde(rename = "robots.txt")]
    pub robots_txt: Option<String>,
    #[serde(rename = "sitemap.xml")]
    pub sitemap_xml: Option<String>,
    #[serde(rename = "llms.txt")]
    pub llms_txt: Option<String>,
    #[serde(rename = "llms-full.txt")]
    pub llms_full_txt: Option<String>,
    #[serde(rename = "ai.txt")]
    pub ai_txt: Option<String>,
    #[serde(rename = "ai.json")]
    pub ai_json: Option<String>,
    #[serde(rename = "security.txt")]
    pub security_txt: Option<String>,
    #[serde(rename = "tdmrep.json")]
    pub tdmrep_json: Option<String>,
    #[serde(rename = "humans.txt")]
    pub humans_txt: Option<String>,
    #[serde(rename = "manifest.json")]
    pub manifest_json: Option<String>,
    #[serde(rename = "BingSiteAuth.xml")]
    pub bing_site_auth: Option<String>,
}

/// Return the file body unless it is missing or blank
pub(crate) fn non_blank(file: &Option<String>) -> Option<&str> {
    file.as_deref().filter(|text| !text.trim().is_empty())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CrawlStats {
    pub pages_crawled: usize,
    pub elapsed_ms: u64,
    pub errors: usize,
}
