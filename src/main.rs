use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use geolens_core::{
    AuditConfig, AuditResult, CrawlResult, Finding, ProjectedAudit, Status, Tier, audit,
    audit_with_projection,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const APP_NAME: &str = "geolens";

#[derive(Parser, Debug)]
#[command(
    name = APP_NAME,
    version,
    about = "Score a crawled site's readiness for AI crawlers and answer engines"
)]
struct Cli {
    /// Crawl result JSON produced by the crawler
    crawl: PathBuf,

    /// Audit configuration JSON (crawler lists, tier weights, projections)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Also project the score after deploying the generated package
    #[arg(long)]
    project: bool,

    /// Output machine-readable JSON
    #[arg(long)]
    json: bool,

    /// Reference time for content freshness (RFC 3339), defaults to now
    #[arg(long, value_name = "RFC3339")]
    now: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("geolens=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let crawl_text = fs::read_to_string(&cli.crawl)
        .with_context(|| format!("failed to read crawl result {}", cli.crawl.display()))?;
    let crawl = CrawlResult::from_json_str(&crawl_text)
        .with_context(|| format!("invalid crawl result {}", cli.crawl.display()))?;

    let config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            AuditConfig::from_json_str(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => AuditConfig::default(),
    };
    debug!(
        key_crawlers = config.key_crawlers.len(),
        ai_crawlers = config.ai_crawlers.len(),
        projections = config.projections.0.len(),
        "configuration loaded"
    );

    let now = match cli.now.as_deref() {
        Some(raw) => parse_now(raw)?,
        None => Utc::now(),
    };

    let output = if cli.project {
        let report = audit_with_projection(&crawl, &config, now);
        if cli.json {
            serde_json::to_string_pretty(&report)?
        } else {
            render_projection(&crawl.base_url, &report)
        }
    } else {
        let result = audit(&crawl, &config, now);
        if cli.json {
            serde_json::to_string_pretty(&result)?
        } else {
            render_audit(&crawl.base_url, &result)
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}

fn parse_now(raw: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("--now expects an RFC 3339 timestamp, got {raw:?}"))?;
    Ok(parsed.with_timezone(&Utc))
}

const DIVIDER: &str = "─────────────────────────────────────────────────────────────";
const LABEL_WIDTH: usize = 16;
const NAME_WIDTH: usize = 30;

fn push_section_header(buf: &mut String, icon: &str, title: &str) {
    let _ = writeln!(buf, "{DIVIDER}");
    let _ = writeln!(buf, "{icon} {title}");
    let _ = writeln!(buf, "{DIVIDER}");
}

fn push_key_value(buf: &mut String, label: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    let _ = writeln!(buf, "• {:<width$} : {}", label, value, width = LABEL_WIDTH);
}

fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Pass => "✅",
        Status::Partial => "⚠️",
        Status::Fail => "❌",
        Status::NotApplicable => "➖",
    }
}

fn push_finding(buf: &mut String, finding: &Finding) {
    let _ = writeln!(
        buf,
        "{} {:<width$} {:>3}/{}  [{}]",
        status_icon(finding.status),
        finding.name.as_str(),
        finding.score,
        finding.max_score,
        finding.tier,
        width = NAME_WIDTH
    );
    if !finding.details.is_empty() {
        let _ = writeln!(buf, "     {}", finding.details);
    }
    if finding.status != Status::Pass && !finding.recommendation.is_empty() {
        let _ = writeln!(buf, "     → {}", finding.recommendation);
    }
}

fn push_summary(buf: &mut String, result: &AuditResult) {
    push_key_value(
        buf,
        "Score",
        &format!("{}/{}", result.overall_score, result.max_score),
    );
    push_key_value(buf, "Grade", result.grade.as_str());
    for tier in Tier::ALL {
        if let Some(summary) = result.summary.get(&tier) {
            push_key_value(
                buf,
                tier.as_str(),
                &format!("{}/{} passed", summary.passed, summary.total),
            );
        }
    }
}

fn render_audit(base_url: &str, result: &AuditResult) -> String {
    let mut buf = String::new();

    push_section_header(&mut buf, "🔎", "AI Readiness Audit");
    push_key_value(&mut buf, "Site", base_url);
    push_summary(&mut buf, result);
    buf.push('\n');

    for tier in Tier::ALL {
        let findings: Vec<&Finding> = result.items.iter().filter(|item| item.tier == tier).collect();
        if findings.is_empty() {
            continue;
        }
        push_section_header(&mut buf, "📋", &format!("{} priority", tier));
        for finding in findings {
            push_finding(&mut buf, finding);
        }
        buf.push('\n');
    }

    buf
}

fn render_projection(base_url: &str, report: &ProjectedAudit) -> String {
    let mut buf = render_audit(base_url, &report.current);

    push_section_header(&mut buf, "🚀", "Projected After Deploying Package");
    push_key_value(
        &mut buf,
        "Score",
        &format!(
            "{} → {} ({:+})",
            report.current.overall_score, report.projected.overall_score, report.improvement
        ),
    );
    push_key_value(
        &mut buf,
        "Grade",
        &format!("{} → {}", report.current.grade, report.projected.grade),
    );

    for name in &report.improved_checks {
        let (Some(before), Some(after)) = (report.current.item(*name), report.projected.item(*name))
        else {
            continue;
        };
        let _ = writeln!(
            buf,
            "{} {:<width$} {:>3} → {}",
            status_icon(after.status),
            name.as_str(),
            before.score,
            after.score,
            width = NAME_WIDTH
        );
    }

    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use geolens_core::CheckName;

    fn empty_audit() -> AuditResult {
        let now = parse_now("2025-06-01T00:00:00Z").unwrap();
        audit(&CrawlResult::default(), &AuditConfig::default(), now)
    }

    #[test]
    fn test_cli_arguments() {
        let cli = Cli::try_parse_from([
            "geolens",
            "crawl.json",
            "--project",
            "--json",
            "--now",
            "2025-06-01T00:00:00Z",
        ])
        .unwrap();
        assert_eq!(cli.crawl, PathBuf::from("crawl.json"));
        assert!(cli.project);
        assert!(cli.json);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_requires_crawl() {
        assert!(Cli::try_parse_from(["geolens"]).is_err());
    }

    #[test]
    fn test_parse_now_rejects_garbage() {
        assert!(parse_now("yesterday").is_err());
    }

    #[test]
    fn test_push_key_value_skips_empty() {
        let mut buf = String::new();
        push_key_value(&mut buf, "Site", "");
        assert!(buf.is_empty());
    }

    #[test]
    fn test_render_audit_lists_every_finding() {
        let result = empty_audit();
        let text = render_audit("https://example.com", &result);
        assert!(text.contains("AI Readiness Audit"));
        assert!(text.contains("https://example.com"));
        for item in &result.items {
            assert!(text.contains(item.name.as_str()), "missing {}", item.name);
        }
    }

    #[test]
    fn test_render_projection() {
        let report = geolens_core::compare(
            empty_audit(),
            &AuditConfig::default().projections,
            &AuditConfig::default().tier_weights,
        );
        let text = render_projection("https://example.com", &report);
        assert!(text.contains("Projected After Deploying Package"));
        assert!(report.improved_checks.contains(&CheckName::RobotsTxt));
        assert!(text.contains("  0 → 100"));
    }
}
