//! robots.txt checks: AI crawler coverage and AI crawler blocking

use crate::finding::{CheckName, Finding, Status, ratio, to_score};
use crate::robots_txt::RobotsTxt;

/// Crawlers that must be named for the coverage check to pass
const COVERAGE_PASS_AT: usize = 3;

/// Score for a robots.txt that names none of the key crawlers
const UNCOVERED_SCORE: u8 = 30;

/// How many key AI crawlers robots.txt addresses by name
pub fn check_robots_txt<S: AsRef<str>>(content: Option<&str>, key_crawlers: &[S]) -> Finding {
    let Some(content) = content else {
        return Finding::missing(
            CheckName::RobotsTxt,
            "Publish a robots.txt with explicit rules for AI crawlers such as GPTBot and ClaudeBot",
        );
    };

    let robots = RobotsTxt::parse(content);
    let (mentioned, unmentioned): (Vec<&str>, Vec<&str>) = key_crawlers
        .iter()
        .map(|crawler| crawler.as_ref())
        .partition(|crawler| robots.mentions(crawler));

    if mentioned.is_empty() {
        return Finding::new(
            CheckName::RobotsTxt,
            UNCOVERED_SCORE,
            Status::Partial,
            "robots.txt found but names none of the key AI crawlers",
            format!("Add explicit User-agent groups for {}", unmentioned.join(", ")),
        );
    }

    let coverage = ratio(mentioned.len(), key_crawlers.len());
    let score = to_score((f64::from(UNCOVERED_SCORE) + coverage * 70.0).min(100.0));
    let status = if mentioned.len() >= COVERAGE_PASS_AT {
        Status::Pass
    } else {
        Status::Partial
    };
    let recommendation = if unmentioned.is_empty() {
        "robots.txt addresses every key AI crawler".to_string()
    } else {
        format!("Also address {}", unmentioned.join(", "))
    };

    Finding::new(
        CheckName::RobotsTxt,
        score,
        status,
        format!(
            "robots.txt names {} of {} key AI crawlers: {}",
            mentioned.len(),
            key_crawlers.len(),
            mentioned.join(", ")
        ),
        recommendation,
    )
}

/// Share of known AI crawlers that robots.txt leaves unblocked
pub fn check_ai_crawler_access<S: AsRef<str>>(content: Option<&str>, ai_crawlers: &[S]) -> Finding {
    let Some(content) = content else {
        return Finding::new(
            CheckName::AiCrawlerAccess,
            100,
            Status::Pass,
            "No robots.txt, so no AI crawler is blocked",
            "Publish a robots.txt that welcomes AI crawlers explicitly",
        );
    };

    let blocked = RobotsTxt::parse(content).blocked_crawlers(ai_crawlers);
    let total = ai_crawlers.len();
    let score = to_score((1.0 - ratio(blocked.len(), total)).max(0.0) * 100.0);

    if blocked.is_empty() {
        return Finding::new(
            CheckName::AiCrawlerAccess,
            score,
            Status::Pass,
            format!("None of {} AI crawlers are blocked", total),
            "Keep AI crawlers allowed",
        );
    }

    let status = if blocked.len() * 2 > total {
        Status::Fail
    } else {
        Status::Partial
    };
    Finding::new(
        CheckName::AiCrawlerAccess,
        score,
        status,
        format!(
            "{} of {} AI crawlers blocked: {}",
            blocked.len(),
            total,
            blocked.join(", ")
        ),
        "Remove Disallow: / for AI crawlers you want citing your content",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AI_CRAWLERS, KEY_AI_CRAWLERS};

    #[test]
    fn test_missing_robots() {
        let coverage = check_robots_txt(None, KEY_AI_CRAWLERS);
        assert_eq!(coverage.score, 0);
        assert_eq!(coverage.status, Status::Fail);

        let access = check_ai_crawler_access(None, AI_CRAWLERS);
        assert_eq!(access.score, 100);
        assert_eq!(access.status, Status::Pass);
    }

    #[test]
    fn test_wildcard_allow_only() {
        let content = "User-agent: *\nAllow: /";
        let coverage = check_robots_txt(Some(content), KEY_AI_CRAWLERS);
        assert_eq!(coverage.score, 30);
        assert_eq!(coverage.status, Status::Partial);
        assert_eq!(check_ai_crawler_access(Some(content), AI_CRAWLERS).score, 100);
    }

    #[test]
    fn test_coverage_formula() {
        let two = "User-agent: GPTBot\nAllow: /\nUser-agent: ClaudeBot\nAllow: /\n";
        let finding = check_robots_txt(Some(two), KEY_AI_CRAWLERS);
        // 30 + 2/5 * 70 = 58
        assert_eq!(finding.score, 58);
        assert_eq!(finding.status, Status::Partial);

        let all = KEY_AI_CRAWLERS
            .iter()
            .map(|c| format!("User-agent: {}\nAllow: /\n", c))
            .collect::<String>();
        let finding = check_robots_txt(Some(&all), KEY_AI_CRAWLERS);
        assert_eq!(finding.score, 100);
        assert_eq!(finding.status, Status::Pass);
    }

    #[test]
    fn test_three_mentions_pass() {
        let three = "User-agent: GPTBot\nUser-agent: ClaudeBot\nUser-agent: CCBot\nAllow: /\n";
        let finding = check_robots_txt(Some(three), KEY_AI_CRAWLERS);
        assert_eq!(finding.score, 72);
        assert_eq!(finding.status, Status::Pass);
    }

    #[test]
    fn test_wildcard_block_fails() {
        let finding = check_ai_crawler_access(Some("User-agent: *\nDisallow: /\n"), AI_CRAWLERS);
        assert_eq!(finding.score, 0);
        assert_eq!(finding.status, Status::Fail);
    }

    #[test]
    fn test_more_than_half_blocked_fails() {
        let group = |count: usize| {
            AI_CRAWLERS[..count]
                .iter()
                .map(|c| format!("User-agent: {}\nDisallow: /\n\n", c))
                .collect::<String>()
        };

        // (1 - 6/13) * 100 = 53.8
        let six = check_ai_crawler_access(Some(&group(6)), AI_CRAWLERS);
        assert_eq!(six.score, 54);
        assert_eq!(six.status, Status::Partial);

        // (1 - 7/13) * 100 = 46.2
        let seven = check_ai_crawler_access(Some(&group(7)), AI_CRAWLERS);
        assert_eq!(seven.score, 46);
        assert_eq!(seven.status, Status::Fail);
    }

    #[test]
    fn test_byte_order_mark_does_not_hide_rules() {
        let content = "\u{feff}User-agent: GPTBot\nDisallow: /\n";
        // 30 + 1/5 * 70 = 44
        assert_eq!(check_robots_txt(Some(content), KEY_AI_CRAWLERS).score, 44);
        let access = check_ai_crawler_access(Some(content), AI_CRAWLERS);
        assert_eq!(access.score, 92);
        assert_eq!(access.status, Status::Partial);
    }

    #[test]
    fn test_single_block_is_partial() {
        let finding = check_ai_crawler_access(Some("User-agent: GPTBot\nDisallow: /\n"), AI_CRAWLERS);
        // (1 - 1/13) * 100 = 92.3
        assert_eq!(finding.score, 92);
        assert_eq!(finding.status, Status::Partial);
        assert!(finding.details.contains("GPTBot"));
    }
}
