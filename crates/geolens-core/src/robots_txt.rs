//! Robots.txt directive scanner
//!
//! Scans robots.txt line by line and attributes every rule to the group of
//! user agents it belongs to. The scanner is a small state machine:
//!
//! ```text
//! state       | blank/comment | User-agent       | other line
//! ------------+---------------+------------------+-----------
//! NoAgent     | NoAgent       | CollectingAgents | NoAgent
//! Collecting  | Collecting    | CollectingAgents | InBlock
//! InBlock     | InBlock       | CollectingAgents | InBlock
//! ```
//!
//! Blank and comment lines never change state. Entering `Collecting` from
//! any other state starts a fresh agent set.
//!
//! Blocking is evaluated conservatively: `User-agent: *` with `Disallow: /`
//! blocks every crawler that is not given its own `Allow: /` group.

/// Scanner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No `User-agent` line seen yet, rules are orphaned
    NoAgent,
    /// Reading consecutive `User-agent` lines
    CollectingAgents,
    /// Reading the rules of the current agent group
    InBlock,
}

/// Classification of a line for the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Blank or comment
    Ignorable,
    /// `User-agent: ...`
    Agent,
    /// Any other line, parseable or not
    Directive,
}

impl ScanState {
    /// Transition table of the scanner
    pub fn next(self, kind: LineKind) -> ScanState {
        match (self, kind) {
            (state, LineKind::Ignorable) => state,
            (_, LineKind::Agent) => ScanState::CollectingAgents,
            (ScanState::NoAgent, LineKind::Directive) => ScanState::NoAgent,
            (ScanState::CollectingAgents | ScanState::InBlock, LineKind::Directive) => {
                ScanState::InBlock
            }
        }
    }
}

/// Rule directives the audit cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Allow,
    Disallow,
    Sitemap,
    Other,
}

/// A rule together with the agent group it applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedRule<'a> {
    pub agents: Vec<&'a str>,
    pub directive: Directive,
    pub value: &'a str,
}

impl ScopedRule<'_> {
    fn is_full_path(&self, directive: Directive) -> bool {
        self.directive == directive && self.value == "/"
    }

    fn applies_to(&self, crawler: &str) -> bool {
        self.agents.iter().any(|agent| agent_matches(agent, crawler))
    }

    fn applies_to_wildcard(&self) -> bool {
        self.agents.iter().any(|agent| *agent == "*")
    }
}

/// Parsed robots.txt ready for crawler queries
#[derive(Debug, Clone, Default)]
pub struct RobotsTxt<'a> {
    /// Every user agent named anywhere in the file
    pub agents: Vec<&'a str>,

    /// Rules attributed to their agent groups, in file order
    pub rules: Vec<ScopedRule<'a>>,

    /// `Sitemap:` URLs, which are global rather than group scoped
    pub sitemaps: Vec<&'a str>,
}

impl<'a> RobotsTxt<'a> {
    /// Scan robots.txt content. Never fails; unrecognized lines are skipped.
    pub fn parse(content: &'a str) -> Self {
        let mut parsed = RobotsTxt::default();
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut state = ScanState::NoAgent;
        let mut current_agents: Vec<&'a str> = Vec::new();

        for raw_line in content.lines() {
            let line = strip_comment(raw_line).trim();
            let (kind, directive, value) = classify(line);

            let next = state.next(kind);
            if kind == LineKind::Agent {
                if state != ScanState::CollectingAgents {
                    current_agents.clear();
                }
                current_agents.push(value);
                parsed.agents.push(value);
            } else if kind == LineKind::Directive {
                if directive == Directive::Sitemap && !value.is_empty() {
                    parsed.sitemaps.push(value);
                }
                if next == ScanState::InBlock {
                    parsed.rules.push(ScopedRule {
                        agents: current_agents.clone(),
                        directive,
                        value,
                    });
                }
            }
            state = next;
        }

        parsed
    }

    /// Whether `crawler` is named in any `User-agent` line
    pub fn mentions(&self, crawler: &str) -> bool {
        self.agents.iter().any(|agent| agent_matches(agent, crawler))
    }

    /// Whether `crawler` has its own group granting `Allow: /`
    pub fn has_explicit_allow(&self, crawler: &str) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.applies_to(crawler) && rule.is_full_path(Directive::Allow))
    }

    /// Reference crawlers blocked from the whole site, in reference order
    pub fn blocked_crawlers<'r, S: AsRef<str>>(&self, reference: &'r [S]) -> Vec<&'r str> {
        let mut blocked = vec![false; reference.len()];

        for rule in self
            .rules
            .iter()
            .filter(|rule| rule.is_full_path(Directive::Disallow))
        {
            if rule.applies_to_wildcard() {
                for (index, crawler) in reference.iter().enumerate() {
                    if !self.has_explicit_allow(crawler.as_ref()) {
                        blocked[index] = true;
                    }
                }
            }
            for (index, crawler) in reference.iter().enumerate() {
                if rule.applies_to(crawler.as_ref()) {
                    blocked[index] = true;
                }
            }
        }

        reference
            .iter()
            .zip(blocked)
            .filter(|(_, is_blocked)| *is_blocked)
            .map(|(crawler, _)| crawler.as_ref())
            .collect()
    }
}

/// Compare a `User-agent` value with a crawler on its product token, so
/// `GPTBot/1.0` names `GPTBot`
fn agent_matches(agent: &str, crawler: &str) -> bool {
    let token = agent.split('/').next().unwrap_or(agent).trim();
    token.eq_ignore_ascii_case(crawler.trim())
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn classify(line: &str) -> (LineKind, Directive, &str) {
    if line.is_empty() {
        return (LineKind::Ignorable, Directive::Other, "");
    }

    let Some((key, value)) = line.split_once(':') else {
        return (LineKind::Directive, Directive::Other, "");
    };
    let value = value.trim();

    match key.trim().to_ascii_lowercase().as_str() {
        "user-agent" => (LineKind::Agent, Directive::Other, value),
        "allow" => (LineKind::Directive, Directive::Allow, value),
        "disallow" => (LineKind::Directive, Directive::Disallow, value),
        "sitemap" => (LineKind::Directive, Directive::Sitemap, value),
        _ => (LineKind::Directive, Directive::Other, value),
    }
}
