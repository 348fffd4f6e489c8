//! OIDC scopes and scope matching strategies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Standard OpenID scope
pub const SCOPE_OPENID: &str = "openid";

/// Grants `preferred_username` and `name`
pub const SCOPE_PROFILE: &str = "profile";

/// Grants `email`, `email_alts` and `email_verified`
pub const SCOPE_EMAIL: &str = "email";

/// Grants `groups`
pub const SCOPE_GROUPS: &str = "groups";

/// Decides whether a required scope is satisfied by a set of granted scopes
pub trait ScopeStrategy {
    fn grants(&self, granted: &[String], required: &str) -> bool;
}

impl<F> ScopeStrategy for F
where
    F: Fn(&[String], &str) -> bool,
{
    fn grants(&self, granted: &[String], required: &str) -> bool {
        self(granted, required)
    }
}

/// The required scope must be granted verbatim
pub fn exact(granted: &[String], required: &str) -> bool {
    granted.iter().any(|scope| scope == required)
}

/// A granted scope satisfies any dot-separated descendant of itself, so
/// `photos` satisfies `photos.read`. A granted scope never satisfies a
/// shorter one.
pub fn hierarchic(granted: &[String], required: &str) -> bool {
    granted.iter().any(|scope| {
        if scope == required {
            return true;
        }

        if scope.len() > required.len() {
            return false;
        }

        let parents: Vec<&str> = scope.split('.').collect();
        for (k, part) in required.split('.').enumerate() {
            match parents.get(k) {
                None => return true,
                Some(parent) if *parent != part => return false,
                Some(_) => {}
            }
        }

        false
    })
}

/// Dot-separated segments where `*` in a granted scope matches any non-empty
/// segment. Segment counts must agree.
pub fn wildcard(granted: &[String], required: &str) -> bool {
    let needle: Vec<&str> = required.split('.').collect();

    granted.iter().any(|scope| {
        let pattern: Vec<&str> = scope.split('.').collect();
        if pattern.len() != needle.len() {
            return false;
        }

        pattern
            .iter()
            .zip(&needle)
            .all(|(p, n)| (*p == "*" && !n.is_empty()) || p == n)
    })
}

/// Named scope strategy, selectable from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeStrategyKind {
    #[default]
    Exact,
    Hierarchic,
    Wildcard,
}

impl ScopeStrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeStrategyKind::Exact => "exact",
            ScopeStrategyKind::Hierarchic => "hierarchic",
            ScopeStrategyKind::Wildcard => "wildcard",
        }
    }
}

impl ScopeStrategy for ScopeStrategyKind {
    fn grants(&self, granted: &[String], required: &str) -> bool {
        match self {
            ScopeStrategyKind::Exact => exact(granted, required),
            ScopeStrategyKind::Hierarchic => hierarchic(granted, required),
            ScopeStrategyKind::Wildcard => wildcard(granted, required),
        }
    }
}

impl fmt::Display for ScopeStrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScopeStrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(ScopeStrategyKind::Exact),
            "hierarchic" => Ok(ScopeStrategyKind::Hierarchic),
            "wildcard" => Ok(ScopeStrategyKind::Wildcard),
            other => Err(format!("unknown scope strategy: {}", other)),
        }
    }
}

/// Parse a space-separated scope string
pub fn parse_scopes(scopes: &str) -> Vec<String> {
    scopes.split_whitespace().map(str::to_string).collect()
}
