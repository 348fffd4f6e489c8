//! The catalog of optional identity claims
//!
//! Each entry names a claim, the scope that gates it, and how its live value
//! is read from the authenticated subject. The planner in [`crate::grant`]
//! only walks this table.

use crate::config::ClaimsConfig;
use crate::scopes::{SCOPE_EMAIL, SCOPE_GROUPS, SCOPE_PROFILE};
use crate::user::UserDetailer;
use claimgate_core::ClaimValue;
use std::fmt;

pub const CLAIM_GROUPS: &str = "groups";
pub const CLAIM_PREFERRED_USERNAME: &str = "preferred_username";
pub const CLAIM_FULL_NAME: &str = "name";
pub const CLAIM_PREFERRED_EMAIL: &str = "email";
pub const CLAIM_EMAIL_ALTS: &str = "email_alts";
pub const CLAIM_EMAIL_VERIFIED: &str = "email_verified";

/// Reads a claim's live value. `None` means the subject has no value and the
/// claim is skipped.
pub type ClaimExtractor = fn(&dyn UserDetailer) -> Option<ClaimValue>;

/// A single catalog row
#[derive(Clone)]
pub struct CatalogEntry {
    pub claim: &'static str,
    pub scope: String,
    pub extract: ClaimExtractor,
}

impl CatalogEntry {
    pub fn new(claim: &'static str, scope: impl Into<String>, extract: ClaimExtractor) -> Self {
        Self {
            claim,
            scope: scope.into(),
            extract,
        }
    }
}

impl fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("claim", &self.claim)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

fn groups(user: &dyn UserDetailer) -> Option<ClaimValue> {
    Some(ClaimValue::from(user.groups()))
}

fn preferred_username(user: &dyn UserDetailer) -> Option<ClaimValue> {
    Some(ClaimValue::from(user.username()))
}

fn full_name(user: &dyn UserDetailer) -> Option<ClaimValue> {
    Some(ClaimValue::from(user.display_name()))
}

fn preferred_email(user: &dyn UserDetailer) -> Option<ClaimValue> {
    user.emails().first().cloned().map(ClaimValue::from)
}

fn email_alts(user: &dyn UserDetailer) -> Option<ClaimValue> {
    match user.emails() {
        [_, alts @ ..] if !alts.is_empty() => Some(ClaimValue::from(alts)),
        _ => None,
    }
}

// Every address on file is treated as verified.
fn email_verified(_: &dyn UserDetailer) -> Option<ClaimValue> {
    Some(ClaimValue::Bool(true))
}

/// Ordered table of grantable claims
#[derive(Debug, Clone)]
pub struct ClaimCatalog {
    entries: Vec<CatalogEntry>,
}

impl Default for ClaimCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl ClaimCatalog {
    /// Catalog gated by the standard `profile`, `email` and `groups` scopes
    pub fn standard() -> Self {
        Self::with_scopes(SCOPE_PROFILE, SCOPE_EMAIL, SCOPE_GROUPS)
    }

    /// Catalog gated by the scopes named in the configuration
    pub fn from_config(config: &ClaimsConfig) -> Self {
        Self::with_scopes(&config.profile_scope, &config.email_scope, &config.groups_scope)
    }

    fn with_scopes(profile: &str, email: &str, groups_scope: &str) -> Self {
        Self {
            entries: vec![
                CatalogEntry::new(CLAIM_GROUPS, groups_scope, groups),
                CatalogEntry::new(CLAIM_PREFERRED_USERNAME, profile, preferred_username),
                CatalogEntry::new(CLAIM_FULL_NAME, profile, full_name),
                CatalogEntry::new(CLAIM_PREFERRED_EMAIL, email, preferred_email),
                CatalogEntry::new(CLAIM_EMAIL_ALTS, email, email_alts),
                CatalogEntry::new(CLAIM_EMAIL_VERIFIED, email, email_verified),
            ],
        }
    }

    /// Add or replace an entry
    pub fn with_entry(mut self, entry: CatalogEntry) -> Self {
        match self.entries.iter_mut().find(|e| e.claim == entry.claim) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        self
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, claim: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.claim == claim)
    }

    /// Names of every claim this catalog can grant
    pub fn claims_supported(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.claim).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::UserDetails;

    fn user(emails: &[&str]) -> UserDetails {
        UserDetails {
            username: "jdoe".to_string(),
            display_name: "John Doe".to_string(),
            groups: vec!["admins".to_string()],
            emails: emails.iter().map(|e| e.to_string()).collect(),
        }
    }

    #[test]
    fn test_standard_scope_gates() {
        let catalog = ClaimCatalog::standard();
        assert_eq!(catalog.get(CLAIM_GROUPS).unwrap().scope, "groups");
        assert_eq!(catalog.get(CLAIM_PREFERRED_USERNAME).unwrap().scope, "profile");
        assert_eq!(catalog.get(CLAIM_FULL_NAME).unwrap().scope, "profile");
        assert_eq!(catalog.get(CLAIM_PREFERRED_EMAIL).unwrap().scope, "email");
        assert_eq!(catalog.get(CLAIM_EMAIL_ALTS).unwrap().scope, "email");
        assert_eq!(catalog.get(CLAIM_EMAIL_VERIFIED).unwrap().scope, "email");
        assert!(catalog.get("address").is_none());
        assert_eq!(catalog.claims_supported().len(), 6);
    }

    #[test]
    fn test_from_config() {
        let config = ClaimsConfig {
            groups_scope: "profile.groups".to_string(),
            ..Default::default()
        };
        let catalog = ClaimCatalog::from_config(&config);
        assert_eq!(catalog.get(CLAIM_GROUPS).unwrap().scope, "profile.groups");
    }

    #[test]
    fn test_email_extractors() {
        let catalog = ClaimCatalog::standard();
        let extract = |claim: &str, u: &UserDetails| (catalog.get(claim).unwrap().extract)(u);

        let two = user(&["a@x", "b@x"]);
        assert_eq!(extract(CLAIM_PREFERRED_EMAIL, &two), Some(ClaimValue::from("a@x")));
        assert_eq!(
            extract(CLAIM_EMAIL_ALTS, &two),
            Some(ClaimValue::Strings(vec!["b@x".to_string()]))
        );

        let one = user(&["a@x"]);
        assert!(extract(CLAIM_EMAIL_ALTS, &one).is_none());

        let none = user(&[]);
        assert!(extract(CLAIM_PREFERRED_EMAIL, &none).is_none());
        assert_eq!(extract(CLAIM_EMAIL_VERIFIED, &none), Some(ClaimValue::Bool(true)));
    }

    #[test]
    fn test_with_entry_replaces_existing() {
        fn locale(_: &dyn UserDetailer) -> Option<ClaimValue> {
            Some(ClaimValue::from("en-US"))
        }

        let catalog = ClaimCatalog::standard()
            .with_entry(CatalogEntry::new("locale", "profile", locale))
            .with_entry(CatalogEntry::new(CLAIM_GROUPS, "profile", groups));

        assert_eq!(catalog.entries().len(), 7);
        assert_eq!(catalog.get(CLAIM_GROUPS).unwrap().scope, "profile");
        assert_eq!(catalog.get("locale").unwrap().claim, "locale");
    }
}
