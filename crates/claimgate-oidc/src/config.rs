//! Claim granting configuration

use crate::scopes::{ScopeStrategyKind, SCOPE_EMAIL, SCOPE_GROUPS, SCOPE_PROFILE};
use claimgate_core::ClaimgateError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of environment variables that override configuration values
pub const ENV_PREFIX: &str = "CLAIMGATE";

/// Claim granting configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimsConfig {
    /// How granted scopes are matched against the scope a claim requires
    pub scope_strategy: ScopeStrategyKind,

    /// Scope gating `preferred_username` and `name`
    pub profile_scope: String,

    /// Scope gating the email claims
    pub email_scope: String,

    /// Scope gating `groups`
    pub groups_scope: String,
}

impl Default for ClaimsConfig {
    fn default() -> Self {
        Self {
            scope_strategy: ScopeStrategyKind::default(),
            profile_scope: SCOPE_PROFILE.to_string(),
            email_scope: SCOPE_EMAIL.to_string(),
            groups_scope: SCOPE_GROUPS.to_string(),
        }
    }
}

impl ClaimsConfig {
    /// Load configuration from defaults, an optional file, and
    /// `CLAIMGATE_*` environment variables, in increasing precedence.
    pub fn load(path: Option<&Path>) -> Result<Self, ClaimgateError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        Self::build(builder.add_source(config::Environment::with_prefix(ENV_PREFIX)))
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ClaimgateError> {
        builder
            .build()
            .and_then(|settings| settings.try_deserialize::<Self>())
            .map_err(|e| ClaimgateError::Config(e.to_string()))
    }

    /// Use a different scope strategy
    pub fn with_scope_strategy(mut self, strategy: ScopeStrategyKind) -> Self {
        self.scope_strategy = strategy;
        self
    }
}
