//! CLI command implementations

pub mod consent;
pub mod grant;
pub mod status;
pub mod subject;

use anyhow::{bail, Context, Result};
use claimgate_core::ClaimgateError;
use claimgate_oidc::ClaimsRequests;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Claims request bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Bucket {
    /// Claims returned from the UserInfo endpoint
    Userinfo,
    /// Claims embedded in the ID Token
    IdToken,
}

/// Read and decode a JSON fixture
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// Pretty-print a JSON value to stdout
pub fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse the claims parameter from either its raw value or a form body.
///
/// A malformed parameter prints the protocol error body and fails.
pub fn load_requests(claims: Option<String>, form: Option<String>) -> Result<Option<ClaimsRequests>> {
    let parsed = match form {
        Some(form) => ClaimsRequests::from_form(&form),
        None => ClaimsRequests::parse(claims.as_deref()),
    };

    match parsed {
        Ok(requests) => Ok(requests),
        Err(err @ ClaimgateError::MalformedClaimsRequest { .. }) => {
            print_json(&err.to_protocol_json())?;
            bail!(err)
        }
        Err(err) => Err(err.into()),
    }
}
