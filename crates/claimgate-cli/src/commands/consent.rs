//! Consent command - replay a stored consent record

use super::{print_json, read_json};
use anyhow::Result;
use claimgate_oidc::{grant_scope_audience_consent, AuthorizeRequest, ConsentSession};
use std::path::Path;

pub fn run(consent: &Path, request: Option<&Path>) -> Result<()> {
    let consent: ConsentSession = read_json(consent)?;

    let mut request = match request {
        Some(path) => read_json(path)?,
        None => AuthorizeRequest::new(consent.client_id.clone()),
    };

    if !consent.is_authorized() {
        tracing::warn!(
            challenge_id = %consent.challenge_id,
            "Consent session was never authorized"
        );
    }

    grant_scope_audience_consent(Some(&mut request), &consent);

    print_json(&request)
}
