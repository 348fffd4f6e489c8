//! Subject command - check a claims request against the authenticated subject

use super::{load_requests, print_json};
use anyhow::Result;
use claimgate_oidc::request::matches_subject;

pub fn run(claims: Option<String>, form: Option<String>, subject: &str) -> Result<()> {
    let requests = load_requests(claims, form)?;
    let result = matches_subject(requests.as_ref(), subject);

    print_json(&serde_json::json!({
        "subject": subject,
        "matches": result.matches,
        "requested": result.requested,
    }))
}
