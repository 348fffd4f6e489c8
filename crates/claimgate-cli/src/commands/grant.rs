//! Grant command - evaluate a claims request for a user

use super::{load_requests, print_json, read_json, Bucket};
use anyhow::{bail, Result};
use claimgate_oidc::{
    request::matches_subject, scopes::parse_scopes, ClaimCatalog, ClaimsConfig, ClientRecord,
    ExtraClaims, UserDetails,
};
use std::path::Path;

pub struct GrantArgs<'a> {
    pub config: &'a ClaimsConfig,
    pub claims: Option<String>,
    pub form: Option<String>,
    pub user: &'a Path,
    pub scopes: &'a str,
    pub client_id: String,
    pub bucket: Bucket,
    pub subject: Option<&'a str>,
}

pub fn run(args: GrantArgs<'_>) -> Result<()> {
    let requests = load_requests(args.claims, args.form)?;
    let user: UserDetails = read_json(args.user)?;

    if let Some(subject) = args.subject {
        let result = matches_subject(requests.as_ref(), subject);
        if !result.matches {
            bail!(
                "claims request asks for subject {:?} but {:?} is authenticated",
                result.requested.unwrap_or_default(),
                subject
            );
        }
    }

    let client = ClientRecord::new(args.client_id, parse_scopes(args.scopes));
    let bucket = requests.as_ref().and_then(|r| match args.bucket {
        Bucket::Userinfo => r.userinfo_requests(),
        Bucket::IdToken => r.id_token_requests(),
    });

    tracing::debug!(
        client_id = %client.client_id,
        strategy = %args.config.scope_strategy,
        requested = bucket.map_or(0, |b| b.len()),
        "Evaluating claims request"
    );

    let mut extra = ExtraClaims::new();
    ClaimCatalog::from_config(args.config).grant(
        &args.config.scope_strategy,
        &client,
        bucket,
        &user,
        &mut extra,
    );

    print_json(&extra)
}
