//! Scope-gated claim granting

use crate::catalog::ClaimCatalog;
use crate::client::Client;
use crate::request::ClaimRequestMap;
use crate::scopes::ScopeStrategy;
use crate::user::UserDetailer;
use claimgate_core::{ClaimRequest, ClaimValue};

/// Extra claims destined for an ID Token or UserInfo response
pub type ExtraClaims = serde_json::Map<String, serde_json::Value>;

impl ClaimCatalog {
    /// Grant every requested catalog claim the client is authorized to
    /// receive, writing them into `extra`.
    ///
    /// Claims not named in `requests` are never granted and names outside
    /// the catalog are ignored. Does nothing when `requests` is `None`.
    pub fn grant(
        &self,
        strategy: &dyn ScopeStrategy,
        client: &dyn Client,
        requests: Option<&ClaimRequestMap>,
        detailer: &dyn UserDetailer,
        extra: &mut ExtraClaims,
    ) {
        let Some(requests) = requests else {
            return;
        };

        let scopes = client.scopes();

        for entry in self.entries() {
            let Some(request) = requests.get(entry.claim) else {
                continue;
            };

            let Some(value) = (entry.extract)(detailer) else {
                continue;
            };

            grant_scope_claim(
                strategy,
                scopes,
                &entry.scope,
                entry.claim,
                value,
                request.as_ref(),
                extra,
            );
        }
    }
}

/// Grant requested claims using the standard catalog
pub fn grant_claims(
    strategy: &dyn ScopeStrategy,
    client: &dyn Client,
    requests: Option<&ClaimRequestMap>,
    detailer: &dyn UserDetailer,
    extra: &mut ExtraClaims,
) {
    ClaimCatalog::standard().grant(strategy, client, requests, detailer, extra);
}

/// Emit one claim if its scope is granted.
///
/// The live value is only filtered through the request when the request
/// carries both `value` and `values`; otherwise it is emitted as is.
fn grant_scope_claim(
    strategy: &dyn ScopeStrategy,
    scopes: &[String],
    scope: &str,
    claim: &str,
    value: ClaimValue,
    request: Option<&ClaimRequest>,
    extra: &mut ExtraClaims,
) {
    if !strategy.grants(scopes, scope) {
        tracing::debug!(claim, scope, "Withholding claim, scope not granted");
        return;
    }

    if let Some(request) = request {
        if request.has_value_and_values() && !request.matches(&value) {
            tracing::debug!(claim, "Withholding claim, value does not match request");
            return;
        }
    }

    tracing::debug!(claim, "Granting claim");
    extra.insert(claim.to_string(), value.into());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientRecord;
    use crate::scopes::{exact, hierarchic};
    use crate::user::UserDetails;
    use serde_json::json;

    fn user() -> UserDetails {
        UserDetails {
            username: "jdoe".to_string(),
            display_name: "John Doe".to_string(),
            groups: vec!["admins".to_string(), "dev".to_string()],
            emails: vec!["a@x".to_string(), "b@x".to_string()],
        }
    }

    fn requests(value: serde_json::Value) -> ClaimRequestMap {
        serde_json::from_value(value).unwrap()
    }

    fn grant(scopes: &[&str], requested: serde_json::Value) -> ExtraClaims {
        let client = ClientRecord::new("app", scopes.iter().copied());
        let requested = requests(requested);
        let mut extra = ExtraClaims::new();
        grant_claims(&exact, &client, Some(&requested), &user(), &mut extra);
        extra
    }

    #[test]
    fn test_no_requests_is_noop() {
        let client = ClientRecord::new("app", ["profile"]);
        let mut extra = ExtraClaims::new();
        grant_claims(&exact, &client, None, &user(), &mut extra);
        assert!(extra.is_empty());
    }

    #[test]
    fn test_profile_scope_only() {
        let extra = grant(
            &["profile"],
            json!({"groups": null, "name": null, "email": null, "email_alts": null}),
        );

        assert_eq!(extra.len(), 1);
        assert_eq!(extra["name"], json!("John Doe"));
    }

    #[test]
    fn test_email_scope() {
        let extra = grant(
            &["email"],
            json!({
                "email": null,
                "email_alts": null,
                "email_verified": {"value": false, "values": [false]}
            }),
        );

        assert_eq!(extra["email"], json!("a@x"));
        assert_eq!(extra["email_alts"], json!(["b@x"]));
        assert_eq!(extra["email_verified"], json!(true));
    }

    #[test]
    fn test_unrequested_claims_are_not_granted() {
        let extra = grant(&["profile", "email", "groups"], json!({"preferred_username": null}));
        assert_eq!(extra.len(), 1);
        assert_eq!(extra["preferred_username"], json!("jdoe"));
    }

    #[test]
    fn test_unknown_claims_are_ignored() {
        let extra = grant(&["profile"], json!({"address": null, "phone_number": {"essential": true}}));
        assert!(extra.is_empty());
    }

    #[test]
    fn test_single_value_constraint_does_not_filter() {
        // Documented behavior: filtering needs both `value` and `values`.
        let extra = grant(&["profile"], json!({"name": {"value": "Someone Else"}}));
        assert_eq!(extra["name"], json!("John Doe"));

        let extra = grant(&["profile"], json!({"name": {"values": ["Someone Else"]}}));
        assert_eq!(extra["name"], json!("John Doe"));
    }

    #[test]
    fn test_value_and_values_filter() {
        let extra = grant(
            &["profile"],
            json!({"preferred_username": {"value": "other", "values": ["other", "jdoe"]}}),
        );
        assert!(extra.get("preferred_username").is_none());

        let extra = grant(
            &["profile"],
            json!({"preferred_username": {"value": "jdoe", "values": ["jdoe"]}}),
        );
        assert_eq!(extra["preferred_username"], json!("jdoe"));
    }

    #[test]
    fn test_single_email_has_no_alts() {
        let client = ClientRecord::new("app", ["email"]);
        let detailer = UserDetails {
            emails: vec!["a@x".to_string()],
            ..user()
        };
        let requested = requests(json!({"email": null, "email_alts": null}));
        let mut extra = ExtraClaims::new();

        grant_claims(&exact, &client, Some(&requested), &detailer, &mut extra);

        assert_eq!(extra["email"], json!("a@x"));
        assert!(extra.get("email_alts").is_none());
    }

    #[test]
    fn test_hierarchic_strategy_gate() {
        let client = ClientRecord::new("app", ["email"]);
        let catalog = ClaimCatalog::standard().with_entry(crate::catalog::CatalogEntry::new(
            "email",
            "email.primary",
            |u: &dyn UserDetailer| u.emails().first().cloned().map(ClaimValue::from),
        ));
        let requested = requests(json!({"email": null}));

        let mut extra = ExtraClaims::new();
        catalog.grant(&exact, &client, Some(&requested), &user(), &mut extra);
        assert!(extra.is_empty());

        catalog.grant(&hierarchic, &client, Some(&requested), &user(), &mut extra);
        assert_eq!(extra["email"], json!("a@x"));
    }
}
