//! The OpenID Connect `claims` request parameter
//!
//! A relying party may restrict or require individual claims in the ID Token
//! and UserInfo responses. The parameter is a JSON object with two optional
//! buckets, `id_token` and `userinfo`, each mapping a claim name to either
//! `null` or a [`ClaimRequest`].
//!
//! An absent parameter parses to `None`, which every check treats as "no
//! restriction".

use claimgate_core::{ClaimRequest, ClaimValue, ClaimgateError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Form parameter carrying the claims request
pub const FORM_PARAMETER_CLAIMS: &str = "claims";

/// The subject identifier claim
pub const CLAIM_SUBJECT: &str = "sub";

/// Claim name to request. `None` is the `{"claim": null}` form.
pub type ClaimRequestMap = HashMap<String, Option<ClaimRequest>>;

/// A request for a particular set of claims
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimsRequests {
    /// Claims requested in the ID Token
    #[serde(default, skip_serializing_if = "is_empty_bucket")]
    pub id_token: Option<ClaimRequestMap>,

    /// Claims requested from the UserInfo endpoint
    #[serde(default, skip_serializing_if = "is_empty_bucket")]
    pub userinfo: Option<ClaimRequestMap>,
}

fn is_empty_bucket(bucket: &Option<ClaimRequestMap>) -> bool {
    bucket.as_ref().map_or(true, HashMap::is_empty)
}

/// Result of checking a claims request against the authenticated subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectMatch {
    /// Whether the request is compatible with the subject
    pub matches: bool,

    /// The `sub` value the request asked for, if it asked for a string
    pub requested: Option<String>,
}

impl SubjectMatch {
    fn unrestricted() -> Self {
        Self {
            matches: true,
            requested: None,
        }
    }
}

impl ClaimsRequests {
    /// Parse the raw value of the `claims` parameter.
    ///
    /// Returns `Ok(None)` when the parameter is absent or empty.
    pub fn parse(raw: Option<&str>) -> Result<Option<Self>, ClaimgateError> {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(None),
        };

        // A literal `null` decodes to an empty request
        match serde_json::from_str::<Option<Self>>(raw) {
            Ok(requests) => Ok(Some(requests.unwrap_or_default())),
            Err(source) => {
                tracing::warn!(error = %source, "Rejected malformed claims parameter");
                Err(ClaimgateError::MalformedClaimsRequest { source })
            }
        }
    }

    /// Parse the `claims` parameter out of an `application/x-www-form-urlencoded`
    /// body or query string.
    pub fn from_form(form: &str) -> Result<Option<Self>, ClaimgateError> {
        let raw = url::form_urlencoded::parse(form.as_bytes())
            .find(|(key, _)| key == FORM_PARAMETER_CLAIMS)
            .map(|(_, value)| value.into_owned());

        Self::parse(raw.as_deref())
    }

    /// Claims requested for the ID Token
    pub fn id_token_requests(&self) -> Option<&ClaimRequestMap> {
        self.id_token.as_ref()
    }

    /// Claims requested for the UserInfo response
    pub fn userinfo_requests(&self) -> Option<&ClaimRequestMap> {
        self.userinfo.as_ref()
    }

    /// Check the `sub` constraints against the authenticated subject.
    ///
    /// The UserInfo bucket is checked before the ID Token bucket. A `sub`
    /// value that differs from `subject` (including a non-string value)
    /// vetoes the request.
    pub fn matches_subject(&self, subject: &str) -> SubjectMatch {
        let mut requested = None;

        for bucket in [&self.userinfo, &self.id_token] {
            let Some(entry) = bucket.as_ref().and_then(|b| b.get(CLAIM_SUBJECT)) else {
                continue;
            };

            let value = entry.as_ref().and_then(|r| r.value.as_ref());
            requested = value.and_then(ClaimValue::as_str).map(str::to_string);

            if let Some(value) = value {
                if value.as_str() != Some(subject) {
                    tracing::warn!(
                        subject,
                        requested = ?value,
                        "Claims request asks for a different subject"
                    );
                    return SubjectMatch {
                        matches: false,
                        requested,
                    };
                }
            }
        }

        SubjectMatch {
            matches: true,
            requested,
        }
    }
}

/// ID Token claims of a possibly absent request
pub fn id_token_requests(requests: Option<&ClaimsRequests>) -> Option<&ClaimRequestMap> {
    requests.and_then(ClaimsRequests::id_token_requests)
}

/// UserInfo claims of a possibly absent request
pub fn userinfo_requests(requests: Option<&ClaimsRequests>) -> Option<&ClaimRequestMap> {
    requests.and_then(ClaimsRequests::userinfo_requests)
}

/// Check a possibly absent request against the subject. No request matches
/// every subject.
pub fn matches_subject(requests: Option<&ClaimsRequests>, subject: &str) -> SubjectMatch {
    match requests {
        Some(requests) => requests.matches_subject(subject),
        None => SubjectMatch::unrestricted(),
    }
}
