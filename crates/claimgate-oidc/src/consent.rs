//! Previously granted consent
//!
//! When a subject has already consented to a client, the stored
//! [`ConsentSession`] is replayed onto the in-flight authorization request so
//! the same scopes and audience are granted without prompting again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The mutating surface of an in-flight authorization request
pub trait AuthorizeRequester {
    fn grant_scope(&mut self, scope: &str);

    fn grant_audience(&mut self, audience: &str);
}

/// A persisted consent decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentSession {
    pub challenge_id: Uuid,

    pub client_id: String,

    /// Opaque subject identifier, unset until the user is known
    #[serde(default)]
    pub subject: Option<Uuid>,

    #[serde(default)]
    pub authorized: bool,

    #[serde(default)]
    pub granted: bool,

    pub requested_at: DateTime<Utc>,

    #[serde(default)]
    pub responded_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub requested_scopes: Vec<String>,

    #[serde(default)]
    pub granted_scopes: Vec<String>,

    #[serde(default)]
    pub requested_audience: Vec<String>,

    #[serde(default)]
    pub granted_audience: Vec<String>,
}

impl ConsentSession {
    /// Start a new consent session for a client
    pub fn new(client_id: impl Into<String>, subject: Option<Uuid>) -> Self {
        Self {
            challenge_id: Uuid::new_v4(),
            client_id: client_id.into(),
            subject,
            authorized: false,
            granted: false,
            requested_at: Utc::now(),
            responded_at: None,
            expires_at: None,
            requested_scopes: Vec::new(),
            granted_scopes: Vec::new(),
            requested_audience: Vec::new(),
            granted_audience: Vec::new(),
        }
    }

    /// Record the user's approval of the given scopes and audience
    pub fn authorize<S, A>(&mut self, scopes: S, audience: A)
    where
        S: IntoIterator,
        S::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        self.authorized = true;
        self.responded_at = Some(Utc::now());
        self.granted_scopes = scopes.into_iter().map(Into::into).collect();
        self.granted_audience = audience.into_iter().map(Into::into).collect();
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    /// A session can be granted once, and only after the subject is known
    pub fn can_grant(&self) -> bool {
        self.subject.is_some() && !self.granted
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }

    /// Whether the granted scopes and audience equal the given sets,
    /// ignoring order
    pub fn has_exact_grants(&self, scopes: &[String], audience: &[String]) -> bool {
        same_members(&self.granted_scopes, scopes) && same_members(&self.granted_audience, audience)
    }
}

fn same_members(a: &[String], b: &[String]) -> bool {
    a.len() == b.len() && a.iter().all(|x| b.contains(x)) && b.iter().all(|x| a.contains(x))
}

/// Grant every scope and audience value that has received consent, in
/// stored order. Does nothing when there is no request.
pub fn grant_scope_audience_consent<R>(requester: Option<&mut R>, consent: &ConsentSession)
where
    R: AuthorizeRequester + ?Sized,
{
    let Some(requester) = requester else {
        return;
    };

    for scope in &consent.granted_scopes {
        tracing::debug!(scope = %scope, client_id = %consent.client_id, "Replaying consented scope");
        requester.grant_scope(scope);
    }

    for audience in &consent.granted_audience {
        tracing::debug!(audience = %audience, client_id = %consent.client_id, "Replaying consented audience");
        requester.grant_audience(audience);
    }
}

/// In-memory authorization request state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizeRequest {
    pub client_id: String,

    #[serde(default)]
    pub requested_scopes: Vec<String>,

    #[serde(default)]
    pub requested_audience: Vec<String>,

    #[serde(default)]
    pub granted_scopes: Vec<String>,

    #[serde(default)]
    pub granted_audience: Vec<String>,
}

impl AuthorizeRequest {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            ..Default::default()
        }
    }
}

impl AuthorizeRequester for AuthorizeRequest {
    fn grant_scope(&mut self, scope: &str) {
        if !self.granted_scopes.iter().any(|s| s == scope) {
            self.granted_scopes.push(scope.to_string());
        }
    }

    fn grant_audience(&mut self, audience: &str) {
        if !self.granted_audience.iter().any(|a| a == audience) {
            self.granted_audience.push(audience.to_string());
        }
    }
}
