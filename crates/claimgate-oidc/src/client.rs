//! Relying party clients

use serde::{Deserialize, Serialize};

/// The capabilities of a registered client needed for claim granting
pub trait Client {
    /// Client identifier
    fn client_id(&self) -> &str;

    /// Scopes the client is entitled to request
    fn scopes(&self) -> &[String];
}

/// Registered client information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub client_id: String,

    #[serde(default)]
    pub scopes: Vec<String>,
}

impl ClientRecord {
    pub fn new<I, S>(client_id: impl Into<String>, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            client_id: client_id.into(),
            scopes: scopes.into_iter().map(Into::into).collect(),
        }
    }
}

impl Client for ClientRecord {
    fn client_id(&self) -> &str {
        &self.client_id
    }

    fn scopes(&self) -> &[String] {
        &self.scopes
    }
}
