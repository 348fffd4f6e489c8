//! Authenticated subject details

use serde::{Deserialize, Serialize};

/// Read access to the identity attributes of the authenticated subject
pub trait UserDetailer {
    fn groups(&self) -> &[String];

    fn username(&self) -> &str;

    fn display_name(&self) -> &str;

    /// Email addresses on file. The first one is the primary address.
    fn emails(&self) -> &[String];
}

/// Identity attributes of a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    pub username: String,

    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub groups: Vec<String>,

    #[serde(default)]
    pub emails: Vec<String>,
}

impl UserDetailer for UserDetails {
    fn groups(&self) -> &[String] {
        &self.groups
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn emails(&self) -> &[String] {
        &self.emails
    }
}
