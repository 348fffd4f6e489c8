//! Claimgate OIDC
//!
//! Decides which identity claims an OpenID Connect client may receive in an
//! ID Token or UserInfo response, honoring both the granted scopes and any
//! `claims` request parameter supplied by the relying party.

pub mod catalog;
pub mod client;
pub mod config;
pub mod consent;
pub mod grant;
pub mod request;
pub mod scopes;
pub mod user;

pub use catalog::{CatalogEntry, ClaimCatalog};
pub use client::{Client, ClientRecord};
pub use config::ClaimsConfig;
pub use consent::{grant_scope_audience_consent, AuthorizeRequest, AuthorizeRequester, ConsentSession};
pub use grant::{grant_claims, ExtraClaims};
pub use request::{ClaimRequestMap, ClaimsRequests, SubjectMatch};
pub use scopes::{ScopeStrategy, ScopeStrategyKind};
pub use user::{UserDetailer, UserDetails};
