//! Claimgate Core
//!
//! Core domain types for the Claimgate claims engine.
//! This crate defines the claim values and claim requests shared by the
//! OpenID Connect layer and the command-line tooling.

pub mod claim;
pub mod error;
pub mod value;

pub use claim::ClaimRequest;
pub use error::ClaimgateError;
pub use value::ClaimValue;
