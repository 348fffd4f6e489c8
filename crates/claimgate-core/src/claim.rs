//! Claim requests
//!
//! A [`ClaimRequest`] is one entry of an OpenID Connect `claims` request
//! parameter: an essential flag plus optional `value` and `values`
//! constraints. [`ClaimRequest::matches`] decides whether a live claim value
//! satisfies those constraints.

use crate::value::ClaimValue;
use serde::{Deserialize, Serialize};

/// A request for a particular claim
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimRequest {
    /// Whether the relying party considers this claim essential
    #[serde(default, skip_serializing_if = "is_false")]
    pub essential: bool,

    /// Single value the claim is expected to have
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ClaimValue>,

    /// Set of acceptable values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<ClaimValue>>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl ClaimRequest {
    /// Create an unconstrained claim request
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the claim as essential
    pub fn essential(mut self) -> Self {
        self.essential = true;
        self
    }

    /// Set the single value constraint
    pub fn with_value(mut self, value: impl Into<ClaimValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the value set constraint
    pub fn with_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ClaimValue>,
    {
        self.values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Whether both `value` and `values` are present
    pub fn has_value_and_values(&self) -> bool {
        self.value.is_some() && self.values.is_some()
    }

    /// Test whether a live claim value satisfies this request.
    ///
    /// The `value` and `values` constraints are checked independently and
    /// both must pass. Candidates that are neither numeric, strings, nor
    /// string collections are never filtered.
    pub fn matches(&self, candidate: &ClaimValue) -> bool {
        match candidate {
            ClaimValue::Integer(i) => {
                self.check_value(|v| integral_eq(*i, v))
                    && self.check_values(|v| integral_eq(*i, v))
            }
            ClaimValue::Number(f) => {
                self.check_value(|v| float_eq(*f, v)) && self.check_values(|v| float_eq(*f, v))
            }
            ClaimValue::String(s) => {
                self.check_value(|v| v.as_str() == Some(s.as_str()))
                    && self.check_values(|v| v.as_str() == Some(s.as_str()))
            }
            ClaimValue::Strings(list) => {
                // The `value` side compares the bracketed rendering of the
                // whole candidate list against its members, not the
                // requested scalar.
                let value_ok = self.value.is_none() || list.contains(&bracketed(list));

                value_ok
                    && self.check_values(|v| {
                        v.as_str()
                            .is_some_and(|wanted| list.iter().any(|have| have == wanted))
                    })
            }
            ClaimValue::Bool(_) | ClaimValue::Other(_) => true,
        }
    }

    fn check_value(&self, eq: impl Fn(&ClaimValue) -> bool) -> bool {
        self.value.as_ref().map_or(true, eq)
    }

    fn check_values(&self, eq: impl Fn(&ClaimValue) -> bool) -> bool {
        self.values
            .as_ref()
            .map_or(true, |values| values.iter().any(eq))
    }
}

/// Test an optional request against a candidate. An absent request never
/// matches.
pub fn request_matches(request: Option<&ClaimRequest>, candidate: &ClaimValue) -> bool {
    request.is_some_and(|r| r.matches(candidate))
}

/// Integral candidates are compared both as floating point and in their
/// native form, since JSON constraints always decode as floating point.
#[allow(clippy::float_cmp)]
fn integral_eq(candidate: i64, constraint: &ClaimValue) -> bool {
    match constraint {
        ClaimValue::Number(f) => candidate as f64 == *f,
        ClaimValue::Integer(i) => candidate == *i,
        _ => false,
    }
}

#[allow(clippy::float_cmp)]
fn float_eq(candidate: f64, constraint: &ClaimValue) -> bool {
    matches!(constraint, ClaimValue::Number(f) if candidate == *f)
}

fn bracketed(list: &[String]) -> String {
    format!("[{}]", list.join(" "))
}
