//! Authenticators built from resolved security scheme values
//!
//! An authenticator carries the credential and where it belongs on an
//! outbound request. Attaching it is left to the HTTP client.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::descriptor::{SecurityDefinition, SecurityScheme};

/// Where an API key is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    #[default]
    Header,
    Query,
}

impl fmt::Display for ApiKeyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiKeyLocation::Header => write!(f, "header"),
            ApiKeyLocation::Query => write!(f, "query"),
        }
    }
}

/// Builds an authenticator from a security scheme and its resolved value
pub trait AuthenticatorFactory<S: SecurityScheme + ?Sized> {
    /// The authenticator type produced
    type Authenticator;

    /// Build an authenticator for `scheme` carrying `value`
    fn build(&self, scheme: &S, value: &str) -> Self::Authenticator;
}

/// Authenticator for API key and bearer token schemes
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKeyAuthenticator {
    scheme: String,
    location: ApiKeyLocation,
    key_name: String,
    value: String,
    bearer: bool,
}

impl ApiKeyAuthenticator {
    /// Security scheme name this authenticator was built for
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Where the credential is sent
    pub fn location(&self) -> ApiKeyLocation {
        self.location
    }

    /// Header or query parameter name
    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    /// The raw resolved value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns true if the credential is a bearer token
    pub fn is_bearer(&self) -> bool {
        self.bearer
    }

    /// The value to send, with the `Bearer` prefix for bearer schemes
    pub fn credential(&self) -> String {
        if self.bearer {
            format!("Bearer {}", self.value)
        } else {
            self.value.clone()
        }
    }
}

impl fmt::Debug for ApiKeyAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyAuthenticator")
            .field("scheme", &self.scheme)
            .field("location", &self.location)
            .field("key_name", &self.key_name)
            .field("value", &"[REDACTED]")
            .field("bearer", &self.bearer)
            .finish()
    }
}

/// Default factory for [`SecurityDefinition`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiKeyAuthenticatorFactory;

impl AuthenticatorFactory<SecurityDefinition> for ApiKeyAuthenticatorFactory {
    type Authenticator = ApiKeyAuthenticator;

    fn build(&self, scheme: &SecurityDefinition, value: &str) -> ApiKeyAuthenticator {
        ApiKeyAuthenticator {
            scheme: scheme.name.clone(),
            location: scheme.effective_location(),
            key_name: scheme.key_name().to_string(),
            value: value.to_string(),
            bearer: scheme.is_bearer(),
        }
    }
}
