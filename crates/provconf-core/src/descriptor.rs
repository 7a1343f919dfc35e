//! Security scheme and header parameter descriptors
//!
//! Descriptors identify a requirement declared by an API description.
//! The only thing the provider configuration needs from them is the
//! canonical name used to look the value up in the configuration store.

use serde::{Deserialize, Serialize};

use crate::authenticator::ApiKeyLocation;
use crate::naming::canonical_name;

/// Header used for bearer tokens
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// A named security requirement
pub trait SecurityScheme {
    /// Key under which the scheme's value is looked up in the store
    fn canonical_configuration_name(&self) -> String;
}

/// A named header requirement
pub trait HeaderParameter {
    /// Key under which the header's value is looked up in the store
    fn canonical_configuration_name(&self) -> String;
}

/// Security scheme types understood by the API-key authenticator model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SecuritySchemeKind {
    /// API key sent in a header or query parameter
    ApiKey,
    /// Token sent as `Authorization: Bearer <token>`
    Bearer,
}

/// A security scheme declared by an API description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityDefinition {
    /// Scheme name as written in the API description
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SecuritySchemeKind,
    /// Where an API key is sent (ignored for bearer schemes)
    #[serde(rename = "in", default)]
    pub location: ApiKeyLocation,
    /// Header or query parameter name carrying the key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Explicit configuration name, bypassing canonical conversion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_name: Option<String>,
}

impl SecurityDefinition {
    /// Create an API key scheme
    pub fn api_key(
        name: impl Into<String>,
        location: ApiKeyLocation,
        key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: SecuritySchemeKind::ApiKey,
            location,
            key: Some(key.into()),
            configuration_name: None,
        }
    }

    /// Create a bearer token scheme
    pub fn bearer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SecuritySchemeKind::Bearer,
            location: ApiKeyLocation::Header,
            key: None,
            configuration_name: None,
        }
    }

    /// Override the configuration name
    pub fn with_configuration_name(mut self, name: impl Into<String>) -> Self {
        self.configuration_name = Some(name.into());
        self
    }

    /// Where the credential goes on an outbound request
    pub fn effective_location(&self) -> ApiKeyLocation {
        match self.kind {
            SecuritySchemeKind::ApiKey => self.location,
            SecuritySchemeKind::Bearer => ApiKeyLocation::Header,
        }
    }

    /// Header or query parameter name carrying the credential
    ///
    /// Bearer schemes always use `Authorization`; API keys without an
    /// explicit key fall back to the scheme name.
    pub fn key_name(&self) -> &str {
        match self.kind {
            SecuritySchemeKind::Bearer => AUTHORIZATION_HEADER,
            SecuritySchemeKind::ApiKey => self.key.as_deref().unwrap_or(&self.name),
        }
    }

    /// Returns true for bearer schemes
    pub fn is_bearer(&self) -> bool {
        self.kind == SecuritySchemeKind::Bearer
    }
}

impl SecurityScheme for SecurityDefinition {
    fn canonical_configuration_name(&self) -> String {
        match &self.configuration_name {
            Some(name) => name.clone(),
            None => canonical_name(&self.name),
        }
    }
}

/// A header parameter declared by an API description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderParam {
    /// Header name as sent on the wire
    pub name: String,
    /// Explicit configuration name, bypassing canonical conversion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_name: Option<String>,
}

impl HeaderParam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            configuration_name: None,
        }
    }

    /// Override the configuration name
    pub fn with_configuration_name(mut self, name: impl Into<String>) -> Self {
        self.configuration_name = Some(name.into());
        self
    }
}

impl HeaderParameter for HeaderParam {
    fn canonical_configuration_name(&self) -> String {
        match &self.configuration_name {
            Some(name) => name.clone(),
            None => canonical_name(&self.name),
        }
    }
}

/// Security schemes declared by an API description
pub type SecurityDefinitions = Vec<SecurityDefinition>;

/// Header parameters declared by an API description
pub type HeaderParameters = Vec<HeaderParam>;
