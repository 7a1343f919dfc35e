//! provconf-core: Typed provider configuration over a generic store
//!
//! This crate resolves the security schemes and header parameters an API
//! description requires against a dynamically-typed configuration store,
//! failing fast when a value is missing, and exposes the result as a
//! typed object API clients consult at request time.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use provconf_core::{
//!     ApiKeyLocation, HeaderParam, MemoryStore, ProviderConfiguration, SecurityDefinition,
//! };
//!
//! let store = MemoryStore::from_yaml(r#"
//! apikey_auth: secret123
//! x_request_source: terraform
//! region: us-east-1
//! "#).unwrap();
//!
//! let headers = vec![HeaderParam::new("X-Request-Source")];
//! let security = vec![SecurityDefinition::api_key(
//!     "apikey_auth",
//!     ApiKeyLocation::Header,
//!     "X-API-Key",
//! )];
//!
//! let config = ProviderConfiguration::new(&headers, Some(&security), Arc::new(store)).unwrap();
//!
//! let auth = config.authenticator_for(&security[0]).unwrap();
//! assert_eq!(auth.key_name(), "X-API-Key");
//! assert_eq!(auth.credential(), "secret123");
//! assert_eq!(config.header_value_for(&headers[0]), Some("terraform"));
//! assert_eq!(config.region().unwrap(), "us-east-1");
//! ```

pub mod authenticator;
pub mod descriptor;
pub mod error;
pub mod manifest;
pub mod naming;
pub mod store;
pub mod value;

mod provider;

pub use authenticator::{
    ApiKeyAuthenticator, ApiKeyAuthenticatorFactory, ApiKeyLocation, AuthenticatorFactory,
};
pub use descriptor::{
    HeaderParam, HeaderParameter, HeaderParameters, SecurityDefinition, SecurityDefinitions,
    SecurityScheme, SecuritySchemeKind,
};
pub use error::{Error, ErrorKind, Requirement, Result};
pub use manifest::ProviderManifest;
pub use provider::ProviderConfiguration;
pub use store::{ConfigStore, EnvStore, LayeredStore, MemoryStore, REGION_KEY};
pub use value::Value;
