//! Provider configuration
//!
//! `ProviderConfiguration` resolves the declared security schemes and
//! header parameters against a configuration store once, at construction,
//! and then answers lookups from API-calling code.
//!
//! Construction is all-or-nothing: either every declared requirement has
//! a value, or an error naming the first missing one is returned and no
//! configuration escapes. The resolved maps are never mutated afterwards,
//! so a configuration can be shared across threads behind an `Arc`
//! without further synchronization. Only the region is read from the
//! live store on each call, under a lock.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::authenticator::{ApiKeyAuthenticator, ApiKeyAuthenticatorFactory, AuthenticatorFactory};
use crate::descriptor::{HeaderParameter, SecurityDefinition, SecurityScheme};
use crate::error::{Error, Result};
use crate::store::{ConfigStore, REGION_KEY};
use crate::value::Value;

/// Resolved provider configuration
pub struct ProviderConfiguration<A = ApiKeyAuthenticator> {
    /// Canonical header name -> resolved value
    headers: HashMap<String, String>,
    /// Canonical security scheme name -> resolved authenticator
    security_definitions: HashMap<String, A>,
    /// Live store, kept for values not resolved at construction
    store: Arc<dyn ConfigStore>,
    /// Guards region queries against the live store
    region_lock: Mutex<()>,
}

impl ProviderConfiguration<ApiKeyAuthenticator> {
    /// Resolve API-key security definitions and headers against `store`
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use provconf_core::{HeaderParam, MemoryStore, ProviderConfiguration};
    ///
    /// let store: MemoryStore = [("x_api_key", "secret123")].into_iter().collect();
    /// let headers = vec![HeaderParam::new("X-Api-Key")];
    ///
    /// let config = ProviderConfiguration::new(&headers, None, Arc::new(store)).unwrap();
    /// assert_eq!(config.header_value_for(&headers[0]), Some("secret123"));
    /// ```
    pub fn new<H: HeaderParameter>(
        headers: &[H],
        security_definitions: Option<&[SecurityDefinition]>,
        store: Arc<dyn ConfigStore>,
    ) -> Result<Self> {
        Self::build(
            headers,
            security_definitions,
            store,
            &ApiKeyAuthenticatorFactory,
        )
    }
}

impl<A> ProviderConfiguration<A> {
    /// Resolve declared requirements against `store`, building
    /// authenticators with `factory`
    ///
    /// Security definitions are resolved before headers; the first
    /// requirement without a value aborts construction.
    pub fn build<H, S, F>(
        headers: &[H],
        security_definitions: Option<&[S]>,
        store: Arc<dyn ConfigStore>,
        factory: &F,
    ) -> Result<Self>
    where
        H: HeaderParameter,
        S: SecurityScheme,
        F: AuthenticatorFactory<S, Authenticator = A>,
    {
        let mut resolved_security = HashMap::new();
        for scheme in security_definitions.unwrap_or_default() {
            let name = scheme.canonical_configuration_name();
            let value = store
                .lookup(&name)
                .ok_or_else(|| Error::missing_security_definition(&name))?
                .into_string(&name)?;
            log::debug!("Resolved security definition '{}'", name);
            if resolved_security.contains_key(&name) {
                log::warn!(
                    "Security definitions share the configuration name '{}', keeping the last",
                    name
                );
            }
            resolved_security.insert(name, factory.build(scheme, &value));
        }

        let mut resolved_headers = HashMap::new();
        for header in headers {
            let name = header.canonical_configuration_name();
            let value = store
                .lookup(&name)
                .ok_or_else(|| Error::missing_header(&name))?
                .into_string(&name)?;
            log::debug!("Resolved header parameter '{}'", name);
            if resolved_headers.contains_key(&name) {
                log::warn!(
                    "Header parameters share the configuration name '{}', keeping the last",
                    name
                );
            }
            resolved_headers.insert(name, value);
        }

        log::info!(
            "Provider configuration ready: {} security definition(s), {} header(s)",
            resolved_security.len(),
            resolved_headers.len()
        );

        Ok(Self {
            headers: resolved_headers,
            security_definitions: resolved_security,
            store,
            region_lock: Mutex::new(()),
        })
    }

    /// The authenticator resolved for `scheme`, or `None` if the scheme
    /// was never declared
    pub fn authenticator_for<S: SecurityScheme + ?Sized>(&self, scheme: &S) -> Option<&A> {
        self.security_definitions
            .get(&scheme.canonical_configuration_name())
    }

    /// The value resolved for `header`, or `None` if the header was never
    /// declared
    pub fn header_value_for<H: HeaderParameter + ?Sized>(&self, header: &H) -> Option<&str> {
        self.headers
            .get(&header.canonical_configuration_name())
            .map(String::as_str)
    }

    /// The region currently held by the store, or an empty string if unset
    ///
    /// Read from the live store on every call; the default region is the
    /// caller's decision.
    pub fn region(&self) -> Result<String> {
        let raw = {
            let _guard = self
                .region_lock
                .lock()
                .map_err(|_| Error::internal("region lock poisoned"))?;
            self.store.region_raw()
        };

        match raw {
            None | Some(Value::Null) => Ok(String::new()),
            Some(value) => value.into_string(REGION_KEY),
        }
    }

    /// Resolved headers, keyed by canonical name
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Resolved authenticators, keyed by canonical name
    pub fn security_definitions(&self) -> impl Iterator<Item = (&str, &A)> {
        self.security_definitions
            .iter()
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn header_count(&self) -> usize {
        self.headers.len()
    }

    pub fn security_definition_count(&self) -> usize {
        self.security_definitions.len()
    }
}

impl<A> fmt::Debug for ProviderConfiguration<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut header_names: Vec<_> = self.headers.keys().collect();
        header_names.sort();
        let mut scheme_names: Vec<_> = self.security_definitions.keys().collect();
        scheme_names.sort();

        f.debug_struct("ProviderConfiguration")
            .field("headers", &header_names)
            .field("security_definitions", &scheme_names)
            .finish_non_exhaustive()
    }
}
