//! Configuration stores
//!
//! A store is the host-owned key-value abstraction holding the values
//! the user supplied for the provider. Lookups are existence-checked:
//! `None` means the key was never set, which is different from a key
//! set to an empty string.

use indexmap::IndexMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{Error, Result};
use crate::value::Value;

/// Store key holding the provider region
pub const REGION_KEY: &str = "region";

/// Existence-checked key-value lookup over provider configuration
pub trait ConfigStore: Send + Sync {
    /// Look up a value by canonical name
    fn lookup(&self, name: &str) -> Option<Value>;

    /// The raw region value, if set
    fn region_raw(&self) -> Option<Value> {
        self.lookup(REGION_KEY)
    }
}

impl<T: ConfigStore + ?Sized> ConfigStore for Arc<T> {
    fn lookup(&self, name: &str) -> Option<Value> {
        (**self).lookup(name)
    }

    fn region_raw(&self) -> Option<Value> {
        (**self).region_raw()
    }
}

/// In-memory store, mutable through a shared reference
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<IndexMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a YAML mapping
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(yaml).map_err(|e| Error::parse(e.to_string()))?;
        Self::from_value(value)
    }

    /// Load a store from a JSON object
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| Error::parse(e.to_string()))?;
        Self::from_value(value)
    }

    /// Load a store from a file (JSON or YAML based on extension)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(path.display().to_string(), e.to_string()))?;

        let store = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
        .map_err(|e| e.with_path(path.display().to_string()))?;

        log::debug!(
            "Loaded {} configuration values from {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Mapping(map) => Ok(Self {
                values: RwLock::new(map),
            }),
            // empty document
            Value::Null => Ok(Self::new()),
            other => Err(Error::parse(format!(
                "Expected a mapping at the top level, got {}",
                other.type_name()
            ))),
        }
    }

    /// Set a value, replacing any previous one
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.insert(name.into(), value.into());
    }

    /// Remove a value, returning it if it was set
    pub fn remove(&self, name: &str) -> Option<Value> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.shift_remove(name)
    }

    /// Number of values held
    pub fn len(&self) -> usize {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if the store holds no values
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ConfigStore for MemoryStore {
    fn lookup(&self, name: &str) -> Option<Value> {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        values.get(name).cloned()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: RwLock::new(map),
        }
    }
}

/// Store backed by environment variables
///
/// A canonical name `x_api_key` is looked up as `X_API_KEY`, with the
/// optional prefix prepended (`PROVIDER_X_API_KEY`).
#[derive(Debug, Clone, Default)]
pub struct EnvStore {
    prefix: Option<String>,
}

impl EnvStore {
    /// Create a store reading unprefixed variables
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store reading variables with the given prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// The environment variable consulted for a canonical name
    pub fn var_name(&self, name: &str) -> String {
        let upper = name.to_uppercase();
        match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, upper),
            None => upper,
        }
    }
}

impl ConfigStore for EnvStore {
    fn lookup(&self, name: &str) -> Option<Value> {
        let var = self.var_name(name);
        match std::env::var(&var) {
            Ok(value) => Some(Value::from(value)),
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                log::warn!("Environment variable {} is not valid UTF-8, ignoring", var);
                None
            }
        }
    }
}

/// Ordered stack of stores; the first store holding a key wins
#[derive(Default)]
pub struct LayeredStore {
    layers: Vec<Arc<dyn ConfigStore>>,
}

impl LayeredStore {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer with lower priority than the existing ones
    pub fn with_layer(mut self, store: Arc<dyn ConfigStore>) -> Self {
        self.layers.push(store);
        self
    }

    /// Add a layer with higher priority than the existing ones
    pub fn push_front(&mut self, store: Arc<dyn ConfigStore>) {
        self.layers.insert(0, store);
    }

    /// Number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns true if there are no layers
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl ConfigStore for LayeredStore {
    fn lookup(&self, name: &str) -> Option<Value> {
        self.layers.iter().find_map(|layer| layer.lookup(name))
    }

    fn region_raw(&self) -> Option<Value> {
        self.layers.iter().find_map(|layer| layer.region_raw())
    }
}
