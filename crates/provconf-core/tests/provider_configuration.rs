//! End-to-end resolution through the public API

use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;
use provconf_core::{
    ApiKeyLocation, ConfigStore, EnvStore, ErrorKind, HeaderParam, LayeredStore, MemoryStore,
    ProviderConfiguration, ProviderManifest, Requirement, SecurityDefinition,
};

const MANIFEST: &str = r#"
security_definitions:
  - name: apikey_auth
    type: apiKey
    in: header
    key: X-API-Key
  - name: queryAuth
    type: apiKey
    in: query
    key: token
  - name: bearerAuth
    type: bearer
headers:
  - name: X-Request-ID
  - name: X-Tenant
    configuration_name: tenant
"#;

const VALUES: &str = r#"
apikey_auth: header-secret
query_auth: query-secret
bearer_auth: jwt
x_request_id: req-1
tenant: acme
region: us-west-2
"#;

fn resolve(manifest: &ProviderManifest, store: Arc<dyn ConfigStore>) -> ProviderConfiguration {
    ProviderConfiguration::new(
        &manifest.headers,
        Some(&manifest.security_definitions),
        store,
    )
    .unwrap()
}

#[test]
fn every_declared_requirement_is_retrievable() {
    let manifest = ProviderManifest::from_yaml(MANIFEST).unwrap();
    let config = resolve(&manifest, Arc::new(MemoryStore::from_yaml(VALUES).unwrap()));

    assert_eq!(config.security_definition_count(), 3);
    assert_eq!(config.header_count(), 2);

    let api_key = config
        .authenticator_for(&manifest.security_definitions[0])
        .unwrap();
    assert_eq!(api_key.location(), ApiKeyLocation::Header);
    assert_eq!(api_key.key_name(), "X-API-Key");
    assert_eq!(api_key.credential(), "header-secret");

    let query = config
        .authenticator_for(&manifest.security_definitions[1])
        .unwrap();
    assert_eq!(query.location(), ApiKeyLocation::Query);
    assert_eq!(query.key_name(), "token");

    let bearer = config
        .authenticator_for(&manifest.security_definitions[2])
        .unwrap();
    assert_eq!(bearer.credential(), "Bearer jwt");

    assert_eq!(config.header_value_for(&manifest.headers[0]), Some("req-1"));
    assert_eq!(config.header_value_for(&manifest.headers[1]), Some("acme"));
    assert_eq!(config.region().unwrap(), "us-west-2");
}

#[test]
fn any_missing_requirement_fails_construction() {
    let manifest = ProviderManifest::from_yaml(MANIFEST).unwrap();

    for missing in ["apikey_auth", "query_auth", "bearer_auth", "x_request_id", "tenant"] {
        let store = MemoryStore::from_yaml(VALUES).unwrap();
        store.remove(missing);

        let err = ProviderConfiguration::new(
            &manifest.headers,
            Some(&manifest.security_definitions),
            Arc::new(store),
        )
        .unwrap_err();

        match err.kind {
            ErrorKind::MissingValue { name, .. } => assert_eq!(name, missing),
            other => panic!("unexpected error kind {:?}", other),
        }
    }
}

#[test]
fn construction_is_idempotent() {
    let manifest = ProviderManifest::from_yaml(MANIFEST).unwrap();
    let store: Arc<dyn ConfigStore> = Arc::new(MemoryStore::from_yaml(VALUES).unwrap());

    let first = resolve(&manifest, store.clone());
    let second = resolve(&manifest, store);

    let mut first_headers: Vec<_> = first.headers().collect();
    let mut second_headers: Vec<_> = second.headers().collect();
    first_headers.sort();
    second_headers.sort();
    assert_eq!(first_headers, second_headers);

    for def in &manifest.security_definitions {
        assert_eq!(first.authenticator_for(def), second.authenticator_for(def));
    }
}

#[test]
fn header_scenario() {
    let headers = vec![HeaderParam::new("X-Api-Key")];
    let store: MemoryStore = [("x_api_key", "secret123")].into_iter().collect();

    let config = ProviderConfiguration::new(&headers, None, Arc::new(store)).unwrap();

    assert_eq!(config.header_value_for(&headers[0]), Some("secret123"));
}

#[test]
fn missing_security_scheme_scenario() {
    let security = vec![SecurityDefinition::api_key(
        "apikey_auth",
        ApiKeyLocation::Header,
        "X-API-Key",
    )];
    let headers: Vec<HeaderParam> = Vec::new();

    let err = ProviderConfiguration::new(&headers, Some(&security), Arc::new(MemoryStore::new()))
        .unwrap_err();

    assert_eq!(
        err.kind,
        ErrorKind::MissingValue {
            requirement: Requirement::SecurityDefinition,
            name: "apikey_auth".into(),
        }
    );
    assert!(err.to_string().contains("'apikey_auth'"));
}

#[test]
fn region_scenario() {
    let headers: Vec<HeaderParam> = Vec::new();

    let store: MemoryStore = [("region", "us-east-1")].into_iter().collect();
    let config = ProviderConfiguration::new(&headers, None, Arc::new(store)).unwrap();
    assert_eq!(config.region().unwrap(), "us-east-1");

    let config = ProviderConfiguration::new(&headers, None, Arc::new(MemoryStore::new())).unwrap();
    assert_eq!(config.region().unwrap(), "");
}

#[test]
fn concurrent_readers_see_the_same_values() {
    let manifest = ProviderManifest::from_yaml(MANIFEST).unwrap();
    let config = Arc::new(resolve(
        &manifest,
        Arc::new(MemoryStore::from_yaml(VALUES).unwrap()),
    ));
    let manifest = Arc::new(manifest);

    let handles: Vec<_> = (0..100)
        .map(|_| {
            let config = Arc::clone(&config);
            let manifest = Arc::clone(&manifest);
            thread::spawn(move || {
                let region = config.region().unwrap();
                let header = config
                    .header_value_for(&manifest.headers[0])
                    .map(str::to_string);
                let token = config
                    .authenticator_for(&manifest.security_definitions[2])
                    .map(|a| a.credential());
                (region, header, token)
            })
        })
        .collect();

    for handle in handles {
        let (region, header, token) = handle.join().unwrap();
        assert_eq!(region, "us-west-2");
        assert_eq!(header.as_deref(), Some("req-1"));
        assert_eq!(token.as_deref(), Some("Bearer jwt"));
    }
}

#[test]
fn environment_layer_fills_gaps() {
    std::env::set_var("PROVCONF_IT_BEARER_AUTH", "env-token");

    let security = vec![SecurityDefinition::bearer("bearerAuth")];
    let headers = vec![HeaderParam::new("X-Request-ID")];
    let file: MemoryStore = [("x_request_id", "req-2")].into_iter().collect();

    let store = LayeredStore::new()
        .with_layer(Arc::new(file))
        .with_layer(Arc::new(EnvStore::with_prefix("PROVCONF_IT_")));

    let config = ProviderConfiguration::new(&headers, Some(&security), Arc::new(store)).unwrap();

    assert_eq!(
        config.authenticator_for(&security[0]).unwrap().value(),
        "env-token"
    );
    assert_eq!(config.header_value_for(&headers[0]), Some("req-2"));
}
