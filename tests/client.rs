//! Client construction, host resolution, namespace handling and dispatch.

use std::sync::{Arc, Mutex, MutexGuard};

use connectwise_client::{Arguments, Client, ClientConfig, Error, ResponseRegistry};
use serde_json::{json, Value};

/// Every construction replaces the process-wide client, so tests that build
/// clients run one at a time.
static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

mod stubs {
    pub const NAMESPACE: &str = "tests::client::stubs";

    pub mod some_api {
        use serde::Deserialize;

        #[derive(Debug, Deserialize, PartialEq)]
        pub struct FunctionCallResponse {
            pub key: String,
        }
    }
}

fn build_config(overrides: Value) -> Value {
    let mut config = json!({
        "connectwise": {
            "company": "Company",
            "host": "http://some.host",
            "password": "Password",
            "username": "Username",
        }
    });
    merge(&mut config, overrides);
    config
}

fn merge(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                merge(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (base, value) => *base = value,
    }
}

fn without(field: &str) -> Value {
    let mut config = build_config(json!({}));
    config["connectwise"]
        .as_object_mut()
        .unwrap()
        .remove(field);
    config
}

#[test]
fn it_can_be_constructed_with_good_values() {
    let _guard = serial();
    let client = Client::from_value(build_config(json!({}))).unwrap();
    assert_eq!(client.config().company(), "Company");
}

#[test]
fn it_fails_without_any_required_field() {
    let _guard = serial();
    for field in ["company", "host", "username", "password"] {
        let err = Client::from_value(without(field)).unwrap_err();
        assert!(err.is_configuration(), "{field}: {err}");
        assert_eq!(
            err.context().and_then(|c| c.field_path.clone()),
            Some(format!("connectwise.{field}"))
        );
    }
}

#[test]
fn it_fails_with_empty_required_fields() {
    let _guard = serial();
    for field in ["company", "host", "username", "password"] {
        let mut config = build_config(json!({}));
        config["connectwise"][field] = json!("");
        let err = Client::from_value(config).unwrap_err();
        assert!(err.is_configuration(), "{field}: {err}");
    }
}

#[test]
fn it_fails_with_a_bad_host() {
    let _guard = serial();
    let err = Client::from_value(build_config(json!({"connectwise": {"host": "some.host"}})))
        .unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn failed_construction_leaves_current_client_alone() {
    let _guard = serial();
    let client = Client::from_value(build_config(json!({}))).unwrap();
    assert!(Client::from_value(without("password")).is_err());
    assert!(Client::current().unwrap().ptr_eq(&client));
}

#[test]
fn it_returns_the_host_name() {
    let _guard = serial();
    let expected = "http://someknown.host";
    let client = Client::from_value(build_config(json!({"connectwise": {"host": expected}}))).unwrap();
    assert_eq!(client.host(), expected);
}

#[test]
fn it_returns_the_host_name_with_passed_in_uri() {
    let _guard = serial();
    let client = Client::from_value(build_config(
        json!({"connectwise": {"host": "http://someknown.host"}}),
    ))
    .unwrap();

    assert_eq!(client.host_with("/"), "http://someknown.host");
    assert_eq!(client.host_with("some.uri"), "http://someknown.host/some.uri");
    assert_eq!(client.host_with("/some.uri"), "http://someknown.host/some.uri");
}

#[test]
fn it_returns_empty_soap_options_when_none_are_set() {
    let _guard = serial();
    let client = Client::from_value(build_config(json!({}))).unwrap();
    assert!(client.soap_options().is_empty());
}

#[test]
fn it_returns_the_soap_options() {
    let _guard = serial();
    let client = Client::from_value(build_config(json!({"soap_options": {"key 1": "value"}}))).unwrap();
    let options = serde_json::to_value(client.soap_options()).unwrap();
    assert_eq!(options, json!({"key 1": "value"}));
}

#[test]
fn it_returns_the_default_api_namespace() {
    let _guard = serial();
    let client = Client::from_value(build_config(json!({}))).unwrap();
    assert_eq!(client.api_namespace(), "connectwise::api::generated");
    assert_eq!(
        client.api_namespace_with("Class"),
        "connectwise::api::generated::Class"
    );
}

#[test]
fn it_returns_the_current_client() {
    let _guard = serial();
    let first = Client::from_value(build_config(json!({}))).unwrap();
    assert_eq!(Client::current().unwrap(), first);

    let second = Client::from_value(build_config(json!({"connectwise": {"company": "Other"}}))).unwrap();
    let current = Client::current().unwrap();
    assert_eq!(current, second);
    assert_ne!(current, first);
    assert_eq!(current.config().company(), "Other");
}

#[test]
fn it_returns_the_expected_results() {
    let _guard = serial();
    let registry = Arc::new(ResponseRegistry::new());
    registry.register::<stubs::some_api::FunctionCallResponse>(
        stubs::NAMESPACE,
        "SomeApi",
        "FunctionCall",
    );
    let client = Client::builder()
        .registry(registry)
        .config(ClientConfig::from_value(build_config(json!({}))).unwrap())
        .build()
        .unwrap();

    let mut args = Arguments::new();
    args.insert("key".into(), json!("value"));
    let result = client
        .set_api_namespace(stubs::NAMESPACE)
        .execute("SomeApi", "FunctionCall", args)
        .unwrap();

    assert!(result.is::<stubs::some_api::FunctionCallResponse>());
    assert_eq!(
        result.downcast_ref::<stubs::some_api::FunctionCallResponse>(),
        Some(&stubs::some_api::FunctionCallResponse {
            key: "value".to_string()
        })
    );
}

#[test]
fn it_reports_unresolved_call_targets() {
    let _guard = serial();
    let client = Client::builder()
        .registry(Arc::new(ResponseRegistry::new()))
        .config(ClientConfig::from_value(build_config(json!({}))).unwrap())
        .build()
        .unwrap();

    let err = client
        .execute("SomeApi", "FunctionCall", Arguments::new())
        .unwrap_err();
    assert!(err.is_unresolved_call_target());

    // Same inputs, same resolution.
    let again = client
        .execute("SomeApi", "FunctionCall", Arguments::new())
        .unwrap_err();
    assert_eq!(err.to_string(), again.to_string());
}

#[test]
fn it_reports_arguments_that_do_not_fit() {
    let _guard = serial();
    let registry = Arc::new(ResponseRegistry::new());
    registry.register::<stubs::some_api::FunctionCallResponse>(
        stubs::NAMESPACE,
        "SomeApi",
        "FunctionCall",
    );
    let client = Client::builder()
        .registry(registry)
        .api_namespace(stubs::NAMESPACE)
        .config(ClientConfig::from_value(build_config(json!({}))).unwrap())
        .build()
        .unwrap();

    let err = client
        .execute("SomeApi", "FunctionCall", Arguments::new())
        .unwrap_err();
    assert!(matches!(err, Error::Construction { .. }));
}

#[test]
fn builder_without_config_fails() {
    let _guard = serial();
    let err = Client::builder().build().unwrap_err();
    assert!(err.is_configuration());
}
