//! Client configuration loading and validation.
//!
//! The inbound shape mirrors the configuration file used by applications:
//!
//! ```yaml
//! connectwise:
//!   company: Company
//!   host: https://cw.example.com
//!   username: integrator
//!   password: secret
//! soap_options:
//!   trace: true
//! ```
//!
//! Every loader funnels into [`validation::validate`], so a [`ClientConfig`]
//! value always holds non-empty credentials and an absolute host URL.

pub mod validation;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use url::Url;

use crate::{Error, ErrorContext, Result};

/// Options handed to the SOAP transport untouched.
pub type SoapOptions = BTreeMap<String, serde_json::Value>;

/// Environment variables read by [`ClientConfig::from_env`].
pub const ENV_COMPANY: &str = "CONNECTWISE_COMPANY";
pub const ENV_HOST: &str = "CONNECTWISE_HOST";
pub const ENV_USERNAME: &str = "CONNECTWISE_USERNAME";
pub const ENV_PASSWORD: &str = "CONNECTWISE_PASSWORD";

/// Configuration as it arrives, before validation. All fields are optional
/// so that a missing key is reported as a configuration error rather than a
/// deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub connectwise: Option<RawConnectWise>,
    #[serde(default)]
    pub soap_options: Option<SoapOptions>,
}

/// The `connectwise` section of [`RawConfig`].
#[derive(Clone, Default, Deserialize)]
pub struct RawConnectWise {
    #[serde(default, deserialize_with = "scalar_string")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub host: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub password: Option<String>,
}

/// Accept any scalar as text: YAML reads `company: 12345` as an integer.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error as _;

    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(serde_json::Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a scalar value, found {}",
            if other.is_array() { "a sequence" } else { "a map" }
        ))),
    }
}

impl fmt::Debug for RawConnectWise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawConnectWise")
            .field("company", &self.company)
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Validated, immutable client configuration.
#[derive(Clone, PartialEq)]
pub struct ClientConfig {
    pub(crate) company: String,
    pub(crate) host: String,
    pub(crate) url: Url,
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) soap_options: SoapOptions,
}

impl ClientConfig {
    /// Validate a raw configuration.
    pub fn from_raw(raw: RawConfig) -> Result<Self> {
        validation::validate(raw)
    }

    /// Build from a structured value shaped like the configuration file.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let raw: RawConfig = serde_json::from_value(value).map_err(|e| {
            Error::configuration_with_context(
                "configuration has an unexpected shape",
                ErrorContext::new()
                    .with_details(e.to_string())
                    .with_source("config_loader"),
            )
        })?;
        Self::from_raw(raw)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_yaml::from_str(content)?;
        Self::from_value(value)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Self::from_json_str(&std::fs::read_to_string(path)?),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&std::fs::read_to_string(path)?),
            _ => Err(Error::configuration_with_context(
                "unsupported configuration file extension (expected .json, .yaml or .yml)",
                ErrorContext::new()
                    .with_details(path.display().to_string())
                    .with_source("config_loader"),
            )),
        }
    }

    /// Read `CONNECTWISE_COMPANY`, `CONNECTWISE_HOST`, `CONNECTWISE_USERNAME`
    /// and `CONNECTWISE_PASSWORD`.
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| std::env::var(name).ok();
        Self::from_raw(RawConfig {
            connectwise: Some(RawConnectWise {
                company: var(ENV_COMPANY),
                host: var(ENV_HOST),
                username: var(ENV_USERNAME),
                password: var(ENV_PASSWORD),
            }),
            soap_options: None,
        })
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    /// The host exactly as configured.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The host parsed as a URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn soap_options(&self) -> &SoapOptions {
        &self.soap_options
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            company_id: self.company.clone(),
            integrator_login_id: self.username.clone(),
            integrator_password: self.password.clone(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("company", &self.company)
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("soap_options", &self.soap_options)
            .finish()
    }
}

/// Integrator credentials attached to every ConnectWise SOAP call.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Credentials {
    pub company_id: String,
    pub integrator_login_id: String,
    pub integrator_password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("company_id", &self.company_id)
            .field("integrator_login_id", &self.integrator_login_id)
            .field("integrator_password", &"<redacted>")
            .finish()
    }
}
