//! Configuration validation: required credentials and host URL checks.

use url::Url;

use crate::config::{ClientConfig, RawConfig};
use crate::{Error, ErrorContext, Result};

const SOURCE: &str = "config_validator";

/// Validate a raw configuration into a [`ClientConfig`].
///
/// Fields are checked in a fixed order (company, host, username, password)
/// and the first failure is returned.
pub(crate) fn validate(raw: RawConfig) -> Result<ClientConfig> {
    let section = raw.connectwise.ok_or_else(|| {
        Error::configuration_with_context(
            "missing 'connectwise' section",
            ErrorContext::new()
                .with_field_path("connectwise")
                .with_source(SOURCE),
        )
    })?;

    let company = require(section.company, "company")?;
    let host = require(section.host, "host")?.trim().to_string();
    let url = parse_host(&host)?;
    let username = require(section.username, "username")?;
    let password = require(section.password, "password")?;

    Ok(ClientConfig {
        company,
        host,
        url,
        username,
        password,
        soap_options: raw.soap_options.unwrap_or_default(),
    })
}

fn require(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(Error::configuration_with_context(
            format!("{} must not be empty", field),
            ErrorContext::new()
                .with_field_path(format!("connectwise.{}", field))
                .with_source(SOURCE),
        )),
        None => Err(Error::configuration_with_context(
            format!("{} is required", field),
            ErrorContext::new()
                .with_field_path(format!("connectwise.{}", field))
                .with_source(SOURCE),
        )),
    }
}

/// The host must be an absolute URL with a scheme and a host component.
fn parse_host(host: &str) -> Result<Url> {
    let invalid = |reason: String| {
        Error::configuration_with_context(
            format!("host must be an absolute URL: {}", reason),
            ErrorContext::new()
                .with_field_path("connectwise.host")
                .with_details(host)
                .with_source(SOURCE),
        )
    };

    let url = Url::parse(host).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() || url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host component".to_string()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RawConnectWise;

    fn raw() -> RawConfig {
        RawConfig {
            connectwise: Some(RawConnectWise {
                company: Some("Company".into()),
                host: Some("http://some.host".into()),
                username: Some("Username".into()),
                password: Some("Password".into()),
            }),
            soap_options: None,
        }
    }

    fn field_of(err: &Error) -> Option<&str> {
        err.context().and_then(|c| c.field_path.as_deref())
    }

    #[test]
    fn accepts_complete_config() {
        let cfg = validate(raw()).unwrap();
        assert_eq!(cfg.host, "http://some.host");
        assert!(cfg.soap_options.is_empty());
    }

    #[test]
    fn rejects_missing_section() {
        let err = validate(RawConfig::default()).unwrap_err();
        assert_eq!(field_of(&err), Some("connectwise"));
    }

    #[test]
    fn rejects_each_missing_field() {
        type Clear = fn(&mut RawConnectWise);
        let cases: [(&str, Clear); 4] = [
            ("connectwise.company", |s| s.company = None),
            ("connectwise.host", |s| s.host = None),
            ("connectwise.username", |s| s.username = None),
            ("connectwise.password", |s| s.password = None),
        ];
        for (field, clear) in cases {
            let mut cfg = raw();
            clear(cfg.connectwise.as_mut().unwrap());
            let err = validate(cfg).unwrap_err();
            assert!(err.is_configuration());
            assert_eq!(field_of(&err), Some(field));
        }
    }

    #[test]
    fn rejects_blank_fields() {
        let mut cfg = raw();
        cfg.connectwise.as_mut().unwrap().username = Some("   ".into());
        let err = validate(cfg).unwrap_err();
        assert_eq!(field_of(&err), Some("connectwise.username"));
    }

    #[test]
    fn rejects_host_without_scheme() {
        let mut cfg = raw();
        cfg.connectwise.as_mut().unwrap().host = Some("some.host".into());
        let err = validate(cfg).unwrap_err();
        assert_eq!(field_of(&err), Some("connectwise.host"));
    }

    #[test]
    fn rejects_host_without_host_component() {
        for host in ["mailto:someone@some.host", "http://", "file:///tmp/x"] {
            let mut cfg = raw();
            cfg.connectwise.as_mut().unwrap().host = Some(host.into());
            assert!(validate(cfg).is_err(), "{} should be rejected", host);
        }
    }

    #[test]
    fn keeps_credentials_as_written() {
        let mut cfg = raw();
        cfg.connectwise.as_mut().unwrap().password = Some("  pass word  ".into());
        let cfg = validate(cfg).unwrap();
        assert_eq!(cfg.password, "  pass word  ");
        assert_eq!(cfg.credentials().integrator_password, "  pass word  ");
    }

    #[test]
    fn keeps_host_as_configured() {
        let mut cfg = raw();
        cfg.connectwise.as_mut().unwrap().host = Some(" https://cw.example.com/v4 ".into());
        let cfg = validate(cfg).unwrap();
        assert_eq!(cfg.host, "https://cw.example.com/v4");
    }
}
