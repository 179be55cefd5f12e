use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use url::Url;

/// Validated lookup key for an application - immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationSlug(String);

impl ApplicationSlug {
    pub const MAX_LENGTH: usize = 50;

    pub fn new(slug: impl Into<String>) -> Result<Self, SlugError> {
        let slug = slug.into();
        Self::validate(&slug)?;
        Ok(Self(slug))
    }

    fn validate(slug: &str) -> Result<(), SlugError> {
        if slug.is_empty() {
            return Err(SlugError {
                given: slug.to_string(),
                reason: "cannot be empty",
            });
        }
        if slug.len() > Self::MAX_LENGTH {
            return Err(SlugError {
                given: slug.to_string(),
                reason: "exceeds maximum length",
            });
        }
        if !slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(SlugError {
                given: slug.to_string(),
                reason: "contains characters outside [a-zA-Z0-9_-]",
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ApplicationSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid application slug {given:?}: {reason}")]
pub struct SlugError {
    pub given: String,
    pub reason: &'static str,
}

/// Opaque stable identifier for an application, used for cross-references.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationPk(pub String);

impl ApplicationPk {
    #[must_use]
    pub fn new(pk: impl Into<String>) -> Self {
        Self(pk.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ApplicationPk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of the provider backing an application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderPk(pub String);

impl ProviderPk {
    #[must_use]
    pub fn new(pk: impl Into<String>) -> Self {
        Self(pk.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProviderPk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to the provider an application delegates authentication to.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderRef {
    pub pk: ProviderPk,
    pub name: String,
}

/// The resolved entity this screen displays.
///
/// `slug` is the key the record was looked up under and never changes once
/// loaded. Optional metadata fields may be absent or empty on the wire.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Application {
    pub slug: ApplicationSlug,
    pub pk: ApplicationPk,
    pub name: String,
    #[serde(default)]
    pub meta_icon: Option<String>,
    #[serde(default)]
    pub meta_publisher: Option<String>,
    #[serde(default)]
    pub provider: Option<ProviderRef>,
}

impl Application {
    /// Icon URL usable by the shell, if a usable one is configured.
    ///
    /// Empty strings count as unset. Server-relative paths pass through.
    /// Absolute URLs must be http(s); any other scheme is dropped with a
    /// warning rather than reaching the shell.
    #[must_use]
    pub fn icon_url(&self) -> Option<&str> {
        let raw = self.meta_icon.as_deref()?;
        if raw.is_empty() {
            return None;
        }
        if raw.starts_with('/') && !raw.starts_with("//") {
            return Some(raw);
        }
        match Url::parse(raw) {
            Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => Some(raw),
            Ok(parsed) => {
                warn!(
                    slug = %self.slug,
                    scheme = parsed.scheme(),
                    "dropping application icon with disallowed scheme"
                );
                None
            }
            Err(_) => {
                warn!(slug = %self.slug, "dropping unparseable application icon URL");
                None
            }
        }
    }

    /// Publisher line for the header, if one is set.
    #[must_use]
    pub fn publisher(&self) -> Option<&str> {
        match self.meta_publisher.as_deref() {
            Some("") | None => None,
            Some(publisher) => Some(publisher),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod slug_tests {
        use super::*;

        #[test]
        fn accepts_typical_slugs() {
            for slug in ["app1", "grafana-prod", "My_App", "a", "0day"] {
                assert!(ApplicationSlug::new(slug).is_ok(), "rejected {slug:?}");
            }
        }

        #[test]
        fn round_trips_value() {
            let slug = ApplicationSlug::new("gitlab").unwrap();
            assert_eq!(slug.as_str(), "gitlab");
            assert_eq!(slug.to_string(), "gitlab");
        }

        #[test]
        fn rejects_empty() {
            assert!(ApplicationSlug::new("").is_err());
        }

        #[test]
        fn rejects_over_max_length() {
            let long = "a".repeat(ApplicationSlug::MAX_LENGTH + 1);
            assert!(ApplicationSlug::new(long).is_err());

            let at_limit = "a".repeat(ApplicationSlug::MAX_LENGTH);
            assert!(ApplicationSlug::new(at_limit).is_ok());
        }

        #[test]
        fn rejects_invalid_characters() {
            for slug in ["has space", "semi;colon", "caf\u{e9}", "a/b", "dot.ted"] {
                assert!(ApplicationSlug::new(slug).is_err(), "accepted {slug:?}");
            }
        }

        #[test]
        fn error_carries_input() {
            let err = ApplicationSlug::new("bad slug").unwrap_err();
            assert_eq!(err.given, "bad slug");
        }
    }

    mod icon_tests {
        use super::*;

        fn app_with_icon(icon: Option<&str>) -> Application {
            Application {
                slug: ApplicationSlug::new("app1").unwrap(),
                pk: ApplicationPk::new("pk-1"),
                name: "App One".into(),
                meta_icon: icon.map(String::from),
                meta_publisher: None,
                provider: None,
            }
        }

        #[test]
        fn absent_icon_is_none() {
            assert_eq!(app_with_icon(None).icon_url(), None);
        }

        #[test]
        fn empty_icon_is_tolerated_as_none() {
            assert_eq!(app_with_icon(Some("")).icon_url(), None);
        }

        #[test]
        fn http_and_https_pass() {
            assert_eq!(
                app_with_icon(Some("https://cdn.example.com/icon.png")).icon_url(),
                Some("https://cdn.example.com/icon.png")
            );
            assert_eq!(
                app_with_icon(Some("http://cdn.example.com/icon.png")).icon_url(),
                Some("http://cdn.example.com/icon.png")
            );
        }

        #[test]
        fn server_relative_path_passes() {
            assert_eq!(
                app_with_icon(Some("/media/icons/app.png")).icon_url(),
                Some("/media/icons/app.png")
            );
        }

        #[test]
        fn dangerous_schemes_are_dropped() {
            assert_eq!(app_with_icon(Some("javascript:alert(1)")).icon_url(), None);
            assert_eq!(
                app_with_icon(Some("data:image/png;base64,AAAA")).icon_url(),
                None
            );
        }

        #[test]
        fn protocol_relative_and_garbage_are_dropped() {
            assert_eq!(app_with_icon(Some("//evil.example/x.png")).icon_url(), None);
            assert_eq!(app_with_icon(Some("not a url")).icon_url(), None);
        }
    }

    mod publisher_tests {
        use super::*;

        #[test]
        fn empty_publisher_is_none() {
            let mut app = Application {
                slug: ApplicationSlug::new("app1").unwrap(),
                pk: ApplicationPk::new("pk-1"),
                name: "App One".into(),
                meta_icon: None,
                meta_publisher: Some(String::new()),
                provider: None,
            };
            assert_eq!(app.publisher(), None);

            app.meta_publisher = Some("ACME Corp".into());
            assert_eq!(app.publisher(), Some("ACME Corp"));
        }
    }

    mod wire_tests {
        use super::*;

        #[test]
        fn decodes_full_record() {
            let json = r#"{
                "slug": "grafana",
                "pk": "f0e0d0c0",
                "name": "Grafana",
                "meta_icon": "https://cdn.example.com/grafana.png",
                "meta_publisher": "Grafana Labs",
                "provider": { "pk": "42", "name": "OAuth2 Provider" }
            }"#;
            let app: Application = serde_json::from_str(json).unwrap();
            assert_eq!(app.slug.as_str(), "grafana");
            assert_eq!(app.pk.as_str(), "f0e0d0c0");
            assert_eq!(app.name, "Grafana");
            assert_eq!(app.meta_publisher.as_deref(), Some("Grafana Labs"));
            let provider = app.provider.unwrap();
            assert_eq!(provider.pk.as_str(), "42");
            assert_eq!(provider.name, "OAuth2 Provider");
        }

        #[test]
        fn decodes_minimal_record_with_defaults() {
            let json = r#"{ "slug": "plain", "pk": "p1", "name": "Plain" }"#;
            let app: Application = serde_json::from_str(json).unwrap();
            assert_eq!(app.meta_icon, None);
            assert_eq!(app.meta_publisher, None);
            assert_eq!(app.provider, None);
        }

        #[test]
        fn null_optionals_decode_as_absent() {
            let json = r#"{
                "slug": "plain",
                "pk": "p1",
                "name": "Plain",
                "meta_icon": null,
                "meta_publisher": null,
                "provider": null
            }"#;
            let app: Application = serde_json::from_str(json).unwrap();
            assert_eq!(app.icon_url(), None);
            assert_eq!(app.publisher(), None);
            assert!(app.provider.is_none());
        }
    }
}
