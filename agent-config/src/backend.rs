//! Provider-specific connection parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::error::{ConfigError, ConfigResult};

const AZURE: &str = "AzureConfig";
const OPENAI: &str = "OpenAiConfig";
const BACKEND: &str = "BackendConfig";

/// Azure `OpenAI` REST API versions accepted by the backend client.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AzureApiVersion {
    /// `2023-07-01-preview`
    #[serde(rename = "2023-07-01-preview")]
    V2023_07_01Preview,
    /// `2023-08-01-preview`
    #[serde(rename = "2023-08-01-preview")]
    V2023_08_01Preview,
    /// `2023-09-01-preview`
    #[serde(rename = "2023-09-01-preview")]
    V2023_09_01Preview,
    /// `2023-10-01-preview`
    #[serde(rename = "2023-10-01-preview")]
    V2023_10_01Preview,
    /// `2023-12-01-preview`
    #[default]
    #[serde(rename = "2023-12-01-preview")]
    V2023_12_01Preview,
}

impl AzureApiVersion {
    /// Every supported version, oldest first.
    pub const ALL: [Self; 5] = [
        Self::V2023_07_01Preview,
        Self::V2023_08_01Preview,
        Self::V2023_09_01Preview,
        Self::V2023_10_01Preview,
        Self::V2023_12_01Preview,
    ];

    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V2023_07_01Preview => "2023-07-01-preview",
            Self::V2023_08_01Preview => "2023-08-01-preview",
            Self::V2023_09_01Preview => "2023-09-01-preview",
            Self::V2023_10_01Preview => "2023-10-01-preview",
            Self::V2023_12_01Preview => "2023-12-01-preview",
        }
    }
}

impl fmt::Display for AzureApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AzureApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|version| version.as_str() == s)
            .ok_or_else(|| {
                let supported: Vec<_> = Self::ALL.iter().map(|v| v.as_str()).collect();
                ConfigError::validation(
                    AZURE,
                    "api_version",
                    format!(
                        "unsupported API version `{s}`, expected one of: {}",
                        supported.join(", ")
                    ),
                )
            })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
enum AzureApiType {
    #[default]
    #[serde(rename = "azure")]
    Azure,
}

/// Azure `OpenAI` deployment configuration.
///
/// Wire form: `{model, base_url, api_key, api_version, api_type: "azure"}`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAzureConfig")]
pub struct AzureConfig {
    model: String,
    base_url: String,
    api_key: String,
    api_version: AzureApiVersion,
    api_type: AzureApiType,
}

impl fmt::Debug for AzureConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureConfig")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl AzureConfig {
    /// Creates a configuration using the default API version.
    ///
    /// `model` is the deployment name. `base_url` must be an absolute
    /// `http`/`https` URL without a trailing `/`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first invalid field.
    pub fn new(
        model: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> ConfigResult<Self> {
        let model = model.into();
        let base_url = base_url.into();
        let api_key = api_key.into();

        require_non_empty(AZURE, "model", &model)?;
        validate_base_url(AZURE, &base_url)?;
        require_non_empty(AZURE, "api_key", &api_key)?;

        Ok(Self {
            model,
            base_url,
            api_key,
            api_version: AzureApiVersion::default(),
            api_type: AzureApiType::Azure,
        })
    }

    /// Selects the REST API version.
    #[must_use]
    pub fn with_api_version(mut self, api_version: AzureApiVersion) -> Self {
        self.api_version = api_version;
        self
    }

    /// Returns the deployment name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the service base URL exactly as configured.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the REST API version.
    #[must_use]
    pub const fn api_version(&self) -> AzureApiVersion {
        self.api_version
    }
}

#[derive(Deserialize)]
struct RawAzureConfig {
    model: String,
    base_url: String,
    api_key: String,
    #[serde(default)]
    api_version: Option<String>,
    #[serde(default)]
    api_type: Option<String>,
}

impl TryFrom<RawAzureConfig> for AzureConfig {
    type Error = ConfigError;

    fn try_from(raw: RawAzureConfig) -> Result<Self, Self::Error> {
        if let Some(api_type) = raw.api_type.as_deref() {
            if api_type != "azure" {
                return Err(ConfigError::validation(
                    AZURE,
                    "api_type",
                    format!("expected `azure`, found `{api_type}`"),
                ));
            }
        }

        let config = Self::new(raw.model, raw.base_url, raw.api_key)?;
        match raw.api_version {
            Some(version) => Ok(config.with_api_version(version.parse()?)),
            None => Ok(config),
        }
    }
}

/// `OpenAI` platform configuration.
///
/// Wire form: `{model, api_key}`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOpenAiConfig")]
pub struct OpenAiConfig {
    model: String,
    api_key: String,
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl OpenAiConfig {
    /// Creates a configuration for the supplied model identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if either field is empty.
    pub fn new(model: impl Into<String>, api_key: impl Into<String>) -> ConfigResult<Self> {
        let model = model.into();
        let api_key = api_key.into();

        require_non_empty(OPENAI, "model", &model)?;
        require_non_empty(OPENAI, "api_key", &api_key)?;

        Ok(Self { model, api_key })
    }

    /// Returns the model identifier.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOpenAiConfig {
    model: String,
    api_key: String,
}

impl TryFrom<RawOpenAiConfig> for OpenAiConfig {
    type Error = ConfigError;

    fn try_from(raw: RawOpenAiConfig) -> Result<Self, Self::Error> {
        Self::new(raw.model, raw.api_key)
    }
}

/// Connection parameters for one model provider.
///
/// Decoding dispatches on `api_type`: `"azure"` selects [`AzureConfig`], an
/// absent tag (or `"openai"`) selects [`OpenAiConfig`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BackendConfig {
    /// Azure `OpenAI` deployment.
    Azure(AzureConfig),
    /// `OpenAI` platform.
    OpenAi(OpenAiConfig),
}

impl BackendConfig {
    /// Returns the provider identifier (`"azure"` or `"openai"`).
    #[must_use]
    pub const fn provider(&self) -> &'static str {
        match self {
            Self::Azure(_) => "azure",
            Self::OpenAi(_) => "openai",
        }
    }

    /// Returns the model identifier or deployment name.
    #[must_use]
    pub fn model(&self) -> &str {
        match self {
            Self::Azure(config) => config.model(),
            Self::OpenAi(config) => config.model(),
        }
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        match self {
            Self::Azure(config) => config.api_key(),
            Self::OpenAi(config) => config.api_key(),
        }
    }
}

impl From<AzureConfig> for BackendConfig {
    fn from(value: AzureConfig) -> Self {
        Self::Azure(value)
    }
}

impl From<OpenAiConfig> for BackendConfig {
    fn from(value: OpenAiConfig) -> Self {
        Self::OpenAi(value)
    }
}

#[derive(Deserialize)]
struct RawBackendConfig {
    model: String,
    api_key: String,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    api_version: Option<String>,
    #[serde(default)]
    api_type: Option<String>,
}

impl TryFrom<RawBackendConfig> for BackendConfig {
    type Error = ConfigError;

    fn try_from(raw: RawBackendConfig) -> Result<Self, Self::Error> {
        match raw.api_type.as_deref() {
            Some("azure") => {
                let base_url = raw.base_url.ok_or_else(|| {
                    ConfigError::validation(AZURE, "base_url", "field is required")
                })?;
                let config = AzureConfig::try_from(RawAzureConfig {
                    model: raw.model,
                    base_url,
                    api_key: raw.api_key,
                    api_version: raw.api_version,
                    api_type: raw.api_type,
                })?;
                Ok(Self::Azure(config))
            }
            None | Some("openai") => {
                if raw.base_url.is_some() {
                    return Err(ConfigError::validation(
                        OPENAI,
                        "base_url",
                        "custom endpoints require `api_type: \"azure\"`",
                    ));
                }
                if raw.api_version.is_some() {
                    return Err(ConfigError::validation(
                        OPENAI,
                        "api_version",
                        "API versions only apply to `api_type: \"azure\"`",
                    ));
                }
                Ok(Self::OpenAi(OpenAiConfig::new(raw.model, raw.api_key)?))
            }
            Some(other) => Err(ConfigError::validation(
                BACKEND,
                "api_type",
                format!("unknown provider `{other}`"),
            )),
        }
    }
}

impl<'de> Deserialize<'de> for BackendConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawBackendConfig::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

fn require_non_empty(config: &'static str, field: &'static str, value: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::validation(config, field, "must not be empty"));
    }
    Ok(())
}

fn validate_base_url(config: &'static str, raw: &str) -> ConfigResult<()> {
    let invalid = |reason: String| ConfigError::validation(config, "base_url", reason);

    if raw.trim() != raw {
        return Err(invalid(format!("`{raw}` has surrounding whitespace")));
    }
    if raw.ends_with('/') {
        return Err(invalid(format!("`{raw}` must not end with `/`")));
    }

    let url = Url::parse(raw)
        .map_err(|err| invalid(format!("`{raw}` is not a valid absolute URL: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "`{raw}` must use http or https, found `{}`",
            url.scheme()
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid(format!("`{raw}` has no host")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    const BASE_URL: &str = "https://my-openai-canada.openai.azure.com";

    fn azure() -> AzureConfig {
        AzureConfig::new("canada-gpt4", BASE_URL, "my-api-key").expect("valid config")
    }

    #[test]
    fn azure_serializes_wire_shape() {
        let value = serde_json::to_value(azure()).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "canada-gpt4",
                "base_url": BASE_URL,
                "api_key": "my-api-key",
                "api_version": "2023-12-01-preview",
                "api_type": "azure"
            })
        );
    }

    #[test]
    fn openai_serializes_wire_shape() {
        let config = OpenAiConfig::new("gpt-4-1106-preview", "my-api-key").unwrap();
        assert_eq!(
            serde_json::to_value(BackendConfig::from(config)).unwrap(),
            json!({ "model": "gpt-4-1106-preview", "api_key": "my-api-key" })
        );
    }

    #[test]
    fn trailing_slash_is_rejected() {
        let err = AzureConfig::new("m", "https://host.example.com/", "key")
            .expect_err("trailing slash should error");
        assert_eq!(err.field(), Some("base_url"));
        assert!(err.to_string().contains("must not end with `/`"));

        assert!(AzureConfig::new("m", "https://host.example.com", "key").is_ok());
    }

    #[test]
    fn malformed_urls_are_rejected() {
        for url in [
            "host.example.com",
            "ftp://host.example.com",
            " https://host.example.com",
            "mailto:someone@example.com",
            "",
        ] {
            let err = AzureConfig::new("m", url, "key").expect_err(url);
            assert_eq!(err.field(), Some("base_url"), "{url}");
        }
    }

    #[test]
    fn empty_fields_are_rejected() {
        let err = AzureConfig::new(" ", BASE_URL, "key").unwrap_err();
        assert_eq!(err.field(), Some("model"));

        let err = OpenAiConfig::new("gpt-4", "").unwrap_err();
        assert_eq!(err.field(), Some("api_key"));
        assert!(err.to_string().starts_with("validation error for OpenAiConfig"));
    }

    #[test]
    fn unknown_api_version_is_rejected() {
        let err = "non-existing-api-version"
            .parse::<AzureApiVersion>()
            .unwrap_err();
        assert_eq!(err.field(), Some("api_version"));
        assert!(err.to_string().contains("validation error for AzureConfig"));

        let decoded = serde_json::from_value::<AzureConfig>(json!({
            "model": "canada-gpt4",
            "base_url": BASE_URL,
            "api_key": "my-api-key",
            "api_version": "non-existing-api-version"
        }));
        assert!(decoded.unwrap_err().to_string().contains("api_version"));
    }

    #[test]
    fn api_versions_parse_from_wire_names() {
        for version in AzureApiVersion::ALL {
            assert_eq!(version.as_str().parse::<AzureApiVersion>().unwrap(), version);
            assert_eq!(
                serde_json::to_value(version).unwrap(),
                json!(version.to_string())
            );
        }
    }

    #[test]
    fn backend_dispatches_on_api_type() {
        let azure_json = serde_json::to_string(&BackendConfig::from(
            azure().with_api_version(AzureApiVersion::V2023_09_01Preview),
        ))
        .unwrap();
        let decoded: BackendConfig = serde_json::from_str(&azure_json).unwrap();
        assert_eq!(decoded.provider(), "azure");
        let BackendConfig::Azure(config) = &decoded else {
            panic!("expected azure config");
        };
        assert_eq!(config.api_version(), AzureApiVersion::V2023_09_01Preview);

        let openai: BackendConfig =
            serde_json::from_value(json!({ "model": "gpt-4", "api_key": "k" })).unwrap();
        assert_eq!(openai.provider(), "openai");
        assert_eq!(openai.model(), "gpt-4");
        assert_eq!(openai.api_key(), "k");
    }

    #[test]
    fn backend_rejects_inconsistent_fields() {
        let missing_url = serde_json::from_value::<BackendConfig>(json!({
            "model": "m", "api_key": "k", "api_type": "azure"
        }));
        assert!(missing_url.unwrap_err().to_string().contains("base_url"));

        let stray_url = serde_json::from_value::<BackendConfig>(json!({
            "model": "m", "api_key": "k", "base_url": BASE_URL
        }));
        assert!(stray_url.unwrap_err().to_string().contains("OpenAiConfig"));

        let unknown = serde_json::from_value::<BackendConfig>(json!({
            "model": "m", "api_key": "k", "api_type": "anthropic"
        }));
        assert!(unknown.unwrap_err().to_string().contains("unknown provider"));

        let bad_url = serde_json::from_value::<BackendConfig>(json!({
            "model": "m", "api_key": "k", "api_type": "azure",
            "base_url": "https://host.example.com/"
        }));
        assert!(bad_url.unwrap_err().to_string().contains("base_url"));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let rendered = format!("{:?}", azure());
        assert!(rendered.contains("canada-gpt4"));
        assert!(!rendered.contains("my-api-key"));

        let rendered = format!("{:?}", OpenAiConfig::new("gpt-4", "secret").unwrap());
        assert!(!rendered.contains("secret"));
    }
}
