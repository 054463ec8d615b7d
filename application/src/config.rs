//! [`Config`]-related definitions.

use std::{num::NonZeroU32, path::PathBuf, time};

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Restaurant API configuration.
    pub api: Api,

    /// Service configuration.
    pub service: Service,

    /// Shell configuration.
    pub shell: Shell,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Restaurant API configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Api {
    /// Base URL every API path is appended to.
    #[default("http://localhost:5000/api/v1".to_owned())]
    pub base_url: String,

    /// Timeout of a single API request.
    #[default(time::Duration::from_secs(30))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl From<Api> for service::infra::http::Config {
    fn from(value: Api) -> Self {
        let Api { base_url, timeout } = value;
        Self { base_url, timeout }
    }
}

/// Service configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Service {
    /// Page sizes of the paginated views.
    pub page_sizes: PageSizes,
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service {
            page_sizes:
                PageSizes {
                    menu,
                    foods,
                    orders,
                    feedback,
                },
        } = value;
        Self {
            page_sizes: service::PageSizes {
                menu: menu.into(),
                foods: foods.into(),
                orders: orders.into(),
                feedback: feedback.into(),
            },
        }
    }
}

/// Page sizes of the paginated views.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct PageSizes {
    /// Menu grid page size.
    #[default(service::PageSizes::DEFAULT.menu.into())]
    pub menu: NonZeroU32,

    /// Admin food grid page size.
    #[default(service::PageSizes::DEFAULT.foods.into())]
    pub foods: NonZeroU32,

    /// Order registry page size.
    #[default(service::PageSizes::DEFAULT.orders.into())]
    pub orders: NonZeroU32,

    /// Feedback wall page size.
    #[default(service::PageSizes::DEFAULT.feedback.into())]
    pub feedback: NonZeroU32,
}

/// Shell configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Shell {
    /// File the entered lines are persisted to between runs.
    ///
    /// History is kept in memory only if not set.
    #[default(Some(".golden-spoon-history".into()))]
    pub history: Option<PathBuf>,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    Info,

    /// Designates hazardous situations.
    #[default]
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time;

    use super::Config;

    #[test]
    fn defaults_without_file() {
        let conf = Config::new("definitely-missing.toml").unwrap();

        assert_eq!(conf.api.base_url, "http://localhost:5000/api/v1");
        assert_eq!(conf.api.timeout, time::Duration::from_secs(30));

        let service: service::Config = conf.service.into();
        assert_eq!(service.page_sizes.menu.get(), 12);
        assert_eq!(service.page_sizes.foods.get(), 4);
        assert_eq!(service.page_sizes.orders.get(), 3);
        assert_eq!(service.page_sizes.feedback.get(), 6);
    }
}
