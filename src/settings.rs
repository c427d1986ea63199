use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

/// Behavior when a declared identifier cannot be resolved from the actual
/// call, that is when the identifying parameter has no value and no
/// default.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionPolicy {
    /// Fail the construction.
    Strict,
    /// Degrade to the group-wide key, so the call lands on the group
    /// singleton.
    Collapse,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Filter directive handed to the tracing subscriber.
    pub log_level: String,
    pub resolution: ResolutionPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            resolution: ResolutionPolicy::Strict,
        }
    }
}

impl Settings {
    /// Layered load: an optional `keepsake` config file in the working
    /// directory, overridden by `KEEPSAKE_*` environment variables.
    pub fn load() -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name("keepsake").required(false))
            .add_source(Environment::with_prefix("KEEPSAKE"))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
