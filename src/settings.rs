use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::types::{TypeTagStyle, DEFAULT_CONTEXT_TYPE};

pub const DEFAULT_MEMORY_LIMIT_MB: i64 = 128;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub type_tag_style: TypeTagStyle,
    #[serde(default = "default_context_type")]
    pub context_type: String,

    // local invocation
    pub local_event: Option<PathBuf>,
    pub local_request_id: Option<String>,
    #[serde(default = "default_memory_limit_mb")]
    pub memory_limit_mb: i64,
}

fn default_context_type() -> String {
    DEFAULT_CONTEXT_TYPE.to_string()
}

fn default_memory_limit_mb() -> i64 {
    DEFAULT_MEMORY_LIMIT_MB
}

impl Settings {
    /// Reads `introspection.json` when present, then `INTROSPECTION_*` variables.
    pub fn new() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("introspection").required(false))
            .add_source(Environment::with_prefix("INTROSPECTION").try_parsing(true));
        Self::from_builder(builder)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}
