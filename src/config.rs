//! 运行配置：YAML 文件与环境变量覆盖。
//!
//! Engine configuration.
//!
//! Values come from defaults, then an optional YAML file, then environment
//! overrides:
//!
//! - `AI_TRANSLATE_STRICT` (`1`/`true`/`yes`/`on` or `0`/`false`/`no`/`off`)
//! - `AI_TRANSLATE_SINK` (`tracing` or `noop`)
//! - `AI_TRANSLATE_LOG` (an `EnvFilter` directive, e.g. `debug`)
//!
//! Malformed environment values are ignored with a warning.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{Error, ErrorContext};
use crate::telemetry::{noop_sink, tracing_sink, TranslationSink};
use crate::Result;

pub const ENV_STRICT: &str = "AI_TRANSLATE_STRICT";
pub const ENV_SINK: &str = "AI_TRANSLATE_SINK";
pub const ENV_LOG: &str = "AI_TRANSLATE_LOG";

/// Which event sink the orchestrator reports to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Tracing,
    Noop,
}

impl SinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SinkKind::Tracing => "tracing",
            SinkKind::Noop => "noop",
        }
    }

    pub fn build(&self) -> Arc<dyn TranslationSink> {
        match self {
            SinkKind::Tracing => tracing_sink(),
            SinkKind::Noop => noop_sink(),
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SinkKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tracing" => Ok(SinkKind::Tracing),
            "noop" | "none" => Ok(SinkKind::Noop),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranslateConfig {
    /// Applied by [`TranslationOrchestrator::from_config`](crate::TranslationOrchestrator::from_config)
    /// on top of each call's [`TranslationOptions::strict`](crate::TranslationOptions::strict).
    pub strict: bool,
    /// Emit `MultiTurnDetected` events in addition to `Translated`.
    pub emit_multi_turn_events: bool,
    pub sink: SinkKind,
    /// Fallback log filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            strict: false,
            emit_multi_turn_events: true,
            sink: SinkKind::Tracing,
            log_filter: "info".to_string(),
        }
    }
}

impl TranslateConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| {
            Error::configuration_with_context(
                format!("Failed to parse translator config: {}", e),
                ErrorContext::new().with_source("config_loader"),
            )
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration_with_context(
                format!("Failed to read config file: {}", e),
                ErrorContext::new()
                    .with_field_path(path.display().to_string())
                    .with_source("config_loader"),
            )
        })?;
        Self::from_yaml_str(&content)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup` instead of the process environment.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_STRICT) {
            match parse_flag(&raw) {
                Some(strict) => self.strict = strict,
                None => tracing::warn!(var = ENV_STRICT, value = %raw, "ignoring malformed boolean"),
            }
        }
        if let Some(raw) = lookup(ENV_SINK) {
            match raw.parse::<SinkKind>() {
                Ok(sink) => self.sink = sink,
                Err(_) => tracing::warn!(var = ENV_SINK, value = %raw, "ignoring unknown sink kind"),
            }
        }
        if let Some(filter) = lookup(ENV_LOG).filter(|s| !s.trim().is_empty()) {
            self.log_filter = filter;
        }
        self
    }

    pub fn build_sink(&self) -> Arc<dyn TranslationSink> {
        self.sink.build()
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
