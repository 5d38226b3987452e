//! CLI command implementations.

pub mod batch;
pub mod convert;
pub mod inspect;

use std::path::Path;

use anyhow::{Context, Result};
use retrofit_core::Props;
use retrofit_targets::RetrofitConfig;

/// Load configuration, falling back to defaults when the file is missing.
fn load_config(path: &Path) -> Result<RetrofitConfig> {
    RetrofitConfig::load(path).context("Invalid configuration")
}

/// Parse `--props`, which must be a JSON object.
fn parse_props(props: Option<&str>) -> Result<Props> {
    let Some(props) = props else {
        return Ok(Props::new());
    };
    match serde_json::from_str(props).context("Failed to parse props")? {
        serde_json::Value::Object(map) => Ok(map),
        other => anyhow::bail!("Props must be a JSON object, got {}", other),
    }
}
