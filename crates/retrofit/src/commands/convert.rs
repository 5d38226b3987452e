//! Single component conversion.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use retrofit_core::Props;
use retrofit_targets::{RetrofitConfig, Target};

/// Run the convert command.
pub fn run(
    config_path: &Path,
    file: &Path,
    target: Target,
    props: Option<&str>,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = super::load_config(config_path)?;
    let props = super::parse_props(props)?;
    let code = convert_file(&config, file, target, &props)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(&path, code).with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {} output to {}", target, path.display());
        }
        None => {
            std::io::stdout()
                .write_all(code.as_bytes())
                .context("Failed to write output")?;
        }
    }
    Ok(())
}

/// Convert the component in `file` for `target`.
pub fn convert_file(
    config: &RetrofitConfig,
    file: &Path,
    target: Target,
    props: &Props,
) -> Result<String> {
    let source =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let converter = config.converter(source)?;
    let plugin = target.plugin();
    let template = converter
        .try_convert_template(plugin.as_ref())
        .with_context(|| format!("Failed to convert {} to {}", file.display(), target))?;

    Ok(template.render(props))
}
