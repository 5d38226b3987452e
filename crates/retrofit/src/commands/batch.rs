//! Directory conversion.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use retrofit_core::Props;
use retrofit_targets::{RetrofitConfig, Target};
use walkdir::WalkDir;

use super::convert::convert_file;

/// Outcome of a batch run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub failed: usize,
}

/// Run the batch command.
pub fn run(config_path: &Path, dir: &Path, target: Target, out_dir: &Path) -> Result<()> {
    let config = super::load_config(config_path)?;
    let summary = convert_dir(&config, dir, target, out_dir)?;

    tracing::info!(
        "Converted {} components to {} ({} failed)",
        summary.converted,
        target,
        summary.failed
    );
    tracing::info!("Output: {}", out_dir.display());
    Ok(())
}

/// Convert every component under `dir`, mirroring the layout in `out_dir`.
pub fn convert_dir(
    config: &RetrofitConfig,
    dir: &Path,
    target: Target,
    out_dir: &Path,
) -> Result<BatchSummary> {
    if !dir.is_dir() {
        anyhow::bail!("Directory not found: {}", dir.display());
    }
    let files = component_files(dir);
    tracing::debug!("Found {} component files in {}", files.len(), dir.display());

    let props = Props::new();
    let results: Vec<Result<()>> = files
        .par_iter()
        .map(|file| {
            let code = convert_file(config, file, target, &props)?;
            let output = output_path(dir, file, target, out_dir);
            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(&output, code)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::debug!("{} -> {}", file.display(), output.display());
            Ok(())
        })
        .collect();

    let mut summary = BatchSummary::default();
    for result in results {
        match result {
            Ok(()) => summary.converted += 1,
            Err(e) => {
                tracing::warn!("{:#}", e);
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}

/// `.jsx` and `.tsx` files, skipping tests and stories.
fn component_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| {
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if ext != "tsx" && ext != "jsx" {
                return false;
            }
            let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            !(filename.contains(".test.")
                || filename.contains(".spec.")
                || filename.contains(".stories."))
        })
        .collect();
    files.sort();
    files
}

fn output_path(dir: &Path, file: &Path, target: Target, out_dir: &Path) -> PathBuf {
    let relative = file.strip_prefix(dir).unwrap_or(file);
    let output = out_dir.join(relative);

    match target.extension() {
        Some(extension) => output.with_extension(extension),
        None => output,
    }
}
