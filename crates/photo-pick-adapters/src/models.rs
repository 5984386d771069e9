//! Model downloading and caching adapter.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

/// Placeholder checksum indicating verification should be skipped.
const PLACEHOLDER_CHECKSUM: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// Model metadata.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    /// Model name/identifier.
    pub name: &'static str,
    /// Download URL (GitHub releases).
    pub url: &'static str,
    /// Expected SHA256 hash. Set to all zeros to skip verification during development.
    pub sha256: &'static str,
    /// Filename in the models directory.
    pub filename: &'static str,
}

/// Known models.
pub const MODELS: &[ModelInfo] = &[ModelInfo {
    name: "convnext",
    url: "https://github.com/photo-pick/photo-pick/releases/download/models-v1/convnext_tiny.safetensors",
    sha256: "0000000000000000000000000000000000000000000000000000000000000000", // TODO: Update with real hash
    filename: "convnext_tiny.safetensors",
}];

/// Returns the default models directory.
///
/// Uses `XDG_DATA_HOME/photo-pick/models` or `~/.local/share/photo-pick/models`.
/// Configuration may point somewhere else entirely.
#[must_use]
pub fn default_models_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("photo-pick")
        .join("models")
}

/// Ensures all required models are present in `dir`, downloading missing
/// ones.
///
/// # Errors
///
/// Returns an error if:
/// - The models directory cannot be created
/// - A model download fails
/// - A model's checksum doesn't match
pub fn ensure_models(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).context("failed to create models directory")?;

    for model in MODELS {
        let path = dir.join(model.filename);
        if path.exists() {
            debug!("model {} already exists", model.name);
        } else {
            download_model(model, &path)?;
        }
    }

    Ok(())
}

/// Downloads a model from its URL.
fn download_model(model: &ModelInfo, path: &Path) -> Result<()> {
    info!("downloading model: {}", model.name);

    let response = reqwest::blocking::get(model.url)
        .with_context(|| format!("failed to download {}", model.name))?;

    if !response.status().is_success() {
        anyhow::bail!("download failed with status: {}", response.status());
    }

    let bytes = response
        .bytes()
        .with_context(|| format!("failed to read response for {}", model.name))?;

    if model.sha256 == PLACEHOLDER_CHECKSUM {
        debug!(
            "skipping checksum verification for {} (placeholder checksum)",
            model.name
        );
    } else {
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let hash = format!("{:x}", hasher.finalize());

        if hash != model.sha256 {
            anyhow::bail!(
                "checksum mismatch for {}: expected {}, got {}. \
                 Try deleting {} and re-running to download a fresh copy.",
                model.name,
                model.sha256,
                hash,
                path.display()
            );
        }
    }

    fs::write(path, &bytes).with_context(|| format!("failed to write {}", model.name))?;

    info!("downloaded {} ({} bytes)", model.name, bytes.len());
    Ok(())
}

/// Returns the path to a specific model file in `dir`.
#[must_use]
pub fn model_path(dir: &Path, name: &str) -> Option<PathBuf> {
    MODELS
        .iter()
        .find(|m| m.name == name)
        .map(|m| dir.join(m.filename))
}

/// Checks if all models are present in `dir`.
#[must_use]
pub fn all_models_installed(dir: &Path) -> bool {
    MODELS.iter().all(|m| dir.join(m.filename).exists())
}

/// Lists known models with their installed status.
#[must_use]
pub fn list_models(dir: &Path) -> Vec<(String, bool)> {
    MODELS
        .iter()
        .map(|m| (m.name.to_string(), dir.join(m.filename).exists()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_models_dir() {
        let dir = default_models_dir();
        assert!(dir.ends_with("photo-pick/models"));
    }

    #[test]
    fn test_model_path() {
        let dir = PathBuf::from("/tmp/models");
        let path = model_path(&dir, "convnext");
        assert!(path.is_some());
        let path = path.unwrap_or_else(|| panic!("should have path"));
        assert!(path.ends_with("convnext_tiny.safetensors"));
    }

    #[test]
    fn test_model_path_unknown() {
        let dir = PathBuf::from("/tmp/models");
        assert!(model_path(&dir, "unknown").is_none());
    }

    #[test]
    fn test_all_models_installed_empty_dir() {
        assert!(!all_models_installed(Path::new("/nonexistent/models")));
    }
}
