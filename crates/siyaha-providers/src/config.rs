//! User configuration and image-editor factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use siyaha_core::statistics::DEFAULT_PASS_MARK;
use siyaha_core::traits::ImageEditor;

use crate::gemini::GeminiImageEditor;
use crate::mock::MockImageEditor;

/// Configuration for the image-editing provider.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    Gemini {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        model: Option<String>,
    },
    /// Offline editor that echoes the input image back.
    Mock,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Gemini {
                api_key: _,
                base_url,
                model,
            } => f
                .debug_struct("Gemini")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("model", model)
                .finish(),
            ProviderConfig::Mock => f.write_str("Mock"),
        }
    }
}

/// Top-level siyaha configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiyahaConfig {
    /// Image-editing provider, if the photo editor is enabled.
    #[serde(default)]
    pub image_editor: Option<ProviderConfig>,
    /// Course file to use instead of the bundled one.
    #[serde(default)]
    pub course_path: Option<PathBuf>,
    /// Output directory for exported reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Percentage at or above which a result is shown as a pass.
    #[serde(default = "default_pass_mark")]
    pub pass_mark: u32,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./siyaha-reports")
}
fn default_pass_mark() -> u32 {
    DEFAULT_PASS_MARK
}

impl Default for SiyahaConfig {
    fn default() -> Self {
        Self {
            image_editor: None,
            course_path: None,
            output_dir: default_output_dir(),
            pass_mark: default_pass_mark(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted as-is and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Resolve env vars in a provider config.
fn resolve_provider_config(config: &ProviderConfig) -> ProviderConfig {
    match config {
        ProviderConfig::Gemini {
            api_key,
            base_url,
            model,
        } => ProviderConfig::Gemini {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
            model: model.as_ref().map(|m| resolve_env_vars(m)),
        },
        ProviderConfig::Mock => ProviderConfig::Mock,
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `siyaha.toml` in the current directory
/// 2. `~/.config/siyaha/config.toml`
///
/// Environment variable overrides: `SIYAHA_GEMINI_KEY`, then `API_KEY`.
pub fn load_config() -> Result<SiyahaConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<SiyahaConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("siyaha.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<SiyahaConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => SiyahaConfig::default(),
    };

    // Apply env var overrides
    let env_key = std::env::var("SIYAHA_GEMINI_KEY")
        .or_else(|_| std::env::var("API_KEY"))
        .ok()
        .filter(|k| !k.is_empty());
    if let Some(key) = env_key {
        match &mut config.image_editor {
            Some(ProviderConfig::Gemini { api_key, .. }) => *api_key = key,
            Some(ProviderConfig::Mock) => {}
            None => {
                config.image_editor = Some(ProviderConfig::Gemini {
                    api_key: key,
                    base_url: None,
                    model: None,
                });
            }
        }
    }

    config.image_editor = config.image_editor.as_ref().map(resolve_provider_config);

    anyhow::ensure!(
        config.pass_mark <= 100,
        "pass_mark must be between 0 and 100, got {}",
        config.pass_mark
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("siyaha"))
}

/// Create an image editor from its configuration.
pub fn create_image_editor(config: &ProviderConfig) -> Result<Box<dyn ImageEditor>> {
    match config {
        ProviderConfig::Gemini {
            api_key,
            base_url,
            model,
        } => {
            anyhow::ensure!(
                !api_key.is_empty(),
                "gemini API key is empty; set SIYAHA_GEMINI_KEY or api_key in siyaha.toml"
            );
            Ok(Box::new(GeminiImageEditor::new(
                api_key,
                base_url.clone(),
                model.clone(),
            )?))
        }
        ProviderConfig::Mock => Ok(Box::new(MockImageEditor::echo())),
    }
}
