//! siyaha-providers: generative image-editing integrations.
//!
//! Implements the `ImageEditor` trait for Google Gemini and a mock backend,
//! and owns the user configuration file.

pub mod config;
pub mod error;
pub mod gemini;
pub mod image;
pub mod mock;

pub use config::{create_image_editor, load_config, ProviderConfig, SiyahaConfig};
pub use error::ProviderError;
