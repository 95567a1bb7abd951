//! Base64 helpers for image payloads.

use std::path::Path;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use siyaha_core::traits::{mime_type_for_extension, DEFAULT_MIME_TYPE};

use crate::error::ProviderError;

/// Decode base64 image data, rejecting anything that is not valid base64.
pub fn decode_image(data: &str) -> Result<Vec<u8>, ProviderError> {
    let trimmed = data.trim();
    if trimmed.is_empty() {
        return Err(ProviderError::InvalidImage("image data is empty".into()));
    }
    STANDARD
        .decode(trimmed)
        .map_err(|e| ProviderError::InvalidImage(e.to_string()))
}

pub fn encode_image(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Read an image file and return its base64 data and mime type.
///
/// The mime type is guessed from the extension, falling back to JPEG.
pub fn read_image_file(path: &Path) -> Result<(String, &'static str)> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read image: {}", path.display()))?;
    anyhow::ensure!(!bytes.is_empty(), "image file is empty: {}", path.display());

    let mime_type = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(mime_type_for_extension)
        .unwrap_or(DEFAULT_MIME_TYPE);

    Ok((encode_image(&bytes), mime_type))
}

/// Decode base64 image data and write it to `path`.
pub fn write_image_file(data: &str, path: &Path) -> Result<()> {
    let bytes = decode_image(data)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)
        .with_context(|| format!("failed to write image to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_valid_and_invalid() {
        assert_eq!(decode_image("QUJD").unwrap(), b"ABC");
        assert!(matches!(
            decode_image("not base64!!"),
            Err(ProviderError::InvalidImage(_))
        ));
        assert!(decode_image("   ").is_err());
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("photo.PNG");
        std::fs::write(&src, [0x89, b'P', b'N', b'G']).unwrap();

        let (data, mime) = read_image_file(&src).unwrap();
        assert_eq!(mime, "image/png");

        let out = dir.path().join("out").join("edited.png");
        write_image_file(&data, &out).unwrap();
        assert_eq!(std::fs::read(&out).unwrap(), vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn unknown_extension_falls_back_to_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("photo.bin");
        std::fs::write(&src, [1, 2, 3]).unwrap();
        let (_, mime) = read_image_file(&src).unwrap();
        assert_eq!(mime, "image/jpeg");
    }
}
