//! The `siyaha edit-image` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use siyaha_core::traits::{extension_for_mime_type, ImageEditRequest, ImageEditResponse};
use siyaha_providers::create_image_editor;
use siyaha_providers::image::{read_image_file, write_image_file};

use super::Context;

pub async fn execute(
    ctx: &Context,
    image: PathBuf,
    prompt: String,
    out: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(!prompt.trim().is_empty(), "prompt must not be empty");

    let config = ctx.config()?;
    let provider = config.image_editor.as_ref().ok_or_else(|| {
        anyhow::anyhow!(
            "no image editor configured. Set SIYAHA_GEMINI_KEY or run `siyaha init` and edit siyaha.toml"
        )
    })?;
    let editor = create_image_editor(provider)?;

    let (data, mime_type) = read_image_file(&image)?;
    let request = ImageEditRequest::new(&data, &prompt, Some(mime_type));

    eprintln!("Editing {} with {}...", image.display(), editor.name());
    match editor.edit(&request).await? {
        ImageEditResponse::Image { mime_type, data } => {
            let path = out.unwrap_or_else(|| default_output(&image, &mime_type));
            write_image_file(&data, &path)?;
            println!("Edited image: {}", path.display());
            Ok(())
        }
        ImageEditResponse::Error { message } => anyhow::bail!(message),
    }
}

/// `photo.jpg` edited to PNG becomes `photo_edited.png`.
fn default_output(image: &Path, mime_type: &str) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    image.with_file_name(format!(
        "{stem}_edited.{}",
        extension_for_mime_type(mime_type)
    ))
}
