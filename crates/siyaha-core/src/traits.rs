//! Trait definitions for generative image-editing backends.
//!
//! Implemented by the `siyaha-providers` crate. The quiz engine never touches
//! these; the photo editor is a separate, optional feature.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default mime type assumed for uploaded photos.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// Mime type assumed when a provider returns an image without one.
pub const FALLBACK_RESULT_MIME_TYPE: &str = "image/png";

/// Message returned when a provider answers with text only.
pub const NO_IMAGE_MESSAGE: &str = "No image generated. The model might have returned only text.";

/// Trait for backends that edit a photo according to a text prompt.
#[async_trait]
pub trait ImageEditor: Send + Sync {
    /// Human-readable provider name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Send one edit request.
    ///
    /// Transport and API failures are returned as `Err`; a well-formed reply
    /// that contains no image is `Ok(ImageEditResponse::Error { .. })`.
    async fn edit(&self, request: &ImageEditRequest) -> anyhow::Result<ImageEditResponse>;
}

/// Request to edit a photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageEditRequest {
    /// Raw base64 image data, without a `data:` URI header.
    pub image_base64: String,
    /// What to do with the image.
    pub prompt: String,
    pub mime_type: String,
}

impl ImageEditRequest {
    /// Build a request, stripping a `data:image/...;base64,` header if present.
    pub fn new(image: &str, prompt: &str, mime_type: Option<&str>) -> Self {
        Self {
            image_base64: strip_data_uri(image).to_string(),
            prompt: prompt.to_string(),
            mime_type: mime_type.unwrap_or(DEFAULT_MIME_TYPE).to_string(),
        }
    }
}

/// Reply from an image-editing backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImageEditResponse {
    /// The edited image as base64 data.
    Image { mime_type: String, data: String },
    /// The backend replied but produced no image.
    Error { message: String },
}

impl ImageEditResponse {
    /// `data:<mime>;base64,<data>` URL for an image reply.
    pub fn data_url(&self) -> Option<String> {
        match self {
            ImageEditResponse::Image { mime_type, data } => {
                Some(format!("data:{mime_type};base64,{data}"))
            }
            ImageEditResponse::Error { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ImageEditResponse::Image { .. } => None,
            ImageEditResponse::Error { message } => Some(message),
        }
    }
}

/// Strip a `data:image/(png|jpeg|jpg|webp);base64,` header from `image`.
///
/// Anything else, including other image types, is returned unchanged.
pub fn strip_data_uri(image: &str) -> &str {
    const SUBTYPES: [&str; 4] = ["png", "jpeg", "jpg", "webp"];

    let Some(rest) = image.strip_prefix("data:image/") else {
        return image;
    };
    for subtype in SUBTYPES {
        if let Some(data) = rest
            .strip_prefix(subtype)
            .and_then(|r| r.strip_prefix(";base64,"))
        {
            return data;
        }
    }
    image
}

/// Guess an image mime type from a file extension.
pub fn mime_type_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// File extension for an image mime type.
pub fn extension_for_mime_type(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_known_headers() {
        assert_eq!(strip_data_uri("data:image/png;base64,AAAA"), "AAAA");
        assert_eq!(strip_data_uri("data:image/jpeg;base64,BBBB"), "BBBB");
        assert_eq!(strip_data_uri("data:image/jpg;base64,CCCC"), "CCCC");
        assert_eq!(strip_data_uri("data:image/webp;base64,DDDD"), "DDDD");
    }

    #[test]
    fn strip_leaves_other_input_alone() {
        assert_eq!(strip_data_uri("AAAA"), "AAAA");
        assert_eq!(
            strip_data_uri("data:image/gif;base64,EEEE"),
            "data:image/gif;base64,EEEE"
        );
        assert_eq!(strip_data_uri("data:image/png,raw"), "data:image/png,raw");
    }

    #[test]
    fn request_defaults_to_jpeg() {
        let req = ImageEditRequest::new("data:image/png;base64,QUJD", "أضف غروب الشمس", None);
        assert_eq!(req.image_base64, "QUJD");
        assert_eq!(req.mime_type, "image/jpeg");
    }

    #[test]
    fn response_data_url() {
        let ok = ImageEditResponse::Image {
            mime_type: "image/png".into(),
            data: "QUJD".into(),
        };
        assert_eq!(ok.data_url().as_deref(), Some("data:image/png;base64,QUJD"));
        assert!(ok.error_message().is_none());

        let err = ImageEditResponse::Error {
            message: NO_IMAGE_MESSAGE.into(),
        };
        assert!(err.data_url().is_none());
        assert_eq!(err.error_message(), Some(NO_IMAGE_MESSAGE));
    }

    #[test]
    fn mime_extension_mapping() {
        assert_eq!(mime_type_for_extension("JPG"), Some("image/jpeg"));
        assert_eq!(mime_type_for_extension("txt"), None);
        assert_eq!(extension_for_mime_type("image/webp"), "webp");
        assert_eq!(extension_for_mime_type("application/octet-stream"), "png");
    }
}
