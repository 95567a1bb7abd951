//! Mock provider for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use siyaha_core::traits::{ImageEditRequest, ImageEditResponse, ImageEditor};

/// An image editor that returns a canned response without any network calls.
pub struct MockImageEditor {
    response: ImageEditResponse,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last request received.
    last_request: Mutex<Option<ImageEditRequest>>,
}

impl MockImageEditor {
    /// A mock that returns the input image unchanged, with the request's MIME type.
    pub fn echo() -> Self {
        Self::with_response(ImageEditResponse::Image {
            mime_type: String::new(),
            data: String::new(),
        })
    }

    /// A mock that always returns the given response.
    pub fn with_response(response: ImageEditResponse) -> Self {
        Self {
            response,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Get the number of calls made to this editor.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this editor.
    pub fn last_request(&self) -> Option<ImageEditRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl ImageEditor for MockImageEditor {
    fn name(&self) -> &str {
        "mock"
    }

    async fn edit(&self, request: &ImageEditRequest) -> anyhow::Result<ImageEditResponse> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self
            .last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(request.clone());

        // An empty image payload means "echo the input back".
        let response = match &self.response {
            ImageEditResponse::Image { mime_type, data } if data.is_empty() => {
                let mime_type = if mime_type.is_empty() {
                    request.mime_type.clone()
                } else {
                    mime_type.clone()
                };
                ImageEditResponse::Image {
                    mime_type,
                    data: request.image_base64.clone(),
                }
            }
            other => other.clone(),
        };
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echo_returns_input() {
        let editor = MockImageEditor::echo();
        let request = ImageEditRequest::new("QUJD", "لا تغيير", Some("image/png"));

        let response = editor.edit(&request).await.unwrap();
        assert_eq!(
            response.data_url().as_deref(),
            Some("data:image/png;base64,QUJD")
        );
        assert_eq!(editor.call_count(), 1);
        assert_eq!(editor.last_request().unwrap().prompt, "لا تغيير");
    }

    #[tokio::test]
    async fn echo_keeps_request_mime_type() {
        let editor = MockImageEditor::echo();
        let request = ImageEditRequest::new("/9j/", "x", Some("image/jpeg"));

        let response = editor.edit(&request).await.unwrap();
        assert_eq!(
            response,
            ImageEditResponse::Image {
                mime_type: "image/jpeg".into(),
                data: "/9j/".into(),
            }
        );
    }

    #[tokio::test]
    async fn fixed_error_response() {
        let editor = MockImageEditor::with_response(ImageEditResponse::Error {
            message: "blocked".into(),
        });
        let request = ImageEditRequest::new("QUJD", "x", None);

        let response = editor.edit(&request).await.unwrap();
        assert_eq!(response.error_message(), Some("blocked"));
        editor.edit(&request).await.unwrap();
        assert_eq!(editor.call_count(), 2);
    }
}
