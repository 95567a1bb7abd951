//! Google Gemini image-editing provider.

use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use siyaha_core::traits::{
    ImageEditRequest, ImageEditResponse, ImageEditor, FALLBACK_RESULT_MIME_TYPE, NO_IMAGE_MESSAGE,
};

use crate::error::ProviderError;
use crate::image::decode_image;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Gemini `generateContent` image-editing provider.
pub struct GeminiImageEditor {
    api_key: String,
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiImageEditor {
    pub fn new(
        api_key: &str,
        base_url: Option<String>,
        model: Option<String>,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Serialize, Deserialize, Default)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<GeminiInlineData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    #[serde(default)]
    mime_type: Option<String>,
    #[serde(default)]
    data: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: GeminiContent,
}

#[derive(Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Pick the first inline image part of the first candidate.
fn extract_image(response: GeminiResponse) -> ImageEditResponse {
    let image = response
        .candidates
        .into_iter()
        .next()
        .into_iter()
        .flat_map(|c| c.content.parts)
        .filter_map(|p| p.inline_data)
        .find(|d| !d.data.is_empty());

    match image {
        Some(inline) => ImageEditResponse::Image {
            mime_type: inline
                .mime_type
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| FALLBACK_RESULT_MIME_TYPE.to_string()),
            data: inline.data,
        },
        None => ImageEditResponse::Error {
            message: NO_IMAGE_MESSAGE.to_string(),
        },
    }
}

#[async_trait]
impl ImageEditor for GeminiImageEditor {
    fn name(&self) -> &str {
        "gemini"
    }

    #[instrument(skip(self, request), fields(model = %self.model, mime_type = %request.mime_type))]
    async fn edit(&self, request: &ImageEditRequest) -> anyhow::Result<ImageEditResponse> {
        let start = Instant::now();

        decode_image(&request.image_base64)?;
        anyhow::ensure!(!request.prompt.trim().is_empty(), "edit prompt is empty");

        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![
                    GeminiPart {
                        inline_data: Some(GeminiInlineData {
                            mime_type: Some(request.mime_type.clone()),
                            data: request.image_base64.clone(),
                        }),
                        text: None,
                    },
                    GeminiPart {
                        inline_data: None,
                        text: Some(request.prompt.clone()),
                    },
                ],
            }],
        };

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else {
                    ProviderError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(5)
                * 1000;
            return Err(ProviderError::RateLimited {
                retry_after_ms: retry_after,
            }
            .into());
        }
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::AuthenticationFailed(body).into());
        }
        if status == 404 {
            return Err(ProviderError::ModelNotFound(self.model.clone()).into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ProviderError::ApiError { status, message }.into());
        }

        let api_response: GeminiResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status: 0,
                message: format!("failed to parse response: {e}"),
            })?;

        let result = extract_image(api_response);
        if let ImageEditResponse::Image { data, .. } = &result {
            decode_image(data)?;
        }

        tracing::debug!(
            latency_ms = start.elapsed().as_millis() as u64,
            has_image = result.data_url().is_some(),
            "image edit finished"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ENDPOINT: &str = "/v1beta/models/gemini-2.5-flash-image:generateContent";

    fn request() -> ImageEditRequest {
        ImageEditRequest::new("data:image/jpeg;base64,QUJD", "اجعل السماء زرقاء", None)
    }

    #[tokio::test]
    async fn successful_edit() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "Here is your image"},
                        {"inlineData": {"mimeType": "image/png", "data": "REVG"}}
                    ]
                }
            }]
        });

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{
                    "parts": [
                        {"inlineData": {"mimeType": "image/jpeg", "data": "QUJD"}},
                        {"text": "اجعل السماء زرقاء"}
                    ]
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let editor = GeminiImageEditor::new("test-key", Some(server.uri()), None).unwrap();
        let response = editor.edit(&request()).await.unwrap();

        assert_eq!(
            response,
            ImageEditResponse::Image {
                mime_type: "image/png".into(),
                data: "REVG".into()
            }
        );
        assert_eq!(
            response.data_url().as_deref(),
            Some("data:image/png;base64,REVG")
        );
    }

    #[tokio::test]
    async fn missing_mime_type_defaults_to_png() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": [{"inlineData": {"data": "REVG"}}]}}]
            })))
            .mount(&server)
            .await;

        let editor = GeminiImageEditor::new("k", Some(server.uri()), None).unwrap();
        let response = editor.edit(&request()).await.unwrap();
        assert!(matches!(
            response,
            ImageEditResponse::Image { ref mime_type, .. } if mime_type == "image/png"
        ));
    }

    #[tokio::test]
    async fn text_only_reply_is_an_error_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "I cannot edit this"}]}}]
            })))
            .mount(&server)
            .await;

        let editor = GeminiImageEditor::new("k", Some(server.uri()), None).unwrap();
        let response = editor.edit(&request()).await.unwrap();
        assert_eq!(response.error_message(), Some(NO_IMAGE_MESSAGE));
    }

    #[tokio::test]
    async fn no_candidates_is_an_error_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let editor = GeminiImageEditor::new("k", Some(server.uri()), None).unwrap();
        let response = editor.edit(&request()).await.unwrap();
        assert!(response.data_url().is_none());
    }

    #[tokio::test]
    async fn authentication_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let editor = GeminiImageEditor::new("bad-key", Some(server.uri()), None).unwrap();
        let err = editor.edit(&request()).await.unwrap_err();
        assert!(err.to_string().contains("authentication"));
    }

    #[tokio::test]
    async fn api_error_message_is_extracted() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {"code": 400, "message": "Unsupported MIME type", "status": "INVALID_ARGUMENT"}
            })))
            .mount(&server)
            .await;

        let editor = GeminiImageEditor::new("k", Some(server.uri()), None).unwrap();
        let err = editor.edit(&request()).await.unwrap_err();
        let provider_err = err.downcast_ref::<ProviderError>().unwrap();
        assert!(matches!(
            provider_err,
            ProviderError::ApiError { status: 400, message } if message == "Unsupported MIME type"
        ));
    }

    #[tokio::test]
    async fn rate_limiting() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
            .mount(&server)
            .await;

        let editor = GeminiImageEditor::new("k", Some(server.uri()), None).unwrap();
        let err = editor.edit(&request()).await.unwrap_err();
        assert!(err.to_string().contains("retry after 7000ms"));
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_before_sending() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let editor = GeminiImageEditor::new("k", Some(server.uri()), None).unwrap();
        let bad = ImageEditRequest::new("%%%", "prompt", None);
        let err = editor.edit(&bad).await.unwrap_err();
        assert!(err.to_string().contains("invalid image data"));
    }
}
