//! HTTP predict backend.
//!
//! Posts the image as `multipart/form-data` (reqwest sets the header and
//! boundary) with a single file part. No authentication.

use super::{parse_response, PredictBackend};
use crate::config::{BackendConfig, LimitsConfig};
use crate::error::CaptionError;
use crate::selection::SelectedImage;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::{Duration, Instant};

/// Predict backend reached over HTTP.
pub struct HttpPredictBackend {
    endpoint: String,
    field_name: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpPredictBackend {
    pub fn new(backend: &BackendConfig, limits: &LimitsConfig) -> Self {
        Self {
            endpoint: backend.endpoint.clone(),
            field_name: backend.field_name.clone(),
            timeout: Duration::from_millis(limits.request_timeout_ms),
            client: reqwest::Client::new(),
        }
    }

    /// Origin of the endpoint (scheme, host, port), used for the health probe.
    fn origin(&self) -> Option<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.endpoint).ok()?;
        url.set_path("/");
        url.set_query(None);
        Some(url)
    }
}

#[async_trait]
impl PredictBackend for HttpPredictBackend {
    fn name(&self) -> &str {
        "http"
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Any HTTP answer from the origin counts, even a 404: the server is up.
    async fn is_available(&self) -> bool {
        let Some(url) = self.origin() else {
            return false;
        };
        self.client
            .get(url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .is_ok()
    }

    async fn predict(&self, image: &SelectedImage) -> Result<String, CaptionError> {
        let start = Instant::now();

        let part = Part::bytes(image.bytes().to_vec())
            .file_name(image.file_name().to_string())
            .mime_str(image.mime_type())
            .map_err(|e| CaptionError::Transport {
                message: format!("Invalid MIME type {}: {e}", image.mime_type()),
            })?;
        let form = Form::new().part(self.field_name.clone(), part);

        tracing::debug!(
            "POST {} ({} bytes, {})",
            self.endpoint,
            image.len(),
            image.mime_type()
        );

        let resp = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| CaptionError::Transport {
                message: if e.is_timeout() {
                    format!("timed out after {}ms", self.timeout.as_millis())
                } else {
                    e.to_string()
                },
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| CaptionError::Transport {
            message: format!("Failed to read response body: {e}"),
        })?;

        let caption = parse_response(status.as_u16(), &body)?;
        tracing::debug!(
            "Predict answered HTTP {} in {}ms",
            status.as_u16(),
            start.elapsed().as_millis()
        );
        Ok(caption)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::selection::tests::png_bytes;
    use axum::extract::Multipart;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    /// Serve `router` on an ephemeral port and return its `/predict` URL.
    pub(crate) async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/predict")
    }

    /// Answers with a caption describing the `image` part it received.
    async fn describe_part(mut multipart: Multipart) -> (StatusCode, Json<Value>) {
        let mut fields = Vec::new();
        let mut found = None;
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            if name == "image" {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let len = field.bytes().await.unwrap().len();
                found = Some(format!("{file_name} {content_type} {len}"));
            }
            fields.push(name);
        }
        match found {
            Some(caption) if fields.len() == 1 => {
                (StatusCode::OK, Json(json!({ "caption": caption })))
            }
            _ => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "No image uploaded" })),
            ),
        }
    }

    fn backend(endpoint: &str, field_name: &str, timeout_ms: u64) -> HttpPredictBackend {
        HttpPredictBackend::new(
            &BackendConfig {
                endpoint: endpoint.to_string(),
                field_name: field_name.to_string(),
            },
            &LimitsConfig {
                request_timeout_ms: timeout_ms,
                ..LimitsConfig::default()
            },
        )
    }

    fn image() -> SelectedImage {
        SelectedImage::from_bytes("beach.png", png_bytes(16, 16)).unwrap()
    }

    #[tokio::test]
    async fn test_predict_sends_single_image_part() {
        let endpoint =
            spawn_backend(Router::new().route("/predict", post(describe_part))).await;
        let image = image();

        let caption = backend(&endpoint, "image", 5000)
            .predict(&image)
            .await
            .unwrap();
        assert_eq!(caption, format!("beach.png image/png {}", image.len()));
    }

    #[tokio::test]
    async fn test_predict_surfaces_backend_error() {
        let endpoint =
            spawn_backend(Router::new().route("/predict", post(describe_part))).await;

        // Wrong field name: the backend reports no image
        let err = backend(&endpoint, "file", 5000)
            .predict(&image())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CaptionError::Server {
                status: 400,
                detail: "No image uploaded".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_predict_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = backend(&format!("http://{addr}/predict"), "image", 5000)
            .predict(&image())
            .await
            .unwrap_err();
        assert!(matches!(err, CaptionError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_predict_timeout_is_transport_failure() {
        let router = Router::new().route(
            "/predict",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({ "caption": "too late" }))
            }),
        );
        let endpoint = spawn_backend(router).await;

        let err = backend(&endpoint, "image", 100)
            .predict(&image())
            .await
            .unwrap_err();
        match err {
            CaptionError::Transport { message } => assert!(message.contains("timed out")),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_is_available() {
        let endpoint =
            spawn_backend(Router::new().route("/predict", post(describe_part))).await;
        // GET / is a 404 on this router, which still means "up"
        assert!(backend(&endpoint, "image", 5000).is_available().await);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        assert!(
            !backend(&format!("http://{addr}/predict"), "image", 5000)
                .is_available()
                .await
        );
    }
}
