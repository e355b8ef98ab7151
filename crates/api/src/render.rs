//! Magazine document rendering and artifact storage.
//!
//! Publishing a magazine renders its ordered articles into a PDF through
//! an external renderer service, then stores the artifact and records its
//! public URL. Both steps sit behind traits so tests can substitute
//! in-memory fakes.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

use inkpress_core::error::CoreError;
use inkpress_db::models::magazine::Magazine;
use inkpress_db::models::magazine_content::MagazineArticle;

/// Renders a magazine issue into a PDF document.
#[async_trait]
pub trait MagazineRenderer: Send + Sync {
    /// Render the issue. Articles are pre-sorted by `order_index`.
    async fn render(
        &self,
        magazine: &Magazine,
        articles: &[MagazineArticle],
    ) -> Result<Vec<u8>, CoreError>;
}

/// Stores rendered artifacts and returns their public URL.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn store_pdf(&self, file_name: &str, bytes: &[u8]) -> Result<String, CoreError>;
}

/* --------------------------------------------------------------------------
HTTP renderer
-------------------------------------------------------------------------- */

/// Renderer backed by the external document renderer service.
///
/// Sends the issue and its articles as JSON to `POST {base_url}/render`
/// and expects the PDF bytes in the response body. Requests are bounded
/// by `timeout`; the publish path holds a row lock across the render, so
/// a stalled renderer must surface as a failure rather than hang.
pub struct HttpRenderer {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRenderer {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build renderer HTTP client");
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl MagazineRenderer for HttpRenderer {
    async fn render(
        &self,
        magazine: &Magazine,
        articles: &[MagazineArticle],
    ) -> Result<Vec<u8>, CoreError> {
        let url = format!("{}/render", self.base_url);
        let body = serde_json::json!({
            "magazine": magazine,
            "articles": articles,
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| CoreError::Render(format!("renderer unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(CoreError::Render(format!(
                "renderer returned status {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CoreError::Render(format!("failed to read renderer response: {e}")))?;

        Ok(bytes.to_vec())
    }
}

/* --------------------------------------------------------------------------
Local filesystem artifact store
-------------------------------------------------------------------------- */

/// Artifact store writing PDFs to a local directory served as static files.
pub struct LocalArtifactStore {
    output_dir: PathBuf,
    public_base_url: String,
}

impl LocalArtifactStore {
    pub fn new(output_dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            public_base_url: public_base_url.into(),
        }
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn store_pdf(&self, file_name: &str, bytes: &[u8]) -> Result<String, CoreError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| CoreError::Internal(format!("failed to create output dir: {e}")))?;

        let path = self.output_dir.join(file_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| CoreError::Internal(format!("failed to write artifact: {e}")))?;

        Ok(format!(
            "{}/{file_name}",
            self.public_base_url.trim_end_matches('/')
        ))
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use inkpress_core::magazine::MAGAZINE_STATUS_DRAFT;

    fn draft_issue() -> Magazine {
        Magazine {
            id: 1,
            title: "Spring Issue".into(),
            description: None,
            issue_number: 1,
            volume_number: 1,
            publication_date: None,
            organization_id: None,
            status: MAGAZINE_STATUS_DRAFT.into(),
            pdf_url: None,
            created_by: 1,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn unreachable_renderer_fails_with_render_error() {
        // Nothing listens on this port.
        let renderer = HttpRenderer::new("http://127.0.0.1:1", Duration::from_millis(500));
        let err = renderer.render(&draft_issue(), &[]).await.unwrap_err();
        assert!(matches!(err, CoreError::Render(_)));
    }

    #[tokio::test]
    async fn stalled_renderer_times_out_with_render_error() {
        // A server that accepts connections but never responds.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            loop {
                if let Ok((socket, _)) = listener.accept().await {
                    held.push(socket);
                }
            }
        });

        let renderer = HttpRenderer::new(format!("http://{addr}"), Duration::from_millis(200));
        let err = renderer.render(&draft_issue(), &[]).await.unwrap_err();
        assert!(matches!(err, CoreError::Render(_)), "got: {err:?}");
    }
}
