//! HTTP client for the remote preset-generation service.
//!
//! Endpoints:
//! - `POST /generate_preset/` - multipart `file` + `style_description`
//! - `GET <xmp_url>` / `GET <preview_url>` - artifact fetch
//! - `POST /recommend_preset/` - advisory style recommendation
//! - `GET /files/` / `DELETE /files/<name>` - previously generated files
//!
//! Non-2xx responses carry a JSON `{ "detail": ... }` body which is
//! surfaced verbatim in [`Error::Server`].

use crate::image::SelectedImage;
use crate::{Error, Result};
use prism_types::{ArtifactKind, ErrorBody, FileListing, GenerationResult, Recommendation};
use reqwest::multipart;
use std::time::Duration;
use tracing::debug;

const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for one configured service base address.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Build a client for the given base address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit an image and style description for preset generation.
    ///
    /// # Errors
    ///
    /// [`Error::Network`] on transport failure, [`Error::Server`] with the
    /// service-supplied detail on non-2xx responses.
    pub async fn generate(
        &self,
        image: &SelectedImage,
        style_description: &str,
    ) -> Result<GenerationResult> {
        let form = multipart::Form::new()
            .part("file", image_part(image)?)
            .text("style_description", style_description.to_string());

        debug!(
            "POST /generate_preset/ ({} bytes, style {:?})",
            image.size(),
            style_description
        );
        let response = self
            .http
            .post(self.endpoint("/generate_preset/"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(server_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// Fetch one generated artifact as raw bytes.
    ///
    /// # Errors
    ///
    /// [`Error::Network`] / [`Error::Server`] exactly like [`Self::generate`];
    /// the caller decides how to surface them, the result itself is never
    /// invalidated by a failed fetch.
    pub async fn fetch_artifact(
        &self,
        kind: ArtifactKind,
        result: &GenerationResult,
    ) -> Result<Vec<u8>> {
        let path = match kind {
            ArtifactKind::Xmp => &result.xmp_url,
            ArtifactKind::Preview => &result.preview_url,
        };

        debug!("GET {} ({})", path, kind.label());
        let response = self.http.get(self.endpoint(path)).send().await?;
        if !response.status().is_success() {
            return Err(server_error(response).await);
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Ask the service which catalog style suits the image.
    ///
    /// Advisory only: every failure is swallowed (logged at debug level)
    /// and the recommendation simply omitted.
    pub async fn recommend(&self, image: &SelectedImage) -> Option<Recommendation> {
        match self.try_recommend(image).await {
            Ok(recommendation) => Some(recommendation),
            Err(e) => {
                debug!("Recommendation unavailable: {}", e);
                None
            }
        }
    }

    async fn try_recommend(&self, image: &SelectedImage) -> Result<Recommendation> {
        let form = multipart::Form::new().part("file", image_part(image)?);
        let response = self
            .http
            .post(self.endpoint("/recommend_preset/"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(server_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// List previously generated files.
    ///
    /// # Errors
    ///
    /// [`Error::Network`] / [`Error::Server`] as for [`Self::generate`].
    pub async fn list_files(&self) -> Result<FileListing> {
        let response = self.http.get(self.endpoint("/files/")).send().await?;
        if !response.status().is_success() {
            return Err(server_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// Delete a previously generated file on the service.
    ///
    /// # Errors
    ///
    /// [`Error::Network`] / [`Error::Server`] as for [`Self::generate`].
    pub async fn delete_file(&self, filename: &str) -> Result<()> {
        let response = self
            .http
            .delete(self.endpoint(&format!("/files/{filename}")))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(server_error(response).await);
        }
        Ok(())
    }

    fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

fn image_part(image: &SelectedImage) -> Result<multipart::Part> {
    let part = multipart::Part::bytes(image.bytes.clone())
        .file_name(image.file_name.clone())
        .mime_str(&image.media_type)?;
    Ok(part)
}

/// Map a non-2xx response to [`Error::Server`], preferring the JSON
/// `detail` body the service sends.
async fn server_error(response: reqwest::Response) -> Error {
    let status = response.status();
    let detail = match response.json::<ErrorBody>().await {
        Ok(body) => body.detail,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };
    Error::Server {
        status: status.as_u16(),
        detail,
    }
}
