//! Shared types for Prism components.
//!
//! This crate provides the types used across prism-core and prism-gtk:
//! the wire contract of the remote preset-generation service and the
//! command/update messages exchanged between the UI shell and the
//! background network task. All types are serializable.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A successfully generated preset, exactly as returned by the service.
///
/// `xmp_url` and `preview_url` are service-relative paths
/// (e.g. `/presets/preset_<id>.xmp`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Unique identifier assigned by the service
    pub preset_id: String,

    /// The style description echoed back by the service
    pub style_description: String,

    /// Relative URL of the XMP preset definition
    pub xmp_url: String,

    /// Relative URL of the rendered preview image
    pub preview_url: String,
}

/// Error body returned by the service on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Advisory style recommendation from `/recommend_preset/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Name of the recommended catalog preset
    pub preset: String,

    /// Confidence in the recommendation (0.0 - 1.0)
    pub confidence_score: f64,
}

/// One previously generated file, as reported by `GET /files/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFile {
    pub filename: String,

    pub style_description: String,

    /// ISO-8601 timestamp of the upload
    pub upload_time: String,
}

/// Response body of `GET /files/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileListing {
    #[serde(default)]
    pub files: Vec<StoredFile>,
}

/// Which generated artifact to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// The XMP preset definition file
    Xmp,
    /// The rendered preview image
    Preview,
}

impl ArtifactKind {
    /// File extension for the artifact, without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Xmp => "xmp",
            Self::Preview => "jpg",
        }
    }

    /// Human-readable label for messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Xmp => "preset",
            Self::Preview => "preview",
        }
    }
}

/// Commands sent from the UI shell to the network task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServiceCommand {
    /// Submit an image and style description for preset generation.
    ///
    /// `generation` is the request-generation token; the matching update
    /// carries it back so stale responses can be discarded.
    Generate {
        generation: u64,
        file_name: String,
        media_type: String,
        bytes: Vec<u8>,
        style_description: String,
    },

    /// Fetch a generated artifact and save it locally.
    Download {
        kind: ArtifactKind,
        result: GenerationResult,
    },

    /// Ask the service which catalog style suits the image (advisory).
    Recommend {
        generation: u64,
        file_name: String,
        media_type: String,
        bytes: Vec<u8>,
    },
}

/// Updates sent from the network task back to the UI shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServiceUpdate {
    /// Generation succeeded.
    Generated {
        generation: u64,
        result: GenerationResult,
    },

    /// Generation failed (network error or non-2xx response).
    GenerateFailed {
        generation: u64,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },

    /// Preview image bytes for display, fetched right after a successful
    /// generation. Not sent when the fetch fails; the result view keeps
    /// its placeholder in that case.
    PreviewReady { generation: u64, bytes: Vec<u8> },

    /// Artifact saved to disk.
    Downloaded { kind: ArtifactKind, path: PathBuf },

    /// Artifact fetch or save failed. The result is untouched; the user
    /// may simply try again.
    DownloadFailed { kind: ArtifactKind, message: String },

    /// Advisory recommendation arrived. Never sent on failure - the
    /// recommendation is just omitted.
    Recommended {
        generation: u64,
        recommendation: Recommendation,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_result_wire_fields() {
        let json = r#"{
            "preset_id": "p1",
            "style_description": "Film Noir",
            "xmp_url": "/x/p1.xmp",
            "preview_url": "/x/p1.jpg"
        }"#;
        let result: GenerationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.preset_id, "p1");
        assert_eq!(result.style_description, "Film Noir");
        assert_eq!(result.xmp_url, "/x/p1.xmp");
        assert_eq!(result.preview_url, "/x/p1.jpg");
    }

    #[test]
    fn test_error_body_detail() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"bad image"}"#).unwrap();
        assert_eq!(body.detail, "bad image");
    }

    #[test]
    fn test_recommendation_fields() {
        let rec: Recommendation =
            serde_json::from_str(r#"{"preset":"vintage","confidence_score":0.82}"#).unwrap();
        assert_eq!(rec.preset, "vintage");
        assert!((rec.confidence_score - 0.82).abs() < f64::EPSILON);
    }

    #[test]
    fn test_file_listing_missing_files_field() {
        let listing: FileListing = serde_json::from_str("{}").unwrap();
        assert!(listing.files.is_empty());
    }

    #[test]
    fn test_artifact_kind_extension() {
        assert_eq!(ArtifactKind::Xmp.extension(), "xmp");
        assert_eq!(ArtifactKind::Preview.extension(), "jpg");
    }

    #[test]
    fn test_service_update_round_trip() {
        let update = ServiceUpdate::GenerateFailed {
            generation: 3,
            message: "server error".to_string(),
            detail: Some("bad image".to_string()),
        };
        let json = serde_json::to_string(&update).unwrap();
        assert!(json.contains(r#""type":"generate_failed""#));
        let back: ServiceUpdate = serde_json::from_str(&json).unwrap();
        match back {
            ServiceUpdate::GenerateFailed {
                generation, detail, ..
            } => {
                assert_eq!(generation, 3);
                assert_eq!(detail.as_deref(), Some("bad image"));
            }
            other => panic!("unexpected update: {other:?}"),
        }
    }
}
