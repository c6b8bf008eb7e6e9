use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Not an image: {0}")]
    InvalidType(String),

    #[error("Image too large: {len} bytes (limit {limit})", len = .0, limit = crate::MAX_IMAGE_BYTES)]
    TooLarge(usize),

    #[error("Missing input: {0}")]
    MissingInput(&'static str),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server error ({status}): {detail}")]
    Server { status: u16, detail: String },

    #[error("Download failed: {0}")]
    Download(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Server-supplied detail string, when this error carries one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Server { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_type() {
        let err = Error::InvalidType("application/pdf".to_string());
        assert_eq!(err.to_string(), "Not an image: application/pdf");
    }

    #[test]
    fn test_error_display_too_large() {
        let err = Error::TooLarge(10_485_761);
        assert_eq!(
            err.to_string(),
            "Image too large: 10485761 bytes (limit 10485760)"
        );
    }

    #[test]
    fn test_error_display_missing_input() {
        let err = Error::MissingInput("style description");
        assert_eq!(err.to_string(), "Missing input: style description");
    }

    #[test]
    fn test_error_display_server() {
        let err = Error::Server {
            status: 500,
            detail: "bad image".to_string(),
        };
        assert_eq!(err.to_string(), "Server error (500): bad image");
        assert_eq!(err.detail(), Some("bad image"));
    }

    #[test]
    fn test_error_display_download() {
        let err = Error::Download("connection reset".to_string());
        assert_eq!(err.to_string(), "Download failed: connection reset");
    }

    #[test]
    fn test_detail_absent_for_other_variants() {
        assert!(Error::MissingInput("image").detail().is_none());
        assert!(Error::Config("missing field".to_string()).detail().is_none());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("access denied"));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<i32>("\"not a number\"").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_error() -> Result<()> {
            Err(Error::MissingInput("image"))
        }
        assert!(returns_error().is_err());
    }
}
