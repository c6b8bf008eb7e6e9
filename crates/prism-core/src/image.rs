//! Candidate image validation.
//!
//! The file-dialog and drag-and-drop paths both construct a [`SelectedImage`]
//! through [`SelectedImage::new`], so there is exactly one set of rules.

use crate::{Error, Result};

/// Maximum accepted image size in bytes (10 MiB)
pub const MAX_IMAGE_BYTES: usize = 10_485_760;

/// A validated image chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    /// Original file name, used in the multipart upload
    pub file_name: String,

    /// Declared media type (e.g. `image/jpeg`)
    pub media_type: String,

    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl SelectedImage {
    /// Validate and wrap a candidate file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidType`] if the declared media type is not an
    /// image type, or [`Error::TooLarge`] if the payload exceeds
    /// [`MAX_IMAGE_BYTES`].
    pub fn new(file_name: &str, media_type: &str, bytes: Vec<u8>) -> Result<Self> {
        if !media_type.starts_with("image/") {
            return Err(Error::InvalidType(media_type.to_string()));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(Error::TooLarge(bytes.len()));
        }

        Ok(Self {
            file_name: file_name.to_string(),
            media_type: media_type.to_string(),
            bytes,
        })
    }

    /// Payload size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}
