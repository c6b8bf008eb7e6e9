//! The upload/generate/result workflow state machine.
//!
//! Strictly linear: `Empty -> ReadyToSubmit -> Uploading -> {Succeeded |
//! Failed}`. `Failed` permits direct retry; both terminal states permit
//! reset. `Uploading` is the only transient state - every in-flight request
//! resolves to exactly one of the terminal states.
//!
//! A request-generation token guards against out-of-order completion: every
//! submission (and every user action that supersedes one) advances the
//! token, and responses are applied only when their token is still current.

use crate::image::SelectedImage;
use prism_types::GenerationResult;
use tracing::debug;

/// Derived workflow status, recomputed from the owned entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// No image selected yet
    Empty,
    /// Image and style both present; submit is allowed
    ReadyToSubmit,
    /// Exactly one generation request in flight
    Uploading,
    /// A result is available
    Succeeded,
    /// The last submission failed; inputs are preserved for retry
    Failed {
        message: String,
        detail: Option<String>,
    },
}

/// Everything the network task needs to issue one generation request.
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    /// Token identifying this submission; echoed back with the response
    pub generation: u64,
    pub image: SelectedImage,
    pub style_description: String,
}

#[derive(Debug, Clone)]
struct Failure {
    message: String,
    detail: Option<String>,
    /// Whether this was a local precondition failure rather than a
    /// submission outcome
    local: bool,
}

/// Owns all workflow entities for the lifetime of the window.
///
/// Nothing here touches the network or the toolkit; the shell feeds user
/// actions in and applies responses back through the generation token.
#[derive(Debug, Default)]
pub struct Workflow {
    image: Option<SelectedImage>,
    style_description: String,
    result: Option<GenerationResult>,
    failure: Option<Failure>,
    generation: u64,
    in_flight: bool,
}

impl Workflow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn image(&self) -> Option<&SelectedImage> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn style_description(&self) -> &str {
        &self.style_description
    }

    #[must_use]
    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    /// Current request-generation token.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Derive the current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.in_flight {
            return Phase::Uploading;
        }
        if let Some(failure) = &self.failure {
            return Phase::Failed {
                message: failure.message.clone(),
                detail: failure.detail.clone(),
            };
        }
        if self.result.is_some() {
            return Phase::Succeeded;
        }
        if self.image.is_some() && !self.style_description.is_empty() {
            return Phase::ReadyToSubmit;
        }
        Phase::Empty
    }

    /// Validate and store a candidate image.
    ///
    /// Replaces any previous selection wholesale and clears a stale result
    /// and error state. Supersedes an in-flight request: its eventual
    /// response will carry an old token and be discarded.
    ///
    /// # Errors
    ///
    /// [`crate::Error::InvalidType`] / [`crate::Error::TooLarge`] per
    /// [`SelectedImage::new`]; the existing selection is left untouched.
    pub fn select_image(
        &mut self,
        file_name: &str,
        media_type: &str,
        bytes: Vec<u8>,
    ) -> crate::Result<()> {
        let image = SelectedImage::new(file_name, media_type, bytes)?;
        debug!(
            "Selected image {} ({}, {} bytes)",
            image.file_name,
            image.media_type,
            image.size()
        );

        if self.in_flight {
            debug!("New image supersedes in-flight request {}", self.generation);
        }
        self.image = Some(image);
        self.result = None;
        self.failure = None;
        self.in_flight = false;
        self.generation += 1;
        Ok(())
    }

    /// Store a style description - free text or a catalog value, whichever
    /// the user touched last. A non-empty value clears a previous
    /// missing-input failure.
    pub fn set_style_description(&mut self, text: &str) {
        self.style_description = text.trim().to_string();
        if !self.style_description.is_empty()
            && self.failure.as_ref().is_some_and(|f| f.local)
        {
            self.failure = None;
        }
    }

    /// Begin a submission.
    ///
    /// Returns `Ok(None)` when a request is already in flight (duplicate
    /// submits are ignored, not errors). On success the workflow enters
    /// `Uploading` and the returned request carries the new token.
    ///
    /// # Errors
    ///
    /// [`crate::Error::MissingInput`] when the image or style description
    /// is absent; no request must be issued in that case.
    pub fn begin_submit(&mut self) -> crate::Result<Option<SubmitRequest>> {
        if self.in_flight {
            debug!("Submit ignored: request {} still in flight", self.generation);
            return Ok(None);
        }

        let Some(image) = self.image.clone() else {
            self.fail_local("Select an image first");
            return Err(crate::Error::MissingInput("image"));
        };
        if self.style_description.is_empty() {
            self.fail_local("Describe or pick a style first");
            return Err(crate::Error::MissingInput("style description"));
        }

        self.failure = None;
        self.in_flight = true;
        self.generation += 1;
        debug!("Submitting request {}", self.generation);

        Ok(Some(SubmitRequest {
            generation: self.generation,
            image,
            style_description: self.style_description.clone(),
        }))
    }

    /// Apply a successful response. Returns `false` (and changes nothing)
    /// when the token is stale.
    pub fn apply_success(&mut self, generation: u64, result: GenerationResult) -> bool {
        if !self.response_is_current(generation) {
            return false;
        }
        debug!("Request {} succeeded: preset {}", generation, result.preset_id);
        self.result = Some(result);
        self.failure = None;
        self.in_flight = false;
        true
    }

    /// Apply a failed response. Inputs are preserved so the user can retry
    /// without re-entering anything. Returns `false` when the token is
    /// stale.
    pub fn apply_failure(
        &mut self,
        generation: u64,
        message: &str,
        detail: Option<String>,
    ) -> bool {
        if !self.response_is_current(generation) {
            return false;
        }
        debug!("Request {} failed: {}", generation, message);
        self.failure = Some(Failure {
            message: message.to_string(),
            detail,
            local: false,
        });
        self.in_flight = false;
        true
    }

    /// Return to the initial state, discarding every entity.
    pub fn reset(&mut self) {
        debug!("Workflow reset");
        self.image = None;
        self.style_description.clear();
        self.result = None;
        self.failure = None;
        self.in_flight = false;
        self.generation += 1;
    }

    fn fail_local(&mut self, message: &str) {
        self.failure = Some(Failure {
            message: message.to_string(),
            detail: None,
            local: true,
        });
    }

    fn response_is_current(&self, generation: u64) -> bool {
        if generation == self.generation && self.in_flight {
            true
        } else {
            debug!(
                "Discarding stale response: token {} (current {}, in_flight {})",
                generation, self.generation, self.in_flight
            );
            false
        }
    }
}
