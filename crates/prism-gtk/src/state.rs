//! Runtime UI state (not persisted).
//!
//! Wraps the core [`Workflow`] behind interior mutability so handlers can
//! share one instance on the GLib main loop thread. Nothing here survives
//! the window; a restart starts from `Empty`.

use prism_core::{Phase, SelectedImage, SubmitRequest, Workflow};
use prism_types::{GenerationResult, Recommendation};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

pub struct UiState {
    workflow: RefCell<Workflow>,
    /// Advisory recommendation for the currently selected image
    recommendation: RefCell<Option<Recommendation>>,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            workflow: RefCell::new(Workflow::new()),
            recommendation: RefCell::new(None),
        })
    }

    pub fn phase(&self) -> Phase {
        self.workflow.borrow().phase()
    }

    pub fn generation(&self) -> u64 {
        self.workflow.borrow().generation()
    }

    pub fn image(&self) -> Option<SelectedImage> {
        self.workflow.borrow().image().cloned()
    }

    pub fn result(&self) -> Option<GenerationResult> {
        self.workflow.borrow().result().cloned()
    }

    pub fn recommendation(&self) -> Option<Recommendation> {
        self.recommendation.borrow().clone()
    }

    /// Validate and store a candidate image; a new selection also drops
    /// the previous recommendation.
    pub fn select_image(
        &self,
        file_name: &str,
        media_type: &str,
        bytes: Vec<u8>,
    ) -> prism_core::Result<()> {
        self.workflow
            .borrow_mut()
            .select_image(file_name, media_type, bytes)?;
        *self.recommendation.borrow_mut() = None;
        Ok(())
    }

    pub fn set_style_description(&self, text: &str) {
        self.workflow.borrow_mut().set_style_description(text);
    }

    pub fn begin_submit(&self) -> prism_core::Result<Option<SubmitRequest>> {
        self.workflow.borrow_mut().begin_submit()
    }

    pub fn apply_success(&self, generation: u64, result: GenerationResult) -> bool {
        self.workflow.borrow_mut().apply_success(generation, result)
    }

    pub fn apply_failure(&self, generation: u64, message: &str, detail: Option<String>) -> bool {
        self.workflow
            .borrow_mut()
            .apply_failure(generation, message, detail)
    }

    /// Store a recommendation if it still belongs to the current image.
    /// Returns `false` for stale tokens.
    pub fn apply_recommendation(&self, generation: u64, recommendation: Recommendation) -> bool {
        if generation != self.workflow.borrow().generation() {
            debug!("Discarding stale recommendation (token {})", generation);
            return false;
        }
        *self.recommendation.borrow_mut() = Some(recommendation);
        true
    }

    /// Whether a preview belongs to the result currently on display.
    pub fn preview_is_current(&self, generation: u64) -> bool {
        let workflow = self.workflow.borrow();
        workflow.result().is_some() && generation == workflow.generation()
    }

    pub fn reset(&self) {
        self.workflow.borrow_mut().reset();
        *self.recommendation.borrow_mut() = None;
    }
}
