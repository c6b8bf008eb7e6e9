//! Test fixtures and helpers

use crate::Workflow;
use prism_types::GenerationResult;

/// A small valid JPEG-typed payload.
pub fn select_small_image(workflow: &mut Workflow) {
    workflow
        .select_image("photo.jpg", "image/jpeg", vec![0u8; 64])
        .expect("valid image must be accepted");
}

/// Workflow with image and style in place, ready to submit.
pub fn ready_workflow() -> Workflow {
    let mut workflow = Workflow::new();
    select_small_image(&mut workflow);
    workflow.set_style_description("Film Noir");
    workflow
}

/// A typical success response from the service.
pub fn sample_result() -> GenerationResult {
    GenerationResult {
        preset_id: "p1".to_string(),
        style_description: "Film Noir".to_string(),
        xmp_url: "/x/p1.xmp".to_string(),
        preview_url: "/x/p1.jpg".to_string(),
    }
}
