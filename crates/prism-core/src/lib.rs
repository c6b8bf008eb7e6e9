pub mod config;
pub mod style;

mod client;
mod download;
mod error;
mod image;
mod workflow;

#[cfg(test)]
mod tests;

pub use client::ServiceClient;
pub use download::{artifact_file_name, download_dir, save_artifact};
pub use error::{Error, Result};
pub use image::{MAX_IMAGE_BYTES, SelectedImage};
pub use workflow::{Phase, SubmitRequest, Workflow};

pub use prism_types::*;
