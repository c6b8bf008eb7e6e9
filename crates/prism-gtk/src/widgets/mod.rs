//! Widgets for the single-window upload/generate/download workflow.

pub mod drop_zone;
pub mod result_view;
pub mod style_picker;
pub mod toast;

pub use drop_zone::{DropZone, media_type_for};
pub use result_view::ResultView;
pub use style_picker::StylePicker;
pub use toast::Toast;
