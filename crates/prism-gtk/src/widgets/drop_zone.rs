//! Image drop zone - drag-and-drop target plus a file-dialog fallback.
//!
//! Both paths hand the chosen path to the same callback; validation
//! happens once, in the workflow, so the rules cannot diverge.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{Align, Orientation, gdk, glib};
use tracing::debug;

type OnFileCallback = Rc<dyn Fn(PathBuf)>;

pub struct DropZone {
    container: gtk4::Box,
    picture: gtk4::Picture,
    hint_label: gtk4::Label,
    on_file: Rc<RefCell<Option<OnFileCallback>>>,
}

impl DropZone {
    pub fn new() -> Self {
        let container = gtk4::Box::builder()
            .orientation(Orientation::Vertical)
            .spacing(8)
            .css_classes(["drop-zone"])
            .build();

        let picture = gtk4::Picture::builder()
            .can_shrink(true)
            .height_request(220)
            .visible(false)
            .build();
        container.append(&picture);

        let hint_label = gtk4::Label::builder()
            .label("Drop a photo here")
            .halign(Align::Center)
            .css_classes(["drop-zone-hint"])
            .build();
        container.append(&hint_label);

        let browse_button = gtk4::Button::builder()
            .label("Browse\u{2026}")
            .halign(Align::Center)
            .build();
        container.append(&browse_button);

        let on_file: Rc<RefCell<Option<OnFileCallback>>> = Rc::new(RefCell::new(None));

        let drop_target = gtk4::DropTarget::new(gio::File::static_type(), gdk::DragAction::COPY);
        {
            let on_file = on_file.clone();
            drop_target.connect_drop(move |_, value, _, _| {
                let Ok(file) = value.get::<gio::File>() else {
                    return false;
                };
                let Some(path) = file.path() else {
                    return false;
                };
                debug!("File dropped: {:?}", path);
                if let Some(cb) = on_file.borrow().as_ref() {
                    cb(path);
                }
                true
            });
        }
        container.add_controller(drop_target);

        {
            let on_file = on_file.clone();
            browse_button.connect_clicked(move |button| {
                let filter = gtk4::FileFilter::new();
                filter.set_name(Some("Images"));
                filter.add_mime_type("image/*");

                let dialog = gtk4::FileDialog::builder()
                    .title("Choose a photo")
                    .default_filter(&filter)
                    .build();

                let parent = button.root().and_downcast::<gtk4::Window>();
                let on_file = on_file.clone();
                dialog.open(parent.as_ref(), gio::Cancellable::NONE, move |result| {
                    match result {
                        Ok(file) => {
                            if let Some(path) = file.path() {
                                debug!("File picked: {:?}", path);
                                if let Some(cb) = on_file.borrow().as_ref() {
                                    cb(path);
                                }
                            }
                        }
                        Err(e) => debug!("File dialog dismissed: {}", e),
                    }
                });
            });
        }

        Self {
            container,
            picture,
            hint_label,
            on_file,
        }
    }

    pub fn widget(&self) -> &gtk4::Box {
        &self.container
    }

    pub fn set_on_file<F>(&self, f: F)
    where
        F: Fn(PathBuf) + 'static,
    {
        *self.on_file.borrow_mut() = Some(Rc::new(f));
    }

    /// Show the selected image inline; falls back to the hint text when
    /// the bytes do not decode.
    pub fn show_image(&self, bytes: &[u8], file_name: &str) {
        match gdk::Texture::from_bytes(&glib::Bytes::from(bytes)) {
            Ok(texture) => {
                self.picture.set_paintable(Some(&texture));
                self.picture.set_visible(true);
                self.hint_label.set_label(file_name);
            }
            Err(e) => {
                debug!("Cannot decode {} for display: {}", file_name, e);
                self.picture.set_visible(false);
                self.hint_label.set_label(file_name);
            }
        }
    }

    /// Back to the empty-state hint.
    pub fn clear(&self) {
        self.picture.set_paintable(gdk::Paintable::NONE);
        self.picture.set_visible(false);
        self.hint_label.set_label("Drop a photo here");
    }
}

impl Default for DropZone {
    fn default() -> Self {
        Self::new()
    }
}

/// Declared media type for a path, from its extension. The workflow
/// validates against this, mirroring how a browser reports `File.type`.
#[must_use]
pub fn media_type_for(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "tif" | "tiff" => "image/tiff",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_for_known_extensions() {
        assert_eq!(media_type_for(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(media_type_for(Path::new("a.JPEG")), "image/jpeg");
        assert_eq!(media_type_for(Path::new("a.png")), "image/png");
        assert_eq!(media_type_for(Path::new("a.webp")), "image/webp");
    }

    #[test]
    fn test_media_type_for_unknown_is_not_an_image() {
        assert_eq!(media_type_for(Path::new("a.pdf")), "application/octet-stream");
        assert_eq!(media_type_for(Path::new("noext")), "application/octet-stream");
    }
}
