//! Result presenter - pure projection of the workflow phase and result.
//!
//! Owns no workflow state: the window pushes phases and bytes in, and
//! download/reset clicks go back out through callbacks.

use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{Align, Orientation, gdk, glib};
use prism_core::Phase;
use prism_types::ArtifactKind;
use tracing::debug;

type OnDownloadCallback = Rc<dyn Fn(ArtifactKind)>;
type OnResetCallback = Rc<dyn Fn()>;

pub struct ResultView {
    container: gtk4::Box,
    spinner: gtk4::Spinner,
    uploading_label: gtk4::Label,
    preview_picture: gtk4::Picture,
    style_label: gtk4::Label,
    failure_label: gtk4::Label,
    detail_label: gtk4::Label,
    download_xmp_button: gtk4::Button,
    download_preview_button: gtk4::Button,
    reset_button: gtk4::Button,
    on_download: Rc<RefCell<Option<OnDownloadCallback>>>,
    on_reset: Rc<RefCell<Option<OnResetCallback>>>,
}

impl ResultView {
    // Straight-line widget assembly
    #[allow(clippy::too_many_lines)]
    pub fn new() -> Self {
        let container = gtk4::Box::builder()
            .orientation(Orientation::Vertical)
            .spacing(8)
            .visible(false)
            .css_classes(["result-view"])
            .build();

        let spinner = gtk4::Spinner::builder().visible(false).build();
        container.append(&spinner);

        let uploading_label = gtk4::Label::builder()
            .label("Generating preset\u{2026}")
            .halign(Align::Center)
            .visible(false)
            .build();
        container.append(&uploading_label);

        let preview_picture = gtk4::Picture::builder()
            .can_shrink(true)
            .height_request(260)
            .visible(false)
            .build();
        container.append(&preview_picture);

        let style_label = gtk4::Label::builder()
            .halign(Align::Center)
            .visible(false)
            .css_classes(["result-style"])
            .build();
        container.append(&style_label);

        let failure_label = gtk4::Label::builder()
            .halign(Align::Center)
            .wrap(true)
            .visible(false)
            .css_classes(["result-failure"])
            .build();
        container.append(&failure_label);

        let detail_label = gtk4::Label::builder()
            .halign(Align::Center)
            .wrap(true)
            .visible(false)
            .css_classes(["result-failure-detail"])
            .build();
        container.append(&detail_label);

        let button_row = gtk4::Box::builder()
            .orientation(Orientation::Horizontal)
            .spacing(8)
            .halign(Align::Center)
            .build();

        let download_xmp_button = gtk4::Button::builder()
            .label("Download preset")
            .sensitive(false)
            .build();
        button_row.append(&download_xmp_button);

        let download_preview_button = gtk4::Button::builder()
            .label("Download preview")
            .sensitive(false)
            .build();
        button_row.append(&download_preview_button);

        let reset_button = gtk4::Button::builder().label("Start over").build();
        button_row.append(&reset_button);

        container.append(&button_row);

        let on_download: Rc<RefCell<Option<OnDownloadCallback>>> = Rc::new(RefCell::new(None));
        let on_reset: Rc<RefCell<Option<OnResetCallback>>> = Rc::new(RefCell::new(None));

        {
            let on_download = on_download.clone();
            download_xmp_button.connect_clicked(move |_| {
                if let Some(cb) = on_download.borrow().as_ref() {
                    cb(ArtifactKind::Xmp);
                }
            });
        }
        {
            let on_download = on_download.clone();
            download_preview_button.connect_clicked(move |_| {
                if let Some(cb) = on_download.borrow().as_ref() {
                    cb(ArtifactKind::Preview);
                }
            });
        }
        {
            let on_reset = on_reset.clone();
            reset_button.connect_clicked(move |_| {
                if let Some(cb) = on_reset.borrow().as_ref() {
                    cb();
                }
            });
        }

        Self {
            container,
            spinner,
            uploading_label,
            preview_picture,
            style_label,
            failure_label,
            detail_label,
            download_xmp_button,
            download_preview_button,
            reset_button,
            on_download,
            on_reset,
        }
    }

    pub fn widget(&self) -> &gtk4::Box {
        &self.container
    }

    pub fn set_on_download<F>(&self, f: F)
    where
        F: Fn(ArtifactKind) + 'static,
    {
        *self.on_download.borrow_mut() = Some(Rc::new(f));
    }

    pub fn set_on_reset<F>(&self, f: F)
    where
        F: Fn() + 'static,
    {
        *self.on_reset.borrow_mut() = Some(Rc::new(f));
    }

    /// Project a workflow phase onto the view.
    pub fn set_phase(&self, phase: &Phase) {
        let uploading = matches!(phase, Phase::Uploading);
        let succeeded = matches!(phase, Phase::Succeeded);
        let failed = matches!(phase, Phase::Failed { .. });

        self.container
            .set_visible(uploading || succeeded || failed);

        self.spinner.set_visible(uploading);
        self.spinner.set_spinning(uploading);
        self.uploading_label.set_visible(uploading);

        self.download_xmp_button.set_sensitive(succeeded);
        self.download_preview_button.set_sensitive(succeeded);
        self.reset_button.set_visible(succeeded || failed);

        if let Phase::Failed { message, detail } = phase {
            self.failure_label.set_label(message);
            self.failure_label.set_visible(true);
            match detail {
                Some(detail) => {
                    self.detail_label.set_label(detail);
                    self.detail_label.set_visible(true);
                }
                None => self.detail_label.set_visible(false),
            }
        } else {
            self.failure_label.set_visible(false);
            self.detail_label.set_visible(false);
        }

        if !succeeded {
            self.preview_picture.set_visible(false);
            self.style_label.set_visible(false);
        }
    }

    /// Caption under the preview once a result arrived.
    pub fn set_result_style(&self, style_description: &str) {
        self.style_label
            .set_label(&format!("Style: {style_description}"));
        self.style_label.set_visible(true);
    }

    /// Display the fetched preview image.
    pub fn set_preview_bytes(&self, bytes: &[u8]) {
        match gdk::Texture::from_bytes(&glib::Bytes::from(bytes)) {
            Ok(texture) => {
                self.preview_picture.set_paintable(Some(&texture));
                self.preview_picture.set_visible(true);
            }
            Err(e) => debug!("Cannot decode preview for display: {}", e),
        }
    }

    pub fn clear(&self) {
        self.preview_picture.set_paintable(gdk::Paintable::NONE);
        self.set_phase(&Phase::Empty);
    }
}

impl Default for ResultView {
    fn default() -> Self {
        Self::new()
    }
}
