//! Transient toast notification with auto-dismiss.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gtk4::glib;
use gtk4::prelude::*;

pub struct Toast {
    revealer: gtk4::Revealer,
    label: gtk4::Label,
    duration: Duration,
    dismiss_source: Rc<RefCell<Option<glib::SourceId>>>,
}

impl Toast {
    pub fn new(duration_ms: u64) -> Self {
        let label = gtk4::Label::builder()
            .wrap(true)
            .css_classes(["toast"])
            .build();

        let revealer = gtk4::Revealer::builder()
            .transition_type(gtk4::RevealerTransitionType::SlideUp)
            .reveal_child(false)
            .halign(gtk4::Align::Center)
            .valign(gtk4::Align::End)
            .child(&label)
            .build();

        Self {
            revealer,
            label,
            duration: Duration::from_millis(duration_ms),
            dismiss_source: Rc::new(RefCell::new(None)),
        }
    }

    pub fn widget(&self) -> &gtk4::Revealer {
        &self.revealer
    }

    /// Show a message, restarting the dismiss timer if one is running.
    pub fn show(&self, message: &str) {
        self.label.set_label(message);

        if let Some(source_id) = self.dismiss_source.borrow_mut().take() {
            source_id.remove();
        }

        self.revealer.set_reveal_child(true);

        let revealer = self.revealer.clone();
        let dismiss_source = self.dismiss_source.clone();
        let source_id = glib::timeout_add_local_once(self.duration, move || {
            dismiss_source.borrow_mut().take();
            revealer.set_reveal_child(false);
        });

        *self.dismiss_source.borrow_mut() = Some(source_id);
    }
}
