//! Style picker - free-text entry plus catalog chips.
//!
//! The entry doubles as a fuzzy filter over the catalog: typing narrows
//! the chips, clicking a chip replaces the text. Either way the last user
//! action wins and a single string goes to the workflow.

use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{Align, Orientation};
use prism_core::style::{CatalogFilter, CatalogStyle};
use prism_types::Recommendation;

type OnChangeCallback = Rc<dyn Fn(String)>;

pub struct StylePicker {
    container: gtk4::Box,
    entry: gtk4::Entry,
    chip_box: gtk4::FlowBox,
    recommend_button: gtk4::Button,
    recommended: Rc<RefCell<Option<String>>>,
    filter: Rc<RefCell<CatalogFilter>>,
    on_change: Rc<RefCell<Option<OnChangeCallback>>>,
}

impl StylePicker {
    pub fn new() -> Self {
        let container = gtk4::Box::builder()
            .orientation(Orientation::Vertical)
            .spacing(8)
            .css_classes(["style-picker"])
            .build();

        let entry = gtk4::Entry::builder()
            .placeholder_text("Describe a style, e.g. \u{201c}moody film noir\u{201d}")
            .build();
        container.append(&entry);

        let chip_box = gtk4::FlowBox::builder()
            .selection_mode(gtk4::SelectionMode::None)
            .column_spacing(6)
            .row_spacing(6)
            .build();
        container.append(&chip_box);

        let recommend_button = gtk4::Button::builder()
            .halign(Align::Start)
            .visible(false)
            .css_classes(["style-recommendation"])
            .build();
        container.append(&recommend_button);

        let recommended: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
        let filter = Rc::new(RefCell::new(CatalogFilter::new()));
        let on_change: Rc<RefCell<Option<OnChangeCallback>>> = Rc::new(RefCell::new(None));

        {
            let chip_box = chip_box.clone();
            let filter = filter.clone();
            let on_change = on_change.clone();
            entry.connect_changed(move |entry| {
                let text = entry.text().to_string();
                rebuild_chips(&chip_box, &filter.borrow_mut().filter(&text), entry);
                if let Some(cb) = on_change.borrow().as_ref() {
                    cb(text);
                }
            });
        }

        {
            let entry = entry.clone();
            let recommended = recommended.clone();
            recommend_button.connect_clicked(move |_| {
                if let Some(value) = recommended.borrow().as_deref() {
                    entry.set_text(value);
                }
            });
        }

        rebuild_chips(&chip_box, &filter.borrow_mut().filter(""), &entry);

        Self {
            container,
            entry,
            chip_box,
            recommend_button,
            recommended,
            filter,
            on_change,
        }
    }

    pub fn widget(&self) -> &gtk4::Box {
        &self.container
    }

    pub fn set_on_change<F>(&self, f: F)
    where
        F: Fn(String) + 'static,
    {
        *self.on_change.borrow_mut() = Some(Rc::new(f));
    }

    /// Show the advisory recommendation chip; clicking it puts the value
    /// into the entry.
    // Confidence is 0.0-1.0 by contract; percent display fits in u8
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn show_recommendation(&self, recommendation: &Recommendation) {
        let percent = (recommendation.confidence_score * 100.0).round() as u8;
        self.recommend_button
            .set_label(&format!("Suggested: {} ({percent}%)", recommendation.preset));
        *self.recommended.borrow_mut() = Some(recommendation.preset.clone());
        self.recommend_button.set_visible(true);
    }

    pub fn clear_recommendation(&self) {
        *self.recommended.borrow_mut() = None;
        self.recommend_button.set_visible(false);
    }

    /// Reset to the empty state: no text, full catalog, no recommendation.
    pub fn clear(&self) {
        self.entry.set_text("");
        self.clear_recommendation();
        rebuild_chips(&self.chip_box, &self.filter.borrow_mut().filter(""), &self.entry);
    }
}

impl Default for StylePicker {
    fn default() -> Self {
        Self::new()
    }
}

fn rebuild_chips(chip_box: &gtk4::FlowBox, styles: &[CatalogStyle], entry: &gtk4::Entry) {
    while let Some(child) = chip_box.first_child() {
        chip_box.remove(&child);
    }

    for style in styles {
        let chip = gtk4::Button::builder()
            .label(style.name)
            .tooltip_text(style.blurb)
            .css_classes(["style-chip"])
            .build();

        let entry = entry.clone();
        let value = style.value;
        chip.connect_clicked(move |_| {
            entry.set_text(value);
        });
        chip_box.append(&chip);
    }
}
