//! Main window - assembles the widgets and wires the workflow.
//!
//! All workflow mutation happens here on the GLib main loop thread; the
//! network task only ever sees commands and produces updates.

use std::rc::Rc;

use gtk4::glib;
use gtk4::prelude::*;
use gtk4::{Align, Orientation};
use tracing::{error, info, warn};

use prism_core::config::{Config, Directories};
use prism_core::{Phase, SelectedImage};
use prism_types::{ServiceCommand, ServiceUpdate};

use crate::service::ServiceHandle;
use crate::state::UiState;
use crate::widgets::{DropZone, ResultView, StylePicker, Toast, media_type_for};

pub struct StudioWindow {
    window: gtk4::ApplicationWindow,
}

/// Everything the update loop needs, cloned once.
struct UpdateContext {
    state: Rc<UiState>,
    style_picker: Rc<StylePicker>,
    result_view: Rc<ResultView>,
    toast: Rc<Toast>,
    submit_button: gtk4::Button,
}

impl StudioWindow {
    // Straight-line assembly and wiring of the single window
    #[allow(clippy::too_many_lines)]
    pub fn new(app: &gtk4::Application) -> Self {
        let dirs = Directories::new();
        let config = Config::load(&dirs.config_file).unwrap_or_else(|e| {
            warn!("Falling back to default config: {}", e);
            Config::default()
        });
        let base_url = config.effective_service_url();
        info!("Using preset service at {}", base_url);

        let service = ServiceHandle::connect(&base_url);
        let command_tx = service.command_sender();
        let update_rx = service.update_receiver();

        let state = UiState::new();

        let drop_zone = Rc::new(DropZone::new());
        let style_picker = Rc::new(StylePicker::new());
        let result_view = Rc::new(ResultView::new());
        let toast = Rc::new(Toast::new(config.toast_duration_ms));

        let submit_button = gtk4::Button::builder()
            .label("Generate preset")
            .halign(Align::Center)
            .sensitive(false)
            .css_classes(["suggested-action"])
            .build();

        let content = gtk4::Box::builder()
            .orientation(Orientation::Vertical)
            .spacing(16)
            .margin_top(16)
            .margin_bottom(16)
            .margin_start(16)
            .margin_end(16)
            .build();
        content.append(drop_zone.widget());
        content.append(style_picker.widget());
        content.append(&submit_button);
        content.append(result_view.widget());

        let scroll = gtk4::ScrolledWindow::builder()
            .hscrollbar_policy(gtk4::PolicyType::Never)
            .child(&content)
            .build();

        let overlay = gtk4::Overlay::new();
        overlay.set_child(Some(&scroll));
        overlay.add_overlay(toast.widget());

        let window = gtk4::ApplicationWindow::builder()
            .application(app)
            .title("Prism")
            .default_width(560)
            .default_height(760)
            .child(&overlay)
            .build();

        // File selection (dialog and drop share this path)
        {
            let state = state.clone();
            let drop_zone_weak = Rc::downgrade(&drop_zone);
            let style_picker = style_picker.clone();
            let result_view = result_view.clone();
            let toast = toast.clone();
            let submit_button = submit_button.clone();
            let command_tx = command_tx.clone();
            let recommend_on_select = config.recommend_on_select;

            drop_zone.set_on_file(move |path| {
                let bytes = match std::fs::read(&path) {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        toast.show(&format!("Cannot read {}: {e}", path.display()));
                        return;
                    }
                };
                let media_type = media_type_for(&path);
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "image".to_string());

                match state.select_image(&file_name, &media_type, bytes) {
                    Ok(()) => {
                        let Some(image) = state.image() else { return };
                        if let Some(drop_zone) = drop_zone_weak.upgrade() {
                            drop_zone.show_image(&image.bytes, &image.file_name);
                        }
                        style_picker.clear_recommendation();
                        result_view.clear();
                        refresh_controls(&state, &submit_button, &result_view);

                        if recommend_on_select {
                            send_command(
                                &command_tx,
                                recommend_command(state.generation(), &image),
                            );
                        }
                    }
                    Err(e) => toast.show(&e.to_string()),
                }
            });
        }

        // Style changes (free text and catalog chips land here alike)
        {
            let state = state.clone();
            let submit_button = submit_button.clone();
            let result_view = result_view.clone();
            style_picker.set_on_change(move |text| {
                state.set_style_description(&text);
                refresh_controls(&state, &submit_button, &result_view);
            });
        }

        // Submit
        {
            let state = state.clone();
            let result_view = result_view.clone();
            let submit_button_handle = submit_button.clone();
            let toast = toast.clone();
            let command_tx = command_tx.clone();
            submit_button.connect_clicked(move |_| {
                match state.begin_submit() {
                    Ok(Some(request)) => {
                        send_command(
                            &command_tx,
                            ServiceCommand::Generate {
                                generation: request.generation,
                                file_name: request.image.file_name,
                                media_type: request.image.media_type,
                                bytes: request.image.bytes,
                                style_description: request.style_description,
                            },
                        );
                    }
                    // Already uploading; the button is insensitive anyway
                    Ok(None) => {}
                    Err(e) => toast.show(&e.to_string()),
                }
                refresh_controls(&state, &submit_button_handle, &result_view);
            });
        }

        // Downloads
        {
            let state = state.clone();
            let toast = toast.clone();
            let command_tx = command_tx.clone();
            result_view.set_on_download(move |kind| {
                let Some(result) = state.result() else {
                    toast.show("Nothing to download yet");
                    return;
                };
                send_command(&command_tx, ServiceCommand::Download { kind, result });
            });
        }

        // Reset
        {
            let state = state.clone();
            let drop_zone = drop_zone.clone();
            let style_picker = style_picker.clone();
            let result_view_weak = Rc::downgrade(&result_view);
            let submit_button = submit_button.clone();
            result_view.set_on_reset(move || {
                state.reset();
                drop_zone.clear();
                style_picker.clear();
                if let Some(result_view) = result_view_weak.upgrade() {
                    result_view.clear();
                    refresh_controls(&state, &submit_button, &result_view);
                }
            });
        }

        // Updates from the network task
        let ctx = UpdateContext {
            state,
            style_picker,
            result_view,
            toast,
            submit_button,
        };
        glib::spawn_future_local(async move {
            while let Ok(update) = update_rx.recv().await {
                handle_update(update, &ctx);
            }
            info!("Update receiver closed");
        });

        Self { window }
    }

    pub fn present(&self) {
        self.window.present();
    }
}

fn handle_update(update: ServiceUpdate, ctx: &UpdateContext) {
    match update {
        ServiceUpdate::Generated { generation, result } => {
            let style = result.style_description.clone();
            if ctx.state.apply_success(generation, result) {
                ctx.result_view.set_result_style(&style);
                ctx.toast.show("Preset generated");
                refresh_controls(&ctx.state, &ctx.submit_button, &ctx.result_view);
            }
        }
        ServiceUpdate::GenerateFailed {
            generation,
            message,
            detail,
        } => {
            if ctx.state.apply_failure(generation, &message, detail) {
                refresh_controls(&ctx.state, &ctx.submit_button, &ctx.result_view);
            }
        }
        ServiceUpdate::PreviewReady { generation, bytes } => {
            if ctx.state.preview_is_current(generation) {
                ctx.result_view.set_preview_bytes(&bytes);
            }
        }
        ServiceUpdate::Downloaded { kind, path } => {
            ctx.toast
                .show(&format!("Saved {} to {}", kind.label(), path.display()));
        }
        ServiceUpdate::DownloadFailed { kind, message } => {
            // The result is untouched; the user can simply retry
            ctx.toast
                .show(&format!("Could not download {}: {message}", kind.label()));
        }
        ServiceUpdate::Recommended {
            generation,
            recommendation,
        } => {
            if ctx.state.apply_recommendation(generation, recommendation.clone()) {
                ctx.style_picker.show_recommendation(&recommendation);
            }
        }
    }
}

/// Derive control sensitivity from the phase.
fn refresh_controls(state: &UiState, submit_button: &gtk4::Button, result_view: &ResultView) {
    let phase = state.phase();

    // Failed permits a direct retry without reset
    let can_submit = matches!(phase, Phase::ReadyToSubmit | Phase::Failed { .. });
    submit_button.set_sensitive(can_submit);

    result_view.set_phase(&phase);
    if phase == Phase::Succeeded
        && let Some(result) = state.result()
    {
        result_view.set_result_style(&result.style_description);
    }
}

fn recommend_command(generation: u64, image: &SelectedImage) -> ServiceCommand {
    ServiceCommand::Recommend {
        generation,
        file_name: image.file_name.clone(),
        media_type: image.media_type.clone(),
        bytes: image.bytes.clone(),
    }
}

fn send_command(
    command_tx: &async_channel::Sender<ServiceCommand>,
    command: ServiceCommand,
) {
    if let Err(e) = command_tx.send_blocking(command) {
        error!("Failed to send command to service task: {e}");
    }
}
