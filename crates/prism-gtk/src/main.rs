//! Prism GTK4 UI - desktop client for the preset-generation service
//!
//! Single-window upload/generate/download workflow: pick or drop a photo,
//! describe a style, submit, then download the generated XMP preset and
//! preview image.

mod service;
mod state;
mod widgets;
mod window;

use gtk4::glib;
use gtk4::prelude::*;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::window::StudioWindow;

const APP_ID: &str = "org.prism.Studio";
const DEV_APP_ID: &str = "org.prism.Studio.Dev";

fn is_dev_mode() -> bool {
    std::env::current_exe()
        .ok()
        .and_then(|exe| {
            exe.parent().map(|dir| {
                dir.ends_with("target/debug") || dir.ends_with("target/release")
            })
        })
        .unwrap_or(false)
}

fn setup_logging() {
    #[cfg(debug_assertions)]
    {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let log_filename = format!("prism-gtk-{timestamp}.log");
        let log_path = std::path::Path::new("/tmp").join(&log_filename);

        let symlink_path = std::path::Path::new("/tmp/prism-gtk.log");
        let _ = std::fs::remove_file(symlink_path);
        let _ = std::os::unix::fs::symlink(&log_path, symlink_path);

        let file_appender = tracing_appender::rolling::never("/tmp", &log_filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true),
            )
            .with(EnvFilter::from_default_env().add_directive("prism_gtk=debug".parse().unwrap()))
            .init();

        std::mem::forget(guard);
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(EnvFilter::from_default_env().add_directive("prism_gtk=info".parse().unwrap()))
            .init();
    }
}

fn main() -> glib::ExitCode {
    setup_logging();

    info!("Starting prism-gtk");

    let app_id = if is_dev_mode() { DEV_APP_ID } else { APP_ID };
    let app = gtk4::Application::builder().application_id(app_id).build();

    app.connect_activate(move |app| {
        let window = StudioWindow::new(app);
        window.present();
    });

    app.run()
}
