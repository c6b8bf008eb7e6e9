//! Network bridge for GTK.
//!
//! Bridges the tokio-based `ServiceClient` with GTK's `GLib` main loop
//! using channels. The UI sends `ServiceCommand`s; the task executes them
//! against the remote service and sends `ServiceUpdate`s back. Commands
//! run one at a time, which matches the workflow's single-in-flight model.

use prism_core::{Error, SelectedImage, ServiceClient, download_dir, save_artifact};
use prism_types::{ArtifactKind, GenerationResult, ServiceCommand, ServiceUpdate};
use tracing::{debug, error, info};

/// Service connection handle for GTK.
///
/// Provides channels for sending commands and receiving updates,
/// bridging the tokio network task with GTK's main loop.
pub struct ServiceHandle {
    /// Channel to send `ServiceCommand`s to the network task
    command_tx: async_channel::Sender<ServiceCommand>,
    /// Channel to receive `ServiceUpdate`s from the network task
    update_rx: async_channel::Receiver<ServiceUpdate>,
}

impl ServiceHandle {
    /// Start the network task against the configured base address.
    ///
    /// Returns a handle for sending/receiving.
    pub fn connect(base_url: &str) -> Self {
        let (command_tx, command_rx) = async_channel::bounded::<ServiceCommand>(8);
        let (update_tx, update_rx) = async_channel::bounded::<ServiceUpdate>(16);

        let base_url = base_url.to_string();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to create tokio runtime");

            rt.block_on(async move {
                if let Err(e) = service_task(&base_url, command_rx, update_tx).await {
                    error!("Service task error: {e}");
                }
            });
        });

        Self {
            command_tx,
            update_rx,
        }
    }

    /// Get the update receiver for use with `glib::spawn_future_local`.
    pub fn update_receiver(&self) -> async_channel::Receiver<ServiceUpdate> {
        self.update_rx.clone()
    }

    /// Get the command sender for cloning to handlers.
    pub fn command_sender(&self) -> async_channel::Sender<ServiceCommand> {
        self.command_tx.clone()
    }
}

/// Background network task that runs in a tokio runtime.
async fn service_task(
    base_url: &str,
    command_rx: async_channel::Receiver<ServiceCommand>,
    update_tx: async_channel::Sender<ServiceUpdate>,
) -> anyhow::Result<()> {
    let client = ServiceClient::new(base_url)?;
    info!("Service task ready for {}", client.base_url());

    while let Ok(command) = command_rx.recv().await {
        let disconnected = match command {
            ServiceCommand::Generate {
                generation,
                file_name,
                media_type,
                bytes,
                style_description,
            } => {
                let image = SelectedImage {
                    file_name,
                    media_type,
                    bytes,
                };
                handle_generate(&client, generation, &image, &style_description, &update_tx).await
            }
            ServiceCommand::Download { kind, result } => {
                handle_download(&client, kind, &result, &update_tx).await
            }
            ServiceCommand::Recommend {
                generation,
                file_name,
                media_type,
                bytes,
            } => {
                let image = SelectedImage {
                    file_name,
                    media_type,
                    bytes,
                };
                handle_recommend(&client, generation, &image, &update_tx).await
            }
        };

        if disconnected {
            info!("Update channel closed, shutting down service task");
            break;
        }
    }

    Ok(())
}

/// Returns `true` when the update channel is closed.
async fn handle_generate(
    client: &ServiceClient,
    generation: u64,
    image: &SelectedImage,
    style_description: &str,
    update_tx: &async_channel::Sender<ServiceUpdate>,
) -> bool {
    match client.generate(image, style_description).await {
        Ok(result) => {
            let preview = client.fetch_artifact(ArtifactKind::Preview, &result).await;
            if update_tx
                .send(ServiceUpdate::Generated { generation, result })
                .await
                .is_err()
            {
                return true;
            }
            match preview {
                Ok(bytes) => update_tx
                    .send(ServiceUpdate::PreviewReady { generation, bytes })
                    .await
                    .is_err(),
                Err(e) => {
                    // Display-only fetch; the downloadable artifact is intact
                    debug!("Preview fetch failed: {}", e);
                    false
                }
            }
        }
        Err(e) => {
            let (message, detail) = failure_parts(&e);
            update_tx
                .send(ServiceUpdate::GenerateFailed {
                    generation,
                    message,
                    detail,
                })
                .await
                .is_err()
        }
    }
}

async fn handle_download(
    client: &ServiceClient,
    kind: ArtifactKind,
    result: &GenerationResult,
    update_tx: &async_channel::Sender<ServiceUpdate>,
) -> bool {
    let saved = match client.fetch_artifact(kind, result).await {
        Ok(bytes) => save_artifact(&download_dir(), kind, &result.preset_id, &bytes),
        Err(e) => Err(e),
    };

    let update = match saved {
        Ok(path) => ServiceUpdate::Downloaded { kind, path },
        Err(e) => ServiceUpdate::DownloadFailed {
            kind,
            message: e.to_string(),
        },
    };
    update_tx.send(update).await.is_err()
}

async fn handle_recommend(
    client: &ServiceClient,
    generation: u64,
    image: &SelectedImage,
    update_tx: &async_channel::Sender<ServiceUpdate>,
) -> bool {
    // Advisory: a None here just means no chip is shown
    match client.recommend(image).await {
        Some(recommendation) => update_tx
            .send(ServiceUpdate::Recommended {
                generation,
                recommendation,
            })
            .await
            .is_err(),
        None => false,
    }
}

/// Split an error into the user-facing message and the optional
/// server-supplied detail.
fn failure_parts(error: &Error) -> (String, Option<String>) {
    match error {
        Error::Server { status, detail } => {
            (format!("Server error ({status})"), Some(detail.clone()))
        }
        other => (other.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_parts_server_error() {
        let err = Error::Server {
            status: 500,
            detail: "bad image".to_string(),
        };
        let (message, detail) = failure_parts(&err);
        assert_eq!(message, "Server error (500)");
        assert_eq!(detail.as_deref(), Some("bad image"));
    }

    #[test]
    fn test_failure_parts_other_errors_have_no_detail() {
        let err = Error::Download("connection reset".to_string());
        let (message, detail) = failure_parts(&err);
        assert_eq!(message, "Download failed: connection reset");
        assert!(detail.is_none());
    }
}
