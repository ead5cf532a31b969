//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use anyhow::Context;
use crossbeam_channel::{Receiver, Sender};
use form_core::{load_avatar, UploadedAvatar};
use shared::{domain::SelectionId, error::AvatarError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> anyhow::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("ticket-bridge".to_string())
        .spawn(move || run(cmd_rx, ui_tx))
        .context("failed to spawn backend bridge thread")
}

fn run(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("ticket-decode")
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BridgeStartup,
                format!("failed to build decode runtime: {err}"),
            )));
            tracing::error!("failed to build backend runtime: {err}");
            return;
        }
    };

    let _ = ui_tx.try_send(UiEvent::Info("Ready".to_string()));

    runtime.block_on(async move {
        while let Ok(cmd) = cmd_rx.recv() {
            tracing::debug!(command = cmd.name(), "backend: received command");
            match cmd {
                BackendCommand::DecodeAvatar { selection, pick } => {
                    let ui_tx = ui_tx.clone();
                    // Decodes run concurrently; the form keeps only the latest selection.
                    tokio::spawn(async move {
                        let source = pick.into_source();
                        let result = load_avatar(source.as_ref()).await;
                        let delivery = tokio::task::spawn_blocking(move || {
                            deliver_decode(&ui_tx, selection, result)
                        });
                        if let Err(err) = delivery.await {
                            tracing::error!(
                                selection = selection.0,
                                "avatar decode delivery failed: {err}"
                            );
                        }
                    });
                }
            }
        }
        tracing::debug!("backend: command queue closed");
    });
}

/// Every selection the UI started must hear back, so a full queue waits
/// for the UI to drain instead of dropping the result.
fn deliver_decode(
    ui_tx: &Sender<UiEvent>,
    selection: SelectionId,
    result: Result<UploadedAvatar, AvatarError>,
) {
    if ui_tx
        .send(UiEvent::AvatarDecoded { selection, result })
        .is_err()
    {
        tracing::debug!(
            selection = selection.0,
            "ui closed before avatar decode finished"
        );
    }
}
