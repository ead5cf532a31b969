use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use form_core::load_settings;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::{theme, TicketApp};

#[derive(Debug, Parser)]
#[command(name = "ticket_gui", about = "Conference ticket generator")]
struct Args {
    /// TOML settings file (defaults to ./ticket.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    event_name: Option<String>,
    #[arg(long)]
    event_date: Option<String>,
    #[arg(long)]
    event_location: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    settings.apply_event_flags(args.event_name, args.event_date, args.event_location);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx)?;

    let title = format!("{} Ticket", settings.event_name);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size([720.0, 860.0])
            .with_min_inner_size([520.0, 640.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let event = settings.event();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(theme::visuals());
            Ok(Box::new(TicketApp::new(cmd_tx, ui_rx, event)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("{err}"))
    .context("ticket window exited with an error")
}
