use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use form_core::{
    project,
    view::{upload_hint, AvatarPanel, FieldView, IntakeView, Screen, TicketView},
    FormState, SubmitOutcome,
};
use shared::{
    error::{Alert, AlertKind},
    summary::EventDetails,
};

use crate::backend_bridge::commands::{AvatarPick, BackendCommand};
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::apply_ui_event;
use crate::ui::preview::{AvatarTextureCache, CachedPreview};
use crate::ui::theme;

const CARD_WIDTH: f32 = 460.0;
const AVATAR_PREVIEW_SIZE: f32 = 72.0;
const TICKET_AVATAR_SIZE: f32 = 64.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntakeAction {
    BrowseAvatar,
    ChangeAvatar,
    RemoveAvatar,
    Submit,
    DismissAlert,
}

pub struct TicketApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    form: FormState,
    status: String,
    avatar_textures: AvatarTextureCache,
    last_pick_dir: Option<PathBuf>,
}

fn default_upload_dir() -> Option<PathBuf> {
    dirs::picture_dir()
        .or_else(dirs::desktop_dir)
        .or_else(dirs::download_dir)
        .or_else(dirs::home_dir)
}

fn alert_title(kind: AlertKind) -> &'static str {
    match kind {
        AlertKind::UnsupportedType => "Unsupported file",
        AlertKind::TooLarge => "File too large",
        AlertKind::Unreadable => "Could not read file",
        AlertKind::MissingAvatar => "Avatar required",
    }
}

/// Returns true once the user dismisses the alert.
fn show_alert_modal(ctx: &egui::Context, alert: &Alert) -> bool {
    let mut dismissed = false;
    let response = egui::Modal::new(egui::Id::new("blocking_alert")).show(ctx, |ui| {
        ui.set_width(320.0);
        ui.heading(alert_title(alert.kind));
        ui.add_space(4.0);
        ui.label(&alert.message);
        ui.add_space(10.0);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let ok = ui.add(
                egui::Button::new(egui::RichText::new("OK").strong()).fill(theme::ACCENT),
            );
            ok.request_focus();
            if ok.clicked() {
                dismissed = true;
            }
        });
    });
    dismissed || response.should_close()
}

impl TicketApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, event: EventDetails) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            form: FormState::new(event),
            status: "Starting avatar decoder...".to_string(),
            avatar_textures: AvatarTextureCache::default(),
            last_pick_dir: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            apply_ui_event(&mut self.form, &mut self.status, event);
        }
    }

    /// Cancelling the dialog leaves the current avatar untouched.
    fn pick_avatar_file(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Upload avatar")
            .add_filter("Images", &["jpg", "jpeg", "png"]);
        if let Some(dir) = self.last_pick_dir.clone().or_else(default_upload_dir) {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            self.last_pick_dir = path.parent().map(Path::to_path_buf);
            self.start_avatar_decode(AvatarPick::Path(path));
        }
    }

    fn start_avatar_decode(&mut self, pick: AvatarPick) {
        let Some(selection) = self.form.begin_avatar_selection() else {
            return;
        };
        self.status = "Reading avatar...".to_string();
        let queued = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::DecodeAvatar { selection, pick },
            &mut self.status,
        );
        if !queued {
            self.form.cancel_avatar_selection(selection);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };
        if self.form.alert().is_some() || self.form.ticket().is_some() {
            return;
        }

        let pick = match (file.path, file.bytes) {
            (Some(path), _) => AvatarPick::Path(path),
            (None, Some(bytes)) => AvatarPick::Dropped {
                name: file.name,
                mime: file.mime,
                bytes,
            },
            (None, None) => {
                tracing::debug!("ignoring drop without path or bytes");
                return;
            }
        };
        self.start_avatar_decode(pick);
    }

    fn submit(&mut self) {
        match self.form.submit(&mut rand::rng()) {
            SubmitOutcome::Issued(ticket) => {
                self.status = format!("Ticket {} generated", ticket.ticket_number);
            }
            SubmitOutcome::FieldsInvalid(fields) => {
                self.status = format!("{} field(s) need attention", fields.len());
            }
            SubmitOutcome::MissingAvatar => {
                self.status = "Upload an avatar to continue".to_string();
            }
            SubmitOutcome::AlreadyIssued => {}
        }
    }

    fn apply_action(&mut self, action: IntakeAction) {
        match action {
            IntakeAction::BrowseAvatar | IntakeAction::ChangeAvatar => self.pick_avatar_file(),
            IntakeAction::RemoveAvatar => {
                if self.form.remove_avatar() {
                    self.avatar_textures.clear();
                    self.status = "Avatar removed".to_string();
                }
            }
            IntakeAction::Submit => self.submit(),
            IntakeAction::DismissAlert => {
                self.form.dismiss_alert();
            }
        }
    }

    fn show_hero(&self, ui: &mut egui::Ui) {
        ui.add_space(18.0);
        ui.label(
            egui::RichText::new(format!(
                "Your Journey to {} Starts Here!",
                self.form.event().name
            ))
            .size(30.0)
            .strong(),
        );
        ui.add_space(6.0);
        ui.label(
            egui::RichText::new("Secure your spot at next year's biggest coding conference.")
                .color(theme::MUTED_TEXT),
        );
        ui.add_space(18.0);
    }

    fn show_avatar_panel(
        &mut self,
        ui: &mut egui::Ui,
        panel: &AvatarPanel,
        files_hovering: bool,
        actions: &mut Vec<IntakeAction>,
    ) {
        ui.label(egui::RichText::new("Upload Avatar").strong());
        let style = theme::drop_zone_style(files_hovering);

        let inner = egui::Frame::new()
            .fill(style.fill)
            .stroke(style.stroke)
            .corner_radius(12.0)
            .inner_margin(egui::Margin::symmetric(16, 14))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.vertical_centered(|ui| match panel {
                    AvatarPanel::Placeholder { .. } => {
                        ui.label(egui::RichText::new("⬆").size(26.0));
                        ui.label("Drag and drop or click to upload");
                    }
                    AvatarPanel::Decoding => {
                        ui.spinner();
                        ui.label(egui::RichText::new("Reading image...").weak());
                    }
                    AvatarPanel::Preview {
                        data_url,
                        file_name,
                        replacing,
                    } => {
                        match self.avatar_textures.get(ui.ctx(), data_url) {
                            CachedPreview::Ready(texture) => {
                                ui.add(
                                    egui::Image::new(texture)
                                        .fit_to_exact_size(egui::vec2(
                                            AVATAR_PREVIEW_SIZE,
                                            AVATAR_PREVIEW_SIZE,
                                        ))
                                        .corner_radius(10.0),
                                );
                            }
                            CachedPreview::Failed(_) => {
                                ui.label(
                                    egui::RichText::new(format!(
                                        "Preview unavailable for {file_name}"
                                    ))
                                    .weak(),
                                );
                            }
                        }
                        if *replacing {
                            ui.spinner();
                        }
                        ui.horizontal(|ui| {
                            if ui.small_button("Remove image").clicked() {
                                actions.push(IntakeAction::RemoveAvatar);
                            }
                            if ui.small_button("Change image").clicked() {
                                actions.push(IntakeAction::ChangeAvatar);
                            }
                        });
                    }
                });
            });

        // Only the placeholder opens the picker; the preview has its own buttons.
        if matches!(panel, AvatarPanel::Placeholder { .. }) {
            let zone = inner
                .response
                .interact(egui::Sense::click())
                .on_hover_cursor(egui::CursorIcon::PointingHand);
            if zone.clicked() {
                actions.push(IntakeAction::BrowseAvatar);
            }
        }

        let hint = match panel {
            AvatarPanel::Placeholder { hint } => hint.clone(),
            _ => upload_hint(),
        };
        ui.label(
            egui::RichText::new(format!("ⓘ {hint}"))
                .small()
                .color(theme::MUTED_TEXT),
        );
        ui.add_space(10.0);
    }

    /// Returns true when Enter was pressed inside the field.
    fn show_field(&mut self, ui: &mut egui::Ui, field: &FieldView) -> bool {
        ui.label(egui::RichText::new(field.label).strong());
        let value = self.form.value_mut(field.kind);

        let response = egui::Frame::new()
            .stroke(theme::field_stroke(field.visual))
            .corner_radius(10.0)
            .inner_margin(egui::Margin::symmetric(10, 6))
            .show(ui, |ui| {
                let edit = egui::TextEdit::singleline(value)
                    .id_salt(field.kind.key())
                    .hint_text(field.placeholder)
                    .frame(false)
                    .desired_width(f32::INFINITY);
                ui.add_sized([ui.available_width(), 26.0], edit)
            })
            .inner;

        if let Some(error) = &field.error {
            ui.label(
                egui::RichText::new(format!("ⓘ {error}"))
                    .small()
                    .color(theme::ERROR),
            );
        }
        ui.add_space(8.0);

        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
    }

    fn show_intake(&mut self, ctx: &egui::Context, view: &IntakeView, files_hovering: bool) {
        let mut actions = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.set_max_width(CARD_WIDTH);
                        if view.hero_visible {
                            self.show_hero(ui);
                        }
                    });
                    ui.vertical(|ui| {
                        let side = ((ui.available_width() - CARD_WIDTH) / 2.0).max(0.0);
                        ui.horizontal(|ui| {
                            ui.add_space(side);
                            ui.vertical(|ui| {
                                ui.set_width(CARD_WIDTH.min(ui.available_width()));
                                self.show_avatar_panel(ui, &view.avatar, files_hovering, &mut actions);
                                for field in &view.fields {
                                    if self.show_field(ui, field) {
                                        actions.push(IntakeAction::Submit);
                                    }
                                }

                                let submit = egui::Button::new(
                                    egui::RichText::new("Generate My Ticket")
                                        .strong()
                                        .size(16.0)
                                        .color(theme::BACKGROUND),
                                )
                                .fill(theme::ACCENT)
                                .min_size(egui::vec2(ui.available_width(), 40.0));
                                if ui.add(submit).clicked() {
                                    actions.push(IntakeAction::Submit);
                                }

                                ui.add_space(8.0);
                                ui.horizontal_wrapped(|ui| {
                                    ui.small("Status:");
                                    ui.small(egui::RichText::new(&self.status).weak());
                                });
                            });
                        });
                    });
                });
        });

        if let Some(alert) = &view.alert {
            if show_alert_modal(ctx, alert) {
                actions.push(IntakeAction::DismissAlert);
            }
        }

        for action in actions {
            self.apply_action(action);
        }
    }

    fn show_ticket(&mut self, ctx: &egui::Context, view: &TicketView) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.set_max_width(CARD_WIDTH + 80.0);
                        ui.add_space(24.0);
                        ui.horizontal_wrapped(|ui| {
                            ui.label(egui::RichText::new("Congrats, ").size(30.0).strong());
                            ui.label(
                                egui::RichText::new(&view.congrats_name)
                                    .size(30.0)
                                    .strong()
                                    .color(theme::ACCENT),
                            );
                            ui.label(
                                egui::RichText::new("! Your ticket is ready.")
                                    .size(30.0)
                                    .strong(),
                            );
                        });
                        ui.add_space(8.0);
                        ui.horizontal_wrapped(|ui| {
                            ui.label("We've emailed your ticket to");
                            ui.label(egui::RichText::new(&view.email).color(theme::ACCENT));
                            ui.label("and will send updates in the run up to the event.");
                        });
                        ui.add_space(28.0);

                        self.show_ticket_card(ui, view);
                    });
                });
        });
    }

    fn show_ticket_card(&mut self, ui: &mut egui::Ui, view: &TicketView) {
        egui::Frame::new()
            .fill(egui::Color32::from_rgba_unmultiplied(0xff, 0xff, 0xff, 12))
            .stroke(egui::Stroke::new(1.0, theme::NEUTRAL_BORDER.gamma_multiply(0.5)))
            .corner_radius(16.0)
            .inner_margin(egui::Margin::symmetric(20, 18))
            .show(ui, |ui| {
                ui.set_width(CARD_WIDTH);
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(&view.event_name).size(24.0).strong());
                        ui.label(egui::RichText::new(&view.event_line).color(theme::MUTED_TEXT));
                        ui.add_space(24.0);

                        ui.horizontal(|ui| {
                            match self.avatar_textures.get(ui.ctx(), &view.avatar_data_url) {
                                CachedPreview::Ready(texture) => {
                                    ui.add(
                                        egui::Image::new(texture)
                                            .fit_to_exact_size(egui::vec2(
                                                TICKET_AVATAR_SIZE,
                                                TICKET_AVATAR_SIZE,
                                            ))
                                            .corner_radius(10.0),
                                    );
                                }
                                CachedPreview::Failed(_) => {
                                    ui.allocate_space(egui::vec2(
                                        TICKET_AVATAR_SIZE,
                                        TICKET_AVATAR_SIZE,
                                    ));
                                }
                            }
                            ui.vertical(|ui| {
                                ui.label(egui::RichText::new(&view.full_name).size(20.0).strong());
                                ui.label(
                                    egui::RichText::new(&view.github_username)
                                        .color(theme::MUTED_TEXT),
                                );
                            });
                        });
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(&view.ticket_number)
                                .size(22.0)
                                .color(theme::MUTED_TEXT),
                        );
                    });
                });
            });
    }
}

impl eframe::App for TicketApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.handle_dropped_files(ctx);

        let files_hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
        match project(&self.form) {
            Screen::Intake(view) => self.show_intake(ctx, &view, files_hovering),
            Screen::Ticket(view) => self.show_ticket(ctx, &view),
        }

        if self.form.pending_selection().is_some() {
            ctx.request_repaint_after(Duration::from_millis(30));
        } else {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
