use eframe::egui;
use form_core::view::FieldVisual;

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(0xf5, 0x74, 0x63);
pub const NEUTRAL_BORDER: egui::Color32 = egui::Color32::from_rgb(0xd1, 0xd0, 0xd5);
pub const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0x0d, 0x08, 0x2d);
pub const MUTED_TEXT: egui::Color32 = egui::Color32::from_rgb(0x87, 0x84, 0xa4);
pub const ERROR: egui::Color32 = egui::Color32::from_rgb(0xe1, 0x60, 0x51);
pub const VALID: egui::Color32 = egui::Color32::from_rgb(0x5c, 0xc8, 0x8a);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropZoneStyle {
    pub stroke: egui::Stroke,
    pub fill: egui::Color32,
}

/// Highlighted while files hover the window, neutral otherwise.
pub fn drop_zone_style(files_hovering: bool) -> DropZoneStyle {
    if files_hovering {
        DropZoneStyle {
            stroke: egui::Stroke::new(1.5, ACCENT),
            fill: egui::Color32::from_rgba_unmultiplied(0xf5, 0x74, 0x63, 51),
        }
    } else {
        DropZoneStyle {
            stroke: egui::Stroke::new(1.0, NEUTRAL_BORDER),
            fill: egui::Color32::from_rgba_unmultiplied(0xff, 0xff, 0xff, 13),
        }
    }
}

pub fn field_stroke(visual: FieldVisual) -> egui::Stroke {
    match visual {
        FieldVisual::Neutral => egui::Stroke::new(1.0, NEUTRAL_BORDER.gamma_multiply(0.6)),
        FieldVisual::Error => egui::Stroke::new(1.5, ERROR),
        FieldVisual::Valid => egui::Stroke::new(1.5, VALID),
    }
}

pub fn visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = BACKGROUND;
    visuals.window_fill = BACKGROUND.gamma_multiply(1.2);
    visuals.extreme_bg_color = egui::Color32::from_rgba_unmultiplied(0xff, 0xff, 0xff, 20);
    visuals.selection.bg_fill = ACCENT.gamma_multiply(0.7);
    visuals.hyperlink_color = ACCENT;
    visuals.error_fg_color = ERROR;
    visuals
}
