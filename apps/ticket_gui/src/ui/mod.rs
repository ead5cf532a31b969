//! egui rendering of the projected form screens.

pub mod app;
pub mod preview;
pub mod theme;

pub use app::TicketApp;
