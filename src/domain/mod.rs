pub mod booking;
pub mod service;
pub mod slot;

pub use booking::{BookingDraft, ConfirmationCode, ContactInfo, Step};
pub use service::{Price, Service};
pub use slot::{SlotWindow, TimeSlot};

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}
