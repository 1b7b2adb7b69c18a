//! UI Components
//!
//! Reusable Leptos components.

mod delete_confirm_button;
mod export_buttons;
mod form;
mod frame;
mod stat_cards;
mod table;
mod toasts;

pub use delete_confirm_button::DeleteConfirmButton;
pub use export_buttons::ExportButtons;
pub use form::{DateField, Dialog, NumberField, RefSelect, SelectField, TextField};
pub use frame::Frame;
pub use stat_cards::StatCards;
pub use table::{EmptyRow, ErrorState, Pager, SearchBar, SortHeader};
pub use toasts::Toasts;
