pub mod board_view;
pub mod reminder_form;

pub use board_view::BoardSection;
pub use reminder_form::ReminderForm;
