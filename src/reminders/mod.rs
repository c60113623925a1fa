pub mod reminder;
pub mod status;
pub mod store;

pub use reminder::Reminder;
pub use status::Status;
pub use store::{Store, StoreError};
