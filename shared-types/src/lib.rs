pub mod contact;
pub mod export;
pub mod notification;
pub mod phone;

pub use contact::{ContactRecord, ContactsResponse};
pub use export::{ExportEntry, ExportOutcome, ExportResponse, PickerOptions, PickerRequest};
pub use notification::{Notification, NotificationLevel, NotificationResponse};
