pub mod config;
pub mod export;
pub mod handlers;
pub mod store;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use store::ContactStore;
pub use view::{ContactListView, SharedView};
