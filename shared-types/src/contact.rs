use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::phone;

/// A contact as shown in the list.
///
/// `display_phone` and `raw_phone` are both derived from the same source value
/// in [`ContactRecord::new`] and have no setters. Only `selected` changes after
/// creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContactRecord {
    id: u32,
    name: String,
    display_phone: String,
    raw_phone: String,
    selected: bool,
}

impl ContactRecord {
    /// Every record starts selected: the list is opt-out, not opt-in.
    pub const INITIALLY_SELECTED: bool = true;

    pub fn new(id: u32, name: impl Into<String>, raw_phone: impl Into<String>) -> Self {
        let raw_phone = raw_phone.into();
        Self {
            id,
            name: name.into(),
            display_phone: phone::format_display(&raw_phone),
            raw_phone,
            selected: Self::INITIALLY_SELECTED,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_phone(&self) -> &str {
        &self.display_phone
    }

    pub fn raw_phone(&self) -> &str {
        &self.raw_phone
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn toggle(&mut self) {
        self.selected = !self.selected;
    }
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContactsResponse {
    pub contacts: Vec<ContactRecord>,
}
