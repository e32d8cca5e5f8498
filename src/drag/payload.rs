use serde::{Deserialize, Serialize};

use crate::core::ItemId;
use crate::strip::StripId;

/// Pasteboard type of a dragged tab.
pub const TAB_ITEM_TYPE: &str = "tabstrip.item";

/// Data carried by a drag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragPayload {
    /// A tab dragged out of one of this process's strips.
    TabItem { strip: StripId, item: ItemId },
    /// Anything else, identified by its pasteboard type.
    Foreign { type_name: String, data: String },
}

impl DragPayload {
    pub fn foreign(type_name: impl Into<String>, data: impl Into<String>) -> Self {
        DragPayload::Foreign {
            type_name: type_name.into(),
            data: data.into(),
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            DragPayload::TabItem { .. } => TAB_ITEM_TYPE,
            DragPayload::Foreign { type_name, .. } => type_name,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }
}
