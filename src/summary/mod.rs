//! Summary model
//!
//! A summary is always handed out in its normalized shape: every field present and of
//! the right element type, whatever the input looked like.

pub mod mock;
mod render;

pub use mock::MockSummarizer;
pub use render::{points_from_text, points_to_text, render_html, render_text};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Owner used for action items that arrive without one
pub const UNASSIGNED_OWNER: &str = "Unassigned";

/// Meeting summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Key takeaways, in display order
    pub points: Vec<String>,

    /// Decisions reached during the meeting
    pub decisions: Vec<String>,

    /// Follow-up tasks
    pub action_items: Vec<ActionItem>,
}

/// A follow-up task with an owner and a due date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub owner: String,
    pub task: String,
    pub due: String,
}

impl Summary {
    /// Apply the [`normalize`] defaults to an already typed summary.
    pub fn normalized(mut self) -> Summary {
        for item in &mut self.action_items {
            if item.owner.is_empty() {
                item.owner = UNASSIGNED_OWNER.to_string();
            }
        }
        self
    }

    /// Whether the summary carries no content at all
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.decisions.is_empty() && self.action_items.is_empty()
    }
}

/// Coerce any JSON value into a well-formed [`Summary`].
///
/// Missing or wrong-typed fields become empty lists. Never fails.
pub fn normalize(value: &Value) -> Summary {
    Summary {
        points: string_list(value.get("points")),
        decisions: string_list(value.get("decisions")),
        action_items: match value.get("action_items") {
            Some(Value::Array(items)) => items.iter().map(action_item).collect(),
            _ => Vec::new(),
        },
    }
}

fn string_list(field: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = field else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect()
}

fn action_item(value: &Value) -> ActionItem {
    let text = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let owner = text("owner");
    ActionItem {
        owner: if owner.is_empty() {
            UNASSIGNED_OWNER.to_string()
        } else {
            owner
        },
        task: text("task"),
        due: text("due"),
    }
}
