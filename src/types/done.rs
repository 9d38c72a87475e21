use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Prefix that marks a done as a goal rather than a completed task.
pub const GOAL_MARKER: &str = "[]";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Done {
    pub raw_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    pub owner: String,
    pub done_date: NaiveDate,
}

impl Done {
    pub fn is_goal(&self) -> bool {
        self.raw_text.starts_with(GOAL_MARKER)
    }
}

/// One page of a dones listing. Pagination state lives in the filter.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DoneListPage {
    pub count: u64,
    pub results: Vec<Done>,
}
