//! Extracted records and the per-run result set

use serde::Serialize;

/// One cast member credited on a detail page
///
/// `full_name` and `role` are whitespace-trimmed. `profile_url` is absolute,
/// or empty when the row carries no profile link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Actor {
    pub full_name: String,

    #[serde(rename = "url")]
    pub profile_url: String,

    #[serde(rename = "character")]
    pub role: String,
}

impl Actor {
    /// Builds a record, trimming the name and role
    pub fn new(full_name: &str, profile_url: impl Into<String>, role: &str) -> Self {
        Self {
            full_name: full_name.trim().to_string(),
            profile_url: profile_url.into(),
            role: role.trim().to_string(),
        }
    }
}

/// All records of a run, in item completion order
///
/// Owned by the coordinator and appended to only with the complete record
/// slice of a finished item.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    records: Vec<Actor>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the records of one finished item
    pub fn append_item(&mut self, records: Vec<Actor>) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Actor] {
        &self.records
    }
}
