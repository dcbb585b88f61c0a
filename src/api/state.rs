//! Application state for the payroll engine API.

use std::sync::Arc;

use crate::config::RuleTable;

/// Shared application state.
///
/// Holds the validated rule table every handler computes against. The table
/// is immutable once loaded, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    rules: Arc<RuleTable>,
}

impl AppState {
    /// Creates a new application state over a rule table.
    pub fn new(rules: RuleTable) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }

    /// Returns the rule table.
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }
}
