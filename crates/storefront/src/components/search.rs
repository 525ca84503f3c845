//! Search box.
//!
//! Keystrokes are debounced; once typing pauses, the latest query is handed
//! to a [`SearchHook`] if it is long enough.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::debounce::Debouncer;

/// Receives search queries once typing has paused.
pub trait SearchHook: Send + Sync {
    fn search(&self, query: &str);
}

/// Default hook: logs the query.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSearch;

impl SearchHook for LogSearch {
    fn search(&self, query: &str) {
        info!(query, "Searching for");
    }
}

/// Run a search unless the query is shorter than `min_chars` characters.
///
/// Returns whether the hook was called.
pub fn perform_search(hook: &dyn SearchHook, query: &str, min_chars: usize) -> bool {
    if query.chars().count() < min_chars {
        debug!(query, min_chars, "Query too short, skipping search");
        return false;
    }
    hook.search(query);
    true
}

/// Debounced search input.
pub struct SearchBox {
    debouncer: Debouncer<String>,
}

impl SearchBox {
    #[must_use]
    pub fn new(config: &SearchConfig, hook: Arc<dyn SearchHook>) -> Self {
        let min_chars = config.min_chars;
        Self {
            debouncer: Debouncer::new(config.debounce, move |query: String| {
                perform_search(hook.as_ref(), &query, min_chars);
            }),
        }
    }

    /// Feed the current value of the search input.
    pub fn on_input(&self, value: impl Into<String>) {
        self.debouncer.call(value.into());
    }
}
