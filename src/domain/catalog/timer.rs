use std::collections::HashMap;

use chrono::{DateTime, Utc};

/// Remembers when each module was opened.
#[derive(Debug, Default, Clone)]
pub struct ModuleTimer {
    started: HashMap<String, DateTime<Utc>>,
}

impl ModuleTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restarts the clock if the module was already started.
    pub fn start_module(&mut self, module_id: &str, now: DateTime<Utc>) {
        self.started.insert(module_id.to_string(), now);
    }

    pub fn is_started(&self, module_id: &str) -> bool {
        self.started.contains_key(module_id)
    }

    /// Elapsed time as `Hh Mm Ss`, `Mm Ss` or `Ss`; empty if never started.
    pub fn elapsed(&self, module_id: &str, now: DateTime<Utc>) -> String {
        match self.started.get(module_id) {
            Some(start) => format_elapsed((now - *start).num_seconds()),
            None => String::new(),
        }
    }
}

pub fn format_elapsed(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}
