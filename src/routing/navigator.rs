use std::sync::Mutex;

use tracing::info;

/// Moves the application to another path.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
    fn current(&self) -> String;
}

/// In-process location with its history, newest last.
pub struct LocationHistory {
    entries: Mutex<Vec<String>>,
}

impl LocationHistory {
    pub fn new(start: &str) -> Self {
        Self {
            entries: Mutex::new(vec![start.to_string()]),
        }
    }

    pub fn entries(&self) -> Vec<String> {
        match self.entries.lock() {
            Ok(e) => e.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Default for LocationHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for LocationHistory {
    fn navigate(&self, path: &str) {
        info!("navigating to {}", path);
        let mut entries = match self.entries.lock() {
            Ok(e) => e,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.push(path.to_string());
    }

    fn current(&self) -> String {
        self.entries().last().cloned().unwrap_or_else(|| "/".to_string())
    }
}
