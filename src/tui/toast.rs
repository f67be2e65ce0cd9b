use std::time::{Duration, Instant};

/// A transient error notification drawn on top of the current view.
#[derive(Debug, Clone)]
pub struct Toast {
    pub title: String,
    pub description: String,
    shown_at: Instant,
}

#[derive(Debug)]
pub struct Toaster {
    toasts: Vec<Toast>,
    ttl: Duration,
}

impl Toaster {
    pub fn new(ttl: Duration) -> Self {
        Toaster { toasts: Vec::new(), ttl }
    }

    /// Shows an error notification.
    pub fn error(&mut self, description: &str) {
        self.toasts.push(Toast {
            title: "Error".to_string(),
            description: description.to_string(),
            shown_at: Instant::now(),
        });
    }

    /// Drops notifications older than the configured lifetime.
    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.toasts.retain(|t| now.duration_since(t.shown_at) < ttl);
    }

    pub fn dismiss_all(&mut self) {
        self.toasts.clear();
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire() {
        let mut toaster = Toaster::new(Duration::from_millis(50));
        toaster.error("Failed to fetch tasks. Please try again later.");
        assert_eq!(toaster.latest().map(|t| t.title.as_str()), Some("Error"));

        toaster.prune(Instant::now() + Duration::from_millis(100));
        assert!(toaster.latest().is_none());
    }

    #[test]
    fn dismiss_clears_everything() {
        let mut toaster = Toaster::new(Duration::from_secs(10));
        toaster.error("Failed to delete task. Please try again.");
        toaster.error("Failed to update task. Please try again.");
        assert_eq!(
            toaster.latest().map(|t| t.description.as_str()),
            Some("Failed to update task. Please try again.")
        );
        toaster.dismiss_all();
        assert!(toaster.latest().is_none());
    }
}
