//! Progress reporting for sync operations.
//!
//! This module provides two modes of progress reporting:
//! - Interactive mode (TTY): Animated progress bars using indicatif
//! - Logging mode (non-TTY): Structured logging using tracing
//!
//! Each collection (posts, likes, following, subscriptions) gets its own bar.

mod interactive;
mod logging;

use std::sync::Arc;

use bellhop::sync::{ProgressCallback, SyncProgress};
use console::Term;

pub use interactive::InteractiveReporter;
pub use logging::LoggingReporter;

/// Progress reporter that handles both interactive and logging modes.
pub enum ProgressReporter {
    /// Interactive progress bars for TTY.
    Interactive(InteractiveReporter),
    /// Structured logging for non-TTY (CI, pipes).
    Logging(LoggingReporter),
}

impl ProgressReporter {
    /// Create a new progress reporter, auto-detecting TTY mode.
    pub fn new() -> Self {
        if Term::stdout().is_term() {
            Self::Interactive(InteractiveReporter::new())
        } else {
            Self::Logging(LoggingReporter::new())
        }
    }

    pub fn handle(&self, event: SyncProgress) {
        match self {
            Self::Interactive(r) => r.handle(event),
            Self::Logging(r) => r.handle(event),
        }
    }

    /// Convert to a ProgressCallback for the library.
    pub fn as_callback(self: &Arc<Self>) -> Arc<ProgressCallback> {
        let reporter = Arc::clone(self);
        Arc::new(Box::new(move |event| {
            reporter.handle(event);
        }))
    }

    /// Finish all progress bars (interactive mode only).
    pub fn finish(&self) {
        if let Self::Interactive(r) = self {
            r.finish();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use bellhop::sync::Collection;

    use super::*;

    fn events() -> Vec<SyncProgress> {
        vec![
            SyncProgress::FetchingCollection {
                collection: Collection::BlogPosts,
                total: 2,
            },
            SyncProgress::FetchedPage {
                collection: Collection::BlogPosts,
                offset: 0,
                count: 2,
            },
            SyncProgress::SavedPost {
                collection: Collection::BlogPosts,
                external_id: "1".to_string(),
                post_type: "text".to_string(),
            },
            SyncProgress::ItemFailed {
                collection: Collection::BlogPosts,
                external_id: "2".to_string(),
                error: "unsupported post type: quote".to_string(),
            },
            SyncProgress::CollectionComplete {
                collection: Collection::BlogPosts,
                saved: 1,
                skipped: 0,
                failed: 1,
            },
            SyncProgress::Followed {
                url: "https://staff.tumblr.com/".to_string(),
            },
            SyncProgress::Warning {
                message: "careful".to_string(),
            },
        ]
    }

    #[test]
    fn test_logging_reporter_handles_all_events() {
        let reporter = Arc::new(ProgressReporter::Logging(LoggingReporter::new()));
        let callback = reporter.as_callback();
        for event in events() {
            callback(event);
        }
        reporter.finish();
    }

    #[test]
    fn test_interactive_reporter_handles_all_events() {
        let reporter = ProgressReporter::Interactive(InteractiveReporter::hidden());
        for event in events() {
            reporter.handle(event);
        }
        // Events for a collection that never announced itself are tolerated.
        reporter.handle(SyncProgress::SavedSubscription {
            blog_name: "staff".to_string(),
        });
        reporter.finish();
    }
}
