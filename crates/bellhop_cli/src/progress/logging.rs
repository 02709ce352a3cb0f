use bellhop::sync::SyncProgress;

/// Logging reporter using tracing for structured output.
pub struct LoggingReporter;

impl LoggingReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, event: SyncProgress) {
        match event {
            SyncProgress::FetchingCollection { collection, total } => {
                tracing::info!(%collection, total, "Fetching collection");
            }

            SyncProgress::FetchedPage {
                collection,
                offset,
                count,
            } => {
                tracing::debug!(%collection, offset, count, "Fetched page");
            }

            SyncProgress::SavedPost {
                collection,
                external_id,
                post_type,
            } => {
                tracing::debug!(%collection, %external_id, %post_type, "Saved post");
            }

            SyncProgress::SkippedExisting {
                collection,
                external_id,
            } => {
                tracing::debug!(%collection, %external_id, "Already stored");
            }

            SyncProgress::ItemFailed {
                collection,
                external_id,
                error,
            } => {
                tracing::warn!(%collection, %external_id, %error, "Item failed");
            }

            SyncProgress::RemoteMutationFailed {
                collection,
                external_id,
                error,
            } => {
                tracing::warn!(%collection, %external_id, %error, "Remote cleanup failed");
            }

            SyncProgress::CollectionComplete {
                collection,
                saved,
                skipped,
                failed,
            } => {
                tracing::info!(%collection, saved, skipped, failed, "Collection complete");
            }

            SyncProgress::RemovedSubscriptions { count } => {
                tracing::info!(count, "Removed local subscriptions");
            }

            SyncProgress::SavedSubscription { blog_name } => {
                tracing::debug!(%blog_name, "Saved subscription");
            }

            SyncProgress::Followed { url } => {
                tracing::info!(%url, "Followed");
            }

            SyncProgress::Warning { message } => {
                tracing::warn!("{}", message);
            }

            _ => {}
        }
    }
}

impl Default for LoggingReporter {
    fn default() -> Self {
        Self::new()
    }
}
