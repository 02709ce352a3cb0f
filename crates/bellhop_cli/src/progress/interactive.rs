use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use bellhop::sync::{Collection, SyncProgress};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Interactive progress reporter using indicatif.
///
/// One bar per collection. The bar turns from a spinner into a counted bar
/// once the collection total is known.
pub struct InteractiveReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<Collection, ProgressBar>>,
}

impl InteractiveReporter {
    pub fn new() -> Self {
        Self::with_multi(MultiProgress::new())
    }

    /// A reporter that draws nowhere.
    #[cfg(test)]
    pub fn hidden() -> Self {
        Self::with_multi(MultiProgress::with_draw_target(
            indicatif::ProgressDrawTarget::hidden(),
        ))
    }

    fn with_multi(multi: MultiProgress) -> Self {
        Self {
            multi,
            bars: Mutex::new(HashMap::new()),
        }
    }

    pub fn handle(&self, event: SyncProgress) {
        let Ok(mut bars) = self.bars.lock() else {
            return;
        };

        match event {
            SyncProgress::FetchingCollection { collection, total } => {
                let bar = self.multi.add(ProgressBar::new(total));
                bar.set_style(Self::bar_style());
                bar.set_prefix(format!("{:13}", collection.as_str()));
                bar.set_message(format!("Fetching {total} items..."));
                if let Some(old) = bars.insert(collection, bar) {
                    old.finish_and_clear();
                }
            }

            SyncProgress::FetchedPage {
                collection,
                offset,
                count,
            } => {
                let bar = Self::bar_for(&self.multi, &mut bars, collection);
                bar.set_message(format!("Page at offset {offset} ({count} items)"));
            }

            SyncProgress::SavedPost {
                collection,
                external_id,
                post_type,
            } => {
                let bar = Self::bar_for(&self.multi, &mut bars, collection);
                bar.inc(1);
                bar.set_message(format!("Saved {post_type} post {external_id}"));
            }

            SyncProgress::SkippedExisting { collection, .. } => {
                Self::bar_for(&self.multi, &mut bars, collection).inc(1);
            }

            SyncProgress::ItemFailed {
                collection,
                external_id,
                error,
            } => {
                Self::bar_for(&self.multi, &mut bars, collection).inc(1);
                self.multi
                    .println(format!("  {collection} {external_id}: {error}"))
                    .ok();
            }

            SyncProgress::RemoteMutationFailed {
                collection,
                external_id,
                error,
            } => {
                self.multi
                    .println(format!("  {collection} {external_id}: remote cleanup failed: {error}"))
                    .ok();
            }

            SyncProgress::CollectionComplete {
                collection,
                saved,
                skipped,
                failed,
            } => {
                let bar = Self::bar_for(&self.multi, &mut bars, collection);
                bar.finish_with_message(format!(
                    "{saved} saved, {skipped} already stored, {failed} failed"
                ));
            }

            SyncProgress::RemovedSubscriptions { count } => {
                self.multi
                    .println(format!("Removed {count} local subscriptions"))
                    .ok();
            }

            SyncProgress::SavedSubscription { blog_name } => {
                let bar = Self::bar_for(&self.multi, &mut bars, Collection::Following);
                bar.inc(1);
                bar.set_message(format!("Saved {blog_name}"));
            }

            SyncProgress::Followed { url } => {
                let bar = Self::bar_for(&self.multi, &mut bars, Collection::Subscriptions);
                bar.inc(1);
                bar.set_message(format!("Followed {url}"));
            }

            SyncProgress::Warning { message } => {
                self.multi.println(format!("⚠ {message}")).ok();
            }

            _ => {}
        }
    }

    /// The collection's bar, or a spinner if it was never announced.
    fn bar_for<'a>(
        multi: &MultiProgress,
        bars: &'a mut HashMap<Collection, ProgressBar>,
        collection: Collection,
    ) -> &'a ProgressBar {
        bars.entry(collection).or_insert_with(|| {
            let bar = multi.add(ProgressBar::new_spinner());
            bar.set_style(Self::spinner_style());
            bar.set_prefix(format!("{:13}", collection.as_str()));
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        })
    }

    pub fn finish(&self) {
        let Ok(bars) = self.bars.lock() else {
            return;
        };
        for bar in bars.values() {
            if !bar.is_finished() {
                bar.finish();
            }
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{prefix:.bold.cyan} {spinner:.green} {pos:>4} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos:>4}/{len:4} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░")
    }
}

impl Default for InteractiveReporter {
    fn default() -> Self {
        Self::new()
    }
}
