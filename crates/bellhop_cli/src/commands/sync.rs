use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use bellhop::connect_and_migrate;
use bellhop::media::{Downloader, MediaStore};
use bellhop::sync::{ContentSyncReport, FlowStats, Syncer};
use bellhop::tumblr::TumblrClient;
use bellhop::ReqwestTransport;

use crate::config::Config;
use crate::progress::ProgressReporter;

/// Media files can be large; page requests keep the client's own timeout.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// What a command needs wired into the syncer.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Needs {
    Content,
    Subscriptions,
}

pub(crate) async fn build_syncer(
    config: &Config,
    database_url: &str,
    reporter: &Arc<ProgressReporter>,
    needs: Needs,
) -> Result<Syncer<TumblrClient>, Box<dyn Error>> {
    let client = TumblrClient::new(config.tumblr_credentials()?)?;
    let db = connect_and_migrate(database_url).await?;

    let mut builder = Syncer::builder()
        .platform(client)
        .database(Arc::new(db))
        .progress(reporter.as_callback());

    if needs == Needs::Content {
        let media_root = config
            .media_root()
            .ok_or("could not determine a media directory; set media.root")?;
        tracing::debug!(media_root = %media_root.display(), "media directory");
        let transport = ReqwestTransport::with_timeout(DOWNLOAD_TIMEOUT)?;
        builder = builder
            .blog(config.tumblr_blog()?)
            .media_store(MediaStore::new(media_root))
            .downloader(Downloader::new(Arc::new(transport)));
    }

    Ok(builder.build()?)
}

pub(crate) async fn handle_sync(
    config: &Config,
    database_url: &str,
) -> Result<(), Box<dyn Error>> {
    let reporter = Arc::new(ProgressReporter::new());
    let syncer = build_syncer(config, database_url, &reporter, Needs::Content).await?;

    let result = syncer.sync_content().await;
    reporter.finish();
    let report = result?;

    print_summary(&report);
    Ok(())
}

fn print_summary(report: &ContentSyncReport) {
    println!();
    print_flow("Posts", &report.posts);
    print_flow("Likes", &report.likes);

    let errors: Vec<&str> = report.errors().collect();
    if !errors.is_empty() {
        println!("\n{} item(s) failed and will be retried next run:", errors.len());
        for error in errors {
            println!("  - {error}");
        }
    }
}

fn print_flow(label: &str, stats: &FlowStats) {
    println!(
        "{label:<6} {saved} saved, {skipped} already stored, {failed} failed (of {total})",
        saved = stats.saved,
        skipped = stats.skipped_existing,
        failed = stats.failed,
        total = stats.total,
    );
    if stats.remote_mutation_failures > 0 {
        println!(
            "       {} remote cleanup call(s) failed",
            stats.remote_mutation_failures
        );
    }
}
