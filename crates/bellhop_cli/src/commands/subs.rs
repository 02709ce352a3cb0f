use std::error::Error;
use std::sync::Arc;

use crate::SubsAction;
use crate::commands::sync::{Needs, build_syncer};
use crate::config::Config;
use crate::progress::ProgressReporter;

pub(crate) async fn handle_subs(
    action: SubsAction,
    config: &Config,
    database_url: &str,
) -> Result<(), Box<dyn Error>> {
    let reporter = Arc::new(ProgressReporter::new());
    let syncer = build_syncer(config, database_url, &reporter, Needs::Subscriptions).await?;

    match action {
        SubsAction::Import => {
            let result = syncer.import_subscriptions().await;
            reporter.finish();
            let report = result?;
            println!(
                "\nReplaced {} local subscription(s) with {} of {} remote.",
                report.removed, report.saved, report.total
            );
            for error in &report.errors {
                println!("  - {error}");
            }
        }
        SubsAction::Export => {
            let result = syncer.export_subscriptions().await;
            reporter.finish();
            let report = result?;
            println!("\nFollowed {} of {} subscription(s).", report.followed, report.total);
        }
    }

    Ok(())
}
