use console::Term;

/// Install the Ctrl+C handler.
///
/// The first signal only prints a notice: every stored item is already
/// committed, so the run can be stopped safely and resumed by re-running.
/// A second signal exits immediately.
pub(crate) fn setup_shutdown_handler() {
    tokio::spawn(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            return;
        }

        let is_tty = Term::stdout().is_term();
        if is_tty {
            eprintln!("\n\nInterrupt received. Finished items are already saved.");
            eprintln!("Press Ctrl+C again to quit; re-run to pick up where this left off.");
        } else {
            tracing::warn!("Interrupt received, press Ctrl+C again to quit");
        }

        if tokio::signal::ctrl_c().await.is_ok() {
            if is_tty {
                eprintln!("Force quit!");
            }
            std::process::exit(130);
        }
    });
}
