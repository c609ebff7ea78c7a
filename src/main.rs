use anyhow::Context;
use nav_updater::app::session::run_interactive;
use nav_updater::utils::{logger, validation::Validate};
use nav_updater::{ConsoleReporter, SystemVolumes, Updater, UpdaterConfig};

fn main() -> anyhow::Result<()> {
    logger::init_cli_logger();

    let config = match UpdaterConfig::from_environment() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to resolve working paths: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    tracing::info!(
        "Source folders in {}, backups under {}",
        config.source_root.display(),
        config.backup_root().display()
    );

    let updater = Updater::new(config, SystemVolumes, ConsoleReporter::stdout());

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    let runs = run_interactive(&mut input, &mut output, || {
        updater.run().context("update run failed")
    })
    .context("console session failed")?;

    tracing::info!("Session finished after {} run(s)", runs);
    Ok(())
}
