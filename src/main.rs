use anyhow::Context;
use sqlbro::session::run;
use sqlbro::settings::Settings;
use sqlbro::user_interaction::{print_insight, Terminal};
use tracing_subscriber::EnvFilter;

const BRO_VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--version") {
        print_insight(BRO_VERSION);
        return Ok(());
    }

    // Diagnostics stay on stderr and quiet unless RUST_LOG asks otherwise.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    println!(
        r#"
  ____   ___  _       _
 / ___| / _ \| |     | |__  _ __ ___
 \___ \| | | | |     | '_ \| '__/ _ \
  ___) | |_| | |___  | |_) | | | (_) |
 |____/ \__\_\_____| |_.__/|_|  \___/

"#
    );
    print_insight("Welcome to the Automated Extract and Analyse Tool. Make sure you have SQL and R.");

    let settings = Settings::from_current_dir()?;
    let mut terminal = Terminal::new().context("Failed to initialize the line editor")?;

    let output_file = run(&mut terminal, &settings)
        .with_context(|| format!("No query saved to {}", settings.output_file.display()))?;
    tracing::debug!(path = %output_file.display(), "done");

    Ok(())
}
