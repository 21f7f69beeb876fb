mod args;
mod global_settings;
mod list_view;
mod session;
pub mod tables;

use crate::args::build_cli;
use crate::global_settings::GlobalSettings;
use crate::session::Session;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    )
    .init();

    let args = build_cli().get_matches();

    if let Some(("completions", sub)) = args.subcommand() {
        if let Some(shell) =
            sub.get_one::<clap_complete_command::Shell>("shell")
        {
            shell.generate(&mut build_cli(), &mut std::io::stdout());
        }
        return Ok(());
    }

    let settings = GlobalSettings::new(&args)?;
    let script = settings.script.clone();
    let mut session = Session::new(settings);
    let mut stdout = std::io::stdout().lock();

    match script {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("cannot open {}", path.display()))?;
            log::info!("reading commands from {}", path.display());
            session.run(BufReader::new(file), &mut stdout)?;
        }
        None => {
            session.run(std::io::stdin().lock(), &mut stdout)?;
        }
    }

    log::info!(
        "session ended with {} expenses, discarded",
        session.store().len()
    );
    Ok(())
}
