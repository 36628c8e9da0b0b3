use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use rally::{Command, Flow, Shell, UserData};
use rally_nav::NavConfig;
use tracing::warn;

#[derive(Parser)]
#[command(name = "rally")]
#[command(version, about = "Drive the Rally navigation graph from a terminal", long_about = None)]
struct Cli {
    /// Deep link delivered at launch, e.g. rally://Accounts/Checking
    #[arg(long)]
    deep_link: Option<String>,
    /// Scheme accepted by the account deep link
    #[arg(long, default_value = "rally")]
    scheme: String,
    /// Push a new entry even when re-selecting the current route
    #[arg(long)]
    allow_duplicates: bool,
}

fn main() -> Result<()> {
    rally::init_tracing();
    let cli = Cli::parse();

    let config = NavConfig {
        deep_link_scheme: cli.scheme,
        launch_single_top: !cli.allow_duplicates,
        ..NavConfig::default()
    };
    let mut shell = Shell::new(config, UserData::sample())?;
    if let Some(uri) = cli.deep_link.as_deref() {
        shell.open_deep_link(uri);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write!(out, "{}", shell.frame())?;
    write!(out, "> ")?;
    out.flush()?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            write!(out, "> ")?;
            out.flush()?;
            continue;
        }
        match line.parse::<Command>().and_then(|command| shell.execute(command)) {
            Ok(Flow::Continue(text)) => write!(out, "{text}")?,
            Ok(Flow::Exit) => break,
            Err(err) => {
                warn!("{err:#}");
                writeln!(out, "error: {err:#}")?;
            }
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    Ok(())
}
