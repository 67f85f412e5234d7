use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use unitconv::cli::{Cli, Commands, Menu, Session};
use unitconv::{init_logging, utils, Category, Settings};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut settings = Settings::new().context("Failed to load configuration")?;
    if let Some(dir) = cli.history_dir {
        settings.history.dir = dir;
    }
    init_logging(&settings);
    tracing::debug!("Using history directory {:?}", settings.history.dir);

    let mut session = Session::from_settings(&settings);

    match cli.command {
        None => handle_interactive(&mut session),
        Some(Commands::Convert {
            category,
            from,
            to,
            value,
        }) => handle_convert(&mut session, category, &from, &to, &value),
        Some(Commands::History { limit }) => {
            let limit = limit.unwrap_or(session.display_limit());
            session.show_history(&mut io::stdout().lock(), limit)
        }
        Some(Commands::Stats) => session.show_statistics(&mut io::stdout().lock()),
        Some(Commands::Clear { yes }) => handle_clear(&mut session, yes),
        Some(Commands::Units { category }) => session.show_units(&mut io::stdout().lock(), category),
    }
}

fn handle_interactive(session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(session, stdin.lock(), stdout.lock()).run()
}

fn handle_convert(
    session: &mut Session,
    category: Category,
    from: &str,
    to: &str,
    value: &str,
) -> Result<()> {
    session.convert(&mut io::stdout().lock(), category, from, to, value)?;
    Ok(())
}

fn handle_clear(session: &mut Session, yes: bool) -> Result<()> {
    let mut out = io::stdout().lock();

    if !yes {
        utils::print_prompt(&mut out, "Are you sure you want to clear all history? (yes/no): ")?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        if !answer.trim().eq_ignore_ascii_case("yes") {
            utils::print_info(&mut out, "Operation cancelled.")?;
            return Ok(());
        }
    }

    session.clear_history(&mut out)?;
    out.flush()?;
    Ok(())
}
