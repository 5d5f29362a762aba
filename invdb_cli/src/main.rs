mod logging;
mod menu;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use invdb_core::console::{Console, Operator};
use invdb_core::engine::{create_batch_entry, create_entry, describe_table, show_entries};
use invdb_core::{DEFAULT_PREVIEW_LIMIT, EntryError, Session};
use tracing::{error, info};

use menu::{GAME_INFO_COLUMNS, MenuOption, inventory_plan, parse_choice, render_menu};

#[derive(Debug, Parser)]
#[command(name = "invdb", about = "Interactive entry for the inventory catalog")]
struct Args {
    /// SQLite database file
    #[arg(long, env = "INVDB_DATABASE", default_value = "Inventory Finances Database.sqlite")]
    database: PathBuf,

    /// Append-only log of failed entries
    #[arg(long, env = "INVDB_ERROR_LOG", default_value = "Error Log.log")]
    error_log: PathBuf,

    /// Rows shown by table previews
    #[arg(long, env = "INVDB_PREVIEW_LIMIT", default_value_t = DEFAULT_PREVIEW_LIMIT)]
    preview_limit: usize,

    /// Never clear the screen
    #[arg(long)]
    no_clear: bool,

    /// Mirror logs to stderr (filtered by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging(&args.error_log, args.verbose)?;

    let mut session = Session::open(&args.database)
        .with_context(|| format!("Failed to open database: {}", args.database.display()))?
        .with_preview_limit(args.preview_limit);
    info!(database = %args.database.display(), "session started");

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout()).with_clear_screen(!args.no_clear);

    let outcome = run(&mut session, &mut console);
    session.close().context("Failed to close database")?;
    outcome
}

fn run<R: BufRead, W: Write>(session: &mut Session, console: &mut Console<R, W>) -> Result<()> {
    loop {
        console.notify(&render_menu())?;
        let input = match console.prompt("Enter your choice:") {
            Ok(input) => input,
            Err(EntryError::InputClosed) => return Ok(()),
            Err(err) => return Err(err.into()),
        };

        let option = match parse_choice(&input) {
            Ok(option) => option,
            Err(message) => {
                console.pause(Some(&message))?;
                console.clear_screen()?;
                continue;
            }
        };

        let result = match option {
            MenuOption::Exit => return Ok(()),
            MenuOption::ShowMarketplaces => {
                show_entries(session, console, "Marketplaces", &["Marketplace"])
            }
            MenuOption::CreateMarketplace => {
                create_entry(session, console, "Marketplaces", &["Marketplace"])
            }
            MenuOption::CreateInventoryItems => {
                create_batch_entry(session, console, &inventory_plan())
            }
            MenuOption::CreateGameInfo => {
                create_entry(session, console, "GameInfo", &GAME_INFO_COLUMNS)
            }
            MenuOption::CreateRegion => create_entry(session, console, "Regions", &["Region"]),
            MenuOption::ShowRegions => show_entries(session, console, "Regions", &["Region"]),
            MenuOption::DescribeTable => describe(session, console),
        };

        match result {
            Ok(()) => {}
            Err(EntryError::InputClosed) => return Ok(()),
            Err(err) => {
                error!(option = option.description(), "{err}");
                console.pause(Some(&err.to_string()))?;
                console.clear_screen()?;
            }
        }
    }
}

fn describe<R: BufRead, W: Write>(
    session: &Session,
    console: &mut Console<R, W>,
) -> invdb_core::Result<()> {
    let table = console.prompt("Enter the table name")?;
    let json = describe_table(session, &table)?;
    console.notify(&json)?;
    console.pause(None)
}
