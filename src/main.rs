mod btree;
mod command;
mod ctx;
mod disk;
mod pager;
mod query;
mod record;
mod render;
mod schema;
#[cfg(test)]
mod test_util;

use std::{fs::File, io::BufReader, path::PathBuf, process::ExitCode};

use anyhow::{Context, bail};
use tracing_subscriber::EnvFilter;

use self::{ctx::Ctx, pager::Source};

/// Prefix of tables which are used internally by SQLite.
const INTERNAL_TABLE_PREFIX: &str = "sqlite_";

#[derive(Clone, Debug, PartialEq, Eq)]
struct Options {
    database: PathBuf,
    command: String,
}

impl Options {
    fn from_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut args = args.into_iter().skip(1);

        let Some(database) = args.next() else {
            bail!("Missing <database path> and <command>");
        };
        let Some(command) = args.next() else {
            bail!("Missing <command>");
        };

        Ok(Self {
            database: database.into(),
            command,
        })
    }
}

/// Run a single command against the database, producing each line of output.
fn run_command<S: Source>(ctx: &mut Ctx<S>, command: &str) -> anyhow::Result<Vec<String>> {
    Ok(match command {
        ".dbinfo" => render::info(&ctx.info()),
        ".tables" => render::names(
            ctx.catalog()
                .tables()
                .map(|table| table.name.as_str())
                .filter(|name| !name.starts_with(INTERNAL_TABLE_PREFIX)),
        ),
        ".indexes" => render::names(ctx.catalog().indexes().map(|index| index.name.as_str())),
        command if command.starts_with('.') => bail!("unknown command: {command}"),
        sql => render::query_output(&ctx.execute(sql)?),
    })
}

fn run() -> anyhow::Result<()> {
    let options = Options::from_args(std::env::args())?;

    let file = File::open(&options.database)
        .with_context(|| format!("failed to open {}", options.database.display()))?;
    let mut ctx = Ctx::open(BufReader::new(file)).context("failed to read database")?;

    for line in run_command(&mut ctx, &options.command)? {
        println!("{line}");
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
