// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use bpaf::*;
use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use tracing::Level;

use crate::client::WuClient;
use crate::config::consts::{ENV_LOGIN, ENV_PASSWORD, ENV_URL, LOG_FILE, REQUEST_TIMEOUT_SECS};
use crate::config::options::{AppOptions, ExportFormat, ExportOptions, PortalOptions, RowPolicy, store_dir};
use crate::grades::{self, GradesTable};
use crate::mark::Mark;
use crate::portal::{Credentials, retrieve_marks};
use crate::progress::Progress;
use crate::{file, log, store};

#[derive(Debug, Clone)]
pub struct Cli {
    verbose: bool,
    cmd: Cmd,
}

#[derive(Debug, Clone)]
pub enum Cmd {
    /// Log in and retrieve the current marks
    Fetch(FetchArgs),
    /// Parse one mark cell and print the result
    Parse(String),
    /// Print the last saved snapshot
    Show(ExportOptions),
}

#[derive(Debug, Clone)]
pub struct FetchArgs {
    url: String,
    login: String,
    password: String,
    timeout: u64,
    skip_malformed: bool,
    save: bool,
    new_only: bool,
    output: ExportOptions,
}

fn output() -> impl Parser<ExportOptions> {
    let format = long("format")
        .short('f')
        .help("Output format: csv, tsv or json")
        .argument::<ExportFormat>("FORMAT")
        .fallback(ExportFormat::Csv);
    let out = long("out")
        .short('o')
        .help("Write to this file (or into this directory) instead of stdout")
        .argument::<PathBuf>("PATH")
        .optional();
    let include_headers = long("headers")
        .help("Emit a header row (csv/tsv)")
        .switch();
    construct!(ExportOptions { format, out, include_headers })
}

fn fetch_args() -> impl Parser<FetchArgs> {
    let url = long("url")
        .env(ENV_URL)
        .help("Portal main page address")
        .argument::<String>("URL");
    let login = long("login")
        .env(ENV_LOGIN)
        .help("Portal user name")
        .argument::<String>("LOGIN");
    let password = long("password")
        .env(ENV_PASSWORD)
        .help("Portal password (prefer the environment or .env)")
        .argument::<String>("PASSWORD");
    let timeout = long("timeout")
        .help("Per-request timeout in seconds")
        .argument::<u64>("SECS")
        .fallback(REQUEST_TIMEOUT_SECS);
    let skip_malformed = long("skip-malformed")
        .help("Drop rows whose mark cell cannot be parsed instead of failing")
        .switch();
    let save = long("save")
        .help("Save the retrieved table as the new snapshot")
        .switch();
    let new_only = long("new-only")
        .help("Only output marks missing from the last snapshot")
        .switch();
    let output = output();
    construct!(FetchArgs { url, login, password, timeout, skip_malformed, save, new_only, output })
}

pub fn options() -> OptionParser<Cli> {
    let fetch = fetch_args()
        .map(Cmd::Fetch)
        .to_options()
        .command("fetch")
        .help("Log in and retrieve the current marks");

    let parse = positional::<String>("CELL")
        .help("Inner HTML of a mark cell, e.g. '4.5<br>23.01.20'")
        .map(Cmd::Parse)
        .to_options()
        .command("parse")
        .help("Parse one mark cell and print the result");

    let show = output()
        .map(Cmd::Show)
        .to_options()
        .command("show")
        .help("Print the last saved snapshot");

    let verbose = short('v')
        .long("verbose")
        .help("Debug output on stderr")
        .switch();
    let cmd = construct!([fetch, parse, show]);

    construct!(Cli { verbose, cmd })
        .to_options()
        .descr("Marks from the Wirtualna Uczelnia student portal")
}

pub fn run() -> Result<()> {
    // .env must be loaded before bpaf reads its env fallbacks
    dotenvy::dotenv().ok();
    let cli = options().run();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    log::init(level, Some(store_dir().join(LOG_FILE).as_path()));

    match cli.cmd {
        Cmd::Fetch(args) => fetch(args),
        Cmd::Parse(cell) => parse_cell(&cell),
        Cmd::Show(export) => show(&export),
    }
}

fn fetch(args: FetchArgs) -> Result<()> {
    let opts = AppOptions {
        portal: PortalOptions {
            url: args.url,
            timeout: Duration::from_secs(args.timeout),
        },
        export: args.output,
        rows: if args.skip_malformed { RowPolicy::Skip } else { RowPolicy::Abort },
    };
    let credentials = Credentials::new(args.login, args.password);

    let client = WuClient::new(opts.portal.clone()).wrap_err("Invalid portal address")?;
    let mut progress = CliProgress::default();
    let table = retrieve_marks(&client, &credentials, opts.rows, Some(&mut progress))
        .wrap_err("Could not retrieve marks")?;

    let dir = store_dir();
    let fresh;
    let shown = if args.new_only {
        let previous = store::load_snapshot(&dir)?.unwrap_or_default();
        fresh = subset(grades::new_marks(&previous, &table));
        logf!("{} new marks since last snapshot", fresh.values().map(|m| m.len()).sum::<usize>());
        &fresh
    } else {
        &table
    };

    write(&opts.export, shown)?;

    if args.save {
        let path = store::save_snapshot(&dir, &table)?;
        logf!("Snapshot saved to {}", path.display());
    }
    Ok(())
}

fn parse_cell(cell: &str) -> Result<()> {
    match Mark::parse(cell)? {
        Some(mark) => println!("{}\t{}", mark.value(), mark.date().format("%Y-%m-%d")),
        None => println!("no mark"),
    }
    Ok(())
}

fn show(export: &ExportOptions) -> Result<()> {
    let dir = store_dir();
    let Some(table) = store::load_snapshot(&dir)? else {
        bail!("No snapshot in {}; run `fetch --save` first", dir.display());
    };
    write(export, &table)
}

fn write(export: &ExportOptions, table: &GradesTable) -> Result<()> {
    file::export_table(export, table).map_err(|e| eyre!("Export failed: {e}"))?;
    Ok(())
}

fn subset(entries: Vec<(&str, &str, &Mark)>) -> GradesTable {
    let mut out = GradesTable::new();
    for (subject, mark_type, mark) in entries {
        out.entry(s!(subject))
            .or_default()
            .insert(s!(mark_type), mark.clone());
    }
    out
}

/// Row counters, summarised once at the end.
#[derive(Default)]
struct CliProgress {
    total: usize,
    done: usize,
    skipped: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }

    fn log(&mut self, msg: &str) {
        logf!("{msg}");
    }

    fn item_done(&mut self, _subject: &str) {
        self.done += 1;
    }

    fn item_skipped(&mut self, subject: &str, reason: &str) {
        self.skipped += 1;
        eprintln!("Skipped {subject}: {reason}");
    }

    fn finish(&mut self) {
        logf!("{}/{} rows read, {} skipped", self.done, self.total, self.skipped);
    }
}
