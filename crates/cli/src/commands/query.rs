use std::io::{Stderr, Stdout};
use std::process::ExitCode;

use anyhow::Context;
use clap::Args;
use log::{debug, warn};
use sqlfs_engine::{EngineQueryResult, RunOptions, parse_query, run_query};
use sqlfs_fs::SystemIdentityResolver;
use sqlfs_runtime::{DEFAULT_JOBS, MAX_JOBS};

use crate::printer::{
    ColorChoice, JsonPrinter, OutputFormat, PrintContext, PrinterConfig, ResultPrinter,
    TablePrinter,
};

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Output results as one JSON object keyed by path
    #[arg(long)]
    pub json: bool,

    /// When to color the table header
    #[arg(
        long,
        value_name = "WHEN",
        default_value = "auto",
        value_parser = ["auto", "always", "never"]
    )]
    pub color: String,

    /// Suppress timing statistics
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl OutputOptions {
    /// Create a printer based on the output options.
    pub fn make_printer(&self) -> Box<dyn ResultPrinter> {
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        };

        let cfg = PrinterConfig {
            format,
            color: ColorChoice::parse(&self.color),
            show_timing: !self.quiet,
        };

        match cfg.format {
            OutputFormat::Table => Box::new(TablePrinter::<Stdout, Stderr>::stdout(cfg)),
            OutputFormat::Json => Box::new(JsonPrinter::<Stdout, Stderr>::stdout(cfg)),
        }
    }
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// The query to execute, e.g. "SELECT * FROM ~/ WHERE extension = 'sh'"
    pub query: String,

    /// Number of threads used to stat directory entries
    #[arg(long, short = 'j', value_name = "N", default_value_t = DEFAULT_JOBS)]
    pub jobs: usize,

    /// Print the parsed query plan to stderr before running it
    #[arg(long)]
    pub explain: bool,

    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn run(args: QueryArgs) -> ExitCode {
    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[error] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: &QueryArgs) -> anyhow::Result<()> {
    if args.explain
        && let Ok(plan) = parse_query(&args.query)
    {
        eprintln!("{plan}\n");
    }

    if args.jobs > MAX_JOBS {
        warn!("--jobs {} is above the limit, using {MAX_JOBS}", args.jobs);
    }
    debug!("[cli] jobs={} json={}", args.jobs, args.output.json);

    let resolver = SystemIdentityResolver::new();
    let opts = RunOptions {
        jobs: args.jobs,
        home: None,
    };
    let result = run_query(&args.query, &resolver, &opts).context("execute query")?;

    let mut printer = args.output.make_printer();
    print_result(printer.as_mut(), &result).context("write results")?;
    Ok(())
}

fn print_result(printer: &mut dyn ResultPrinter, result: &EngineQueryResult) -> std::io::Result<()> {
    let ctx = PrintContext {
        query: &result.query,
        total: result.results.len(),
        scanned: result.scanned,
        metrics: result.metrics.as_ref(),
    };

    printer.begin(&ctx)?;
    for record in result.results.values() {
        printer.print_record(record, &ctx)?;
    }
    printer.finish(&ctx)
}
