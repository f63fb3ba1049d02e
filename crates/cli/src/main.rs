use std::process::ExitCode;

use clap::Parser;

mod commands;
mod printer;

use commands::QueryArgs;
use sqlfs_runtime::logging;

const AFTER_HELP: &str = "\
Example:
  sqlfs \"SELECT * FROM ~/ WHERE extension = 'sh'\"
  sqlfs --json \"SELECT name, size FROM /tmp, ~/Downloads WHERE size > 1024\"

Fields:
  name, extension, path, filesize (size), lastmod, createdt,
  owner, group, permission, links, type

Operators:
  =  !=  <  <=  >  >=  LIKE";

#[derive(Debug, Parser)]
#[command(
    name = "sqlfs",
    version,
    about = "Query file metadata with a small SQL dialect",
    after_help = AFTER_HELP,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub query: QueryArgs,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    commands::query::run(cli.query)
}
