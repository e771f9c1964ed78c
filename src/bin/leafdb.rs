//! # LeafDB CLI Entry Point
//!
//! ## Usage
//!
//! ```bash
//! # Open (or create) a database file
//! leafdb ./my.db
//!
//! # Show version
//! leafdb --version
//!
//! # Show help
//! leafdb --help
//! ```

use std::env;
use std::path::PathBuf;

use eyre::{bail, Result, WrapErr};
use leafdb::cli::Repl;
use leafdb::Table;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut db_path: Option<PathBuf> = None;
    for arg in &args[1..] {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-v" => {
                println!("leafdb {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            flag if flag.starts_with('-') => {
                bail!("Unknown option: {}", flag);
            }
            path => {
                if db_path.is_some() {
                    bail!("Multiple database paths specified");
                }
                db_path = Some(PathBuf::from(path));
            }
        }
    }

    let db_path = match db_path {
        Some(p) => p,
        None => bail!("Must provide a database filename"),
    };

    let table = Table::open(&db_path)
        .wrap_err_with(|| format!("failed to open database at {:?}", db_path))?;

    Repl::new(table)?.run()
}

fn print_usage() {
    println!("LeafDB - single-file embedded row store");
    println!();
    println!("USAGE:");
    println!("    leafdb [OPTIONS] <DATABASE_PATH>");
    println!();
    println!("ARGS:");
    println!("    <DATABASE_PATH>    Path to the database file (created if absent)");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help         Print help information");
    println!("    -v, --version      Print version information");
    println!();
    println!("Meta-commands inside the REPL: .exit, .btree, .constants, .help");
}
