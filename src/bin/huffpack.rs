use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Parser;
use huffpack::Session;
use log::error;

#[derive(Parser, Debug)]
#[command(about = "Compress and decompress text files with Huffman codes", long_about = None)]
struct Args {
    /// Text files to compress; each `X.txt` produces `X_compressed.txt` and `X_decompressed.txt`.
    #[clap(required = true)]
    files: Vec<PathBuf>,

    /// Print the code table of every file.
    #[clap(long)]
    print_codes: bool,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[clap(short, long)]
    verbose: bool,
}

fn roundtrip(session: &mut Session, file: &Path, print_codes: bool) -> Result<()> {
    let report = session.compress(file)?;

    if print_codes {
        if let Some(book) = session.codebook() {
            for (symbol, code) in book.table().sorted() {
                println!("{:?}\t{}", symbol, code);
            }
        }
    }

    session.decompress(&report.output)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut session = Session::new();
    let mut failures = 0;
    for file in &args.files {
        if let Err(e) = roundtrip(&mut session, file, args.print_codes) {
            error!("{}: {:#}", file.display(), e);
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{} of {} files failed", failures, args.files.len());
    }
    Ok(())
}
