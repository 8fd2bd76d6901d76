//! Decompress a `.Z` file (or stdin) to stdout.
//!
//! Usage:
//!   cargo run --release --example uncompress -- [-info] [-codes] [-no-align] [FILE]
//!
//! `-info` reports the header and table resets, `-codes` traces every code,
//! `-no-align` reads codes without skipping code-group padding.

use lzw_stream::DecodeOptions;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut options = DecodeOptions::default();
    let mut path = None;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-info" => options.verbose = true,
            "-codes" => options.trace_codes = true,
            "-no-align" => options.align_code_groups = false,
            flag if flag.starts_with('-') && flag != "-" => {
                eprintln!("Usage: uncompress [-info] [-codes] [-no-align] [FILE]");
                return ExitCode::from(2);
            }
            file => path = Some(file.to_string()),
        }
    }

    let level = if options.trace_codes {
        log::LevelFilter::Trace
    } else if options.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    if let Ok(()) = log::set_logger(&LOGGER) {
        log::set_max_level(level);
    }

    let source: Box<dyn Read> = match path.as_deref() {
        None | Some("-") => Box::new(io::stdin().lock()),
        Some(p) => match File::open(p) {
            Ok(f) => Box::new(BufReader::new(f)),
            Err(e) => {
                eprintln!("uncompress: {}: {}", p, e);
                return ExitCode::FAILURE;
            }
        },
    };

    let stdout = io::stdout();
    let mut sink = BufWriter::new(stdout.lock());

    match lzw_stream::decompress_to(source, &mut sink, options) {
        Ok(summary) => {
            if let Err(e) = sink.flush() {
                eprintln!("uncompress: {}", e);
                return ExitCode::FAILURE;
            }
            log::info!(
                "{} codes, {} bytes, {} clears",
                summary.codes_read,
                summary.bytes_out,
                summary.clears
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            let _ = sink.flush();
            eprintln!("uncompress: {}", e);
            ExitCode::FAILURE
        }
    }
}

static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let args = record.args();

            match record.level() {
                log::Level::Error => eprintln!("Error: {}", args),
                log::Level::Warn => eprintln!("Warning: {}", args),
                log::Level::Info => eprintln!("Info: {}", args),
                log::Level::Debug => eprintln!("Debug: {}", args),
                log::Level::Trace => eprintln!("Trace: {}", args),
            }
        }
    }

    fn flush(&self) {}
}
