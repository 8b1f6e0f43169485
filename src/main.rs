//! LZSS CLI
//! Usage:
//!   lzss c <input_file> <output_file>
//!   lzss d <input_file> <output_file>

use std::{env, process, time::Instant};

use tracing_subscriber::EnvFilter;

enum Mode {
    Compress,
    Decompress,
}

impl Mode {
    fn parse(arg: &str) -> Option<Self> {
        match arg {
            "c" | "compress"   => Some(Mode::Compress),
            "d" | "decompress" => Some(Mode::Decompress),
            _ => None,
        }
    }
}

fn print_usage() {
    println!("Usage:   lzss [c|d] [file_in] [file_out]");
    println!("Where:   c - compress");
    println!("         d - decompress");
    println!("Example: lzss c book.txt book.lzs");
    println!("         lzss d book.lzs book.txt");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    println!("\nLZSS v{}\n", env!("CARGO_PKG_VERSION"));

    let mode = match args.len() {
        4 => Mode::parse(&args[1]),
        _ => None,
    };
    let Some(mode) = mode else {
        print_usage();
        return;
    };

    let input_path  = &args[2];
    let output_path = &args[3];
    let start = Instant::now();

    let result = match mode {
        Mode::Compress => {
            println!("Compressing ...");
            lzss::compress_file(input_path, output_path)
                .map(|s| (s.input_bytes, s.output_bytes))
        }
        Mode::Decompress => {
            println!("Decompressing ...");
            lzss::decompress_file(input_path, output_path)
                .map(|s| (s.input_bytes, s.output_bytes))
        }
    };

    match result {
        Ok((from, to)) => {
            println!(
                "Done! {} bytes → {} bytes. Time elapsed: {:.3} seconds.",
                from,
                to,
                start.elapsed().as_secs_f64()
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
