//! File-level API and the `lzss` command line.

use std::fs;
use std::process::Command;

use tempfile::tempdir;

use lzss::{compress, compress_file, decompress_file, Error};

fn sample() -> Vec<u8> {
    b"It was the best of times, it was the worst of times, it was the age of wisdom, \
      it was the age of foolishness, it was the epoch of belief, it was the epoch of \
      incredulity.\n"
        .repeat(700)
}

#[test]
fn file_roundtrip_matches_in_memory_codec() {
    let dir = tempdir().unwrap();
    let plain = dir.path().join("book.txt");
    let packed = dir.path().join("book.lzs");
    let restored = dir.path().join("book.out");

    let input = sample();
    fs::write(&plain, &input).unwrap();

    let enc = compress_file(&plain, &packed).unwrap();
    assert_eq!(enc.input_bytes, input.len() as u64);

    let on_disk = fs::read(&packed).unwrap();
    assert_eq!(enc.output_bytes, on_disk.len() as u64);
    assert_eq!(on_disk, compress(&input).unwrap());

    let dec = decompress_file(&packed, &restored).unwrap();
    assert_eq!(dec.output_bytes, input.len() as u64);
    assert_eq!(dec.input_bytes, on_disk.len() as u64);
    assert_eq!(fs::read(&restored).unwrap(), input);
}

#[test]
fn missing_input_is_io_error() {
    let dir = tempdir().unwrap();
    let err = compress_file(dir.path().join("absent"), dir.path().join("out")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn cli_compresses_and_decompresses() {
    let dir = tempdir().unwrap();
    let plain = dir.path().join("in.txt");
    let packed = dir.path().join("in.lzs");
    let restored = dir.path().join("in.out");
    fs::write(&plain, sample()).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_lzss"))
        .arg("c")
        .arg(&plain)
        .arg(&packed)
        .status()
        .unwrap();
    assert!(status.success());

    let output = Command::new(env!("CARGO_BIN_EXE_lzss"))
        .arg("d")
        .arg(&packed)
        .arg(&restored)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Decompressing ..."));
    assert!(stdout.contains("Done!"));

    assert_eq!(fs::read(&restored).unwrap(), sample());
}

#[test]
fn cli_prints_usage_without_touching_files() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("never");

    for args in [vec!["c"], vec!["x", "a", target.to_str().unwrap()]] {
        let output = Command::new(env!("CARGO_BIN_EXE_lzss")).args(&args).output().unwrap();
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("Usage:"));
    }
    assert!(!target.exists());
}

#[test]
fn cli_reports_corrupt_input() {
    let dir = tempdir().unwrap();
    let bad = dir.path().join("bad.lzs");
    fs::write(&bad, [0u8, 0, 0, 50, 0x80]).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_lzss"))
        .arg("d")
        .arg(&bad)
        .arg(dir.path().join("bad.out"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}
