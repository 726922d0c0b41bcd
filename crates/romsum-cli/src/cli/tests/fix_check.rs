//! Tests for the fix and check subcommands.

use super::parse;
use crate::cli::commands::{run_check, run_fix};
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use romsum_core::config::RomsumConfig;
use romsum_core::source::RegionSource;
use romsum_core::Error;
use std::fs;
use std::path::Path;

#[test]
fn cli_parse_fix_legacy() {
    match parse(&["romsum", "fix", "in.rom", "out.rom"]).command {
        CliCommand::Fix {
            input,
            output,
            params,
        } => {
            assert_eq!(input, Path::new("in.rom"));
            assert_eq!(output, Path::new("out.rom"));
            assert!(params.is_empty());
        }
        _ => panic!("expected Fix"),
    }
}

#[test]
fn cli_parse_fix_triples() {
    match parse(&["romsum", "fix", "a", "b", "0", "1ff", "5", "200", "3ff", "3ff"]).command {
        CliCommand::Fix { params, .. } => {
            assert_eq!(params, vec!["0", "1ff", "5", "200", "3ff", "3ff"]);
        }
        _ => panic!("expected Fix"),
    }
}

#[test]
fn cli_parse_fix_requires_output() {
    assert!(Cli::try_parse_from(["romsum", "fix", "in.rom"]).is_err());
}

#[test]
fn cli_parse_check_with_offset() {
    match parse(&["romsum", "check", "in.rom", "0x1a"]).command {
        CliCommand::Check { input, params } => {
            assert_eq!(input, Path::new("in.rom"));
            assert_eq!(params, vec!["0x1a"]);
        }
        _ => panic!("expected Check"),
    }
}

fn write_rom(dir: &Path, blocks: u8, len: usize) -> std::path::PathBuf {
    let mut rom: Vec<u8> = (0u8..=200).cycle().take(len).collect();
    rom[0] = 0x55;
    rom[1] = 0xAA;
    rom[2] = blocks;
    let path = dir.join("in.rom");
    fs::write(&path, rom).unwrap();
    path
}

fn params(p: &[&str]) -> Vec<String> {
    p.iter().map(|s| s.to_string()).collect()
}

fn source(p: &[&str]) -> RegionSource {
    RegionSource::from_params(params(p).as_slice()).unwrap()
}

#[test]
fn run_fix_then_check_passes() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_rom(dir.path(), 2, 1024);
    let output = dir.path().join("out.rom");

    let err = run_check(&RegionSource::Legacy, &input).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::ChecksumMismatch { .. })
    ));

    run_fix(&RomsumConfig::default(), &RegionSource::Legacy, &input, &output).unwrap();
    assert_eq!(fs::read(&output).unwrap().len(), 1024);
    run_check(&RegionSource::Legacy, &output).unwrap();
}

#[test]
fn bad_params_fail_before_config_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let missing_cfg = dir.path().join("missing.toml");
    let missing_cfg = missing_cfg.to_str().unwrap();
    let output = dir.path().join("out.rom");

    // The config path does not exist, so reaching `init` would be a Config error.
    let cli = Cli::try_parse_from([
        "romsum",
        "--config",
        missing_cfg,
        "fix",
        "missing.rom",
        output.to_str().unwrap(),
        "0",
        "1",
    ])
    .unwrap();
    let err = cli.run().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::InvalidArguments(_))
    ));
    assert!(!output.exists());

    let cli = Cli::try_parse_from([
        "romsum",
        "--config",
        missing_cfg,
        "check",
        "missing.rom",
        "10",
        "f",
        "f",
    ])
    .unwrap();
    let err = cli.run().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::RegionOutOfBounds { .. })
    ));
}

#[test]
fn run_fix_oversized_rom_writes_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_rom(dir.path(), 4, 1024);
    let output = dir.path().join("out.rom");

    let err = run_fix(&RomsumConfig::default(), &RegionSource::Legacy, &input, &output)
        .unwrap_err();
    let core = err.downcast_ref::<Error>().expect("core error");
    assert!(matches!(core, Error::RegionOutOfBounds { end: 2047, .. }));
    assert_eq!(core.exit_status(), 2);
    assert!(!output.exists());
}

#[test]
fn run_fix_explicit_regions() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_rom(dir.path(), 0, 2048);
    let output = dir.path().join("out.rom");
    let src = source(&["0", "3ff", "5", "400", "7ff", "7ff"]);

    run_fix(&RomsumConfig::default(), &src, &input, &output).unwrap();
    run_check(&src, &output).unwrap();
}
