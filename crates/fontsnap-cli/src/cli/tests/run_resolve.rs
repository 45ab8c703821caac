//! Tests for run and resolve subcommands.

use super::parse;
use crate::cli::{Cli, CliCommand, OutputArgs};
use clap::Parser;
use fontsnap_core::config::FontsnapConfig;
use std::path::{Path, PathBuf};

#[test]
fn cli_parse_run_defaults() {
    match parse(&["fontsnap", "run"]) {
        CliCommand::Run { limit, output } => {
            assert!(limit.is_none());
            assert!(output.store.is_none());
            assert!(output.pace.is_none());
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_limit_and_paths() {
    match parse(&[
        "fontsnap",
        "run",
        "--limit",
        "10",
        "--store",
        "/tmp/pkgs",
        "--mapping",
        "out/names.txt",
        "--pace",
        "0.5",
    ]) {
        CliCommand::Run { limit, output } => {
            assert_eq!(limit, Some(10));
            assert_eq!(output.store.as_deref(), Some(Path::new("/tmp/pkgs")));
            assert_eq!(output.mapping.as_deref(), Some(Path::new("out/names.txt")));
            assert_eq!(output.pace, Some(0.5));
        }
        _ => panic!("expected Run with options"),
    }
}

#[test]
fn cli_parse_resolve_names() {
    match parse(&["fontsnap", "resolve", "ttf-fira-code", "ttf-hack"]) {
        CliCommand::Resolve { names, .. } => {
            assert_eq!(names, vec!["ttf-fira-code", "ttf-hack"]);
        }
        _ => panic!("expected Resolve"),
    }
}

#[test]
fn cli_parse_resolve_requires_a_name() {
    assert!(Cli::try_parse_from(["fontsnap", "resolve"]).is_err());
}

#[test]
fn output_args_override_config() {
    let mut cfg = FontsnapConfig::default();
    let output = OutputArgs {
        store: Some(PathBuf::from("/srv/pkgs")),
        unresolved: Some(PathBuf::from("missing.txt")),
        pace: Some(0.0),
        ..OutputArgs::default()
    };
    output.apply(&mut cfg);
    assert_eq!(cfg.store_dir, PathBuf::from("/srv/pkgs"));
    assert_eq!(cfg.unresolved_path, PathBuf::from("missing.txt"));
    assert_eq!(cfg.mapping_path, PathBuf::from("names.txt"));
    assert_eq!(cfg.pace_secs, 0.0);
}
