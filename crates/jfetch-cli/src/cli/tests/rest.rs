//! Tests for resolve and config subcommands.

use super::parse;
use crate::cli::CliCommand;
use clap::Parser;

#[test]
fn cli_parse_resolve() {
    match parse(&["jfetch", "resolve", "ftp://example.com/x"]) {
        CliCommand::Resolve { resource } => assert_eq!(resource, "ftp://example.com/x"),
        _ => panic!("expected Resolve"),
    }
}

#[test]
fn cli_parse_config() {
    assert!(matches!(parse(&["jfetch", "config"]), CliCommand::Config));
}

#[test]
fn cli_unknown_subcommand_fails() {
    assert!(crate::cli::Cli::try_parse_from(["jfetch", "frobnicate"]).is_err());
}
