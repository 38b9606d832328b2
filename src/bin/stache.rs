//! Command-line interface for stache
//! This binary scans template files and prints or checks their token streams.
//!
//! Usage:
//!   stache scan `<path>` [--delimiters `<pair>`] [--plurals] [--format `<format>`]
//!   stache check `<path>` [--delimiters `<pair>`] [--plurals]

use clap::{Arg, ArgAction, Command};
use stache::{Scanner, ScannerOptions, Source, Token};
use std::fs;

fn main() {
    let matches = Command::new("stache")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting mustache-style template token streams")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("scan")
                .about("Scan a template file and print its token stream")
                .arg(
                    Arg::new("path")
                        .help("Path to the template file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("delimiters")
                        .long("delimiters")
                        .short('d')
                        .help("Initial delimiter pair, e.g. '<% %>'"),
                )
                .arg(
                    Arg::new("plurals")
                        .long("plurals")
                        .help("Enable the pluralized-translation tag extension")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('json' or 'debug')")
                        .default_value("json"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Scan a template file and report whether it is well-formed")
                .arg(
                    Arg::new("path")
                        .help("Path to the template file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("delimiters")
                        .long("delimiters")
                        .short('d')
                        .help("Initial delimiter pair, e.g. '<% %>'"),
                )
                .arg(
                    Arg::new("plurals")
                        .long("plurals")
                        .help("Enable the pluralized-translation tag extension")
                        .action(ArgAction::SetTrue),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("scan", scan_matches)) => {
            let path = scan_matches.get_one::<String>("path").unwrap();
            let delimiters = scan_matches.get_one::<String>("delimiters");
            let plurals = scan_matches.get_flag("plurals");
            let format = scan_matches.get_one::<String>("format").unwrap();
            handle_scan_command(path, delimiters.map(String::as_str), plurals, format);
        }
        Some(("check", check_matches)) => {
            let path = check_matches.get_one::<String>("path").unwrap();
            let delimiters = check_matches.get_one::<String>("delimiters");
            let plurals = check_matches.get_flag("plurals");
            handle_check_command(path, delimiters.map(String::as_str), plurals);
        }
        _ => unreachable!(),
    }
}

/// Scan a template file with the given configuration.
fn scan_file(
    path: &str,
    delimiters: Option<&str>,
    plurals: bool,
) -> Result<Vec<Token>, Box<dyn std::error::Error>> {
    let source = fs::read_to_string(path)?;
    let scanner = Scanner::new(ScannerOptions {
        plural_tags: plurals,
    });
    let tokens = match delimiters {
        Some(spec) => scanner.scan_with_delimiters(Source::Raw(&source), spec)?,
        None => scanner.scan(Source::Raw(&source))?,
    };
    Ok(tokens)
}

/// Handle the scan command
fn handle_scan_command(path: &str, delimiters: Option<&str>, plurals: bool, format: &str) {
    let tokens = match scan_file(path, delimiters, plurals) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match format {
        "json" => match serde_json::to_string_pretty(&tokens) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        "debug" => println!("{:#?}", tokens),
        other => {
            eprintln!("Error: unknown format '{}'", other);
            std::process::exit(1);
        }
    }
}

/// Handle the check command
fn handle_check_command(path: &str, delimiters: Option<&str>, plurals: bool) {
    match scan_file(path, delimiters, plurals) {
        Ok(tokens) => println!("ok: {} tokens", tokens.len()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
