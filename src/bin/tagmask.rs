//! Command-line interface for tagmask
//! This binary applies a mask rule string to a JSON document and prints the masked result.
//!
//! Usage:
//!   tagmask apply --rules `<rules>` `<path>`  - Mask a JSON document (use `-` for stdin)

use clap::{Arg, Command};
use std::io::Read;

use tagmask::{masked_object, Mask};

fn main() {
    let matches = Command::new("tagmask")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for masking JSON payloads with tagging rules")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("apply")
                .about("Apply a rule string to a JSON document")
                .arg(
                    Arg::new("rules")
                        .long("rules")
                        .short('r')
                        .help("Mask rules, e.g. '*,-foo.bar'")
                        .required(true),
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the JSON document, or `-` for stdin")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    // Handle subcommands
    match matches.subcommand() {
        Some(("apply", apply_matches)) => {
            let rules = apply_matches.get_one::<String>("rules").unwrap();
            let path = apply_matches.get_one::<String>("path").unwrap();
            handle_apply_command(rules, path);
        }
        _ => unreachable!(),
    }
}

/// Handle the apply command
fn handle_apply_command(rules: &str, path: &str) {
    let source = read_document(path).unwrap_or_else(|e| {
        eprintln!("Error reading document: {}", e);
        std::process::exit(1);
    });

    let value: serde_json::Value = serde_json::from_str(&source).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        std::process::exit(1);
    });

    // Mask construction is permissive and never fails
    let mask = Mask::new(rules);
    let masked = masked_object(&mask, &value);

    match serde_json::to_string_pretty(&masked) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            std::process::exit(1);
        }
    }
}

fn read_document(path: &str) -> std::io::Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(path)
    }
}
