// SPDX-FileCopyrightText: 2026 chapternav contributors
// SPDX-License-Identifier: MIT

use std::env;
use std::path::PathBuf;
use std::process::exit;

use chapternav::tui;

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    root: PathBuf,
}

fn print_usage() {
    eprintln!("usage: chapternav [ROOT]");
    eprintln!();
    eprintln!("Browse a chapter/season/update tree of JSON documents.");
    eprintln!();
    eprintln!("  ROOT    directory to browse (default: current directory)");
}

/// Parses command line arguments. `Err(())` means usage was already printed.
fn parse_options(args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut root: Option<PathBuf> = None;
    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Err(()),
            _ if arg.starts_with('-') => {
                eprintln!("chapternav: unknown option '{arg}'");
                return Err(());
            }
            _ => {
                if root.is_some() {
                    eprintln!("chapternav: unexpected argument '{arg}'");
                    return Err(());
                }
                root = Some(PathBuf::from(arg));
            }
        }
    }
    Ok(CliOptions { root: root.unwrap_or_else(|| PathBuf::from(".")) })
}

fn main() {
    let options = match parse_options(env::args().skip(1)) {
        Ok(options) => options,
        Err(()) => {
            print_usage();
            exit(2);
        }
    };

    if !options.root.is_dir() {
        eprintln!("chapternav: '{}' is not a directory", options.root.display());
        exit(1);
    }

    if let Err(err) = tui::run(options.root) {
        eprintln!("chapternav: {err}");
        exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliOptions, ()> {
        parse_options(args.iter().map(|arg| (*arg).to_owned()))
    }

    #[test]
    fn defaults_to_current_directory() {
        let options = parse(&[]).unwrap();
        assert_eq!(options.root, PathBuf::from("."));
    }

    #[test]
    fn accepts_a_root_argument() {
        let options = parse(&["stories"]).unwrap();
        assert_eq!(options.root, PathBuf::from("stories"));
    }

    #[test]
    fn rejects_extra_arguments() {
        assert!(parse(&["a", "b"]).is_err());
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(parse(&["--verbose"]).is_err());
    }

    #[test]
    fn help_requests_usage() {
        assert!(parse(&["--help"]).is_err());
    }
}
