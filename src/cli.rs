//! Command-line interface definitions for Undercoverage.
//!
//! The tool is fully interactive: the API key and both sources are read
//! from stdin, never from flags, environment variables, or config files.
//! `clap` only contributes the standard `--help`/`--version` surface.

use clap::Parser;

/// Compare how much coverage two news outlets dedicate to a subject.
///
/// # Examples
///
/// ```sh
/// undercoverage
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_accepts_no_arguments() {
        let cli = Cli::try_parse_from(["undercoverage"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_rejects_unknown_flags() {
        let cli = Cli::try_parse_from(["undercoverage", "--offline"]);
        assert!(cli.is_err());
    }
}
