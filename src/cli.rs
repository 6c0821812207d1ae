//! Command line interface for Folio

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "folio", version)]
#[command(about = "A small multi-window document viewer")]
pub struct Cli {
    /// Documents to open, one window each
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["folio"]).unwrap();
        assert!(cli.files.is_empty());
    }

    #[test]
    fn test_files_keep_argument_order() {
        let cli = Cli::try_parse_from(["folio", "b.pdf", "a.pdf", "b.pdf"]).unwrap();
        assert_eq!(
            cli.files,
            vec![
                PathBuf::from("b.pdf"),
                PathBuf::from("a.pdf"),
                PathBuf::from("b.pdf")
            ]
        );
    }

    #[test]
    fn test_version_flag_exits_early() {
        let err = Cli::try_parse_from(["folio", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["folio", "--frobnicate"]).is_err());
    }
}
