//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

use formbuilder_cli::config::DATA_DIR_ENV;

#[derive(Debug, Parser)]
#[command(
    name = "formbuilder",
    version,
    about = "Design forms, fill them out and browse the answers",
    long_about = "Design forms from nine field types (text, checkbox, select, radio,\n\
                  email, number, date, file, range), fill them out in the terminal\n\
                  and keep the answers as JSON in a local data directory."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Directory holding the stored forms and answers.
    #[arg(long = "data-dir", value_name = "DIR", env = DATA_DIR_ENV, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Design a new form interactively.
    New {
        /// Initial form name.
        #[arg(long)]
        name: Option<String>,
    },

    /// List saved forms.
    Forms,

    /// Print a saved form.
    Show {
        #[arg(value_name = "ID")]
        id: u64,

        /// Open a read-only terminal preview instead of printing.
        #[arg(long)]
        tui: bool,
    },

    /// Change a saved form in place.
    Edit {
        #[arg(value_name = "ID")]
        id: u64,
    },

    /// Fill out a saved form and store the answer.
    Answer {
        #[arg(value_name = "ID")]
        id: u64,
    },

    /// List stored answers.
    Answers {
        /// Only answers to this form.
        #[arg(long = "form", value_name = "ID")]
        form: Option<u64>,
    },

    /// Move a field of a saved form (positions start at 1).
    Move {
        #[arg(value_name = "ID")]
        id: u64,
        #[arg(value_name = "FROM")]
        from: usize,
        #[arg(value_name = "TO")]
        to: usize,
    },

    /// Delete a saved form. Its answers are kept.
    DeleteForm {
        #[arg(value_name = "ID")]
        id: u64,
    },

    /// Delete an answer by its position in `answers` (starting at 1).
    DeleteAnswer {
        #[arg(value_name = "INDEX")]
        index: usize,
    },

    /// Write a saved form as a fillable HTML page.
    ExportHtml {
        #[arg(value_name = "ID")]
        id: u64,

        /// Output file (stdout when omitted).
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Emit only the `<form>` element.
        #[arg(long)]
        fragment: bool,
    },
}

/// CLI log format choices.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_move() {
        let cli = Cli::try_parse_from(["formbuilder", "move", "42", "3", "1"]).unwrap();
        let Command::Move { id, from, to } = cli.command else {
            panic!("expected move");
        };
        assert_eq!((id, from, to), (42, 3, 1));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "formbuilder",
            "forms",
            "--data-dir",
            "/tmp/fb",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/fb")));
        assert!(matches!(cli.log_format, LogFormatArg::Json));
    }

    #[test]
    fn export_html_output_flag() {
        let cli =
            Cli::try_parse_from(["formbuilder", "export-html", "7", "-o", "form.html"]).unwrap();
        let Command::ExportHtml { id, output, fragment } = cli.command else {
            panic!("expected export-html");
        };
        assert_eq!(id, 7);
        assert_eq!(output, Some(PathBuf::from("form.html")));
        assert!(!fragment);
    }
}
