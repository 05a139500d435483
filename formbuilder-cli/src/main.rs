//! formbuilder command-line interface.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::Parser;
use formbuilder_cli::commands;
use formbuilder_cli::config::data_dir;
use formbuilder_cli::logging::{LogConfig, LogFormat, init_logging};
use formbuilder_dialoguer_editor::DialoguerEditor;
use formbuilder_ratatui_form::RatatuiFormBackend;

mod cli;

use crate::cli::{Cli, Command, LogFormatArg};

fn main() {
    let cli = Cli::parse();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let exit_code = match run(cli) {
        Ok(()) => 0,
        Err(error) => {
            tracing::error!("{error:#}");
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<()> {
    let dir = data_dir(cli.data_dir.as_deref());
    let mut app = commands::open(&dir)?;
    let mut out = io::stdout().lock();

    match cli.command {
        Command::New { name } => {
            commands::new_form(&mut app, name.as_deref(), &editor(), &mut out)?;
        }
        Command::Forms => commands::list_forms(&app, &mut out)?,
        Command::Show { id, tui: false } => commands::show_form(&app, id, &mut out)?,
        Command::Show { id, tui: true } => {
            let form = app
                .form(id)
                .ok_or(formbuilder::AppError::FormNotFound(id))?;
            RatatuiFormBackend::new().preview(form)?;
        }
        Command::Edit { id } => {
            commands::edit_form(&mut app, id, &editor(), &mut out)?;
        }
        Command::Answer { id } => {
            commands::answer_form(&mut app, id, &RatatuiFormBackend::new(), &mut out)?;
        }
        Command::Answers { form } => commands::list_answers(&app, form, &mut out)?,
        Command::Move { id, from, to } => commands::move_field(&mut app, id, from, to, &mut out)?,
        Command::DeleteForm { id } => commands::delete_form(&mut app, id, &mut out)?,
        Command::DeleteAnswer { index } => commands::delete_answer(&mut app, index, &mut out)?,
        Command::ExportHtml {
            id,
            output,
            fragment,
        } => commands::export_html(&app, id, output.as_deref(), fragment, &mut out)?,
    }
    Ok(())
}

fn editor() -> DialoguerEditor {
    if io::stdout().is_terminal() {
        DialoguerEditor::new()
    } else {
        DialoguerEditor::plain()
    }
}

/// Build logging configuration from CLI flags.
///
/// `RUST_LOG` applies unless `-v`/`-q` was given.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !cli.verbosity.is_present();
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = cli.log_file.is_none() && io::stderr().is_terminal();
    config
}
