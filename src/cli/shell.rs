use std::{
    fmt,
    io::{self, BufRead, Write},
};

use shell_words::split;

use crate::cli::core::{CliError, CommandError, LoopControl, ShellContext};
use crate::config::{Config, ConfigManager};

/// Runs the shell over stdin/stdout with the stored configuration.
pub fn run_cli() -> Result<(), CliError> {
    let config = ConfigManager::new()?.load()?;
    if !config.color {
        colored::control::set_override(false);
    }
    tracing::info!(year = config.entry_year(), "ledger shell started");

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_script(stdin.lock(), stdout.lock(), config)?;
    Ok(())
}

/// Executes one command per input line until `exit` or end of input.
///
/// Command failures are reported on `out` and do not stop the session.
pub fn run_script<R: BufRead, W: Write>(input: R, out: W, config: Config) -> Result<W, CliError> {
    let mut context = ShellContext::new(config, out);
    for line in input.lines() {
        let line = line?;
        if handle_line(&mut context, &line)? == LoopControl::Exit {
            break;
        }
    }
    Ok(context.into_output())
}

fn handle_line<W: Write>(context: &mut ShellContext<W>, line: &str) -> Result<LoopControl, CliError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            context.print_warning(&err.message)?;
            return Ok(LoopControl::Continue);
        }
    };

    let Some(raw) = tokens.first() else {
        return Ok(LoopControl::Continue);
    };
    if raw.starts_with('#') {
        return Ok(LoopControl::Continue);
    }

    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    match context.dispatch(&command, raw, &args) {
        Ok(control) => Ok(control),
        Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
        Err(err) => {
            context.report_error(&command, err)?;
            Ok(LoopControl::Continue)
        }
    }
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
