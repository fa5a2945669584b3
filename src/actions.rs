//! Host run context: step inputs, log lines, outputs and the failure status.
//!
//! [`ActionsContext`] speaks the GitHub Actions workflow-command protocol on
//! stdout. [`TerminalContext`] is used for local runs and styles its output
//! with `console`.

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use console::Style;

use crate::error::TriggerError;

/// Capabilities the trigger workflow needs from the CI host.
pub trait RunContext {
    /// Reads a raw input value. `None` when the input was not supplied.
    fn raw_input(&self, name: &str) -> Option<String>;

    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn debug(&self, message: &str);

    /// Records the terminal failure of the run. Does not exit the process.
    fn set_failed(&self, message: &str);

    fn set_output(&self, name: &str, value: &str) -> io::Result<()>;

    /// Reads an input, trimmed. Missing or blank required inputs fail.
    fn get_input(&self, name: &str, required: bool) -> Result<String, TriggerError> {
        let value = self.raw_input(name).unwrap_or_default();
        let value = value.trim();
        if required && value.is_empty() {
            return Err(TriggerError::missing_input(name));
        }
        Ok(value.to_string())
    }
}

/// `jobParams` => `INPUT_JOBPARAMS`, `job params` => `INPUT_JOB_PARAMS`.
pub fn input_env_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

pub fn running_in_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true")
}

fn env_input(name: &str) -> Option<String> {
    std::env::var(input_env_name(name)).ok()
}

// Workflow command data must not contain raw line breaks.
fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn command(name: &str, message: &str) -> String {
    format!("::{name}::{}", escape_data(message))
}

/// GitHub Actions runner.
pub struct ActionsContext {
    // Value of `GITHUB_OUTPUT` when the context was created.
    output_file: Option<PathBuf>,
    out: RefCell<Box<dyn Write>>,
}

impl Default for ActionsContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionsContext {
    pub fn new() -> Self {
        Self::with_lookup(|key| std::env::var(key).ok(), Box::new(io::stdout()))
    }

    /// Builds a context from an environment lookup, writing commands to `out`.
    pub fn with_lookup(lookup: impl Fn(&str) -> Option<String>, out: Box<dyn Write>) -> Self {
        Self {
            output_file: lookup("GITHUB_OUTPUT")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
            out: RefCell::new(out),
        }
    }

    fn emit(&self, line: &str) {
        let _ = writeln!(self.out.borrow_mut(), "{line}");
    }
}

impl RunContext for ActionsContext {
    fn raw_input(&self, name: &str) -> Option<String> {
        env_input(name)
    }

    fn info(&self, message: &str) {
        self.emit(message);
    }

    fn warning(&self, message: &str) {
        self.emit(&command("warning", message));
    }

    fn debug(&self, message: &str) {
        self.emit(&command("debug", message));
    }

    fn set_failed(&self, message: &str) {
        self.emit(&command("error", message));
    }

    fn set_output(&self, name: &str, value: &str) -> io::Result<()> {
        match &self.output_file {
            Some(path) => {
                let mut file = OpenOptions::new().append(true).create(true).open(path)?;
                writeln!(file, "{name}={value}")
            }
            None => {
                self.emit(&format!("::set-output name={name}::{}", escape_data(value)));
                Ok(())
            }
        }
    }
}

/// Local terminal with colored output.
pub struct TerminalContext {
    verbose: bool,
    out: RefCell<Box<dyn Write>>,
    err: RefCell<Box<dyn Write>>,
    green: Style,
    red: Style,
    yellow: Style,
    dim: Style,
}

impl TerminalContext {
    pub fn new(verbose: bool) -> Self {
        Self::with_writers(verbose, Box::new(io::stdout()), Box::new(io::stderr()))
    }

    pub fn with_writers(verbose: bool, out: Box<dyn Write>, err: Box<dyn Write>) -> Self {
        Self {
            verbose,
            out: RefCell::new(out),
            err: RefCell::new(err),
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
            dim: Style::new().dim(),
        }
    }

    fn print(&self, line: &str) {
        let _ = writeln!(self.out.borrow_mut(), "{line}");
    }

    fn eprint(&self, line: &str) {
        let _ = writeln!(self.err.borrow_mut(), "{line}");
    }
}

impl RunContext for TerminalContext {
    fn raw_input(&self, name: &str) -> Option<String> {
        env_input(name)
    }

    fn info(&self, message: &str) {
        self.print(message);
    }

    fn warning(&self, message: &str) {
        self.eprint(&format!("{} {message}", self.yellow.apply_to("warning:")));
    }

    fn debug(&self, message: &str) {
        if self.verbose {
            self.eprint(&self.dim.apply_to(message).to_string());
        }
    }

    fn set_failed(&self, message: &str) {
        self.eprint(&format!("  {} {message}", self.red.apply_to("✗")));
    }

    fn set_output(&self, name: &str, value: &str) -> io::Result<()> {
        self.print(&format!("  {} {name}={value}", self.green.apply_to("✓")));
        Ok(())
    }
}
