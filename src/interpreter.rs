use crate::action::{ActionDescriptor, Invocation};
use crate::config::ReplConfig;
use crate::console::{Console, LineSource};
use crate::error::InvocationError;
use crate::parser::{ParsedArguments, parse_arguments};
use crate::registry::{ActionRegistry, EXIT_SENTINEL};
use colored::Color;
use std::io::{self, Write};
use std::time::Instant;

/// What the loop should do after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

/// Interactive read-eval loop over an [`ActionRegistry`].
///
/// One line is read, resolved and run to completion before the next one is read.
/// Failures of a single command are printed and never end the session.
///
/// Example
/// ```
/// use console_actions::{ActionDescriptor, ActionRegistry, Console, Interpreter, ReplConfig, ScriptedSource};
/// use std::io::Write;
///
/// let registry = ActionRegistry::build(vec![ActionDescriptor::new(["ping"], |_, out| {
///     writeln!(out, "pong")?;
///     Ok(())
/// })]);
/// let console = Console::new(Box::new(std::io::sink()), false);
/// let mut sh = Interpreter::with_console(registry, ReplConfig::default(), console);
/// sh.repl(&mut ScriptedSource::new(["ping", "q"])).unwrap();
/// ```
pub struct Interpreter {
    registry: ActionRegistry,
    config: ReplConfig,
    console: Console,
}

impl Interpreter {
    /// Interpreter writing to standard output.
    pub fn new(registry: ActionRegistry, config: ReplConfig) -> Self {
        let console = Console::stdout(config.color);
        Self::with_console(registry, config, console)
    }

    /// Interpreter writing to `console`.
    pub fn with_console(registry: ActionRegistry, config: ReplConfig, console: Console) -> Self {
        Self {
            registry,
            config,
            console,
        }
    }

    /// The trigger table this interpreter dispatches through.
    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Run until the exit sentinel is entered or `source` runs dry.
    pub fn repl(&mut self, source: &mut dyn LineSource) -> anyhow::Result<()> {
        for rejection in self.registry.rejected() {
            self.console
                .write_line(&format!("WARNING: {}", rejection.error), Some(Color::Yellow))?;
        }
        if let Some(banner) = &self.config.banner {
            self.console.write_line(banner, Some(Color::BrightBlack))?;
        }

        let prompt = self.prompt();
        loop {
            self.console.write_line("", None)?;
            let Some(line) = source.read_line(&prompt)? else {
                break;
            };
            if self.execute_line(&line)? == Outcome::Exit {
                break;
            }
        }
        Ok(())
    }

    /// Prompt passed to the line source, dark yellow when colors are on.
    fn prompt(&self) -> String {
        let prompt = self.console.paint(self.config.prompt.trim_end(), Some(Color::Yellow));
        format!("{prompt} ")
    }

    /// Handle one input line.
    ///
    /// Only console write failures are returned as errors; parse and handler failures
    /// are reported on the console.
    pub fn execute_line(&mut self, line: &str) -> io::Result<Outcome> {
        if line == EXIT_SENTINEL {
            return Ok(Outcome::Exit);
        }
        let (trigger, input) = split_command(line);
        if trigger.is_empty() {
            return Ok(Outcome::Continue);
        }

        let Some(action) = self.registry.resolve(trigger) else {
            let message = format!(
                "{} Unrecognized command '{}'. Use ? or help for a list of available commands",
                self.config.prompt, trigger
            );
            self.console.write_line(&message, Some(Color::Red))?;
            return Ok(Outcome::Continue);
        };

        tracing::debug!(%trigger, %input, "dispatching command");
        let start = Instant::now();
        match invoke(action, trigger, input, self.console.sink()) {
            Ok(()) => {
                let elapsed = start.elapsed();
                self.console.write_line("", None)?;
                if action.measures_execution_time() {
                    let message = format!("Method executed in {:.2} sec", elapsed.as_secs_f64());
                    self.console.write_line(&message, None)?;
                }
            }
            Err(err) => {
                tracing::debug!(%trigger, error = %err, "command failed");
                self.console.write_inline("Error:", Some(Color::Red))?;
                self.console.write_line(&format!("{err:#}"), None)?;
            }
        }
        Ok(Outcome::Continue)
    }
}

/// Split a line into its trigger token and the trimmed remainder.
fn split_command(line: &str) -> (&str, &str) {
    let line = line.trim_start();
    match line.find(char::is_whitespace) {
        Some(idx) => (&line[..idx], line[idx..].trim()),
        None => (line, ""),
    }
}

/// Parse arguments if the action declares any, then call its handler.
fn invoke(
    action: &ActionDescriptor,
    trigger: &str,
    input: &str,
    out: &mut dyn Write,
) -> Result<(), InvocationError> {
    let args = if action.has_parameters() {
        parse_arguments(input, action.declared_parameters())?
    } else {
        ParsedArguments::default()
    };
    let invocation = Invocation {
        trigger,
        input,
        args,
    };
    action.execute(&invocation, out)?;
    Ok(())
}
