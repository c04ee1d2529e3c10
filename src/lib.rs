//! Declarative command dispatch for interactive line-oriented consoles.
//!
//! A host describes its operations as [`ActionDescriptor`]s (trigger words, a description,
//! typed [`ParameterDescriptor`]s and a handler), hands them to [`ActionRegistry::build`]
//! and runs an [`Interpreter`] over the result. The interpreter reads a line, picks the
//! action by its first word, parses `-x value` / `--name "quoted value"` arguments into
//! [`ParsedArguments`] and calls the handler. Malformed declarations are dropped with a
//! warning at build time; malformed input and handler failures are printed and the
//! session carries on.

mod action;
mod config;
mod console;
pub mod error;
mod interpreter;
mod io_adapters;
mod parameter;
mod parser;
mod registry;

pub use action::{ActionDescriptor, DEFAULT_DISPLAY_ORDER, Handler, Invocation};
pub use config::ReplConfig;
pub use console::{Console, LineSource, RustylineSource};
pub use error::{ConfigurationError, InvocationError, ParseError};
pub use interpreter::{Interpreter, Outcome};
pub use io_adapters::{MemWriter, ScriptedSource};
pub use parameter::{ParameterDescriptor, Value, ValueKind, validate_parameters};
pub use parser::{ParsedArguments, parse_arguments};
pub use registry::{ActionRegistry, EXIT_SENTINEL, HELP_TRIGGERS, Rejection};
