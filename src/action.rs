use crate::error::ConfigurationError;
use crate::parameter::{ParameterDescriptor, validate_parameters};
use crate::parser::ParsedArguments;
use anyhow::Result;
use std::fmt;
use std::io::Write;

/// Display order of actions that don't ask for a position in the help listing.
pub const DEFAULT_DISPLAY_ORDER: i32 = i32::MAX;

/// Everything a handler learns about the command line that selected it.
#[derive(Debug)]
pub struct Invocation<'a> {
    /// The trigger token as typed.
    pub trigger: &'a str,
    /// The rest of the line after the trigger, trimmed.
    pub input: &'a str,
    /// Parsed parameters; empty when the action declares none.
    pub args: ParsedArguments,
}

/// Object-safe handler signature.
///
/// Handlers write their output to the provided sink and report failures through
/// `anyhow`, which the interpreter displays without ending the session.
pub type Handler = Box<dyn Fn(&Invocation<'_>, &mut dyn Write) -> Result<()>>;

/// One operation the console exposes.
///
/// ```
/// use console_actions::{ActionDescriptor, ParameterDescriptor, ValueKind};
/// use std::io::Write;
///
/// let action = ActionDescriptor::new(["count", "c"], |inv, out| {
///     let n = inv.args.integer("records").unwrap_or_default();
///     writeln!(out, "{n} records")?;
///     Ok(())
/// })
/// .description("Count records")
/// .display_order(10)
/// .parameter(
///     ParameterDescriptor::new("records")
///         .value_type(ValueKind::Integer)
///         .default_value(1000),
/// );
/// assert!(action.validate().is_ok());
/// ```
pub struct ActionDescriptor {
    triggers: Vec<String>,
    description: String,
    display_order: i32,
    measure_execution_time: bool,
    parameters: Vec<ParameterDescriptor>,
    handler: Handler,
}

impl ActionDescriptor {
    /// Action answering to `triggers`, running `handler`.
    pub fn new<I, S, F>(triggers: I, handler: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&Invocation<'_>, &mut dyn Write) -> Result<()> + 'static,
    {
        Self {
            triggers: triggers.into_iter().map(Into::into).collect(),
            description: String::new(),
            display_order: DEFAULT_DISPLAY_ORDER,
            measure_execution_time: false,
            parameters: Vec::new(),
            handler: Box::new(handler),
        }
    }

    /// Text shown next to the triggers in the help listing.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Position in the help listing; lower values are listed first.
    ///
    /// Help sits at 0, so an order of 0 or below is listed with or before it.
    pub fn display_order(mut self, order: i32) -> Self {
        self.display_order = order;
        self
    }

    /// Report wall-clock duration after each successful run.
    pub fn measure_execution_time(mut self, measure: bool) -> Self {
        self.measure_execution_time = measure;
        self
    }

    /// Declare one more parameter.
    pub fn parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Declare several parameters at once.
    pub fn parameters(mut self, parameters: impl IntoIterator<Item = ParameterDescriptor>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// Command words that select this action.
    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    /// Help-listing description.
    pub fn describe(&self) -> &str {
        &self.description
    }

    /// Help-listing position.
    pub fn order(&self) -> i32 {
        self.display_order
    }

    /// Whether a successful run reports its duration.
    pub fn measures_execution_time(&self) -> bool {
        self.measure_execution_time
    }

    /// Parameters in declaration order.
    pub fn declared_parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    /// True when input should go through the argument parser.
    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }

    /// Triggers as they appear in the help listing.
    pub fn trigger_list(&self) -> String {
        self.triggers.join(", ")
    }

    /// Registration-time checks: triggers usable on a command line, parameters valid.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.triggers.is_empty() {
            return Err(ConfigurationError::NoTriggers);
        }
        if let Some(bad) = self
            .triggers
            .iter()
            .find(|t| t.is_empty() || t.chars().any(char::is_whitespace))
        {
            return Err(ConfigurationError::InvalidTrigger(bad.clone()));
        }
        validate_parameters(&self.parameters)
    }

    /// Call the handler.
    pub fn execute(&self, invocation: &Invocation<'_>, out: &mut dyn Write) -> Result<()> {
        (self.handler)(invocation, out)
    }
}

impl fmt::Debug for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDescriptor")
            .field("triggers", &self.triggers)
            .field("description", &self.description)
            .field("display_order", &self.display_order)
            .field("measure_execution_time", &self.measure_execution_time)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::ValueKind;
    use std::io::Cursor;

    fn noop(_: &Invocation<'_>, _: &mut dyn Write) -> Result<()> {
        Ok(())
    }

    #[test]
    fn test_builder_defaults() {
        let action = ActionDescriptor::new(["m", "m1"], noop);
        assert_eq!(action.triggers(), ["m", "m1"]);
        assert_eq!(action.describe(), "");
        assert_eq!(action.order(), DEFAULT_DISPLAY_ORDER);
        assert!(!action.measures_execution_time());
        assert!(!action.has_parameters());
        assert_eq!(action.trigger_list(), "m, m1");
    }

    #[test]
    fn test_action_with_multiple_parameters_is_valid() {
        let action = ActionDescriptor::new(["load"], noop).parameters([
            ParameterDescriptor::new("file"),
            ParameterDescriptor::new("keepOpen")
                .value_type(ValueKind::Bool)
                .default_value(true),
            ParameterDescriptor::new("recordsToRead")
                .value_type(ValueKind::Integer)
                .default_value(1000),
            ParameterDescriptor::new("maxMemory")
                .value_type(ValueKind::Decimal)
                .default_value(1.5),
        ]);
        assert!(action.validate().is_ok());
    }

    #[test]
    fn test_trigger_rules() {
        let none: [&str; 0] = [];
        assert_eq!(
            ActionDescriptor::new(none, noop).validate(),
            Err(ConfigurationError::NoTriggers)
        );
        assert_eq!(
            ActionDescriptor::new(["ok", "two words"], noop).validate(),
            Err(ConfigurationError::InvalidTrigger("two words".into()))
        );
        assert_eq!(
            ActionDescriptor::new([""], noop).validate(),
            Err(ConfigurationError::InvalidTrigger("".into()))
        );
    }

    #[test]
    fn test_execute_passes_invocation_to_handler() {
        let action = ActionDescriptor::new(["greet"], |inv, out| {
            writeln!(out, "{} -> {}", inv.trigger, inv.input)?;
            Ok(())
        });
        let inv = Invocation {
            trigger: "greet",
            input: "world",
            args: ParsedArguments::default(),
        };
        let mut out = Cursor::new(Vec::new());
        action.execute(&inv, &mut out).unwrap();
        assert_eq!(String::from_utf8(out.into_inner()).unwrap(), "greet -> world\n");
    }
}
