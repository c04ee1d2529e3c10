use anyhow::Result;
use argh::FromArgs;
use console_actions::{
    ActionDescriptor, ActionRegistry, Interpreter, ParameterDescriptor, ReplConfig,
    RustylineSource, ValueKind,
};
use std::io::Write;
use tracing_subscriber::EnvFilter;

#[derive(FromArgs)]
/// Interactive console with a few sample actions.
struct Args {
    /// text shown before each input line
    #[argh(option, default = "String::from(\":>\")")]
    prompt: String,

    /// disable colored output
    #[argh(switch)]
    no_color: bool,
}

fn sample_actions() -> Vec<ActionDescriptor> {
    vec![
        ActionDescriptor::new(["e", "echo"], |inv, out| {
            writeln!(out, "{}", inv.input)?;
            Ok(())
        })
        .description("Print the rest of the line")
        .display_order(10),
        ActionDescriptor::new(["s", "sum"], |inv, out| {
            let a = inv.args.decimal("first").unwrap_or_default();
            let b = inv.args.decimal("second").unwrap_or_default();
            writeln!(out, "{}", a + b)?;
            Ok(())
        })
        .description("Add two numbers: -a <x> -b <y>")
        .display_order(20)
        .measure_execution_time(true)
        .parameters([
            ParameterDescriptor::new("first")
                .variants(["-a", "--first"])
                .value_type(ValueKind::Decimal),
            ParameterDescriptor::new("second")
                .variants(["-b", "--second"])
                .value_type(ValueKind::Decimal),
        ]),
        ActionDescriptor::new(["since"], |inv, out| {
            let from = inv
                .args
                .date_time("date")
                .ok_or_else(|| anyhow::anyhow!("missing date"))?;
            let now = chrono::Local::now().naive_local();
            writeln!(out, "{} days", (now - from).num_days())?;
            Ok(())
        })
        .description("Days elapsed since --date \"<date>\"")
        .parameter(ParameterDescriptor::new("date").value_type(ValueKind::DateTime)),
    ]
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Args = argh::from_env();
    let config = ReplConfig::default()
        .prompt(args.prompt)
        .color(!args.no_color);

    let registry = ActionRegistry::build(sample_actions());
    let mut source = RustylineSource::new()?;
    Interpreter::new(registry, config).repl(&mut source)
}
