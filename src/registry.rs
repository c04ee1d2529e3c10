//! Trigger table built once from host-supplied actions.

use crate::action::ActionDescriptor;
use crate::error::ConfigurationError;
use std::collections::HashMap;

/// Triggers of the built-in help action.
pub const HELP_TRIGGERS: [&str; 3] = ["h", "help", "?"];

/// Line that ends the interactive loop.
pub const EXIT_SENTINEL: &str = "q";

/// An action that failed validation and was left out of the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub triggers: Vec<String>,
    pub error: ConfigurationError,
}

/// Read-only trigger → action table.
///
/// Always contains the built-in help action. When two actions declare the same trigger,
/// the one registered later owns it.
#[derive(Debug)]
pub struct ActionRegistry {
    actions: Vec<ActionDescriptor>,
    table: HashMap<String, usize>,
    rejected: Vec<Rejection>,
}

impl ActionRegistry {
    /// Validate `descriptors` and build the table. Invalid actions are dropped with a
    /// warning; building itself never fails.
    pub fn build(descriptors: impl IntoIterator<Item = ActionDescriptor>) -> Self {
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();

        for action in descriptors {
            match action.validate() {
                Ok(()) => accepted.push(action),
                Err(error) => {
                    tracing::warn!(triggers = %action.trigger_list(), %error, "skipping action");
                    rejected.push(Rejection {
                        triggers: action.triggers().to_vec(),
                        error,
                    });
                }
            }
        }

        let help_text = render_help(&accepted);
        let help = ActionDescriptor::new(HELP_TRIGGERS, move |_, out| {
            out.write_all(help_text.as_bytes())?;
            Ok(())
        })
        .description("Displays this message")
        .display_order(0);

        let mut actions = Vec::with_capacity(accepted.len() + 1);
        actions.push(help);
        actions.extend(accepted);

        let mut table = HashMap::new();
        for (idx, action) in actions.iter().enumerate() {
            for trigger in action.triggers() {
                if let Some(prev) = table.insert(trigger.clone(), idx) {
                    if prev != idx {
                        tracing::debug!(%trigger, "trigger reassigned to a later action");
                    }
                }
            }
        }

        Self {
            actions,
            table,
            rejected,
        }
    }

    /// Action owning `trigger`, if any.
    pub fn resolve(&self, trigger: &str) -> Option<&ActionDescriptor> {
        self.table.get(trigger).map(|&idx| &self.actions[idx])
    }

    /// Actions that were dropped during [`build`](Self::build).
    pub fn rejected(&self) -> &[Rejection] {
        &self.rejected
    }

    /// Registered actions in registration order, help first.
    pub fn actions(&self) -> impl Iterator<Item = &ActionDescriptor> {
        self.actions.iter()
    }

    /// Number of registered actions, help included.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Never true, help is always registered.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Help listing for `accepted` plus the help row itself and the exit row.
///
/// Rows are sorted by display order, ties keep registration order; trigger lists are
/// right-aligned to the widest one.
fn render_help(accepted: &[ActionDescriptor]) -> String {
    let mut rows: Vec<(i32, String, &str)> = Vec::with_capacity(accepted.len() + 1);
    rows.push((0, HELP_TRIGGERS.join(", "), "Displays this message"));
    rows.extend(
        accepted
            .iter()
            .map(|a| (a.order(), a.trigger_list(), a.describe())),
    );
    rows.sort_by_key(|(order, _, _)| *order);

    let width = rows
        .iter()
        .map(|(_, triggers, _)| triggers.chars().count())
        .max()
        .unwrap_or(0);

    let mut text = String::from("\nAvailable commands:\n");
    for (_, triggers, description) in &rows {
        text.push_str(&format!("{triggers:>width$} : {description}\n"));
    }
    text.push_str(&format!("{EXIT_SENTINEL:>width$} : Exit\n\n"));
    text
}
