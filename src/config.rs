/// Session settings for the interactive loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplConfig {
    /// Shown before each input line and in the unrecognized-command message.
    pub prompt: String,
    /// Colorize console output.
    pub color: bool,
    /// Printed once when the loop starts.
    pub banner: Option<String>,
}

impl ReplConfig {
    /// Replace the prompt text.
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Turn colored output on or off.
    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Replace the startup banner; `None` prints nothing.
    pub fn banner(mut self, banner: Option<String>) -> Self {
        self.banner = banner;
        self
    }
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: ":>".to_string(),
            color: true,
            banner: Some("Type '?' or 'help' for additional commands...".to_string()),
        }
    }
}
