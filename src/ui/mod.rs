//! Interactive user interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for pipes and headless environments
//! - [`UiChooser`], which asks the operator to pick an extension
//!
//! # Example
//!
//! ```
//! use addext::ui::{create_ui, OutputMode};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.success("Extension added");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use prompts::prompt_user;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, AddextTheme};

use crate::error::Result;
use crate::resolve::{Choice, Chooser};

/// Prompt key used when asking for an extension.
pub const EXTENSION_PROMPT_KEY: &str = "extension";

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a line for a file that was left alone.
    fn skipped(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a prompt and get user input.
    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult>;

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Remove the spinner without a final line.
    fn finish_clear(&mut self);
}

/// A select prompt to show to the user.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Unique key for the prompt (used for overrides and lookup).
    pub key: String,
    /// The question to display.
    pub question: String,
    /// Options to choose from, in display order.
    pub options: Vec<PromptOption>,
    /// Value preselected when the user just presses enter.
    pub default: Option<String>,
}

/// An option in a select prompt.
#[derive(Debug, Clone)]
pub struct PromptOption {
    /// Display label.
    pub label: String,
    /// Value returned when selected.
    pub value: String,
}

/// Result of a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult {
    /// Value of the selected option.
    Selected(String),
    /// The operator dismissed the prompt.
    Cancelled,
}

/// [`Chooser`] backed by a [`UserInterface`] select prompt.
///
/// Options are shown in registry order and the first one is preselected.
pub struct UiChooser<'a> {
    ui: &'a mut dyn UserInterface,
}

impl<'a> UiChooser<'a> {
    pub fn new(ui: &'a mut dyn UserInterface) -> Self {
        Self { ui }
    }
}

impl Chooser for UiChooser<'_> {
    fn choose(&mut self, message: &str, options: &[String]) -> Result<Choice> {
        let prompt = Prompt {
            key: EXTENSION_PROMPT_KEY.to_string(),
            question: message.to_string(),
            options: options
                .iter()
                .map(|ext| PromptOption {
                    label: format!(".{}", ext),
                    value: ext.clone(),
                })
                .collect(),
            default: options.first().cloned(),
        };

        Ok(match self.ui.prompt(&prompt)? {
            PromptResult::Selected(value) => Choice::Selected(value),
            PromptResult::Cancelled => Choice::Cancelled,
        })
    }
}
