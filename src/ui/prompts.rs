//! Interactive prompts.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;

use crate::error::{AddextError, Result};

use super::{Prompt, PromptResult};

/// Convert dialoguer errors to AddextError.
fn map_dialoguer_err(e: dialoguer::Error) -> AddextError {
    AddextError::PromptFailed {
        message: e.to_string(),
    }
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Ask the user to select one option; Esc or `q` cancels.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let options = &prompt.options;
    let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();

    let default_idx = prompt
        .default
        .as_ref()
        .and_then(|d| options.iter().position(|o| o.value == *d))
        .unwrap_or(0);

    let selection = Select::with_theme(&prompt_theme())
        .with_prompt(&prompt.question)
        .items(&labels)
        .default(default_idx)
        .interact_on_opt(term)
        .map_err(map_dialoguer_err)?;

    Ok(match selection {
        Some(idx) => PromptResult::Selected(options[idx].value.clone()),
        None => PromptResult::Cancelled,
    })
}
