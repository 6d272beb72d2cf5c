//! Rename decisions.

use std::fmt;

/// What the engine decided to do with one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// No match in the recognized namespace.
    SkipUnidentified,
    /// Format unknown to the registry or without registered extensions.
    SkipNoExtensionsRegistered,
    /// Current extension is already registered for the format.
    SkipAlreadyCorrect,
    /// The operator declined to pick an extension.
    SkipByUser,
    /// Rename with the chosen extension.
    Rename,
    /// Preview of a rename; nothing is changed.
    PreviewRename,
    /// Preview of an interactive choice; nothing is chosen or changed.
    PromptRename,
}

impl Action {
    /// Whether this action leaves the file as it is.
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            Self::SkipUnidentified
                | Self::SkipNoExtensionsRegistered
                | Self::SkipAlreadyCorrect
                | Self::SkipByUser
        )
    }

    /// Whether this action is a dry-run preview.
    pub fn is_preview(&self) -> bool {
        matches!(self, Self::PreviewRename | Self::PromptRename)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::SkipUnidentified => "skip-unidentified",
            Self::SkipNoExtensionsRegistered => "skip-no-extensions-registered",
            Self::SkipAlreadyCorrect => "skip-already-correct",
            Self::SkipByUser => "skip-by-user",
            Self::Rename => "rename",
            Self::PreviewRename => "preview-rename",
            Self::PromptRename => "prompt-rename",
        };
        f.write_str(label)
    }
}

/// Format details attached to a decision once the file is identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatInfo {
    /// Format code (PUID).
    pub code: String,
    /// Format name from the registry, or from the identifier as a fallback.
    pub name: String,
}

/// The outcome of the decision procedure for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameDecision {
    pub action: Action,
    /// Set for `Rename` and `PreviewRename`.
    pub chosen_extension: Option<String>,
    /// Extensions offered when an interactive choice was (or would be) shown.
    pub candidates: Vec<String>,
    /// Identified format, absent for unidentified files.
    pub format: Option<FormatInfo>,
    /// Human-readable explanation.
    pub reason: String,
}

impl RenameDecision {
    pub(crate) fn skip(action: Action, format: Option<FormatInfo>, reason: impl Into<String>) -> Self {
        Self {
            action,
            chosen_extension: None,
            candidates: Vec::new(),
            format,
            reason: reason.into(),
        }
    }

    /// New basename for a rename or preview: old name plus the extension.
    pub fn new_name(&self, basename: &str) -> Option<String> {
        self.chosen_extension
            .as_ref()
            .map(|ext| format!("{}.{}", basename, ext))
    }
}
