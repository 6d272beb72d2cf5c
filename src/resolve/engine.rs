//! The extension resolution engine.
//!
//! For one file the engine walks a fixed decision procedure:
//!
//! 1. no match in the recognized namespace: skip as unidentified
//! 2. format unknown or without extensions: skip
//! 3. current extension already registered (any case): skip
//! 4. pick an extension, asking the [`Chooser`] only in interactive mode
//!    when more than one is registered
//! 5. in preview mode, report the rename without touching the file
//! 6. otherwise append the extension with a no-clobber rename
//!
//! Files are independent: the engine only reads the registry.

use std::path::Path;

use crate::error::{AddextError, Result};
use crate::identify::{IdentificationResult, Identifier, PRONOM_NAMESPACE};
use crate::registry::Registry;
use crate::report::{FileReport, Outcome};

use super::decision::{Action, FormatInfo, RenameDecision};
use super::rename::{appended_path, rename_no_clobber};

/// Renaming policy for a run.
///
/// Automatic mode is the absence of both flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mode {
    /// Report decisions without changing anything.
    pub preview: bool,
    /// Ask the operator when several extensions are registered.
    pub interactive: bool,
}

impl Mode {
    /// Automatic mode: always the first registered extension.
    pub fn auto() -> Self {
        Self::default()
    }

    /// Preview-only automatic mode.
    pub fn preview() -> Self {
        Self {
            preview: true,
            interactive: false,
        }
    }

    /// Interactive mode.
    pub fn interactive() -> Self {
        Self {
            preview: false,
            interactive: true,
        }
    }
}

/// The operator's answer to an extension choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Selected(String),
    Cancelled,
}

/// Capability that asks the operator to pick one extension.
pub trait Chooser {
    /// Present `options` in order and return the selection.
    fn choose(&mut self, message: &str, options: &[String]) -> Result<Choice>;
}

/// Chooser for non-interactive runs; it is never expected to be asked.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoChooser;

impl Chooser for NoChooser {
    fn choose(&mut self, _message: &str, _options: &[String]) -> Result<Choice> {
        Err(AddextError::PromptFailed {
            message: "interactive choice requested in a non-interactive run".to_string(),
        })
    }
}

/// Decides and applies extension renames against a registry.
#[derive(Debug, Clone)]
pub struct ResolutionEngine<'a> {
    registry: &'a Registry,
    mode: Mode,
    namespace: String,
}

impl<'a> ResolutionEngine<'a> {
    /// Create an engine over `registry` for the PRONOM namespace.
    pub fn new(registry: &'a Registry, mode: Mode) -> Self {
        Self {
            registry,
            mode,
            namespace: PRONOM_NAMESPACE.to_string(),
        }
    }

    /// Use a different identification namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Get the active mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Run the decision procedure for one file.
    ///
    /// Only a failing [`Chooser`] produces an error; every other path ends in
    /// a [`RenameDecision`].
    pub fn decide(
        &self,
        path: &Path,
        identification: &IdentificationResult,
        chooser: &mut dyn Chooser,
    ) -> Result<RenameDecision> {
        let Some(matched) = identification.resolved_match(&self.namespace) else {
            return Ok(RenameDecision::skip(
                Action::SkipUnidentified,
                None,
                "Not identified",
            ));
        };

        let code = matched.format_code.as_str();
        let record = self.registry.get(code);
        let format = FormatInfo {
            code: code.to_string(),
            name: record
                .map(|r| r.format_name.clone())
                .or_else(|| matched.format_name.clone())
                .unwrap_or_else(|| code.to_string()),
        };

        let record = match record {
            Some(r) if !r.extensions.is_empty() => r,
            Some(_) => {
                return Ok(RenameDecision::skip(
                    Action::SkipNoExtensionsRegistered,
                    Some(format),
                    "No extensions are registered for this format",
                ))
            }
            None => {
                return Ok(RenameDecision::skip(
                    Action::SkipNoExtensionsRegistered,
                    Some(format),
                    "Format is not in the registry",
                ))
            }
        };

        let current = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned());
        if let Some(current) = current.filter(|e| record.has_extension(e)) {
            return Ok(RenameDecision::skip(
                Action::SkipAlreadyCorrect,
                Some(format),
                format!("Already has correct extension '{}'", current),
            ));
        }

        let extensions = &record.extensions;
        let chosen = if self.mode.interactive && extensions.len() > 1 {
            if self.mode.preview {
                return Ok(RenameDecision {
                    action: Action::PromptRename,
                    chosen_extension: None,
                    candidates: extensions.clone(),
                    format: Some(format),
                    reason: "Several extensions registered; choice needed".to_string(),
                });
            }

            let message = format!(
                "File {} is format {} ({}). Which extension would you like to add?",
                path.display(),
                format.name,
                format.code
            );
            match chooser.choose(&message, extensions)? {
                Choice::Cancelled => {
                    return Ok(RenameDecision {
                        candidates: extensions.clone(),
                        ..RenameDecision::skip(Action::SkipByUser, Some(format), "Skipped by user")
                    })
                }
                Choice::Selected(ext) => {
                    let ext = ext.to_lowercase();
                    if !extensions.contains(&ext) {
                        return Err(AddextError::PromptFailed {
                            message: format!("'{}' is not a registered extension", ext),
                        });
                    }
                    ext
                }
            }
        } else {
            extensions[0].clone()
        };

        let (action, reason) = if self.mode.preview {
            (Action::PreviewRename, "Preview only; file left unchanged")
        } else {
            (Action::Rename, "Extension added")
        };

        Ok(RenameDecision {
            action,
            chosen_extension: Some(chosen),
            candidates: if self.mode.interactive {
                extensions.clone()
            } else {
                Vec::new()
            },
            format: Some(format),
            reason: reason.to_string(),
        })
    }

    /// Decide for one already-identified file and carry out the decision.
    ///
    /// Rename and prompt failures become an [`Outcome::Failed`] report.
    pub fn process(
        &self,
        path: &Path,
        identification: &IdentificationResult,
        chooser: &mut dyn Chooser,
    ) -> FileReport {
        let decision = match self.decide(path, identification, chooser) {
            Ok(decision) => decision,
            Err(e) => return FileReport::failed(path, None, &e),
        };

        let outcome = match decision.action {
            Action::Rename => {
                let ext = decision.chosen_extension.as_deref().unwrap_or_default();
                let to = appended_path(path, ext);
                match rename_no_clobber(path, &to) {
                    Ok(()) => Outcome::Renamed { to },
                    Err(e) => Outcome::Failed {
                        error: e.to_string(),
                    },
                }
            }
            Action::PreviewRename | Action::PromptRename => Outcome::Previewed,
            _ => Outcome::Skipped,
        };

        FileReport::new(path, Some(decision), outcome)
    }

    /// Identify one file and process it.
    ///
    /// # Errors
    ///
    /// Only `IdentifierUnavailable` is returned, as it ends the run. A failed
    /// identification of this file is reported as [`Outcome::Failed`].
    pub fn identify_and_process(
        &self,
        path: &Path,
        identifier: &dyn Identifier,
        chooser: &mut dyn Chooser,
    ) -> Result<FileReport> {
        match identifier.identify(path) {
            Ok(identification) => Ok(self.process(path, &identification, chooser)),
            Err(e @ AddextError::IdentifierUnavailable { .. }) => Err(e),
            Err(e) => Ok(FileReport::failed(path, None, &e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identify::FormatMatch;
    use crate::registry::FormatRecord;
    use std::collections::VecDeque;
    use std::fs;
    use tempfile::TempDir;

    /// Chooser that replays scripted answers and records what it was asked.
    #[derive(Default)]
    struct ScriptedChooser {
        answers: VecDeque<Choice>,
        asked: Vec<Vec<String>>,
    }

    impl ScriptedChooser {
        fn answering(answers: Vec<Choice>) -> Self {
            Self {
                answers: answers.into(),
                asked: Vec::new(),
            }
        }
    }

    impl Chooser for ScriptedChooser {
        fn choose(&mut self, _message: &str, options: &[String]) -> Result<Choice> {
            self.asked.push(options.to_vec());
            Ok(self.answers.pop_front().unwrap_or(Choice::Cancelled))
        }
    }

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry
            .insert("x-fmt/384", FormatRecord::new("Quicktime", "", ["mov"]))
            .unwrap();
        registry
            .insert(
                "x-fmt/114",
                FormatRecord::new("Lotus 1-2-3 Worksheet", "1.0", ["wk1", "123"]),
            )
            .unwrap();
        registry
            .insert("fmt/290", FormatRecord::new("OpenDocument Text", "1.1", ["odt"]))
            .unwrap();
        registry
            .insert("fmt/999", FormatRecord::new("Extensionless", "", Vec::<String>::new()))
            .unwrap();
        registry
    }

    fn pronom(code: &str) -> IdentificationResult {
        IdentificationResult::new(vec![FormatMatch::new("pronom", code)])
    }

    fn file(temp: &TempDir, name: &str) -> std::path::PathBuf {
        let path = temp.path().join(name);
        fs::write(&path, name.as_bytes()).unwrap();
        path
    }

    #[test]
    fn unidentified_is_skipped_in_every_mode() {
        let registry = registry();
        let other_ns = IdentificationResult::new(vec![FormatMatch::new("mime", "video/quicktime")]);
        for mode in [Mode::auto(), Mode::preview(), Mode::interactive()] {
            let engine = ResolutionEngine::new(&registry, mode);
            for id in [IdentificationResult::unidentified(), other_ns.clone()] {
                let decision = engine
                    .decide(Path::new("animation"), &id, &mut NoChooser)
                    .unwrap();
                assert_eq!(decision.action, Action::SkipUnidentified);
                assert!(decision.chosen_extension.is_none());
            }
        }
    }

    #[test]
    fn empty_extension_list_is_skipped_in_every_mode() {
        let registry = registry();
        for mode in [
            Mode::auto(),
            Mode::preview(),
            Mode::interactive(),
            Mode {
                preview: true,
                interactive: true,
            },
        ] {
            let engine = ResolutionEngine::new(&registry, mode);
            let decision = engine
                .decide(Path::new("blob"), &pronom("fmt/999"), &mut NoChooser)
                .unwrap();
            assert_eq!(decision.action, Action::SkipNoExtensionsRegistered);
        }
    }

    #[test]
    fn unregistered_code_is_skipped() {
        let registry = registry();
        let engine = ResolutionEngine::new(&registry, Mode::auto());
        let id = IdentificationResult::new(vec![
            FormatMatch::new("pronom", "fmt/12345").with_name("Mystery Format"),
        ]);
        let decision = engine.decide(Path::new("blob"), &id, &mut NoChooser).unwrap();
        assert_eq!(decision.action, Action::SkipNoExtensionsRegistered);
        assert_eq!(decision.format.unwrap().name, "Mystery Format");
    }

    #[test]
    fn existing_extension_matches_case_insensitively() {
        let registry = registry();
        let engine = ResolutionEngine::new(&registry, Mode::auto());
        let decision = engine
            .decide(Path::new("x.ODT"), &pronom("fmt/290"), &mut NoChooser)
            .unwrap();
        assert_eq!(decision.action, Action::SkipAlreadyCorrect);
    }

    #[test]
    fn any_registered_extension_counts_as_correct() {
        let registry = registry();
        let engine = ResolutionEngine::new(&registry, Mode::interactive());
        let mut chooser = ScriptedChooser::default();
        let decision = engine
            .decide(Path::new("PF.123"), &pronom("x-fmt/114"), &mut chooser)
            .unwrap();
        assert_eq!(decision.action, Action::SkipAlreadyCorrect);
        assert!(chooser.asked.is_empty());
    }

    #[test]
    fn auto_mode_uses_first_extension() {
        let registry = registry();
        let engine = ResolutionEngine::new(&registry, Mode::auto());
        let decision = engine
            .decide(Path::new("PF"), &pronom("x-fmt/114"), &mut NoChooser)
            .unwrap();
        assert_eq!(decision.action, Action::Rename);
        assert_eq!(decision.chosen_extension.as_deref(), Some("wk1"));
    }

    #[test]
    fn last_pronom_match_decides() {
        let registry = registry();
        let engine = ResolutionEngine::new(&registry, Mode::auto());
        let id = IdentificationResult::new(vec![
            FormatMatch::new("pronom", "fmt/290"),
            FormatMatch::new("pronom", "x-fmt/384"),
        ]);
        let decision = engine.decide(Path::new("animation"), &id, &mut NoChooser).unwrap();
        assert_eq!(decision.format.unwrap().code, "x-fmt/384");
        assert_eq!(decision.chosen_extension.as_deref(), Some("mov"));
    }

    #[test]
    fn interactive_with_single_extension_does_not_prompt() {
        let registry = registry();
        let engine = ResolutionEngine::new(&registry, Mode::interactive());
        let mut chooser = ScriptedChooser::default();
        let decision = engine
            .decide(Path::new("animation"), &pronom("x-fmt/384"), &mut chooser)
            .unwrap();
        assert_eq!(decision.action, Action::Rename);
        assert_eq!(decision.chosen_extension.as_deref(), Some("mov"));
        assert!(chooser.asked.is_empty());
    }

    #[test]
    fn interactive_uses_selected_extension() {
        let registry = registry();
        let engine = ResolutionEngine::new(&registry, Mode::interactive());
        let mut chooser = ScriptedChooser::answering(vec![Choice::Selected("123".to_string())]);
        let decision = engine
            .decide(Path::new("PF"), &pronom("x-fmt/114"), &mut chooser)
            .unwrap();
        assert_eq!(decision.action, Action::Rename);
        assert_eq!(decision.chosen_extension.as_deref(), Some("123"));
        assert_eq!(chooser.asked, vec![vec!["wk1".to_string(), "123".to_string()]]);
    }

    #[test]
    fn interactive_rejects_unlisted_selection() {
        let registry = registry();
        let engine = ResolutionEngine::new(&registry, Mode::interactive());
        let mut chooser = ScriptedChooser::answering(vec![Choice::Selected("xls".to_string())]);
        let err = engine
            .decide(Path::new("PF"), &pronom("x-fmt/114"), &mut chooser)
            .unwrap_err();
        assert!(matches!(err, AddextError::PromptFailed { .. }));
    }

    #[test]
    fn interactive_preview_stops_at_prompt() {
        let registry = registry();
        let mode = Mode {
            preview: true,
            interactive: true,
        };
        let engine = ResolutionEngine::new(&registry, mode);
        let mut chooser = ScriptedChooser::default();
        let decision = engine
            .decide(Path::new("PF"), &pronom("x-fmt/114"), &mut chooser)
            .unwrap();
        assert_eq!(decision.action, Action::PromptRename);
        assert_eq!(decision.chosen_extension, None);
        assert_eq!(decision.candidates, vec!["wk1", "123"]);
        assert!(chooser.asked.is_empty());
    }

    #[test]
    fn interactive_cancel_leaves_file_in_place() {
        let temp = TempDir::new().unwrap();
        let path = file(&temp, "PF");
        let registry = registry();
        let engine = ResolutionEngine::new(&registry, Mode::interactive());
        let mut chooser = ScriptedChooser::answering(vec![Choice::Cancelled]);

        let report = engine.process(&path, &pronom("x-fmt/114"), &mut chooser);

        let decision = report.decision.as_ref().unwrap();
        assert_eq!(decision.action, Action::SkipByUser);
        assert_eq!(decision.reason, "Skipped by user");
        assert_eq!(report.outcome, Outcome::Skipped);
        assert!(path.exists());
        assert!(!temp.path().join("PF.wk1").exists());
    }

    #[test]
    fn auto_mode_renames_file() {
        let temp = TempDir::new().unwrap();
        let path = file(&temp, "animation");
        let registry = registry();
        let engine = ResolutionEngine::new(&registry, Mode::auto());

        let report = engine.process(&path, &pronom("x-fmt/384"), &mut NoChooser);

        let to = temp.path().join("animation.mov");
        assert_eq!(report.outcome, Outcome::Renamed { to: to.clone() });
        assert!(!path.exists());
        assert!(to.exists());
    }

    #[test]
    fn second_run_is_already_correct() {
        let temp = TempDir::new().unwrap();
        let path = file(&temp, "animation");
        let registry = registry();
        let engine = ResolutionEngine::new(&registry, Mode::auto());

        let first = engine.process(&path, &pronom("x-fmt/384"), &mut NoChooser);
        let to = match first.outcome {
            Outcome::Renamed { to } => to,
            other => panic!("expected rename, got {:?}", other),
        };

        let second = engine.process(&to, &pronom("x-fmt/384"), &mut NoChooser);
        assert_eq!(
            second.decision.unwrap().action,
            Action::SkipAlreadyCorrect
        );
        assert_eq!(second.outcome, Outcome::Skipped);
    }

    #[test]
    fn preview_never_touches_filesystem() {
        let temp = TempDir::new().unwrap();
        let path = file(&temp, "animation");
        let registry = registry();
        let engine = ResolutionEngine::new(&registry, Mode::preview());

        let report = engine.process(&path, &pronom("x-fmt/384"), &mut NoChooser);

        let decision = report.decision.as_ref().unwrap();
        assert_eq!(decision.action, Action::PreviewRename);
        assert_eq!(decision.new_name("animation").as_deref(), Some("animation.mov"));
        assert_eq!(report.outcome, Outcome::Previewed);
        assert!(path.exists());
        assert!(!temp.path().join("animation.mov").exists());
    }

    #[test]
    fn rename_does_not_overwrite_destination() {
        let temp = TempDir::new().unwrap();
        let path = file(&temp, "animation");
        fs::write(temp.path().join("animation.mov"), b"keep me").unwrap();
        let registry = registry();
        let engine = ResolutionEngine::new(&registry, Mode::auto());

        let report = engine.process(&path, &pronom("x-fmt/384"), &mut NoChooser);

        assert!(matches!(report.outcome, Outcome::Failed { .. }));
        assert!(path.exists());
        assert_eq!(
            fs::read(temp.path().join("animation.mov")).unwrap(),
            b"keep me"
        );
    }

    #[test]
    fn prompt_failure_is_reported_per_file() {
        let registry = registry();
        let engine = ResolutionEngine::new(&registry, Mode::interactive());
        let report = engine.process(Path::new("PF"), &pronom("x-fmt/114"), &mut NoChooser);
        assert!(report.decision.is_none());
        assert!(matches!(report.outcome, Outcome::Failed { .. }));
    }

    #[test]
    fn custom_namespace() {
        let registry = registry();
        let engine = ResolutionEngine::new(&registry, Mode::auto()).with_namespace("local");
        let id = IdentificationResult::new(vec![
            FormatMatch::new("pronom", "fmt/290"),
            FormatMatch::new("local", "x-fmt/384"),
        ]);
        let decision = engine.decide(Path::new("a"), &id, &mut NoChooser).unwrap();
        assert_eq!(decision.chosen_extension.as_deref(), Some("mov"));
    }
}
