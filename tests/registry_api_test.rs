//! Integration tests for the registry public API.

use addext::registry::{
    load_registry, save_registry, FormatRecord, Registry, RegistryBuilder, RegistrySource,
};
use addext::identify::{FormatMatch, IdentificationResult};
use addext::resolve::{Action, Mode, NoChooser, ResolutionEngine};
use addext::AddextError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn format_xml(puid: Option<&str>, name: &str, extensions: &[&str]) -> String {
    let identifier = puid
        .map(|p| {
            format!(
                "<FileFormatIdentifier><Identifier>{}</Identifier><IdentifierType>PUID</IdentifierType></FileFormatIdentifier>",
                p
            )
        })
        .unwrap_or_default();
    let signatures: String = extensions
        .iter()
        .map(|e| {
            format!(
                "<ExternalSignature><Signature>{}</Signature><SignatureType>File extension</SignatureType></ExternalSignature>",
                e
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0"?>
<PRONOM-Report xmlns="http://pronom.nationalarchives.gov.uk">
  <report_format_detail>
    <FileFormat>
      <FormatName>{name}</FormatName>
      <FormatVersion>1.0</FormatVersion>
      {identifier}
      {signatures}
    </FileFormat>
  </report_format_detail>
</PRONOM-Report>"#
    )
}

#[test]
fn built_registry_has_distinct_codes_and_ordered_extensions() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("a.xml"),
        format_xml(Some("x-fmt/114"), "Lotus 1-2-3 Worksheet", &["WK1", "123"]),
    )
    .unwrap();
    fs::write(
        temp.path().join("b.xml"),
        format_xml(None, "No Code Format", &["nc"]),
    )
    .unwrap();
    fs::write(
        temp.path().join("c.xml"),
        format_xml(Some("fmt/999"), "Mystery", &[]),
    )
    .unwrap();
    fs::write(temp.path().join("notes.txt"), "not a format").unwrap();

    let report = RegistryBuilder::new(temp.path()).build().unwrap();

    assert_eq!(report.documents_read, 3);
    assert_eq!(report.records_without_code, 1);
    assert_eq!(report.registry.len(), 2);
    assert!(!report.registry.contains(""));
    assert_eq!(
        report.registry.get("x-fmt/114").unwrap().extensions,
        vec!["wk1", "123"]
    );
    assert!(report.registry.get("fmt/999").unwrap().extensions.is_empty());
}

#[test]
fn malformed_document_does_not_stop_the_build() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("bad.xml"), "<PRONOM-Report><FileFormat>").unwrap();
    fs::write(
        temp.path().join("good.xml"),
        format_xml(Some("x-fmt/384"), "Quicktime", &["mov"]),
    )
    .unwrap();

    let report = RegistryBuilder::new(temp.path()).build().unwrap();

    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].path.ends_with("bad.xml"));
    assert!(report.registry.contains("x-fmt/384"));
}

#[test]
fn corpus_and_file_sources_yield_the_same_registry() {
    let temp = TempDir::new().unwrap();
    let corpus = temp.path().join("xml");
    fs::create_dir(&corpus).unwrap();
    fs::write(
        corpus.join("quicktime.xml"),
        format_xml(Some("x-fmt/384"), "Quicktime", &["mov", "qt"]),
    )
    .unwrap();

    let from_corpus = RegistrySource::from_path(&corpus).load().unwrap();
    assert!(from_corpus.build.is_some());

    let json = temp.path().join("pronom.json");
    save_registry(&from_corpus.registry, &json).unwrap();
    let from_file = RegistrySource::from_path(&json).load().unwrap();
    assert!(from_file.build.is_none());

    assert_eq!(from_corpus.registry, from_file.registry);
}

#[test]
fn registry_json_uses_exporter_field_names() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("pronom.json");
    let registry: Registry = [(
        "x-fmt/384".to_string(),
        FormatRecord::new("Quicktime", "", ["mov"]),
    )]
    .into_iter()
    .collect();

    save_registry(&registry, &path).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(json["x-fmt/384"]["file_format"], "Quicktime");
    assert_eq!(json["x-fmt/384"]["file_extensions"][0], "mov");
}

#[test]
fn missing_and_corrupt_registry_files_are_errors() {
    let temp = TempDir::new().unwrap();

    let missing = load_registry(&temp.path().join("nope.json")).unwrap_err();
    assert!(matches!(missing, AddextError::RegistryNotFound { .. }));
    assert_eq!(missing.exit_code(), 2);

    let corrupt = temp.path().join("corrupt.json");
    fs::write(&corrupt, "{ not json").unwrap();
    let err = load_registry(&corrupt).unwrap_err();
    assert!(matches!(err, AddextError::RegistryParseError { .. }));
}

#[test]
fn uppercase_extensions_in_registry_file_match_lowercase_files() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("pronom.json");
    fs::write(
        &path,
        r#"{"x-fmt/384": {"file_format": "Quicktime", "file_extensions": ["MOV"]}}"#,
    )
    .unwrap();

    let registry = load_registry(&path).unwrap();
    assert_eq!(registry.get("x-fmt/384").unwrap().extensions, vec!["mov"]);

    let result = IdentificationResult::new(vec![FormatMatch::new("pronom", "x-fmt/384")]);
    let engine = ResolutionEngine::new(&registry, Mode::auto());

    let correct = engine
        .decide(Path::new("clip.mov"), &result, &mut NoChooser)
        .unwrap();
    assert_eq!(correct.action, Action::SkipAlreadyCorrect);

    let missing = engine
        .decide(Path::new("clip"), &result, &mut NoChooser)
        .unwrap();
    assert_eq!(missing.action, Action::Rename);
    assert_eq!(missing.chosen_extension.as_deref(), Some("mov"));
}
