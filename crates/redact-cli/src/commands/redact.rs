use anyhow::{Context, Result};
use redact_config::Config;
use redact_docx::DocxFile;
use redact_engine::{PatternSet, RedactionColor, RedactionReport, Redactor};

use crate::cli::Cli;

pub fn handle(cli: Cli, config: &Config) -> Result<()> {
    let print_report = cli.report;
    let output = cli.output.clone();
    let report = redact(cli, config)?;

    if print_report {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.is_empty() {
        println!("No matches found.");
    } else {
        println!(
            "✓ Redacted {} match(es) in {} paragraph(s)",
            report.matches, report.paragraphs_touched
        );
    }
    println!("  Saved: {}", output.display());

    Ok(())
}

/// Load, redact and save. Flags win over config defaults.
fn redact(cli: Cli, config: &Config) -> Result<RedactionReport> {
    let fragments = config.expand_patterns(&PatternSet::parse_list(&cli.patterns))?;
    let patterns = PatternSet::new(fragments).context("Failed to compile patterns")?;

    let replacement = cli.replace.or_else(|| config.defaults.replacement.clone());
    let color =
        RedactionColor::from_name(cli.color.as_deref().or(config.defaults.color.as_deref()));
    tracing::debug!(pattern = patterns.as_str(), ?color, "compiled patterns");

    let mut file = DocxFile::open(&cli.input)
        .with_context(|| format!("Failed to open document: {}", cli.input.display()))?;

    let report = Redactor::new(patterns)
        .with_replacement(replacement)
        .with_color(color)
        .redact(file.document_mut())?;

    file.save(&cli.output)
        .with_context(|| format!("Failed to save document: {}", cli.output.display()))?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use std::path::Path;

    fn write_docx(path: &Path, text: &str) {
        let body = format!(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p></w:body></w:document>"#
        );
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(body.as_bytes()).unwrap();
        std::fs::write(path, zip.finish().unwrap().into_inner()).unwrap();
    }

    fn cli(dir: &Path, patterns: &str) -> Cli {
        Cli {
            input: dir.join("in.docx"),
            output: dir.join("out.docx"),
            patterns: patterns.to_string(),
            replace: None,
            color: None,
            config: None,
            report: false,
        }
    }

    fn saved_text(dir: &Path) -> String {
        DocxFile::open(dir.join("out.docx"))
            .unwrap()
            .document()
            .text()
    }

    #[test]
    fn test_redact_with_preset_and_default_replacement() {
        let dir = tempfile::tempdir().unwrap();
        write_docx(&dir.path().join("in.docx"), "SSN 123-45-6789, name Alice");
        let mut config = Config::default();
        config.defaults.replacement = Some("[REDACTED]".to_string());

        let report = redact(cli(dir.path(), "@ssn, Alice"), &config).unwrap();

        assert_eq!(report.matches, 2);
        assert_eq!(saved_text(dir.path()), "SSN [REDACTED], name [REDACTED]");
    }

    #[test]
    fn test_flag_overrides_config_replacement() {
        let dir = tempfile::tempdir().unwrap();
        write_docx(&dir.path().join("in.docx"), "token abc");
        let mut config = Config::default();
        config.defaults.replacement = Some("[REDACTED]".to_string());
        let mut args = cli(dir.path(), "abc");
        args.replace = Some("***".to_string());

        redact(args, &config).unwrap();

        assert_eq!(saved_text(dir.path()), "token ***");
    }

    #[test]
    fn test_invalid_pattern_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        write_docx(&dir.path().join("in.docx"), "text");

        let err = redact(cli(dir.path(), "(open"), &Config::default()).unwrap_err();

        assert!(err.to_string().contains("Failed to compile patterns"));
        assert!(!dir.path().join("out.docx").exists());
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();

        let err = redact(cli(dir.path(), "x"), &Config::default()).unwrap_err();

        assert!(err.to_string().contains("Failed to open document"));
    }
}
