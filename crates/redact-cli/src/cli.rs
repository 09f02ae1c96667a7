use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docredact")]
#[command(about = "Redact text patterns in Word documents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the document to be redacted
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to save the redacted document
    #[arg(short, long)]
    pub output: PathBuf,

    /// Patterns to redact, comma separated (`@name` uses a preset)
    #[arg(short, long)]
    pub patterns: String,

    /// Text to replace every match with (default: keep the matched text)
    #[arg(short, long)]
    pub replace: Option<String>,

    /// Redaction color: white or yellow (default: black)
    #[arg(short, long)]
    pub color: Option<String>,

    /// Config file (default: platform config directory)
    #[arg(long, env = "DOCREDACT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print a JSON report instead of a summary
    #[arg(long)]
    pub report: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "docredact", "-i", "in.docx", "-o", "out.docx", "-p", "foo, bar", "-r", "", "-c",
            "yellow",
        ])
        .unwrap();

        assert_eq!(cli.input, PathBuf::from("in.docx"));
        assert_eq!(cli.output, PathBuf::from("out.docx"));
        assert_eq!(cli.patterns, "foo, bar");
        assert_eq!(cli.replace.as_deref(), Some(""));
        assert_eq!(cli.color.as_deref(), Some("yellow"));
        assert!(!cli.report);
    }

    #[test]
    fn test_required_flags() {
        assert!(Cli::try_parse_from(["docredact", "-i", "in.docx", "-o", "out.docx"]).is_err());
        assert!(Cli::try_parse_from(["docredact", "-p", "x"]).is_err());
    }
}
