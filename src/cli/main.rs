use std::path::PathBuf;

use clap::Parser;

use crate::Commands;

/// Main CLI application arguments and command structure
#[derive(Parser, Debug)]
#[clap(
    name = "brutal-notes",
    version,
    about = "No nonsense. No distractions. No bloat. Just raw productivity."
)]
pub struct Cli {
    /// Path to the configuration file
    #[clap(short = 'c', long, value_parser)]
    pub config: Option<PathBuf>,

    /// Directory holding the stored documents
    #[clap(long, value_parser)]
    pub data_dir: Option<PathBuf>,

    /// Verbose output mode
    #[clap(short, long)]
    pub verbose: bool,

    /// Subcommands for the brutal notes application
    #[clap(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::ExportFormat;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_export_with_format() {
        let cli = Cli::parse_from(["brutal-notes", "export", "doc-1-1", "--format", "text"]);
        match cli.command {
            Commands::Export { id, format, output } => {
                assert_eq!(id, "doc-1-1");
                assert_eq!(format, ExportFormat::Text);
                assert!(output.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn save_content_and_edit_conflict() {
        let result = Cli::try_parse_from([
            "brutal-notes",
            "save",
            "doc-1-1",
            "--content",
            "<p>x</p>",
            "--edit",
        ]);
        assert!(result.is_err());
    }
}
