use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for the `hyx` binary.
#[derive(Debug, Parser)]
#[command(name = "hyx", version, about = "Hyrax - legacy object to resource persistence toolbox")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra config file layered under HYRAX_* environment variables
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Raw,
}

#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Transform a legacy object fixture into a resource.
    Transform(TransformArgs),
    /// Ingest a file into a file set fixture and drain the characterization queue.
    Ingest(IngestArgs),
    /// Run a named work transaction against an in-memory store.
    Transaction(TransactionArgs),
}

#[derive(Clone, Debug, Args)]
pub struct TransformArgs {
    /// Path to a legacy object fixture (JSON)
    pub fixture: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct IngestArgs {
    /// Path to a file set fixture (JSON)
    pub fixture: PathBuf,

    /// File to ingest
    pub file: PathBuf,

    /// Use relation (symbol or vocabulary URI)
    #[arg(long, default_value = "original_file")]
    pub relation: String,

    /// Acting user
    #[arg(long, default_value = "hyx@localhost")]
    pub user: String,

    /// MIME type recorded on the file
    #[arg(long, default_value = "application/octet-stream")]
    pub mime_type: String,
}

#[derive(Clone, Debug, Args)]
pub struct TransactionArgs {
    /// create_work, update_work or destroy_work
    pub name: String,

    /// Path to a work fixture (JSON)
    pub fixture: PathBuf,

    /// Per-step arguments as a JSON object keyed by step key
    #[arg(long)]
    pub args: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["hyx", "transform", "work.json", "--format", "raw", "-q"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Transform(_)));
    }

    #[test]
    fn ingest_defaults_to_original_file() {
        let cli = Cli::try_parse_from(["hyx", "ingest", "fs.json", "thesis.pdf"])
            .expect("cli should parse");
        let Commands::Ingest(args) = cli.command else {
            panic!("expected ingest");
        };
        assert_eq!(args.relation, "original_file");
    }

    #[test]
    fn transaction_requires_a_fixture() {
        assert!(Cli::try_parse_from(["hyx", "transaction", "create_work"]).is_err());
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["hyx", "--format", "xml", "transform", "w.json"]).is_err());
    }
}
