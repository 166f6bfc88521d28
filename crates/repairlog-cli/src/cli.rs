use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "repairlog")]
#[command(about = "Equipment inventories and call history from repair shop notes")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to the CLI config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract equipment from one note body
    Extract {
        /// Note body file (stdin when omitted)
        input: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build the equipment inventory of a set of notes
    Inventory {
        /// JSON array of notes ({id, date, subject, body})
        notes: PathBuf,
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Markdown)]
        format: ExportFormat,
        /// Output file or directory (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        /// Client id used to name files written into a directory
        #[arg(long, value_name = "ID")]
        client: Option<String>,
    },
    /// Reconcile a phone call log with timeline calls
    Calls {
        /// Android call log export (falls back to `call_log` from config)
        call_log: Option<PathBuf>,
        /// JSON array of existing timeline items
        #[arg(long, value_name = "PATH")]
        timeline: Option<PathBuf>,
        /// Only keep calls from this client (needs `clients` in config)
        #[arg(long, value_name = "ID")]
        client: Option<String>,
        /// Only keep calls from these numbers
        #[arg(long = "phone", value_name = "NUMBER")]
        phones: Vec<String>,
        /// Output the merged timeline as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the cleaned body of a note
    Preview {
        /// Note body file (stdin when omitted)
        input: Option<PathBuf>,
        /// Maximum number of lines (config value when omitted)
        #[arg(short, long)]
        lines: Option<usize>,
        /// Prefix each line with its indentation level
        #[arg(long)]
        levels: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl From<ExportFormat> for repairlog_core::export::ExportFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Json => Self::Json,
            ExportFormat::Markdown => Self::Markdown,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
