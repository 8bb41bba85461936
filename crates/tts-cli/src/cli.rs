use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tts_sync::Locator;
use tts_types::ContentDigest;

#[derive(Parser)]
#[command(
    name = "ttsync",
    about = "Timetable sync: turn a desired timetable state into an import document with deletes",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write compact rather than pretty JSON
    #[arg(long, global = true)]
    pub compact: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate the import document that turns CURRENT into FUTURE
    #[command(name = "deletegen")]
    DeleteGen(DeleteGenArgs),
    /// Sort a document into canonical order
    Canonicalise(CanonicaliseArgs),
    /// Concatenate the groups of several documents
    Concat(ConcatArgs),
    /// Strip the "import-" prefix from exported item ids
    #[command(name = "fixexport")]
    FixExport(FixExportArgs),
    /// Fetch current state from files, generate deletes, and write the import document
    Sync(SyncArgs),
}

#[derive(Args)]
pub struct DeleteGenArgs {
    pub current: PathBuf,
    pub future: PathBuf,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct CanonicaliseArgs {
    /// Input document (stdin when omitted)
    pub input: Option<PathBuf>,
    /// Print the content digest instead of the document
    #[arg(long)]
    pub digest: bool,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ConcatArgs {
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct FixExportArgs {
    /// Input document (stdin when omitted)
    pub input: Option<PathBuf>,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct SyncArgs {
    /// Directory of `<locator>.json` exports, or a single export file
    pub source: PathBuf,
    /// Desired state
    pub future: PathBuf,
    /// Target locators, e.g. tripos/part1
    #[arg(required = true)]
    pub locators: Vec<Locator>,
    /// Plan only and print the document to stdout; write nothing
    #[arg(long)]
    pub dry_run: bool,
    /// Abort unless the fetched current state has this digest
    #[arg(long, value_name = "DIGEST")]
    pub expect_current: Option<ContentDigest>,
    /// Keep the "import-" prefix on exported item ids
    #[arg(long)]
    pub keep_export_ids: bool,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
