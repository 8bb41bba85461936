use std::io::Read;
use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use colored::Colorize;
use tracing::debug;
use tts_merge::{summarize, DeleteGenerator, DeleteSummary, MergeError};
use tts_schema::{SchemaValidator, StructuralValidator};
use tts_sync::{FileSink, FileSource, Locator, StateSink, SyncPipeline, SyncPlan, SyncResult};
use tts_types::{canonicalise, concat, digest, fix_export_ids, Collection};

use crate::cli::*;
use crate::config::CliConfig;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    config.compact |= cli.compact;

    let result = match cli.command {
        Command::DeleteGen(args) => cmd_deletegen(args, &config),
        Command::Canonicalise(args) => cmd_canonicalise(args, &config),
        Command::Concat(args) => cmd_concat(args, &config),
        Command::FixExport(args) => cmd_fixexport(args, &config),
        Command::Sync(args) => cmd_sync(args, config).await,
    };
    if let Some(hint) = result.as_ref().err().and_then(failure_hint) {
        eprintln!("{} {}", "hint:".yellow().bold(), hint);
    }
    result
}

/// Advice for merge failures: bad data must be fixed at the source, while a
/// broken invariant is an engine fault.
fn failure_hint(err: &anyhow::Error) -> Option<&'static str> {
    let merge = err.chain().find_map(|e| e.downcast_ref::<MergeError>())?;
    Some(if merge.is_data_error() {
        "the input data is invalid; fix it at the source, retrying will not help"
    } else {
        "the merge engine hit an internal invariant; please report this"
    })
}

// ---------------------------------------------------------------------------
// Document I/O
// ---------------------------------------------------------------------------

fn read_document(path: &Path) -> anyhow::Result<Collection> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Collection::from_json_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

fn read_input(path: Option<&Path>) -> anyhow::Result<Collection> {
    match path {
        Some(path) => read_document(path),
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("reading stdin")?;
            Collection::from_json_slice(&bytes).context("parsing stdin")
        }
    }
}

fn schema_validator(config: &CliConfig) -> StructuralValidator {
    let validator = StructuralValidator::with_default_rules(config.sync.schema.clone());
    debug!(
        rules = validator.rule_count(),
        max_identifier_len = validator.config().max_identifier_len,
        "schema validator ready"
    );
    validator
}

/// Read a document and check it against the schema before any transform.
fn read_valid_input(
    path: Option<&Path>,
    validator: &StructuralValidator,
) -> anyhow::Result<Collection> {
    let doc = read_input(path)?;
    validator.validate(&doc).with_context(|| {
        let source = path.map_or_else(|| "stdin".to_string(), |p| p.display().to_string());
        format!("{source} failed schema validation")
    })?;
    Ok(doc)
}

fn render(doc: &Collection, compact: bool) -> anyhow::Result<String> {
    let json = if compact { doc.to_json()? } else { doc.to_json_pretty()? };
    Ok(json)
}

fn write_output(text: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, format!("{text}\n"))
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!("{} wrote {}", "✓".green().bold(), path.display().to_string().bold());
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn print_summary(summary: &DeleteSummary) {
    let deleted = summary.total_deleted();
    let marker = if deleted == 0 {
        "additive".green()
    } else {
        format!("{deleted} deletion(s)").yellow()
    };
    eprintln!("{} {}", marker.bold(), summary.to_string().dimmed());
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_deletegen(args: DeleteGenArgs, config: &CliConfig) -> anyhow::Result<()> {
    let current = read_document(&args.current)?;
    let future = read_document(&args.future)?;

    let generator =
        DeleteGenerator::new(config.sync.merge.clone(), Box::new(schema_validator(config)));
    debug!(shared_items = ?generator.config().shared_items, "generating deletes");
    let merged = generator
        .generate(&current, &future)
        .context("generating deletes")?;

    write_output(&render(&merged, config.compact)?, args.output.as_deref())?;
    print_summary(&summarize(&merged));
    Ok(())
}

fn cmd_canonicalise(args: CanonicaliseArgs, config: &CliConfig) -> anyhow::Result<()> {
    let validator = schema_validator(config);
    let doc = canonicalise(&read_valid_input(args.input.as_deref(), &validator)?);
    if args.digest {
        write_output(&digest(&doc)?.to_hex(), args.output.as_deref())
    } else {
        write_output(&render(&doc, config.compact)?, args.output.as_deref())
    }
}

fn cmd_concat(args: ConcatArgs, config: &CliConfig) -> anyhow::Result<()> {
    let validator = schema_validator(config);
    let docs = args
        .inputs
        .iter()
        .map(|p| read_valid_input(Some(p), &validator))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let combined = concat(docs);
    write_output(&render(&combined, config.compact)?, args.output.as_deref())
}

fn cmd_fixexport(args: FixExportArgs, config: &CliConfig) -> anyhow::Result<()> {
    let validator = schema_validator(config);
    let doc = fix_export_ids(&read_valid_input(args.input.as_deref(), &validator)?);
    write_output(&render(&doc, config.compact)?, args.output.as_deref())
}

/// Prints the submitted document to stdout.
struct StdoutSink {
    compact: bool,
}

#[async_trait]
impl StateSink for StdoutSink {
    async fn submit(&self, document: &Collection, _locators: &[Locator]) -> SyncResult<()> {
        let json = if self.compact {
            document.to_json()?
        } else {
            document.to_json_pretty()?
        };
        println!("{json}");
        Ok(())
    }
}

/// The document a run produced but did not hand to a sink.
fn unsubmitted_document(plan: &SyncPlan, compact: bool) -> anyhow::Result<Option<String>> {
    if plan.submitted {
        return Ok(None);
    }
    render(&plan.merged, compact).map(Some)
}

async fn cmd_sync(args: SyncArgs, config: CliConfig) -> anyhow::Result<()> {
    let source = if args.source.is_file() {
        FileSource::single(&args.source)
    } else {
        FileSource::dir(&args.source)
    };
    let future = read_document(&args.future)?;

    let mut sync_config = config.sync;
    sync_config.dry_run |= args.dry_run;
    if args.keep_export_ids {
        sync_config.fix_export_ids = false;
    }
    let mut pipeline = SyncPipeline::new(sync_config);
    if let Some(expected) = args.expect_current {
        pipeline = pipeline.expect_current(expected);
    }

    let sink: Box<dyn StateSink> = match &args.output {
        Some(path) => {
            let sink = FileSink::new(path.clone());
            Box::new(if config.compact { sink.compact() } else { sink })
        }
        None => Box::new(StdoutSink { compact: config.compact }),
    };

    let plan = pipeline
        .run(&source, sink.as_ref(), &future, &args.locators)
        .await
        .context("sync failed")?;

    if let Some(document) = unsubmitted_document(&plan, config.compact)? {
        println!("{document}");
    }
    if plan.is_noop() {
        eprintln!("{} target already matches desired state", "✓".green().bold());
    }
    print_summary(&plan.summary);
    eprintln!(
        "  current {} (pass to --expect-current to pin)  future {}",
        plan.current_digest.to_hex().cyan(),
        plan.future_digest.short_hex().cyan()
    );
    if pipeline.config().dry_run {
        eprintln!("{} dry run, document printed above, nothing submitted", "!".yellow().bold());
    }
    Ok(())
}
