use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, Context};
use colored::Colorize;
use serde::Serialize;
use trimerge_diff::{diff_with, split_lines, DiffStats, Tag};
use trimerge_merge::{ConflictMarkers, MergeConfig, MergeResult, ThreeWayMerger};

use crate::cli::*;

/// Exit status for I/O and configuration failures, distinct from a conflict.
pub const FAILURE_EXIT_CODE: u8 = 2;

/// How a successfully executed command finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Clean,
    Conflict,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Clean => 0,
            Outcome::Conflict => 1,
        }
    }
}

pub fn run_command(cli: Cli) -> anyhow::Result<Outcome> {
    let Cli { command, format, .. } = cli;
    match command {
        Command::Merge(args) => cmd_merge(args, &format),
        Command::Diff(args) => cmd_diff(args, &format),
    }
}

#[derive(Serialize)]
struct MergeSummary<'a> {
    output: Option<&'a Path>,
    has_conflict: bool,
    conflicts: usize,
    lines: usize,
}

fn cmd_merge(args: MergeArgs, format: &OutputFormat) -> anyhow::Result<Outcome> {
    let config = merge_config(&args)?;
    let merger = ThreeWayMerger::from_config(&config)?;

    let (encoding, inputs) = read_inputs(&[args.my.as_path(), args.base.as_path(), args.other.as_path()])?;
    let [mine, base, other] = inputs;
    tracing::debug!(
        my = %args.my.display(),
        base = %args.base.display(),
        other = %args.other.display(),
        algorithm = ?config.algorithm,
        ?encoding,
        "merging"
    );

    let result = merger.merge(&base, &mine, &other);
    let merged = encoding.encode(&result.text())?;

    // The merged file is written even when conflicted; markers show where.
    match &args.output {
        Some(path) => fs::write(path, merged)
            .with_context(|| format!("can't write merged file '{}'", path.display()))?,
        None => std::io::stdout()
            .write_all(&merged)
            .context("can't write merged output")?,
    }

    report_merge(&result, args.output.as_deref(), format)?;
    Ok(if result.has_conflict { Outcome::Conflict } else { Outcome::Clean })
}

/// Configuration file first, then command-line overrides.
fn merge_config(args: &MergeArgs) -> anyhow::Result<MergeConfig> {
    let mut config = match &args.config {
        Some(path) => MergeConfig::load(path)?,
        None => MergeConfig::default(),
    };
    if let Some(algorithm) = args.algorithm {
        config.algorithm = algorithm.into();
    }
    if let Some(pattern) = &args.keyword_pattern {
        config.keyword_pattern = Some(pattern.clone());
    }
    if args.svn_keywords {
        config.keyword_pattern = None;
        config.svn_keywords = true;
    }
    if args.label_mine.is_some() || args.label_other.is_some() {
        let labeled = ConflictMarkers::labeled(
            args.label_mine.as_deref().unwrap_or("A"),
            args.label_other.as_deref().unwrap_or("B"),
        );
        if args.label_mine.is_some() {
            config.markers.start = labeled.start;
        }
        if args.label_other.is_some() {
            config.markers.end = labeled.end;
        }
    }
    Ok(config)
}

fn report_merge(result: &MergeResult, output: Option<&Path>, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let summary = MergeSummary {
                output,
                has_conflict: result.has_conflict,
                conflicts: result.conflicts,
                lines: result.lines.len(),
            };
            eprintln!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => {
            let target = output.map_or_else(|| "stdout".to_string(), |p| p.display().to_string());
            if result.has_conflict {
                eprintln!(
                    "{} {} conflict region(s) written to {}",
                    "✗".red().bold(),
                    result.conflicts.to_string().bold(),
                    target.yellow()
                );
            } else {
                eprintln!("{} Merged cleanly into {}", "✓".green().bold(), target.yellow());
            }
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct DiffReport<'a> {
    lines: &'a [trimerge_diff::TaggedLine],
    stats: DiffStats,
}

fn cmd_diff(args: DiffArgs, format: &OutputFormat) -> anyhow::Result<Outcome> {
    let (_, [base, variant]) = read_inputs(&[args.base.as_path(), args.variant.as_path()])?;
    let tagged = diff_with(args.algorithm.into(), &base, &variant);
    let stats = DiffStats::of(&tagged);

    match format {
        OutputFormat::Json => {
            let report = DiffReport { lines: &tagged, stats };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            for line in &tagged {
                let text = line.text.strip_suffix('\n').unwrap_or(&line.text);
                match line.tag {
                    Tag::Unchanged => println!("  {text}"),
                    Tag::Inserted => println!("{}", format!("+ {text}").green()),
                    Tag::Deleted => println!("{}", format!("- {text}").red()),
                }
            }
            eprintln!(
                "{}",
                format!(
                    "{} unchanged, {} inserted, {} deleted",
                    stats.unchanged, stats.inserted, stats.deleted
                )
                .dimmed()
            );
        }
    }
    Ok(Outcome::Clean)
}

/// How input bytes were turned into lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Encoding {
    Utf8,
    /// One char per byte, so any input round-trips unchanged.
    Latin1,
}

impl Encoding {
    fn encode(self, text: &str) -> anyhow::Result<Vec<u8>> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Latin1 => text
                .chars()
                .map(|c| u8::try_from(c).map_err(|_| anyhow!("can't write {c:?} into a non-UTF-8 merge")))
                .collect(),
        }
    }
}

/// Read and split the inputs of one command.
///
/// Lines are compared byte for byte. If any input is not valid UTF-8, all of
/// them are decoded as Latin-1 and the output is encoded back the same way.
fn read_inputs<const N: usize>(paths: &[&Path; N]) -> anyhow::Result<(Encoding, [Vec<String>; N])> {
    let mut raw = Vec::with_capacity(N);
    for path in paths {
        raw.push(fs::read(path).with_context(|| format!("can't open file '{}'", path.display()))?);
    }

    let encoding = if raw.iter().all(|bytes| std::str::from_utf8(bytes).is_ok()) {
        Encoding::Utf8
    } else {
        Encoding::Latin1
    };
    let mut files = raw.into_iter().map(|bytes| {
        let text = match String::from_utf8(bytes) {
            Ok(text) if encoding == Encoding::Utf8 => text,
            Ok(text) => latin1(text.into_bytes()),
            Err(err) => latin1(err.into_bytes()),
        };
        split_lines(&text)
    });
    Ok((encoding, std::array::from_fn(|_| files.next().unwrap_or_default())))
}

fn latin1(bytes: Vec<u8>) -> String {
    bytes.into_iter().map(char::from).collect()
}
