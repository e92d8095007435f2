//! CLI entry point for layoutguard.
//!
//! This module is intentionally thin: it handles argument parsing, logging setup, I/O, and
//! exit codes. All business logic lives in the `layoutguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use layoutguard_app::{
    CheckInput, config_schema_json, parse_report_json, render_annotations, render_markdown,
    report_schema_json, run_check, runtime_error_report, serialize_report, to_renderable,
    verdict_exit_code,
};
use layoutguard_settings::Overrides;
use layoutguard_types::{FileStatus, LayoutguardReport};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "layoutguard",
    version,
    about = "Check YAML configuration data against per-module layouts"
)]
struct Cli {
    /// Search root: data files are discovered below it and paths are relative to it.
    #[arg(long, default_value = ".")]
    root: Utf8PathBuf,

    /// Path to layoutguard config TOML, relative to the root.
    #[arg(long, default_value = "layoutguard.toml")]
    config: Utf8PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate data files against the module layout and write artifacts.
    Check {
        /// Module whose layout is used (overrides `module` in the config).
        #[arg(long)]
        module: Option<String>,

        /// Extension of data files, without the dot (default `yaml`).
        #[arg(long)]
        extension: Option<String>,

        /// Exclude glob, matched against file names and root-relative paths. Repeatable.
        #[arg(long)]
        exclude: Vec<String>,

        /// Explicit layout path (default `<modules_dir>/<module>/test/layout`).
        #[arg(long)]
        layout: Option<String>,

        /// How mapping entries are paired: `positional` or `by-name`.
        #[arg(long)]
        pairing: Option<String>,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/layoutguard/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/layoutguard/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/layoutguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/layoutguard/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Print the JSON Schema of the config file or the report.
    Schema {
        #[arg(value_enum)]
        kind: SchemaKind,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SchemaKind {
    Config,
    Report,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Commands::Check {
            ref module,
            ref extension,
            ref exclude,
            ref layout,
            ref pairing,
            ref report_out,
            write_markdown,
            ref markdown_out,
        } => {
            let overrides = Overrides {
                module: module.clone(),
                extension: extension.clone(),
                exclude: exclude.clone(),
                layout: layout.clone(),
                pairing: pairing.clone(),
            };
            cmd_check(&cli, overrides, report_out, write_markdown, markdown_out)
        }
        Commands::Md { report, output } => cmd_md(report, output),
        Commands::Annotations { report, max } => cmd_annotations(report, max),
        Commands::Schema { kind } => cmd_schema(kind),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_check(
    cli: &Cli,
    overrides: Overrides,
    report_out: &Utf8Path,
    write_markdown: bool,
    markdown_out: &Utf8Path,
) -> anyhow::Result<()> {
    let root = cli
        .root
        .canonicalize_utf8()
        .unwrap_or_else(|_| cli.root.clone());

    let result = (|| -> anyhow::Result<i32> {
        if !root.is_dir() {
            anyhow::bail!("root does not exist: {}", root);
        }
        // Load config if present; missing file is allowed (defaults apply).
        let cfg_path = root.join(&cli.config);
        let cfg_text = std::fs::read_to_string(&cfg_path).unwrap_or_default();
        tracing::debug!(config = %cfg_path, found = !cfg_text.is_empty(), "loaded config");

        let output = run_check(CheckInput {
            root: &root,
            config_text: &cfg_text,
            overrides,
        })?;

        write_report_file(report_out, &output.report).context("write report json")?;
        if write_markdown {
            let md = render_markdown(&to_renderable(&output.report));
            write_text_file(markdown_out, &md).context("write markdown")?;
        }

        print_summary(&output.report);
        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(&err);
            let _ = write_report_file(report_out, &report);
            eprintln!("layoutguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn print_summary(report: &LayoutguardReport) {
    for f in report.files.iter().filter(|f| f.status == FileStatus::Fail) {
        match &f.key_path {
            Some(key_path) => println!(
                "FAIL {}: {} (at {})",
                f.path,
                f.message.as_deref().unwrap_or_default(),
                key_path
            ),
            None => println!("FAIL {}: {}", f.path, f.message.as_deref().unwrap_or_default()),
        }
    }
    let counts = &report.data.counts;
    println!(
        "layoutguard: {} ({} passed, {} failed, {} skipped)",
        report.verdict.as_str(),
        counts.pass,
        counts.fail,
        counts.skip
    );
}

fn write_report_file(path: &Utf8Path, report: &LayoutguardReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn read_report(report_path: &Utf8Path) -> anyhow::Result<LayoutguardReport> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    parse_report_json(&report_text)
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report = read_report(&report_path)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text_file(&out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: Utf8PathBuf, max: usize) -> anyhow::Result<()> {
    let report = read_report(&report_path)?;
    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{}", annotation);
    }
    Ok(())
}

fn cmd_schema(kind: SchemaKind) -> anyhow::Result<()> {
    let text = match kind {
        SchemaKind::Config => config_schema_json()?,
        SchemaKind::Report => report_schema_json()?,
    };
    println!("{}", text);
    Ok(())
}
