//! CLI entry point for depwhy.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup and exit
//! codes. All business logic lives in the `depwhy-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use depwhy_app::{
    AnalysisInput, ExplainOutput, exit_code, format_doc, format_not_found, format_rules,
    parse_report_json, render_annotations, render_markdown, run_analysis, run_explain,
    runtime_error_report, serialize_report, write_text,
};
use depwhy_settings::Overrides;
use depwhy_types::InputMode;
use std::io::Read;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const TOKEN_ENV: &str = "DEPWHY_API_TOKEN";

#[derive(Parser, Debug)]
#[command(
    name = "depwhy",
    version,
    about = "Find conflicts in Python requirement files and explain them in plain language"
)]
struct Cli {
    /// Path to depwhy config TOML (missing file means defaults).
    #[arg(long, global = true, default_value = "depwhy.toml")]
    config: Utf8PathBuf,

    /// Log debug output to stderr (RUST_LOG takes precedence).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze requirements and write a JSON report.
    Analyze {
        /// Requirements file, or `-` for stdin.
        #[arg(long, default_value = "-")]
        input: String,

        /// Treat input as a plain list of package names.
        #[arg(long)]
        list: bool,

        /// Never call the text-generation service; use templates only.
        #[arg(long)]
        offline: bool,

        /// Override the text-generation endpoint.
        #[arg(long)]
        endpoint: Option<String>,

        /// Override the per-request timeout in seconds.
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/depwhy/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/depwhy/report.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/depwhy/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/depwhy/report.json")]
        report: Utf8PathBuf,

        /// Requirements file the annotations point at.
        #[arg(long)]
        file: Option<String>,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id or issue kind with remediation guidance.
    Explain {
        /// The check_id (e.g., "compat.fastapi_pydantic") or kind (e.g., "duplicate").
        identifier: String,
    },

    /// List the compatibility rule table.
    Rules,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Commands::Analyze {
            input,
            list,
            offline,
            endpoint,
            timeout_secs,
            report_out,
            write_markdown,
            markdown_out,
        } => {
            let overrides = Overrides {
                offline,
                endpoint,
                timeout_secs,
                api_token: std::env::var(TOKEN_ENV).ok(),
            };
            let mode = if list {
                InputMode::SimpleList
            } else {
                InputMode::Requirements
            };
            let outputs = Outputs {
                report_out,
                markdown_out: write_markdown.then_some(markdown_out),
            };
            cmd_analyze(&cli.config, &input, mode, overrides, &outputs)
        }
        Commands::Md { report, output } => cmd_md(&report, output.as_deref()),
        Commands::Annotations { report, file, max } => {
            cmd_annotations(&report, file.as_deref(), max)
        }
        Commands::Explain { identifier } => cmd_explain(&identifier),
        Commands::Rules => {
            print!("{}", format_rules());
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

struct Outputs {
    report_out: Utf8PathBuf,
    markdown_out: Option<Utf8PathBuf>,
}

fn cmd_analyze(
    config: &Utf8Path,
    input: &str,
    mode: InputMode,
    overrides: Overrides,
    outputs: &Outputs,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let text = read_input(input)?;

        // Missing config file is allowed (defaults apply).
        let cfg_text = std::fs::read_to_string(config).unwrap_or_default();
        debug!(config = %config, found = !cfg_text.is_empty(), "loaded config");

        let output = run_analysis(AnalysisInput {
            text: &text,
            mode,
            config_text: &cfg_text,
            overrides,
        })?;

        let data = serialize_report(&output.report)?;
        write_text(&outputs.report_out, &data).context("write report json")?;

        if let Some(md_path) = &outputs.markdown_out {
            let md = render_markdown(&output.report);
            write_text(md_path, md.as_bytes()).context("write markdown")?;
        }

        Ok(exit_code(&output.report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"));
            if let Ok(data) = serialize_report(&report) {
                let _ = write_text(&outputs.report_out, &data);
            }
            eprintln!("depwhy error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("read requirements from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("read requirements: {input}"))
    }
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let md = render_markdown(&report);

    if let Some(out_path) = output {
        write_text(out_path, md.as_bytes()).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, file: Option<&str>, max: usize) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;

    for annotation in render_annotations(&report, file, max) {
        println!("{}", annotation);
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(doc) => {
            print!("{}", format_doc(&doc));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_kinds,
        } => {
            eprint!(
                "{}",
                format_not_found(&identifier, available_check_ids, available_kinds)
            );
            std::process::exit(1);
        }
    }
}
