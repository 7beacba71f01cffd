//! CLI binary for pdfbrief.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `SummaryConfig`, renders results, and manages the persisted history and
//! theme state.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use pdfbrief::{
    classify, copy_to_clipboard, export_record, summarize, HistoryStore, RenderLine,
    SummaryConfig, SummaryLength, SummaryRecord, Theme, ThemeStore, Tone,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}
fn blue(s: &str) -> String {
    format!("\x1b[34m{s}\x1b[0m")
}

/// Theme-dependent accent colour for headings and markers.
fn accent(theme: Theme, s: &str) -> String {
    match theme {
        Theme::Dark => cyan(s),
        Theme::Light => blue(s),
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Summarize a paper (renders to the terminal, records to history)
  pdfbrief summarize paper.pdf

  # Academic tone, short summary, German output
  pdfbrief summarize --tone academic --length short --language German paper.pdf

  # Export the .md file next to the terminal output and copy it to the clipboard
  pdfbrief summarize paper.pdf -o . --copy

  # Structured JSON output (no rendering, no spinner)
  pdfbrief summarize --json paper.pdf > record.json

  # Work with past summaries
  pdfbrief history
  pdfbrief show 1754556000123
  pdfbrief export 1754556000123 -o ~/notes
  pdfbrief delete 1754556000123

  # Persisted dark/light theme for terminal rendering
  pdfbrief theme          # show current
  pdfbrief theme toggle

ENVIRONMENT VARIABLES:
  GEMINI_API_KEY       API credential (required unless set in code)
  PDFBRIEF_LANGUAGE    Default output language
  PDFBRIEF_MODEL       Override the generation model
  COLORFGBG            Consulted for the theme before anything is stored
"#;

/// Summarize PDF documents with a hosted LLM.
#[derive(Parser, Debug)]
#[command(
    name = "pdfbrief",
    version,
    about = "Summarize PDF documents with a hosted LLM",
    long_about = "Extract the text of a PDF locally, summarize it via a hosted \
language-model API with your tone/length/language preferences, and keep a small \
history of past summaries.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "PDFBRIEF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and results.
    #[arg(short, long, global = true, env = "PDFBRIEF_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize a PDF file and record the result in history.
    Summarize {
        /// Path to the PDF file.
        file: PathBuf,

        /// Writing tone for the summary.
        #[arg(long, value_enum, default_value = "neutral")]
        tone: ToneArg,

        /// Summary length tier.
        #[arg(long, value_enum, default_value = "medium")]
        length: LengthArg,

        /// Output language (free-form, e.g. "German", "Brazilian Portuguese").
        #[arg(long, env = "PDFBRIEF_LANGUAGE", default_value = "English")]
        language: String,

        /// Generation model ID.
        #[arg(long, env = "PDFBRIEF_MODEL")]
        model: Option<String>,

        /// Also write the Markdown export into this directory.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Copy the summary content to the system clipboard.
        #[arg(long)]
        copy: bool,

        /// Print the full record as JSON instead of rendering it.
        #[arg(long)]
        json: bool,

        /// Do not record the result in history.
        #[arg(long)]
        no_history: bool,
    },

    /// List past summaries, most recent first.
    History,

    /// Render a stored summary.
    Show {
        /// Record id (see `pdfbrief history`).
        id: i64,
    },

    /// Delete a stored summary by id.
    Delete {
        /// Record id to remove. Unknown ids are a no-op.
        id: i64,
    },

    /// Write a stored summary to `<title>_Summary.md`.
    Export {
        /// Record id to export.
        id: i64,

        /// Target directory. Default: current directory.
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Copy a stored summary's content to the clipboard.
    Copy {
        /// Record id to copy.
        id: i64,
    },

    /// Show or change the persisted dark/light theme.
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ToneArg {
    Neutral,
    Professional,
    Academic,
    Casual,
}

impl From<ToneArg> for Tone {
    fn from(v: ToneArg) -> Self {
        match v {
            ToneArg::Neutral => Tone::Neutral,
            ToneArg::Professional => Tone::Professional,
            ToneArg::Academic => Tone::Academic,
            ToneArg::Casual => Tone::Casual,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LengthArg {
    Short,
    Medium,
    Long,
}

impl From<LengthArg> for SummaryLength {
    fn from(v: LengthArg) -> Self {
        match v {
            LengthArg::Short => SummaryLength::Short,
            LengthArg::Medium => SummaryLength::Medium,
            LengthArg::Long => SummaryLength::Long,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ThemeAction {
    Dark,
    Light,
    Toggle,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner provides the feedback that matters during a summarize run;
    // suppress INFO-level library logs unless asked for more.
    let json_mode = matches!(cli.command, Command::Summarize { json: true, .. });
    let show_spinner =
        !cli.quiet && !json_mode && matches!(cli.command, Command::Summarize { .. });
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_spinner {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let theme = ThemeStore::open_default().load();

    match cli.command {
        Command::Summarize {
            file,
            tone,
            length,
            language,
            model,
            output,
            copy,
            json,
            no_history,
        } => {
            let mut builder = SummaryConfig::builder()
                .tone(tone.into())
                .length(length.into())
                .language(language);
            if let Some(model) = model {
                builder = builder.model(model);
            }
            let config = builder.build().context("Invalid configuration")?;

            let spinner = if show_spinner {
                Some(make_spinner(&format!(
                    "Summarizing {}…",
                    file.display()
                )))
            } else {
                None
            };

            let result = summarize(&file, &config).await;

            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }
            let record = result.context("Summarization failed")?;

            if !no_history {
                HistoryStore::open_default()
                    .record(record.clone())
                    .await
                    .context("Failed to record summary in history")?;
            }

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&record)
                        .context("Failed to serialise record")?
                );
            } else {
                render_record(&record, theme)?;
                eprintln!(
                    "{} {}  {}",
                    green("✔"),
                    bold(&record.title),
                    dim(&format!(
                        "{} → {} words  ·  id {}",
                        record.original_size, record.summary_size, record.id
                    )),
                );
            }

            if let Some(dir) = output {
                let path = export_record(&record, &dir)
                    .await
                    .context("Failed to export summary")?;
                eprintln!("{} exported to {}", green("✔"), bold(&path.display().to_string()));
            }

            if copy {
                copy_to_clipboard(&record.content).context("Clipboard copy failed")?;
                eprintln!("{} copied to clipboard", green("✔"));
            }
        }

        Command::History => {
            let records = HistoryStore::open_default().load().await;
            if records.is_empty() {
                eprintln!("No summaries recorded yet.");
                return Ok(());
            }
            for record in &records {
                println!(
                    "{}  {}  {}  {}",
                    dim(&record.id.to_string()),
                    accent(theme, &record.date),
                    bold(&record.title),
                    dim(&format!(
                        "{} → {} words",
                        record.original_size, record.summary_size
                    )),
                );
            }
        }

        Command::Show { id } => {
            let record = find_record(id).await?;
            render_record(&record, theme)?;
        }

        Command::Delete { id } => {
            let remaining = HistoryStore::open_default()
                .remove(id)
                .await
                .context("Failed to update history")?;
            if !cli.quiet {
                eprintln!(
                    "{} {} record(s) remaining",
                    green("✔"),
                    remaining.len()
                );
            }
        }

        Command::Export { id, output } => {
            let record = find_record(id).await?;
            let path = export_record(&record, &output)
                .await
                .context("Failed to export summary")?;
            eprintln!("{} exported to {}", green("✔"), bold(&path.display().to_string()));
        }

        Command::Copy { id } => {
            let record = find_record(id).await?;
            copy_to_clipboard(&record.content).context("Clipboard copy failed")?;
            eprintln!("{} copied to clipboard", green("✔"));
        }

        Command::Theme { action } => {
            let store = ThemeStore::open_default();
            let theme = match action {
                None => store.load(),
                Some(ThemeAction::Dark) => {
                    store.save(Theme::Dark).context("Failed to save theme")?;
                    Theme::Dark
                }
                Some(ThemeAction::Light) => {
                    store.save(Theme::Light).context("Failed to save theme")?;
                    Theme::Light
                }
                Some(ThemeAction::Toggle) => store.toggle().context("Failed to save theme")?,
            };
            println!("{theme}");
        }
    }

    Ok(())
}

/// Spinner shown while extraction and generation run.
fn make_spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

/// Look up a history record by id.
async fn find_record(id: i64) -> Result<SummaryRecord> {
    let records = HistoryStore::open_default().load().await;
    match records.into_iter().find(|r| r.id == id) {
        Some(record) => Ok(record),
        None => bail!("No history record with id {id} (see `pdfbrief history`)"),
    }
}

/// Render the classified summary lines with themed ANSI styling.
fn render_record(record: &SummaryRecord, theme: Theme) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in classify(&record.content) {
        match line {
            RenderLine::Heading { level, text } => {
                let styled = if level <= 1 {
                    bold(&accent(theme, &text))
                } else {
                    accent(theme, &text)
                };
                writeln!(out, "{styled}")?;
            }
            RenderLine::Bullet { text } => {
                writeln!(out, "  {} {}", accent(theme, "•"), text)?;
            }
            RenderLine::Blank => writeln!(out)?,
            RenderLine::Paragraph { text } => writeln!(out, "{text}")?,
        }
    }
    Ok(())
}
