//! CLI command definitions, routing, and tracing setup.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use promptpack_core::pipeline::{MergeConfig, MergeOutcome, MergeSummary, ProgressReporter};
use promptpack_shared::{AppConfig, FileExtensionSet, init_config, load_config, normalize_output_name};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// promptpack — bundle a source tree into a single LLM prompt.
#[derive(Parser)]
#[command(
    name = "promptpack",
    version,
    about = "Merge every script under a directory into one annotated prompt file.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Defaults to `merge` in the current directory.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Merge all scripts under a directory into one prompt file.
    Merge {
        /// Directory to scan (defaults to the current directory).
        root: Option<PathBuf>,

        /// Output file name; `.txt` is appended if missing. Skips the prompt.
        #[arg(short, long)]
        output: Option<String>,

        /// Use the configured default name without asking.
        #[arg(long)]
        no_prompt: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "promptpack=warn",
        1 => "promptpack=info",
        2 => "promptpack=debug",
        _ => "promptpack=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        None => cmd_merge(None, None, false),
        Some(Command::Merge {
            root,
            output,
            no_prompt,
        }) => cmd_merge(root, output.as_deref(), no_prompt),
        Some(Command::Config { action }) => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

fn cmd_merge(root: Option<PathBuf>, output: Option<&str>, no_prompt: bool) -> Result<()> {
    let config = load_config()?;
    let default_name = config.default_output_name();

    println!("Searching for script files...");

    let output_name = match output {
        Some(name) => normalize_output_name(name, &default_name),
        None if no_prompt => default_name,
        None => {
            let stdin = io::stdin();
            prompt_output_name(&mut stdin.lock(), &mut io::stdout(), &default_name)?
        }
    };

    let root = match root {
        Some(root) => root,
        None => std::env::current_dir()
            .map_err(|e| eyre!("cannot determine working directory: {e}"))?,
    };

    let merge_config = MergeConfig {
        root,
        output: PathBuf::from(&output_name),
        extensions: FileExtensionSet::default(),
    };

    info!(
        root = %merge_config.root.display(),
        output = %output_name,
        "merging scripts"
    );

    let reporter = CliProgress::new();
    let outcome = promptpack_core::pipeline::merge(&merge_config, &reporter);
    // Covers the NoFiles and error paths too; `done` leaves the spinner alone.
    reporter.spinner.finish_and_clear();

    match outcome? {
        MergeOutcome::NoFiles => {
            println!("No script files found!");
        }
        MergeOutcome::Written(summary) => {
            println!("All scripts merged into '{output_name}'");
            println!("Output location: {}", summary.output_path.display());
            if let Some(notice) = placeholder_notice(summary.placeholder_count) {
                println!("{notice}");
            }
        }
    }

    Ok(())
}

/// Status line for files whose content was replaced by a placeholder.
fn placeholder_notice(count: usize) -> Option<String> {
    (count > 0).then(|| {
        format!("  {count} file(s) could not be read or decoded and were replaced by a placeholder")
    })
}

/// Ask for an output name on `output`, reading the answer from `input`.
///
/// End of input counts as an empty answer.
fn prompt_output_name<R, W>(input: &mut R, output: &mut W, default_name: &str) -> io::Result<String>
where
    R: BufRead,
    W: Write,
{
    write!(output, "Output file name (Enter = '{default_name}'): ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(normalize_output_name(&answer, default_name))
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self::with_bar(spinner)
    }

    fn with_bar(spinner: ProgressBar) -> Self {
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn files_found(&self, count: usize) {
        if count > 0 {
            self.spinner
                .suspend(|| println!("Found {count} script files."));
        }
    }

    fn file_written(&self, path: &Path, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Writing [{current}/{total}] {}", path.display()));
    }

    fn done(&self, _summary: &MergeSummary) {}
}

// ---------------------------------------------------------------------------
// Config commands
// ---------------------------------------------------------------------------

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(answer: &str) -> (String, String) {
        let mut input = io::Cursor::new(answer.as_bytes().to_vec());
        let mut shown = Vec::new();
        let name = prompt_output_name(&mut input, &mut shown, "merged_scripts_prompt.txt").unwrap();
        (name, String::from_utf8(shown).unwrap())
    }

    #[test]
    fn prompt_shows_default() {
        let (_, shown) = prompt("\n");
        assert_eq!(shown, "Output file name (Enter = 'merged_scripts_prompt.txt'): ");
    }

    #[test]
    fn prompt_enter_uses_default() {
        assert_eq!(prompt("\n").0, "merged_scripts_prompt.txt");
        assert_eq!(prompt("").0, "merged_scripts_prompt.txt");
    }

    #[test]
    fn prompt_appends_suffix_once() {
        assert_eq!(prompt("bundle\n").0, "bundle.txt");
        assert_eq!(prompt("  bundle.txt  \r\n").0, "bundle.txt");
    }

    #[test]
    fn placeholder_notice_wording() {
        assert_eq!(placeholder_notice(0), None);
        let notice = placeholder_notice(2).unwrap();
        assert!(notice.contains("2 file(s) could not be read or decoded"));
    }

    #[test]
    fn done_leaves_spinner_to_caller() {
        let progress = CliProgress::with_bar(ProgressBar::hidden());
        progress.done(&MergeSummary {
            output_path: PathBuf::from("out.txt"),
            file_count: 1,
            placeholder_count: 0,
            elapsed: std::time::Duration::ZERO,
        });
        assert!(!progress.spinner.is_finished());
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["promptpack"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn merge_arguments_parse() {
        let cli = Cli::try_parse_from(["promptpack", "-vv", "merge", "src", "-o", "out"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Command::Merge {
                root,
                output,
                no_prompt,
            }) => {
                assert_eq!(root, Some(PathBuf::from("src")));
                assert_eq!(output.as_deref(), Some("out"));
                assert!(!no_prompt);
            }
            _ => panic!("expected merge subcommand"),
        }
    }

    #[test]
    fn log_format_rejects_unknown() {
        assert!(Cli::try_parse_from(["promptpack", "--log-format", "xml"]).is_err());
        assert!(Cli::try_parse_from(["promptpack", "--log-format", "json"]).is_ok());
    }
}
