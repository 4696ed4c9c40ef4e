use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use unicode_width::UnicodeWidthStr;

use zoro::config::{Config, SpinnerConfig};
use zoro::runner;
use zoro::spinner::{char_sets, decorator};

#[derive(Parser)]
#[command(name = "zoro")]
#[command(about = "Animated terminal spinner for long-running commands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a command with a spinner until it finishes
    Run {
        #[command(flatten)]
        style: StyleArgs,
        /// Command to run, followed by its arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// List the built-in character sets
    Sets,
    /// Show or change the saved spinner defaults
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,
        #[command(flatten)]
        style: StyleArgs,
    },
}

#[derive(Args, Default)]
struct StyleArgs {
    /// Built-in character set index (see `zoro sets`)
    #[arg(long)]
    char_set: Option<usize>,
    /// Delay between frames in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
    /// Color or attribute name, repeatable (e.g. --color hiCyan --color bold)
    #[arg(long)]
    color: Vec<String>,
    /// Text before the glyph
    #[arg(long)]
    prefix: Option<String>,
    /// Text after the glyph
    #[arg(long)]
    suffix: Option<String>,
    /// Message written when the spinner stops
    #[arg(long)]
    final_msg: Option<String>,
}

impl StyleArgs {
    fn is_empty(&self) -> bool {
        self.char_set.is_none()
            && self.delay_ms.is_none()
            && self.color.is_empty()
            && self.prefix.is_none()
            && self.suffix.is_none()
            && self.final_msg.is_none()
    }

    /// Overlay the flags that were given onto `config`.
    fn apply(self, config: &mut SpinnerConfig) {
        if let Some(char_set) = self.char_set {
            config.char_set = char_set;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }
        if !self.color.is_empty() {
            config.color = self.color;
        }
        if let Some(prefix) = self.prefix {
            config.prefix = prefix;
        }
        if let Some(suffix) = self.suffix {
            config.suffix = suffix;
        }
        if let Some(final_msg) = self.final_msg {
            config.final_msg = final_msg;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with frames on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zoro=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { style, command } => {
            let code = run(style, command).await?;
            std::process::exit(code);
        }
        Commands::Sets => list_sets()?,
        Commands::Config { show, style } => handle_config(show, style)?,
    }

    Ok(())
}

async fn run(style: StyleArgs, command: Vec<String>) -> Result<i32> {
    let mut config = Config::load()?.spinner;
    style.apply(&mut config);

    let spinner = config.build(io::stdout())?;
    let (program, args) = command
        .split_first()
        .context("No command given")?;

    let outcome = runner::run_command(&spinner, program, args).await?;

    io::stdout().write_all(&outcome.stdout)?;
    io::stderr().write_all(&outcome.stderr)?;
    io::stdout().flush()?;

    Ok(outcome.exit_code())
}

fn list_sets() -> Result<()> {
    let mut stdout = io::stdout().lock();
    for (index, set) in char_sets::CHAR_SETS.iter().enumerate() {
        let widest = set.iter().map(|glyph| glyph.width()).max().unwrap_or(0);
        let cells: Vec<String> = set
            .iter()
            .map(|glyph| format!("{}{}", glyph, " ".repeat(widest - glyph.width())))
            .collect();
        writeln!(stdout, "{:>3}  {}", index, cells.join(" "))?;
    }
    Ok(())
}

fn handle_config(show: bool, style: StyleArgs) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        println!("Current configuration:");
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    if style.is_empty() {
        println!("No changes made. Use --show to view current configuration.");
        return Ok(());
    }

    style.apply(&mut config.spinner);

    // Reject bad values before they reach the file
    config.spinner.glyphs()?;
    decorator::parse_style(config.spinner.color.as_slice())?;

    config.save()?;
    println!("Configuration saved to: {:?}", Config::config_path()?);

    Ok(())
}
