// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug};
use std::io::Write;
use std::path::PathBuf;

use typecraft::app_config::{Config, LogLevel};
use typecraft::app_controller::{Controller, RawOptions, XmlOptions};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a Typecraft XML text from raw text
    Raw(RawArgs),

    /// Read Typecraft XML, transform it and write it back
    Xml(XmlArgs),

    /// Print the number of texts in a Typecraft XML file or directory
    Ntexts {
        /// Input file, directory, or - for stdin
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Generate shell completions for tpy
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct RawArgs {
    /// Input file, or - for stdin
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Keep the whole input as a single phrase
    #[arg(long)]
    no_sent_tokenize: bool,

    /// Do not split phrases into words
    #[arg(long)]
    no_tokenize: bool,

    /// Do not run a tagger
    #[arg(long)]
    no_tag: bool,

    /// Tagger to use
    #[arg(long, default_value = "lexicon")]
    tagger: String,

    /// Title of the generated text
    #[arg(long)]
    title: Option<String>,

    /// Language code of the input (e.g. 'en', 'nob')
    #[arg(long)]
    language: Option<String>,

    /// Metadata entry, may be repeated
    #[arg(long, num_args = 2, value_names = ["KEY", "VALUE"], action = ArgAction::Append)]
    meta: Vec<String>,

    /// Output file, stdout when absent or -
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct XmlArgs {
    /// Input file, or - for stdin
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Tokenize phrases without words
    #[arg(long)]
    tokenize: bool,

    /// Tag every text
    #[arg(long)]
    tag: bool,

    /// Tagger to use with --tag
    #[arg(long, default_value = "lexicon")]
    tagger: String,

    /// Split every text into N texts
    #[arg(long, default_value_t = 1)]
    split: usize,

    /// Merge all texts into one
    #[arg(long)]
    merge: bool,

    /// Replace the title of every text
    #[arg(long)]
    title: Option<String>,

    /// Language given to the tagger instead of each text's language
    #[arg(long)]
    override_language: Option<String>,

    /// Metadata entry, may be repeated
    #[arg(long, num_args = 2, value_names = ["KEY", "VALUE"], action = ArgAction::Append)]
    meta: Vec<String>,

    /// Map POS tags into the configured tagset
    #[arg(long)]
    map_tags: bool,

    /// Accept documents missing required Typecraft elements
    #[arg(long)]
    lenient: bool,

    /// Output file, stdout when absent or -
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// tpy - tools for Typecraft XML corpora
///
/// Converts raw text into Typecraft XML, and tokenizes, tags, splits and
/// merges existing Typecraft documents.
#[derive(Parser, Debug)]
#[command(name = "tpy")]
#[command(version)]
#[command(about = "Typecraft XML corpus tool")]
#[command(long_about = "tpy builds and transforms Typecraft XML documents.

EXAMPLES:
    tpy raw story.txt --no-tag -o story.xml      # Raw text to Typecraft XML
    tpy raw - --language nob --meta source web   # Read stdin, add metadata
    tpy xml corpus.xml --split 4 -o parts.xml    # Split every text in four
    tpy xml corpus.xml --merge --title Merged    # Merge all texts into one
    tpy xml corpus.xml --tag --map-tags          # Tag with the lexicon tagger
    tpy ntexts corpus.xml                        # Count texts
    tpy completions bash > tpy.bash              # Generate bash completions

CONFIGURATION:
    Settings are read from tpy.json by default. A missing file means
    defaults; use --config to point elsewhere.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "tpy.json")]
    config: PathBuf,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger::new(LevelFilter::Trace)))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and label for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, label) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                colour,
                now,
                label,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

// Flattened KEY VALUE occurrences of --meta into pairs
fn meta_pairs(values: Vec<String>) -> Result<Vec<(String, String)>> {
    if values.len() % 2 != 0 {
        return Err(anyhow!("--meta takes a key and a value"));
    }
    Ok(values
        .chunks(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect())
}

fn main() -> Result<()> {
    let cli = CommandLineOptions::parse();

    // Level from the command line wins; the config may lower or raise it below
    let initial_level = cli
        .log_level
        .map(LogLevel::from)
        .unwrap_or_default()
        .to_level_filter();
    CustomLogger::init(initial_level)?;

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "tpy", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load(&cli.config)?;
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());
    debug!("Using configuration from {:?}", cli.config);

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Raw(args) => {
            let options = RawOptions {
                sent_tokenize: !args.no_sent_tokenize,
                tokenize: !args.no_tokenize,
                tag: !args.no_tag,
                tagger: args.tagger,
                title: args.title,
                language: args.language,
                meta: meta_pairs(args.meta)?,
            };
            controller.run_raw(&args.input, args.output.as_deref(), &options)
        }
        Commands::Xml(args) => {
            let options = XmlOptions {
                tokenize: args.tokenize,
                tag: args.tag,
                tagger: args.tagger,
                split: args.split,
                merge: args.merge,
                title: args.title,
                override_language: args.override_language,
                meta: meta_pairs(args.meta)?,
                map_tags: args.map_tags,
                lenient: args.lenient,
            };
            controller.run_xml(&args.input, args.output.as_deref(), &options)
        }
        Commands::Ntexts { input } => controller.run_ntexts(&input),
        Commands::Completions { .. } => Ok(()),
    }
}
