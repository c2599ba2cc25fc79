// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;

use nutq::app_config;
use nutq::app_controller::Controller;
use nutq::database::StatsStore;
use nutq::drill::{DrillEvent, DrillMode};
use nutq::matching::{normalize, PronunciationChecker, SimilarityAlgorithm};
use nutq::speech::{ConsoleSynthesizer, TypedRecognizer};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for SimilarityAlgorithm to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliAlgorithm {
    Positional,
    Levenshtein,
}

impl From<CliAlgorithm> for SimilarityAlgorithm {
    fn from(cli_algorithm: CliAlgorithm) -> Self {
        match cli_algorithm {
            CliAlgorithm::Positional => SimilarityAlgorithm::Positional,
            CliAlgorithm::Levenshtein => SimilarityAlgorithm::Levenshtein,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the normalized form of Arabic text
    Normalize {
        /// Text to normalize
        text: String,
    },

    /// Check a recognized answer against the expected Arabic
    Check(CheckArgs),

    /// List content categories
    Categories,

    /// Run an interactive pronunciation drill
    Drill(DrillArgs),

    /// Show or reset stored statistics
    Stats(StatsArgs),

    /// Generate shell completions for nutq
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// What was heard or typed
    #[arg(value_name = "RECOGNIZED")]
    recognized: String,

    /// Expected Arabic text
    #[arg(short, long)]
    expected: String,

    /// Accepted alternate spelling (repeatable)
    #[arg(short, long = "alt")]
    alternates: Vec<String>,

    /// Similarity threshold (defaults to the configured lenient threshold)
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Similarity algorithm (defaults to the configured one)
    #[arg(long, value_enum)]
    algorithm: Option<CliAlgorithm>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct DrillArgs {
    /// Category to drill (all categories when omitted)
    #[arg(long)]
    category: Option<String>,

    /// Number of items in this round
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Grade against the strict threshold
    #[arg(short, long)]
    strict: bool,

    /// Do not speak prompts
    #[arg(long)]
    no_speak: bool,
}

#[derive(Args, Debug)]
struct StatsArgs {
    /// Only show this game
    #[arg(short, long)]
    game: Option<String>,

    /// Number of recent attempts to show with --game
    #[arg(long, default_value_t = 5)]
    recent: usize,

    /// Delete the statistics of --game
    #[arg(long, requires = "game")]
    reset: bool,
}

/// nutq - Arabic pronunciation drills
///
/// Checks spoken or typed Arabic against expected vocabulary, tolerating
/// diacritics, alef spelling variants and near misses.
#[derive(Parser, Debug)]
#[command(name = "nutq")]
#[command(version)]
#[command(about = "Arabic pronunciation matching and drills")]
#[command(long_about = "nutq checks Arabic answers against expected vocabulary and runs pronunciation drills.

EXAMPLES:
    nutq normalize 'أَهْلاً'                         # Strip diacritics, unify alef
    nutq check 'مرحبا بك' -e 'مرحبا'                 # Partial match
    nutq check 'كتتاب' -e 'كتاب' --algorithm levenshtein --json
    nutq drill --category greetings -n 5       # Five greetings, lenient grading
    nutq drill --strict                        # All categories, strict grading
    nutq stats --game greetings                # Score and recent attempts
    nutq completions bash > nutq.bash          # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
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
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Allow everything through the logger; the max level is narrowed below
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(cli_level) = &cli.log_level {
        let level: app_config::LogLevel = cli_level.clone().into();
        log::set_max_level(level_filter(&level));
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "nutq", &mut std::io::stdout());
            Ok(())
        }
        Commands::Normalize { text } => {
            println!("{}", normalize(&text));
            Ok(())
        }
        command => {
            let controller = Controller::from_config_file(&cli.config_path)?;
            // Command line wins over the file
            if cli.log_level.is_none() {
                log::set_max_level(level_filter(&controller.config().log_level));
            }
            match command {
                Commands::Check(args) => run_check(&controller, args),
                Commands::Categories => run_categories(&controller),
                Commands::Drill(args) => run_drill(controller, args).await,
                Commands::Stats(args) => run_stats(&controller, args).await,
                Commands::Completions { .. } | Commands::Normalize { .. } => Ok(()),
            }
        }
    }
}

fn run_check(controller: &Controller, args: CheckArgs) -> Result<()> {
    let matching = &controller.config().matching;
    let threshold = args.threshold.unwrap_or(matching.threshold);
    let algorithm = args.algorithm.map(Into::into).unwrap_or(matching.algorithm);

    let checker = PronunciationChecker::new(threshold).with_algorithm(algorithm);
    let result = checker.check_with_alternates(&args.recognized, args.expected.as_str(), &args.alternates);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "{} ({}, {}% similar)",
            if result.is_correct { "✔ correct" } else { "✘ incorrect" },
            result.match_type,
            result.percent()
        );
    }
    Ok(())
}

fn run_categories(controller: &Controller) -> Result<()> {
    let content = controller.load_content()?;
    for category in content.categories() {
        println!("{:<24} {:>5} items", category, content.items(category)?.len());
    }
    Ok(())
}

async fn run_drill(controller: Controller, args: DrillArgs) -> Result<()> {
    let controller = if args.no_speak { controller.without_spoken_prompts() } else { controller };

    let content = controller.load_content()?;
    let stats = controller.open_stats()?;
    let synthesizer = ConsoleSynthesizer::stdout();
    let mut recognizer = TypedRecognizer::stdin();
    let mode = if args.strict { DrillMode::Strict } else { DrillMode::Lenient };

    let mut print_event = |event: DrillEvent<'_>| match event {
        DrillEvent::Prompt { index, total, item } => {
            println!("\n[{}/{}] {} ({})", index + 1, total, item.eng, item.chat);
        }
        DrillEvent::Checked { feedback, .. } => {
            let mark = if feedback.accepted { "✔" } else { "✘" };
            println!("{} {}", mark, feedback.message);
        }
        DrillEvent::Revealed { item } => {
            println!("Answer: {}", item.ar);
        }
    };

    let summary = controller
        .run_drill(
            &content,
            args.category.as_deref(),
            args.count,
            mode,
            &synthesizer,
            &mut recognizer,
            &stats,
            &mut print_event,
        )
        .await?;

    println!(
        "\nScore: {}/{} ({}%)",
        summary.correct,
        summary.total,
        summary.score_percent()
    );
    if let Some(game_stats) = stats.get_stats(&summary.game).await? {
        println!("Overall for '{}': {}", summary.game, game_stats);
    }
    Ok(())
}

async fn run_stats(controller: &Controller, args: StatsArgs) -> Result<()> {
    let stats = controller.open_stats()?;

    let Some(game) = args.game else {
        let games = stats.list_games().await?;
        if games.is_empty() {
            println!("No statistics recorded yet.");
        }
        for game in games {
            if let Some(game_stats) = stats.get_stats(&game).await? {
                println!("{:<24} {}", game, game_stats);
            }
        }
        return Ok(());
    };

    if args.reset {
        stats.reset(&game).await?;
        println!("Statistics for '{}' reset.", game);
        return Ok(());
    }

    let game_stats = stats
        .get_stats(&game)
        .await?
        .ok_or_else(|| anyhow!("No statistics for game '{}'", game))?;
    println!("{}: {}", game, game_stats);

    for attempt in stats.recent_attempts(&game, args.recent).await? {
        println!(
            "  {} {} -> '{}' ({}, {:.0}%)",
            if attempt.is_correct { "✔" } else { "✘" },
            attempt.expected,
            attempt.recognized,
            attempt.match_type,
            attempt.similarity * 100.0
        );
    }
    Ok(())
}
