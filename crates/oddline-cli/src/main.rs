mod logging;
mod play;
mod settings;
mod timer;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use oddline_core::{Fact, GenerationError, Line, WordLine};
use oddline_generate::output::csv::write_batch_csv;
use oddline_generate::{
    BatchReport, FactConfig, FactGenerator, GameId, GameOverrides, GameRun, generate_game,
};
use schemars::schema_for;
use settings::{LogFormat, OutputFormat, Settings, load_settings};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("settings error: {0}")]
    Settings(#[from] settings::SettingsError),
    #[error("logging error: {0}")]
    Logging(#[from] logging::LoggingError),
    #[error("play error: {0}")]
    Play(#[from] play::PlayError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Parser, Debug)]
#[command(name = "oddline", version, about = "Odd-one-out puzzle line generator")]
struct Cli {
    /// Settings file (defaults to ./oddline.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Tracing filter directive. Precedence: this flag, ODDLINE_LOG, the settings file.
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one game's batch.
    Generate(GenerateArgs),
    /// Play a game on stdin/stdout.
    Play(PlayArgs),
    /// Generate arithmetic facts.
    Facts(FactsArgs),
    /// List the available games.
    List,
    /// Print the JSON Schema of a line record.
    Schema(SchemaArgs),
}

#[derive(Args, Debug)]
struct SeedArgs {
    /// Seed for the batch; the game's own seed when omitted.
    #[arg(long, conflicts_with = "random_seed")]
    seed: Option<u32>,
    /// Draw a fresh seed instead of the game's own.
    #[arg(long, default_value_t = false)]
    random_seed: bool,
    /// Number of lines.
    #[arg(long)]
    lines: Option<usize>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[arg(long)]
    game: GameId,
    #[command(flatten)]
    seed: SeedArgs,
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Also write a batch report (counts and fingerprint) as JSON.
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[arg(long)]
    game: GameId,
    #[command(flatten)]
    seed: SeedArgs,
    /// Write the session summary as JSON when the round finishes.
    #[arg(long)]
    summary: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FactsArgs {
    #[arg(long, default_value_t = oddline_generate::facts::DEFAULT_COUNT)]
    count: usize,
    #[arg(long, default_value_t = oddline_generate::facts::DEFAULT_SEED)]
    seed: u32,
    /// Largest sum and minuend.
    #[arg(long, default_value_t = oddline_generate::facts::DEFAULT_MAX)]
    max: u32,
    /// Print `a + b = c` lines instead of JSON.
    #[arg(long, default_value_t = false)]
    text: bool,
}

#[derive(Args, Debug)]
struct SchemaArgs {
    #[arg(long, value_enum, default_value_t = SchemaKind::Numbers)]
    kind: SchemaKind,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SchemaKind {
    Numbers,
    Letters,
    Words,
    Facts,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let (settings_path, explicit) = match &cli.config {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(settings::DEFAULT_SETTINGS_FILE), false),
    };
    let settings = load_settings(&settings_path, explicit)?;

    let log_format = cli.log_format.unwrap_or(settings.log_format);
    logging::init_logging(
        log_format,
        cli.log_level.as_deref(),
        settings.log_level.as_deref(),
    )?;
    tracing::debug!(path = %settings_path.display(), explicit, "settings loaded");

    match cli.command {
        Command::Generate(args) => run_generate(args, &settings),
        Command::Play(args) => run_play(args, &settings),
        Command::Facts(args) => run_facts(args),
        Command::List => run_list(),
        Command::Schema(args) => run_schema(args),
    }
}

/// Flags first, then the settings file, then the game's compiled-in values.
fn resolve_overrides(game: GameId, args: &SeedArgs, settings: &Settings) -> GameOverrides {
    let configured = settings.overrides_for(game);
    let seed = if args.random_seed {
        let seed = rand::random::<u32>();
        tracing::info!(game = %game, seed, "random seed drawn");
        Some(seed)
    } else {
        args.seed.or(configured.seed)
    };
    GameOverrides {
        seed,
        lines: args.lines.or(configured.lines),
    }
}

fn run_generate(args: GenerateArgs, settings: &Settings) -> Result<(), CliError> {
    let overrides = resolve_overrides(args.game, &args.seed, settings);
    let run = generate_game(args.game, overrides)?;
    let format = args.format.unwrap_or(settings.output);

    let mut writer = open_output(args.out.as_deref())?;
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &run)?;
            writeln!(writer)?;
        }
        OutputFormat::Csv => {
            let bytes = write_batch_csv(&mut writer, &run.batch)?;
            tracing::debug!(bytes, "csv written");
        }
    }
    writer.flush()?;

    if let Some(path) = args.report.as_deref() {
        write_report(path, &run)?;
    }
    Ok(())
}

fn write_report(path: &Path, run: &GameRun) -> Result<(), CliError> {
    let report = BatchReport::from_run(run)?;
    write_json(path, &report)?;
    tracing::info!(
        path = %path.display(),
        fingerprint = %report.fingerprint,
        "report written"
    );
    Ok(())
}

fn run_play(args: PlayArgs, settings: &Settings) -> Result<(), CliError> {
    let overrides = resolve_overrides(args.game, &args.seed, settings);
    let run = generate_game(args.game, overrides)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = play::play_session(&run, stdin.lock(), stdout.lock(), chrono::Utc::now)?;

    match (summary, args.summary) {
        (Some(summary), Some(path)) => {
            write_json(&path, &summary)?;
            tracing::info!(path = %path.display(), session = %summary.id, "summary written");
        }
        (None, Some(path)) => {
            tracing::warn!(path = %path.display(), "round not finished, no summary written");
        }
        (_, None) => {}
    }
    Ok(())
}

fn fact_config(args: &FactsArgs) -> FactConfig {
    FactConfig {
        count: args.count,
        seed: args.seed,
        max: args.max,
    }
}

fn run_facts(args: FactsArgs) -> Result<(), CliError> {
    let facts = FactGenerator::generate(&fact_config(&args))?;

    let mut stdout = io::stdout().lock();
    if args.text {
        for fact in &facts {
            writeln!(stdout, "{fact}")?;
        }
    } else {
        serde_json::to_writer_pretty(&mut stdout, &facts)?;
        writeln!(stdout)?;
    }
    Ok(())
}

fn run_list() -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    for game in GameId::ALL {
        let range = game
            .range()
            .map(|(min, max)| format!("[{min}, {max}]"))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            stdout,
            "{:<18} {:<18} {:<18} range {:<9} seed {}",
            game.as_str(),
            game.title(),
            game.generator_id(),
            range,
            game.default_seed()
        )?;
    }
    Ok(())
}

fn run_schema(args: SchemaArgs) -> Result<(), CliError> {
    let schema = match args.kind {
        SchemaKind::Numbers => schema_for!(Line<i64>),
        SchemaKind::Letters => schema_for!(Line<char>),
        SchemaKind::Words => schema_for!(WordLine),
        SchemaKind::Facts => schema_for!(Fact),
    };
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &schema)?;
    writeln!(stdout)?;
    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), CliError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, CliError> {
    match path {
        Some(path) => {
            let file = File::create(path)?;
            tracing::info!(path = %path.display(), "writing output");
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
