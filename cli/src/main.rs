//! CLI entrypoint for Imposter Arena
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use imposter_application::{CompositeEventSink, RunGameInput, RunGameUseCase};
use imposter_domain::{GameReplay, OutputFormat};
use imposter_infrastructure::{
    ConfigLoader, FileConfig, JsonlEventLog, OpenRouterBackend, read_event_log,
};
use imposter_presentation::{
    Cli, ConsoleEventPrinter, ConsoleFormatter, OutputFormatter, ProgressReporter, set_color,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref());

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };
    apply_overrides(&cli, &mut config);

    set_color(!cli.no_color && config.output.color);
    let format = cli.output.or(config.output.format).unwrap_or_default();

    let formatter = ConsoleFormatter;

    if let Some(path) = &cli.replay {
        let events = read_event_log(path)?;
        let replay = GameReplay::from_events(&events)
            .with_context(|| format!("Corrupt event log {}", path.display()))?;
        return match replay.result() {
            Some(result) => {
                println!("{}", formatter.format(result, format));
                Ok(())
            }
            None => match replay.error() {
                Some(message) => bail!("Recorded game ended with an error: {}", message),
                None => bail!("Event log {} has no game_complete event", path.display()),
            },
        };
    }

    for issue in config.check()? {
        warn!("{}", issue.message);
    }

    let word = config
        .game
        .word
        .clone()
        .context("A secret word is required. Use --word or set game.word in the config file.")?;
    let category = config
        .game
        .category
        .clone()
        .context(
            "A category is required. Use --category or set game.category in the config file.",
        )?;

    let strategy = cli
        .model_strategy()
        .unwrap_or_else(|| config.models.parse_strategy().0);
    let game_config = config.game.to_game_config(word, category, strategy);
    let input = RunGameInput::new(game_config).with_registry(config.models.to_registry());
    let (policy, _) = config.agent.to_call_policy();

    info!(
        "Starting game: {} players, {} imposter(s)",
        input.config.num_players, input.config.num_imposters
    );

    // === Dependency Injection ===
    let backend = Arc::new(OpenRouterBackend::new(
        config.backend.to_openrouter_config()?,
    )?);
    let use_case = RunGameUseCase::with_policy(backend, policy);

    let printer = ConsoleEventPrinter::new();
    let progress = ProgressReporter::new();
    let event_log = match cli.event_log.as_ref().or(config.output.event_log.as_ref()) {
        Some(path) => Some(JsonlEventLog::create(path)?),
        None => None,
    };

    let mut events = CompositeEventSink::new(Vec::new());
    // JSON goes to stdout on its own
    if !cli.quiet && format != OutputFormat::Json {
        if config.output.live {
            events.push(&printer);
        } else {
            events.push(&progress);
        }
    }
    if let Some(log) = &event_log {
        info!("Writing event log to {}", log.path().display());
        events.push(log);
    }

    let result = use_case.execute_with_events(input, &events).await?;

    println!("{}", formatter.format(&result, format));

    Ok(())
}

/// Command line flags win over every configuration file
fn apply_overrides(cli: &Cli, config: &mut FileConfig) {
    let game = &mut config.game;
    if let Some(word) = &cli.word {
        game.word = Some(word.clone());
    }
    if let Some(category) = &cli.category {
        game.category = Some(category.clone());
    }
    if let Some(players) = cli.player_count() {
        game.players = players;
    }
    if let Some(imposters) = cli.imposters {
        game.imposters = imposters;
    }
    if let Some(rounds) = cli.clue_rounds {
        game.clue_rounds = rounds;
    }
    if let Some(rounds) = cli.voting_rounds {
        game.voting_rounds = rounds;
    }
    if let Some(policy) = cli.tie_break {
        game.tie_break = policy;
    }
    if cli.seed.is_some() {
        game.seed = cli.seed;
    }
}

/// Console logging by verbosity, plus a daily log file when `log_dir` is set
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "imposter.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    guard
}
