//! Battle Game - Command-line battle RPG on top of battle_core
//!
//! Enemies, names, enemy decisions, critical hits and level-ups come from a
//! content provider: Gemini by default, or a seeded RNG with `--offline`.

mod console;
mod gemini;
mod session;

use anyhow::{Context, Result};
use battle_core::{ContentProvider, GameConstants, GenerationConfig, RandomProvider, SaveStore};
use clap::Parser;
use console::Console;
use gemini::GeminiProvider;
use session::{ProviderFactory, Session};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "battle-game", version, about = "Fight generated monsters and level up")]
struct Cli {
    /// Directory holding saved games
    #[arg(long, default_value = "saved")]
    saves_dir: PathBuf,

    /// Game constants TOML file (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use the local RNG provider instead of Gemini
    #[arg(long)]
    offline: bool,

    /// Seed for the offline provider
    #[arg(long, requires = "offline")]
    seed: Option<u64>,

    /// Do not clear the terminal between screens
    #[arg(long)]
    no_clear: bool,
}

fn main() -> Result<ExitCode> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let constants = match &cli.config {
        Some(path) => GameConstants::load(path)
            .with_context(|| format!("failed to load constants from {}", path.display()))?,
        None => GameConstants::default(),
    };
    info!(saves_dir = %cli.saves_dir.display(), offline = cli.offline, "starting");

    let factory = provider_factory(&cli, &constants)?;
    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout(), !cli.no_clear);
    let mut session = Session::new(
        console,
        io::stdout(),
        SaveStore::new(&cli.saves_dir),
        &constants,
        factory,
    );

    let code = session.run()?;
    Ok(ExitCode::from(code))
}

fn provider_factory<'a>(cli: &Cli, constants: &'a GameConstants) -> Result<ProviderFactory<'a>> {
    if cli.offline {
        let seed = cli.seed;
        let odds = constants.random_provider.clone();
        return Ok(Box::new(move |_: &GenerationConfig| -> Result<Box<dyn ContentProvider>> {
            let provider = match seed {
                Some(seed) => RandomProvider::new(seed, odds.clone()),
                None => RandomProvider::from_entropy(odds.clone()),
            };
            Ok(Box::new(provider) as Box<dyn ContentProvider>)
        }));
    }

    let api_key = std::env::var("GEMINI_API_KEY")
        .context("GEMINI_API_KEY is not set; export it, add it to .env, or pass --offline")?;
    Ok(Box::new(move |generation: &GenerationConfig| -> Result<Box<dyn ContentProvider>> {
        let provider = GeminiProvider::new(api_key.clone(), &constants.gemini, generation.clone())
            .context("failed to build the Gemini HTTP client")?;
        Ok(Box::new(provider) as Box<dyn ContentProvider>)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_seed_requires_offline() {
        assert!(Cli::try_parse_from(["battle-game", "--seed", "7"]).is_err());
        let cli = Cli::try_parse_from(["battle-game", "--offline", "--seed", "7"]).unwrap();
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.saves_dir, PathBuf::from("saved"));
    }

    #[test]
    fn test_sample_config_matches_defaults() {
        let constants = GameConstants::parse(include_str!("../config/game.toml")).unwrap();
        assert_eq!(constants, GameConstants::default());
    }

    #[test]
    fn test_offline_factory_is_reproducible() {
        let cli = Cli::try_parse_from(["battle-game", "--offline", "--seed", "42"]).unwrap();
        let constants = GameConstants::default();
        let mut factory = provider_factory(&cli, &constants).unwrap();
        let generation = GenerationConfig::default();

        let mut first = factory(&generation).unwrap();
        let mut second = factory(&generation).unwrap();
        assert_eq!(first.roll_name().unwrap(), second.roll_name().unwrap());
        assert_eq!(first.name(), "random");
    }
}
