//! Game session - Menu, new/existing game setup, and the battle loop

use crate::console::{Console, ConsoleDecisions};
use anyhow::{Context, Result};
use battle_core::battle::{BattleObserver, Side};
use battle_core::spawn::roll_player;
use battle_core::{
    AttackResult, BattleEngine, BattleError, BattleOutcome, Combatant, ContentProvider,
    GameConstants, GenerationConfig, ProgressionReport, SaveStore, SavedGame,
};
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tracing::{info, warn};

/// Builds a provider for a game's generation settings
pub type ProviderFactory<'a> =
    Box<dyn FnMut(&GenerationConfig) -> Result<Box<dyn ContentProvider>> + 'a>;

const RETRY: &str = "Sorry, invalid input! ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    NewGame,
    ExistingGame,
}

impl MenuChoice {
    fn keyword(self) -> &'static str {
        match self {
            MenuChoice::NewGame => "NEW GAME",
            MenuChoice::ExistingGame => "PLAY EXISTING GAME",
        }
    }

    fn parse(answer: &str) -> Option<Self> {
        [MenuChoice::NewGame, MenuChoice::ExistingGame]
            .into_iter()
            .find(|choice| choice.keyword() == answer)
    }
}

/// One interactive play session
pub struct Session<'a, R, W, O> {
    console: Console<R, W>,
    narration: O,
    store: SaveStore,
    constants: &'a GameConstants,
    factory: ProviderFactory<'a>,
}

impl<'a, R: BufRead, W: Write, O: Write> Session<'a, R, W, O> {
    pub fn new(
        console: Console<R, W>,
        narration: O,
        store: SaveStore,
        constants: &'a GameConstants,
        factory: ProviderFactory<'a>,
    ) -> Self {
        Session {
            console,
            narration,
            store,
            constants,
            factory,
        }
    }

    /// Play until the player stops; returns the process exit code
    pub fn run(&mut self) -> Result<u8> {
        self.console.clear()?;
        let menu = self.ask_menu()?;

        let setup = match menu {
            MenuChoice::NewGame => Some(self.new_game()?),
            MenuChoice::ExistingGame => self.existing_game()?,
        };
        let Some((mut saved, mut player, mut provider)) = setup else {
            return Ok(1);
        };

        loop {
            if !self.ask_continue()? {
                saved.update_player(&player);
                self.store.save(&saved).context("failed to save the game")?;
                return Ok(0);
            }
            self.console.clear()?;

            let mut observer = ConsoleObserver::new(&mut self.narration);
            let result = {
                let mut decisions = ConsoleDecisions::new(&mut self.console);
                BattleEngine::new(provider.as_mut(), &self.constants.enemy).run(
                    &mut player,
                    &mut decisions,
                    &mut observer,
                )
            };
            observer.finish().context("failed to write battle narration")?;

            match result {
                Ok(report) => {
                    info!(outcome = ?report.outcome, turns = report.turns, "battle over");
                }
                Err(BattleError::Input(e)) => {
                    player.restore();
                    saved.update_player(&player);
                    self.store.save(&saved).context("failed to save the game")?;
                    return Err(e).context("console input failed during battle");
                }
                Err(e) => {
                    warn!(error = %e, "battle aborted");
                    player.restore();
                    self.console.say(format!("The battle was interrupted: {e}"))?;
                }
            }
        }
    }

    fn ask_menu(&mut self) -> io::Result<MenuChoice> {
        self.console.say("Enter 'NEW GAME' to start a new game.")?;
        self.console.say("Enter 'PLAY EXISTING GAME' to play an existing game.")?;
        self.console.ask_until(
            "What do you want to do? ",
            "Sorry, invalid input! What do you want to do? ",
            MenuChoice::parse,
        )
    }

    fn ask_continue(&mut self) -> io::Result<bool> {
        self.console.say("Enter 'Y' for yes.")?;
        self.console.say("Enter anything else for no.")?;
        Ok(self.console.ask("Do you want to continue playing? ")? == "Y")
    }

    fn new_game(&mut self) -> Result<(SavedGame, Combatant, Box<dyn ContentProvider>)> {
        let generation = self.ask_generation_config()?;
        let game_name = self.ask_new_game_name()?;
        let player_name = self.console.ask_until(
            "Enter your name: ",
            "Sorry, invalid input! Enter your name: ",
            |answer| {
                let name = answer.trim();
                (!name.is_empty()).then(|| name.to_string())
            },
        )?;

        let mut provider = (self.factory)(&generation).context("failed to start content provider")?;
        let player = roll_player(provider.as_mut(), player_name, &self.constants.player)
            .context("failed to roll the new player")?;
        let saved = SavedGame::new(game_name, generation, &player);
        self.store.save(&saved).context("failed to save the new game")?;
        info!(game = %saved.game_name, player = %player.name, "new game created");

        self.console.clear()?;
        self.console.say(&saved)?;
        self.console.say(&player)?;
        Ok((saved, player, provider))
    }

    fn existing_game(&mut self) -> Result<Option<(SavedGame, Combatant, Box<dyn ContentProvider>)>> {
        let names = self.store.list_games().context("failed to list saved games")?;
        if names.is_empty() {
            self.console.say("There are no saved games.")?;
            return Ok(None);
        }

        self.console.list("Below is a list of saved games:", &names)?;
        let game_name = self.console.ask_until(
            "Enter the name of the game you want to play: ",
            "Sorry, invalid input! Enter the name of the game you want to play: ",
            |answer| names.iter().find(|name| name.as_str() == answer).cloned(),
        )?;

        let (saved, player) = self
            .store
            .load(&game_name)
            .with_context(|| format!("failed to load game {game_name:?}"))?;
        let provider = (self.factory)(&saved.generation).context("failed to start content provider")?;

        self.console.clear()?;
        self.console.say(&saved)?;
        self.console.say(&player)?;
        Ok(Some((saved, player, provider)))
    }

    fn ask_generation_config(&mut self) -> Result<GenerationConfig> {
        let config = GenerationConfig {
            temperature: self.ask_number("Enter temperature (between 0 and 1): ", |v: &f64| {
                (0.0..=1.0).contains(v)
            })?,
            top_p: self.ask_number("Enter top P (between 0 and 1): ", |v: &f64| (0.0..=1.0).contains(v))?,
            top_k: self.ask_number("Enter top K (at least 1): ", |v: &u32| *v >= 1)?,
            max_output_tokens: self.ask_number("Enter max output tokens (at least 1): ", |v: &u32| {
                *v >= 1
            })?,
        };
        config.validate()?;
        Ok(config)
    }

    fn ask_number<T: FromStr>(&mut self, prompt: &str, accept: impl Fn(&T) -> bool) -> io::Result<T> {
        self.console.ask_until(prompt, &format!("{RETRY}{prompt}"), |answer| {
            answer.trim().parse().ok().filter(|value| accept(value))
        })
    }

    fn ask_new_game_name(&mut self) -> Result<String> {
        let prompt = "Enter the name of your new game: ";
        let mut answer = self.console.ask(prompt)?;
        loop {
            let name = answer.trim().to_string();
            match self.store.exists(&name) {
                Ok(false) => return Ok(name),
                Ok(true) => {
                    let names = self.store.list_games().context("failed to list saved games")?;
                    self.console.list("Below is a list of saved games:", &names)?;
                    answer = self
                        .console
                        .ask("Sorry, that name is already taken! Enter the name of your new game: ")?;
                }
                Err(_) => {
                    answer = self.console.ask(&format!("{RETRY}{prompt}"))?;
                }
            }
        }
    }
}

/// Prints battle events as they happen
///
/// Hooks cannot fail, so the first write error is kept and returned by
/// [`ConsoleObserver::finish`].
pub struct ConsoleObserver<W> {
    output: W,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(output: W) -> Self {
        ConsoleObserver { output, error: None }
    }

    pub fn finish(self) -> io::Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn line(&mut self, text: impl std::fmt::Display) {
        if self.error.is_none() {
            if let Err(e) = writeln!(self.output, "{text}") {
                self.error = Some(e);
            }
        }
    }
}

impl<W: Write> BattleObserver for ConsoleObserver<W> {
    fn on_turn_start(&mut self, _turn: u64, side: Side, player: &Combatant, enemy: &Combatant) {
        self.line(player);
        self.line(enemy);
        let mover = match side {
            Side::Player => player,
            Side::Enemy => enemy,
        };
        self.line(format!("It is {}'s turn to move!", mover.name));
    }

    fn on_attack(&mut self, attacker: &Combatant, defender: &Combatant, result: &AttackResult) {
        if result.criticality.is_critical() {
            self.line("Critical hit!");
        }
        self.line(format!(
            "{} dealt {} damage on {}!",
            attacker.name, result.damage, defender.name
        ));
    }

    fn on_flee(&mut self, fleeing: &Combatant) {
        self.line(format!("{} fled!", fleeing.name));
    }

    fn on_battle_end(&mut self, outcome: BattleOutcome, player: &Combatant) {
        match outcome {
            BattleOutcome::PlayerDefeated => self.line(format!("{} was defeated!", player.name)),
            BattleOutcome::PlayerFled => {}
            BattleOutcome::EnemyDefeated | BattleOutcome::EnemyFled => {
                self.line(format!("{} won the battle!", player.name))
            }
        }
    }

    fn on_progression(&mut self, player: &Combatant, report: &ProgressionReport) {
        self.line(format!(
            "{} gained {} level(s) and is now level {}!",
            player.name, report.levels_gained, report.level_after
        ));
        self.line(player);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{BigDecimal, CombatChoice, Criticality, ScriptedProvider};
    use std::io::Cursor;

    type TestSession<'a> = Session<'a, Cursor<Vec<u8>>, Vec<u8>, Vec<u8>>;

    fn d(value: i64) -> BigDecimal {
        BigDecimal::from(value)
    }

    fn factory_once<'a>(provider: ScriptedProvider) -> ProviderFactory<'a> {
        let mut provider = Some(provider);
        Box::new(move |_: &GenerationConfig| {
            provider
                .take()
                .map(|p| Box::new(p) as Box<dyn ContentProvider>)
                .ok_or_else(|| anyhow::anyhow!("provider already taken"))
        })
    }

    fn session<'a>(
        input: &str,
        store: SaveStore,
        constants: &'a GameConstants,
        provider: ScriptedProvider,
    ) -> TestSession<'a> {
        let console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), false);
        Session::new(console, Vec::new(), store, constants, factory_once(provider))
    }

    fn save_hero(store: &SaveStore, game_name: &str) -> Combatant {
        let hero = Combatant::player("Hero", d(100), d(30), d(15)).unwrap();
        store
            .save(&SavedGame::new(game_name, GenerationConfig::default(), &hero))
            .unwrap();
        hero
    }

    fn text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn test_new_game_rolls_player_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::new(dir.path());
        save_hero(&store, "taken");
        let constants = GameConstants::default();
        let provider = ScriptedProvider::new().with_stats([d(120), d(30), d(15)]);
        let input = "nope\nNEW GAME\n2\n0.5\n1\n0\n2\n100\ntaken\nrun1\nAda\nN\n";

        let mut session = session(input, store.clone(), &constants, provider);
        assert_eq!(session.run().unwrap(), 0);

        let (saved, player) = store.load("run1").unwrap();
        assert_eq!(saved.generation.temperature, 0.5);
        assert_eq!(saved.generation.top_k, 2);
        assert_eq!(player.name, "Ada");
        assert_eq!(player.stats.max_hp, d(120));
        assert_eq!(player.level(), 1);

        let out = text(&session.console_output());
        assert!(out.contains("Sorry, invalid input! What do you want to do? "));
        assert!(out.contains("Sorry, invalid input! Enter temperature"));
        assert!(out.contains("Sorry, invalid input! Enter top K"));
        assert!(out.contains("1. taken"));
        assert!(out.contains("Sorry, that name is already taken!"));
        assert!(out.contains("RUN1"));
    }

    #[test]
    fn test_no_saved_games_exits_with_one() {
        let dir = tempfile::tempdir().unwrap();
        let constants = GameConstants::default();
        let mut session = session(
            "PLAY EXISTING GAME\n",
            SaveStore::new(dir.path()),
            &constants,
            ScriptedProvider::new(),
        );

        assert_eq!(session.run().unwrap(), 1);
        assert!(text(&session.console_output()).contains("There are no saved games."));
    }

    #[test]
    fn test_existing_game_battle_levels_up_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::new(dir.path());
        save_hero(&store, "run1");
        let constants = GameConstants::default();
        let provider = ScriptedProvider::new()
            .with_stats([d(100), d(30), d(15)])
            .with_names(["Slime"])
            .with_criticals([Criticality::Normal, Criticality::Critical, Criticality::Critical])
            .with_choices([CombatChoice::Attack, CombatChoice::Flee])
            .with_level_ups([1]);
        let input = "PLAY EXISTING GAME\nrun2\nrun1\nY\nATTACK\nATTACK\nno\n";

        let mut session = session(input, store.clone(), &constants, provider);
        assert_eq!(session.run().unwrap(), 0);

        let (_, player) = store.load("run1").unwrap();
        assert_eq!(player.level(), 2);
        assert_eq!(player.stats.max_hp, d(200));
        assert_eq!(player.stats.current_hp, d(200));

        let narration = text(&session.narration);
        assert!(narration.contains("It is Hero's turn to move!"));
        assert!(narration.contains("Hero dealt 15 damage on Slime!"));
        assert!(narration.contains("Critical hit!"));
        assert!(narration.contains("Slime dealt 45 damage on Hero!"));
        assert!(narration.contains("Slime fled!"));
        assert!(narration.contains("Hero won the battle!"));
        assert!(narration.contains("is now level 2!"));
    }

    #[test]
    fn test_provider_failure_restores_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::new(dir.path());
        let hero = save_hero(&store, "run1");
        let constants = GameConstants::default();
        let input = "PLAY EXISTING GAME\nrun1\nY\nN\n";

        let mut session = session(input, store.clone(), &constants, ScriptedProvider::new());
        assert_eq!(session.run().unwrap(), 0);

        assert!(text(&session.console_output()).contains("The battle was interrupted"));
        let (_, player) = store.load("run1").unwrap();
        assert_eq!(player, hero);
    }

    #[test]
    fn test_input_closed_mid_battle_saves_then_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::new(dir.path());
        let hero = save_hero(&store, "run1");
        let constants = GameConstants::default();
        let provider = ScriptedProvider::new()
            .with_stats([d(100), d(30), d(15)])
            .with_names(["Slime"])
            .with_criticals([Criticality::Normal, Criticality::Normal])
            .with_choices([CombatChoice::Attack]);
        let input = "PLAY EXISTING GAME\nrun1\nY\nATTACK\n";

        let mut session = session(input, store.clone(), &constants, provider);
        assert!(session.run().is_err());

        let (_, player) = store.load("run1").unwrap();
        assert_eq!(player.stats.current_hp, hero.stats.max_hp);
    }

    #[test]
    fn test_player_defeat_is_announced() {
        let mut observer = ConsoleObserver::new(Vec::new());
        let hero = Combatant::player("Hero", d(1), d(1), d(1)).unwrap();
        observer.on_battle_end(BattleOutcome::PlayerDefeated, &hero);
        observer.on_battle_end(BattleOutcome::PlayerFled, &hero);
        assert_eq!(text(&observer.output), "Hero was defeated!\n");
        assert!(observer.finish().is_ok());
    }

    impl TestSession<'_> {
        fn console_output(&self) -> Vec<u8> {
            self.console.output().clone()
        }
    }
}
