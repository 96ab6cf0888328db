//! Line-based console prompts with re-prompting on invalid input

use battle_core::battle::{DecisionSource, TurnContext};
use battle_core::CombatChoice;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Reads answers from `input` and writes prompts to `output`
pub struct Console<R, W> {
    input: R,
    output: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, clear_screen: bool) -> Self {
        Console {
            input,
            output,
            clear_screen,
        }
    }

    pub fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Print a prompt and read one line, without the trailing newline
    pub fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Ask until `parse` accepts the answer, using `retry` for every re-prompt
    pub fn ask_until<T>(
        &mut self,
        prompt: &str,
        retry: &str,
        mut parse: impl FnMut(&str) -> Option<T>,
    ) -> io::Result<T> {
        let mut answer = self.ask(prompt)?;
        loop {
            if let Some(value) = parse(&answer) {
                return Ok(value);
            }
            answer = self.ask(retry)?;
        }
    }

    #[cfg(test)]
    pub(crate) fn output(&self) -> &W {
        &self.output
    }

    /// Print a numbered list of names
    pub fn list(&mut self, heading: &str, names: &[String]) -> io::Result<()> {
        self.say(heading)?;
        for (i, name) in names.iter().enumerate() {
            self.say(format!("{}. {}", i + 1, name))?;
        }
        Ok(())
    }
}

/// Player decisions typed at the console
pub struct ConsoleDecisions<'c, R, W> {
    console: &'c mut Console<R, W>,
}

impl<'c, R, W> ConsoleDecisions<'c, R, W> {
    pub fn new(console: &'c mut Console<R, W>) -> Self {
        ConsoleDecisions { console }
    }
}

impl<R: BufRead, W: Write> DecisionSource for ConsoleDecisions<'_, R, W> {
    fn choose(&mut self, _context: &TurnContext<'_>) -> io::Result<CombatChoice> {
        for choice in CombatChoice::all() {
            let verb = match choice {
                CombatChoice::Attack => "attack",
                CombatChoice::Flee => "flee",
            };
            self.console.say(format!("Enter '{choice}' to {verb}."))?;
        }
        self.console.ask_until(
            "What do you want to do? ",
            "Sorry, invalid input! What do you want to do? ",
            |answer| answer.parse().ok(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{BigDecimal, Combatant};
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), false)
    }

    fn output(console: &Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(&console.output).into_owned()
    }

    #[test]
    fn test_ask_trims_line_endings() {
        let mut console = console("hello\r\n");
        assert_eq!(console.ask("> ").unwrap(), "hello");
        assert_eq!(output(&console), "> ");
    }

    #[test]
    fn test_ask_until_reprompts() {
        let mut console = console("abc\n7\n");
        let value: u32 = console.ask_until("n? ", "again? ", |s| s.parse().ok()).unwrap();
        assert_eq!(value, 7);
        assert_eq!(output(&console), "n? again? ");
    }

    #[test]
    fn test_eof_is_error() {
        let mut console = console("");
        let err = console.ask("> ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_console_decisions_strict() {
        let mut console = console("attack\nRUN\nFLEE\n");
        let hero = Combatant::player("Hero", BigDecimal::from(1), BigDecimal::from(1), BigDecimal::from(1)).unwrap();
        let slime = Combatant::enemy("Slime", BigDecimal::from(1), BigDecimal::from(1), BigDecimal::from(1)).unwrap();
        let context = TurnContext {
            turn: 1,
            player: &hero,
            enemy: &slime,
        };

        let choice = ConsoleDecisions::new(&mut console).choose(&context).unwrap();

        assert_eq!(choice, CombatChoice::Flee);
        let text = output(&console);
        assert!(text.contains("Enter 'ATTACK' to attack."));
        assert!(text.contains("Enter 'FLEE' to flee."));
        assert_eq!(text.matches("Sorry, invalid input!").count(), 2);
    }
}
