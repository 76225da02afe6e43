//! Console front end: a line-oriented command interpreter over [`Game`].
//!
//! Commands are whitespace separated:
//!
//! | command            | effect                                         |
//! |--------------------|------------------------------------------------|
//! | `take_field x y`   | select a field and list its units              |
//! | `show_unit`        | list units on the selected field               |
//! | `take_unit idx`    | select the idx-th unit on the selected field   |
//! | `move_unit x y`    | move the selected unit                         |
//! | `speed_up_unit`    | speed up the selected unit                     |
//! | `buy_unit`         | buy a unit for the current player              |
//! | `next_turn`        | end the turn                                   |
//! | `players`          | show every player's ledger                     |
//! | `board`            | show the board                                 |
//! | `help`, `quit`     |                                                |
//!
//! The interpreter only holds ids and coordinates between commands; all
//! state lives in the [`Game`].

use std::io::{self, BufRead, Write};

use crate::error::ConsoleError;
use crate::game::{Coord, Game, UnitId};
use crate::render::{render_players_text, render_text};

const HELP: &str = "\
commands:
  take_field x y   select a field
  show_unit        list units on the selected field
  take_unit idx    select a unit on the selected field
  move_unit x y    move the selected unit
  speed_up_unit    speed up the selected unit
  buy_unit         buy a unit at your base
  next_turn        end your turn
  players          show resources
  board            show the board
  quit             leave the game";

/// Result of one console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text to show the user.
    Output(String),
    /// The user asked to leave.
    Quit,
}

/// Interprets console commands against a game.
#[derive(Debug)]
pub struct ConsoleController {
    game: Game,
    field_pos: Option<Coord>,
    unit_id: Option<UnitId>,
}

impl ConsoleController {
    /// Wrap a game.
    #[must_use]
    pub fn new(game: Game) -> Self {
        Self {
            game,
            field_pos: None,
            unit_id: None,
        }
    }

    /// The game being played.
    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Take the game back.
    #[must_use]
    pub fn into_game(self) -> Game {
        self.game
    }

    /// Currently selected field.
    #[must_use]
    pub fn selected_field(&self) -> Option<Coord> {
        self.field_pos
    }

    /// Currently selected unit.
    #[must_use]
    pub fn selected_unit(&self) -> Option<UnitId> {
        self.unit_id
    }

    /// Interpret one line.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown commands and missing or malformed
    /// arguments. Rejected game commands are not errors; they are reported
    /// in the reply text.
    pub fn execute(&mut self, line: &str) -> Result<Reply, ConsoleError> {
        let mut tokens = line.split_whitespace();
        let Some(command) = tokens.next() else {
            return Ok(Reply::Output(String::new()));
        };

        let text = match command {
            "take_field" => {
                let pos = parse_coord(&mut tokens, "take_field")?;
                let mut text = self.take_field(pos);
                text.push('\n');
                text.push_str(&self.show_units());
                text
            }
            "show_unit" => self.show_units(),
            "take_unit" => {
                let idx = parse_number(&mut tokens, "take_unit", "a unit index")?;
                self.take_unit(idx)
            }
            "move_unit" => {
                let pos = parse_coord(&mut tokens, "move_unit")?;
                self.move_unit(pos)
            }
            "speed_up_unit" => self.speed_up(),
            "buy_unit" => match self.game.buy_unit() {
                Ok(id) => format!("bought unit {id}"),
                Err(err) => format!("buying failed: {err}"),
            },
            "next_turn" => self.next_turn(),
            "players" => render_players_text(&self.game),
            "board" => render_text(&self.game),
            "help" => HELP.to_string(),
            "quit" | "exit" => return Ok(Reply::Quit),
            other => return Err(ConsoleError::UnknownCommand(other.to_string())),
        };

        Ok(Reply::Output(text))
    }

    fn take_field(&mut self, pos: Coord) -> String {
        self.field_pos = Some(pos);
        match self.game.field(pos) {
            Some(field) => {
                let title = &self.game.board().grounds().get(field.field_type()).title;
                format!(
                    "taken field {pos}: {title}, durability={}",
                    field.durability()
                )
            }
            None => format!("taken field {pos}: none"),
        }
    }

    fn show_units(&self) -> String {
        let units = self
            .field_pos
            .map(|pos| self.game.units_on_field(pos))
            .unwrap_or_default();
        if units.is_empty() {
            return "units: none".to_string();
        }

        let lines: Vec<String> = units
            .iter()
            .enumerate()
            .map(|(idx, unit)| format!("  [{idx}] {unit}"))
            .collect();
        format!("units:\n{}", lines.join("\n"))
    }

    fn take_unit(&mut self, idx: usize) -> String {
        let units = self
            .field_pos
            .map(|pos| self.game.units_on_field(pos))
            .unwrap_or_default();
        match units.get(idx) {
            Some(unit) => {
                self.unit_id = Some(unit.id());
                format!("taken {unit}")
            }
            None => "taken none".to_string(),
        }
    }

    fn move_unit(&mut self, pos: Coord) -> String {
        let Some(id) = self.unit_id else {
            return "not moved: no unit selected".to_string();
        };
        match self.game.move_unit(id, pos) {
            Ok(()) => match self.game.unit(id) {
                Some(unit) => format!("{unit} moved to {pos}"),
                None => format!("unit {id} moved to {pos}"),
            },
            Err(err) => format!("not moved: {err}"),
        }
    }

    fn speed_up(&mut self) -> String {
        let Some(id) = self.unit_id else {
            return "speed up failed: no unit selected".to_string();
        };
        match self.game.speed_up_unit(id) {
            Ok(()) => format!("sped up unit {id}"),
            Err(err) => format!("speed up failed: {err}"),
        }
    }

    fn next_turn(&mut self) -> String {
        let update = self.game.next_turn();
        let player = self.game.current_player();
        let mut text = format!(
            "turn {}, player {} ({}) harvested {}",
            self.game.turn_number(),
            player.id,
            player.name,
            update.harvested
        );

        if self.game.is_game_over() {
            let ranking: Vec<String> = self
                .game
                .standings()
                .iter()
                .enumerate()
                .map(|(place, s)| format!("  {}. {}: {} diamonds", place + 1, s.name, s.diamonds))
                .collect();
            text.push_str("\ngame over\n");
            text.push_str(&ranking.join("\n"));
        }
        text
    }
}

fn parse_number<'a, T: std::str::FromStr>(
    tokens: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    expected: &'static str,
) -> Result<T, ConsoleError> {
    let token = tokens
        .next()
        .ok_or(ConsoleError::MissingArgument { command, expected })?;
    token
        .parse()
        .map_err(|_| ConsoleError::BadNumber(token.to_string()))
}

fn parse_coord<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<Coord, ConsoleError> {
    let x = parse_number(tokens, command, "x and y coordinates")?;
    let y = parse_number(tokens, command, "x and y coordinates")?;
    Ok(Coord::new(x, y))
}

/// An interactive console game from start to finish.
#[derive(Debug)]
pub struct Session {
    controller: ConsoleController,
    commands: u64,
}

impl Session {
    /// Start a session for a freshly created game.
    #[must_use]
    pub fn new(game: Game) -> Self {
        log::info!(
            "session started with {} players",
            game.players().len()
        );
        Self {
            controller: ConsoleController::new(game),
            commands: 0,
        }
    }

    /// Read commands from `input` until `quit`, end of input, or game over,
    /// writing replies to `output`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> io::Result<()> {
        writeln!(output, "{}", render_text(self.controller.game()))?;
        write!(output, "> ")?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            self.commands += 1;

            match self.controller.execute(&line) {
                Ok(Reply::Quit) => break,
                Ok(Reply::Output(text)) if text.is_empty() => {}
                Ok(Reply::Output(text)) => writeln!(output, "{text}")?,
                Err(err) => {
                    log::debug!("bad console input {line:?}: {err}");
                    writeln!(output, "error: {err}")?;
                }
            }

            if self.controller.game().is_game_over() {
                break;
            }
            write!(output, "> ")?;
            output.flush()?;
        }

        Ok(())
    }

    /// End the session and hand back the final game.
    #[must_use]
    pub fn shutdown(self) -> Game {
        let game = self.controller.into_game();
        log::info!(
            "session ended after {} commands at turn {}",
            self.commands,
            game.turn_number()
        );
        game
    }
}
