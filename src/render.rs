//! Plain-text views of a game for the console front end.
//!
//! Output format:
//! ```text
//! === TURN 4 (player 0: Ada) ===
//!
//! BOARD (6x4):
//!      0   1   2   3   4   5
//!   0  s   o   .3  .   G   #
//!   1  ~   D   s   G1  o   s
//!  ...
//! Legend: . tunnel, s soil, o oil, D diamond, G gold, ~ lava, # stone; digits = units
//!
//! PLAYERS:
//! - Player 0 (Ada): diamond=0 gold=10 oil=0 [3 units] <- current
//! ```

use std::fmt::{self, Write};

use crate::game::{FieldType, Game};

/// Display adapter for the whole game: header, board and players.
#[derive(Debug, Clone, Copy)]
pub struct GameView<'a>(pub &'a Game);

impl fmt::Display for GameView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, self.0)?;
        write_board(f, self.0)?;
        write_players(f, self.0)
    }
}

/// Display adapter for the players' ledgers only.
#[derive(Debug, Clone, Copy)]
pub struct PlayersView<'a>(pub &'a Game);

impl fmt::Display for PlayersView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_players(f, self.0)
    }
}

/// Render the whole game: header, board and players.
#[must_use]
pub fn render_text(game: &Game) -> String {
    GameView(game).to_string()
}

/// Render every player's ledger.
#[must_use]
pub fn render_players_text(game: &Game) -> String {
    PlayersView(game).to_string()
}

fn write_header(out: &mut impl Write, game: &Game) -> fmt::Result {
    let player = game.current_player();
    writeln!(
        out,
        "=== TURN {} (player {}: {}) ===\n",
        game.turn_number(),
        player.id,
        player.name
    )
}

/// Board grid with column and row labels, then the legend.
fn write_board(out: &mut impl Write, game: &Game) -> fmt::Result {
    let board = game.board();
    writeln!(out, "BOARD ({}x{}):", board.width(), board.height())?;

    out.write_str("   ")?;
    for x in 0..board.width() {
        write!(out, "{x:>3} ")?;
    }
    out.write_char('\n')?;

    for (coord, field) in board.iter() {
        if coord.x == 0 {
            write!(out, "{:>3}", coord.y)?;
        }
        let units = match field.unit_count() {
            0 => ' ',
            n => char::from_digit(u32::try_from(n).unwrap_or(u32::MAX), 10).unwrap_or('+'),
        };
        write!(out, "  {}{units}", field.field_type().symbol())?;
        if coord.x + 1 == board.width() {
            out.write_char('\n')?;
        }
    }

    out.write_str("Legend:")?;
    for (i, ty) in FieldType::ALL.into_iter().enumerate() {
        let sep = if i == 0 { " " } else { ", " };
        let title = board.grounds().get(ty).title.to_lowercase();
        write!(out, "{sep}{} {title}", ty.symbol())?;
    }
    out.write_str("; digits = units\n\n")
}

fn write_players(out: &mut impl Write, game: &Game) -> fmt::Result {
    out.write_str("PLAYERS:\n")?;
    let current = game.current_player_id();
    for player in game.players() {
        let units = game.units(Some(player.id)).count();
        write!(out, "- {player} [{units} units]")?;
        if player.id == current {
            out.write_str(" <- current")?;
        }
        out.write_char('\n')?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_sections() {
        let game = Game::with_seed(&["Ada", "Bo"], (6, 5), 1).unwrap();
        let text = render_text(&game);

        assert!(text.starts_with("=== TURN 0 (player 0: Ada) ===\n"));
        assert!(text.contains("BOARD (6x5):"));
        assert!(text.contains("Legend: . tunnel, s soil"));
        assert!(text.contains("- Player 1 (Bo): diamond=0 gold=10 oil=0 [3 units]\n"));
        assert!(text.contains("[3 units] <- current"));
    }

    #[test]
    fn test_views_write_through_formatter() {
        let game = Game::with_seed(&["Ada", "Bo"], (6, 5), 1).unwrap();
        let players = format!("{}", PlayersView(&game));

        assert!(players.starts_with("PLAYERS:\n- Player 0 (Ada): "));
        assert!(render_text(&game).ends_with(&players));
        assert_eq!(format!("{}", GameView(&game)), render_text(&game));
    }

    #[test]
    fn test_render_board_rows() {
        let game = Game::with_seed(&["Ada"], (6, 5), 1).unwrap();
        let text = render_text(&game);
        let base = game.bases_coord()[0][0];

        let rows: Vec<&str> = text
            .lines()
            .skip_while(|l| !l.starts_with("BOARD"))
            .skip(2)
            .take(5)
            .collect();
        assert_eq!(rows.len(), 5);
        for row in &rows {
            assert_eq!(row.len(), 3 + 6 * 4);
        }
        // Base field shows a tunnel with three units
        assert!(rows[usize::from(base.y)].starts_with(&format!("{:>3}  .3", base.y)));
    }
}
