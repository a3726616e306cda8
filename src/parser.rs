use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::board::Board;
use crate::data::{MapCell, Pos};
use crate::level::Level;
use crate::solver::SolverErr;

const MAX_SIZE: usize = u16::max_value() as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErr {
    Pos(usize, usize),
    TooLarge,
    MultiplePlayers,
    NoPlayer,
    Board(SolverErr),
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::Pos(r, c) => write!(f, "Invalid cell at pos: [{}, {}]", r, c),
            ParserErr::TooLarge => write!(f, "Map larger than 65535 rows/columns"),
            ParserErr::MultiplePlayers => write!(f, "More than one player"),
            ParserErr::NoPlayer => write!(f, "No player"),
            ParserErr::Board(ref err) => write!(f, "Invalid board: {}", err),
        }
    }
}

impl Error for ParserErr {}

impl From<SolverErr> for ParserErr {
    fn from(err: SolverErr) -> Self {
        ParserErr::Board(err)
    }
}

impl FromStr for Level {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parses (a subset of) the format described [here](http://www.sokobano.de/wiki/index.php?title=Level_format)
pub(crate) fn parse(level: &str) -> Result<Level, ParserErr> {
    // trim so we can specify levels using raw strings more easily,
    // trailing spaces are kept, they're floor on the edge of the grid
    let level = level.trim_matches('\n');

    let mut grid = Vec::new();
    let mut boxes = Vec::new();
    let mut player_pos = None;

    for (r, line) in level.lines().enumerate() {
        if r >= MAX_SIZE {
            return Err(ParserErr::TooLarge);
        }
        let mut line_tiles = Vec::new();
        for (c, cur_char) in line.chars().enumerate() {
            if c >= MAX_SIZE {
                return Err(ParserErr::TooLarge);
            }
            let pos = Pos::new(r as u16, c as u16);

            let tile = match cur_char {
                '#' => MapCell::Wall,
                'p' | '@' => {
                    set_player(&mut player_pos, pos)?;
                    MapCell::Floor
                }
                'P' | '+' => {
                    set_player(&mut player_pos, pos)?;
                    MapCell::Goal
                }
                'b' | '$' => {
                    boxes.push(pos);
                    MapCell::Floor
                }
                'B' | '*' => {
                    boxes.push(pos);
                    MapCell::Goal
                }
                '.' => MapCell::Goal,
                ' ' | '-' | '_' => MapCell::Floor,
                _ => return Err(ParserErr::Pos(r, c)),
            };
            line_tiles.push(tile);
        }
        grid.push(line_tiles);
    }

    let player_pos = player_pos.ok_or(ParserErr::NoPlayer)?;
    let board = Board::new(&grid)?;
    Ok(Level::new(board, player_pos, boxes))
}

fn set_player(player_pos: &mut Option<Pos>, pos: Pos) -> Result<(), ParserErr> {
    if player_pos.is_some() {
        return Err(ParserErr::MultiplePlayers);
    }
    *player_pos = Some(pos);
    Ok(())
}
