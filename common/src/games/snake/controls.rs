use std::str::FromStr;

use super::types::Direction;

const NO_WIDTH_WHITESPACE: &str = "\u{200B}";

/// A button attached to the game message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlToken {
    Up,
    Left,
    Right,
    Down,
    NoOp,
}

pub type ControlLayout = [[ControlToken; 3]; 3];

/// Arrow pad with inert fillers so the arrows line up as a cross.
pub const CONTROL_LAYOUT: ControlLayout = [
    [ControlToken::NoOp, ControlToken::Up, ControlToken::NoOp],
    [ControlToken::Left, ControlToken::NoOp, ControlToken::Right],
    [ControlToken::NoOp, ControlToken::Down, ControlToken::NoOp],
];

impl ControlToken {
    pub const ALL: [ControlToken; 5] = [
        ControlToken::Up,
        ControlToken::Left,
        ControlToken::Right,
        ControlToken::Down,
        ControlToken::NoOp,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ControlToken::Up => "up",
            ControlToken::Left => "left",
            ControlToken::Right => "right",
            ControlToken::Down => "down",
            ControlToken::NoOp => "noop",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ControlToken::Up => "⬆",
            ControlToken::Left => "⬅",
            ControlToken::Right => "➡",
            ControlToken::Down => "⬇",
            ControlToken::NoOp => NO_WIDTH_WHITESPACE,
        }
    }

    /// `None` for the filler buttons, which leave the facing alone.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            ControlToken::Up => Some(Direction::Up),
            ControlToken::Left => Some(Direction::Left),
            ControlToken::Right => Some(Direction::Right),
            ControlToken::Down => Some(Direction::Down),
            ControlToken::NoOp => None,
        }
    }
}

impl FromStr for ControlToken {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ControlToken::ALL
            .into_iter()
            .find(|token| token.id() == s || token.label() == s)
            .ok_or_else(|| s.to_string())
    }
}
