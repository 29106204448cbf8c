//! High-level motion commands and their reduction to wheel speeds.

use std::fmt;
use std::str::{FromStr, SplitWhitespace};

use finch_kinematics::{ChassisSpeeds, DifferentialDrive, WheelSpeeds};

use crate::error::{ParseCommandError, ScriptError};

/// Direction of a straight move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Drive towards the current heading.
    Forward,
    /// Drive away from the current heading.
    Backward,
}

impl Move {
    /// `+1` forward, `-1` backward.
    pub fn sign(self) -> f64 {
        match self {
            Move::Forward => 1.0,
            Move::Backward => -1.0,
        }
    }
}

impl FromStr for Move {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "f" | "forward" => Ok(Move::Forward),
            "b" | "backward" => Ok(Move::Backward),
            _ => Err(ParseCommandError::Direction {
                expected: "forward/F or backward/B",
                found: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Move::Forward => "forward",
            Move::Backward => "backward",
        })
    }
}

/// Direction of an in-place turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// Counter-clockwise.
    Left,
    /// Clockwise.
    Right,
}

impl Turn {
    /// `+1` left, `-1` right.
    pub fn sign(self) -> f64 {
        match self {
            Turn::Left => 1.0,
            Turn::Right => -1.0,
        }
    }
}

impl FromStr for Turn {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "l" | "left" => Ok(Turn::Left),
            "r" | "right" => Ok(Turn::Right),
            _ => Err(ParseCommandError::Direction {
                expected: "left/L or right/R",
                found: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Turn::Left => "left",
            Turn::Right => "right",
        })
    }
}

/// Wheel speeds held for a duration: the unit of work handed to the integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelCommand {
    /// Speeds of both wheels (cm/s).
    pub speeds: WheelSpeeds,
    /// How long to hold them (s).
    pub duration: f64,
}

/// Reduces a straight move to wheel speeds.
///
/// Returns `None` when `speed` is zero, since no duration can be derived.
pub fn plan_move(direction: Move, distance_cm: f64, speed_cm_s: f64) -> Option<WheelCommand> {
    let distance = distance_cm * direction.sign();
    let speed = speed_cm_s.abs();
    if !(speed > 0.0) {
        return None;
    }
    let signed = if distance >= 0.0 { speed } else { -speed };
    Some(WheelCommand {
        speeds: WheelSpeeds::new(signed, signed),
        duration: distance.abs() / speed,
    })
}

/// Reduces a turn to equal and opposite wheel speeds, i.e. a pivot in place.
///
/// Returns `None` when `deg_per_s` is zero.
pub fn plan_turn(
    drive: &DifferentialDrive,
    direction: Turn,
    degrees: f64,
    deg_per_s: f64,
) -> Option<WheelCommand> {
    let degrees = degrees * direction.sign();
    let rate = deg_per_s.abs();
    if !(rate > 0.0) {
        return None;
    }
    let omega = if degrees >= 0.0 {
        rate.to_radians()
    } else {
        -rate.to_radians()
    };
    Some(WheelCommand {
        speeds: drive.inverse_kinematics(ChassisSpeeds::new(0.0, omega)),
        duration: degrees.to_radians().abs() / omega.abs(),
    })
}

/// One line of a drawing script.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// `move <direction> <distance_cm> <speed_cm_s>`
    Move {
        /// Forward or backward.
        direction: Move,
        /// Distance (cm).
        distance: f64,
        /// Speed (cm/s).
        speed: f64,
    },
    /// `turn <direction> <degrees> <deg_per_s>`
    Turn {
        /// Left or right.
        direction: Turn,
        /// Angle (deg).
        degrees: f64,
        /// Angular speed (deg/s).
        rate: f64,
    },
    /// `wheels <left_cm_s> <right_cm_s> [duration_s]`
    Wheels {
        /// Left wheel speed (cm/s).
        left: f64,
        /// Right wheel speed (cm/s).
        right: f64,
        /// Hold time (s); absent means do nothing.
        duration: Option<f64>,
    },
    /// `stop`
    Stop,
}

fn direction<T>(args: &mut SplitWhitespace<'_>) -> Result<T, ParseCommandError>
where
    T: FromStr<Err = ParseCommandError>,
{
    args.next()
        .ok_or(ParseCommandError::MissingArgument("direction"))?
        .parse()
}

fn parse_number(raw: &str, name: &'static str) -> Result<f64, ParseCommandError> {
    raw.parse().map_err(|_| ParseCommandError::InvalidNumber {
        name,
        value: raw.to_string(),
    })
}

fn number(args: &mut SplitWhitespace<'_>, name: &'static str) -> Result<f64, ParseCommandError> {
    let raw = args.next().ok_or(ParseCommandError::MissingArgument(name))?;
    parse_number(raw, name)
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut args = s.split_whitespace();
        let keyword = args.next().ok_or(ParseCommandError::Empty)?;

        let command = match keyword.to_ascii_lowercase().as_str() {
            "move" => Command::Move {
                direction: direction(&mut args)?,
                distance: number(&mut args, "distance")?,
                speed: number(&mut args, "speed")?,
            },
            "turn" => Command::Turn {
                direction: direction(&mut args)?,
                degrees: number(&mut args, "degrees")?,
                rate: number(&mut args, "angular speed")?,
            },
            "wheels" => Command::Wheels {
                left: number(&mut args, "left speed")?,
                right: number(&mut args, "right speed")?,
                duration: args
                    .next()
                    .map(|raw| parse_number(raw, "duration"))
                    .transpose()?,
            },
            "stop" => Command::Stop,
            _ => return Err(ParseCommandError::UnknownCommand(keyword.to_string())),
        };

        match args.next() {
            Some(extra) => Err(ParseCommandError::TrailingArgument(extra.to_string())),
            None => Ok(command),
        }
    }
}

/// Parses a script: one command per line, `#` starts a comment.
pub fn parse_script(source: &str) -> Result<Vec<Command>, ScriptError> {
    source
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let text = line.split('#').next().unwrap_or("").trim();
            (!text.is_empty()).then_some((i + 1, text))
        })
        .map(|(line, text)| {
            text.parse::<Command>()
                .map_err(|source| ScriptError { line, source })
        })
        .collect()
}
