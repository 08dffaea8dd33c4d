//! Scripted editing gestures
//!
//! Stand-in for map clicks when driving the editor from the command line:
//!
//! ```text
//! # corners of the north field
//! add -22.9010 -47.0620
//! add -22.9010 -47.0580
//! remove 2
//! clear
//! ```

use crate::domain::GeoPoint;
use crate::editor::AddOutcome;
use crate::render::{EditorSession, MapSurface};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// Click on the map
    Add(GeoPoint),
    /// Remove the pin carrying this display number
    Remove(u32),
    Clear,
}

#[derive(Debug, Error, PartialEq)]
pub enum GestureError {
    #[error("line {line}: unknown gesture {command:?}")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: {command} expects {expected} argument(s), got {got}")]
    WrongArity {
        line: usize,
        command: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("line {line}: invalid number {value:?}")]
    InvalidNumber { line: usize, value: String },
}

/// Parse a gesture script. Blank lines and `#` comments are ignored.
pub fn parse_gestures(input: &str) -> Result<Vec<Gesture>, GestureError> {
    let mut gestures = Vec::new();

    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        let mut words = content.split_whitespace();
        let command = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();

        let gesture = match command.to_ascii_lowercase().as_str() {
            "add" => {
                expect_arity(line, "add", 2, &args)?;
                let lat = parse_f64(line, args[0])?;
                let lon = parse_f64(line, args[1])?;
                Gesture::Add(GeoPoint::new(lat, lon))
            }
            "remove" => {
                expect_arity(line, "remove", 1, &args)?;
                let number = args[0].parse().map_err(|_| GestureError::InvalidNumber {
                    line,
                    value: args[0].to_string(),
                })?;
                Gesture::Remove(number)
            }
            "clear" => {
                expect_arity(line, "clear", 0, &args)?;
                Gesture::Clear
            }
            _ => {
                return Err(GestureError::UnknownCommand {
                    line,
                    command: command.to_string(),
                });
            }
        };
        gestures.push(gesture);
    }

    Ok(gestures)
}

fn expect_arity(
    line: usize,
    command: &'static str,
    expected: usize,
    args: &[&str],
) -> Result<(), GestureError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(GestureError::WrongArity {
            line,
            command,
            expected,
            got: args.len(),
        })
    }
}

fn parse_f64(line: usize, value: &str) -> Result<f64, GestureError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| GestureError::InvalidNumber {
            line,
            value: value.to_string(),
        })
}

/// Parse `LAT,LON` as given on the command line
pub fn parse_point_arg(s: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON but got {:?}", s))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude {:?}", lat))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude {:?}", lon))?;
    Ok(GeoPoint::new(lat, lon))
}

impl Gesture {
    /// Apply to a session, returning a one-line description of the effect
    pub fn apply<S: MapSurface>(&self, session: &mut EditorSession<S>) -> String {
        match self {
            Gesture::Add(point) => match session.add_point(*point) {
                AddOutcome::Added { id, pruned } => {
                    let number = session
                        .editor()
                        .pin(id)
                        .map(|pin| pin.number.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    if pruned.is_empty() {
                        format!("placed #{} at ({}, {})", number, point.lat, point.lon)
                    } else {
                        format!(
                            "placed #{} at ({}, {}), pruned {} pin(s)",
                            number,
                            point.lat,
                            point.lon,
                            pruned.len()
                        )
                    }
                }
                AddOutcome::InsideBoundary => {
                    format!("ignored ({}, {}): inside boundary", point.lat, point.lon)
                }
                AddOutcome::InvalidCoordinate => "ignored invalid coordinate".to_string(),
            },
            Gesture::Remove(number) => {
                let id = session.editor().pin_by_number(*number).map(|pin| pin.id);
                match id.and_then(|id| session.remove_point(id)) {
                    Some(_) => format!("removed #{}", number),
                    None => format!("no pin #{}", number),
                }
            }
            Gesture::Clear => {
                session.clear();
                "cleared".to_string()
            }
        }
    }
}
