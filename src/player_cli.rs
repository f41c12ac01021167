#![cfg(feature = "std")]

use std::fmt;
use std::io::{self, BufRead, ErrorKind, Stdout, StdinLock, Write};

use crate::{
    common::{Coordinate, ShotError},
    player::TargetSource,
};

/// Why a line of input was not a coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    WrongArity(usize),
    NotANumber,
    /// Digits only, but too large to be a board coordinate.
    OutOfRange,
    /// The line was not valid UTF-8.
    Unreadable,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::WrongArity(_) => write!(f, "Enter 2 coordinates"),
            InputError::NotANumber => write!(f, "Coordinates must be numbers"),
            InputError::OutOfRange => write!(f, "Coordinates are too large"),
            InputError::Unreadable => write!(f, "Input could not be read as text"),
        }
    }
}

/// Parse `"row column"`, both 1-based, into a 0-based coordinate.
///
/// Zero parses to `-1`, which the board refuses as out of bounds.
pub fn parse_coord(input: &str) -> Result<Coordinate, InputError> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(InputError::WrongArity(parts.len()));
    }
    let mut nums = [0i32; 2];
    for (slot, part) in nums.iter_mut().zip(&parts) {
        if !part.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(InputError::NotANumber);
        }
        *slot = part.parse().map_err(|_| InputError::OutOfRange)?;
    }
    Ok(Coordinate::new(nums[0] - 1, nums[1] - 1))
}

/// Reads shots typed on a console.
pub struct ConsoleSource<R, W> {
    input: R,
    output: W,
}

impl ConsoleSource<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleSource<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> TargetSource for ConsoleSource<R, W> {
    fn next_target(&mut self) -> Option<Coordinate> {
        loop {
            let _ = write!(self.output, "Enter shot coordinates:\t");
            let _ = self.output.flush();
            let mut raw = Vec::new();
            match self.input.read_until(b'\n', &mut raw) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    log::warn!("unreadable input: {}", e);
                    let _ = writeln!(self.output, "{}", InputError::Unreadable);
                    continue;
                }
                Err(e) => {
                    log::warn!("input closed: {}", e);
                    return None;
                }
            }
            let Ok(line) = String::from_utf8(raw) else {
                log::warn!("input line is not valid UTF-8");
                let _ = writeln!(self.output, "{}", InputError::Unreadable);
                continue;
            };
            match parse_coord(&line) {
                Ok(c) => return Some(c),
                Err(e) => {
                    log::warn!("unparsable input {:?}: {}", line.trim(), e);
                    let _ = writeln!(self.output, "{}", e);
                }
            }
        }
    }

    fn rejected(&mut self, _coord: Coordinate, error: ShotError) {
        let _ = writeln!(self.output, "Try again: {}", error);
    }
}
