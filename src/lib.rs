#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod ai;
mod bitboard;
mod board;
mod common;
mod config;
mod fleet;
mod game;
#[cfg(feature = "std")]
mod logging;
mod player;
#[cfg(feature = "std")]
mod player_cli;
mod ship;
#[cfg(feature = "std")]
mod ui;

pub use ai::{hunt, select_target, TargetingMode};
pub use bitboard::{BitBoard, BitBoardError};
pub use board::*;
pub use common::*;
pub use config::*;
pub use fleet::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
pub use player::*;
#[cfg(feature = "std")]
pub use player_cli::*;
pub use ship::*;
#[cfg(feature = "std")]
pub use ui::*;
