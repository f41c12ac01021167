//! Game configuration: board size, fleet composition and generation limits.

use alloc::vec::Vec;
use core::fmt;

pub const BOARD_SIZE: usize = 6;
/// One three-decker, two two-deckers and four single-deckers.
pub const SHIP_LENGTHS: [usize; 7] = [3, 2, 2, 1, 1, 1, 1];
/// Placement attempts allowed across the whole fleet before the board is
/// discarded.
pub const ATTEMPT_BUDGET: usize = 2000;
pub const MAX_BOARD_RESTARTS: usize = 100;
/// Pause before computer shots in an interactive game when the settings
/// leave it unset.
pub const INTERACTIVE_AI_DELAY_MS: u64 = 2000;

/// Errors returned by [`GameConfig::validate`] and config loading.
#[derive(Debug)]
pub enum ConfigError {
    ZeroSize,
    EmptyFleet,
    ZeroLengthShip,
    ShipTooLong { length: usize, size: usize },
    FleetTooLarge { cells: usize, size: usize },
    ZeroAttemptBudget,
    #[cfg(feature = "std")]
    Io(std::io::Error),
    #[cfg(feature = "std")]
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroSize => write!(f, "board size must be at least 1"),
            ConfigError::EmptyFleet => write!(f, "fleet must contain at least one ship"),
            ConfigError::ZeroLengthShip => write!(f, "ship lengths must be at least 1"),
            ConfigError::ShipTooLong { length, size } => {
                write!(f, "ship of length {} does not fit a {}x{} board", length, size, size)
            }
            ConfigError::FleetTooLarge { cells, size } => {
                write!(f, "fleet of {} cells cannot fit a {}x{} board", cells, size, size)
            }
            ConfigError::ZeroAttemptBudget => write!(f, "attempt budget must be at least 1"),
            #[cfg(feature = "std")]
            ConfigError::Io(e) => write!(f, "cannot read config: {}", e),
            #[cfg(feature = "std")]
            ConfigError::Parse(e) => write!(f, "invalid config: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Settings shared by both sides of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct GameConfig {
    pub size: usize,
    /// Ship lengths in placement order.
    pub ship_lengths: Vec<usize>,
    pub attempt_budget: usize,
    pub max_board_restarts: usize,
    /// Pause before each automated shot, in milliseconds. `None` leaves the
    /// choice to the front end; see [`GameConfig::ai_delay_ms_or`].
    pub ai_delay_ms: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            size: BOARD_SIZE,
            ship_lengths: SHIP_LENGTHS.to_vec(),
            attempt_budget: ATTEMPT_BUDGET,
            max_board_restarts: MAX_BOARD_RESTARTS,
            ai_delay_ms: None,
        }
    }
}

impl GameConfig {
    /// Check the settings describe a playable game. A fleet that passes may
    /// still be too crowded to place; that is reported by fleet generation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if self.ship_lengths.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }
        if self.attempt_budget == 0 {
            return Err(ConfigError::ZeroAttemptBudget);
        }
        for &length in &self.ship_lengths {
            if length == 0 {
                return Err(ConfigError::ZeroLengthShip);
            }
            if length > self.size {
                return Err(ConfigError::ShipTooLong {
                    length,
                    size: self.size,
                });
            }
        }
        let cells = self.total_ship_cells();
        if cells > self.size * self.size {
            return Err(ConfigError::FleetTooLarge {
                cells,
                size: self.size,
            });
        }
        Ok(())
    }

    /// The configured pause, or `default` when none was set.
    pub fn ai_delay_ms_or(&self, default: u64) -> u64 {
        self.ai_delay_ms.unwrap_or(default)
    }

    /// Total number of ship cells in the fleet.
    pub fn total_ship_cells(&self) -> usize {
        self.ship_lengths.iter().sum()
    }

    /// Load settings from a JSON file. Missing fields take their defaults.
    #[cfg(feature = "std")]
    pub fn from_json_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json_str(&text)
    }

    #[cfg(feature = "std")]
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }
}
