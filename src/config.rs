use clap::ValueEnum;
use thiserror::Error;

/// Driver tick period in milliseconds. Move intervals are counted in these.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 10;

/// How long start commands are ignored after a round ends, so a key held
/// at the moment of impact does not restart immediately.
pub const ROUND_END_HOLD_MS: u64 = 1000;

/// Largest accepted map side; keeps the body arena bounded.
pub const MAX_MAP_SIZE: u16 = 255;

/// Smallest playable map side.
pub const MIN_MAP_SIZE: u16 = 2;

/// Game speed presets, expressed as ticks per move.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Ultra,
}

impl Difficulty {
    /// All presets in menu order.
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Ultra];

    /// Ticks between moves; smaller is faster.
    #[must_use]
    pub fn move_interval(self) -> u32 {
        match self {
            Self::Easy => 30,
            Self::Medium => 20,
            Self::Hard => 10,
            Self::Ultra => 5,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Ultra => "Ultra",
        }
    }
}

/// Map size presets, each paired with a starting snake length.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum MapPreset {
    Tiny,
    Small,
    Medium,
    Large,
}

impl MapPreset {
    /// All presets in menu order.
    pub const ALL: [Self; 4] = [Self::Tiny, Self::Small, Self::Medium, Self::Large];

    #[must_use]
    pub fn map_size(self) -> u16 {
        match self {
            Self::Tiny => 3,
            Self::Small => 5,
            Self::Medium => 10,
            Self::Large => 20,
        }
    }

    #[must_use]
    pub fn starting_length(self) -> u16 {
        match self {
            Self::Tiny => 2,
            Self::Small => 3,
            Self::Medium => 4,
            Self::Large => 5,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Tiny => "Tiny",
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }
}

/// Rejected session parameters.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("map size {0} is below the minimum of 2")]
    MapTooSmall(u16),
    #[error("map size {0} exceeds the maximum of 255")]
    MapTooLarge(u16),
    #[error("move interval must be at least one tick")]
    ZeroMoveInterval,
    #[error("starting length {length} must be between 1 and the map size {map_size}")]
    StartingLength { length: u16, map_size: u16 },
}

/// Resolved settings for one game session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfiguration {
    pub map_size: u16,
    pub move_interval: u32,
    pub starting_length: u16,
    pub sound_enabled: bool,
}

impl GameConfiguration {
    /// Resolves preset choices into concrete values.
    #[must_use]
    pub fn from_presets(difficulty: Difficulty, map: MapPreset, sound_enabled: bool) -> Self {
        Self {
            map_size: map.map_size(),
            move_interval: difficulty.move_interval(),
            starting_length: map.starting_length(),
            sound_enabled,
        }
    }

    /// Checks every precondition a session relies on.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.map_size < MIN_MAP_SIZE {
            return Err(ConfigurationError::MapTooSmall(self.map_size));
        }
        if self.map_size > MAX_MAP_SIZE {
            return Err(ConfigurationError::MapTooLarge(self.map_size));
        }
        if self.move_interval == 0 {
            return Err(ConfigurationError::ZeroMoveInterval);
        }
        if self.starting_length == 0 || self.starting_length > self.map_size {
            return Err(ConfigurationError::StartingLength {
                length: self.starting_length,
                map_size: self.map_size,
            });
        }

        Ok(())
    }

    /// Longest possible body: one segment per cell.
    #[must_use]
    pub fn max_length(&self) -> usize {
        usize::from(self.map_size) * usize::from(self.map_size)
    }
}

impl Default for GameConfiguration {
    fn default() -> Self {
        Self::from_presets(Difficulty::Medium, MapPreset::Medium, true)
    }
}
