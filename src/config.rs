use std::ops::RangeInclusive;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coords::TileCoord;

pub const GAME_TITLE: &str = "Monster Miner";
pub const TILE_SIZE: u32 = 16;
pub const GRID_WIDTH: i32 = 32;
pub const GRID_HEIGHT: i32 = 24;
pub const TARGET_FPS: u32 = 60;
pub const FIXED_STEPS_PER_SECOND: u32 = 60;
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);
pub const SKY_ROWS: i32 = 3;
pub const BASE_ROW: i32 = 3;
pub const BASE_SPAN: RangeInclusive<i32> = 13..=18;
pub const SPAWN: TileCoord = TileCoord { x: 6, y: 2 };
pub const BAG_MAX: u32 = 10;
pub const MIN_ORE_TO_ENTER: u32 = 3;
pub const ORE_VALUE: u32 = 5;
pub const ORE_BASE_RATE: f32 = 0.05;
pub const ORE_DEPTH_FACTOR: f32 = 0.30;
pub const ORE_SCALE: f32 = 0.5;
pub const KEY_REPEAT_DELAY: Duration = Duration::from_millis(170);
pub const KEY_REPEAT_INTERVAL: Duration = Duration::from_millis(70);
pub const RNG_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Grid {width}x{height} is too small (need at least {min_width}x{min_height})")]
    GridTooSmall {
        width: i32,
        height: i32,
        min_width: i32,
        min_height: i32,
    },
    #[error("Grid {width}x{height} exceeds the {max}x{max} limit")]
    GridTooLarge { width: i32, height: i32, max: i32 },
    #[error("Tile size must be non-zero")]
    ZeroTileSize,
    #[error("Tile size {tile_size} exceeds {max}")]
    TileSizeTooLarge { tile_size: u32, max: u32 },
    #[error("Base span {start}..={end} must lie inside the interior of row {row}")]
    BaseSpanOutOfBounds { start: i32, end: i32, row: i32 },
    #[error("Spawn ({x},{y}) must be an empty sky cell")]
    SpawnOutsideSky { x: i32, y: i32 },
    #[error("Bag capacity must be at least 1")]
    ZeroBagCapacity,
    #[error("Entry threshold {min_ore} exceeds bag capacity {bag_max}")]
    ThresholdAboveCapacity { min_ore: u32, bag_max: u32 },
    #[error("Ore rate {name} = {value} is outside [0, 1]")]
    OreRateOutOfRange { name: &'static str, value: f32 },
    #[error("Fixed steps per second must be at least 1")]
    ZeroStepRate,
    #[error("Max frame delta must be non-zero")]
    ZeroFrameDelta,
    #[error("Key repeat interval must be non-zero")]
    ZeroRepeatInterval,
}

/// Tunables for one game session. `Default` matches the shipped game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub title: String,
    pub tile_size: u32,
    pub width: i32,
    pub height: i32,
    pub target_fps: u32,
    pub fixed_steps_per_second: u32,
    pub max_frame_delta: Duration,
    pub base_span: RangeInclusive<i32>,
    pub spawn: TileCoord,
    pub bag_max: u32,
    pub min_ore_to_enter: u32,
    pub ore_value: u32,
    pub ore_base_rate: f32,
    pub ore_depth_factor: f32,
    pub ore_scale: f32,
    pub key_repeat_delay: Duration,
    pub key_repeat_interval: Duration,
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: GAME_TITLE.to_string(),
            tile_size: TILE_SIZE,
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            target_fps: TARGET_FPS,
            fixed_steps_per_second: FIXED_STEPS_PER_SECOND,
            max_frame_delta: MAX_FRAME_DELTA,
            base_span: BASE_SPAN,
            spawn: SPAWN,
            bag_max: BAG_MAX,
            min_ore_to_enter: MIN_ORE_TO_ENTER,
            ore_value: ORE_VALUE,
            ore_base_rate: ORE_BASE_RATE,
            ore_depth_factor: ORE_DEPTH_FACTOR,
            ore_scale: ORE_SCALE,
            key_repeat_delay: KEY_REPEAT_DELAY,
            key_repeat_interval: KEY_REPEAT_INTERVAL,
            seed: RNG_SEED,
        }
    }
}

impl GameConfig {
    // Sky band, base row and at least one diggable row above the bottom rock.
    const MIN_WIDTH: i32 = 3;
    const MIN_HEIGHT: i32 = BASE_ROW + 3;
    // Keeps the window size well inside u32.
    const MAX_DIM: i32 = 1024;
    const MAX_TILE_SIZE: u32 = 256;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < Self::MIN_WIDTH || self.height < Self::MIN_HEIGHT {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
                min_width: Self::MIN_WIDTH,
                min_height: Self::MIN_HEIGHT,
            });
        }
        if self.width > Self::MAX_DIM || self.height > Self::MAX_DIM {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
                max: Self::MAX_DIM,
            });
        }
        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        if self.tile_size > Self::MAX_TILE_SIZE {
            return Err(ConfigError::TileSizeTooLarge {
                tile_size: self.tile_size,
                max: Self::MAX_TILE_SIZE,
            });
        }
        let (start, end) = (*self.base_span.start(), *self.base_span.end());
        if start > end || start < 1 || end > self.width - 2 {
            return Err(ConfigError::BaseSpanOutOfBounds {
                start,
                end,
                row: BASE_ROW,
            });
        }
        let s = self.spawn;
        if s.y < 0 || s.y >= SKY_ROWS || s.x < 1 || s.x > self.width - 2 {
            return Err(ConfigError::SpawnOutsideSky { x: s.x, y: s.y });
        }
        if self.bag_max == 0 {
            return Err(ConfigError::ZeroBagCapacity);
        }
        if self.min_ore_to_enter > self.bag_max {
            return Err(ConfigError::ThresholdAboveCapacity {
                min_ore: self.min_ore_to_enter,
                bag_max: self.bag_max,
            });
        }
        for (name, value) in [
            ("ore_base_rate", self.ore_base_rate),
            ("ore_depth_factor", self.ore_depth_factor),
            ("ore_scale", self.ore_scale),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OreRateOutOfRange { name, value });
            }
        }
        if self.fixed_steps_per_second == 0 {
            return Err(ConfigError::ZeroStepRate);
        }
        if self.max_frame_delta.is_zero() {
            return Err(ConfigError::ZeroFrameDelta);
        }
        if self.key_repeat_interval.is_zero() {
            return Err(ConfigError::ZeroRepeatInterval);
        }
        Ok(())
    }

    pub fn window_size(&self) -> (u32, u32) {
        let side = |cells: i32| (cells.max(0) as u32).saturating_mul(self.tile_size);
        (side(self.width), side(self.height))
    }

    /// Truncated to whole nanoseconds so that a whole second holds every step.
    pub fn fixed_dt(&self) -> Duration {
        Duration::from_secs(1) / self.fixed_steps_per_second.max(1)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.target_fps.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = GameConfig::default();
        assert_eq!(c.validate(), Ok(()));
        assert_eq!(c.window_size(), (512, 384));
    }

    #[test]
    fn rejects_tiny_grid() {
        let c = GameConfig {
            height: 4,
            ..GameConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::GridTooSmall { .. })));
    }

    #[test]
    fn rejects_base_span_touching_border() {
        let c = GameConfig {
            base_span: 0..=4,
            ..GameConfig::default()
        };
        assert!(matches!(
            c.validate(),
            Err(ConfigError::BaseSpanOutOfBounds { .. })
        ));
        let c = GameConfig {
            base_span: 20..=31,
            ..GameConfig::default()
        };
        assert!(matches!(
            c.validate(),
            Err(ConfigError::BaseSpanOutOfBounds { .. })
        ));
    }

    #[test]
    fn rejects_spawn_below_sky() {
        let c = GameConfig {
            spawn: TileCoord::new(6, 5),
            ..GameConfig::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::SpawnOutsideSky { x: 6, y: 5 }));
    }

    #[test]
    fn rejects_bag_and_threshold_mismatch() {
        let c = GameConfig {
            bag_max: 0,
            min_ore_to_enter: 0,
            ..GameConfig::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::ZeroBagCapacity));
        let c = GameConfig {
            bag_max: 2,
            ..GameConfig::default()
        };
        assert_eq!(
            c.validate(),
            Err(ConfigError::ThresholdAboveCapacity { min_ore: 3, bag_max: 2 })
        );
    }

    #[test]
    fn rejects_bad_rates_and_steps() {
        let c = GameConfig {
            ore_scale: 1.5,
            ..GameConfig::default()
        };
        assert!(matches!(
            c.validate(),
            Err(ConfigError::OreRateOutOfRange { name: "ore_scale", .. })
        ));
        let c = GameConfig {
            fixed_steps_per_second: 0,
            ..GameConfig::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::ZeroStepRate));
        let c = GameConfig {
            tile_size: 0,
            ..GameConfig::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::ZeroTileSize));
    }

    #[test]
    fn fixed_dt_fits_whole_steps_per_second() {
        let c = GameConfig::default();
        assert_eq!(c.fixed_dt(), Duration::from_nanos(16_666_666));
        assert!(c.fixed_dt() * 60 <= Duration::from_secs(1));
        assert!(c.fixed_dt() * 15 <= MAX_FRAME_DELTA);
    }

    #[test]
    fn rejects_zero_frame_delta_and_repeat_interval() {
        let c = GameConfig {
            max_frame_delta: Duration::ZERO,
            ..GameConfig::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::ZeroFrameDelta));
        let c = GameConfig {
            key_repeat_interval: Duration::ZERO,
            ..GameConfig::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::ZeroRepeatInterval));
    }

    #[test]
    fn rejects_oversized_window() {
        let c = GameConfig {
            width: i32::MAX,
            ..GameConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::GridTooLarge { .. })));
        let c = GameConfig {
            tile_size: u32::MAX,
            ..GameConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::TileSizeTooLarge { .. })));
        // Unvalidated configs still report a size instead of overflowing.
        assert_eq!(c.window_size().0, u32::MAX);
    }
}
