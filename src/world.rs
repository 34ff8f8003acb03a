use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::config::{BAG_MAX, BASE_ROW, ConfigError, GameConfig, MIN_ORE_TO_ENTER, SKY_ROWS};
use crate::coords::TileCoord;
use crate::tile::TileKind;

/// Per-session thresholds the tile rules consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRules {
    pub bag_max: u32,
    pub min_ore_to_enter: u32,
}

impl Default for TileRules {
    fn default() -> Self {
        Self {
            bag_max: BAG_MAX,
            min_ore_to_enter: MIN_ORE_TO_ENTER,
        }
    }
}

impl From<&GameConfig> for TileRules {
    fn from(config: &GameConfig) -> Self {
        Self {
            bag_max: config.bag_max,
            min_ore_to_enter: config.min_ore_to_enter,
        }
    }
}

#[derive(Debug, Clone)]
pub struct World {
    width: i32,
    height: i32,
    tiles: Vec<TileKind>,
    rules: TileRules,
}

impl World {
    pub fn new(width: i32, height: i32, fill: TileKind) -> Self {
        let size = (width.max(0) as usize) * (height.max(0) as usize);
        Self {
            width,
            height,
            tiles: vec![fill; size],
            rules: TileRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: TileRules) -> Self {
        self.rules = rules;
        self
    }

    /// Builds the starting map: rock border, sky band, base strip, then a
    /// depth-weighted ore/dirt draw for everything else.
    pub fn generate<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;
        let (width, height) = (config.width, config.height);
        let mut world = Self::new(width, height, TileKind::Empty).with_rules(TileRules::from(config));
        let mut ore = 0usize;
        for y in 0..height {
            let p = ore_probability(config, y);
            for x in 0..width {
                let kind = if x == 0 || x == width - 1 || y == height - 1 {
                    TileKind::Rock
                } else if y < SKY_ROWS {
                    TileKind::Empty
                } else if y == BASE_ROW && config.base_span.contains(&x) {
                    TileKind::Base
                } else {
                    let roll: f32 = rng.r#gen();
                    if roll < p {
                        ore += 1;
                        TileKind::Ore
                    } else {
                        TileKind::Dirt
                    }
                };
                world.set_tile(TileCoord { x, y }, kind);
            }
        }
        debug!(width, height, ore, "world_generated");
        Ok(world)
    }

    pub fn from_seed(config: &GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate(config, &mut rng)
    }

    pub fn width(&self) -> i32 {
        self.width
    }
    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, c: TileCoord) -> Option<usize> {
        if c.x < 0 || c.y < 0 || c.x >= self.width || c.y >= self.height {
            return None;
        }
        Some((c.y * self.width + c.x) as usize)
    }

    pub fn get_tile(&self, c: TileCoord) -> Option<TileKind> {
        self.index(c).map(|i| self.tiles[i])
    }

    pub fn set_tile(&mut self, c: TileCoord, k: TileKind) {
        if let Some(i) = self.index(c) {
            self.tiles[i] = k;
        }
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|k| **k == kind).count()
    }

    pub fn can_walk(&self, c: TileCoord, bag: u32) -> bool {
        self.get_tile(c)
            .is_some_and(|k| k.is_walkable(bag, self.rules.min_ore_to_enter))
    }

    /// Digs `c` and returns the new bag count. Ore is left in place when the
    /// bag is already full.
    pub fn dig(&mut self, c: TileCoord, bag: u32) -> u32 {
        let Some(i) = self.index(c) else {
            return bag;
        };
        let kind = self.tiles[i];
        if !kind.is_diggable() {
            return bag;
        }
        let gained = kind.dug_yield();
        if gained > 0 && bag >= self.rules.bag_max {
            return bag;
        }
        self.tiles[i] = TileKind::Empty;
        bag.saturating_add(gained).min(self.rules.bag_max)
    }
}

/// Chance that a diggable cell on row `y` holds ore.
pub fn ore_probability(config: &GameConfig, y: i32) -> f32 {
    let depth = y as f32 / config.height.max(1) as f32;
    ((config.ore_base_rate + config.ore_depth_factor * depth) * config.ore_scale).clamp(0.0, 1.0)
}
