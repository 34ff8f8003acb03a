use std::time::Duration;

use tracing::info;

use crate::config::{GameConfig, MIN_ORE_TO_ENTER, ORE_VALUE};
use crate::coords::TileCoord;
use crate::tile::TileKind;
use crate::world::World;

pub const NOT_AT_BASE: &str = "Not at base.";
pub const NOT_AT_BASE_DURATION: Duration = Duration::from_millis(800);
pub const SALE_MESSAGE_DURATION: Duration = Duration::from_millis(1200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Economy {
    pub ore_value: u32,
    pub min_ore_to_enter: u32,
}

impl Default for Economy {
    fn default() -> Self {
        Self {
            ore_value: ORE_VALUE,
            min_ore_to_enter: MIN_ORE_TO_ENTER,
        }
    }
}

impl From<&GameConfig> for Economy {
    fn from(config: &GameConfig) -> Self {
        Self {
            ore_value: config.ore_value,
            min_ore_to_enter: config.min_ore_to_enter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleOutcome {
    pub bag: u32,
    pub cash: u32,
    pub message: String,
    pub duration: Duration,
}

impl SaleOutcome {
    fn unchanged(bag: u32, cash: u32, message: String, duration: Duration) -> Self {
        Self {
            bag,
            cash,
            message,
            duration,
        }
    }
}

impl Economy {
    pub fn is_eligible_to_enter(&self, bag: u32) -> bool {
        bag >= self.min_ore_to_enter
    }

    pub fn sale_value(&self, bag: u32) -> u32 {
        bag.saturating_mul(self.ore_value)
    }

    pub fn try_sell(&self, world: &World, at: TileCoord, bag: u32, cash: u32) -> SaleOutcome {
        if !world.get_tile(at).is_some_and(TileKind::is_sellable) {
            return SaleOutcome::unchanged(bag, cash, NOT_AT_BASE.to_string(), NOT_AT_BASE_DURATION);
        }
        if !self.is_eligible_to_enter(bag) {
            return SaleOutcome::unchanged(
                bag,
                cash,
                format!("Need at least {} ore to sell.", self.min_ore_to_enter),
                SALE_MESSAGE_DURATION,
            );
        }
        let gained = self.sale_value(bag);
        info!(ore = bag, gained, "ore_sold");
        SaleOutcome {
            bag: 0,
            cash: cash.saturating_add(gained),
            message: format!("Sold! +${gained}"),
            duration: SALE_MESSAGE_DURATION,
        }
    }
}
