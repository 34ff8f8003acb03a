use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::action::Action;
use crate::config::{ConfigError, GameConfig};
use crate::coords::Direction;
use crate::economy::{Economy, SALE_MESSAGE_DURATION};
use crate::message::TransientMessage;
use crate::player::Player;
use crate::tile::TileKind;
use crate::world::{TileRules, World};

pub const ENTRY_DENIED_DURATION: Duration = SALE_MESSAGE_DURATION;

/// Everything one play session owns: map, miner, wallet and the on-screen message.
#[derive(Debug)]
pub struct Engine {
	pub world: World,
	pub player: Player,
	pub cash: u32,
	pub economy: Economy,
	message: Option<TransientMessage>,
	fixed_dt: Duration,
	tiles_dug: u32,
	ore_sold: u32,
}

/// End-of-session figures, logged as JSON on shutdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
	pub cash: u32,
	pub bag: u32,
	pub x: i32,
	pub y: i32,
	pub tiles_dug: u32,
	pub ore_sold: u32,
	pub ore_remaining: usize,
}

impl Engine {
	/// Validates `config` and makes `world` follow its bag and entry thresholds,
	/// so the map, the economy and the HUD all read the same numbers.
	pub fn new(world: World, player: Player, config: &GameConfig) -> Result<Self, ConfigError> {
		config.validate()?;
		Ok(Self {
			world: world.with_rules(TileRules::from(config)),
			player,
			cash: 0,
			economy: Economy::from(config),
			message: None,
			fixed_dt: config.fixed_dt(),
			tiles_dug: 0,
			ore_sold: 0,
		})
	}

	/// Seeds a fresh map from `config.seed` and places the miner on the spawn cell.
	pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
		let world = World::from_seed(config, config.seed)?;
		Self::new(world, Player::new(config.spawn), config)
	}

	pub fn message(&self) -> Option<&TransientMessage> {
		self.message.as_ref().filter(|m| m.is_active())
	}

	pub fn show_message(&mut self, text: impl Into<String>, duration: Duration) {
		self.message = Some(TransientMessage::new(text, duration, self.fixed_dt));
	}

	/// Applies one player action. `Quit` is the loop's concern and is ignored here.
	pub fn apply(&mut self, action: Action) {
		match action {
			Action::Move(dir) => {
				self.try_move(dir);
			}
			Action::Use => self.use_tile(),
			Action::Quit => {}
		}
	}

	// Facing always follows the key, even when the step is refused.
	fn try_move(&mut self, dir: Direction) -> bool {
		self.player.facing = dir;
		let target = self.player.pos.step(dir);
		if self.world.get_tile(target) == Some(TileKind::Base)
			&& !self.economy.is_eligible_to_enter(self.player.bag)
		{
			let text = format!("Need {} ore to enter the base.", self.economy.min_ore_to_enter);
			self.show_message(text, ENTRY_DENIED_DURATION);
			return false;
		}
		if self.world.can_walk(target, self.player.bag) {
			self.player.pos = target;
			true
		} else {
			false
		}
	}

	fn use_tile(&mut self) {
		if self.world.get_tile(self.player.pos).is_some_and(TileKind::is_sellable) {
			self.sell();
		} else {
			self.dig_ahead();
		}
	}

	pub fn sell(&mut self) {
		let bag = self.player.bag;
		let out = self.economy.try_sell(&self.world, self.player.pos, bag, self.cash);
		if out.bag < bag {
			self.ore_sold = self.ore_sold.saturating_add(bag - out.bag);
		}
		self.player.bag = out.bag;
		self.cash = out.cash;
		self.show_message(out.message, out.duration);
	}

	pub fn dig_ahead(&mut self) {
		let target = self.player.facing_cell();
		let before = self.world.get_tile(target);
		self.player.bag = self.world.dig(target, self.player.bag);
		if before != self.world.get_tile(target) {
			self.tiles_dug = self.tiles_dug.saturating_add(1);
			debug!(x = target.x, y = target.y, bag = self.player.bag, "tile_dug");
		}
	}

	/// One fixed simulation step. Only the message timer decays.
	pub fn step_fixed(&mut self) {
		if let Some(m) = self.message.as_mut() {
			if !m.tick() {
				self.message = None;
			}
		}
	}

	pub fn summary(&self) -> SessionSummary {
		SessionSummary {
			cash: self.cash,
			bag: self.player.bag,
			x: self.player.pos.x,
			y: self.player.pos.y,
			tiles_dug: self.tiles_dug,
			ore_sold: self.ore_sold,
			ore_remaining: self.world.count(TileKind::Ore),
		}
	}
}

#[cfg(test)]
mod tests {
use super::*;
use crate::coords::TileCoord;

	// Sky row, a base strip on row 1 and dirt below, walled by rock.
	fn small_engine() -> Engine {
		small_engine_with(&GameConfig::default())
	}

	fn small_engine_with(config: &GameConfig) -> Engine {
		let mut world = World::new(6, 4, TileKind::Empty);
		for x in 0..6 {
			world.set_tile(TileCoord::new(x, 3), TileKind::Rock);
			world.set_tile(TileCoord::new(x, 2), TileKind::Dirt);
		}
		world.set_tile(TileCoord::new(3, 1), TileKind::Base);
		world.set_tile(TileCoord::new(4, 1), TileKind::Base);
		world.set_tile(TileCoord::new(1, 2), TileKind::Ore);
		Engine::new(world, Player::new(TileCoord::new(1, 1)), config).unwrap()
	}

	#[test]
	fn blocked_move_still_turns_player() {
		let mut e = small_engine();
		e.apply(Action::Move(Direction::Down));
		assert_eq!(e.player.pos, TileCoord::new(1, 1));
		assert_eq!(e.player.facing, Direction::Down);
		assert!(e.message().is_none());
	}

	#[test]
	fn dig_then_walk_into_hole() {
		let mut e = small_engine();
		e.apply(Action::Move(Direction::Down));
		e.apply(Action::Use);
		assert_eq!(e.player.bag, 1);
		assert_eq!(e.world.get_tile(TileCoord::new(1, 2)), Some(TileKind::Empty));
		e.apply(Action::Move(Direction::Down));
		assert_eq!(e.player.pos, TileCoord::new(1, 2));
		assert_eq!(e.summary().tiles_dug, 1);
	}

	#[test]
	fn base_entry_denied_without_ore() {
		let mut e = small_engine();
		e.player.pos = TileCoord::new(2, 1);
		e.apply(Action::Move(Direction::Right));
		assert_eq!(e.player.pos, TileCoord::new(2, 1));
		assert_eq!(e.player.facing, Direction::Right);
		let m = e.message().unwrap();
		assert!(m.text().contains("Need 3 ore"));
	}

	#[test]
	fn enter_base_and_sell() {
		let mut e = small_engine();
		e.player.pos = TileCoord::new(2, 1);
		e.player.bag = 4;
		e.apply(Action::Move(Direction::Right));
		assert_eq!(e.player.pos, TileCoord::new(3, 1));
		e.apply(Action::Use);
		assert_eq!(e.player.bag, 0);
		assert_eq!(e.cash, 20);
		assert!(e.message().unwrap().text().starts_with("Sold!"));
		assert_eq!(e.summary().ore_sold, 4);
	}

	#[test]
	fn sell_off_base_reports_not_at_base() {
		let mut e = small_engine();
		e.player.bag = 5;
		e.sell();
		assert_eq!(e.player.bag, 5);
		assert_eq!(e.cash, 0);
		assert_eq!(e.message().unwrap().text(), "Not at base.");
	}

	#[test]
	fn message_clears_after_fixed_steps() {
		let mut e = small_engine();
		e.show_message("hello", Duration::from_millis(100));
		for _ in 0..5 {
			e.step_fixed();
		}
		assert!(e.message().is_some());
		e.step_fixed();
		assert!(e.message().is_none());
	}

	#[test]
	fn world_follows_configured_thresholds() {
		let config = GameConfig {
			bag_max: 3,
			min_ore_to_enter: 2,
			..GameConfig::default()
		};
		let mut e = small_engine_with(&config);
		e.player.pos = TileCoord::new(2, 1);
		e.player.bag = 2;
		e.apply(Action::Move(Direction::Right));
		assert_eq!(e.player.pos, TileCoord::new(3, 1));
		assert!(e.message().is_none());

		e.player.pos = TileCoord::new(1, 1);
		e.player.bag = 3;
		e.apply(Action::Move(Direction::Down));
		e.apply(Action::Use);
		assert_eq!(e.player.bag, 3);
		assert_eq!(e.world.get_tile(TileCoord::new(1, 2)), Some(TileKind::Ore));
	}

	#[test]
	fn new_rejects_invalid_config() {
		let config = GameConfig {
			bag_max: 0,
			..GameConfig::default()
		};
		let world = World::new(3, 3, TileKind::Empty);
		let res = Engine::new(world, Player::new(TileCoord::new(1, 1)), &config);
		assert_eq!(res.err(), Some(ConfigError::ZeroBagCapacity));
	}
}
