use serde::{Deserialize, Serialize};

use crate::coords::{Direction, TileCoord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
	pub pos: TileCoord,
	pub facing: Direction,
	pub bag: u32,
}

impl Player {
	pub fn new(pos: TileCoord) -> Self {
		Self { pos, facing: Direction::Down, bag: 0 }
	}

	pub fn facing_cell(&self) -> TileCoord {
		self.pos.step(self.facing)
	}
}
