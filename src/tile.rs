#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TileKind {
	Empty,
	Dirt,
	Rock,
	Ore,
	Base,
}

impl TileKind {
	pub fn is_diggable(self) -> bool {
		matches!(self, TileKind::Dirt | TileKind::Ore)
	}

	pub fn is_sellable(self) -> bool {
		matches!(self, TileKind::Base)
	}

	/// Whether a player carrying `bag` ore may stand here, given the base entry threshold.
	pub fn is_walkable(self, bag: u32, min_ore_to_enter: u32) -> bool {
		match self {
			TileKind::Empty => true,
			TileKind::Base => bag >= min_ore_to_enter,
			TileKind::Dirt | TileKind::Rock | TileKind::Ore => false,
		}
	}

	/// Ore picked up by digging this tile.
	pub fn dug_yield(self) -> u32 {
		match self {
			TileKind::Ore => 1,
			_ => 0,
		}
	}
}
