use crate::config::GameConfig;
use crate::engine::SessionSummary;
use crate::player::Player;

pub const CONTROLS_HINT: &str = "Arrows/WASD move, Space dig/sell, Esc quit";

pub fn format_hud(player: &Player, cash: u32, config: &GameConfig) -> String {
	format!(
		"{} | {} | Bag {}/{} | Cash ${}",
		config.title, CONTROLS_HINT, player.bag, config.bag_max, cash
	)
}

pub fn format_summary(s: &SessionSummary) -> String {
	format!(
		"Cash ${} | Ore sold {} | Tiles dug {} | Bag {} | At ({},{})",
		s.cash, s.ore_sold, s.tiles_dug, s.bag, s.x, s.y
	)
}
