pub mod action;
pub mod config;
pub mod coords;
pub mod economy;
pub mod engine;
pub mod game_loop;
pub mod hud;
pub mod message;
pub mod player;
pub mod render;
pub mod tile;
pub mod world;

// Re-exports for convenience in tests and integration users.
pub use action::{Action, KeyRepeat};
pub use config::{ConfigError, GameConfig};
pub use coords::{Direction, TileCoord};
pub use economy::{Economy, SaleOutcome};
pub use engine::{Engine, SessionSummary};
pub use game_loop::{FramePacer, GameLoop, LoopState};
pub use hud::{format_hud, format_summary};
pub use message::TransientMessage;
pub use player::Player;
pub use render::{Layout, PixelRect, Rgb, tile_render_color};
pub use tile::TileKind;
pub use world::World;
