//! Colors and pixel geometry for drawing a frame. Coordinates are in window
//! pixels with the origin at the top-left corner.

use crate::config::{GameConfig, SKY_ROWS};
use crate::coords::TileCoord;
use crate::player::Player;
use crate::tile::TileKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const C_BG: Rgb = Rgb(13, 17, 23);
pub const C_SKY: Rgb = Rgb(24, 29, 39);
pub const C_GROUND: Rgb = Rgb(40, 44, 52);
pub const C_GRID: Rgb = Rgb(28, 33, 43);
pub const C_TEXT: Rgb = Rgb(235, 235, 235);
pub const C_MESSAGE: Rgb = Rgb(255, 214, 102);
pub const C_DIRT: Rgb = Rgb(121, 85, 58);
pub const C_ROCK: Rgb = Rgb(88, 94, 107);
pub const C_ORE: Rgb = Rgb(236, 201, 75);
pub const C_BASE_OPEN: Rgb = Rgb(72, 187, 120);
pub const C_BASE_CLOSED: Rgb = Rgb(150, 62, 62);
pub const C_PLAYER: Rgb = Rgb(102, 178, 255);
pub const C_FACING: Rgb = Rgb(255, 255, 255);

const PLAYER_INSET: f32 = 2.0;
const MARKER_SIZE: f32 = 4.0;
const MARKER_REACH: f32 = 5.0;

pub const HUD_ORIGIN: (f32, f32) = (8.0, 6.0);

pub fn tile_render_color(kind: TileKind, bag: u32, min_ore_to_enter: u32) -> Rgb {
    match kind {
        TileKind::Empty => C_BG,
        TileKind::Dirt => C_DIRT,
        TileKind::Rock => C_ROCK,
        TileKind::Ore => C_ORE,
        TileKind::Base if bag >= min_ore_to_enter => C_BASE_OPEN,
        TileKind::Base => C_BASE_CLOSED,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl PixelRect {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w * 0.5, self.y + self.h * 0.5)
    }
}

/// A straight grid line from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub from: (f32, f32),
    pub to: (f32, f32),
}

#[derive(Debug, Clone, Copy)]
pub struct Layout {
    tile: f32,
    width: f32,
    height: f32,
}

impl Layout {
    pub fn new(config: &GameConfig) -> Self {
        let (w, h) = config.window_size();
        Self {
            tile: config.tile_size as f32,
            width: w as f32,
            height: h as f32,
        }
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn tile_rect(&self, c: TileCoord) -> PixelRect {
        PixelRect {
            x: c.x as f32 * self.tile,
            y: c.y as f32 * self.tile,
            w: self.tile,
            h: self.tile,
        }
    }

    pub fn sky_band(&self) -> PixelRect {
        PixelRect {
            x: 0.0,
            y: 0.0,
            w: self.width,
            h: self.tile * SKY_ROWS as f32,
        }
    }

    pub fn ground_band(&self) -> PixelRect {
        PixelRect {
            x: 0.0,
            y: self.height - self.tile,
            w: self.width,
            h: self.tile,
        }
    }

    pub fn player_rect(&self, player: &Player) -> PixelRect {
        let t = self.tile_rect(player.pos);
        PixelRect {
            x: t.x + PLAYER_INSET,
            y: t.y + PLAYER_INSET,
            w: t.w - PLAYER_INSET * 2.0,
            h: t.h - PLAYER_INSET * 2.0,
        }
    }

    /// Small square pushed from the player's center toward the facing side.
    pub fn facing_marker(&self, player: &Player) -> PixelRect {
        let (cx, cy) = self.tile_rect(player.pos).center();
        let (dx, dy) = player.facing.offset();
        let mx = cx + dx as f32 * MARKER_REACH;
        let my = cy + dy as f32 * MARKER_REACH;
        PixelRect {
            x: mx - MARKER_SIZE * 0.5,
            y: my - MARKER_SIZE * 0.5,
            w: MARKER_SIZE,
            h: MARKER_SIZE,
        }
    }

    pub fn grid_lines(&self) -> Vec<Line> {
        let mut lines = Vec::new();
        let mut x = 0.0;
        while x < self.width {
            lines.push(Line {
                from: (x, 0.0),
                to: (x, self.height),
            });
            x += self.tile;
        }
        let mut y = 0.0;
        while y < self.height {
            lines.push(Line {
                from: (0.0, y),
                to: (self.width, y),
            });
            y += self.tile;
        }
        lines
    }
}
