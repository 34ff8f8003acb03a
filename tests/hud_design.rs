use monster_miner::render::{C_BASE_CLOSED, C_BASE_OPEN, C_BG};
use monster_miner::*;

#[test]
fn hud_line_lists_controls_and_stats() {
    let config = GameConfig::default();
    let mut player = Player::new(config.spawn);
    player.bag = 7;
    let line = format_hud(&player, 120, &config);
    assert!(line.contains("Monster Miner"));
    assert!(line.contains("Arrows/WASD move"));
    assert!(line.contains("Space dig/sell"));
    assert!(line.contains("Bag 7/10"));
    assert!(line.contains("Cash $120"));
}

#[test]
fn hud_title_comes_from_config() {
    let config = GameConfig {
        title: "Deep Dig".to_string(),
        ..GameConfig::default()
    };
    let line = format_hud(&Player::new(config.spawn), 0, &config);
    assert!(line.starts_with("Deep Dig | "));
}

#[test]
fn base_opens_once_bag_reaches_threshold() {
    let config = GameConfig::default();
    let mut engine = Engine::from_config(&config).unwrap();
    let base = TileCoord::new(*config.base_span.start(), 3);
    let kind = engine.world.get_tile(base).unwrap();
    assert_eq!(kind, TileKind::Base);

    assert_eq!(tile_render_color(kind, engine.player.bag, config.min_ore_to_enter), C_BASE_CLOSED);
    engine.player.bag = config.min_ore_to_enter;
    assert_eq!(tile_render_color(kind, engine.player.bag, config.min_ore_to_enter), C_BASE_OPEN);
    assert_eq!(tile_render_color(TileKind::Empty, 0, config.min_ore_to_enter), C_BG);
}

#[test]
fn window_matches_grid() {
    let config = GameConfig::default();
    let layout = Layout::new(&config);
    assert_eq!(config.window_size(), (512, 384));
    assert_eq!(layout.size(), (512.0, 384.0));
    let last = layout.tile_rect(TileCoord::new(config.width - 1, config.height - 1));
    assert_eq!(last, PixelRect { x: 496.0, y: 368.0, w: 16.0, h: 16.0 });
}
