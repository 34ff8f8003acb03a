use std::time::Instant;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::{egui, EguiContexts, EguiPlugin, EguiPrimaryContextPass};
use monster_miner::render::{self as palette, Line as GridLine};
use monster_miner::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

// ---------- Constants ----------
const Z_SKY: f32 = -2.0;
const Z_GROUND: f32 = -1.0;
const Z_TILES: f32 = 0.0;
const Z_PLAYER: f32 = 2.0;
const Z_MARKER: f32 = 3.0;
const Z_GRID: f32 = 4.0;
const HUD_FONT_SIZE: f32 = 12.0;
const MESSAGE_FONT_SIZE: f32 = 16.0;

const MOVE_KEYS: [(KeyCode, Direction); 8] = [
	(KeyCode::ArrowUp, Direction::Up),
	(KeyCode::ArrowDown, Direction::Down),
	(KeyCode::ArrowLeft, Direction::Left),
	(KeyCode::ArrowRight, Direction::Right),
	(KeyCode::KeyW, Direction::Up),
	(KeyCode::KeyS, Direction::Down),
	(KeyCode::KeyA, Direction::Left),
	(KeyCode::KeyD, Direction::Right),
];
const USE_KEYS: [KeyCode; 2] = [KeyCode::Space, KeyCode::Enter];

// ---------- Components ----------
#[derive(Component)]
struct TilePos {
	x: i32,
	y: i32,
}

#[derive(Component)]
struct PlayerSprite;

#[derive(Component)]
struct FacingMarker;

// ---------- Resources ----------
#[derive(Resource)]
struct Game {
	config: GameConfig,
	layout: Layout,
	engine: Engine,
	game_loop: GameLoop,
	repeat: KeyRepeat,
}

impl Game {
	fn new(config: GameConfig, engine: Engine) -> Self {
		Self {
			layout: Layout::new(&config),
			game_loop: GameLoop::new(&config),
			repeat: KeyRepeat::new(config.key_repeat_delay, config.key_repeat_interval),
			engine,
			config,
		}
	}
}

#[derive(Resource)]
struct FrameClock {
	pacer: FramePacer,
	frame_started: Instant,
}

// ---------- Entry ----------
fn main() -> AppExit {
	init_tracing();

	let config = GameConfig::default();
	let engine = match Engine::from_config(&config) {
		Ok(engine) => engine,
		Err(e) => {
			error!(error = %e, "invalid_config");
			return AppExit::error();
		}
	};
	let (width, height) = config.window_size();
	info!(width, height, seed = config.seed, "startup");

	App::new()
		.add_plugins(DefaultPlugins.set(WindowPlugin {
			primary_window: Some(Window {
				title: config.title.clone(),
				resolution: (width, height).into(),
				resizable: false,
				..Default::default()
			}),
			..Default::default()
		}))
		.add_plugins(EguiPlugin::default())
		// Resources
		.insert_resource(ClearColor(color(palette::C_BG)))
		.insert_resource(FrameClock { pacer: FramePacer::new(&config), frame_started: Instant::now() })
		.insert_resource(Game::new(config, engine))
		// Setup
		.add_systems(Startup, (setup_camera, spawn_scene))
		// Frame systems
		.add_systems(Update, (drive_game, sync_tile_colors, sync_player).chain())
		.add_systems(EguiPrimaryContextPass, draw_hud)
		.add_systems(Last, (finish_when_stopped, pace_frame).chain())
		.run()
}

fn init_tracing() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.compact()
		.init();
}

// ---------- Setup ----------
fn setup_camera(mut commands: Commands, game: Res<Game>) {
	let (w, h) = game.layout.size();
	commands.spawn((Camera2d, Transform::from_xyz(w * 0.5, h * 0.5, 1000.0)));
}

fn spawn_scene(mut commands: Commands, game: Res<Game>) {
	let layout = &game.layout;
	let (_, h) = layout.size();

	spawn_rect(&mut commands, layout.sky_band(), palette::C_SKY, Z_SKY, h);
	spawn_rect(&mut commands, layout.ground_band(), palette::C_GROUND, Z_GROUND, h);

	let world = &game.engine.world;
	let bag = game.engine.player.bag;
	for y in 0..world.height() {
		for x in 0..world.width() {
			let k = world.get_tile(TileCoord { x, y }).unwrap_or(TileKind::Empty);
			let c = tile_render_color(k, bag, game.config.min_ore_to_enter);
			let rect = layout.tile_rect(TileCoord { x, y });
			commands.spawn((
				Sprite::from_color(color(c), Vec2::new(rect.w, rect.h)),
				Transform::from_translation(to_scene(rect, Z_TILES, h)),
				TilePos { x, y },
			));
		}
	}

	let player = &game.engine.player;
	let rect = layout.player_rect(player);
	commands.spawn((
		Sprite::from_color(color(palette::C_PLAYER), Vec2::new(rect.w, rect.h)),
		Transform::from_translation(to_scene(rect, Z_PLAYER, h)),
		PlayerSprite,
	));
	let rect = layout.facing_marker(player);
	commands.spawn((
		Sprite::from_color(color(palette::C_FACING), Vec2::new(rect.w, rect.h)),
		Transform::from_translation(to_scene(rect, Z_MARKER, h)),
		FacingMarker,
	));

	for line in layout.grid_lines() {
		spawn_rect(&mut commands, line_rect(line), palette::C_GRID, Z_GRID, h);
	}
}

// ---------- Utilities ----------
fn color(c: Rgb) -> Color {
	Color::srgb_u8(c.0, c.1, c.2)
}

fn egui_color(c: Rgb) -> egui::Color32 {
	egui::Color32::from_rgb(c.0, c.1, c.2)
}

// Layout works top-down from the window's top-left; the camera looks at a y-up world.
fn to_scene(rect: PixelRect, z: f32, window_height: f32) -> Vec3 {
	let (cx, cy) = rect.center();
	Vec3::new(cx, window_height - cy, z)
}

fn line_rect(line: GridLine) -> PixelRect {
	let (x0, y0) = line.from;
	let (x1, y1) = line.to;
	if x0 == x1 {
		PixelRect { x: x0, y: y0.min(y1), w: 1.0, h: (y1 - y0).abs() }
	} else {
		PixelRect { x: x0.min(x1), y: y0, w: (x1 - x0).abs(), h: 1.0 }
	}
}

fn spawn_rect(commands: &mut Commands, rect: PixelRect, c: Rgb, z: f32, window_height: f32) {
	commands.spawn((
		Sprite::from_color(color(c), Vec2::new(rect.w, rect.h)),
		Transform::from_translation(to_scene(rect, z, window_height)),
	));
}

fn direction_for_key(key: KeyCode) -> Option<Direction> {
	MOVE_KEYS.iter().find(|(k, _)| *k == key).map(|(_, d)| *d)
}

// Arrow and WASD keys share directions; a direction stays held while either is down.
fn direction_still_held(keys: &ButtonInput<KeyCode>, dir: Direction) -> bool {
	MOVE_KEYS.iter().any(|(k, d)| *d == dir && keys.pressed(*k))
}

// ---------- Systems: Input + Update ----------
fn drive_game(keys: Res<ButtonInput<KeyCode>>, time: Res<Time<Real>>, mut game: ResMut<Game>) {
	let Game { engine, game_loop, repeat, .. } = &mut *game;
	let dt = time.delta();

	for key in keys.get_just_released() {
		if let Some(dir) = direction_for_key(*key).filter(|d| !direction_still_held(&keys, *d)) {
			repeat.release(dir);
		}
	}
	let mut actions = repeat.advance(dt);
	for key in keys.get_just_pressed() {
		if let Some(dir) = direction_for_key(*key) {
			actions.push(repeat.press(dir));
		} else if USE_KEYS.contains(key) {
			actions.push(Action::Use);
		} else if *key == KeyCode::Escape {
			actions.push(Action::Quit);
		}
	}

	game_loop.frame(engine, dt, actions);
}

// ---------- Systems: Map Rendering ----------
fn sync_tile_colors(game: Res<Game>, mut q: Query<(&TilePos, &mut Sprite)>) {
	let world = &game.engine.world;
	let bag = game.engine.player.bag;
	for (pos, mut sprite) in &mut q {
		if let Some(k) = world.get_tile(TileCoord { x: pos.x, y: pos.y }) {
			sprite.color = color(tile_render_color(k, bag, game.config.min_ore_to_enter));
		}
	}
}

fn sync_player(
	game: Res<Game>,
	mut q_player: Query<&mut Transform, (With<PlayerSprite>, Without<FacingMarker>)>,
	mut q_marker: Query<&mut Transform, (With<FacingMarker>, Without<PlayerSprite>)>,
) {
	let layout = &game.layout;
	let (_, h) = layout.size();
	let player = &game.engine.player;
	if let Ok(mut t) = q_player.single_mut() {
		t.translation = to_scene(layout.player_rect(player), Z_PLAYER, h);
	}
	if let Ok(mut t) = q_marker.single_mut() {
		t.translation = to_scene(layout.facing_marker(player), Z_MARKER, h);
	}
}

// ---------- Systems: HUD ----------
fn draw_hud(mut egui_ctx: EguiContexts, game: Res<Game>) {
	if let Ok(ctx) = egui_ctx.ctx_mut() {
		let hud_text = format_hud(&game.engine.player, game.engine.cash, &game.config);
		let (x, y) = palette::HUD_ORIGIN;
		egui::Area::new("hud_line".into()).fixed_pos(egui::pos2(x, y)).show(&*ctx, |ui_hud| {
			ui_hud.label(egui::RichText::new(hud_text).color(egui_color(palette::C_TEXT)).size(HUD_FONT_SIZE));
		});

		if let Some(msg) = game.engine.message() {
			egui::Area::new("message_line".into())
				.anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
				.show(&*ctx, |ui_msg| {
					ui_msg.label(
						egui::RichText::new(msg.text()).color(egui_color(palette::C_MESSAGE)).size(MESSAGE_FONT_SIZE),
					);
				});
		}
	}
}

// ---------- Systems: Shutdown + Pacing ----------
fn finish_when_stopped(
	mut commands: Commands,
	windows: Query<Entity, With<PrimaryWindow>>,
	mut game: ResMut<Game>,
	mut reported: Local<bool>,
) {
	if windows.is_empty() {
		game.game_loop.stop("window_close");
	}
	if game.game_loop.is_running() || *reported {
		return;
	}
	*reported = true;
	let summary = game.engine.summary();
	info!("{}", format_summary(&summary));
	match serde_json::to_string(&summary) {
		Ok(json) => info!(summary = %json, "session_summary"),
		Err(e) => warn!(error = %e, "session_summary_failed"),
	}
	// Closing the primary window ends the app.
	for w in &windows {
		commands.entity(w).despawn();
	}
}

fn pace_frame(mut clock: ResMut<FrameClock>) {
	let wait = clock.pacer.remaining(clock.frame_started.elapsed());
	if !wait.is_zero() {
		std::thread::sleep(wait);
	}
	clock.frame_started = Instant::now();
}
