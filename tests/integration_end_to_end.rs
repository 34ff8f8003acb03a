use monster_miner::*;

const IDLE: [Action; 0] = [];

fn session() -> (GameConfig, Engine, GameLoop) {
    let config = GameConfig::default();
    let engine = Engine::from_config(&config).unwrap();
    let game_loop = GameLoop::new(&config);
    (config, engine, game_loop)
}

#[test]
fn dig_straight_down_to_bedrock() {
    let (config, mut engine, mut game_loop) = session();
    assert_eq!(engine.player.pos, config.spawn);

    // Each frame: step down if the cell is open, then dig the one below.
    let dt = config.fixed_dt();
    for _ in 0..config.height * 2 {
        game_loop.frame(
            &mut engine,
            dt,
            [Action::Move(Direction::Down), Action::Use],
        );
    }

    assert_eq!(engine.player.pos.x, config.spawn.x);
    assert_eq!(engine.player.pos.y, config.height - 2);
    assert_eq!(engine.player.facing, Direction::Down);
    let below = engine.player.facing_cell();
    assert_eq!(engine.world.get_tile(below), Some(TileKind::Rock));
    assert!(game_loop.is_running());
}

#[test]
fn sell_at_base_then_message_expires() {
    let (config, mut engine, mut game_loop) = session();
    let dt = config.fixed_dt();
    let above_base = TileCoord::new(*config.base_span.start(), 2);
    engine.player.pos = above_base;
    engine.player.bag = 5;

    game_loop.frame(&mut engine, dt, [Action::Move(Direction::Down), Action::Use]);
    assert_eq!(engine.player.pos, above_base.step(Direction::Down));
    assert_eq!(engine.player.bag, 0);
    assert_eq!(engine.cash, 25);
    // One fixed step already ran in the selling frame.
    assert_eq!(engine.message().map(|m| m.ticks_left()), Some(71));

    for _ in 0..70 {
        game_loop.frame(&mut engine, dt, IDLE);
    }
    assert!(engine.message().is_some());
    game_loop.frame(&mut engine, dt, IDLE);
    assert!(engine.message().is_none());

    let summary = engine.summary();
    assert_eq!(summary.ore_sold, 5);
    let json: serde_json::Value = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["cash"], 25);
}

#[test]
fn empty_bag_cannot_enter_base() {
    let (config, mut engine, mut game_loop) = session();
    let above_base = TileCoord::new(*config.base_span.end(), 2);
    engine.player.pos = above_base;
    engine.player.bag = 1;

    game_loop.frame(&mut engine, config.fixed_dt(), [Action::Move(Direction::Down)]);
    assert_eq!(engine.player.pos, above_base);
    assert_eq!(engine.player.facing, Direction::Down);
    let msg = engine.message().expect("entry refusal is shown");
    assert!(msg.text().contains("ore to enter"));
}

#[test]
fn escape_ends_the_session() {
    let (config, mut engine, mut game_loop) = session();
    game_loop.frame(&mut engine, config.fixed_dt(), [Action::Quit]);
    assert_eq!(game_loop.state(), LoopState::Stopped);
    game_loop.frame(&mut engine, config.fixed_dt(), [Action::Move(Direction::Left)]);
    assert_eq!(engine.player.pos, config.spawn);
}
