//! PLATA game binary: window setup and the frame loop

use macroquad::file::load_file;
use macroquad::logging::{error, info, warn};
use macroquad::prelude::*;
use plata::assets::Assets;
use plata::config::GameConfig;
use plata::game::{draw_game, FpsLimit, GameState};
use plata::input::{Action, InputState};
use plata::world::{create_default_level, parse_level_data, Level};

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

fn window_conf() -> Conf {
    let config = GameConfig::shared();
    Conf {
        window_title: format!("{} v{}", config.window_title, VERSION),
        window_width: config.window_width,
        window_height: config.window_height,
        window_resizable: false,
        ..Default::default()
    }
}

/// Load the configured level, falling back to the built-in one
async fn load_start_level(path: &str) -> Level {
    let bytes = match load_file(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Could not read level {}: {}, using default level", path, e);
            return create_default_level();
        }
    };
    match parse_level_data(&bytes) {
        Ok(level) => {
            info!("Loaded level {}", path);
            level
        }
        Err(e) => {
            error!("Invalid level {}: {}, using default level", path, e);
            create_default_level()
        }
    }
}

/// Sleep off whatever is left of the frame budget
fn limit_frame(fps_limit: FpsLimit, frame_start: f64) {
    let Some(target_frame_time) = fps_limit.frame_time() else { return };
    if get_time() - frame_start >= target_frame_time {
        return;
    }

    // Native: use sleep for bulk, then spin-wait for precision
    #[cfg(not(target_arch = "wasm32"))]
    {
        let spin_margin = 0.002; // 2ms
        while get_time() - frame_start + spin_margin < target_frame_time {
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        while get_time() - frame_start < target_frame_time {
            std::hint::spin_loop();
        }
    }
    // WASM: the browser paces frames already
    #[cfg(target_arch = "wasm32")]
    {
        while get_time() - frame_start < target_frame_time {}
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let config = GameConfig::shared();
    let fps_limit = FpsLimit::from_fps(config.target_fps);

    let level = load_start_level(&config.level_path).await;
    let assets = Assets::load(&config.asset_dir).await;

    let mut game = GameState::new(level, screen_width());
    game.show_debug_overlay = config.debug_overlay;

    let mut input = InputState::new();
    if input.has_gamepad() {
        info!("Gamepad connected");
    }

    loop {
        let frame_start = get_time();
        input.poll();

        if input.action_pressed(Action::Quit) {
            break;
        }
        if input.action_pressed(Action::ToggleDebug) {
            game.show_debug_overlay = !game.show_debug_overlay;
        }
        if input.action_pressed(Action::Respawn) {
            game.respawn();
        }

        game.screen_width = screen_width();
        let dt = get_frame_time();
        for &event in game.update(&input.snapshot(), dt) {
            assets.play_weapon_event(event);
        }

        draw_game(&game, &assets);

        limit_frame(fps_limit, frame_start);
        next_frame().await;
    }
}
