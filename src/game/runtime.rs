//! Game Runtime
//!
//! Owns the loaded level, the player and the bullet pool, and steps them once
//! per frame. Collision rectangles are pulled out of the map once at load time.

use macroquad::logging::{info, warn};
use macroquad::math::Vec2;
use crate::world::{Level, Rect};
use super::physics::Contacts;
use super::player::{Player, PlayerInput};
use super::projectile::ProjectilePool;
use super::weapon::WeaponEvent;

/// FPS limit setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FpsLimit {
    /// 30 FPS
    Fps30,
    /// 60 FPS
    #[default]
    Fps60,
    /// Unlocked (as fast as possible)
    Unlocked,
}

impl FpsLimit {
    pub fn from_fps(fps: u32) -> Self {
        match fps {
            0 => FpsLimit::Unlocked,
            1..=30 => FpsLimit::Fps30,
            _ => FpsLimit::Fps60,
        }
    }

    /// Get the target frame time in seconds (None = unlocked)
    pub fn frame_time(&self) -> Option<f64> {
        match self {
            FpsLimit::Fps30 => Some(1.0 / 30.0),
            FpsLimit::Fps60 => Some(1.0 / 60.0),
            FpsLimit::Unlocked => None,
        }
    }
}

/// State of a running game session
pub struct GameState {
    pub level: Level,
    /// Rectangles from the collision layer; `None` when the map has none
    pub collision: Option<Vec<Rect>>,
    pub player: Player,
    pub projectiles: ProjectilePool,
    /// Width of the visible area, used to recycle bullets
    pub screen_width: f32,
    /// Show collision boxes and the HUD
    pub show_debug_overlay: bool,
    /// Weapon events from the last update
    pub events: Vec<WeaponEvent>,
    /// Contacts from the last player update
    pub contacts: Contacts,
}

impl GameState {
    pub fn new(level: Level, screen_width: f32) -> Self {
        let collision = level.map.collision_rects();
        match &collision {
            Some(rects) => info!("Level '{}': {} collision rects", level.map.name, rects.len()),
            None => warn!("Level '{}': could not locate Collision layer, player physics disabled", level.map.name),
        }

        let player = Player::new(&level);
        Self {
            level,
            collision,
            player,
            projectiles: ProjectilePool::new(),
            screen_width,
            show_debug_overlay: false,
            events: Vec::new(),
            contacts: Contacts::default(),
        }
    }

    /// Put the player back at the start
    pub fn respawn(&mut self) {
        self.player = Player::new(&self.level);
        self.projectiles.clear();
        self.events.clear();
        self.contacts = Contacts::default();
    }

    /// Step the simulation. Returns the weapon events of this frame.
    pub fn update(&mut self, input: &PlayerInput, dt: f32) -> &[WeaponEvent] {
        self.events.clear();

        // Without collision data the player would fall forever: hold still
        if let Some(obstacles) = &self.collision {
            self.contacts = self.player.update(
                obstacles,
                input,
                &self.level.player,
                dt,
                &mut self.projectiles,
                &mut self.events,
            );
        }

        self.projectiles.update(dt, self.view_left(), self.screen_width);
        &self.events
    }

    /// Point the camera looks at (pixel-snapped player position)
    pub fn camera_target(&self) -> Vec2 {
        self.player.actor.position.floor()
    }

    /// World x of the left screen edge, with the camera centred on the player
    pub fn view_left(&self) -> f32 {
        self.camera_target().x - self.screen_width / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::physics::MoveInput;
    use crate::game::weapon::TriggerInput;
    use crate::world::{create_default_level, load_level_from_str, Layer, Map, ObjectGroup, MapObject, Point, COLLISION_LAYER};

    const DT: f32 = 1.0 / 60.0;

    fn platform_level() -> Level {
        let mut map = Map::new("platform");
        map.spawn = Point::new(400.0, 280.0);
        map.layers.push(Layer::Objects(ObjectGroup {
            name: COLLISION_LAYER.to_string(),
            objects: vec![MapObject::Rectangle { x: 350.0, y: 300.0, w: 100.0, h: 20.0 }],
        }));
        Level::new(map)
    }

    #[test]
    fn test_player_lands_on_platform() {
        let mut game = GameState::new(platform_level(), 1024.0);
        for _ in 0..120 {
            game.update(&PlayerInput::default(), DT);
        }
        let actor = &game.player.actor;
        assert_eq!(actor.position.y, 300.0);
        assert_eq!(actor.velocity.y, 0.0);
        assert!(actor.grounded);
        assert!(game.contacts.landed);
    }

    #[test]
    fn test_missing_collision_layer_skips_player() {
        let mut level = platform_level();
        level.map.layers.clear();
        let mut game = GameState::new(level, 1024.0);
        assert!(game.collision.is_none());

        let before = game.player.actor;
        let input = PlayerInput {
            movement: MoveInput { axis: 1.0, jump_pressed: true, jump_released: false },
            trigger: TriggerInput { fire_held: true, fire_pressed: true, reload_pressed: false },
        };
        for _ in 0..60 {
            assert!(game.update(&input, DT).is_empty());
        }
        assert_eq!(game.player.actor, before);
    }

    #[test]
    fn test_bullets_leave_and_despawn() {
        let mut game = GameState::new(platform_level(), 1024.0);
        game.player.gun.cooldown = 0.0;
        let fire = PlayerInput {
            trigger: TriggerInput { fire_held: true, fire_pressed: true, reload_pressed: false },
            ..Default::default()
        };

        let events = game.update(&fire, DT).to_vec();
        assert_eq!(events, vec![WeaponEvent::Fired]);
        assert_eq!(game.projectiles.active_count(), 1);

        // 900 px/s covers the 1024 + 400 px to the despawn line in under two seconds
        for _ in 0..120 {
            game.update(&PlayerInput::default(), DT);
        }
        assert_eq!(game.projectiles.active_count(), 0);
    }

    #[test]
    fn test_respawn_resets_player() {
        let mut game = GameState::new(create_default_level(), 1024.0);
        for _ in 0..30 {
            game.update(&PlayerInput::default(), DT);
        }
        game.respawn();
        assert_eq!(game.player.actor.position, game.level.map.spawn.to_vec2());
        assert_eq!(game.player.actor.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_camera_target_is_pixel_snapped() {
        let mut game = GameState::new(platform_level(), 1024.0);
        game.player.actor.position = Vec2::new(400.7, 280.2);
        assert_eq!(game.camera_target(), Vec2::new(400.0, 280.0));
    }

    #[test]
    fn test_fps_limit_from_config() {
        assert_eq!(FpsLimit::from_fps(0), FpsLimit::Unlocked);
        assert_eq!(FpsLimit::from_fps(30), FpsLimit::Fps30);
        assert_eq!(FpsLimit::from_fps(144), FpsLimit::Fps60);
        assert_eq!(FpsLimit::Unlocked.frame_time(), None);
    }

    #[test]
    fn test_bullets_survive_far_from_origin() {
        let level = load_level_from_str(include_str!("../../assets/levels/plata.ron")).unwrap();
        let mut game = GameState::new(level, 1024.0);
        game.player.actor.position = Vec2::new(1500.0, 400.0);
        game.player.gun.cooldown = 0.0;
        let fire = PlayerInput {
            trigger: TriggerInput { fire_held: true, fire_pressed: true, reload_pressed: false },
            ..Default::default()
        };

        assert_eq!(game.update(&fire, DT), &[WeaponEvent::Fired]);
        assert_eq!(game.projectiles.active_count(), 1);

        // Still on screen a few frames later
        for _ in 0..10 {
            game.update(&PlayerInput::default(), DT);
        }
        assert_eq!(game.projectiles.active_count(), 1);
        assert_eq!(game.view_left(), 1500.0 - 512.0);
    }
}
