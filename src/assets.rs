//! Textures and sound effects
//!
//! Everything here is optional: a missing file is logged and the game draws
//! a placeholder or stays silent instead.

use macroquad::audio::{load_sound, play_sound_once, Sound};
use macroquad::logging::{info, warn};
use macroquad::prelude::*;
use crate::game::physics::Facing;
use crate::game::weapon::WeaponEvent;

/// A sprite strip with a left- and right-facing variant
pub struct SpriteSheet {
    pub right: Texture2D,
    pub left: Texture2D,
}

impl SpriteSheet {
    pub fn for_facing(&self, facing: Facing) -> &Texture2D {
        match facing {
            Facing::Left => &self.left,
            Facing::Right => &self.right,
        }
    }
}

/// Player sprite sheets
#[derive(Default)]
pub struct PlayerSprites {
    pub idle: Option<SpriteSheet>,
    pub run: Option<SpriteSheet>,
    pub idle_fire: Option<SpriteSheet>,
}

/// Pistol sound effects
#[derive(Default)]
pub struct GunSounds {
    pub fire: Option<Sound>,
    pub dry_fire: Option<Sound>,
    pub reload: Option<Sound>,
    pub steam: Option<Sound>,
}

impl GunSounds {
    fn for_event(&self, event: WeaponEvent) -> Option<&Sound> {
        match event {
            WeaponEvent::Fired => self.fire.as_ref(),
            WeaponEvent::DryFire => self.dry_fire.as_ref(),
            WeaponEvent::Reloaded => self.reload.as_ref(),
            WeaponEvent::Overheated => self.steam.as_ref(),
            WeaponEvent::CooledDown => None,
        }
    }
}

/// All loaded assets, created once at startup and dropped on exit
#[derive(Default)]
pub struct Assets {
    pub sprites: PlayerSprites,
    pub sounds: GunSounds,
}

async fn load_texture_logged(path: &str) -> Option<Texture2D> {
    match load_texture(path).await {
        Ok(tex) => {
            tex.set_filter(FilterMode::Nearest);
            Some(tex)
        }
        Err(e) => {
            warn!("Failed to load texture {}: {}", path, e);
            None
        }
    }
}

async fn load_sheet(dir: &str, right: &str, left: &str) -> Option<SpriteSheet> {
    let right = load_texture_logged(&format!("{}/{}", dir, right)).await?;
    let left = load_texture_logged(&format!("{}/{}", dir, left)).await?;
    Some(SpriteSheet { right, left })
}

async fn load_sound_logged(path: &str) -> Option<Sound> {
    match load_sound(path).await {
        Ok(sound) => Some(sound),
        Err(e) => {
            warn!("Failed to load sound {}: {}", path, e);
            None
        }
    }
}

impl Assets {
    /// Load sprites and sounds from `dir`
    pub async fn load(dir: &str) -> Self {
        let sprites = PlayerSprites {
            idle: load_sheet(dir, "player_idle-right.png", "player_idle-left.png").await,
            run: load_sheet(dir, "player_run-right.png", "player_run-left.png").await,
            idle_fire: load_sheet(dir, "player_idle_right_fire.png", "player_idle_left_fire.png").await,
        };

        let sound_dir = format!("{}/sounds", dir);
        let sounds = GunSounds {
            fire: load_sound_logged(&format!("{}/pistol-fire.wav", sound_dir)).await,
            dry_fire: load_sound_logged(&format!("{}/pistol-dry-fire.wav", sound_dir)).await,
            reload: load_sound_logged(&format!("{}/pistol-reload.ogg", sound_dir)).await,
            steam: load_sound_logged(&format!("{}/pistol-steam.wav", sound_dir)).await,
        };

        let sheets = [&sprites.idle, &sprites.run, &sprites.idle_fire]
            .iter()
            .filter(|s| s.is_some())
            .count();
        let clips = [&sounds.fire, &sounds.dry_fire, &sounds.reload, &sounds.steam]
            .iter()
            .filter(|s| s.is_some())
            .count();
        info!("Loaded {}/3 sprite sheets and {}/4 sounds from {}", sheets, clips, dir);

        Self { sprites, sounds }
    }

    /// Play the sound that goes with a weapon event, if there is one
    pub fn play_weapon_event(&self, event: WeaponEvent) {
        if let Some(sound) = self.sounds.for_event(event) {
            play_sound_once(sound);
        }
    }
}
