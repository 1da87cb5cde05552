//! Game Renderer
//!
//! Draws the map, the player and bullets in world space through a 2D camera
//! that follows the player, then the HUD in screen space.

use macroquad::prelude::*;
use crate::assets::{Assets, SpriteSheet};
use crate::world::{Rect as MapRect, TileLayer};
use super::animation::{feet_anchored_rect, FrameAnimation};
use super::physics::Facing;
use super::player::Player;
use super::projectile::ProjectilePool;
use super::runtime::GameState;

const BACKGROUND: Color = LIGHTGRAY;
const HUD_COLOR: Color = RED;
const HUD_FONT_SIZE: f32 = 20.0;

/// Colour for a tile id (the map format has no tileset images)
fn tile_color(id: u16) -> Color {
    const PALETTE: [Color; 6] = [DARKGRAY, BROWN, DARKGREEN, DARKBLUE, GRAY, BEIGE];
    PALETTE[(id as usize - 1) % PALETTE.len()]
}

fn draw_tile_layer(layer: &TileLayer) {
    for (rect, id) in layer.iter_tiles() {
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, tile_color(id));
    }
}

fn draw_collision_rects(rects: &[MapRect], filled: bool) {
    for r in rects {
        if filled {
            draw_rectangle(r.x, r.y, r.w, r.h, GRAY);
        }
        draw_rectangle_lines(r.x, r.y, r.w, r.h, 1.0, MAROON);
    }
}

fn draw_sheet_frame(sheet: &SpriteSheet, facing: Facing, anim: &FrameAnimation, feet: Vec2) {
    let texture = sheet.for_facing(facing);
    let src = anim.source_rect(texture.width(), texture.height());
    let dest = feet_anchored_rect(feet.x, feet.y, src.w, src.h);
    draw_texture_ex(
        texture,
        dest.x,
        dest.y,
        WHITE,
        DrawTextureParams {
            source: Some(Rect::new(src.x, src.y, src.w, src.h)),
            dest_size: Some(vec2(dest.w, dest.h)),
            ..Default::default()
        },
    );
}

fn draw_player(player: &Player, assets: &Assets) {
    let actor = &player.actor;
    let feet = actor.position;
    let sprites = &assets.sprites;

    if player.gun_firing {
        if let Some(sheet) = &sprites.idle_fire {
            draw_sheet_frame(sheet, actor.facing, &player.firing, feet);
            return;
        }
    } else if !player.idle {
        if let Some(sheet) = &sprites.run {
            draw_sheet_frame(sheet, actor.facing, &player.running, feet);
            return;
        }
    } else if let Some(sheet) = &sprites.idle {
        let texture = sheet.for_facing(actor.facing);
        let x = (feet.x - texture.width() / 2.0).floor();
        let y = (feet.y - texture.height()).floor();
        draw_texture(texture, x, y, WHITE);
        return;
    }

    // No sprite loaded for this state: draw the collision box
    let b = actor.bounds();
    let color = if player.gun_firing { ORANGE } else { DARKPURPLE };
    draw_rectangle(b.x, b.y, b.w, b.h, color);
    let eye_x = feet.x + actor.facing.sign() * b.w / 4.0;
    draw_circle(eye_x, b.y + 12.0, 3.0, WHITE);
}

fn draw_bullets(projectiles: &ProjectilePool) {
    for (_, bullet) in projectiles.iter() {
        draw_circle(bullet.position.x, bullet.position.y, 4.0, YELLOW);
        draw_circle(bullet.position.x, bullet.position.y, 2.0, RED);
    }
}

fn draw_hud(game: &GameState) {
    let player = &game.player;
    let gun = &player.gun;
    let lines = [
        format!("Jumping: {}", player.actor.airborne),
        format!("Firing: {}", player.gun_firing),
        if gun.overheated {
            format!("Rounds: {}/{} OVERHEATED {:.1}s", gun.rounds, gun.settings.rounds_per_magazine, gun.overheat_timer)
        } else {
            format!("Rounds: {}/{}", gun.rounds, gun.settings.rounds_per_magazine)
        },
    ];

    for (i, line) in lines.iter().enumerate() {
        draw_text(line, 10.0, 26.0 + i as f32 * HUD_FONT_SIZE, HUD_FONT_SIZE, HUD_COLOR);
    }

    if game.show_debug_overlay {
        let actor = &player.actor;
        let debug = format!(
            "pos ({:.1}, {:.1}) vel ({:.1}, {:.1}) bullets {} fps {}",
            actor.position.x, actor.position.y,
            actor.velocity.x, actor.velocity.y,
            game.projectiles.active_count(),
            get_fps(),
        );
        draw_text(&debug, 10.0, screen_height() - 10.0, HUD_FONT_SIZE, DARKGRAY);
    }

    if game.collision.is_none() {
        draw_text("Could not locate Collision layer", 10.0, 90.0, HUD_FONT_SIZE, HUD_COLOR);
    }
}

/// Draw one frame of the game
pub fn draw_game(game: &GameState, assets: &Assets) {
    clear_background(BACKGROUND);

    let target = game.camera_target();
    set_camera(&Camera2D {
        target,
        zoom: vec2(2.0 / screen_width(), 2.0 / screen_height()),
        ..Default::default()
    });

    let mut has_tiles = false;
    for layer in game.level.map.tile_layers() {
        draw_tile_layer(layer);
        has_tiles = true;
    }

    // Maps without tile art still need something to stand on visually
    if let Some(rects) = &game.collision {
        if !has_tiles || game.show_debug_overlay {
            draw_collision_rects(rects, !has_tiles);
        }
    }

    draw_player(&game.player, assets);
    draw_bullets(&game.projectiles);

    if game.show_debug_overlay {
        let b = game.player.actor.bounds();
        draw_rectangle_lines(b.x, b.y, b.w, b.h, 1.0, GREEN);
    }

    set_default_camera();
    draw_hud(game);
}
