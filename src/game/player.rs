//! Player: kinematic body, sprite animations and the pistol

use macroquad::math::Vec2;
use crate::world::{Level, PlayerSettings, Rect};
use super::animation::FrameAnimation;
use super::physics::{self, Actor, Contacts, MoveInput};
use super::projectile::ProjectilePool;
use super::weapon::{Gun, TriggerInput, WeaponEvent};

/// Everything the player reacts to in one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    pub movement: MoveInput,
    pub trigger: TriggerInput,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub actor: Actor,
    pub running: FrameAnimation,
    pub firing: FrameAnimation,
    pub gun: Gun,
    /// Not running (standing, or in the air)
    pub idle: bool,
    /// Firing animation is playing
    pub gun_firing: bool,
}

impl Player {
    /// Spawn at the level's start point
    pub fn new(level: &Level) -> Self {
        let spawn = level.map.spawn.to_vec2();
        let anim = &level.animation;
        Self {
            actor: Actor::new(spawn, level.player.width, level.player.height),
            running: FrameAnimation::new(anim.run_frames, anim.frame_duration),
            firing: FrameAnimation::new(anim.fire_frames, anim.frame_duration),
            gun: Gun::new(level.gun),
            idle: true,
            gun_firing: false,
        }
    }

    /// Where bullets leave the gun
    pub fn muzzle(&self) -> Vec2 {
        self.actor.position - Vec2::new(0.0, self.gun.settings.muzzle_height)
    }

    /// Simulate one frame: movement and collision, animation, then the gun
    pub fn update(
        &mut self,
        obstacles: &[Rect],
        input: &PlayerInput,
        settings: &PlayerSettings,
        dt: f32,
        projectiles: &mut ProjectilePool,
        events: &mut Vec<WeaponEvent>,
    ) -> Contacts {
        let contacts = physics::resolve(&mut self.actor, obstacles, &input.movement, settings, dt);
        self.update_animation(dt);
        self.update_weapon(dt, &input.trigger, projectiles, events);
        contacts
    }

    fn update_animation(&mut self, dt: f32) {
        if !self.actor.airborne && self.actor.velocity.x != 0.0 {
            self.idle = false;
            self.running.advance(dt);
        } else {
            self.idle = true;
        }
    }

    fn update_weapon(
        &mut self,
        dt: f32,
        trigger: &TriggerInput,
        projectiles: &mut ProjectilePool,
        events: &mut Vec<WeaponEvent>,
    ) {
        let first_new = events.len();
        self.gun.update(dt, trigger, events);

        let shots = events[first_new..]
            .iter()
            .filter(|e| **e == WeaponEvent::Fired)
            .count();
        for _ in 0..shots {
            self.spawn_bullet(projectiles);
        }

        if shots > 0 {
            self.gun_firing = true;
            self.firing.restart();
        } else if self.gun_firing && self.firing.advance(dt) {
            self.gun_firing = false;
        }
    }

    /// A full pool swallows the shot; the round is spent either way
    fn spawn_bullet(&self, projectiles: &mut ProjectilePool) {
        let velocity = Vec2::new(self.actor.facing.sign() * self.gun.settings.bullet_speed, 0.0);
        projectiles.spawn(self.muzzle(), velocity);
    }
}
