//! Kinematic Resolver
//!
//! Platformer movement against static rectangles. Each frame runs in a fixed
//! order:
//! 1. Horizontal acceleration / deceleration from input
//! 2. Horizontal sweep against walls (first hit wins)
//! 3. Jump impulse and short-hop cut
//! 4. Vertical sweep: landing, ceiling bump, penetration push-out
//! 5. Gravity when nothing was landed on
//!
//! Resolving one axis at a time keeps fast diagonal movement from slipping
//! through corners. Obstacles are checked in list order and the first match
//! stops the sweep, so overlapping obstacles resolve order-dependently.

use macroquad::math::Vec2;
use crate::world::{PlayerSettings, Rect};

/// Which way the actor faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1.0 for left, 1.0 for right
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// A moving body with a box collider. Position is the feet-center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Actor {
    pub position: Vec2,
    pub velocity: Vec2,
    pub width: f32,
    pub height: f32,
    pub facing: Facing,
    /// Standing on something; a jump is allowed
    pub grounded: bool,
    /// In the air (jumping or falling)
    pub airborne: bool,
}

impl Actor {
    pub fn new(position: Vec2, width: f32, height: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            width,
            height,
            facing: Facing::Right,
            grounded: false,
            airborne: false,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.position.x - self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.position.x + self.width / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.position.y - self.height
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.position.y
    }

    /// Bounding box derived from position and size
    pub fn bounds(&self) -> Rect {
        Rect::new(self.left(), self.top(), self.width, self.height)
    }

    fn overlaps_horizontally(&self, rect: &Rect) -> bool {
        self.right() > rect.left() && self.left() < rect.right()
    }

    fn overlaps_vertically(&self, rect: &Rect) -> bool {
        self.bottom() > rect.top() && self.top() < rect.bottom()
    }
}

/// Movement input for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveInput {
    /// Horizontal direction, -1.0 (left) to 1.0 (right)
    pub axis: f32,
    /// Jump went down this frame
    pub jump_pressed: bool,
    /// Jump went up this frame
    pub jump_released: bool,
}

/// What the actor touched during a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    /// Stopped by a wall in the horizontal sweep
    pub hit_wall: bool,
    /// Bumped a ceiling while rising
    pub hit_ceiling: bool,
    /// Standing on a platform top at frame end
    pub landed: bool,
    /// Pushed sideways out of an obstacle
    pub pushed_out: bool,
    /// A jump started this frame
    pub jumped: bool,
}

/// Apply horizontal input and the jump impulse to velocity.
///
/// Returns true when a jump started.
pub fn apply_input(actor: &mut Actor, input: &MoveInput, settings: &PlayerSettings, dt: f32) -> bool {
    let steering = !actor.airborne || settings.air_control;
    let axis = if steering { input.axis.clamp(-1.0, 1.0) } else { 0.0 };

    if axis != 0.0 {
        actor.facing = if axis < 0.0 { Facing::Left } else { Facing::Right };
        actor.velocity.x += axis * settings.acceleration * dt;
        actor.velocity.x = actor.velocity.x.clamp(-settings.max_speed, settings.max_speed);
    } else if !actor.airborne {
        // Linear ramp toward zero, never overshooting
        let amount = settings.deceleration * dt;
        if actor.velocity.x > 0.0 {
            actor.velocity.x = (actor.velocity.x - amount).max(0.0);
        } else if actor.velocity.x < 0.0 {
            actor.velocity.x = (actor.velocity.x + amount).min(0.0);
        }
    }

    let mut jumped = false;
    if input.jump_pressed && actor.grounded {
        actor.velocity.y = -settings.jump_speed;
        actor.grounded = false;
        actor.airborne = true;
        jumped = true;
    }

    if input.jump_released && actor.velocity.y < 0.0 {
        actor.velocity.y *= settings.short_hop_factor;
    }

    jumped
}

/// Move along x, stopping at the first wall crossed.
///
/// Velocity is left untouched; only the position is clamped.
/// Returns true when a wall stopped the move.
pub fn sweep_horizontal(actor: &mut Actor, obstacles: &[Rect], dt: f32) -> bool {
    let mut move_x = actor.velocity.x * dt;
    let mut hit = false;

    let left = actor.left();
    let right = actor.right();

    for wall in obstacles {
        if !actor.overlaps_vertically(wall) {
            continue;
        }

        if move_x > 0.0 && right <= wall.left() && right + move_x >= wall.left() {
            actor.position.x = wall.left() - actor.width / 2.0;
            move_x = 0.0;
            hit = true;
            break;
        }

        if move_x < 0.0 && left >= wall.right() && left + move_x <= wall.right() {
            actor.position.x = wall.right() + actor.width / 2.0;
            move_x = 0.0;
            hit = true;
            break;
        }
    }

    actor.position.x += move_x;
    hit
}

/// Move along y: land on platform tops, bump ceilings, push out of
/// obstacles the actor would sink into, and apply gravity while airborne.
pub fn sweep_vertical(actor: &mut Actor, obstacles: &[Rect], settings: &PlayerSettings, dt: f32) -> Contacts {
    let mut contacts = Contacts::default();
    let tolerance = settings.landing_tolerance;
    let future_y = actor.position.y + actor.velocity.y * dt;
    let future_top = future_y - actor.height;

    for platform in obstacles {
        if actor.overlaps_horizontally(platform) {
            if actor.velocity.y >= 0.0
                && actor.bottom() <= platform.top() + tolerance
                && future_y >= platform.top() - tolerance
            {
                actor.velocity.y = 0.0;
                actor.position.y = platform.top();
                contacts.landed = true;
                break;
            }

            if actor.velocity.y < 0.0
                && actor.top() >= platform.bottom()
                && future_top <= platform.bottom()
            {
                actor.velocity.y = 0.0;
                actor.position.y = platform.bottom() + actor.height;
                contacts.hit_ceiling = true;
                break;
            }
        }

        // About to end up inside this obstacle: shove out sideways
        if actor.overlaps_horizontally(platform)
            && future_y > platform.top()
            && future_top < platform.bottom()
        {
            if actor.position.x < platform.center_x() {
                actor.position.x = platform.left() - actor.width / 2.0;
            } else {
                actor.position.x = platform.right() + actor.width / 2.0;
            }
            contacts.pushed_out = true;
        }
    }

    if contacts.landed {
        actor.grounded = true;
        actor.airborne = false;
    } else {
        actor.position.y += actor.velocity.y * dt;
        actor.velocity.y += settings.gravity * dt;
        actor.grounded = false;
        actor.airborne = true;
    }

    contacts
}

/// Run one simulation step for an actor
pub fn resolve(
    actor: &mut Actor,
    obstacles: &[Rect],
    input: &MoveInput,
    settings: &PlayerSettings,
    dt: f32,
) -> Contacts {
    let jumped = apply_input(actor, input, settings, dt);
    let hit_wall = sweep_horizontal(actor, obstacles, dt);
    let mut contacts = sweep_vertical(actor, obstacles, settings, dt);
    contacts.hit_wall = hit_wall;
    contacts.jumped = jumped;
    contacts
}
