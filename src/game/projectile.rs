//! Projectile Pool
//!
//! Bullets live in a fixed-size slot array. Which slots are in use is tracked
//! in a bitset, so firing never allocates and the pool never grows.

use macroquad::math::Vec2;

/// Maximum number of bullets in flight
pub const MAX_PROJECTILES: usize = 20;

/// How far past the screen edges a bullet may travel before it is recycled
pub const DESPAWN_MARGIN: f32 = 400.0;

/// A single bullet
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Projectile {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Fixed-capacity bullet arena
#[derive(Debug, Clone)]
pub struct ProjectilePool {
    slots: [Projectile; MAX_PROJECTILES],
    /// Bit `i` set = slot `i` in use
    active: u32,
}

impl Default for ProjectilePool {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectilePool {
    pub fn new() -> Self {
        Self {
            slots: [Projectile::default(); MAX_PROJECTILES],
            active: 0,
        }
    }

    pub fn active_count(&self) -> usize {
        self.active.count_ones() as usize
    }

    pub fn is_active(&self, slot: usize) -> bool {
        slot < MAX_PROJECTILES && self.active & (1 << slot) != 0
    }

    /// Activate the lowest free slot. Returns `None` when every slot is taken.
    pub fn spawn(&mut self, position: Vec2, velocity: Vec2) -> Option<usize> {
        let slot = (!self.active).trailing_zeros() as usize;
        if slot >= MAX_PROJECTILES {
            return None;
        }
        self.slots[slot] = Projectile { position, velocity };
        self.active |= 1 << slot;
        Some(slot)
    }

    pub fn despawn(&mut self, slot: usize) {
        if slot < MAX_PROJECTILES {
            self.active &= !(1 << slot);
        }
    }

    pub fn clear(&mut self) {
        self.active = 0;
    }

    /// Move every bullet and recycle the ones that left the visible range.
    ///
    /// The view spans `view_left..view_left + view_width` in world space;
    /// bullets may travel `DESPAWN_MARGIN` past either edge.
    pub fn update(&mut self, dt: f32, view_left: f32, view_width: f32) {
        let min_x = view_left - DESPAWN_MARGIN;
        let max_x = view_left + view_width + DESPAWN_MARGIN;
        for slot in 0..MAX_PROJECTILES {
            if !self.is_active(slot) {
                continue;
            }
            let p = &mut self.slots[slot];
            p.position += p.velocity * dt;

            if p.position.x < min_x || p.position.x > max_x {
                self.despawn(slot);
            }
        }
    }

    /// Active bullets with their slot index
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Projectile)> {
        self.slots
            .iter()
            .enumerate()
            .filter(move |(slot, _)| self.is_active(*slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let pool = ProjectilePool::new();
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.iter().count(), 0);
    }

    #[test]
    fn test_spawn_fills_to_capacity() {
        let mut pool = ProjectilePool::new();
        for i in 0..MAX_PROJECTILES {
            assert_eq!(pool.spawn(Vec2::ZERO, Vec2::X), Some(i));
        }
        assert_eq!(pool.active_count(), MAX_PROJECTILES);
        assert_eq!(pool.spawn(Vec2::ZERO, Vec2::X), None);
    }

    #[test]
    fn test_reuses_lowest_free_slot() {
        let mut pool = ProjectilePool::new();
        for _ in 0..5 {
            pool.spawn(Vec2::ZERO, Vec2::X);
        }
        pool.despawn(1);
        pool.despawn(3);
        assert_eq!(pool.spawn(Vec2::new(7.0, 7.0), Vec2::X), Some(1));
        assert_eq!(pool.spawn(Vec2::ZERO, Vec2::X), Some(3));
        assert_eq!(pool.spawn(Vec2::ZERO, Vec2::X), Some(5));
    }

    #[test]
    fn test_update_moves_bullets() {
        let mut pool = ProjectilePool::new();
        pool.spawn(Vec2::new(100.0, 50.0), Vec2::new(900.0, 0.0));
        pool.update(0.5, 0.0, 1024.0);

        let (_, bullet) = pool.iter().next().unwrap();
        assert_eq!(bullet.position, Vec2::new(550.0, 50.0));
    }

    #[test]
    fn test_despawn_past_margins() {
        let mut pool = ProjectilePool::new();
        let right = pool.spawn(Vec2::new(1024.0 + 390.0, 0.0), Vec2::new(900.0, 0.0)).unwrap();
        let left = pool.spawn(Vec2::new(-390.0, 0.0), Vec2::new(-900.0, 0.0)).unwrap();
        let slow = pool.spawn(Vec2::new(500.0, 0.0), Vec2::new(1.0, 0.0)).unwrap();

        pool.update(0.1, 0.0, 1024.0);

        assert!(!pool.is_active(right));
        assert!(!pool.is_active(left));
        assert!(pool.is_active(slow));
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn test_bullet_on_the_margin_survives() {
        let mut pool = ProjectilePool::new();
        let slot = pool.spawn(Vec2::new(-DESPAWN_MARGIN, 0.0), Vec2::ZERO).unwrap();
        pool.update(0.016, 0.0, 1024.0);
        assert!(pool.is_active(slot));
    }

    #[test]
    fn test_clear() {
        let mut pool = ProjectilePool::new();
        pool.spawn(Vec2::ZERO, Vec2::X);
        pool.spawn(Vec2::ZERO, Vec2::X);
        pool.clear();
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn test_despawn_follows_scrolled_view() {
        let mut pool = ProjectilePool::new();
        // View scrolled so that it covers 1000..2024
        let ahead = pool.spawn(Vec2::new(1500.0, 0.0), Vec2::new(900.0, 0.0)).unwrap();
        let behind = pool.spawn(Vec2::new(610.0, 0.0), Vec2::new(-900.0, 0.0)).unwrap();
        let far_ahead = pool.spawn(Vec2::new(2420.0, 0.0), Vec2::new(900.0, 0.0)).unwrap();

        pool.update(0.016, 1000.0, 1024.0);

        assert!(pool.is_active(ahead));
        assert!(!pool.is_active(behind));
        assert!(!pool.is_active(far_ahead));
    }
}
