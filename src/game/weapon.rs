//! Pistol with a magazine, rapid-fire cooldown and overheat lockout
//!
//! The gun does not know about sounds or bullets. `Gun::update` reports what
//! happened as [`WeaponEvent`]s and the caller spawns projectiles and plays
//! audio from those.

use crate::world::GunSettings;

/// Trigger and reload state for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerInput {
    /// Fire button is held
    pub fire_held: bool,
    /// Fire button went down this frame
    pub fire_pressed: bool,
    /// Reload button went down this frame
    pub reload_pressed: bool,
}

/// Something the gun did this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponEvent {
    /// A round left the barrel
    Fired,
    /// Trigger pulled on an empty magazine
    DryFire,
    /// Magazine refilled
    Reloaded,
    /// Last round fired, gun is locked out
    Overheated,
    /// Overheat lockout ended
    CooledDown,
}

/// Pistol state
#[derive(Debug, Clone)]
pub struct Gun {
    pub settings: GunSettings,
    /// Time until the next shot is allowed (may go negative)
    pub cooldown: f32,
    pub rounds: u32,
    pub overheated: bool,
    /// Time left in the current overheat
    pub overheat_timer: f32,
}

impl Gun {
    pub fn new(settings: GunSettings) -> Self {
        Self {
            settings,
            cooldown: settings.initial_cooldown,
            rounds: settings.rounds_per_magazine,
            overheated: false,
            overheat_timer: 0.0,
        }
    }

    pub fn can_fire(&self) -> bool {
        !self.overheated && self.cooldown <= 0.0 && self.rounds > 0
    }

    /// Tick timers and act on the trigger. Events are appended to `events`.
    pub fn update(&mut self, dt: f32, input: &TriggerInput, events: &mut Vec<WeaponEvent>) {
        self.cooldown -= dt;

        // Nothing else happens while overheated, not even a reload
        if self.overheated {
            self.overheat_timer -= dt;
            if self.overheat_timer <= 0.0 {
                self.overheated = false;
                self.overheat_timer = 0.0;
                events.push(WeaponEvent::CooledDown);
            }
            return;
        }

        if input.fire_held && self.can_fire() {
            self.rounds -= 1;
            self.cooldown = self.settings.fire_interval;
            events.push(WeaponEvent::Fired);

            if self.rounds == 0 {
                self.overheated = true;
                self.overheat_timer = self.settings.overheat_duration;
                events.push(WeaponEvent::Overheated);
            }
        } else if input.fire_pressed && self.cooldown <= 0.0 && self.rounds == 0 {
            events.push(WeaponEvent::DryFire);
        }

        if input.reload_pressed && !self.overheated {
            self.rounds = self.settings.rounds_per_magazine;
            events.push(WeaponEvent::Reloaded);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn hold() -> TriggerInput {
        TriggerInput { fire_held: true, ..Default::default() }
    }

    fn tap() -> TriggerInput {
        TriggerInput { fire_held: true, fire_pressed: true, ..Default::default() }
    }

    fn reload() -> TriggerInput {
        TriggerInput { reload_pressed: true, ..Default::default() }
    }

    /// Gun with the start-of-level cooldown already elapsed
    fn ready_gun() -> Gun {
        let mut gun = Gun::new(GunSettings::default());
        gun.cooldown = 0.0;
        gun
    }

    fn tick(gun: &mut Gun, input: TriggerInput) -> Vec<WeaponEvent> {
        let mut events = Vec::new();
        gun.update(DT, &input, &mut events);
        events
    }

    #[test]
    fn test_initial_cooldown_blocks_first_shot() {
        let mut gun = Gun::new(GunSettings::default());
        assert!(tick(&mut gun, tap()).is_empty());
        assert_eq!(gun.rounds, 7);
    }

    #[test]
    fn test_fire_decrements_rounds() {
        let mut gun = ready_gun();
        assert_eq!(tick(&mut gun, tap()), vec![WeaponEvent::Fired]);
        assert_eq!(gun.rounds, 6);
        assert!(gun.cooldown > 0.0);
    }

    #[test]
    fn test_cooldown_limits_rate() {
        let mut gun = ready_gun();
        let mut shots = 0;
        // One second of holding the trigger at 60 fps
        for _ in 0..60 {
            shots += tick(&mut gun, hold()).iter().filter(|e| **e == WeaponEvent::Fired).count();
        }
        // 0.1s interval: the magazine (7) runs dry long before 60 frames pass
        assert_eq!(shots, 7);
        assert_eq!(gun.rounds, 0);
    }

    #[test]
    fn test_holding_fires_at_interval() {
        let mut gun = ready_gun();
        assert_eq!(tick(&mut gun, hold()), vec![WeaponEvent::Fired]);
        // Cooldown of 0.1s lasts at least five 60 fps frames
        for _ in 0..5 {
            assert!(tick(&mut gun, hold()).is_empty());
        }
    }

    #[test]
    fn test_empty_magazine_overheats() {
        let mut gun = ready_gun();
        gun.rounds = 1;

        let events = tick(&mut gun, tap());
        assert_eq!(events, vec![WeaponEvent::Fired, WeaponEvent::Overheated]);
        assert!(gun.overheated);
        assert_eq!(gun.overheat_timer, gun.settings.overheat_duration);
    }

    #[test]
    fn test_overheat_blocks_fire_and_reload_until_elapsed() {
        let mut gun = ready_gun();
        gun.rounds = 1;
        tick(&mut gun, tap());

        let frames = (gun.settings.overheat_duration / DT) as usize;
        for _ in 0..frames - 1 {
            let events = tick(&mut gun, TriggerInput { fire_held: true, fire_pressed: true, reload_pressed: true });
            assert!(events.is_empty());
        }
        assert_eq!(gun.rounds, 0);

        // Run out the rest of the timer
        let mut cooled = false;
        for _ in 0..5 {
            cooled |= tick(&mut gun, TriggerInput::default()).contains(&WeaponEvent::CooledDown);
        }
        assert!(cooled);
        assert!(!gun.overheated);

        assert_eq!(tick(&mut gun, reload()), vec![WeaponEvent::Reloaded]);
        assert_eq!(gun.rounds, 7);
    }

    #[test]
    fn test_dry_fire_after_cooling_down() {
        let mut gun = ready_gun();
        gun.rounds = 0;
        assert_eq!(tick(&mut gun, tap()), vec![WeaponEvent::DryFire]);
        // Holding without a fresh press stays silent
        assert!(tick(&mut gun, hold()).is_empty());
    }

    #[test]
    fn test_reload_refills() {
        let mut gun = ready_gun();
        tick(&mut gun, tap());
        gun.cooldown = 0.0;
        tick(&mut gun, tap());
        assert_eq!(gun.rounds, 5);

        assert_eq!(tick(&mut gun, reload()), vec![WeaponEvent::Reloaded]);
        assert_eq!(gun.rounds, 7);
    }
}
