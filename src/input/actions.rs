//! Game action definitions

/// Everything the player can ask for
///
/// Button mappings (Xbox/PlayStation):
/// - A/X = Jump
/// - X/Square or RB/R1 = Fire
/// - Y/Triangle = Reload
/// - Select = Debug overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (left stick / d-pad / arrows)
    MoveLeft,
    MoveRight,

    Jump,
    Fire,
    Reload,

    // System
    ToggleDebug,
    Respawn,
    Quit,
}
