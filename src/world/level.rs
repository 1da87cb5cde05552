//! Level loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable level files.
//! Supports both compressed (brotli) and uncompressed RON files.
//! - Reading: Auto-detects format by checking for valid RON start
//! - Writing: Always uses brotli compression

use std::fs;
use std::io::Cursor;
use std::path::Path;
use serde::{Serialize, Deserialize};
use super::{Map, Layer, MapObject, ObjectGroup, TileLayer, Point, create_default_map};
use super::{PlayerSettings, GunSettings, AnimationSettings};

/// Validation limits to prevent resource exhaustion from malicious files
pub mod limits {
    /// Maximum number of layers in a map
    pub const MAX_LAYERS: usize = 64;
    /// Maximum objects in one object group
    pub const MAX_OBJECTS: usize = 4096;
    /// Maximum tile layer dimension (width or height, in tiles)
    pub const MAX_TILE_LAYER_SIZE: usize = 1024;
    /// Maximum string length for layer names
    pub const MAX_STRING_LEN: usize = 256;
    /// Maximum coordinate value (prevents overflow issues)
    pub const MAX_COORD: f32 = 1_000_000.0;
}

/// A playable level: map geometry plus the settings it was tuned with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub map: Map,
    #[serde(default)]
    pub player: PlayerSettings,
    #[serde(default)]
    pub gun: GunSettings,
    #[serde(default)]
    pub animation: AnimationSettings,
}

impl Level {
    pub fn new(map: Map) -> Self {
        Self {
            map,
            player: PlayerSettings::default(),
            gun: GunSettings::default(),
            animation: AnimationSettings::default(),
        }
    }
}

/// Level used when nothing is loaded from disk
pub fn create_default_level() -> Level {
    Level::new(create_default_map())
}

/// Error type for level loading
#[derive(Debug)]
pub enum LevelError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    ValidationError(String),
}

impl From<std::io::Error> for LevelError {
    fn from(e: std::io::Error) -> Self {
        LevelError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for LevelError {
    fn from(e: ron::error::SpannedError) -> Self {
        LevelError::ParseError(e)
    }
}

impl From<ron::Error> for LevelError {
    fn from(e: ron::Error) -> Self {
        LevelError::SerializeError(e)
    }
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::IoError(e) => write!(f, "IO error: {}", e),
            LevelError::ParseError(e) => write!(f, "Parse error: {}", e),
            LevelError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            LevelError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for LevelError {}

/// Check if a float is valid (not NaN or Inf)
fn is_valid_float(f: f32) -> bool {
    f.is_finite() && f.abs() <= limits::MAX_COORD
}

fn is_valid_size(f: f32) -> bool {
    is_valid_float(f) && f >= 0.0
}

fn validate_name(name: &str, context: &str) -> Result<(), String> {
    if name.len() > limits::MAX_STRING_LEN {
        return Err(format!("{}: name too long ({} > {})",
            context, name.len(), limits::MAX_STRING_LEN));
    }
    Ok(())
}

fn validate_point(p: &Point, context: &str) -> Result<(), String> {
    if !is_valid_float(p.x) || !is_valid_float(p.y) {
        return Err(format!("{}: invalid position ({}, {})", context, p.x, p.y));
    }
    Ok(())
}

fn validate_object(obj: &MapObject, context: &str) -> Result<(), String> {
    match *obj {
        MapObject::Rectangle { x, y, w, h } => {
            if !is_valid_float(x) || !is_valid_float(y) {
                return Err(format!("{}: invalid origin ({}, {})", context, x, y));
            }
            if !is_valid_size(w) || !is_valid_size(h) {
                return Err(format!("{}: invalid size {}x{}", context, w, h));
            }
        }
        MapObject::Point { x, y } => validate_point(&Point::new(x, y), context)?,
    }
    Ok(())
}

fn validate_object_group(group: &ObjectGroup, context: &str) -> Result<(), String> {
    validate_name(&group.name, context)?;
    if group.objects.len() > limits::MAX_OBJECTS {
        return Err(format!("{}: too many objects ({} > {})",
            context, group.objects.len(), limits::MAX_OBJECTS));
    }
    for (i, obj) in group.objects.iter().enumerate() {
        validate_object(obj, &format!("{} object[{}]", context, i))?;
    }
    Ok(())
}

fn validate_tile_layer(layer: &TileLayer, context: &str) -> Result<(), String> {
    validate_name(&layer.name, context)?;
    if layer.width > limits::MAX_TILE_LAYER_SIZE || layer.height > limits::MAX_TILE_LAYER_SIZE {
        return Err(format!("{}: too large ({}x{}, max {})",
            context, layer.width, layer.height, limits::MAX_TILE_LAYER_SIZE));
    }
    if !is_valid_size(layer.tile_size) || layer.tile_size == 0.0 {
        return Err(format!("{}: invalid tile size {}", context, layer.tile_size));
    }
    let expected = layer.width * layer.height;
    if layer.tiles.len() != expected {
        return Err(format!("{}: tile count mismatch ({} != {}x{})",
            context, layer.tiles.len(), layer.width, layer.height));
    }
    Ok(())
}

/// Validate an entire level
pub fn validate_level(level: &Level) -> Result<(), LevelError> {
    let map = &level.map;

    if map.layers.len() > limits::MAX_LAYERS {
        return Err(LevelError::ValidationError(format!(
            "too many layers ({} > {})", map.layers.len(), limits::MAX_LAYERS
        )));
    }

    validate_name(&map.name, "map").map_err(LevelError::ValidationError)?;
    validate_point(&map.spawn, "spawn").map_err(LevelError::ValidationError)?;

    for (i, layer) in map.layers.iter().enumerate() {
        let name = layer.name();
        let context = if name.len() <= limits::MAX_STRING_LEN {
            format!("layer[{}] '{}'", i, name)
        } else {
            format!("layer[{}]", i)
        };
        let result = match layer {
            Layer::Objects(group) => validate_object_group(group, &context),
            Layer::Tiles(tiles) => validate_tile_layer(tiles, &context),
        };
        result.map_err(LevelError::ValidationError)?;
    }

    let p = &level.player;
    if !is_valid_size(p.width) || !is_valid_size(p.height) || p.width == 0.0 || p.height == 0.0 {
        return Err(LevelError::ValidationError(format!(
            "player: invalid size {}x{}", p.width, p.height
        )));
    }

    if level.animation.run_frames == 0 || level.animation.fire_frames == 0 {
        return Err(LevelError::ValidationError(
            "animation: frame counts must be at least 1".to_string()
        ));
    }

    Ok(())
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Plain RON starts with `(`, whitespace, a comment, an `#![enable(..)]`
/// header or a UTF-8 BOM. Files written by `save_level` never do.
fn is_plain_ron(bytes: &[u8]) -> bool {
    if bytes.starts_with(UTF8_BOM) {
        return true;
    }
    matches!(bytes.first(), Some(b'(' | b' ' | b'\n' | b'\r' | b'\t' | b'/' | b'#'))
}

/// Decode raw level bytes into RON text, decompressing if needed
fn decode_level_bytes(bytes: &[u8]) -> Result<String, LevelError> {
    if is_plain_ron(bytes) {
        let text = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        return String::from_utf8(text.to_vec())
            .map_err(|e| LevelError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid UTF-8: {}", e)
            )));
    }

    let mut decompressed = Vec::new();
    brotli::BrotliDecompress(&mut Cursor::new(bytes), &mut decompressed)
        .map_err(|e| LevelError::IoError(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("brotli decompression failed: {}", e)
        )))?;
    String::from_utf8(decompressed)
        .map_err(|e| LevelError::IoError(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("invalid UTF-8 after decompression: {}", e)
        )))
}

/// Load a level from a RON file (supports both compressed and uncompressed)
pub fn load_level<P: AsRef<Path>>(path: P) -> Result<Level, LevelError> {
    let bytes = fs::read(path)?;
    parse_level_data(&bytes)
}

/// Parse level data from bytes (plain or brotli-compressed RON)
pub fn parse_level_data(bytes: &[u8]) -> Result<Level, LevelError> {
    let contents = decode_level_bytes(bytes)?;
    load_level_from_str(&contents)
}

/// Load a level from a RON string (for embedded levels or testing)
pub fn load_level_from_str(s: &str) -> Result<Level, LevelError> {
    let level: Level = ron::from_str(s)?;

    // Validate level to prevent malicious files
    validate_level(&level)?;

    Ok(level)
}

/// Pretty-printed plain RON text for a level
pub fn level_to_ron(level: &Level) -> Result<String, LevelError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(5)
        .indentor("  ".to_string());

    Ok(ron::ser::to_string_pretty(level, config)?)
}

/// Serialize a level to compressed bytes
pub fn serialize_level(level: &Level) -> Result<Vec<u8>, LevelError> {
    let ron_string = level_to_ron(level)?;

    // Compress with brotli (quality 6, window 22 - good balance of speed/ratio)
    let mut compressed = Vec::new();
    brotli::BrotliCompress(&mut Cursor::new(ron_string.as_bytes()), &mut compressed, &brotli::enc::BrotliEncoderParams {
        quality: 6,
        lgwin: 22,
        ..Default::default()
    }).map_err(|e| LevelError::IoError(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("brotli compression failed: {}", e)
    )))?;

    Ok(compressed)
}

/// Save a level to a compressed RON file (brotli)
pub fn save_level<P: AsRef<Path>>(level: &Level, path: P) -> Result<(), LevelError> {
    let data = serialize_level(level)?;
    fs::write(path, data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Rect, COLLISION_LAYER};
    use tempfile::TempDir;

    const SMALL_LEVEL: &str = r#"
(
    map: (
        name: "small",
        spawn: (x: 10.0, y: 20.0),
        layers: [
            Objects((
                name: "Collision",
                objects: [
                    Rectangle(x: 0.0, y: 100.0, w: 200.0, h: 20.0),
                    Point(x: 5.0, y: 5.0),
                ],
            )),
            Tiles((
                name: "Ground",
                tile_size: 16.0,
                width: 2,
                height: 1,
                tiles: [1, 0],
            )),
        ],
    ),
    player: (gravity: 800.0),
)
"#;

    #[test]
    fn test_parse_plain_ron() {
        let level = parse_level_data(SMALL_LEVEL.as_bytes()).unwrap();
        assert_eq!(level.map.name, "small");
        assert_eq!(level.map.spawn, Point::new(10.0, 20.0));
        assert_eq!(level.map.collision_rects().unwrap(), vec![Rect::new(0.0, 100.0, 200.0, 20.0)]);
        assert_eq!(level.map.tile_layers().count(), 1);
    }

    #[test]
    fn test_missing_settings_use_defaults() {
        let level = load_level_from_str(SMALL_LEVEL).unwrap();
        assert_eq!(level.player.gravity, 800.0);
        assert_eq!(level.player.jump_speed, PlayerSettings::default().jump_speed);
        assert_eq!(level.gun, GunSettings::default());
        assert_eq!(level.animation, AnimationSettings::default());
    }

    #[test]
    fn test_save_and_load_compressed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("level.ron");

        let level = create_default_level();
        save_level(&level, &path).unwrap();

        // Written file is brotli, not plain text
        let bytes = fs::read(&path).unwrap();
        assert!(!is_plain_ron(&bytes));

        let loaded = load_level(&path).unwrap();
        assert_eq!(loaded, level);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = load_level(dir.path().join("nope.ron"));
        assert!(matches!(result, Err(LevelError::IoError(_))));
    }

    #[test]
    fn test_parse_error() {
        let result = load_level_from_str("(map: (layers: [Nonsense]))");
        assert!(matches!(result, Err(LevelError::ParseError(_))));
    }

    #[test]
    fn test_rejects_negative_size() {
        let mut level = create_default_level();
        level.map.layers.push(Layer::Objects(ObjectGroup {
            name: COLLISION_LAYER.to_string(),
            objects: vec![MapObject::Rectangle { x: 0.0, y: 0.0, w: -5.0, h: 1.0 }],
        }));
        assert!(matches!(validate_level(&level), Err(LevelError::ValidationError(_))));
    }

    #[test]
    fn test_rejects_nan_spawn() {
        let mut level = create_default_level();
        level.map.spawn = Point::new(f32::NAN, 0.0);
        assert!(matches!(validate_level(&level), Err(LevelError::ValidationError(_))));
    }

    #[test]
    fn test_rejects_tile_count_mismatch() {
        let mut level = create_default_level();
        level.map.layers.push(Layer::Tiles(TileLayer {
            name: "Broken".to_string(),
            tile_size: 16.0,
            width: 4,
            height: 4,
            tiles: vec![1; 3],
        }));
        let err = validate_level(&level).unwrap_err();
        assert!(err.to_string().contains("tile count mismatch"));
        assert!(err.to_string().contains("'Broken'"));
    }

    #[test]
    fn test_rejects_too_many_layers() {
        let mut level = create_default_level();
        for i in 0..=limits::MAX_LAYERS {
            level.map.layers.push(Layer::Objects(ObjectGroup {
                name: format!("layer{}", i),
                objects: Vec::new(),
            }));
        }
        assert!(validate_level(&level).is_err());
    }

    #[test]
    fn test_bundled_level_is_valid() {
        let level = load_level_from_str(include_str!("../../assets/levels/plata.ron")).unwrap();
        assert_eq!(level.map.name, "plata");
        assert_eq!(level.map.spawn, Point::new(400.0, 280.0));
        assert!(level.map.collision_rects().unwrap().len() > 3);
    }

    #[test]
    fn test_plain_ron_with_header_comment_or_bom() {
        let commented = format!("// hand written\n{}", SMALL_LEVEL.trim_start());
        assert_eq!(parse_level_data(commented.as_bytes()).unwrap().map.name, "small");

        let extensions = format!("#![enable(implicit_some)]\n{}", SMALL_LEVEL.trim_start());
        assert_eq!(parse_level_data(extensions.as_bytes()).unwrap().map.name, "small");

        let mut bom = UTF8_BOM.to_vec();
        bom.extend_from_slice(SMALL_LEVEL.trim_start().as_bytes());
        assert_eq!(parse_level_data(&bom).unwrap().map.name, "small");
    }

    #[test]
    fn test_level_to_ron_parses_back() {
        let level = create_default_level();
        let text = level_to_ron(&level).unwrap();
        assert!(is_plain_ron(text.as_bytes()));
        assert_eq!(load_level_from_str(&text).unwrap(), level);
    }
}
