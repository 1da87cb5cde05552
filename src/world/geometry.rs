//! Map geometry
//!
//! A map is a stack of layers: object groups (rectangles and points placed in
//! the level editor) and tile layers (a grid of tile ids used for drawing).
//! Coordinates are pixels with the origin at the top-left and y growing down,
//! the same convention as screen space.

use macroquad::math::Vec2;
use serde::{Serialize, Deserialize};

/// Name of the object group the player collides with
pub const COLLISION_LAYER: &str = "Collision";

/// Axis-aligned rectangle (origin at top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }
}

/// A point in map space (spawn locations, markers)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Something placed in an object group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapObject {
    Rectangle { x: f32, y: f32, w: f32, h: f32 },
    Point { x: f32, y: f32 },
}

impl MapObject {
    /// The object as a rectangle, `None` for anything that has no area
    pub fn as_rect(&self) -> Option<Rect> {
        match *self {
            MapObject::Rectangle { x, y, w, h } => Some(Rect::new(x, y, w, h)),
            MapObject::Point { .. } => None,
        }
    }
}

/// Named list of objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectGroup {
    pub name: String,
    #[serde(default)]
    pub objects: Vec<MapObject>,
}

impl ObjectGroup {
    /// Rectangle objects in file order (order matters for collision)
    pub fn rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.objects.iter().filter_map(MapObject::as_rect)
    }
}

/// Grid of tile ids, row-major. Tile id 0 means "no tile".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayer {
    pub name: String,
    /// Edge length of one tile in pixels
    pub tile_size: f32,
    /// Width in tiles
    pub width: usize,
    /// Height in tiles
    pub height: usize,
    pub tiles: Vec<u16>,
}

impl TileLayer {
    /// Non-empty tiles with their pixel rectangle
    pub fn iter_tiles(&self) -> impl Iterator<Item = (Rect, u16)> + '_ {
        let size = self.tile_size;
        let width = self.width.max(1);
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, &id)| id != 0)
            .map(move |(i, &id)| {
                let col = (i % width) as f32;
                let row = (i / width) as f32;
                (Rect::new(col * size, row * size, size, size), id)
            })
    }
}

/// One layer of a map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Layer {
    Objects(ObjectGroup),
    Tiles(TileLayer),
}

impl Layer {
    pub fn name(&self) -> &str {
        match self {
            Layer::Objects(group) => &group.name,
            Layer::Tiles(tiles) => &tiles.name,
        }
    }
}

fn default_spawn() -> Point {
    Point::new(400.0, 280.0)
}

/// A level map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Map {
    #[serde(default)]
    pub name: String,
    /// Player start (feet-center)
    #[serde(default = "default_spawn")]
    pub spawn: Point,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl Map {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spawn: default_spawn(),
            layers: Vec::new(),
        }
    }

    /// The object group named [`COLLISION_LAYER`], if the map has one
    pub fn collision_layer(&self) -> Option<&ObjectGroup> {
        self.layers.iter().find_map(|layer| match layer {
            Layer::Objects(group) if group.name == COLLISION_LAYER => Some(group),
            _ => None,
        })
    }

    /// Collision rectangles in file order, `None` when there is no collision layer
    pub fn collision_rects(&self) -> Option<Vec<Rect>> {
        self.collision_layer().map(|group| group.rects().collect())
    }

    pub fn tile_layers(&self) -> impl Iterator<Item = &TileLayer> {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Tiles(tiles) => Some(tiles),
            Layer::Objects(_) => None,
        })
    }
}

/// Built-in level map, used when no level file can be loaded
pub fn create_default_map() -> Map {
    let collision = ObjectGroup {
        name: COLLISION_LAYER.to_string(),
        objects: vec![
            // Ground
            MapObject::Rectangle { x: 0.0, y: 400.0, w: 1000.0, h: 200.0 },
            // Floating platforms
            MapObject::Rectangle { x: 300.0, y: 200.0, w: 400.0, h: 10.0 },
            MapObject::Rectangle { x: 250.0, y: 300.0, w: 100.0, h: 10.0 },
            MapObject::Rectangle { x: 650.0, y: 300.0, w: 100.0, h: 10.0 },
            // Side walls
            MapObject::Rectangle { x: -40.0, y: 0.0, w: 40.0, h: 600.0 },
            MapObject::Rectangle { x: 1000.0, y: 0.0, w: 40.0, h: 600.0 },
        ],
    };

    let mut map = Map::new("default");
    map.layers.push(Layer::Objects(collision));
    map
}
