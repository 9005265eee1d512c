use rand::Rng;

pub const SHAPE_COUNT: usize = 7;
pub const DIRECTION_COUNT: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

const fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

// Spawn orientation of every base shape, relative to the bounding box origin
const BASE_SHAPES: [[Point; 4]; SHAPE_COUNT] = [
    [p(0, 0), p(1, 0), p(2, 0), p(0, 1)],
    [p(0, 0), p(1, 0), p(2, 0), p(2, 1)],
    [p(0, 0), p(0, 1), p(0, 2), p(0, 3)],
    [p(0, 0), p(0, 1), p(1, 0), p(1, 1)],
    [p(1, 0), p(0, 1), p(1, 1), p(2, 1)],
    [p(0, 0), p(1, 0), p(1, 1), p(2, 1)],
    [p(1, 0), p(2, 0), p(0, 1), p(1, 1)],
];

/// The four occupied cells of a tetromino plus its bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape {
    cells: [Point; 4],
    width: i32,
    height: i32,
}

impl Shape {
    pub fn new(cells: [Point; 4]) -> Self {
        let width = cells.iter().map(|c| c.x).max().unwrap_or(0) + 1;
        let height = cells.iter().map(|c| c.y).max().unwrap_or(0) + 1;
        Self { cells, width, height }
    }

    pub fn cells(&self) -> &[Point; 4] {
        &self.cells
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Absolute board positions of the cells when the shape sits at `(x, y)`.
    pub fn blocks_at(&self, x: i32, y: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells.iter().map(move |c| (x + c.x, y + c.y))
    }
}

/// Rotates a shape 90° clockwise.
///
/// Every cell `(x, y)` becomes `(-y, x)`, then the set is shifted right so the
/// smallest x is 0 again. The y axis never needs normalizing since it comes
/// from the old x, which is already non-negative.
pub fn rotate(shape: &Shape) -> Shape {
    let mut cells = shape.cells.map(|c| Point::new(-c.y, c.x));
    let min_x = cells.iter().map(|c| c.x).min().unwrap_or(0);
    for cell in cells.iter_mut() {
        cell.x -= min_x;
    }
    Shape::new(cells)
}

/// Which base shape and which of its rotations a piece uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapeInfo {
    pub shape_type: usize,
    pub direction: usize,
}

impl ShapeInfo {
    pub fn new(shape_type: usize, direction: usize) -> Self {
        Self { shape_type, direction }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            shape_type: rng.gen_range(0..SHAPE_COUNT),
            direction: rng.gen_range(0..DIRECTION_COUNT),
        }
    }

    /// The same shape turned one step clockwise.
    pub fn rotated(self) -> Self {
        Self {
            shape_type: self.shape_type,
            direction: (self.direction + 1) % DIRECTION_COUNT,
        }
    }
}

/// All rotation variants of all base shapes, computed once.
#[derive(Clone, Debug)]
pub struct ShapeCatalog {
    shapes: [[Shape; DIRECTION_COUNT]; SHAPE_COUNT],
}

impl ShapeCatalog {
    pub fn new() -> Self {
        let shapes = BASE_SHAPES.map(|cells| {
            let spawn = Shape::new(cells);
            let right = rotate(&spawn);
            let reverse = rotate(&right);
            let left = rotate(&reverse);
            [spawn, right, reverse, left]
        });
        Self { shapes }
    }

    /// Panics if `shape_type >= SHAPE_COUNT` or `direction >= DIRECTION_COUNT`.
    pub fn get(&self, shape_type: usize, direction: usize) -> &Shape {
        &self.shapes[shape_type][direction]
    }

    pub fn shape(&self, info: ShapeInfo) -> &Shape {
        self.get(info.shape_type, info.direction)
    }
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// A shape variant placed on (or above) the board with a color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub info: ShapeInfo,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
    pub color: u8,
}

impl Piece {
    pub fn new(catalog: &ShapeCatalog, info: ShapeInfo, color: u8) -> Self {
        Self {
            info,
            shape: *catalog.shape(info),
            x: 0,
            y: 0,
            color,
        }
    }

    pub fn random<R: Rng + ?Sized>(catalog: &ShapeCatalog, rng: &mut R, colors: u8) -> Self {
        let info = ShapeInfo::random(rng);
        let color = rng.gen_range(1..=colors);
        Self::new(catalog, info, color)
    }

    pub fn get_blocks(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.blocks_at(self.x, self.y)
    }
}

/// Offset that centers something of `inner` length inside `outer`.
pub fn center(outer: i32, inner: i32) -> i32 {
    (outer - inner).div_euclid(2)
}
