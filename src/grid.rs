#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, dir: Dir) -> Self {
        let (dx, dy) = dir.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan(self, other: Pos) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// Candidate order used by direction selection; ties keep this order.
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }

    pub fn offset(self) -> (i32, i32) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }
}

/// Cell space derived from a viewport: `cols x rows` cells of `cell_size` pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Grid {
    pub cols: i32,
    pub rows: i32,
}

impl Grid {
    pub fn from_viewport(width: u32, height: u32, cell_size: u32) -> Self {
        let cell = cell_size.max(1);
        Self {
            cols: (width / cell).min(i32::MAX as u32) as i32,
            rows: (height / cell).min(i32::MAX as u32) as i32,
        }
    }

    pub fn contains(&self, p: Pos) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.cols && p.y < self.rows
    }

    /// Whether a straight agent of `length` cells fits with room to move and
    /// a row on either side of it.
    pub fn can_host(&self, length: usize) -> bool {
        (self.cols as i64) > length as i64 && self.rows >= 3
    }

    /// Width and height of the placement area, which excludes the outer ring.
    pub fn interior_span(&self) -> Option<(usize, usize)> {
        let w = self.cols - 2;
        let h = self.rows - 2;
        if w <= 0 || h <= 0 { None } else { Some((w as usize, h as usize)) }
    }
}
