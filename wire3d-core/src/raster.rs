/// Character-grid display surfaces and line rasterization
use nalgebra::Point2;
use std::io;

/// Glyph drawn along edges
pub const EDGE_GLYPH: char = 'H';
/// Glyph drawn on projected vertices
pub const VERTEX_GLYPH: char = '@';

/// A grid of character cells addressed in screen coordinates (x = column, y = row)
///
/// Writes that fall outside the surface are dropped.
pub trait Surface {
    fn clear(&mut self) -> io::Result<()>;

    fn put(&mut self, at: Point2<i32>, glyph: char) -> io::Result<()>;

    /// Width and height in cells
    fn dimensions(&self) -> (u32, u32);

    /// Write `text` starting at `at`, clipped at the right edge
    fn print(&mut self, at: Point2<i32>, text: &str) -> io::Result<()> {
        for (offset, glyph) in text.chars().enumerate() {
            let x = at.x.saturating_add(offset as i32);
            self.put(Point2::new(x, at.y), glyph)?;
        }
        Ok(())
    }

    /// Make pending writes visible
    fn refresh(&mut self) -> io::Result<()>;
}

/// In-memory surface, used for headless rendering and tests
#[derive(Debug, Clone)]
pub struct GlyphGrid {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl GlyphGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    fn offset(&self, at: Point2<i32>) -> Option<usize> {
        let x = usize::try_from(at.x).ok()?;
        let y = usize::try_from(at.y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn glyph_at(&self, at: Point2<i32>) -> Option<char> {
        self.offset(at).map(|i| self.cells[i])
    }

    /// Every non-blank cell with its glyph, row by row
    pub fn marked(&self) -> impl Iterator<Item = (Point2<i32>, char)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != ' ')
            .map(move |(i, &c)| {
                let at = Point2::new((i % self.width) as i32, (i / self.width) as i32);
                (at, c)
            })
    }

    /// One string per row
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().collect())
    }
}

impl Surface for GlyphGrid {
    fn clear(&mut self) -> io::Result<()> {
        self.cells.fill(' ');
        Ok(())
    }

    fn put(&mut self, at: Point2<i32>, glyph: char) -> io::Result<()> {
        if let Some(i) = self.offset(at) {
            self.cells[i] = glyph;
        }
        Ok(())
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }

    fn refresh(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Integer Bresenham walk between two screen points
///
/// Yields the start point and every stepped point through `to`, so a line covers
/// `max(|dx|, |dy|) + 1` points. A zero-length line yields nothing.
///
/// Points are addressed by their step count along the major axis, so a walk can start
/// or stop anywhere along the line without visiting the points before it.
#[derive(Debug, Clone)]
pub struct Line {
    start: Point2<i32>,
    sx: i64,
    sy: i64,
    major: i64,
    minor: i64,
    x_major: bool,
    next: i64,
    last: i64,
}

impl Line {
    pub fn new(from: Point2<i32>, to: Point2<i32>) -> Self {
        let dx = i64::from(to.x) - i64::from(from.x);
        let dy = i64::from(to.y) - i64::from(from.y);
        let x_major = dx.abs() >= dy.abs();
        let (major, minor) = if x_major {
            (dx.abs(), dy.abs())
        } else {
            (dy.abs(), dx.abs())
        };

        Self {
            start: from,
            sx: if dx > 0 { 1 } else { -1 },
            sy: if dy > 0 { 1 } else { -1 },
            major,
            minor,
            x_major,
            next: 0,
            last: if from == to { -1 } else { major },
        }
    }

    /// Keep only the points inside `0..width` by `0..height`
    ///
    /// The points left are exactly the in-bounds points of the full walk, in the same
    /// order.
    pub fn clipped(mut self, width: u32, height: u32) -> Self {
        let (major_limit, minor_limit) = if self.x_major {
            (width, height)
        } else {
            (height, width)
        };
        let (major_origin, minor_origin, major_sign, minor_sign) = if self.x_major {
            (self.start.x, self.start.y, self.sx, self.sy)
        } else {
            (self.start.y, self.start.x, self.sy, self.sx)
        };

        // The major coordinate moves by one cell per step
        let (low, high) = steps_within(i64::from(major_origin), major_sign, major_limit);
        self.next = self.next.max(low);
        self.last = self.last.min(high);
        if self.next > self.last {
            return self;
        }

        // The minor coordinate never moves backwards, so its in-bounds steps are a range too
        let (low, high) = steps_within(i64::from(minor_origin), minor_sign, minor_limit);
        let first = self.first_step(|q| q >= low);
        let past = self.first_step(|q| q > high);
        self.next = first;
        self.last = past - 1;
        self
    }

    /// Minor-axis steps taken by the time the major axis has taken `n`
    fn minor_steps(&self, n: i64) -> i64 {
        let numerator = 2 * i128::from(self.minor) * i128::from(n) - i128::from(self.major);
        let denominator = 2 * i128::from(self.major);
        let floor = numerator.div_euclid(denominator);
        let ceil = if numerator.rem_euclid(denominator) == 0 {
            floor
        } else {
            floor + 1
        };
        ceil as i64
    }

    /// First remaining step whose minor-axis count satisfies `accept`, or one past the end
    fn first_step(&self, accept: impl Fn(i64) -> bool) -> i64 {
        let (mut low, mut high) = (self.next, self.last + 1);
        while low < high {
            let mid = low + (high - low) / 2;
            if accept(self.minor_steps(mid)) {
                high = mid;
            } else {
                low = mid + 1;
            }
        }
        low
    }

    fn point_at(&self, n: i64) -> Point2<i32> {
        let q = self.minor_steps(n);
        let (x, y) = if self.x_major {
            (self.sx * n, self.sy * q)
        } else {
            (self.sx * q, self.sy * n)
        };
        // Every point lies between the two i32 endpoints
        Point2::new(
            (i64::from(self.start.x) + x) as i32,
            (i64::from(self.start.y) + y) as i32,
        )
    }
}

/// Step counts `k` for which `origin + sign * k` falls in `0..limit`, as an inclusive range
fn steps_within(origin: i64, sign: i64, limit: u32) -> (i64, i64) {
    let top = i64::from(limit) - 1;
    if sign > 0 {
        (-origin, top - origin)
    } else {
        (origin - top, origin)
    }
}

impl Iterator for Line {
    type Item = Point2<i32>;

    fn next(&mut self) -> Option<Point2<i32>> {
        if self.next > self.last {
            return None;
        }
        let point = self.point_at(self.next);
        self.next += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.last - self.next + 1).unwrap_or(0);
        (remaining, Some(remaining))
    }
}

/// Draw a straight line of `glyph` from `from` to `to`
///
/// Only the part of the line inside the surface is walked, however far away the
/// endpoints are.
pub fn draw_line<S: Surface + ?Sized>(
    surface: &mut S,
    from: Point2<i32>,
    to: Point2<i32>,
    glyph: char,
) -> io::Result<()> {
    let (width, height) = surface.dimensions();
    for point in Line::new(from, to).clipped(width, height) {
        surface.put(point, glyph)?;
    }
    Ok(())
}
