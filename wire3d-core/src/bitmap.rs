/// Monochrome frame buffer and plain-text PBM output
use log::debug;
use nalgebra::Point2;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Cell value for empty pixels
pub const BACKGROUND: u8 = 1;
/// Cell value for pixels covered by a vertex
pub const FOREGROUND: u8 = 0;

/// A height x width grid of 0/1 cells, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Bitmap {
    /// A bitmap with every cell set to [`BACKGROUND`]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![BACKGROUND; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn offset(&self, at: Point2<i32>) -> Option<usize> {
        let x = usize::try_from(at.x).ok()?;
        let y = usize::try_from(at.y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn get(&self, at: Point2<i32>) -> Option<u8> {
        self.offset(at).map(|i| self.cells[i])
    }

    /// Set a cell, returning false when `at` is outside the bitmap
    pub fn set(&mut self, at: Point2<i32>, value: u8) -> bool {
        match self.offset(at) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// Screen positions of every [`FOREGROUND`] cell
    pub fn foreground(&self) -> impl Iterator<Item = Point2<i32>> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == FOREGROUND)
            .map(move |(i, _)| Point2::new((i % self.width) as i32, (i / self.width) as i32))
    }

    /// Serialize as ASCII PBM (`P1`)
    pub fn write_pbm<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "P1")?;
        writeln!(writer, "{} {}", self.width, self.height)?;

        for row in self.cells.chunks(self.width.max(1)).take(self.height) {
            let mut first = true;
            for value in row {
                if !first {
                    writer.write_all(b" ")?;
                }
                write!(writer, "{}", value)?;
                first = false;
            }
            writer.write_all(b"\n")?;
        }

        writer.flush()
    }
}

/// Writes numbered frame files into one directory
#[derive(Debug, Clone)]
pub struct FrameWriter {
    directory: PathBuf,
    extension: String,
}

impl FrameWriter {
    pub fn new(directory: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            extension: extension.into(),
        }
    }

    /// Create the output directory if it does not exist yet
    pub fn prepare(&self) -> io::Result<()> {
        fs::create_dir_all(&self.directory)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// `<directory>/<index>.<extension>`
    pub fn path_for(&self, index: usize) -> PathBuf {
        self.directory.join(format!("{}.{}", index, self.extension))
    }

    pub fn write(&self, index: usize, bitmap: &Bitmap) -> io::Result<PathBuf> {
        let path = self.path_for(index);
        let file = File::create(&path)?;
        bitmap.write_pbm(BufWriter::new(file))?;
        debug!("wrote frame {} to {}", index, path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wire3d-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_new_bitmap_is_background() {
        let bitmap = Bitmap::new(7, 3);
        for y in 0..3 {
            for x in 0..7 {
                assert_eq!(bitmap.get(Point2::new(x, y)), Some(BACKGROUND));
            }
        }
        assert_eq!(bitmap.foreground().count(), 0);
    }

    #[test]
    fn test_set_rejects_outside_cells() {
        let mut bitmap = Bitmap::new(4, 2);
        assert!(bitmap.set(Point2::new(3, 1), FOREGROUND));
        assert!(!bitmap.set(Point2::new(4, 0), FOREGROUND));
        assert!(!bitmap.set(Point2::new(0, -1), FOREGROUND));
        assert_eq!(bitmap.foreground().collect::<Vec<_>>(), vec![Point2::new(3, 1)]);
    }

    #[test]
    fn test_pbm_layout() {
        let mut bitmap = Bitmap::new(3, 2);
        bitmap.set(Point2::new(1, 0), FOREGROUND);
        bitmap.set(Point2::new(2, 1), FOREGROUND);

        let mut out = Vec::new();
        bitmap.write_pbm(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "P1\n3 2\n1 0 1\n1 1 0\n");
    }

    #[test]
    fn test_frame_writer_numbers_files() {
        let dir = scratch_dir("frames");
        let writer = FrameWriter::new(dir.clone(), "ppm");
        writer.prepare().unwrap();

        let path = writer.write(1, &Bitmap::new(2, 1)).unwrap();
        assert_eq!(path, dir.join("1.ppm"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "P1\n2 1\n1 1\n");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_frame_writer_reports_missing_directory() {
        let dir = scratch_dir("missing").join("nested");
        let writer = FrameWriter::new(dir.clone(), "ppm");
        assert!(writer.write(1, &Bitmap::new(1, 1)).is_err());
    }
}
