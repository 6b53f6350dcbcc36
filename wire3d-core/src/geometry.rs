/// Geometry primitives for wireframe rendering
use nalgebra::Point3;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::{Error, Result};

/// One of the three coordinate axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn slot(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Raised when a component is addressed by something other than 0-2 or x/y/z
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisError {
    Index(usize),
    Letter(char),
}

impl fmt::Display for AxisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisError::Index(i) => write!(f, "axis out of range [0-2]: {}", i),
            AxisError::Letter(c) => write!(f, "axis out of range (x, y, z): {:?}", c),
        }
    }
}

impl std::error::Error for AxisError {}

impl TryFrom<usize> for Axis {
    type Error = AxisError;

    fn try_from(index: usize) -> std::result::Result<Self, Self::Error> {
        match index {
            0 => Ok(Axis::X),
            1 => Ok(Axis::Y),
            2 => Ok(Axis::Z),
            other => Err(AxisError::Index(other)),
        }
    }
}

impl TryFrom<char> for Axis {
    type Error = AxisError;

    fn try_from(letter: char) -> std::result::Result<Self, Self::Error> {
        match letter {
            'x' | 'X' => Ok(Axis::X),
            'y' | 'Y' => Ok(Axis::Y),
            'z' | 'Z' => Ok(Axis::Z),
            other => Err(AxisError::Letter(other)),
        }
    }
}

/// A point in model space
///
/// Transforms never modify a point in place; see [`crate::transform`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    position: Point3<f64>,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
        }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn z(&self) -> f64 {
        self.position.z
    }

    /// Read a component by index (`usize`) or letter (`char`)
    pub fn get<A>(&self, axis: A) -> std::result::Result<f64, AxisError>
    where
        A: TryInto<Axis, Error = AxisError>,
    {
        let axis = axis.try_into()?;
        Ok(self[axis])
    }

    /// Borrow a component mutably by index (`usize`) or letter (`char`)
    pub fn get_mut<A>(&mut self, axis: A) -> std::result::Result<&mut f64, AxisError>
    where
        A: TryInto<Axis, Error = AxisError>,
    {
        let axis = axis.try_into()?;
        Ok(&mut self[axis])
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::origin()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y, 0.0)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(f64::from(x), f64::from(y), 0.0)
    }
}

impl From<[f64; 3]> for Point {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl Index<Axis> for Point {
    type Output = f64;

    fn index(&self, axis: Axis) -> &f64 {
        &self.position.coords[axis.slot()]
    }
}

impl IndexMut<Axis> for Point {
    fn index_mut(&mut self, axis: Axis) -> &mut f64 {
        &mut self.position.coords[axis.slot()]
    }
}

/// Panics with an [`AxisError`] message for indices above 2
impl Index<usize> for Point {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        match Axis::try_from(index) {
            Ok(axis) => &self[axis],
            Err(err) => panic!("{}", err),
        }
    }
}

impl IndexMut<usize> for Point {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        match Axis::try_from(index) {
            Ok(axis) => &mut self[axis],
            Err(err) => panic!("{}", err),
        }
    }
}

/// A closed loop of vertex indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    indices: Vec<usize>,
}

impl Face {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Consecutive index pairs, closing back to the first index
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.indices.len();
        (0..n).map(move |i| (self.indices[i], self.indices[(i + 1) % n]))
    }
}

impl From<[usize; 3]> for Face {
    fn from(indices: [usize; 3]) -> Self {
        Self::new(indices.to_vec())
    }
}

/// Vertices plus the faces that connect them
///
/// Built once and read-only afterwards; every face index is known to be valid.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Point>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Validate and assemble a mesh
    pub fn new(vertices: Vec<Point>, faces: Vec<Face>) -> Result<Self> {
        if vertices.is_empty() || faces.is_empty() {
            return Err(Error::EmptyMesh {
                vertices: vertices.len(),
                faces: faces.len(),
            });
        }

        for (face_number, face) in faces.iter().enumerate() {
            if let Some(&index) = face.indices().iter().find(|&&i| i >= vertices.len()) {
                return Err(Error::FaceIndex {
                    face: face_number,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }

        Ok(Self { vertices, faces })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Box of half-width `w` (x and z) and half-height `h` with quad faces
    pub fn demo_box(w: f64, h: f64) -> Self {
        let vertices = vec![
            Point::new(-w, -h, w),
            Point::new(w, -h, w),
            Point::new(w, h, w),
            Point::new(-w, h, w),
            Point::new(-w, -h, -w),
            Point::new(-w, h, -w),
            Point::new(w, h, -w),
            Point::new(w, -h, -w),
        ];

        let faces = vec![
            // Front
            Face::new(vec![0, 1, 2, 3]),
            // Back
            Face::new(vec![7, 6, 5, 4]),
            // Bottom
            Face::new(vec![0, 1, 7, 4]),
            // Top
            Face::new(vec![3, 2, 6, 5]),
            // Left
            Face::new(vec![0, 4, 5, 3]),
            // Right
            Face::new(vec![1, 2, 6, 7]),
        ];

        Self { vertices, faces }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_defaults_to_origin() {
        let p = Point::origin();
        assert_eq!((p.x(), p.y(), p.z()), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_point_from_pair() {
        let p = Point::from((1.5, -2.0));
        assert_eq!((p.x(), p.y(), p.z()), (1.5, -2.0, 0.0));

        let q = Point::from((3, 4));
        assert_eq!((q.x(), q.y(), q.z()), (3.0, 4.0, 0.0));
    }

    #[test]
    fn test_access_by_index_and_letter() {
        let p = Point::new(1.0, 2.0, 3.0);
        assert_eq!(p.get(0usize), Ok(1.0));
        assert_eq!(p.get('Y'), Ok(2.0));
        assert_eq!(p.get('z'), Ok(3.0));
        assert_eq!(p[2], 3.0);
        assert_eq!(p[Axis::X], 1.0);
    }

    #[test]
    fn test_out_of_range_access_fails() {
        let mut p = Point::new(1.0, 2.0, 3.0);
        assert_eq!(p.get(3usize), Err(AxisError::Index(3)));
        assert_eq!(p.get('w'), Err(AxisError::Letter('w')));
        assert!(p.get_mut(7usize).is_err());
    }

    #[test]
    #[should_panic(expected = "axis out of range")]
    fn test_index_panics_past_z() {
        let p = Point::new(1.0, 2.0, 3.0);
        let _w = p[3];
    }

    #[test]
    fn test_single_axis_update() {
        let mut p = Point::new(1.0, 2.0, 3.0);
        *p.get_mut('x').unwrap() = 9.0;
        p[1] = 8.0;
        assert_eq!(p, Point::new(9.0, 8.0, 3.0));
    }

    #[test]
    fn test_face_edges_close_the_loop() {
        let face = Face::from([4, 5, 6]);
        let edges: Vec<_> = face.edges().collect();
        assert_eq!(edges, vec![(4, 5), (5, 6), (6, 4)]);
    }

    #[test]
    fn test_mesh_rejects_empty_parts() {
        let no_faces = Mesh::new(vec![Point::origin()], vec![]);
        assert!(matches!(no_faces, Err(Error::EmptyMesh { vertices: 1, faces: 0 })));

        let no_vertices = Mesh::new(vec![], vec![Face::from([0, 1, 2])]);
        assert!(matches!(no_vertices, Err(Error::EmptyMesh { vertices: 0, .. })));
    }

    #[test]
    fn test_mesh_rejects_dangling_index() {
        let vertices = vec![Point::origin(); 3];
        let result = Mesh::new(vertices, vec![Face::from([0, 1, 3])]);
        assert!(matches!(
            result,
            Err(Error::FaceIndex {
                face: 0,
                index: 3,
                vertex_count: 3
            })
        ));
    }

    #[test]
    fn test_demo_box_is_valid() {
        let mesh = Mesh::demo_box(200.0, 100.0);
        let rebuilt = Mesh::new(mesh.vertices().to_vec(), mesh.faces().to_vec());
        assert!(rebuilt.is_ok());
        assert_eq!(mesh.vertices().len(), 8);
        assert!(mesh.faces().iter().all(|f| f.len() == 4));
    }
}
