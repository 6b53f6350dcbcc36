/// Wavefront OBJ loader (vertex and triangle face directives only)
use log::{info, warn};
use nom::{
    bytes::complete::{tag, take_till},
    character::complete::{char, digit1, space1},
    combinator::{map_res, opt},
    number::complete::double,
    sequence::preceded,
    IResult,
};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::geometry::{Face, Mesh, Point};

/// Per-axis scale applied to every `v` record as it is read
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexScale {
    pub x: f64,
    pub y: f64,
    pub y_offset: f64,
    pub z: f64,
}

impl VertexScale {
    pub fn apply(&self, x: f64, y: f64, z: f64) -> Point {
        Point::new(x * self.x, y * self.y + self.y_offset, z * self.z)
    }
}

impl Default for VertexScale {
    fn default() -> Self {
        Self {
            x: 100.0,
            y: 80.0,
            y_offset: -10.0,
            z: 90.0,
        }
    }
}

/// Read and parse an OBJ file from disk
pub fn load_obj(path: impl AsRef<Path>, scale: &VertexScale) -> Result<Mesh> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let mesh = parse_obj(&text, scale)?;
    info!(
        "loaded {}: {} vertices, {} faces",
        path.display(),
        mesh.vertices().len(),
        mesh.faces().len()
    );
    Ok(mesh)
}

/// Parse OBJ text into a validated mesh
///
/// Comments, material libraries, normals, texture coordinates and any other
/// directive are skipped. Face references are converted from 1-based to 0-based.
pub fn parse_obj(input: &str, scale: &VertexScale) -> Result<Mesh> {
    let mut vertices = Vec::new();
    let mut faces = Vec::new();

    for (number, raw) in input.lines().enumerate() {
        let line_number = number + 1;
        let line = raw.trim();

        if line.starts_with('#') || line.contains("mtllib") {
            continue;
        }

        match line.split_whitespace().next() {
            Some("v") => {
                let (_, (x, y, z)) = vertex_line(line).map_err(|e| Error::Parse {
                    line: line_number,
                    message: format!("malformed vertex: {}", e),
                })?;
                let vertex = scale.apply(x, y, z);
                if ![vertex.x(), vertex.y(), vertex.z()].iter().all(|c| c.is_finite()) {
                    return Err(Error::Parse {
                        line: line_number,
                        message: format!("non-finite vertex component: {} {} {}", x, y, z),
                    });
                }
                vertices.push(vertex);
            }
            Some("f") => {
                let (rest, refs) = face_line(line).map_err(|e| Error::Parse {
                    line: line_number,
                    message: format!("malformed face: {}", e),
                })?;
                if !rest.trim().is_empty() {
                    warn!(
                        "line {}: only the first three face references are used",
                        line_number
                    );
                }

                let mut indices = Vec::with_capacity(refs.len());
                for reference in refs {
                    let index = reference.checked_sub(1).ok_or_else(|| Error::Parse {
                        line: line_number,
                        message: "face references start at 1".to_string(),
                    })?;
                    indices.push(index);
                }
                faces.push(Face::new(indices));
            }
            _ => {}
        }
    }

    Mesh::new(vertices, faces)
}

fn vertex_line(input: &str) -> IResult<&str, (f64, f64, f64)> {
    let (input, _) = tag("v")(input)?;
    let (input, x) = preceded(space1, double)(input)?;
    let (input, y) = preceded(space1, double)(input)?;
    let (input, z) = preceded(space1, double)(input)?;
    Ok((input, (x, y, z)))
}

fn face_line(input: &str) -> IResult<&str, [usize; 3]> {
    let (input, _) = tag("f")(input)?;
    let (input, a) = preceded(space1, vertex_ref)(input)?;
    let (input, b) = preceded(space1, vertex_ref)(input)?;
    let (input, c) = preceded(space1, vertex_ref)(input)?;
    Ok((input, [a, b, c]))
}

/// `7`, `7/2`, `7//4` or `7/2/4`; only the vertex index is kept
fn vertex_ref(input: &str) -> IResult<&str, usize> {
    let (input, index) = map_res(digit1, str::parse::<usize>)(input)?;
    let (input, _) = opt(preceded(char('/'), take_till(|c: char| c.is_whitespace())))(input)?;
    Ok((input, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TRIANGLE: &str = "\
# a single triangle
mtllib scene.mtl
o Triangle
v 1.0 0.5 -1.0
v 0.0 0.0 0.0
vn 0.0 0.0 1.0
vt 0.5 0.5
v -1 1 2
f 1 2 3
";

    #[test]
    fn test_parse_triangle() {
        let mesh = parse_obj(TRIANGLE, &VertexScale::default()).unwrap();
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.faces(), &[Face::from([0, 1, 2])]);
    }

    #[test]
    fn test_vertices_are_scaled() {
        let mesh = parse_obj(TRIANGLE, &VertexScale::default()).unwrap();
        let first = mesh.vertices()[0];
        assert_relative_eq!(first.x(), 100.0);
        assert_relative_eq!(first.y(), 30.0);
        assert_relative_eq!(first.z(), -90.0);

        let origin = mesh.vertices()[1];
        assert_relative_eq!(origin.y(), -10.0);
    }

    #[test]
    fn test_face_references_with_slashes() {
        let input = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 3/1/1 1//2 2/5\n";
        let mesh = parse_obj(input, &VertexScale::default()).unwrap();
        assert_eq!(mesh.faces()[0].indices(), &[2, 0, 1]);
    }

    #[test]
    fn test_extra_face_references_are_dropped() {
        let input = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1 2 3 4\n";
        let mesh = parse_obj(input, &VertexScale::default()).unwrap();
        assert_eq!(mesh.faces()[0].len(), 3);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let result = parse_obj("# nothing here\n", &VertexScale::default());
        assert!(matches!(result, Err(Error::EmptyMesh { vertices: 0, faces: 0 })));

        let result = parse_obj("v 0 0 0\n", &VertexScale::default());
        assert!(matches!(result, Err(Error::EmptyMesh { vertices: 1, faces: 0 })));
    }

    #[test]
    fn test_malformed_lines_report_line_number() {
        let result = parse_obj("v 0 0 0\nv 1 x 0\n", &VertexScale::default());
        assert!(matches!(result, Err(Error::Parse { line: 2, .. })));

        let result = parse_obj("v 0 0 0\nf 1 2\n", &VertexScale::default());
        assert!(matches!(result, Err(Error::Parse { line: 2, .. })));

        let result = parse_obj("v 0 0 0\nf 0 1 1\n", &VertexScale::default());
        assert!(matches!(result, Err(Error::Parse { line: 2, .. })));
    }

    #[test]
    fn test_non_finite_vertices_are_rejected() {
        let faces = "\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        // the last one only overflows once scaled
        for vertex in ["v nan 0 0", "v 0 inf 0", "v 0 0 1e400", "v 1e307 0 0"] {
            let input = format!("{}{}", vertex, faces);
            match parse_obj(&input, &VertexScale::default()) {
                Err(Error::Parse { line, message }) => {
                    assert_eq!(line, 1);
                    assert!(message.contains("non-finite"), "{}: {}", vertex, message);
                }
                other => panic!("{} was accepted: {:?}", vertex, other.map(|_| ())),
            }
        }
    }

    #[test]
    fn test_out_of_range_face_is_rejected() {
        let result = parse_obj("v 0 0 0\nf 1 1 2\n", &VertexScale::default());
        assert!(matches!(result, Err(Error::FaceIndex { index: 1, .. })));
    }
}
