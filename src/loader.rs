//! Mesh loading for the transform pipeline.
//!
//! Loaders parse a model file into [`MeshData`] and validate it before it
//! reaches an [`Object3D`](crate::Object3D): every face index must be in
//! range. Malformed input is a construction-time [`MeshError`]; the
//! transform core itself never re-checks indices.
//!
//! Supported formats:
//!
//! | Format | Extensions | Notes |
//! |--------|------------|-------|
//! | OBJ    | `.obj`     | `v`/`vt`/`f` records; quads are split into two triangles |
//! | STL    | `.stl`     | Binary and ASCII via `stl_io`; no texture coordinates |
//!
//! # Example
//!
//! ```
//! use gimbal::loader;
//!
//! let source = "\
//! v -1.0 0.0 0.0
//! v 1.0 0.0 0.0
//! v 0.0 1.0 0.0
//! f 1 2 3
//! ";
//! let mesh = loader::parse_obj(source).unwrap();
//! assert_eq!(mesh.positions.len(), 3);
//! ```

use std::fmt;
use std::path::Path;

use glam::{Vec2, Vec3};
use log::debug;

use crate::mesh::{Face, FaceVertex, MeshData};

/// Errors from loading or validating mesh data.
#[derive(Debug)]
pub enum MeshError {
    /// File could not be read.
    Io(std::io::Error),
    /// File format could not be determined from the extension.
    UnknownFormat(String),
    /// A record in the file could not be parsed.
    Parse(String),
    /// A face references a vertex or texcoord that does not exist.
    IndexOutOfRange {
        /// `"vertex"` or `"texcoord"`.
        kind: &'static str,
        /// The offending zero-based index.
        index: usize,
        /// Length of the list being indexed.
        len: usize,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::Io(e) => write!(f, "IO error: {}", e),
            MeshError::UnknownFormat(ext) => write!(f, "Unknown mesh format: '{}'", ext),
            MeshError::Parse(msg) => write!(f, "Parse error: {}", msg),
            MeshError::IndexOutOfRange { kind, index, len } => {
                write!(f, "Face {} index {} out of range (have {})", kind, index, len)
            }
        }
    }
}

impl std::error::Error for MeshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeshError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MeshError {
    fn from(e: std::io::Error) -> Self {
        MeshError::Io(e)
    }
}

impl MeshData {
    /// Checks that every face index points into the mesh's lists.
    ///
    /// Loaders call this after parsing; hand-built meshes can call it
    /// before constructing an object. The transform core assumes it holds.
    pub fn validate(&self) -> Result<(), MeshError> {
        for face in &self.faces {
            for corner in &face.corners {
                if corner.vertex >= self.positions.len() {
                    return Err(MeshError::IndexOutOfRange {
                        kind: "vertex",
                        index: corner.vertex,
                        len: self.positions.len(),
                    });
                }
                if let Some(tc) = corner.texcoord {
                    if tc >= self.texcoords.len() {
                        return Err(MeshError::IndexOutOfRange {
                            kind: "texcoord",
                            index: tc,
                            len: self.texcoords.len(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Loads a mesh file, detecting the format from its extension.
pub fn load(path: impl AsRef<Path>) -> Result<MeshData, MeshError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "obj" => load_obj(path),
        "stl" => load_stl(path),
        _ => Err(MeshError::UnknownFormat(ext)),
    }
}

/// Loads a Wavefront OBJ file.
pub fn load_obj(path: impl AsRef<Path>) -> Result<MeshData, MeshError> {
    let source = std::fs::read_to_string(path)?;
    parse_obj(&source)
}

/// Parses Wavefront OBJ source.
///
/// Handles `v` (position), `vt` (texcoord), and `f` (face) records; OBJ
/// indices are 1-based and an `f` corner may be `v`, `v/vt`, or `v//vn`
/// (normals are skipped). Triangles pass through; quads are fan-split into
/// `[0,1,2]` and `[0,2,3]`. Anything else in a face is an error. All other
/// record types are ignored.
pub fn parse_obj(source: &str) -> Result<MeshData, MeshError> {
    let mut positions = Vec::new();
    let mut texcoords = Vec::new();
    let mut faces = Vec::new();

    for (number, line) in source.lines().enumerate() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("v ") {
            positions.push(Vec3::from(parse_floats::<3>(rest, number + 1)?));
        } else if let Some(rest) = line.strip_prefix("vt ") {
            texcoords.push(Vec2::from(parse_floats::<2>(rest, number + 1)?));
        } else if let Some(rest) = line.strip_prefix("f ") {
            let corners = rest
                .split_whitespace()
                .map(|entry| parse_face_corner(entry, number + 1))
                .collect::<Result<Vec<_>, _>>()?;

            match corners.len() {
                3 => faces.push(Face {
                    corners: [corners[0], corners[1], corners[2]],
                }),
                4 => {
                    faces.push(Face {
                        corners: [corners[0], corners[1], corners[2]],
                    });
                    faces.push(Face {
                        corners: [corners[0], corners[2], corners[3]],
                    });
                }
                n => {
                    return Err(MeshError::Parse(format!(
                        "line {}: face with {} corners (only triangles and quads)",
                        number + 1,
                        n
                    )));
                }
            }
        }
    }

    let mesh = MeshData::new(positions, texcoords, faces);
    mesh.validate()?;
    debug!(
        "parsed OBJ: {} vertices, {} texcoords, {} triangles",
        mesh.positions.len(),
        mesh.texcoords.len(),
        mesh.faces.len()
    );
    Ok(mesh)
}

/// Loads an STL file (binary or ASCII).
pub fn load_stl(path: impl AsRef<Path>) -> Result<MeshData, MeshError> {
    let file = std::fs::File::open(path)?;
    let mut reader = std::io::BufReader::new(file);
    parse_stl(&mut reader)
}

/// Parses STL data from a reader.
///
/// STL carries no texture coordinates, so every face is position-only.
pub fn parse_stl<R: std::io::Read + std::io::Seek>(reader: &mut R) -> Result<MeshData, MeshError> {
    let stl = stl_io::read_stl(reader)
        .map_err(|e| MeshError::Parse(format!("STL parse error: {}", e)))?;

    let positions = stl
        .vertices
        .iter()
        .map(|v| {
            let p: [f32; 3] = (*v).into();
            Vec3::from(p)
        })
        .collect();

    let faces = stl
        .faces
        .iter()
        .map(|tri| Face::from_indices(tri.vertices[0], tri.vertices[1], tri.vertices[2]))
        .collect();

    let mesh = MeshData::new(positions, Vec::new(), faces);
    mesh.validate()?;
    debug!(
        "parsed STL: {} vertices, {} triangles",
        mesh.positions.len(),
        mesh.faces.len()
    );
    Ok(mesh)
}

fn parse_floats<const N: usize>(rest: &str, line: usize) -> Result<[f32; N], MeshError> {
    let mut out = [0.0; N];
    let mut parts = rest.split_whitespace();
    for slot in &mut out {
        let part = parts.next().ok_or_else(|| {
            MeshError::Parse(format!("line {}: expected {} coordinates", line, N))
        })?;
        *slot = part.parse().map_err(|_| {
            MeshError::Parse(format!("line {}: bad coordinate '{}'", line, part))
        })?;
    }
    Ok(out)
}

/// Parses one face corner: `v`, `v/vt`, or `v/vt/vn` with `vt` optional.
fn parse_face_corner(entry: &str, line: usize) -> Result<FaceVertex, MeshError> {
    let mut parts = entry.split('/');

    let vertex = parts
        .next()
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|i| *i >= 1)
        .ok_or_else(|| {
            MeshError::Parse(format!("line {}: bad face entry '{}'", line, entry))
        })?;

    let texcoord = match parts.next() {
        None | Some("") => None,
        Some(s) => Some(s.parse::<usize>().ok().filter(|i| *i >= 1).ok_or_else(
            || MeshError::Parse(format!("line {}: bad texcoord index '{}'", line, s)),
        )?),
    };

    // OBJ indices are 1-based.
    Ok(FaceVertex {
        vertex: vertex - 1,
        texcoord: texcoord.map(|t| t - 1),
    })
}
