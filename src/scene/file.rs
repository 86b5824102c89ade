//! Scene loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable scene files.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ObjectSpec, Scene};

/// On-disk scene description: object specs only, meshes are rebuilt on
/// load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    pub objects: Vec<ObjectSpec>,
}

/// Error type for scene loading
#[derive(Debug)]
pub enum SceneError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
}

impl From<std::io::Error> for SceneError {
    fn from(e: std::io::Error) -> Self {
        SceneError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for SceneError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneError::ParseError(e)
    }
}

impl From<ron::Error> for SceneError {
    fn from(e: ron::Error) -> Self {
        SceneError::SerializeError(e)
    }
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::IoError(e) => write!(f, "IO error: {}", e),
            SceneError::ParseError(e) => write!(f, "Parse error: {}", e),
            SceneError::SerializeError(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneError {}

/// Load a scene from a RON file and build its meshes
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
    let contents = fs::read_to_string(path)?;
    load_scene_from_str(&contents)
}

/// Load a scene from a RON string (for embedded scenes or testing)
pub fn load_scene_from_str(s: &str) -> Result<Scene, SceneError> {
    let file: SceneFile = ron::from_str(s)?;
    Ok(Scene {
        objects: file.objects.iter().map(ObjectSpec::build).collect(),
    })
}

/// Save a scene description to a RON file
pub fn save_scene<P: AsRef<Path>>(file: &SceneFile, path: P) -> Result<(), SceneError> {
    let config = ron::ser::PrettyConfig::new().indentor("  ".to_string());
    let contents = ron::ser::to_string_pretty(file, config)?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Vec3;
    use crate::scene::Primitive;

    #[test]
    fn test_scene_round_trip() {
        let file = SceneFile {
            objects: vec![
                ObjectSpec {
                    primitive: Primitive::Cube { size: 2.0 },
                    position: Vec3::new(0.0, 0.0, -3.0),
                    color: Vec3::new(0.8, 0.4, 0.2),
                },
                ObjectSpec {
                    primitive: Primitive::Sphere { radius: 1.0, stacks: 6, slices: 8 },
                    position: Vec3::ZERO,
                    color: Vec3::splat(0.6),
                },
            ],
        };

        let text = ron::ser::to_string_pretty(&file, ron::ser::PrettyConfig::new()).unwrap();
        let scene = load_scene_from_str(&text).unwrap();
        assert_eq!(scene.objects.len(), 2);
        assert_eq!(scene.objects[0].triangles.len(), 12);
    }

    #[test]
    fn test_malformed_scene_rejected() {
        assert!(matches!(
            load_scene_from_str("not a scene"),
            Err(SceneError::ParseError(_))
        ));
    }
}
