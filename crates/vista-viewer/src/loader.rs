//! Model loader contract and the extension-probing loader

use std::path::{Path, PathBuf};
use vista_core::{Result, VistaError};

/// Model formats a viewer knows how to hand to its decoders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Obj,
    Collada,
    Gltf,
    Glb,
}

impl ModelFormat {
    /// Detect the format from the file extension, ignoring case
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "obj" => Ok(ModelFormat::Obj),
            "dae" => Ok(ModelFormat::Collada),
            "gltf" => Ok(ModelFormat::Gltf),
            "glb" => Ok(ModelFormat::Glb),
            _ => {
                let shown = path
                    .extension()
                    .map(|e| format!(".{}", e.to_string_lossy()))
                    .unwrap_or_default();
                Err(VistaError::UnsupportedFormat(shown))
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModelFormat::Obj => "OBJ",
            ModelFormat::Collada => "COLLADA",
            ModelFormat::Gltf => "glTF",
            ModelFormat::Glb => "GLB",
        }
    }
}

/// A model accepted by a loader
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModel {
    pub path: PathBuf,
    pub format: ModelFormat,
    /// Sibling material library (OBJ only)
    pub material: Option<PathBuf>,
    pub size_bytes: u64,
}

/// Whatever turns a selected path into something the scene can show
pub trait ModelLoader {
    fn load(&mut self, path: &Path) -> Result<LoadedModel>;
}

/// Accepts any readable regular file with a known model extension.
///
/// Decoding is left to the renderer; this loader only checks that the file
/// exists and picks up the OBJ material library next to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionLoader;

impl ModelLoader for ExtensionLoader {
    fn load(&mut self, path: &Path) -> Result<LoadedModel> {
        let format = ModelFormat::from_path(path)?;

        let metadata = std::fs::metadata(path)
            .map_err(|e| VistaError::LoadError(format!("{}: {}", path.display(), e)))?;
        if !metadata.is_file() {
            return Err(VistaError::LoadError(format!(
                "{} is not a file",
                path.display()
            )));
        }

        let material = match format {
            ModelFormat::Obj => {
                let mtl = path.with_extension("mtl");
                mtl.is_file().then_some(mtl)
            }
            _ => None,
        };

        Ok(LoadedModel {
            path: path.to_path_buf(),
            format,
            material,
            size_bytes: metadata.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vista_loader_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ModelFormat::from_path(Path::new("a/b.obj")).unwrap(), ModelFormat::Obj);
        assert_eq!(ModelFormat::from_path(Path::new("SCENE.DAE")).unwrap(), ModelFormat::Collada);
        assert_eq!(ModelFormat::from_path(Path::new("x.gltf")).unwrap(), ModelFormat::Gltf);
        assert_eq!(ModelFormat::from_path(Path::new("x.Glb")).unwrap(), ModelFormat::Glb);
    }

    #[test]
    fn test_unknown_extension_message() {
        let err = ModelFormat::from_path(Path::new("/tmp/notes.txt")).unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized model file extension:[.txt]");

        let err = ModelFormat::from_path(Path::new("/tmp/Makefile")).unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized model file extension:[]");
    }

    #[test]
    fn test_obj_picks_up_material() {
        let dir = temp_dir();
        fs::write(dir.join("cube.obj"), b"v 0 0 0\n").unwrap();
        fs::write(dir.join("cube.mtl"), b"newmtl red\n").unwrap();
        fs::write(dir.join("plain.obj"), b"v 1 1 1\n").unwrap();

        let model = ExtensionLoader.load(&dir.join("cube.obj")).unwrap();
        assert_eq!(model.format, ModelFormat::Obj);
        assert_eq!(model.material, Some(dir.join("cube.mtl")));
        assert_eq!(model.size_bytes, 8);

        let model = ExtensionLoader.load(&dir.join("plain.obj")).unwrap();
        assert_eq!(model.material, None);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_or_directory_is_load_error() {
        let dir = temp_dir();
        fs::create_dir(dir.join("folder.dae")).unwrap();

        let err = ExtensionLoader.load(&dir.join("gone.glb")).unwrap_err();
        assert!(matches!(err, VistaError::LoadError(_)));
        let err = ExtensionLoader.load(&dir.join("folder.dae")).unwrap_err();
        assert!(matches!(err, VistaError::LoadError(_)));

        fs::remove_dir_all(&dir).ok();
    }
}
