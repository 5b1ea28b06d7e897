use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::ExportError;

/// Destination for rendered reports. `put` is all-or-nothing: on error no
/// artifact under `name` is visible afterwards.
pub trait ArtifactStore {
    /// Stores `bytes` under `name` and returns where they ended up.
    fn put(&self, name: &str, bytes: &[u8]) -> Result<String, ExportError>;
}

/// Writes artifacts into a local directory.
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn write_atomically(&self, tmp: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
        fs::create_dir_all(&self.root)?;
        let mut file = File::create(tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(tmp, target)
    }
}

impl ArtifactStore for FsArtifactStore {
    fn put(&self, name: &str, bytes: &[u8]) -> Result<String, ExportError> {
        let target = self.root.join(name);
        let tmp = self.root.join(format!(".{}.partial", name));

        if let Err(source) = self.write_atomically(&tmp, &target, bytes) {
            if tmp.exists() {
                if let Err(e) = fs::remove_file(&tmp) {
                    warn!(path = %tmp.display(), error = %e, "could not remove partial artifact");
                }
            }
            return Err(ExportError::Write { name: name.to_string(), source });
        }

        Ok(target.to_string_lossy().replace('\\', "/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("icsr-store-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn put_creates_the_directory_and_leaves_no_partial_file() {
        let root = scratch("put");
        let store = FsArtifactStore::new(&root);

        let location = store.put("case.pdf", b"%PDF-1.5").unwrap();
        assert!(location.ends_with("case.pdf"));
        assert_eq!(fs::read(root.join("case.pdf")).unwrap(), b"%PDF-1.5");

        let names: Vec<_> = fs::read_dir(&root).unwrap().map(|e| e.unwrap().file_name()).collect();
        assert_eq!(names.len(), 1);
        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn unwritable_root_is_a_write_error() {
        let root = scratch("blocked");
        // A plain file where the directory should be.
        fs::write(&root, b"not a directory").unwrap();

        let err = FsArtifactStore::new(&root).put("case.pdf", b"data").unwrap_err();
        assert!(matches!(err, ExportError::Write { ref name, .. } if name == "case.pdf"));
        fs::remove_file(&root).unwrap();
    }

    #[test]
    fn failed_rename_removes_the_partial_file() {
        let root = scratch("rename");
        // A non-empty directory under the target name makes the final rename fail.
        fs::create_dir_all(root.join("case.pdf").join("x")).unwrap();

        let err = FsArtifactStore::new(&root).put("case.pdf", b"%PDF-1.5").unwrap_err();
        assert!(matches!(err, ExportError::Write { ref name, .. } if name == "case.pdf"));

        let names: Vec<String> = fs::read_dir(&root)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["case.pdf".to_string()]);
        assert!(!root.join(".case.pdf.partial").exists());
        fs::remove_dir_all(&root).unwrap();
    }
}
