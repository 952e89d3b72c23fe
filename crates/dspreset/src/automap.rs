//! Sequential auto-mapping of a folder of samples.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::MapError;
use crate::preset::InstrumentPreset;
use crate::zone::SampleMapping;

/// `*.wav` files in `folder` (extension matched case-insensitively), sorted
/// by file name.
pub fn list_wav_files(folder: &Path) -> Result<Vec<PathBuf>, MapError> {
    let entries = std::fs::read_dir(folder).map_err(|e| MapError::read_dir(folder, e))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
        })
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

impl InstrumentPreset {
    /// Replace `mappings` with one single-key mapping per `*.wav` file in
    /// `folder`, in file-name order, starting at `start_note`.
    ///
    /// Files that would land above note 127 are left out. Sample groups are
    /// not touched.
    pub fn auto_map(&mut self, folder: impl AsRef<Path>) -> Result<(), MapError> {
        let folder = folder.as_ref();
        let files = list_wav_files(folder)?;

        let mut mappings = Vec::with_capacity(files.len());
        for (offset, path) in files.into_iter().enumerate() {
            let note = u8::try_from(offset)
                .ok()
                .and_then(|o| self.start_note.checked_add(o))
                .filter(|n| *n <= 127);
            let Some(note) = note else {
                warn!(path = %path.display(), "no key left for sample, skipping");
                continue;
            };
            mappings.push(SampleMapping::new(path, note, note, note));
        }

        info!(folder = %folder.display(), mapped = mappings.len(), "auto-mapped samples");
        self.mappings = mappings;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"RIFF").unwrap();
    }

    #[test]
    fn test_list_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        for name in ["b.wav", "A.WAV", "notes.txt", "c.wav"] {
            touch(temp.path(), name);
        }
        std::fs::create_dir(temp.path().join("d.wav")).unwrap();

        let names: Vec<_> = list_wav_files(temp.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["A.WAV", "b.wav", "c.wav"]);
    }

    #[test]
    fn test_auto_map_replaces_mappings() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "x.wav");

        let mut preset = InstrumentPreset::new("p");
        preset.start_note = 60;
        preset.mappings.push(SampleMapping::new("old.wav", 1, 1, 1));
        preset.auto_map(temp.path()).unwrap();

        assert_eq!(preset.mappings.len(), 1);
        assert_eq!(preset.mappings[0], SampleMapping::new(temp.path().join("x.wav"), 60, 60, 60));
    }

    #[test]
    fn test_auto_map_stops_at_top_key() {
        let temp = TempDir::new().unwrap();
        for name in ["1.wav", "2.wav", "3.wav"] {
            touch(temp.path(), name);
        }
        let mut preset = InstrumentPreset::new("p");
        preset.start_note = 126;
        preset.auto_map(temp.path()).unwrap();
        let roots: Vec<_> = preset.mappings.iter().map(|m| m.root).collect();
        assert_eq!(roots, vec![126, 127]);
    }

    #[test]
    fn test_missing_folder() {
        let mut preset = InstrumentPreset::new("p");
        let err = preset.auto_map("/definitely/not/here").unwrap_err();
        assert!(matches!(err, MapError::ReadDir { .. }));
    }
}
