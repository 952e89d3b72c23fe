//! Planning and executing the copy of sample files next to an exported preset.
//!
//! A [`SamplePlan`] is filled while the document is rendered: every source is
//! checked for existence and given a collision-free destination name before
//! anything touches the filesystem. Sources that already live in the samples
//! directory keep their names when reserved first with
//! [`SamplePlan::reserve_in_place`]. [`SamplePlan::execute`] then performs the
//! copies.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ExportError;
use crate::wire::wire_enum;

wire_enum! {
    /// When an existing destination file is overwritten.
    pub enum CopyPolicy {
        /// Copy unless the destination has the same size and is not older
        /// than the source.
        #[default]
        IfStale => "if_stale",
        /// Always copy.
        Always => "always",
    }
}

/// One source file and where it lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCopy {
    /// Resolved source path.
    pub source: PathBuf,
    /// Absolute or output-relative destination path.
    pub dest: PathBuf,
    /// Path written into the document, always with forward slashes.
    pub relative: String,
}

/// Outcome of [`SamplePlan::execute`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Files copied.
    pub copied: usize,
    /// Files left in place because the destination was fresh.
    pub skipped: usize,
}

/// Copy plan for the samples of one export.
#[derive(Debug)]
pub struct SamplePlan {
    samples_dir: PathBuf,
    prefix: String,
    entries: Vec<PlannedCopy>,
    by_source: HashMap<PathBuf, usize>,
    used_names: HashSet<String>,
}

impl SamplePlan {
    /// Plan copies into `<out_dir>/<samples_dir>`.
    pub fn new(out_dir: &Path, samples_dir: &str) -> Self {
        let prefix = samples_dir.replace('\\', "/").trim_end_matches('/').to_string();
        Self {
            samples_dir: out_dir.join(&prefix),
            prefix,
            entries: Vec::new(),
            by_source: HashMap::new(),
            used_names: HashSet::new(),
        }
    }

    /// Directory the samples are copied into.
    pub fn samples_dir(&self) -> &Path {
        &self.samples_dir
    }

    /// Planned copies in the order they were added.
    pub fn entries(&self) -> &[PlannedCopy] {
        &self.entries
    }

    /// Claim the name of a source that already sits in the samples directory.
    ///
    /// Call this for every zone before [`SamplePlan::add`] so a file from
    /// elsewhere with the same name is suffixed instead of landing on top of
    /// it. Sources outside the samples directory, or that do not exist, are
    /// ignored here and reported by `add`.
    pub fn reserve_in_place(&mut self, path: &Path, base_dir: Option<&Path>) {
        let source = resolve(path, base_dir);
        let (Ok(key), Ok(dir)) = (fs::canonicalize(&source), fs::canonicalize(&self.samples_dir))
        else {
            return;
        };
        if key.parent() != Some(dir.as_path()) || self.by_source.contains_key(&key) {
            return;
        }
        let Some(name) = key.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            return;
        };
        if !self.used_names.insert(name.clone()) {
            return;
        }

        let entry = PlannedCopy {
            dest: self.samples_dir.join(&name),
            relative: format!("{}/{name}", self.prefix),
            source,
        };
        debug!(dest = %entry.relative, "sample already in place");
        self.by_source.insert(key, self.entries.len());
        self.entries.push(entry);
    }

    /// Add a zone's sample and return the path to write into the document.
    ///
    /// Relative paths are resolved against `base_dir` when given. The same
    /// source file always maps to the same destination; distinct sources
    /// that share a file name get `_1`, `_2`, ... before the extension.
    pub fn add(&mut self, path: &Path, base_dir: Option<&Path>) -> Result<String, ExportError> {
        let source = resolve(path, base_dir);
        if !source.is_file() {
            return Err(ExportError::MissingSampleFile { path: source });
        }

        let key = fs::canonicalize(&source).unwrap_or_else(|_| source.clone());
        if let Some(&index) = self.by_source.get(&key) {
            return Ok(self.entries[index].relative.clone());
        }

        let name = self.allocate_name(&source);
        let entry = PlannedCopy {
            dest: self.samples_dir.join(&name),
            relative: format!("{}/{name}", self.prefix),
            source,
        };
        debug!(source = %entry.source.display(), dest = %entry.relative, "planned sample copy");

        let relative = entry.relative.clone();
        self.by_source.insert(key, self.entries.len());
        self.entries.push(entry);
        Ok(relative)
    }

    fn allocate_name(&mut self, source: &Path) -> String {
        let file_name = source
            .file_name()
            .map_or_else(|| "sample".to_string(), |n| n.to_string_lossy().into_owned());

        let mut candidate = file_name.clone();
        if self.used_names.contains(&candidate) {
            let stem = source
                .file_stem()
                .map_or_else(|| file_name.clone(), |s| s.to_string_lossy().into_owned());
            let ext = source.extension().map(|e| e.to_string_lossy().into_owned());
            let mut n = 1;
            loop {
                candidate = match &ext {
                    Some(ext) => format!("{stem}_{n}.{ext}"),
                    None => format!("{stem}_{n}"),
                };
                if !self.used_names.contains(&candidate) {
                    break;
                }
                n += 1;
            }
        }
        self.used_names.insert(candidate.clone());
        candidate
    }

    /// Create the samples directory and copy every planned file.
    ///
    /// A copy whose destination is itself the source of another entry is
    /// refused, so a planned sample is never overwritten.
    pub fn execute(&self, policy: CopyPolicy) -> Result<CopyStats, ExportError> {
        let mut stats = CopyStats::default();
        if self.entries.is_empty() {
            return Ok(stats);
        }

        fs::create_dir_all(&self.samples_dir)
            .map_err(|e| ExportError::create_dir(&self.samples_dir, e))?;

        for entry in &self.entries {
            if same_file(&entry.source, &entry.dest)
                || (policy == CopyPolicy::IfStale && is_fresh(&entry.source, &entry.dest))
            {
                debug!(dest = %entry.relative, "sample up to date");
                stats.skipped += 1;
                continue;
            }
            if fs::canonicalize(&entry.dest).is_ok_and(|dest| self.by_source.contains_key(&dest)) {
                let clash = io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "destination is the source of another sample",
                );
                return Err(ExportError::copy_sample(&entry.source, &entry.dest, clash));
            }
            fs::copy(&entry.source, &entry.dest)
                .map_err(|e| ExportError::copy_sample(&entry.source, &entry.dest, e))?;
            stats.copied += 1;
        }
        Ok(stats)
    }
}

fn resolve(path: &Path, base_dir: Option<&Path>) -> PathBuf {
    match base_dir {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Destination exists, has the source's length and is not older than it.
fn is_fresh(source: &Path, dest: &Path) -> bool {
    let (Ok(src), Ok(dst)) = (fs::metadata(source), fs::metadata(dest)) else {
        return false;
    };
    if src.len() != dst.len() {
        return false;
    }
    match (src.modified(), dst.modified()) {
        (Ok(src_time), Ok(dst_time)) => dst_time >= src_time,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, bytes: &[u8]) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, bytes).unwrap();
    }

    #[test]
    fn test_missing_source_is_reported() {
        let temp = TempDir::new().unwrap();
        let mut plan = SamplePlan::new(temp.path(), "samples");
        let err = plan.add(Path::new("nope.wav"), Some(temp.path())).unwrap_err();
        assert!(matches!(err, ExportError::MissingSampleFile { ref path } if path.ends_with("nope.wav")));
    }

    #[test]
    fn test_same_source_shares_destination() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src/a.wav");
        write(&src, b"RIFF");

        let mut plan = SamplePlan::new(&temp.path().join("out"), "samples");
        assert_eq!(plan.add(&src, None).unwrap(), "samples/a.wav");
        assert_eq!(plan.add(Path::new("a.wav"), Some(&temp.path().join("src"))).unwrap(), "samples/a.wav");
        assert_eq!(plan.entries().len(), 1);
    }

    #[test]
    fn test_name_collisions_get_suffixes() {
        let temp = TempDir::new().unwrap();
        for dir in ["x", "y", "z"] {
            write(&temp.path().join(dir).join("foo.wav"), dir.as_bytes());
        }

        let mut plan = SamplePlan::new(temp.path(), "samples");
        let names: Vec<_> = ["x", "y", "z"]
            .iter()
            .map(|d| plan.add(&temp.path().join(d).join("foo.wav"), None).unwrap())
            .collect();
        assert_eq!(names, vec!["samples/foo.wav", "samples/foo_1.wav", "samples/foo_2.wav"]);
    }

    #[test]
    fn test_execute_copies_then_skips_fresh() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src/a.wav");
        write(&src, b"RIFF....WAVE");

        let mut plan = SamplePlan::new(&temp.path().join("out"), "samples");
        plan.add(&src, None).unwrap();

        let first = plan.execute(CopyPolicy::IfStale).unwrap();
        assert_eq!(first, CopyStats { copied: 1, skipped: 0 });
        assert_eq!(fs::read(temp.path().join("out/samples/a.wav")).unwrap(), b"RIFF....WAVE");

        let second = plan.execute(CopyPolicy::IfStale).unwrap();
        assert_eq!(second, CopyStats { copied: 0, skipped: 1 });

        let forced = plan.execute(CopyPolicy::Always).unwrap();
        assert_eq!(forced, CopyStats { copied: 1, skipped: 0 });
    }

    #[test]
    fn test_size_change_forces_copy() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("a.wav");
        write(&src, b"new content");
        write(&temp.path().join("out/samples/a.wav"), b"old");

        let mut plan = SamplePlan::new(&temp.path().join("out"), "samples");
        plan.add(&src, None).unwrap();
        let stats = plan.execute(CopyPolicy::IfStale).unwrap();
        assert_eq!(stats.copied, 1);
        assert_eq!(fs::read(temp.path().join("out/samples/a.wav")).unwrap(), b"new content");
    }

    #[test]
    fn test_source_already_in_place() {
        let temp = TempDir::new().unwrap();
        let in_place = temp.path().join("samples/a.wav");
        write(&in_place, b"data");

        let mut plan = SamplePlan::new(temp.path(), "samples");
        assert_eq!(plan.add(Path::new("samples/a.wav"), Some(temp.path())).unwrap(), "samples/a.wav");
        let stats = plan.execute(CopyPolicy::Always).unwrap();
        assert_eq!(stats, CopyStats { copied: 0, skipped: 1 });
        assert_eq!(fs::read(&in_place).unwrap(), b"data");
    }

    #[test]
    fn test_reserved_in_place_name_wins_over_earlier_external() {
        let temp = TempDir::new().unwrap();
        write(&temp.path().join("ext/foo.wav"), b"external");
        let in_place = temp.path().join("samples/foo.wav");
        write(&in_place, b"in place");

        let mut plan = SamplePlan::new(temp.path(), "samples");
        let zones = [Path::new("ext/foo.wav"), Path::new("samples/foo.wav")];
        for zone in zones {
            plan.reserve_in_place(zone, Some(temp.path()));
        }
        let names: Vec<_> = zones
            .iter()
            .map(|zone| plan.add(zone, Some(temp.path())).unwrap())
            .collect();
        assert_eq!(names, vec!["samples/foo_1.wav", "samples/foo.wav"]);

        let stats = plan.execute(CopyPolicy::Always).unwrap();
        assert_eq!(stats, CopyStats { copied: 1, skipped: 1 });
        assert_eq!(fs::read(&in_place).unwrap(), b"in place");
        assert_eq!(fs::read(temp.path().join("samples/foo_1.wav")).unwrap(), b"external");
    }

    #[test]
    fn test_reserve_ignores_sources_elsewhere() {
        let temp = TempDir::new().unwrap();
        write(&temp.path().join("ext/foo.wav"), b"external");
        fs::create_dir_all(temp.path().join("samples")).unwrap();

        let mut plan = SamplePlan::new(temp.path(), "samples");
        plan.reserve_in_place(Path::new("ext/foo.wav"), Some(temp.path()));
        plan.reserve_in_place(Path::new("missing.wav"), Some(temp.path()));
        assert!(plan.entries().is_empty());
    }

    #[test]
    fn test_copy_onto_planned_source_is_refused() {
        let temp = TempDir::new().unwrap();
        write(&temp.path().join("ext/foo.wav"), b"external");
        let in_place = temp.path().join("samples/foo.wav");
        write(&in_place, b"in place");

        let mut plan = SamplePlan::new(temp.path(), "samples");
        plan.add(Path::new("ext/foo.wav"), Some(temp.path())).unwrap();
        plan.add(Path::new("samples/foo.wav"), Some(temp.path())).unwrap();

        let err = plan.execute(CopyPolicy::Always).unwrap_err();
        assert!(matches!(err, ExportError::CopySample { .. }));
        assert_eq!(fs::read(&in_place).unwrap(), b"in place");
    }

    #[test]
    fn test_empty_plan_creates_nothing() {
        let temp = TempDir::new().unwrap();
        let plan = SamplePlan::new(temp.path(), "samples");
        plan.execute(CopyPolicy::Always).unwrap();
        assert!(!temp.path().join("samples").exists());
    }
}
