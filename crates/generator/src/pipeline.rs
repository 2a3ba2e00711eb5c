//! Filesystem driver for the generator — deletes stale spec files, then
//! regenerates one spec per feature file. The storage capability is
//! injected so the pipeline itself stays free of real filesystem access.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use featurespec_core::error::{HarnessError, HarnessResult};

use crate::emit::emit;
use crate::parser::{parse, FeatureRecord};

/// Extension of input feature files.
pub const FEATURE_EXT: &str = ".feature";
/// Extension of generated spec files; also the clean-up match pattern.
pub const SPEC_EXT: &str = ".spec.ts";

/// Storage capability for the pipeline. The real filesystem implements it
/// at the outermost driver layer; unit tests inject [`MemStore`].
pub trait SpecStore {
    fn dir_exists(&self, dir: &Path) -> bool;
    fn ensure_dir(&mut self, dir: &Path) -> HarnessResult<()>;
    fn list_files(&self, dir: &Path) -> HarnessResult<Vec<String>>;
    fn read(&self, path: &Path) -> HarnessResult<String>;
    fn write(&mut self, path: &Path, contents: &str) -> HarnessResult<()>;
    fn remove(&mut self, path: &Path) -> HarnessResult<()>;
}

/// Store backed by the real filesystem.
pub struct FsStore;

impl SpecStore for FsStore {
    fn dir_exists(&self, dir: &Path) -> bool {
        dir.is_dir()
    }

    fn ensure_dir(&mut self, dir: &Path) -> HarnessResult<()> {
        std::fs::create_dir_all(dir)?;
        Ok(())
    }

    fn list_files(&self, dir: &Path) -> HarnessResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }

    fn read(&self, path: &Path) -> HarnessResult<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&mut self, path: &Path, contents: &str) -> HarnessResult<()> {
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn remove(&mut self, path: &Path) -> HarnessResult<()> {
        std::fs::remove_file(path)?;
        Ok(())
    }
}

/// In-memory store for tests: a flat map of path to contents. A file's
/// directory is considered to exist once registered via `ensure_dir` or
/// implied by a stored file.
#[derive(Debug, Default)]
pub struct MemStore {
    files: BTreeMap<PathBuf, String>,
    dirs: Vec<PathBuf>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, registering its parent directory.
    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !self.dirs.contains(&parent.to_path_buf()) {
                self.dirs.push(parent.to_path_buf());
            }
        }
        self.files.insert(path, contents.into());
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.files.contains_key(path.as_ref())
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    pub fn register_dir(&mut self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        if !self.dirs.contains(&dir) {
            self.dirs.push(dir);
        }
    }
}

impl SpecStore for MemStore {
    fn dir_exists(&self, dir: &Path) -> bool {
        self.dirs.iter().any(|d| d == dir)
    }

    fn ensure_dir(&mut self, dir: &Path) -> HarnessResult<()> {
        self.register_dir(dir);
        Ok(())
    }

    fn list_files(&self, dir: &Path) -> HarnessResult<Vec<String>> {
        Ok(self
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect())
    }

    fn read(&self, path: &Path) -> HarnessResult<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            HarnessError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            ))
        })
    }

    fn write(&mut self, path: &Path, contents: &str) -> HarnessResult<()> {
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn remove(&mut self, path: &Path) -> HarnessResult<()> {
        self.files.remove(path).map(|_| ()).ok_or_else(|| {
            HarnessError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            ))
        })
    }
}

/// Summary of one clean-then-generate sweep.
#[derive(Debug, Clone, Default)]
pub struct GenerationSummary {
    /// Stale spec files removed from the output directory.
    pub removed: Vec<String>,
    /// Spec files written, one per translatable feature file.
    pub generated: Vec<String>,
    /// Feature files skipped because they contained no scenarios.
    pub skipped: Vec<String>,
}

/// The batch pipeline: parse → translate → emit, once per feature file.
/// No shared mutable state between features; runs to completion and exits.
pub struct Pipeline<'a, S: SpecStore> {
    store: &'a mut S,
    features_dir: PathBuf,
    specs_dir: PathBuf,
}

impl<'a, S: SpecStore> Pipeline<'a, S> {
    pub fn new(
        store: &'a mut S,
        features_dir: impl Into<PathBuf>,
        specs_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            features_dir: features_dir.into(),
            specs_dir: specs_dir.into(),
        }
    }

    /// Remove every previously generated spec file from the output
    /// directory so renamed or deleted features cannot leave stale tests
    /// behind. A missing output directory is not an error.
    pub fn clean(&mut self) -> HarnessResult<Vec<String>> {
        let mut removed = Vec::new();
        if !self.store.dir_exists(&self.specs_dir) {
            return Ok(removed);
        }
        for name in self.store.list_files(&self.specs_dir)? {
            if name.ends_with(SPEC_EXT) {
                self.store.remove(&self.specs_dir.join(&name))?;
                info!(file = %name, "Removed stale spec");
                removed.push(name);
            }
        }
        Ok(removed)
    }

    /// List feature files in the input directory, sorted by name.
    fn feature_files(&self) -> HarnessResult<Vec<String>> {
        if !self.store.dir_exists(&self.features_dir) {
            return Err(HarnessError::MissingFeaturesDir(
                self.features_dir.display().to_string(),
            ));
        }
        let mut names: Vec<String> = self
            .store
            .list_files(&self.features_dir)?
            .into_iter()
            .filter(|n| n.ends_with(FEATURE_EXT))
            .collect();
        names.sort();
        if names.is_empty() {
            return Err(HarnessError::NoFeatureFiles(
                self.features_dir.display().to_string(),
            ));
        }
        Ok(names)
    }

    /// Load and parse every feature file. Used by the direct runner.
    pub fn load_features(&self) -> HarnessResult<Vec<(String, FeatureRecord)>> {
        let mut features = Vec::new();
        for name in self.feature_files()? {
            let text = self.store.read(&self.features_dir.join(&name))?;
            features.push((name, parse(&text)));
        }
        Ok(features)
    }

    /// Generate one spec file per translatable feature file. Inputs with
    /// zero scenarios produce no output file.
    pub fn generate(&mut self) -> HarnessResult<GenerationSummary> {
        let names = self.feature_files()?;
        self.store.ensure_dir(&self.specs_dir)?;

        let mut summary = GenerationSummary::default();
        for name in names {
            let text = self.store.read(&self.features_dir.join(&name))?;
            let feature = parse(&text);
            if feature.scenarios.is_empty() {
                warn!(file = %name, "No scenarios found, skipping");
                summary.skipped.push(name);
                continue;
            }
            let spec_name = format!("{}{}", name.trim_end_matches(FEATURE_EXT), SPEC_EXT);
            self.store
                .write(&self.specs_dir.join(&spec_name), &emit(&feature))?;
            info!(
                file = %spec_name,
                scenarios = feature.scenarios.len(),
                "Generated spec"
            );
            summary.generated.push(spec_name);
        }
        Ok(summary)
    }

    /// Full sweep: clean stale output, then regenerate everything.
    pub fn run(&mut self) -> HarnessResult<GenerationSummary> {
        let removed = self.clean()?;
        let mut summary = self.generate()?;
        summary.removed = removed;
        Ok(summary)
    }
}
