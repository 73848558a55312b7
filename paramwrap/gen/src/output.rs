//! Output assembly and emission of generated Kotlin files.
//!
//! This module handles the final phase of a run: rendering every generated
//! class into an [`OutputUnit`] and handing the units to an [`Emitter`].
//!
//! ## Output Structure
//!
//! One file per class, under the package directory:
//! ```text
//! <output>/rxhttp/wrapper/param/
//! ├── RxHttp.kt                 # Generic ancestor, chain API, factories
//! ├── RxHttp_NoBodyParam.kt     # Builtin family wrappers (4)
//! ├── ...
//! └── RxHttp_UploadParam.kt     # One wrapper per registered param
//! ```
//!
//! ## Safety Guarantees
//!
//! - **Atomic writes**: [`FileEmitter`] uses temp file + rename so no partial
//!   file is ever visible
//! - **Overwrite**: existing output for the same class is replaced
//! - **Fatal I/O**: write failures surface as `GeneratorError::WriteError`

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::codegen::generate;
use crate::config::GeneratorConfig;
use crate::errors::GeneratorError;
use crate::ir::GeneratedOutput;
use crate::registry::SchemaRegistry;
use crate::render::render_class;

/// One rendered class, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputUnit {
    pub name: String,
    pub package: String,
    pub source: String,
}

impl OutputUnit {
    pub fn file_name(&self) -> String {
        format!("{}.kt", self.name)
    }

    /// `<package path>/<Name>.kt`
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self
            .package
            .split('.')
            .filter(|segment| !segment.is_empty())
            .collect();
        path.push(self.file_name());
        path
    }
}

/// Renders every class of a run, in emission order.
pub fn render_units(output: &GeneratedOutput, config: &GeneratorConfig) -> Vec<OutputUnit> {
    let classes: Vec<_> = output.classes().collect();
    classes
        .par_iter()
        .map(|class| OutputUnit {
            name: class.name.clone(),
            package: config.package.clone(),
            source: render_class(class, &config.package),
        })
        .collect()
}

/// Persists rendered units.
///
/// Implementations must overwrite existing output for the same unit and
/// must report failures instead of swallowing them.
pub trait Emitter {
    fn emit(&mut self, unit: &OutputUnit) -> Result<(), GeneratorError>;
}

/// Writes units below a root directory.
#[derive(Debug, Clone)]
pub struct FileEmitter {
    root: PathBuf,
}

impl FileEmitter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, unit: &OutputUnit) -> PathBuf {
        self.root.join(unit.relative_path())
    }
}

impl Emitter for FileEmitter {
    fn emit(&mut self, unit: &OutputUnit) -> Result<(), GeneratorError> {
        let path = self.path_for(unit);
        write_atomic(&path, &unit.source)?;
        debug!(path = %path.display(), "Wrote unit");
        Ok(())
    }
}

/// Prints units with a `=== <file> ===` banner instead of writing them.
#[derive(Debug)]
pub struct DryRunEmitter<W: Write> {
    out: W,
}

impl<W: Write> DryRunEmitter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Emitter for DryRunEmitter<W> {
    fn emit(&mut self, unit: &OutputUnit) -> Result<(), GeneratorError> {
        let path = unit.relative_path();
        writeln!(self.out, "=== {} ===\n{}", path.display(), unit.source).map_err(|e| {
            GeneratorError::WriteError {
                path: path.display().to_string(),
                source: e,
            }
        })
    }
}

/// Keeps units in memory, for library callers and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryEmitter {
    pub units: Vec<OutputUnit>,
}

impl MemoryEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&OutputUnit> {
        self.units.iter().find(|u| u.name == name)
    }
}

impl Emitter for MemoryEmitter {
    fn emit(&mut self, unit: &OutputUnit) -> Result<(), GeneratorError> {
        match self.units.iter_mut().find(|u| u.name == unit.name) {
            Some(existing) => *existing = unit.clone(),
            None => self.units.push(unit.clone()),
        }
        Ok(())
    }
}

/// Writes content to a file atomically using a temp file + rename pattern.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if:
/// - Parent directories cannot be created
/// - The temp file cannot be written
/// - The rename operation fails
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub wrappers: usize,
    pub builtin_wrappers: usize,
    pub factories: usize,
    pub files: usize,
}

/// Generates, renders and emits everything for a registry.
///
/// Stops at the first emitter failure.
pub fn generate_and_emit(
    registry: &SchemaRegistry,
    config: &GeneratorConfig,
    emitter: &mut dyn Emitter,
) -> Result<RunSummary, GeneratorError> {
    let output = generate(registry, config)?;
    let units = render_units(&output, config);

    for unit in &units {
        emitter.emit(unit)?;
    }

    let summary = RunSummary {
        wrappers: output.wrappers.len(),
        builtin_wrappers: output.builtin_wrappers.len(),
        factories: output.ancestor.companion.len(),
        files: units.len(),
    };
    info!(
        files = summary.files,
        wrappers = summary.wrappers,
        factories = summary.factories,
        "Generation finished"
    );
    Ok(summary)
}
