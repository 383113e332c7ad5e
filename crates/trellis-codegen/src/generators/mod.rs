//! Code generators for frontend frameworks and backend scaffolds.

#[cfg(feature = "django")]
mod django;
#[cfg(feature = "express")]
mod express;
#[cfg(feature = "react")]
mod react;
#[cfg(feature = "vue")]
mod vue;

mod templates;

#[cfg(feature = "django")]
pub use django::{DjangoFiles, DjangoGenerator, DEFAULT_APP_NAME};
#[cfg(feature = "express")]
pub use express::{ExpressGenerator, DEFAULT_MONGO_URL, DEFAULT_PORT};
#[cfg(feature = "react")]
pub use react::ReactGenerator;
#[cfg(feature = "vue")]
pub use vue::VueGenerator;

pub use templates::TemplateEngine;

use crate::error::{CodegenError, Result};
use std::path::{Component, Path};
use trellis_core::Layout;

/// Default name of the generated frontend component.
pub const DEFAULT_COMPONENT_NAME: &str = "GeneratedLayout";

/// Common trait for generators that consume a layout tree.
pub trait LayoutGenerator {
    /// Target framework name.
    fn framework_name(&self) -> &'static str;

    /// File name for the generated component.
    fn file_name(&self) -> String;

    /// Generate component source for a layout.
    fn generate(&self, layout: &Layout) -> String;

    /// Generate from untyped JSON, falling back to an empty skeleton when the
    /// value is not a layout.
    fn generate_value(&self, value: &serde_json::Value) -> String {
        match serde_json::from_value::<Layout>(value.clone()) {
            Ok(layout) => self.generate(&layout),
            Err(err) => {
                tracing::warn!(
                    framework = self.framework_name(),
                    %err,
                    "input is not a layout, emitting skeleton"
                );
                self.generate(&Layout::empty())
            }
        }
    }

    /// Generate the component as a single-file project.
    fn generate_project(&self, layout: &Layout) -> GeneratedProject {
        GeneratedProject {
            files: vec![GeneratedFile::new(self.file_name(), self.generate(layout))],
        }
    }
}

/// Generated project output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedProject {
    /// Generated files, in emission order.
    pub files: Vec<GeneratedFile>,
}

impl GeneratedProject {
    /// Look up a file by its relative path.
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Relative paths of all files.
    pub fn paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.path.as_str()).collect()
    }

    /// Write every file beneath `dir`, creating directories as needed.
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        for file in &self.files {
            let relative = Path::new(&file.path);
            let escapes = relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_)));
            if escapes {
                return Err(CodegenError::InvalidPath(file.path.clone()));
            }
            let target = dir.join(relative);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&target, &file.content)?;
            tracing::debug!(path = %target.display(), bytes = file.content.len(), "wrote generated file");
        }
        Ok(())
    }
}

/// A generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File path relative to project root.
    pub path: String,
    /// File content.
    pub content: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}
