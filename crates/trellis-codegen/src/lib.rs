//! Code generation from Trellis layouts and model lists.
//!
//! This crate turns a layout tree into frontend component source and a
//! backend model list into server scaffolding. Every generator is a pure
//! function of its input: the same input always yields byte-identical text.
//!
//! # Features
//!
//! - `react` - Generate a React function component (JSX)
//! - `vue` - Generate a Vue single-file component
//! - `express` - Generate an Express + Mongoose CRUD server
//! - `django` - Generate Django models, serializers, views and urls
//!
//! # Example
//!
//! ```
//! use trellis_codegen::{LayoutGenerator, ReactGenerator};
//! use trellis_core::Layout;
//!
//! let generator = ReactGenerator::new();
//! let code = generator.generate(&Layout::default());
//! assert!(code.contains("export default function GeneratedLayout()"));
//! ```

pub mod error;
pub mod generators;
pub mod naming;
pub mod style;

pub use error::{CodegenError, Result};
pub use generators::{GeneratedFile, GeneratedProject, LayoutGenerator, TemplateEngine};

#[cfg(feature = "react")]
pub use generators::ReactGenerator;

#[cfg(feature = "vue")]
pub use generators::VueGenerator;

#[cfg(feature = "express")]
pub use generators::ExpressGenerator;

#[cfg(feature = "django")]
pub use generators::{DjangoFiles, DjangoGenerator};
