//! Core data model for the Trellis layout composer.
//!
//! This crate provides the types every other Trellis crate builds on:
//! - The layout tree: columns holding placed components and nested columns
//! - The component catalog: the closed set of component kinds and their defaults
//! - The mutation engine: copy-on-write operations producing a new tree per command
//! - Backend schemas: the model lists consumed by the server code emitters
//!
//! # Example
//!
//! ```
//! use trellis_core::{Layout, Orientation, SequentialIds};
//!
//! let mut ids = SequentialIds::new();
//! let layout = Layout::default();
//! let layout = layout.add_column(Orientation::Horizontal, None, &mut ids);
//! assert_eq!(layout.columns.len(), 2);
//! assert!(layout.columns.iter().all(|c| c.width == 6));
//! ```

pub mod catalog;
pub mod error;
pub mod ids;
pub mod layout;
mod lenient;
pub mod mutation;
pub mod schema;
pub mod tree;

pub use catalog::{
    ButtonProps, CardProps, ComponentKind, ComponentProps, DivProps, ImageProps, InputProps,
    ModalProps, SelectOption, SelectProps, TextProps,
};
pub use error::{CoreError, Result};
pub use ids::{IdSource, RandomIds, SequentialIds};
pub use layout::{
    width_class, Column, Component, FlexKeyword, FlexLayout, Layout, Orientation, Row,
    GRID_COLUMNS,
};
pub use mutation::{ColumnPatch, Command};
pub use schema::{
    Choice, DatabaseKind, DatabaseSettings, DjangoField, DjangoFieldType, DjangoModel,
    ExpressField, ExpressModel, MongooseType, OnDelete,
};
