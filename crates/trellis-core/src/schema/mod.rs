//! Backend model lists consumed by the server code emitters.
//!
//! These are independent of the layout tree: a model is a named, ordered
//! list of typed fields, in either the Mongoose or the Django flavour.

mod django;
mod mongoose;

pub use django::{
    Choice, DatabaseKind, DatabaseSettings, DjangoField, DjangoFieldType, DjangoModel, OnDelete,
};
pub use mongoose::{ExpressField, ExpressModel, MongooseType};
