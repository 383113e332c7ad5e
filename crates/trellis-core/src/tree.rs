//! Generic traversal over the column hierarchy.
//!
//! Every lookup is an exhaustive depth-first descent through
//! `child_columns`. Layouts are edited by hand and stay shallow, so there is
//! no index to keep in sync.

use crate::layout::{Column, Component};

/// Where a column sits: its enclosing column (if any) and its sibling index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub parent: Option<String>,
    pub index: usize,
}

/// Visit every column depth-first, parents before children.
pub fn visit<'a, F>(columns: &'a [Column], f: &mut F)
where
    F: FnMut(&'a Column, usize),
{
    fn go<'a, F>(columns: &'a [Column], depth: usize, f: &mut F)
    where
        F: FnMut(&'a Column, usize),
    {
        for column in columns {
            f(column, depth);
            go(&column.child_columns, depth + 1, f);
        }
    }
    go(columns, 0, f);
}

pub fn find<'a>(columns: &'a [Column], id: &str) -> Option<&'a Column> {
    for column in columns {
        if column.id == id {
            return Some(column);
        }
        if let Some(found) = find(&column.child_columns, id) {
            return Some(found);
        }
    }
    None
}

pub fn find_mut<'a>(columns: &'a mut [Column], id: &str) -> Option<&'a mut Column> {
    for column in columns.iter_mut() {
        if column.id == id {
            return Some(column);
        }
        if let Some(found) = find_mut(&mut column.child_columns, id) {
            return Some(found);
        }
    }
    None
}

/// Find a component anywhere in the tree, with the column that holds it.
pub fn find_component<'a>(columns: &'a [Column], id: &str) -> Option<(&'a Column, &'a Component)> {
    for column in columns {
        if let Some(component) = column.component(id) {
            return Some((column, component));
        }
        if let Some(found) = find_component(&column.child_columns, id) {
            return Some(found);
        }
    }
    None
}

pub fn locate(columns: &[Column], id: &str) -> Option<Location> {
    fn go(columns: &[Column], parent: Option<&str>, id: &str) -> Option<Location> {
        for (index, column) in columns.iter().enumerate() {
            if column.id == id {
                return Some(Location {
                    parent: parent.map(str::to_string),
                    index,
                });
            }
            if let Some(found) = go(&column.child_columns, Some(&column.id), id) {
                return Some(found);
            }
        }
        None
    }
    go(columns, None, id)
}

/// Apply `transform` to the column with `id`. Returns `false` if no column matched.
///
/// This is the single primitive mutation operations are built on.
pub fn walk<F>(columns: &mut [Column], id: &str, transform: F) -> bool
where
    F: FnOnce(&mut Column),
{
    match find_mut(columns, id) {
        Some(column) => {
            transform(column);
            true
        }
        None => false,
    }
}

/// The sibling group under `parent`: the root list for `None`, otherwise that
/// column's `child_columns`.
pub fn siblings_mut<'a>(
    roots: &'a mut Vec<Column>,
    parent: Option<&str>,
) -> Option<&'a mut Vec<Column>> {
    match parent {
        None => Some(roots),
        Some(id) => find_mut(roots, id).map(|column| &mut column.child_columns),
    }
}
