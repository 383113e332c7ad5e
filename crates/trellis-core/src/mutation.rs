//! Tree mutation engine.
//!
//! Every operation borrows the current [`Layout`] and returns a new one; the
//! input is never modified. An operation whose target cannot be found, or
//! whose indices are out of range, returns a value-equal copy of the input.

use crate::catalog::{ComponentKind, ComponentProps};
use crate::ids::IdSource;
use crate::layout::{Column, Component, FlexLayout, Layout, Orientation, GRID_COLUMNS};
use crate::tree;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Attribute changes for [`Layout::update_column`]. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_layout: Option<FlexLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
}

impl ColumnPatch {
    fn apply(&self, column: &mut Column) {
        if let Some(width) = self.width {
            column.width = clamp_width(width);
        }
        if let Some(orientation) = self.orientation {
            column.orientation = orientation;
        }
        if let Some(flex_layout) = self.flex_layout {
            column.flex_layout = flex_layout;
        }
        if let Some(gap) = &self.gap {
            column.gap = gap.clone();
        }
        if let Some(color) = &self.background_color {
            column.background_color = color.clone();
        }
        if let Some(radius) = &self.border_radius {
            column.border_radius = radius.clone();
        }
        if let Some(border) = &self.border {
            column.border = border.clone();
        }
    }
}

/// An editor action, as dispatched by the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    AddComponent {
        column_id: String,
        component_type: String,
        #[serde(default)]
        props: Map<String, Value>,
    },
    UpdateComponent {
        component_id: String,
        column_id: String,
        props: Map<String, Value>,
    },
    DeleteComponent {
        component_id: String,
        column_id: String,
    },
    AddColumn {
        orientation: Orientation,
        #[serde(default)]
        parent_column_id: Option<String>,
    },
    DeleteColumn {
        column_id: String,
    },
    UpdateColumnWidth {
        column_id: String,
        width: i64,
    },
    UpdateColumn {
        column_id: String,
        patch: ColumnPatch,
    },
    UpdateContainerWidth {
        width: String,
    },
    MoveComponent {
        drag_index: usize,
        hover_index: usize,
        source_column_id: String,
        target_column_id: String,
    },
    MoveColumn {
        drag_index: usize,
        hover_index: usize,
        #[serde(default)]
        parent_column_id: Option<String>,
    },
    /// Discard the tree and start over from the default layout.
    Reset,
}

fn clamp_width(width: i64) -> u8 {
    width.clamp(1, i64::from(GRID_COLUMNS)) as u8
}

/// Give every horizontal column in `group` an equal share of the grid.
///
/// Uses `floor(12 / count)`, so the shares do not always sum to 12.
fn redistribute(group: &mut [Column]) {
    let count = group.iter().filter(|c| c.is_horizontal()).count();
    if count == 0 {
        return;
    }
    let share = (usize::from(GRID_COLUMNS) / count).max(1) as u8;
    for column in group.iter_mut().filter(|c| c.is_horizontal()) {
        column.width = share;
    }
}

impl Layout {
    /// Apply a command, producing the next layout.
    pub fn apply(&self, command: &Command, ids: &mut dyn IdSource) -> Layout {
        match command {
            Command::AddComponent {
                column_id,
                component_type,
                props,
            } => self.add_component(column_id, component_type, props, ids),
            Command::UpdateComponent {
                component_id,
                column_id,
                props,
            } => self.update_component(component_id, column_id, props),
            Command::DeleteComponent {
                component_id,
                column_id,
            } => self.delete_component(component_id, column_id),
            Command::AddColumn {
                orientation,
                parent_column_id,
            } => self.add_column(*orientation, parent_column_id.as_deref(), ids),
            Command::DeleteColumn { column_id } => self.delete_column(column_id),
            Command::UpdateColumnWidth { column_id, width } => {
                self.update_column_width(column_id, *width)
            }
            Command::UpdateColumn { column_id, patch } => self.update_column(column_id, patch),
            Command::UpdateContainerWidth { width } => self.update_container_width(width.clone()),
            Command::MoveComponent {
                drag_index,
                hover_index,
                source_column_id,
                target_column_id,
            } => self.move_component(*drag_index, *hover_index, source_column_id, target_column_id),
            Command::MoveColumn {
                drag_index,
                hover_index,
                parent_column_id,
            } => self.move_column(*drag_index, *hover_index, parent_column_id.as_deref()),
            Command::Reset => Layout::default(),
        }
    }

    /// Append a new component of `component_type` to a column.
    ///
    /// Catalog defaults are merged with `overrides`. Unknown type tags are
    /// placed as-is so they surface as "unknown component" in the output.
    pub fn add_component(
        &self,
        column_id: &str,
        component_type: &str,
        overrides: &Map<String, Value>,
        ids: &mut dyn IdSource,
    ) -> Layout {
        if self.find_column(column_id).is_none() {
            tracing::debug!(column_id, "add_component: no such column");
            return self.clone();
        }

        let props = match ComponentKind::from_str(component_type) {
            Ok(kind) => kind.default_props().merged(overrides),
            Err(_) => ComponentProps::from_parts(component_type, Value::Object(overrides.clone())),
        };
        let component = Component::new(ids.next_id("component"), props);

        let mut next = self.clone();
        tree::walk(&mut next.columns, column_id, |column| {
            column.components.push(component)
        });
        next
    }

    /// Shallow-merge `patch` into one component's props.
    pub fn update_component(
        &self,
        component_id: &str,
        column_id: &str,
        patch: &Map<String, Value>,
    ) -> Layout {
        let mut next = self.clone();
        let found = tree::find_mut(&mut next.columns, column_id)
            .and_then(|column| column.components.iter_mut().find(|c| c.id == component_id))
            .map(|component| component.props = component.props.merged(patch))
            .is_some();
        if !found {
            tracing::debug!(component_id, column_id, "update_component: no such component");
        }
        next
    }

    /// Remove one component from its column.
    ///
    /// Clearing an editor selection that pointed at it is the caller's job.
    pub fn delete_component(&self, component_id: &str, column_id: &str) -> Layout {
        let mut next = self.clone();
        let removed = tree::walk(&mut next.columns, column_id, |column| {
            column.components.retain(|c| c.id != component_id)
        });
        if !removed {
            tracing::debug!(component_id, column_id, "delete_component: no such column");
        }
        next
    }

    /// Add an empty full-width column at the root or inside `parent_column_id`.
    ///
    /// A horizontal column shares the grid equally with its horizontal
    /// siblings; a vertical one leaves sibling widths alone.
    pub fn add_column(
        &self,
        orientation: Orientation,
        parent_column_id: Option<&str>,
        ids: &mut dyn IdSource,
    ) -> Layout {
        let mut next = self.clone();
        let Some(group) = tree::siblings_mut(&mut next.columns, parent_column_id) else {
            tracing::debug!(?parent_column_id, "add_column: no such parent column");
            return self.clone();
        };

        let mut column = Column::new(ids.next_id("column"), orientation);
        column.parent_id = parent_column_id.map(str::to_string);
        group.push(column);

        if orientation == Orientation::Horizontal {
            redistribute(group);
        }
        next
    }

    /// Remove a column wherever it lives, then rebalance its horizontal siblings.
    ///
    /// The last remaining root column cannot be deleted.
    pub fn delete_column(&self, column_id: &str) -> Layout {
        let Some(location) = tree::locate(&self.columns, column_id) else {
            tracing::debug!(column_id, "delete_column: no such column");
            return self.clone();
        };
        if location.parent.is_none() && self.columns.len() <= 1 {
            tracing::debug!(column_id, "delete_column: refusing to delete the last root column");
            return self.clone();
        }

        let mut next = self.clone();
        if let Some(group) = tree::siblings_mut(&mut next.columns, location.parent.as_deref()) {
            group.remove(location.index);
            redistribute(group);
        }
        next
    }

    /// Set one column's width, clamped to `1..=12`. Siblings are not touched.
    pub fn update_column_width(&self, column_id: &str, width: i64) -> Layout {
        let mut next = self.clone();
        if !tree::walk(&mut next.columns, column_id, |column| {
            column.width = clamp_width(width)
        }) {
            tracing::debug!(column_id, "update_column_width: no such column");
        }
        next
    }

    /// Shallow-merge attribute changes into one column.
    pub fn update_column(&self, column_id: &str, patch: &ColumnPatch) -> Layout {
        let mut next = self.clone();
        if !tree::walk(&mut next.columns, column_id, |column| patch.apply(column)) {
            tracing::debug!(column_id, "update_column: no such column");
        }
        next
    }

    /// Set the container width verbatim.
    pub fn update_container_width(&self, width: impl Into<String>) -> Layout {
        Layout {
            container_width: width.into(),
            ..self.clone()
        }
    }

    /// Move the component at `drag_index` of the source column to
    /// `hover_index` of the target column. Source and target may be equal.
    pub fn move_component(
        &self,
        drag_index: usize,
        hover_index: usize,
        source_column_id: &str,
        target_column_id: &str,
    ) -> Layout {
        let in_range = self
            .find_column(source_column_id)
            .is_some_and(|c| drag_index < c.components.len());
        if !in_range || self.find_column(target_column_id).is_none() {
            tracing::debug!(
                drag_index,
                source_column_id,
                target_column_id,
                "move_component: no such source or target"
            );
            return self.clone();
        }

        let mut next = self.clone();
        let mut moved = None;
        tree::walk(&mut next.columns, source_column_id, |column| {
            moved = Some(column.components.remove(drag_index));
        });
        if let Some(component) = moved {
            tree::walk(&mut next.columns, target_column_id, |column| {
                let index = hover_index.min(column.components.len());
                column.components.insert(index, component);
            });
        }
        next
    }

    /// Reorder a sibling group, then give its horizontal columns equal widths.
    ///
    /// Unlike [`Layout::update_column_width`], a reorder always rebalances.
    pub fn move_column(
        &self,
        drag_index: usize,
        hover_index: usize,
        parent_column_id: Option<&str>,
    ) -> Layout {
        let mut next = self.clone();
        let Some(group) = tree::siblings_mut(&mut next.columns, parent_column_id) else {
            tracing::debug!(?parent_column_id, "move_column: no such parent column");
            return self.clone();
        };
        if drag_index >= group.len() {
            tracing::debug!(drag_index, "move_column: index out of range");
            return self.clone();
        }

        let column = group.remove(drag_index);
        let index = hover_index.min(group.len());
        group.insert(index, column);
        redistribute(group);
        next
    }
}
