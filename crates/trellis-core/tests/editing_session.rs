//! End-to-end editing scenarios driven through the command dispatcher.

use serde_json::json;
use trellis_core::{Command, ComponentKind, Layout, Orientation, SequentialIds};

fn commands(values: serde_json::Value) -> Vec<Command> {
    serde_json::from_value(values).unwrap()
}

#[test]
fn build_two_column_page() {
    let mut ids = SequentialIds::new();
    let script = commands(json!([
        { "op": "addColumn", "orientation": "horizontal" },
        { "op": "addComponent", "columnId": "column-root", "componentType": "text",
          "props": { "text": "Welcome", "element": "h1" } },
        { "op": "addComponent", "columnId": "column-1", "componentType": "button" },
        { "op": "addColumn", "orientation": "vertical", "parentColumnId": "column-1" },
        { "op": "addComponent", "columnId": "column-4", "componentType": "image" },
        { "op": "updateContainerWidth", "width": "960px" },
    ]));

    let layout = script
        .iter()
        .fold(Layout::default(), |layout, command| layout.apply(command, &mut ids));

    assert_eq!(layout.container_width, "960px");
    assert_eq!(layout.columns.len(), 2);
    assert!(layout.columns.iter().all(|c| c.width == 6));
    assert_eq!(layout.component_count(), 3);

    let (column, image) = layout.find_component("component-5").unwrap();
    assert_eq!(column.id, "column-4");
    assert_eq!(column.parent_id.as_deref(), Some("column-1"));
    assert_eq!(image.props.kind(), Some(ComponentKind::Image));
}

#[test]
fn repeated_commands_are_safe() {
    let mut ids = SequentialIds::new();
    let layout = Layout::default().add_column(Orientation::Horizontal, None, &mut ids);
    let delete = Command::DeleteColumn { column_id: "column-1".to_string() };

    let once = layout.apply(&delete, &mut ids);
    let twice = once.apply(&delete, &mut ids);
    assert_eq!(once, twice);

    let last = Command::DeleteColumn { column_id: "column-root".to_string() };
    assert_eq!(twice.apply(&last, &mut ids), twice);
}

#[test]
fn original_tree_is_untouched() {
    let mut ids = SequentialIds::new();
    let original = Layout::default().add_component(
        "column-root",
        "select",
        &serde_json::Map::new(),
        &mut ids,
    );
    let snapshot = original.clone();

    let _ = original.delete_component("component-1", "column-root");
    let _ = original.add_column(Orientation::Horizontal, Some("column-root"), &mut ids);
    let _ = original.update_column_width("column-root", 3);

    assert_eq!(original, snapshot);
}

#[test]
fn persisted_layout_round_trips() {
    let mut ids = SequentialIds::new();
    let layout = Layout::default()
        .add_column(Orientation::Vertical, Some("column-root"), &mut ids)
        .add_component("column-1", "card", &serde_json::Map::new(), &mut ids)
        .add_component("column-1", "widget-from-the-future", &serde_json::Map::new(), &mut ids);

    let json = layout.to_json().unwrap();
    let restored = Layout::from_json(&json).unwrap();
    assert_eq!(restored, layout);
}

#[test]
fn sparse_persisted_layout_is_defaulted() {
    let layout = Layout::from_json(
        r#"{ "columns": [ { "id": "a", "components": [ { "id": "x", "type": "button" } ] } ] }"#,
    )
    .unwrap();
    let column = &layout.columns[0];
    assert_eq!(column.width, 12);
    assert_eq!(column.gap, "1");
    assert_eq!(column.components[0].props, ComponentKind::Button.default_props());
    assert_eq!(layout.container_width, "100%");
}
