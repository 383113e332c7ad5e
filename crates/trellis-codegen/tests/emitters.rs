//! End-to-end emitter checks over layouts built with the mutation engine.

use serde_json::json;
use trellis_codegen::{
    DjangoGenerator, ExpressGenerator, LayoutGenerator, ReactGenerator, VueGenerator,
};
use trellis_core::{
    ComponentKind, DatabaseSettings, DjangoModel, ExpressModel, Layout, Orientation,
    SequentialIds,
};

fn edited_layout() -> Layout {
    let mut ids = SequentialIds::new();
    let layout = Layout::default().with_container_width("960px");
    let layout = layout.add_column(Orientation::Horizontal, None, &mut ids);
    let second = layout.columns[1].id.clone();
    let layout = layout.add_component("column-root", ComponentKind::Button.as_str(), &Default::default(), &mut ids);
    let layout = layout.add_component(&second, ComponentKind::Card.as_str(), &Default::default(), &mut ids);
    let layout = layout.add_column(Orientation::Horizontal, Some(&second), &mut ids);
    let nested = layout.columns[1].child_columns[0].id.clone();
    layout.add_component(&nested, "carousel", &Default::default(), &mut ids)
}

#[test]
fn react_scenario_button_in_full_width_column() {
    let layout: Layout = serde_json::from_value(json!({
        "containerWidth": "800px",
        "columns": [{
            "id": "column-root",
            "width": 12,
            "orientation": "horizontal",
            "components": [{ "id": "component-1", "type": "button", "props": {} }]
        }]
    }))
    .unwrap();

    let code = ReactGenerator::new().generate(&layout);
    assert!(code.contains("style={{ width: '800px' }}"));
    assert!(code.contains("className=\"w-full p-2\""));
    assert_eq!(code.matches("<button").count(), 1);
    assert!(code.contains(">Button</button>"));
}

#[test]
fn react_renders_edited_tree() {
    let code = ReactGenerator::new().generate(&edited_layout());
    assert!(code.contains("style={{ width: '960px' }}"));
    assert!(code.contains("Card Title"));
    assert!(code.contains("{/* Unknown component type: carousel */}"));
    // Card (component of the second column) precedes its nested column.
    assert!(code.find("Card Title").unwrap() < code.find("Unknown component type").unwrap());
}

#[test]
fn vue_renders_edited_tree() {
    let code = VueGenerator::new().generate(&edited_layout());
    assert_eq!(code.matches("<div class=\"row\">").count(), 1);
    assert!(code.contains("flex: 0 0 50.00%"));
    assert!(code.contains("<!-- Unknown component type: carousel -->"));
    assert!(code.trim_end().ends_with("</style>"));
}

#[test]
fn express_scenario() {
    let models: Vec<ExpressModel> = serde_json::from_value(json!([
        { "name": "user", "fields": [{ "name": "username", "type": "String", "required": true }] }
    ]))
    .unwrap();

    let code = ExpressGenerator::new("mongodb://localhost:27017/mydb", "5070").generate(&models);
    assert!(code.contains("const dbURI = \"mongodb://localhost:27017/mydb\";"));
    assert!(code.contains("username: { type: String, required: true }"));
    assert!(code.contains("app.use('/users', createCRUDRoutes(User, 'User'));"));
}

#[test]
fn django_scenario() {
    let models: Vec<DjangoModel> = serde_json::from_value(json!([
        {
            "name": "Product",
            "fields": [{
                "name": "price",
                "type": "DecimalField",
                "maxDigits": 10,
                "decimalPlaces": 2,
                "required": true
            }]
        }
    ]))
    .unwrap();

    let files = DjangoGenerator::default().generate(&models, &DatabaseSettings::sqlite());
    assert!(files
        .models
        .contains("price = models.DecimalField(max_digits=10, decimal_places=2, null=False, blank=False)"));
}

#[test]
fn django_numeric_strings_and_garbage_fall_back() {
    let models: Vec<DjangoModel> = serde_json::from_value(json!([
        {
            "name": "Product",
            "fields": [
                { "name": "sku", "type": "CharField", "maxLength": "32" },
                { "name": "price", "type": "DecimalField", "maxDigits": "lots" }
            ]
        }
    ]))
    .unwrap();

    let files = DjangoGenerator::default().generate(&models, &DatabaseSettings::sqlite());
    assert!(files.models.contains("sku = models.CharField(max_length=32, null=True, blank=True)"));
    assert!(files
        .models
        .contains("price = models.DecimalField(max_digits=10, decimal_places=2, null=True, blank=True)"));
}

#[test]
fn null_components_only_empty_their_own_column() {
    let value = json!({
        "containerWidth": "800px",
        "columns": [
            {
                "id": "column-a",
                "width": 6,
                "components": [{ "id": "b1", "type": "button", "props": { "text": "Keep me" } }]
            },
            { "id": "column-b", "width": 6, "components": null, "childColumns": null }
        ]
    });

    let react = ReactGenerator::new().generate_value(&value);
    assert!(react.contains("width: '800px'"));
    assert!(react.contains(">Keep me</button>"));
    assert_eq!(react.matches("w-1/2 p-2").count(), 2);

    let vue = VueGenerator::new().generate_value(&value);
    assert!(vue.contains(">Keep me</button>"));
    assert_eq!(vue.matches("flex: 0 0 50.00%").count(), 2);
}

#[test]
fn unrecognised_django_field_type_keeps_every_model() {
    let models = json!([
        { "name": "Order", "fields": [{ "name": "quantity", "type": "PositiveIntegerField" }] },
        { "name": "Product", "fields": [{ "name": "title", "type": "CharField" }] }
    ]);
    let files = DjangoGenerator::default().generate_value(&models, &json!({}));
    assert!(files.models.contains("class Order(models.Model):"));
    assert!(files.models.contains("quantity = models.CharField(max_length=255"));
    assert!(files.models.contains("class Product(models.Model):"));
}

#[test]
fn emitters_are_pure() {
    let layout = edited_layout();
    let copy = layout.clone();
    assert_eq!(ReactGenerator::new().generate(&layout), ReactGenerator::new().generate(&copy));
    assert_eq!(VueGenerator::new().generate(&layout), VueGenerator::new().generate(&copy));

    let express = vec![ExpressModel::new("post")];
    let generator = ExpressGenerator::default();
    assert_eq!(generator.generate(&express), generator.generate(&express.clone()));

    let django = vec![DjangoModel::new("post")];
    let generator = DjangoGenerator::default();
    let db = DatabaseSettings::postgres("localhost", "5432", "postgres", "", "mydb");
    assert_eq!(generator.generate(&django, &db), generator.generate(&django.clone(), &db.clone()));
}

#[test]
fn malformed_input_yields_skeletons() {
    let garbage = json!(42);

    let react = ReactGenerator::new().generate_value(&garbage);
    assert!(react.contains("export default function GeneratedLayout()"));
    assert!(!react.contains("w-full"));

    let vue = VueGenerator::new().generate_value(&json!({ "columns": "none" }));
    assert!(vue.contains("<div class=\"layout-container\" style=\"width: 100%;\"></div>"));

    let express = ExpressGenerator::default().generate_value(&garbage);
    assert!(express.contains("const app = express();"));

    let django = DjangoGenerator::default().generate_value(&garbage, &garbage);
    assert_eq!(django.models, "from django.db import models\n");
}

#[test]
fn projects_write_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    ReactGenerator::new()
        .generate_project(&edited_layout())
        .write_to(dir.path())
        .unwrap();
    DjangoGenerator::default()
        .generate_project(&[DjangoModel::new("post")], &DatabaseSettings::sqlite())
        .write_to(dir.path())
        .unwrap();

    assert!(dir.path().join("GeneratedLayout.jsx").is_file());
    assert!(dir.path().join("urls.py").is_file());
    assert!(dir.path().join("settings_snippet.py").is_file());
}
