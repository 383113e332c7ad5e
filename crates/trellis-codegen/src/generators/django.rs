//! Django REST framework scaffold generator.

use super::templates::TemplateEngine;
use super::{GeneratedFile, GeneratedProject};
use crate::naming::{pascal_case, pluralize, py_str};
use serde_json::{json, Value};
use trellis_core::{DatabaseKind, DatabaseSettings, DjangoField, DjangoFieldType, DjangoModel};

/// App name used when none is configured.
pub const DEFAULT_APP_NAME: &str = "api";

const SETTINGS_TEMPLATE: &str = "\
# Add to INSTALLED_APPS
INSTALLED_APPS += [
    'rest_framework',
    '{{app_name}}',
]

# Database
{{#if postgres}}DATABASES = {
    'default': {
        'ENGINE': 'django.db.backends.postgresql',
        'NAME': '{{db.name}}',
        'USER': '{{db.user}}',
        'PASSWORD': '{{db.password}}',
        'HOST': '{{db.host}}',
        'PORT': '{{db.port}}',
    }
}

{{else}}DATABASES = {
    'default': {
        'ENGINE': 'django.db.backends.sqlite3',
        'NAME': BASE_DIR / 'db.sqlite3',
    }
}

{{/if}}# Django REST framework
REST_FRAMEWORK = {
    'DEFAULT_PAGINATION_CLASS': 'rest_framework.pagination.PageNumberPagination',
    'PAGE_SIZE': 10,
}
";

/// The generated Django sources, one string per file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DjangoFiles {
    pub models: String,
    pub serializers: String,
    pub views: String,
    pub urls: String,
    pub admin: String,
    /// Lines to merge into the project's `settings.py`.
    pub settings: String,
    pub requirements: String,
}

impl DjangoFiles {
    /// Bundle under the conventional file names.
    pub fn into_project(self) -> GeneratedProject {
        GeneratedProject {
            files: vec![
                GeneratedFile::new("models.py", self.models),
                GeneratedFile::new("serializers.py", self.serializers),
                GeneratedFile::new("views.py", self.views),
                GeneratedFile::new("urls.py", self.urls),
                GeneratedFile::new("admin.py", self.admin),
                GeneratedFile::new("settings_snippet.py", self.settings),
                GeneratedFile::new("requirements.txt", self.requirements),
            ],
        }
    }
}

/// Django generator.
#[derive(Debug, Clone)]
pub struct DjangoGenerator {
    app_name: String,
}

impl DjangoGenerator {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    pub fn generate(&self, models: &[DjangoModel], database: &DatabaseSettings) -> DjangoFiles {
        DjangoFiles {
            models: models_py(models),
            serializers: serializers_py(models),
            views: views_py(models),
            urls: urls_py(models),
            admin: admin_py(models),
            settings: self.settings_snippet(database),
            requirements: requirements_txt(database),
        }
    }

    /// Generate from untyped JSON. An unreadable model list is treated as
    /// empty and unreadable settings as the sqlite default.
    pub fn generate_value(&self, models: &Value, database: &Value) -> DjangoFiles {
        let models = serde_json::from_value::<Vec<DjangoModel>>(models.clone()).unwrap_or_else(|err| {
            tracing::warn!(framework = "django", %err, "input is not a model list, emitting skeleton");
            Vec::new()
        });
        let database = serde_json::from_value::<DatabaseSettings>(database.clone()).unwrap_or_else(|err| {
            tracing::warn!(framework = "django", %err, "unreadable database settings, using sqlite");
            DatabaseSettings::sqlite()
        });
        self.generate(&models, &database)
    }

    pub fn generate_project(&self, models: &[DjangoModel], database: &DatabaseSettings) -> GeneratedProject {
        self.generate(models, database).into_project()
    }

    /// Settings additions for the database and installed apps.
    pub fn settings_snippet(&self, database: &DatabaseSettings) -> String {
        let data = json!({
            "app_name": self.app_name,
            "postgres": database.kind == DatabaseKind::Postgres,
            "db": database,
        });
        TemplateEngine::new()
            .render_string(SETTINGS_TEMPLATE, &data)
            .unwrap_or_else(|err| {
                tracing::warn!(%err, "settings template failed to render");
                String::new()
            })
    }
}

impl Default for DjangoGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_APP_NAME)
    }
}

fn class_name(model: &DjangoModel) -> String {
    pascal_case(&model.name)
}

fn route(model: &DjangoModel) -> String {
    pluralize(&model.name.to_lowercase())
}

/// `from .models import A, B` or nothing for an empty list.
fn model_import(models: &[DjangoModel], module: &str, suffix: &str) -> Option<String> {
    if models.is_empty() {
        return None;
    }
    let names: Vec<String> = models
        .iter()
        .map(|m| format!("{}{}", class_name(m), suffix))
        .collect();
    Some(format!("from .{} import {}", module, names.join(", ")))
}

fn models_py(models: &[DjangoModel]) -> String {
    let mut out = String::from("from django.db import models\n");
    for model in models {
        let class = class_name(model);
        out.push_str(&format!("\n\nclass {}(models.Model):\n", class));
        for field in &model.fields {
            out.push_str(&format!("    {}\n", field_line(field)));
        }
        if !model.fields.is_empty() {
            out.push('\n');
        }
        out.push_str("    def __str__(self):\n");
        out.push_str(&format!("        {}\n", str_return(model, &class)));
    }
    out
}

fn str_return(model: &DjangoModel, class: &str) -> String {
    ["name", "title"]
        .iter()
        .find(|name| model.field(name).is_some())
        .map(|name| format!("return str(self.{})", name))
        .unwrap_or_else(|| format!("return f\"{} {{self.id}}\"", class))
}

/// `name = models.Type(args)` for one field.
fn field_line(field: &DjangoField) -> String {
    let kind = field.field_type;
    let mut args: Vec<String> = Vec::new();

    if kind.has_max_length() {
        args.push(format!("max_length={}", field.effective_max_length()));
    }
    match kind {
        DjangoFieldType::DecimalField => {
            args.push(format!("max_digits={}", field.effective_max_digits()));
            args.push(format!("decimal_places={}", field.effective_decimal_places()));
        }
        DjangoFieldType::DateField | DjangoFieldType::DateTimeField if field.auto_now_add => {
            args.push("auto_now_add=True".to_string());
        }
        _ => {}
    }
    if kind.is_relation() {
        let target = field
            .related_model
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .map(pascal_case)
            .unwrap_or_else(|| "self".to_string());
        args.push(py_str(&target));
        args.push(format!("on_delete=models.{}", field.on_delete.as_str()));
    }
    if kind.is_file() {
        args.push(format!("upload_to={}", py_str(field.effective_upload_to())));
    }
    if !field.choices.is_empty() {
        let choices: Vec<String> = field
            .choices
            .iter()
            .map(|c| format!("({}, {})", py_str(&c.value), py_str(&c.display)))
            .collect();
        args.push(format!("choices=[{}]", choices.join(", ")));
    }
    if let Some(default) = field.default.as_ref().and_then(|v| default_literal(kind, v)) {
        args.push(format!("default={}", default));
    }
    if field.unique {
        args.push("unique=True".to_string());
    }
    if field.required {
        args.push("null=False, blank=False".to_string());
    } else {
        args.push("null=True, blank=True".to_string());
    }

    format!("{} = models.{}({})", field.name, kind.as_str(), args.join(", "))
}

/// Python literal for a field default, quoted according to the field kind.
fn default_literal(kind: DjangoFieldType, value: &Value) -> Option<String> {
    match (kind, value) {
        (_, Value::Null) => None,
        (DjangoFieldType::BooleanField, Value::Bool(b)) => Some(py_bool(*b).to_string()),
        (DjangoFieldType::BooleanField, Value::String(s)) => {
            Some(py_bool(matches!(s.trim().to_lowercase().as_str(), "true" | "1" | "yes")).to_string())
        }
        (DjangoFieldType::JsonField, Value::String(s)) => match serde_json::from_str::<Value>(s) {
            Ok(parsed) => Some(py_literal(&parsed)),
            Err(_) => Some(py_str(s)),
        },
        (DjangoFieldType::JsonField, other) => Some(py_literal(other)),
        (k, Value::Number(n)) if k.is_numeric() => Some(n.to_string()),
        (k, Value::String(s)) if k.is_numeric() => {
            let s = s.trim();
            if s.parse::<f64>().is_ok() {
                Some(s.to_string())
            } else {
                tracing::debug!(value = s, "non-numeric default dropped");
                None
            }
        }
        (k, Value::String(s)) if k.is_string_like() => Some(py_str(s)),
        (k, other) if k.is_string_like() => Some(py_str(&other.to_string())),
        (_, Value::String(s)) => Some(py_str(s)),
        (_, other) => {
            tracing::debug!(field_type = kind.as_str(), value = %other, "default kept as text");
            Some(py_str(&other.to_string()))
        }
    }
}

fn py_bool(b: bool) -> &'static str {
    if b {
        "True"
    } else {
        "False"
    }
}

/// JSON value as a Python expression.
fn py_literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(b) => py_bool(*b).to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => py_str(s),
        Value::Array(items) => format!(
            "[{}]",
            items.iter().map(py_literal).collect::<Vec<_>>().join(", ")
        ),
        Value::Object(map) => format!(
            "{{{}}}",
            map.iter()
                .map(|(k, v)| format!("{}: {}", py_str(k), py_literal(v)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

fn serializers_py(models: &[DjangoModel]) -> String {
    let mut out = String::from("from rest_framework import serializers\n");
    if let Some(import) = model_import(models, "models", "") {
        out.push_str(&import);
        out.push('\n');
    }
    for model in models {
        let class = class_name(model);
        let fields: Vec<String> = std::iter::once("id")
            .chain(model.fields.iter().map(|f| f.name.as_str()))
            .map(py_str)
            .collect();
        out.push_str(&format!(
            "\n\nclass {class}Serializer(serializers.ModelSerializer):\n    class Meta:\n        model = {class}\n        fields = [{}]\n",
            fields.join(", ")
        ));
    }
    out
}

fn views_py(models: &[DjangoModel]) -> String {
    let mut out = String::from("from rest_framework import generics\n");
    if let Some(import) = model_import(models, "models", "") {
        out.push_str(&import);
        out.push('\n');
    }
    if let Some(import) = model_import(models, "serializers", "Serializer") {
        out.push_str(&import);
        out.push('\n');
    }
    for model in models {
        let class = class_name(model);
        for (suffix, base) in [
            ("ListCreateView", "ListCreateAPIView"),
            ("DetailView", "RetrieveUpdateDestroyAPIView"),
        ] {
            out.push_str(&format!(
                "\n\nclass {class}{suffix}(generics.{base}):\n    queryset = {class}.objects.all()\n    serializer_class = {class}Serializer\n"
            ));
        }
    }
    out
}

fn urls_py(models: &[DjangoModel]) -> String {
    let mut out = String::from("from django.urls import path\nfrom . import views\n\nurlpatterns = [\n");
    for model in models {
        let class = class_name(model);
        let route = route(model);
        let name = model.name.to_lowercase();
        out.push_str(&format!(
            "    path('{route}/', views.{class}ListCreateView.as_view(), name='{name}-list'),\n"
        ));
        out.push_str(&format!(
            "    path('{route}/<int:pk>/', views.{class}DetailView.as_view(), name='{name}-detail'),\n"
        ));
    }
    out.push_str("]\n");
    out
}

fn admin_py(models: &[DjangoModel]) -> String {
    let mut out = String::from("from django.contrib import admin\n");
    if let Some(import) = model_import(models, "models", "") {
        out.push_str(&import);
        out.push_str("\n\n");
        for model in models {
            out.push_str(&format!("admin.site.register({})\n", class_name(model)));
        }
    }
    out
}

fn requirements_txt(database: &DatabaseSettings) -> String {
    let mut out = String::from("Django>=4.2\ndjangorestframework>=3.14\n");
    if database.kind == DatabaseKind::Postgres {
        out.push_str("psycopg2-binary>=2.9\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::OnDelete;

    fn product() -> DjangoModel {
        DjangoModel::new("Product")
            .with_field(DjangoField::new("name", DjangoFieldType::CharField).required())
            .with_field(
                DjangoField::new("price", DjangoFieldType::DecimalField)
                    .with_decimal(10, 2)
                    .required(),
            )
    }

    #[test]
    fn test_decimal_field_line() {
        let files = DjangoGenerator::default().generate(&[product()], &DatabaseSettings::sqlite());
        assert!(files
            .models
            .contains("price = models.DecimalField(max_digits=10, decimal_places=2, null=False, blank=False)"));
        assert!(files
            .models
            .contains("name = models.CharField(max_length=255, null=False, blank=False)"));
        assert!(files.models.contains("        return str(self.name)"));
    }

    #[test]
    fn test_type_specific_kwargs_precede_nullability() {
        let field = DjangoField::new("owner", DjangoFieldType::ForeignKey)
            .with_relation("user", OnDelete::SetNull);
        assert_eq!(
            field_line(&field),
            "owner = models.ForeignKey('User', on_delete=models.SET_NULL, null=True, blank=True)"
        );

        let field = DjangoField::new("status", DjangoFieldType::CharField)
            .with_max_length(20)
            .with_choice("draft", "Draft")
            .with_default(json!("draft"));
        assert_eq!(
            field_line(&field),
            "status = models.CharField(max_length=20, choices=[('draft', 'Draft')], default='draft', null=True, blank=True)"
        );

        let field = DjangoField::new("photo", DjangoFieldType::ImageField);
        assert_eq!(
            field_line(&field),
            "photo = models.ImageField(upload_to='uploads/', null=True, blank=True)"
        );
    }

    #[test]
    fn test_default_literals_by_kind() {
        assert_eq!(default_literal(DjangoFieldType::BooleanField, &json!(true)).as_deref(), Some("True"));
        assert_eq!(default_literal(DjangoFieldType::BooleanField, &json!("false")).as_deref(), Some("False"));
        assert_eq!(default_literal(DjangoFieldType::IntegerField, &json!(5)).as_deref(), Some("5"));
        assert_eq!(default_literal(DjangoFieldType::FloatField, &json!("2.5")).as_deref(), Some("2.5"));
        assert_eq!(default_literal(DjangoFieldType::IntegerField, &json!("many")), None);
        assert_eq!(default_literal(DjangoFieldType::TextField, &json!(5)).as_deref(), Some("'5'"));
        assert_eq!(default_literal(DjangoFieldType::EmailField, &json!(true)).as_deref(), Some("'true'"));
        assert_eq!(default_literal(DjangoFieldType::SlugField, &json!("it's")).as_deref(), Some(r"'it\'s'"));
        assert_eq!(default_literal(DjangoFieldType::DateField, &json!("2024-01-01")).as_deref(), Some("'2024-01-01'"));
        assert_eq!(
            default_literal(DjangoFieldType::JsonField, &json!({"tags": [1, true, null]})).as_deref(),
            Some("{'tags': [1, True, None]}")
        );
    }

    #[test]
    fn test_str_falls_back_to_id() {
        let model = DjangoModel::new("order_item")
            .with_field(DjangoField::new("quantity", DjangoFieldType::IntegerField));
        let files = DjangoGenerator::default().generate(&[model], &DatabaseSettings::sqlite());
        assert!(files.models.contains("class OrderItem(models.Model):"));
        assert!(files.models.contains("return f\"OrderItem {self.id}\""));
    }

    #[test]
    fn test_serializers_views_and_urls() {
        let files = DjangoGenerator::default().generate(&[product()], &DatabaseSettings::sqlite());
        assert!(files.serializers.contains("fields = ['id', 'name', 'price']"));
        assert!(files.views.contains("class ProductListCreateView(generics.ListCreateAPIView):"));
        assert!(files.views.contains("class ProductDetailView(generics.RetrieveUpdateDestroyAPIView):"));
        assert!(files.views.contains("from .serializers import ProductSerializer"));
        assert!(files
            .urls
            .contains("path('products/', views.ProductListCreateView.as_view(), name='product-list'),"));
        assert!(files
            .urls
            .contains("path('products/<int:pk>/', views.ProductDetailView.as_view(), name='product-detail'),"));
        assert!(files.admin.contains("admin.site.register(Product)"));
    }

    #[test]
    fn test_settings_snippet_per_database() {
        let generator = DjangoGenerator::new("shop");
        let sqlite = generator.settings_snippet(&DatabaseSettings::sqlite());
        assert!(sqlite.contains("    'shop',"));
        assert!(sqlite.contains("'NAME': BASE_DIR / 'db.sqlite3',"));
        assert!(sqlite.contains("}\n\n# Django REST framework"));

        let postgres = generator.settings_snippet(&DatabaseSettings::postgres(
            "db.internal",
            "6543",
            "admin",
            "secret",
            "shop",
        ));
        assert!(postgres.contains("'ENGINE': 'django.db.backends.postgresql',"));
        assert!(postgres.contains("'HOST': 'db.internal',"));
        assert!(postgres.contains("'PORT': '6543',"));
        assert!(!postgres.contains("sqlite3"));
    }

    #[test]
    fn test_requirements_follow_database() {
        assert!(!requirements_txt(&DatabaseSettings::sqlite()).contains("psycopg2"));
        let postgres = DatabaseSettings::postgres("h", "5432", "u", "p", "n");
        assert!(requirements_txt(&postgres).contains("psycopg2-binary"));
    }

    #[test]
    fn test_invalid_value_yields_skeleton() {
        let generator = DjangoGenerator::default();
        let files = generator.generate_value(&json!({"fields": 3}), &json!("postgres"));
        assert_eq!(files, generator.generate(&[], &DatabaseSettings::sqlite()));
        assert_eq!(files.models, "from django.db import models\n");
        assert_eq!(files.urls, "from django.urls import path\nfrom . import views\n\nurlpatterns = [\n]\n");
    }

    #[test]
    fn test_project_file_names() {
        let project = DjangoGenerator::default().generate_project(&[product()], &DatabaseSettings::sqlite());
        assert_eq!(
            project.paths(),
            vec![
                "models.py",
                "serializers.py",
                "views.py",
                "urls.py",
                "admin.py",
                "settings_snippet.py",
                "requirements.txt"
            ]
        );
    }
}
