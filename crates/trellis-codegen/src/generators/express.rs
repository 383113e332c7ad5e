//! Express + Mongoose CRUD server generator.

use super::templates::TemplateEngine;
use super::{GeneratedFile, GeneratedProject};
use crate::naming::{capitalize_first, lower_first, pluralize};
use serde::Serialize;
use serde_json::{json, Value};
use trellis_core::ExpressModel;

/// Connection string used when none is configured.
pub const DEFAULT_MONGO_URL: &str = "mongodb://localhost:27017/mydb";

/// Listening port used when none is configured.
pub const DEFAULT_PORT: &str = "5000";

const IMPORTS: &str = "\
const express = require('express');
const mongoose = require('mongoose');
const cors = require('cors');
const bodyParser = require('body-parser');";

const SETUP_TEMPLATE: &str = "\
const app = express();
const PORT = process.env.PORT || {{port}};

// Middleware
app.use(cors());
app.use(bodyParser.json());
app.use(bodyParser.urlencoded({ extended: true }));

// Database connection
const dbURI = \"{{mongo_url}}\";";

const CRUD_FACTORY: &str = "\
// Loads the document named by :id into res.locals.doc
const fetchById = (Model, modelName) => async (req, res, next) => {
  try {
    const doc = await Model.findById(req.params.id);
    if (!doc) {
      return res.status(404).json({ message: `${modelName} not found` });
    }
    res.locals.doc = doc;
    next();
  } catch (err) {
    res.status(400).json({ message: 'Invalid id', error: err.message });
  }
};

const createCRUDRoutes = (Model, modelName) => {
  const router = express.Router();
  const byId = fetchById(Model, modelName);

  // List with pagination
  router.get('/', async (req, res) => {
    try {
      const page = Math.max(parseInt(req.query.page, 10) || 1, 1);
      const limit = Math.max(parseInt(req.query.limit, 10) || 10, 1);
      const [items, total] = await Promise.all([
        Model.find().skip((page - 1) * limit).limit(limit),
        Model.countDocuments(),
      ]);
      res.json({ items, total, page, pages: Math.ceil(total / limit) });
    } catch (err) {
      res.status(500).json({ message: err.message });
    }
  });

  // Regex search across string fields
  router.get('/search', async (req, res) => {
    try {
      const q = req.query.q || '';
      const paths = Object.keys(Model.schema.paths).filter(
        (p) => Model.schema.paths[p].instance === 'String'
      );
      const filter = paths.length
        ? { $or: paths.map((p) => ({ [p]: { $regex: q, $options: 'i' } })) }
        : {};
      res.json(await Model.find(filter));
    } catch (err) {
      res.status(500).json({ message: err.message });
    }
  });

  router.get('/:id', byId, (req, res) => {
    res.json(res.locals.doc);
  });

  router.post('/', async (req, res) => {
    try {
      const doc = await new Model(req.body).save();
      res.status(201).json(doc);
    } catch (err) {
      res.status(400).json({ message: err.message });
    }
  });

  // Full update
  router.put('/:id', byId, async (req, res) => {
    try {
      const doc = await Model.findOneAndReplace({ _id: req.params.id }, req.body, {
        new: true,
        runValidators: true,
      });
      res.json(doc);
    } catch (err) {
      res.status(400).json({ message: err.message });
    }
  });

  // Partial update
  router.patch('/:id', byId, async (req, res) => {
    try {
      res.locals.doc.set(req.body);
      res.json(await res.locals.doc.save());
    } catch (err) {
      res.status(400).json({ message: err.message });
    }
  });

  router.delete('/:id', byId, async (req, res) => {
    try {
      await res.locals.doc.deleteOne();
      res.json({ message: `${modelName} deleted` });
    } catch (err) {
      res.status(500).json({ message: err.message });
    }
  });

  return router;
};";

const STARTUP_TEMPLATE: &str = "\
// Start server
mongoose
  .connect(dbURI)
  .then(() => {
    console.log('Connected to MongoDB');
    app.listen(PORT, () => {
      console.log(`Server running on port ${PORT}`);
{{#each models}}      console.log(`{{class_name}} API: http://localhost:${PORT}/{{route}}`);
{{/each}}    });
  })
  .catch((err) => {
    console.error('Database connection error:', err);
    process.exit(1);
  });";

/// Per-model names shared by the mount and startup sections.
#[derive(Debug, Serialize)]
struct ModelNames {
    class_name: String,
    route: String,
}

impl ModelNames {
    fn of(model: &ExpressModel) -> Self {
        Self {
            class_name: capitalize_first(&model.name),
            route: pluralize(&model.name.to_lowercase()),
        }
    }
}

/// Express server generator.
#[derive(Debug, Clone)]
pub struct ExpressGenerator {
    mongo_url: String,
    port: String,
}

impl ExpressGenerator {
    pub fn new(mongo_url: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            mongo_url: mongo_url.into(),
            port: port.into(),
        }
    }

    /// Generate `server.js` for a model list.
    pub fn generate(&self, models: &[ExpressModel]) -> String {
        let engine = TemplateEngine::new();
        let names: Vec<ModelNames> = models.iter().map(ModelNames::of).collect();

        let mut sections = vec![
            IMPORTS.to_string(),
            render_or_warn(
                &engine,
                SETUP_TEMPLATE,
                &json!({ "port": self.port, "mongo_url": self.mongo_url }),
            ),
        ];
        sections.extend(models.iter().map(schema_block));
        sections.push(CRUD_FACTORY.to_string());
        if !names.is_empty() {
            sections.push(
                names
                    .iter()
                    .map(|n| {
                        format!(
                            "app.use('/{}', createCRUDRoutes({}, '{}'));",
                            n.route, n.class_name, n.class_name
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
            );
        }
        sections.push(render_or_warn(
            &engine,
            STARTUP_TEMPLATE,
            &json!({ "models": names }),
        ));

        let mut code = sections.join("\n\n");
        code.push('\n');
        code
    }

    /// Generate from untyped JSON; anything but a model list yields a server
    /// with no models.
    pub fn generate_value(&self, value: &Value) -> String {
        match serde_json::from_value::<Vec<ExpressModel>>(value.clone()) {
            Ok(models) => self.generate(&models),
            Err(err) => {
                tracing::warn!(framework = "express", %err, "input is not a model list, emitting skeleton");
                self.generate(&[])
            }
        }
    }

    /// `package.json` declaring the server's runtime dependencies.
    pub fn package_json(&self) -> String {
        let manifest = json!({
            "name": "generated-api",
            "version": "1.0.0",
            "main": "server.js",
            "scripts": {
                "start": "node server.js",
                "dev": "nodemon server.js"
            },
            "dependencies": {
                "body-parser": "^1.20.2",
                "cors": "^2.8.5",
                "express": "^4.18.2",
                "mongoose": "^8.0.0"
            },
            "devDependencies": {
                "nodemon": "^3.0.1"
            }
        });
        match serde_json::to_string_pretty(&manifest) {
            Ok(text) => text + "\n",
            Err(err) => {
                tracing::warn!(%err, "could not encode package.json");
                String::new()
            }
        }
    }

    /// `server.js` plus `package.json`.
    pub fn generate_project(&self, models: &[ExpressModel]) -> GeneratedProject {
        GeneratedProject {
            files: vec![
                GeneratedFile::new("server.js", self.generate(models)),
                GeneratedFile::new("package.json", self.package_json()),
            ],
        }
    }
}

impl Default for ExpressGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MONGO_URL, DEFAULT_PORT)
    }
}

fn render_or_warn(engine: &TemplateEngine, template: &str, data: &Value) -> String {
    engine.render_string(template, data).unwrap_or_else(|err| {
        tracing::warn!(%err, "server template failed to render");
        String::new()
    })
}

/// Schema and model definition for one model.
fn schema_block(model: &ExpressModel) -> String {
    let class_name = capitalize_first(&model.name);
    let schema_var = format!("{}Schema", lower_first(&class_name));
    let mut lines = vec![
        format!("// {} Schema", class_name),
        format!("const {} = new mongoose.Schema(", schema_var),
        "  {".to_string(),
    ];
    for field in &model.fields {
        let token = field.field_type.schema_token();
        if field.required {
            lines.push(format!(
                "    {}: {{ type: {}, required: true }},",
                field.name, token
            ));
        } else {
            lines.push(format!("    {}: {},", field.name, token));
        }
    }
    lines.push("  },".to_string());
    lines.push("  { timestamps: true }".to_string());
    lines.push(");".to_string());
    lines.push(String::new());
    lines.push(format!(
        "const {} = mongoose.model('{}', {});",
        class_name, class_name, schema_var
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::{ExpressField, MongooseType};

    fn user_model() -> ExpressModel {
        ExpressModel::new("user")
            .with_field(ExpressField::new("username", MongooseType::String).required())
            .with_field(ExpressField::new("age", MongooseType::Number))
    }

    #[test]
    fn test_server_sections() {
        let code = ExpressGenerator::new(DEFAULT_MONGO_URL, "5070").generate(&[user_model()]);

        assert!(code.contains("const dbURI = \"mongodb://localhost:27017/mydb\";"));
        assert!(code.contains("const PORT = process.env.PORT || 5070;"));
        assert!(code.contains("username: { type: String, required: true }"));
        assert!(code.contains("    age: Number,"));
        assert!(code.contains("app.use('/users', createCRUDRoutes(User, 'User'));"));
        assert!(code.contains("const User = mongoose.model('User', userSchema);"));
        assert!(code.contains(
            "      console.log(`User API: http://localhost:${PORT}/users`);\n    });"
        ));
    }

    #[test]
    fn test_crud_factory_emitted_once() {
        let models = vec![user_model(), ExpressModel::new("category")];
        let code = ExpressGenerator::default().generate(&models);
        assert_eq!(code.matches("const createCRUDRoutes").count(), 1);
        assert_eq!(code.matches("const fetchById").count(), 1);
        assert!(code.contains("app.use('/categories', createCRUDRoutes(Category, 'Category'));"));
    }

    #[test]
    fn test_class_name_only_capitalizes_first_letter() {
        let model = ExpressModel::new("blogPost")
            .with_field(ExpressField::new("author", MongooseType::ObjectId));
        let code = ExpressGenerator::default().generate(&[model]);
        assert!(code.contains("const BlogPost = mongoose.model('BlogPost', blogPostSchema);"));
        assert!(code.contains("author: mongoose.Schema.Types.ObjectId,"));
        assert!(code.contains("app.use('/blogposts', createCRUDRoutes(BlogPost, 'BlogPost'));"));
    }

    #[test]
    fn test_non_list_value_yields_skeleton() {
        let generator = ExpressGenerator::default();
        let code = generator.generate_value(&json!({"name": "user"}));
        assert_eq!(code, generator.generate(&[]));
        assert!(code.contains("const createCRUDRoutes"));
        assert!(!code.contains("app.use('/"));
    }

    #[test]
    fn test_project_files() {
        let project = ExpressGenerator::default().generate_project(&[user_model()]);
        assert_eq!(project.paths(), vec!["server.js", "package.json"]);
        let manifest: Value =
            serde_json::from_str(&project.file("package.json").unwrap().content).unwrap();
        assert_eq!(manifest["main"], "server.js");
        assert!(manifest["dependencies"]["mongoose"].is_string());
    }
}
