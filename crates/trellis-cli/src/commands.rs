//! Subcommand implementations.

use crate::config::Config;
use crate::{Cli, Command, Source};
use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use trellis_codegen::{
    DjangoGenerator, ExpressGenerator, GeneratedFile, GeneratedProject, LayoutGenerator,
    ReactGenerator, VueGenerator,
};
use trellis_core::{DatabaseSettings, Layout, SequentialIds};
use trellis_session::{FileStorage, Session};

/// Run a parsed command line, writing generated text to `stdout` when no
/// output directory is given.
pub fn run(cli: Cli, stdout: &mut dyn Write) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Command::React { source, out, name } => {
            let name = name.unwrap_or(config.react.component_name);
            let generator = ReactGenerator::new().with_component_name(name);
            let project = layout_project(&generator, &source)?;
            emit(project, out.as_deref(), stdout)
        }
        Command::Vue { source, out, name } => {
            let name = name.unwrap_or(config.vue.component_name);
            let generator = VueGenerator::new().with_component_name(name);
            let project = layout_project(&generator, &source)?;
            emit(project, out.as_deref(), stdout)
        }
        Command::Express {
            source,
            out,
            mongo_url,
            port,
        } => {
            let generator = ExpressGenerator::new(
                mongo_url.unwrap_or(config.express.mongo_url),
                port.unwrap_or(config.express.port).to_string(),
            );
            let project = match (&source.input, &source.state) {
                (Some(path), _) => {
                    let server = generator.generate_value(&read_json(path)?);
                    GeneratedProject {
                        files: vec![
                            GeneratedFile::new("server.js", server),
                            GeneratedFile::new("package.json", generator.package_json()),
                        ],
                    }
                }
                (None, Some(dir)) => {
                    let session = Session::restore(&FileStorage::new(dir));
                    generator.generate_project(session.express_models())
                }
                (None, None) => bail!("either --input or --state is required"),
            };
            emit(project, out.as_deref(), stdout)
        }
        Command::Django {
            source,
            database,
            out,
            app_name,
        } => {
            let generator = DjangoGenerator::new(app_name.unwrap_or(config.django.app_name));
            let database_value = match database {
                Some(path) => Some(read_json(&path)?),
                None => None,
            };
            let files = match (&source.input, &source.state) {
                (Some(path), _) => {
                    let database = database_value
                        .unwrap_or_else(|| json_of(&config.django.database));
                    generator.generate_value(&read_json(path)?, &database)
                }
                (None, Some(dir)) => {
                    let session = Session::restore(&FileStorage::new(dir));
                    let database = match database_value {
                        Some(value) => serde_json::from_value::<DatabaseSettings>(value)
                            .context("invalid database settings")?,
                        None => session.database().clone(),
                    };
                    generator.generate(session.django_models(), &database)
                }
                (None, None) => bail!("either --input or --state is required"),
            };
            emit(files.into_project(), out.as_deref(), stdout)
        }
        Command::Edit {
            state,
            commands,
            sequential_ids,
        } => edit(&state, &commands, sequential_ids),
        Command::Reset { state } => {
            let mut storage = FileStorage::new(&state);
            Session::restore(&storage)
                .reset(&mut storage)
                .with_context(|| format!("failed to reset {}", state.display()))?;
            tracing::info!(state = %state.display(), "session reset");
            Ok(())
        }
    }
}

fn layout_project(generator: &dyn LayoutGenerator, source: &Source) -> Result<GeneratedProject> {
    match (&source.input, &source.state) {
        (Some(path), _) => {
            let code = generator.generate_value(&read_json(path)?);
            Ok(GeneratedProject {
                files: vec![GeneratedFile::new(generator.file_name(), code)],
            })
        }
        (None, Some(dir)) => {
            let session = Session::restore(&FileStorage::new(dir));
            Ok(generator.generate_project(session.layout()))
        }
        (None, None) => bail!("either --input or --state is required"),
    }
}

fn edit(state: &Path, commands: &Path, sequential_ids: bool) -> Result<()> {
    let commands: Vec<trellis_core::Command> = serde_json::from_value(read_json(commands)?)
        .with_context(|| format!("{} is not a list of commands", commands.display()))?;

    let mut storage = FileStorage::new(state);
    let mut session = Session::restore(&storage);
    if sequential_ids {
        let start = next_sequence(session.layout());
        session = session.with_ids(Box::new(SequentialIds::starting_at(start)));
    }

    for command in &commands {
        session.dispatch(command, Instant::now());
    }
    let layout = session.layout();
    tracing::info!(
        commands = commands.len(),
        columns = layout.column_count(),
        components = layout.component_count(),
        "applied commands"
    );
    session
        .end(&mut storage)
        .with_context(|| format!("failed to save session to {}", state.display()))
}

/// First counter value not used by any `prefix-<n>` id in the layout.
fn next_sequence(layout: &Layout) -> u64 {
    let mut max = 0;
    let mut note = |id: &str| {
        if let Some(n) = id.rsplit('-').next().and_then(|s| s.parse::<u64>().ok()) {
            max = max.max(n);
        }
    };
    for id in layout.column_ids() {
        note(&id);
    }
    trellis_core::tree::visit(&layout.columns, &mut |column, _| {
        for component in &column.components {
            note(&component.id);
        }
    });
    max + 1
}

fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn json_of(settings: &DatabaseSettings) -> Value {
    serde_json::to_value(settings).unwrap_or(Value::Null)
}

fn emit(project: GeneratedProject, out: Option<&Path>, stdout: &mut dyn Write) -> Result<()> {
    match out {
        Some(dir) => {
            project
                .write_to(dir)
                .with_context(|| format!("failed to write to {}", dir.display()))?;
            for path in project.paths() {
                tracing::info!(file = %dir.join(path).display(), "generated");
            }
        }
        None => {
            let single = project.files.len() == 1;
            for file in &project.files {
                if !single {
                    writeln!(stdout, "==> {} <==", file.path)?;
                }
                write!(stdout, "{}", file.content)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::{Column, Component, ComponentKind, Orientation};

    #[test]
    fn test_next_sequence_skips_used_ids() {
        let layout = Layout::empty().with_column(
            Column::new("column-4", Orientation::Horizontal)
                .with_component(Component::new("component-9", ComponentKind::Text.default_props()))
                .with_child(Column::new("column-root", Orientation::Vertical)),
        );
        assert_eq!(next_sequence(&layout), 10);
        assert_eq!(next_sequence(&Layout::default()), 1);
    }
}
