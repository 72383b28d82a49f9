//! Minimal CLI: sample templates or type declarations in, fixtures out.
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use crate::engine::Mimic;
use crate::overrides::{Override, Overrides};
use crate::registry::TypeRegistry;
use crate::template::Template;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate synthetic JSON fixtures from sample templates or named type declarations
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// generate fixtures from JSON sample templates (dynamic mode)
    Sample(SampleOut),
    /// generate fixtures for a declared type name (static mode)
    Type(TypeOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// one or more inputs; literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// JSON object file with literal field overrides
    #[arg(long)]
    overrides: Option<PathBuf>,

    /// RNG seed; identical seeds replay identical fixtures
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(clap::Parser, Debug)]
struct SampleOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// fixtures to generate per template
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// pretty-print the generated JSON
    #[arg(long)]
    pretty: bool,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct TypeOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// name of the declared type to generate
    type_name: String,

    /// fixtures to generate
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// pretty-print the generated JSON
    #[arg(long)]
    pretty: bool,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn engine(&self) -> Mimic {
        match self.seed {
            Some(seed) => Mimic::seeded(seed),
            None => Mimic::new(),
        }
    }

    fn literal_overrides(&self) -> anyhow::Result<Overrides> {
        let Some(path) = self.overrides.as_deref() else {
            return Ok(Overrides::new());
        };
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read overrides file {}", path.display()))?;
        let map: serde_json::Map<String, Value> = serde_json::from_str(&source)
            .with_context(|| format!("overrides file {} must be a JSON object", path.display()))?;
        Ok(map
            .into_iter()
            .map(|(name, value)| (name, Override::Literal(value)))
            .collect())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Sample(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let overrides = target.input_settings.literal_overrides()?;
                let mut engine = target.input_settings.engine();
                let source_paths = resolve_file_path_patterns(&target.input_settings.input)?;

                let mut fixtures = Vec::new();
                for source_path in source_paths {
                    let source = std::fs::read_to_string(&source_path).with_context(|| {
                        format!("failed to read template file {}", source_path.display())
                    })?;
                    let sample: Value = serde_json::from_str(&source).with_context(|| {
                        format!("failed to parse template file {}", source_path.display())
                    })?;
                    let template = Template::from(sample);
                    for _ in 0..target.count {
                        fixtures.push(engine.make_dynamic(&template, &overrides));
                    }
                }
                emit(fixtures, target.pretty, target.out.as_deref())
            }
            Command::Type(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let overrides = target.input_settings.literal_overrides()?;
                let mut engine = target.input_settings.engine();
                let source_paths = resolve_file_path_patterns(&target.input_settings.input)?;

                let mut registry = TypeRegistry::new();
                for source_path in source_paths {
                    registry.extend_from_json_file(&source_path).with_context(|| {
                        format!("failed to load declarations from {}", source_path.display())
                    })?;
                }

                let mut fixtures = Vec::new();
                for _ in 0..target.count {
                    let fixture = engine
                        .make(&registry, &target.type_name, &overrides)
                        .with_context(|| {
                            format!("failed to generate a {:?} fixture", target.type_name)
                        })?;
                    fixtures.push(fixture);
                }
                emit(fixtures, target.pretty, target.out.as_deref())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// One fixture prints bare; several print as a JSON array.
fn emit(fixtures: Vec<Value>, pretty: bool, out: Option<&Path>) -> anyhow::Result<()> {
    let document = match fixtures.len() {
        1 => fixtures.into_iter().next().unwrap_or(Value::Null),
        _ => Value::Array(fixtures),
    };
    let rendered = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, &rendered)
                .with_context(|| format!("failed to write {}", out.display()))?;
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            // Treat as a glob pattern
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                let path = entry?;
                matched_any = true;
                out.push(path);
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                anyhow::bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            // Treat as a literal path
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
