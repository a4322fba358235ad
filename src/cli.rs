//! Minimal CLI host: symbol metadata → (predicates | diagnostics | marker attribute)
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::config::GeneratorOptions;
use crate::context::{build_context, Outcome};
use crate::error::{InputError, OutputError};
use crate::generator::{self, GeneratedSource};
use crate::metadata::EnumSymbol;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate `Is*`/`Has*` predicate extensions for enums described by JSON symbol metadata
#[derive(Parser, Debug)]
#[command(name = "enum-predicates", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// run the full pipeline and emit one source file per eligible enum
    Generate(GenerateOut),
    /// validate candidates and report diagnostics without generating
    Check(CheckOut),
    /// print the opt-in attribute declaration
    Attribute(AttributeOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON), one candidate or array per line
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output directory (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// generator options as JSON (defaults if omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct CheckOut {
    #[command(flatten)]
    input_settings: InputSettings,
}

#[derive(clap::Parser, Debug)]
struct AttributeOut {
    /// output .cs file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// Candidates that decoded, plus the per-document faults that did not.
#[derive(Debug, Default)]
struct LoadedInput {
    candidates: Vec<EnumSymbol>,
    faults: Vec<InputError>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    /// Only path resolution is fatal; a bad file, line, or candidate is
    /// recorded and the rest still load.
    fn load_candidates(&self) -> Result<LoadedInput, InputError> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        let mut loaded = LoadedInput::default();
        for source_path in source_paths {
            let source = match std::fs::read_to_string(&source_path) {
                Ok(x) => x,
                Err(source) => {
                    loaded.faults.push(InputError::Read { path: source_path, source });
                    continue;
                }
            };
            let documents: Vec<(usize, &str)> = if self.ndjson {
                source
                    .lines()
                    .enumerate()
                    .filter(|(_, line)| !line.trim().is_empty())
                    .map(|(i, line)| (i + 1, line))
                    .collect()
            } else {
                vec![(1, source.as_str())]
            };
            for (line, document) in documents {
                match serde_json::from_str::<serde_json::Value>(document) {
                    Ok(value) => collect_candidates(&source_path, value, &mut loaded),
                    Err(source) => loaded.faults.push(InputError::Json {
                        path: source_path.clone(),
                        line,
                        source,
                    }),
                }
            }
        }
        tracing::debug!(
            candidates = loaded.candidates.len(),
            faults = loaded.faults.len(),
            "inputs loaded"
        );
        Ok(loaded)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> anyhow::Result<ExitCode> {
        match &self.cmd {
            Command::Generate(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(ExitCode::SUCCESS);
                }

                // 1) options
                let options = match target.config.as_ref() {
                    Some(path) => GeneratorOptions::load(path)?,
                    None => GeneratorOptions::default(),
                };

                // 2) candidates
                let input = target.input_settings.load_candidates()?;
                report_faults(&input.faults);

                // 3) generate
                let report = generator::generate(&input.candidates, &options);
                for diagnostic in &report.diagnostics {
                    eprintln!("{}", diagnostic.render());
                }

                // 4) register outputs
                match target.out.as_ref() {
                    Some(dir) => write_sources(dir, &report.sources)?,
                    None => {
                        for source in &report.sources {
                            println!("// ---- {} ----", source.hint_name);
                            print!("{}", source.text);
                        }
                    }
                }

                let failed = report.has_errors() || !input.faults.is_empty();
                Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
            }
            Command::Check(target) => {
                let input = target.input_settings.load_candidates()?;
                report_faults(&input.faults);

                let (mut eligible, mut skipped, mut rejected) = (0usize, 0usize, 0usize);
                for symbol in &input.candidates {
                    match build_context(symbol) {
                        Outcome::Accepted(descriptor) => {
                            eligible += 1;
                            eprintln!("{} {}", "ok".green(), descriptor.qualified_name());
                        }
                        Outcome::Skipped(reason) => {
                            skipped += 1;
                            tracing::info!(name = symbol.name(), ?reason, "skipped");
                        }
                        Outcome::Rejected(diagnostic) => {
                            rejected += 1;
                            eprintln!("{}", diagnostic.render());
                        }
                    }
                }
                eprintln!(
                    "{eligible} eligible, {skipped} skipped, {rejected} rejected, {} unreadable",
                    input.faults.len()
                );

                let failed = rejected > 0 || !input.faults.is_empty();
                Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
            }
            Command::Attribute(target) => {
                let source = generator::marker_attribute_source();
                if let Some(out) = target.out.as_ref() {
                    write_file(out, &source.text)?;
                } else {
                    print!("{}", source.text);
                }
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// A document holds one candidate object or an array of them.
fn collect_candidates(path: &Path, value: serde_json::Value, loaded: &mut LoadedInput) {
    let values = match value {
        serde_json::Value::Array(xs) => xs,
        other => vec![other],
    };
    for (index, value) in values.into_iter().enumerate() {
        match crate::path_de::from_value_with_path::<EnumSymbol>(value) {
            Ok(symbol) => loaded.candidates.push(symbol),
            Err(source) => loaded.faults.push(InputError::Candidate {
                path: path.to_path_buf(),
                index,
                source,
            }),
        }
    }
}

fn report_faults(faults: &[InputError]) {
    for fault in faults {
        tracing::debug!(?fault, "input fault");
        eprintln!("{}: {}", "input error".red().bold(), format_chain(fault));
    }
}

fn format_chain(error: &dyn std::error::Error) -> String {
    let mut out = error.to_string();
    let mut cause = error.source();
    while let Some(inner) = cause {
        out.push_str(": ");
        out.push_str(&inner.to_string());
        cause = inner.source();
    }
    out
}

fn write_sources(dir: &Path, sources: &[GeneratedSource]) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    for source in sources {
        let path = dir.join(&source.hint_name);
        write_file(&path, &source.text)
            .with_context(|| format!("registering {}", source.hint_name))?;
        tracing::info!(path = %path.display(), "wrote");
    }
    Ok(())
}

fn write_file(path: &Path, text: &str) -> Result<(), OutputError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, text).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, InputError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let entries = glob::glob(pattern).map_err(|source| InputError::Pattern {
                pattern: pattern.to_string(),
                source,
            })?;
            let mut matched_any = false;
            for entry in entries {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                return Err(InputError::NoMatch(pattern.to_string()));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
