//! Minimal CLI: read AST JSON → analyze → (text | json), or regenerate C source
use std::io::Read as _;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::error::InputError;
use crate::ir::AnalysisSummary;

const STDIN_MARKER: &str = "-";

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// summarize the functions of a C program from its JSON-serialized AST
#[derive(Parser, Debug)]
#[command(version)]
pub struct CommandLineInterface {
    /// log level used when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "AST_SUMMARY_LOG", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// print the human-readable function report
    Text(TextOut),
    /// print the analysis summary as JSON
    Json(JsonOut),
    /// regenerate C source from the AST
    C(COut),
}

#[derive(Args, Debug, Clone)]
struct SourceSettings {
    /// JSON Pointer selecting the AST inside each document (e.g. /result/ast)
    #[arg(long)]
    json_pointer: Option<String>,

    /// One or more inputs. May be literal paths, quoted glob patterns, or '-' for stdin
    #[arg(long, short, num_args = 1.., default_value = "ast.json")]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    #[command(flatten)]
    source: SourceSettings,

    /// keep only functions whose name matches this regular expression
    #[arg(long)]
    name_filter: Option<Regex>,

    /// analyze top-level declarations in parallel
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

#[derive(clap::Parser, Debug)]
struct TextOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct JsonOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct COut {
    #[command(flatten)]
    source: SourceSettings,

    /// output .c file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl SourceSettings {
    /// Load every input and apply the JSON pointer, in the order given.
    fn load_all(&self) -> Result<Vec<(PathBuf, Value)>> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        let mut out = Vec::with_capacity(source_paths.len());
        for source_path in source_paths {
            let document = load_document(&source_path, self.json_pointer.as_deref())?;
            out.push((source_path, document));
        }
        Ok(out)
    }
}

impl InputSettings {
    /// Load, select and analyze every input, in the order given.
    fn analyze_all(&self) -> Result<Vec<(PathBuf, AnalysisSummary)>> {
        let documents = self.source.load_all()?;
        let mut out = Vec::with_capacity(documents.len());
        for (source_path, document) in documents {
            let summary = if self.parallel {
                crate::analysis::analyze_par(&document)
            } else {
                crate::analysis::analyze(&document)
            };
            let mut summary = summary
                .with_context(|| format!("cannot analyze {}", source_path.display()))?;
            if let Some(pattern) = self.name_filter.as_ref() {
                summary.retain_names(pattern);
            }
            debug!(path = %source_path.display(), total = summary.total_count, "analyzed input");
            out.push((source_path, summary));
        }
        Ok(out)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Text(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }
                let results = target.input_settings.analyze_all()?;
                let src = crate::render::render_text_many(&results);
                emit(target.out.as_deref(), &src)
            }
            Command::Json(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }
                let results = target.input_settings.analyze_all()?;
                let mut src = crate::render::render_json_many(&results)?;
                src.push('\n');
                emit(target.out.as_deref(), &src)
            }
            Command::C(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }
                let documents = target.source.load_all()?;
                let mut cg = crate::codegen::Codegen::new();
                let labelled = documents.len() > 1;
                for (source_path, document) in &documents {
                    if labelled {
                        cg.banner(&source_path.display().to_string());
                    }
                    cg.emit(document);
                }
                emit(target.out.as_deref(), &cg.into_string())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn emit(out: Option<&Path>, src: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("cannot create {}", parent.display()))?;
            }
            std::fs::write(out, src).with_context(|| format!("cannot write {}", out.display()))
        }
        None => {
            print!("{src}");
            Ok(())
        }
    }
}

/// Read and parse one input, then apply the optional JSON pointer.
pub fn load_document(path: &Path, json_pointer: Option<&str>) -> Result<Value, InputError> {
    let source = if path.as_os_str() == STDIN_MARKER {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map(|_| buf)
    } else {
        std::fs::read_to_string(path)
    };
    let source = source.map_err(|source| InputError::Read { path: path.to_path_buf(), source })?;
    let json_value = serde_json::from_str::<Value>(&source)
        .map_err(|source| InputError::Parse { path: path.to_path_buf(), source })?;
    match json_pointer {
        None => Ok(json_value),
        Some(pointer) => select_pointer(json_value, pointer)
            .ok_or_else(|| InputError::Pointer { path: path.to_path_buf(), pointer: pointer.to_string() }),
    }
}

fn select_pointer(mut value: Value, pointer: &str) -> Option<Value> {
    value.pointer_mut(pointer).map(Value::take)
}

pub fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, InputError>
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
            let before = out.len();
            for entry in glob::glob(pattern)? {
                out.push(entry?);
            }
            if out.len() == before {
                return Err(InputError::NoMatches(pattern.to_string()));
            }
        } else {
            if pattern == STDIN_MARKER && out.iter().any(|p| p.as_os_str() == STDIN_MARKER) {
                return Err(InputError::RepeatedStdin);
            }
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
