//! Minimal CLI: one JSON buffer in → one Swift document out
use std::io::Read;
use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use serde::Serialize;

use crate::{Conversion, Diagnostic, Options, DEFAULT_ROOT_NAME};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// convert a JSON document into nested Swift `Decodable` structs
#[derive(Parser, Debug)]
#[command(name = "json-decodable", version)]
pub struct CommandLineInterface {
    /// JSON file to convert; '-' or omitted reads stdin
    input: Option<PathBuf>,

    /// output .swift file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// top-level Swift type name
    #[arg(long, default_value = DEFAULT_ROOT_NAME)]
    root_type: String,

    /// fail instead of recursing deeper than this many levels
    #[arg(long, default_value_t = 128)]
    max_depth: usize,

    /// print `{ language, content, diagnostics }` for an editor host instead of raw Swift
    #[arg(long, default_value_t = false)]
    json: bool,
}

/// Payload an editor host needs to open the result as a new document.
#[derive(Serialize, Debug)]
struct HostDocument<'a> {
    language: &'static str,
    content: &'a str,
    diagnostics: &'a [Diagnostic],
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        let text = self.read_input()?;
        let rendered = self.convert_text(&text)?;
        match self.out.as_ref() {
            Some(out) => write_file(out, &rendered),
            None => {
                print!("{rendered}");
                Ok(())
            }
        }
    }

    /// Convert one buffer; warnings go to stderr, the document is returned.
    pub fn convert_text(&self, text: &str) -> Result<String> {
        let options = self.options()?;
        let conversion = crate::json_to_swift(text, &options)
            .context("Error converting JSON to Swift Decodable")?;
        for diagnostic in &conversion.diagnostics {
            eprintln!("{} {diagnostic}", "warning:".yellow().bold());
        }
        self.render(&conversion)
    }

    pub fn options(&self) -> Result<Options> {
        let root_name = crate::naming::derive_identifier(&self.root_type, true);
        if root_name.is_empty() || root_name.starts_with(|c: char| c.is_numeric()) {
            bail!("--root-type {:?} is not a usable Swift type name", self.root_type);
        }
        if crate::naming::is_reserved_type_name(&root_name) {
            bail!("--root-type {root_name:?} would shadow a type the generated members use");
        }
        Ok(Options { root_name, max_depth: self.max_depth })
    }

    fn render(&self, conversion: &Conversion) -> Result<String> {
        if !self.json {
            return Ok(conversion.source.clone());
        }
        let document = HostDocument {
            language: Conversion::LANGUAGE,
            content: &conversion.source,
            diagnostics: &conversion.diagnostics,
        };
        let mut payload = serde_json::to_string_pretty(&document)?;
        payload.push('\n');
        Ok(payload)
    }

    fn read_input(&self) -> Result<String> {
        match self.input.as_deref() {
            None => read_stdin(),
            Some(path) if path == Path::new("-") => read_stdin(),
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read stdin")?;
    Ok(text)
}

fn write_file(out: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(out, contents).with_context(|| format!("failed to write {}", out.display()))
}
