//! knit: generate documentation from annotated DataWeave modules.
//!
//! Supports two modes:
//!
//! - **stdin mode**: `knit < strings.dwl` documents a single unit named `stdin`
//! - **file mode**: `knit -o docs/modules.md src/main/resources/dw` documents
//!   every `.dwl` file found, configurable through `knit.toml`

use anyhow::{bail, Context, Result};
use clap::Parser;
use knit::config::Config;
use knit::discover;
use knit::render::{self, html::HtmlRenderer, DocOptions, Renderer};
use knit::Unit;
use std::collections::HashSet;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "knit",
    version,
    about = "Generate documentation from annotated DataWeave modules"
)]
struct Cli {
    /// Input files, directories or glob patterns. If omitted and none are
    /// configured, reads from stdin.
    inputs: Vec<String>,

    /// Config file (default: ./knit.toml when present)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Root that module paths of explicit files are relative to
    #[arg(short = 'r', long)]
    root: Option<PathBuf>,

    /// Source file extension, without the dot
    #[arg(short = 'e', long)]
    extension: Option<String>,

    /// Output file, or output directory with --split. Default: stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: markdown (default), html, text, json
    #[arg(short = 'f', long)]
    format: Option<String>,

    /// Write one file per module into the output directory
    #[arg(long)]
    split: bool,

    /// Start the document with a module/description table
    #[arg(long)]
    header_table: bool,

    /// Render this module first. Can be specified multiple times; order is kept.
    #[arg(long = "module", value_name = "NAME")]
    modules: Vec<String>,

    /// Text written before the documentation
    #[arg(long)]
    header_text: Option<String>,

    /// Text written after the documentation
    #[arg(long)]
    footer_text: Option<String>,

    /// Stylesheet linked from HTML output
    #[arg(long)]
    stylesheet: Option<String>,

    /// Log debug output to stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "knit=debug" } else { "knit=warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .init();

    let mut config = Config::discover(cli.config.as_deref())?;
    apply_overrides(&cli, &mut config);

    if !config.generate {
        tracing::info!("generation disabled in configuration, nothing to do");
        return Ok(());
    }

    let renderer = create_renderer(&config)?;

    let units = if config.has_no_inputs() {
        stdin_mode(&config)?
    } else {
        file_mode(&config)?
    };

    emit(&config, renderer.as_ref(), &units)
}

/// Command-line flags win over `knit.toml`; positional inputs are appended.
fn apply_overrides(cli: &Cli, config: &mut Config) {
    config.files.extend(cli.inputs.iter().cloned());
    if let Some(ref root) = cli.root {
        config.root = root.clone();
    }
    if let Some(ref extension) = cli.extension {
        config.extension = extension.trim_start_matches('.').to_string();
    }
    if let Some(ref output) = cli.output {
        config.output = Some(output.clone());
    }
    if let Some(ref format) = cli.format {
        config.format = format.clone();
    }
    if cli.split {
        config.single_output_file = false;
    }
    if cli.header_table {
        config.write_header_table = true;
    }
    if !cli.modules.is_empty() {
        config.module_list = cli.modules.clone();
    }
    if let Some(ref text) = cli.header_text {
        config.header_text = text.clone();
    }
    if let Some(ref text) = cli.footer_text {
        config.footer_text = text.clone();
    }
    if let Some(ref stylesheet) = cli.stylesheet {
        config.stylesheet = Some(stylesheet.clone());
    }
}

fn create_renderer(config: &Config) -> Result<Box<dyn Renderer>> {
    match (config.format.as_str(), &config.stylesheet) {
        ("html", Some(stylesheet)) => Ok(Box::new(HtmlRenderer::with_stylesheet(stylesheet))),
        (format, _) => Ok(render::create_renderer(format)?),
    }
}

/// stdin mode: the whole input is one unit named `stdin`.
fn stdin_mode(config: &Config) -> Result<Vec<Unit>> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    Ok(vec![knit::parse_source(
        &config.root,
        Path::new("stdin"),
        &config.extension,
        &input,
    )])
}

/// file mode: discover and parse every configured source. Unreadable files
/// are reported and skipped.
fn file_mode(config: &Config) -> Result<Vec<Unit>> {
    let sources = discover::collect(
        &config.root,
        &config.files,
        &config.directories,
        &config.extension,
    )?;

    let mut units = Vec::with_capacity(sources.len());
    for source in &sources {
        match source.parse(&config.extension) {
            Ok(unit) => units.push(unit),
            Err(e) => tracing::warn!("skipping {}: {e}", source.path.display()),
        }
    }
    tracing::debug!(sources = sources.len(), units = units.len(), "parsed sources");
    Ok(units)
}

fn doc_options(config: &Config) -> DocOptions {
    DocOptions {
        write_header_table: config.write_header_table,
        header_text: config.header_text.clone(),
        footer_text: config.footer_text.clone(),
        module_list: config.module_list.clone(),
    }
}

/// Write the rendered documentation to stdout, a single file, or one file
/// per unit.
fn emit(config: &Config, renderer: &dyn Renderer, units: &[Unit]) -> Result<()> {
    let options = doc_options(config);

    match (&config.output, config.single_output_file) {
        (None, true) => {
            print!("{}", renderer.write_document(units, &options)?);
            Ok(())
        }
        (None, false) => bail!("--output is required when writing one file per module"),
        (Some(path), true) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory: {}", parent.display())
                })?;
            }
            let output = renderer.write_document(units, &options)?;
            fs::write(path, output)
                .with_context(|| format!("failed to write {}", path.display()))
        }
        (Some(dir), false) => write_split(dir, renderer, units, &options),
    }
}

/// One document per unit, named `<module>.<ext>`. The header table only
/// makes sense for the combined document and is left out.
fn write_split(
    dir: &Path,
    renderer: &dyn Renderer,
    units: &[Unit],
    options: &DocOptions,
) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;

    let options = DocOptions {
        write_header_table: false,
        module_list: Vec::new(),
        ..options.clone()
    };
    let ext = renderer.file_extension();
    let mut written = HashSet::new();

    for unit in units {
        if !written.insert(unit.name.as_str()) {
            tracing::warn!(
                "module name '{}' is not unique, {} overwrites an earlier module",
                unit.name,
                unit.path
            );
        }
        let out_path = dir.join(output_file_name(unit, ext));
        let output = renderer.write_document(std::slice::from_ref(unit), &options)?;
        fs::write(&out_path, output)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }

    Ok(())
}

fn output_file_name(unit: &Unit, ext: &str) -> String {
    format!("{}.{}", unit.name, ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(args: &[&str]) -> Config {
        let cli = Cli::parse_from(std::iter::once("knit").chain(args.iter().copied()));
        let mut config = Config {
            files: vec!["configured.dwl".into()],
            module_list: vec!["fromFile".into()],
            ..Default::default()
        };
        apply_overrides(&cli, &mut config);
        config
    }

    #[test]
    fn defaults_leave_config_untouched() {
        let config = config_for(&[]);
        assert_eq!(config.files, ["configured.dwl"]);
        assert_eq!(config.format, "markdown");
        assert!(config.single_output_file);
        assert_eq!(config.module_list, ["fromFile"]);
    }

    #[test]
    fn flags_override_config() {
        let config = config_for(&[
            "-f", "html", "-e", ".dw", "--split", "-o", "out", "--header-table", "--module", "b",
            "--module", "a", "extra.dwl",
        ]);
        assert_eq!(config.format, "html");
        assert_eq!(config.extension, "dw");
        assert!(!config.single_output_file);
        assert_eq!(config.output, Some(PathBuf::from("out")));
        assert!(config.write_header_table);
        assert_eq!(config.module_list, ["b", "a"]);
        assert_eq!(config.files, ["configured.dwl", "extra.dwl"]);
    }

    #[test]
    fn stylesheet_selects_linked_html() {
        let config = config_for(&["-f", "html", "--stylesheet", "site.css"]);
        let html = create_renderer(&config)
            .unwrap()
            .write_document(&[], &DocOptions::default())
            .unwrap();
        assert!(html.contains("href=\"site.css\""));
    }

    #[test]
    fn output_name_uses_module_name() {
        let unit = Unit {
            name: "strings".into(),
            ..Default::default()
        };
        assert_eq!(output_file_name(&unit, "md"), "strings.md");
    }
}
