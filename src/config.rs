//! `knit.toml` configuration.
//!
//! ```toml
//! directories = ["src/main/resources/dw"]
//! output = "target/knit-doc.md"
//! write_header_table = true
//! module_list = ["core", "strings"]
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "knit.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// On/off switch; `false` skips generation entirely
    pub generate: bool,
    /// Individual source files, glob patterns allowed
    pub files: Vec<String>,
    /// Directories searched recursively for sources
    pub directories: Vec<PathBuf>,
    /// Root that explicit files' module paths are relative to
    pub root: PathBuf,
    /// Source file extension without the dot
    pub extension: String,
    /// Output format name, see [`crate::render::create_renderer`]
    pub format: String,
    /// Output file, or directory when `single_output_file` is false.
    /// Unset means stdout.
    pub output: Option<PathBuf>,
    pub single_output_file: bool,
    /// Written verbatim before everything else
    pub header_text: String,
    /// Written verbatim after everything else
    pub footer_text: String,
    /// Write a module/description table linking to each module
    pub write_header_table: bool,
    /// Module names rendered first, in this order
    pub module_list: Vec<String>,
    /// Stylesheet linked from HTML output instead of the built-in style
    pub stylesheet: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generate: true,
            files: Vec::new(),
            directories: Vec::new(),
            root: PathBuf::from("."),
            extension: crate::parser::DEFAULT_EXTENSION.to_string(),
            format: "markdown".to_string(),
            output: None,
            single_output_file: true,
            header_text: String::new(),
            footer_text: String::new(),
            write_header_table: false,
            module_list: Vec::new(),
            stylesheet: None,
        }
    }
}

impl Config {
    pub fn from_toml(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&text, path)
    }

    /// Load `path` if given, else `knit.toml` in the working directory if it
    /// exists, else defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let candidate = Path::new(DEFAULT_CONFIG_FILE);
                if candidate.is_file() {
                    tracing::debug!("using {}", candidate.display());
                    Self::load(candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// True when neither files nor directories are configured.
    pub fn has_no_inputs(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }
}
