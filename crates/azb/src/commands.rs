//! CLI commands.

use std::io::{Read, Write};
use std::path::PathBuf;

use clap::Args;

use azb_config::{BuilderConfig, CliSettings};
use azb_elements::{NullBlockSource, NullViewSource};
use azb_renderer::ContentRenderer;
use azb_tokens::{PathContext, apply_legacy_renames};

use crate::error::CliError;

/// Request path and config options shared by the commands.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Input fragment file; reads stdin when omitted.
    pub input: Option<PathBuf>,

    /// Config file path (discovered from the current directory when
    /// omitted).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base URL of the serving site (scheme + host + base path).
    #[arg(long, default_value = "http://localhost")]
    pub base_url: String,

    /// Base path of the serving site (empty for root-hosted).
    #[arg(long, default_value = "")]
    pub base_path: String,

    /// Override the public files directory.
    #[arg(long)]
    pub public_files: Option<String>,

    /// Override the private files directory.
    #[arg(long)]
    pub private_files: Option<String>,

    /// Override the builder module directory.
    #[arg(long)]
    pub module_dir: Option<String>,

    /// Enable info-level logging.
    #[arg(long)]
    pub verbose: bool,
}

impl CommonArgs {
    fn read_input(&self) -> Result<String, CliError> {
        match &self.input {
            Some(path) => Ok(std::fs::read_to_string(path)?),
            None => {
                let mut content = String::new();
                std::io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    fn load_config(&self) -> Result<BuilderConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => BuilderConfig::from_file(path)?,
            None => BuilderConfig::load(&std::env::current_dir()?)?,
        };
        config.apply_cli(CliSettings {
            public_files: self.public_files.clone(),
            private_files: self.private_files.clone(),
            module_dir: self.module_dir.clone(),
            ..CliSettings::default()
        });
        Ok(config)
    }

    fn path_context(&self, config: &BuilderConfig) -> PathContext {
        PathContext::new(
            &self.base_url,
            &self.base_path,
            &config.paths.public_files,
            &config.paths.private_files,
            &config.paths.module_dir,
        )
    }
}

/// Recompose a stored fragment and print the JSON response.
///
/// Without a host CMS, placeholders resolve through null sources: every
/// CMS element degrades to the inert placeholder div. Useful for
/// previewing the static output and the collected asset manifest.
#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Keep editor data attributes in the output.
    #[arg(long)]
    editor: bool,
}

impl RenderArgs {
    /// Whether `--verbose` was passed (read by main for log setup).
    pub(crate) fn verbose(&self) -> bool {
        self.common.verbose
    }

    pub(crate) fn execute(self) -> Result<(), CliError> {
        let content = self.common.read_input()?;
        let config = self.common.load_config()?;
        let paths = self.common.path_context(&config);

        let renderer = ContentRenderer::new(&paths, &NullBlockSource, &NullViewSource);
        let response = renderer.render(&content, self.editor);

        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &response)?;
        writeln!(stdout)?;
        Ok(())
    }
}

/// Prepare an authored fragment for portable storage.
///
/// Applies the legacy name migration, then replaces absolute paths with
/// sentinel tokens and prints the storable fragment.
#[derive(Args)]
pub(crate) struct PortableArgs {
    #[command(flatten)]
    common: CommonArgs,
}

impl PortableArgs {
    /// Whether `--verbose` was passed (read by main for log setup).
    pub(crate) fn verbose(&self) -> bool {
        self.common.verbose
    }

    pub(crate) fn execute(self) -> Result<(), CliError> {
        let content = self.common.read_input()?;
        let config = self.common.load_config()?;
        let paths = self.common.path_context(&config);

        let migrated = apply_legacy_renames(&content);
        let stored = paths.insert_tokens(&migrated);

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(stored.as_bytes())?;
        Ok(())
    }
}
