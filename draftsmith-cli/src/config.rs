use anyhow::Result;
use clap::ArgMatches;
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete configuration that merges CLI args, env vars, config files, and defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DraftsmithConfig {
    pub build: BuildConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildConfig {
    /// TOML manifest describing the document
    pub manifest: String,
    /// Output HTML file; empty means derive from the title slug
    pub output: String,
    /// Configuration file path
    pub config: String,
    /// Local checkout of the site repository, probed by the plan command
    pub repo_root: String,
    /// Plan as if no repository paths exist instead of probing
    pub offline: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            manifest: "./draft.toml".to_string(),
            output: String::new(),
            config: "./draftsmith.toml".to_string(),
            repo_root: ".".to_string(),
            offline: false,
        }
    }
}

impl Default for DraftsmithConfig {
    fn default() -> Self {
        Self {
            build: BuildConfig::default(),
        }
    }
}

impl DraftsmithConfig {
    /// Load configuration with cascading precedence:
    /// 1. CLI arguments (highest priority)
    /// 2. Environment variables (DRAFTSMITH_*)
    /// 3. Configuration file
    /// 4. Defaults (lowest priority)
    pub fn load(args: &ArgMatches) -> Result<Self> {
        let config_file = args
            .get_one::<String>("config")
            .unwrap_or(&"./draftsmith.toml".to_string())
            .clone();

        let mut builder = ConfigBuilder::builder();

        // 1. Start with defaults
        let defaults = Self::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        // 2. Add configuration file if it exists
        if Path::new(&config_file).exists() {
            builder = builder.add_source(File::with_name(&config_file.replace(".toml", "")));
        }

        // 3. Add environment variables with DRAFTSMITH_ prefix
        builder = builder.add_source(
            Environment::with_prefix("DRAFTSMITH")
                .prefix_separator("_")
                .separator("__"), // Use double underscore for nested keys
        );

        // 4. Override with CLI arguments (highest priority)
        let mut cli_overrides = std::collections::HashMap::new();

        if let Some(manifest) = args.get_one::<String>("manifest") {
            cli_overrides.insert("build.manifest".to_string(), manifest.clone());
        }
        if let Some(config) = args.get_one::<String>("config") {
            cli_overrides.insert("build.config".to_string(), config.clone());
        }
        // Only override with CLI args that are actually defined for this command
        if let Some(output) = args.try_get_one::<String>("output").unwrap_or(None) {
            cli_overrides.insert("build.output".to_string(), output.clone());
        }
        if let Some(root) = args.try_get_one::<String>("repo-root").unwrap_or(None) {
            cli_overrides.insert("build.repo_root".to_string(), root.clone());
        }
        if args.try_get_one::<bool>("offline").unwrap_or(None) == Some(&true) {
            cli_overrides.insert("build.offline".to_string(), "true".to_string());
        }

        if !cli_overrides.is_empty() {
            builder = builder.add_source(config::Config::try_from(&cli_overrides)?);
        }

        // Build and deserialize
        let config = builder.build()?;
        let draftsmith_config: DraftsmithConfig = config.try_deserialize()?;

        Ok(draftsmith_config)
    }

    pub fn build_config(&self) -> &BuildConfig {
        &self.build
    }
}
