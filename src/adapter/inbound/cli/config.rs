//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::config::{Config, VariancePolicy};
use crate::error::{ConfigError, Result};

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../lineforge.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note(&format!(
        "2. Run: lineforge config validate -c {}",
        path.display()
    ));
    output::note(&format!(
        "3. Run: lineforge run -c {} --salaries <file> --projections <file>",
        path.display()
    ));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path.display().to_string(),
            "config": config,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Path", path.display());
    output::field("Log level", &config.logging.level);
    output::field("Log format", &config.logging.format);

    output::section("Resolver");
    output::field("Threshold", config.resolver.threshold);
    output::field("DST threshold", config.resolver.defense_threshold);

    let adjuster = &config.adjuster;
    output::section("Adjuster");
    output::field("Mode", format!("{:?}", adjuster.mode).to_lowercase());
    output::field("Min projection", adjuster.min_projection);
    match adjuster.variance_policy {
        VariancePolicy::Off => output::field("Variance", "off"),
        VariancePolicy::PerBatch => output::field(
            "Variance",
            format!(
                "{}% per batch, seed {}",
                adjuster.variance_pct,
                adjuster
                    .seed
                    .map_or_else(|| "random".to_string(), |s| s.to_string())
            ),
        ),
    }
    output::field("Rules", adjuster.rule_table().len());
    if output::verbosity() > 0 {
        for rule in adjuster.rule_table() {
            let positions: Vec<&str> = rule.positions.iter().map(|p| p.code()).collect();
            output::note(&format!(
                "{:?} -> {} {:+}",
                rule.trigger,
                positions.join("/"),
                rule.impact
            ));
        }
    }

    let optimizer = &config.optimizer;
    output::section("Optimizer");
    output::field(
        "Platform",
        optimizer
            .platform
            .map_or_else(|| "detect".to_string(), |p| p.to_string()),
    );
    output::field("Profile", optimizer.profile);
    output::field("Small pool", optimizer.small_pool_threshold);
    output::field("QB/WR stack", if optimizer.stack_qb_wr { "yes" } else { "no" });

    output::section("Batch");
    output::field("Lineups", config.batch.count);
    output::field("Uniqueness", config.batch.min_uniqueness);
    output::field(
        "Max exposure",
        config
            .batch
            .max_exposure_pct
            .map_or_else(|| "none".to_string(), |pct| format!("{pct}%")),
    );

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    output::section("Config Validation");
    output::field("Path", path.display());
    let config = Config::load(path)?;
    output::success("Config file is valid");

    let warnings = warnings(&config);
    if !warnings.is_empty() {
        output::section("Warnings");
        for warning in &warnings {
            output::warning(warning);
        }
    }

    output::field(
        "Next",
        format!("lineforge config show -c {}", path.display()),
    );

    Ok(())
}

/// Settings that are legal but probably not what was meant.
fn warnings(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();
    if config.adjuster.variance_policy == VariancePolicy::Off
        && !config.adjuster.variance_pct.is_zero()
    {
        warnings.push("variance_pct is set but variance_policy is \"off\"".to_string());
    }
    if config.batch.count > 1 && config.batch.min_uniqueness == 0 {
        warnings.push("min_uniqueness = 0 allows identical lineups".to_string());
    }
    if config.adjuster.rules.as_ref().is_some_and(Vec::is_empty) {
        warnings.push("empty rule table disables matchup adjustments".to_string());
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_temp_dir() -> TempDir {
        tempfile::tempdir().expect("Failed to create temp directory")
    }

    #[test]
    fn template_parses_to_defaults() {
        let config = Config::parse(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn init_creates_parent_directories() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("nested").join("lineforge.toml");

        execute_init(&config_path, false).unwrap();
        let content = fs::read_to_string(&config_path).unwrap();
        assert_eq!(content, CONFIG_TEMPLATE);
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("lineforge.toml");
        fs::write(&config_path, "existing content").unwrap();

        assert!(execute_init(&config_path, false).is_err());
        assert_eq!(fs::read_to_string(&config_path).unwrap(), "existing content");

        execute_init(&config_path, true).unwrap();
        assert_eq!(fs::read_to_string(&config_path).unwrap(), CONFIG_TEMPLATE);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("lineforge.toml");
        fs::write(&config_path, "[batch]\nmin_uniqueness = 12\n").unwrap();
        assert!(execute_validate(&config_path).is_err());
    }

    #[test]
    fn warns_about_identical_lineups() {
        let mut config = Config::default();
        config.batch.min_uniqueness = 0;
        assert_eq!(warnings(&config).len(), 1);
        assert!(warnings(&Config::default()).is_empty());
    }
}
