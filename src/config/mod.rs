pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::{Binding, ConfigProvider};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "tmpl-render")]
#[command(about = "Render an HTML template by splicing in a parameters file")]
pub struct CliConfig {
    #[arg(long, default_value = "index.html.tmpl")]
    pub template: String,

    #[arg(long, default_value = "env/params")]
    pub params: String,

    #[arg(long, help = "Write output here instead of stdout")]
    pub output: Option<String>,

    #[arg(long, default_value = "params")]
    pub placeholder: String,

    #[arg(long, value_delimiter = ',', help = "Extra name=value bindings")]
    pub bind: Vec<String>,

    #[arg(long, help = "Leave unresolved placeholders untouched instead of failing")]
    pub permissive: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn template_path(&self) -> &str {
        &self.template
    }

    fn params_path(&self) -> &str {
        &self.params
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_deref()
    }

    fn placeholder(&self) -> &str {
        &self.placeholder
    }

    fn strict(&self) -> bool {
        !self.permissive
    }

    fn extra_bindings(&self) -> Vec<Binding> {
        // validate() 已擋下格式錯誤的項目
        self.bind
            .iter()
            .filter_map(|pair| validation::validate_binding_pair("bind", pair).ok())
            .map(|(name, value)| Binding::new(name, value))
            .collect()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("template", &self.template)?;
        validation::validate_path("params", &self.params)?;

        if let Some(output) = &self.output {
            validation::validate_path("output", output)?;
        }

        validation::validate_placeholder_name("placeholder", &self.placeholder)?;

        for pair in &self.bind {
            validation::validate_binding_pair("bind", pair)?;
        }

        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            template: "index.html.tmpl".to_string(),
            params: "env/params".to_string(),
            output: None,
            placeholder: "params".to_string(),
            bind: vec![],
            permissive: false,
            verbose: false,
        }
    }

    #[test]
    fn test_default_config_is_valid_and_strict() {
        let config = base_config();
        assert!(config.validate().is_ok());
        assert!(config.strict());
        assert_eq!(config.placeholder(), "params");
        assert!(config.output_path().is_none());
    }

    #[test]
    fn test_bind_pairs_become_bindings() {
        let mut config = base_config();
        config.bind = vec!["title=Home".to_string(), "lang=en".to_string()];

        assert!(config.validate().is_ok());
        let bindings = config.extra_bindings();
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].name, "title");
        assert_eq!(bindings[0].value, "Home");
        assert_eq!(bindings[1].name, "lang");
    }

    #[test]
    fn test_malformed_bind_pair_fails_validation() {
        let mut config = base_config();
        config.bind = vec!["not-a-pair".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_placeholder_name_fails_validation() {
        let mut config = base_config();
        config.placeholder = "no spaces".to_string();
        assert!(config.validate().is_err());
    }
}
