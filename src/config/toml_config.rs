use crate::core::{Binding, ConfigProvider};
use crate::utils::error::{RenderError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub render: RenderMeta,
    pub template: TemplateConfig,
    pub params: ParamsConfig,
    pub output: Option<OutputConfig>,
    pub bindings: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderMeta {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamsConfig {
    pub path: String,
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub mode: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|source| RenderError::FileReadError {
                path: path.as_ref().display().to_string(),
                source,
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 先處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RenderError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換配置文字裡的環境變數 (例如 ${OUTPUT_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("render.name", &self.render.name)?;
        validation::validate_path("template.path", &self.template.path)?;
        validation::validate_path("params.path", &self.params.path)?;

        if let Some(placeholder) = &self.params.placeholder {
            validation::validate_placeholder_name("params.placeholder", placeholder)?;
        }

        if let Some(output) = &self.output {
            if let Some(path) = &output.path {
                validation::validate_path("output.path", path)?;
            }

            if let Some(mode) = &output.mode {
                let valid_modes = ["strict", "permissive"];
                if !valid_modes.contains(&mode.as_str()) {
                    return Err(RenderError::InvalidConfigValueError {
                        field: "output.mode".to_string(),
                        value: mode.clone(),
                        reason: format!("Valid modes: {}", valid_modes.join(", ")),
                    });
                }
            }
        }

        if let Some(bindings) = &self.bindings {
            for name in bindings.keys() {
                validation::validate_placeholder_name("bindings", name)?;
            }
        }

        Ok(())
    }

    /// 取得佔位符名稱
    pub fn placeholder_name(&self) -> &str {
        self.params.placeholder.as_deref().unwrap_or("params")
    }

    /// 是否使用嚴格替換
    pub fn is_strict(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.mode.as_deref())
            .map(|mode| mode != "permissive")
            .unwrap_or(true)
    }

    /// 取得輸出路徑，None 表示 stdout
    pub fn output_file(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn template_path(&self) -> &str {
        &self.template.path
    }

    fn params_path(&self) -> &str {
        &self.params.path
    }

    fn output_path(&self) -> Option<&str> {
        self.output_file()
    }

    fn placeholder(&self) -> &str {
        self.placeholder_name()
    }

    fn strict(&self) -> bool {
        self.is_strict()
    }

    fn extra_bindings(&self) -> Vec<Binding> {
        let Some(bindings) = &self.bindings else {
            return Vec::new();
        };

        // HashMap 沒有固定順序，排序讓行為可預期
        let mut names: Vec<&String> = bindings.keys().collect();
        names.sort();
        names
            .into_iter()
            .map(|name| Binding::new(name.clone(), bindings[name].clone()))
            .collect()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[render]
name = "landing-page"
description = "Render the landing page"
version = "1.0.0"

[template]
path = "index.html.tmpl"

[params]
path = "env/params"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.render.name, "landing-page");
        assert_eq!(config.template.path, "index.html.tmpl");
        assert_eq!(config.placeholder_name(), "params");
        assert!(config.is_strict());
        assert!(config.output_file().is_none());
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[render]
name = "landing-page"
description = "Render the landing page"
version = "1.0.0"

[template]
path = "pages/home.html.tmpl"

[params]
path = "env/params"
placeholder = "styles"

[output]
path = "dist/home.html"
mode = "permissive"

[bindings]
title = "Home"
lang = "en"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.placeholder_name(), "styles");
        assert!(!config.is_strict());
        assert_eq!(config.output_file(), Some("dist/home.html"));

        let bindings = config.extra_bindings();
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].name, "lang");
        assert_eq!(bindings[1].name, "title");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_RENDER_OUTPUT", "dist/generated.html");

        let toml_content = r#"
[render]
name = "env-test"
description = "test"
version = "1.0"

[template]
path = "index.html.tmpl"

[params]
path = "env/params"

[output]
path = "${TEST_RENDER_OUTPUT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output_file(), Some("dist/generated.html"));

        std::env::remove_var("TEST_RENDER_OUTPUT");
    }

    #[test]
    fn test_unset_env_var_left_verbatim() {
        let toml_content = r#"
[render]
name = "env-test"
description = "test"
version = "1.0"

[template]
path = "index.html.tmpl"

[params]
path = "env/params"

[output]
path = "${TMPL_RENDER_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output_file(), Some("${TMPL_RENDER_UNSET_VAR}"));
    }

    #[test]
    fn test_config_validation_rejects_bad_mode() {
        let toml_content = r#"
[render]
name = "bad-mode"
description = "test"
version = "1.0"

[template]
path = "index.html.tmpl"

[params]
path = "env/params"

[output]
mode = "lenient"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_bad_binding_name() {
        let toml_content = r#"
[render]
name = "bad-binding"
description = "test"
version = "1.0"

[template]
path = "index.html.tmpl"

[params]
path = "env/params"

[bindings]
"not a name" = "x"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[render]
name = "file-test"
description = "File test"
version = "1.0"

[template]
path = "index.html.tmpl"

[params]
path = "env/params"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.render.name, "file-test");
    }

    #[test]
    fn test_missing_config_file_names_path() {
        let err = TomlConfig::from_file("does/not/exist.toml").unwrap_err();
        match err {
            RenderError::FileReadError { path, .. } => assert_eq!(path, "does/not/exist.toml"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
