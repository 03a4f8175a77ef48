use crate::core::template::Template;
use crate::core::{Binding, ConfigProvider, Pipeline, RenderResult, Storage, TemplateSet};
use crate::utils::error::{RenderError, Result};
use std::collections::HashMap;
use std::io::Write;

pub struct SimplePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> SimplePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn read_text(&self, path: &str) -> Result<String> {
        let bytes = self.storage.read_file(path)?;
        String::from_utf8(bytes).map_err(|_| RenderError::Utf8Error {
            path: path.to_string(),
        })
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for SimplePipeline<S, C> {
    fn load(&self) -> Result<TemplateSet> {
        tracing::debug!("Reading template from: {}", self.config.template_path());
        let template = self.read_text(self.config.template_path())?;

        tracing::debug!("Reading parameters from: {}", self.config.params_path());
        let params = self.read_text(self.config.params_path())?;

        // 參數檔綁定在前，命令列/設定檔的額外綁定在後，同名者後者優先
        let mut bindings = vec![Binding::new(self.config.placeholder(), params)];
        bindings.extend(self.config.extra_bindings());

        Ok(TemplateSet { template, bindings })
    }

    fn substitute(&self, inputs: TemplateSet) -> Result<RenderResult> {
        let mut values: HashMap<String, String> = HashMap::new();
        for binding in inputs.bindings {
            values.insert(binding.name, binding.value);
        }

        let template = Template::new(inputs.template);
        let substituted = if self.config.strict() {
            template.substitute(&values)?
        } else {
            template.safe_substitute(&values)
        };

        for name in &substituted.untouched {
            tracing::warn!("Placeholder '{}' left unresolved", name);
        }

        Ok(RenderResult {
            text: substituted.text,
            replaced: substituted.replaced,
            untouched: substituted.untouched,
        })
    }

    fn emit(&self, result: RenderResult) -> Result<String> {
        match self.config.output_path() {
            Some(path) => {
                tracing::debug!("Writing {} bytes to: {}", result.text.len(), path);
                self.storage.write_file(path, result.text.as_bytes())?;
                Ok(path.to_string())
            }
            None => {
                let mut stdout = std::io::stdout();
                stdout.write_all(result.text.as_bytes())?;
                stdout.flush()?;
                Ok("stdout".to_string())
            }
        }
    }
}
