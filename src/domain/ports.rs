use crate::domain::model::{Binding, RenderResult, TemplateSet};
use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn template_path(&self) -> &str;
    fn params_path(&self) -> &str;
    /// None 表示輸出到 stdout
    fn output_path(&self) -> Option<&str>;
    fn placeholder(&self) -> &str;
    fn strict(&self) -> bool;
    fn extra_bindings(&self) -> Vec<Binding>;
}

pub trait Pipeline: Send + Sync {
    fn load(&self) -> Result<TemplateSet>;
    fn substitute(&self, inputs: TemplateSet) -> Result<RenderResult>;
    fn emit(&self, result: RenderResult) -> Result<String>;
}
