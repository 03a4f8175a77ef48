use serde::{Deserialize, Serialize};

/// 一個佔位符名稱與其替換文字
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Binding {
    pub name: String,
    pub value: String,
}

impl Binding {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// 載入階段的產物：模板文字加上依序排列的綁定
#[derive(Debug, Clone)]
pub struct TemplateSet {
    pub template: String,
    pub bindings: Vec<Binding>,
}

#[derive(Debug, Clone)]
pub struct RenderResult {
    pub text: String,
    /// 實際被替換的佔位符名稱
    pub replaced: Vec<String>,
    /// 寬鬆模式下保留原樣的佔位符名稱
    pub untouched: Vec<String>,
}
