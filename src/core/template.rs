use crate::utils::error::{RenderError, Result};
use regex::Regex;
use std::collections::HashMap;

/// 佔位符語法：`$name`、`${name}`，`$$` 代表字面 `$`；
/// 其餘的 `$` 一律視為無效佔位符（最後的空分支）
const PLACEHOLDER_PATTERN: &str =
    r"\$(?:(\$)|([A-Za-z_][A-Za-z0-9_]*)|\{([A-Za-z_][A-Za-z0-9_]*)\}|)";

#[derive(Debug, Clone)]
pub struct Template {
    raw: String,
}

#[derive(Debug, Clone)]
pub struct Substituted {
    pub text: String,
    pub replaced: Vec<String>,
    pub untouched: Vec<String>,
}

impl Template {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// 模板引用到的佔位符名稱，依首次出現順序去重
    pub fn placeholders(&self) -> Vec<String> {
        let re = Regex::new(PLACEHOLDER_PATTERN).unwrap();
        let mut names = Vec::new();

        for caps in re.captures_iter(&self.raw) {
            if let Some(name) = caps.get(2).or_else(|| caps.get(3)) {
                let name = name.as_str();
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }

        names
    }

    /// 嚴格替換：模板裡的每個佔位符都要有綁定，每個綁定也都要被用到，
    /// 落單的 `$` 回報行列位置
    pub fn substitute(&self, bindings: &HashMap<String, String>) -> Result<Substituted> {
        self.render(bindings, true)
    }

    /// 寬鬆替換：沒有綁定的佔位符與無效的 `$` 原樣保留
    pub fn safe_substitute(&self, bindings: &HashMap<String, String>) -> Substituted {
        // 寬鬆模式不會產生錯誤
        self.render(bindings, false)
            .expect("permissive substitution is infallible")
    }

    fn render(&self, bindings: &HashMap<String, String>, strict: bool) -> Result<Substituted> {
        let re = Regex::new(PLACEHOLDER_PATTERN).unwrap();
        let mut text = String::with_capacity(self.raw.len());
        let mut replaced: Vec<String> = Vec::new();
        let mut untouched: Vec<String> = Vec::new();
        let mut last = 0;

        for caps in re.captures_iter(&self.raw) {
            let token = caps.get(0).unwrap();
            text.push_str(&self.raw[last..token.start()]);
            last = token.end();

            if caps.get(1).is_some() {
                // $$ 逸出
                text.push('$');
                continue;
            }

            match caps.get(2).or_else(|| caps.get(3)) {
                Some(name) => {
                    let name = name.as_str();
                    match bindings.get(name) {
                        // 替換值不再被掃描，不做巢狀替換
                        Some(value) => {
                            text.push_str(value);
                            if !replaced.iter().any(|n| n == name) {
                                replaced.push(name.to_string());
                            }
                        }
                        None if strict => {
                            return Err(RenderError::MissingBindingError {
                                name: name.to_string(),
                            });
                        }
                        None => {
                            text.push_str(token.as_str());
                            if !untouched.iter().any(|n| n == name) {
                                untouched.push(name.to_string());
                            }
                        }
                    }
                }
                None => {
                    // 落單的 $
                    if strict {
                        let (line, column) = line_col(&self.raw, token.start());
                        return Err(RenderError::InvalidPlaceholderError { line, column });
                    }
                    text.push_str(token.as_str());
                }
            }
        }

        text.push_str(&self.raw[last..]);

        if strict {
            let mut unused: Vec<&String> = bindings
                .keys()
                .filter(|name| !replaced.iter().any(|n| &n == name))
                .collect();
            unused.sort();

            if let Some(name) = unused.first() {
                return Err(RenderError::UnusedBindingError {
                    name: name.to_string(),
                });
            }
        }

        Ok(Substituted {
            text,
            replaced,
            untouched,
        })
    }
}

fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let prefix = &text[..offset];
    let line = prefix.matches('\n').count() + 1;
    let column = match prefix.rfind('\n') {
        Some(pos) => prefix[pos + 1..].chars().count() + 1,
        None => prefix.chars().count() + 1,
    };
    (line, column)
}
