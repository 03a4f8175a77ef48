use crate::utils::error::{RenderError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(RenderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(RenderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RenderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 佔位符名稱必須是合法識別字
pub fn validate_placeholder_name(field_name: &str, name: &str) -> Result<()> {
    let mut chars = name.chars();
    let head_ok = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);
    let tail_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !head_ok || !tail_ok {
        return Err(RenderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Placeholder names must match [A-Za-z_][A-Za-z0-9_]*".to_string(),
        });
    }
    Ok(())
}

/// 解析 name=value 形式的綁定參數
pub fn validate_binding_pair(field_name: &str, pair: &str) -> Result<(String, String)> {
    match pair.split_once('=') {
        Some((name, value)) => {
            validate_placeholder_name(field_name, name)?;
            Ok((name.to_string(), value.to_string()))
        }
        None => Err(RenderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: pair.to_string(),
            reason: "Expected name=value".to_string(),
        }),
    }
}
