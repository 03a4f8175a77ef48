use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Cannot read file '{path}': {source}")]
    FileReadError {
        path: String,
        source: std::io::Error,
    },

    #[error("File '{path}' is not valid UTF-8")]
    Utf8Error { path: String },

    #[error("No binding for placeholder '{name}'")]
    MissingBindingError { name: String },

    #[error("Binding '{name}' has no matching placeholder in the template")]
    UnusedBindingError { name: String },

    #[error("Invalid placeholder at line {line}, column {column}")]
    InvalidPlaceholderError { line: usize, column: usize },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Template,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RenderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RenderError::IoError(_)
            | RenderError::FileReadError { .. }
            | RenderError::Utf8Error { .. } => ErrorCategory::Io,
            RenderError::MissingBindingError { .. }
            | RenderError::UnusedBindingError { .. }
            | RenderError::InvalidPlaceholderError { .. } => ErrorCategory::Template,
            RenderError::ConfigValidationError { .. }
            | RenderError::InvalidConfigValueError { .. }
            | RenderError::MissingConfigError { .. } => ErrorCategory::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Template => ErrorSeverity::High,
            ErrorCategory::Config => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RenderError::IoError(e) => format!("File system operation failed: {}", e),
            RenderError::FileReadError { path, source } => {
                format!("Could not read '{}': {}", path, source)
            }
            RenderError::Utf8Error { path } => {
                format!("'{}' contains bytes that are not valid UTF-8 text", path)
            }
            RenderError::MissingBindingError { name } => {
                format!("The template references '${{{}}}' but no value was supplied", name)
            }
            RenderError::UnusedBindingError { name } => {
                format!("The value for '{}' was never used by the template", name)
            }
            RenderError::InvalidPlaceholderError { line, column } => format!(
                "Stray '$' at line {}, column {} (use '$$' for a literal dollar sign)",
                line, column
            ),
            RenderError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            RenderError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' is not a valid value for '{}': {}", value, field, reason)
            }
            RenderError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required but missing", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            RenderError::IoError(_) => {
                "Check file permissions and available disk space".to_string()
            }
            RenderError::FileReadError { path, .. } => {
                format!("Check that '{}' exists and is readable", path)
            }
            RenderError::Utf8Error { .. } => {
                "Re-save the file with UTF-8 encoding".to_string()
            }
            RenderError::MissingBindingError { name } => format!(
                "Add a binding for '{}' (e.g. --bind {}=...) or run with --permissive",
                name, name
            ),
            RenderError::UnusedBindingError { name } => format!(
                "Add '${{{}}}' to the template, drop the binding, or run with --permissive",
                name
            ),
            RenderError::InvalidPlaceholderError { .. } => {
                "Escape literal dollar signs as '$$' in the template".to_string()
            }
            RenderError::ConfigValidationError { .. }
            | RenderError::InvalidConfigValueError { .. }
            | RenderError::MissingConfigError { .. } => {
                "Fix the configuration value and run again".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
