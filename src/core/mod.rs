pub mod engine;
pub mod pipeline;
pub mod template;

pub use crate::domain::model::{Binding, RenderResult, TemplateSet};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
