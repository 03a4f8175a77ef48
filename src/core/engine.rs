use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct RenderEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> RenderEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<String> {
        tracing::info!("Loading template and parameters...");
        let inputs = self.pipeline.load()?;
        tracing::info!(
            "Loaded template ({} bytes) with {} binding(s)",
            inputs.template.len(),
            inputs.bindings.len()
        );

        tracing::info!("Substituting placeholders...");
        let rendered = self.pipeline.substitute(inputs)?;
        tracing::info!("Replaced {} placeholder(s)", rendered.replaced.len());

        tracing::info!("Emitting output...");
        let destination = self.pipeline.emit(rendered)?;
        tracing::info!("Output written to: {}", destination);

        Ok(destination)
    }
}
