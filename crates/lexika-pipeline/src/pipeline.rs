use crate::middleware::{Middleware, PipelineData, StageError};

/// Ordered chain of stages; registration order is execution order.
///
/// Per-record failures are each stage's business and never surface here. A
/// stage-level error is logged and handed back to the caller, aborting the
/// rest of the chain for this invocation.
#[derive(Default)]
pub struct MiddlewarePipeline {
    stages: Vec<Box<dyn Middleware>>,
}

impl MiddlewarePipeline {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage, fluent style.
    pub fn add_stage(mut self, stage: impl Middleware + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub async fn process(&self, data: PipelineData) -> Result<PipelineData, StageError> {
        let mut current = data;

        for stage in &self.stages {
            tracing::debug!("processing through stage '{}'", stage.name());
            current = match stage.process(current).await {
                Ok(output) => {
                    tracing::info!("stage '{}' produced {} items", stage.name(), output.len());
                    output
                }
                Err(e) => {
                    tracing::error!("stage '{}' failed: {e}", stage.name());
                    return Err(e);
                }
            };
        }

        Ok(current)
    }
}
