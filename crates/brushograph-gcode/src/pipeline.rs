//! Line processor pipeline

use std::sync::Arc;

/// Trait for output line processors
///
/// Processors rewrite the text of a source line before it is emitted. They
/// never affect classification: the optimizer always classifies the original
/// source line.
pub trait LineProcessor: Send + Sync {
    /// Get the name/identifier of this processor
    fn name(&self) -> &str;

    /// Process a single line
    ///
    /// # Returns
    /// The lines to emit in place of `line`. Most processors return exactly one
    /// line; an empty vector drops the line.
    fn process(&self, line: &str) -> Result<Vec<String>, String>;
}

/// Arc-wrapped processor for thread-safe sharing
pub type ProcessorHandle = Arc<dyn LineProcessor>;

/// Ordered chain of line processors
///
/// ```ignore
/// let mut pipeline = ProcessorPipeline::new();
/// pipeline.register(Arc::new(ZMoveNormalizer::new()));
/// pipeline.register(Arc::new(RepositionRewriter::new()));
///
/// let lines = pipeline.process_line("G1 Z3.0000")?;
/// ```
#[derive(Default)]
pub struct ProcessorPipeline {
    processors: Vec<ProcessorHandle>,
}

impl ProcessorPipeline {
    /// Create a new empty processor pipeline
    pub fn new() -> Self {
        Self {
            processors: Vec::new(),
        }
    }

    /// Register a processor in the pipeline
    ///
    /// Processors are applied in the order they are registered.
    pub fn register(&mut self, processor: ProcessorHandle) -> &mut Self {
        self.processors.push(processor);
        self
    }

    /// Run one line through every processor in order
    pub fn process_line(&self, line: &str) -> Result<Vec<String>, String> {
        let mut current = vec![line.to_string()];

        for processor in &self.processors {
            let mut next = Vec::with_capacity(current.len());
            for text in current {
                match processor.process(&text) {
                    Ok(processed) => next.extend(processed),
                    Err(e) => {
                        tracing::warn!(
                            "Processor '{}' failed on line '{}': {}",
                            processor.name(),
                            text,
                            e
                        );
                        return Err(format!("Processor '{}' error: {}", processor.name(), e));
                    }
                }
            }

            current = next;
            if current.is_empty() {
                break;
            }
        }

        Ok(current)
    }

    /// Run one line through the pipeline, keeping the source line on failure
    pub fn process_line_or_keep(&self, line: &str) -> Vec<String> {
        self.process_line(line).unwrap_or_else(|e| {
            tracing::debug!("Keeping source line '{}' unchanged: {}", line, e);
            vec![line.to_string()]
        })
    }
}
