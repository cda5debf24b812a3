use crate::config::InferenceConfig;

/// Read-only state shared by every update handler.
#[derive(Clone)]
pub struct RelayState {
    inference: InferenceConfig,
}

impl RelayState {
    pub fn new(inference: InferenceConfig) -> Self {
        Self { inference }
    }

    pub fn inference(&self) -> &InferenceConfig {
        &self.inference
    }
}
