use runtime::{ScenarioEngine, ScenarioSources};

#[derive(Clone)]
pub struct AppState {
    engine: ScenarioEngine,
}

impl AppState {
    pub fn new(sources: ScenarioSources) -> Self {
        Self {
            engine: ScenarioEngine::new(sources),
        }
    }

    pub fn engine(&self) -> &ScenarioEngine {
        &self.engine
    }
}
