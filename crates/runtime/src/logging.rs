#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunLogEventKind {
    InputsGathered,
    EconomicsComputed,
    StrategiesSimulated,
    StrategiesRanked,
    ScenarioFailed,
    CurvesExported,
}

impl RunLogEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InputsGathered => "inputs_gathered",
            Self::EconomicsComputed => "economics_computed",
            Self::StrategiesSimulated => "strategies_simulated",
            Self::StrategiesRanked => "strategies_ranked",
            Self::ScenarioFailed => "scenario_failed",
            Self::CurvesExported => "curves_exported",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunLogEvent {
    pub kind: RunLogEventKind,
    pub detail: String,
}

impl RunLogEvent {
    pub fn new(kind: RunLogEventKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

pub trait RunLogWriter: Send {
    fn write(&mut self, event: RunLogEvent);
}

#[derive(Debug, Default)]
pub struct InMemoryRunLogWriter {
    events: Vec<RunLogEvent>,
}

impl InMemoryRunLogWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RunLogEvent] {
        &self.events
    }

    pub fn kinds(&self) -> Vec<RunLogEventKind> {
        self.events.iter().map(|event| event.kind).collect()
    }
}

impl RunLogWriter for InMemoryRunLogWriter {
    fn write(&mut self, event: RunLogEvent) {
        self.events.push(event);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRunLogWriter;

impl RunLogWriter for TracingRunLogWriter {
    fn write(&mut self, event: RunLogEvent) {
        match event.kind {
            RunLogEventKind::ScenarioFailed => {
                tracing::warn!(stage = event.kind.as_str(), detail = %event.detail, "scenario failed");
            }
            _ => {
                tracing::debug!(stage = event.kind.as_str(), detail = %event.detail, "scenario stage");
            }
        }
    }
}
