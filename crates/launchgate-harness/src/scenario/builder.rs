//! Scenario builder API.

use launchgate_app::ShellEvent;
use launchgate_core::{MemoryStorage, Storage, StoreKeys, StoredValue};
use url::Url;

use crate::{MODEL_REFERENCE, SimWorld, scenario::OracleFn};

#[derive(Debug, Clone)]
enum Step {
    Event(ShellEvent),
    Navigate(String),
    FireTimer,
}

/// Scenario builder.
///
/// Must call `.oracle()` to get a [`RunnableScenario`] that can be executed.
pub struct Scenario {
    name: String,
    reference: Option<String>,
    steps: Vec<Step>,
}

impl Scenario {
    /// Create a new scenario with the given name.
    ///
    /// The store starts out holding [`MODEL_REFERENCE`].
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), reference: Some(MODEL_REFERENCE.to_string()), steps: Vec::new() }
    }

    /// Persist `reference` as the reference point before the shell opens.
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Open the shell over an empty store, so the built-in default applies.
    pub fn fresh_store(mut self) -> Self {
        self.reference = None;
        self
    }

    /// The screen appears.
    pub fn appear(mut self) -> Self {
        self.steps.push(Step::Event(ShellEvent::Appear));
        self
    }

    /// The screen is torn down.
    pub fn teardown(mut self) -> Self {
        self.steps.push(Step::Event(ShellEvent::Teardown));
        self
    }

    /// The pending display timer fires.
    pub fn fire_timer(mut self) -> Self {
        self.steps.push(Step::FireTimer);
        self
    }

    /// The surface reports ready.
    pub fn surface_ready(mut self) -> Self {
        self.steps.push(Step::Event(ShellEvent::SurfaceReady));
        self
    }

    /// The surface reports `point` as its current point.
    pub fn navigate(mut self, point: impl Into<String>) -> Self {
        self.steps.push(Step::Navigate(point.into()));
        self
    }

    /// The surface reports no current point.
    pub fn clear_point(mut self) -> Self {
        self.steps.push(Step::Event(ShellEvent::SurfaceNavigated(None)));
        self
    }

    /// Set the oracle function and return a runnable scenario.
    ///
    /// The oracle is mandatory - you cannot run a scenario without
    /// verification.
    pub fn oracle(self, oracle: OracleFn) -> RunnableScenario {
        RunnableScenario { scenario: self, oracle }
    }
}

/// A scenario with an oracle function that can be executed.
pub struct RunnableScenario {
    scenario: Scenario,
    oracle: OracleFn,
}

impl RunnableScenario {
    /// Execute every step in order, then run the oracle.
    pub fn run(self) -> Result<(), String> {
        let name = &self.scenario.name;
        let fail = |what: String| format!("Scenario '{name}': {what}");

        let mut storage = MemoryStorage::new();
        if let Some(reference) = &self.scenario.reference {
            storage
                .put(StoreKeys::REFERENCE, StoredValue::Text(reference.clone()))
                .map_err(|e| fail(format!("seeding store failed: {e}")))?;
        }
        let mut world =
            SimWorld::open(storage).map_err(|e| fail(format!("opening shell failed: {e}")))?;

        for (index, step) in self.scenario.steps.iter().enumerate() {
            let result = match step {
                Step::Event(event) => world.deliver(event.clone()),
                Step::FireTimer => world.fire_timer(),
                Step::Navigate(point) => {
                    let point = Url::parse(point)
                        .map_err(|e| fail(format!("step {index}: bad point {point:?}: {e}")))?;
                    world.deliver(ShellEvent::SurfaceNavigated(Some(point)))
                },
            };
            result.map_err(|e| fail(format!("step {index} ({step:?}) failed: {e}")))?;
        }

        (self.oracle)(&world).map_err(fail)
    }
}
