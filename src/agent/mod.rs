pub mod core;
pub mod events;
pub mod execution;
pub mod memory;
pub mod planning;
pub mod state;
pub mod types;

pub use self::core::BrowserAgent;
pub use events::{EventSink, MemorySink, NoopSink, RunEvent, TracingSink};
pub use execution::PlanExecutor;
pub use memory::{ActionHistory, IterationRecord};
pub use planning::{Plan, StagePlanner, Step};
pub use state::{CancelFlag, RunPhase};
pub use types::{OrchestratorOutcome, RunResult, StageOutcome, StepResult};
