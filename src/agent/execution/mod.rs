mod executor;

pub use executor::PlanExecutor;
