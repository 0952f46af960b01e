pub mod agent;

pub use agent::BrowserAgent;
