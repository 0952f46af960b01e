pub mod model;

pub use model::BrowserRequest;
