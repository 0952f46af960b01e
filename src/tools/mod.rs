pub mod invoker;
pub mod model;
pub mod output;
pub mod serializer;

pub use invoker::{CallToolResult, HttpToolInvoker, ToolInvoker};
pub use model::ToolInfo;
pub use output::{ForeignObject, ToolOutput};
pub use serializer::serialize;
