pub mod builder;
pub mod template;

pub use builder::{build_action_prompt, build_stage_prompt};
pub use template::PromptTemplate;
