use serde::Serialize;
use serde_json::{Map, Value};

/// Tool that only reads page state; a plan ending in one of these has not
/// finished the task yet.
pub const GET_INTERACTIVE_ELEMENTS: &str = "get_interactive_elements";
pub const WAIT: &str = "wait";

pub const INFORMATIONAL_TOOLS: [&str; 2] = [GET_INTERACTIVE_ELEMENTS, WAIT];

#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

impl ToolInfo {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

pub fn is_informational(tool: &str) -> bool {
    INFORMATIONAL_TOOLS.contains(&tool)
}

/// Browser tools offered to the model by default.
pub fn browser_tools() -> Vec<ToolInfo> {
    vec![
        ToolInfo::new("open_tab", "Open a new tab at a URL."),
        ToolInfo::new("go_to_url", "Navigate the current tab to a URL."),
        ToolInfo::new("go_back", "Go back in history."),
        ToolInfo::new("search_google", "Run a Google search."),
        ToolInfo::new("click_element_by_index", "Click an interactive element by index."),
        ToolInfo::new("input_text", "Type text into an element by index."),
        ToolInfo::new("send_keys", "Send keyboard keys."),
        ToolInfo::new("scroll_down", "Scroll the page down."),
        ToolInfo::new("scroll_up", "Scroll the page up."),
        ToolInfo::new("scroll_to_text", "Scroll until text is visible."),
        ToolInfo::new("switch_tab", "Switch to another tab."),
        ToolInfo::new("close_tab", "Close a tab."),
        ToolInfo::new("get_dropdown_options", "List options of a dropdown."),
        ToolInfo::new("select_dropdown_option", "Select a dropdown option."),
        ToolInfo::new("drag_drop", "Drag one element onto another."),
        ToolInfo::new("get_enhanced_page_structure", "Structured page outline."),
        ToolInfo::new("get_comprehensive_markdown", "Page content as markdown."),
        ToolInfo::new("save_pdf", "Save the page as PDF."),
        ToolInfo::new(WAIT, "Wait for the page to settle."),
        ToolInfo::new("done", "Mark the task as done."),
        ToolInfo::new("get_session_snapshot", "Snapshot of the browser session."),
        ToolInfo::new("take_screenshot", "Take a screenshot."),
        ToolInfo::new(GET_INTERACTIVE_ELEMENTS, "List interactive elements on the page."),
    ]
}

pub fn browser_tool_names() -> Vec<String> {
    browser_tools().into_iter().map(|tool| tool.name).collect()
}

/// Descriptions of the named catalogue tools, keyed by name. Names outside
/// the catalogue are skipped.
pub fn tool_descriptions(names: &[String]) -> Map<String, Value> {
    browser_tools()
        .into_iter()
        .filter(|tool| names.contains(&tool.name))
        .map(|tool| (tool.name, Value::String(tool.description)))
        .collect()
}
