use crate::mcp::McpServer;
use crate::tools::ToolRegistry;

#[derive(Clone)]
pub struct AppState {
    pub tools: ToolRegistry,
    pub mcp: McpServer,
}

impl AppState {
    pub fn new(tools: ToolRegistry) -> Self {
        Self {
            mcp: McpServer::new(tools.clone()),
            tools,
        }
    }
}
