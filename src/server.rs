//! MCP server exposing the GDB tools over stdio
//!
//! A thin adapter: every tool forwards its arguments to [`GdbTools`] and
//! returns the rendered text as a single text content.

use std::sync::Arc;

use rmcp::{
    RoleServer, ServiceExt,
    handler::server::{ServerHandler, tool::ToolRouter, wrapper::Parameters},
    model::*,
    service::RequestContext,
    tool, tool_handler, tool_router, transport, ErrorData as McpError,
};

use crate::registry::SessionRegistry;
use crate::tools::{GdbTools, HELP_TEXT};
use crate::types::args::{
    AttachArgs, BreakpointArgs, BreakpointNumberArgs, CommandArgs, DisassembleAroundPcArgs,
    DisassembleFunctionArgs, DisassembleRangeArgs, ExamineArgs, ExpressionArgs, ListValuesArgs,
    LoadCoreArgs, LoadProgramArgs, ReadMemoryArgs, RegisterValuesArgs, SessionArgs,
    StackFramesArgs, StartSessionArgs, SwitchThreadArgs, SymbolArgs, WatchpointArgs,
};

/// URI of the active-session listing resource
pub const SESSIONS_URI: &str = "gdb://sessions";

/// URI of the help resource
pub const HELP_URI: &str = "gdb://help";

fn text(text: String) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// MCP handler for GDB debugging sessions
#[derive(Clone)]
pub struct GdbServer {
    tools: GdbTools,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl GdbServer {
    /// Create a server over `registry`
    #[must_use]
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self {
            tools: GdbTools::new(registry),
            tool_router: Self::tool_router(),
        }
    }

    /// The façade every tool forwards to
    #[must_use]
    pub fn tools(&self) -> &GdbTools {
        &self.tools
    }

    // ========================================================================
    // SESSION MANAGEMENT
    // ========================================================================

    #[tool(description = "Start a new GDB debugging session")]
    async fn gdb_start(
        &self,
        params: Parameters<StartSessionArgs>,
    ) -> Result<CallToolResult, McpError> {
        text(self.tools.start_session(params.0.gdb_path.as_deref()).await)
    }

    #[tool(description = "Terminate a GDB debugging session")]
    async fn gdb_terminate(&self, params: Parameters<SessionArgs>) -> Result<CallToolResult, McpError> {
        text(self.tools.terminate_session(&params.0.session_id).await)
    }

    #[tool(description = "List all active GDB sessions")]
    async fn gdb_list_sessions(&self) -> Result<CallToolResult, McpError> {
        text(self.tools.list_sessions())
    }

    // ========================================================================
    // PROGRAM LOADING
    // ========================================================================

    #[tool(description = "Load a program into an existing GDB session")]
    async fn gdb_load(&self, params: Parameters<LoadProgramArgs>) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text(self.tools.load_program(&args.session_id, &args.program_path).await)
    }

    #[tool(description = "Attach GDB to a running process")]
    async fn gdb_attach(&self, params: Parameters<AttachArgs>) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text(self.tools.attach_to_process(&args.session_id, args.pid).await)
    }

    #[tool(description = "Load a core dump file for analysis")]
    async fn gdb_load_core(&self, params: Parameters<LoadCoreArgs>) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text(self.tools.load_core_dump(&args.session_id, &args.core_file).await)
    }

    // ========================================================================
    // EXECUTION CONTROL
    // ========================================================================

    #[tool(description = "Continue program execution")]
    async fn gdb_continue(&self, params: Parameters<SessionArgs>) -> Result<CallToolResult, McpError> {
        text(self.tools.continue_execution(&params.0.session_id).await)
    }

    #[tool(description = "Step program execution (step into functions)")]
    async fn gdb_step(&self, params: Parameters<SessionArgs>) -> Result<CallToolResult, McpError> {
        text(self.tools.step_execution(&params.0.session_id).await)
    }

    #[tool(description = "Step over function calls (next line)")]
    async fn gdb_next(&self, params: Parameters<SessionArgs>) -> Result<CallToolResult, McpError> {
        text(self.tools.next_execution(&params.0.session_id).await)
    }

    #[tool(description = "Execute until the current function returns")]
    async fn gdb_finish(&self, params: Parameters<SessionArgs>) -> Result<CallToolResult, McpError> {
        text(self.tools.finish_function(&params.0.session_id).await)
    }

    // ========================================================================
    // DEBUGGING
    // ========================================================================

    #[tool(description = "Set a breakpoint at the specified location")]
    async fn gdb_set_breakpoint(
        &self,
        params: Parameters<BreakpointArgs>,
    ) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text(self.tools.set_breakpoint(&args.session_id, &args.location).await)
    }

    #[tool(description = "Show the call stack (backtrace)")]
    async fn gdb_backtrace(&self, params: Parameters<SessionArgs>) -> Result<CallToolResult, McpError> {
        text(self.tools.get_backtrace(&params.0.session_id).await)
    }

    #[tool(description = "Print the value of an expression")]
    async fn gdb_print(&self, params: Parameters<ExpressionArgs>) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text(self.tools.print_expression(&args.session_id, &args.expression).await)
    }

    #[tool(description = "Examine memory at the specified address")]
    async fn gdb_examine(&self, params: Parameters<ExamineArgs>) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text(
            self.tools
                .examine_memory(&args.session_id, &args.address, &args.format_spec)
                .await,
        )
    }

    #[tool(description = "Display processor registers")]
    async fn gdb_info_registers(
        &self,
        params: Parameters<SessionArgs>,
    ) -> Result<CallToolResult, McpError> {
        text(self.tools.get_registers(&params.0.session_id).await)
    }

    #[tool(description = "Execute an arbitrary GDB command")]
    async fn gdb_command(&self, params: Parameters<CommandArgs>) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text(self.tools.execute_command(&args.session_id, &args.command).await)
    }

    // ========================================================================
    // DISASSEMBLY
    // ========================================================================

    #[tool(description = "Disassemble a function with optional source code mixing")]
    async fn gdb_disassemble_function(
        &self,
        params: Parameters<DisassembleFunctionArgs>,
    ) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text(
            self.tools
                .disassemble_function(&args.session_id, &args.function_name, args.mixed_mode)
                .await,
        )
    }

    #[tool(description = "Disassemble a range of memory addresses")]
    async fn gdb_disassemble_address_range(
        &self,
        params: Parameters<DisassembleRangeArgs>,
    ) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text(
            self.tools
                .disassemble_address_range(
                    &args.session_id,
                    &args.start_addr,
                    &args.end_addr,
                    args.mixed_mode,
                )
                .await,
        )
    }

    #[tool(description = "Disassemble instructions around the current program counter")]
    async fn gdb_disassemble_around_pc(
        &self,
        params: Parameters<DisassembleAroundPcArgs>,
    ) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text(
            self.tools
                .disassemble_around_pc(&args.session_id, args.instruction_count, args.mixed_mode)
                .await,
        )
    }

    // ========================================================================
    // VARIABLES AND STACK
    // ========================================================================

    #[tool(description = "Get local variables in the current stack frame")]
    async fn gdb_get_local_variables(
        &self,
        params: Parameters<ListValuesArgs>,
    ) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text(
            self.tools
                .get_local_variables(&args.session_id, args.print_values)
                .await,
        )
    }

    #[tool(description = "Get function arguments for all stack frames")]
    async fn gdb_get_function_arguments(
        &self,
        params: Parameters<ListValuesArgs>,
    ) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text(
            self.tools
                .get_function_arguments(&args.session_id, args.print_values)
                .await,
        )
    }

    #[tool(description = "Get detailed stack frame information")]
    async fn gdb_get_stack_frames(
        &self,
        params: Parameters<StackFramesArgs>,
    ) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text(
            self.tools
                .get_stack_frames(&args.session_id, args.low_frame, args.high_frame)
                .await,
        )
    }

    #[tool(description = "Evaluate an expression with structured output")]
    async fn gdb_evaluate_expression(
        &self,
        params: Parameters<ExpressionArgs>,
    ) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text(
            self.tools
                .evaluate_expression(&args.session_id, &args.expression)
                .await,
        )
    }

    // ========================================================================
    // REGISTERS AND MEMORY
    // ========================================================================

    #[tool(description = "Get list of all register names")]
    async fn gdb_get_register_names(
        &self,
        params: Parameters<SessionArgs>,
    ) -> Result<CallToolResult, McpError> {
        text(self.tools.get_register_names(&params.0.session_id).await)
    }

    #[tool(description = "Get register values with structured output")]
    async fn gdb_get_register_values(
        &self,
        params: Parameters<RegisterValuesArgs>,
    ) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text(
            self.tools
                .get_register_values(&args.session_id, args.register_numbers.as_deref())
                .await,
        )
    }

    #[tool(description = "Get registers that have changed since last stop")]
    async fn gdb_get_changed_registers(
        &self,
        params: Parameters<SessionArgs>,
    ) -> Result<CallToolResult, McpError> {
        text(self.tools.get_changed_registers(&params.0.session_id).await)
    }

    #[tool(description = "Read raw memory bytes from a specific address")]
    async fn gdb_read_memory_bytes(
        &self,
        params: Parameters<ReadMemoryArgs>,
    ) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text(
            self.tools
                .read_memory_bytes(&args.session_id, &args.address, args.byte_count)
                .await,
        )
    }

    // ========================================================================
    // THREADS
    // ========================================================================

    #[tool(description = "Get information about all threads")]
    async fn gdb_get_thread_info(
        &self,
        params: Parameters<SessionArgs>,
    ) -> Result<CallToolResult, McpError> {
        text(self.tools.get_thread_info(&params.0.session_id).await)
    }

    #[tool(description = "Switch to a different thread")]
    async fn gdb_switch_thread(
        &self,
        params: Parameters<SwitchThreadArgs>,
    ) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text(self.tools.switch_thread(&args.session_id, &args.thread_id).await)
    }

    // ========================================================================
    // BREAKPOINT MANAGEMENT
    // ========================================================================

    #[tool(description = "Get list of all breakpoints with detailed information")]
    async fn gdb_get_breakpoint_list(
        &self,
        params: Parameters<SessionArgs>,
    ) -> Result<CallToolResult, McpError> {
        text(self.tools.get_breakpoint_list(&params.0.session_id).await)
    }

    #[tool(description = "Delete a specific breakpoint")]
    async fn gdb_delete_breakpoint(
        &self,
        params: Parameters<BreakpointNumberArgs>,
    ) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text(
            self.tools
                .delete_breakpoint(&args.session_id, &args.breakpoint_number)
                .await,
        )
    }

    #[tool(description = "Enable a specific breakpoint")]
    async fn gdb_enable_breakpoint(
        &self,
        params: Parameters<BreakpointNumberArgs>,
    ) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text(
            self.tools
                .enable_breakpoint(&args.session_id, &args.breakpoint_number)
                .await,
        )
    }

    #[tool(description = "Disable a specific breakpoint")]
    async fn gdb_disable_breakpoint(
        &self,
        params: Parameters<BreakpointNumberArgs>,
    ) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text(
            self.tools
                .disable_breakpoint(&args.session_id, &args.breakpoint_number)
                .await,
        )
    }

    #[tool(description = "Set a watchpoint on a variable or expression (watch_type: write, read, access)")]
    async fn gdb_set_watchpoint(
        &self,
        params: Parameters<WatchpointArgs>,
    ) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text(
            self.tools
                .set_watchpoint(&args.session_id, &args.expression, &args.watch_type)
                .await,
        )
    }

    // ========================================================================
    // SYMBOLS AND SOURCES
    // ========================================================================

    #[tool(description = "Get information about a symbol")]
    async fn gdb_get_symbol_info(
        &self,
        params: Parameters<SymbolArgs>,
    ) -> Result<CallToolResult, McpError> {
        let args = params.0;
        text(self.tools.get_symbol_info(&args.session_id, &args.symbol_name).await)
    }

    #[tool(description = "List all source files in the program")]
    async fn gdb_list_source_files(
        &self,
        params: Parameters<SessionArgs>,
    ) -> Result<CallToolResult, McpError> {
        text(self.tools.list_source_files(&params.0.session_id).await)
    }
}

#[tool_handler]
impl ServerHandler for GdbServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "GDB debugging server. Start with gdb_start, pass the returned session ID to \
                 every other tool, and read gdb://help for the full tool list."
                    .into(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult::with_all_items(vec![
            RawResource::new(SESSIONS_URI, "Active GDB sessions").no_annotation(),
            RawResource::new(HELP_URI, "GDB tool help").no_annotation(),
        ]))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let body = match request.uri.as_str() {
            SESSIONS_URI => self.tools.sessions_resource(),
            HELP_URI => HELP_TEXT.to_string(),
            other => {
                return Err(McpError::resource_not_found(
                    format!("Unknown resource: {other}"),
                    None,
                ));
            }
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(body, request.uri)],
        })
    }
}

/// Serve MCP over stdin/stdout until the client disconnects
///
/// # Errors
/// Returns error if the MCP handshake or transport fails
pub async fn serve_stdio(registry: Arc<SessionRegistry>) -> anyhow::Result<()> {
    let server = GdbServer::new(registry);
    server.serve(transport::stdio()).await?.waiting().await?;
    Ok(())
}
