//! Tool argument structs
//!
//! One struct per distinct parameter shape. Doc comments double as the
//! JSON-schema descriptions advertised to MCP clients.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_format_spec() -> String {
    "x".to_string()
}

fn default_instruction_count() -> u32 {
    10
}

fn default_watch_type() -> String {
    "write".to_string()
}

// ============================================================================
// SESSION LIFECYCLE
// ============================================================================

/// Arguments for starting a session
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct StartSessionArgs {
    /// Path to the GDB executable (defaults to the server's configured gdb)
    #[serde(default)]
    pub gdb_path: Option<String>,
}

/// Arguments carrying only a session identifier
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SessionArgs {
    /// The GDB session ID
    pub session_id: String,
}

// ============================================================================
// PROGRAM LOADING
// ============================================================================

/// Arguments for loading a program
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LoadProgramArgs {
    /// The GDB session ID
    pub session_id: String,
    /// Path to the executable to debug
    pub program_path: String,
}

/// Arguments for attaching to a process
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AttachArgs {
    /// The GDB session ID
    pub session_id: String,
    /// Process ID to attach to
    pub pid: u32,
}

/// Arguments for loading a core dump
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LoadCoreArgs {
    /// The GDB session ID
    pub session_id: String,
    /// Path to the core dump file
    pub core_file: String,
}

// ============================================================================
// BREAKPOINTS, EXPRESSIONS, MEMORY
// ============================================================================

/// Arguments for setting a breakpoint
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BreakpointArgs {
    /// The GDB session ID
    pub session_id: String,
    /// Breakpoint location (function, file:line, or *address)
    pub location: String,
}

/// Arguments carrying an expression
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExpressionArgs {
    /// The GDB session ID
    pub session_id: String,
    /// Expression to print or evaluate
    pub expression: String,
}

/// Arguments for examining memory
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExamineArgs {
    /// The GDB session ID
    pub session_id: String,
    /// Memory address or expression yielding one
    pub address: String,
    /// GDB x/ format specifier, e.g. "x", "4xw", "s"
    #[serde(default = "default_format_spec")]
    pub format_spec: String,
}

/// Arguments for an arbitrary command
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CommandArgs {
    /// The GDB session ID
    pub session_id: String,
    /// The GDB command to execute, sent verbatim
    pub command: String,
}

// ============================================================================
// DISASSEMBLY
// ============================================================================

/// Arguments for disassembling a function
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DisassembleFunctionArgs {
    /// The GDB session ID
    pub session_id: String,
    /// Name of the function to disassemble
    pub function_name: String,
    /// Mix source lines with assembly
    #[serde(default)]
    pub mixed_mode: bool,
}

/// Arguments for disassembling an address range
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DisassembleRangeArgs {
    /// The GDB session ID
    pub session_id: String,
    /// Starting address (e.g. "0x400000")
    pub start_addr: String,
    /// Ending address (e.g. "0x400100")
    pub end_addr: String,
    /// Mix source lines with assembly
    #[serde(default)]
    pub mixed_mode: bool,
}

/// Arguments for disassembling around the program counter
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DisassembleAroundPcArgs {
    /// The GDB session ID
    pub session_id: String,
    /// Number of instructions to disassemble
    #[serde(default = "default_instruction_count")]
    pub instruction_count: u32,
    /// Mix source lines with assembly
    #[serde(default)]
    pub mixed_mode: bool,
}

// ============================================================================
// STACK AND VARIABLES
// ============================================================================

/// Arguments for listing locals or arguments
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListValuesArgs {
    /// The GDB session ID
    pub session_id: String,
    /// Include values, not just names
    #[serde(default = "default_true")]
    pub print_values: bool,
}

/// Arguments for listing stack frames
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StackFramesArgs {
    /// The GDB session ID
    pub session_id: String,
    /// Starting frame number (used only together with high_frame)
    #[serde(default)]
    pub low_frame: Option<u32>,
    /// Ending frame number (used only together with low_frame)
    #[serde(default)]
    pub high_frame: Option<u32>,
}

// ============================================================================
// REGISTERS AND MEMORY
// ============================================================================

/// Arguments for reading register values
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RegisterValuesArgs {
    /// The GDB session ID
    pub session_id: String,
    /// Register numbers to read (all registers when omitted)
    #[serde(default)]
    pub register_numbers: Option<Vec<u32>>,
}

/// Arguments for reading raw memory
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReadMemoryArgs {
    /// The GDB session ID
    pub session_id: String,
    /// Memory address to read from
    pub address: String,
    /// Number of bytes to read
    pub byte_count: u64,
}

// ============================================================================
// THREADS, BREAKPOINT MANAGEMENT, SYMBOLS
// ============================================================================

/// Arguments for switching threads
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SwitchThreadArgs {
    /// The GDB session ID
    pub session_id: String,
    /// ID of the thread to switch to
    pub thread_id: String,
}

/// Arguments naming an existing breakpoint
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BreakpointNumberArgs {
    /// The GDB session ID
    pub session_id: String,
    /// Breakpoint number
    pub breakpoint_number: String,
}

/// Arguments for setting a watchpoint
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WatchpointArgs {
    /// The GDB session ID
    pub session_id: String,
    /// Variable or expression to watch
    pub expression: String,
    /// Watchpoint type: "write", "read" or "access"
    #[serde(default = "default_watch_type")]
    pub watch_type: String,
}

/// Arguments for symbol lookup
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SymbolArgs {
    /// The GDB session ID
    pub session_id: String,
    /// Name of the symbol to look up
    pub symbol_name: String,
}
