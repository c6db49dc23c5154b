//! Command table
//!
//! Every debugger command the façade can send, with its wire template,
//! the description used in failure messages, and its input checks. The
//! templates are parsed literally by GDB and must not drift.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::{GdbError, Result};

/// Watchpoint trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatchKind {
    /// Break when the value is written
    #[default]
    Write,
    /// Break when the value is read
    Read,
    /// Break on read or write
    Access,
}

impl WatchKind {
    /// Parse a watch type leniently; anything unrecognised means `Write`
    #[must_use]
    pub fn parse(watch_type: &str) -> Self {
        match watch_type {
            "read" => Self::Read,
            "access" => Self::Access,
            _ => Self::Write,
        }
    }

    fn flag(self) -> Option<&'static str> {
        match self {
            Self::Write => None,
            Self::Read => Some("-r"),
            Self::Access => Some("-a"),
        }
    }
}

/// One debugger command and its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GdbCommand<'a> {
    /// `file <path>`; the file must exist
    LoadProgram {
        /// Program to load
        path: &'a str,
    },
    /// `attach <pid>`
    Attach {
        /// Process to attach to
        pid: u32,
    },
    /// `core <path>`; the file must exist
    LoadCore {
        /// Core dump to load
        path: &'a str,
    },

    /// `continue`
    Continue,
    /// `step`
    Step,
    /// `next`
    Next,
    /// `finish`
    Finish,

    /// `break <location>`
    SetBreakpoint {
        /// Function, `file:line` or `*address`
        location: &'a str,
    },
    /// `backtrace`
    Backtrace,
    /// `print <expression>`
    Print {
        /// Expression to print
        expression: &'a str,
    },
    /// `x/<format_spec> <address>`
    Examine {
        /// Address expression
        address: &'a str,
        /// Count, format and unit letters, e.g. `8xb`
        format_spec: &'a str,
    },
    /// `info registers`
    InfoRegisters,

    /// Sent verbatim
    Raw {
        /// Command line as the caller wrote it
        command: &'a str,
    },

    /// `-data-disassemble -f <fn> -- <mode>`
    DisassembleFunction {
        /// Function to disassemble
        function_name: &'a str,
        /// Interleave source lines
        mixed_mode: bool,
    },
    /// `-data-disassemble -s <start> -e <end> -- <mode>`
    DisassembleRange {
        /// First address
        start_addr: &'a str,
        /// End address, exclusive
        end_addr: &'a str,
        /// Interleave source lines
        mixed_mode: bool,
    },
    /// Four bytes per instruction forward from `$pc`
    DisassembleAroundPc {
        /// Instructions to cover
        instruction_count: u32,
        /// Interleave source lines
        mixed_mode: bool,
    },

    /// `-stack-list-locals <0|1>`
    LocalVariables {
        /// Include values, not just names
        print_values: bool,
    },
    /// `-stack-list-arguments <0|1>`
    FunctionArguments {
        /// Include values, not just names
        print_values: bool,
    },
    /// `-stack-list-frames [<low> <high>]`
    StackFrames {
        /// Innermost frame; used only with `high_frame`
        low_frame: Option<u32>,
        /// Outermost frame; used only with `low_frame`
        high_frame: Option<u32>,
    },
    /// `-data-evaluate-expression "<expression>"`
    EvaluateExpression {
        /// Expression to evaluate
        expression: &'a str,
    },

    /// `-data-list-register-names`
    RegisterNames,
    /// `-data-list-register-values x [<n>...]`
    RegisterValues {
        /// Register numbers; `None` or empty lists all
        register_numbers: Option<&'a [u32]>,
    },
    /// `-data-list-changed-registers`
    ChangedRegisters,
    /// `-data-read-memory-bytes <address> <count>`
    ReadMemoryBytes {
        /// Start address
        address: &'a str,
        /// Bytes to read
        byte_count: u64,
    },

    /// `-thread-info`
    ThreadInfo,
    /// `-thread-select <id>`
    SwitchThread {
        /// GDB thread id
        thread_id: &'a str,
    },

    /// `-break-list`
    BreakpointList,
    /// `-break-delete <n>`
    DeleteBreakpoint {
        /// Breakpoint number
        number: &'a str,
    },
    /// `-break-enable <n>`
    EnableBreakpoint {
        /// Breakpoint number
        number: &'a str,
    },
    /// `-break-disable <n>`
    DisableBreakpoint {
        /// Breakpoint number
        number: &'a str,
    },
    /// `-break-watch [-r|-a] <expression>`
    Watchpoint {
        /// Expression to watch
        expression: &'a str,
        /// Which accesses trigger the watchpoint
        kind: WatchKind,
    },

    /// `-symbol-info-functions --name <name>`
    SymbolInfo {
        /// Function name pattern
        symbol_name: &'a str,
    },
    /// `-file-list-exec-source-files`
    SourceFiles,
}

/// Machine-interface boolean
fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

impl GdbCommand<'_> {
    /// The exact line sent to the debugger
    #[must_use]
    pub fn to_line(&self) -> String {
        match *self {
            Self::LoadProgram { path } => format!("file {path}"),
            Self::Attach { pid } => format!("attach {pid}"),
            Self::LoadCore { path } => format!("core {path}"),

            Self::Continue => "continue".to_string(),
            Self::Step => "step".to_string(),
            Self::Next => "next".to_string(),
            Self::Finish => "finish".to_string(),

            Self::SetBreakpoint { location } => format!("break {location}"),
            Self::Backtrace => "backtrace".to_string(),
            Self::Print { expression } => format!("print {expression}"),
            Self::Examine { address, format_spec } => format!("x/{format_spec} {address}"),
            Self::InfoRegisters => "info registers".to_string(),

            Self::Raw { command } => command.to_string(),

            Self::DisassembleFunction { function_name, mixed_mode } => {
                format!("-data-disassemble -f {function_name} -- {}", flag(mixed_mode))
            }
            Self::DisassembleRange { start_addr, end_addr, mixed_mode } => format!(
                "-data-disassemble -s {start_addr} -e {end_addr} -- {}",
                flag(mixed_mode)
            ),
            Self::DisassembleAroundPc { instruction_count, mixed_mode } => format!(
                "-data-disassemble -s $pc -e \"$pc + {}\" -- {}",
                u64::from(instruction_count) * 4,
                flag(mixed_mode)
            ),

            Self::LocalVariables { print_values } => {
                format!("-stack-list-locals {}", flag(print_values))
            }
            Self::FunctionArguments { print_values } => {
                format!("-stack-list-arguments {}", flag(print_values))
            }
            Self::StackFrames { low_frame: Some(low), high_frame: Some(high) } => {
                format!("-stack-list-frames {low} {high}")
            }
            Self::StackFrames { .. } => "-stack-list-frames".to_string(),
            Self::EvaluateExpression { expression } => {
                format!("-data-evaluate-expression \"{expression}\"")
            }

            Self::RegisterNames => "-data-list-register-names".to_string(),
            Self::RegisterValues { register_numbers } => {
                let mut line = "-data-list-register-values x".to_string();
                for number in register_numbers.unwrap_or_default() {
                    let _ = write!(line, " {number}");
                }
                line
            }
            Self::ChangedRegisters => "-data-list-changed-registers".to_string(),
            Self::ReadMemoryBytes { address, byte_count } => {
                format!("-data-read-memory-bytes {address} {byte_count}")
            }

            Self::ThreadInfo => "-thread-info".to_string(),
            Self::SwitchThread { thread_id } => format!("-thread-select {thread_id}"),

            Self::BreakpointList => "-break-list".to_string(),
            Self::DeleteBreakpoint { number } => format!("-break-delete {number}"),
            Self::EnableBreakpoint { number } => format!("-break-enable {number}"),
            Self::DisableBreakpoint { number } => format!("-break-disable {number}"),
            Self::Watchpoint { expression, kind } => match kind.flag() {
                Some(flag) => format!("-break-watch {flag} {expression}"),
                None => format!("-break-watch {expression}"),
            },

            Self::SymbolInfo { symbol_name } => {
                format!("-symbol-info-functions --name {symbol_name}")
            }
            Self::SourceFiles => "-file-list-exec-source-files".to_string(),
        }
    }

    /// What the command does, as used in `Error <action>: ...`
    #[must_use]
    pub fn action(&self) -> &'static str {
        match self {
            Self::LoadProgram { .. } => "loading program",
            Self::Attach { .. } => "attaching to process",
            Self::LoadCore { .. } => "loading core dump",
            Self::Continue => "continuing execution",
            Self::Step => "stepping execution",
            Self::Next => "stepping to next line",
            Self::Finish => "finishing function",
            Self::SetBreakpoint { .. } => "setting breakpoint",
            Self::Backtrace => "getting backtrace",
            Self::Print { .. } => "printing expression",
            Self::Examine { .. } => "examining memory",
            Self::InfoRegisters => "getting register info",
            Self::Raw { .. } => "executing command",
            Self::DisassembleFunction { .. } => "disassembling function",
            Self::DisassembleRange { .. } => "disassembling address range",
            Self::DisassembleAroundPc { .. } => "disassembling around PC",
            Self::LocalVariables { .. } => "getting local variables",
            Self::FunctionArguments { .. } => "getting function arguments",
            Self::StackFrames { .. } => "getting stack frames",
            Self::EvaluateExpression { .. } => "evaluating expression",
            Self::RegisterNames => "getting register names",
            Self::RegisterValues { .. } => "getting register values",
            Self::ChangedRegisters => "getting changed registers",
            Self::ReadMemoryBytes { .. } => "reading memory bytes",
            Self::ThreadInfo => "getting thread info",
            Self::SwitchThread { .. } => "switching thread",
            Self::BreakpointList => "getting breakpoint list",
            Self::DeleteBreakpoint { .. } => "deleting breakpoint",
            Self::EnableBreakpoint { .. } => "enabling breakpoint",
            Self::DisableBreakpoint { .. } => "disabling breakpoint",
            Self::Watchpoint { .. } => "setting watchpoint",
            Self::SymbolInfo { .. } => "getting symbol info",
            Self::SourceFiles => "listing source files",
        }
    }

    /// Validate inputs that must hold before anything is sent
    ///
    /// # Errors
    /// Returns `GdbError::Precondition` if a referenced file does not exist
    pub fn check_preconditions(&self) -> Result<()> {
        match *self {
            Self::LoadProgram { path } if !Path::new(path).exists() => Err(
                GdbError::precondition(format!("Program file '{path}' does not exist")),
            ),
            Self::LoadCore { path } if !Path::new(path).exists() => Err(
                GdbError::precondition(format!("Core file '{path}' does not exist")),
            ),
            _ => Ok(()),
        }
    }
}
