//! Static help text served as the `gdb://help` resource

/// Every tool, grouped by purpose, with a usage example each
pub const HELP_TEXT: &str = r#"# GDB MCP Server Help

This server provides the following GDB debugging tools. Every tool except
gdb_start and gdb_list_sessions takes the session_id returned by gdb_start.

## Session Management
- **gdb_start**: Start a new GDB debugging session
  Example: gdb_start() or gdb_start(gdb_path="/usr/bin/gdb-multiarch")
- **gdb_terminate**: Terminate a GDB session
  Example: gdb_terminate(session_id)
- **gdb_list_sessions**: List all active GDB sessions
  Example: gdb_list_sessions()

## Program Loading
- **gdb_load**: Load a program into GDB
  Example: gdb_load(session_id, program_path="/path/to/program")
- **gdb_attach**: Attach to a running process
  Example: gdb_attach(session_id, pid=4242)
- **gdb_load_core**: Load a core dump file
  Example: gdb_load_core(session_id, core_file="/tmp/core.4242")

## Execution Control
- **gdb_continue**: Continue program execution
  Example: gdb_continue(session_id)
- **gdb_step**: Step into functions
  Example: gdb_step(session_id)
- **gdb_next**: Step over function calls
  Example: gdb_next(session_id)
- **gdb_finish**: Execute until current function returns
  Example: gdb_finish(session_id)

## Debugging
- **gdb_set_breakpoint**: Set breakpoints
  Example: gdb_set_breakpoint(session_id, location="main.c:42")
- **gdb_backtrace**: Show call stack
  Example: gdb_backtrace(session_id)
- **gdb_print**: Print expression values
  Example: gdb_print(session_id, expression="argc")
- **gdb_examine**: Examine memory
  Example: gdb_examine(session_id, address="0x7fffffffe000", format_spec="8xb")
- **gdb_info_registers**: Display registers
  Example: gdb_info_registers(session_id)

## General
- **gdb_command**: Execute arbitrary GDB commands
  Example: gdb_command(session_id, command="run")

## Advanced Disassembly
- **gdb_disassemble_function**: Disassemble a function
  Example: gdb_disassemble_function(session_id, function_name="main", mixed_mode=true)
- **gdb_disassemble_address_range**: Disassemble a range of memory addresses
  Example: gdb_disassemble_address_range(session_id, start_addr="0x401000", end_addr="0x401040")
- **gdb_disassemble_around_pc**: Disassemble instructions around the current program counter
  Example: gdb_disassemble_around_pc(session_id, instruction_count=16)

## Variable and Stack Analysis
- **gdb_get_local_variables**: Get local variables in the current stack frame
  Example: gdb_get_local_variables(session_id, print_values=true)
- **gdb_get_function_arguments**: Get function arguments for all stack frames
  Example: gdb_get_function_arguments(session_id)
- **gdb_get_stack_frames**: Get detailed stack frame information
  Example: gdb_get_stack_frames(session_id, low_frame=0, high_frame=5)
- **gdb_evaluate_expression**: Evaluate an expression with structured output
  Example: gdb_evaluate_expression(session_id, expression="buf[0] + 1")

## Advanced Register Tools
- **gdb_get_register_names**: Get list of all register names
  Example: gdb_get_register_names(session_id)
- **gdb_get_register_values**: Get register values with structured output
  Example: gdb_get_register_values(session_id, register_numbers=[0, 1, 2])
- **gdb_get_changed_registers**: Get registers that have changed since last stop
  Example: gdb_get_changed_registers(session_id)

## Memory Analysis
- **gdb_read_memory_bytes**: Read raw memory bytes from a specific address
  Example: gdb_read_memory_bytes(session_id, address="&buf", byte_count=32)

## Thread Management
- **gdb_get_thread_info**: Get information about all threads
  Example: gdb_get_thread_info(session_id)
- **gdb_switch_thread**: Switch to a different thread
  Example: gdb_switch_thread(session_id, thread_id="2")

## Advanced Breakpoint Management
- **gdb_get_breakpoint_list**: Get list of all breakpoints with detailed information
  Example: gdb_get_breakpoint_list(session_id)
- **gdb_delete_breakpoint**: Delete a specific breakpoint
  Example: gdb_delete_breakpoint(session_id, breakpoint_number="1")
- **gdb_enable_breakpoint**: Enable a specific breakpoint
  Example: gdb_enable_breakpoint(session_id, breakpoint_number="1")
- **gdb_disable_breakpoint**: Disable a specific breakpoint
  Example: gdb_disable_breakpoint(session_id, breakpoint_number="1")
- **gdb_set_watchpoint**: Set a watchpoint on a variable or expression
  Example: gdb_set_watchpoint(session_id, expression="counter", watch_type="read")

## Symbol and Source Analysis
- **gdb_get_symbol_info**: Get information about a symbol
  Example: gdb_get_symbol_info(session_id, symbol_name="main")
- **gdb_list_source_files**: List all source files in the program
  Example: gdb_list_source_files(session_id)

## Usage Example
1. Start a session: `gdb_start()`
2. Load a program: `gdb_load(session_id, "/path/to/program")`
3. Set breakpoint: `gdb_set_breakpoint(session_id, "main")`
4. Run program: `gdb_command(session_id, "run")`
5. Continue debugging with other tools...
"#;

/// Names of every tool listed in [`HELP_TEXT`]
pub const TOOL_NAMES: &[&str] = &[
    "gdb_start",
    "gdb_terminate",
    "gdb_list_sessions",
    "gdb_load",
    "gdb_attach",
    "gdb_load_core",
    "gdb_continue",
    "gdb_step",
    "gdb_next",
    "gdb_finish",
    "gdb_set_breakpoint",
    "gdb_backtrace",
    "gdb_print",
    "gdb_examine",
    "gdb_info_registers",
    "gdb_command",
    "gdb_disassemble_function",
    "gdb_disassemble_address_range",
    "gdb_disassemble_around_pc",
    "gdb_get_local_variables",
    "gdb_get_function_arguments",
    "gdb_get_stack_frames",
    "gdb_evaluate_expression",
    "gdb_get_register_names",
    "gdb_get_register_values",
    "gdb_get_changed_registers",
    "gdb_read_memory_bytes",
    "gdb_get_thread_info",
    "gdb_switch_thread",
    "gdb_get_breakpoint_list",
    "gdb_delete_breakpoint",
    "gdb_enable_breakpoint",
    "gdb_disable_breakpoint",
    "gdb_set_watchpoint",
    "gdb_get_symbol_info",
    "gdb_list_source_files",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tool_is_documented_with_an_example() {
        for name in TOOL_NAMES {
            assert!(HELP_TEXT.contains(&format!("**{name}**")), "{name} missing");
            assert!(HELP_TEXT.contains(&format!("Example: {name}(")), "{name} lacks example");
        }
    }
}
