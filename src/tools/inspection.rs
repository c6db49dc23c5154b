//! Inspection capabilities: stack, expressions, registers, memory,
//! threads, symbols and disassembly

use crate::transport::ProcessLauncher;

use super::commands::GdbCommand;
use super::facade::GdbTools;

impl<L: ProcessLauncher> GdbTools<L> {
    // ========================================================================
    // STACK AND EXPRESSIONS
    // ========================================================================

    /// Show the call stack
    pub async fn get_backtrace(&self, session_id: &str) -> String {
        self.dispatch(session_id, GdbCommand::Backtrace).await
    }

    /// Print the value of an expression
    pub async fn print_expression(&self, session_id: &str, expression: &str) -> String {
        self.dispatch(session_id, GdbCommand::Print { expression }).await
    }

    /// Evaluate an expression with structured output
    pub async fn evaluate_expression(&self, session_id: &str, expression: &str) -> String {
        self.dispatch(session_id, GdbCommand::EvaluateExpression { expression })
            .await
    }

    /// Local variables of the selected frame
    pub async fn get_local_variables(&self, session_id: &str, print_values: bool) -> String {
        self.dispatch(session_id, GdbCommand::LocalVariables { print_values })
            .await
    }

    /// Arguments of every frame on the stack
    pub async fn get_function_arguments(&self, session_id: &str, print_values: bool) -> String {
        self.dispatch(session_id, GdbCommand::FunctionArguments { print_values })
            .await
    }

    /// Stack frames, limited to `low_frame..=high_frame` when both are given
    pub async fn get_stack_frames(
        &self,
        session_id: &str,
        low_frame: Option<u32>,
        high_frame: Option<u32>,
    ) -> String {
        self.dispatch(
            session_id,
            GdbCommand::StackFrames {
                low_frame,
                high_frame,
            },
        )
        .await
    }

    // ========================================================================
    // REGISTERS AND MEMORY
    // ========================================================================

    /// Processor registers, CLI form
    pub async fn get_registers(&self, session_id: &str) -> String {
        self.dispatch(session_id, GdbCommand::InfoRegisters).await
    }

    /// Names of all registers
    pub async fn get_register_names(&self, session_id: &str) -> String {
        self.dispatch(session_id, GdbCommand::RegisterNames).await
    }

    /// Register values in hex; all registers when no selection is given
    pub async fn get_register_values(
        &self,
        session_id: &str,
        register_numbers: Option<&[u32]>,
    ) -> String {
        self.dispatch(session_id, GdbCommand::RegisterValues { register_numbers })
            .await
    }

    /// Registers changed since the last stop
    pub async fn get_changed_registers(&self, session_id: &str) -> String {
        self.dispatch(session_id, GdbCommand::ChangedRegisters).await
    }

    /// Examine memory with an `x/<format_spec>` specifier
    pub async fn examine_memory(&self, session_id: &str, address: &str, format_spec: &str) -> String {
        self.dispatch(
            session_id,
            GdbCommand::Examine {
                address,
                format_spec,
            },
        )
        .await
    }

    /// Raw memory bytes starting at `address`
    pub async fn read_memory_bytes(&self, session_id: &str, address: &str, byte_count: u64) -> String {
        self.dispatch(
            session_id,
            GdbCommand::ReadMemoryBytes {
                address,
                byte_count,
            },
        )
        .await
    }

    // ========================================================================
    // THREADS, SYMBOLS, SOURCES
    // ========================================================================

    /// All threads of the inferior
    pub async fn get_thread_info(&self, session_id: &str) -> String {
        self.dispatch(session_id, GdbCommand::ThreadInfo).await
    }

    /// Select a thread
    pub async fn switch_thread(&self, session_id: &str, thread_id: &str) -> String {
        self.dispatch(session_id, GdbCommand::SwitchThread { thread_id })
            .await
    }

    /// Functions matching a symbol name
    pub async fn get_symbol_info(&self, session_id: &str, symbol_name: &str) -> String {
        self.dispatch(session_id, GdbCommand::SymbolInfo { symbol_name })
            .await
    }

    /// Source files of the loaded program
    pub async fn list_source_files(&self, session_id: &str) -> String {
        self.dispatch(session_id, GdbCommand::SourceFiles).await
    }

    // ========================================================================
    // DISASSEMBLY
    // ========================================================================

    /// Disassemble a function, optionally interleaved with source
    pub async fn disassemble_function(
        &self,
        session_id: &str,
        function_name: &str,
        mixed_mode: bool,
    ) -> String {
        self.dispatch(
            session_id,
            GdbCommand::DisassembleFunction {
                function_name,
                mixed_mode,
            },
        )
        .await
    }

    /// Disassemble `start_addr..end_addr`
    pub async fn disassemble_address_range(
        &self,
        session_id: &str,
        start_addr: &str,
        end_addr: &str,
        mixed_mode: bool,
    ) -> String {
        self.dispatch(
            session_id,
            GdbCommand::DisassembleRange {
                start_addr,
                end_addr,
                mixed_mode,
            },
        )
        .await
    }

    /// Disassemble forward from the program counter
    ///
    /// Assumes four bytes per instruction when sizing the range.
    pub async fn disassemble_around_pc(
        &self,
        session_id: &str,
        instruction_count: u32,
        mixed_mode: bool,
    ) -> String {
        self.dispatch(
            session_id,
            GdbCommand::DisassembleAroundPc {
                instruction_count,
                mixed_mode,
            },
        )
        .await
    }
}
