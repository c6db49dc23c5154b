//! Integration tests for the `GdbTools` command façade
//!
//! Every capability is driven through the in-memory launcher, which records
//! the exact command lines a real GDB would have received.

mod common;

use common::{MockLauncher, start, tools};

#[tokio::test]
async fn every_capability_reports_unknown_sessions() {
    let _ = env_logger::builder().is_test(true).try_init();

    let launcher = MockLauncher::default();
    let recorder = launcher.recorder.clone();
    let tools = tools(launcher);
    let id = "3f2a0c44-0000-4000-8000-000000000000";

    let outputs = vec![
        tools.load_program(id, "/bin/sh").await,
        tools.attach_to_process(id, 1).await,
        tools.load_core_dump(id, "/bin/sh").await,
        tools.continue_execution(id).await,
        tools.step_execution(id).await,
        tools.next_execution(id).await,
        tools.finish_function(id).await,
        tools.set_breakpoint(id, "main").await,
        tools.get_backtrace(id).await,
        tools.print_expression(id, "x").await,
        tools.examine_memory(id, "0x0", "x").await,
        tools.get_registers(id).await,
        tools.execute_command(id, "info frame").await,
        tools.disassemble_function(id, "main", false).await,
        tools.disassemble_address_range(id, "0x0", "0x10", false).await,
        tools.disassemble_around_pc(id, 10, false).await,
        tools.get_local_variables(id, true).await,
        tools.get_function_arguments(id, true).await,
        tools.get_stack_frames(id, None, None).await,
        tools.evaluate_expression(id, "1").await,
        tools.get_register_names(id).await,
        tools.get_register_values(id, None).await,
        tools.get_changed_registers(id).await,
        tools.read_memory_bytes(id, "0x0", 4).await,
        tools.get_thread_info(id).await,
        tools.switch_thread(id, "1").await,
        tools.get_breakpoint_list(id).await,
        tools.delete_breakpoint(id, "1").await,
        tools.enable_breakpoint(id, "1").await,
        tools.disable_breakpoint(id, "1").await,
        tools.set_watchpoint(id, "x", "write").await,
        tools.get_symbol_info(id, "main").await,
        tools.list_source_files(id).await,
        tools.terminate_session(id).await,
    ];

    for output in outputs {
        assert!(output.contains("not found"), "{output}");
    }
    assert_eq!(recorder.send_count(), 0);
}

#[tokio::test]
async fn unknown_session_error_names_the_action() {
    let tools = tools(MockLauncher::default());

    let output = tools.set_breakpoint("missing", "main").await;

    assert_eq!(
        output,
        "Error setting breakpoint: GDB session 'missing' not found. \
         Use gdb_list_sessions to see active sessions."
    );
}

#[tokio::test]
async fn missing_files_short_circuit_before_sending() {
    let launcher = MockLauncher::default();
    let recorder = launcher.recorder.clone();
    let tools = tools(launcher);
    let id = start(&tools).await;

    let program = tools.load_program(id.as_str(), "/nonexistent/program").await;
    let core = tools.load_core_dump(id.as_str(), "/nonexistent/core").await;

    assert_eq!(program, "Error: Program file '/nonexistent/program' does not exist");
    assert_eq!(core, "Error: Core file '/nonexistent/core' does not exist");
    assert_eq!(recorder.send_count(), 0);
}

#[tokio::test]
async fn existing_files_are_loaded() {
    let launcher = MockLauncher::default();
    let recorder = launcher.recorder.clone();
    let tools = tools(launcher);
    let id = start(&tools).await;

    let program = tempfile::NamedTempFile::new().unwrap();
    let path = program.path().to_str().unwrap();

    let output = tools.load_program(id.as_str(), path).await;

    assert_eq!(
        output,
        format!("Console: ran file {path}\nResult: Command completed successfully")
    );
    assert_eq!(recorder.sent_lines(), vec![format!("file {path}")]);
}

#[tokio::test]
async fn end_to_end_session_lifecycle() {
    let tools = tools(MockLauncher::default());

    let started = tools.start_session(None).await;
    assert!(started.starts_with("GDB session started successfully. Session ID: "));
    let id = tools.registry().list().remove(0);
    assert!(started.ends_with(id.as_str()));

    let load = tools.load_program(id.as_str(), "/nonexistent").await;
    assert!(load.contains("does not exist"));

    assert!(tools.list_sessions().contains(id.as_str()));

    assert_eq!(
        tools.terminate_session(id.as_str()).await,
        format!("GDB session '{id}' terminated successfully")
    );
    assert!(!tools.list_sessions().contains(id.as_str()));
    assert!(tools.registry().resolve(id.as_str()).is_err());

    assert_eq!(
        tools.terminate_session(id.as_str()).await,
        format!("GDB session '{id}' not found")
    );
}

#[tokio::test]
async fn session_listings() {
    let tools = tools(MockLauncher::default());
    assert_eq!(tools.list_sessions(), "No active GDB sessions");
    assert_eq!(tools.sessions_resource(), "No active GDB sessions");

    let id = start(&tools).await;

    assert_eq!(tools.list_sessions(), format!("Active GDB sessions:\n- {id}"));
    assert_eq!(
        tools.sessions_resource(),
        format!("Active GDB Sessions:\nSession ID: {id}")
    );
}

#[tokio::test]
async fn start_failure_is_rendered() {
    let tools = tools(MockLauncher {
        fail_spawn: true,
        ..MockLauncher::default()
    });

    let output = tools.start_session(Some("no-such-gdb")).await;

    assert_eq!(
        output,
        "Error starting GDB session: Failed to start GDB: \
         GDB executable 'no-such-gdb' not found in PATH"
    );
    assert!(tools.registry().is_empty());
}

#[tokio::test]
async fn capabilities_send_their_templates() {
    let launcher = MockLauncher::default();
    let recorder = launcher.recorder.clone();
    let tools = tools(launcher);
    let id = start(&tools).await;
    let id = id.as_str();

    tools.attach_to_process(id, 4242).await;
    tools.continue_execution(id).await;
    tools.step_execution(id).await;
    tools.next_execution(id).await;
    tools.finish_function(id).await;
    tools.set_breakpoint(id, "main.c:42").await;
    tools.get_backtrace(id).await;
    tools.print_expression(id, "argc").await;
    tools.examine_memory(id, "&buf", "8xb").await;
    tools.get_registers(id).await;
    tools.disassemble_function(id, "main", true).await;
    tools.disassemble_address_range(id, "0x401000", "0x401040", false).await;
    tools.disassemble_around_pc(id, 5, true).await;
    tools.get_local_variables(id, false).await;
    tools.get_function_arguments(id, true).await;
    tools.get_stack_frames(id, Some(1), Some(3)).await;
    tools.get_stack_frames(id, None, Some(3)).await;
    tools.evaluate_expression(id, "buf[0]").await;
    tools.get_register_names(id).await;
    tools.get_register_values(id, Some(&[0, 7])).await;
    tools.get_register_values(id, None).await;
    tools.get_changed_registers(id).await;
    tools.read_memory_bytes(id, "0x7ffe0000", 64).await;
    tools.get_thread_info(id).await;
    tools.switch_thread(id, "2").await;
    tools.get_breakpoint_list(id).await;
    tools.delete_breakpoint(id, "1").await;
    tools.enable_breakpoint(id, "2").await;
    tools.disable_breakpoint(id, "3").await;
    tools.set_watchpoint(id, "counter", "write").await;
    tools.set_watchpoint(id, "counter", "read").await;
    tools.set_watchpoint(id, "counter", "access").await;
    tools.set_watchpoint(id, "counter", "sometimes").await;
    tools.get_symbol_info(id, "main").await;
    tools.list_source_files(id).await;

    let expected = [
        "attach 4242",
        "continue",
        "step",
        "next",
        "finish",
        "break main.c:42",
        "backtrace",
        "print argc",
        "x/8xb &buf",
        "info registers",
        "-data-disassemble -f main -- 1",
        "-data-disassemble -s 0x401000 -e 0x401040 -- 0",
        "-data-disassemble -s $pc -e \"$pc + 20\" -- 1",
        "-stack-list-locals 0",
        "-stack-list-arguments 1",
        "-stack-list-frames 1 3",
        "-stack-list-frames",
        "-data-evaluate-expression \"buf[0]\"",
        "-data-list-register-names",
        "-data-list-register-values x 0 7",
        "-data-list-register-values x",
        "-data-list-changed-registers",
        "-data-read-memory-bytes 0x7ffe0000 64",
        "-thread-info",
        "-thread-select 2",
        "-break-list",
        "-break-delete 1",
        "-break-enable 2",
        "-break-disable 3",
        "-break-watch counter",
        "-break-watch -r counter",
        "-break-watch -a counter",
        "-break-watch counter",
        "-symbol-info-functions --name main",
        "-file-list-exec-source-files",
    ];
    assert_eq!(recorder.sent_lines(), expected);
}

#[tokio::test]
async fn passthrough_is_verbatim() {
    let launcher = MockLauncher::default();
    let recorder = launcher.recorder.clone();
    let tools = tools(launcher);
    let id = start(&tools).await;

    tools.execute_command(id.as_str(), "info  line  *0x401000").await;

    assert_eq!(recorder.sent_lines(), vec!["info  line  *0x401000"]);
}

#[tokio::test]
async fn transport_failures_are_rendered_with_the_action() {
    let tools = tools(MockLauncher::default());
    let id = start(&tools).await;

    let output = tools.execute_command(id.as_str(), "fail").await;

    assert_eq!(output, "Error executing command: Transport error: broken pipe");
    assert!(tools.registry().exists(id.as_str()));
}

#[tokio::test]
async fn replies_are_rendered() {
    let tools = tools(MockLauncher::default());
    let id = start(&tools).await;

    assert_eq!(
        tools.execute_command(id.as_str(), "error").await,
        "Result (error): No symbol \"nope\" in current context."
    );
    assert_eq!(
        tools.execute_command(id.as_str(), "silent").await,
        "No response from GDB"
    );
}

#[tokio::test]
async fn crashed_sessions_are_removed() {
    let launcher = MockLauncher::default();
    let recorder = launcher.recorder.clone();
    let tools = tools(launcher);
    let id = start(&tools).await;
    let other = start(&tools).await;

    let output = tools.execute_command(id.as_str(), "crash").await;

    assert_eq!(output, "Error executing command: Transport error: GDB process exited");
    assert!(!tools.registry().exists(id.as_str()));
    assert_eq!(tools.registry().list(), vec![other.clone()]);
    assert!(!tools.sessions_resource().contains(id.as_str()));

    let next = tools.get_backtrace(id.as_str()).await;
    assert!(next.contains("not found"), "{next}");
    assert_eq!(recorder.send_count(), 1);
    assert!(tools.get_backtrace(other.as_str()).await.contains("ran backtrace"));
}
