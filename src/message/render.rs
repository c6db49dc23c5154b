//! Text rendering of debugger replies
//!
//! Pure and total: any sequence of [`ReplyMessage`]s renders to a string,
//! whatever shape its payloads take.

use serde_json::Value;

use crate::types::messages::{ReplyKind, ReplyMessage};

/// Returned for a command that produced no records at all
pub const NO_RESPONSE: &str = "No response from GDB";

/// Returned when records were received but none produced a line
pub const COMMAND_EXECUTED: &str = "Command executed";

/// Substituted for an empty payload on a `done` result
pub const COMMAND_COMPLETED: &str = "Command completed successfully";

/// Render a reply sequence, one line per record, in order
#[must_use]
pub fn render_replies(replies: &[ReplyMessage]) -> String {
    if replies.is_empty() {
        return NO_RESPONSE.to_string();
    }

    let lines: Vec<String> = replies.iter().map(render_reply).collect();

    if lines.is_empty() {
        COMMAND_EXECUTED.to_string()
    } else {
        lines.join("\n")
    }
}

/// Render one record
#[must_use]
pub fn render_reply(reply: &ReplyMessage) -> String {
    let payload = payload_text(reply.payload.as_ref());

    match &reply.kind {
        ReplyKind::Console => format!("Console: {payload}"),
        ReplyKind::Log => format!("Log: {payload}"),
        ReplyKind::Target => format!("Target: {payload}"),
        ReplyKind::Result => {
            let status = reply.message.as_deref().unwrap_or_default();
            if status == "done" {
                if is_empty_payload(reply.payload.as_ref()) {
                    format!("Result: {COMMAND_COMPLETED}")
                } else {
                    format!("Result: {payload}")
                }
            } else {
                format!("Result ({status}): {payload}")
            }
        }
        other => format!("{}: {payload}", capitalize(other.as_str())),
    }
}

/// Strings verbatim, structured values as compact JSON, absent as empty
fn payload_text(payload: Option<&Value>) -> String {
    match payload {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn is_empty_payload(payload: Option<&Value>) -> bool {
    match payload {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(a)) => a.is_empty(),
        Some(Value::Object(o)) => o.is_empty(),
        Some(Value::Number(_) | Value::Bool(true)) => false,
    }
}

/// Title-case a kind name: `thread-group` becomes `Thread-Group`
fn capitalize(kind: &str) -> String {
    let mut out = String::with_capacity(kind.len());
    let mut at_word_start = true;
    for c in kind.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        at_word_start = !c.is_alphabetic();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_sequence() {
        assert_eq!(render_replies(&[]), "No response from GDB");
    }

    #[test]
    fn console_line() {
        let out = render_replies(&[ReplyMessage::console("Hello")]);
        assert!(out.lines().any(|l| l == "Console: Hello"));
    }

    #[test]
    fn done_without_payload() {
        let out = render_replies(&[ReplyMessage::result("done", None)]);
        assert_eq!(out, "Result: Command completed successfully");

        let out = render_replies(&[ReplyMessage::result("done", Some(json!({})))]);
        assert_eq!(out, "Result: Command completed successfully");
    }

    #[test]
    fn done_with_structured_payload() {
        let out = render_replies(&[ReplyMessage::result("done", Some(json!({"value": "120"})))]);
        assert_eq!(out, r#"Result: {"value":"120"}"#);
    }

    #[test]
    fn non_done_status() {
        let out = render_replies(&[ReplyMessage::result("error", Some(json!("oops")))]);
        assert!(out.contains("Result (error): oops"));

        let out = render_replies(&[ReplyMessage::result("running", None)]);
        assert_eq!(out, "Result (running): ");
    }

    #[test]
    fn order_is_preserved() {
        let out = render_replies(&[
            ReplyMessage::stream(ReplyKind::Log, "file t\n"),
            ReplyMessage::console("Reading symbols..."),
            ReplyMessage::result("done", None),
        ]);
        assert_eq!(
            out,
            "Log: file t\n\nConsole: Reading symbols...\nResult: Command completed successfully"
        );
    }

    #[test]
    fn unknown_kinds_use_generic_fallback() {
        let notify = ReplyMessage {
            kind: ReplyKind::Notify,
            message: Some("stopped".into()),
            payload: Some(json!({"reason": "exited-normally"})),
            token: None,
        };
        assert_eq!(render_reply(&notify), r#"Notify: {"reason":"exited-normally"}"#);

        let odd = ReplyMessage::stream(ReplyKind::Other("thread-group".into()), "i1");
        assert_eq!(render_reply(&odd), "Thread-Group: i1");

        assert_eq!(render_reply(&ReplyMessage::default()), "Unknown: ");
    }
}
