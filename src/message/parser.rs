//! GDB/MI output record parser
//!
//! Turns one line of machine-interface output into a [`ReplyMessage`].
//! Parsing is total: a line that does not follow the record grammar is
//! returned as an `output` record carrying the raw text.

use serde_json::{Map, Value};

use crate::types::messages::{ReplyKind, ReplyMessage};

/// Prompt line terminating every batch of MI output
const PROMPT: &str = "(gdb)";

/// Parse a single MI output line
///
/// # Returns
/// `None` for prompt and blank lines, otherwise the parsed record
#[must_use]
pub fn parse_line(line: &str) -> Option<ReplyMessage> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() || line.trim_end() == PROMPT {
        return None;
    }

    let stream_kind = match line.as_bytes()[0] {
        b'~' => Some(ReplyKind::Console),
        b'@' => Some(ReplyKind::Target),
        b'&' => Some(ReplyKind::Log),
        _ => None,
    };
    if let Some(kind) = stream_kind {
        let text = unquote(&line[1..]).unwrap_or_else(|| line[1..].to_string());
        return Some(ReplyMessage::stream(kind, text));
    }

    Some(parse_record(line).unwrap_or_else(|| ReplyMessage::stream(ReplyKind::Output, line)))
}

/// Parse a result or async record: `[token]^class[,results]`
fn parse_record(line: &str) -> Option<ReplyMessage> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    let token = if digits > 0 {
        Some(line[..digits].parse::<u64>().ok()?)
    } else {
        None
    };

    let rest = &line[digits..];
    let kind = match rest.as_bytes().first().copied()? {
        b'^' => ReplyKind::Result,
        b'*' | b'+' | b'=' => ReplyKind::Notify,
        _ => return None,
    };

    let body = &rest[1..];
    let (class, results) = match body.find(',') {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };
    if class.is_empty() || !class.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return None;
    }

    let payload = match results {
        Some(src) => {
            let mut cursor = Cursor::new(src);
            let map = cursor.results(None)?;
            if !cursor.at_end() {
                return None;
            }
            Some(Value::Object(map))
        }
        None => None,
    };

    Some(ReplyMessage {
        kind,
        message: Some(class.to_string()),
        payload,
        token,
    })
}

/// Decode a quoted C string occupying the whole of `s`
fn unquote(s: &str) -> Option<String> {
    let mut cursor = Cursor::new(s);
    let text = cursor.cstring()?;
    cursor.at_end().then_some(text)
}

// ============================================================================
// VALUE GRAMMAR
// ============================================================================

struct Cursor<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src: src.as_bytes(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// `result ( "," result )*`, stopping before `close` when given
    fn results(&mut self, close: Option<u8>) -> Option<Map<String, Value>> {
        let mut map = Map::new();
        loop {
            let (key, value) = self.result()?;
            insert_result(&mut map, key, value);
            if !self.eat(b',') {
                break;
            }
        }
        match close {
            Some(c) if self.peek() != Some(c) => None,
            _ => Some(map),
        }
    }

    /// `variable "=" value`
    fn result(&mut self) -> Option<(String, Value)> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b == b'=' {
                break;
            }
            if matches!(b, b',' | b'{' | b'}' | b'[' | b']' | b'"') {
                return None;
            }
            self.pos += 1;
        }
        if self.pos == start || !self.eat(b'=') {
            return None;
        }
        let key = String::from_utf8_lossy(&self.src[start..self.pos - 1]).into_owned();
        Some((key, self.value()?))
    }

    fn value(&mut self) -> Option<Value> {
        match self.peek()? {
            b'"' => self.cstring().map(Value::String),
            b'{' => self.tuple(),
            b'[' => self.list(),
            _ => None,
        }
    }

    fn tuple(&mut self) -> Option<Value> {
        self.eat(b'{');
        if self.eat(b'}') {
            return Some(Value::Object(Map::new()));
        }
        let map = self.results(Some(b'}'))?;
        self.eat(b'}');
        Some(Value::Object(map))
    }

    fn list(&mut self) -> Option<Value> {
        self.eat(b'[');
        let mut items = Vec::new();
        if self.eat(b']') {
            return Some(Value::Array(items));
        }
        loop {
            let item = match self.peek()? {
                b'"' | b'{' | b'[' => self.value()?,
                _ => {
                    let (key, value) = self.result()?;
                    let mut single = Map::new();
                    single.insert(key, value);
                    Value::Object(single)
                }
            };
            items.push(item);
            if !self.eat(b',') {
                break;
            }
        }
        self.eat(b']').then_some(Value::Array(items))
    }

    /// Quoted C string with backslash and octal escapes
    fn cstring(&mut self) -> Option<String> {
        if !self.eat(b'"') {
            return None;
        }
        let mut bytes = Vec::new();
        loop {
            let b = self.peek()?;
            self.pos += 1;
            match b {
                b'"' => return Some(String::from_utf8_lossy(&bytes).into_owned()),
                b'\\' => {
                    let esc = self.peek()?;
                    self.pos += 1;
                    match esc {
                        b'n' => bytes.push(b'\n'),
                        b't' => bytes.push(b'\t'),
                        b'r' => bytes.push(b'\r'),
                        b'a' => bytes.push(0x07),
                        b'b' => bytes.push(0x08),
                        b'f' => bytes.push(0x0c),
                        b'v' => bytes.push(0x0b),
                        b'e' => bytes.push(0x1b),
                        b'0'..=b'7' => {
                            let mut code = u32::from(esc - b'0');
                            for _ in 0..2 {
                                match self.peek() {
                                    Some(d @ b'0'..=b'7') => {
                                        code = code * 8 + u32::from(d - b'0');
                                        self.pos += 1;
                                    }
                                    _ => break,
                                }
                            }
                            bytes.push((code & 0xff) as u8);
                        }
                        other => bytes.push(other),
                    }
                }
                other => bytes.push(other),
            }
        }
    }
}

/// Repeated keys collapse into an array of their values
fn insert_result(map: &mut Map<String, Value>, key: String, value: Value) {
    match map.get_mut(&key) {
        None => {
            map.insert(key, value);
        }
        Some(Value::Array(existing)) if !value.is_array() => existing.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stream_records_are_unescaped() {
        let msg = parse_line(r#"~"Breakpoint 1 at 0x1149: file t.c, line 4.\n""#).unwrap();
        assert_eq!(msg.kind, ReplyKind::Console);
        assert_eq!(
            msg.payload,
            Some(json!("Breakpoint 1 at 0x1149: file t.c, line 4.\n"))
        );

        let msg = parse_line(r#"&"No symbol \"foo\" in current context.\n""#).unwrap();
        assert_eq!(msg.kind, ReplyKind::Log);
        assert_eq!(msg.payload, Some(json!("No symbol \"foo\" in current context.\n")));

        let msg = parse_line(r#"@"hello\n""#).unwrap();
        assert_eq!(msg.kind, ReplyKind::Target);
    }

    #[test]
    fn octal_escapes_decode_as_utf8() {
        let msg = parse_line(r#"~"caf\303\251""#).unwrap();
        assert_eq!(msg.payload, Some(json!("café")));
    }

    #[test]
    fn prompt_and_blank_lines_are_dropped() {
        assert!(parse_line("(gdb)").is_none());
        assert!(parse_line("(gdb) ").is_none());
        assert!(parse_line("").is_none());
    }

    #[test]
    fn result_record_with_token_and_tuple() {
        let msg = parse_line(
            r#"12^done,bkpt={number="1",type="breakpoint",addr="0x0000000000001149",func="main"}"#,
        )
        .unwrap();
        assert_eq!(msg.kind, ReplyKind::Result);
        assert_eq!(msg.token, Some(12));
        assert_eq!(msg.message.as_deref(), Some("done"));
        assert_eq!(
            msg.payload,
            Some(json!({"bkpt": {
                "number": "1",
                "type": "breakpoint",
                "addr": "0x0000000000001149",
                "func": "main"
            }}))
        );
    }

    #[test]
    fn bare_result_has_no_payload() {
        let msg = parse_line("^running").unwrap();
        assert_eq!(msg.message.as_deref(), Some("running"));
        assert!(msg.payload.is_none());
        assert!(msg.token.is_none());
    }

    #[test]
    fn error_result_carries_msg() {
        let msg = parse_line(r#"3^error,msg="No symbol table is loaded.  Use the \"file\" command.""#)
            .unwrap();
        assert_eq!(msg.message.as_deref(), Some("error"));
        assert_eq!(
            msg.payload,
            Some(json!({"msg": "No symbol table is loaded.  Use the \"file\" command."}))
        );
    }

    #[test]
    fn lists_of_results_and_values() {
        let msg = parse_line(
            r#"^done,stack=[frame={level="0",func="f"},frame={level="1",func="main"}],names=["rax","rbx",""]"#,
        )
        .unwrap();
        assert_eq!(
            msg.payload,
            Some(json!({
                "stack": [
                    {"frame": {"level": "0", "func": "f"}},
                    {"frame": {"level": "1", "func": "main"}}
                ],
                "names": ["rax", "rbx", ""]
            }))
        );
    }

    #[test]
    fn async_records_are_notifications() {
        let msg = parse_line(
            r#"*stopped,reason="breakpoint-hit",disp="keep",bkptno="1",frame={func="main",args=[]},thread-id="1""#,
        )
        .unwrap();
        assert_eq!(msg.kind, ReplyKind::Notify);
        assert_eq!(msg.message.as_deref(), Some("stopped"));
        let payload = msg.payload.unwrap();
        assert_eq!(payload["reason"], json!("breakpoint-hit"));
        assert_eq!(payload["frame"]["args"], json!([]));

        let msg = parse_line(r#"=thread-group-added,id="i1""#).unwrap();
        assert_eq!(msg.kind, ReplyKind::Notify);
        assert_eq!(msg.message.as_deref(), Some("thread-group-added"));
    }

    #[test]
    fn repeated_tuple_keys_collapse_into_array() {
        let msg = parse_line(r#"^done,a={x="1",x="2",x="3"}"#).unwrap();
        assert_eq!(msg.payload, Some(json!({"a": {"x": ["1", "2", "3"]}})));
    }

    #[test]
    fn unrecognised_lines_become_output() {
        let msg = parse_line("GNU gdb (GDB) 14.2").unwrap();
        assert_eq!(msg.kind, ReplyKind::Output);
        assert_eq!(msg.payload, Some(json!("GNU gdb (GDB) 14.2")));

        let msg = parse_line(r#"^done,broken={"#).unwrap();
        assert_eq!(msg.kind, ReplyKind::Output);
    }
}
