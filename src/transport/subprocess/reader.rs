//! Record reading logic for subprocess transport

use std::collections::VecDeque;
use std::sync::Arc;

use futures::StreamExt;
use parking_lot::Mutex;
use tokio::io::AsyncRead;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};
use tokio_util::sync::CancellationToken;

use crate::error::{GdbError, Result};
use crate::message::parse_line;
use crate::types::messages::ReplyMessage;

use super::config::STDERR_MAX_LINE_LENGTH;

/// Records read from stdout, waiting to be collected
///
/// A ring buffer: once `capacity` records are queued the oldest is dropped,
/// so a chatty target cannot grow the backlog between commands without bound.
pub(super) struct RecordBuffer {
    queue: Mutex<RecordQueue>,
    arrived: Notify,
    exited: CancellationToken,
    capacity: usize,
}

struct RecordQueue {
    records: VecDeque<Result<ReplyMessage>>,
    closed: bool,
    dropped: u64,
}

impl RecordBuffer {
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            queue: Mutex::new(RecordQueue {
                records: VecDeque::with_capacity(capacity.min(1024)),
                closed: false,
                dropped: 0,
            }),
            arrived: Notify::new(),
            exited: CancellationToken::new(),
            capacity: capacity.max(1),
        }
    }

    fn push(&self, record: Result<ReplyMessage>, label: &str) {
        {
            let mut queue = self.queue.lock();
            if queue.records.len() == self.capacity {
                queue.records.pop_front();
                queue.dropped += 1;
                if queue.dropped == 1 || queue.dropped.is_power_of_two() {
                    log::warn!(
                        "[{label}] record backlog full, {} oldest records dropped",
                        queue.dropped
                    );
                }
            }
            queue.records.push_back(record);
        }
        self.arrived.notify_one();
    }

    fn close(&self) {
        self.queue.lock().closed = true;
        self.arrived.notify_one();
        self.exited.cancel();
    }

    /// Take the oldest queued record without waiting
    pub(super) fn try_pop(&self) -> Option<Result<ReplyMessage>> {
        self.queue.lock().records.pop_front()
    }

    /// Wait for the next record; `None` once stdout has closed and the
    /// backlog is empty
    pub(super) async fn recv(&self) -> Option<Result<ReplyMessage>> {
        loop {
            {
                let mut queue = self.queue.lock();
                if let Some(record) = queue.records.pop_front() {
                    return Some(record);
                }
                if queue.closed {
                    return None;
                }
            }
            // notify_one stores a permit, so a push between unlock and here is not lost
            self.arrived.notified().await;
        }
    }

    /// Whether stdout has reached EOF
    pub(super) fn is_closed(&self) -> bool {
        self.queue.lock().closed
    }

    /// Token cancelled when stdout reaches EOF
    pub(super) fn exit_signal(&self) -> CancellationToken {
        self.exited.clone()
    }
}

/// Spawn a background task parsing MI records from the debugger's stdout
///
/// Every parsed record is queued in arrival order; prompt lines are
/// dropped by the parser. The buffer is closed when stdout reaches EOF.
///
/// # Returns
/// The shared record buffer and the reader task handle
pub(super) fn spawn_record_reader<R>(
    stdout: R,
    max_line_length: usize,
    capacity: usize,
    label: String,
) -> (Arc<RecordBuffer>, JoinHandle<()>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let buffer = Arc::new(RecordBuffer::new(capacity));
    let sink = Arc::clone(&buffer);

    let task = tokio::spawn(async move {
        let mut lines = FramedRead::new(stdout, LinesCodec::new_with_max_length(max_line_length));
        // FramedRead yields one `None` after a decode error before resuming
        let mut skipped_line = false;

        loop {
            let Some(line) = lines.next().await else {
                if std::mem::take(&mut skipped_line) {
                    continue;
                }
                break;
            };
            match line {
                Ok(line) => {
                    log::trace!("[{label}] mi <- {line}");
                    if let Some(record) = parse_line(&line) {
                        sink.push(Ok(record), &label);
                    }
                }
                Err(LinesCodecError::MaxLineLengthExceeded) => {
                    skipped_line = true;
                    sink.push(
                        Err(GdbError::transport(format!(
                            "MI line exceeded maximum length of {max_line_length} bytes"
                        ))),
                        &label,
                    );
                }
                Err(LinesCodecError::Io(e)) => {
                    log::warn!("[{label}] stdout read failed: {e}");
                    sink.push(Err(GdbError::Io(e)), &label);
                    break;
                }
            }
        }

        sink.close();
        log::debug!("[{label}] stdout closed");
    });

    (buffer, task)
}

/// Spawn a background task forwarding the debugger's stderr to the log
pub(super) fn spawn_stderr_forwarder<R>(stderr: R, label: String) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines =
            FramedRead::new(stderr, LinesCodec::new_with_max_length(STDERR_MAX_LINE_LENGTH));

        while let Some(line) = lines.next().await {
            match line {
                Ok(line) => log::debug!("[{label}] gdb stderr: {line}"),
                Err(LinesCodecError::MaxLineLengthExceeded) => continue,
                Err(LinesCodecError::Io(_)) => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::messages::ReplyKind;

    #[tokio::test]
    async fn records_arrive_in_order_without_prompts() {
        let output: &[u8] = b"=thread-group-added,id=\"i1\"\n(gdb)\n~\"hi\\n\"\n7^done\n(gdb)\n";
        let (records, task) = spawn_record_reader(output, 1024, 16, "test".into());

        let first = records.recv().await.unwrap().unwrap();
        assert_eq!(first.kind, ReplyKind::Notify);
        let second = records.recv().await.unwrap().unwrap();
        assert_eq!(second.kind, ReplyKind::Console);
        let third = records.recv().await.unwrap().unwrap();
        assert!(third.terminates(7));
        assert!(records.recv().await.is_none());
        assert!(records.is_closed());
        assert!(records.exit_signal().is_cancelled());

        task.await.unwrap();
    }

    #[tokio::test]
    async fn overlong_lines_are_reported() {
        let output: &[u8] = b"~\"this line is far too long\"\n^done\n";
        let (records, _task) = spawn_record_reader(output, 8, 16, "test".into());

        assert!(matches!(records.recv().await, Some(Err(GdbError::Transport(_)))));
        let next = records.recv().await.unwrap().unwrap();
        assert_eq!(next.kind, ReplyKind::Result);
    }

    #[tokio::test]
    async fn full_backlog_drops_the_oldest_records() {
        let output: &[u8] = b"~\"1\"\n~\"2\"\n~\"3\"\n~\"4\"\n~\"5\"\n";
        let (records, task) = spawn_record_reader(output, 1024, 3, "test".into());
        task.await.unwrap();

        let mut kept = Vec::new();
        while let Some(record) = records.try_pop() {
            kept.push(record.unwrap().payload.unwrap());
        }
        assert_eq!(kept, vec!["3", "4", "5"]);
        assert!(records.recv().await.is_none());
    }
}
