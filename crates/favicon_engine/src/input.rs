use engine_logging::{engine_debug, engine_warn};
use favicon_core::parse_source_line;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::{InputError, WorkItem, CHANNEL_CAPACITY};

/// Spawn the producer that turns address lines into work items.
///
/// Blank lines are skipped. The first malformed line or read error is sent as
/// a failed item and ends the stream; later lines are never read.
pub fn spawn_input_stage<R>(reader: R) -> mpsc::Receiver<WorkItem>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    tokio::spawn(async move {
        let mut lines = reader.lines();
        let mut line_no = 0usize;
        loop {
            let raw = match lines.next_line().await {
                Ok(Some(raw)) => raw,
                Ok(None) => break,
                Err(err) => {
                    engine_warn!("input read failed after line {}: {}", line_no, err);
                    let _ = tx.send(WorkItem::failed(InputError::Read(err))).await;
                    return;
                }
            };
            line_no += 1;

            let item = match parse_source_line(&raw) {
                Ok(Some(line)) => WorkItem::new(line.url, &line.hostname),
                Ok(None) => continue,
                Err(source) => {
                    engine_warn!("line {} is not a valid url, stopping input", line_no);
                    let _ = tx
                        .send(WorkItem::failed(InputError::Parse {
                            line: line_no,
                            raw,
                            source,
                        }))
                        .await;
                    return;
                }
            };

            if tx.send(item).await.is_err() {
                engine_debug!("input receiver dropped, stopping at line {}", line_no);
                return;
            }
        }
        engine_debug!("input exhausted after {} lines", line_no);
    });
    rx
}
