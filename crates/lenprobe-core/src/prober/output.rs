//! Result lines and the single printer task that owns the output sink.

use std::fmt;
use std::io::{self, Write};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Outcome of probing one URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Declared length (0 when the server sent none).
    Length(u64),
    /// Transport failure, reported as `-1` under the sentinel policy.
    Failed,
}

/// One `"<url> <length>"` output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLine {
    pub url: String,
    pub outcome: ProbeOutcome,
}

impl fmt::Display for ResultLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            ProbeOutcome::Length(n) => write!(f, "{} {}", self.url, n),
            ProbeOutcome::Failed => write!(f, "{} -1", self.url),
        }
    }
}

/// Drains `rx` into `sink`, one whole line per write followed by a flush,
/// until every sender is dropped. Returns the sink.
pub fn spawn_printer<W>(mut rx: mpsc::Receiver<ResultLine>, mut sink: W) -> JoinHandle<io::Result<W>>
where
    W: Write + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        while let Some(line) = rx.blocking_recv() {
            sink.write_all(format!("{}\n", line).as_bytes())?;
            sink.flush()?;
        }
        Ok(sink)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_line_format() {
        let ok = ResultLine {
            url: "http://a/1".to_string(),
            outcome: ProbeOutcome::Length(1024),
        };
        assert_eq!(ok.to_string(), "http://a/1 1024");
        let failed = ResultLine {
            url: "http://a/2".to_string(),
            outcome: ProbeOutcome::Failed,
        };
        assert_eq!(failed.to_string(), "http://a/2 -1");
    }

    #[tokio::test]
    async fn printer_writes_lines_in_arrival_order() {
        let (tx, rx) = mpsc::channel(4);
        let printer = spawn_printer(rx, Vec::new());
        for (url, n) in [("http://x/a", 1), ("http://x/b", 0)] {
            tx.send(ResultLine {
                url: url.to_string(),
                outcome: ProbeOutcome::Length(n),
            })
            .await
            .unwrap();
        }
        drop(tx);
        let out = printer.await.unwrap().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "http://x/a 1\nhttp://x/b 0\n");
    }
}
