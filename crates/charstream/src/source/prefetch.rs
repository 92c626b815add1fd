use std::io;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use crate::source::{BufferSource, Refill};

/// Default number of windows the worker may buffer ahead of the consumer.
const DEFAULT_BUCKETS: usize = 8;

/// A [`BufferSource`] that drains an inner source on a worker thread and
/// hands windows to the reader through a bounded channel.
///
/// The prefetch strategy is invisible to the reader: this type satisfies the
/// same contract as the synchronous sources, including terminal, idempotent
/// exhaustion. The bounded channel provides backpressure, so the worker
/// never runs more than a fixed number of windows ahead.
#[derive(Debug)]
pub struct PrefetchSource {
    windows: Option<Receiver<io::Result<Vec<char>>>>,
    worker: Option<JoinHandle<()>>,
}

impl PrefetchSource {
    /// Spawns a worker thread draining `inner`, buffering the default number
    /// of windows.
    ///
    /// # Errors
    ///
    /// Fails when the worker thread cannot be spawned.
    pub fn spawn<S>(inner: S) -> io::Result<Self>
    where
        S: BufferSource + Send + 'static,
    {
        Self::with_buckets(inner, DEFAULT_BUCKETS)
    }

    /// Spawns a worker thread draining `inner`, buffering at most `buckets`
    /// windows ahead of the consumer.
    ///
    /// # Errors
    ///
    /// Fails when the worker thread cannot be spawned.
    pub fn with_buckets<S>(mut inner: S, buckets: usize) -> io::Result<Self>
    where
        S: BufferSource + Send + 'static,
    {
        let (sender, receiver) = mpsc::sync_channel(buckets.max(1));
        let worker = thread::Builder::new()
            .name("charstream-prefetch".into())
            .spawn(move || {
                loop {
                    let mut window = Vec::new();
                    match inner.refill(&mut window) {
                        Ok(Refill::Chars(_)) => {
                            // A send failure means the consumer went away.
                            if sender.send(Ok(window)).is_err() {
                                break;
                            }
                        }
                        Ok(Refill::Exhausted) => break,
                        Err(err) => {
                            let _ = sender.send(Err(err));
                            break;
                        }
                    }
                }
                inner.close();
            })?;
        Ok(Self {
            windows: Some(receiver),
            worker: Some(worker),
        })
    }
}

impl BufferSource for PrefetchSource {
    fn refill(&mut self, buffer: &mut Vec<char>) -> io::Result<Refill> {
        buffer.clear();
        let received = match self.windows.as_ref() {
            Some(receiver) => receiver.recv(),
            None => return Ok(Refill::Exhausted),
        };
        match received {
            Ok(Ok(window)) => {
                *buffer = window;
                Ok(Refill::Chars(buffer.len()))
            }
            Ok(Err(err)) => {
                self.windows = None;
                Err(err)
            }
            // The worker hung up: the inner source is exhausted.
            Err(_) => {
                self.windows = None;
                Ok(Refill::Exhausted)
            }
        }
    }

    fn close(&mut self) {
        // Dropping the receiver unblocks a worker waiting on a full channel.
        self.windows = None;
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for PrefetchSource {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StringSource;

    fn drain(mut source: PrefetchSource) -> String {
        let mut out = String::new();
        let mut buffer = Vec::new();
        while let Refill::Chars(_) = source.refill(&mut buffer).unwrap() {
            out.extend(buffer.iter());
        }
        out
    }

    #[test]
    fn yields_the_same_characters_as_the_inner_source() {
        let inner = StringSource::with_window("one\r\ntwo\r\nthree", 3);
        let source = PrefetchSource::spawn(inner).unwrap();
        assert_eq!(drain(source), "one\r\ntwo\r\nthree");
    }

    #[test]
    fn exhaustion_is_terminal() {
        let mut source = PrefetchSource::spawn(StringSource::new("x")).unwrap();
        let mut buffer = Vec::new();
        assert_eq!(source.refill(&mut buffer).unwrap(), Refill::Chars(1));
        assert_eq!(source.refill(&mut buffer).unwrap(), Refill::Exhausted);
        assert_eq!(source.refill(&mut buffer).unwrap(), Refill::Exhausted);
    }

    #[test]
    fn close_mid_stream_stops_the_worker() {
        // A one-bucket channel guarantees the worker blocks on send.
        let inner = StringSource::with_window(&"ab".repeat(64), 1);
        let mut source = PrefetchSource::with_buckets(inner, 1).unwrap();
        let mut buffer = Vec::new();
        assert_eq!(source.refill(&mut buffer).unwrap(), Refill::Chars(1));
        source.close();
        source.close();
        assert_eq!(source.refill(&mut buffer).unwrap(), Refill::Exhausted);
    }
}
