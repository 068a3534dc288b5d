use std::{
    ops::Deref,
    sync::{Arc, Mutex},
    thread::JoinHandle,
};

use crossbeam_channel::{Sender, bounded, unbounded};

use crate::{record::LogMessage, writer::LogWriter};

/// Guard that ensures the logger is properly shut down when dropped.
/// Hold this guard for the lifetime of your logging session.
pub struct LoggerGuard {
    senders: Vec<Arc<LogSender>>,
}

impl LoggerGuard {
    pub fn new(senders: Vec<Arc<LogSender>>) -> Self {
        Self { senders }
    }
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        for sender in &self.senders {
            sender.shutdown();
        }
    }
}

/// Channel endpoint feeding one destination's writer thread.
pub struct LogSender {
    sender: Sender<LogMessage>,
    handler: Arc<Mutex<Option<JoinHandle<bool>>>>,
}

impl Deref for LogSender {
    type Target = Sender<LogMessage>;
    fn deref(&self) -> &Self::Target {
        &self.sender
    }
}

impl Drop for LogSender {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl LogSender {
    pub fn new(sender: Sender<LogMessage>, handler: JoinHandle<bool>) -> Self {
        Self {
            sender,
            handler: Arc::new(Mutex::new(Some(handler))),
        }
    }

    /// Drains and joins the writer thread. Idempotent.
    pub fn shutdown(&self) {
        let mut guard = self.handler.lock().unwrap();
        if let Some(handle) = guard.take() {
            // Ignore the send error if the channel is already closed.
            let _ = self.send(LogMessage::Shutdown);
            if !handle.join().expect("Unable to join logger thread") {
                panic!("Logger thread shutdown failed");
            }
        }
    }

    /// Blocks until the writer has consumed and flushed everything sent on
    /// this channel so far.
    pub fn flush_barrier(&self) {
        let (ack, done) = bounded(0);
        if self.send(LogMessage::Flush(ack)).is_ok() {
            let _ = done.recv();
        }
    }
}

/// Spawns the dedicated writer thread for one destination. Funneling every
/// record through one consumer serializes sink access without a lock around
/// the write.
pub fn spawn_log_thread<W: LogWriter + Send + 'static>(mut writer: W) -> LogSender {
    let (sender, receiver) = unbounded::<LogMessage>();
    let handler = std::thread::spawn(move || {
        while let Ok(message) = receiver.recv() {
            match message {
                LogMessage::Record(record) => writer.write_line(&record),
                LogMessage::Flush(ack) => {
                    writer.flush();
                    let _ = ack.send(());
                }
                LogMessage::Shutdown => break,
            }
        }
        writer.flush();
        true
    });
    LogSender::new(sender, handler)
}
