//! Background writer thread
//!
//! The only consumer of the delivery queue. It sleeps until producers
//! signal work or a stop is requested, takes the whole queue in one lock
//! acquisition, and writes each element in FIFO order with the lock
//! released. It exits only once a stop was requested and the queue is
//! empty.

use super::{
    queue::{Destination, QueueElement},
    state::LoggerState,
};
use crate::sinks::{ConsoleSink, FileSink, Sink, SocketSink};
use std::collections::VecDeque;
use std::sync::Arc;

pub(crate) fn run(state: &LoggerState) {
    while let Some(batch) = state.next_batch() {
        write_batch(state, batch);
    }
}

/// Write every element, then flush each sink the batch touched once.
fn write_batch(state: &LoggerState, batch: VecDeque<QueueElement>) {
    let mut console_touched = false;
    let mut files: Vec<Arc<FileSink>> = Vec::new();
    let mut sockets: Vec<Arc<SocketSink>> = Vec::new();

    for element in batch {
        match element.deliver() {
            Ok(()) => {
                state.metrics().record_delivered();
            }
            Err(e) => {
                // Sink failures are not retried and never reach the producer.
                eprintln!(
                    "[LOGGER ERROR] {} sink write failed: {}",
                    element.destination.target(),
                    e
                );
                state.metrics().record_write_failure();
            }
        }

        match element.destination {
            Destination::Console => console_touched = true,
            Destination::File(file) => {
                if !files.iter().any(|f| Arc::ptr_eq(f, &file)) {
                    files.push(file);
                }
            }
            Destination::Socket(socket) => {
                if !sockets.iter().any(|s| Arc::ptr_eq(s, &socket)) {
                    sockets.push(socket);
                }
            }
        }
    }

    if console_touched {
        flush_sink(&ConsoleSink::new());
    }
    for file in &files {
        flush_sink(file.as_ref());
    }
    for socket in &sockets {
        flush_sink(socket.as_ref());
    }
}

fn flush_sink(sink: &dyn Sink) {
    if let Err(e) = sink.flush() {
        eprintln!("[LOGGER ERROR] {} sink flush failed: {}", sink.name(), e);
    }
}
