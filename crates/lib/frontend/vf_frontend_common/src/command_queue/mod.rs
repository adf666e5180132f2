/*
    ViceFront

    Copyright 2022-2025 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------

    frontend_common::command_queue::mod.rs

    A bounded FIFO of command records shared between a windowing layer and the
    dispatcher. Producers may live on any thread; the dispatcher drains the queue
    once per tick.
*/

use std::{
    fmt::Display,
    str::FromStr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use serde_derive::Deserialize;

use crate::types::command::CommandRecord;

/// What happens to a record enqueued while the queue is full.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum QueueOverflowPolicy {
    /// The incoming record is discarded.
    #[default]
    DropNewest,
    /// The oldest queued record is discarded to make room.
    DropOldest,
}

impl FromStr for QueueOverflowPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, String>
    where
        Self: Sized,
    {
        match s.to_lowercase().as_str() {
            "dropnewest" | "drop_newest" => Ok(QueueOverflowPolicy::DropNewest),
            "dropoldest" | "drop_oldest" => Ok(QueueOverflowPolicy::DropOldest),
            _ => Err("Bad value for QueueOverflowPolicy".to_string()),
        }
    }
}

impl Display for QueueOverflowPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueOverflowPolicy::DropNewest => write!(f, "DropNewest"),
            QueueOverflowPolicy::DropOldest => write!(f, "DropOldest"),
        }
    }
}

/// A cloneable producer handle for a [CommandQueue].
#[derive(Clone)]
pub struct CommandSender {
    sender:   Sender<CommandRecord>,
    // Used to evict the oldest record under DropOldest.
    evict:    Receiver<CommandRecord>,
    policy:   QueueOverflowPolicy,
    dropped:  Arc<AtomicUsize>,
    capacity: usize,
}

impl CommandSender {
    /// Append a record to the queue. Returns false if the record was dropped.
    /// Never blocks.
    pub fn enqueue(&self, record: CommandRecord) -> bool {
        let mut record = record;
        loop {
            match self.sender.try_send(record) {
                Ok(()) => return true,
                Err(TrySendError::Full(rejected)) => {
                    self.dropped.fetch_add(1, Ordering::Relaxed);
                    match self.policy {
                        QueueOverflowPolicy::DropNewest => {
                            log::trace!("enqueue(): queue full ({}), dropping {:?}", self.capacity, rejected);
                            return false;
                        }
                        QueueOverflowPolicy::DropOldest => {
                            if let Ok(oldest) = self.evict.try_recv() {
                                log::trace!("enqueue(): queue full ({}), evicted {:?}", self.capacity, oldest);
                            }
                            record = rejected;
                        }
                    }
                }
                Err(TrySendError::Disconnected(_)) => {
                    log::error!("enqueue(): command queue disconnected");
                    return false;
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.sender.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sender.is_empty()
    }
}

pub struct CommandQueue {
    sender:   CommandSender,
    receiver: Receiver<CommandRecord>,
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_QUEUE_CAPACITY, QueueOverflowPolicy::default())
    }
}

impl CommandQueue {
    pub fn new(capacity: usize, policy: QueueOverflowPolicy) -> Self {
        // A zero-capacity crossbeam channel is a rendezvous channel, which would reject every try_send.
        let capacity = capacity.max(1);
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        Self {
            sender:   CommandSender {
                sender: tx,
                evict: rx.clone(),
                policy,
                dropped: Arc::new(AtomicUsize::new(0)),
                capacity,
            },
            receiver: rx,
        }
    }

    /// Get a producer handle that can be moved to another thread.
    pub fn sender(&self) -> CommandSender {
        self.sender.clone()
    }

    pub fn enqueue(&self, record: CommandRecord) -> bool {
        self.sender.enqueue(record)
    }

    pub fn capacity(&self) -> usize {
        self.sender.capacity
    }

    pub fn policy(&self) -> QueueOverflowPolicy {
        self.sender.policy
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Remove and return every record present at the time of the call, in FIFO order.
    /// Records enqueued while the returned batch is being processed are left for the next drain.
    pub fn drain(&self) -> Vec<CommandRecord> {
        let n = self.receiver.len();
        self.receiver.try_iter().take(n).collect()
    }

    /// Return the number of records dropped since the last call, and reset the counter.
    pub fn take_dropped(&self) -> usize {
        self.sender.dropped.swap(0, Ordering::Relaxed)
    }
}
