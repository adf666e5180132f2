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

    frontend_common::trap::mod.rs

    Trap scheduling. Snapshot I/O and pause entry must happen at an instruction
    boundary of the emulated CPU, so the dispatcher never performs them directly.
    Instead it schedules a trap, and the emulation host hands the request back
    to the dispatcher when it is safe to run.
*/

use crossbeam_channel::{Receiver, Sender};

/// Work to be performed at the next CPU boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrapRequest {
    SaveQuickSnapshot,
    LoadQuickSnapshot,
    SaveSnapshot(std::path::PathBuf),
    LoadSnapshot(std::path::PathBuf),
    Pause,
}

/// Requests sent from the dispatcher to the emulation host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoreRequest {
    Trap(TrapRequest),
    /// Stop accumulating speed statistics; a blocking dialog is about to open.
    SuspendSpeedEval,
}

pub trait TrapScheduler {
    /// Request that `request` be run at the next safe CPU boundary. Never runs it immediately.
    fn schedule_trap(&mut self, request: TrapRequest);
    fn suspend_speed_eval(&mut self);
}

/// A [TrapScheduler] that forwards requests over a channel to a [TrapReceiver].
#[derive(Clone)]
pub struct TrapQueue {
    tx: Sender<CoreRequest>,
}

pub struct TrapReceiver {
    rx: Receiver<CoreRequest>,
}

pub fn trap_channel() -> (TrapQueue, TrapReceiver) {
    let (tx, rx) = crossbeam_channel::unbounded();
    (TrapQueue { tx }, TrapReceiver { rx })
}

impl TrapScheduler for TrapQueue {
    fn schedule_trap(&mut self, request: TrapRequest) {
        log::debug!("schedule_trap(): {:?}", request);
        if self.tx.send(CoreRequest::Trap(request)).is_err() {
            log::error!("schedule_trap(): trap receiver has been dropped");
        }
    }

    fn suspend_speed_eval(&mut self) {
        if self.tx.send(CoreRequest::SuspendSpeedEval).is_err() {
            log::error!("suspend_speed_eval(): trap receiver has been dropped");
        }
    }
}

impl TrapReceiver {
    /// Take every pending request in the order they were scheduled.
    pub fn drain(&self) -> Vec<CoreRequest> {
        self.rx.try_iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}
