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

    vf_headless::emulator::script.rs

    Feeds scripted commands to the dispatcher from a separate thread, the way
    a UI thread would. Commands keep arriving while the emulation is paused.
*/

use std::{
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use vf_config::ScriptEntry;
use vf_frontend_common::CommandSender;

pub struct ScriptFeeder {
    stop:   Sender<()>,
    handle: JoinHandle<usize>,
}

impl ScriptFeeder {
    /// Start sending `script`. Each entry is sent `tick * tick_len` after this call.
    pub fn spawn(mut script: Vec<ScriptEntry>, sender: CommandSender, tick_len: Duration) -> Self {
        script.sort_by_key(|e| e.tick);
        let (stop, stop_rx) = bounded::<()>(1);
        let handle = thread::spawn(move || {
            let start = Instant::now();
            let mut sent = 0;
            for entry in script {
                let due = start + tick_len * entry.tick;
                let wait = due.saturating_duration_since(Instant::now());
                match stop_rx.recv_timeout(wait) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                        log::debug!("ScriptFeeder: stopped after {} command(s)", sent);
                        return sent;
                    }
                }
                log::debug!("ScriptFeeder: tick {}: {:?}", entry.tick, entry.command);
                if sender.enqueue(entry.command) {
                    sent += 1;
                }
                else {
                    log::warn!("ScriptFeeder: command for tick {} dropped", entry.tick);
                }
            }
            sent
        });
        Self { stop, handle }
    }

    /// Wait for every remaining command to be sent. Returns the number of commands sent.
    pub fn finish(self) -> usize {
        self.handle.join().unwrap_or_else(|_| {
            log::error!("ScriptFeeder: thread panicked");
            0
        })
    }

    /// Stop sending and wait for the thread to end. Returns the number of commands sent.
    pub fn stop(self) -> usize {
        // The thread may already be done, in which case nobody is listening.
        let _ = self.stop.try_send(());
        self.finish()
    }
}
