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

    frontend_common::dispatch::pause.rs

    Pausing the emulation.
    
    Pausing is requested from the dispatcher and entered from a trap, since the
    CPU must be stopped at an instruction boundary. While paused, the trap keeps
    the UI responsive by polling the command queue itself until a resume is
    requested. The loop is flat: dispatch ticks run inside it, and never enter
    another pause loop.
*/

use std::time::Duration;

use super::Dispatcher;
use crate::trap::TrapRequest;

/// Running -> Pausing (trap scheduled) -> Paused (trap polling) -> Resuming -> Running
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PauseState {
    #[default]
    Running,
    Pausing,
    Paused,
    Resuming,
}

cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        // No thread sleep on the web; the browser event loop paces us.
        fn pause_sleep(_poll: Duration) {}
    }
    else {
        fn pause_sleep(poll: Duration) {
            if !poll.is_zero() {
                std::thread::sleep(poll);
            }
        }
    }
}

impl Dispatcher {
    pub fn pause_state(&self) -> PauseState {
        self.pause
    }

    /// True from the moment a pause is requested until a resume is requested.
    pub fn is_paused(&self) -> bool {
        matches!(self.pause, PauseState::Pausing | PauseState::Paused)
    }

    /// Request a pause or a resume. Pausing is refused while a netplay session is connected.
    pub fn pause_emulation(&mut self, pause: bool) {
        if pause {
            if self.core.netplay_connected() {
                log::info!("pause_emulation(): refusing to pause during netplay");
                return;
            }
            if !self.is_paused() {
                self.set_pause_state(PauseState::Pausing);
                self.traps.schedule_trap(TrapRequest::Pause);
            }
        }
        else {
            self.status.display_paused(&self.registry, false);
            let next = match self.pause {
                PauseState::Paused => PauseState::Resuming,
                _ => PauseState::Running,
            };
            self.set_pause_state(next);
        }
    }

    fn set_pause_state(&mut self, state: PauseState) {
        if self.pause != state {
            log::info!("set_pause_state(): {:?} -> {:?}", self.pause, state);
            self.pause = state;
        }
    }

    pub(super) fn pause_trap(&mut self) {
        if self.pause != PauseState::Pausing {
            log::debug!("pause_trap(): pause was withdrawn before the trap ran");
            return;
        }
        self.set_pause_state(PauseState::Paused);
        self.status.display_paused(&self.registry, true);
        self.traps.suspend_speed_eval();

        while self.pause == PauseState::Paused && !self.exit {
            pause_sleep(self.pause_poll);
            self.dispatch_tick();
        }
        // A pause requested again during this loop has already scheduled its own trap.
        if self.pause != PauseState::Pausing {
            self.set_pause_state(PauseState::Running);
        }
    }
}
