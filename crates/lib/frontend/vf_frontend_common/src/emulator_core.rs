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

    frontend_common::emulator_core.rs

    The interface to the emulation core consumed by the dispatcher.
*/

use std::path::Path;

use vf_common::{DatasetteControl, DriveUnit};

use crate::types::command::ResetMode;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    Failed(String),
    #[error("Operation not supported by this machine: {0}")]
    Unsupported(&'static str),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FliplistOp {
    Add,
    Remove,
    Next,
    Previous,
}

/// Operations the dispatcher performs on the emulation core. Snapshot reads and writes must only
/// be called from a trap.
pub trait EmulatorCore {
    fn reset(&mut self, mode: ResetMode);

    fn attach_disk(&mut self, unit: DriveUnit, path: &Path) -> Result<(), CoreError>;
    fn detach_disk(&mut self, unit: DriveUnit);
    fn attach_tape(&mut self, path: &Path) -> Result<(), CoreError>;
    fn detach_tape(&mut self);
    fn autostart(&mut self, path: &Path) -> Result<(), CoreError>;

    fn read_snapshot(&mut self, path: &Path) -> Result<(), CoreError>;
    fn write_snapshot(&mut self, path: &Path, save_roms: bool, save_disks: bool) -> Result<(), CoreError>;

    fn datasette_control(&mut self, control: DatasetteControl);
    fn fliplist(&mut self, op: FliplistOp, unit: DriveUnit);
    fn save_fliplist(&mut self) -> Result<(), CoreError> {
        Ok(())
    }

    fn key_down(&mut self, code: u32);
    fn key_up(&mut self, code: u32);
    fn feed_keyboard_buffer(&mut self, text: &str);

    fn netplay_start_server(&mut self) -> Result<(), CoreError> {
        Err(CoreError::Unsupported("netplay"))
    }
    fn netplay_connect_client(&mut self) -> Result<(), CoreError> {
        Err(CoreError::Unsupported("netplay"))
    }
    fn netplay_disconnect(&mut self) {}
    fn netplay_connected(&self) -> bool {
        false
    }

    fn event_recording(&self) -> bool {
        false
    }
    fn event_playing(&self) -> bool {
        false
    }
    fn event_record(&mut self, _start: bool) -> Result<(), CoreError> {
        Err(CoreError::Unsupported("event history"))
    }
    fn event_playback(&mut self, _start: bool) -> Result<(), CoreError> {
        Err(CoreError::Unsupported("event history"))
    }
    fn event_set_milestone(&mut self) {}
    fn event_reset_milestone(&mut self) {}

    /// Run the emulation for one frame while paused.
    fn advance_frame(&mut self);
    fn monitor(&mut self) {}
}
