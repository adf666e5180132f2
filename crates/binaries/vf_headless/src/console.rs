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

    vf_headless::console.rs

    Status surface and UI host that write to the terminal.
*/

use vf_common::{DriveDisplayState, DriveLed};
use vf_frontend_common::{FilePanel, FilePurpose, StatusSurface, StatusUpdate, UiHost};

/// Render a status update as a single line of text.
pub fn describe(update: &StatusUpdate) -> String {
    match update {
        StatusUpdate::DriveStatus(DriveDisplayState::Active(unit)) => format!("Drive {}: on", unit.device()),
        StatusUpdate::DriveStatus(DriveDisplayState::Inactive(unit)) => format!("Drive {}: off", unit.device()),
        StatusUpdate::DriveLed { unit, led } => {
            let color = match led {
                DriveLed::Off => "black",
                DriveLed::Red => "red",
                DriveLed::Green => "green",
                DriveLed::Both => "yellow",
            };
            format!("Drive {}: led {}", unit.device(), color)
        }
        StatusUpdate::DriveTrack { unit, track } => format!("Drive {}: track {:.1}", unit.device(), track),
        StatusUpdate::DriveImage { unit, name } => {
            format!("Drive {}: {}", unit.device(), name.as_deref().unwrap_or("<empty>"))
        }
        StatusUpdate::TapeEnabled(enabled) => format!("Tape: {}", if *enabled { "on" } else { "off" }),
        StatusUpdate::TapeCounter(counter) => format!("Tape: counter {:03}", counter),
        StatusUpdate::TapeMotor(motor) => format!("Tape: motor {}", if *motor { "on" } else { "off" }),
        StatusUpdate::TapeControl(control) => format!("Tape: {}", control),
        StatusUpdate::TapeImage(name) => format!("Tape: {}", name.as_deref().unwrap_or("<empty>")),
        StatusUpdate::Speed(text) => text.trim_end().to_string(),
        StatusUpdate::StatusText(text) => format!("Status: {}", text.as_deref().unwrap_or("")),
        StatusUpdate::Joyport { port, status } => format!("Joy{}: {:05b}", port, status.0 & 0x1F),
        StatusUpdate::JoyportEnabled(enabled) => {
            format!("Joysticks: {}", if *enabled { "shown" } else { "hidden" })
        }
    }
}

/// Prints every status update, prefixed with the window name.
pub struct ConsoleSurface {
    name:  String,
    lines: usize,
}

impl ConsoleSurface {
    pub fn new(name: &str) -> Self {
        Self {
            name:  name.to_string(),
            lines: 0,
        }
    }

    pub fn lines(&self) -> usize {
        self.lines
    }
}

impl StatusSurface for ConsoleSurface {
    fn apply(&mut self, update: &StatusUpdate) {
        self.lines += 1;
        println!("[{}] {}", self.name, describe(update));
    }
}

/// A UI host with nobody in front of it. Confirmations get a fixed answer and file panels are
/// never completed; scripts send `FileSelected` instead.
pub struct ConsoleUi {
    auto_confirm: bool,
}

impl ConsoleUi {
    pub fn new(auto_confirm: bool) -> Self {
        Self { auto_confirm }
    }
}

impl UiHost for ConsoleUi {
    fn error(&mut self, message: &str) {
        eprintln!("Error: {}", message);
    }

    fn message(&mut self, message: &str) {
        println!("{}", message);
    }

    fn confirm(&mut self, title: &str, message: &str) -> bool {
        println!("{}: {} [{}]", title, message, if self.auto_confirm { "yes" } else { "no" });
        self.auto_confirm
    }

    fn show_text(&mut self, title: &str, text: &str) {
        println!("== {} ==\n{}", title, text);
    }

    fn open_file_panel(&mut self, panel: FilePanel, purpose: &FilePurpose) {
        log::info!("open_file_panel(): {:?} panel: {}", panel, purpose.title());
    }

    fn menus_changed(&mut self, checked: &[u32]) {
        log::debug!("menus_changed(): checked items {:?}", checked);
    }

    fn exit_requested(&mut self) {
        log::info!("exit_requested(): shutting down");
    }
}
