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

    vf_headless::sim_machine.rs

    A stand-in for the emulation core. It keeps just enough machine state to
    exercise the dispatcher, and reports status changes back through the
    command queue the way a real core thread would.
*/

use std::{
    cell::RefCell,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use vf_common::{DatasetteControl, DriveUnit, MachineClass, TapeControl, DRIVE_NUM};
use vf_frontend_common::{
    emulator_core::{CoreError, FliplistOp},
    types::command::ResetMode,
    CommandRecord,
    CommandSender,
    EmulatorCore,
    StatusEvent,
};

pub const SNAPSHOT_MAGIC: &str = "VICE Snapshot File";
pub const FRAMES_PER_SECOND: u32 = 50;
/// Speed is reported to the status bar this often.
pub const SPEED_REPORT_FRAMES: u32 = 10;

const DISK_EXTENSIONS: [&str; 6] = ["d64", "d71", "d80", "d81", "g64", "x64"];
const TAPE_EXTENSIONS: [&str; 2] = ["tap", "t64"];
const PROGRAM_EXTENSIONS: [&str; 2] = ["prg", "p00"];

const LED_ON_PWM: u32 = 1000;
const DIRECTORY_HALF_TRACK: u32 = 36;

fn has_extension(path: &Path, list: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| list.iter().any(|l| e.eq_ignore_ascii_case(l)))
}

#[derive(Default)]
pub struct SimMachine {
    class: MachineClass,
    sender: Option<CommandSender>,
    frame: u64,
    drives: [Option<PathBuf>; DRIVE_NUM],
    drive_busy: [u32; DRIVE_NUM],
    fliplist: Vec<PathBuf>,
    flip_index: usize,
    tape: Option<PathBuf>,
    tape_control: TapeControl,
    tape_counter: u32,
    cartridge: Option<PathBuf>,
    tune: Option<(PathBuf, i32)>,
    keys_down: Vec<u32>,
    keyboard_buffer: String,
    warp: bool,
    recording: bool,
    playing: bool,
    event_frames: u64,
}

impl SimMachine {
    pub fn new(class: MachineClass) -> Self {
        Self {
            class,
            ..Default::default()
        }
    }

    /// Connect the machine to the dispatcher's command queue. Status changes are dropped until this
    /// is called.
    pub fn set_sender(&mut self, sender: CommandSender) {
        self.sender = Some(sender);
    }

    fn post(&self, event: StatusEvent) {
        if let Some(sender) = &self.sender {
            if !sender.enqueue(CommandRecord::Status(event)) {
                log::warn!("post(): status queue full");
            }
        }
    }

    pub fn class(&self) -> MachineClass {
        self.class
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn drive_image(&self, unit: DriveUnit) -> Option<&Path> {
        self.drives[unit.idx()].as_deref()
    }

    pub fn tape_image(&self) -> Option<&Path> {
        self.tape.as_deref()
    }

    pub fn cartridge(&self) -> Option<&Path> {
        self.cartridge.as_deref()
    }

    pub fn tune(&self) -> Option<(&Path, i32)> {
        self.tune.as_ref().map(|(p, n)| (p.as_path(), *n))
    }

    pub fn keyboard_buffer(&self) -> &str {
        &self.keyboard_buffer
    }

    pub fn keys_down(&self) -> &[u32] {
        &self.keys_down
    }

    pub fn set_warp(&mut self, warp: bool) {
        self.warp = warp;
    }

    fn drive_mask(&self) -> u8 {
        self.drives
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_some())
            .fold(0, |mask, (i, _)| mask | (1 << i))
    }

    /// Run one emulated frame.
    pub fn run_frame(&mut self) {
        self.frame += 1;

        for idx in 0..DRIVE_NUM {
            if self.drive_busy[idx] > 0 {
                self.drive_busy[idx] -= 1;
                if self.drive_busy[idx] == 0 {
                    self.post(StatusEvent::DriveLed {
                        unit: idx,
                        pwm1: 0,
                        pwm2: 0,
                    });
                }
            }
        }

        if self.tape_control == TapeControl::Start && self.frame % FRAMES_PER_SECOND as u64 == 0 {
            self.tape_counter = (self.tape_counter + 1) % 1000;
            self.post(StatusEvent::TapeCounter(self.tape_counter));
        }

        if self.recording || self.playing {
            self.event_frames += 1;
            if self.event_frames % FRAMES_PER_SECOND as u64 == 0 {
                let seconds = (self.event_frames / FRAMES_PER_SECOND as u64) as u32;
                let total = if self.playing { seconds.max(1) * 2 } else { 0 };
                self.post(StatusEvent::EventTime {
                    current: seconds,
                    total,
                });
            }
        }

        if self.frame % SPEED_REPORT_FRAMES as u64 == 0 {
            let (percent, framerate) = if self.warp {
                (800.0, (FRAMES_PER_SECOND * 8) as f64)
            }
            else {
                (100.0, FRAMES_PER_SECOND as f64)
            };
            self.post(StatusEvent::Speed {
                percent,
                framerate,
                warp: self.warp,
            });
        }
    }

    fn set_drive(&mut self, unit: DriveUnit, image: Option<PathBuf>) {
        self.drives[unit.idx()] = image;
        self.post(StatusEvent::EnableDrives(self.drive_mask()));
        self.post(StatusEvent::DriveImage {
            unit: unit.idx(),
            path: self.drives[unit.idx()].clone(),
        });
        if self.drives[unit.idx()].is_some() {
            // Reading the directory.
            self.drive_busy[unit.idx()] = 2;
            self.post(StatusEvent::DriveLed {
                unit: unit.idx(),
                pwm1: LED_ON_PWM,
                pwm2: 0,
            });
            self.post(StatusEvent::DriveTrack {
                unit: unit.idx(),
                half_tracks: DIRECTORY_HALF_TRACK,
            });
        }
    }

    fn set_tape_control(&mut self, control: TapeControl) {
        self.tape_control = control;
        self.post(StatusEvent::TapeControl(control));
        self.post(StatusEvent::TapeMotor(control == TapeControl::Start));
    }

    pub fn attach_cartridge(&mut self, path: &Path) -> Result<(), CoreError> {
        if !has_extension(path, &["crt", "bin"]) {
            return Err(CoreError::Failed(format!("{} is not a cartridge image", path.display())));
        }
        log::info!("attach_cartridge(): {}", path.display());
        self.cartridge = Some(path.to_path_buf());
        Ok(())
    }

    pub fn load_tune(&mut self, path: &Path, tune: i32) -> Result<(), CoreError> {
        if !has_extension(path, &["sid", "psid"]) {
            return Err(CoreError::Failed(format!("{} is not a SID tune", path.display())));
        }
        log::info!("load_tune(): {} tune {}", path.display(), tune);
        self.tune = Some((path.to_path_buf(), tune));
        Ok(())
    }

    fn snapshot_text(&self, save_roms: bool, save_disks: bool) -> String {
        format!(
            "{}\nmachine={}\nframe={}\nroms={}\ndisks={}\n",
            SNAPSHOT_MAGIC, self.class, self.frame, save_roms, save_disks
        )
    }

    fn restore_snapshot(&mut self, text: &str) -> Result<(), CoreError> {
        let mut lines = text.lines();
        if lines.next() != Some(SNAPSHOT_MAGIC) {
            return Err(CoreError::Failed("not a snapshot file".to_string()));
        }
        for line in lines {
            match line.split_once('=') {
                Some(("machine", class)) if class != self.class.to_string() => {
                    return Err(CoreError::Failed(format!("snapshot is for a {} machine", class)));
                }
                Some(("frame", frame)) => {
                    self.frame = frame
                        .parse()
                        .map_err(|_| CoreError::Failed(format!("bad frame count: {}", frame)))?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// The [EmulatorCore] handed to the dispatcher. The host keeps its own handle to the same machine
/// to run frames.
pub struct SimCore(pub Rc<RefCell<SimMachine>>);

impl EmulatorCore for SimCore {
    fn reset(&mut self, mode: ResetMode) {
        let mut m = self.0.borrow_mut();
        log::info!("reset(): {:?} reset at frame {}", mode, m.frame);
        m.frame = 0;
        m.keys_down.clear();
        m.keyboard_buffer.clear();
        if mode == ResetMode::Hard {
            m.cartridge = None;
        }
    }

    fn attach_disk(&mut self, unit: DriveUnit, path: &Path) -> Result<(), CoreError> {
        if !has_extension(path, &DISK_EXTENSIONS) {
            return Err(CoreError::Failed(format!("{} is not a disk image", path.display())));
        }
        log::info!("attach_disk(): unit {} <- {}", unit.device(), path.display());
        self.0.borrow_mut().set_drive(unit, Some(path.to_path_buf()));
        Ok(())
    }

    fn detach_disk(&mut self, unit: DriveUnit) {
        log::info!("detach_disk(): unit {}", unit.device());
        self.0.borrow_mut().set_drive(unit, None);
    }

    fn attach_tape(&mut self, path: &Path) -> Result<(), CoreError> {
        if !has_extension(path, &TAPE_EXTENSIONS) {
            return Err(CoreError::Failed(format!("{} is not a tape image", path.display())));
        }
        let mut m = self.0.borrow_mut();
        m.tape = Some(path.to_path_buf());
        m.tape_counter = 0;
        m.post(StatusEvent::TapeStatus(true));
        m.post(StatusEvent::TapeImage(m.tape.clone()));
        m.post(StatusEvent::TapeCounter(0));
        Ok(())
    }

    fn detach_tape(&mut self) {
        let mut m = self.0.borrow_mut();
        m.tape = None;
        m.set_tape_control(TapeControl::Stop);
        m.post(StatusEvent::TapeStatus(false));
        m.post(StatusEvent::TapeImage(None));
    }

    fn autostart(&mut self, path: &Path) -> Result<(), CoreError> {
        log::info!("autostart(): {}", path.display());
        if has_extension(path, &DISK_EXTENSIONS) {
            self.attach_disk(DriveUnit::default(), path)?;
        }
        else if has_extension(path, &TAPE_EXTENSIONS) {
            self.attach_tape(path)?;
            self.datasette_control(DatasetteControl::Start);
        }
        else if !has_extension(path, &PROGRAM_EXTENSIONS) {
            return Err(CoreError::Unsupported("unknown file type"));
        }
        self.feed_keyboard_buffer("RUN\r");
        Ok(())
    }

    fn read_snapshot(&mut self, path: &Path) -> Result<(), CoreError> {
        let text = fs::read_to_string(path)?;
        self.0.borrow_mut().restore_snapshot(&text)?;
        log::info!("read_snapshot(): restored {}", path.display());
        Ok(())
    }

    fn write_snapshot(&mut self, path: &Path, save_roms: bool, save_disks: bool) -> Result<(), CoreError> {
        let text = self.0.borrow().snapshot_text(save_roms, save_disks);
        fs::write(path, text)?;
        log::info!("write_snapshot(): wrote {}", path.display());
        Ok(())
    }

    fn datasette_control(&mut self, control: DatasetteControl) {
        let mut m = self.0.borrow_mut();
        if m.tape.is_none() && control != DatasetteControl::ResetCounter {
            log::debug!("datasette_control(): no tape attached");
            return;
        }
        match control {
            DatasetteControl::Stop => m.set_tape_control(TapeControl::Stop),
            DatasetteControl::Start => m.set_tape_control(TapeControl::Start),
            DatasetteControl::Forward => m.set_tape_control(TapeControl::Forward),
            DatasetteControl::Rewind => m.set_tape_control(TapeControl::Rewind),
            DatasetteControl::Record => m.set_tape_control(TapeControl::Record),
            DatasetteControl::Reset => {
                m.set_tape_control(TapeControl::Stop);
                m.tape_counter = 0;
                m.post(StatusEvent::TapeCounter(0));
            }
            DatasetteControl::ResetCounter => {
                m.tape_counter = 0;
                m.post(StatusEvent::TapeCounter(0));
            }
        }
    }

    fn fliplist(&mut self, op: FliplistOp, unit: DriveUnit) {
        let mut m = self.0.borrow_mut();
        match op {
            FliplistOp::Add => {
                if let Some(image) = m.drives[unit.idx()].clone() {
                    if !m.fliplist.contains(&image) {
                        m.fliplist.push(image);
                    }
                }
            }
            FliplistOp::Remove => {
                if let Some(image) = m.drives[unit.idx()].clone() {
                    m.fliplist.retain(|p| *p != image);
                    m.flip_index = 0;
                }
            }
            FliplistOp::Next | FliplistOp::Previous => {
                let len = m.fliplist.len();
                if len == 0 {
                    return;
                }
                m.flip_index = match op {
                    FliplistOp::Next => (m.flip_index + 1) % len,
                    _ => (m.flip_index + len - 1) % len,
                };
                let image = m.fliplist[m.flip_index].clone();
                m.set_drive(unit, Some(image));
            }
        }
        log::debug!("fliplist(): {:?} -> {} entries", op, m.fliplist.len());
    }

    fn key_down(&mut self, code: u32) {
        let mut m = self.0.borrow_mut();
        if !m.keys_down.contains(&code) {
            m.keys_down.push(code);
        }
    }

    fn key_up(&mut self, code: u32) {
        self.0.borrow_mut().keys_down.retain(|k| *k != code);
    }

    fn feed_keyboard_buffer(&mut self, text: &str) {
        self.0.borrow_mut().keyboard_buffer.push_str(text);
    }

    fn event_recording(&self) -> bool {
        self.0.borrow().recording
    }

    fn event_playing(&self) -> bool {
        self.0.borrow().playing
    }

    fn event_record(&mut self, start: bool) -> Result<(), CoreError> {
        let mut m = self.0.borrow_mut();
        if start && m.playing {
            return Err(CoreError::Failed("playback in progress".to_string()));
        }
        m.recording = start;
        m.event_frames = 0;
        m.post(StatusEvent::Recording(start));
        Ok(())
    }

    fn event_playback(&mut self, start: bool) -> Result<(), CoreError> {
        let mut m = self.0.borrow_mut();
        if start && m.recording {
            return Err(CoreError::Failed("recording in progress".to_string()));
        }
        m.playing = start;
        m.event_frames = 0;
        m.post(StatusEvent::Playback(start));
        Ok(())
    }

    fn advance_frame(&mut self) {
        self.0.borrow_mut().run_frame();
    }

    fn monitor(&mut self) {
        log::info!("monitor(): no monitor in the headless front end");
    }
}
