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

    frontend_common::tests::common::mod.rs

    Recording collaborators shared by the integration tests.
*/

#![allow(dead_code)]

use std::{
    cell::RefCell,
    fs,
    path::Path,
    rc::Rc,
    sync::{Arc, RwLock},
};

use vf_common::{DatasetteControl, DriveUnit, MachineClass};
use vf_frontend_common::{
    emulator_core::{CoreError, FliplistOp},
    trap::{trap_channel, CoreRequest, TrapReceiver},
    types::command::{FilePanel, FilePurpose, ResetMode},
    CommandRecord,
    Dispatcher,
    DispatcherBuilder,
    EmulatorCore,
    StatusSurface,
    StatusUpdate,
    SurfaceRef,
    TickResult,
    UiHost,
};

#[derive(Default)]
pub struct CoreLog {
    pub calls: Vec<String>,
    pub writes: usize,
    pub fail_attach: bool,
    pub netplay: bool,
}

pub struct MockCore {
    pub log: Rc<RefCell<CoreLog>>,
}

impl MockCore {
    fn record(&self, call: String) {
        self.log.borrow_mut().calls.push(call);
    }
}

impl EmulatorCore for MockCore {
    fn reset(&mut self, mode: ResetMode) {
        self.record(format!("reset:{:?}", mode));
    }
    fn attach_disk(&mut self, unit: DriveUnit, path: &Path) -> Result<(), CoreError> {
        if self.log.borrow().fail_attach {
            return Err(CoreError::Failed("bad image".to_string()));
        }
        self.record(format!("attach_disk:{}:{}", unit.device(), path.display()));
        Ok(())
    }
    fn detach_disk(&mut self, unit: DriveUnit) {
        self.record(format!("detach_disk:{}", unit.device()));
    }
    fn attach_tape(&mut self, path: &Path) -> Result<(), CoreError> {
        if self.log.borrow().fail_attach {
            return Err(CoreError::Failed("bad image".to_string()));
        }
        self.record(format!("attach_tape:{}", path.display()));
        Ok(())
    }
    fn detach_tape(&mut self) {
        self.record("detach_tape".to_string());
    }
    fn autostart(&mut self, path: &Path) -> Result<(), CoreError> {
        self.record(format!("autostart:{}", path.display()));
        Ok(())
    }
    fn read_snapshot(&mut self, path: &Path) -> Result<(), CoreError> {
        let contents = fs::read_to_string(path)?;
        self.record(format!("read_snapshot:{}", contents));
        Ok(())
    }
    fn write_snapshot(&mut self, path: &Path, save_roms: bool, save_disks: bool) -> Result<(), CoreError> {
        let n = {
            let mut log = self.log.borrow_mut();
            log.writes += 1;
            log.writes
        };
        fs::write(path, format!("save{}", n))?;
        self.record(format!("write_snapshot:{}:{}", save_roms, save_disks));
        Ok(())
    }
    fn datasette_control(&mut self, control: DatasetteControl) {
        self.record(format!("datasette:{:?}", control));
    }
    fn fliplist(&mut self, op: FliplistOp, unit: DriveUnit) {
        self.record(format!("fliplist:{:?}:{}", op, unit.device()));
    }
    fn key_down(&mut self, code: u32) {
        self.record(format!("key_down:{}", code));
    }
    fn key_up(&mut self, code: u32) {
        self.record(format!("key_up:{}", code));
    }
    fn feed_keyboard_buffer(&mut self, text: &str) {
        self.record(format!("feed:{}", text));
    }
    fn netplay_connected(&self) -> bool {
        self.log.borrow().netplay
    }
    fn advance_frame(&mut self) {
        self.record("advance_frame".to_string());
    }
}

#[derive(Default)]
pub struct UiLog {
    pub errors: Vec<String>,
    pub messages: Vec<String>,
    pub texts: Vec<String>,
    pub panels: Vec<(FilePanel, FilePurpose)>,
    pub confirm_answer: bool,
    pub confirms: usize,
    pub menu_refreshes: usize,
    pub exit: bool,
}

pub struct MockUi {
    pub log: Rc<RefCell<UiLog>>,
}

impl UiHost for MockUi {
    fn error(&mut self, message: &str) {
        self.log.borrow_mut().errors.push(message.to_string());
    }
    fn message(&mut self, message: &str) {
        self.log.borrow_mut().messages.push(message.to_string());
    }
    fn confirm(&mut self, _title: &str, _message: &str) -> bool {
        let mut log = self.log.borrow_mut();
        log.confirms += 1;
        log.confirm_answer
    }
    fn show_text(&mut self, title: &str, _text: &str) {
        self.log.borrow_mut().texts.push(title.to_string());
    }
    fn open_file_panel(&mut self, panel: FilePanel, purpose: &FilePurpose) {
        self.log.borrow_mut().panels.push((panel, purpose.clone()));
    }
    fn menus_changed(&mut self, _checked: &[u32]) {
        self.log.borrow_mut().menu_refreshes += 1;
    }
    fn exit_requested(&mut self) {
        self.log.borrow_mut().exit = true;
    }
}

#[derive(Default)]
pub struct RecordingSurface {
    pub updates: Vec<StatusUpdate>,
}

impl StatusSurface for RecordingSurface {
    fn apply(&mut self, update: &StatusUpdate) {
        self.updates.push(update.clone());
    }
}

pub struct Harness {
    pub dispatcher: Dispatcher,
    pub core: Rc<RefCell<CoreLog>>,
    pub ui: Rc<RefCell<UiLog>>,
    pub traps: TrapReceiver,
    pub surface: Arc<RwLock<RecordingSurface>>,
}

impl Harness {
    pub fn new(class: MachineClass) -> Self {
        Self::with_builder(class, |b| b)
    }

    /// Build a harness, letting the caller adjust the builder before the mocks are attached.
    pub fn with_builder(class: MachineClass, f: impl FnOnce(DispatcherBuilder) -> DispatcherBuilder) -> Self {
        let core = Rc::new(RefCell::new(CoreLog::default()));
        let ui = Rc::new(RefCell::new(UiLog {
            confirm_answer: true,
            ..Default::default()
        }));
        let (trap_queue, traps) = trap_channel();

        let builder = DispatcherBuilder::new()
            .with_machine(class, &class.to_string())
            .with_pause_poll(std::time::Duration::ZERO);
        let mut dispatcher = f(builder)
            .with_core(Box::new(MockCore { log: core.clone() }))
            .with_ui(Box::new(MockUi { log: ui.clone() }))
            .with_trap_scheduler(Box::new(trap_queue))
            .build()
            .unwrap();

        let surface = Arc::new(RwLock::new(RecordingSurface::default()));
        let surface_ref: SurfaceRef = surface.clone();
        dispatcher.register_surface(&surface_ref);
        surface.write().unwrap().updates.clear();

        Self {
            dispatcher,
            core,
            ui,
            traps,
            surface,
        }
    }

    pub fn send(&self, record: CommandRecord) {
        assert!(self.dispatcher.enqueue(record));
    }

    pub fn tick(&mut self) -> TickResult {
        self.dispatcher.dispatch_tick()
    }

    /// Run every pending trap, including traps scheduled by other traps. Returns the number of
    /// traps run.
    pub fn run_traps(&mut self) -> usize {
        let mut count = 0;
        loop {
            let requests = self.traps.drain();
            if requests.is_empty() {
                return count;
            }
            for request in requests {
                if let CoreRequest::Trap(trap) = request {
                    self.dispatcher.run_trap(trap);
                    count += 1;
                }
            }
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.core.borrow().calls.clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.ui.borrow().errors.clone()
    }

    pub fn updates(&self) -> Vec<StatusUpdate> {
        self.surface.read().unwrap().updates.clone()
    }
}
