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

    frontend_common::dispatch::mod.rs

    The dispatcher drains the command queue once per tick and turns each command
    into a resource change, an emulator control action or a scheduled trap.
    
    Each record is offered to the machine specific handler first. Records it
    does not consume go through a fixed match over well known commands, and
    table-driven menu items are resolved through the resource tables.
*/

mod file_action;
mod info;
mod menu;
mod pause;

use std::{path::PathBuf, time::Duration};

use anyhow::{bail, Result};
use vf_common::{MachineClass, VfHashMap};

pub use pause::PauseState;

use crate::{
    command_queue::{CommandQueue, CommandSender, QueueOverflowPolicy},
    constants::*,
    display_registry::{DisplayRegistry, SurfaceHandle, SurfaceRef},
    emulator_core::{CoreError, EmulatorCore},
    machine_handler::{HandlerContext, MachineHandler, MachineOutcome},
    quicksnap_manager::{QuickSnapError, QuickSnapshotManager},
    resource_tables::{MenuToggle, ResourceTables, TableMatch, ValueList},
    resources::{MemoryResources, ResourceError, ResourceStore},
    status_model::{SpeedDisplayMode, StatusModel},
    trap::{TrapRequest, TrapScheduler},
    types::command::{CommandRecord, FilePanel, FilePurpose, InfoPage, StatusEvent},
    ui_host::UiHost,
};

/// Errors raised while handling a single command. These never leave the dispatcher; they are
/// logged and shown through [UiHost::error].
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("{message}")]
    Core {
        message: &'static str,
        #[source]
        source:  CoreError,
    },
    #[error("{message}")]
    Resource {
        message: String,
        #[source]
        source:  ResourceError,
    },
    #[error(transparent)]
    QuickSnap(#[from] QuickSnapError),
    #[error("{0}")]
    Machine(String),
}

impl DispatchError {
    fn core(message: &'static str) -> impl FnOnce(CoreError) -> DispatchError {
        move |source| DispatchError::Core { message, source }
    }

    fn resource(message: impl Into<String>) -> impl FnOnce(ResourceError) -> DispatchError {
        let message = message.into();
        move |source| DispatchError::Resource { message, source }
    }
}

/// The outcome of one [Dispatcher::dispatch_tick].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickResult {
    pub processed: usize,
    pub dropped: usize,
    /// The user confirmed exit. The front end should shut down.
    pub exit: bool,
}

/// Defaults for the resources the dispatcher owns.
#[derive(Copy, Clone, Debug)]
pub struct UiResourceDefaults {
    pub joystick_display: bool,
    pub confirm_on_exit: bool,
    pub save_resources_on_exit: bool,
}

impl Default for UiResourceDefaults {
    fn default() -> Self {
        Self {
            joystick_display: false,
            confirm_on_exit: true,
            save_resources_on_exit: false,
        }
    }
}

/// Register every resource the dispatcher reads or writes by name.
pub fn register_frontend_resources(res: &mut MemoryResources, defaults: &UiResourceDefaults) {
    res.register_int(RES_JOYSTICK_DISPLAY, defaults.joystick_display as i32);
    res.register_int(RES_CONFIRM_ON_EXIT, defaults.confirm_on_exit as i32);
    res.register_int(RES_SAVE_RESOURCES_ON_EXIT, defaults.save_resources_on_exit as i32);
    res.register_int(RES_DATASETTE, 1);
    res.register_string(RES_AUTOSTART_PRG_DISK_IMAGE, "");
    res.register_string(RES_EVENT_START_SNAPSHOT, "");
    res.register_string(RES_EVENT_END_SNAPSHOT, "");
    res.register_string(RES_EVENT_SNAPSHOT_DIR, "");
    res.register_string(RES_SOUND_RECORD_DEVICE_NAME, "");
    res.register_string(RES_SOUND_RECORD_DEVICE_ARG, "");
    for unit in vf_common::DriveUnit::all() {
        res.register_int(&attach_readonly_resource(unit), 0);
    }
}

pub(crate) fn attach_readonly_resource(unit: vf_common::DriveUnit) -> String {
    format!("{}{}Readonly", RES_ATTACH_READONLY_PREFIX, unit.device())
}

pub struct DispatcherBuilder {
    core: Option<Box<dyn EmulatorCore>>,
    ui: Option<Box<dyn UiHost>>,
    traps: Option<Box<dyn TrapScheduler>>,
    resources: Option<Box<dyn ResourceStore>>,
    machine_handler: Option<Box<dyn MachineHandler>>,
    tables: Option<ResourceTables>,
    machine_class: MachineClass,
    machine_name: String,
    base_dir: PathBuf,
    queue_capacity: usize,
    overflow_policy: QueueOverflowPolicy,
    pause_poll: Duration,
    ui_defaults: UiResourceDefaults,
    info_pages: VfHashMap<InfoPage, String>,
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self {
            core: None,
            ui: None,
            traps: None,
            resources: None,
            machine_handler: None,
            tables: None,
            machine_class: MachineClass::default(),
            machine_name: MachineClass::default().to_string(),
            base_dir: PathBuf::from("."),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            overflow_policy: QueueOverflowPolicy::default(),
            pause_poll: DEFAULT_PAUSE_POLL,
            ui_defaults: UiResourceDefaults::default(),
            info_pages: VfHashMap::default(),
        }
    }
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(&mut self) -> Result<Dispatcher> {
        let Some(core) = self.core.take()
        else {
            bail!("An EmulatorCore is required.");
        };
        let Some(ui) = self.ui.take()
        else {
            bail!("A UiHost is required.");
        };
        let Some(traps) = self.traps.take()
        else {
            bail!("A TrapScheduler is required.");
        };
        let resources = match self.resources.take() {
            Some(resources) => resources,
            None => {
                let mut res = MemoryResources::new();
                register_frontend_resources(&mut res, &self.ui_defaults);
                Box::new(res)
            }
        };

        let mut info_pages = info::default_pages();
        info_pages.extend(self.info_pages.drain());

        log::debug!(
            "build(): machine {} ({}), queue capacity {} ({})",
            self.machine_name,
            self.machine_class,
            self.queue_capacity,
            self.overflow_policy
        );

        let mut dispatcher = Dispatcher {
            queue: CommandQueue::new(self.queue_capacity, self.overflow_policy),
            status: StatusModel::new(),
            registry: DisplayRegistry::new(),
            tables: self.tables.take().unwrap_or_default(),
            quicksnap: QuickSnapshotManager::new(&self.base_dir, &self.machine_name),
            resources,
            core,
            ui,
            traps,
            machine_handler: self.machine_handler.take(),
            machine_class: self.machine_class,
            pending_files: VfHashMap::default(),
            info_pages,
            pause: PauseState::Running,
            pause_poll: self.pause_poll,
            exit: false,
        };
        dispatcher.sync_resources();
        Ok(dispatcher)
    }

    pub fn with_core(mut self, core: Box<dyn EmulatorCore>) -> Self {
        self.core = Some(core);
        self
    }

    pub fn with_ui(mut self, ui: Box<dyn UiHost>) -> Self {
        self.ui = Some(ui);
        self
    }

    pub fn with_trap_scheduler(mut self, traps: Box<dyn TrapScheduler>) -> Self {
        self.traps = Some(traps);
        self
    }

    pub fn with_resources(mut self, resources: Box<dyn ResourceStore>) -> Self {
        self.resources = Some(resources);
        self
    }

    pub fn with_machine_handler(mut self, handler: Box<dyn MachineHandler>) -> Self {
        self.machine_handler = Some(handler);
        self
    }

    pub fn with_tables(mut self, tables: ResourceTables) -> Self {
        self.tables = Some(tables);
        self
    }

    pub fn with_machine(mut self, class: MachineClass, name: &str) -> Self {
        self.machine_class = class;
        self.machine_name = name.to_string();
        self
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn with_queue(mut self, capacity: usize, policy: QueueOverflowPolicy) -> Self {
        self.queue_capacity = capacity;
        self.overflow_policy = policy;
        self
    }

    pub fn with_pause_poll(mut self, poll: Duration) -> Self {
        self.pause_poll = poll;
        self
    }

    /// Defaults used for the built-in resource store. Ignored if a store is supplied.
    pub fn with_ui_defaults(mut self, defaults: UiResourceDefaults) -> Self {
        self.ui_defaults = defaults;
        self
    }

    pub fn with_info_page(mut self, page: InfoPage, text: &str) -> Self {
        self.info_pages.insert(page, text.to_string());
        self
    }
}

pub struct Dispatcher {
    queue: CommandQueue,
    status: StatusModel,
    registry: DisplayRegistry,
    tables: ResourceTables,
    quicksnap: QuickSnapshotManager,

    resources: Box<dyn ResourceStore>,
    core: Box<dyn EmulatorCore>,
    ui: Box<dyn UiHost>,
    traps: Box<dyn TrapScheduler>,
    machine_handler: Option<Box<dyn MachineHandler>>,

    machine_class: MachineClass,
    // The purpose each file panel was last opened for.
    pending_files: VfHashMap<FilePanel, FilePurpose>,
    info_pages: VfHashMap<InfoPage, String>,

    pause: PauseState,
    pause_poll: Duration,
    exit: bool,
}

impl Dispatcher {
    /// A producer handle for the command queue.
    pub fn sender(&self) -> CommandSender {
        self.queue.sender()
    }

    pub fn enqueue(&self, record: CommandRecord) -> bool {
        self.queue.enqueue(record)
    }

    pub fn queue(&self) -> &CommandQueue {
        &self.queue
    }

    pub fn status(&self) -> &StatusModel {
        &self.status
    }

    pub fn registry(&self) -> &DisplayRegistry {
        &self.registry
    }

    pub fn resources(&self) -> &dyn ResourceStore {
        self.resources.as_ref()
    }

    pub fn quicksnapshots(&self) -> &QuickSnapshotManager {
        &self.quicksnap
    }

    pub fn machine_class(&self) -> MachineClass {
        self.machine_class
    }

    pub fn exit_requested(&self) -> bool {
        self.exit
    }

    /// Register a status surface and bring it up to date.
    pub fn register_surface(&mut self, surface: &SurfaceRef) -> SurfaceHandle {
        let handle = self.registry.register(surface);
        self.status.refresh_surface(&self.registry, handle);
        handle
    }

    pub fn unregister_surface(&mut self, handle: SurfaceHandle) -> bool {
        self.registry.unregister(handle)
    }

    /// Redraw every surface from the status model.
    pub fn refresh_all(&self) {
        self.status.refresh_all(&self.registry);
    }

    pub fn register_menu_toggles(&mut self, toggles: &[MenuToggle]) {
        self.tables.register_menu_toggles(toggles);
    }

    pub fn register_value_lists(&mut self, values: &[ValueList]) {
        self.tables.register_value_lists(values);
    }

    pub fn tables_mut(&mut self) -> &mut ResourceTables {
        &mut self.tables
    }

    /// Install the machine specific handler, replacing any previous one.
    pub fn register_machine_specific(&mut self, handler: Box<dyn MachineHandler>) {
        self.machine_handler = Some(handler);
    }

    /// Drain the command queue and handle every record that was queued when the tick began.
    /// Never blocks, and never fails: errors are reported to the user and dispatch moves on.
    pub fn dispatch_tick(&mut self) -> TickResult {
        let dropped = self.queue.take_dropped();
        if dropped > 0 {
            log::warn!("dispatch_tick(): {} command(s) dropped, queue was full", dropped);
        }

        let batch = self.queue.drain();
        let mut result = TickResult {
            dropped,
            ..Default::default()
        };
        for record in batch {
            if self.exit {
                log::debug!("dispatch_tick(): exiting, discarding {:?}", record);
                continue;
            }
            self.dispatch_record(record);
            result.processed += 1;
        }
        result.exit = self.exit;
        result
    }

    fn dispatch_record(&mut self, record: CommandRecord) {
        log::debug!("dispatch_record(): {:?}", record);

        if let Some(handler) = self.machine_handler.as_mut() {
            let mut ctx = HandlerContext {
                machine_class: self.machine_class,
                resources: self.resources.as_mut(),
                core: self.core.as_mut(),
                ui: self.ui.as_mut(),
                status: &mut self.status,
                registry: &self.registry,
            };
            match handler.try_handle(&record, &mut ctx) {
                Some(MachineOutcome::Handled) => return,
                Some(MachineOutcome::Failed(message)) => {
                    self.report(DispatchError::Machine(message));
                    return;
                }
                None => {}
            }
        }

        let vsid = self.machine_class.is_vsid();
        let result = match record {
            CommandRecord::KeyDown(code) => {
                if !vsid {
                    self.core.key_down(code);
                }
                Ok(())
            }
            CommandRecord::KeyUp(code) => {
                if !vsid {
                    self.core.key_up(code);
                }
                Ok(())
            }
            CommandRecord::PasteText(text) => {
                if !vsid && !text.is_empty() {
                    self.core.feed_keyboard_buffer(&text);
                }
                Ok(())
            }
            CommandRecord::Menu(action) => self.handle_menu(action),
            CommandRecord::ResourceSet { name, value } => {
                log::debug!("dispatch_record(): setting resource {} to {}", name, value);
                let result = self
                    .resources
                    .set_value(&name, &value)
                    .map_err(DispatchError::resource(format!("Cannot set resource {}.", name)));
                self.sync_resources();
                result
            }
            CommandRecord::FileSelected { panel, path, purpose } => {
                let purpose = purpose.or_else(|| self.pending_files.remove(&panel));
                match purpose {
                    Some(purpose) => self.handle_file_action(purpose, path),
                    None => {
                        log::warn!(
                            "dispatch_record(): file {} selected with no pending {:?} panel",
                            path.display(),
                            panel
                        );
                        Ok(())
                    }
                }
            }
            CommandRecord::DroppedFile(path) => self
                .core
                .autostart(&path)
                .map_err(DispatchError::core(MSG_CANNOT_AUTOSTART)),
            CommandRecord::Machine(command) => {
                log::debug!("dispatch_record(): unhandled machine command {}", command.what);
                Ok(())
            }
            CommandRecord::Status(event) => {
                self.apply_status(event);
                Ok(())
            }
        };

        if let Err(e) = result {
            self.report(e);
        }
    }

    /// Apply a status change reported by the emulation core.
    pub fn apply_status(&mut self, event: StatusEvent) {
        let registry = &self.registry;
        let status = &mut self.status;
        match event {
            StatusEvent::EnableDrives(mask) => status.enable_drives(registry, mask),
            StatusEvent::DriveLed { unit, pwm1, pwm2 } => status.set_drive_led(registry, unit, pwm1, pwm2),
            StatusEvent::DriveTrack { unit, half_tracks } => status.set_drive_track(registry, unit, half_tracks),
            StatusEvent::DriveImage { unit, path } => status.set_drive_image(registry, unit, path.as_deref()),
            StatusEvent::TapeStatus(enabled) => status.set_tape_status(registry, enabled),
            StatusEvent::TapeMotor(motor) => status.set_tape_motor(registry, motor),
            StatusEvent::TapeControl(control) => status.set_tape_control(registry, control),
            StatusEvent::TapeCounter(counter) => status.set_tape_counter(registry, counter),
            StatusEvent::TapeImage(path) => status.set_tape_image(registry, path.as_deref()),
            StatusEvent::Speed {
                percent,
                framerate,
                warp,
            } => status.set_speed(registry, percent, framerate, SpeedDisplayMode::Warp(warp)),
            StatusEvent::Joyports(ports) => status.set_joyports(registry, &ports),
            StatusEvent::StatusText { text, fade } => status.display_status_text(registry, &text, fade),
            StatusEvent::Recording(recording) => status.display_recording(registry, recording),
            StatusEvent::Playback(playback) => status.display_playback(registry, playback),
            StatusEvent::EventTime { current, total } => status.display_event_time(registry, current, total),
        }
    }

    /// Run a trap previously handed to the [TrapScheduler]. Must be called by the emulation host at
    /// a CPU boundary.
    pub fn run_trap(&mut self, request: TrapRequest) {
        log::debug!("run_trap(): {:?}", request);
        let result = match request {
            TrapRequest::SaveQuickSnapshot => self.save_quicksnapshot_trap(),
            TrapRequest::LoadQuickSnapshot => self.load_quicksnapshot_trap(),
            TrapRequest::SaveSnapshot(path) => self
                .core
                .write_snapshot(&path, true, true)
                .map_err(DispatchError::core(MSG_CANNOT_SAVE_SNAPSHOT)),
            TrapRequest::LoadSnapshot(path) => self
                .core
                .read_snapshot(&path)
                .map_err(DispatchError::core(MSG_CANNOT_LOAD_SNAPSHOT)),
            TrapRequest::Pause => {
                self.pause_trap();
                Ok(())
            }
        };
        if let Err(e) = result {
            self.report(e);
        }
    }

    fn save_quicksnapshot_trap(&mut self) -> Result<(), DispatchError> {
        // Earlier traps in this batch may have written or rotated files since the menu command ran.
        self.quicksnap.scan();
        let path = self.quicksnap.prepare_save()?;
        self.core
            .write_snapshot(&path, false, false)
            .map_err(DispatchError::core(MSG_CANNOT_SAVE_SNAPSHOT))
    }

    fn load_quicksnapshot_trap(&mut self) -> Result<(), DispatchError> {
        self.quicksnap.scan();
        let path = self.quicksnap.load_path()?;
        self.core
            .read_snapshot(&path)
            .map_err(DispatchError::core(MSG_CANNOT_LOAD_SNAPSHOT))
    }

    fn open_file_panel(&mut self, panel: FilePanel, purpose: FilePurpose) {
        log::debug!("open_file_panel(): {:?} panel for {:?}", panel, purpose);
        self.ui.open_file_panel(panel, &purpose);
        self.pending_files.insert(panel, purpose);
    }

    fn resource_flag(&self, name: &str, default: bool) -> bool {
        match self.resources.get_int(name) {
            Ok(value) => value != 0,
            Err(e) => {
                log::trace!("resource_flag(): {}", e);
                default
            }
        }
    }

    /// Bring the status model and menus in line with the resource store.
    fn sync_resources(&mut self) {
        let joystick_display = self.resource_flag(RES_JOYSTICK_DISPLAY, false);
        if joystick_display != self.status.joyport_display() {
            self.status.enable_joyport_display(&self.registry, joystick_display);
        }
        let datasette = self.resource_flag(RES_DATASETTE, false);
        self.status
            .set_datasette_resource(&self.registry, self.machine_class, datasette);

        let checked = self
            .tables
            .checked_items(self.resources.as_ref(), self.machine_class.is_vsid());
        self.ui.menus_changed(&checked);
    }

    fn apply_table_match(&mut self, found: TableMatch) -> Result<(), DispatchError> {
        log::debug!("apply_table_match(): {:?}", found);
        let name = found.resource_name().to_string();
        let result = match &found {
            TableMatch::Toggle { name, .. } => self.resources.toggle(name).map(|_| ()),
            TableMatch::Value { name, value, .. } => self.resources.set_int(name, *value),
            TableMatch::String { name, value, .. } => self.resources.set_string(name, value),
        };
        self.sync_resources();
        result.map_err(DispatchError::resource(format!("Cannot set resource {}.", name)))
    }

    fn report(&mut self, error: DispatchError) {
        match std::error::Error::source(&error) {
            Some(source) => log::error!("{}: {}", error, source),
            None => log::error!("{}", error),
        }
        self.ui.error(&error.to_string());
    }
}
