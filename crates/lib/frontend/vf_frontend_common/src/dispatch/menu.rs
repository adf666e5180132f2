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

    frontend_common::dispatch::menu.rs

    Handling of well known menu actions.
*/

use vf_common::DriveUnit;

use super::{attach_readonly_resource, DispatchError, Dispatcher};
use crate::{
    constants::*,
    emulator_core::FliplistOp,
    trap::TrapRequest,
    types::command::{FilePanel, FilePurpose, MenuAction},
};

impl Dispatcher {
    pub(super) fn handle_menu(&mut self, action: MenuAction) -> Result<(), DispatchError> {
        match action {
            MenuAction::ExitRequested => self.exit_flow(),
            MenuAction::Reset(mode) => {
                log::info!("handle_menu(): {:?} reset", mode);
                self.core.reset(mode);
            }
            MenuAction::Autostart => self.open_file_panel(FilePanel::Open, FilePurpose::Autostart),
            MenuAction::AutostartDiskImageSelect => {
                self.open_file_panel(FilePanel::Open, FilePurpose::AutostartDiskImage)
            }
            MenuAction::AttachDisk(unit) => self.open_file_panel(FilePanel::Open, FilePurpose::Disk(unit)),
            MenuAction::DetachDisk(unit) => self.core.detach_disk(unit),
            MenuAction::AttachTape => self.open_file_panel(FilePanel::Open, FilePurpose::Tape),
            MenuAction::DetachTape => self.core.detach_tape(),
            MenuAction::FlipAdd => self.core.fliplist(FliplistOp::Add, DriveUnit::default()),
            MenuAction::FlipRemove => self.core.fliplist(FliplistOp::Remove, DriveUnit::default()),
            MenuAction::FlipNext => self.core.fliplist(FliplistOp::Next, DriveUnit::default()),
            MenuAction::FlipPrevious => self.core.fliplist(FliplistOp::Previous, DriveUnit::default()),
            MenuAction::Datasette(control) => self.core.datasette_control(control),
            MenuAction::ToggleDatasette => {
                let result = self.resources.toggle(RES_DATASETTE).map(|_| ());
                self.sync_resources();
                result.map_err(DispatchError::resource(format!("Cannot set resource {}.", RES_DATASETTE)))?;
            }
            MenuAction::SnapshotLoad => self.open_file_panel(FilePanel::Open, FilePurpose::SnapshotLoad),
            MenuAction::SnapshotSave => self.open_file_panel(FilePanel::Save, FilePurpose::SnapshotSave),
            MenuAction::LoadQuick => {
                self.quicksnap.scan();
                if self.quicksnap.count() > 0 {
                    self.traps.schedule_trap(TrapRequest::LoadQuickSnapshot);
                }
                else {
                    log::debug!("handle_menu(): no quick snapshots to load");
                }
            }
            MenuAction::SaveQuick => {
                self.quicksnap.scan();
                self.traps.schedule_trap(TrapRequest::SaveQuickSnapshot);
            }
            MenuAction::NetplayServer => self
                .core
                .netplay_start_server()
                .map_err(DispatchError::core("Cannot start netplay server."))?,
            MenuAction::NetplayClient => self
                .core
                .netplay_connect_client()
                .map_err(DispatchError::core("Cannot connect to netplay server."))?,
            MenuAction::NetplayDisconnect => self.core.netplay_disconnect(),
            MenuAction::EventToggleRecord => {
                let start = !self.core.event_recording();
                self.core
                    .event_record(start)
                    .map_err(DispatchError::core("Cannot toggle event recording."))?;
            }
            MenuAction::EventTogglePlayback => {
                let start = !self.core.event_playing();
                self.core
                    .event_playback(start)
                    .map_err(DispatchError::core("Cannot toggle event playback."))?;
            }
            MenuAction::EventSetMilestone => self.core.event_set_milestone(),
            MenuAction::EventResetMilestone => self.core.event_reset_milestone(),
            MenuAction::EventSnapshotStart => {
                self.open_file_panel(FilePanel::Save, FilePurpose::EventSnapshotStart)
            }
            MenuAction::EventSnapshotEnd => self.open_file_panel(FilePanel::Save, FilePurpose::EventSnapshotEnd),
            MenuAction::Monitor => self.core.monitor(),
            MenuAction::Pause => self.pause_emulation(!self.is_paused()),
            MenuAction::SingleFrameAdvance => {
                if self.is_paused() {
                    self.core.advance_frame();
                }
            }
            MenuAction::SoundRecord(format) => {
                self.resources
                    .set_string(RES_SOUND_RECORD_DEVICE_NAME, "")
                    .map_err(DispatchError::resource("Cannot reset sound recording device."))?;
                self.open_file_panel(FilePanel::Save, FilePurpose::SoundRecord(format));
            }
            MenuAction::SoundRecordStop => {
                self.resources
                    .set_string(RES_SOUND_RECORD_DEVICE_NAME, "")
                    .map_err(DispatchError::resource("Cannot stop sound recording."))?;
                self.status
                    .display_status_text(&self.registry, MSG_MEDIA_RECORD_STOPPED, true);
            }
            MenuAction::SettingsLoad => {
                let result = self.resources.load();
                self.sync_resources();
                result.map_err(DispatchError::resource(MSG_CANNOT_LOAD_SETTINGS))?;
            }
            MenuAction::SettingsSave => {
                let result = self.resources.save();
                if let Err(e) = self.core.save_fliplist() {
                    log::warn!("handle_menu(): {}: {}", MSG_CANNOT_SAVE_FLIPLIST, e);
                }
                result.map_err(DispatchError::resource(MSG_CANNOT_SAVE_SETTINGS))?;
            }
            MenuAction::SettingsDefault => {
                let result = self.resources.set_defaults();
                self.sync_resources();
                result.map_err(DispatchError::resource(MSG_CANNOT_RESTORE_DEFAULTS))?;
            }
            MenuAction::ToggleAttachReadonly(unit) => {
                let name = attach_readonly_resource(unit);
                let result = self.resources.toggle(&name).map(|_| ());
                self.sync_resources();
                result.map_err(DispatchError::resource(format!("Cannot set resource {}.", name)))?;
            }
            MenuAction::SelectResourceFile { resource, panel } => {
                self.open_file_panel(panel, FilePurpose::Resource(resource))
            }
            MenuAction::ShowInfo(page) => self.show_info(page),
            MenuAction::Item(item_id) => match self.tables.lookup(item_id, self.machine_class.is_vsid()) {
                Some(found) => self.apply_table_match(found)?,
                None => log::trace!("handle_menu(): no table entry for item {}", item_id),
            },
        }
        Ok(())
    }

    fn exit_flow(&mut self) {
        if self.resource_flag(RES_CONFIRM_ON_EXIT, true) {
            self.traps.suspend_speed_eval();
            if !self.ui.confirm("Exit", MSG_CONFIRM_EXIT) {
                log::debug!("exit_flow(): exit cancelled");
                return;
            }
        }
        if self.resource_flag(RES_SAVE_RESOURCES_ON_EXIT, false) {
            if let Err(e) = self.resources.save() {
                self.report(DispatchError::Resource {
                    message: MSG_CANNOT_SAVE_SETTINGS.to_string(),
                    source:  e,
                });
            }
        }
        log::info!("exit_flow(): exiting");
        self.exit = true;
        self.ui.exit_requested();
    }
}
