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

    frontend_common::dispatch::file_action.rs

    Apply a completed file panel selection according to the purpose the panel
    was opened for.
*/

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use vf_common::util::file_basename;

use super::{DispatchError, Dispatcher};
use crate::{
    constants::*,
    trap::TrapRequest,
    types::command::{CommandRecord, FilePurpose, MachineCommand, SoundRecordFormat},
};

/// Append `.ext` to a path unless it already carries that extension.
pub(crate) fn add_extension(path: &Path, ext: &str) -> PathBuf {
    match path.extension() {
        Some(e) if e.eq_ignore_ascii_case(ext) => path.to_path_buf(),
        _ => {
            let mut name = OsString::from(path.as_os_str());
            name.push(".");
            name.push(ext);
            PathBuf::from(name)
        }
    }
}

impl Dispatcher {
    pub(super) fn handle_file_action(&mut self, purpose: FilePurpose, path: PathBuf) -> Result<(), DispatchError> {
        log::debug!("handle_file_action(): {:?} <- {}", purpose, path.display());
        match purpose {
            FilePurpose::Disk(unit) => self
                .core
                .attach_disk(unit, &path)
                .map_err(DispatchError::core(MSG_CANNOT_ATTACH)),
            FilePurpose::Tape => self
                .core
                .attach_tape(&path)
                .map_err(DispatchError::core(MSG_CANNOT_ATTACH)),
            FilePurpose::Autostart => self
                .core
                .autostart(&path)
                .map_err(DispatchError::core(MSG_CANNOT_AUTOSTART)),
            FilePurpose::AutostartDiskImage => {
                self.set_string_resource(RES_AUTOSTART_PRG_DISK_IMAGE, &path.to_string_lossy())
            }
            FilePurpose::SnapshotLoad => {
                self.traps.schedule_trap(TrapRequest::LoadSnapshot(path));
                Ok(())
            }
            FilePurpose::SnapshotSave => {
                self.traps.schedule_trap(TrapRequest::SaveSnapshot(path));
                Ok(())
            }
            FilePurpose::EventSnapshotStart => {
                let name = file_basename(&path).unwrap_or_default();
                self.set_string_resource(RES_EVENT_START_SNAPSHOT, &name)
            }
            FilePurpose::EventSnapshotEnd => {
                let name = file_basename(&path).unwrap_or_default();
                let dir = path
                    .parent()
                    .map(|p| p.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.set_string_resource(RES_EVENT_END_SNAPSHOT, &name)?;
                self.set_string_resource(RES_EVENT_SNAPSHOT_DIR, &dir)
            }
            FilePurpose::SoundRecord(format) => self.start_sound_record(&path, format),
            FilePurpose::Resource(name) => self.set_string_resource(&name, &path.to_string_lossy()),
            FilePurpose::Machine { what, value } => {
                // Handled on a later tick by the machine specific handler.
                let record = CommandRecord::Machine(MachineCommand {
                    what,
                    value,
                    path: Some(path),
                });
                if !self.queue.enqueue(record) {
                    log::warn!("handle_file_action(): queue full, machine command {} dropped", what);
                    return Err(DispatchError::Machine(MSG_CANNOT_HANDLE_FILE.to_string()));
                }
                Ok(())
            }
        }
    }

    fn start_sound_record(&mut self, path: &Path, format: SoundRecordFormat) -> Result<(), DispatchError> {
        let device = format.device_name();
        let target = add_extension(path, device);
        self.set_string_resource(RES_SOUND_RECORD_DEVICE_ARG, &target.to_string_lossy())?;
        self.set_string_resource(RES_SOUND_RECORD_DEVICE_NAME, device)?;
        self.status
            .display_status_text(&self.registry, MSG_SOUND_RECORD_STARTED, true);
        Ok(())
    }

    fn set_string_resource(&mut self, name: &str, value: &str) -> Result<(), DispatchError> {
        log::debug!("set_string_resource(): {} = \"{}\"", name, value);
        let result = self
            .resources
            .set_string(name, value)
            .map_err(DispatchError::resource(format!("Cannot set resource {}.", name)));
        self.sync_resources();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_added_once() {
        assert_eq!(add_extension(Path::new("/tmp/tune"), "wav"), PathBuf::from("/tmp/tune.wav"));
        assert_eq!(add_extension(Path::new("/tmp/tune.WAV"), "wav"), PathBuf::from("/tmp/tune.WAV"));
        assert_eq!(add_extension(Path::new("/tmp/tune.aiff"), "wav"), PathBuf::from("/tmp/tune.aiff.wav"));
    }
}
