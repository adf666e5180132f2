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

    frontend_common::types::command.rs

    Command records produced by windowing layers.
*/

//! [CommandRecord] is the unit of work produced by a windowing layer and consumed by the
//! [Dispatcher](crate::dispatch::Dispatcher). Front ends translate native input events, menu
//! selections and file dialog completions into command records and push them onto the
//! [CommandQueue](crate::command_queue::CommandQueue).

use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use serde_derive::Deserialize;
use vf_common::{DatasetteControl, DriveUnit, TapeControl, JOYPORT_SLOTS};

/// A typed resource value.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ResourceValue {
    Int(i32),
    Str(String),
}

impl Display for ResourceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceValue::Int(i) => write!(f, "{}", i),
            ResourceValue::Str(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// Which kind of file panel a selection came from. Open and save panels remember their pending
/// purpose independently, so one of each may be outstanding at a time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub enum FilePanel {
    Open,
    Save,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub enum SoundRecordFormat {
    Aiff,
    Iff,
    Mp3,
    Flac,
    Vorbis,
    Voc,
    Wav,
}

impl SoundRecordFormat {
    /// The sound device name, which doubles as the file extension.
    pub fn device_name(&self) -> &'static str {
        match self {
            SoundRecordFormat::Aiff => "aiff",
            SoundRecordFormat::Iff => "iff",
            SoundRecordFormat::Mp3 => "mp3",
            SoundRecordFormat::Flac => "flac",
            SoundRecordFormat::Vorbis => "ogg",
            SoundRecordFormat::Voc => "voc",
            SoundRecordFormat::Wav => "wav",
        }
    }
}

/// The purpose a file was selected for. This decides what happens when a file panel completes.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub enum FilePurpose {
    Disk(DriveUnit),
    Tape,
    Autostart,
    AutostartDiskImage,
    SnapshotLoad,
    SnapshotSave,
    EventSnapshotStart,
    EventSnapshotEnd,
    SoundRecord(SoundRecordFormat),
    /// Set the named string resource to the selected path (ROM images, cartridge images, etc.)
    Resource(String),
    /// Forward the selection to the machine-specific handler as a [MachineCommand].
    Machine { what: u32, value: Option<i32> },
}

impl FilePurpose {
    /// The panel this purpose is normally selected from.
    pub fn panel(&self) -> FilePanel {
        match self {
            FilePurpose::SnapshotSave
            | FilePurpose::EventSnapshotStart
            | FilePurpose::EventSnapshotEnd
            | FilePurpose::SoundRecord(_) => FilePanel::Save,
            _ => FilePanel::Open,
        }
    }

    /// A title for the file panel.
    pub fn title(&self) -> String {
        match self {
            FilePurpose::Disk(unit) => format!("Attach disk image to unit #{}", unit.device()),
            FilePurpose::Tape => "Attach tape image".to_string(),
            FilePurpose::Autostart => "Autostart".to_string(),
            FilePurpose::AutostartDiskImage => "Select autostart PRG disk image".to_string(),
            FilePurpose::SnapshotLoad => "Load snapshot".to_string(),
            FilePurpose::SnapshotSave => "Save snapshot".to_string(),
            FilePurpose::EventSnapshotStart => "Select start snapshot for event history".to_string(),
            FilePurpose::EventSnapshotEnd => "Select end snapshot for event history".to_string(),
            FilePurpose::SoundRecord(format) => format!("Record sound to {} file", format.device_name()),
            FilePurpose::Resource(name) => format!("Select file for {}", name),
            FilePurpose::Machine { .. } => "Select file".to_string(),
        }
    }
}

/// A machine-specific command. These are never interpreted by the generic dispatcher; they exist
/// to be picked up by a registered [MachineHandler](crate::machine_handler::MachineHandler).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MachineCommand {
    pub what:  u32,
    pub value: Option<i32>,
    pub path:  Option<PathBuf>,
}

/// Informational text pages the UI host knows how to render.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub enum InfoPage {
    About,
    Contributors,
    License,
    Warranty,
    CommandLineOptions,
    CompileTimeFeatures,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
pub enum ResetMode {
    Soft,
    Hard,
}

/// Well-known menu actions. Anything else a menu can produce is an [MenuAction::Item], which is
/// looked up in the resource tables.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub enum MenuAction {
    ExitRequested,
    Reset(ResetMode),
    Autostart,
    AutostartDiskImageSelect,
    AttachDisk(DriveUnit),
    DetachDisk(DriveUnit),
    AttachTape,
    DetachTape,
    FlipAdd,
    FlipRemove,
    FlipNext,
    FlipPrevious,
    Datasette(DatasetteControl),
    ToggleDatasette,
    SnapshotLoad,
    SnapshotSave,
    LoadQuick,
    SaveQuick,
    NetplayServer,
    NetplayClient,
    NetplayDisconnect,
    EventToggleRecord,
    EventTogglePlayback,
    EventSetMilestone,
    EventResetMilestone,
    EventSnapshotStart,
    EventSnapshotEnd,
    Monitor,
    Pause,
    SingleFrameAdvance,
    SoundRecord(SoundRecordFormat),
    SoundRecordStop,
    SettingsLoad,
    SettingsSave,
    SettingsDefault,
    ToggleAttachReadonly(DriveUnit),
    SelectResourceFile { resource: String, panel: FilePanel },
    ShowInfo(InfoPage),
    /// A table-driven menu item: a resource toggle, or a radio-style value.
    Item(u32),
}

/// A status change reported by the emulation core. The core may apply these directly from trap
/// context, or marshal them through the command queue from another thread.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub enum StatusEvent {
    EnableDrives(u8),
    DriveLed { unit: usize, pwm1: u32, pwm2: u32 },
    DriveTrack { unit: usize, half_tracks: u32 },
    DriveImage { unit: usize, path: Option<PathBuf> },
    TapeStatus(bool),
    TapeMotor(bool),
    TapeControl(TapeControl),
    TapeCounter(u32),
    TapeImage(Option<PathBuf>),
    Speed { percent: f64, framerate: f64, warp: bool },
    Joyports([u8; JOYPORT_SLOTS]),
    StatusText { text: String, fade: bool },
    Recording(bool),
    Playback(bool),
    EventTime { current: u32, total: u32 },
}

/// A single command record.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub enum CommandRecord {
    KeyDown(u32),
    KeyUp(u32),
    Menu(MenuAction),
    ResourceSet {
        name:  String,
        value: ResourceValue,
    },
    /// A file panel was closed with a selection. If `purpose` is `None`, the purpose stashed when the
    /// panel was opened is used.
    FileSelected {
        panel:   FilePanel,
        path:    PathBuf,
        purpose: Option<FilePurpose>,
    },
    DroppedFile(PathBuf),
    PasteText(String),
    Machine(MachineCommand),
    Status(StatusEvent),
}

impl CommandRecord {
    pub fn menu_item(id: u32) -> Self {
        CommandRecord::Menu(MenuAction::Item(id))
    }

    pub fn file_selected(panel: FilePanel, path: impl AsRef<Path>) -> Self {
        CommandRecord::FileSelected {
            panel,
            path: path.as_ref().to_path_buf(),
            purpose: None,
        }
    }

    pub fn is_keyboard(&self) -> bool {
        matches!(
            self,
            CommandRecord::KeyDown(_) | CommandRecord::KeyUp(_) | CommandRecord::PasteText(_)
        )
    }
}
