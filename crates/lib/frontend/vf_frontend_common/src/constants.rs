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

    frontend_common::constants.rs

    Constants shared by front ends.
*/

use std::time::Duration;

pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Number of speed updates a status text message stays visible for.
pub const STATUS_TEXT_FADE_TICKS: u32 = 5;
/// Largest speed percentage shown on the status bar.
pub const SPEED_PERCENT_MAX: f64 = 9999.0;
/// Width of the warp indicator field in the speed string.
pub const WARP_FIELD: &str = "(warp)";
pub const WARP_FIELD_BLANK: &str = "      ";

pub const QUICKSNAP_SLOTS: usize = 10;
pub const QUICKSNAP_PREFIX: &str = "quicksnap";
pub const QUICKSNAP_EXTENSION: &str = "vsf";

pub const DEFAULT_PAUSE_POLL: Duration = Duration::from_millis(1);

pub const JOYPORT_DISPLAY_PORTS: [usize; 2] = [1, 2];

// Resource names.
pub const RES_JOYSTICK_DISPLAY: &str = "JoystickDisplay";
pub const RES_SAVE_RESOURCES_ON_EXIT: &str = "SaveResourcesOnExit";
pub const RES_CONFIRM_ON_EXIT: &str = "ConfirmOnExit";
pub const RES_DATASETTE: &str = "Datasette";
pub const RES_AUTOSTART_PRG_DISK_IMAGE: &str = "AutostartPrgDiskImage";
pub const RES_EVENT_START_SNAPSHOT: &str = "EventStartSnapshot";
pub const RES_EVENT_END_SNAPSHOT: &str = "EventEndSnapshot";
pub const RES_EVENT_SNAPSHOT_DIR: &str = "EventSnapshotDir";
pub const RES_SOUND_RECORD_DEVICE_NAME: &str = "SoundRecordDeviceName";
pub const RES_SOUND_RECORD_DEVICE_ARG: &str = "SoundRecordDeviceArg";

/// Prefix of the per-unit read-only attach resource, e.g. `AttachDevice8Readonly`.
pub const RES_ATTACH_READONLY_PREFIX: &str = "AttachDevice";

// User-visible messages.
pub const MSG_CANNOT_ATTACH: &str = "Cannot attach specified file";
pub const MSG_CANNOT_AUTOSTART: &str = "Cannot autostart specified file.";
pub const MSG_CANNOT_LOAD_SNAPSHOT: &str = "Cannot load snapshot file.";
pub const MSG_CANNOT_SAVE_SNAPSHOT: &str = "Cannot write snapshot file.";
pub const MSG_CANNOT_HANDLE_FILE: &str = "Cannot handle the selected file, the command queue is full.";
pub const MSG_CANNOT_SAVE_SETTINGS: &str = "Cannot save settings.";
pub const MSG_CANNOT_LOAD_SETTINGS: &str = "Cannot load settings.";
pub const MSG_CANNOT_SAVE_FLIPLIST: &str = "Cannot save fliplist.";
pub const MSG_CANNOT_RESTORE_DEFAULTS: &str = "Cannot set default settings.";
pub const MSG_PAUSE_NETPLAY: &str = "Pause is disabled during netplay.";
pub const MSG_SOUND_RECORD_STARTED: &str = "Sound Recording Started...";
pub const MSG_MEDIA_RECORD_STOPPED: &str = "Media Recording Stopped...";
pub const MSG_RECORDING_HISTORY: &str = "Recording history...";
pub const MSG_PLAYBACK_HISTORY: &str = "History playback...";
pub const MSG_CONFIRM_EXIT: &str = "Do you really want to exit?";
