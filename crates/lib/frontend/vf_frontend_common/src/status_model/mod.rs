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

    frontend_common::status_model::mod.rs

    The status model holds the last reported state of the drives, tape, joystick
    ports and emulation speed, and broadcasts changes to the display registry.
*/

use std::path::Path;

use vf_common::{
    util::{file_basename, format_minutes_seconds},
    DriveDisplayState,
    DriveLed,
    DriveUnit,
    JoyportStatus,
    MachineClass,
    TapeControl,
    DRIVE_NUM,
    JOYPORT_SLOTS,
};

use crate::{
    constants::*,
    display_registry::{DisplayRegistry, StatusUpdate, SurfaceHandle},
};

/// How the speed field of the status bar should be drawn.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SpeedDisplayMode {
    /// Normal speed display; the flag indicates warp mode.
    Warp(bool),
    Paused,
    Resumed,
}

impl Default for SpeedDisplayMode {
    fn default() -> Self {
        SpeedDisplayMode::Warp(false)
    }
}

/// Format the speed field. Percentages above 9999 are clamped.
pub fn format_speed(percent: f64, framerate: f64, mode: SpeedDisplayMode) -> String {
    match mode {
        SpeedDisplayMode::Warp(warp) => {
            let percent = percent.clamp(0.0, SPEED_PERCENT_MAX);
            format!(
                "Speed: {:.0}% at {:.0}fps {}",
                percent,
                framerate,
                if warp { WARP_FIELD } else { WARP_FIELD_BLANK }
            )
        }
        SpeedDisplayMode::Paused => "(Paused)".to_string(),
        SpeedDisplayMode::Resumed => "(Resumed)".to_string(),
    }
}

pub struct StatusModel {
    drive_enabled: u8,
    drive_led: [DriveLed; DRIVE_NUM],
    drive_track: [f64; DRIVE_NUM],
    drive_image_name: [Option<String>; DRIVE_NUM],

    // Tape enable as reported by the core, and the Datasette resource as it applies to this machine.
    tape_enabled: bool,
    datasette_resource: bool,
    tape_counter: u32,
    tape_motor: bool,
    tape_control: TapeControl,
    tape_image_name: Option<String>,

    joyport_display: bool,
    joystick_status: [JoyportStatus; JOYPORT_SLOTS],

    speed_percent: f64,
    frame_rate: f64,
    speed_mode: SpeedDisplayMode,
    speed_text: Option<String>,

    status_text: Option<String>,
    fade_ticks: u32,
}

impl Default for StatusModel {
    fn default() -> Self {
        Self {
            drive_enabled: 0,
            drive_led: [DriveLed::Off; DRIVE_NUM],
            drive_track: [0.0; DRIVE_NUM],
            drive_image_name: Default::default(),
            tape_enabled: false,
            datasette_resource: false,
            tape_counter: 0,
            tape_motor: false,
            tape_control: TapeControl::Stop,
            tape_image_name: None,
            joyport_display: false,
            joystick_status: [JoyportStatus::UNKNOWN; JOYPORT_SLOTS],
            speed_percent: 0.0,
            frame_rate: 0.0,
            speed_mode: SpeedDisplayMode::default(),
            speed_text: None,
            status_text: None,
            fade_ticks: 0,
        }
    }
}

impl StatusModel {
    pub fn new() -> Self {
        Self::default()
    }

    // Drives
    // ------------------------------------------------------------------------------------------

    /// Set the drive enable mask. Every unit's status is redrawn, enabled or not.
    pub fn enable_drives(&mut self, registry: &DisplayRegistry, mask: u8) {
        self.drive_enabled = mask & ((1 << DRIVE_NUM) - 1);
        for unit in DriveUnit::all() {
            registry.broadcast(&StatusUpdate::DriveStatus(self.drive_display_state(unit)));
        }
    }

    pub fn set_drive_led(&mut self, registry: &DisplayRegistry, unit: usize, pwm1: u32, pwm2: u32) {
        let Some(unit) = DriveUnit::new(unit)
        else {
            return;
        };
        let led = DriveLed::from_pwm(pwm1, pwm2);
        self.drive_led[unit.idx()] = led;
        registry.broadcast(&StatusUpdate::DriveLed { unit, led });
    }

    pub fn set_drive_track(&mut self, registry: &DisplayRegistry, unit: usize, half_tracks: u32) {
        let Some(unit) = DriveUnit::new(unit)
        else {
            return;
        };
        let track = half_tracks as f64 / 2.0;
        self.drive_track[unit.idx()] = track;
        registry.broadcast(&StatusUpdate::DriveTrack { unit, track });
    }

    /// Record the image attached to a drive. Only the file name is kept.
    pub fn set_drive_image(&mut self, registry: &DisplayRegistry, unit: usize, image: Option<&Path>) {
        let Some(unit) = DriveUnit::new(unit)
        else {
            log::trace!("set_drive_image(): ignoring unit {}", unit);
            return;
        };
        let name = image.and_then(file_basename);
        self.drive_image_name[unit.idx()] = name.clone();
        registry.broadcast(&StatusUpdate::DriveImage { unit, name });
    }

    pub fn drive_display_state(&self, unit: DriveUnit) -> DriveDisplayState {
        if self.drive_enabled & unit.mask_bit() != 0 {
            DriveDisplayState::Active(unit)
        }
        else {
            DriveDisplayState::Inactive(unit)
        }
    }

    pub fn drive_enabled(&self) -> u8 {
        self.drive_enabled
    }

    pub fn drive_led(&self, unit: DriveUnit) -> DriveLed {
        self.drive_led[unit.idx()]
    }

    pub fn drive_track(&self, unit: DriveUnit) -> f64 {
        self.drive_track[unit.idx()]
    }

    pub fn drive_image_name(&self, unit: DriveUnit) -> Option<&str> {
        self.drive_image_name[unit.idx()].as_deref()
    }

    // Tape
    // ------------------------------------------------------------------------------------------

    pub fn set_tape_status(&mut self, registry: &DisplayRegistry, enabled: bool) {
        if self.tape_enabled != enabled {
            self.tape_enabled = enabled;
            registry.broadcast(&StatusUpdate::TapeEnabled(self.tape_display_enabled()));
        }
    }

    /// Apply the Datasette resource. The resource does not exist on every machine class, in which
    /// case it is ignored.
    pub fn set_datasette_resource(&mut self, registry: &DisplayRegistry, class: MachineClass, enabled: bool) {
        let enabled = enabled && class.has_datasette_resource();
        if self.datasette_resource != enabled {
            self.datasette_resource = enabled;
            registry.broadcast(&StatusUpdate::TapeEnabled(self.tape_display_enabled()));
        }
    }

    pub fn set_tape_motor(&mut self, registry: &DisplayRegistry, motor: bool) {
        if self.tape_motor != motor {
            self.tape_motor = motor;
            registry.broadcast(&StatusUpdate::TapeMotor(motor));
        }
    }

    pub fn set_tape_control(&mut self, registry: &DisplayRegistry, control: TapeControl) {
        if self.tape_control != control {
            self.tape_control = control;
            registry.broadcast(&StatusUpdate::TapeControl(control));
        }
    }

    pub fn set_tape_counter(&mut self, registry: &DisplayRegistry, counter: u32) {
        if self.tape_counter != counter {
            self.tape_counter = counter;
            registry.broadcast(&StatusUpdate::TapeCounter(counter));
        }
    }

    pub fn set_tape_image(&mut self, registry: &DisplayRegistry, image: Option<&Path>) {
        self.tape_image_name = image.and_then(file_basename);
        registry.broadcast(&StatusUpdate::TapeImage(self.tape_image_name.clone()));
    }

    pub fn tape_display_enabled(&self) -> bool {
        self.tape_enabled || self.datasette_resource
    }

    pub fn tape_counter(&self) -> u32 {
        self.tape_counter
    }

    pub fn tape_motor(&self) -> bool {
        self.tape_motor
    }

    pub fn tape_control(&self) -> TapeControl {
        self.tape_control
    }

    pub fn tape_image_name(&self) -> Option<&str> {
        self.tape_image_name.as_deref()
    }

    // Joystick ports
    // ------------------------------------------------------------------------------------------

    /// Turn the joystick display on or off. Turning it on resets both ports to idle and redraws them.
    pub fn enable_joyport_display(&mut self, registry: &DisplayRegistry, enabled: bool) {
        self.joyport_display = enabled;
        registry.broadcast(&StatusUpdate::JoyportEnabled(enabled));
        if enabled {
            for port in JOYPORT_DISPLAY_PORTS {
                self.joystick_status[port] = JoyportStatus(0);
                registry.broadcast(&StatusUpdate::Joyport {
                    port,
                    status: self.joystick_status[port],
                });
            }
        }
    }

    /// Update a single port. Changes are always recorded, but only drawn while the joystick display
    /// is enabled.
    pub fn set_joystick(&mut self, registry: &DisplayRegistry, port: usize, status: u8) {
        if !JOYPORT_DISPLAY_PORTS.contains(&port) {
            return;
        }
        let status = JoyportStatus(status);
        if self.joystick_status[port] != status {
            self.joystick_status[port] = status;
            if self.joyport_display {
                registry.broadcast(&StatusUpdate::Joyport { port, status });
            }
        }
    }

    pub fn set_joyports(&mut self, registry: &DisplayRegistry, ports: &[u8; JOYPORT_SLOTS]) {
        for port in JOYPORT_DISPLAY_PORTS {
            self.set_joystick(registry, port, ports[port]);
        }
    }

    pub fn joyport_display(&self) -> bool {
        self.joyport_display
    }

    pub fn joystick_status(&self, port: usize) -> Option<JoyportStatus> {
        self.joystick_status.get(port).copied()
    }

    // Speed and status text
    // ------------------------------------------------------------------------------------------

    /// Update the speed display. Each call also counts down a fading status text message.
    pub fn set_speed(&mut self, registry: &DisplayRegistry, percent: f64, framerate: f64, mode: SpeedDisplayMode) {
        if let SpeedDisplayMode::Warp(_) = mode {
            self.speed_percent = percent.clamp(0.0, SPEED_PERCENT_MAX);
            self.frame_rate = framerate;
        }
        self.speed_mode = mode;
        let text = format_speed(percent, framerate, mode);
        self.speed_text = Some(text.clone());
        registry.broadcast(&StatusUpdate::Speed(text));

        if self.fade_ticks > 0 {
            self.fade_ticks -= 1;
            if self.fade_ticks == 0 {
                self.display_status_text(registry, "", false);
            }
        }
    }

    /// Show the pause or resume indicator in the speed field.
    pub fn display_paused(&mut self, registry: &DisplayRegistry, paused: bool) {
        let mode = if paused {
            SpeedDisplayMode::Paused
        }
        else {
            SpeedDisplayMode::Resumed
        };
        self.set_speed(registry, self.speed_percent, self.frame_rate, mode);
    }

    /// Show a status message. An empty message clears the status text. A fading message is
    /// cleared after five speed updates.
    pub fn display_status_text(&mut self, registry: &DisplayRegistry, text: &str, fade: bool) {
        self.status_text = if text.is_empty() { None } else { Some(text.to_string()) };
        registry.broadcast(&StatusUpdate::StatusText(self.status_text.clone()));
        self.fade_ticks = if fade { STATUS_TEXT_FADE_TICKS } else { 0 };
    }

    pub fn display_recording(&mut self, registry: &DisplayRegistry, recording: bool) {
        if recording {
            self.display_status_text(registry, MSG_RECORDING_HISTORY, true);
        }
        else {
            self.display_status_text(registry, "", false);
        }
    }

    pub fn display_playback(&mut self, registry: &DisplayRegistry, playback: bool) {
        if playback {
            self.display_status_text(registry, MSG_PLAYBACK_HISTORY, true);
        }
        else {
            self.display_status_text(registry, "", false);
        }
    }

    /// Show the event history time. A total of zero means recording is in progress. Suppressed
    /// while a fading message is on screen.
    pub fn display_event_time(&mut self, registry: &DisplayRegistry, current: u32, total: u32) {
        if self.fade_ticks > 0 {
            return;
        }
        let text = if total == 0 {
            format!("Recording {}", format_minutes_seconds(current))
        }
        else {
            format!(
                "Playback {} ({})",
                format_minutes_seconds(current),
                format_minutes_seconds(total)
            )
        };
        self.display_status_text(registry, &text, false);
    }

    pub fn speed_percent(&self) -> f64 {
        self.speed_percent
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    pub fn speed_mode(&self) -> SpeedDisplayMode {
        self.speed_mode
    }

    pub fn speed_text(&self) -> Option<&str> {
        self.speed_text.as_deref()
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status_text.as_deref()
    }

    pub fn fade_ticks(&self) -> u32 {
        self.fade_ticks
    }

    // Refresh
    // ------------------------------------------------------------------------------------------

    /// Build the list of updates needed to bring a blank surface up to date.
    pub fn snapshot(&self) -> Vec<StatusUpdate> {
        let mut updates = Vec::new();
        for unit in DriveUnit::all() {
            updates.push(StatusUpdate::DriveStatus(self.drive_display_state(unit)));
            updates.push(StatusUpdate::DriveLed {
                unit,
                led: self.drive_led[unit.idx()],
            });
            updates.push(StatusUpdate::DriveTrack {
                unit,
                track: self.drive_track[unit.idx()],
            });
            updates.push(StatusUpdate::DriveImage {
                unit,
                name: self.drive_image_name[unit.idx()].clone(),
            });
        }
        updates.push(StatusUpdate::TapeEnabled(self.tape_display_enabled()));
        updates.push(StatusUpdate::TapeCounter(self.tape_counter));
        updates.push(StatusUpdate::TapeMotor(self.tape_motor));
        updates.push(StatusUpdate::TapeControl(self.tape_control));
        updates.push(StatusUpdate::TapeImage(self.tape_image_name.clone()));
        updates.push(StatusUpdate::JoyportEnabled(self.joyport_display));
        if self.joyport_display {
            for port in JOYPORT_DISPLAY_PORTS {
                updates.push(StatusUpdate::Joyport {
                    port,
                    status: self.joystick_status[port],
                });
            }
        }
        if let Some(text) = &self.speed_text {
            updates.push(StatusUpdate::Speed(text.clone()));
        }
        updates.push(StatusUpdate::StatusText(self.status_text.clone()));
        updates
    }

    /// Redraw the entire status display on every surface.
    pub fn refresh_all(&self, registry: &DisplayRegistry) {
        for update in self.snapshot() {
            registry.broadcast(&update);
        }
    }

    /// Redraw the entire status display on one surface, typically one that was just registered.
    pub fn refresh_surface(&self, registry: &DisplayRegistry, handle: SurfaceHandle) {
        for update in self.snapshot() {
            registry.send_to(handle, &update);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_registry::{StatusSurface, SurfaceRef};
    use std::{
        path::PathBuf,
        sync::{Arc, RwLock},
    };

    #[derive(Default)]
    struct Recorder {
        updates: Vec<StatusUpdate>,
    }

    impl StatusSurface for Recorder {
        fn apply(&mut self, update: &StatusUpdate) {
            self.updates.push(update.clone());
        }
    }

    fn setup() -> (DisplayRegistry, Arc<RwLock<Recorder>>) {
        let mut registry = DisplayRegistry::new();
        let recorder = Arc::new(RwLock::new(Recorder::default()));
        let surface: SurfaceRef = recorder.clone();
        registry.register(&surface);
        (registry, recorder)
    }

    fn updates(recorder: &Arc<RwLock<Recorder>>) -> Vec<StatusUpdate> {
        recorder.read().unwrap().updates.clone()
    }

    #[test]
    fn led_mapping() {
        let (registry, _rec) = setup();
        let mut model = StatusModel::new();
        let unit = DriveUnit::new(0).unwrap();

        model.set_drive_led(&registry, 0, 150, 50);
        assert_eq!(model.drive_led(unit), DriveLed::Red);
        model.set_drive_led(&registry, 0, 50, 150);
        assert_eq!(model.drive_led(unit), DriveLed::Green);
        model.set_drive_led(&registry, 0, 150, 150);
        assert_eq!(model.drive_led(unit), DriveLed::Both);
        model.set_drive_led(&registry, 0, 50, 50);
        assert_eq!(model.drive_led(unit), DriveLed::Off);
        // Exactly at the threshold is not lit.
        model.set_drive_led(&registry, 0, 100, 100);
        assert_eq!(model.drive_led(unit), DriveLed::Off);
    }

    #[test]
    fn led_always_broadcasts() {
        let (registry, rec) = setup();
        let mut model = StatusModel::new();
        model.set_drive_led(&registry, 1, 150, 0);
        model.set_drive_led(&registry, 1, 150, 0);
        assert_eq!(updates(&rec).len(), 2);
    }

    #[test]
    fn track_is_half_tracks_over_two() {
        let (registry, _rec) = setup();
        let mut model = StatusModel::new();
        let unit = DriveUnit::new(2).unwrap();
        model.set_drive_track(&registry, 2, 36);
        assert_eq!(model.drive_track(unit), 18.0);
        model.set_drive_track(&registry, 2, 37);
        assert_eq!(model.drive_track(unit), 18.5);
    }

    #[test]
    fn enable_drives_redraws_every_unit() {
        let (registry, rec) = setup();
        let mut model = StatusModel::new();
        model.enable_drives(&registry, 0b0101);
        let states: Vec<_> = updates(&rec)
            .into_iter()
            .filter_map(|u| match u {
                StatusUpdate::DriveStatus(state) => Some(state.is_active()),
                _ => None,
            })
            .collect();
        assert_eq!(states, vec![true, false, true, false]);
    }

    #[test]
    fn tape_status_is_change_guarded() {
        let (registry, rec) = setup();
        let mut model = StatusModel::new();
        model.set_tape_status(&registry, true);
        model.set_tape_status(&registry, true);
        assert_eq!(updates(&rec), vec![StatusUpdate::TapeEnabled(true)]);

        model.set_tape_counter(&registry, 12);
        model.set_tape_counter(&registry, 12);
        model.set_tape_motor(&registry, false);
        model.set_tape_control(&registry, TapeControl::Start);
        model.set_tape_control(&registry, TapeControl::Start);
        assert_eq!(updates(&rec).len(), 3);
    }

    #[test]
    fn datasette_resource_enables_tape_display() {
        let (registry, _rec) = setup();
        let mut model = StatusModel::new();
        model.set_datasette_resource(&registry, MachineClass::Vsid, true);
        assert!(!model.tape_display_enabled());
        model.set_datasette_resource(&registry, MachineClass::C64, true);
        assert!(model.tape_display_enabled());
    }

    #[test]
    fn drive_image_keeps_basename() {
        let (registry, _rec) = setup();
        let mut model = StatusModel::new();
        let path = PathBuf::from("/tmp/disks/game.d64");
        model.set_drive_image(&registry, 1, Some(path.as_path()));
        assert_eq!(model.drive_image_name(DriveUnit::new(1).unwrap()), Some("game.d64"));
        // Out of range units are ignored.
        model.set_drive_image(&registry, 4, Some(path.as_path()));
    }

    #[test]
    fn speed_string_formatting() {
        assert_eq!(
            format_speed(9999.4, 50.0, SpeedDisplayMode::Warp(false)),
            "Speed: 9999% at 50fps       "
        );
        assert_eq!(
            format_speed(10050.0, 50.0, SpeedDisplayMode::Warp(false)),
            "Speed: 9999% at 50fps       "
        );
        assert_eq!(
            format_speed(250.0, 60.0, SpeedDisplayMode::Warp(true)),
            "Speed: 250% at 60fps (warp)"
        );
        assert_eq!(format_speed(0.0, 0.0, SpeedDisplayMode::Paused), "(Paused)");
    }

    #[test]
    fn status_text_fades_after_five_speed_updates() {
        let (registry, _rec) = setup();
        let mut model = StatusModel::new();
        model.display_status_text(&registry, "Hello", true);
        for _ in 0..4 {
            model.set_speed(&registry, 100.0, 50.0, SpeedDisplayMode::Warp(false));
            assert_eq!(model.status_text(), Some("Hello"));
        }
        model.set_speed(&registry, 100.0, 50.0, SpeedDisplayMode::Warp(false));
        assert_eq!(model.status_text(), None);
    }

    #[test]
    fn event_time_is_suppressed_while_fading() {
        let (registry, _rec) = setup();
        let mut model = StatusModel::new();
        model.display_recording(&registry, true);
        model.display_event_time(&registry, 65, 0);
        assert_eq!(model.status_text(), Some(MSG_RECORDING_HISTORY));

        model.display_recording(&registry, false);
        model.display_event_time(&registry, 65, 0);
        assert_eq!(model.status_text(), Some("Recording 01:05"));
        model.display_event_time(&registry, 5, 130);
        assert_eq!(model.status_text(), Some("Playback 00:05 (02:10)"));
    }

    #[test]
    fn joyports_draw_only_when_enabled() {
        let (registry, rec) = setup();
        let mut model = StatusModel::new();
        model.set_joyports(&registry, &[0, 0x10, 0x01]);
        assert!(updates(&rec).is_empty());
        assert_eq!(model.joystick_status(1), Some(JoyportStatus(0x10)));

        model.enable_joyport_display(&registry, true);
        assert_eq!(model.joystick_status(1), Some(JoyportStatus(0)));
        // Enable flag plus two ports.
        assert_eq!(updates(&rec).len(), 3);

        model.set_joyports(&registry, &[0, 0x01, 0x00]);
        assert_eq!(updates(&rec).len(), 4);
    }

    #[test]
    fn refresh_replays_to_one_surface() {
        let (mut registry, rec) = setup();
        let mut model = StatusModel::new();
        model.set_tape_counter(&registry, 7);

        let late = Arc::new(RwLock::new(Recorder::default()));
        let late_ref: SurfaceRef = late.clone();
        let handle = registry.register(&late_ref);
        model.refresh_surface(&registry, handle);

        let late_updates = updates(&late);
        assert!(late_updates.contains(&StatusUpdate::TapeCounter(7)));
        assert_eq!(updates(&rec).len(), 1);
    }
}
