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

    vf_config::lib.rs
*/

//! The `vf_config` crate provides functionality for parsing ViceFront's main configuration file,
//! and overlaying command line arguments on top of the configuration file settings.
//! We always consider command line arguments to take priority over the configuration file.
//!
//! Features:
//! - `use_bpaf`: Enable BPAF support for command line argument parsing.

pub mod attach;
mod bpaf_config;

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

#[cfg(feature = "use_bpaf")]
use bpaf_config::cli_args;
pub use bpaf_config::CmdLineArgs;

use cfg_if::cfg_if;
use serde_derive::Deserialize;
use vf_common::MachineClass;
use vf_frontend_common::{
    constants::{DEFAULT_PAUSE_POLL, DEFAULT_QUEUE_CAPACITY},
    dispatch::UiResourceDefaults,
    CommandRecord,
    QueueOverflowPolicy,
};

use attach::AttachSpec;

const fn _default_true() -> bool {
    true
}
fn _default_basedir() -> PathBuf {
    PathBuf::from(".")
}
fn _default_log_level() -> String {
    "info".to_string()
}
const fn _default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}
fn _default_pause_poll_ms() -> u64 {
    DEFAULT_PAUSE_POLL.as_millis() as u64
}
const fn _default_ticks() -> u32 {
    100
}
const fn _default_tick_ms() -> u64 {
    20
}

#[derive(Debug, Deserialize)]
pub struct Emulator {
    #[serde(default = "_default_basedir")]
    pub basedir:   PathBuf,
    #[serde(default = "_default_log_level")]
    pub log_level: String,
}

impl Default for Emulator {
    fn default() -> Self {
        Self {
            basedir:   _default_basedir(),
            log_level: _default_log_level(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Machine {
    /// Used as the quick snapshot subdirectory. Defaults to the machine class name.
    pub name:   Option<String>,
    #[serde(default)]
    pub class:  MachineClass,
    #[serde(default)]
    pub attach: Vec<AttachSpec>,
}

impl Machine {
    pub fn machine_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.class.to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct Ui {
    #[serde(default = "_default_queue_capacity")]
    pub queue_capacity: usize,
    #[serde(default)]
    pub overflow_policy: QueueOverflowPolicy,
    #[serde(default)]
    pub joystick_display: bool,
    #[serde(default = "_default_true")]
    pub confirm_on_exit: bool,
    #[serde(default)]
    pub save_resources_on_exit: bool,
    #[serde(default = "_default_pause_poll_ms")]
    pub pause_poll_ms: u64,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            queue_capacity: _default_queue_capacity(),
            overflow_policy: QueueOverflowPolicy::default(),
            joystick_display: false,
            confirm_on_exit: true,
            save_resources_on_exit: false,
            pause_poll_ms: _default_pause_poll_ms(),
        }
    }
}

impl Ui {
    pub fn resource_defaults(&self) -> UiResourceDefaults {
        UiResourceDefaults {
            joystick_display: self.joystick_display,
            confirm_on_exit: self.confirm_on_exit,
            save_resources_on_exit: self.save_resources_on_exit,
        }
    }

    pub fn pause_poll(&self) -> Duration {
        Duration::from_millis(self.pause_poll_ms)
    }
}

/// A command to inject on a given tick of a headless run.
#[derive(Clone, Debug, Deserialize)]
pub struct ScriptEntry {
    pub tick:    u32,
    pub command: CommandRecord,
}

#[derive(Debug, Deserialize)]
pub struct Headless {
    #[serde(default = "_default_ticks")]
    pub ticks: u32,
    #[serde(default = "_default_tick_ms")]
    pub tick_ms: u64,
    /// The answer given to every confirmation dialog.
    #[serde(default = "_default_true")]
    pub auto_confirm: bool,
    #[serde(default)]
    pub script: Vec<ScriptEntry>,
}

impl Default for Headless {
    fn default() -> Self {
        Self {
            ticks: _default_ticks(),
            tick_ms: _default_tick_ms(),
            auto_confirm: true,
            script: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFileParams {
    #[serde(default)]
    pub emulator: Emulator,
    #[serde(default)]
    pub machine:  Machine,
    #[serde(default)]
    pub ui:       Ui,
    #[serde(default)]
    pub headless: Headless,
}

impl ConfigFileParams {
    pub fn overlay(&mut self, shell_args: CmdLineArgs) {
        if let Some(basedir) = shell_args.base_dir {
            self.emulator.basedir = basedir;
        }
        if let Some(log_level) = shell_args.log_level {
            self.emulator.log_level = log_level;
        }

        if let Some(name) = shell_args.machine_name {
            self.machine.name = Some(name);
        }
        if let Some(class) = shell_args.machine_class {
            self.machine.class = class;
        }
        // Command line attachments go after the ones from the file.
        self.machine.attach.extend(shell_args.attach);

        self.ui.joystick_display |= shell_args.joydisplay;
        self.ui.confirm_on_exit &= !shell_args.no_confirm_exit;
        self.ui.save_resources_on_exit |= shell_args.saveres;

        if let Some(ticks) = shell_args.ticks {
            self.headless.ticks = ticks;
        }
    }
}

pub fn read_config(toml_string: impl AsRef<str>, shell_args: CmdLineArgs) -> Result<ConfigFileParams, anyhow::Error> {
    let mut toml_args: ConfigFileParams = toml::from_str(toml_string.as_ref())?;

    // Command line arguments override config file arguments
    toml_args.overlay(shell_args);

    Ok(toml_args)
}

cfg_if! {
    if #[cfg(feature = "use_bpaf")] {
        fn shell_args() -> CmdLineArgs {
            log::debug!("Reading command line arguments...");
            cli_args().run()
        }
    } else {
        fn shell_args() -> CmdLineArgs {
            log::debug!("Argument reading disabled...");
            CmdLineArgs::default()
        }
    }
}

/// Read the TOML configuration from a file path, parse and overlay command line arguments.
/// A missing default configuration file is not an error; built-in defaults are used instead.
pub fn read_config_file<P>(default_path: P) -> Result<ConfigFileParams, anyhow::Error>
where
    P: AsRef<Path>,
{
    let shell_args = shell_args();

    // Allow configuration file path to be overridden by command line argument 'config_file'
    let toml_string = if let Some(configfile_path) = shell_args.config_file.as_ref() {
        std::fs::read_to_string(configfile_path)?
    }
    else if default_path.as_ref().exists() {
        std::fs::read_to_string(default_path)?
    }
    else {
        log::warn!(
            "read_config_file(): {} not found, using defaults",
            default_path.as_ref().display()
        );
        String::new()
    };

    read_config(toml_string, shell_args)
}

/// Read the TOML configuration from a string, parse and overlay command line arguments.
pub fn read_config_string(toml_string: impl AsRef<str>) -> Result<ConfigFileParams, anyhow::Error> {
    read_config(toml_string, shell_args())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vf_common::DriveUnit;
    use vf_frontend_common::{types::command::ResourceValue, MenuAction};

    const SAMPLE: &str = r#"
[emulator]
basedir = "/home/user/vice"
log_level = "debug"

[machine]
class = "C128"
attach = ["8:boot.d64"]

[ui]
queue_capacity = 64
overflow_policy = "DropOldest"
confirm_on_exit = false

[headless]
ticks = 10
script = [
    { tick = 2, command = { Menu = "SaveQuick" } },
    { tick = 3, command = { Menu = { AttachDisk = 1 } } },
    { tick = 4, command = { ResourceSet = { name = "JoystickDisplay", value = 1 } } },
    { tick = 5, command = { KeyDown = 32 } },
]
"#;

    #[test]
    fn reads_every_section() {
        let config = read_config(SAMPLE, CmdLineArgs::default()).unwrap();
        assert_eq!(config.emulator.basedir, PathBuf::from("/home/user/vice"));
        assert_eq!(config.emulator.log_level, "debug");
        assert_eq!(config.machine.class, MachineClass::C128);
        assert_eq!(config.machine.machine_name(), "C128");
        assert_eq!(config.machine.attach.len(), 1);
        assert_eq!(config.ui.queue_capacity, 64);
        assert_eq!(config.ui.overflow_policy, QueueOverflowPolicy::DropOldest);
        assert!(!config.ui.confirm_on_exit);
        assert_eq!(config.ui.pause_poll(), Duration::from_millis(1));
        assert_eq!(config.headless.ticks, 10);

        let commands: Vec<&CommandRecord> = config.headless.script.iter().map(|e| &e.command).collect();
        assert_eq!(
            commands,
            vec![
                &CommandRecord::Menu(MenuAction::SaveQuick),
                &CommandRecord::Menu(MenuAction::AttachDisk(DriveUnit::new(1).unwrap())),
                &CommandRecord::ResourceSet {
                    name:  "JoystickDisplay".to_string(),
                    value: ResourceValue::Int(1),
                },
                &CommandRecord::KeyDown(32),
            ]
        );
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = read_config("", CmdLineArgs::default()).unwrap();
        assert_eq!(config.emulator.basedir, PathBuf::from("."));
        assert_eq!(config.machine.class, MachineClass::C64);
        assert_eq!(config.ui.queue_capacity, DEFAULT_QUEUE_CAPACITY);
        assert!(config.ui.confirm_on_exit);
        assert_eq!(config.headless.ticks, 100);
        assert!(config.headless.auto_confirm);
        assert!(config.headless.script.is_empty());
    }

    #[test]
    fn command_line_wins() {
        let args = CmdLineArgs {
            base_dir: Some(PathBuf::from("/tmp")),
            machine_name: Some("MyC128".to_string()),
            machine_class: Some(MachineClass::Vsid),
            attach: vec!["tape:game.tap".parse().unwrap()],
            joydisplay: true,
            saveres: true,
            ticks: Some(3),
            ..Default::default()
        };
        let config = read_config(SAMPLE, args).unwrap();
        assert_eq!(config.emulator.basedir, PathBuf::from("/tmp"));
        assert_eq!(config.machine.machine_name(), "MyC128");
        assert_eq!(config.machine.class, MachineClass::Vsid);
        assert_eq!(config.machine.attach.len(), 2);
        assert!(config.ui.joystick_display);
        assert!(config.ui.save_resources_on_exit);
        assert_eq!(config.headless.ticks, 3);

        let defaults = config.ui.resource_defaults();
        assert!(defaults.joystick_display);
        assert!(!defaults.confirm_on_exit);
    }

    #[test]
    fn no_confirm_exit_clears_the_flag() {
        let args = CmdLineArgs {
            no_confirm_exit: true,
            ..Default::default()
        };
        let config = read_config("", args).unwrap();
        assert!(!config.ui.confirm_on_exit);
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(read_config("[machine]\nclass = \"Amiga\"", CmdLineArgs::default()).is_err());
        assert!(read_config("[machine]\nattach = [\"fd:disk.img\"]", CmdLineArgs::default()).is_err());
    }
}
