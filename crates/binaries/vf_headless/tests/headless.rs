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

    vf_headless::tests::headless.rs

    Scripted runs of the headless emulator.
*/

use std::{fs, path::Path};

use vf_common::{DriveUnit, MachineClass};
use vf_config::{attach::AttachSpec, ConfigFileParams, ScriptEntry};
use vf_frontend_common::{
    types::command::{FilePurpose, MachineCommand},
    CommandRecord,
    FilePanel,
    MenuAction,
    PauseState,
    ResourceStore,
};
use vf_headless::emulator::{
    machine::{IDM_BORDER_FULL, IDM_WARP_MODE, MACHINE_CMD_CARTRIDGE, MACHINE_CMD_TUNE, RES_BORDER_MODE, RES_WARP_MODE},
    Emulator,
};

fn config(basedir: &Path, class: MachineClass) -> ConfigFileParams {
    let mut config = ConfigFileParams::default();
    config.emulator.basedir = basedir.to_path_buf();
    config.machine.class = class;
    config.headless.tick_ms = 0;
    config.headless.ticks = 20;
    config
}

fn entry(tick: u32, command: CommandRecord) -> ScriptEntry {
    ScriptEntry { tick, command }
}

#[test]
fn configured_attachments_reach_the_drives() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = config(tmp.path(), MachineClass::C64);
    config.machine.attach = vec![
        "8:games/boot.d64".parse::<AttachSpec>().unwrap(),
        "tape:games/music.tap".parse::<AttachSpec>().unwrap(),
    ];

    let mut emu = Emulator::new(config).unwrap();
    emu.step();
    // Status events posted by the machine are handled on the following tick.
    emu.step();

    let status = emu.dispatcher.status();
    let unit8 = DriveUnit::default();
    assert_eq!(status.drive_image_name(unit8), Some("boot.d64"));
    assert_eq!(status.drive_track(unit8), 18.0);
    assert_eq!(status.drive_enabled(), 0b0001);
    assert_eq!(status.tape_image_name(), Some("music.tap"));
    assert!(status.tape_display_enabled());
    assert!(emu.status_lines() > 0);
}

#[test]
fn quick_snapshots_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let mut emu = Emulator::new(config(tmp.path(), MachineClass::C64)).unwrap();
    for _ in 0..5 {
        emu.step();
    }
    emu.dispatcher.enqueue(CommandRecord::Menu(MenuAction::SaveQuick));
    emu.step();
    // The save trap runs at the start of the next frame, after frame 7 has run.
    emu.step();
    assert!(tmp.path().join("C64").join("quicksnap0.vsf").exists());

    emu.dispatcher.enqueue(CommandRecord::Menu(MenuAction::LoadQuick));
    for _ in 0..3 {
        emu.step();
    }
    // Restored to frame 7 by the second step's trap, then the third step ran frame 8.
    assert_eq!(emu.machine.borrow().frame(), 8);
}

#[test]
fn menu_items_follow_the_tables() {
    let tmp = tempfile::tempdir().unwrap();
    let mut emu = Emulator::new(config(tmp.path(), MachineClass::C64)).unwrap();
    emu.dispatcher.enqueue(CommandRecord::menu_item(IDM_WARP_MODE));
    emu.dispatcher.enqueue(CommandRecord::menu_item(IDM_BORDER_FULL));
    emu.step();

    let res = emu.dispatcher.resources();
    assert_eq!(res.get_int(RES_WARP_MODE).unwrap(), 1);
    assert_eq!(res.get_int(RES_BORDER_MODE).unwrap(), 1);

    for _ in 0..10 {
        emu.step();
    }
    assert!(emu
        .dispatcher
        .status()
        .speed_text()
        .is_some_and(|s| s.ends_with("(warp)")));
}

#[test]
fn machine_commands_go_to_the_handler() {
    let tmp = tempfile::tempdir().unwrap();
    let mut emu = Emulator::new(config(tmp.path(), MachineClass::C64)).unwrap();
    emu.dispatcher.enqueue(CommandRecord::FileSelected {
        panel:   FilePanel::Open,
        path:    "carts/action.crt".into(),
        purpose: Some(FilePurpose::Machine {
            what:  MACHINE_CMD_CARTRIDGE,
            value: None,
        }),
    });
    emu.step();
    emu.step();
    assert_eq!(emu.machine.borrow().cartridge(), Some(Path::new("carts/action.crt")));

    let mut vsid = Emulator::new(config(tmp.path(), MachineClass::Vsid)).unwrap();
    vsid.dispatcher.enqueue(CommandRecord::Machine(MachineCommand {
        what:  MACHINE_CMD_TUNE,
        value: Some(3),
        path:  Some("tunes/commando.sid".into()),
    }));
    vsid.dispatcher.enqueue(CommandRecord::KeyDown(32));
    vsid.step();
    assert_eq!(
        vsid.machine.borrow().tune(),
        Some((Path::new("tunes/commando.sid"), 3))
    );
    assert!(vsid.machine.borrow().keys_down().is_empty());
}

#[test]
fn scripted_run_pauses_saves_and_exits() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = config(tmp.path(), MachineClass::C128);
    config.ui.confirm_on_exit = false;
    config.headless.ticks = 1000;
    config.headless.tick_ms = 1;
    config.headless.script = vec![
        entry(2, CommandRecord::Menu(MenuAction::Pause)),
        entry(3, CommandRecord::Menu(MenuAction::SingleFrameAdvance)),
        entry(4, CommandRecord::Menu(MenuAction::Pause)),
        entry(5, CommandRecord::Menu(MenuAction::SaveQuick)),
        entry(30, CommandRecord::Menu(MenuAction::ExitRequested)),
    ];

    let mut emu = Emulator::new(config).unwrap();
    let summary = emu.run().unwrap();

    assert!(summary.exited);
    assert_eq!(summary.script_sent, 5);
    assert!(summary.ticks < 1000);
    assert_eq!(emu.dispatcher.pause_state(), PauseState::Running);
    assert!(tmp.path().join("C128").join("quicksnap0.vsf").exists());
}

#[test]
fn pending_script_is_handled_after_the_last_tick() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = config(tmp.path(), MachineClass::C64);
    config.headless.ticks = 2;
    config.headless.tick_ms = 1;
    config.headless.script = vec![
        entry(1, CommandRecord::Menu(MenuAction::SnapshotSave)),
        entry(
            50,
            CommandRecord::file_selected(FilePanel::Save, tmp.path().join("state.vsf")),
        ),
    ];

    let mut emu = Emulator::new(config).unwrap();
    let summary = emu.run().unwrap();
    assert!(!summary.exited);
    assert_eq!(summary.ticks, 2);
    assert_eq!(summary.script_sent, 2);

    let text = fs::read_to_string(tmp.path().join("state.vsf")).unwrap();
    assert!(text.contains("roms=true"));
    assert!(text.contains("disks=true"));
}
