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

    frontend_common::tests::dispatch.rs

    Command dispatch through the public Dispatcher interface.
*/

mod common;

use std::{cell::RefCell, path::PathBuf, rc::Rc};

use common::Harness;
use vf_common::{DriveUnit, MachineClass};
use vf_frontend_common::{
    constants::*,
    dispatch::{register_frontend_resources, UiResourceDefaults},
    machine_handler::{HandlerContext, MachineHandler, MachineOutcome},
    resource_tables::{MenuToggle, TableTier},
    resources::{MemoryResources, ResourceError},
    types::command::{MachineCommand, ResetMode, ResourceValue, SoundRecordFormat},
    CommandRecord,
    CommandSender,
    FilePanel,
    FilePurpose,
    MenuAction,
    QueueOverflowPolicy,
    ResourceStore,
};

fn menu(action: MenuAction) -> CommandRecord {
    CommandRecord::Menu(action)
}

fn set_int(name: &str, value: i32) -> CommandRecord {
    CommandRecord::ResourceSet {
        name:  name.to_string(),
        value: ResourceValue::Int(value),
    }
}

#[test]
fn records_are_handled_in_order() {
    let mut h = Harness::new(MachineClass::C64);
    h.send(CommandRecord::KeyDown(1));
    h.send(menu(MenuAction::Reset(ResetMode::Hard)));
    h.send(CommandRecord::KeyUp(1));

    let result = h.tick();
    assert_eq!(result.processed, 3);
    assert!(!result.exit);
    assert_eq!(h.calls(), vec!["key_down:1", "reset:Hard", "key_up:1"]);

    // Nothing left over for the next tick.
    assert_eq!(h.tick().processed, 0);
}

#[test]
fn full_queue_reports_dropped_records() {
    let mut h = Harness::with_builder(MachineClass::C64, |b| b.with_queue(4, QueueOverflowPolicy::DropNewest));
    for code in 0..4 {
        h.send(CommandRecord::KeyDown(code));
    }
    assert!(!h.dispatcher.enqueue(CommandRecord::KeyDown(4)));

    let result = h.tick();
    assert_eq!(result.processed, 4);
    assert_eq!(result.dropped, 1);
    assert_eq!(h.calls().last().map(String::as_str), Some("key_down:3"));
}

#[test]
fn vsid_ignores_keyboard_input() {
    let mut h = Harness::new(MachineClass::Vsid);
    h.send(CommandRecord::KeyDown(7));
    h.send(CommandRecord::KeyUp(7));
    h.send(CommandRecord::PasteText("LOAD".to_string()));
    assert_eq!(h.tick().processed, 3);
    assert!(h.calls().is_empty());

    let mut h = Harness::new(MachineClass::C64);
    h.send(CommandRecord::PasteText("LOAD".to_string()));
    h.tick();
    assert_eq!(h.calls(), vec!["feed:LOAD"]);
}

#[test]
fn universal_toggle_wins_over_machine_table() {
    let mut res = MemoryResources::new();
    register_frontend_resources(&mut res, &UiResourceDefaults::default());
    res.register_int("WarpMode", 0);
    res.register_int("Sound", 1);

    let mut h = Harness::with_builder(MachineClass::C64, |b| b.with_resources(Box::new(res)));
    h.dispatcher.register_menu_toggles(&[MenuToggle::new("Sound", 10)]);
    h.dispatcher
        .tables_mut()
        .register_toggles(TableTier::Universal, &[MenuToggle::new("WarpMode", 10)]);

    h.send(CommandRecord::menu_item(10));
    h.tick();
    assert_eq!(h.dispatcher.resources().get_int("WarpMode").unwrap(), 1);
    assert_eq!(h.dispatcher.resources().get_int("Sound").unwrap(), 1);

    // Unknown items are ignored without complaint.
    h.send(CommandRecord::menu_item(999));
    h.tick();
    assert!(h.errors().is_empty());
}

struct DoubleKeys {
    seen: Vec<MachineCommand>,
}

impl MachineHandler for DoubleKeys {
    fn try_handle(&mut self, record: &CommandRecord, ctx: &mut HandlerContext<'_>) -> Option<MachineOutcome> {
        match record {
            CommandRecord::KeyDown(1) => {
                ctx.core.key_down(100);
                Some(MachineOutcome::Handled)
            }
            CommandRecord::KeyDown(2) => Some(MachineOutcome::Failed("No such key.".to_string())),
            CommandRecord::Machine(command) => {
                self.seen.push(command.clone());
                ctx.ui.message(&format!("machine command {}", command.what));
                Some(MachineOutcome::Handled)
            }
            _ => None,
        }
    }
}

#[test]
fn machine_handler_sees_records_first() {
    let mut h = Harness::with_builder(MachineClass::C128, |b| {
        b.with_machine_handler(Box::new(DoubleKeys { seen: Vec::new() }))
    });
    h.send(CommandRecord::KeyDown(1));
    h.send(CommandRecord::KeyDown(2));
    h.send(CommandRecord::KeyDown(3));
    h.tick();

    assert_eq!(h.calls(), vec!["key_down:100", "key_down:3"]);
    assert_eq!(h.errors(), vec!["No such key."]);
}

#[test]
fn machine_file_selection_is_requeued_for_the_handler() {
    let mut h = Harness::with_builder(MachineClass::C64, |b| {
        b.with_machine_handler(Box::new(DoubleKeys { seen: Vec::new() }))
    });
    h.send(CommandRecord::FileSelected {
        panel:   FilePanel::Open,
        path:    PathBuf::from("/tmp/cart.crt"),
        purpose: Some(FilePurpose::Machine { what: 7, value: Some(3) }),
    });
    assert_eq!(h.tick().processed, 1);
    assert!(h.ui.borrow().messages.is_empty());

    assert_eq!(h.tick().processed, 1);
    assert_eq!(h.ui.borrow().messages, vec!["machine command 7"]);
}

// Fills the queue to capacity when it sees KeyDown(9).
struct QueueFiller {
    sender: Rc<RefCell<Option<CommandSender>>>,
}

impl MachineHandler for QueueFiller {
    fn try_handle(&mut self, record: &CommandRecord, _ctx: &mut HandlerContext<'_>) -> Option<MachineOutcome> {
        match record {
            CommandRecord::KeyDown(9) => {
                if let Some(sender) = self.sender.borrow().as_ref() {
                    while sender.enqueue(CommandRecord::KeyUp(9)) {}
                }
                Some(MachineOutcome::Handled)
            }
            _ => None,
        }
    }
}

#[test]
fn machine_file_selection_lost_to_a_full_queue_is_reported() {
    let sender = Rc::new(RefCell::new(None));
    let handler_sender = sender.clone();
    let mut h = Harness::with_builder(MachineClass::C64, |b| {
        b.with_queue(2, QueueOverflowPolicy::DropNewest)
            .with_machine_handler(Box::new(QueueFiller { sender: handler_sender }))
    });
    *sender.borrow_mut() = Some(h.dispatcher.sender());

    h.send(CommandRecord::KeyDown(9));
    h.send(CommandRecord::FileSelected {
        panel:   FilePanel::Open,
        path:    PathBuf::from("/tmp/cart.crt"),
        purpose: Some(FilePurpose::Machine { what: 7, value: None }),
    });
    h.tick();

    assert_eq!(h.errors(), vec![MSG_CANNOT_HANDLE_FILE]);
}

#[test]
fn disk_attach_uses_pending_panel_purpose() {
    let mut h = Harness::new(MachineClass::C64);
    let unit9 = DriveUnit::new(1).unwrap();
    h.send(menu(MenuAction::AttachDisk(unit9)));
    h.tick();
    assert_eq!(h.ui.borrow().panels, vec![(FilePanel::Open, FilePurpose::Disk(unit9))]);

    h.send(CommandRecord::file_selected(FilePanel::Open, "/tmp/game.d64"));
    h.tick();
    assert_eq!(h.calls(), vec!["attach_disk:9:/tmp/game.d64"]);

    // The pending purpose was used up.
    h.send(CommandRecord::file_selected(FilePanel::Open, "/tmp/other.d64"));
    h.tick();
    assert_eq!(h.calls().len(), 1);
}

#[test]
fn failed_attach_is_reported() {
    let mut h = Harness::new(MachineClass::C64);
    h.core.borrow_mut().fail_attach = true;
    h.send(menu(MenuAction::AttachTape));
    h.send(CommandRecord::file_selected(FilePanel::Open, "/tmp/broken.tap"));
    h.tick();
    assert_eq!(h.errors(), vec![MSG_CANNOT_ATTACH]);
}

#[test]
fn snapshot_save_runs_as_trap() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("state.vsf");
    let mut h = Harness::new(MachineClass::C64);
    h.send(menu(MenuAction::SnapshotSave));
    h.send(CommandRecord::file_selected(FilePanel::Save, &target));
    h.tick();
    assert!(h.calls().is_empty());

    assert_eq!(h.run_traps(), 1);
    assert_eq!(h.calls(), vec!["write_snapshot:true:true"]);
    assert!(target.exists());
}

#[test]
fn event_snapshot_end_sets_name_and_directory() {
    let mut h = Harness::new(MachineClass::C64);
    h.send(menu(MenuAction::EventSnapshotEnd));
    h.send(CommandRecord::file_selected(FilePanel::Save, "/tmp/snaps/end.vsf"));
    h.tick();

    let res = h.dispatcher.resources();
    assert_eq!(res.get_string(RES_EVENT_END_SNAPSHOT).unwrap(), "end.vsf");
    assert_eq!(res.get_string(RES_EVENT_SNAPSHOT_DIR).unwrap(), "/tmp/snaps");
}

#[test]
fn sound_recording_starts_and_stops() {
    let mut h = Harness::new(MachineClass::C64);
    h.send(menu(MenuAction::SoundRecord(SoundRecordFormat::Wav)));
    h.send(CommandRecord::file_selected(FilePanel::Save, "/tmp/tune"));
    h.tick();

    {
        let res = h.dispatcher.resources();
        assert_eq!(res.get_string(RES_SOUND_RECORD_DEVICE_ARG).unwrap(), "/tmp/tune.wav");
        assert_eq!(res.get_string(RES_SOUND_RECORD_DEVICE_NAME).unwrap(), "wav");
    }
    assert_eq!(h.dispatcher.status().status_text(), Some(MSG_SOUND_RECORD_STARTED));

    h.send(menu(MenuAction::SoundRecordStop));
    h.tick();
    assert_eq!(
        h.dispatcher
            .resources()
            .get_string(RES_SOUND_RECORD_DEVICE_NAME)
            .unwrap(),
        ""
    );
    assert_eq!(h.dispatcher.status().status_text(), Some(MSG_MEDIA_RECORD_STOPPED));
}

#[test]
fn exit_asks_for_confirmation() {
    let mut h = Harness::new(MachineClass::C64);
    h.ui.borrow_mut().confirm_answer = false;
    h.send(menu(MenuAction::ExitRequested));
    assert!(!h.tick().exit);
    assert_eq!(h.ui.borrow().confirms, 1);
    assert!(!h.ui.borrow().exit);

    h.ui.borrow_mut().confirm_answer = true;
    h.send(menu(MenuAction::ExitRequested));
    h.send(CommandRecord::KeyDown(1));
    let result = h.tick();
    assert!(result.exit);
    assert_eq!(result.processed, 1);
    assert!(h.ui.borrow().exit);
    assert!(h.dispatcher.exit_requested());
    assert!(h.calls().is_empty());
}

#[test]
fn exit_without_confirmation() {
    let mut h = Harness::new(MachineClass::C64);
    h.send(set_int(RES_CONFIRM_ON_EXIT, 0));
    h.send(menu(MenuAction::ExitRequested));
    assert!(h.tick().exit);
    assert_eq!(h.ui.borrow().confirms, 0);
}

/// A store whose persistent storage is unavailable.
struct ReadOnlyStore(MemoryResources);

impl ResourceStore for ReadOnlyStore {
    fn get_int(&self, name: &str) -> Result<i32, ResourceError> {
        self.0.get_int(name)
    }
    fn set_int(&mut self, name: &str, value: i32) -> Result<(), ResourceError> {
        self.0.set_int(name, value)
    }
    fn get_string(&self, name: &str) -> Result<String, ResourceError> {
        self.0.get_string(name)
    }
    fn set_string(&mut self, name: &str, value: &str) -> Result<(), ResourceError> {
        self.0.set_string(name, value)
    }
    fn load(&mut self) -> Result<(), ResourceError> {
        self.0.load()
    }
    fn save(&mut self) -> Result<(), ResourceError> {
        Err(ResourceError::Save("read-only".to_string()))
    }
    fn set_defaults(&mut self) -> Result<(), ResourceError> {
        self.0.set_defaults()
    }
}

#[test]
fn exit_saves_settings_and_reports_failure() {
    let mut res = MemoryResources::new();
    register_frontend_resources(
        &mut res,
        &UiResourceDefaults {
            save_resources_on_exit: true,
            ..Default::default()
        },
    );
    let mut h = Harness::with_builder(MachineClass::C64, |b| b.with_resources(Box::new(ReadOnlyStore(res))));
    h.send(menu(MenuAction::ExitRequested));

    // A failed save does not stop the exit.
    assert!(h.tick().exit);
    assert_eq!(h.errors(), vec![MSG_CANNOT_SAVE_SETTINGS]);
}

#[test]
fn settings_save_and_load() {
    let mut h = Harness::new(MachineClass::C64);
    h.send(menu(MenuAction::SettingsLoad));
    h.tick();
    assert_eq!(h.errors(), vec![MSG_CANNOT_LOAD_SETTINGS]);

    h.send(set_int(RES_JOYSTICK_DISPLAY, 1));
    h.send(menu(MenuAction::SettingsSave));
    h.send(set_int(RES_JOYSTICK_DISPLAY, 0));
    h.tick();
    assert!(!h.dispatcher.status().joyport_display());

    h.send(menu(MenuAction::SettingsLoad));
    h.tick();
    assert_eq!(h.errors().len(), 1);
    assert!(h.dispatcher.status().joyport_display());

    h.send(menu(MenuAction::SettingsDefault));
    h.tick();
    assert!(!h.dispatcher.status().joyport_display());
}

#[test]
fn attach_readonly_toggles_per_unit() {
    let mut h = Harness::new(MachineClass::C64);
    h.send(menu(MenuAction::ToggleAttachReadonly(DriveUnit::new(2).unwrap())));
    h.tick();
    let res = h.dispatcher.resources();
    assert_eq!(res.get_int("AttachDevice10Readonly").unwrap(), 1);
    assert_eq!(res.get_int("AttachDevice8Readonly").unwrap(), 0);
}

#[test]
fn fliplist_and_dropped_files() {
    let mut h = Harness::new(MachineClass::C64);
    h.send(menu(MenuAction::FlipNext));
    h.send(CommandRecord::DroppedFile(PathBuf::from("/tmp/demo.prg")));
    h.tick();
    assert_eq!(h.calls(), vec!["fliplist:Next:8", "autostart:/tmp/demo.prg"]);
}

#[test]
fn info_pages_are_shown() {
    let mut h = Harness::new(MachineClass::C64);
    h.send(menu(MenuAction::ShowInfo(vf_frontend_common::types::command::InfoPage::About)));
    h.send(menu(MenuAction::ShowInfo(vf_frontend_common::types::command::InfoPage::License)));
    h.tick();
    assert_eq!(h.ui.borrow().messages.len(), 1);
    assert_eq!(h.ui.borrow().texts.len(), 1);
}
