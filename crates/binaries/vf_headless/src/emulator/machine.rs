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

    vf_headless::emulator::machine.rs

    Resources, menu tables and the machine specific command handler of the
    simulated machine.
*/

use std::{cell::RefCell, rc::Rc};

use vf_common::MachineClass;
use vf_frontend_common::{
    dispatch::{register_frontend_resources, UiResourceDefaults},
    machine_handler::{HandlerContext, MachineHandler, MachineOutcome},
    resource_tables::{MenuToggle, ResourceTables, StringList, TableTier, ValueList},
    resources::MemoryResources,
    CommandRecord,
};

use crate::sim_machine::SimMachine;

pub const RES_WARP_MODE: &str = "WarpMode";
pub const RES_SOUND: &str = "Sound";
pub const RES_SOUND_DEVICE: &str = "SoundDeviceName";
pub const RES_DRIVE_TRUE_EMULATION: &str = "DriveTrueEmulation";
pub const RES_SID_FILTERS: &str = "SidFilters";
pub const RES_SID_MODEL: &str = "SidModel";
pub const RES_BORDER_MODE: &str = "VICIIBorderMode";

// Menu item ids
pub const IDM_WARP_MODE: u32 = 1;
pub const IDM_SOUND: u32 = 2;
pub const IDM_SOUND_DEVICE_DUMMY: u32 = 3;
pub const IDM_SOUND_DEVICE_WAV: u32 = 4;
pub const IDM_DRIVE_TRUE_EMULATION: u32 = 10;
pub const IDM_SID_FILTERS: u32 = 20;
pub const IDM_SID_MODEL_6581: u32 = 21;
pub const IDM_SID_MODEL_8580: u32 = 22;
pub const IDM_BORDER_NORMAL: u32 = 30;
pub const IDM_BORDER_FULL: u32 = 31;
pub const IDM_BORDER_DEBUG: u32 = 32;
pub const IDM_BORDER_NONE: u32 = 33;

// Machine command codes
pub const MACHINE_CMD_CARTRIDGE: u32 = 1;
pub const MACHINE_CMD_TUNE: u32 = 2;

/// Every resource the simulated machine knows about, on top of the front end's own.
pub fn machine_resources(class: MachineClass, defaults: &UiResourceDefaults) -> MemoryResources {
    let mut res = MemoryResources::new();
    register_frontend_resources(&mut res, defaults);
    res.register_int(RES_WARP_MODE, 0);
    res.register_int(RES_SOUND, 1);
    res.register_string(RES_SOUND_DEVICE, "dummy");
    res.register_int(RES_SID_FILTERS, 1);
    res.register_int(RES_SID_MODEL, 0);
    if !class.is_vsid() {
        res.register_int(RES_DRIVE_TRUE_EMULATION, 1);
        res.register_int(RES_BORDER_MODE, 0);
    }
    res
}

pub fn machine_tables(class: MachineClass) -> ResourceTables {
    let mut tables = ResourceTables::new();
    tables.register_toggles(
        TableTier::Universal,
        &[
            MenuToggle::new(RES_WARP_MODE, IDM_WARP_MODE),
            MenuToggle::new(RES_SOUND, IDM_SOUND),
        ],
    );
    tables.register_strings(
        TableTier::Universal,
        &[StringList::new(
            RES_SOUND_DEVICE,
            &[(IDM_SOUND_DEVICE_DUMMY, "dummy"), (IDM_SOUND_DEVICE_WAV, "wav")],
        )],
    );
    tables.register_toggles(
        TableTier::MachineClass,
        &[MenuToggle::new(RES_DRIVE_TRUE_EMULATION, IDM_DRIVE_TRUE_EMULATION)],
    );

    tables.register_menu_toggles(&[MenuToggle::new(RES_SID_FILTERS, IDM_SID_FILTERS)]);
    let mut values = vec![ValueList::new(
        RES_SID_MODEL,
        &[(IDM_SID_MODEL_6581, 0), (IDM_SID_MODEL_8580, 1)],
    )];
    if !class.is_vsid() {
        values.push(ValueList::new(
            RES_BORDER_MODE,
            &[
                (IDM_BORDER_NORMAL, 0),
                (IDM_BORDER_FULL, 1),
                (IDM_BORDER_DEBUG, 2),
                (IDM_BORDER_NONE, 3),
            ],
        ));
    }
    tables.register_value_lists(&values);
    tables
}

/// Handles the commands only the simulated machine understands: cartridge images and, for VSID,
/// tune selection.
pub struct SimMachineHandler {
    machine: Rc<RefCell<SimMachine>>,
}

impl SimMachineHandler {
    pub fn new(machine: Rc<RefCell<SimMachine>>) -> Self {
        Self { machine }
    }
}

impl MachineHandler for SimMachineHandler {
    fn try_handle(&mut self, record: &CommandRecord, ctx: &mut HandlerContext<'_>) -> Option<MachineOutcome> {
        let CommandRecord::Machine(command) = record
        else {
            return None;
        };

        let Some(path) = command.path.as_deref()
        else {
            log::warn!("try_handle(): machine command {} without a file", command.what);
            return Some(MachineOutcome::Failed("No file given.".to_string()));
        };

        let result = match command.what {
            MACHINE_CMD_CARTRIDGE if !ctx.machine_class.is_vsid() => {
                self.machine.borrow_mut().attach_cartridge(path)
            }
            MACHINE_CMD_TUNE if ctx.machine_class.is_vsid() => {
                let tune = command.value.unwrap_or(1);
                self.machine.borrow_mut().load_tune(path, tune)
            }
            other => {
                log::debug!("try_handle(): machine command {} not handled on {}", other, ctx.machine_class);
                return None;
            }
        };

        Some(match result {
            Ok(()) => MachineOutcome::Handled,
            Err(e) => {
                log::error!("try_handle(): {}", e);
                MachineOutcome::Failed("Cannot attach specified file".to_string())
            }
        })
    }
}
