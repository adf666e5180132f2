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

    frontend_common::lib.rs
*/

//! The Frontend Common library provides the status display and command dispatch core shared by
//! all ViceFront front ends.
//!
//! - StatusModel: the last reported state of drives, tape, joystick ports and emulation speed.
//! - DisplayRegistry: broadcasts status changes to the status surface of every open window.
//! - CommandQueue: a bounded FIFO of user commands, filled by the windowing layer.
//! - Dispatcher: drains the queue once per tick and applies each command.
//! - ResourceTables: maps table-driven menu items onto resource changes.
//! - QuickSnapshotManager: manages the ring of numbered quick snapshot files.
//!
//! The emulation core, resource persistence and the windowing layer are reached through the
//! [EmulatorCore], [ResourceStore], [TrapScheduler] and [UiHost] traits.

pub mod command_queue;
pub mod constants;
pub mod dispatch;
pub mod display_registry;
pub mod emulator_core;
pub mod machine_handler;
pub mod quicksnap_manager;
pub mod resource_tables;
pub mod resources;
pub mod status_model;
pub mod trap;
pub mod types;
pub mod ui_host;

pub use command_queue::{CommandQueue, CommandSender, QueueOverflowPolicy};
pub use dispatch::{Dispatcher, DispatcherBuilder, PauseState, TickResult};
pub use display_registry::{DisplayRegistry, StatusSurface, StatusUpdate, SurfaceHandle, SurfaceRef};
pub use emulator_core::EmulatorCore;
pub use resources::ResourceStore;
pub use status_model::{SpeedDisplayMode, StatusModel};
pub use trap::TrapScheduler;
pub use types::command::{CommandRecord, FilePanel, FilePurpose, MenuAction, StatusEvent};
pub use ui_host::UiHost;
