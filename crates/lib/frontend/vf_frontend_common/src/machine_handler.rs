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

    frontend_common::machine_handler.rs

    Machine specific command handling.
*/

use vf_common::MachineClass;

use crate::{
    display_registry::DisplayRegistry,
    emulator_core::EmulatorCore,
    resources::ResourceStore,
    status_model::StatusModel,
    types::command::CommandRecord,
    ui_host::UiHost,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MachineOutcome {
    Handled,
    /// The command was consumed but failed. The message is shown to the user.
    Failed(String),
}

/// Everything a machine handler may touch while handling a command.
pub struct HandlerContext<'a> {
    pub machine_class: MachineClass,
    pub resources: &'a mut dyn ResourceStore,
    pub core: &'a mut dyn EmulatorCore,
    pub ui: &'a mut dyn UiHost,
    pub status: &'a mut StatusModel,
    pub registry: &'a DisplayRegistry,
}

/// A first-chance handler registered by the running machine. It sees every command before the
/// generic dispatcher does. Returning `Some` consumes the command.
pub trait MachineHandler {
    fn try_handle(&mut self, record: &CommandRecord, ctx: &mut HandlerContext<'_>) -> Option<MachineOutcome>;
}
