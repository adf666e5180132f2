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

    frontend_common::ui_host.rs

    The UI host is the windowing layer as seen from the dispatcher: modal
    dialogs, file panels and menus.
*/

use crate::types::command::{FilePanel, FilePurpose};

pub trait UiHost {
    /// Show a modal error with a single acknowledgement.
    fn error(&mut self, message: &str);
    fn message(&mut self, message: &str);
    /// Ask the user a yes/no question.
    fn confirm(&mut self, title: &str, message: &str) -> bool;
    fn show_text(&mut self, title: &str, text: &str);
    /// Open a file panel. The selection comes back later as a
    /// [FileSelected](crate::types::command::CommandRecord::FileSelected) record.
    fn open_file_panel(&mut self, panel: FilePanel, purpose: &FilePurpose);
    /// Menu check marks should be redrawn. `checked` lists the item ids that should be checked.
    fn menus_changed(&mut self, checked: &[u32]);
    fn exit_requested(&mut self) {}
}
