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

    common::lib.rs

    Common front end library.
    Define types and methods shared by the status core and front ends.
*/

pub mod types;
pub mod util;

pub use crate::types::{
    drive::{DriveDisplayState, DriveLed, DriveUnit, DRIVE_NUM},
    joystick::{JoyportStatus, JOYPORT_SLOTS},
    machine::MachineClass,
    tape::{DatasetteControl, TapeControl},
};

/// Use FxHashMap for faster hashing.
/// Export this as VfHashMap so that we can easily switch to a different implementation if needed.
pub use fxhash::FxBuildHasher;
pub type VfHashMap<K, V> = std::collections::HashMap<K, V, FxBuildHasher>;
