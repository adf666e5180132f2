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
*/

//! Joystick port status as shown on a status bar.

use std::fmt::Display;

/// Number of joystick port slots tracked. Slot 0 is unused; ports 1 and 2 are the real ports.
pub const JOYPORT_SLOTS: usize = 3;

/// The direction and fire bits read from a joystick port.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct JoyportStatus(pub u8);

impl JoyportStatus {
    pub const UP: u8 = 0x01;
    pub const DOWN: u8 = 0x02;
    pub const LEFT: u8 = 0x04;
    pub const RIGHT: u8 = 0x08;
    pub const FIRE: u8 = 0x10;

    /// The value a port holds before anything has been reported.
    pub const UNKNOWN: JoyportStatus = JoyportStatus(0xFF);

    pub fn up(&self) -> bool {
        self.0 & Self::UP != 0
    }
    pub fn down(&self) -> bool {
        self.0 & Self::DOWN != 0
    }
    pub fn left(&self) -> bool {
        self.0 & Self::LEFT != 0
    }
    pub fn right(&self) -> bool {
        self.0 & Self::RIGHT != 0
    }
    pub fn fire(&self) -> bool {
        self.0 & Self::FIRE != 0
    }
}

impl From<u8> for JoyportStatus {
    fn from(bits: u8) -> Self {
        JoyportStatus(bits)
    }
}

impl Display for JoyportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let flag = |set: bool, c: char| if set { c } else { '-' };
        write!(
            f,
            "{}{}{}{}{}",
            flag(self.up(), 'U'),
            flag(self.down(), 'D'),
            flag(self.left(), 'L'),
            flag(self.right(), 'R'),
            flag(self.fire(), 'F')
        )
    }
}
