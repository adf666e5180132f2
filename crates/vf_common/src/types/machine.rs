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
use std::{fmt::Display, str::FromStr};

use serde::Deserialize;
use strum_macros::EnumIter;

/// The class of machine being emulated. Some front end behavior depends on it: VSID has no
/// keyboard, drives or class-specific menus, and a few classes have no datasette port.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash, Deserialize, EnumIter)]
pub enum MachineClass {
    #[default]
    C64,
    C64Dtv,
    Scpu64,
    C128,
    Vic20,
    Plus4,
    Pet,
    Cbm2,
    Vsid,
}

impl MachineClass {
    pub fn is_vsid(&self) -> bool {
        matches!(self, MachineClass::Vsid)
    }

    /// Whether the `Datasette` resource exists for this class and contributes to the tape display.
    pub fn has_datasette_resource(&self) -> bool {
        !matches!(self, MachineClass::Vsid | MachineClass::C64Dtv | MachineClass::Scpu64)
    }
}

impl FromStr for MachineClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "c64" => Ok(MachineClass::C64),
            "c64dtv" => Ok(MachineClass::C64Dtv),
            "scpu64" => Ok(MachineClass::Scpu64),
            "c128" => Ok(MachineClass::C128),
            "vic20" => Ok(MachineClass::Vic20),
            "plus4" => Ok(MachineClass::Plus4),
            "pet" => Ok(MachineClass::Pet),
            "cbm2" => Ok(MachineClass::Cbm2),
            "vsid" => Ok(MachineClass::Vsid),
            _ => Err(format!(
                "Invalid machine class: {}. Expected one of C64, C64Dtv, Scpu64, C128, Vic20, Plus4, Pet, Cbm2, Vsid",
                s
            )),
        }
    }
}

impl Display for MachineClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MachineClass::C64 => write!(f, "C64"),
            MachineClass::C64Dtv => write!(f, "C64DTV"),
            MachineClass::Scpu64 => write!(f, "SCPU64"),
            MachineClass::C128 => write!(f, "C128"),
            MachineClass::Vic20 => write!(f, "VIC20"),
            MachineClass::Plus4 => write!(f, "PLUS4"),
            MachineClass::Pet => write!(f, "PET"),
            MachineClass::Cbm2 => write!(f, "CBM-II"),
            MachineClass::Vsid => write!(f, "VSID"),
        }
    }
}
