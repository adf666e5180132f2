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

    vf_config::attach.rs

    Parse media attach specifications given on the command line or in the
    configuration file.
*/

use std::{path::PathBuf, str::FromStr};

use serde_derive::Deserialize;
use vf_common::DriveUnit;
use vf_frontend_common::{CommandRecord, FilePanel, FilePurpose};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AttachTarget {
    Disk(DriveUnit),
    Tape,
    Autostart,
}

/// A file to attach at startup, written as `<target>:<path>` where target is a drive device
/// number (8-11), `tape` or `auto`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct AttachSpec {
    pub target: AttachTarget,
    pub path:   PathBuf,
}

impl AttachSpec {
    /// The command that performs this attachment, as if the file had been chosen in a file panel.
    pub fn command(&self) -> CommandRecord {
        let purpose = match self.target {
            AttachTarget::Disk(unit) => FilePurpose::Disk(unit),
            AttachTarget::Tape => FilePurpose::Tape,
            AttachTarget::Autostart => FilePurpose::Autostart,
        };
        CommandRecord::FileSelected {
            panel:   FilePanel::Open,
            path:    self.path.clone(),
            purpose: Some(purpose),
        }
    }
}

impl FromStr for AttachSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (target_str, path_str) = s.split_once(':').ok_or("Missing attach target")?;
        if path_str.is_empty() {
            return Err("Missing file path".to_string());
        }

        let target = match target_str.to_lowercase().as_str() {
            "tape" => AttachTarget::Tape,
            "auto" | "autostart" => AttachTarget::Autostart,
            other => {
                let device: u8 = other
                    .parse()
                    .map_err(|_| format!("Unknown attach target: {other}"))?;
                let unit = DriveUnit::from_device(device).ok_or(format!("Invalid drive device: {device}"))?;
                AttachTarget::Disk(unit)
            }
        };

        Ok(AttachSpec {
            target,
            path: PathBuf::from(path_str),
        })
    }
}

impl TryFrom<String> for AttachSpec {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
