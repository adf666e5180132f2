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

    frontend_common::display_registry::mod.rs

    The display registry tracks the status surfaces of every open emulator window
    and pushes status updates out to them.
    
    Surfaces are owned by the windowing layer. The registry only holds weak
    references, so a window that is torn down without unregistering is skipped
    rather than kept alive.
*/

use std::sync::{Arc, RwLock, Weak};

use vf_common::{DriveDisplayState, DriveLed, DriveUnit, JoyportStatus, TapeControl};

/// A single change to the status display.
#[derive(Clone, Debug, PartialEq)]
pub enum StatusUpdate {
    DriveStatus(DriveDisplayState),
    DriveLed { unit: DriveUnit, led: DriveLed },
    DriveTrack { unit: DriveUnit, track: f64 },
    DriveImage { unit: DriveUnit, name: Option<String> },
    TapeEnabled(bool),
    TapeCounter(u32),
    TapeMotor(bool),
    TapeControl(TapeControl),
    TapeImage(Option<String>),
    Speed(String),
    StatusText(Option<String>),
    Joyport { port: usize, status: JoyportStatus },
    JoyportEnabled(bool),
}

/// A drawable status region belonging to one emulator window.
pub trait StatusSurface {
    /// Whether the window currently shows a status bar. Updates are not applied to surfaces
    /// without one.
    fn has_status_region(&self) -> bool {
        true
    }
    fn apply(&mut self, update: &StatusUpdate);
}

pub type SurfaceRef = Arc<RwLock<dyn StatusSurface + Send + Sync>>;
type WeakSurfaceRef = Weak<RwLock<dyn StatusSurface + Send + Sync>>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(usize);

impl SurfaceHandle {
    pub fn idx(&self) -> usize {
        self.0
    }
}

#[derive(Default)]
pub struct DisplayRegistry {
    surfaces: Vec<Option<WeakSurfaceRef>>,
}

impl DisplayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, surface: &SurfaceRef) -> SurfaceHandle {
        let weak = Arc::downgrade(surface);
        // Reuse a free slot if one exists so handles stay small.
        if let Some(idx) = self.surfaces.iter().position(|s| s.is_none()) {
            self.surfaces[idx] = Some(weak);
            log::debug!("register(): surface registered in slot {}", idx);
            return SurfaceHandle(idx);
        }
        self.surfaces.push(Some(weak));
        log::debug!("register(): surface registered in slot {}", self.surfaces.len() - 1);
        SurfaceHandle(self.surfaces.len() - 1)
    }

    /// Remove a surface. Returns false if the handle was not registered.
    pub fn unregister(&mut self, handle: SurfaceHandle) -> bool {
        match self.surfaces.get_mut(handle.0) {
            Some(slot @ Some(_)) => {
                *slot = None;
                log::debug!("unregister(): surface in slot {} unregistered", handle.0);
                true
            }
            _ => false,
        }
    }

    /// The number of registered handles. Handles whose surface has been dropped still count
    /// until they are unregistered.
    pub fn len(&self) -> usize {
        self.surfaces.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn handles(&self) -> Vec<SurfaceHandle> {
        self.surfaces
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|_| SurfaceHandle(i)))
            .collect()
    }

    /// Apply an update to every live surface with a status region. Returns the number of surfaces
    /// the update was applied to.
    pub fn broadcast(&self, update: &StatusUpdate) -> usize {
        let mut applied = 0;
        for (idx, slot) in self.surfaces.iter().enumerate() {
            if let Some(weak) = slot {
                if Self::apply_to(idx, weak, update) {
                    applied += 1;
                }
            }
        }
        applied
    }

    /// Apply an update to a single surface. Returns false if the surface is gone or has no
    /// status region.
    pub fn send_to(&self, handle: SurfaceHandle, update: &StatusUpdate) -> bool {
        match self.surfaces.get(handle.0) {
            Some(Some(weak)) => Self::apply_to(handle.0, weak, update),
            _ => false,
        }
    }

    fn apply_to(idx: usize, weak: &WeakSurfaceRef, update: &StatusUpdate) -> bool {
        let Some(surface) = weak.upgrade()
        else {
            log::trace!("apply_to(): surface in slot {} has been destroyed, skipping", idx);
            return false;
        };
        let applied = match surface.write() {
            Ok(mut guard) => {
                if guard.has_status_region() {
                    guard.apply(update);
                    true
                }
                else {
                    false
                }
            }
            Err(_) => {
                log::warn!("apply_to(): surface in slot {} lock is poisoned, skipping", idx);
                false
            }
        };
        applied
    }
}
