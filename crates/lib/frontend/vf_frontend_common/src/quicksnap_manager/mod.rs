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

    frontend_common::quicksnap_manager::mod.rs

    Manage the ring of quick snapshot files.
    
    Quick snapshots are named quicksnap0.vsf through quicksnap9.vsf and live in
    a per-machine subdirectory of the base directory. The highest numbered file
    is the most recent. Once all ten slots are used the oldest file is deleted and
    the rest are renamed down by one; if files were removed by hand, the gaps
    are closed up instead.
*/

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use crate::constants::{QUICKSNAP_EXTENSION, QUICKSNAP_PREFIX, QUICKSNAP_SLOTS};

#[derive(Debug, thiserror::Error)]
pub enum QuickSnapError {
    #[error("No quick snapshots found")]
    NoSnapshots,
    #[error("Couldn't create quick snapshot directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
}

pub struct QuickSnapshotManager {
    dir: PathBuf,
    valid: [bool; QUICKSNAP_SLOTS],
    // Highest index found by the last scan, or updated by the last save.
    last_index: Option<usize>,
    count: usize,
}

impl QuickSnapshotManager {
    pub fn new(base_dir: impl AsRef<Path>, machine_name: &str) -> Self {
        Self {
            dir: base_dir.as_ref().join(machine_name),
            valid: [false; QUICKSNAP_SLOTS],
            last_index: None,
            count: 0,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_name(slot: usize) -> String {
        format!("{}{}.{}", QUICKSNAP_PREFIX, slot, QUICKSNAP_EXTENSION)
    }

    pub fn slot_path(&self, slot: usize) -> PathBuf {
        self.dir.join(Self::slot_name(slot))
    }

    /// Look for existing quick snapshot files.
    pub fn scan(&mut self) {
        self.count = 0;
        self.last_index = None;
        for slot in 0..QUICKSNAP_SLOTS {
            self.valid[slot] = self.slot_path(slot).exists();
            if self.valid[slot] {
                self.last_index = Some(slot);
                self.count += 1;
            }
        }
        log::debug!(
            "scan(): {} quick snapshots in {}, last index {:?}",
            self.count,
            self.dir.display(),
            self.last_index
        );
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn last_index(&self) -> Option<usize> {
        self.last_index
    }

    /// Choose the slot for a new quick snapshot, rotating or compacting existing files as needed,
    /// and return the path to write it to. Uses the state of the last [scan](Self::scan), updated by
    /// each save since.
    pub fn prepare_save(&mut self) -> Result<PathBuf, QuickSnapError> {
        let slot = match self.last_index {
            None => 0,
            Some(last) if last == QUICKSNAP_SLOTS - 1 => {
                if self.count == QUICKSNAP_SLOTS {
                    self.rotate()
                }
                else {
                    self.compact()
                }
            }
            Some(last) => last + 1,
        };
        self.last_index = Some(slot);
        self.valid[slot] = true;
        self.count = self.valid.iter().filter(|v| **v).count();

        fs::create_dir_all(&self.dir).map_err(|source| QuickSnapError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.slot_path(slot);
        log::debug!("prepare_save(): writing quick snapshot to {}", path.display());
        Ok(path)
    }

    /// The path of the most recent quick snapshot.
    pub fn load_path(&self) -> Result<PathBuf, QuickSnapError> {
        match self.last_index {
            Some(slot) if self.count > 0 => Ok(self.slot_path(slot)),
            _ => Err(QuickSnapError::NoSnapshots),
        }
    }

    // Every slot is full: drop the oldest and move everything down by one.
    fn rotate(&mut self) -> usize {
        let oldest = self.slot_path(0);
        log::debug!("rotate(): removing {}", oldest.display());
        if let Err(e) = fs::remove_file(&oldest) {
            log::warn!("rotate(): couldn't remove {}: {}", oldest.display(), e);
        }
        for slot in 1..QUICKSNAP_SLOTS {
            self.rename_slot(slot, slot - 1);
        }
        QUICKSNAP_SLOTS - 1
    }

    // The last slot is used but there are gaps: close them up and return the first free slot.
    fn compact(&mut self) -> usize {
        let mut free = self.valid.iter().position(|v| !*v).unwrap_or(QUICKSNAP_SLOTS - 1);
        for slot in (free + 1)..QUICKSNAP_SLOTS {
            if self.valid[slot] {
                self.rename_slot(slot, free);
                self.valid[free] = true;
                self.valid[slot] = false;
                free += 1;
            }
        }
        free
    }

    fn rename_slot(&self, from: usize, to: usize) {
        let from_path = self.slot_path(from);
        let to_path = self.slot_path(to);
        log::debug!("rename_slot(): {} -> {}", from_path.display(), to_path.display());
        if let Err(e) = fs::rename(&from_path, &to_path) {
            log::warn!(
                "rename_slot(): couldn't rename {} to {}: {}",
                from_path.display(),
                to_path.display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path, contents: &str) {
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn first_save_uses_slot_zero() {
        let tmp = tempfile::tempdir().unwrap();
        let mut qs = QuickSnapshotManager::new(tmp.path(), "C64");
        qs.scan();
        assert_eq!(qs.last_index(), None);
        assert!(matches!(qs.load_path(), Err(QuickSnapError::NoSnapshots)));

        let path = qs.prepare_save().unwrap();
        assert_eq!(path, tmp.path().join("C64").join("quicksnap0.vsf"));
        assert!(tmp.path().join("C64").is_dir());
    }

    #[test]
    fn saves_follow_last_index() {
        let tmp = tempfile::tempdir().unwrap();
        let mut qs = QuickSnapshotManager::new(tmp.path(), "VIC20");
        fs::create_dir_all(qs.dir()).unwrap();
        touch(&qs.slot_path(0), "a");
        touch(&qs.slot_path(4), "b");
        qs.scan();
        assert_eq!(qs.count(), 2);
        assert_eq!(qs.last_index(), Some(4));
        assert_eq!(qs.prepare_save().unwrap(), qs.slot_path(5));
    }

    #[test]
    fn gaps_are_compacted() {
        let tmp = tempfile::tempdir().unwrap();
        let mut qs = QuickSnapshotManager::new(tmp.path(), "C128");
        fs::create_dir_all(qs.dir()).unwrap();
        for slot in [0, 1, 3, 5, 9] {
            touch(&qs.slot_path(slot), &format!("snap{}", slot));
        }
        qs.scan();
        let path = qs.prepare_save().unwrap();

        // 3 -> 2, 5 -> 3, 9 -> 4, new snapshot goes to 5.
        assert_eq!(path, qs.slot_path(5));
        assert_eq!(fs::read_to_string(qs.slot_path(2)).unwrap(), "snap3");
        assert_eq!(fs::read_to_string(qs.slot_path(3)).unwrap(), "snap5");
        assert_eq!(fs::read_to_string(qs.slot_path(4)).unwrap(), "snap9");
        assert!(!qs.slot_path(9).exists());
    }

    #[test]
    fn full_ring_rotates() {
        let tmp = tempfile::tempdir().unwrap();
        let mut qs = QuickSnapshotManager::new(tmp.path(), "PET");
        fs::create_dir_all(qs.dir()).unwrap();
        for slot in 0..QUICKSNAP_SLOTS {
            touch(&qs.slot_path(slot), &format!("snap{}", slot));
        }
        qs.scan();
        let path = qs.prepare_save().unwrap();
        assert_eq!(path, qs.slot_path(9));
        assert_eq!(fs::read_to_string(qs.slot_path(0)).unwrap(), "snap1");
        assert_eq!(fs::read_to_string(qs.slot_path(8)).unwrap(), "snap9");
        assert!(!qs.slot_path(9).exists());
    }

    #[test]
    fn consecutive_saves_without_a_scan() {
        let tmp = tempfile::tempdir().unwrap();
        let mut qs = QuickSnapshotManager::new(tmp.path(), "C64");
        fs::create_dir_all(qs.dir()).unwrap();
        for slot in 0..QUICKSNAP_SLOTS - 1 {
            touch(&qs.slot_path(slot), &format!("snap{}", slot));
        }
        qs.scan();

        let path = qs.prepare_save().unwrap();
        assert_eq!(path, qs.slot_path(9));
        touch(&path, "snap9");
        assert_eq!(qs.count(), QUICKSNAP_SLOTS);

        // The ring is now full, so the oldest goes.
        let path = qs.prepare_save().unwrap();
        assert_eq!(path, qs.slot_path(9));
        assert_eq!(fs::read_to_string(qs.slot_path(0)).unwrap(), "snap1");
        assert_eq!(fs::read_to_string(qs.slot_path(8)).unwrap(), "snap9");
    }
}
