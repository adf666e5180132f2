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

    frontend_common::resources::mod.rs

    The resource store interface, and a simple in-memory implementation of it.
    
    Resources are typed, string-keyed settings owned by the emulator. The
    dispatcher treats resource names as opaque keys.
*/

use vf_common::VfHashMap;

use crate::types::command::ResourceValue;

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("Unknown resource: {0}")]
    Unknown(String),
    #[error("Resource {0} is not of the requested type")]
    TypeMismatch(String),
    #[error("Invalid value for resource {name}: {value}")]
    InvalidValue { name: String, value: String },
    #[error("Cannot load resources: {0}")]
    Load(String),
    #[error("Cannot save resources: {0}")]
    Save(String),
}

pub trait ResourceStore {
    fn get_int(&self, name: &str) -> Result<i32, ResourceError>;
    fn set_int(&mut self, name: &str, value: i32) -> Result<(), ResourceError>;
    fn get_string(&self, name: &str) -> Result<String, ResourceError>;
    fn set_string(&mut self, name: &str, value: &str) -> Result<(), ResourceError>;

    /// Flip an integer resource between zero and one. Returns the new value.
    fn toggle(&mut self, name: &str) -> Result<i32, ResourceError> {
        let new_value = if self.get_int(name)? != 0 { 0 } else { 1 };
        self.set_int(name, new_value)?;
        Ok(new_value)
    }

    fn set_value(&mut self, name: &str, value: &ResourceValue) -> Result<(), ResourceError> {
        match value {
            ResourceValue::Int(i) => self.set_int(name, *i),
            ResourceValue::Str(s) => self.set_string(name, s),
        }
    }

    /// Reload resources from persistent storage.
    fn load(&mut self) -> Result<(), ResourceError>;
    /// Write resources to persistent storage.
    fn save(&mut self) -> Result<(), ResourceError>;
    /// Reset every resource to its default value.
    fn set_defaults(&mut self) -> Result<(), ResourceError>;
}

#[derive(Clone, Debug)]
struct ResourceEntry {
    value:   ResourceValue,
    default: ResourceValue,
}

/// An in-memory resource store. `save` and `load` persist to a snapshot held in memory.
#[derive(Default)]
pub struct MemoryResources {
    entries: VfHashMap<String, ResourceEntry>,
    saved:   Option<VfHashMap<String, ResourceValue>>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_int(&mut self, name: &str, default: i32) {
        self.register(name, ResourceValue::Int(default));
    }

    pub fn register_string(&mut self, name: &str, default: &str) {
        self.register(name, ResourceValue::Str(default.to_string()));
    }

    fn register(&mut self, name: &str, default: ResourceValue) {
        log::trace!("register(): {} = {}", name, default);
        self.entries.insert(
            name.to_string(),
            ResourceEntry {
                value: default.clone(),
                default,
            },
        );
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    fn entry_mut(&mut self, name: &str) -> Result<&mut ResourceEntry, ResourceError> {
        self.entries
            .get_mut(name)
            .ok_or_else(|| ResourceError::Unknown(name.to_string()))
    }
}

impl ResourceStore for MemoryResources {
    fn get_int(&self, name: &str) -> Result<i32, ResourceError> {
        match self.entries.get(name) {
            Some(ResourceEntry {
                value: ResourceValue::Int(i),
                ..
            }) => Ok(*i),
            Some(_) => Err(ResourceError::TypeMismatch(name.to_string())),
            None => Err(ResourceError::Unknown(name.to_string())),
        }
    }

    fn set_int(&mut self, name: &str, value: i32) -> Result<(), ResourceError> {
        let entry = self.entry_mut(name)?;
        match &mut entry.value {
            ResourceValue::Int(i) => {
                *i = value;
                Ok(())
            }
            ResourceValue::Str(_) => Err(ResourceError::TypeMismatch(name.to_string())),
        }
    }

    fn get_string(&self, name: &str) -> Result<String, ResourceError> {
        match self.entries.get(name) {
            Some(ResourceEntry {
                value: ResourceValue::Str(s),
                ..
            }) => Ok(s.clone()),
            Some(_) => Err(ResourceError::TypeMismatch(name.to_string())),
            None => Err(ResourceError::Unknown(name.to_string())),
        }
    }

    fn set_string(&mut self, name: &str, value: &str) -> Result<(), ResourceError> {
        let entry = self.entry_mut(name)?;
        match &mut entry.value {
            ResourceValue::Str(s) => {
                *s = value.to_string();
                Ok(())
            }
            ResourceValue::Int(_) => Err(ResourceError::TypeMismatch(name.to_string())),
        }
    }

    fn load(&mut self) -> Result<(), ResourceError> {
        let Some(saved) = &self.saved
        else {
            return Err(ResourceError::Load("no saved resources".to_string()));
        };
        for (name, value) in saved {
            if let Some(entry) = self.entries.get_mut(name) {
                entry.value = value.clone();
            }
        }
        Ok(())
    }

    fn save(&mut self) -> Result<(), ResourceError> {
        let mut saved = VfHashMap::default();
        for (name, entry) in &self.entries {
            saved.insert(name.clone(), entry.value.clone());
        }
        self.saved = Some(saved);
        Ok(())
    }

    fn set_defaults(&mut self) -> Result<(), ResourceError> {
        for entry in self.entries.values_mut() {
            entry.value = entry.default.clone();
        }
        Ok(())
    }
}
