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

    frontend_common::resource_tables::mod.rs

    Table-driven menu items. Menu item ids are mapped onto resource toggles,
    radio-style integer values and string values.
    
    Tables are kept in three tiers searched in priority order: universal tables,
    tables for the machine class, and tables registered by the running machine.
*/

use indexmap::IndexMap;

use crate::resources::ResourceStore;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TableTier {
    Universal,
    /// Skipped entirely when running VSID.
    MachineClass,
    Machine,
}

#[derive(Clone, Debug)]
pub struct MenuToggle {
    pub name:    String,
    pub item_id: u32,
}

impl MenuToggle {
    pub fn new(name: &str, item_id: u32) -> Self {
        Self {
            name: name.to_string(),
            item_id,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ValueList {
    pub name:   String,
    pub values: Vec<(u32, i32)>,
}

impl ValueList {
    pub fn new(name: &str, values: &[(u32, i32)]) -> Self {
        Self {
            name:   name.to_string(),
            values: values.to_vec(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct StringList {
    pub name:   String,
    pub values: Vec<(u32, String)>,
}

impl StringList {
    pub fn new(name: &str, values: &[(u32, &str)]) -> Self {
        Self {
            name:   name.to_string(),
            values: values.iter().map(|(id, s)| (*id, s.to_string())).collect(),
        }
    }
}

#[derive(Clone, Debug, Default)]
struct TierTables {
    toggles: Vec<MenuToggle>,
    values:  Vec<ValueList>,
    strings: Vec<StringList>,
}

/// The resource mutation a menu item resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableMatch {
    Toggle { tier: TableTier, name: String },
    Value { tier: TableTier, name: String, value: i32 },
    String { tier: TableTier, name: String, value: String },
}

impl TableMatch {
    pub fn resource_name(&self) -> &str {
        match self {
            TableMatch::Toggle { name, .. } | TableMatch::Value { name, .. } | TableMatch::String { name, .. } => name,
        }
    }

    pub fn tier(&self) -> TableTier {
        match self {
            TableMatch::Toggle { tier, .. } | TableMatch::Value { tier, .. } | TableMatch::String { tier, .. } => *tier,
        }
    }
}

pub struct ResourceTables {
    tiers: IndexMap<TableTier, TierTables>,
}

impl Default for ResourceTables {
    fn default() -> Self {
        let mut tiers = IndexMap::new();
        // Insertion order is search order.
        tiers.insert(TableTier::Universal, TierTables::default());
        tiers.insert(TableTier::MachineClass, TierTables::default());
        tiers.insert(TableTier::Machine, TierTables::default());
        Self { tiers }
    }
}

impl ResourceTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_toggles(&mut self, tier: TableTier, toggles: &[MenuToggle]) {
        if let Some(tables) = self.tiers.get_mut(&tier) {
            tables.toggles.extend_from_slice(toggles);
        }
    }

    pub fn register_values(&mut self, tier: TableTier, values: &[ValueList]) {
        if let Some(tables) = self.tiers.get_mut(&tier) {
            tables.values.extend_from_slice(values);
        }
    }

    pub fn register_strings(&mut self, tier: TableTier, strings: &[StringList]) {
        if let Some(tables) = self.tiers.get_mut(&tier) {
            tables.strings.extend_from_slice(strings);
        }
    }

    /// Register the running machine's own toggles.
    pub fn register_menu_toggles(&mut self, toggles: &[MenuToggle]) {
        self.register_toggles(TableTier::Machine, toggles);
    }

    /// Register the running machine's own value lists.
    pub fn register_value_lists(&mut self, values: &[ValueList]) {
        self.register_values(TableTier::Machine, values);
    }

    fn searched_tiers(&self, vsid: bool) -> impl Iterator<Item = (&TableTier, &TierTables)> {
        self.tiers
            .iter()
            .filter(move |(tier, _)| !(vsid && **tier == TableTier::MachineClass))
    }

    /// Resolve a menu item id. Toggles are searched first in every tier, then value lists, then
    /// string lists. The first match wins.
    pub fn lookup(&self, item_id: u32, vsid: bool) -> Option<TableMatch> {
        for (tier, tables) in self.searched_tiers(vsid) {
            if let Some(toggle) = tables.toggles.iter().find(|t| t.item_id == item_id) {
                return Some(TableMatch::Toggle {
                    tier: *tier,
                    name: toggle.name.clone(),
                });
            }
        }
        for (tier, tables) in self.searched_tiers(vsid) {
            for list in &tables.values {
                if let Some((_, value)) = list.values.iter().find(|(id, _)| *id == item_id) {
                    return Some(TableMatch::Value {
                        tier: *tier,
                        name: list.name.clone(),
                        value: *value,
                    });
                }
            }
        }
        for (tier, tables) in self.searched_tiers(vsid) {
            for list in &tables.strings {
                if let Some((_, value)) = list.values.iter().find(|(id, _)| *id == item_id) {
                    return Some(TableMatch::String {
                        tier: *tier,
                        name: list.name.clone(),
                        value: value.clone(),
                    });
                }
            }
        }
        None
    }

    /// Every menu item id that should currently show a check mark. Resources that cannot be read
    /// are treated as unchecked.
    pub fn checked_items(&self, resources: &dyn ResourceStore, vsid: bool) -> Vec<u32> {
        let mut checked = Vec::new();
        for (_, tables) in self.searched_tiers(vsid) {
            for toggle in &tables.toggles {
                if resources.get_int(&toggle.name).is_ok_and(|v| v != 0) {
                    checked.push(toggle.item_id);
                }
            }
            for list in &tables.values {
                if let Ok(current) = resources.get_int(&list.name) {
                    checked.extend(list.values.iter().filter(|(_, v)| *v == current).map(|(id, _)| *id));
                }
            }
            for list in &tables.strings {
                if let Ok(current) = resources.get_string(&list.name) {
                    checked.extend(list.values.iter().filter(|(_, v)| *v == current).map(|(id, _)| *id));
                }
            }
        }
        checked
    }
}
