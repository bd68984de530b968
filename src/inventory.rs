use crate::{
    config::Config,
    error::{ErrorMessage::ValidationError, InventoryError},
    host::{HostRecord, HostVars},
    sheet::{self, SheetRow},
};
use log::{debug, warn};
use serde::{ser::SerializeMap, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;

pub const META_KEY: &str = "_meta";

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Group {
    pub hosts: Vec<String>,
    pub vars: Map<String, Value>,
}

/// Groups and host variables, kept in the order they were first seen.
#[derive(Debug, Default)]
pub struct Inventory {
    groups: Vec<(String, Group)>,
    group_index: HashMap<String, usize>,
    hostvars: Vec<(String, HostVars)>,
    host_index: HashMap<String, usize>,
}

struct Ordered<'a, V>(&'a [(String, V)]);

impl<V: Serialize> Serialize for Ordered<'_, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct Meta<'a> {
    hostvars: Ordered<'a, HostVars>,
}

impl Serialize for Inventory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len() + 1))?;
        map.serialize_entry(
            META_KEY,
            &Meta {
                hostvars: Ordered(&self.hostvars),
            },
        )?;
        for (name, group) in &self.groups {
            map.serialize_entry(name, group)?;
        }
        map.end()
    }
}

impl Inventory {
    pub fn new() -> Self {
        Inventory::default()
    }

    pub fn load(config: &Config) -> Result<Self, InventoryError> {
        debug!("building inventory from {}", config.inventory_path.display());
        let rows = sheet::read_rows(&config.inventory_path)?;
        Inventory::from_rows(&rows)
    }

    /// Stops at the first invalid row.
    pub fn from_rows(rows: &[SheetRow]) -> Result<Self, InventoryError> {
        let mut inventory = Inventory::new();
        for row in rows {
            inventory.add(HostRecord::from_row(row)?)?;
        }
        Ok(inventory)
    }

    pub fn add(&mut self, record: HostRecord) -> Result<(), InventoryError> {
        if record.group == META_KEY {
            return Err(InventoryError::new(
                ValidationError,
                format!(
                    "row {} uses the reserved group name '{}'",
                    record.row, META_KEY
                ),
            ));
        }

        let next = self.groups.len();
        let index = *self.group_index.entry(record.group.clone()).or_insert(next);
        if index == next {
            self.groups.push((record.group.clone(), Group::default()));
        }
        self.groups[index].1.hosts.push(record.host.clone());

        let vars = record.host_vars();
        let existing = self.host_index.get(&record.host).copied();
        match existing {
            Some(index) => {
                warn!(
                    "host '{}' repeats on row {}; its variables replace the earlier ones",
                    record.host, record.row
                );
                self.hostvars[index].1 = vars;
            }
            None => {
                self.host_index
                    .insert(record.host.clone(), self.hostvars.len());
                self.hostvars.push((record.host, vars));
            }
        }
        Ok(())
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn host_vars(&self, host: &str) -> Option<&HostVars> {
        self.host_index.get(host).map(|&i| &self.hostvars[i].1)
    }

    pub fn host_count(&self) -> usize {
        self.hostvars.len()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Unknown hosts yield an empty object.
    pub fn host_json(&self, host: &str) -> serde_json::Result<String> {
        match self.host_vars(host) {
            Some(vars) => serde_json::to_string_pretty(vars),
            None => serde_json::to_string_pretty(&Map::new()),
        }
    }
}
