//! Equipment visuals
//!
//! The inventory tells the visual layer which item now sits in each
//! equipment role; the visual layer decides what that looks like.
//! Weapons and shields spawn a fresh prop into a socket every time they
//! change. Armor pieces switch between a fixed set of pre-built meshes.

use std::collections::HashMap;

use tracing::debug;

use crate::inventory::EquipmentRole;
use crate::item::ItemRef;

/// Receives per-role equipment changes from the inventory
pub trait VisualSync {
    fn update_visual(&mut self, role: EquipmentRole, item: Option<&ItemRef>);
}

/// A prop spawned into a socket
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnedVisual {
    pub prefab: String,
    /// Damage or defense baked in at spawn time
    pub value: f32,
    /// Increments on every spawn, so a respawn is never mistaken for the old prop
    pub generation: u64,
}

/// How one role is rendered
#[derive(Debug, Clone)]
pub enum VisualGroup {
    /// Spawns the item's prefab into the named socket
    Socket {
        socket: String,
        spawned: Option<SpawnedVisual>,
    },
    /// Shows exactly one of a fixed list of meshes; entry 0 is the fallback
    StaticMeshes {
        entries: Vec<String>,
        active: Option<usize>,
    },
}

impl VisualGroup {
    pub fn socket(socket: impl Into<String>) -> Self {
        VisualGroup::Socket {
            socket: socket.into(),
            spawned: None,
        }
    }

    pub fn static_meshes<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        VisualGroup::StaticMeshes {
            entries: entries.into_iter().map(Into::into).collect(),
            active: None,
        }
    }
}

/// Visual state of a character's equipment
#[derive(Debug, Clone, Default)]
pub struct CharacterVisuals {
    groups: HashMap<EquipmentRole, VisualGroup>,
    spawn_counter: u64,
}

impl CharacterVisuals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers how a role is rendered; roles without a group are ignored
    pub fn with_group(mut self, role: EquipmentRole, group: VisualGroup) -> Self {
        self.groups.insert(role, group);
        self
    }

    /// Spawned prop for a socketed role
    pub fn spawned(&self, role: EquipmentRole) -> Option<&SpawnedVisual> {
        match self.groups.get(&role)? {
            VisualGroup::Socket { spawned, .. } => spawned.as_ref(),
            VisualGroup::StaticMeshes { .. } => None,
        }
    }

    /// The prop currently in the weapon socket
    pub fn equipped_weapon(&self) -> Option<&SpawnedVisual> {
        self.spawned(EquipmentRole::Weapon)
    }

    /// Id of the visible mesh for a static role
    pub fn active_mesh(&self, role: EquipmentRole) -> Option<&str> {
        match self.groups.get(&role)? {
            VisualGroup::StaticMeshes { entries, active } => {
                active.and_then(|index| entries.get(index)).map(String::as_str)
            }
            VisualGroup::Socket { .. } => None,
        }
    }
}

impl VisualSync for CharacterVisuals {
    fn update_visual(&mut self, role: EquipmentRole, item: Option<&ItemRef>) {
        let Some(group) = self.groups.get_mut(&role) else {
            return;
        };

        match group {
            VisualGroup::Socket { socket, spawned } => {
                if let Some(old) = spawned.take() {
                    debug!(%role, prefab = %old.prefab, "Despawned equipment visual");
                }

                let Some(item) = item else { return };
                let Some(prefab) = item.visual_prefab.as_ref() else {
                    return;
                };

                self.spawn_counter += 1;
                debug!(%role, %socket, %prefab, "Spawned equipment visual");
                *spawned = Some(SpawnedVisual {
                    prefab: prefab.clone(),
                    value: item.value,
                    generation: self.spawn_counter,
                });
            }
            VisualGroup::StaticMeshes { entries, active } => {
                if entries.is_empty() {
                    return;
                }

                let wanted = item.and_then(|item| item.visual_id.as_deref());
                let matched = wanted.and_then(|id| entries.iter().position(|entry| entry == id));
                *active = Some(matched.unwrap_or(0));
            }
        }
    }
}
