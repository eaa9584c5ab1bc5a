//! Immutable world snapshot: live entities, one table per component kind,
//! and global resources.
//!
//! Every operation consumes a `World` and returns the next one. Tables sit
//! behind `Arc` and are copied on write with [`Arc::make_mut`], so a clone
//! of a snapshot is cheap and is never affected by later operations on
//! another clone. Callers that want to keep the previous snapshot simply
//! clone it first.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use crate::components::*;
use crate::entity::EntityId;
use crate::enums::{ComponentKind, TagKind};
use crate::resources::Resources;

/// One component table: entity id to component data, ascending by id.
pub type Table<T> = Arc<BTreeMap<EntityId, T>>;

/// The fixed set of component tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Components {
    pub position: Table<Position>,
    pub velocity: Table<Velocity>,
    pub sprite: Table<Sprite>,
    pub collider: Table<Collider>,
    pub health: Table<Health>,
    pub lifetime: Table<Lifetime>,
    pub tag: Table<Tag>,
}

impl Components {
    fn contains(&self, kind: ComponentKind, id: EntityId) -> bool {
        match kind {
            ComponentKind::Position => self.position.contains_key(&id),
            ComponentKind::Velocity => self.velocity.contains_key(&id),
            ComponentKind::Sprite => self.sprite.contains_key(&id),
            ComponentKind::Collider => self.collider.contains_key(&id),
            ComponentKind::Health => self.health.contains_key(&id),
            ComponentKind::Lifetime => self.lifetime.contains_key(&id),
            ComponentKind::Tag => self.tag.contains_key(&id),
        }
    }

    fn remove_all(&mut self, id: EntityId) {
        remove_row(&mut self.position, id);
        remove_row(&mut self.velocity, id);
        remove_row(&mut self.sprite, id);
        remove_row(&mut self.collider, id);
        remove_row(&mut self.health, id);
        remove_row(&mut self.lifetime, id);
        remove_row(&mut self.tag, id);
    }
}

/// Drop a row, copying the table only if it actually holds one.
fn remove_row<T: Clone>(table: &mut Table<T>, id: EntityId) {
    if table.contains_key(&id) {
        Arc::make_mut(table).remove(&id);
    }
}

/// A component record stored in one of the world's tables.
pub trait Component: Clone + fmt::Debug + PartialEq + 'static {
    const KIND: ComponentKind;

    fn table(components: &Components) -> &Table<Self>;
    fn table_mut(components: &mut Components) -> &mut Table<Self>;
}

macro_rules! component {
    ($ty:ty, $kind:ident, $field:ident) => {
        impl Component for $ty {
            const KIND: ComponentKind = ComponentKind::$kind;

            fn table(components: &Components) -> &Table<Self> {
                &components.$field
            }

            fn table_mut(components: &mut Components) -> &mut Table<Self> {
                &mut components.$field
            }
        }
    };
}

component!(Position, Position, position);
component!(Velocity, Velocity, velocity);
component!(Sprite, Sprite, sprite);
component!(Collider, Collider, collider);
component!(Health, Health, health);
component!(Lifetime, Lifetime, lifetime);
component!(Tag, Tag, tag);

/// The single state value at a tick boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    next_id: u64,
    entities: Arc<BTreeSet<EntityId>>,
    components: Components,
    resources: Arc<Resources>,
}

impl World {
    /// An empty world carrying the given resources. Ids start at 1.
    pub fn new(resources: Resources) -> Self {
        Self {
            next_id: 1,
            entities: Arc::default(),
            components: Components::default(),
            resources: Arc::new(resources),
        }
    }

    /// Allocate a fresh id and mark it live.
    pub fn add_entity(mut self) -> (World, EntityId) {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        Arc::make_mut(&mut self.entities).insert(id);
        (self, id)
    }

    /// Remove `id` from the live set and from every table in one step.
    /// Unknown ids are a no-op.
    pub fn remove_entity(mut self, id: EntityId) -> World {
        if !self.entities.contains(&id) {
            return self;
        }
        Arc::make_mut(&mut self.entities).remove(&id);
        self.components.remove_all(id);
        self
    }

    /// Insert or replace `id`'s row in `C`'s table.
    /// Ignored for ids that are not live, so no orphan rows can appear.
    pub fn add_component<C: Component>(mut self, id: EntityId, data: C) -> World {
        if !self.entities.contains(&id) {
            return self;
        }
        Arc::make_mut(C::table_mut(&mut self.components)).insert(id, data);
        self
    }

    /// Replace `id`'s `C` with `f(current)`. No-op if the row is absent.
    pub fn update_component<C: Component>(self, id: EntityId, f: impl FnOnce(&C) -> C) -> World {
        let next = match self.get::<C>(id) {
            Some(current) => f(current),
            None => return self,
        };
        self.add_component(id, next)
    }

    pub fn get<C: Component>(&self, id: EntityId) -> Option<&C> {
        C::table(&self.components).get(&id)
    }

    pub fn has(&self, kind: ComponentKind, id: EntityId) -> bool {
        self.components.contains(kind, id)
    }

    /// Live ids that have every listed kind, ascending.
    pub fn entities_with(&self, kinds: &[ComponentKind]) -> Vec<EntityId> {
        self.entities
            .iter()
            .copied()
            .filter(|&id| kinds.iter().all(|&k| self.components.contains(k, id)))
            .collect()
    }

    /// Ids whose Tag has the given kind, ascending.
    pub fn tag_ids(&self, kind: TagKind) -> Vec<EntityId> {
        self.components
            .tag
            .iter()
            .filter(|(_, tag)| tag.kind == kind)
            .map(|(&id, _)| id)
            .collect()
    }

    pub fn first_entity_with_tag(&self, kind: TagKind) -> Option<EntityId> {
        self.components
            .tag
            .iter()
            .find(|(_, tag)| tag.kind == kind)
            .map(|(&id, _)| id)
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entities.contains(&id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Live ids, ascending.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().copied()
    }

    /// The id the next `add_entity` will hand out.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn components(&self) -> &Components {
        &self.components
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    /// Return a world whose resources are `f` applied to a copy of these.
    pub fn with_resources(mut self, f: impl FnOnce(&mut Resources)) -> World {
        f(Arc::make_mut(&mut self.resources));
        self
    }
}
