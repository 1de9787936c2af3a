//! Column-oriented component storage
//!
//! Each component type lives in its own secondary map keyed by entity, so
//! iteration over one component type never touches another's memory. The
//! registry enforces the at-most-one-component-per-type-per-entity rule at
//! insertion time and offers singleton queries for "the player"-style
//! components that must exist exactly once.

use super::Entity;
use slotmap::{SecondaryMap, SlotMap};
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Marker trait for components
pub trait Component: 'static + Send + Sync {}

/// Errors raised by registry operations that violate its contracts
#[derive(Debug, thiserror::Error)]
pub enum EcsError {
    /// A component of this type already exists on the entity
    #[error("component of type \"{type_name}\" already exists on entity")]
    DuplicateComponent {
        /// Name of the offending component type
        type_name: &'static str,
    },

    /// The entity handle is stale or was never created by this registry
    #[error("entity handle is not valid in this registry")]
    DeadEntity,

    /// A singleton query found no instance of the component
    #[error("component of type \"{type_name}\" not found")]
    SingletonMissing {
        /// Name of the requested component type
        type_name: &'static str,
    },

    /// A singleton query found more than one instance of the component
    #[error("more than one component of type \"{type_name}\" exists in the registry, found {count}")]
    SingletonAmbiguous {
        /// Name of the requested component type
        type_name: &'static str,
        /// How many instances were found
        count: usize,
    },
}

trait Column: Any {
    fn remove_entity(&mut self, entity: Entity);
    fn clear(&mut self);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct ComponentColumn<T: Component> {
    cells: SecondaryMap<Entity, T>,
}

impl<T: Component> Column for ComponentColumn<T> {
    fn remove_entity(&mut self, entity: Entity) {
        self.cells.remove(entity);
    }

    fn clear(&mut self) {
        self.cells.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Registry containing all entities and components of one scene
#[derive(Default)]
pub struct Registry {
    entities: SlotMap<Entity, ()>,
    columns: HashMap<TypeId, Box<dyn Column>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh entity with no components
    pub fn create_entity(&mut self) -> Entity {
        self.entities.insert(())
    }

    /// Destroy an entity, dropping every component attached to it.
    ///
    /// This is the raw storage operation: components that own external
    /// resources (physics handles) are released by
    /// [`crate::scene::SceneContext::destroy_entity`], which calls this
    /// afterwards.
    pub fn destroy_entity(&mut self, entity: Entity) {
        for column in self.columns.values_mut() {
            column.remove_entity(entity);
        }
        self.entities.remove(entity);
    }

    /// Whether the handle refers to a live entity
    pub fn is_valid(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Iterate all live entities
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.keys()
    }

    /// Drop every entity and component
    pub fn clear(&mut self) {
        for column in self.columns.values_mut() {
            column.clear();
        }
        self.entities.clear();
    }

    /// Attach a component to an entity.
    ///
    /// Fails with [`EcsError::DuplicateComponent`] if the entity already
    /// holds a component of this type, and [`EcsError::DeadEntity`] if the
    /// handle is stale.
    pub fn add_component<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<&mut T, EcsError> {
        if !self.entities.contains_key(entity) {
            return Err(EcsError::DeadEntity);
        }
        let column = self
            .columns
            .entry(TypeId::of::<T>())
            .or_insert_with(|| {
                Box::new(ComponentColumn::<T> {
                    cells: SecondaryMap::new(),
                })
            })
            .as_any_mut()
            .downcast_mut::<ComponentColumn<T>>()
            .expect("column type is keyed by TypeId");

        if column.cells.contains_key(entity) {
            return Err(EcsError::DuplicateComponent {
                type_name: std::any::type_name::<T>(),
            });
        }
        column.cells.insert(entity, component);
        Ok(&mut column.cells[entity])
    }

    /// Get a component, or `None` if the entity does not hold one
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.cells::<T>()?.get(entity)
    }

    /// Get a mutable component, or `None` if the entity does not hold one
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.cells_mut::<T>()?.get_mut(entity)
    }

    /// Whether the entity holds a component of this type
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.cells::<T>().is_some_and(|cells| cells.contains_key(entity))
    }

    /// Detach and return a component
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.cells_mut::<T>()?.remove(entity)
    }

    /// The unique instance of a component type.
    ///
    /// Fails when zero or more than one entity holds the component.
    pub fn singleton<T: Component>(&self) -> Result<&T, EcsError> {
        let entity = self.singleton_entity::<T>()?;
        self.get_component::<T>(entity)
            .ok_or(EcsError::SingletonMissing {
                type_name: std::any::type_name::<T>(),
            })
    }

    /// The entity holding the unique instance of a component type
    pub fn singleton_entity<T: Component>(&self) -> Result<Entity, EcsError> {
        let Some(cells) = self.cells::<T>() else {
            return Err(EcsError::SingletonMissing {
                type_name: std::any::type_name::<T>(),
            });
        };
        let count = cells.len();
        match count {
            0 => Err(EcsError::SingletonMissing {
                type_name: std::any::type_name::<T>(),
            }),
            1 => cells
                .keys()
                .next()
                .ok_or(EcsError::SingletonMissing {
                    type_name: std::any::type_name::<T>(),
                }),
            _ => Err(EcsError::SingletonAmbiguous {
                type_name: std::any::type_name::<T>(),
                count,
            }),
        }
    }

    /// Collect the entities currently holding a component of this type.
    ///
    /// Returns an owned list so callers can mutate components while
    /// walking it.
    pub fn entities_with<T: Component>(&self) -> Vec<Entity> {
        self.cells::<T>()
            .map(|cells| cells.keys().collect())
            .unwrap_or_default()
    }

    /// Joint immutable iteration over two component types
    pub fn view2<A: Component, B: Component>(
        &self,
    ) -> impl Iterator<Item = (Entity, &A, &B)> + '_ {
        let b_cells = self.cells::<B>();
        self.cells::<A>()
            .into_iter()
            .flat_map(move |a_cells| {
                a_cells.iter().filter_map(move |(entity, a)| {
                    b_cells
                        .and_then(|cells| cells.get(entity))
                        .map(|b| (entity, a, b))
                })
            })
    }

    fn cells<T: Component>(&self) -> Option<&SecondaryMap<Entity, T>> {
        self.columns
            .get(&TypeId::of::<T>())?
            .as_any()
            .downcast_ref::<ComponentColumn<T>>()
            .map(|column| &column.cells)
    }

    fn cells_mut<T: Component>(&mut self) -> Option<&mut SecondaryMap<Entity, T>> {
        self.columns
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<ComponentColumn<T>>()
            .map(|column| &mut column.cells)
    }
}
