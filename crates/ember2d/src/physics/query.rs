//! Spatial queries
//!
//! Raycasts and overlap tests against the solver's acceleration structure.
//! Results reflect the world as of the most recent fixed step and are
//! reported as entities, recovered through the body tag, so gameplay never
//! touches raw solver handles. Shapes whose owning entity cannot be
//! resolved are skipped rather than reported.

use super::world::PhysicsWorld;
use super::PhysicsError;
use crate::ecs::Entity;
use crate::foundation::math::Vec2;
use rapier2d::prelude::{Cuboid, QueryFilter, Ray, Shape};

/// Result of a raycast that struck a shape
#[derive(Debug, Clone, Copy)]
pub struct RaycastHit {
    /// Entity owning the struck shape
    pub entity: Entity,
    /// World-space point of impact
    pub point: Vec2,
    /// Surface normal at the impact point
    pub normal: Vec2,
    /// Distance from the ray origin to the impact point
    pub distance: f32,
}

/// How an overlap query picks its single result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapMode {
    /// Any one overlapping entity, whichever the backend visits first
    First,
    /// The overlapping entity whose body origin is closest to the query
    /// center
    Nearest,
}

impl PhysicsWorld {
    /// Cast a ray and report the first shape it strikes.
    ///
    /// `direction` must have nonzero length; it is normalized internally.
    pub fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
    ) -> Result<Option<RaycastHit>, PhysicsError> {
        let length = direction.norm();
        if length <= f32::EPSILON {
            return Err(PhysicsError::ZeroDirection);
        }
        let (bodies, colliders, pipeline) = self.query_parts();
        let ray = Ray::new(origin.into(), direction / length);
        let Some((shape, hit)) = pipeline.cast_ray_and_get_normal(
            bodies,
            colliders,
            &ray,
            max_distance,
            true,
            QueryFilter::default(),
        ) else {
            return Ok(None);
        };
        let Some(entity) = self.entity_of_shape(shape) else {
            return Ok(None);
        };
        Ok(Some(RaycastHit {
            entity,
            point: ray.point_at(hit.time_of_impact).coords,
            normal: hit.normal,
            distance: hit.time_of_impact,
        }))
    }

    /// Find one entity whose shape overlaps a circle centered at `center`
    pub fn overlap_circle(
        &self,
        center: Vec2,
        radius: f32,
        mode: OverlapMode,
    ) -> Option<Entity> {
        self.overlap_shape(center, &rapier2d::prelude::Ball::new(radius.abs()), mode)
    }

    /// Find one entity whose shape overlaps an axis-aligned box
    pub fn overlap_box(
        &self,
        center: Vec2,
        half_extents: Vec2,
        mode: OverlapMode,
    ) -> Option<Entity> {
        self.overlap_shape(
            center,
            &Cuboid::new(Vec2::new(half_extents.x.abs(), half_extents.y.abs())),
            mode,
        )
    }

    /// Every entity whose shape overlaps a circle centered at `center`
    pub fn overlap_circle_all(&self, center: Vec2, radius: f32) -> Vec<Entity> {
        self.overlap_shape_all(center, &rapier2d::prelude::Ball::new(radius.abs()))
    }

    /// Every entity whose shape overlaps an axis-aligned box
    pub fn overlap_box_all(&self, center: Vec2, half_extents: Vec2) -> Vec<Entity> {
        self.overlap_shape_all(
            center,
            &Cuboid::new(Vec2::new(half_extents.x.abs(), half_extents.y.abs())),
        )
    }

    fn overlap_shape(&self, center: Vec2, shape: &dyn Shape, mode: OverlapMode) -> Option<Entity> {
        match mode {
            OverlapMode::First => {
                let mut found = None;
                self.for_each_overlap(center, shape, |entity, _| {
                    found = Some(entity);
                    false
                });
                found
            }
            OverlapMode::Nearest => {
                let mut best: Option<(Entity, f32)> = None;
                self.for_each_overlap(center, shape, |entity, body_position| {
                    let distance_sq = (body_position - center).norm_squared();
                    if best.map_or(true, |(_, d)| distance_sq < d) {
                        best = Some((entity, distance_sq));
                    }
                    true
                });
                best.map(|(entity, _)| entity)
            }
        }
    }

    fn overlap_shape_all(&self, center: Vec2, shape: &dyn Shape) -> Vec<Entity> {
        let mut found = Vec::new();
        self.for_each_overlap(center, shape, |entity, _| {
            found.push(entity);
            true
        });
        found
    }

    fn for_each_overlap(
        &self,
        center: Vec2,
        shape: &dyn Shape,
        mut visit: impl FnMut(Entity, Vec2) -> bool,
    ) {
        let (bodies, colliders, pipeline) = self.query_parts();
        let position = rapier2d::prelude::Isometry::new(center, 0.0);
        pipeline.intersections_with_shape(
            bodies,
            colliders,
            &position,
            shape,
            QueryFilter::default(),
            |handle| {
                let owner = colliders
                    .get(handle)
                    .and_then(|collider| collider.parent())
                    .and_then(|body| bodies.get(body).map(|b| (b.user_data, *b.translation())));
                match owner {
                    Some((user_data, body_position)) => {
                        match u64::try_from(user_data).ok().map(Entity::from_bits) {
                            Some(entity) => visit(entity, body_position),
                            None => true,
                        }
                    }
                    None => true,
                }
            },
        );
    }
}
