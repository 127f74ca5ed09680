//! World collision queries over a per-tick snapshot of collider bodies.
//!
//! Bodies are spheres or axis-aligned boxes. Queries are restricted by a
//! layer mask and skip trigger (non-solid) bodies. Swept queries inflate each
//! body by the sweep radius, so a radius of zero is a plain ray test.

use std::collections::HashMap;

use glam::DVec3;
use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use skirmish_core::layers::LayerMask;
use skirmish_core::types::Transform;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Sphere { radius: f64 },
    /// World-axis-aligned box; rotation of the owning transform is ignored.
    Box { half_extents: DVec3 },
}

/// Collision body attached to an entity with a `Transform`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    pub shape: Shape,
    /// Center offset in the entity's local frame.
    pub offset: DVec3,
    pub layer: LayerMask,
    /// Triggers (`solid == false`) never stop projectiles.
    pub solid: bool,
}

impl Collider {
    pub fn sphere(radius: f64, layer: LayerMask) -> Self {
        Self {
            shape: Shape::Sphere { radius },
            offset: DVec3::ZERO,
            layer,
            solid: true,
        }
    }

    pub fn cuboid(half_extents: DVec3, layer: LayerMask) -> Self {
        Self {
            shape: Shape::Box { half_extents },
            offset: DVec3::ZERO,
            layer,
            solid: true,
        }
    }
}

/// Attaches an entity to a parent body. The child's transform follows the
/// parent at `local_offset`.
#[derive(Debug, Clone, Copy)]
pub struct Parent {
    pub entity: Entity,
    pub local_offset: DVec3,
}

/// A body struck by a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub body: Entity,
    /// Contact point on the body's surface.
    pub point: DVec3,
    /// Distance along the swept segment; 0 for overlaps.
    pub distance: f64,
}

/// Geometry queries used by projectiles.
pub trait CollisionQuery {
    /// Solid bodies on `mask` overlapping a sphere, nearest first.
    fn overlap_sphere(&self, center: DVec3, radius: f64, mask: LayerMask) -> Vec<Hit>;

    /// Nearest solid body on `mask` hit by a sphere of `radius` swept from
    /// `from` to `to`, skipping bodies for which `ignore` returns true.
    fn sweep(
        &self,
        from: DVec3,
        to: DVec3,
        radius: f64,
        mask: LayerMask,
        ignore: &dyn Fn(Entity) -> bool,
    ) -> Option<Hit>;
}

/// Ownership lookups over the parent hierarchy.
pub trait Hierarchy {
    fn parent_of(&self, entity: Entity) -> Option<Entity>;

    /// True when `candidate` is `root` or sits anywhere below it.
    fn is_self_or_descendant(&self, candidate: Entity, root: Entity) -> bool {
        let mut current = Some(candidate);
        // Depth cap guards against malformed cycles.
        for _ in 0..64 {
            match current {
                Some(e) if e == root => return true,
                Some(e) => current = self.parent_of(e),
                None => return false,
            }
        }
        false
    }
}

#[derive(Debug, Clone, Copy)]
enum WorldShape {
    Sphere { center: DVec3, radius: f64 },
    Box { min: DVec3, max: DVec3 },
}

#[derive(Debug, Clone, Copy)]
struct Body {
    entity: Entity,
    shape: WorldShape,
    layer: LayerMask,
    solid: bool,
}

/// World-space collider snapshot, rebuilt once per tick before projectiles
/// move.
#[derive(Debug, Default)]
pub struct SceneColliders {
    bodies: Vec<Body>,
    parents: HashMap<Entity, Entity>,
}

impl SceneColliders {
    pub fn from_world(world: &World) -> Self {
        let mut scene = Self::default();
        for (entity, (transform, collider)) in world.query::<(&Transform, &Collider)>().iter() {
            scene.insert(entity, transform, collider);
        }
        for (entity, parent) in world.query::<&Parent>().iter() {
            scene.parents.insert(entity, parent.entity);
        }
        // Query iteration order follows archetypes; sort for stable tie-breaks.
        scene.bodies.sort_by_key(|b| b.entity.to_bits());
        scene
    }

    pub fn insert(&mut self, entity: Entity, transform: &Transform, collider: &Collider) {
        let center = transform.transform_point(collider.offset);
        let shape = match collider.shape {
            Shape::Sphere { radius } => WorldShape::Sphere {
                center,
                radius: radius.max(0.0),
            },
            Shape::Box { half_extents } => {
                let h = half_extents.abs();
                WorldShape::Box {
                    min: center - h,
                    max: center + h,
                }
            }
        };
        self.bodies.push(Body {
            entity,
            shape,
            layer: collider.layer,
            solid: collider.solid,
        });
    }

    pub fn set_parent(&mut self, child: Entity, parent: Entity) {
        self.parents.insert(child, parent);
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    fn candidates(&self, mask: LayerMask) -> impl Iterator<Item = &Body> {
        self.bodies
            .iter()
            .filter(move |b| b.solid && mask.intersects(b.layer))
    }
}

impl CollisionQuery for SceneColliders {
    fn overlap_sphere(&self, center: DVec3, radius: f64, mask: LayerMask) -> Vec<Hit> {
        let mut hits: Vec<(f64, Hit)> = self
            .candidates(mask)
            .filter_map(|b| {
                let point = closest_point(&b.shape, center);
                let gap = point.distance(center);
                (gap <= radius).then_some((
                    gap,
                    Hit {
                        body: b.entity,
                        point,
                        distance: 0.0,
                    },
                ))
            })
            .collect();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        hits.into_iter().map(|(_, h)| h).collect()
    }

    fn sweep(
        &self,
        from: DVec3,
        to: DVec3,
        radius: f64,
        mask: LayerMask,
        ignore: &dyn Fn(Entity) -> bool,
    ) -> Option<Hit> {
        let delta = to - from;
        let length = delta.length();
        let radius = radius.max(0.0);

        let mut best: Option<(f64, &Body)> = None;
        for body in self.candidates(mask) {
            if ignore(body.entity) {
                continue;
            }
            let t = match body.shape {
                WorldShape::Sphere { center, radius: r } => {
                    segment_sphere(from, delta, center, r + radius)
                }
                WorldShape::Box { min, max } => {
                    let pad = DVec3::splat(radius);
                    segment_aabb(from, delta, min - pad, max + pad)
                }
            };
            if let Some(t) = t {
                if best.map_or(true, |(bt, _)| t < bt) {
                    best = Some((t, body));
                }
            }
        }

        best.map(|(t, body)| {
            let probe = from + delta * t;
            Hit {
                body: body.entity,
                point: closest_point(&body.shape, probe),
                distance: t * length,
            }
        })
    }
}

impl Hierarchy for SceneColliders {
    fn parent_of(&self, entity: Entity) -> Option<Entity> {
        self.parents.get(&entity).copied()
    }
}

/// Closest point on (or inside) a body to `p`.
fn closest_point(shape: &WorldShape, p: DVec3) -> DVec3 {
    match *shape {
        WorldShape::Sphere { center, radius } => {
            let offset = p - center;
            let len = offset.length();
            if len <= radius {
                p
            } else {
                center + offset / len * radius
            }
        }
        WorldShape::Box { min, max } => p.clamp(min, max),
    }
}

/// First parameter `t ∈ [0, 1]` where `from + delta·t` is within `radius` of
/// `center`. A start point already inside hits at 0.
fn segment_sphere(from: DVec3, delta: DVec3, center: DVec3, radius: f64) -> Option<f64> {
    let m = from - center;
    let c = m.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    let a = delta.length_squared();
    if a <= f64::EPSILON {
        return None;
    }
    let b = m.dot(delta);
    if b > 0.0 {
        // Moving away from the sphere.
        return None;
    }
    let disc = b * b - a * c;
    if disc < 0.0 {
        return None;
    }
    let t = (-b - disc.sqrt()) / a;
    (0.0..=1.0).contains(&t).then_some(t)
}

/// Slab test of the segment `from + delta·t, t ∈ [0, 1]` against a box.
fn segment_aabb(from: DVec3, delta: DVec3, min: DVec3, max: DVec3) -> Option<f64> {
    let mut t_min = 0.0_f64;
    let mut t_max = 1.0_f64;
    for axis in 0..3 {
        let o = from[axis];
        let d = delta[axis];
        if d.abs() <= f64::EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t0 = (min[axis] - o) * inv;
        let mut t1 = (max[axis] - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }
    Some(t_min)
}
