//! Nearest-forward-intersection search over the mirror catalogs and the
//! marker sphere.
//!
//! Every active catalog element is tested unconditionally: with at most four
//! elements per axis, a full scan is cheaper than it is clever, and unlike
//! the ordered skip-ahead search it stays correct for catalogs in any order.

use resonator::geometry::{Axis, Vec3};
use resonator::scene::{GeometryModel, MarkerSphere, MirrorCatalog};

use crate::ray::Ray;

/// Identifies which object a hit landed on. Mirror identities double as the
/// exclusion key for the next segment, so a ray never re-intersects the
/// element it just departed from due to floating-point error at the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Surface {
    Mirror { axis: Axis, index: usize },
    Sphere,
}

#[derive(Clone, Copy, Debug)]
pub struct Hit {
    pub position: Vec3,
    /// Euclidean distance from the ray origin, in world units.
    pub distance: f32,
    pub surface: Surface,
    pub power: f32,
    pub principal: Vec3,
    /// Unit normal of the intersected plane; radial for the sphere.
    pub normal: Vec3,
}

/// Finds the nearest forward intersection of `ray` with the geometry,
/// ignoring the excluded surface. Returns `None` when the ray escapes.
pub fn find_nearest(ray: Ray, geometry: &GeometryModel, exclude: Option<Surface>) -> Option<Hit> {
    let mut best: Option<Hit> = None;

    for axis in Axis::ALL {
        let excluded_index = match exclude {
            Some(Surface::Mirror { axis: a, index }) if a == axis => Some(index),
            _ => None,
        };
        if let Some(hit) = nearest_in_catalog(ray, axis, geometry.catalog(axis), excluded_index) {
            if best.is_none_or(|b| hit.distance < b.distance) {
                best = Some(hit);
            }
        }
    }

    if geometry.sphere.visible {
        if let Some(hit) = nearest_on_sphere(ray, &geometry.sphere) {
            if best.is_none_or(|b| hit.distance < b.distance) {
                best = Some(hit);
            }
        }
    }

    best
}

fn nearest_in_catalog(
    ray: Ray,
    axis: Axis,
    catalog: &MirrorCatalog,
    excluded_index: Option<usize>,
) -> Option<Hit> {
    let dn = axis.of(ray.direction);
    if dn == 0.0 {
        // ray runs parallel to every plane in this catalog
        return None;
    }
    let sn = axis.of(ray.origin);
    let (t1_axis, t2_axis) = axis.transverse();

    let mut best: Option<Hit> = None;
    for i in 0..catalog.count {
        if excluded_index == Some(i) {
            continue;
        }

        let along = (catalog.plane[i] - sn) / dn;
        if along <= 0.0 {
            continue;
        }

        let position = ray.at(along);
        let t1 = t1_axis.of(position);
        let t2 = t2_axis.of(position);
        if t1 < catalog.t1_min[i]
            || t1 > catalog.t1_max[i]
            || t2 < catalog.t2_min[i]
            || t2 > catalog.t2_max[i]
        {
            continue;
        }

        let distance = along * ray.direction.length();
        if best.is_none_or(|b| distance < b.distance) {
            best = Some(Hit {
                position,
                distance,
                surface: Surface::Mirror { axis, index: i },
                power: catalog.power[i],
                principal: catalog.principal[i],
                normal: axis.unit(),
            });
        }
    }

    best
}

fn nearest_on_sphere(ray: Ray, sphere: &MarkerSphere) -> Option<Hit> {
    let v = ray.origin - sphere.centre;
    let a = Vec3::dot(ray.direction, ray.direction);
    let b = 2.0 * Vec3::dot(ray.direction, v);
    let c = Vec3::dot(v, v) - sphere.radius * sphere.radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sd = discriminant.sqrt();

    // the "-" root is closer; fall back to the "+" root when it lies behind
    let mut delta = (-b - sd) / (2.0 * a);
    if delta <= 0.0 {
        delta = (-b + sd) / (2.0 * a);
        if delta <= 0.0 {
            return None;
        }
    }

    let position = ray.at(delta);
    Some(Hit {
        position,
        distance: delta * ray.direction.length(),
        surface: Surface::Sphere,
        power: 0.0,
        principal: sphere.centre,
        normal: Vec3::normalized(position - sphere.centre),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_x_mirror(plane: f32, y: (f32, f32), z: (f32, f32), power: f32) -> GeometryModel {
        let mut geometry = GeometryModel::default();
        geometry
            .x_mirrors
            .push(plane, y, z, Vec3(plane, 0.0, 0.0), power);
        geometry
    }

    #[test]
    fn axial_ray_hits_mirror_head_on() {
        let geometry = single_x_mirror(2.0, (-1.0, 1.0), (-1.0, 1.0), 0.0);
        let ray = Ray {
            origin: Vec3::zero(),
            direction: Vec3(1.0, 0.0, 0.0),
        };

        let hit = find_nearest(ray, &geometry, None).unwrap();
        assert_eq!(hit.position, Vec3(2.0, 0.0, 0.0));
        assert_eq!(hit.distance, 2.0);
        assert_eq!(hit.surface, Surface::Mirror { axis: Axis::X, index: 0 });
        assert_eq!(hit.normal, Vec3(1.0, 0.0, 0.0));
    }

    #[test]
    fn hit_outside_rectangle_bounds_is_rejected() {
        // y bounds [1, 3]: the ray passes through y = 0, outside the rectangle
        let geometry = single_x_mirror(2.0, (1.0, 3.0), (-1.0, 1.0), 0.0);
        let ray = Ray {
            origin: Vec3::zero(),
            direction: Vec3(1.0, 0.0, 0.0),
        };
        assert!(find_nearest(ray, &geometry, None).is_none());
    }

    #[test]
    fn zero_direction_component_skips_the_catalog() {
        let geometry = single_x_mirror(2.0, (-1.0, 1.0), (-10.0, 10.0), 0.0);
        let ray = Ray {
            origin: Vec3(0.0, 0.0, 5.0),
            direction: Vec3(0.0, 0.0, -1.0),
        };
        // direction has no x component: the x catalog contributes nothing
        assert!(find_nearest(ray, &geometry, None).is_none());
    }

    #[test]
    fn element_behind_the_origin_is_ignored() {
        let geometry = single_x_mirror(-1.0, (-1.0, 1.0), (-1.0, 1.0), 0.0);
        let ray = Ray {
            origin: Vec3::zero(),
            direction: Vec3(1.0, 0.0, 0.0),
        };
        assert!(find_nearest(ray, &geometry, None).is_none());
    }

    #[test]
    fn nearest_of_several_candidates_wins_regardless_of_order() {
        let mut geometry = GeometryModel::default();
        // deliberately unsorted catalog: far mirror first
        let mut catalog = MirrorCatalog::empty();
        catalog.count = 2;
        catalog.plane = [5.0, 2.0, 0.0, 0.0];
        catalog.t1_min = [-1.0; 4];
        catalog.t1_max = [1.0; 4];
        catalog.t2_min = [-1.0; 4];
        catalog.t2_max = [1.0; 4];
        geometry.x_mirrors = catalog;

        let ray = Ray {
            origin: Vec3::zero(),
            direction: Vec3(1.0, 0.0, 0.0),
        };
        let hit = find_nearest(ray, &geometry, None).unwrap();
        assert_eq!(hit.distance, 2.0);
        assert_eq!(hit.surface, Surface::Mirror { axis: Axis::X, index: 1 });
    }

    #[test]
    fn departed_element_is_excluded_from_reintersection() {
        let geometry = single_x_mirror(2.0, (-1.0, 1.0), (-1.0, 1.0), 0.0);
        // a reflected ray restarting a hair beyond the surface would
        // otherwise immediately re-hit the mirror it just left
        let ray = Ray {
            origin: Vec3(2.0 + 1e-6, 0.0, 0.0),
            direction: Vec3(-1.0, 0.0, 0.0),
        };
        assert!(find_nearest(ray, &geometry, None).is_some());

        let exclude = Some(Surface::Mirror { axis: Axis::X, index: 0 });
        assert!(find_nearest(ray, &geometry, exclude).is_none());
    }

    #[test]
    fn y_catalog_uses_xz_transverse_bounds() {
        let mut geometry = GeometryModel::default();
        geometry
            .y_mirrors
            .push(2.0, (-1.0, 1.0), (-2.0, 0.0), Vec3(0.0, 2.0, -1.0), 0.0);

        let ray = Ray {
            origin: Vec3(0.5, 0.0, -1.0),
            direction: Vec3(0.0, 1.0, 0.0),
        };
        let hit = find_nearest(ray, &geometry, None).unwrap();
        assert_eq!(hit.surface, Surface::Mirror { axis: Axis::Y, index: 0 });
        assert_eq!(hit.position, Vec3(0.5, 2.0, -1.0));
        assert_eq!(hit.normal, Vec3(0.0, 1.0, 0.0));
    }

    #[test]
    fn cross_catalog_hits_compete_on_distance() {
        let mut geometry = GeometryModel::default();
        geometry
            .x_mirrors
            .push(3.0, (-1.0, 1.0), (-1.0, 1.0), Vec3(3.0, 0.0, 0.0), 0.0);
        geometry
            .z_mirrors
            .push(1.0, (-5.0, 5.0), (-1.0, 1.0), Vec3(0.0, 0.0, 1.0), 0.0);

        let ray = Ray {
            origin: Vec3::zero(),
            direction: Vec3(1.0, 0.0, 1.0),
        };
        let hit = find_nearest(ray, &geometry, None).unwrap();
        assert_eq!(hit.surface, Surface::Mirror { axis: Axis::Z, index: 0 });
        assert!((hit.distance - f32::sqrt(2.0)).abs() < 1e-6);
    }

    #[test]
    fn sphere_roots_prefer_the_near_positive_solution() {
        let sphere = MarkerSphere {
            centre: Vec3(4.0, 0.0, 0.0),
            radius: 1.0,
            visible: true,
        };
        let geometry = GeometryModel {
            sphere,
            ..GeometryModel::default()
        };

        let outside = Ray {
            origin: Vec3::zero(),
            direction: Vec3(2.0, 0.0, 0.0), // non-unit on purpose
        };
        let hit = find_nearest(outside, &geometry, None).unwrap();
        assert_eq!(hit.surface, Surface::Sphere);
        assert!((hit.distance - 3.0).abs() < 1e-5);
        assert!((hit.position - Vec3(3.0, 0.0, 0.0)).length() < 1e-5);

        // from inside, the near root is behind: the far root is used
        let inside = Ray {
            origin: Vec3(4.0, 0.0, 0.0),
            direction: Vec3(1.0, 0.0, 0.0),
        };
        let hit = find_nearest(inside, &geometry, None).unwrap();
        assert!((hit.distance - 1.0).abs() < 1e-5);

        // behind entirely: no hit
        let behind = Ray {
            origin: Vec3(6.0, 0.0, 0.0),
            direction: Vec3(1.0, 0.0, 0.0),
        };
        assert!(find_nearest(behind, &geometry, None).is_none());

        // invisible sphere contributes nothing
        let mut hidden = geometry;
        hidden.sphere.visible = false;
        assert!(find_nearest(outside, &hidden, None).is_none());
    }
}
