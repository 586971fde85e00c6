//! Scene objects, intersection results and the nearest-hit query.

use lumen_core::{ObjectDescription, SceneDescription};
use lumen_math::{Color, Ray, Vec3, Vec3Ext};

use crate::{Lambertian, Rectangle, Sphere};

/// Geometry of a scene object. The set of shapes is closed, so dispatch is
/// a match rather than a trait object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Rectangle(Rectangle),
}

impl Shape {
    /// Ray parameter of the visible intersection, if any.
    #[inline]
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        match self {
            Shape::Sphere(sphere) => sphere.intersect(ray),
            Shape::Rectangle(rect) => rect.intersect(ray),
        }
    }

    /// Outward unit normal at a point on the surface.
    #[inline]
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        match self {
            Shape::Sphere(sphere) => sphere.normal_at(point),
            Shape::Rectangle(rect) => rect.normal_at(point),
        }
    }
}

/// A shape paired with its surface material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    pub shape: Shape,
    pub material: Lambertian,
}

impl SceneObject {
    pub fn new(shape: Shape, material: Lambertian) -> Self {
        Self { shape, material }
    }

    pub fn sphere(center: Vec3, radius: f64, material: Lambertian) -> Self {
        Self::new(Shape::Sphere(Sphere::new(center, radius)), material)
    }

    pub fn rectangle(center: Vec3, size: Vec3, material: Lambertian) -> Self {
        Self::new(Shape::Rectangle(Rectangle::new(center, size)), material)
    }

    /// Intersect this object, returning the hit as a value.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit<'_>> {
        let t = self.shape.intersect(ray)?;
        Some(Hit {
            object: self,
            point: ray.at(t),
        })
    }

    #[inline]
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        self.shape.normal_at(point)
    }

    #[inline]
    pub fn brdf(&self, outgoing: Vec3, incoming: Vec3) -> Color {
        self.material.brdf(outgoing, incoming)
    }

    #[inline]
    pub fn emitted(&self) -> Color {
        self.material.emitted()
    }
}

impl From<&ObjectDescription> for SceneObject {
    fn from(desc: &ObjectDescription) -> Self {
        let material = Lambertian::from(desc.material());
        match desc {
            ObjectDescription::Sphere { center, radius, .. } => {
                SceneObject::sphere(*center, *radius, material)
            }
            ObjectDescription::Rectangle { center, size, .. } => {
                SceneObject::rectangle(*center, *size, material)
            }
        }
    }
}

/// Record of a ray-object intersection.
///
/// Owned by the caller, so a later query can never overwrite it.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// Object that was hit
    pub object: &'a SceneObject,
    /// Point of intersection
    pub point: Vec3,
}

impl<'a> Hit<'a> {
    /// Outward surface normal at the hit point.
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.object.normal_at(self.point)
    }
}

/// Read-only collection of scene objects.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_description(desc: &SceneDescription) -> Self {
        Self {
            objects: desc.objects.iter().map(SceneObject::from).collect(),
        }
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Closest intersection along `ray`, if any.
    ///
    /// Linear scan over every object. Distance is measured from the ray
    /// origin to the hit point; on a tie the earlier object wins.
    pub fn find_nearest_hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        let mut nearest: Option<(Hit<'_>, f64)> = None;

        for object in &self.objects {
            if let Some(hit) = object.intersect(ray) {
                let distance2 = (hit.point - ray.origin()).norm2();
                if nearest.map_or(true, |(_, best)| distance2 < best) {
                    nearest = Some((hit, distance2));
                }
            }
        }

        nearest.map(|(hit, _)| hit)
    }
}

impl FromIterator<SceneObject> for Scene {
    fn from_iter<I: IntoIterator<Item = SceneObject>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::MaterialDescription;
    use std::ptr;

    fn grey() -> Lambertian {
        Lambertian::new(Color::splat(0.5))
    }

    #[test]
    fn test_nearest_hit_picks_closest() {
        let scene: Scene = [
            SceneObject::sphere(Vec3::new(0.0, 0.0, 10.0), 1.0, grey()),
            SceneObject::sphere(Vec3::new(0.0, 0.0, 5.0), 1.0, grey()),
            SceneObject::sphere(Vec3::new(0.0, 0.0, 20.0), 1.0, grey()),
        ]
        .into_iter()
        .collect();

        let ray = Ray::from_unit(Vec3::ZERO, Vec3::Z);
        let hit = scene.find_nearest_hit(&ray).unwrap();

        assert!(ptr::eq(hit.object, &scene.objects()[1]));
        assert!((hit.point - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-9);
        assert!((hit.normal() - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-9);
    }

    #[test]
    fn test_nearest_hit_tie_goes_to_first() {
        let first = Lambertian::new(Color::new(1.0, 0.0, 0.0));
        let second = Lambertian::new(Color::new(0.0, 1.0, 0.0));
        let scene: Scene = [
            SceneObject::sphere(Vec3::new(0.0, 0.0, 5.0), 1.0, first),
            SceneObject::sphere(Vec3::new(0.0, 0.0, 5.0), 1.0, second),
        ]
        .into_iter()
        .collect();

        let ray = Ray::from_unit(Vec3::ZERO, Vec3::Z);
        let hit = scene.find_nearest_hit(&ray).unwrap();

        assert!(ptr::eq(hit.object, &scene.objects()[0]));
    }

    #[test]
    fn test_nearest_hit_miss() {
        let empty = Scene::new();
        let ray = Ray::from_unit(Vec3::ZERO, Vec3::Z);
        assert!(empty.is_empty());
        assert!(empty.find_nearest_hit(&ray).is_none());

        let mut scene = Scene::new();
        scene.add(SceneObject::sphere(Vec3::new(0.0, 5.0, 5.0), 1.0, grey()));
        scene.add(SceneObject::rectangle(Vec3::new(0.0, 0.0, -5.0), Vec3::ONE, grey()));
        assert_eq!(scene.len(), 2);
        assert!(scene.find_nearest_hit(&ray).is_none());
    }

    #[test]
    fn test_hits_are_independent_values() {
        let scene: Scene = [SceneObject::sphere(Vec3::new(0.0, 0.0, 5.0), 1.0, grey())]
            .into_iter()
            .collect();

        let hit = scene
            .find_nearest_hit(&Ray::from_unit(Vec3::ZERO, Vec3::Z))
            .unwrap();
        // A later miss must not disturb an earlier hit
        assert!(scene
            .find_nearest_hit(&Ray::from_unit(Vec3::ZERO, -Vec3::Z))
            .is_none());
        assert!((hit.point - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-9);
    }

    #[test]
    fn test_mixed_shapes() {
        let scene: Scene = [
            SceneObject::sphere(Vec3::new(0.0, 0.0, 10.0), 1.0, grey()),
            SceneObject::rectangle(Vec3::new(0.0, 0.0, 6.0), Vec3::splat(2.0), grey()),
        ]
        .into_iter()
        .collect();

        let hit = scene
            .find_nearest_hit(&Ray::from_unit(Vec3::ZERO, Vec3::Z))
            .unwrap();
        assert!(matches!(hit.object.shape, Shape::Rectangle(_)));
        assert!((hit.point.z - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_description() {
        let desc = SceneDescription::default();
        let scene = Scene::from_description(&desc);

        assert_eq!(scene.len(), 2);
        assert_eq!(scene.objects()[1].emitted(), Color::ONE);

        let object = SceneObject::from(&ObjectDescription::rectangle(
            Vec3::ZERO,
            Vec3::ONE,
            MaterialDescription::default(),
        ));
        assert!(matches!(object.shape, Shape::Rectangle(_)));
    }
}
