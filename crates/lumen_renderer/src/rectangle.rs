//! Axis-aligned box primitive.

use lumen_math::{Aabb, Interval, Ray, Vec3};

/// Axis-aligned rectangular box, described by its center and full extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    bbox: Aabb,
}

impl Rectangle {
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self {
            bbox: Aabb::from_center_size(center, size),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.bbox.center()
    }

    pub fn size(&self) -> Vec3 {
        self.bbox.size()
    }

    /// Ray parameter of the visible intersection, if any.
    ///
    /// Same root policy as the sphere: the entry point when it lies ahead,
    /// the exit point when the origin is inside, nothing when the box is
    /// entirely behind the origin.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let (t_enter, t_exit) = self.bbox.hit_distances(ray)?;

        if Interval::NON_NEGATIVE.contains(t_enter) {
            Some(t_enter)
        } else if Interval::NON_NEGATIVE.contains(t_exit) {
            Some(t_exit)
        } else {
            None
        }
    }

    /// Outward unit normal of the face containing `point`.
    ///
    /// Picks the axis on which the point is relatively furthest from the
    /// center, which resolves edges and corners to a single face.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        let half = 0.5 * self.bbox.size();
        let offset = (point - self.bbox.center()) / half;

        let mut axis = 0;
        for candidate in 1..3 {
            if offset[candidate].abs() > offset[axis].abs() {
                axis = candidate;
            }
        }

        let mut normal = Vec3::ZERO;
        normal[axis] = if offset[axis] < 0.0 { -1.0 } else { 1.0 };
        normal
    }
}
