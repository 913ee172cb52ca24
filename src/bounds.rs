//! World space extents a grid can be laid over.
use bevy::math::{Vec2, Vec3};

/// Axis aligned box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl GridBounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        GridBounds {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        GridBounds {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest box containing every point, `None` if there are no points.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(GridBounds::new(first, first), |mut bounds, point| {
            bounds.min = bounds.min.min(point);
            bounds.max = bounds.max.max(point);
            bounds
        }))
    }

    /// Union of several boxes, e.g. one per renderable object in a scene.
    pub fn union_of(bounds: impl IntoIterator<Item = GridBounds>) -> Option<Self> {
        bounds.into_iter().reduce(|mut acc, other| {
            acc.encapsulate(&other);
            acc
        })
    }

    /// Grow this box to also contain `other`.
    pub fn encapsulate(&mut self, other: &GridBounds) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Footprint on the ground plane, x by z.
    pub fn footprint(&self) -> Vec2 {
        let size = self.size();
        Vec2::new(size.x, size.z)
    }
}

/// Supplies the extents a grid should cover, usually scene geometry or a ground mesh.
pub trait BoundsProvider {
    fn bounds(&self) -> Option<GridBounds>;
}

impl BoundsProvider for GridBounds {
    fn bounds(&self) -> Option<GridBounds> {
        Some(*self)
    }
}

impl BoundsProvider for Option<GridBounds> {
    fn bounds(&self) -> Option<GridBounds> {
        *self
    }
}

impl BoundsProvider for [GridBounds] {
    fn bounds(&self) -> Option<GridBounds> {
        GridBounds::union_of(self.iter().copied())
    }
}

impl BoundsProvider for Vec<GridBounds> {
    fn bounds(&self) -> Option<GridBounds> {
        self.as_slice().bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encapsulate() {
        let mut bounds = GridBounds::new(Vec3::ZERO, Vec3::ONE);
        bounds.encapsulate(&GridBounds::new(Vec3::new(-2.0, 0.0, 0.5), Vec3::new(0.0, 3.0, 4.0)));
        assert_eq!(bounds.min, Vec3::new(-2.0, 0.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 3.0, 4.0));
        assert_eq!(bounds.footprint(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_new_orders_corners() {
        let bounds = GridBounds::new(Vec3::new(5.0, 1.0, 5.0), Vec3::new(-5.0, 0.0, -5.0));
        assert_eq!(bounds.min, Vec3::new(-5.0, 0.0, -5.0));
        assert_eq!(bounds.center(), Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_union_of_empty_is_none() {
        assert!(GridBounds::union_of(Vec::new()).is_none());
        assert!(Vec::<GridBounds>::new().bounds().is_none());
        assert!(GridBounds::from_points(Vec::new()).is_none());
    }

    #[test]
    fn test_from_points() {
        let bounds = GridBounds::from_points([
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(-3.0, 2.0, 4.0),
            Vec3::new(0.0, -1.0, 0.0),
        ])
        .unwrap();
        assert_eq!(bounds.min, Vec3::new(-3.0, -1.0, -1.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 2.0, 4.0));
    }

    #[test]
    fn test_from_center_size() {
        let bounds = GridBounds::from_center_size(Vec3::new(2.0, 0.0, 2.0), Vec3::new(4.0, 0.0, 8.0));
        assert_eq!(bounds.min, Vec3::new(0.0, 0.0, -2.0));
        assert_eq!(bounds.max, Vec3::new(4.0, 0.0, 6.0));
    }
}
