//! Coordinate pipeline: domain -> bounds-local -> container-local.
//!
//! Bounds-local space is the chart rectangle itself (y grows with the value).
//! The rectangle is placed into a parent "world" frame by [`BoundsRegion::placement`].
//! A [`RenderContainer`] then maps world points onto the surface the geometry is
//! drawn into, either directly (overlay, world == screen pixels) or through a
//! homogeneous view-projection (camera-relative).

use crate::error::{ChartError, ChartResult};
use glam::{Affine2, Mat3, Vec2, Vec3};

/// Minimum width/height of a usable bounds rectangle.
pub const MIN_BOUNDS_EXTENT: f32 = 1e-3;

/// Homogeneous `w` below which a point is considered outside the projectable volume.
const MIN_W: f32 = 1e-6;

const MIN_DETERMINANT: f32 = 1e-12;

/// Axis-aligned chart rectangle, expressed in its parent frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl ChartBounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// NaN extents count as degenerate.
    pub fn is_degenerate(&self) -> bool {
        !(self.width() >= MIN_BOUNDS_EXTENT && self.height() >= MIN_BOUNDS_EXTENT)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.is_degenerate() {
            return Err(ChartError::DegenerateBounds {
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(())
    }

    /// Point at the given per-axis ratio of the rectangle.
    pub fn lerp(&self, ratio: Vec2) -> Vec2 {
        self.min + self.size() * ratio
    }

    /// Containment test with the right edge pushed out by `trailing_margin`.
    pub fn contains_with_trailing_margin(&self, point: Vec2, trailing_margin: f32) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x + trailing_margin.max(0.0)
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// Clamps a magnitude into `[0, 1]`; NaN maps to 0.
pub fn clamp01(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Horizontal placement ratio of `index` in a series of `count` values.
/// A single value sits in the middle.
pub fn horizontal_ratio(index: usize, count: usize) -> f32 {
    if count > 1 {
        index as f32 / (count - 1) as f32
    } else {
        0.5
    }
}

/// Maps a series index and normalized magnitude into bounds-local space.
pub fn domain_to_bounds_local(
    index: usize,
    count: usize,
    magnitude: f32,
    bounds: &ChartBounds,
) -> ChartResult<Vec2> {
    bounds.validate()?;
    Ok(bounds.lerp(Vec2::new(horizontal_ratio(index, count), clamp01(magnitude))))
}

/// How the render container's frame relates to world space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Projection {
    /// World coordinates already are screen pixels.
    #[default]
    Overlay,
    /// World coordinates go through a homogeneous 2D view-projection first.
    Camera { view_projection: Mat3 },
}

impl Projection {
    /// World -> screen. `None` when the point falls outside the projectable volume.
    pub fn project(&self, world: Vec2) -> Option<Vec2> {
        match self {
            Self::Overlay => finite(world),
            Self::Camera { view_projection } => homogeneous(view_projection, world),
        }
    }

    fn inverse(&self) -> ChartResult<Self> {
        match self {
            Self::Overlay => Ok(Self::Overlay),
            Self::Camera { view_projection } => {
                if view_projection.determinant().abs() <= MIN_DETERMINANT {
                    return Err(ChartError::SingularTransform);
                }
                Ok(Self::Camera {
                    view_projection: view_projection.inverse(),
                })
            }
        }
    }
}

fn homogeneous(m: &Mat3, p: Vec2) -> Option<Vec2> {
    let v = *m * Vec3::new(p.x, p.y, 1.0);
    if !(v.z > MIN_W) {
        return None;
    }
    finite(Vec2::new(v.x / v.z, v.y / v.z))
}

fn finite(p: Vec2) -> Option<Vec2> {
    p.is_finite().then_some(p)
}

fn invert_affine(a: &Affine2) -> ChartResult<Affine2> {
    if a.matrix2.determinant().abs() <= MIN_DETERMINANT {
        return Err(ChartError::SingularTransform);
    }
    Ok(a.inverse())
}

/// The chart rectangle and its placement (bounds-local -> world).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundsRegion {
    pub bounds: ChartBounds,
    pub placement: Affine2,
}

impl BoundsRegion {
    pub fn new(bounds: ChartBounds) -> Self {
        Self {
            bounds,
            placement: Affine2::IDENTITY,
        }
    }

    pub fn with_placement(mut self, placement: Affine2) -> Self {
        self.placement = placement;
        self
    }
}

/// Surface the line and tooltip are drawn into.
/// `placement` maps container-local points onto the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderContainer {
    pub placement: Affine2,
    pub projection: Projection,
}

impl Default for RenderContainer {
    fn default() -> Self {
        Self::overlay(Affine2::IDENTITY)
    }
}

impl RenderContainer {
    pub fn overlay(placement: Affine2) -> Self {
        Self {
            placement,
            projection: Projection::Overlay,
        }
    }

    pub fn camera(placement: Affine2, view_projection: Mat3) -> Self {
        Self {
            placement,
            projection: Projection::Camera { view_projection },
        }
    }
}

/// One-shot bounds-local -> container-local mapping.
pub fn bounds_local_to_container_local(
    point: Vec2,
    region: &BoundsRegion,
    container: &RenderContainer,
) -> Option<Vec2> {
    CoordinatePipeline::new(*region, *container)
        .ok()?
        .to_container(point)
}

/// One-shot container-local -> bounds-local mapping.
pub fn container_local_to_bounds_local(
    point: Vec2,
    region: &BoundsRegion,
    container: &RenderContainer,
) -> Option<Vec2> {
    CoordinatePipeline::new(*region, *container)
        .ok()?
        .to_bounds_local(point)
}

/// Validated region/container pair with cached inverses.
#[derive(Clone, Debug)]
pub struct CoordinatePipeline {
    region: BoundsRegion,
    container: RenderContainer,
    region_inverse: Affine2,
    container_inverse: Affine2,
    unprojection: Projection,
}

impl CoordinatePipeline {
    pub fn new(region: BoundsRegion, container: RenderContainer) -> ChartResult<Self> {
        region.bounds.validate()?;
        Ok(Self {
            region_inverse: invert_affine(&region.placement)?,
            container_inverse: invert_affine(&container.placement)?,
            unprojection: container.projection.inverse()?,
            region,
            container,
        })
    }

    pub fn region(&self) -> &BoundsRegion {
        &self.region
    }

    pub fn bounds(&self) -> &ChartBounds {
        &self.region.bounds
    }

    pub fn container(&self) -> &RenderContainer {
        &self.container
    }

    /// Bounds were validated at construction, so this cannot fail.
    pub fn domain_to_bounds_local(&self, index: usize, count: usize, magnitude: f32) -> Vec2 {
        self.region
            .bounds
            .lerp(Vec2::new(horizontal_ratio(index, count), clamp01(magnitude)))
    }

    pub fn to_container(&self, bounds_local: Vec2) -> Option<Vec2> {
        let world = self.region.placement.transform_point2(bounds_local);
        let screen = self.container.projection.project(world)?;
        finite(self.container_inverse.transform_point2(screen))
    }

    pub fn to_bounds_local(&self, container_local: Vec2) -> Option<Vec2> {
        let screen = self.container.placement.transform_point2(container_local);
        let world = self.unprojection.project(screen)?;
        finite(self.region_inverse.transform_point2(world))
    }

    /// Projects `points` into container space, appending to `out` after clearing it.
    /// Points that fail to project are skipped; returns how many were skipped.
    pub fn project_into(&self, points: &[Vec2], out: &mut Vec<Vec2>) -> usize {
        out.clear();
        out.reserve(points.len());
        let mut skipped = 0;
        for p in points {
            match self.to_container(*p) {
                Some(c) => out.push(c),
                None => skipped += 1,
            }
        }
        skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_single_value_is_centered() {
        let bounds = ChartBounds::from_rect(0.0, 0.0, 100.0, 50.0);
        let p = domain_to_bounds_local(0, 1, 0.3, &bounds).unwrap();
        assert!(close(p, Vec2::new(50.0, 15.0)));
    }

    #[test]
    fn test_magnitude_is_clamped() {
        let bounds = ChartBounds::from_rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(domain_to_bounds_local(0, 2, 4.0, &bounds).unwrap().y, 10.0);
        assert_eq!(domain_to_bounds_local(0, 2, -1.0, &bounds).unwrap().y, 0.0);
        assert_eq!(domain_to_bounds_local(0, 2, f32::NAN, &bounds).unwrap().y, 0.0);
    }

    #[test]
    fn test_degenerate_bounds_short_circuit() {
        let bounds = ChartBounds::from_rect(0.0, 0.0, 0.0001, 10.0);
        assert!(matches!(
            domain_to_bounds_local(0, 3, 0.5, &bounds),
            Err(ChartError::DegenerateBounds { .. })
        ));
        let region = BoundsRegion::new(bounds);
        assert!(bounds_local_to_container_local(Vec2::ZERO, &region, &RenderContainer::default()).is_none());
    }

    #[test]
    fn test_singular_container_rejected() {
        let region = BoundsRegion::new(ChartBounds::from_rect(0.0, 0.0, 10.0, 10.0));
        let container = RenderContainer::overlay(Affine2::from_scale(Vec2::new(0.0, 1.0)));
        assert_eq!(
            CoordinatePipeline::new(region, container).unwrap_err(),
            ChartError::SingularTransform
        );
    }

    #[test]
    fn test_camera_outside_volume() {
        // w = 1 + 0.01 * x, so anything left of x = -100 is behind the camera.
        let vp = Mat3::from_cols(
            Vec3::new(1.0, 0.0, 0.01),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        );
        let region = BoundsRegion::new(ChartBounds::from_rect(-500.0, 0.0, 1000.0, 10.0));
        let pipeline = CoordinatePipeline::new(region, RenderContainer::camera(Affine2::IDENTITY, vp)).unwrap();
        assert!(pipeline.to_container(Vec2::new(-200.0, 5.0)).is_none());
        assert!(pipeline.to_container(Vec2::new(50.0, 5.0)).is_some());
    }
}
