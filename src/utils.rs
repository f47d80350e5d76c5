use glam::Vec2;
use gpui::{px, Pixels, Point};

pub mod date_formatter;

pub trait PixelsExt {
    fn as_f32(&self) -> f32;
}

impl PixelsExt for Pixels {
    fn as_f32(&self) -> f32 {
        f32::from(*self)
    }
}

/// Conversions between window points and the chart's `glam` vectors.
pub trait PointExt {
    fn to_vec2(&self) -> Vec2;
}

impl PointExt for Point<Pixels> {
    fn to_vec2(&self) -> Vec2 {
        Vec2::new(self.x.as_f32(), self.y.as_f32())
    }
}

pub fn to_point(v: Vec2) -> Point<Pixels> {
    Point::new(px(v.x), px(v.y))
}
