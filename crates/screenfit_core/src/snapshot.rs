//! Point-in-time factor snapshots for hot paths
//!
//! A [`FastScale`] copies the engine's factors once and then scales with
//! plain multiplications: no locks, no cache reads. Snapshots are never
//! updated. If the engine is reconfigured after a snapshot was taken, the
//! snapshot keeps producing values for the old configuration.

use crate::factors::{ScaleFactors, ScaleType};
use crate::geometry::{EdgeInsets, Point, Rect, Size};

/// Immutable copy of one factor triple
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FastScale {
    factors: ScaleFactors,
}

impl FastScale {
    pub fn new(factors: ScaleFactors) -> Self {
        Self { factors }
    }

    /// The captured factors
    pub fn factors(&self) -> ScaleFactors {
        self.factors
    }

    #[inline]
    pub fn width(&self, value: f64) -> f64 {
        value * self.factors.scale_width
    }

    #[inline]
    pub fn height(&self, value: f64) -> f64 {
        value * self.factors.scale_height
    }

    #[inline]
    pub fn text(&self, value: f64) -> f64 {
        value * self.factors.scale_text
    }

    #[inline]
    pub fn radius(&self, value: f64) -> f64 {
        value * self.factors.factor_for(ScaleType::Radius)
    }

    #[inline]
    pub fn min(&self, value: f64) -> f64 {
        value * self.factors.factor_for(ScaleType::Min)
    }

    #[inline]
    pub fn max(&self, value: f64) -> f64 {
        value * self.factors.factor_for(ScaleType::Max)
    }

    /// Scale by the factor `scale_type` selects
    #[inline]
    pub fn scale(&self, value: f64, scale_type: ScaleType) -> f64 {
        value * self.factors.factor_for(scale_type)
    }

    #[inline]
    pub fn size(&self, size: Size) -> Size {
        Size::new(self.width(size.width), self.height(size.height))
    }

    #[inline]
    pub fn point(&self, point: Point) -> Point {
        Point::new(self.width(point.x), self.height(point.y))
    }

    #[inline]
    pub fn rect(&self, rect: Rect) -> Rect {
        Rect::from_origin_size(self.point(rect.origin), self.size(rect.size))
    }

    /// Top/bottom by height, leading/trailing by width
    #[inline]
    pub fn edge_insets(&self, insets: EdgeInsets) -> EdgeInsets {
        EdgeInsets::new(
            self.height(insets.top),
            self.width(insets.leading),
            self.height(insets.bottom),
            self.width(insets.trailing),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composites_use_matching_axes() {
        let fast = FastScale::new(ScaleFactors::new(2.0, 3.0, 1.5));

        assert_eq!(fast.size(Size::new(10.0, 10.0)), Size::new(20.0, 30.0));
        assert_eq!(fast.point(Point::new(1.0, 1.0)), Point::new(2.0, 3.0));
        assert_eq!(
            fast.rect(Rect::new(1.0, 2.0, 3.0, 4.0)),
            Rect::new(2.0, 6.0, 6.0, 12.0)
        );
        assert_eq!(
            fast.edge_insets(EdgeInsets::new(1.0, 1.0, 2.0, 2.0)),
            EdgeInsets::new(3.0, 2.0, 6.0, 4.0)
        );
    }

    #[test]
    fn test_scalar_helpers() {
        let fast = FastScale::new(ScaleFactors::new(2.0, 3.0, 1.5));
        assert_eq!(fast.text(10.0), 15.0);
        assert_eq!(fast.radius(10.0), 20.0);
        assert_eq!(fast.max(10.0), 30.0);
        assert_eq!(fast.scale(-4.0, ScaleType::Height), -12.0);
    }
}
