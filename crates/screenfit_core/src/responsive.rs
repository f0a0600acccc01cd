//! Shorthand scaling helpers on [`ScaleEngine`]
//!
//! `w`/`h`/`sp`/`r` go through [`ScaleEngine::scale`] and share its
//! non-finite guard. The `fast_*` variants skip it. Composite helpers read
//! the factors once, so both axes of a size or rect always come from the
//! same configuration.

use crate::engine::ScaleEngine;
use crate::factors::ScaleType;
use crate::geometry::{EdgeInsets, Point, Rect, Size};

#[inline]
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

impl ScaleEngine {
    /// Scale by the width factor
    #[inline]
    pub fn w(&self, value: f64) -> f64 {
        self.scale(value, ScaleType::Width)
    }

    /// Scale by the height factor
    #[inline]
    pub fn h(&self, value: f64) -> f64 {
        self.scale(value, ScaleType::Height)
    }

    /// Scale a font size by the text factor
    #[inline]
    pub fn sp(&self, value: f64) -> f64 {
        self.scale(value, ScaleType::Text)
    }

    /// Scale a corner radius
    #[inline]
    pub fn r(&self, value: f64) -> f64 {
        self.scale(value, ScaleType::Radius)
    }

    /// `percentage` percent of the screen width
    pub fn sw(&self, percentage: f64) -> f64 {
        self.screen_width() * (finite_or_zero(percentage) / 100.0)
    }

    /// `percentage` percent of the screen height
    pub fn sh(&self, percentage: f64) -> f64 {
        self.screen_height() * (finite_or_zero(percentage) / 100.0)
    }

    #[inline]
    pub fn fast_w(&self, value: f64) -> f64 {
        self.fast_scale(value, ScaleType::Width)
    }

    #[inline]
    pub fn fast_h(&self, value: f64) -> f64 {
        self.fast_scale(value, ScaleType::Height)
    }

    #[inline]
    pub fn fast_sp(&self, value: f64) -> f64 {
        self.fast_scale(value, ScaleType::Text)
    }

    pub fn scale_size(&self, size: Size) -> Size {
        self.fast_scaler().size(Size::new(
            finite_or_zero(size.width),
            finite_or_zero(size.height),
        ))
    }

    pub fn scale_point(&self, point: Point) -> Point {
        self.fast_scaler()
            .point(Point::new(finite_or_zero(point.x), finite_or_zero(point.y)))
    }

    pub fn scale_rect(&self, rect: Rect) -> Rect {
        let fast = self.fast_scaler();
        Rect::from_origin_size(
            fast.point(Point::new(
                finite_or_zero(rect.origin.x),
                finite_or_zero(rect.origin.y),
            )),
            fast.size(Size::new(
                finite_or_zero(rect.size.width),
                finite_or_zero(rect.size.height),
            )),
        )
    }

    /// Insets with top/bottom scaled by height and leading/trailing by width
    pub fn insets(&self, top: f64, leading: f64, bottom: f64, trailing: f64) -> EdgeInsets {
        self.fast_scaler().edge_insets(EdgeInsets::new(
            finite_or_zero(top),
            finite_or_zero(leading),
            finite_or_zero(bottom),
            finite_or_zero(trailing),
        ))
    }

    pub fn insets_symmetric(&self, horizontal: f64, vertical: f64) -> EdgeInsets {
        self.insets(vertical, horizontal, vertical, horizontal)
    }

    pub fn insets_all(&self, value: f64) -> EdgeInsets {
        self.insets(value, value, value, value)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use screenfit_platform::{ScreenDimensions, StaticMetricsSource};

    use crate::config::Configuration;
    use crate::engine::ScaleEngine;
    use crate::geometry::{EdgeInsets, Point, Rect, Size};

    /// Screen exactly twice the design in both directions
    fn doubled() -> ScaleEngine {
        let source = StaticMetricsSource::new(ScreenDimensions::new(780.0, 1688.0, 2.0));
        ScaleEngine::builder()
            .source(Arc::new(source))
            .configuration(Configuration::IPHONE_13_PRO)
            .build()
    }

    #[test]
    fn test_shorthands() {
        let engine = doubled();
        assert_eq!(engine.w(10.0), 20.0);
        assert_eq!(engine.h(10.0), 20.0);
        assert_eq!(engine.sp(14.0), 28.0);
        assert_eq!(engine.r(4.0), 8.0);
        assert_eq!(engine.fast_w(10.0), engine.w(10.0));
        assert_eq!(engine.fast_sp(14.0), engine.sp(14.0));
        assert_eq!(engine.w(f64::NAN), 0.0);
    }

    #[test]
    fn test_screen_percentages() {
        let engine = doubled();
        assert_eq!(engine.sw(50.0), 390.0);
        assert_eq!(engine.sh(25.0), 422.0);
        assert_eq!(engine.sw(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_composites() {
        let engine = doubled();
        assert_eq!(engine.scale_size(Size::new(1.0, 2.0)), Size::new(2.0, 4.0));
        assert_eq!(engine.scale_point(Point::new(-1.0, 3.0)), Point::new(-2.0, 6.0));
        assert_eq!(
            engine.scale_rect(Rect::new(1.0, 1.0, f64::NAN, 5.0)),
            Rect::new(2.0, 2.0, 0.0, 10.0)
        );
    }

    #[test]
    fn test_insets() {
        let engine = doubled();
        assert_eq!(engine.insets_all(8.0), EdgeInsets::all(16.0));
        assert_eq!(
            engine.insets_symmetric(4.0, 2.0),
            EdgeInsets::new(4.0, 8.0, 4.0, 8.0)
        );
        assert_eq!(
            engine.insets(1.0, 2.0, 3.0, 4.0),
            EdgeInsets::new(2.0, 4.0, 6.0, 8.0)
        );
    }
}
