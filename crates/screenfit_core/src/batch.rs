//! Batch scaling over slices
//!
//! Every batch call captures one [`FastScale`] snapshot and maps the whole
//! input through it, so a batch never straddles a reconfiguration. Output
//! order and length always match the input.

use crate::engine::ScaleEngine;
use crate::factors::ScaleType;
use crate::geometry::{EdgeInsets, Point, Rect, Size};
use crate::snapshot::FastScale;

/// Slice-oriented wrapper around a [`FastScale`] snapshot
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BatchScaler {
    snapshot: FastScale,
}

impl BatchScaler {
    pub fn new(snapshot: FastScale) -> Self {
        Self { snapshot }
    }

    /// The snapshot every call of this scaler uses
    pub fn snapshot(&self) -> FastScale {
        self.snapshot
    }

    /// Scale every value by the factor `scale_type` selects
    pub fn scaled<T>(&self, values: &[T], scale_type: ScaleType) -> Vec<f64>
    where
        T: Copy + Into<f64>,
    {
        values
            .iter()
            .map(|&v| self.snapshot.scale(v.into(), scale_type))
            .collect()
    }

    pub fn widths<T: Copy + Into<f64>>(&self, values: &[T]) -> Vec<f64> {
        values.iter().map(|&v| self.snapshot.width(v.into())).collect()
    }

    pub fn heights<T: Copy + Into<f64>>(&self, values: &[T]) -> Vec<f64> {
        values.iter().map(|&v| self.snapshot.height(v.into())).collect()
    }

    pub fn font_sizes<T: Copy + Into<f64>>(&self, values: &[T]) -> Vec<f64> {
        values.iter().map(|&v| self.snapshot.text(v.into())).collect()
    }

    pub fn radii<T: Copy + Into<f64>>(&self, values: &[T]) -> Vec<f64> {
        values.iter().map(|&v| self.snapshot.radius(v.into())).collect()
    }

    pub fn sizes(&self, sizes: &[Size]) -> Vec<Size> {
        sizes.iter().map(|&s| self.snapshot.size(s)).collect()
    }

    pub fn points(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|&p| self.snapshot.point(p)).collect()
    }

    pub fn rects(&self, rects: &[Rect]) -> Vec<Rect> {
        rects.iter().map(|&r| self.snapshot.rect(r)).collect()
    }

    pub fn edge_insets(&self, insets: &[EdgeInsets]) -> Vec<EdgeInsets> {
        insets.iter().map(|&i| self.snapshot.edge_insets(i)).collect()
    }
}

impl ScaleEngine {
    /// Batch scaler over a snapshot of the current factors
    pub fn batch_scaler(&self) -> BatchScaler {
        BatchScaler::new(self.fast_scaler())
    }

    /// Run `operation` against one batch scaler
    pub fn with_batch_scaler<R>(&self, operation: impl FnOnce(&BatchScaler) -> R) -> R {
        operation(&self.batch_scaler())
    }

    pub fn batch_scale<T: Copy + Into<f64>>(&self, values: &[T], scale_type: ScaleType) -> Vec<f64> {
        self.batch_scaler().scaled(values, scale_type)
    }

    pub fn batch_widths<T: Copy + Into<f64>>(&self, values: &[T]) -> Vec<f64> {
        self.batch_scaler().widths(values)
    }

    pub fn batch_heights<T: Copy + Into<f64>>(&self, values: &[T]) -> Vec<f64> {
        self.batch_scaler().heights(values)
    }

    pub fn batch_font_sizes<T: Copy + Into<f64>>(&self, values: &[T]) -> Vec<f64> {
        self.batch_scaler().font_sizes(values)
    }

    pub fn batch_sizes(&self, sizes: &[Size]) -> Vec<Size> {
        self.batch_scaler().sizes(sizes)
    }

    pub fn batch_points(&self, points: &[Point]) -> Vec<Point> {
        self.batch_scaler().points(points)
    }

    pub fn batch_rects(&self, rects: &[Rect]) -> Vec<Rect> {
        self.batch_scaler().rects(rects)
    }

    pub fn batch_edge_insets(&self, insets: &[EdgeInsets]) -> Vec<EdgeInsets> {
        self.batch_scaler().edge_insets(insets)
    }
}
