// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan and zoom state applied on top of the layout.

use kurbo::{Affine, Point, Vec2};

/// Allowed zoom range.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ScaleExtent {
    /// Smallest allowed scale.
    pub min: f64,
    /// Largest allowed scale.
    pub max: f64,
}

impl Default for ScaleExtent {
    fn default() -> Self {
        Self { min: 0.1, max: 1.0 }
    }
}

impl ScaleExtent {
    /// Clamp `scale` into the extent.
    ///
    /// The upper bound is checked first, so an inverted extent yields `max`
    /// rather than panicking. A NaN scale also yields `max`.
    pub fn clamp(&self, scale: f64) -> f64 {
        if scale.is_nan() || scale > self.max {
            self.max
        } else if scale < self.min {
            self.min
        } else {
            scale
        }
    }
}

/// Declared viewport settings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ViewportConfig {
    /// Whether pan and zoom gestures are honored.
    pub zoomable: bool,
    /// Initial scale, clamped into `scale_extent`.
    pub zoom: f64,
    /// Allowed zoom range.
    pub scale_extent: ScaleExtent,
    /// Initial translation.
    pub translate: Vec2,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            zoomable: true,
            zoom: 1.0,
            scale_extent: ScaleExtent::default(),
            translate: Vec2::ZERO,
        }
    }
}

/// Current scale and translation. Always updated as a unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Current scale.
    pub scale: f64,
    /// Current translation, applied after scaling.
    pub translate: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_config(&ViewportConfig::default())
    }
}

impl Viewport {
    /// Initial geometry for `config`.
    ///
    /// ```
    /// use understory_tidy_tree::{ScaleExtent, Viewport, ViewportConfig};
    ///
    /// let config = ViewportConfig {
    ///     zoom: 5.0,
    ///     scale_extent: ScaleExtent { min: 0.5, max: 2.0 },
    ///     ..ViewportConfig::default()
    /// };
    /// assert_eq!(Viewport::from_config(&config).scale, 2.0);
    /// ```
    pub fn from_config(config: &ViewportConfig) -> Self {
        Self {
            scale: config.scale_extent.clamp(config.zoom),
            translate: config.translate,
        }
    }

    /// Layout space → screen space.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.translate) * Affine::scale(self.scale)
    }

    /// Map a layout-space point to the screen.
    pub fn to_screen(&self, point: Point) -> Point {
        self.transform() * point
    }

    /// Move the view by `delta` screen units.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.translate += delta;
    }

    /// Multiply the scale by `factor`, keeping the screen point `anchor` fixed.
    ///
    /// The resulting scale is clamped to `extent`. Non-positive or
    /// non-finite factors are ignored, as is any zoom while the current
    /// scale is not a positive finite number.
    pub fn zoom_about(&mut self, factor: f64, anchor: Point, extent: ScaleExtent) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            // No layout point sits under the anchor.
            return;
        }
        let scale = extent.clamp(self.scale * factor);
        // Layout point currently under the anchor.
        let pinned = (anchor.to_vec2() - self.translate) / self.scale;
        self.translate = anchor.to_vec2() - pinned * scale;
        self.scale = scale;
    }
}
