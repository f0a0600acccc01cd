//! Scale factors and their shared storage
//!
//! [`SharedFactors`] is the one place the engine's derived state lives. It
//! offers two read tiers over the same value:
//!
//! - [`SharedFactors::load`] takes a read lock and returns a consistent copy
//!   (all three factors and the screen size they were derived from come from
//!   the same write). This is the default everywhere.
//! - [`SharedFactors::load_unsynchronized`] reads each factor from an atomic
//!   mirror without locking. Every individual factor is a value that was
//!   really stored, but the three may come from different writes.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use screenfit_platform::ScreenDimensions;

use crate::error::ConfigError;

/// Which factor a design value scales by
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScaleType {
    /// Horizontal extent
    Width,
    /// Vertical extent
    Height,
    /// Text size
    Text,
    /// Alias for [`ScaleType::Text`]
    Font,
    /// Corner radius; follows the smaller axis factor
    Radius,
    /// Smaller of the width and height factors
    Min,
    /// Larger of the width and height factors
    Max,
    /// Currently the width factor
    Auto,
}

impl ScaleType {
    pub const ALL: [ScaleType; 8] = [
        ScaleType::Width,
        ScaleType::Height,
        ScaleType::Text,
        ScaleType::Font,
        ScaleType::Radius,
        ScaleType::Min,
        ScaleType::Max,
        ScaleType::Auto,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScaleType::Width => "width",
            ScaleType::Height => "height",
            ScaleType::Text => "text",
            ScaleType::Font => "font",
            ScaleType::Radius => "radius",
            ScaleType::Min => "min",
            ScaleType::Max => "max",
            ScaleType::Auto => "auto",
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScaleType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "width" | "w" => Ok(ScaleType::Width),
            "height" | "h" => Ok(ScaleType::Height),
            "text" | "sp" => Ok(ScaleType::Text),
            "font" => Ok(ScaleType::Font),
            "radius" | "r" => Ok(ScaleType::Radius),
            "min" => Ok(ScaleType::Min),
            "max" => Ok(ScaleType::Max),
            "auto" => Ok(ScaleType::Auto),
            _ => Err(ConfigError::UnknownScaleType(s.to_string())),
        }
    }
}

/// Width, height and text multipliers derived from one configuration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFactors {
    pub scale_width: f64,
    pub scale_height: f64,
    pub scale_text: f64,
}

impl ScaleFactors {
    /// All factors 1.0
    pub const IDENTITY: ScaleFactors = ScaleFactors {
        scale_width: 1.0,
        scale_height: 1.0,
        scale_text: 1.0,
    };

    pub const fn new(scale_width: f64, scale_height: f64, scale_text: f64) -> Self {
        Self {
            scale_width,
            scale_height,
            scale_text,
        }
    }

    /// Multiplier selected by `scale_type`
    #[inline]
    pub fn factor_for(&self, scale_type: ScaleType) -> f64 {
        match scale_type {
            ScaleType::Width | ScaleType::Auto => self.scale_width,
            ScaleType::Height => self.scale_height,
            ScaleType::Text | ScaleType::Font => self.scale_text,
            ScaleType::Radius | ScaleType::Min => self.scale_width.min(self.scale_height),
            ScaleType::Max => self.scale_width.max(self.scale_height),
        }
    }
}

impl Default for ScaleFactors {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Everything one recomputation produces
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedState {
    pub factors: ScaleFactors,
    /// Screen dimensions the factors were derived from
    pub screen: ScreenDimensions,
}

/// Derived state behind a lock, mirrored into per-factor atomics
pub struct SharedFactors {
    guarded: RwLock<DerivedState>,
    width_bits: AtomicU64,
    height_bits: AtomicU64,
    text_bits: AtomicU64,
}

impl SharedFactors {
    pub fn new(initial: DerivedState) -> Self {
        let ScaleFactors {
            scale_width,
            scale_height,
            scale_text,
        } = initial.factors;
        Self {
            guarded: RwLock::new(initial),
            width_bits: AtomicU64::new(scale_width.to_bits()),
            height_bits: AtomicU64::new(scale_height.to_bits()),
            text_bits: AtomicU64::new(scale_text.to_bits()),
        }
    }

    /// Replace the derived state as one unit
    pub fn store(&self, state: DerivedState) {
        let mut guarded = self.guarded.write();
        *guarded = state;
        // Mirror while still holding the write lock so guarded readers never
        // run ahead of the atomics
        self.width_bits
            .store(state.factors.scale_width.to_bits(), Ordering::Release);
        self.height_bits
            .store(state.factors.scale_height.to_bits(), Ordering::Release);
        self.text_bits
            .store(state.factors.scale_text.to_bits(), Ordering::Release);
    }

    /// Consistent copy of the derived state
    #[inline]
    pub fn load(&self) -> DerivedState {
        *self.guarded.read()
    }

    /// Consistent copy of the factors only
    #[inline]
    pub fn factors(&self) -> ScaleFactors {
        self.guarded.read().factors
    }

    /// Lock-free read; factors may come from different stores
    #[inline]
    pub fn load_unsynchronized(&self) -> ScaleFactors {
        ScaleFactors {
            scale_width: f64::from_bits(self.width_bits.load(Ordering::Acquire)),
            scale_height: f64::from_bits(self.height_bits.load(Ordering::Acquire)),
            scale_text: f64::from_bits(self.text_bits.load(Ordering::Acquire)),
        }
    }
}

impl fmt::Debug for SharedFactors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedFactors")
            .field("state", &self.load())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(w: f64, h: f64, t: f64) -> DerivedState {
        DerivedState {
            factors: ScaleFactors::new(w, h, t),
            screen: ScreenDimensions::new(390.0, 844.0, 3.0),
        }
    }

    #[test]
    fn test_factor_selection() {
        let factors = ScaleFactors::new(1.2, 0.9, 1.0);
        assert_eq!(factors.factor_for(ScaleType::Width), 1.2);
        assert_eq!(factors.factor_for(ScaleType::Auto), 1.2);
        assert_eq!(factors.factor_for(ScaleType::Height), 0.9);
        assert_eq!(factors.factor_for(ScaleType::Text), 1.0);
        assert_eq!(factors.factor_for(ScaleType::Font), 1.0);
        assert_eq!(factors.factor_for(ScaleType::Radius), 0.9);
        assert_eq!(factors.factor_for(ScaleType::Min), 0.9);
        assert_eq!(factors.factor_for(ScaleType::Max), 1.2);
    }

    #[test]
    fn test_scale_type_names() {
        for scale_type in ScaleType::ALL {
            assert_eq!(scale_type.name().parse::<ScaleType>().unwrap(), scale_type);
        }
        assert_eq!("sp".parse::<ScaleType>().unwrap(), ScaleType::Text);
        assert!("diagonal".parse::<ScaleType>().is_err());
    }

    #[test]
    fn test_both_tiers_see_stores() {
        let shared = SharedFactors::new(state(1.0, 1.0, 1.0));
        shared.store(state(1.5, 0.75, 0.75));

        assert_eq!(shared.load().factors, ScaleFactors::new(1.5, 0.75, 0.75));
        assert_eq!(shared.load_unsynchronized(), shared.factors());
    }
}
