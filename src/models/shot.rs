use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Inclusive bounds and step of one slider-bound parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParameterRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Clamps into `[min, max]` and snaps to the nearest step counted from `min`.
    pub fn normalize(self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }
}

pub const ANGLE_RANGE: ParameterRange = ParameterRange::new(-90.0, 90.0, 1.0);
pub const ELEVATION_RANGE: ParameterRange = ParameterRange::new(-45.0, 45.0, 1.0);
pub const SPEED_RANGE: ParameterRange = ParameterRange::new(500.0, 3000.0, 100.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotField {
    Angle,
    Elevation,
    Speed,
}

impl ShotField {
    pub const ALL: [ShotField; 3] = [ShotField::Angle, ShotField::Elevation, ShotField::Speed];

    pub fn label(self) -> &'static str {
        match self {
            ShotField::Angle => "Angle",
            ShotField::Elevation => "Elevation",
            ShotField::Speed => "Speed",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            ShotField::Angle | ShotField::Elevation => "°",
            ShotField::Speed => "",
        }
    }

    pub fn range(self) -> ParameterRange {
        match self {
            ShotField::Angle => ANGLE_RANGE,
            ShotField::Elevation => ELEVATION_RANGE,
            ShotField::Speed => SPEED_RANGE,
        }
    }
}

/// Launch parameters pushed to the simulator right before every shot.
///
/// Fields are private so every write goes through [`ShotParameters::set`],
/// which keeps each value inside its range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShotParameters {
    angle: f64,
    elevation: f64,
    speed: f64,
}

impl Default for ShotParameters {
    fn default() -> Self {
        Self {
            angle: 0.0,
            elevation: -20.0,
            speed: 1500.0,
        }
    }
}

impl ShotParameters {
    pub fn new(angle: f64, elevation: f64, speed: f64) -> Self {
        let mut params = Self::default();
        params.set(ShotField::Angle, angle);
        params.set(ShotField::Elevation, elevation);
        params.set(ShotField::Speed, speed);
        params
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn get(&self, field: ShotField) -> f64 {
        match field {
            ShotField::Angle => self.angle,
            ShotField::Elevation => self.elevation,
            ShotField::Speed => self.speed,
        }
    }

    /// Stores `value` after clamping and snapping. Non-finite input is ignored.
    /// Returns the value that ended up stored.
    pub fn set(&mut self, field: ShotField, value: f64) -> f64 {
        if !value.is_finite() {
            return self.get(field);
        }
        let normalized = field.range().normalize(value);
        match field {
            ShotField::Angle => self.angle = normalized,
            ShotField::Elevation => self.elevation = normalized,
            ShotField::Speed => self.speed = normalized,
        }
        normalized
    }

    /// Parses raw slider text and stores it.
    pub fn set_from_input(&mut self, field: ShotField, raw: &str) -> Result<f64> {
        let value: f64 = raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got {raw:?}", field.label()))?;
        Ok(self.set(field, value))
    }

    /// Argument order of `_setBallAngle`.
    pub fn as_args(&self) -> [f64; 3] {
        [self.angle, self.elevation, self.speed]
    }
}

impl fmt::Display for ShotParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "angle {}°, elevation {}°, speed {}",
            self.angle, self.elevation, self.speed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_initial_slider_positions() {
        let params = ShotParameters::default();
        assert_eq!(params.as_args(), [0.0, -20.0, 1500.0]);
        for field in ShotField::ALL {
            let value = params.get(field);
            assert_eq!(field.range().normalize(value), value, "{}", field.label());
        }
    }

    #[test]
    fn values_are_clamped_to_their_ranges() {
        let params = ShotParameters::new(120.0, -80.0, 9000.0);
        assert_eq!(params.as_args(), [90.0, -45.0, 3000.0]);

        let params = ShotParameters::new(-300.0, 60.0, 10.0);
        assert_eq!(params.as_args(), [-90.0, 45.0, 500.0]);
    }

    #[test]
    fn speed_snaps_to_hundreds() {
        let mut params = ShotParameters::default();
        assert_eq!(params.set(ShotField::Speed, 2049.0), 2000.0);
        assert_eq!(params.set(ShotField::Speed, 2051.0), 2100.0);
        assert_eq!(params.set(ShotField::Angle, 12.4), 12.0);
    }

    #[test]
    fn non_finite_input_keeps_previous_value() {
        let mut params = ShotParameters::new(45.0, -10.0, 2000.0);
        assert_eq!(params.set(ShotField::Angle, f64::NAN), 45.0);
        assert_eq!(params.set(ShotField::Speed, f64::INFINITY), 2000.0);
        assert_eq!(params.as_args(), [45.0, -10.0, 2000.0]);
    }

    #[test]
    fn display_reads_like_the_slider_labels() {
        let params = ShotParameters::new(45.0, -10.0, 2000.0);
        assert_eq!(params.to_string(), "angle 45°, elevation -10°, speed 2000");
    }

    #[test]
    fn slider_text_is_parsed() {
        let mut params = ShotParameters::default();
        assert_eq!(params.set_from_input(ShotField::Elevation, " -7 ").unwrap(), -7.0);
        let err = params
            .set_from_input(ShotField::Angle, "left")
            .expect_err("text is rejected");
        assert!(err.to_string().contains("Angle must be a number"));
        assert_eq!(params.angle(), 0.0);
    }
}
