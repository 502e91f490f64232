use anyhow::Result;

use crate::error::ExportError;
use crate::models::{LoadState, ShotField, ShotParameters};

/// What a forwarding call ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForwardOutcome {
    Delivered,
    /// No module yet; nothing was called.
    ModuleNotReady,
    /// Parameters were pushed but the module has no shoot export.
    ShootUnavailable,
}

/// Holds the slider values and pushes them into the simulator.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParameterForwarder {
    params: ShotParameters,
}

impl ParameterForwarder {
    pub fn new(params: ShotParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> ShotParameters {
        self.params
    }

    pub fn set(&mut self, field: ShotField, value: f64) -> f64 {
        self.params.set(field, value)
    }

    pub fn set_from_input(&mut self, field: ShotField, raw: &str) -> Result<f64> {
        self.params.set_from_input(field, raw)
    }

    /// Calls `_setBallAngle(angle, elevation, speed)` with the current values.
    pub fn set_parameters(&self, state: &LoadState) -> Result<ForwardOutcome, ExportError> {
        let Some(module) = state.module() else {
            tracing::warn!("module not ready, parameters not forwarded");
            return Ok(ForwardOutcome::ModuleNotReady);
        };
        let [angle, elevation, speed] = self.params.as_args();
        module.set_ball_angle(angle, elevation, speed)?;
        tracing::debug!(angle, elevation, speed, "shot parameters forwarded");
        Ok(ForwardOutcome::Delivered)
    }

    /// Aim-and-shoot: pushes the current parameters, then fires.
    ///
    /// The simulator reads parameters at shot time, so they are sent right
    /// before `_shootBall`. A failed parameter push cancels the shot.
    pub fn shoot(&self, state: &LoadState) -> Result<ForwardOutcome, ExportError> {
        let Some(module) = state.module() else {
            tracing::warn!("module not ready, shot ignored");
            return Ok(ForwardOutcome::ModuleNotReady);
        };
        self.set_parameters(state)?;
        match module.shoot_ball() {
            Ok(()) => {
                tracing::info!(params = ?self.params, "ball launched");
                Ok(ForwardOutcome::Delivered)
            }
            Err(ExportError::Missing(export)) => {
                tracing::warn!("{export} is not exported, shot skipped");
                Ok(ForwardOutcome::ShootUnavailable)
            }
            Err(err) => Err(err),
        }
    }
}
