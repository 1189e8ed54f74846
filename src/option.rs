//! Parameter update configuration.

use crate::error::{LayerError, Result};

/// Controls how a layer turns its parameters after a mini-batch.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingOption {
    /// Step size of the gradient descent update.
    pub learning_rate: f64,
    /// Whether to decay weights after every update.
    pub l2_regularization: bool,
    /// Fraction of each weight removed per update when decay is enabled.
    pub regularization_rate: f64,
}

impl Default for TrainingOption {
    fn default() -> Self {
        TrainingOption {
            learning_rate: 0.1,
            l2_regularization: false,
            regularization_rate: 0.0,
        }
    }
}

impl TrainingOption {
    /// Creates a new TrainingOption with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the learning rate to use during gradient descent.
    pub fn learning_rate(mut self, rate: f64) -> Self {
        self.learning_rate = rate;
        self
    }

    /// Enables weight decay with the provided `rate`.
    pub fn l2_regularization(mut self, rate: f64) -> Self {
        self.l2_regularization = true;
        self.regularization_rate = rate;
        self
    }

    /// Returns an error if the option cannot drive a sensible update.
    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate < 0.0 {
            return Err(LayerError::InvalidOption {
                message: format!(
                    "learning rate must be finite and non-negative, got {}",
                    self.learning_rate
                ),
            });
        }
        if self.l2_regularization
            && !(0.0..=1.0).contains(&self.regularization_rate)
        {
            return Err(LayerError::InvalidOption {
                message: format!(
                    "regularization rate must lie in [0, 1], got {}",
                    self.regularization_rate
                ),
            });
        }
        Ok(())
    }
}
