use crate::error::{check_len, LayerError, Result};
use crate::layers::{Layer, Shape};
use crate::option::TrainingOption;

use itertools::izip;

/// A weightless output layer that normalizes its inputs into a probability
/// distribution.
///
/// The deltas assume the layer is trained against a cross-entropy loss, where
/// the softmax derivative cancels out. There are no parameters, so `turn`
/// does nothing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SoftmaxLayer {
    shape: Shape,
    max_shift: bool,
}

impl SoftmaxLayer {
    /// Creates a softmax over `units` values.
    ///
    /// The layer is square: it takes and returns `units` values.
    pub fn new(units: usize) -> Result<Self> {
        if units == 0 {
            return Err(LayerError::ZeroUnits);
        }
        Ok(SoftmaxLayer {
            shape: Shape::new(units, units),
            max_shift: false,
        })
    }

    /// Subtracts the largest input before exponentiating.
    ///
    /// The result is mathematically unchanged, but large inputs no longer
    /// overflow to `inf / inf`.
    pub fn with_max_shift(mut self) -> Self {
        self.max_shift = true;
        self
    }
}

impl Layer for SoftmaxLayer {
    fn shape(&self) -> Shape {
        self.shape
    }

    fn forward(&self, input: &[f64]) -> Result<Vec<f64>> {
        check_len("softmax input", self.input_len(), input.len())?;
        let shift = if self.max_shift {
            input.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
        } else {
            0.0
        };
        let exps: Vec<f64> = input.iter().map(|x| (x - shift).exp()).collect();
        let sum: f64 = exps.iter().sum();
        Ok(exps.into_iter().map(|e| e / sum).collect())
    }

    fn backward_with_target(
        &self,
        predicted: &[f64],
        target: &[f64],
    ) -> Result<Vec<f64>> {
        check_len("predicted", self.output_len(), predicted.len())?;
        check_len("target", self.output_len(), target.len())?;
        Ok(izip!(predicted, target).map(|(y, t)| y - t).collect())
    }

    fn backward(
        &self,
        predicted: &[f64],
        accumulated: &[f64],
    ) -> Result<Vec<f64>> {
        check_len("predicted", self.output_len(), predicted.len())?;
        check_len("accumulated delta", self.output_len(), accumulated.len())?;
        Ok(accumulated.to_vec())
    }

    fn accumulate_delta(&self, delta: &[f64]) -> Result<Vec<f64>> {
        check_len("delta", self.output_len(), delta.len())?;
        Ok(delta.to_vec())
    }

    fn turn(
        &mut self,
        _: &[Vec<f64>],
        _: &[Vec<f64>],
        _: &TrainingOption,
    ) -> Result<()> {
        log::trace!("softmax layer has no parameters to turn");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn zero_units_are_rejected() {
        assert_eq!(SoftmaxLayer::new(0), Err(LayerError::ZeroUnits));
    }

    #[test]
    fn outputs_form_a_distribution() {
        let layer = SoftmaxLayer::new(4).unwrap();
        for input in &[
            vec![0.0, 0.0, 0.0, 0.0],
            vec![1.0, 2.0, 3.0, 4.0],
            vec![-10.0, 5.5, 0.25, 30.0],
        ] {
            let out = layer.forward(input).unwrap();
            assert_eq!(out.len(), 4);
            assert_relative_eq!(out.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
            assert!(out.iter().all(|&p| p > 0.0 && p < 1.0));
        }
    }

    #[test]
    fn known_values() {
        let layer = SoftmaxLayer::new(2).unwrap();
        let out = layer.forward(&[0.0, 2.0_f64.ln()]).unwrap();
        assert_abs_diff_eq!(out[0], 1.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out[1], 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn naive_softmax_overflows() {
        let layer = SoftmaxLayer::new(2).unwrap();
        let out = layer.forward(&[1000.0, 0.0]).unwrap();
        assert!(out[0].is_nan());
    }

    #[test]
    fn max_shift_survives_large_inputs() {
        let plain = SoftmaxLayer::new(3).unwrap();
        let shifted = SoftmaxLayer::new(3).unwrap().with_max_shift();
        let small = [0.5, -1.0, 2.0];
        let a = plain.forward(&small).unwrap();
        let b = shifted.forward(&small).unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert_relative_eq!(*x, *y, epsilon = 1e-12);
        }

        let out = shifted.forward(&[1000.0, 999.0, -1000.0]).unwrap();
        assert_relative_eq!(out.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert!(out[0] > out[1]);
    }

    #[test]
    fn target_delta_is_exact_difference() {
        let layer = SoftmaxLayer::new(3).unwrap();
        let predicted = [0.7, 0.2, 0.1];
        let target = [0.0, 1.0, 0.0];
        let delta = layer.backward_with_target(&predicted, &target).unwrap();
        for i in 0..3 {
            assert_eq!(delta[i], predicted[i] - target[i]);
        }
    }

    #[test]
    fn backward_and_accumulate_pass_through() {
        let layer = SoftmaxLayer::new(3).unwrap();
        let upstream = vec![0.25, -0.5, 1.0];
        assert_eq!(layer.backward(&[0.3, 0.3, 0.4], &upstream).unwrap(), upstream);
        assert_eq!(layer.accumulate_delta(&upstream).unwrap(), upstream);
        assert!(layer.backward(&[0.5, 0.5], &upstream).is_err());
        assert!(layer.accumulate_delta(&[1.0]).is_err());
    }

    #[test]
    fn turn_is_a_no_op() {
        let mut layer = SoftmaxLayer::new(2).unwrap();
        let before = layer;
        let option = TrainingOption::new().learning_rate(-3.0);
        assert!(layer.turn(&[], &[], &option).is_ok());
        assert!(layer
            .turn(&[vec![1.0; 7]], &[vec![], vec![2.0]], &TrainingOption::default())
            .is_ok());
        assert_eq!(layer, before);
    }

    #[test]
    fn shape_is_square() {
        let layer = SoftmaxLayer::new(5).unwrap();
        assert_eq!(layer.shape(), Shape::new(5, 5));
        assert_eq!(layer.input_len(), 5);
        assert_eq!(layer.output_len(), 5);
    }
}
