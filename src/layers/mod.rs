//! Layer types and the operations every layer supports.

pub mod dense;
pub mod softmax;

use crate::error::{check_len, Result};
use crate::option::TrainingOption;

/// A batch of equally sized vectors, one per sample.
pub type Batch = Vec<Vec<f64>>;

/// The input and output widths of a layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub inputs: usize,
    pub outputs: usize,
}

impl Shape {
    pub fn new(inputs: usize, outputs: usize) -> Self {
        Shape { inputs, outputs }
    }
}

/// A single stage of a feed-forward network.
///
/// Deltas always refer to this layer's outputs. `accumulate_delta` projects
/// them back onto this layer's inputs, ready for the previous layer's
/// `backward`.
pub trait Layer {
    fn shape(&self) -> Shape;

    /// Returns the number of inputs to this layer.
    fn input_len(&self) -> usize {
        self.shape().inputs
    }

    /// Returns the number of outputs from this layer.
    fn output_len(&self) -> usize {
        self.shape().outputs
    }

    /// Feeds a single `input` forward through the layer.
    fn forward(&self, input: &[f64]) -> Result<Vec<f64>>;

    /// Computes the delta of an output layer from the expected `target`.
    fn backward_with_target(
        &self,
        predicted: &[f64],
        target: &[f64],
    ) -> Result<Vec<f64>>;

    /// Computes the delta of an inner layer from the delta accumulated by
    /// the layer after it.
    fn backward(&self, predicted: &[f64], accumulated: &[f64])
        -> Result<Vec<f64>>;

    /// Projects `delta` back onto this layer's inputs.
    fn accumulate_delta(&self, delta: &[f64]) -> Result<Vec<f64>>;

    /// Updates the layer's parameters from a mini-batch of inputs and the
    /// matching deltas.
    fn turn(
        &mut self,
        batch: &[Vec<f64>],
        deltas: &[Vec<f64>],
        option: &TrainingOption,
    ) -> Result<()>;

    fn forward_batch(&self, batch: &[Vec<f64>]) -> Result<Batch> {
        batch.iter().map(|input| self.forward(input)).collect()
    }

    fn accumulate_delta_batch(&self, deltas: &[Vec<f64>]) -> Result<Batch> {
        deltas.iter().map(|d| self.accumulate_delta(d)).collect()
    }

    /// Returns this layer's deltas along with the deltas accumulated for the
    /// previous layer.
    fn backward_with_target_batch(
        &self,
        predicted: &[Vec<f64>],
        target: &[Vec<f64>],
    ) -> Result<(Batch, Batch)> {
        check_len("target batch", predicted.len(), target.len())?;
        let deltas = predicted
            .iter()
            .zip(target)
            .map(|(p, t)| self.backward_with_target(p, t))
            .collect::<Result<Batch>>()?;
        let accumulated = self.accumulate_delta_batch(&deltas)?;
        Ok((deltas, accumulated))
    }

    /// Returns this layer's deltas along with the deltas accumulated for the
    /// previous layer.
    fn backward_batch(
        &self,
        predicted: &[Vec<f64>],
        accumulated: &[Vec<f64>],
    ) -> Result<(Batch, Batch)> {
        check_len("accumulated delta batch", predicted.len(), accumulated.len())?;
        let deltas = predicted
            .iter()
            .zip(accumulated)
            .map(|(p, a)| self.backward(p, a))
            .collect::<Result<Batch>>()?;
        let accumulated = self.accumulate_delta_batch(&deltas)?;
        Ok((deltas, accumulated))
    }
}

#[cfg(test)]
mod tests {
    use super::dense::DenseLayer;
    use super::softmax::SoftmaxLayer;
    use super::*;
    use crate::activator::Activator;
    use crate::matrix::Mat;
    use approx::assert_relative_eq;

    fn hidden() -> DenseLayer<Activator> {
        let weights =
            Mat::from_rows(&[[0.1, -0.2, 0.3], [0.4, 0.5, -0.6]]).unwrap();
        DenseLayer::from_parameters(Activator::Sigmoid, weights, vec![0.0; 3])
            .unwrap()
    }

    #[test]
    fn layers_as_trait_objects() {
        let layers: Vec<Box<dyn Layer>> =
            vec![Box::new(hidden()), Box::new(SoftmaxLayer::new(3).unwrap())];
        let mut activation = vec![1.0, -1.0];
        for layer in &layers {
            activation = layer.forward(&activation).unwrap();
        }
        assert_eq!(activation.len(), 3);
        assert_relative_eq!(activation.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn two_layer_backward_pass() {
        let hidden = hidden();
        let output = SoftmaxLayer::new(3).unwrap();
        let inputs = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let targets = vec![vec![1.0, 0.0, 0.0], vec![0.0, 0.0, 1.0]];

        let h = hidden.forward_batch(&inputs).unwrap();
        let y = output.forward_batch(&h).unwrap();
        let (out_deltas, acc) = output.backward_with_target_batch(&y, &targets).unwrap();
        assert_eq!(out_deltas, acc);

        let (deltas, to_input) = hidden.backward_batch(&h, &acc).unwrap();
        assert_eq!(deltas.len(), 2);
        assert_eq!(to_input.len(), 2);
        for (n, delta) in deltas.iter().enumerate() {
            assert_eq!(to_input[n], hidden.accumulate_delta(delta).unwrap());
        }
        for (n, delta) in deltas.iter().enumerate() {
            for i in 0..3 {
                let slope = h[n][i] * (1.0 - h[n][i]);
                assert_relative_eq!(delta[i], (y[n][i] - targets[n][i]) * slope);
            }
        }
    }

    #[test]
    fn batches_keep_sample_order() {
        let layer = hidden();
        let inputs = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![-2.0, 0.5]];
        let outputs = layer.forward_batch(&inputs).unwrap();
        assert_eq!(outputs.len(), 3);
        for (input, output) in inputs.iter().zip(&outputs) {
            assert_eq!(output, &layer.forward(input).unwrap());
        }
        assert_ne!(outputs[0], outputs[1]);

        let deltas = vec![vec![1.0, 0.0, 0.0], vec![0.0, 0.0, 1.0]];
        let accumulated = layer.accumulate_delta_batch(&deltas).unwrap();
        assert_eq!(accumulated, vec![vec![0.1, 0.4], vec![0.3, -0.6]]);
    }

    #[test]
    fn mismatched_batch_lengths() {
        let layer = hidden();
        let predicted = vec![vec![0.5; 3]];
        assert!(layer
            .backward_with_target_batch(&predicted, &[])
            .is_err());
        assert!(layer.backward_batch(&predicted, &[]).is_err());
    }
}
