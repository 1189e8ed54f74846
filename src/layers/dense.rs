use crate::activator::Activation;
use crate::error::{check_len, LayerError, Result};
use crate::layers::{Layer, Shape};
use crate::matrix::Mat;
use crate::option::TrainingOption;

use itertools::izip;
use rand::distributions::Uniform;
use rand::Rng;

/// A fully connected layer of a neural network.
///
/// Every output unit `i` computes `f(sum_j w[j][i] * x[j] + b[i])`, where
/// `f` is the layer's activation.
#[derive(Clone, Debug)]
pub struct DenseLayer<A> {
    /// The activation function to be used for every neuron in the layer.
    activation: A,
    /// The network weights, one row per input and one column per output.
    weights: Mat,
    /// One bias per output.
    bias: Vec<f64>,
}

impl<A: Activation> DenseLayer<A> {
    /// Initializes a new, untrained layer.
    ///
    /// Arguments:
    ///
    ///  * `activation` - the activation function to be used for this layer's
    ///                   output.
    ///  * `inputs` - the number of inputs to this layer.
    ///  * `outputs` - the number of outputs from this layer.
    ///  * `rng` - the source used to draw the initial weights.
    pub fn new<R>(
        activation: A,
        inputs: usize,
        outputs: usize,
        rng: &mut R,
    ) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        if inputs == 0 || outputs == 0 {
            return Err(LayerError::ZeroUnits);
        }
        let mut layer = DenseLayer {
            activation,
            weights: Mat::zeros(inputs, outputs),
            bias: vec![0.0; outputs],
        };
        layer.init(rng);
        Ok(layer)
    }

    /// Creates a layer from known parameters.
    ///
    /// `weights` must have one row per input and one column per output, and
    /// `bias` one entry per output.
    pub fn from_parameters(
        activation: A,
        weights: Mat,
        bias: Vec<f64>,
    ) -> Result<Self> {
        if weights.rows() == 0 || weights.cols() == 0 {
            return Err(LayerError::ZeroUnits);
        }
        check_len("bias", weights.cols(), bias.len())?;
        Ok(DenseLayer {
            activation,
            weights,
            bias,
        })
    }

    /// Resets the parameters: weights are drawn uniformly from
    /// `[-0.5, 0.5)` and every bias is set to `1.0`.
    pub fn init<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.weights.fill_random(Uniform::new(-0.5, 0.5), rng);
        for b in &mut self.bias {
            *b = 1.0;
        }
        log::debug!(
            "initialized dense layer with {} inputs and {} outputs",
            self.weights.rows(),
            self.weights.cols()
        );
    }

    pub fn activation(&self) -> &A {
        &self.activation
    }

    pub fn weights(&self) -> &Mat {
        &self.weights
    }

    pub fn bias(&self) -> &[f64] {
        &self.bias
    }

    /// Sums the parameter updates over a batch.
    ///
    /// The returned terms already point downhill: they are the negated
    /// gradients, so adding them to the parameters descends the loss.
    pub fn gradient(
        &self,
        inputs: &[Vec<f64>],
        deltas: &[Vec<f64>],
    ) -> Result<(Mat, Vec<f64>)> {
        check_len("delta batch", inputs.len(), deltas.len())?;
        let mut grad_weights = Mat::zeros(self.input_len(), self.output_len());
        let mut grad_bias = vec![0.0; self.output_len()];

        for (input, delta) in inputs.iter().zip(deltas) {
            check_len("gradient input", self.input_len(), input.len())?;
            check_len("gradient delta", self.output_len(), delta.len())?;
            for (j, &x) in input.iter().enumerate() {
                for (i, &d) in delta.iter().enumerate() {
                    grad_weights[(j, i)] -= d * x;
                }
            }
            for (g, &d) in grad_bias.iter_mut().zip(delta) {
                *g -= d;
            }
        }
        Ok((grad_weights, grad_bias))
    }
}

impl<A: Activation> Layer for DenseLayer<A> {
    fn shape(&self) -> Shape {
        Shape::new(self.weights.rows(), self.weights.cols())
    }

    fn forward(&self, input: &[f64]) -> Result<Vec<f64>> {
        check_len("dense input", self.input_len(), input.len())?;
        let mut sums = vec![0.0; self.output_len()];
        for (j, &x) in input.iter().enumerate() {
            for (s, &w) in sums.iter_mut().zip(self.weights.row(j)) {
                *s += w * x;
            }
        }
        Ok(izip!(sums, &self.bias)
            .map(|(s, b)| self.activation.f(s + b))
            .collect())
    }

    fn backward_with_target(
        &self,
        predicted: &[f64],
        target: &[f64],
    ) -> Result<Vec<f64>> {
        check_len("predicted", self.output_len(), predicted.len())?;
        check_len("target", self.output_len(), target.len())?;
        Ok(izip!(predicted, target)
            .map(|(&y, &t)| (y - t) * self.activation.fprime(y))
            .collect())
    }

    fn backward(
        &self,
        predicted: &[f64],
        accumulated: &[f64],
    ) -> Result<Vec<f64>> {
        check_len("predicted", self.output_len(), predicted.len())?;
        check_len("accumulated delta", self.output_len(), accumulated.len())?;
        Ok(izip!(predicted, accumulated)
            .map(|(&y, &e)| e * self.activation.fprime(y))
            .collect())
    }

    fn accumulate_delta(&self, delta: &[f64]) -> Result<Vec<f64>> {
        check_len("delta", self.output_len(), delta.len())?;
        Ok((0..self.input_len())
            .map(|j| {
                izip!(self.weights.row(j), delta)
                    .map(|(w, d)| d * w)
                    .sum::<f64>()
            })
            .collect())
    }

    /// Mini-batch gradient descent, followed by weight decay when enabled.
    /// The bias is never decayed.
    fn turn(
        &mut self,
        batch: &[Vec<f64>],
        deltas: &[Vec<f64>],
        option: &TrainingOption,
    ) -> Result<()> {
        option.validate()?;
        if batch.is_empty() {
            return Err(LayerError::EmptyBatch);
        }
        let (grad_weights, grad_bias) = self.gradient(batch, deltas)?;
        let batch_size = batch.len() as f64;

        self.weights
            .apply_delta(option.learning_rate, &grad_weights, batch_size)?;
        if option.l2_regularization {
            self.weights.scale(1.0 - option.regularization_rate);
        }
        for (b, g) in self.bias.iter_mut().zip(grad_bias) {
            *b += option.learning_rate * g / batch_size;
        }

        log::trace!(
            "turned dense layer on {} samples (l2: {})",
            batch.len(),
            option.l2_regularization
        );
        Ok(())
    }
}
