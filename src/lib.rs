//! Building blocks for training a small feed-forward neural network.
//!
//! Dense layers and a softmax output layer share the [`Layer`] trait. Each
//! layer feeds vectors forward, computes its deltas, hands the accumulated
//! deltas to the layer before it, and turns its own parameters with
//! mini-batch gradient descent.
//!
//! # Example
//!
//! One gradient step on a sigmoid layer followed by a softmax:
//!
//! ```
//! # use mlp::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut hidden = DenseLayer::new(Activator::Sigmoid, 2, 3, &mut rng).unwrap();
//! let mut output = SoftmaxLayer::new(3).unwrap();
//! let option = TrainingOption::new().learning_rate(0.5);
//!
//! let inputs = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
//! let targets = vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]];
//!
//! let activations = hidden.forward_batch(&inputs).unwrap();
//! let predicted = output.forward_batch(&activations).unwrap();
//! let (out_deltas, accumulated) =
//!     output.backward_with_target_batch(&predicted, &targets).unwrap();
//! let (deltas, _) = hidden.backward_batch(&activations, &accumulated).unwrap();
//!
//! output.turn(&activations, &out_deltas, &option).unwrap();
//! hidden.turn(&inputs, &deltas, &option).unwrap();
//!
//! let probabilities = output.forward(&hidden.forward(&inputs[0]).unwrap()).unwrap();
//! assert!((probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-12);
//! ```

#[macro_use]
extern crate serde_derive;

pub mod activator;
pub mod error;
pub mod layers;
pub mod matrix;
pub mod option;

pub use activator::{Activation, Activator};
pub use error::{LayerError, Result};
pub use layers::dense::DenseLayer;
pub use layers::softmax::SoftmaxLayer;
pub use layers::{Batch, Layer, Shape};
pub use matrix::Mat;
pub use option::TrainingOption;
