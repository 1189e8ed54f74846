//! Activation function types.

/// A scalar activation function paired with its derivative.
///
/// Note that `fprime` takes in the *output* of the activation function,
/// rather than the input. Layers only keep their activated outputs, so the
/// derivative has to be recoverable from them.
pub trait Activation {
    /// Evaluates `f(x)`.
    fn f(&self, x: f64) -> f64;

    /// Evaluates the derivative `f'(x)`, where `x = f^{-1}(y)`.
    fn fprime(&self, y: f64) -> f64;
}

/// [Activation function](https://en.wikipedia.org/wiki/Activation_function)
/// types.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Activator {
    /// Linear pass-through, `f(x) = x`
    Identity,
    /// Rectified Linear Unit
    ReLU,
    /// Leaky Rectified Linear Unit
    ///
    /// Takes an `alpha` value to use for negative inputs.
    LeakyReLU(f64),
    /// Sigmoid function
    Sigmoid,
    /// Hyperbolic tan function
    TanH,
}

impl Activation for Activator {
    fn f(&self, x: f64) -> f64 {
        match *self {
            Activator::Identity => x,
            Activator::ReLU => {
                if x > 0.0 {
                    x
                } else {
                    0.0
                }
            }
            Activator::LeakyReLU(alpha) => {
                if x > 0.0 {
                    x
                } else {
                    alpha * x
                }
            }
            Activator::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activator::TanH => x.tanh(),
        }
    }

    fn fprime(&self, y: f64) -> f64 {
        match *self {
            Activator::Identity => 1.0,
            Activator::ReLU => {
                if y > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activator::LeakyReLU(alpha) => {
                if y > 0.0 {
                    1.0
                } else {
                    alpha
                }
            }
            Activator::Sigmoid => y * (1.0 - y),
            Activator::TanH => 1.0 - y * y,
        }
    }
}

/// Any pair of closures `(f, fprime)` can be used as an activation.
impl<F, D> Activation for (F, D)
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    fn f(&self, x: f64) -> f64 {
        (self.0)(x)
    }

    fn fprime(&self, y: f64) -> f64 {
        (self.1)(y)
    }
}
