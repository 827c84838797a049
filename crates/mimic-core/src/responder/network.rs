//! Small dense regression network.
//!
//! Maps one encoded text onto another: `MAX_LEN -> 128 -> 128 -> MAX_LEN`
//! with ReLU hidden layers and a sigmoid output. Codes are scaled into
//! `[0, 1]` by [`CODE_SCALE`] on the way in and back out.
//!
//! Fitting is full retraining: Glorot-uniform weights, mean squared error,
//! Adam over shuffled mini-batches for a fixed number of epochs. It is CPU
//! bound and meant to run on a blocking thread.

use ndarray::{Array, Array1, Array2, ArrayView2, Axis, Dimension, Zip};
use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use mimic_types::config::TrainingConfig;
use mimic_types::error::ModelError;

use crate::codec::{EncodedVector, MAX_CODE, MAX_LEN};

/// Width of both hidden layers.
pub const HIDDEN_WIDTH: usize = 128;

/// Code value mapped to `1.0`. Codes above it saturate.
pub const CODE_SCALE: f32 = 2048.0;

const ADAM_BETA1: f32 = 0.9;
const ADAM_BETA2: f32 = 0.999;
const ADAM_EPSILON: f32 = 1e-7;

/// Scale an encoded vector into network input space.
pub fn to_unit(vector: &EncodedVector) -> Array1<f32> {
    vector
        .codes()
        .iter()
        .map(|&code| (code as f32 / CODE_SCALE).min(1.0))
        .collect()
}

/// Round network output back into the code range.
///
/// Control codes other than tab and newline become padding.
pub fn from_unit(values: &[f32]) -> EncodedVector {
    EncodedVector::from_codes(values.iter().map(|&v| {
        let code = (v * CODE_SCALE).round().clamp(0.0, MAX_CODE as f32) as u32;
        if code < 0x20 && code != u32::from(b'\t') && code != u32::from(b'\n') {
            0
        } else {
            code
        }
    }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Activation {
    Relu,
    Sigmoid,
}

impl Activation {
    fn apply(self, z: Array2<f32>) -> Array2<f32> {
        match self {
            Activation::Relu => z.mapv_into(|v| v.max(0.0)),
            Activation::Sigmoid => z.mapv_into(|v| 1.0 / (1.0 + (-v).exp())),
        }
    }

    /// Derivative expressed through the layer's output.
    fn derivative(self, out: &Array2<f32>) -> Array2<f32> {
        match self {
            Activation::Relu => out.mapv(|a| if a > 0.0 { 1.0 } else { 0.0 }),
            Activation::Sigmoid => out.mapv(|a| a * (1.0 - a)),
        }
    }
}

#[derive(Debug, Clone)]
struct Dense {
    weights: Array2<f32>, // (in_dim, out_dim)
    bias: Array1<f32>,
    activation: Activation,
}

impl Dense {
    fn glorot(in_dim: usize, out_dim: usize, activation: Activation, rng: &mut StdRng) -> Self {
        let limit = (6.0 / (in_dim + out_dim) as f32).sqrt();
        let dist = Uniform::new_inclusive(-limit, limit);
        Self {
            weights: Array2::from_shape_fn((in_dim, out_dim), |_| rng.sample(dist)),
            bias: Array1::zeros(out_dim),
            activation,
        }
    }

    fn forward(&self, x: &ArrayView2<f32>) -> Array2<f32> {
        let z = x.dot(&self.weights) + &self.bias;
        self.activation.apply(z)
    }
}

/// First and second moment estimates for one layer.
struct Moments {
    m_weights: Array2<f32>,
    v_weights: Array2<f32>,
    m_bias: Array1<f32>,
    v_bias: Array1<f32>,
}

impl Moments {
    fn for_layer(layer: &Dense) -> Self {
        Self {
            m_weights: Array2::zeros(layer.weights.raw_dim()),
            v_weights: Array2::zeros(layer.weights.raw_dim()),
            m_bias: Array1::zeros(layer.bias.raw_dim()),
            v_bias: Array1::zeros(layer.bias.raw_dim()),
        }
    }
}

struct AdamStep {
    learning_rate: f32,
    bias_correction1: f32,
    bias_correction2: f32,
}

impl AdamStep {
    fn new(learning_rate: f32, t: i32) -> Self {
        Self {
            learning_rate,
            bias_correction1: 1.0 - ADAM_BETA1.powi(t),
            bias_correction2: 1.0 - ADAM_BETA2.powi(t),
        }
    }

    fn apply<D: Dimension>(
        &self,
        param: &mut Array<f32, D>,
        grad: &Array<f32, D>,
        m: &mut Array<f32, D>,
        v: &mut Array<f32, D>,
    ) {
        Zip::from(param)
            .and(grad)
            .and(m)
            .and(v)
            .for_each(|p, &g, m, v| {
                *m = ADAM_BETA1 * *m + (1.0 - ADAM_BETA1) * g;
                *v = ADAM_BETA2 * *v + (1.0 - ADAM_BETA2) * g * g;
                let m_hat = *m / self.bias_correction1;
                let v_hat = *v / self.bias_correction2;
                *p -= self.learning_rate * m_hat / (v_hat.sqrt() + ADAM_EPSILON);
            });
    }
}

/// Result of [`Network::fit`].
pub struct Fit {
    pub network: Network,
    /// Mean squared error of each epoch, in order.
    pub epoch_losses: Vec<f32>,
}

impl Fit {
    pub fn final_loss(&self) -> f32 {
        self.epoch_losses.last().copied().unwrap_or(f32::NAN)
    }
}

/// A fitted feed-forward network.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Dense>,
}

impl Network {
    fn initialise(rng: &mut StdRng) -> Self {
        Self {
            layers: vec![
                Dense::glorot(MAX_LEN, HIDDEN_WIDTH, Activation::Relu, rng),
                Dense::glorot(HIDDEN_WIDTH, HIDDEN_WIDTH, Activation::Relu, rng),
                Dense::glorot(HIDDEN_WIDTH, MAX_LEN, Activation::Sigmoid, rng),
            ],
        }
    }

    /// Fit a fresh network mapping each row of `inputs` to the same row of
    /// `targets`. Both are `(samples, MAX_LEN)` in unit scale.
    pub fn fit(
        inputs: &Array2<f32>,
        targets: &Array2<f32>,
        config: &TrainingConfig,
    ) -> Result<Fit, ModelError> {
        if inputs.ncols() != MAX_LEN {
            return Err(ModelError::ShapeMismatch {
                expected: MAX_LEN,
                actual: inputs.ncols(),
            });
        }
        if targets.dim() != inputs.dim() {
            return Err(ModelError::TrainingAborted(format!(
                "{} inputs but {} targets",
                inputs.nrows(),
                targets.nrows()
            )));
        }
        if inputs.nrows() == 0 {
            return Err(ModelError::TrainingAborted("empty training set".into()));
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut network = Self::initialise(&mut rng);
        let mut moments: Vec<Moments> = network.layers.iter().map(Moments::for_layer).collect();

        let samples = inputs.nrows();
        let batch_size = config.batch_size.max(1);
        let mut order: Vec<usize> = (0..samples).collect();
        let mut epoch_losses = Vec::with_capacity(config.epochs);
        let mut step = 0i32;

        for _ in 0..config.epochs {
            order.shuffle(&mut rng);
            let mut weighted_loss = 0.0f32;

            for batch in order.chunks(batch_size) {
                step += 1;
                let x = inputs.select(Axis(0), batch);
                let t = targets.select(Axis(0), batch);
                let adam = AdamStep::new(config.learning_rate, step);
                let loss = network.train_batch(&x, &t, &mut moments, &adam);
                weighted_loss += loss * batch.len() as f32;
            }

            let epoch_loss = weighted_loss / samples as f32;
            if !epoch_loss.is_finite() {
                return Err(ModelError::TrainingAborted(
                    "loss diverged to a non-finite value".into(),
                ));
            }
            epoch_losses.push(epoch_loss);
        }

        Ok(Fit {
            network,
            epoch_losses,
        })
    }

    /// Forward pass keeping every layer's output; index 0 is the input.
    fn forward_all(&self, x: &Array2<f32>) -> Vec<Array2<f32>> {
        let mut outputs = Vec::with_capacity(self.layers.len() + 1);
        outputs.push(x.clone());
        for layer in &self.layers {
            let next = layer.forward(&outputs[outputs.len() - 1].view());
            outputs.push(next);
        }
        outputs
    }

    /// One Adam step on a mini-batch; returns the batch MSE before the step.
    fn train_batch(
        &mut self,
        x: &Array2<f32>,
        t: &Array2<f32>,
        moments: &mut [Moments],
        step: &AdamStep,
    ) -> f32 {
        let outputs = self.forward_all(x);
        let prediction = &outputs[outputs.len() - 1];
        let error = prediction - t;
        let loss = error.mapv(|e| e * e).mean().unwrap_or(0.0);

        // d(mean squared error)/d(prediction)
        let mut delta = error * (2.0 / t.len() as f32);

        for (i, layer) in self.layers.iter_mut().enumerate().rev() {
            delta = delta * layer.activation.derivative(&outputs[i + 1]);
            let grad_weights = outputs[i].t().dot(&delta);
            let grad_bias = delta.sum_axis(Axis(0));
            let upstream = delta.dot(&layer.weights.t());

            let state = &mut moments[i];
            step.apply(
                &mut layer.weights,
                &grad_weights,
                &mut state.m_weights,
                &mut state.v_weights,
            );
            step.apply(&mut layer.bias, &grad_bias, &mut state.m_bias, &mut state.v_bias);

            delta = upstream;
        }

        loss
    }

    /// Network whose every weight and bias is `value`.
    #[cfg(test)]
    pub(crate) fn filled_with(value: f32) -> Self {
        let layer = |in_dim, out_dim, activation| Dense {
            weights: Array2::from_elem((in_dim, out_dim), value),
            bias: Array1::from_elem(out_dim, value),
            activation,
        };
        Self {
            layers: vec![
                layer(MAX_LEN, HIDDEN_WIDTH, Activation::Relu),
                layer(HIDDEN_WIDTH, HIDDEN_WIDTH, Activation::Relu),
                layer(HIDDEN_WIDTH, MAX_LEN, Activation::Sigmoid),
            ],
        }
    }

    /// Run a single input through the network and round back to codes.
    pub fn predict(&self, input: &EncodedVector) -> Result<EncodedVector, ModelError> {
        let row = to_unit(input).insert_axis(Axis(0));
        let output = self.predict_batch(&row.view())?;
        let values = output.row(0).to_vec();
        Ok(from_unit(&values))
    }

    /// Forward pass over unit-scale rows.
    pub fn predict_batch(&self, x: &ArrayView2<f32>) -> Result<Array2<f32>, ModelError> {
        if x.ncols() != MAX_LEN {
            return Err(ModelError::ShapeMismatch {
                expected: MAX_LEN,
                actual: x.ncols(),
            });
        }
        let mut current = x.to_owned();
        for layer in &self.layers {
            current = layer.forward(&current.view());
        }
        if current.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite);
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, encode};

    fn config(epochs: usize) -> TrainingConfig {
        TrainingConfig {
            epochs,
            batch_size: 4,
            learning_rate: 0.01,
            retrain_every: None,
            seed: Some(42),
        }
    }

    fn dataset(pairs: &[(&str, &str)]) -> (Array2<f32>, Array2<f32>) {
        let rows = pairs.len();
        let mut inputs = Array2::zeros((rows, MAX_LEN));
        let mut targets = Array2::zeros((rows, MAX_LEN));
        for (i, (input, output)) in pairs.iter().enumerate() {
            inputs.row_mut(i).assign(&to_unit(&encode(input)));
            targets.row_mut(i).assign(&to_unit(&encode(output)));
        }
        (inputs, targets)
    }

    #[test]
    fn test_unit_scaling_round_trips_ascii() {
        let vector = encode("Hello, world");
        let values = to_unit(&vector).to_vec();
        assert_eq!(decode(&from_unit(&values)), "Hello, world");
    }

    #[test]
    fn test_from_unit_clamps_into_code_range() {
        let vector = from_unit(&[-3.0, 0.0, f32::MAX]);
        assert_eq!(vector.codes()[0], 0);
        assert_eq!(vector.codes()[1], 0);
        assert_eq!(vector.codes()[2], MAX_CODE);
    }

    #[test]
    fn test_from_unit_drops_control_codes() {
        let unit = |c: char| c as u32 as f32 / CODE_SCALE;
        let values = [unit('h'), unit('\u{e}'), unit('\t'), unit('\r'), unit('\n'), unit('i')];
        let vector = from_unit(&values);
        assert_eq!(&vector.codes()[..6], &[104, 0, 9, 0, 10, 105]);
    }

    #[test]
    fn test_nan_weights_fail_prediction() {
        let network = Network::filled_with(f32::NAN);
        assert!(matches!(network.predict(&encode("hello")), Err(ModelError::NonFinite)));
    }

    #[test]
    fn test_fit_reduces_loss() {
        let (inputs, targets) =
            dataset(&[("hello", "hi"), ("how are you", "fine"), ("bye", "see you")]);
        let fit = Network::fit(&inputs, &targets, &config(60)).unwrap();
        assert_eq!(fit.epoch_losses.len(), 60);
        assert!(fit.final_loss() < fit.epoch_losses[0]);
    }

    #[test]
    fn test_fit_is_reproducible_with_seed() {
        let (inputs, targets) = dataset(&[("hello", "hi"), ("bye", "ciao")]);
        let a = Network::fit(&inputs, &targets, &config(5)).unwrap();
        let b = Network::fit(&inputs, &targets, &config(5)).unwrap();
        assert_eq!(a.epoch_losses, b.epoch_losses);
    }

    #[test]
    fn test_fit_rejects_mismatched_targets() {
        let (inputs, _) = dataset(&[("hello", "hi"), ("bye", "ciao")]);
        let (_, targets) = dataset(&[("hello", "hi")]);
        assert!(matches!(
            Network::fit(&inputs, &targets, &config(1)),
            Err(ModelError::TrainingAborted(_))
        ));
    }

    #[test]
    fn test_predict_output_stays_in_range() {
        let (inputs, targets) = dataset(&[("hello", "hi")]);
        let fit = Network::fit(&inputs, &targets, &config(3)).unwrap();
        let output = fit.network.predict(&encode("anything at all")).unwrap();
        assert!(output.codes().iter().all(|&c| c <= CODE_SCALE as u32));
    }

    #[test]
    fn test_predict_batch_rejects_wrong_width() {
        let (inputs, targets) = dataset(&[("hello", "hi")]);
        let fit = Network::fit(&inputs, &targets, &config(1)).unwrap();
        let narrow = Array2::<f32>::zeros((1, 3));
        assert!(matches!(
            fit.network.predict_batch(&narrow.view()),
            Err(ModelError::ShapeMismatch { expected: MAX_LEN, actual: 3 })
        ));
    }
}
