use std::time::Instant;

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{ensure_same_len, Result, WalkthroughError};
use crate::loss::error_metric::ErrorMetric;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::{EpochStats, FitReport};
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` until the gradient threshold is met or `config.max_epochs`
/// is reached.
///
/// # Arguments
/// - `network`      — mutable reference to the network; modified in place
/// - `inputs`       — training samples, each a `Vec<f64>` of length `input_size`
/// - `targets`      — corresponding targets, same length as `inputs`
/// - `optimizer`    — gradient-descent optimizer (carries learning rate)
/// - `config`       — stopping rule, batch size, error metric, progress channel
/// - `rng`          — drives the per-epoch shuffle of sample order
///
/// # Stopping
/// After every epoch the gradient of the mean error over the *whole* training
/// set is evaluated; training stops once its largest component is below
/// `config.threshold`, or at `config.max_epochs`.
///
/// # Errors
/// `EmptyInput` when there are no samples, `LengthMismatch` when inputs and
/// targets differ in length, `InvalidConfig` for a zero batch size, and
/// `Diverged` as soon as the error, a gradient or a weight stops being finite.
pub fn train_loop<R: Rng + ?Sized>(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    optimizer: &Sgd,
    config: &TrainConfig,
    rng: &mut R,
) -> Result<FitReport> {
    if inputs.is_empty() {
        return Err(WalkthroughError::EmptyInput("training inputs"));
    }
    ensure_same_len(inputs.len(), targets.len())?;
    let batch_size = config.batch_size.unwrap_or(inputs.len());
    if batch_size == 0 {
        return Err(WalkthroughError::InvalidConfig("batch_size must be at least 1".into()));
    }

    let all_indices: Vec<usize> = (0..inputs.len()).collect();
    let mut report = FitReport { epochs: 0, final_loss: f64::INFINITY, converged: false };

    for epoch in 1..=config.max_epochs {
        let t_start = Instant::now();

        run_one_epoch(network, inputs, targets, optimizer, batch_size, config.error_metric, rng);

        let (train_loss, full_grads) =
            accumulate_gradients(network, inputs, targets, &all_indices, config.error_metric);
        let max_gradient = largest_component(&full_grads);

        if !train_loss.is_finite() || !max_gradient.is_finite() || !network.is_finite() {
            return Err(WalkthroughError::Diverged { epoch });
        }

        report.epochs = epoch;
        report.final_loss = train_loss;

        if config.log_every > 0 && epoch % config.log_every == 0 {
            debug!("epoch {epoch}: error = {train_loss:.6}, max |gradient| = {max_gradient:.6}");
        }

        if let Some(ref tx) = config.progress_tx {
            // A dropped receiver only means nobody is listening any more.
            let _ = tx.send(EpochStats {
                epoch,
                max_epochs: config.max_epochs,
                train_loss,
                max_gradient,
                elapsed_ms: t_start.elapsed().as_millis() as u64,
            });
        }

        if max_gradient < config.threshold {
            report.converged = true;
            break;
        }
    }

    if !report.converged {
        warn!(
            "stopped at epoch cap {} before reaching gradient threshold {}",
            config.max_epochs, config.threshold
        );
    }

    Ok(report)
}

/// Error metric summed over a dataset, without touching any cache (eval mode).
pub fn total_error(
    network: &Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    error_metric: ErrorMetric,
) -> f64 {
    inputs.iter().zip(targets.iter())
        .map(|(input, target)| {
            let output = network.predict(input.clone());
            error_metric.loss(&output, target)
        })
        .sum()
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// One shuffled pass of mini-batch gradient descent over the training data.
fn run_one_epoch<R: Rng + ?Sized>(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    optimizer: &Sgd,
    batch_size: usize,
    error_metric: ErrorMetric,
    rng: &mut R,
) {
    let mut indices: Vec<usize> = (0..inputs.len()).collect();
    indices.shuffle(rng);

    for batch in indices.chunks(batch_size) {
        let (_, grads) = accumulate_gradients(network, inputs, targets, batch, error_metric);
        for (layer, (w_avg, b_avg)) in network.layers.iter_mut().zip(grads) {
            optimizer.step(layer, &w_avg, &b_avg);
        }
    }
}

/// Backpropagates every sample in `indices` and returns the summed error
/// together with per-layer (weights, biases) gradients averaged over them.
fn accumulate_gradients(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    indices: &[usize],
    error_metric: ErrorMetric,
) -> (f64, Vec<(Matrix, Matrix)>) {
    let mut total_loss = 0.0;
    let mut acc_grads: Vec<(Matrix, Matrix)> = network.layers.iter()
        .map(|layer| (
            Matrix::zeros(layer.weights.rows, layer.weights.cols),
            Matrix::zeros(layer.biases.rows, layer.biases.cols),
        ))
        .collect();

    for &idx in indices {
        let input  = &inputs[idx];
        let target = &targets[idx];

        let output = network.forward(input.clone());
        total_loss += error_metric.loss(&output, target);

        let mut delta = Matrix::row_vector(error_metric.derivative(&output, target));

        // Backward pass.
        for i in (0..network.layers.len()).rev() {
            let input_for_layer = if i == 0 {
                Matrix::row_vector(input.clone())
            } else {
                network.layers[i - 1].neurons.clone()
            };

            let (w_grad, b_grad) = network.layers[i].compute_gradients(&delta, &input_for_layer);

            if i > 0 {
                // Propagate δ_i through weights to get ∂L/∂a_{i-1}
                delta = &b_grad * &network.layers[i].weights.transpose();
            }

            let (w_acc, b_acc) = std::mem::take(&mut acc_grads[i]);
            acc_grads[i] = (w_acc + w_grad, b_acc + b_grad);
        }
    }

    let inv = 1.0 / indices.len().max(1) as f64;
    let averaged = acc_grads.into_iter()
        .map(|(w, b)| (w.map(|x| x * inv), b.map(|x| x * inv)))
        .collect();
    (total_loss, averaged)
}

/// Largest absolute gradient component; NaN if any component is NaN.
fn largest_component(grads: &[(Matrix, Matrix)]) -> f64 {
    grads.iter()
        .flat_map(|(w, b)| [w.max_abs(), b.max_abs()])
        .fold(0.0_f64, |acc, x| if acc.is_nan() || x.is_nan() { f64::NAN } else { acc.max(x) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use crate::network::spec::NetworkSpec;
    use rand::{rngs::StdRng, SeedableRng};
    use std::sync::mpsc;

    fn line_data() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        let xs: Vec<f64> = (0..20).map(|i| i as f64 / 10.0 - 1.0).collect();
        let inputs = xs.iter().map(|&x| vec![x]).collect();
        let targets = xs.iter().map(|&x| vec![0.5 * x + 0.2]).collect();
        (inputs, targets)
    }

    #[test]
    fn training_reduces_error() {
        let mut rng = StdRng::seed_from_u64(11);
        let spec = NetworkSpec::single_hidden("t", 3, ActivationFunction::Tanh, ErrorMetric::Sse);
        let mut network = Network::new(&spec, &mut rng);
        let (inputs, targets) = line_data();

        let before = total_error(&network, &inputs, &targets, ErrorMetric::Sse);
        let config = TrainConfig::new(300, 1e-9, ErrorMetric::Sse).with_batch_size(5);
        let report = train_loop(&mut network, &inputs, &targets, &Sgd::new(0.05), &config, &mut rng).unwrap();
        let after = total_error(&network, &inputs, &targets, ErrorMetric::Sse);

        assert_eq!(report.epochs, 300);
        assert!(!report.converged);
        assert!(after < before, "error went from {before} to {after}");
    }

    #[test]
    fn loose_threshold_stops_after_first_epoch() {
        let mut rng = StdRng::seed_from_u64(2);
        let spec = NetworkSpec::single_hidden("t", 2, ActivationFunction::Logistic, ErrorMetric::Sse);
        let mut network = Network::new(&spec, &mut rng);
        let (inputs, targets) = line_data();

        let config = TrainConfig::new(100, f64::INFINITY, ErrorMetric::Sse);
        let report = train_loop(&mut network, &inputs, &targets, &Sgd::new(0.01), &config, &mut rng).unwrap();
        assert_eq!(report.epochs, 1);
        assert!(report.converged);
    }

    #[test]
    fn emits_one_stats_per_epoch() {
        let mut rng = StdRng::seed_from_u64(5);
        let spec = NetworkSpec::single_hidden("t", 2, ActivationFunction::Tanh, ErrorMetric::Sse);
        let mut network = Network::new(&spec, &mut rng);
        let (inputs, targets) = line_data();
        let (tx, rx) = mpsc::channel();

        let config = TrainConfig::new(4, 0.0, ErrorMetric::Sse).with_progress(tx);
        train_loop(&mut network, &inputs, &targets, &Sgd::new(0.01), &config, &mut rng).unwrap();
        drop(config);

        let stats: Vec<EpochStats> = rx.iter().collect();
        assert_eq!(stats.len(), 4);
        assert_eq!(stats.last().map(|s| s.epoch), Some(4));
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let mut rng = StdRng::seed_from_u64(5);
        let spec = NetworkSpec::single_hidden("t", 2, ActivationFunction::Tanh, ErrorMetric::Sse);
        let mut network = Network::new(&spec, &mut rng);
        let config = TrainConfig::new(1, 0.0, ErrorMetric::Sse);
        let err = train_loop(&mut network, &[vec![1.0]], &[], &Sgd::new(0.01), &config, &mut rng);
        assert!(matches!(err, Err(WalkthroughError::LengthMismatch { expected: 1, actual: 0 })));
    }

    #[test]
    fn divergence_is_reported_as_error() {
        let mut rng = StdRng::seed_from_u64(8);
        let spec = NetworkSpec::single_hidden("t", 3, ActivationFunction::Linear, ErrorMetric::Sse);
        let mut network = Network::new(&spec, &mut rng);
        let (inputs, targets) = line_data();

        let config = TrainConfig::new(500, 1e-12, ErrorMetric::Sse);
        let result = train_loop(&mut network, &inputs, &targets, &Sgd::new(100.0), &config, &mut rng);
        assert!(matches!(result, Err(WalkthroughError::Diverged { .. })), "{result:?}");
    }

    #[test]
    fn default_step_size_converges_on_a_line() {
        for seed in 0..3 {
            let mut rng = StdRng::seed_from_u64(seed);
            let spec = NetworkSpec::single_hidden("t", 3, ActivationFunction::Tanh, ErrorMetric::Sse);
            let mut network = Network::new(&spec, &mut rng);
            let (inputs, targets) = line_data();

            let config = TrainConfig::new(2_000, 0.01, ErrorMetric::Sse).with_batch_size(10);
            let report = train_loop(&mut network, &inputs, &targets, &Sgd::new(0.05), &config, &mut rng).unwrap();
            assert!(report.converged, "seed {seed} ran {} epochs", report.epochs);
        }
    }
}
