use nn_walkthrough::{
    ActivationFunction, ErrorMetric, Matrix, MlpRegressor, ModelConfig, Network, Regressor,
    TrainingOptions, WalkthroughError,
};

fn model(hidden_units: usize, activation: ActivationFunction, seed: u64) -> ModelConfig {
    ModelConfig { hidden_units, activation, error_metric: ErrorMetric::Sse, seed }
}

fn quick() -> TrainingOptions {
    TrainingOptions { max_epochs: 200, log_every: 0, ..Default::default() }
}

fn curve() -> (Vec<f64>, Vec<f64>) {
    let xs: Vec<f64> = (0..60).map(|i| i as f64 / 10.0 - 3.0).collect();
    let ys = xs.iter().map(|x| x.cos() + x).collect();
    (xs, ys)
}

fn sse(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

#[test]
fn fitting_beats_the_untrained_network() {
    let (xs, ys) = curve();
    let mut untrained = MlpRegressor::new(model(5, ActivationFunction::Tanh, 4), TrainingOptions {
        max_epochs: 1,
        learning_rate: 1e-9,
        ..quick()
    });
    untrained.fit(&xs, &ys).unwrap();
    let baseline = sse(&untrained.predict(&xs).unwrap(), &ys);

    let mut regressor = MlpRegressor::new(model(5, ActivationFunction::Tanh, 4), quick());
    let report = regressor.fit(&xs, &ys).unwrap();
    let fitted = sse(&regressor.predict(&xs).unwrap(), &ys);

    assert!(report.epochs >= 1 && report.epochs <= 200);
    assert!(fitted < baseline, "sse {fitted} not below untrained {baseline}");
}

#[test]
fn same_seed_gives_identical_predictions() {
    let (xs, ys) = curve();
    let mut a = MlpRegressor::new(model(3, ActivationFunction::Logistic, 9), quick());
    let mut b = MlpRegressor::new(model(3, ActivationFunction::Logistic, 9), quick());
    a.fit(&xs, &ys).unwrap();
    b.fit(&xs, &ys).unwrap();
    assert_eq!(a.predict(&xs).unwrap(), b.predict(&xs).unwrap());
}

#[test]
fn predict_before_fit_fails() {
    let regressor = MlpRegressor::new(model(3, ActivationFunction::Logistic, 1), quick());
    assert!(matches!(regressor.predict(&[0.0]), Err(WalkthroughError::NotFitted)));
}

#[test]
fn malformed_numeric_input_is_rejected() {
    let mut regressor = MlpRegressor::new(model(3, ActivationFunction::Logistic, 1), quick());
    assert!(matches!(
        regressor.fit(&[0.0, f64::NAN], &[1.0, 2.0]),
        Err(WalkthroughError::NonFiniteValue { what: "inputs", index: 1 })
    ));
    assert!(matches!(
        regressor.fit(&[0.0, 1.0], &[1.0, f64::INFINITY]),
        Err(WalkthroughError::NonFiniteValue { what: "targets", index: 1 })
    ));
    assert!(matches!(
        regressor.fit(&[0.0, 1.0], &[1.0]),
        Err(WalkthroughError::LengthMismatch { expected: 2, actual: 1 })
    ));
    assert!(matches!(regressor.fit(&[], &[]), Err(WalkthroughError::EmptyInput(_))));

    regressor.fit(&[0.0, 1.0], &[1.0, 2.0]).unwrap();
    assert!(regressor.predict(&[f64::NEG_INFINITY]).is_err());
}

#[test]
fn cross_entropy_needs_unit_interval_targets() {
    let mut config = model(3, ActivationFunction::Logistic, 1);
    config.error_metric = ErrorMetric::Ce;
    let mut regressor = MlpRegressor::new(config, quick());
    assert!(matches!(regressor.fit(&[0.0, 1.0], &[0.5, 2.0]), Err(WalkthroughError::InvalidConfig(_))));

    regressor.fit(&[-1.0, 0.0, 1.0], &[0.0, 0.5, 1.0]).unwrap();
    let out = regressor.predict(&[0.3]).unwrap();
    assert!(out[0] > 0.0 && out[0] < 1.0);
}

#[test]
fn saved_network_predicts_the_same() {
    let (xs, ys) = curve();
    let config = model(7, ActivationFunction::Tanh, 3);
    let mut regressor = MlpRegressor::new(config.clone(), quick());
    regressor.fit(&xs, &ys).unwrap();

    let path = std::env::temp_dir().join(format!("nn_walkthrough_model_{}.json", std::process::id()));
    regressor.network().unwrap().save_json(&path).unwrap();
    let restored = MlpRegressor::from_network(config, quick(), Network::load_json(&path).unwrap()).unwrap();
    std::fs::remove_file(&path).ok();

    let before = regressor.predict(&xs).unwrap();
    let after = restored.predict(&xs).unwrap();
    for (a, b) in before.iter().zip(&after) {
        assert!((a - b).abs() < 1e-9, "{a} vs {b}");
    }
}

#[test]
fn saved_network_with_broken_shapes_is_rejected() {
    let (xs, ys) = curve();
    let mut regressor = MlpRegressor::new(model(4, ActivationFunction::Tanh, 2), quick());
    regressor.fit(&xs, &ys).unwrap();

    let mut broken = regressor.network().unwrap().clone();
    broken.layers[1].weights = Matrix::zeros(3, 1);
    let path = std::env::temp_dir().join(format!("nn_walkthrough_broken_{}.json", std::process::id()));
    broken.save_json(&path).unwrap();
    let loaded = Network::load_json(&path);
    std::fs::remove_file(&path).ok();

    assert!(matches!(loaded, Err(WalkthroughError::InvalidNetwork(_))));
}

#[test]
fn wrapping_a_network_checks_its_shape() {
    let (xs, ys) = curve();
    let config = model(4, ActivationFunction::Tanh, 2);
    let mut regressor = MlpRegressor::new(config.clone(), quick());
    regressor.fit(&xs, &ys).unwrap();

    let mut two_inputs = regressor.network().unwrap().clone();
    two_inputs.layers[0].weights = Matrix::zeros(2, 4);
    assert!(matches!(
        MlpRegressor::from_network(config.clone(), quick(), two_inputs),
        Err(WalkthroughError::InvalidNetwork(_))
    ));

    let mut unchained = regressor.network().unwrap().clone();
    unchained.layers[1].weights = Matrix::zeros(5, 1);
    assert!(MlpRegressor::from_network(config, quick(), unchained).is_err());
}

#[test]
fn runaway_step_size_fails_instead_of_returning_nan() {
    let (xs, ys) = curve();
    let options = TrainingOptions { learning_rate: 50.0, max_epochs: 200, ..quick() };
    let mut regressor = MlpRegressor::new(model(5, ActivationFunction::Tanh, 1), options);
    assert!(matches!(regressor.fit(&xs, &ys), Err(WalkthroughError::Diverged { .. })));
    assert!(matches!(regressor.predict(&xs), Err(WalkthroughError::NotFitted)));
}

#[test]
fn default_options_converge_on_a_line() {
    let xs: Vec<f64> = (0..20).map(|i| i as f64 / 10.0 - 1.0).collect();
    let ys: Vec<f64> = xs.iter().map(|x| 0.5 * x + 0.2).collect();
    let options = TrainingOptions { log_every: 0, ..Default::default() };

    for (hidden_units, activation) in [(3, ActivationFunction::Tanh), (5, ActivationFunction::Logistic)] {
        let mut regressor = MlpRegressor::new(model(hidden_units, activation, 1), options);
        let report = regressor.fit(&xs, &ys).unwrap();
        assert!(report.converged, "{hidden_units} units ran {} epochs", report.epochs);
        assert!(report.epochs < options.max_epochs);
    }
}
