use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use log::info;
use rand::{rngs::StdRng, SeedableRng};

use crate::config::WalkthroughConfig;
use crate::data::{cosine_plus_identity, pearson, Dataset, ResponseGenerator, Sampler, Split, Summary};
use crate::error::Result;
use crate::eval::{compare, ErrorSummary, PredictionTable};
use crate::harness::{MlpRegressor, Regressor};
use crate::network::ModelConfig;
use crate::train::FitReport;

/// Descriptive statistics of the generated data.
#[derive(Debug, Clone, PartialEq)]
pub struct Exploration {
    pub x: Summary,
    pub y: Summary,
    pub correlation: f64,
}

/// Outcome of one model fit and its evaluation.
#[derive(Debug, Clone)]
pub struct ModelRun {
    pub model: ModelConfig,
    pub fit: FitReport,
    pub predictions: PredictionTable,
    pub summary: ErrorSummary,
}

#[derive(Debug, Clone)]
pub struct WalkthroughReport {
    pub dataset: Dataset,
    pub exploration: Exploration,
    pub split: Split,
    pub runs: Vec<ModelRun>,
}

/// Samples x, then y around `cos(x) + x`, from one rng seeded with
/// `config.data_seed`.
pub fn generate_dataset(config: &WalkthroughConfig) -> Result<Dataset> {
    let mut rng = StdRng::seed_from_u64(config.data_seed);
    let sampler = Sampler::new(config.mean, config.spread)?;
    let inputs = sampler.sample(config.sample_count, &mut rng);
    let response = ResponseGenerator::new(cosine_plus_identity, config.noise)?;
    response.build_dataset(&inputs, &mut rng)
}

pub fn explore(dataset: &Dataset) -> Result<Exploration> {
    let xs = dataset.inputs();
    let ys = dataset.targets();
    Ok(Exploration {
        x: Summary::of(&xs)?,
        y: Summary::of(&ys)?,
        correlation: pearson(&xs, &ys)?,
    })
}

/// Fits `regressor` on `split.training` and tabulates its predictions on
/// `split.evaluation`.
pub fn fit_and_evaluate<R: Regressor>(regressor: &mut R, split: &Split) -> Result<(FitReport, PredictionTable)> {
    let fit = regressor.fit(&split.training.inputs(), &split.training.targets())?;
    let eval_inputs = split.evaluation.inputs();
    let predicted = regressor.predict(&eval_inputs)?;
    let table = compare(&eval_inputs, &split.evaluation.targets(), &predicted)?;
    Ok((fit, table))
}

/// Runs every stage once, in order. Any failure aborts the run.
pub fn run(config: &WalkthroughConfig) -> Result<WalkthroughReport> {
    config.validate()?;

    let dataset = generate_dataset(config)?;
    info!("generated {} samples (seed {})", dataset.len(), config.data_seed);

    let exploration = explore(&dataset)?;
    info!("x: {}", exploration.x);
    info!("y: {}", exploration.y);
    info!("corr(x, y) = {:.4}", exploration.correlation);

    let split = dataset.split(config.split_fraction)?;
    info!(
        "split {}: {} training / {} evaluation",
        config.split_fraction,
        split.training.len(),
        split.evaluation.len()
    );

    if let Some(dir) = &config.output_dir {
        std::fs::create_dir_all(dir)?;
        dataset.write_csv(BufWriter::new(File::create(dir.join("dataset.csv"))?))?;
    }

    let mut runs = Vec::with_capacity(config.models.len());
    for (index, model) in config.models.iter().enumerate() {
        let mut regressor = MlpRegressor::new(model.clone(), config.training);
        let (fit, predictions) = fit_and_evaluate(&mut regressor, &split)?;
        let summary = predictions.summary();
        info!("{}: {}", regressor.describe(), summary);

        if let Some(dir) = &config.output_dir {
            write_run_artifacts(dir, index + 1, &regressor, &predictions)?;
        }

        runs.push(ModelRun { model: model.clone(), fit, predictions, summary });
    }

    Ok(WalkthroughReport { dataset, exploration, split, runs })
}

/// File stem shared by one run's artifacts. The 1-based run index keeps runs
/// with identical settings apart.
pub fn artifact_stem(index: usize, model: &ModelConfig) -> String {
    format!("{index}_{}_seed{}", model.label(), model.seed)
}

fn write_run_artifacts(dir: &Path, index: usize, regressor: &MlpRegressor, predictions: &PredictionTable) -> Result<()> {
    let stem = artifact_stem(index, regressor.model());
    predictions.write_csv(BufWriter::new(File::create(dir.join(format!("predictions_{stem}.csv")))?))?;
    if let Some(network) = regressor.network() {
        network.save_json(dir.join(format!("model_{stem}.json")))?;
    }
    Ok(())
}
