//! Trains the reference network on an IDX image/label pair.
//!
//! Run with:
//!   cargo run --release                 # defaults, files in the working directory
//!   cargo run --release -- run.json     # JSON overrides, see `AppConfig`
//!
//! Log verbosity follows `RUST_LOG` (default `info`; `debug` also prints
//! every evaluated sample).

use std::process::ExitCode;

use ferrite_mnist::data::NUM_CLASSES;
use ferrite_mnist::render::save_png;
use ferrite_mnist::train::Evaluation;
use ferrite_mnist::{AppConfig, ImageDataset, LabelDataset, Network, Result, TrainingOrchestrator};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => AppConfig::load_json(path)?,
        None => AppConfig::default(),
    };

    let images = ImageDataset::load(&config.train_images)?;
    let labels = LabelDataset::load(&config.train_labels)?;

    let spec = config.network.to_spec(images.record_len(), NUM_CLASSES);
    log::info!(
        "network: {} -> {:?} -> {}, lr {}, {:?}",
        spec.input_size,
        spec.hidden_layers,
        spec.output_size,
        spec.learning_rate,
        spec.activation
    );
    let network = Network::configure(&spec)?;

    let mut orchestrator = TrainingOrchestrator::new(images, labels, network, config.training.clone())?;
    let summary = orchestrator.run(config.iterations)?;
    log::info!(
        "finished {} iterations ({} reports, {} evaluations)",
        summary.iterations_run,
        summary.reports,
        summary.evaluations
    );

    let evaluation = orchestrator.test_guess(config.final_eval_count, config.final_eval_start)?;

    if let Some(dir) = &config.snapshot_dir {
        write_snapshots(orchestrator.images(), &evaluation, dir)?;
    }

    if let Some(path) = &config.model_out {
        orchestrator.classifier().save_json(path)?;
        log::info!("model saved to {}", path.display());
    }

    Ok(())
}

fn write_snapshots(images: &ImageDataset, evaluation: &Evaluation, dir: &std::path::Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|source| ferrite_mnist::Error::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    for guess in &evaluation.guesses {
        let path = dir.join(format!(
            "{:05}_label{}_guess{}.png",
            guess.index, guess.expected, guess.predicted
        ));
        save_png(images.image(guess.index)?, images.width(), images.height(), path)?;
    }
    log::info!("wrote {} snapshots to {}", evaluation.guesses.len(), dir.display());
    Ok(())
}
