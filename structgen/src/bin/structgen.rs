//! structgen - generate a structural model from a job file

use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use structgen::apply::FrameResult;
use structgen::prelude::*;

/// Model and results printed together when no model file is given
#[derive(Serialize)]
struct Report<'a> {
    model: &'a StructuralModel,
    results: &'a [FrameResult],
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let job_path = JobConfig::resolve_path(args.get(1).map(|s| s.as_str()));
    let job = JobConfig::load(&job_path)
        .with_context(|| format!("Failed to load job {}", job_path.display()))?;

    let (model, _layout) = job
        .structure
        .generate()
        .context("Failed to generate structure")?;
    model.validate().context("Generated model is invalid")?;
    info!("Generated {:?}", model.summary());

    if let Some(path) = &job.script_output {
        let file = File::create(path)
            .with_context(|| format!("Failed to create script {}", path.display()))?;
        let mut writer = ScriptWriter::new(BufWriter::new(file));
        apply_model(&model, &mut writer).context("Failed to write call script")?;
        if job.analyze {
            run_analysis(&mut writer)?;
        }
        info!("{} calls written to {}", writer.written(), path.display());
        writer.into_inner()?;
    }

    let mut results = None;
    if job.analyze {
        let mut host = RecordingApi::new();
        let applied = apply_model(&model, &mut host).context("Dry run rejected by host")?;
        run_analysis(&mut host)?;
        info!("Dry run accepted {} calls", host.calls().len());

        if let Some(request) = &job.results {
            let mut request = request.clone();
            if request.combo.is_empty() {
                request.combo = job.structure.default_combo().to_string();
            }
            results = Some(fetch_frame_forces(&mut host, &applied, &request)?);
        }
    }

    // stdout carries a single JSON document
    match &job.model_output {
        Some(path) => {
            std::fs::write(path, model.to_json()?)
                .with_context(|| format!("Failed to write model to {}", path.display()))?;
            info!("Model written to {}", path.display());
            if let Some(results) = &results {
                println!("{}", serde_json::to_string_pretty(results)?);
            }
        }
        None => match &results {
            Some(results) => println!(
                "{}",
                serde_json::to_string_pretty(&Report {
                    model: &model,
                    results,
                })?
            ),
            None => println!("{}", model.to_json()?),
        },
    }

    Ok(())
}
