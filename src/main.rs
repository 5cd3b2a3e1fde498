use std::process::ExitCode;

use anscombe::{
    analysis::run,
    config::{Opt, RunConfig},
    logging::init_log,
    quartet::{load_datasets, QUARTET},
};
use clap::Parser;
use log::{error, info};

fn main() -> ExitCode {
    let opt = Opt::parse();
    init_log(opt.log_level, opt.log_dir.as_deref());

    let datasets = match opt.input.as_ref() {
        Some(path) => match load_datasets(path) {
            Ok(datasets) => datasets,
            Err(err) => {
                error!("could not load datasets from {:?}, Error: {}", path, err);
                return ExitCode::FAILURE;
            }
        },
        None => QUARTET.clone(),
    };
    info!("analysing {} datasets", datasets.len());

    let summary = run(&datasets, &RunConfig::from(&opt));
    print!("{}", summary);

    if let Some(path) = opt.json.as_ref() {
        match summary.write_json(path) {
            Ok(_) => info!("saved summary to {:?}", path),
            Err(err) => {
                error!("failed to save summary Error: {}", err);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
