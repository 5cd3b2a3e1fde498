use std::time::{Duration, Instant};

use log::{debug, error, info};

use crate::{
    config::RunConfig,
    error::{RegressionError, Result},
    lin_reg::{lin_reg, LinearRegression},
    metrics::{goodness_of_fit, GoodnessOfFit},
    plot::ScatterPlot,
    quartet::Dataset,
    report::{DatasetReport, RunSummary},
};

#[derive(Debug, Clone, Copy)]
pub struct Analysis {
    pub fit: LinearRegression,
    pub goodness: GoodnessOfFit,
    pub elapsed: Duration,
}

/// Fits the dataset and measures how long fit and metrics took together.
pub fn analyse(dataset: &Dataset) -> std::result::Result<Analysis, RegressionError> {
    let start = Instant::now();
    let fit = lin_reg(&dataset.xs, &dataset.ys)?;
    let goodness = goodness_of_fit(&dataset.xs, &dataset.ys, &fit)?;
    Ok(Analysis {
        fit,
        goodness,
        elapsed: start.elapsed(),
    })
}

/// Processes every dataset. A failing dataset is recorded and skipped.
pub fn run(datasets: &[Dataset], config: &RunConfig) -> RunSummary {
    let mut summary = RunSummary::default();
    for (index, dataset) in datasets.iter().enumerate() {
        match process(index, dataset, config) {
            Ok(report) => {
                info!("{}: finished in {:?}", dataset.name, report.elapsed);
                summary.record(report);
            }
            Err(err) => {
                error!("{}: {}", dataset.name, err);
                summary.fail(&dataset.name, err);
            }
        }
    }
    summary
}

fn process(index: usize, dataset: &Dataset, config: &RunConfig) -> Result<DatasetReport> {
    let Analysis {
        fit,
        goodness,
        elapsed,
    } = analyse(dataset)?;
    debug!("{}: {:?} {:?}", dataset.name, fit, goodness);

    let plot = if config.plot {
        std::fs::create_dir_all(&config.output_dir)?;
        let path = config.plot_path(index);
        ScatterPlot::new(&dataset.xs, &dataset.ys, config.style)
            .with_title(&dataset.name)
            .with_fit(&fit)
            .save(&path)?;
        info!("saved plot to {:?}", path);
        Some(path)
    } else {
        None
    };

    Ok(DatasetReport {
        index,
        name: dataset.name.clone(),
        fit,
        goodness,
        elapsed,
        sample_bytes: dataset.sample_bytes(),
        plot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quartet::QUARTET;

    fn no_plots() -> RunConfig {
        RunConfig {
            plot: false,
            ..Default::default()
        }
    }

    #[test]
    fn analyses_quartet() {
        for set in QUARTET.iter() {
            let analysis = analyse(set).unwrap();
            assert!((analysis.fit.slope - 0.5).abs() < 1e-3, "{}", set.name);
            assert!((analysis.fit.intercept - 3.0).abs() < 5e-3, "{}", set.name);
            assert!((analysis.goodness.r_squared - 0.666).abs() < 1e-2, "{}", set.name);
        }
    }

    #[test]
    fn failures_do_not_stop_the_run() {
        let datasets = vec![
            Dataset::new("short", &[1.0, 2.0, 3.0], &[1.0, 2.0]),
            QUARTET[0].clone(),
            Dataset::new("flat", &[4.0, 4.0, 4.0], &[1.0, 2.0, 3.0]),
            QUARTET[3].clone(),
        ];
        let summary = run(&datasets, &no_plots());
        assert_eq!(summary.reports.len(), 2);
        assert_eq!(summary.reports[0].name, "Set I");
        assert_eq!(summary.reports[1].index, 3);
        assert_eq!(
            summary.failures.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            ["short", "flat"]
        );
        assert!(summary.failures[0].reason.contains("same length"));
        assert_eq!(summary.total_sample_bytes, 2 * 22 * 8);
        assert_eq!(
            summary.total_elapsed,
            summary.reports[0].elapsed + summary.reports[1].elapsed
        );
    }

    #[test]
    fn large_offset_x_is_fitted_not_skipped() {
        let datasets = vec![
            Dataset::new(
                "offset",
                &[1e8, 1e8 + 1.0, 1e8 + 2.0, 1e8 + 3.0],
                &[1.0, 2.0, 3.0, 4.5],
            ),
            Dataset::new("huge", &[1e200, 2e200, 3e200], &[1.0, 2.0, 3.0]),
        ];
        let summary = run(&datasets, &no_plots());
        assert_eq!(summary.reports.len(), 1);
        assert!((summary.reports[0].fit.slope - 1.15).abs() < 1e-9);
        assert!(summary.reports[0].goodness.r_squared.is_finite());
        assert_eq!(summary.failures[0].name, "huge");
        assert!(summary.failures[0].reason.contains("degenerate input"));
    }

    #[test]
    fn skips_plots_when_disabled() {
        let summary = run(&QUARTET[..1], &no_plots());
        assert!(summary.reports[0].plot.is_none());
    }
}
