use std::{
    fmt::{self, Display},
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Serialize;

use crate::{error::Result, lin_reg::LinearRegression, metrics::GoodnessOfFit};

#[derive(Debug, Clone, Serialize)]
pub struct DatasetReport {
    pub index: usize,
    pub name: String,
    pub fit: LinearRegression,
    pub goodness: GoodnessOfFit,
    pub elapsed: Duration,
    pub sample_bytes: usize,
    pub plot: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub name: String,
    pub reason: String,
}

/// Everything a run produced, including the totals over the successful datasets.
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub reports: Vec<DatasetReport>,
    pub failures: Vec<Failure>,
    pub total_elapsed: Duration,
    pub total_sample_bytes: usize,
}

impl RunSummary {
    pub fn record(&mut self, report: DatasetReport) {
        self.total_elapsed += report.elapsed;
        self.total_sample_bytes += report.sample_bytes;
        self.reports.push(report);
    }

    pub fn fail(&mut self, name: &str, reason: impl Display) {
        self.failures.push(Failure {
            name: name.to_string(),
            reason: reason.to_string(),
        });
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

fn kilobytes(bytes: usize) -> f64 {
    bytes as f64 / 1024.0
}

impl Display for DatasetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.name)?;
        writeln!(f, "  slope = {:.5}", self.fit.slope)?;
        writeln!(f, "  intercept = {:.5}", self.fit.intercept)?;
        writeln!(f, "  R-squared = {:.4}", self.goodness.r_squared)?;
        writeln!(f, "  Residual Std Error = {:.4}", self.goodness.residual_std_error)?;
        writeln!(f, "  F-statistic = {:.4}", self.goodness.f_statistic)?;
        writeln!(f, "  execution time = {:?}", self.elapsed)?;
        writeln!(
            f,
            "  sample memory = {} bytes ({:.2} KB)",
            self.sample_bytes,
            kilobytes(self.sample_bytes)
        )?;
        if let Some(plot) = self.plot.as_ref() {
            writeln!(f, "  plot = {}", plot.display())?;
        }
        Ok(())
    }
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.reports {
            writeln!(f, "{}", report)?;
        }
        for failure in &self.failures {
            writeln!(f, "{}: error: {}", failure.name, failure.reason)?;
        }
        writeln!(f, "{}", "-".repeat(50))?;
        writeln!(f, "Summary for All Sets:")?;
        writeln!(f, "  Total Execution Time = {:?}", self.total_elapsed)?;
        writeln!(
            f,
            "  Total Sample Memory = {} bytes ({:.2} KB)",
            self.total_sample_bytes,
            kilobytes(self.total_sample_bytes)
        )?;
        writeln!(f, "{}", "-".repeat(50))
    }
}
