pub mod analysis;
pub mod config;
pub mod error;
pub mod lin_reg;
pub mod logging;
pub mod metrics;
pub mod plot;
pub mod quartet;
pub mod report;

pub use error::{Error, RegressionError, Result};
pub use lin_reg::{lin_reg, LinearRegression};
pub use metrics::{goodness_of_fit, GoodnessOfFit};
