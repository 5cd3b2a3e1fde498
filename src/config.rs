use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

use crate::plot::{PlotStyle, DEFAULT_SIZE};

/// Least squares fits and plots of the Anscombe quartet
#[derive(Debug, Parser)]
#[command(name = "anscombe", version)]
pub struct Opt {
    /// Directory the plots are written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// File name prefix of the plots, the dataset number is appended
    #[arg(short, long, default_value = "anscombe_set")]
    pub prefix: String,

    /// Edge length of the square plots in pixels
    #[arg(short, long, default_value_t = DEFAULT_SIZE, value_parser = clap::value_parser!(u32).range(64..))]
    pub size: u32,

    /// Skip rendering the plots
    #[arg(long)]
    pub no_plot: bool,

    /// JSON file with datasets to use instead of the quartet
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Also write the summary as JSON
    #[arg(short, long)]
    pub json: Option<PathBuf>,

    #[arg(short, long, default_value = "warn")]
    pub log_level: LevelFilter,

    /// Directory for an additional log file
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub output_dir: PathBuf,
    pub prefix: String,
    pub style: PlotStyle,
    pub plot: bool,
}

impl RunConfig {
    pub fn plot_path(&self, index: usize) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.png", self.prefix, index + 1))
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            prefix: "anscombe_set".to_string(),
            style: PlotStyle::default(),
            plot: true,
        }
    }
}

impl From<&Opt> for RunConfig {
    fn from(opt: &Opt) -> Self {
        Self {
            output_dir: opt.output_dir.clone(),
            prefix: opt.prefix.clone(),
            style: PlotStyle::square(opt.size),
            plot: !opt.no_plot,
        }
    }
}
