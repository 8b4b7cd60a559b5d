use clap::Parser;
use ftv::ShapeLimits;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Command-line and environment configuration for the series server.
#[derive(Debug, Clone, Parser)]
#[command(name = "series-server", about = "Serves synthetic timeseries in FTV format")]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "FTV_BIND", default_value = "0.0.0.0:10000")]
    pub bind: SocketAddr,

    /// Directory holding `examples/remote_graphs.html` and `src/*.js`.
    #[arg(long, env = "FTV_ASSET_ROOT", default_value = ".")]
    pub asset_root: PathBuf,

    /// `num_series` when the request omits it.
    #[arg(long, env = "FTV_DEFAULT_NUM_SERIES", default_value_t = 1)]
    pub default_num_series: u32,

    /// `num_points` when the request omits it.
    #[arg(long, env = "FTV_DEFAULT_NUM_POINTS", default_value_t = 500)]
    pub default_num_points: u32,

    /// `percent_missing` when the request omits it.
    #[arg(long, env = "FTV_DEFAULT_PERCENT_MISSING", default_value_t = 20.0)]
    pub default_percent_missing: f64,

    /// Largest `num_series × num_points` a single request may ask for.
    #[arg(long, env = "FTV_MAX_SAMPLES", default_value_t = 1_000_000)]
    pub max_samples: u64,

    /// Seed for gap placement; entropy-seeded when absent.
    #[arg(long, env = "FTV_SEED")]
    pub seed: Option<u64>,
}

/// Parameter values applied to a request that leaves them out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestDefaults {
    pub num_series: u32,
    pub num_points: u32,
    pub percent_missing: f64,
}

impl Config {
    pub fn request_defaults(&self) -> RequestDefaults {
        RequestDefaults {
            num_series: self.default_num_series,
            num_points: self.default_num_points,
            percent_missing: self.default_percent_missing,
        }
    }

    pub fn shape_limits(&self) -> ShapeLimits {
        ShapeLimits {
            max_samples: self.max_samples,
        }
    }
}
