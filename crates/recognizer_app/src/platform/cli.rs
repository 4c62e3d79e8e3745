use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use recognizer_client::Deployment;

use super::logging::LogDestination;

/// Terminal client for the video action-recognition service.
#[derive(Debug, Default, Parser)]
#[command(name = "action-recognizer", version)]
pub struct Cli {
    /// Configuration file (RON). Defaults to the per-user config directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Which recognizer host to talk to.
    #[arg(long, value_enum)]
    pub deployment: Option<DeploymentArg>,

    /// Explicit service base URL; wins over --deployment.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Open previews in the system video player.
    #[arg(long)]
    pub launch_player: bool,

    /// Where log output goes.
    #[arg(long, value_enum)]
    pub log: Option<LogArg>,

    /// Log level: off, error, warn, info, debug or trace.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Video files to pick at startup.
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DeploymentArg {
    Local,
    Service,
}

impl From<DeploymentArg> for Deployment {
    fn from(arg: DeploymentArg) -> Self {
        match arg {
            DeploymentArg::Local => Deployment::Local,
            DeploymentArg::Service => Deployment::Service,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogArg {
    File,
    Terminal,
    Both,
}

impl From<LogArg> for LogDestination {
    fn from(arg: LogArg) -> Self {
        match arg {
            LogArg::File => LogDestination::File,
            LogArg::Terminal => LogDestination::Terminal,
            LogArg::Both => LogDestination::Both,
        }
    }
}
