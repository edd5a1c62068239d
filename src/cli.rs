use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "reelgen")]
#[command(about = "Send a dialogue script to the video generator and save the result", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a script and download the generated video
    Generate(GenerateArgs),
    /// Print the effective configuration as TOML
    Config,
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Script text; read from stdin when neither this nor --file is given
    #[arg(long, conflicts_with = "file")]
    pub script: Option<String>,

    /// Read the script from a file
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Server base URL (overrides client.base_url)
    #[arg(long)]
    pub server: Option<String>,

    /// Directory to save the video into (overrides download.output_dir)
    #[arg(long, short)]
    pub output_dir: Option<PathBuf>,
}
