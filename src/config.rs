use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_INPUT_PATH: &str = "My Clippings.txt";
const DEFAULT_OUTPUT_DIR: &str = "Kindle_Markdown_Notes";

#[derive(Parser, Debug)]
#[command(name = "kindle-clippings")]
#[command(about = "Convert a Kindle 'My Clippings.txt' export to one Markdown file per book")]
pub struct CliArgs {
    /// Path to the clippings export [default: My Clippings.txt]
    pub input: Option<PathBuf>,

    /// Directory for the generated Markdown files [default: Kindle_Markdown_Notes]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Leave bookmarks out of the generated notes
    #[arg(long)]
    pub skip_bookmarks: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub include_bookmarks: bool,
}

#[derive(Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("The {0} path is empty")]
    EmptyPath(&'static str),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            include_bookmarks: true,
        }
    }
}

impl Config {
    /// Reads the command line, then `CLIPPINGS_PATH` / `OUTPUT_DIR` from the
    /// environment (or a `.env` file), then falls back to the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        let cli = CliArgs::parse();
        Self::from_args(cli, |key| std::env::var(key).ok())
    }

    fn from_args(cli: CliArgs, env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let input_path = cli
            .input
            .or_else(|| env("CLIPPINGS_PATH").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_PATH));

        let output_dir = cli
            .output_dir
            .or_else(|| env("OUTPUT_DIR").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        if input_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath("input"));
        }
        if output_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath("output directory"));
        }

        Ok(Config {
            input_path,
            output_dir,
            include_bookmarks: !cli.skip_bookmarks,
        })
    }
}
