use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "windrose-bot")]
#[command(about = "Wind-rose charts from RP5.ru CSV exports, plus a rock-paper-scissors bot")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        help = "Configuration file [default: windrose.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot that turns CSV uploads into wind roses
    WindBot,

    /// Run the Telegram rock-paper-scissors bot
    GameBot,

    /// Render a wind rose from a local CSV file
    Render {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,

        #[arg(
            short,
            long,
            help = "Output PNG file path [default: output/wind-rose-{YYMMDD}.png]"
        )]
        output: Option<PathBuf>,
    },

    /// Show how a CSV file is detected and normalized
    Inspect {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,

        #[arg(short, long, default_value = "10", help = "Number of normalized rows to show")]
        sample: usize,

        #[arg(long, help = "Print the report as JSON")]
        json: bool,
    },
}
