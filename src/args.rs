use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use topic_cloud::{Source, Target};

#[derive(Parser, Debug)]
#[command(name = "topic-cloud")]
#[command(about = "Word cloud of the nouns in the site's articles or a CSV column")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Japanese-capable TrueType/OpenType font used for drawing
    #[arg(short, long, global = true)]
    pub font: Option<PathBuf>,

    /// Where to write the rendered PNG
    #[arg(short, long, global = true, default_value = "wordcloud.png")]
    pub output: PathBuf,

    /// Override the canvas width in pixels
    #[arg(long, global = true)]
    pub width: Option<u32>,

    /// Override the canvas height in pixels
    #[arg(long, global = true)]
    pub height: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scrape a section of the site
    Scrape {
        /// Section to analyse
        #[arg(short, long, value_enum, default_value_t = TargetArg::Blog)]
        target: TargetArg,

        /// Seconds to wait between article fetches
        #[arg(long)]
        delay: Option<u64>,
    },
    /// Read one column of a header-less CSV file
    Csv {
        /// CSV file to read
        file: PathBuf,

        /// Zero-based index of the text column
        #[arg(short, long, default_value_t = 0)]
        column: usize,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum TargetArg {
    Blog,
    Voice,
}

/// Convert from the CLI command to the text source
pub fn convert_source(command: &Command) -> Source {
    match command {
        Command::Scrape { target, .. } => Source::Scrape(match target {
            TargetArg::Blog => Target::Blog,
            TargetArg::Voice => Target::Voice,
        }),
        Command::Csv { file, column } => Source::Spreadsheet {
            path: file.clone(),
            column: *column,
        },
    }
}
