use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "rolodex", version)]
#[command(about = "Read and write vCard 3.0 contact files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a vCard file and print its contacts as JSON
    Decode {
        /// Path to a .vcf file
        file: PathBuf,
    },

    /// Fold each line read from stdin to vCard line length
    Fold,
}
