// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use cmd::commands::{CopyMode, cat_command, copy_command, list_command};
use cmd::common::open_filesystem;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "bucketfs")]
struct Cli {
    /// Store configuration file (YAML); defaults to $BUCKETFS_CONFIG
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Root prefix, replacing the one in the configuration
    #[arg(long, global = true)]
    prefix: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the entries directly inside a directory
    Ls {
        /// Directory path (default: the root prefix)
        #[arg(default_value = "")]
        dir: String,
    },
    /// Write a file to stdout
    Cat {
        /// File path to read
        path: String,
    },
    /// Replace a file with stdin
    Put {
        /// File path to write
        path: String,
    },
    /// Add stdin to the end of a file
    Append {
        /// File path to append to
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    diagnostics::init();

    let cli = Cli::parse();
    let fs = open_filesystem(cli.config, cli.prefix)?;

    match &cli.command {
        Commands::Ls { dir } => list_command(&fs, dir, &mut std::io::stdout().lock()).await,
        Commands::Cat { path } => cat_command(&fs, path, &mut tokio::io::stdout()).await.map(drop),
        Commands::Put { path } => {
            copy_command(&fs, path, &mut tokio::io::stdin(), CopyMode::Create).await.map(drop)
        }
        Commands::Append { path } => {
            copy_command(&fs, path, &mut tokio::io::stdin(), CopyMode::Append).await.map(drop)
        }
    }
}
