//! Command-line argument definitions
//!
//! This module defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Capture photos and videos, or import them from your library, into a local gallery
#[derive(Parser, Debug)]
#[command(name = "capture-gallery")]
#[command(version)]
#[command(about = "Capture or import photos and videos into a local gallery folder", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Gallery directory (overrides config)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub gallery_dir: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace (overrides config)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Show errors in a native dialog instead of the console (overrides config)
    #[arg(long, global = true)]
    pub dialog_alerts: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the files in the gallery
    List {
        /// Print the records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Take a photo with the configured capture command
    CapturePhoto,

    /// Record a video with the configured capture command
    CaptureVideo,

    /// Import an existing photo into the gallery
    AddPhoto {
        /// Import this file instead of opening a file dialog
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Import an existing video into the gallery
    AddVideo {
        /// Import this file instead of opening a file dialog
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Open a gallery file by name
    Open {
        /// File name of the gallery record (e.g., IMG_20240101_120000.jpg)
        name: String,
    },

    /// Show or reset the configuration file
    ///
    /// The config file is stored at:
    /// - Windows: %APPDATA%\capture_gallery\config.toml
    /// - Linux: ~/.config/capture_gallery/config.toml
    /// - macOS: ~/Library/Application Support/capture_gallery/config.toml
    ///
    /// If no config file exists, a default one will be created.
    Config {
        /// Show the config file path only
        #[arg(long)]
        path: bool,

        /// Reset config to defaults (creates a fresh config file)
        #[arg(long)]
        reset: bool,
    },

    /// Show current configuration
    ShowConfig,

    /// Generate a configuration file at a specific location
    GenerateConfig {
        /// Output path for the config file (defaults to standard location)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
