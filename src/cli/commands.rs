//! Command handler implementations
//!
//! This module contains the implementation of all CLI commands.

use crate::cli::progress::{format_bytes, print_info, print_success, print_warning, BusyIndicator};
use crate::cli::{Args, Commands};
use crate::core::config::{get_config_path, init_config, write_default_config, Config};
use crate::core::gallery::{GalleryWorkflow, OperationOutcome};
use crate::core::record::CaptureRecord;
use crate::picker::{DesktopPicker, MediaPicker, PathPicker};
use crate::ui::ConfiguredPresenter;
use anyhow::{bail, Result};
use log::{debug, info};
use std::path::PathBuf;

/// One of the four gallery actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GalleryAction {
    CapturePhoto,
    CaptureVideo,
    AddPhoto,
    AddVideo,
}

impl GalleryAction {
    fn busy_message(&self) -> &'static str {
        match self {
            GalleryAction::CapturePhoto => "Capturing photo...",
            GalleryAction::CaptureVideo => "Recording video...",
            GalleryAction::AddPhoto => "Importing photo...",
            GalleryAction::AddVideo => "Importing video...",
        }
    }
}

/// Run the command selected on the command line
pub async fn run_command(args: &Args, config: &Config) -> Result<()> {
    match &args.command {
        Some(Commands::Config { path, reset }) => {
            handle_config_command(*path, *reset)?;
        }
        Some(Commands::GenerateConfig { output }) => {
            generate_config_file(output.clone())?;
        }
        Some(Commands::ShowConfig) => {
            show_config(config);
        }
        Some(Commands::List { json }) => {
            list_records(config, *json)?;
        }
        None => {
            list_records(config, false)?;
        }
        Some(Commands::CapturePhoto) => {
            run_action(config, desktop_picker(config), GalleryAction::CapturePhoto).await?;
        }
        Some(Commands::CaptureVideo) => {
            run_action(config, desktop_picker(config), GalleryAction::CaptureVideo).await?;
        }
        Some(Commands::AddPhoto { file }) => match file {
            Some(path) => {
                run_action(config, PathPicker::new(path), GalleryAction::AddPhoto).await?
            }
            None => run_action(config, desktop_picker(config), GalleryAction::AddPhoto).await?,
        },
        Some(Commands::AddVideo { file }) => match file {
            Some(path) => {
                run_action(config, PathPicker::new(path), GalleryAction::AddVideo).await?
            }
            None => run_action(config, desktop_picker(config), GalleryAction::AddVideo).await?,
        },
        Some(Commands::Open { name }) => {
            open_record(config, name).await?;
        }
    }

    Ok(())
}

fn desktop_picker(config: &Config) -> DesktopPicker {
    DesktopPicker::from_config(&config.picker)
}

fn open_gallery<P: MediaPicker>(
    config: &Config,
    picker: P,
) -> Result<GalleryWorkflow<P, ConfiguredPresenter>> {
    let presenter = ConfiguredPresenter::from_style(config.alerts.style);
    let gallery = GalleryWorkflow::new(&config.gallery.directory, picker, presenter)?;
    debug!("Opened gallery: {:?}", gallery);
    Ok(gallery)
}

/// Run one gallery action to completion with a busy spinner
async fn run_action<P: MediaPicker>(
    config: &Config,
    picker: P,
    action: GalleryAction,
) -> Result<()> {
    let gallery = open_gallery(config, picker)?;
    let indicator = BusyIndicator::spawn(gallery.subscribe(), action.busy_message());

    let outcome = match action {
        GalleryAction::CapturePhoto => gallery.capture_photo().await,
        GalleryAction::CaptureVideo => gallery.capture_video().await,
        GalleryAction::AddPhoto => gallery.add_photo().await,
        GalleryAction::AddVideo => gallery.add_video().await,
    };

    let total = gallery.record_count();
    // Dropping the workflow closes the event channel and stops the spinner.
    drop(gallery);
    indicator.join();

    match outcome {
        OperationOutcome::Added(record) => {
            print_success(&format!("Saved {}", record.path.display()));
            print_info(&format!("Gallery now holds {} files", total));
        }
        OperationOutcome::Cancelled => print_warning("Cancelled, nothing was added"),
        OperationOutcome::Ignored => print_warning("Another operation is in progress"),
        // The alert has already been shown; only the exit status is left.
        OperationOutcome::Unavailable => bail!("Camera not available"),
        OperationOutcome::Failed(message) => bail!(message),
    }

    Ok(())
}

/// Print the gallery records
pub fn list_records(config: &Config, json: bool) -> Result<()> {
    let gallery = open_gallery(config, desktop_picker(config))?;
    let records = gallery.records();

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    info!("Gallery: {}", gallery.gallery_dir().display());
    if records.is_empty() {
        print_info("The gallery is empty.");
        print_info("Use 'capture-gallery capture-photo' or 'capture-gallery add-photo' to add files.");
        return Ok(());
    }

    println!("Found {} file(s):", records.len());
    for record in &records {
        println!("  {:<40} {:>12}", record.file_name, record_size(record));
    }

    Ok(())
}

fn record_size(record: &CaptureRecord) -> String {
    if !record.exists() {
        return "missing".to_string();
    }
    match std::fs::metadata(&record.path) {
        Ok(meta) => format_bytes(meta.len()),
        Err(_) => "-".to_string(),
    }
}

/// Open a stored record by file name
pub async fn open_record(config: &Config, name: &str) -> Result<()> {
    let gallery = open_gallery(config, desktop_picker(config))?;

    let Some(record) = gallery.find_record(name) else {
        bail!(
            "No file named '{}' in {}",
            name,
            gallery.gallery_dir().display()
        );
    };

    if gallery.open_photo(&record).await {
        print_info(&record.to_string());
    } else {
        bail!("Camera not available");
    }

    Ok(())
}

/// Show or reset the configuration file
pub fn handle_config_command(show_path: bool, reset: bool) -> Result<()> {
    if reset {
        if let Some(config_path) = get_config_path() {
            if config_path.exists() {
                std::fs::remove_file(&config_path)?;
                info!("Removed existing config file");
            }
        }
        let path = init_config()?;
        info!("Created fresh config file at: {}", path.display());
        return Ok(());
    }

    let path = Config::get_active_config_path();
    if show_path {
        println!("{}", path.display());
        if path.exists() {
            info!("Config file exists at: {}", path.display());
        } else {
            info!("Config file would be created at: {}", path.display());
        }
        return Ok(());
    }

    let path = if path.exists() { path } else { init_config()? };
    print_info(&format!("Config file: {}", path.display()));
    print_info("Edit this file, then run 'capture-gallery show-config' to verify your settings.");

    Ok(())
}

/// Generate a configuration file at the specified or default location
pub fn generate_config_file(output: Option<PathBuf>) -> Result<()> {
    let output_path = match output {
        Some(path) => {
            write_default_config(&path)?;
            path
        }
        None => init_config()?,
    };

    info!("Configuration file: {}", output_path.display());
    info!("Edit this file to customize the gallery settings.");

    Ok(())
}

/// Show the current configuration settings
pub fn show_config(config: &Config) {
    let config_path = Config::get_active_config_path();
    info!("Configuration file: {}", config_path.display());
    if !config_path.exists() {
        info!("(Using default settings - no config file found)");
    }

    match config.to_toml() {
        Ok(content) => {
            println!();
            println!("{}", content);
        }
        Err(e) => {
            print_warning(&format!("Could not render configuration: {}", e));
        }
    }

    if config.picker.photo_command.is_empty() && config.picker.video_command.is_empty() {
        print_warning("No capture command configured; capture and import will report 'Camera not available'");
    }
}
