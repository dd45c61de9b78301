//! Folder discovery for mockup runs.
//!
//! A parent directory holds one subfolder per mockup. Each mockup folder is
//! flat: the beauty image, optional UV pass, masks and companion assets all
//! sit side by side, and the generated descriptor is written next to them.
//!
//! # Example
//!
//! ```ignore
//! use mockup_cli::discovery::{list_subfolders, list_files};
//!
//! for folder in list_subfolders(Path::new("./mockups"))? {
//!     println!("{}: {} files", folder.display(), list_files(&folder)?.len());
//! }
//! ```

mod scanner;

use std::path::{Path, PathBuf};

pub use scanner::{list_files, list_subfolders};

/// The name of the descriptor file written into each mockup folder.
pub const DESCRIPTOR_FILENAME: &str = "mockup.json";

/// Path of the descriptor file for a mockup folder.
pub fn descriptor_path(folder: &Path) -> PathBuf {
    folder.join(DESCRIPTOR_FILENAME)
}

/// The folder's own name, used as the mockup name and storage prefix.
pub fn folder_name(folder: &Path) -> String {
    folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
