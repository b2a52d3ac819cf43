//! # File I/O Module
//!
//! Project files are plain JSON objects with camelCase keys.
//!
//! - **Atomic saves**: write to `<name>.tmp`, fsync, rename over the target
//! - **Lenient loads**: missing or malformed fields fall back to defaults
//!   (see [`Project`]); only a document that is not a JSON object is rejected
//!
//! A failed load never touches the caller's in-memory project, since the
//! loaded value is only returned on success.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gasload_core::file_io::{load_project, save_project};
//! use gasload_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new().with_info("projectName", "Maple St");
//! save_project(&project, Path::new("maple.json"))?;
//!
//! let loaded = load_project(Path::new("maple.json"))?;
//! assert_eq!(loaded.info("projectName").as_deref(), Some("Maple St"));
//! # Ok::<(), gasload_core::errors::CalcError>(())
//! ```

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::errors::{CalcError, CalcResult};
use crate::project::Project;

/// Serialize a project to pretty-printed JSON.
pub fn project_to_json(project: &Project) -> CalcResult<String> {
    serde_json::to_string_pretty(project).map_err(|e| CalcError::serialization(e.to_string()))
}

/// Parse a project from JSON text.
///
/// # Errors
///
/// `SerializationError` if the text is not valid JSON or its top level is
/// not an object. Everything inside the object is read leniently.
pub fn project_from_json(json: &str) -> CalcResult<Project> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| CalcError::serialization(format!("Invalid JSON: {}", e)))?;
    if !value.is_object() {
        return Err(CalcError::serialization("Project file must contain a JSON object"));
    }
    serde_json::from_value(value).map_err(|e| CalcError::serialization(e.to_string()))
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Create `path`, write `bytes` and sync to disk.
fn write_synced(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    let mut file = File::create(path).map_err(|e| {
        CalcError::file_error("create temp file", path.display().to_string(), e.to_string())
    })?;

    file.write_all(bytes).map_err(|e| {
        CalcError::file_error("write temp file", path.display().to_string(), e.to_string())
    })?;

    file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", path.display().to_string(), e.to_string())
    })
}

/// Save a project to a file with atomic write semantics.
///
/// 1. Serialize the project to JSON
/// 2. Write it to `<path>.tmp`
/// 3. Sync to disk
/// 4. Rename over `path`
///
/// On failure the temp file is removed and `path` is left as it was.
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    let json = project_to_json(project)?;
    let tmp_path = tmp_path_for(path);
    log::debug!("writing {}", tmp_path.display());

    if let Err(e) = write_synced(&tmp_path, json.as_bytes()) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    log::info!(
        "saved project to {} ({} appliances)",
        path.display(),
        project.appliance_count()
    );
    Ok(())
}

/// Load a project from a file.
///
/// # Errors
///
/// * `FileError` - the file could not be opened or read
/// * `SerializationError` - invalid JSON, or not a JSON object
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let project = project_from_json(&contents).map_err(|e| match e {
        CalcError::SerializationError { reason } => CalcError::SerializationError {
            reason: format!("{} in {}", reason, path.display()),
        },
        other => other,
    })?;

    log::info!(
        "loaded project from {} ({} appliances)",
        path.display(),
        project.appliance_count()
    );
    Ok(project)
}
