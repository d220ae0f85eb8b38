// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Packaging of a local build artifact into a deployable zip archive

use crate::error::{ProvisionError, Result};
use crate::types::resources::Archive;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{info, instrument};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Zip `source` into `output` as a single executable entry named after the source file.
#[instrument]
pub fn package_file(source: &Path, output: &Path) -> Result<Archive> {
    if !source.is_file() {
        return Err(ProvisionError::MissingArtifact(source.to_path_buf()));
    }

    let Some(entry_name) = source.file_name().and_then(|n| n.to_str()) else {
        return Err(ProvisionError::Archive(format!(
            "Artifact path {} has no usable file name",
            source.display()
        )));
    };

    let binary = fs::read(source).map_err(|e| archive_error("read", source, e))?;
    let file = fs::File::create(output).map_err(|e| archive_error("create", output, e))?;

    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file(entry_name, options)
        .map_err(|e| archive_error("start entry in", output, e))?;
    zip.write_all(&binary)
        .map_err(|e| archive_error("write", output, e))?;
    zip.finish()
        .map_err(|e| archive_error("finish", output, e))?;

    let output_size = fs::metadata(output)
        .map_err(|e| archive_error("stat", output, e))?
        .len();

    info!(
        "Packaged {} into {} ({} bytes)",
        source.display(),
        output.display(),
        output_size
    );

    Ok(Archive {
        source_path: source.to_path_buf(),
        output_path: output.to_path_buf(),
        output_size,
    })
}

fn archive_error(action: &str, path: &Path, e: impl std::fmt::Display) -> ProvisionError {
    ProvisionError::Archive(format!("Failed to {} {}: {}", action, path.display(), e))
}
