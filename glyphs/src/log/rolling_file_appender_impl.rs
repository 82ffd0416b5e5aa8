// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

/// Opens (or creates) the log file at `path_str`. The file never rotates.
///
/// Wrapping the result in `tracing_appender::non_blocking` loses events that are
/// emitted right before the process exits, so it is used as a plain writer.
///
/// # Errors
///
/// Returns an error if the path has no parent directory or no file name.
pub fn try_create(
    path_str: &str,
) -> miette::Result<tracing_appender::rolling::RollingFileAppender> {
    let path = PathBuf::from(path_str);

    let parent = path
        .parent()
        .map(|it| {
            if it.as_os_str().is_empty() {
                PathBuf::from(".")
            } else {
                it.to_path_buf()
            }
        })
        .ok_or_else(|| {
            miette::miette!(
                "Can't access the folder of log file {}. It might not exist.",
                path.display()
            )
        })?;

    let file_name = path.file_name().ok_or_else(|| {
        miette::miette!("Log file path {} has no file name.", path.display())
    })?;

    Ok(tracing_appender::rolling::never(parent, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_file_in_existing_folder() {
        let dir = std::env::temp_dir().join("styled_glyphs_appender_test");
        std::fs::create_dir_all(&dir).unwrap();
        let file_path = dir.join("appender.log");

        let _appender = try_create(file_path.to_str().unwrap()).unwrap();

        assert!(file_path.exists());
    }

    #[test]
    fn root_has_no_file_name() {
        assert!(try_create("/").is_err());
    }
}
