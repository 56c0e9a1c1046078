//! Filesystem path validation.

use std::fs;
use std::path::PathBuf;

use crate::validation::{InvalidValue, Validator};
use crate::value::Value;

/// Validates values as filesystem paths. Converts accepted values to
/// [`Value::Path`].
///
/// By default any path text is accepted; the constructors and setters add
/// existence and kind requirements.
#[derive(Debug, Clone, Default)]
pub struct FileValidator {
    existing: bool,
    file: bool,
    directory: bool,
    writable: bool,
}

impl FileValidator {
    /// Accepts any path, existing or not.
    pub fn any_path() -> Self {
        FileValidator::default()
    }

    /// Requires the path to exist.
    pub fn existing() -> Self {
        FileValidator {
            existing: true,
            ..Default::default()
        }
    }

    /// Requires an existing regular file.
    pub fn existing_file() -> Self {
        FileValidator {
            existing: true,
            file: true,
            ..Default::default()
        }
    }

    /// Requires an existing directory.
    pub fn existing_directory() -> Self {
        FileValidator {
            existing: true,
            directory: true,
            ..Default::default()
        }
    }

    /// Additionally requires the path to be writable.
    pub fn writable(mut self) -> Self {
        self.writable = true;
        self
    }

    fn check(&self, text: &str) -> Result<PathBuf, InvalidValue> {
        let path = PathBuf::from(text);
        if self.existing || self.file || self.directory || self.writable {
            let metadata = fs::metadata(&path)
                .map_err(|_| InvalidValue::new(text, "path does not exist"))?;
            if self.file && !metadata.is_file() {
                return Err(InvalidValue::new(text, "path is not a regular file"));
            }
            if self.directory && !metadata.is_dir() {
                return Err(InvalidValue::new(text, "path is not a directory"));
            }
            if self.writable && metadata.permissions().readonly() {
                return Err(InvalidValue::new(text, "path is not writable"));
            }
        }
        Ok(path)
    }
}

impl Validator for FileValidator {
    fn validate(&self, values: &mut Vec<Value>) -> Result<(), InvalidValue> {
        for value in values.iter_mut() {
            let Some(text) = value.as_str().map(str::to_owned) else {
                continue;
            };
            *value = Value::Path(self.check(&text)?);
        }
        Ok(())
    }
}
