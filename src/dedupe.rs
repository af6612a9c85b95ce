//! Dedupe request: form validation, multipart fields, and saving the result.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ValidationError;

/// Every result is saved under this name, whatever the server suggests.
pub const DEDUPE_FILENAME: &str = "FixMySheet_Dedupe.xlsx";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupeMode {
    Column,
    Row,
}

impl DedupeMode {
    pub const ALL: [DedupeMode; 2] = [DedupeMode::Column, DedupeMode::Row];

    pub fn as_str(self) -> &'static str {
        match self {
            DedupeMode::Column => "column",
            DedupeMode::Row => "row",
        }
    }
}

impl FromStr for DedupeMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "column" => Ok(DedupeMode::Column),
            "row" => Ok(DedupeMode::Row),
            _ => Err(ValidationError::InvalidMode),
        }
    }
}

impl fmt::Display for DedupeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeepPolicy {
    #[default]
    MarkAll,
    KeepFirst,
    KeepLast,
}

impl KeepPolicy {
    pub const ALL: [KeepPolicy; 3] = [KeepPolicy::MarkAll, KeepPolicy::KeepFirst, KeepPolicy::KeepLast];

    pub fn as_str(self) -> &'static str {
        match self {
            KeepPolicy::MarkAll => "mark_all",
            KeepPolicy::KeepFirst => "keep_first",
            KeepPolicy::KeepLast => "keep_last",
        }
    }
}

impl FromStr for KeepPolicy {
    type Err = ValidationError;

    /// Blank means the default policy.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "mark_all" => Ok(KeepPolicy::MarkAll),
            "keep_first" => Ok(KeepPolicy::KeepFirst),
            "keep_last" => Ok(KeepPolicy::KeepLast),
            _ => Err(ValidationError::InvalidKeepPolicy),
        }
    }
}

impl fmt::Display for KeepPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spreadsheet picked by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Blank path means no file was picked.
    pub fn load(path: &str) -> Result<Option<FileUpload>, ValidationError> {
        let path = path.trim();
        if path.is_empty() {
            return Ok(None);
        }
        let bytes = std::fs::read(path)
            .map_err(|e| ValidationError::UnreadableFile(format!("{path}: {e}")))?;
        let file_name = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string());
        Ok(Some(FileUpload { file_name, bytes }))
    }
}

/// Raw form values as typed into the UI.
#[derive(Debug, Clone, Default)]
pub struct DedupeForm {
    pub mode: String,
    pub keep_policy: String,
    pub ignore_case: bool,
    pub ignore_whitespace: bool,
    pub key_column: String,
    pub ignore_columns: String,
}

/// A request that passed validation.
#[derive(Debug, Clone)]
pub struct DedupeRequest {
    pub file: FileUpload,
    pub mode: DedupeMode,
    pub keep_policy: KeepPolicy,
    pub ignore_case: bool,
    pub ignore_whitespace: bool,
    pub key_column: String,
    pub ignore_columns: String,
}

/// Fail-fast: file, mode, keep policy, then key column.
pub fn validate(form: &DedupeForm, file: Option<FileUpload>) -> Result<DedupeRequest, ValidationError> {
    let file = file.ok_or(ValidationError::MissingFile)?;
    let mode: DedupeMode = form.mode.parse()?;
    let keep_policy: KeepPolicy = form.keep_policy.parse()?;
    let key_column = form.key_column.trim().to_string();
    if mode == DedupeMode::Column && key_column.is_empty() {
        return Err(ValidationError::MissingKeyColumn);
    }
    Ok(DedupeRequest {
        file,
        mode,
        keep_policy,
        ignore_case: form.ignore_case,
        ignore_whitespace: form.ignore_whitespace,
        key_column,
        ignore_columns: form.ignore_columns.trim().to_string(),
    })
}

fn flag(value: bool) -> String {
    let s = if value { "true" } else { "false" };
    s.to_string()
}

impl DedupeRequest {
    /// Text fields of the multipart body, in send order. `file` is added separately.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("mode", self.mode.as_str().to_string()),
            ("keep_policy", self.keep_policy.as_str().to_string()),
            ("ignore_case", flag(self.ignore_case)),
            ("ignore_whitespace", flag(self.ignore_whitespace)),
        ];
        match self.mode {
            DedupeMode::Column => fields.push(("key_column", self.key_column.clone())),
            DedupeMode::Row if !self.ignore_columns.is_empty() => {
                fields.push(("ignore_columns", self.ignore_columns.clone()))
            }
            DedupeMode::Row => {}
        }
        fields
    }

    pub fn into_form(self) -> reqwest::multipart::Form {
        let fields = self.text_fields();
        let part = reqwest::multipart::Part::bytes(self.file.bytes).file_name(self.file.file_name);
        fields
            .into_iter()
            .fold(reqwest::multipart::Form::new().part("file", part), |form, (name, value)| {
                form.text(name, value)
            })
    }
}

/// User download directory, else the working directory.
pub fn download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Writes the result as [`DEDUPE_FILENAME`] in `dir`, replacing any previous one.
pub async fn save_result(dir: &Path, bytes: &[u8]) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(DEDUPE_FILENAME);
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> Option<FileUpload> {
        Some(FileUpload {
            file_name: "people.xlsx".into(),
            bytes: b"PK\x03\x04".to_vec(),
        })
    }

    fn form(mode: &str) -> DedupeForm {
        DedupeForm {
            mode: mode.into(),
            ..DedupeForm::default()
        }
    }

    fn names(fields: &[(&'static str, String)]) -> Vec<&'static str> {
        fields.iter().map(|(n, _)| *n).collect()
    }

    #[test]
    fn missing_file_is_reported_before_bad_mode() {
        let err = validate(&form("sideways"), None).unwrap_err();
        assert_eq!(err, ValidationError::MissingFile);
        assert_eq!(err.to_string(), "Please select a file.");
    }

    #[test]
    fn bad_mode_is_reported_before_bad_keep_policy() {
        let mut f = form("diagonal");
        f.keep_policy = "keep_middle".into();
        assert_eq!(validate(&f, sheet()).unwrap_err(), ValidationError::InvalidMode);
    }

    #[test]
    fn bad_keep_policy_is_rejected() {
        let mut f = form("row");
        f.keep_policy = "keep_middle".into();
        let err = validate(&f, sheet()).unwrap_err();
        assert_eq!(err.to_string(), "keep_policy must be mark_all, keep_first, or keep_last.");
    }

    #[test]
    fn column_mode_requires_key_column() {
        for key in ["", "   "] {
            let mut f = form("column");
            f.key_column = key.into();
            f.ignore_case = true;
            f.ignore_columns = "A,B".into();
            f.keep_policy = "keep_last".into();
            let err = validate(&f, sheet()).unwrap_err();
            assert_eq!(err, ValidationError::MissingKeyColumn);
            assert_eq!(err.to_string(), "Key column is required for column mode.");
        }
    }

    #[test]
    fn blank_keep_policy_defaults_to_mark_all() {
        let req = validate(&form(" row "), sheet()).unwrap();
        assert_eq!(req.mode, DedupeMode::Row);
        assert_eq!(req.keep_policy, KeepPolicy::MarkAll);
    }

    #[test]
    fn row_mode_sends_ignore_columns_and_no_key_column() {
        let mut f = form("row");
        f.ignore_columns = "A,B".into();
        f.key_column = "Email".into();
        let fields = validate(&f, sheet()).unwrap().text_fields();

        assert!(fields.contains(&("mode", "row".to_string())));
        assert!(fields.contains(&("ignore_columns", "A,B".to_string())));
        assert!(!names(&fields).contains(&"key_column"));
    }

    #[test]
    fn row_mode_omits_blank_ignore_columns() {
        let fields = validate(&form("row"), sheet()).unwrap().text_fields();
        assert_eq!(names(&fields), vec!["mode", "keep_policy", "ignore_case", "ignore_whitespace"]);
    }

    #[test]
    fn column_mode_sends_key_column_and_stringified_flags() {
        let mut f = form("column");
        f.key_column = " Email ".into();
        f.ignore_columns = "A".into();
        f.ignore_whitespace = true;
        f.keep_policy = "keep_first".into();
        let fields = validate(&f, sheet()).unwrap().text_fields();

        assert_eq!(
            fields,
            vec![
                ("mode", "column".to_string()),
                ("keep_policy", "keep_first".to_string()),
                ("ignore_case", "false".to_string()),
                ("ignore_whitespace", "true".to_string()),
                ("key_column", "Email".to_string()),
            ]
        );
    }

    #[test]
    fn load_blank_path_is_no_file() {
        assert_eq!(FileUpload::load("  ").unwrap(), None);
    }

    #[test]
    fn load_missing_path_is_unreadable() {
        let err = FileUpload::load("/definitely/not/here.xlsx").unwrap_err();
        assert!(matches!(err, ValidationError::UnreadableFile(_)));
        assert!(err.to_string().starts_with("Could not read file: "));
    }

    #[test]
    fn load_reads_bytes_and_file_name() {
        let path = std::env::temp_dir().join(format!("fixmysheet-upload-{}.xlsx", std::process::id()));
        std::fs::write(&path, b"sheet").unwrap();

        let upload = FileUpload::load(path.to_str().unwrap()).unwrap().unwrap();
        assert_eq!(upload.bytes, b"sheet");
        assert_eq!(upload.file_name, path.file_name().unwrap().to_string_lossy());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn save_result_always_uses_fixed_name() {
        let dir = std::env::temp_dir().join(format!("fixmysheet-save-{}", std::process::id()));
        let first = save_result(&dir, b"one").await.unwrap();
        let second = save_result(&dir, b"two").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.file_name().unwrap(), DEDUPE_FILENAME);
        assert_eq!(std::fs::read(&second).unwrap(), b"two");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
