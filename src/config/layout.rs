use compio::fs;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use std::{borrow::Cow, path::Path, string::FromUtf8Error};
use tracing::{debug, warn};

use crate::filesystem::{Filesystem, NodeKind, TreeError};

const FOLDERS_SECTION: &str = "folders";
const FILES_SECTION: &str = "files";

/// Folders and files to create in a fresh [`Filesystem`], in document order.
///
/// ```yaml
/// folders:
///   - /srv/data
/// files:
///   - /srv/data/readme.txt
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeLayout {
    folders: Vec<String>,
    files: Vec<String>,
}

impl TreeLayout {
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, LayoutCreationError> {
        let path = path.as_ref();
        let file_path = path.display().to_string();
        debug!("Reading layout file: {file_path}");

        let bytes = fs::read(path).await.context(ReadSnafu {
            file_path: file_path.clone(),
        })?;
        debug!("Successfully read layout file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu { file_path })?;
        contents.as_str().try_into()
    }

    pub fn folders(&self) -> &[String] {
        &self.folders
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Creates every folder, then every file, in `fs`.
    ///
    /// Entries that already exist with the requested kind are left alone, so
    /// applying the same layout twice changes nothing.
    pub fn apply(&self, fs: &mut Filesystem) -> Result<(), LayoutApplyError> {
        for folder in &self.folders {
            let created = fs.mkdir(folder);
            Self::tolerate_existing(fs, created, folder, NodeKind::Folder)?;
        }
        for file in &self.files {
            let created = fs.touch(file);
            Self::tolerate_existing(fs, created, file, NodeKind::File)?;
        }
        debug!(
            "Applied layout: {} folders, {} files",
            self.folders.len(),
            self.files.len()
        );
        Ok(())
    }

    /// An entry that already exists is only accepted when it has the kind the
    /// layout asks for.
    fn tolerate_existing<T>(
        fs: &Filesystem,
        result: Result<T, TreeError>,
        path: &str,
        requested: NodeKind,
    ) -> Result<(), LayoutApplyError> {
        match result {
            Ok(_) => Ok(()),
            Err(TreeError::AlreadyExists { existing, .. }) => {
                let existing = fs[existing].kind();
                ensure!(
                    existing == requested,
                    KindMismatchSnafu {
                        path,
                        existing,
                        requested
                    }
                );
                debug!("Layout entry '{path}' already exists");
                Ok(())
            }
            Err(e) => Err(e).context(EntrySnafu { path }),
        }
    }

    fn parse_section(
        top_level: &Yaml,
        section: &'static str,
    ) -> Result<Vec<String>, LayoutCreationError> {
        let Some(value) = top_level
            .as_mapping()
            .and_then(|mapping| mapping.get(&Yaml::Value(Scalar::String(Cow::Borrowed(section)))))
        else {
            return Ok(Vec::new());
        };

        if matches!(value, Yaml::Value(Scalar::Null)) {
            return Ok(Vec::new());
        }

        let entries = value
            .as_sequence()
            .context(SectionNotSequenceSnafu { section })?
            .iter()
            .filter_map(|entry| match entry.as_str() {
                Some(path) => Some(path.to_string()),
                None => {
                    warn!("Skipping non-string entry in '{section}': {entry:?}");
                    None
                }
            })
            .collect();

        Ok(entries)
    }
}

impl TryFrom<&str> for TreeLayout {
    type Error = LayoutCreationError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let top_level = documents.first().context(MalformedLayoutSnafu)?;
        ensure!(top_level.as_mapping().is_some(), TopLevelNotMapSnafu);

        Ok(TreeLayout {
            folders: Self::parse_section(top_level, FOLDERS_SECTION)?,
            files: Self::parse_section(top_level, FILES_SECTION)?,
        })
    }
}

impl Filesystem {
    pub fn from_layout(layout: &TreeLayout) -> Result<Self, LayoutApplyError> {
        let mut fs = Filesystem::new();
        layout.apply(&mut fs)?;
        Ok(fs)
    }
}

#[derive(Debug, Snafu)]
pub enum LayoutCreationError {
    #[snafu(display("Failed to read the layout file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Layout file is not valid UTF-8: {}", file_path))]
    EncodingError {
        file_path: String,
        source: FromUtf8Error,
    },
    #[snafu(display("Failed to parse the layout file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted layout file"))]
    MalformedLayout,
    #[snafu(display("Top level of layout should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Section '{}' should be a list of paths", section))]
    SectionNotSequence { section: String },
}

#[derive(Debug, Snafu)]
pub enum LayoutApplyError {
    #[snafu(display("Failed to create layout entry '{}'", path))]
    EntryError { path: String, source: TreeError },
    #[snafu(display(
        "Layout entry '{}' asks for a {} but a {} already exists",
        path,
        requested,
        existing
    ))]
    KindMismatch {
        path: String,
        existing: NodeKind,
        requested: NodeKind,
    },
}

impl LayoutApplyError {
    pub fn path(&self) -> &str {
        match self {
            LayoutApplyError::EntryError { path, .. }
            | LayoutApplyError::KindMismatch { path, .. } => path,
        }
    }

    /// The tree failure behind this error, if any.
    pub fn tree_error(&self) -> Option<&TreeError> {
        match self {
            LayoutApplyError::EntryError { source, .. } => Some(source),
            LayoutApplyError::KindMismatch { .. } => None,
        }
    }
}
