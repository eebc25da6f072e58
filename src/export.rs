use crate::suggestion::TagType;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const LANGUAGE_PREFIX: &str = "language/";
const FILTER_PREFIX: &str = "filter/";
const MEDIA_PREFIX: &str = "system/media/";
const SIZE_PREFIX: &str = "system/size/";
const ASSET_TYPE_PREFIX: &str = "type/";

/// Derives the export file name from the selected tags.
///
/// Looks at the first tag carrying each known prefix and pulls one segment
/// out of it. Templates are named `<language>_<vehicle>_<media>_<size>_tags.txt`
/// and assets `<language>_<type>_<vehicle>_asset_tags.txt`; absent segments
/// are skipped, and with none present the bare suffix is used.
pub fn derive_filename<S: AsRef<str>>(tags: &[S], tag_type: TagType) -> String {
    let language = segment(tags, LANGUAGE_PREFIX, |tag| tag.split('/').nth(1));
    let vehicle = segment(tags, FILTER_PREFIX, |tag| tag.rsplit('/').next());

    let (parts, suffix) = match tag_type {
        TagType::Asset => {
            let asset_type = segment(tags, ASSET_TYPE_PREFIX, |tag| tag.split('/').nth(1));
            ([language, asset_type, vehicle, None], "asset_tags.txt")
        }
        TagType::Template => {
            let media = segment(tags, MEDIA_PREFIX, |tag| tag.split('/').nth(2));
            let size = segment(tags, SIZE_PREFIX, |tag| tag.split('/').nth(2));
            ([language, vehicle, media, size], "tags.txt")
        }
    };

    let present: Vec<&str> = parts.into_iter().flatten().collect();
    if present.is_empty() {
        suffix.to_string()
    } else {
        format!("{}_{}", present.join("_"), suffix)
    }
}

// Only the first tag with the prefix is considered; an empty segment counts as absent.
fn segment<'a, S: AsRef<str>>(
    tags: &'a [S],
    prefix: &str,
    extract: impl Fn(&'a str) -> Option<&'a str>,
) -> Option<&'a str> {
    tags.iter()
        .map(|tag| -> &'a str { tag.as_ref() })
        .find(|tag| tag.starts_with(prefix))
        .and_then(extract)
        .filter(|value| !value.is_empty())
}

/// File contents: one tag per line, no trailing newline.
pub fn render_contents<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(|tag| tag.as_ref())
        .collect::<Vec<&str>>()
        .join("\n")
}

/// A ready-to-write tag file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagExport {
    pub filename: String,
    pub contents: String,
}

impl TagExport {
    pub fn new<S: AsRef<str>>(tags: &[S], tag_type: TagType) -> Self {
        Self {
            filename: derive_filename(tags, tag_type),
            contents: render_contents(tags),
        }
    }

    /// Writes the file into `dir`, replacing any file of the same name.
    pub fn write_to(&self, dir: &Path) -> io::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        fs::write(&path, &self.contents)?;
        Ok(path)
    }
}
