use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// Extensions eligible for story upload, matched case-insensitively.
pub const MEDIA_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "mp4"];

/// One run of a file name: digits compare numerically, everything else
/// compares case-insensitively. A number run sorts before a text run so
/// `"2a"` lands ahead of `"a"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NaturalChunk {
    Number(u128),
    Text(String),
}

impl Ord for NaturalChunk {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (NaturalChunk::Number(a), NaturalChunk::Number(b)) => a.cmp(b),
            (NaturalChunk::Text(a), NaturalChunk::Text(b)) => a.cmp(b),
            (NaturalChunk::Number(_), NaturalChunk::Text(_)) => Ordering::Less,
            (NaturalChunk::Text(_), NaturalChunk::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for NaturalChunk {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Split `name` into alternating digit/non-digit runs.
///
/// `"img10.png"` → `[Text("img"), Number(10), Text(".png")]`, which makes
/// `img2` sort before `img10` — filenames are user-numbered sequences meant
/// to post in visual order.
pub fn natural_key(name: &str) -> Vec<NaturalChunk> {
    let mut chunks = Vec::new();
    let mut digits = String::new();
    let mut text = String::new();

    for c in name.chars() {
        if c.is_ascii_digit() {
            if !text.is_empty() {
                chunks.push(NaturalChunk::Text(std::mem::take(&mut text)));
            }
            digits.push(c);
        } else {
            if !digits.is_empty() {
                // A digit run longer than u128 would overflow; no real file
                // name gets close, but saturate rather than panic.
                let n = digits.parse().unwrap_or(u128::MAX);
                chunks.push(NaturalChunk::Number(n));
                digits.clear();
            }
            text.extend(c.to_lowercase());
        }
    }
    if !digits.is_empty() {
        chunks.push(NaturalChunk::Number(digits.parse().unwrap_or(u128::MAX)));
    }
    if !text.is_empty() {
        chunks.push(NaturalChunk::Text(text));
    }
    chunks
}

fn is_media(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            MEDIA_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// List the folder's eligible media files in upload order.
///
/// Only regular files with a recognised extension survive the filter; the
/// result is natural-sorted by file name and deterministic across calls.
pub fn scan_media(folder: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(folder)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.path())
        .filter(|path| is_media(path))
        .collect();

    files.sort_by_key(|path| {
        natural_key(&path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default())
    });
    Ok(files)
}
