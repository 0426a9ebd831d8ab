use std::path::Path;

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::{Entry, FileKind};

fn extensions(settings: &LibrarySettings, kind: FileKind) -> Vec<String> {
    let list = match kind {
        FileKind::Audio => &settings.audio_extensions,
        FileKind::Lyrics => &settings.lyric_extensions,
    };
    list.iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

pub(super) fn has_extension(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn tagged_display(path: &Path) -> (Option<String>, Option<std::time::Duration>) {
    let Ok(tagged) = lofty::read_from_path(path) else {
        return (None, None);
    };
    let duration = Some(tagged.properties().duration());

    let display = tagged
        .primary_tag()
        .or_else(|| tagged.first_tag())
        .and_then(|tag| {
            let title = tag.title()?.trim().to_string();
            if title.is_empty() {
                return None;
            }
            match tag.artist().map(|a| a.trim().to_string()) {
                Some(a) if !a.is_empty() => Some(format!("{a} - {title}")),
                _ => Some(title),
            }
        });

    (display, duration)
}

/// List files under `dir` whose extension matches `kind`, sorted by display text.
pub fn scan(dir: &Path, settings: &LibrarySettings, kind: FileKind) -> Vec<Entry> {
    let exts = extensions(settings, kind);
    let mut entries: Vec<Entry> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(true);
    if let Some(d) = settings.max_depth {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() || !has_extension(path, &exts) {
            continue;
        }

        let relative = path
            .strip_prefix(dir)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned();

        let (tag_display, duration) = match kind {
            FileKind::Audio => tagged_display(path),
            FileKind::Lyrics => (None, None),
        };

        entries.push(Entry {
            path: path.to_path_buf(),
            display: tag_display.unwrap_or(relative),
            duration,
        });
    }

    entries.sort_by(|a, b| a.display.to_lowercase().cmp(&b.display.to_lowercase()));
    entries
}
