// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 The xdraft developers

//! Reference texts used to steer drafts.
//!
//! Reference texts are plain Markdown files, one post per file, kept in a
//! directory. There are two collections: the user's own posts, which teach
//! a model the user's voice, and popular posts by others, which teach it
//! patterns that perform well.

use log::debug;
use std::path::Path;
use std::{fs, io};

/// Reads every Markdown file directly inside `dir`.
///
/// Files are read in order of their names. Their contents are trimmed, and
/// files that are empty after trimming are skipped. A missing directory
/// yields no texts; any other I/O error is returned.
pub fn load_texts(dir: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let dir = dir.as_ref();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("no reference texts in {}", dir.display());
            return Ok(vec![]);
        }
        Err(err) => return Err(err),
    };

    let mut paths = entries
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<io::Result<Vec<_>>>()?;
    paths.retain(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "md"));
    paths.sort();

    let mut texts = Vec::with_capacity(paths.len());
    for path in paths {
        let text = fs::read_to_string(&path)?;
        let text = text.trim();
        if !text.is_empty() {
            texts.push(text.to_string());
        }
    }

    debug!(
        "loaded {} reference texts from {}",
        texts.len(),
        dir.display()
    );
    Ok(texts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_loads_markdown_files_in_name_order() {
        let texts = load_texts("tests/data/reference").unwrap();
        assert_eq!(
            texts,
            vec![
                String::from("Shipping beats polishing. Every time."),
                String::from("Nobody reads the docs.\n\nSo write better error messages."),
            ]
        );
    }

    #[test]
    fn it_returns_nothing_for_a_missing_directory() {
        let texts = load_texts("tests/data/no-such-directory").unwrap();
        assert!(texts.is_empty());
    }

    #[test]
    fn it_returns_other_io_errors() {
        let err = load_texts("tests/data/reference/01-shipping.md").unwrap_err();
        assert_ne!(err.kind(), io::ErrorKind::NotFound);
    }
}
