// src/file.rs

use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::csv::{parse_rows, write_row};

/// Replace `path` with `rows`. Written to a sibling temp file first and
/// renamed over, so a crash mid-write leaves the old file intact.
pub fn write_rows(path: &Path, rows: &[Vec<String>], sep: char) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let tmp = path.with_extension("tmp");
    {
        let mut out = BufWriter::new(File::create(&tmp)?);
        for row in rows {
            write_row(&mut out, row, sep)?;
        }
        out.flush()?;
    }
    fs::rename(&tmp, path)
}

/// Append rows, creating the file if needed.
pub fn append_rows(path: &Path, rows: &[Vec<String>], sep: char) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut out = BufWriter::new(file);
    for row in rows {
        write_row(&mut out, row, sep)?;
    }
    out.flush()
}

/// Parsed rows, or None when the file does not exist.
pub fn read_rows(path: &Path, sep: char) -> io::Result<Option<Vec<Vec<String>>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(parse_rows(&String::from_utf8_lossy(&bytes), sep))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Tab name → file stem: keep [A-Za-z0-9_-], everything else becomes '_'.
pub fn sanitize_tab_filename(tab: &str) -> String {
    let out: String = tab
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if out.is_empty() { s!("tab") } else { out }
}
