use std::{
    fs,
    io::{self, BufRead, Write},
    path::Path,
};

use log::{debug, error, trace};

use crate::{NotesError, Result};

/// Reads replacement content for a document from a file.
pub fn read_content_file(path: &Path) -> Result<String> {
    debug!("Reading content from file: {}", path.display());
    if !path.exists() {
        return Err(NotesError::FileNotFound {
            file_path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| {
        error!("Failed to open content file {}: {}", path.display(), e);
        NotesError::Io(e)
    })?;

    trace!("Read {} bytes from {}", content.len(), path.display());
    Ok(content)
}

/// Asks a yes/no question; anything but "y"/"yes" counts as no.
pub fn confirm(
    question: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<bool> {
    write!(output, "{} [y/N]: ", question)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// First `max_len` characters of `content`, with an ellipsis when cut.
pub fn preview(content: &str, max_len: usize) -> String {
    let flattened = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if flattened.chars().count() <= max_len {
        return flattened;
    }
    let cut: String = flattened.chars().take(max_len).collect();
    format!("{}...", cut)
}
