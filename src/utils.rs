//! Common utility functions shared across the codebase.

use std::{
    cmp::Ordering,
    fs,
    io::{self, Write},
    iter::Peekable,
    path::Path,
    str::Chars,
};

use tempfile::NamedTempFile;

/// Stable identifier of a translatable text: lowercase MD5 hex digest of its
/// UTF-8 bytes.
///
/// # Examples
///
/// ```
/// use locsync::utils::hash_text;
///
/// assert_eq!(hash_text("Hello"), "8b1a9953c4611296a827abf8c47804d7");
/// assert_eq!(hash_text("Hello").len(), 32);
/// assert_ne!(hash_text("Hello"), hash_text("hello"));
/// ```
pub fn hash_text(text: &str) -> String {
    format!("{:x}", md5::compute(text.as_bytes()))
}

/// Case-insensitive natural order: digit runs compare by numeric value,
/// leading whitespace is skipped and letters compare by their lowercase form.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use locsync::utils::natural_cmp_ci;
///
/// assert_eq!(natural_cmp_ci("file2", "File10"), Ordering::Less);
/// assert_eq!(natural_cmp_ci("Apple", "apple"), Ordering::Equal);
/// ```
pub fn natural_cmp_ci(a: &str, b: &str) -> Ordering {
    let mut a = a.chars().peekable();
    let mut b = b.chars().peekable();
    skip_whitespace(&mut a);
    skip_whitespace(&mut b);

    loop {
        let (ca, cb) = match (a.peek(), b.peek()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(&ca), Some(&cb)) => (ca, cb),
        };

        let ordering = if ca.is_ascii_digit() && cb.is_ascii_digit() {
            compare_digit_runs(&take_digits(&mut a), &take_digits(&mut b))
        } else {
            a.next();
            b.next();
            ca.to_lowercase().cmp(cb.to_lowercase())
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        digits.push(c);
    }
    digits
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Writes `contents` to `path` through a temporary file in the same
/// directory, renamed over the destination. Readers never observe a
/// partially written file.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(contents)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

/// `path` relative to `root`, `/`-separated. Falls back to the full path when
/// `path` is not under `root`.
pub fn relative_slash_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
