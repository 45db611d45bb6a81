//! Loads delimited text files (one header line, then one record per line) into `(key, record)`
//! pairs ready to be inserted into a tree.
//!
//! Rows are cleaned the same way before either tree sees them: rows with an empty key are
//! dropped and only the first row for each key is kept, so every key in a [`Dataset`] is unique.
//! Only an empty key counts as missing. Placeholders such as `NA`, `NaN`, `null` or `N/A` are
//! ordinary keys and are kept as written.
//!
//! # Examples
//!
//! ```
//! use bst_avl::records;
//!
//! let text = "id;name\n2;two\n1;one\n2;again\n;nobody\n";
//! let dataset = records::parse(text.as_bytes(), ';', "id").unwrap();
//!
//! assert_eq!(dataset.keys().collect::<Vec<_>>(), ["2", "1"]);
//! assert_eq!(dataset.dropped_duplicates, 1);
//! assert_eq!(dataset.dropped_blank, 1);
//! assert_eq!(dataset.rows[0].1.get("name"), Some("two"));
//! ```

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Everything that can go wrong while loading records.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The file couldn't be opened or read.
    #[error("failed to read {}{}", path.display(), at_line(line))]
    Io {
        /// The file being read.
        path: PathBuf,
        /// 1-based line number, if the file was opened but a line couldn't be read.
        line: Option<usize>,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
    /// A line couldn't be read from an in-memory or already opened source.
    #[error("failed to read line {line}")]
    Read {
        /// 1-based line number.
        line: usize,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
    /// There was no header line.
    #[error("input is empty, expected a header line")]
    MissingHeader,
    /// The header doesn't name the key column.
    #[error("header has no column named {column:?}")]
    MissingKeyColumn {
        /// The column that was asked for.
        column: String,
    },
    /// A row has more fields than the header has columns.
    #[error("line {line} has {found} fields but the header has {expected}")]
    TooManyFields {
        /// 1-based line number.
        line: usize,
        /// Number of header columns.
        expected: usize,
        /// Number of fields on the line.
        found: usize,
    },
}

fn at_line(line: &Option<usize>) -> String {
    line.map(|line| format!(" at line {}", line)).unwrap_or_default()
}

/// One row of the input. Columns are looked up by header name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    header: Rc<[String]>,
    values: Vec<String>,
}

impl Record {
    /// The value in the given column, or `None` if there's no such column.
    pub fn get(&self, column: &str) -> Option<&str> {
        let index = self.header.iter().position(|name| name == column)?;
        self.values.get(index).map(String::as_str)
    }

    /// `(column, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.header
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }
}

/// The cleaned rows of an input file.
#[derive(Clone, Debug)]
pub struct Dataset {
    /// Column names from the header line.
    pub header: Rc<[String]>,
    /// Unique keys and their rows, in file order.
    pub rows: Vec<(String, Record)>,
    /// Rows skipped because their key was empty.
    pub dropped_blank: usize,
    /// Rows skipped because an earlier row had the same key.
    pub dropped_duplicates: usize,
}

impl Dataset {
    /// The unique keys, in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(key, _)| key.as_str())
    }

    /// Number of unique keys.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows survived cleaning.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Loads the file at `path`. See [`parse`].
pub fn load(path: &Path, delimiter: char, key_column: &str) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        line: None,
        source,
    })?;

    parse(BufReader::new(file), delimiter, key_column).map_err(|err| match err {
        LoadError::Read { line, source } => LoadError::Io {
            path: path.to_path_buf(),
            line: Some(line),
            source,
        },
        other => other,
    })
}

/// Reads a header line and then one record per non-blank line, keyed by `key_column`.
pub fn parse<R: BufRead>(
    reader: R,
    delimiter: char,
    key_column: &str,
) -> Result<Dataset, LoadError> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line));

    let header: Rc<[String]> = match lines.next() {
        Some((line, text)) => {
            let text = text.map_err(|source| LoadError::Read { line, source })?;
            split_fields(text.trim_start_matches('\u{feff}'), delimiter).into()
        }
        None => return Err(LoadError::MissingHeader),
    };
    let key_index = header
        .iter()
        .position(|name| name == key_column)
        .ok_or_else(|| LoadError::MissingKeyColumn {
            column: key_column.to_string(),
        })?;

    let mut seen = HashSet::new();
    let mut dataset = Dataset {
        header: Rc::clone(&header),
        rows: Vec::new(),
        dropped_blank: 0,
        dropped_duplicates: 0,
    };

    for (line, text) in lines {
        let text = text.map_err(|source| LoadError::Read { line, source })?;
        if text.trim().is_empty() {
            continue;
        }

        let mut values = split_fields(&text, delimiter);
        if values.len() > header.len() {
            return Err(LoadError::TooManyFields {
                line,
                expected: header.len(),
                found: values.len(),
            });
        }
        values.resize(header.len(), String::new());

        let key = values[key_index].clone();
        if key.is_empty() {
            dataset.dropped_blank += 1;
        } else if !seen.insert(key.clone()) {
            dataset.dropped_duplicates += 1;
        } else {
            let record = Record {
                header: Rc::clone(&header),
                values,
            };
            dataset.rows.push((key, record));
        }
    }

    Ok(dataset)
}

/// Splits one line on `delimiter`. A field wrapped in double quotes may contain the delimiter and
/// uses `""` for a literal quote.
fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            c if c == delimiter && !in_quotes => fields.push(std::mem::take(&mut field)),
            c => field.push(c),
        }
    }
    fields.push(field);

    fields
}
