//! Line codec for stage store files.
//!
//! Each task is one line: `name<d>description<d>priority<d>status`, where
//! `<d>` is a single delimiter character (`#` by default). Nothing is
//! escaped; task construction guarantees text fields never contain the
//! delimiter or a line break.
//!
//! Decoding is lenient. Lines with fewer than four fields or any empty
//! field are skipped, numeric fields that do not parse become 0 (see
//! [`parse_int_or_default`]), and bytes that are not valid UTF-8 are
//! replaced with U+FFFD rather than failing the file.

use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::TaskError;
use crate::models::{Task, TaskList};

/// Parse a numeric field, falling back to 0 on any failure.
///
/// Store files written by older versions may hold garbage in numeric
/// columns; those load as 0 instead of failing the whole file.
pub fn parse_int_or_default(text: &str) -> i32 {
    text.trim().parse::<i32>().unwrap_or(0)
}

/// Decode one store line. Returns `None` for a malformed line.
pub fn decode_line(line: &str, delimiter: char) -> Option<Task> {
    let line = line.trim_end_matches(['\n', '\r']);
    let mut fields = line.splitn(4, delimiter);

    let name = fields.next().filter(|f| !f.is_empty())?;
    let description = fields.next().filter(|f| !f.is_empty())?;
    let priority = fields.next().filter(|f| !f.is_empty())?;
    let status = fields.next().filter(|f| !f.is_empty())?;

    Some(Task::from_raw(
        name.to_string(),
        description.to_string(),
        parse_int_or_default(priority),
        parse_int_or_default(status),
    ))
}

/// Encode one task as a store line, including the trailing newline.
pub fn encode_line(task: &Task, delimiter: char) -> String {
    format!(
        "{name}{d}{description}{d}{priority}{d}{status}\n",
        name = task.name,
        description = task.description,
        priority = task.priority,
        status = task.status,
        d = delimiter,
    )
}

/// Decode a whole store file body, preserving line order.
pub fn decode(content: &str, delimiter: char) -> TaskList {
    let mut list = TaskList::new();
    for (idx, line) in content.lines().enumerate() {
        match decode_line(line, delimiter) {
            Some(task) => list.push_back(task),
            None => debug!(line = idx + 1, "Skipping malformed task line"),
        }
    }
    list
}

/// Encode a list in its current order.
pub fn encode(list: &TaskList, delimiter: char) -> String {
    list.iter().map(|t| encode_line(t, delimiter)).collect()
}

/// Read a store file into a list.
///
/// Any failure to open or read the file is returned as
/// [`TaskError::ResourceUnavailable`]. Invalid UTF-8 is not a read failure:
/// the line is decoded lossily so the rest of the file still loads.
pub fn load_list(path: &Path, delimiter: char) -> Result<TaskList, TaskError> {
    let unavailable = |source| TaskError::ResourceUnavailable {
        path: path.to_path_buf(),
        source,
    };

    let file = fs::File::open(path).map_err(unavailable)?;
    let mut reader = BufReader::new(file);
    let mut list = TaskList::new();
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).map_err(unavailable)? == 0 {
            break;
        }
        line_no += 1;

        let line = String::from_utf8_lossy(&buf);
        if std::str::from_utf8(&buf).is_err() {
            debug!(
                path = %path.display(),
                line = line_no,
                "Replaced invalid UTF-8 in task line"
            );
        }
        match decode_line(&line, delimiter) {
            Some(task) => list.push_back(task),
            None => debug!(
                path = %path.display(),
                line = line_no,
                "Skipping malformed task line"
            ),
        }
    }

    debug!(path = %path.display(), tasks = list.len(), "Loaded store file");
    Ok(list)
}

/// Write a list to a store file, truncating previous contents.
pub fn save_list(path: &Path, list: &TaskList, delimiter: char) -> Result<(), TaskError> {
    let unavailable = |source| TaskError::ResourceUnavailable {
        path: path.to_path_buf(),
        source,
    };

    let file = fs::File::create(path).map_err(unavailable)?;
    let mut writer = BufWriter::new(file);
    for task in list {
        writer
            .write_all(encode_line(task, delimiter).as_bytes())
            .map_err(unavailable)?;
    }
    writer.flush().map_err(unavailable)?;

    debug!(path = %path.display(), tasks = list.len(), "Saved store file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn task(name: &str, description: &str, priority: i32, status: i32) -> Task {
        Task::new(name, description, priority, status).unwrap()
    }

    #[test]
    fn test_parse_int_or_default() {
        assert_eq!(parse_int_or_default("2"), 2);
        assert_eq!(parse_int_or_default(" 3 "), 3);
        assert_eq!(parse_int_or_default("-1"), -1);
        assert_eq!(parse_int_or_default("x"), 0);
        assert_eq!(parse_int_or_default(""), 0);
        assert_eq!(parse_int_or_default("1#extra"), 0);
    }

    #[test]
    fn test_decode_line() {
        let t = decode_line("Write report#Quarterly summary#1#0\n", '#').unwrap();
        assert_eq!(t.name, "Write report");
        assert_eq!(t.description, "Quarterly summary");
        assert_eq!(t.priority, 1);
        assert_eq!(t.status, 0);
    }

    #[test]
    fn test_decode_line_crlf() {
        let t = decode_line("a#b#2#1\r\n", '#').unwrap();
        assert_eq!(t.priority, 2);
        assert_eq!(t.status, 1);
    }

    #[test]
    fn test_decode_line_missing_fields() {
        assert!(decode_line("a#b#1", '#').is_none());
        assert!(decode_line("", '#').is_none());
        assert!(decode_line("#b#1#0", '#').is_none());
        assert!(decode_line("a##1#0", '#').is_none());
    }

    #[test]
    fn test_decode_line_empty_numeric_fields() {
        assert!(decode_line("a#b##0", '#').is_none());
        assert!(decode_line("a#b#1#", '#').is_none());
        assert!(decode_line("a#b##", '#').is_none());
    }

    #[test]
    fn test_decode_line_bad_numbers_become_zero() {
        let t = decode_line("a#b#high#done", '#').unwrap();
        assert_eq!(t.priority, 0);
        assert_eq!(t.status, 0);
    }

    #[test]
    fn test_encode_line() {
        let t = task("Write report", "Quarterly summary", 1, 0);
        assert_eq!(encode_line(&t, '#'), "Write report#Quarterly summary#1#0\n");
        assert_eq!(encode_line(&t, '|'), "Write report|Quarterly summary|1|0\n");
    }

    #[test]
    fn test_decode_skips_malformed_lines() {
        let list = decode("good#desc#1#0\nbad#desc#2\n", '#');
        assert_eq!(list.names(), vec!["good"]);
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("todo.txt");

        let list: TaskList = vec![
            task("c", "third", 3, 0),
            task("a", "first", 1, 0),
            task("b", "second, with spaces", 2, 0),
        ]
        .into();

        save_list(&path, &list, '#').unwrap();
        let loaded = load_list(&path, '#').unwrap();
        assert_eq!(loaded, list);
    }

    #[test]
    fn test_save_truncates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("todo.txt");

        let long: TaskList = vec![task("a", "d", 1, 0), task("b", "d", 1, 0)].into();
        save_list(&path, &long, '#').unwrap();
        save_list(&path, &TaskList::new(), '#').unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_load_keeps_lines_around_invalid_utf8() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("todo.txt");
        let mut bytes = b"Keep me#important#1#0\n".to_vec();
        bytes.extend_from_slice(b"caf\xe9#latin1#2#0\n");
        bytes.extend_from_slice(b"Also kept#after#3#0\n");
        std::fs::write(&path, bytes).unwrap();

        let list = load_list(&path, '#').unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.iter().next().unwrap().name, "Keep me");
        let latin = list.iter().nth(1).unwrap();
        assert_eq!(latin.name, "caf\u{FFFD}");
        assert_eq!(latin.priority, 2);
        assert_eq!(list.iter().nth(2).unwrap().name, "Also kept");
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = load_list(&temp.path().join("nope.txt"), '#').unwrap_err();
        assert!(err.is_missing_file());
    }

    #[test]
    fn test_save_to_unwritable_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing-dir").join("todo.txt");
        let err = save_list(&path, &TaskList::new(), '#').unwrap_err();
        assert!(matches!(err, TaskError::ResourceUnavailable { .. }));
    }
}
