//! The three stage files of a data directory.
//!
//! Every command runs one cycle against the store: [`TaskStore::load_all`]
//! at the start, [`TaskStore::save_all`] at the end. Neither aborts on a
//! single bad file; failures come back as notices for the operator.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::board::Board;
use crate::config::Config;
use crate::error::TaskError;
use crate::fs::codec::{load_list, save_list};
use crate::models::{Stage, TaskList};

#[derive(Debug, Clone)]
pub struct TaskStore {
    data_dir: PathBuf,
    config: Config,
}

impl TaskStore {
    pub fn new<P: AsRef<Path>>(data_dir: P, config: Config) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            config,
        }
    }

    /// Open a data directory using its configuration file, if any.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self, TaskError> {
        let config = Config::load(data_dir.as_ref())?;
        Ok(Self::new(data_dir, config))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path of the store file backing `stage`
    pub fn stage_path(&self, stage: Stage) -> PathBuf {
        self.data_dir.join(self.config.files.for_stage(stage))
    }

    /// Load all three stages.
    ///
    /// A file that cannot be read yields an empty list for its stage and a
    /// notice in the returned vector; the stage is marked unreadable so the
    /// following save leaves its file alone. A missing file is the normal
    /// first-run state and is only logged.
    pub fn load_all(&self) -> (Board, Vec<TaskError>) {
        let mut board = Board::with_delimiter(self.config.delimiter);
        let mut notices = Vec::new();

        for stage in Stage::all() {
            let path = self.stage_path(*stage);
            let list = match load_list(&path, self.config.delimiter) {
                Ok(list) => list,
                Err(e) if e.is_missing_file() => {
                    info!(path = %path.display(), "No store file yet, starting empty");
                    TaskList::new()
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load stage, starting empty");
                    notices.push(e);
                    board.mark_unreadable(*stage);
                    TaskList::new()
                }
            };
            *board.list_mut(*stage) = list;
        }

        (board, notices)
    }

    /// Save all three stages, continuing past failures.
    ///
    /// Stages that failed to load are skipped. Skipping is only reported
    /// when the session put tasks into such a stage, since those are lost.
    /// Returns one error per file that could not be written.
    pub fn save_all(&self, board: &Board) -> Vec<TaskError> {
        let mut failures = Vec::new();

        for stage in Stage::all() {
            let path = self.stage_path(*stage);
            if board.is_unreadable(*stage) {
                warn!(path = %path.display(), "Stage failed to load, not overwriting");
                if !board.list(*stage).is_empty() {
                    failures.push(TaskError::NotSaved {
                        stage: *stage,
                        path,
                    });
                }
                continue;
            }
            if let Err(e) = save_list(&path, board.list(*stage), self.config.delimiter) {
                warn!(error = %e, "Failed to save stage");
                failures.push(e);
            }
        }

        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_all_first_run_is_empty_without_notices() {
        let temp = TempDir::new().unwrap();
        let store = TaskStore::new(temp.path(), Config::default());

        let (board, notices) = store.load_all();
        assert!(board.is_empty());
        assert!(notices.is_empty());
    }

    #[test]
    fn test_save_all_writes_each_stage_file() {
        let temp = TempDir::new().unwrap();
        let store = TaskStore::new(temp.path(), Config::default());

        let (mut board, _) = store.load_all();
        board.add("A", "first", 1, 0).unwrap();
        board.add("B", "second", 2, 2).unwrap();
        assert!(store.save_all(&board).is_empty());

        assert_eq!(
            fs::read_to_string(temp.path().join("todo.txt")).unwrap(),
            "A#first#1#0\n"
        );
        assert_eq!(
            fs::read_to_string(temp.path().join("in_progress.txt")).unwrap(),
            ""
        );
        assert_eq!(
            fs::read_to_string(temp.path().join("done.txt")).unwrap(),
            "B#second#2#2\n"
        );
    }

    #[test]
    fn test_save_all_continues_past_failures() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.files.in_progress = "no-such-dir/in_progress.txt".to_string();
        let store = TaskStore::new(temp.path(), config);

        let (board, _) = store.load_all();
        let failures = store.save_all(&board);

        assert_eq!(failures.len(), 1);
        assert!(temp.path().join("todo.txt").exists());
        assert!(temp.path().join("done.txt").exists());
    }

    #[test]
    fn test_load_all_reports_unreadable_file() {
        let temp = TempDir::new().unwrap();
        // A directory where a file is expected cannot be read as a store file
        fs::create_dir(temp.path().join("done.txt")).unwrap();
        fs::write(temp.path().join("todo.txt"), "A#d#1#0\n").unwrap();
        let store = TaskStore::new(temp.path(), Config::default());

        let (board, notices) = store.load_all();
        assert_eq!(notices.len(), 1);
        assert_eq!(board.list(Stage::NotStarted).names(), vec!["A"]);
        assert!(board.list(Stage::Completed).is_empty());
        assert!(board.is_unreadable(Stage::Completed));
        assert!(!board.is_unreadable(Stage::NotStarted));
    }

    #[test]
    fn test_save_all_leaves_unreadable_stage_untouched() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("done.txt")).unwrap();
        let store = TaskStore::new(temp.path(), Config::default());

        let (board, _) = store.load_all();
        assert!(store.save_all(&board).is_empty());
        assert!(temp.path().join("done.txt").is_dir());
        assert!(temp.path().join("todo.txt").is_file());
    }

    #[test]
    fn test_save_all_reports_tasks_added_to_unreadable_stage() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("done.txt")).unwrap();
        let store = TaskStore::new(temp.path(), Config::default());

        let (mut board, _) = store.load_all();
        board.add("Late", "d", 2, 2).unwrap();
        let failures = store.save_all(&board);

        assert_eq!(failures.len(), 1);
        assert!(matches!(
            failures[0],
            TaskError::NotSaved {
                stage: Stage::Completed,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_utf8_line_survives_a_cycle() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("todo.txt");
        let mut bytes = b"Keep me#important#1#0\n".to_vec();
        bytes.extend_from_slice(b"caf\xe9#latin1#2#0\n");
        fs::write(&path, bytes).unwrap();
        let store = TaskStore::new(temp.path(), Config::default());

        let (board, notices) = store.load_all();
        assert!(notices.is_empty());
        assert!(store.save_all(&board).is_empty());

        let saved = fs::read_to_string(&path).unwrap();
        assert!(saved.starts_with("Keep me#important#1#0\n"));
        assert!(saved.contains("#latin1#2#0\n"));
    }

    #[test]
    fn test_custom_delimiter_and_file_names() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.delimiter = '|';
        config.files.todo = "backlog.txt".to_string();
        let store = TaskStore::new(temp.path(), config);

        let (mut board, _) = store.load_all();
        board.add("Tag #1", "uses hash", 1, 0).unwrap();
        store.save_all(&board);

        assert_eq!(
            fs::read_to_string(temp.path().join("backlog.txt")).unwrap(),
            "Tag #1|uses hash|1|0\n"
        );
        let (reloaded, _) = store.load_all();
        assert_eq!(reloaded.list(Stage::NotStarted).names(), vec!["Tag #1"]);
    }
}
