//! Flat-text persistence for obstacles, scores and settings.
//!
//! Every store is read whole and rewritten whole. A missing file reads as empty and
//! lines that do not parse are skipped, so a hand-edited file never stops the game.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::{MAX_OBSTACLES, Position};
use crate::scores::ScoreEntry;

/// Persisted user preferences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    pub show_grid: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { show_grid: true }
    }
}

fn read_store(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::Read { path: path.to_path_buf(), source }),
    }
}

fn write_store(path: &Path, contents: &str) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    let write_err = |source| Error::Write { path: path.to_path_buf(), source };
    fs::write(&tmp, contents).map_err(write_err)?;
    fs::rename(&tmp, path).map_err(|source| {
        let _ = fs::remove_file(&tmp);
        write_err(source)
    })
}

/// Splits a line into exactly two tokens.
fn two_tokens(line: &str) -> Option<(&str, &str)> {
    let mut tokens = line.split_whitespace();
    let pair = (tokens.next()?, tokens.next()?);
    if tokens.next().is_some() { None } else { Some(pair) }
}

pub fn parse_obstacles(text: &str) -> Vec<Position> {
    let mut seen = HashSet::new();
    let mut obstacles = Vec::new();
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        if obstacles.len() >= MAX_OBSTACLES {
            break;
        }
        let parsed = two_tokens(line).and_then(|(x, y)| Some(Position::new(x.parse().ok()?, y.parse().ok()?)));
        match parsed {
            Some(pos) if pos.in_bounds() => {
                if seen.insert(pos) {
                    obstacles.push(pos);
                }
            }
            _ => debug!("skipping obstacle record {:?}", line),
        }
    }
    obstacles
}

pub fn load_obstacles(path: &Path) -> Result<Vec<Position>> {
    Ok(read_store(path)?.map(|text| parse_obstacles(&text)).unwrap_or_default())
}

/// Raw `name score` records in file order; duplicates are kept.
pub fn parse_scores(text: &str) -> Vec<ScoreEntry> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|line| {
            let entry = two_tokens(line)
                .and_then(|(name, score)| Some(ScoreEntry::new(name, score.parse().ok()?)));
            if entry.is_none() {
                debug!("skipping score record {:?}", line);
            }
            entry
        })
        .collect()
}

pub fn load_scores(path: &Path) -> Result<Vec<ScoreEntry>> {
    Ok(read_store(path)?.map(|text| parse_scores(&text)).unwrap_or_default())
}

pub fn save_scores(path: &Path, entries: &[ScoreEntry]) -> Result<()> {
    let contents: String = entries
        .iter()
        .map(|e| format!("{} {}\n", e.name, e.score))
        .collect();
    write_store(path, &contents)
}

pub fn parse_settings(text: &str) -> Option<Settings> {
    let show_grid = match text.split_whitespace().next()? {
        "1" | "true" => true,
        "0" | "false" => false,
        _ => return None,
    };
    Some(Settings { show_grid })
}

/// Returns defaults when the file is missing or its token is not a boolean.
pub fn load_settings(path: &Path) -> Result<Settings> {
    Ok(read_store(path)?
        .and_then(|text| parse_settings(&text))
        .unwrap_or_default())
}

pub fn save_settings(path: &Path, settings: Settings) -> Result<()> {
    write_store(path, if settings.show_grid { "1" } else { "0" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GRID_HEIGHT, GRID_WIDTH};
    use crate::test_support::ScratchDir;

    #[test]
    fn test_parse_obstacles_skips_bad_records() {
        let text = format!("1 2\nfoo 3\n-1 4\n{} 0\n5 {}\n\n7 8 9\n3 3\n1 2\n", GRID_WIDTH, GRID_HEIGHT);
        let obstacles = parse_obstacles(&text);
        assert_eq!(obstacles, vec![Position::new(1, 2), Position::new(3, 3)]);
    }

    #[test]
    fn test_parse_obstacles_caps_count() {
        let text: String = (0..GRID_WIDTH)
            .flat_map(|x| (0..GRID_HEIGHT).map(move |y| format!("{} {}\n", x, y)))
            .collect();
        assert_eq!(parse_obstacles(&text).len(), MAX_OBSTACLES);
    }

    #[test]
    fn test_parse_scores_keeps_duplicates_and_skips_garbage() {
        let entries = parse_scores("x 10\nbroken\nx 20\ny -5\nz 7 extra\nw 3\n");
        assert_eq!(
            entries,
            vec![ScoreEntry::new("x", 10), ScoreEntry::new("x", 20), ScoreEntry::new("w", 3)]
        );
    }

    #[test]
    fn test_missing_files_read_as_empty() {
        let dir = ScratchDir::new("store_missing");
        assert!(load_obstacles(&dir.path("obstacles.txt")).unwrap().is_empty());
        assert!(load_scores(&dir.path("scores.txt")).unwrap().is_empty());
        assert_eq!(load_settings(&dir.path("settings.txt")).unwrap(), Settings::default());
    }

    #[test]
    fn test_scores_save_then_load() {
        let dir = ScratchDir::new("store_scores");
        let path = dir.path("scores.txt");
        let entries = vec![ScoreEntry::new("a", 50), ScoreEntry::new("b", 30)];
        save_scores(&path, &entries).unwrap();
        assert_eq!(load_scores(&path).unwrap(), entries);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a 50\nb 30\n");
    }

    #[test]
    fn test_settings_round_trip_and_formats() {
        let dir = ScratchDir::new("store_settings");
        let path = dir.path("settings.txt");
        save_settings(&path, Settings { show_grid: false }).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "0");
        assert!(!load_settings(&path).unwrap().show_grid);

        assert_eq!(parse_settings("true\n"), Some(Settings { show_grid: true }));
        assert_eq!(parse_settings("maybe"), None);
        fs::write(&path, "garbage").unwrap();
        assert!(load_settings(&path).unwrap().show_grid);
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = ScratchDir::new("store_rename_fail");
        let target = dir.path("scores.txt");
        fs::create_dir_all(target.join("occupied")).unwrap();
        let result = save_scores(&target, &[ScoreEntry::new("a", 1)]);
        assert!(matches!(result, Err(Error::Write { .. })));
        assert!(!dir.path("scores.txt.tmp").exists());
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = ScratchDir::new("store_write_fail");
        let path = dir.path("no_such_dir/scores.txt");
        let result = save_scores(&path, &[ScoreEntry::new("a", 1)]);
        assert!(matches!(result, Err(Error::Write { .. })));
    }
}
