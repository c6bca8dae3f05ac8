//! Command Resolution
//!
//! Maintains the executable map: basename -> absolute path for every
//! executable regular file in the `PATH` directories. The map is
//! authoritative only for the most recent observation of `PATH`, so any
//! mutation of `PATH` marks it dirty and the next lookup rebuilds it.

use std::collections::HashMap;
use std::fs;
use std::os::unix::fs::PermissionsExt;

/// Check if a file mode has any execute bit set
pub fn is_executable_mode(mode: u32) -> bool {
    (mode & 0o111) != 0
}

/// Split PATH into individual directories
pub fn split_path(path_env: &str) -> Vec<&str> {
    path_env.split(':').filter(|s| !s.is_empty()).collect()
}

/// Check if a command name contains a path separator (making it a path
/// reference that bypasses the map)
pub fn is_path_command(command_name: &str) -> bool {
    command_name.contains('/')
}

/// Basename -> absolute path map over the `PATH` directories.
#[derive(Debug, Clone)]
pub struct ExecutableMap {
    map: HashMap<String, String>,
    dirty: bool,
}

impl Default for ExecutableMap {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
            dirty: true,
        }
    }
}

impl ExecutableMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate the map; the next lookup rebuilds it.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Rebuild from the current `PATH`.
    pub fn refresh(&mut self) {
        let path = std::env::var("PATH").unwrap_or_default();
        self.refresh_from(&path);
    }

    /// Rebuild from an explicit `:`-separated directory list. Earlier
    /// directories win for duplicate basenames.
    pub fn refresh_from(&mut self, path_env: &str) {
        self.map.clear();
        for dir in split_path(path_env) {
            self.scan_dir(dir);
        }
        self.dirty = false;
    }

    fn scan_dir(&mut self, dir: &str) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => return,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            // Follow symlinks so linked executables resolve too.
            let meta = match fs::metadata(&path) {
                Ok(meta) => meta,
                Err(_) => continue,
            };
            if !meta.is_file() || !is_executable_mode(meta.permissions().mode()) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                self.map
                    .entry(name.to_string())
                    .or_insert_with(|| path.to_string_lossy().into_owned());
            }
        }
    }

    /// Look up a basename, rebuilding first if `PATH` changed.
    pub fn lookup(&mut self, name: &str) -> Option<String> {
        if self.dirty {
            self.refresh();
        }
        self.map.get(name).cloned()
    }

    /// Lookup without triggering a rebuild.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Resolve a command word to the value handed to `execv`: explicit paths
/// pass through, known basenames expand to their absolute path, and
/// anything else is passed on verbatim (the spawn failure reports it).
pub fn resolve_command(map: &mut ExecutableMap, word: &str) -> String {
    if is_path_command(word) {
        return word.to_string();
    }
    match map.lookup(word) {
        Some(path) => path,
        None => word.to_string(),
    }
}
