//! JSON-backed preset storage.
//!
//! A preset is a named segment list. Presets live in a single JSON document
//! (`{"presets": [{"name", "segments"}]}`) at
//! `~/.config/timeflow/presets.json`, upserted by name. The core timer never
//! touches this file; the CLI resolves presets into a [`SegmentSequence`]
//! before handing the engine a total.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::PresetError;
use crate::timer::{Segment, SegmentSequence};

/// A named, persisted segment list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PresetFile {
    #[serde(default)]
    presets: Vec<Preset>,
}

/// Loads and saves presets at a fixed path.
#[derive(Debug, Clone)]
pub struct PresetStore {
    path: PathBuf,
}

impl PresetStore {
    /// Store at the default location inside the data directory.
    pub fn open() -> Result<Self, PresetError> {
        Ok(Self {
            path: data_dir()?.join("presets.json"),
        })
    }

    /// Store at an explicit path (tests).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All presets. A missing file is an empty store, not an error.
    pub fn load(&self) -> Result<Vec<Preset>, PresetError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&self.path).map_err(|e| PresetError::LoadFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        let file: PresetFile =
            serde_json::from_str(&raw).map_err(|e| PresetError::LoadFailed {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        Ok(file.presets)
    }

    /// Look up a preset by name.
    pub fn get(&self, name: &str) -> Result<Option<Preset>, PresetError> {
        Ok(self.load()?.into_iter().find(|p| p.name == name))
    }

    /// Save a preset, overwriting an existing one with the same name.
    /// Segments are sanitized on the way in (blank names, negative minutes).
    pub fn save(&self, name: &str, segments: &[Segment]) -> Result<(), PresetError> {
        let sanitized = SegmentSequence::from_segments(segments.to_vec())
            .segments()
            .to_vec();
        let mut presets = self.load()?;
        match presets.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.segments = sanitized,
            None => presets.push(Preset {
                name: name.to_string(),
                segments: sanitized,
            }),
        }
        self.write(presets)
    }

    /// Delete a preset by name. Returns whether anything was removed.
    pub fn delete(&self, name: &str) -> Result<bool, PresetError> {
        let mut presets = self.load()?;
        let before = presets.len();
        presets.retain(|p| p.name != name);
        if presets.len() == before {
            return Ok(false);
        }
        self.write(presets)?;
        Ok(true)
    }

    fn write(&self, presets: Vec<Preset>) -> Result<(), PresetError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PresetError::SaveFailed {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        }
        let raw = serde_json::to_string_pretty(&PresetFile { presets }).map_err(|e| {
            PresetError::SaveFailed {
                path: self.path.clone(),
                message: e.to_string(),
            }
        })?;
        std::fs::write(&self.path, raw).map_err(|e| PresetError::SaveFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, PresetStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::with_path(dir.path().join("presets.json"));
        (dir, store)
    }

    #[test]
    fn missing_file_loads_empty() {
        let (_dir, store) = store();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_and_get_round_trip() {
        let (_dir, store) = store();
        let segments = vec![Segment::new("Work", 25.0), Segment::new("Break", 5.0)];
        store.save("pomodoro", &segments).unwrap();

        let loaded = store.get("pomodoro").unwrap().unwrap();
        assert_eq!(loaded.segments, segments);
        assert!(store.get("unknown").unwrap().is_none());
    }

    #[test]
    fn save_upserts_by_name() {
        let (_dir, store) = store();
        store.save("a", &[Segment::new("One", 1.0)]).unwrap();
        store.save("b", &[Segment::new("Two", 2.0)]).unwrap();
        store.save("a", &[Segment::new("Changed", 3.0)]).unwrap();

        let presets = store.load().unwrap();
        assert_eq!(presets.len(), 2);
        assert_eq!(presets[0].name, "a");
        assert_eq!(presets[0].segments[0].name, "Changed");
    }

    #[test]
    fn segments_are_sanitized_on_save() {
        let (_dir, store) = store();
        store
            .save(
                "messy",
                &[Segment {
                    name: "   ".into(),
                    minutes: -5.0,
                }],
            )
            .unwrap();
        let loaded = store.get("messy").unwrap().unwrap();
        assert_eq!(loaded.segments[0].name, crate::timer::DEFAULT_SEGMENT_NAME);
        assert_eq!(loaded.segments[0].minutes, 0.0);
    }

    #[test]
    fn delete_removes_only_the_named_preset() {
        let (_dir, store) = store();
        store.save("keep", &[Segment::new("K", 1.0)]).unwrap();
        store.save("drop", &[Segment::new("D", 1.0)]).unwrap();

        assert!(store.delete("drop").unwrap());
        assert!(!store.delete("drop").unwrap());

        let presets = store.load().unwrap();
        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0].name, "keep");
    }
}
