//! Serde model of the editor's draft file.
//!
//! Only the fields the program reads or edits are typed. Everything else is
//! kept in the `extra` maps so that a draft written back out carries the same
//! fields it was read with.

use crate::error::DraftError;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const TEXT_TRACK: &str = "text";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    #[serde(default)]
    pub materials: Materials,
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Materials {
    #[serde(default)]
    pub texts: Vec<TextMaterial>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextMaterial {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub content: String,
    /// Word-level timings. Empty means the segment's timerange applies.
    #[serde(default)]
    pub words: Vec<Word>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Word {
    #[serde(default)]
    pub begin: i64,
    #[serde(default)]
    pub end: i64,
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Track {
    pub fn is_text(&self) -> bool {
        self.kind == TEXT_TRACK
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub material_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_timerange: Option<Timerange>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Segment {
    /// The segment's placement, or an empty range at zero when the draft has none.
    pub fn timerange(&self) -> Timerange {
        self.target_timerange.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timerange {
    #[serde(default)]
    pub start: i64,
    #[serde(default)]
    pub duration: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Timerange {
    pub fn end(&self) -> i64 {
        self.start.saturating_add(self.duration)
    }
}

impl Draft {
    pub fn from_slice(data: &[u8]) -> Result<Draft, DraftError> {
        Ok(serde_json::from_slice(data)?)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, DraftError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn text_tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter().filter(|t| t.is_text())
    }

    pub fn text_tracks_mut(&mut self) -> impl Iterator<Item = &mut Track> {
        self.tracks.iter_mut().filter(|t| t.is_text())
    }
}
