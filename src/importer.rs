//! Building a draft from existing subtitles.

use crate::draft::{Draft, Materials, Segment, TextMaterial, Timerange, Track, TEXT_TRACK};
use crate::srt::Cue;

use serde_json::{json, Map, Value};
use uuid::Uuid;

const FPS: f64 = 30.0;

/// Creates a draft with one text segment per cue, in cue order.
///
/// The draft also gets an empty video track, which the editor expects to
/// find. Cue text is wrapped in the editor's styling markup and escaped so
/// that rendering the draft gives the text back.
pub fn import(cues: &[Cue]) -> Draft {
    let mut texts = Vec::with_capacity(cues.len());
    let mut segments = Vec::with_capacity(cues.len());

    for cue in cues {
        let material_id = new_id();
        texts.push(TextMaterial {
            id: material_id.clone(),
            content: styled(&cue.text),
            words: Vec::new(),
            extra: fields(json!({ "type": "subtitle" })),
        });
        segments.push(Segment {
            material_id,
            target_timerange: Some(Timerange {
                start: cue.start,
                duration: cue.end - cue.start,
                extra: Map::new(),
            }),
            extra: fields(json!({ "id": new_id(), "visible": true })),
        });
    }

    let duration = cues.iter().map(|c| c.end).max().unwrap_or(0);

    Draft {
        materials: Materials {
            texts,
            extra: Map::new(),
        },
        tracks: vec![track("video", Vec::new()), track(TEXT_TRACK, segments)],
        extra: fields(json!({
            "id": new_id(),
            "duration": duration,
            "fps": FPS,
        })),
    }
}

fn track(kind: &str, segments: Vec<Segment>) -> Track {
    Track {
        kind: kind.to_string(),
        segments,
        extra: fields(json!({ "id": new_id() })),
    }
}

fn styled(text: &str) -> String {
    let escaped = text.replace('<', "&lt;").replace('>', "&gt;");
    format!(
        "<font id=\"\" path=\"\"><color=(1.000000, 1.000000, 1.000000, 1.000000)><size=5.000000>[{}]</size></color></font>",
        escaped
    )
}

fn new_id() -> String {
    Uuid::new_v4().to_string().to_uppercase()
}

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
