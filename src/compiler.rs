use crate::draft::{Draft, Segment, TextMaterial};
use crate::markup::clean;
use crate::srt::Cue;

use std::collections::HashMap;

use log::{debug, info};

/// Turns the text tracks of a draft into a numbered cue sequence.
///
/// Tracks and segments are visited in declaration order. A material with
/// word timings yields one cue per word; otherwise the segment's timerange
/// yields a single cue. Segments pointing at an unknown material are skipped
/// without using up an index.
pub fn compile(draft: &Draft) -> Vec<Cue> {
    let materials = material_index(&draft.materials.texts);
    let mut cues = Vec::new();

    for track in draft.text_tracks() {
        for segment in &track.segments {
            match materials.get(segment.material_id.as_str()) {
                Some(material) => emit_segment(&mut cues, segment, material),
                None => debug!(
                    "Skipping segment with unknown material '{}'",
                    segment.material_id
                ),
            }
        }
    }

    info!(
        "Compiled {} cues from {} text tracks",
        cues.len(),
        draft.text_tracks().count()
    );
    generate_seqnum(cues)
}

/// Materials by id. When ids repeat, the last material with that id wins.
fn material_index(texts: &[TextMaterial]) -> HashMap<&str, &TextMaterial> {
    texts.iter().map(|m| (m.id.as_str(), m)).collect()
}

fn emit_segment(cues: &mut Vec<Cue>, segment: &Segment, material: &TextMaterial) {
    if material.words.is_empty() {
        let range = segment.timerange();
        cues.push(Cue {
            index: 0,
            start: range.start,
            end: range.end(),
            text: clean(&material.content),
        });
    } else {
        cues.extend(material.words.iter().map(|word| Cue {
            index: 0,
            start: word.begin,
            end: word.end,
            text: clean(&word.text),
        }));
    }
}

fn generate_seqnum(cues: Vec<Cue>) -> Vec<Cue> {
    let mut seqnum = 0;
    cues.into_iter()
        .map(|mut c| {
            seqnum += 1;
            c.index = seqnum;
            c
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn draft(value: Value) -> Draft {
        Draft::from_slice(value.to_string().as_bytes()).unwrap()
    }

    fn cue(index: usize, start: i64, end: i64, text: &str) -> Cue {
        Cue {
            index,
            start,
            end,
            text: text.to_string(),
        }
    }

    #[test]
    fn word_timing_overrides_segment() {
        let d = draft(json!({
            "materials": {"texts": [{
                "id": "m1",
                "content": "ignored",
                "words": [
                    {"begin": 100_000, "end": 400_000, "text": "<b>Hello</b>"},
                    {"begin": 400_000, "end": 900_000, "text": "[world]"}
                ]
            }]},
            "tracks": [{"type": "text", "segments": [
                {"material_id": "m1", "target_timerange": {"start": 5_000_000, "duration": 1_000_000}}
            ]}]
        }));

        assert_eq!(
            compile(&d),
            vec![
                cue(1, 100_000, 400_000, "Hello"),
                cue(2, 400_000, 900_000, "world"),
            ]
        );
    }

    #[test]
    fn segment_timing_without_words() {
        let d = draft(json!({
            "materials": {"texts": [{"id": "m1", "content": "<size=5>[Hi &lt;3]</size>", "words": []}]},
            "tracks": [{"type": "text", "segments": [
                {"material_id": "m1", "target_timerange": {"start": 2_000_000, "duration": 1_500_000}}
            ]}]
        }));

        assert_eq!(compile(&d), vec![cue(1, 2_000_000, 3_500_000, "Hi <3")]);
    }

    #[test]
    fn unknown_material_does_not_use_an_index() {
        let d = draft(json!({
            "materials": {"texts": [{"id": "m1", "content": "real"}]},
            "tracks": [{"type": "text", "segments": [
                {"material_id": "missing", "target_timerange": {"start": 0, "duration": 1}},
                {"material_id": "m1", "target_timerange": {"start": 10, "duration": 1}}
            ]}]
        }));

        assert_eq!(compile(&d), vec![cue(1, 10, 11, "real")]);
    }

    #[test]
    fn only_unknown_material_yields_nothing() {
        let d = draft(json!({
            "materials": {"texts": []},
            "tracks": [{"type": "text", "segments": [{"material_id": "nope"}]}]
        }));

        assert!(compile(&d).is_empty());
    }

    #[test]
    fn index_runs_across_tracks_and_skips_other_kinds() {
        let d = draft(json!({
            "materials": {"texts": [
                {"id": "a", "content": "A"},
                {"id": "b", "content": "B"}
            ]},
            "tracks": [
                {"type": "text", "segments": [{"material_id": "a", "target_timerange": {"start": 0, "duration": 1_000}}]},
                {"type": "video", "segments": [{"material_id": "a", "target_timerange": {"start": 0, "duration": 1_000}}]},
                {"type": "text", "segments": []},
                {"type": "text", "segments": [{"material_id": "b", "target_timerange": {"start": 5_000, "duration": 1_000}}]}
            ]
        }));

        assert_eq!(
            compile(&d),
            vec![cue(1, 0, 1_000, "A"), cue(2, 5_000, 6_000, "B")]
        );
    }

    #[test]
    fn last_duplicate_material_wins() {
        let d = draft(json!({
            "materials": {"texts": [
                {"id": "dup", "content": "first"},
                {"id": "dup", "content": "second"}
            ]},
            "tracks": [{"type": "text", "segments": [
                {"material_id": "dup", "target_timerange": {"start": 0, "duration": 1}}
            ]}]
        }));

        assert_eq!(compile(&d)[0].text, "second");
    }

    #[test]
    fn segment_near_the_time_limit() {
        let d = draft(json!({
            "materials": {"texts": [{"id": "m1", "content": "late"}]},
            "tracks": [{"type": "text", "segments": [
                {"material_id": "m1", "target_timerange": {"start": 9_223_372_036_854_775_000_i64, "duration": 1_000_000}}
            ]}]
        }));

        assert_eq!(
            compile(&d),
            vec![cue(1, 9_223_372_036_854_775_000, i64::MAX, "late")]
        );
    }

    #[test]
    fn empty_draft() {
        assert!(compile(&Draft::default()).is_empty());
    }
}
