/// A single rendered subtitle. Times are in microseconds, the draft's unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    pub(crate) index: usize,
    pub(crate) start: i64,
    pub(crate) end: i64,
    pub(crate) text: String,
}
