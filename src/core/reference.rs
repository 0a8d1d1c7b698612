use std::ops::Range;

/// Bases of a single contig, uppercased on construction and indexed from 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSequence {
    name: String,
    bases: Vec<u8>,
}

impl ReferenceSequence {
    pub fn new(name: impl Into<String>, bases: impl AsRef<[u8]>) -> Self {
        ReferenceSequence {
            name: name.into(),
            bases: bases.as_ref().to_ascii_uppercase(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Bases in the half-open 0-based interval `[start, end)`, or `None` when any part
    /// of it lies outside the sequence.
    pub fn slice(&self, start: i64, end: i64) -> Option<&[u8]> {
        let range = self.checked_range(start, end)?;
        self.bases.get(range)
    }

    fn checked_range(&self, start: i64, end: i64) -> Option<Range<usize>> {
        if start < 0 || end < start {
            return None;
        }
        let (start, end) = (usize::try_from(start).ok()?, usize::try_from(end).ok()?);
        (end <= self.bases.len()).then_some(start..end)
    }
}
