//! Sort state and stable ordering.

use super::field::Field;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9, oldest first).
    Asc,
    /// Descending order (Z-A, 9-0, newest first).
    Desc,
}

impl Direction {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    /// Header indicator for this direction.
    pub fn indicator(self) -> &'static str {
        match self {
            Direction::Asc => "▲",
            Direction::Desc => "▼",
        }
    }
}

/// The active sort: one field and a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub key: String,
    pub direction: Direction,
}

impl Sort {
    /// Ascending sort on a field.
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Asc,
        }
    }

    /// Descending sort on a field.
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Desc,
        }
    }
}

/// Row indices of `rows` ordered by `field` in `direction`.
///
/// Values are read once per row, then ordered with a stable sort: rows with
/// equal values keep their source order in both directions, so ascending
/// and descending are exact reverses whenever the key has no ties.
pub fn sorted_indices<T>(rows: &[T], field: &Field<T>, direction: Direction) -> Vec<usize> {
    let mut keyed: Vec<_> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| (index, field.value(row)))
        .collect();

    keyed.sort_by(|(_, a), (_, b)| match direction {
        Direction::Asc => a.compare(b),
        Direction::Desc => b.compare(a),
    });

    keyed.into_iter().map(|(index, _)| index).collect()
}
