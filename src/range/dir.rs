//! Traffic-direction document.
//!
//! Each line is exactly one direction token (`in`, `out`), matched
//! case-insensitively. Repeated tokens are idempotent: the document is a
//! flag set, not a counted multiset. Output is uppercase in the canonical
//! `IN`, `OUT` order.

use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::{LineError, LineErrorKind, ParseOutcome};
use crate::range::RangeText;
use crate::tables::Direction;

/// Direction flag-set document.
#[derive(Debug, Clone, Default)]
pub struct DirRange {
    outcome: ParseOutcome,
    directions: BTreeSet<Direction>,
}

impl DirRange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, direction: Direction) -> bool {
        self.directions.contains(&direction)
    }

    pub fn is_in(&self) -> bool {
        self.contains(Direction::In)
    }

    pub fn is_out(&self) -> bool {
        self.contains(Direction::Out)
    }
}

impl RangeText for DirRange {
    fn clear(&mut self) {
        self.outcome.clear();
        self.directions.clear();
    }

    fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    fn outcome(&self) -> &ParseOutcome {
        &self.outcome
    }

    fn outcome_mut(&mut self) -> &mut ParseOutcome {
        &mut self.outcome
    }

    fn parse_line(&mut self, line: &str) -> Result<(), LineError> {
        let direction = Direction::from_str(line).map_err(|_| {
            LineError::new(LineErrorKind::BadFormat, format!("dir='{line}'"))
        })?;
        self.directions.insert(direction);
        Ok(())
    }

    fn append_lines(&self, lines: &mut Vec<String>) {
        for direction in &self.directions {
            lines.push(direction.to_string());
        }
    }
}
