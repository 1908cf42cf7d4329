//! Traffic-origin area document.
//!
//! Each line is exactly one area token (`lan`, `localhost`, `inet`),
//! matched case-insensitively; the document is a flag set. Output is
//! uppercase in the canonical `LOCALHOST`, `LAN`, `INET` order regardless
//! of input order.

use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::{LineError, LineErrorKind, ParseOutcome};
use crate::range::RangeText;
use crate::tables::Area;

/// Area flag-set document.
#[derive(Debug, Clone, Default)]
pub struct AreaRange {
    outcome: ParseOutcome,
    areas: BTreeSet<Area>,
}

impl AreaRange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, area: Area) -> bool {
        self.areas.contains(&area)
    }
}

impl RangeText for AreaRange {
    fn clear(&mut self) {
        self.outcome.clear();
        self.areas.clear();
    }

    fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    fn outcome(&self) -> &ParseOutcome {
        &self.outcome
    }

    fn outcome_mut(&mut self) -> &mut ParseOutcome {
        &mut self.outcome
    }

    fn parse_line(&mut self, line: &str) -> Result<(), LineError> {
        let area = Area::from_str(line).map_err(|_| {
            LineError::new(LineErrorKind::BadFormat, format!("area='{line}'"))
        })?;
        self.areas.insert(area);
        Ok(())
    }

    fn append_lines(&self, lines: &mut Vec<String>) {
        for area in &self.areas {
            lines.push(area.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_area() {
        let mut range = AreaRange::new();
        assert!(range.from_text("lan"));
        assert_eq!(range.to_text(), "LAN\n");
        assert!(range.contains(Area::Lan));
        assert!(!range.contains(Area::Inet));
    }

    #[test]
    fn test_canonical_order() {
        let mut range = AreaRange::new();
        assert!(range.from_text("inet\nlocalhost\nlan\n"));
        assert_eq!(range.to_text(), "LOCALHOST\nLAN\nINET\n");
    }

    #[test]
    fn test_unknown_token_fails() {
        let mut range = AreaRange::new();
        assert!(!range.from_text("1"));
        assert_eq!(range.error_line_no(), 1);
        assert_eq!(range.error_message(), "Bad format");
        assert!(range.error_details().contains("area='1'"));
    }

    #[test]
    fn test_comments_and_blanks_skipped() {
        let mut range = AreaRange::new();
        assert!(range.from_text("# header\n\nlan\n# trailer\n"));
        assert_eq!(range.to_text(), "LAN\n");
    }
}
