//! Port range document.
//!
//! Input lines: a plain integer, a well-known service name, or a `-`
//! range whose ends may mix integers and names (`1-128`, `http`,
//! `ISO_TSAP-SSL`). Canonical output is always numeric.

use crate::error::{LineError, LineErrorKind, ParseOutcome};
use crate::merge::{Pair, RangeAccumulator};
use crate::parse::{resolve_port_token, split_value_line};
use crate::range::RangeText;
use crate::tables::ProtocolType;

/// An inclusive port interval.
pub type PortPair = Pair<u16>;

/// Port range document.
#[derive(Debug, Clone, Default)]
pub struct PortRange {
    outcome: ParseOutcome,
    proto_tcp: bool,
    proto_udp: bool,

    acc: RangeAccumulator<u16>,
    ports: Vec<u16>,
    pairs: Vec<PortPair>,
}

impl PortRange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts service-name resolution to TCP services.
    pub fn set_proto_tcp(&mut self, on: bool) {
        self.proto_tcp = on;
    }

    /// Restricts service-name resolution to UDP services.
    pub fn set_proto_udp(&mut self, on: bool) {
        self.proto_udp = on;
    }

    /// Service-table filter derived from the protocol flags.
    ///
    /// Neither or both flags set means no restriction.
    fn proto_filter(&self) -> ProtocolType {
        match (self.proto_tcp, self.proto_udp) {
            (true, false) => ProtocolType::Tcp,
            (false, true) => ProtocolType::Udp,
            _ => ProtocolType::Any,
        }
    }

    /// Merged port singletons, ascending.
    pub fn ports(&self) -> &[u16] {
        &self.ports
    }

    /// Merged port pairs, disjoint, non-adjacent, ascending by `from`.
    pub fn pairs(&self) -> &[PortPair] {
        &self.pairs
    }
}

impl RangeText for PortRange {
    fn clear(&mut self) {
        self.outcome.clear();
        self.acc.clear();
        self.ports.clear();
        self.pairs.clear();
    }

    fn is_empty(&self) -> bool {
        self.ports.is_empty() && self.pairs.is_empty()
    }

    fn outcome(&self) -> &ParseOutcome {
        &self.outcome
    }

    fn outcome_mut(&mut self) -> &mut ParseOutcome {
        &mut self.outcome
    }

    fn parse_line(&mut self, line: &str) -> Result<(), LineError> {
        let Some(split) = split_value_line(line) else {
            return Err(LineError::new(LineErrorKind::BadFormat, String::new()));
        };

        if split.is_inconsistent() {
            return Err(LineError::new(
                LineErrorKind::BadMaskFormat,
                format!("port='{}' second='{}'", split.value, split.second),
            ));
        }

        let filter = self.proto_filter();
        let from = resolve_port_token(split.value, filter, false)?;

        let to = if split.sep.is_some() {
            let to = resolve_port_token(split.second, filter, true)?;
            if from > to {
                return Err(LineError::new(
                    LineErrorKind::BadRange,
                    format!("port from='{}' to='{}'", split.value, split.second),
                ));
            }
            to
        } else {
            from
        };

        self.acc.insert(from, to);
        Ok(())
    }

    fn finalize(&mut self, _sort: bool) {
        (self.ports, self.pairs) = self.acc.merge();
        tracing::debug!(
            ports = self.ports.len(),
            pairs = self.pairs.len(),
            "port range compiled"
        );
    }

    fn append_lines(&self, lines: &mut Vec<String>) {
        for port in &self.ports {
            lines.push(port.to_string());
        }
        for pair in &self.pairs {
            lines.push(format!("{}-{}", pair.from, pair.to));
        }
    }
}
