//! Reception reports and transmitter selection.

use std::collections::{BTreeMap, BTreeSet};

use crate::operator::normalize_call_sign;

/// Which kind of map a run produces.
///
/// Report files list who heard whom. A transmit map shows everyone who heard
/// one station; a receive map shows everyone one station heard, which is the
/// same data with the two call-sign columns swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapMode {
    #[default]
    Transmit,
    Receive,
}

impl MapMode {
    pub fn from_receive_flag(receive: bool) -> Self {
        if receive {
            MapMode::Receive
        } else {
            MapMode::Transmit
        }
    }

    /// Assign the first two report columns to (transmitter, receiver).
    pub fn orient<'a>(&self, first: &'a str, second: &'a str) -> (&'a str, &'a str) {
        match self {
            MapMode::Transmit => (second, first),
            MapMode::Receive => (first, second),
        }
    }

    /// Legend title for the map of `call_sign`.
    pub fn legend_title(&self, call_sign: &str) -> String {
        match self {
            MapMode::Transmit => format!("Transmission Map (who can hear me) for {}", call_sign),
            MapMode::Receive => format!("Receive Map (who can I hear) for {}", call_sign),
        }
    }

    /// Output file name for the map of `call_sign`.
    pub fn file_name(&self, call_sign: &str) -> String {
        match self {
            MapMode::Transmit => format!("{}-xmit-map.png", call_sign),
            MapMode::Receive => format!("{}-rcvr-map.png", call_sign),
        }
    }
}

/// Reception categories keyed by transmitter, then receiver.
///
/// Ordered maps keep map generation and plotting order deterministic.
#[derive(Debug, Clone, Default)]
pub struct ReportMatrix {
    reports: BTreeMap<String, BTreeMap<String, String>>,
    receivers: BTreeSet<String>,
}

impl ReportMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a report; a later report for the same pair replaces the earlier one.
    pub fn insert(
        &mut self,
        transmitter: impl Into<String>,
        receiver: impl Into<String>,
        category: impl Into<String>,
    ) {
        let receiver = receiver.into();
        self.receivers.insert(receiver.clone());
        self.reports
            .entry(transmitter.into())
            .or_default()
            .insert(receiver, category.into());
    }

    /// Category reported for a transmitter/receiver pair.
    ///
    /// An empty category is treated the same as no report.
    pub fn category(&self, transmitter: &str, receiver: &str) -> Option<&str> {
        self.reports
            .get(transmitter)?
            .get(receiver)
            .map(String::as_str)
            .filter(|category| !category.is_empty())
    }

    pub fn has_transmitter(&self, call_sign: &str) -> bool {
        self.reports.contains_key(call_sign)
    }

    pub fn transmitters(&self) -> impl Iterator<Item = &str> {
        self.reports.keys().map(String::as_str)
    }

    /// Every receiver appearing anywhere in the reports.
    pub fn receivers(&self) -> impl Iterator<Item = &str> {
        self.receivers.iter().map(String::as_str)
    }

    /// Total number of transmitter/receiver pairs.
    pub fn len(&self) -> usize {
        self.reports.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Choose which transmitters get a map.
    pub fn select_transmitters(&self, filter: &CallSignFilter) -> TransmitterSelection {
        match filter {
            CallSignFilter::All => TransmitterSelection {
                selected: self.transmitters().map(str::to_string).collect(),
                skipped: Vec::new(),
            },
            CallSignFilter::Only(calls) => {
                let mut selection = TransmitterSelection::default();
                for call in calls {
                    if self.has_transmitter(call) {
                        if !selection.selected.contains(call) {
                            selection.selected.push(call.clone());
                        }
                    } else {
                        tracing::info!(call_sign = %call, "Skipping {}: no reports", call);
                        selection.skipped.push(call.clone());
                    }
                }
                selection
            }
        }
    }
}

/// The set of call signs to draw maps for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CallSignFilter {
    #[default]
    All,
    Only(Vec<String>),
}

impl CallSignFilter {
    /// Parse `"all"` (any case) or a comma-separated list of call signs.
    ///
    /// Anything other than `"all"`, including an empty string, is a list;
    /// an empty list selects no transmitters.
    pub fn parse(s: &str) -> Self {
        let normalized = normalize_call_sign(s);
        if normalized == "ALL" {
            return CallSignFilter::All;
        }

        CallSignFilter::Only(
            normalized
                .split(',')
                .filter(|call| !call.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

/// Transmitters chosen for a run, and requested ones without reports.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransmitterSelection {
    pub selected: Vec<String>,
    pub skipped: Vec<String>,
}
