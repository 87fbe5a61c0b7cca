//! Alert kinds and their duration thresholds.

use std::collections::BTreeMap;
use std::fmt;

/// The eight alert kinds, in rule priority order.
///
/// The derived `Ord` follows declaration order, which is also the order in
/// which alert rules are tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlertKind {
    #[cfg_attr(feature = "serde", serde(rename = "Over Lunch"))]
    OverLunch,
    #[cfg_attr(feature = "serde", serde(rename = "Over Break"))]
    OverBreak,
    #[cfg_attr(feature = "serde", serde(rename = "Personal"))]
    Personal,
    #[cfg_attr(feature = "serde", serde(rename = "IT Issues"))]
    ItIssues,
    #[cfg_attr(feature = "serde", serde(rename = "Long Call"))]
    LongCall,
    #[cfg_attr(feature = "serde", serde(rename = "ACW"))]
    Acw,
    /// Matches agents whose state mentions "Unresponsive". The label keeps
    /// the backend dashboard's own spelling.
    #[cfg_attr(feature = "serde", serde(rename = "Unresponsible"))]
    Unresponsible,
    #[cfg_attr(feature = "serde", serde(rename = "Unavailable"))]
    Unavailable,
}

impl AlertKind {
    /// All kinds in priority order.
    pub const ALL: [AlertKind; 8] = [
        AlertKind::OverLunch,
        AlertKind::OverBreak,
        AlertKind::Personal,
        AlertKind::ItIssues,
        AlertKind::LongCall,
        AlertKind::Acw,
        AlertKind::Unresponsible,
        AlertKind::Unavailable,
    ];

    /// Display label, also used as the threshold key.
    pub const fn label(&self) -> &'static str {
        match self {
            AlertKind::OverLunch => "Over Lunch",
            AlertKind::OverBreak => "Over Break",
            AlertKind::Personal => "Personal",
            AlertKind::ItIssues => "IT Issues",
            AlertKind::LongCall => "Long Call",
            AlertKind::Acw => "ACW",
            AlertKind::Unresponsible => "Unresponsible",
            AlertKind::Unavailable => "Unavailable",
        }
    }

    /// Look up a kind by its label (exact match).
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }

    /// Default threshold in minutes.
    pub const fn default_minutes(&self) -> u32 {
        match self {
            AlertKind::OverLunch => 60,
            AlertKind::OverBreak => 15,
            AlertKind::Personal => 0,
            AlertKind::ItIssues => 0,
            AlertKind::LongCall => 7,
            AlertKind::Acw => 2,
            AlertKind::Unresponsible => 0,
            AlertKind::Unavailable => 0,
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-kind alert thresholds, in whole minutes.
///
/// Always fully populated: every [`AlertKind`] has a value. Construct with
/// [`ThresholdSet::default`] and adjust with [`ThresholdSet::set`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        into = "BTreeMap<String, u32>",
        try_from = "BTreeMap<String, u32>"
    )
)]
pub struct ThresholdSet {
    minutes: BTreeMap<AlertKind, u32>,
}

impl ThresholdSet {
    /// Threshold for a kind, in minutes.
    pub fn minutes(&self, kind: AlertKind) -> u32 {
        self.minutes
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.default_minutes())
    }

    /// Threshold for a kind, in seconds.
    pub fn limit_secs(&self, kind: AlertKind) -> u64 {
        u64::from(self.minutes(kind)) * 60
    }

    /// Replace the threshold for one kind.
    pub fn set(&mut self, kind: AlertKind, minutes: u32) {
        self.minutes.insert(kind, minutes);
    }

    /// Iterate `(kind, minutes)` in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (AlertKind, u32)> + '_ {
        self.minutes.iter().map(|(kind, minutes)| (*kind, *minutes))
    }
}

impl Default for ThresholdSet {
    fn default() -> Self {
        Self {
            minutes: AlertKind::ALL
                .into_iter()
                .map(|kind| (kind, kind.default_minutes()))
                .collect(),
        }
    }
}

impl From<ThresholdSet> for BTreeMap<String, u32> {
    fn from(set: ThresholdSet) -> Self {
        set.iter()
            .map(|(kind, minutes)| (kind.label().to_string(), minutes))
            .collect()
    }
}

/// A label-keyed map could not be turned into a complete [`ThresholdSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThresholdSetError {
    /// A label did not name any alert kind.
    UnknownLabel(String),
    /// A kind had no value.
    Missing(AlertKind),
}

impl fmt::Display for ThresholdSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdSetError::UnknownLabel(label) => write!(f, "unknown alert kind '{}'", label),
            ThresholdSetError::Missing(kind) => write!(f, "missing threshold for '{}'", kind),
        }
    }
}

impl std::error::Error for ThresholdSetError {}

impl TryFrom<BTreeMap<String, u32>> for ThresholdSet {
    type Error = ThresholdSetError;

    fn try_from(map: BTreeMap<String, u32>) -> Result<Self, Self::Error> {
        let mut minutes = BTreeMap::new();
        for (label, value) in map {
            let kind = AlertKind::from_label(&label)
                .ok_or(ThresholdSetError::UnknownLabel(label))?;
            minutes.insert(kind, value);
        }
        if let Some(kind) = AlertKind::ALL
            .into_iter()
            .find(|kind| !minutes.contains_key(kind))
        {
            return Err(ThresholdSetError::Missing(kind));
        }
        Ok(Self { minutes })
    }
}
