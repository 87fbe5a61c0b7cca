//! Threshold registry shared between settings updates and refresh cycles.

use agentwatch_types::{AlertKind, ThresholdSet};
use parking_lot::RwLock;
use tracing::info;

use crate::error::ThresholdError;

/// Mutable, always-complete alert thresholds.
///
/// Readers get a full copy ([`ThresholdRegistry::snapshot`]), so a refresh
/// cycle never sees half of an update.
#[derive(Debug, Default)]
pub struct ThresholdRegistry {
    current: RwLock<ThresholdSet>,
}

impl ThresholdRegistry {
    pub fn new(initial: ThresholdSet) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    /// A consistent copy of the current thresholds.
    pub fn snapshot(&self) -> ThresholdSet {
        self.current.read().clone()
    }

    /// Replace every threshold at once.
    pub fn replace(&self, thresholds: ThresholdSet) {
        *self.current.write() = thresholds;
    }

    /// Apply `label -> minutes` updates given as text.
    ///
    /// Every pair is validated before anything is written; one bad label or
    /// value rejects the whole request. Kinds not mentioned keep their value.
    pub fn apply<I, K, V>(&self, updates: I) -> Result<ThresholdSet, ThresholdError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let parsed = updates
            .into_iter()
            .map(|(label, value)| {
                let label = label.as_ref();
                let kind = AlertKind::from_label(label)
                    .ok_or_else(|| ThresholdError::UnknownKind(label.to_string()))?;
                Ok((kind, parse_minutes(kind, value.as_ref())?))
            })
            .collect::<Result<Vec<_>, ThresholdError>>()?;

        let mut current = self.current.write();
        for (kind, minutes) in parsed {
            current.set(kind, minutes);
        }
        info!(thresholds = ?*current, "alert thresholds updated");
        Ok(current.clone())
    }

    /// Restore the built-in defaults.
    pub fn restore_defaults(&self) {
        self.replace(ThresholdSet::default());
        info!("alert thresholds restored to defaults");
    }
}

/// Parse a whole, non-negative number of minutes.
pub fn parse_minutes(kind: AlertKind, value: &str) -> Result<u32, ThresholdError> {
    let value = value.trim();
    let minutes: i64 = value.parse().map_err(|_| ThresholdError::NotANumber {
        kind,
        value: value.to_string(),
    })?;
    if minutes < 0 {
        return Err(ThresholdError::Negative {
            kind,
            value: minutes,
        });
    }
    u32::try_from(minutes).map_err(|_| ThresholdError::TooLarge {
        kind,
        value: minutes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_partial() {
        let registry = ThresholdRegistry::default();
        let updated = registry
            .apply([("Over Break", "20"), ("ACW", " 3 ")])
            .unwrap();

        assert_eq!(updated.minutes(AlertKind::OverBreak), 20);
        assert_eq!(updated.minutes(AlertKind::Acw), 3);
        assert_eq!(updated.minutes(AlertKind::OverLunch), 60);
        assert_eq!(registry.snapshot(), updated);
    }

    #[test]
    fn test_apply_is_all_or_nothing() {
        let registry = ThresholdRegistry::default();

        let err = registry
            .apply([("Over Break", "20"), ("ACW", "two")])
            .unwrap_err();
        assert_eq!(
            err,
            ThresholdError::NotANumber {
                kind: AlertKind::Acw,
                value: "two".to_string()
            }
        );
        assert_eq!(registry.snapshot(), ThresholdSet::default());
    }

    #[test]
    fn test_apply_rejects_negative() {
        let registry = ThresholdRegistry::default();
        let err = registry.apply([("Long Call", "-1")]).unwrap_err();
        assert_eq!(
            err,
            ThresholdError::Negative {
                kind: AlertKind::LongCall,
                value: -1
            }
        );
        assert_eq!(registry.snapshot(), ThresholdSet::default());
    }

    #[test]
    fn test_apply_rejects_unknown_label() {
        let registry = ThresholdRegistry::default();
        let err = registry.apply([("Unresponsive", "5")]).unwrap_err();
        assert_eq!(err, ThresholdError::UnknownKind("Unresponsive".to_string()));
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_minutes(AlertKind::Acw, "0"), Ok(0));
        assert!(parse_minutes(AlertKind::Acw, "").is_err());
        assert!(parse_minutes(AlertKind::Acw, "1.5").is_err());
        assert!(matches!(
            parse_minutes(AlertKind::Acw, "99999999999"),
            Err(ThresholdError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_apply_and_restore() {
        let registry = ThresholdRegistry::default();
        registry.apply([("Personal", "10")]).unwrap();
        assert_eq!(registry.snapshot().minutes(AlertKind::Personal), 10);

        registry.restore_defaults();
        assert_eq!(registry.snapshot(), ThresholdSet::default());
    }
}
