//! Variant selection for the calendars whose rules compete, read from and
//! written to JSON.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendars::{HinduLunisolar, HinduSolar, HinduVersion, Islamic, IslamicSystem, Persian, PersianMethod};
use crate::{CalendarError, Result};

/// Variant selections for the calendars that have competing rules.
///
/// Missing keys fall back to the defaults: tabular Islamic months with the
/// Nizari leap sequence and civil epoch, the astronomical Persian new year
/// and the modern Hindu rules.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub islamic: IslamicSystem,
    pub persian: PersianMethod,
    pub hindu:   HinduVersion,
}

impl CalendarConfig {
    /// Reads a configuration from JSON.
    ///
    /// # Errors
    /// `CalendarError::Config` with the parser's message.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| CalendarError::Config(e.to_string()))?;
        debug!(?config, "loaded calendar configuration");
        Ok(config)
    }

    /// Writes the configuration as JSON.
    ///
    /// # Errors
    /// `CalendarError::Config` if the Islamic rule is a custom function,
    /// which has no serialized form.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| CalendarError::Config(e.to_string()))
    }

    /// The Islamic calendar under the configured month rule.
    pub const fn islamic(&self) -> Islamic {
        Islamic::new(self.islamic)
    }

    /// The Persian calendar under the configured Nowruz method.
    pub const fn persian(&self) -> Persian {
        Persian::new(self.persian)
    }

    /// The Hindu solar calendar for the configured version.
    pub const fn hindu_solar(&self) -> HinduSolar {
        HinduSolar::new(self.hindu)
    }

    /// The Hindu lunisolar calendar for the configured version.
    pub const fn hindu_lunisolar(&self) -> HinduLunisolar {
        HinduLunisolar::new(self.hindu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::{IslamicEpoch, LeapSequence, MonthFunc};
    use crate::calendars::gregorian::fixed_from_gregorian;
    use crate::{Calendar, Dmy};

    #[test]
    fn test_defaults() {
        let config = CalendarConfig::default();
        assert_eq!(config.persian, PersianMethod::Astronomical);
        assert_eq!(config.hindu, HinduVersion::Modern);
        assert!(matches!(
            config.islamic,
            IslamicSystem::Arithmetic { leaps: LeapSequence::Nizari, epoch: IslamicEpoch::Civil }
        ));
    }

    #[test]
    fn test_from_json() {
        let config = CalendarConfig::from_json(r#"{"persian":"Arithmetic","hindu":"Old"}"#).unwrap();
        assert_eq!(config.persian, PersianMethod::Arithmetic);
        assert_eq!(config.hindu, HinduVersion::Old);
        assert!(matches!(config.islamic, IslamicSystem::Arithmetic { .. }));
        assert_eq!(config.hindu_solar().version, HinduVersion::Old);
        assert_eq!(config.hindu_lunisolar().version, HinduVersion::Old);

        let config = CalendarConfig::from_json(
            r#"{"islamic":{"Astronomical":{"visibility":"ConjunctionBeforeSunset","location":{"latitude":21.4225,"longitude":39.8262,"elevation":298.0,"zone":3.0}}}}"#,
        )
        .unwrap();
        assert!(matches!(
            config.islamic,
            IslamicSystem::Astronomical { visibility: MonthFunc::ConjunctionBeforeSunset, .. }
        ));
    }

    #[test]
    fn test_bad_json() {
        let err = CalendarConfig::from_json(r#"{"persian":"Lunar"}"#).unwrap_err();
        assert!(matches!(err, CalendarError::Config(_)));
        assert!(CalendarConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = CalendarConfig { persian: PersianMethod::Arithmetic, ..CalendarConfig::default() };
        let json = config.to_json().unwrap();
        assert_eq!(CalendarConfig::from_json(&json).unwrap().persian, PersianMethod::Arithmetic);

        let custom = CalendarConfig {
            islamic: IslamicSystem::Astronomical {
                visibility: MonthFunc::Custom(|_, _| false),
                location:   crate::astro::Location::MECCA,
            },
            ..CalendarConfig::default()
        };
        assert!(custom.to_json().is_err());
    }

    #[test]
    fn test_calendars_follow_config() {
        let jd = fixed_from_gregorian(2024, 3, 20);
        let config = CalendarConfig::default();
        assert_eq!(config.persian().from_jd(jd).unwrap(), Dmy::new(1, 1, 1403));
        assert_eq!(config.islamic().from_jd(jd).unwrap(), Dmy::new(10, 9, 1445));
    }
}
