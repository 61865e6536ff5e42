//! Game clock for the description pipeline.
//!
//! The clock counts in-game hours. Hour of day, day, month, year, season
//! and sun state are all derived from that single counter (24 hours per
//! day, 35 days per month, 12 months per year).
//!
//! # Design Principles
//!
//! - The absolute hour is the source of truth; calendar fields are never
//!   stored independently.
//! - Advancing uses checked arithmetic (no silent overflow).

use wildweave_types::{GameTime, Season, SunState, TimeCategory};

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Hour counter would overflow.
    #[error("hour counter overflow: cannot advance beyond u64::MAX")]
    HourOverflow,

    /// A calendar field is out of range.
    #[error("invalid calendar date: {reason}")]
    InvalidCalendar {
        /// Which field is out of range.
        reason: String,
    },
}

/// In-game clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameClock {
    absolute_hour: u64,
}

impl GameClock {
    /// A clock at an absolute hour.
    pub const fn new(absolute_hour: u64) -> Self {
        Self { absolute_hour }
    }

    /// A clock at a calendar position.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidCalendar`] when `hour`, `day` or
    /// `month` is out of range, or [`ClockError::HourOverflow`] when the
    /// year is too large to represent.
    pub fn from_calendar(year: u64, month: u8, day: u8, hour: u8) -> Result<Self, ClockError> {
        if u64::from(hour) >= GameTime::HOURS_PER_DAY {
            return Err(ClockError::InvalidCalendar {
                reason: format!("hour {hour} is not below {}", GameTime::HOURS_PER_DAY),
            });
        }
        if u64::from(day) >= GameTime::DAYS_PER_MONTH {
            return Err(ClockError::InvalidCalendar {
                reason: format!("day {day} is not below {}", GameTime::DAYS_PER_MONTH),
            });
        }
        if u64::from(month) >= GameTime::MONTHS_PER_YEAR {
            return Err(ClockError::InvalidCalendar {
                reason: format!("month {month} is not below {}", GameTime::MONTHS_PER_YEAR),
            });
        }
        let months = year
            .checked_mul(GameTime::MONTHS_PER_YEAR)
            .and_then(|m| m.checked_add(u64::from(month)))
            .ok_or(ClockError::HourOverflow)?;
        let days = months
            .checked_mul(GameTime::DAYS_PER_MONTH)
            .and_then(|d| d.checked_add(u64::from(day)))
            .ok_or(ClockError::HourOverflow)?;
        let absolute_hour = days
            .checked_mul(GameTime::HOURS_PER_DAY)
            .and_then(|h| h.checked_add(u64::from(hour)))
            .ok_or(ClockError::HourOverflow)?;
        Ok(Self { absolute_hour })
    }

    /// Advance by one hour.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::HourOverflow`] if the counter would overflow.
    pub fn advance(&mut self) -> Result<GameTime, ClockError> {
        self.advance_by(1)
    }

    /// Advance by `hours`.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::HourOverflow`] if the counter would overflow.
    pub fn advance_by(&mut self, hours: u64) -> Result<GameTime, ClockError> {
        self.absolute_hour = self
            .absolute_hour
            .checked_add(hours)
            .ok_or(ClockError::HourOverflow)?;
        Ok(self.now())
    }

    /// Hours since the start of year zero.
    pub const fn absolute_hour(&self) -> u64 {
        self.absolute_hour
    }

    /// The current calendar position.
    pub fn now(&self) -> GameTime {
        GameTime::from_absolute_hour(self.absolute_hour)
    }

    /// Current season.
    pub fn season(&self) -> Season {
        self.now().season()
    }

    /// Current sun state.
    pub fn sun_state(&self) -> SunState {
        self.now().sun_state()
    }

    /// Current time category.
    pub fn time_category(&self) -> TimeCategory {
        self.now().time_category()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn calendar_rolls_over() {
        let mut clock = GameClock::new(23);
        let time = clock.advance().unwrap();
        assert_eq!(time.hour, 0);
        assert_eq!(time.day, 1);

        let clock = GameClock::new(24 * 35 * 12);
        let time = clock.now();
        assert_eq!(time.year, 1);
        assert_eq!(time.month, 0);
        assert_eq!(time.day, 0);
    }

    #[test]
    fn from_calendar_matches_counter() {
        let clock = GameClock::from_calendar(2, 6, 10, 14).unwrap();
        let time = clock.now();
        assert_eq!(time.year, 2);
        assert_eq!(time.month, 6);
        assert_eq!(time.day, 10);
        assert_eq!(time.hour, 14);
        assert_eq!(clock.season(), Season::Summer);
    }

    #[test]
    fn from_calendar_rejects_out_of_range_fields() {
        assert!(matches!(
            GameClock::from_calendar(0, 12, 0, 0),
            Err(ClockError::InvalidCalendar { .. })
        ));
        assert!(matches!(
            GameClock::from_calendar(0, 0, 35, 0),
            Err(ClockError::InvalidCalendar { .. })
        ));
        assert!(matches!(
            GameClock::from_calendar(0, 0, 0, 24),
            Err(ClockError::InvalidCalendar { .. })
        ));
        assert!(matches!(
            GameClock::from_calendar(u64::MAX, 0, 0, 0),
            Err(ClockError::HourOverflow)
        ));
    }

    #[test]
    fn advance_overflow_is_an_error() {
        let mut clock = GameClock::new(u64::MAX);
        assert!(matches!(clock.advance(), Err(ClockError::HourOverflow)));
        assert_eq!(clock.absolute_hour(), u64::MAX);
    }

    #[test]
    fn sun_follows_the_hour() {
        assert_eq!(GameClock::new(2).sun_state(), SunState::Dark);
        assert_eq!(GameClock::new(12).sun_state(), SunState::Light);
        assert_eq!(GameClock::new(8).time_category(), TimeCategory::Morning);
    }
}
