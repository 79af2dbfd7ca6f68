use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ProviderError, Season, SeasonalEvent, SeasonalEventProvider, prelude::*};

/// The four cross-quarter festivals, each midway between a solstice and an
/// equinox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum CrossQuarter {
    Imbolc,
    Beltane,
    Lughnasadh,
    Samhain,
}

impl CrossQuarter {
    /// Festival that falls between two consecutive seasonal markers, if any.
    pub const fn between(from: Season, to: Season) -> Option<Self> {
        match (from, to) {
            (Season::WinterSolstice, Season::SpringEquinox) => Some(Self::Imbolc),
            (Season::SpringEquinox, Season::SummerSolstice) => Some(Self::Beltane),
            (Season::SummerSolstice, Season::AutumnEquinox) => Some(Self::Lughnasadh),
            (Season::AutumnEquinox, Season::WinterSolstice) => Some(Self::Samhain),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CrossQuarterEvent {
    pub timestamp: DateTime<Utc>,
    pub festival:  CrossQuarter,
}

/// How the Winter Solstice is paired when computing Imbolc.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrossQuarterMode {
    /// Pair with the same year's Spring Equinox. Imbolc then lands between
    /// them going backwards in time.
    #[default]
    #[display(fmt = "same-year")]
    SameYear,
    /// Pair with the following year's Spring Equinox.
    #[display(fmt = "following-year")]
    FollowingYear,
}

impl FromStr for CrossQuarterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "same-year" => Ok(Self::SameYear),
            "following-year" => Ok(Self::FollowingYear),
            other => Err(format!(
                "Unknown cross-quarter mode: {other} (expected same-year or following-year)"
            )),
        }
    }
}

/// Computes the cross-quarter festivals of `year`.
///
/// The year's four markers are sorted and each is paired with the next one,
/// the last wrapping around to the first. Each midpoint is labeled by its
/// ordered pair; pairs without a festival are dropped. Results come in pair
/// order: Beltane, Lughnasadh, Samhain, Imbolc.
///
/// # Errors
/// Propagates any `ProviderError` from the provider.
pub fn compute<P>(provider: &P, year: i32, mode: CrossQuarterMode) -> Result<Vec<CrossQuarterEvent>, ProviderError>
where
    P: SeasonalEventProvider + ?Sized,
{
    let mut events = provider.equinox_solstice(year)?.events();
    events.sort_by_key(|e| e.timestamp);

    let wrap_target = match mode {
        CrossQuarterMode::SameYear => events[0],
        CrossQuarterMode::FollowingYear => {
            let next_year = year
                .checked_add(1)
                .ok_or_else(|| ProviderError::Other(format!("no year follows {year}")))?;
            let following = provider.equinox_solstice(next_year)?;
            SeasonalEvent {
                timestamp: following.get(events[0].season),
                season:    events[0].season,
            }
        },
    };

    let last = events.len() - 1;
    let festivals: Vec<_> = events
        .iter()
        .enumerate()
        .filter_map(|(i, current)| {
            let next = if i == last { wrap_target } else { events[i + 1] };
            let festival = CrossQuarter::between(current.season, next.season)?;
            Some(CrossQuarterEvent {
                timestamp: midpoint(current.timestamp, next.timestamp),
                festival,
            })
        })
        .collect();

    debug!(year, %mode, count = festivals.len(), "computed cross-quarter dates");
    Ok(festivals)
}

/// `a + (b - a) / 2`; works in either direction.
pub fn midpoint(a: DateTime<Utc>, b: DateTime<Utc>) -> DateTime<Utc> {
    a + (b - a) / 2
}
