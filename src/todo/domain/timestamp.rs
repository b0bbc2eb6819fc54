//! Timestamp helpers shared by list and task aggregates.

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use mockable::Clock;

/// Returns the current time at the precision `PostgreSQL` stores.
pub(super) fn now(clock: &(impl Clock + ?Sized)) -> DateTime<Utc> {
    clock.utc().trunc_subsecs(6)
}

/// Returns a timestamp strictly after `previous`.
///
/// Uses the clock when it has moved past `previous`, otherwise the next
/// representable microsecond.
pub(super) fn advance(
    previous: DateTime<Utc>,
    clock: &(impl Clock + ?Sized),
) -> DateTime<Utc> {
    let current = now(clock);
    if current > previous {
        current
    } else {
        previous + TimeDelta::microseconds(1)
    }
}
