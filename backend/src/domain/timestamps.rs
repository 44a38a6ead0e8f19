//! Timestamps stamped onto stored records.

use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;

/// Current time at the microsecond precision PostgreSQL `TIMESTAMPTZ` keeps.
///
/// Values returned on creation then compare equal to the ones read back.
pub(crate) fn stored_now(clock: &dyn Clock) -> DateTime<Utc> {
    clock.utc().trunc_subsecs(6)
}
