//! Access to the host clock and time zone.

use web_time::{SystemTime, UNIX_EPOCH};

use crate::{error::ErrorMessage, zone::DateTimeZone, CalendarError, CalendarResult};

/// Returns the current time as milliseconds since the epoch.
pub fn current_time_millis() -> CalendarResult<i64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| CalendarError::instant().with_message("Error fetching system time"))
        .and_then(|d| {
            i64::try_from(d.as_millis())
                .map_err(|_| CalendarError::overflow().with_enum(ErrorMessage::IntegerOverflow))
        })
}

impl DateTimeZone {
    /// The zone the host system is configured with.
    pub fn system_default() -> CalendarResult<Self> {
        iana_time_zone::get_timezone()
            .map_err(|_| CalendarError::argument().with_message("Error fetching system time zone"))
            .and_then(|id| Self::for_id(&id))
    }
}
