//! The process-wide table of canonical chronologies.

use std::sync::{LazyLock, RwLock};

use rustc_hash::FxHashMap;

use crate::{error::ErrorMessage, CalendarError, CalendarResult};

use super::{Chronology, ChronologyKey};

static CHRONOLOGIES: LazyLock<RwLock<FxHashMap<ChronologyKey, Chronology>>> =
    LazyLock::new(RwLock::default);

fn poisoned() -> CalendarError {
    CalendarError::assert().with_enum(ErrorMessage::CacheLockPoisoned)
}

/// Returns the chronology for `key`, building it with `build` on first use.
///
/// Building happens outside the lock since zoned and cutover chronologies
/// look up their UTC parts. When two threads race, the first chronology
/// installed wins and the other is dropped.
pub(crate) fn get_or_build(
    key: ChronologyKey,
    build: impl FnOnce(&ChronologyKey) -> CalendarResult<Chronology>,
) -> CalendarResult<Chronology> {
    if let Some(chronology) = CHRONOLOGIES.read().map_err(|_| poisoned())?.get(&key) {
        return Ok(chronology.clone());
    }

    let built = build(&key)?;
    #[cfg(feature = "log")]
    log::debug!("Chronology cache miss for {built}");

    let mut chronologies = CHRONOLOGIES.write().map_err(|_| poisoned())?;
    Ok(chronologies.entry(key).or_insert(built).clone())
}
