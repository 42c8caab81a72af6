//! Zone lookup by id.

use std::{
    collections::BTreeMap,
    sync::{LazyLock, RwLock, RwLockReadGuard},
};

use crate::{error::ErrorMessage, CalendarError, CalendarResult};

use super::{parse_offset, DateTimeZone, NameKey};

/// A source of zones by id.
pub trait ZoneProvider: Send + Sync {
    /// Returns the zone for `id`, or `None` if this provider does not know it.
    fn zone(&self, id: &str) -> CalendarResult<Option<DateTimeZone>>;

    /// The ids this provider can build, excluding fixed offsets.
    fn available_ids(&self) -> Vec<String>;
}

/// Provides "UTC" and fixed offset ids such as "+05:30".
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedOffsetProvider;

impl ZoneProvider for FixedOffsetProvider {
    fn zone(&self, id: &str) -> CalendarResult<Option<DateTimeZone>> {
        if id == "UTC" {
            return Ok(Some(DateTimeZone::utc()));
        }
        let Some(offset) = parse_offset(id) else {
            return Ok(None);
        };
        if offset == 0 {
            return Ok(Some(DateTimeZone::utc()));
        }
        let name_key = NameKey::try_from_str(id)
            .map_err(|_| CalendarError::argument().with_enum(ErrorMessage::NameKeyInvalid))?;
        Ok(Some(DateTimeZone::fixed(id, name_key, offset, offset)))
    }

    fn available_ids(&self) -> Vec<String> {
        vec!["UTC".into()]
    }
}

/// A process-wide table of zones by id, filled from a provider on demand.
///
/// Fixed offset ids are answered without the provider. Zones are never
/// evicted, so every lookup of an id returns the same zone instance.
pub struct ZoneCache {
    provider: Box<dyn ZoneProvider>,
    zones: RwLock<BTreeMap<String, DateTimeZone>>,
}

impl Default for ZoneCache {
    fn default() -> Self {
        #[cfg(feature = "tzdb")]
        let provider = super::TzdbProvider;
        #[cfg(not(feature = "tzdb"))]
        let provider = FixedOffsetProvider;
        Self::new(provider)
    }
}

pub(crate) static ZONE_CACHE: LazyLock<ZoneCache> = LazyLock::new(ZoneCache::default);

impl ZoneCache {
    pub fn new(provider: impl ZoneProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
            zones: RwLock::default(),
        }
    }

    /// Returns the cached zone for `id`, building it on first use.
    pub fn zone(&self, id: &str) -> CalendarResult<Option<DateTimeZone>> {
        if let Some(zone) = self.read()?.get(id) {
            return Ok(Some(zone.clone()));
        }

        // Build outside the lock; a racing build of the same id loses.
        let zone = match FixedOffsetProvider.zone(id)? {
            Some(zone) => zone,
            None => match self.provider.zone(id)? {
                Some(zone) => zone,
                None => return Ok(None),
            },
        };
        #[cfg(feature = "log")]
        log::debug!("Zone cache miss for {id}");

        let mut zones = self
            .zones
            .write()
            .map_err(|_| CalendarError::assert().with_enum(ErrorMessage::CacheLockPoisoned))?;
        Ok(Some(zones.entry(id.into()).or_insert(zone).clone()))
    }

    /// The provider's ids.
    pub fn available_ids(&self) -> Vec<String> {
        let mut ids = self.provider.available_ids();
        if !ids.iter().any(|id| id == "UTC") {
            ids.push("UTC".into());
        }
        ids.sort();
        ids
    }

    fn read(&self) -> CalendarResult<RwLockReadGuard<'_, BTreeMap<String, DateTimeZone>>> {
        self.zones
            .read()
            .map_err(|_| CalendarError::assert().with_enum(ErrorMessage::CacheLockPoisoned))
    }
}

impl DateTimeZone {
    /// Every id [`DateTimeZone::for_id`] resolves besides fixed offsets.
    #[must_use]
    pub fn available_ids() -> Vec<String> {
        ZONE_CACHE.available_ids()
    }
}
