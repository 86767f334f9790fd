//! Immutable, time-indexed talk catalog.
//!
//! The store is built once from a finished list of talks and exposes only
//! read accessors, so it can be shared across workers behind an `Arc`
//! without any locking.

use crate::errors::LoadError;
use crate::talk::Talk;
use chrono::{DateTime, FixedOffset};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::sync::Arc;

/// One entry of the time index.
///
/// Ordering is by start, then end, then track, then id, which gives a total
/// and deterministic order even when two talks share a slot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct TimeSlot {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    track: Arc<str>,
    id: Arc<str>,
}

#[derive(Debug, Default)]
pub struct ScheduleStore {
    talks: FxHashMap<Arc<str>, Talk>,
    index: Vec<TimeSlot>,
}

impl ScheduleStore {
    /// Builds the catalog and its time index in one pass.
    ///
    /// Fails on the first duplicate id; nothing is kept from a failed load.
    pub fn load(talks: Vec<Talk>) -> Result<Self, LoadError> {
        let mut by_id: FxHashMap<Arc<str>, Talk> = FxHashMap::default();
        by_id.reserve(talks.len());
        let mut index = Vec::with_capacity(talks.len());

        for talk in talks {
            if by_id.contains_key(&talk.id) {
                return Err(LoadError::DuplicateId(talk.id.to_string()));
            }
            index.push(TimeSlot {
                start: talk.start,
                end: talk.end(),
                track: Arc::clone(&talk.track),
                id: Arc::clone(&talk.id),
            });
            by_id.insert(Arc::clone(&talk.id), talk);
        }

        index.sort_unstable();

        Ok(Self {
            talks: by_id,
            index,
        })
    }

    pub fn len(&self) -> usize {
        self.talks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.talks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Talk> {
        self.talks.get(id)
    }

    /// Distinct track labels, sorted.
    pub fn tracks(&self) -> Vec<&str> {
        let mut tracks: Vec<&str> = self.index.iter().map(|slot| &*slot.track).collect();
        tracks.sort_unstable();
        tracks.dedup();
        tracks
    }

    /// Every talk whose `[start, end)` window contains `at`, in index order.
    pub fn talks_active_at(&self, at: DateTime<FixedOffset>) -> Vec<&Talk> {
        let started = self.index.partition_point(|slot| slot.start <= at);

        self.index[..started]
            .iter()
            .map(|slot| self.resolve(slot))
            .filter(|talk| talk.is_active_at(at))
            .collect()
    }

    /// Earliest start time strictly after `at`, if any talk is still upcoming.
    pub fn next_start_after(&self, at: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
        let upcoming = self.index.partition_point(|slot| slot.start <= at);
        self.index.get(upcoming).map(|slot| slot.start)
    }

    /// All talks beginning exactly at `start`, in index order.
    pub fn talks_starting_at(&self, start: DateTime<FixedOffset>) -> Vec<&Talk> {
        let first = self.index.partition_point(|slot| slot.start < start);

        self.index[first..]
            .iter()
            .take_while(|slot| slot.start == start)
            .map(|slot| self.resolve(slot))
            .collect()
    }

    /// One talk per track for the earliest start strictly after `at`.
    ///
    /// When two talks share both that start and a track, the later index
    /// entry replaces the earlier one.
    pub fn talks_starting_after(&self, at: DateTime<FixedOffset>) -> BTreeMap<&str, &Talk> {
        let Some(next_start) = self.next_start_after(at) else {
            return BTreeMap::new();
        };

        self.talks_starting_at(next_start)
            .into_iter()
            .map(|talk| (&*talk.track, talk))
            .collect()
    }

    /// Talks of one track in start order.
    pub fn talks_by_track(&self, track: &str) -> Vec<&Talk> {
        self.index
            .iter()
            .filter(|slot| &*slot.track == track)
            .map(|slot| self.resolve(slot))
            .collect()
    }

    fn resolve(&self, slot: &TimeSlot) -> &Talk {
        // Index and catalog are built together in `load`; an index id always resolves.
        &self.talks[&slot.id]
    }
}
