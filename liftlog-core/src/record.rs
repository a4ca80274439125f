//! Logged set records and the training log they live in.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::family::{classify, Family};

/// Estimated one-rep max from a submaximal set (Epley).
///
/// Ingestion and planning both go through this function so the persisted
/// `e1RM` column always agrees with what the planner recomputes.
pub fn e1rm(load: f64, reps: u32) -> f64 {
    load * (1.0 + f64::from(reps) / 30.0)
}

/// One logged working set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetRecord {
    pub timestamp: NaiveDateTime,
    pub movement: String,
    /// kg
    pub load: f64,
    pub reps: u32,
    /// Perceived effort (RPE), when it was logged.
    pub rpe: Option<f64>,
}

impl SetRecord {
    pub fn new(
        timestamp: NaiveDateTime,
        movement: impl Into<String>,
        load: f64,
        reps: u32,
    ) -> Self {
        Self {
            timestamp,
            movement: movement.into(),
            load,
            reps,
            rpe: None,
        }
    }

    pub fn with_rpe(mut self, rpe: f64) -> Self {
        self.rpe = Some(rpe);
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn e1rm(&self) -> f64 {
        e1rm(self.load, self.reps)
    }

    pub fn family(&self) -> Family {
        classify(&self.movement)
    }

    /// Working sets are rated at or above `threshold`; unrated sets never are.
    pub fn is_working(&self, threshold: f64) -> bool {
        self.rpe.is_some_and(|r| r >= threshold)
    }
}

/// Timestamp-ordered set history.
///
/// Rows sharing a timestamp keep their insertion order.
#[derive(Debug, Clone, Default)]
pub struct TrainingLog {
    records: Vec<SetRecord>,
}

impl TrainingLog {
    pub fn new(mut records: Vec<SetRecord>) -> Self {
        records.sort_by_key(|r| r.timestamp);
        Self { records }
    }

    pub fn records(&self) -> &[SetRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent calendar date with any logged set.
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.records.last().map(SetRecord::date)
    }

    /// Distinct logged dates, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.records.iter().map(SetRecord::date).collect();
        dates.dedup();
        dates
    }

    /// Copy of the log restricted to sets logged on or before `date`.
    pub fn up_to(&self, date: NaiveDate) -> Self {
        Self {
            records: self
                .records
                .iter()
                .filter(|r| r.date() <= date)
                .cloned()
                .collect(),
        }
    }

    pub fn family_rows(&self, family: Family) -> impl Iterator<Item = &SetRecord> {
        self.records.iter().filter(move |r| r.family() == family)
    }

    /// Sets of one exact movement name. Yielded records borrow only the log.
    pub fn movement_rows<'a, 'm>(
        &'a self,
        movement: &'m str,
    ) -> impl Iterator<Item = &'a SetRecord> + use<'a, 'm> {
        self.records.iter().filter(move |r| r.movement == movement)
    }

    /// Last date any movement of `family` was logged.
    pub fn last_trained(&self, family: Family) -> Option<NaiveDate> {
        self.family_rows(family).map(SetRecord::date).max()
    }

    /// Movements of `family` ranked by set count, most frequent first.
    ///
    /// Equal counts are ordered by movement name so output is reproducible.
    pub fn movements_by_frequency(&self, family: Family) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for row in self.family_rows(family) {
            match counts.iter_mut().find(|(name, _)| *name == row.movement) {
                Some((_, n)) => *n += 1,
                None => counts.push((row.movement.clone(), 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }

    pub fn most_frequent_movement(&self, family: Family) -> Option<String> {
        self.movements_by_frequency(family)
            .into_iter()
            .next()
            .map(|(name, _)| name)
    }
}
