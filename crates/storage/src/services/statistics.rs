//! Read-side rollups over a runner's registrations and results.
//!
//! Nothing is cached: the profile repository loads the full history in one
//! query and these functions fold it into the dashboard figures.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use crate::dto::profile::{ActivityItem, ActivityKind, BestTimes, PersonalRecord, RunnerStatistics};
use crate::models::{FinishTime, PaymentStatus, ResultStatus};

const RECENT_PER_KIND: usize = 5;
const RECENT_TOTAL: usize = 10;

/// One registration of the runner, with its race context and optional result.
#[derive(Debug, Clone, FromRow)]
pub struct HistoryEntry {
    pub registration_id: Uuid,
    pub registered_at: NaiveDateTime,
    pub payment_status: PaymentStatus,
    pub race_id: Uuid,
    pub race_name: String,
    pub race_date: NaiveDate,
    pub distance_name: String,
    pub distance_km: Decimal,
    pub result_status: Option<ResultStatus>,
    #[sqlx(rename = "finish_time_seconds")]
    pub finish_time: Option<FinishTime>,
    pub overall_rank: Option<i32>,
}

impl HistoryEntry {
    fn is_finished(&self) -> bool {
        self.result_status == Some(ResultStatus::Finished)
    }

    fn finished_time(&self) -> Option<FinishTime> {
        if self.is_finished() { self.finish_time } else { None }
    }
}

/// Standard race distances used for personal bests. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceBand {
    FiveK,
    TenK,
    HalfMarathon,
    Marathon,
}

impl DistanceBand {
    pub const ALL: [DistanceBand; 4] = [
        DistanceBand::FiveK,
        DistanceBand::TenK,
        DistanceBand::HalfMarathon,
        DistanceBand::Marathon,
    ];

    pub fn bounds(self) -> (Decimal, Decimal) {
        match self {
            Self::FiveK => (Decimal::new(45, 1), Decimal::new(55, 1)),
            Self::TenK => (Decimal::new(95, 1), Decimal::new(105, 1)),
            Self::HalfMarathon => (Decimal::from(20), Decimal::from(22)),
            Self::Marathon => (Decimal::from(41), Decimal::from(43)),
        }
    }

    pub fn for_distance(distance_km: Decimal) -> Option<Self> {
        Self::ALL.into_iter().find(|band| {
            let (low, high) = band.bounds();
            distance_km >= low && distance_km <= high
        })
    }
}

pub fn summarize(history: &[HistoryEntry], today: NaiveDate) -> RunnerStatistics {
    let mut stats = RunnerStatistics::default();

    for entry in history {
        stats.total_registrations += 1;

        match entry.payment_status {
            PaymentStatus::Paid if entry.race_date > today => stats.active_registrations += 1,
            PaymentStatus::Cancelled => stats.cancelled_registrations += 1,
            _ => {}
        }

        if entry.is_finished() {
            stats.completed_races += 1;
            stats.total_distance_km += entry.distance_km;
        }

        if let Some(rank) = entry.overall_rank {
            if rank <= 3 {
                stats.top_three_finishes += 1;
            }
            if rank <= 10 {
                stats.top_ten_finishes += 1;
            }
        }
    }

    stats
}

pub fn best_times(history: &[HistoryEntry]) -> BestTimes {
    let mut best = BestTimes::default();

    for entry in history {
        let (Some(time), Some(band)) = (
            entry.finished_time(),
            DistanceBand::for_distance(entry.distance_km),
        ) else {
            continue;
        };

        let slot = match band {
            DistanceBand::FiveK => &mut best.best_5k,
            DistanceBand::TenK => &mut best.best_10k,
            DistanceBand::HalfMarathon => &mut best.best_half_marathon,
            DistanceBand::Marathon => &mut best.best_marathon,
        };

        if slot.is_none_or(|current| time < current) {
            *slot = Some(time);
        }
    }

    best
}

/// Fastest finish per exact (distance, distance name), shortest distance first.
pub fn personal_records(history: &[HistoryEntry]) -> Vec<PersonalRecord> {
    let mut fastest: BTreeMap<(Decimal, &str), (&HistoryEntry, FinishTime)> = BTreeMap::new();

    for entry in history {
        let Some(time) = entry.finished_time() else {
            continue;
        };

        fastest
            .entry((entry.distance_km.normalize(), entry.distance_name.as_str()))
            .and_modify(|best| {
                if time < best.1 || (time == best.1 && entry.race_date < best.0.race_date) {
                    *best = (entry, time);
                }
            })
            .or_insert((entry, time));
    }

    fastest
        .into_values()
        .map(|(entry, time)| PersonalRecord {
            distance_km: entry.distance_km,
            distance_name: entry.distance_name.clone(),
            best_time: time,
            race_id: entry.race_id,
            race_name: entry.race_name.clone(),
            race_date: entry.race_date,
        })
        .collect()
}

/// Latest registrations and results merged into one feed, newest first.
pub fn recent_activity(history: &[HistoryEntry]) -> Vec<ActivityItem> {
    let mut registrations: Vec<&HistoryEntry> = history.iter().collect();
    registrations.sort_by(|a, b| b.registered_at.cmp(&a.registered_at));

    let mut results: Vec<&HistoryEntry> = history
        .iter()
        .filter(|entry| entry.result_status.is_some())
        .collect();
    results.sort_by(|a, b| b.race_date.cmp(&a.race_date));

    let mut feed: Vec<ActivityItem> = registrations
        .into_iter()
        .take(RECENT_PER_KIND)
        .map(|entry| ActivityItem {
            kind: ActivityKind::Registration,
            activity_date: entry.registered_at,
            registration_id: entry.registration_id,
            race_name: entry.race_name.clone(),
            distance_name: entry.distance_name.clone(),
            payment_status: Some(entry.payment_status),
            result_status: None,
            finish_time: None,
        })
        .chain(results.into_iter().take(RECENT_PER_KIND).map(|entry| ActivityItem {
            kind: ActivityKind::Result,
            activity_date: entry.race_date.and_time(NaiveTime::MIN),
            registration_id: entry.registration_id,
            race_name: entry.race_name.clone(),
            distance_name: entry.distance_name.clone(),
            payment_status: None,
            result_status: entry.result_status,
            finish_time: entry.finish_time,
        }))
        .collect();

    feed.sort_by(|a, b| b.activity_date.cmp(&a.activity_date));
    feed.truncate(RECENT_TOTAL);
    feed
}
