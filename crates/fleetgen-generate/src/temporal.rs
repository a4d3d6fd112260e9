//! Trip timing: peaked departure hours, slot-centered delivery schedules,
//! and the on-time/late delivery outcome split.

use chrono::{Duration, NaiveDateTime};
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use crate::errors::GenerationError;
use crate::rng::RandomContext;

/// Earliest hour a trip departs.
pub const FIRST_DEPARTURE_HOUR: u32 = 6;
/// Latest hour a trip departs.
pub const LAST_DEPARTURE_HOUR: u32 = 22;

// Relative weights for hours 6..=22: morning peak 8-10, afternoon peak
// 14-16, nothing outside the working window.
const HOUR_WEIGHTS: [u32; 17] = [4, 6, 10, 10, 8, 6, 5, 5, 9, 9, 8, 6, 6, 4, 2, 2, 1];

/// Gap between deliveries when the trip is still in progress.
pub const DEFAULT_GAP_HOURS: f64 = 0.5;
/// Minimum trip duration used for slotting deliveries.
pub const MIN_TRIP_HOURS: f64 = 1.0;

const ON_TIME_PROBABILITY: f64 = 0.90;
const SIGNATURE_PROBABILITY: f64 = 0.95;

/// Hour-of-day sampler with zero mass outside the working window and two
/// peak bands.
#[derive(Debug, Clone)]
pub struct DepartureHours {
    index: WeightedIndex<u32>,
}

impl DepartureHours {
    pub fn new() -> Result<Self, GenerationError> {
        let index = WeightedIndex::new(HOUR_WEIGHTS)
            .map_err(|err| GenerationError::Distribution(err.to_string()))?;
        Ok(Self { index })
    }

    /// Draw an hour in `[6, 22]`. A degenerate draw below the window is
    /// clamped up to the first departure hour.
    pub fn draw(&self, ctx: &mut RandomContext) -> u32 {
        let hour = FIRST_DEPARTURE_HOUR + self.index.sample(ctx.rng()) as u32;
        hour.max(FIRST_DEPARTURE_HOUR)
    }
}

/// Even time gap between `deliveries` sub-events of a trip, in hours.
///
/// A known arrival spreads the deliveries over the real duration (floored
/// at one hour); an in-progress trip falls back to a fixed half-hour gap.
pub fn delivery_gap_hours(
    departure: NaiveDateTime,
    arrival: Option<NaiveDateTime>,
    deliveries: u32,
) -> f64 {
    match arrival {
        Some(arrival) => {
            let hours = (arrival - departure).num_seconds() as f64 / 3600.0;
            hours.max(MIN_TRIP_HOURS) / f64::from(deliveries.max(1))
        }
        None => DEFAULT_GAP_HOURS,
    }
}

/// Scheduled timestamp of delivery `slot` (0-based): deliveries sit at the
/// center of their slot, not on its boundary.
pub fn slot_timestamp(departure: NaiveDateTime, gap_hours: f64, slot: u32) -> NaiveDateTime {
    let offset_secs = (gap_hours * (f64::from(slot) + 0.5) * 3600.0) as i64;
    departure + Duration::seconds(offset_secs)
}

/// Resolution of a single delivery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeliveryOutcome {
    Delivered {
        at: NaiveDateTime,
        signature: bool,
    },
    /// Parent trip still in progress; no delivered timestamp yet.
    Pending,
}

/// Resolve a delivery against its schedule: completed trips deliver 90%
/// on time (±30 min) and 10% late (+60 to +180 min); in-progress trips
/// leave the delivery pending.
pub fn resolve_outcome(
    scheduled: NaiveDateTime,
    trip_completed: bool,
    ctx: &mut RandomContext,
) -> DeliveryOutcome {
    if !trip_completed {
        return DeliveryOutcome::Pending;
    }

    let minutes = if ctx.chance(ON_TIME_PROBABILITY) {
        ctx.int_between(-30, 30)
    } else {
        ctx.int_between(60, 180)
    };

    DeliveryOutcome::Delivered {
        at: scheduled + Duration::minutes(minutes),
        signature: ctx.chance(SIGNATURE_PROBABILITY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn hours_stay_in_the_working_window() {
        let hours = DepartureHours::new().expect("valid weights");
        let mut ctx = RandomContext::new(21);
        for _ in 0..10_000 {
            let hour = hours.draw(&mut ctx);
            assert!((FIRST_DEPARTURE_HOUR..=LAST_DEPARTURE_HOUR).contains(&hour));
        }
    }

    #[test]
    fn peak_bands_dominate_shoulders() {
        let hours = DepartureHours::new().expect("valid weights");
        let mut ctx = RandomContext::new(22);
        let mut histogram = [0_u32; 24];
        for _ in 0..50_000 {
            histogram[hours.draw(&mut ctx) as usize] += 1;
        }
        let morning_peak: u32 = histogram[8..=10].iter().sum();
        let afternoon_peak: u32 = histogram[14..=16].iter().sum();
        let evening: u32 = histogram[19..=22].iter().sum();
        assert!(morning_peak > evening);
        assert!(afternoon_peak > evening);
        assert_eq!(histogram[..6].iter().sum::<u32>(), 0);
        assert_eq!(histogram[23], 0);
    }

    #[test]
    fn gap_spreads_known_duration_evenly() {
        let departure = dt(2024, 3, 1, 8);
        let arrival = Some(dt(2024, 3, 1, 16));
        assert_eq!(delivery_gap_hours(departure, arrival, 4), 2.0);
    }

    #[test]
    fn gap_floors_short_trips_at_one_hour() {
        let departure = dt(2024, 3, 1, 8);
        let arrival = Some(departure + Duration::minutes(10));
        assert_eq!(delivery_gap_hours(departure, arrival, 2), 0.5);
    }

    #[test]
    fn in_progress_trips_use_the_default_gap() {
        let departure = dt(2024, 3, 1, 8);
        assert_eq!(delivery_gap_hours(departure, None, 4), DEFAULT_GAP_HOURS);
    }

    #[test]
    fn slots_are_centered_inside_the_window() {
        let departure = dt(2024, 3, 1, 8);
        let arrival = dt(2024, 3, 1, 16);
        let gap = delivery_gap_hours(departure, Some(arrival), 4);
        for slot in 0..4 {
            let scheduled = slot_timestamp(departure, gap, slot);
            assert!(scheduled > departure);
            assert!(scheduled < arrival);
        }
        assert_eq!(slot_timestamp(departure, gap, 0), dt(2024, 3, 1, 9));
    }

    #[test]
    fn completed_outcomes_stay_near_the_schedule() {
        let mut ctx = RandomContext::new(33);
        let scheduled = dt(2024, 3, 1, 10);
        for _ in 0..2_000 {
            match resolve_outcome(scheduled, true, &mut ctx) {
                DeliveryOutcome::Delivered { at, .. } => {
                    assert!(at >= scheduled - Duration::minutes(30));
                    assert!(at <= scheduled + Duration::minutes(180));
                }
                DeliveryOutcome::Pending => panic!("completed trip delivery left pending"),
            }
        }
    }

    #[test]
    fn in_progress_trips_leave_deliveries_pending() {
        let mut ctx = RandomContext::new(34);
        let scheduled = dt(2024, 3, 1, 10);
        assert_eq!(
            resolve_outcome(scheduled, false, &mut ctx),
            DeliveryOutcome::Pending
        );
    }
}
