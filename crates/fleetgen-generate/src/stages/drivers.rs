use chrono::{Duration, NaiveDate};
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};

use fleetgen_core::records::{Driver, DriverStatus};

use crate::rng::RandomContext;

const ACTIVE_PROBABILITY: f64 = 0.95;

/// Generate exactly `count` drivers.
///
/// License expiries spread from a month before `reference` to three years
/// after it, so a small share of trips can legitimately trip the
/// expired-license validation check.
pub fn generate(count: u64, reference: NaiveDate, ctx: &mut RandomContext) -> Vec<Driver> {
    let mut drivers = Vec::with_capacity(count as usize);

    for id in 1..=count {
        let first_name: String = FirstName().fake_with_rng(ctx.rng());
        let last_name: String = LastName().fake_with_rng(ctx.rng());
        let license_number = ctx.int_between(1_000_000_000, 9_999_999_999).to_string();
        let license_expiry = reference + Duration::days(ctx.int_between(-30, 3 * 365));
        let phone = format!("3{}", ctx.int_between(100_000_000, 999_999_999));
        let hire_date = reference - Duration::days(ctx.int_between(7, 5 * 365));
        let status = if ctx.chance(ACTIVE_PROBABILITY) {
            DriverStatus::Active
        } else {
            DriverStatus::Inactive
        };

        drivers.push(Driver {
            id: id as u32,
            employee_code: format!("EMP{id:04}"),
            first_name,
            last_name,
            license_number,
            license_expiry,
            phone,
            hire_date,
            status,
        });
    }

    drivers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn exact_count_with_stable_codes() {
        let mut ctx = RandomContext::new(61);
        let drivers = generate(25, reference(), &mut ctx);
        assert_eq!(drivers.len(), 25);
        assert_eq!(drivers[0].employee_code, "EMP0001");
        assert_eq!(drivers[24].employee_code, "EMP0025");
    }

    #[test]
    fn license_and_phone_shapes() {
        let mut ctx = RandomContext::new(62);
        for driver in generate(40, reference(), &mut ctx) {
            assert_eq!(driver.license_number.len(), 10);
            assert_eq!(driver.phone.len(), 10);
            assert!(driver.phone.starts_with('3'));
            assert!(driver.hire_date < reference());
        }
    }
}
