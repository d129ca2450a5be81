//! State-transition rules for the registration ledger.
//!
//! Every function here is pure: the repository loads the current rows inside
//! its transaction, asks these rules what to do, and only then writes.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{DistanceContext, PaymentStatus, RaceStatus, Registration};

/// What a successful registration request turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationPlan {
    Create,
    /// Reuse the cancelled row with this id.
    Reactivate(Uuid),
}

/// The race must be approved and strictly in the future.
pub fn ensure_open_for_registration(distance: &DistanceContext, today: NaiveDate) -> Result<()> {
    if distance.race_status != RaceStatus::Approved {
        return Err(StorageError::InvalidState(
            "Race is not open for registration".to_string(),
        ));
    }

    if distance.race_date <= today {
        return Err(StorageError::InvalidState(
            "Race has already taken place".to_string(),
        ));
    }

    Ok(())
}

/// Decide between a fresh row and reactivating a cancelled one.
///
/// `occupancy` is the number of non-cancelled registrations for the distance
/// and must be read under the same lock as the subsequent write.
pub fn plan_registration(
    existing: Option<&Registration>,
    occupancy: i64,
    max_participants: i32,
) -> Result<RegistrationPlan> {
    if let Some(existing) = existing
        && existing.payment_status.counts_toward_capacity()
    {
        return Err(StorageError::ConstraintViolation(
            "Already registered for this distance".to_string(),
        ));
    }

    if occupancy >= i64::from(max_participants) {
        return Err(StorageError::CapacityExceeded);
    }

    Ok(match existing {
        Some(cancelled) => RegistrationPlan::Reactivate(cancelled.registration_id),
        None => RegistrationPlan::Create,
    })
}

pub fn ensure_payable(status: PaymentStatus) -> Result<()> {
    match status {
        PaymentStatus::Pending => Ok(()),
        PaymentStatus::Paid => Err(StorageError::ConstraintViolation(
            "Registration is already paid".to_string(),
        )),
        PaymentStatus::Cancelled => Err(StorageError::InvalidState(
            "Cannot pay for a cancelled registration".to_string(),
        )),
    }
}

pub fn ensure_cancellable(status: PaymentStatus, race_date: NaiveDate, today: NaiveDate) -> Result<()> {
    if race_date <= today {
        return Err(StorageError::InvalidState(
            "Race has already occurred".to_string(),
        ));
    }

    if status == PaymentStatus::Cancelled {
        return Err(StorageError::InvalidState(
            "Registration is already cancelled".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use rust_decimal::Decimal;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
    }

    fn context(status: RaceStatus, race_date: NaiveDate) -> DistanceContext {
        DistanceContext {
            distance_category_id: Uuid::new_v4(),
            race_id: Uuid::new_v4(),
            race_name: "Lakeside Marathon".to_string(),
            race_location: "Bled".to_string(),
            race_date,
            race_status: status,
            distance_name: "Marathon".to_string(),
            distance_km: Decimal::new(42195, 3),
            registration_fee: Decimal::new(6000, 2),
            max_participants: 1,
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        }
    }

    fn registration(status: PaymentStatus) -> Registration {
        Registration {
            registration_id: Uuid::new_v4(),
            runner_id: Uuid::new_v4(),
            distance_category_id: Uuid::new_v4(),
            registered_at: today().and_hms_opt(10, 0, 0).unwrap(),
            payment_status: status,
            bib_number: None,
        }
    }

    #[test]
    fn test_only_approved_future_races_accept_registrations() {
        let tomorrow = today().succ_opt().unwrap();

        assert!(ensure_open_for_registration(&context(RaceStatus::Approved, tomorrow), today()).is_ok());

        for status in [RaceStatus::Pending, RaceStatus::Rejected, RaceStatus::Cancelled] {
            let err = ensure_open_for_registration(&context(status, tomorrow), today()).unwrap_err();
            assert!(matches!(err, StorageError::InvalidState(_)));
        }

        // race day is already too late
        let err = ensure_open_for_registration(&context(RaceStatus::Approved, today()), today())
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidState(_)));
    }

    #[test]
    fn test_new_runner_gets_a_fresh_row() {
        assert_eq!(plan_registration(None, 0, 10).unwrap(), RegistrationPlan::Create);
    }

    #[test]
    fn test_live_registration_conflicts() {
        for status in [PaymentStatus::Pending, PaymentStatus::Paid] {
            let existing = registration(status);
            let err = plan_registration(Some(&existing), 0, 10).unwrap_err();
            assert!(matches!(err, StorageError::ConstraintViolation(_)));
        }
    }

    #[test]
    fn test_conflict_wins_over_capacity() {
        let existing = registration(PaymentStatus::Pending);
        let err = plan_registration(Some(&existing), 1, 1).unwrap_err();
        assert!(matches!(err, StorageError::ConstraintViolation(_)));
    }

    #[test]
    fn test_full_distance_rejects() {
        let err = plan_registration(None, 5, 5).unwrap_err();
        assert!(matches!(err, StorageError::CapacityExceeded));

        let cancelled = registration(PaymentStatus::Cancelled);
        let err = plan_registration(Some(&cancelled), 5, 5).unwrap_err();
        assert!(matches!(err, StorageError::CapacityExceeded));
    }

    #[test]
    fn test_cancelled_row_is_reused() {
        let cancelled = registration(PaymentStatus::Cancelled);
        assert_eq!(
            plan_registration(Some(&cancelled), 0, 1).unwrap(),
            RegistrationPlan::Reactivate(cancelled.registration_id)
        );
    }

    #[test]
    fn test_payment_transitions() {
        assert!(ensure_payable(PaymentStatus::Pending).is_ok());
        assert!(matches!(
            ensure_payable(PaymentStatus::Paid),
            Err(StorageError::ConstraintViolation(_))
        ));
        assert!(matches!(
            ensure_payable(PaymentStatus::Cancelled),
            Err(StorageError::InvalidState(_))
        ));
    }

    #[test]
    fn test_cancellation_guard() {
        let next_week = NaiveDate::from_ymd_opt(2026, 6, 8).unwrap();
        let last_week = NaiveDate::from_ymd_opt(2026, 5, 25).unwrap();

        assert!(ensure_cancellable(PaymentStatus::Pending, next_week, today()).is_ok());
        assert!(ensure_cancellable(PaymentStatus::Paid, next_week, today()).is_ok());
        assert!(ensure_cancellable(PaymentStatus::Cancelled, next_week, today()).is_err());
        assert!(ensure_cancellable(PaymentStatus::Pending, last_week, today()).is_err());
        assert!(ensure_cancellable(PaymentStatus::Paid, today(), today()).is_err());
    }
}
