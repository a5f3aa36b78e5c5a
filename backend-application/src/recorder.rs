use tracing::{error, info, warn};

use backend_domain::ports::{Collection, Document, RecordStore, SetField};
use backend_domain::{AttendanceState, EventId, EventRecord, ScanAction, UserId};

use crate::ScanError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recorded {
    pub state: AttendanceState,
    pub already_recorded: bool,
}

/// Applies a validated scan to the event and user documents.
///
/// Every write is a set-union, so replaying any prefix of the sequence is
/// harmless. Nothing is retried or rolled back here.
pub struct AttendanceRecorder<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> AttendanceRecorder<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    /// `event` is the snapshot the scan was validated against.
    pub async fn record(
        &self,
        event_id: &EventId,
        event: &EventRecord,
        action: ScanAction,
        user: &UserId,
    ) -> Result<Recorded, ScanError> {
        match action {
            ScanAction::CheckIn => self.check_in(event_id, event, user).await,
            ScanAction::CheckOut => self.check_out(event_id, event, user).await,
        }
    }

    async fn check_in(
        &self,
        event_id: &EventId,
        event: &EventRecord,
        user: &UserId,
    ) -> Result<Recorded, ScanError> {
        let already_recorded = event.has_checked_in(user);
        self.union(event_id.as_str(), SetField::CheckedInUsers, user.as_str())
            .await?;
        info!("user {} checked in to {}", user, event_id);

        Ok(Recorded {
            state: AttendanceState::from_membership(
                true,
                event.has_checked_out(user),
                event.is_attendee(user),
            ),
            already_recorded,
        })
    }

    async fn check_out(
        &self,
        event_id: &EventId,
        event: &EventRecord,
        user: &UserId,
    ) -> Result<Recorded, ScanError> {
        let checked_in = event.has_checked_in(user);
        self.union(event_id.as_str(), SetField::CheckedOutUsers, user.as_str())
            .await?;

        if !checked_in {
            warn!(
                "user {} checked out of {} without a prior check-in; attendance not confirmed",
                user, event_id
            );
            return Ok(Recorded {
                state: AttendanceState::from_membership(false, true, event.is_attendee(user)),
                already_recorded: event.has_checked_out(user),
            });
        }

        self.confirm(event_id, user).await?;
        info!("attendance confirmed for user {} at {}", user, event_id);
        Ok(Recorded {
            state: AttendanceState::AttendanceConfirmed,
            already_recorded: event.has_checked_out(user) && event.is_attendee(user),
        })
    }

    /// The paired confirmation writes: user into the event's attendees, then
    /// event into the user's history. Not atomic across the two documents.
    pub async fn confirm(&self, event_id: &EventId, user: &UserId) -> Result<(), ScanError> {
        self.union(event_id.as_str(), SetField::Attendees, user.as_str())
            .await?;
        if let Err(err) = self.record_history(event_id, user).await {
            warn!(
                "user {} is an attendee of {} but their history was not updated",
                user, event_id
            );
            return Err(err);
        }
        Ok(())
    }

    /// Adds the event to the user's history, creating the user document
    /// first when this is their first recorded event.
    pub async fn record_history(&self, event_id: &EventId, user: &UserId) -> Result<(), ScanError> {
        self.store
            .merge(Collection::Users, user.as_str(), Document::new())
            .await
            .map_err(|err| {
                error!("failed to provision users/{}: {}", user, err);
                ScanError::RecordWrite(err)
            })?;
        self.union(user.as_str(), SetField::EventsAttended, event_id.as_str())
            .await
    }

    async fn union(&self, key: &str, field: SetField, value: &str) -> Result<(), ScanError> {
        self.store
            .array_union(key, field, value)
            .await
            .map_err(|err| {
                error!(
                    "failed to add '{}' to {}/{}.{}: {}",
                    value,
                    field.collection().as_str(),
                    key,
                    field.as_str(),
                    err
                );
                ScanError::RecordWrite(err)
            })
    }
}
