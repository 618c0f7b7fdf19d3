//! Background task mailing upcoming-stay reminders.
//!
//! Every tick selects confirmed bookings whose check-in falls within the
//! next `days_before` days and that have not been reminded yet. A booking
//! is flagged only after its mail went out, so a failed send is retried on
//! the next tick.

use std::sync::Arc;

use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{debug, info, warn};

use crate::application::ports::{MailMessage, Mailer};
use crate::domain::booking::Booking;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::DomainResult;
use crate::shared::shutdown::ShutdownSignal;

#[derive(Debug, Clone, Copy)]
pub struct ReminderSettings {
    pub interval_secs: u64,
    pub days_before: i64,
}

pub struct BookingReminder {
    repos: Arc<dyn RepositoryProvider>,
    mailer: Arc<dyn Mailer>,
    settings: ReminderSettings,
}

impl BookingReminder {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        mailer: Arc<dyn Mailer>,
        settings: ReminderSettings,
    ) -> Self {
        Self {
            repos,
            mailer,
            settings,
        }
    }

    /// Spawn the reminder loop; it exits when `shutdown` fires.
    pub fn start(self: Arc<Self>, shutdown: ShutdownSignal) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                interval_secs = self.settings.interval_secs,
                days_before = self.settings.days_before,
                "⏰ Booking reminder task started"
            );

            let stop = shutdown.notified().wait();
            tokio::pin!(stop);
            let mut interval =
                tokio::time::interval(Duration::from_secs(self.settings.interval_secs.max(1)));

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if let Err(e) = self.run_once(Utc::now().date_naive()).await {
                            warn!(error = %e, "Booking reminder run failed");
                        }
                    }
                    _ = &mut stop => {
                        info!("⏰ Booking reminder task shutting down");
                        break;
                    }
                }
            }
        })
    }

    /// One pass relative to `today`. Returns the number of reminders sent.
    pub async fn run_once(&self, today: NaiveDate) -> DomainResult<usize> {
        let until = today + ChronoDuration::days(self.settings.days_before.max(0));
        let due = self.repos.bookings().find_due_reminders(today, until).await?;
        if due.is_empty() {
            debug!("No booking reminders due");
            return Ok(0);
        }

        let mut sent = 0;
        for booking in due {
            match self.remind(&booking).await {
                Ok(true) => sent += 1,
                Ok(false) => {}
                Err(e) => {
                    warn!(booking_id = %booking.booking_id, error = %e, "Reminder not sent");
                }
            }
        }

        if sent > 0 {
            info!(sent, "Booking reminders sent");
        }
        Ok(sent)
    }

    async fn remind(&self, booking: &Booking) -> DomainResult<bool> {
        let Some(user) = self.repos.users().find_by_id(booking.user_id).await? else {
            return Ok(false);
        };
        if !user.is_active {
            return Ok(false);
        }
        let property_name = self
            .repos
            .properties()
            .find_by_id(booking.property_id)
            .await?
            .map(|p| p.property_name)
            .unwrap_or_else(|| format!("property #{}", booking.property_id));

        let body = format!(
            "Hello {},\n\nThis is a reminder of your upcoming stay at {}.\n\n\
             Booking: {}\nCheck-in: {}\nCheck-out: {}\nGuests: {}\n",
            user.first_name,
            property_name,
            booking.booking_id,
            booking.check_in,
            booking.check_out,
            booking.no_of_guests
        );
        self.mailer
            .send(MailMessage::new(
                &user.email,
                format!("Upcoming stay at {}", property_name),
                body,
            ))
            .await?;

        self.repos.bookings().mark_reminder_sent(booking.id).await?;
        metrics::counter!("booking_reminders_sent_total").increment(1);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::mailer::testing::RecordingMailer;
    use crate::application::services::test_support::fixture;
    use crate::domain::booking::{NewBooking, StayOutcome};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, d).unwrap()
    }

    async fn book(repos: &Arc<dyn RepositoryProvider>, property_id: i32, user_id: i32, check_in: u32) {
        let outcome = repos
            .bookings()
            .reserve(
                NewBooking {
                    property_id,
                    user_id,
                    check_in: day(check_in),
                    check_out: day(check_in + 2),
                    no_of_guests: 2,
                    notes: None,
                    created_by: None,
                },
                2030,
            )
            .await
            .unwrap();
        assert!(matches!(outcome, StayOutcome::Saved(_)));
    }

    fn settings() -> ReminderSettings {
        ReminderSettings {
            interval_secs: 3600,
            days_before: 3,
        }
    }

    #[tokio::test]
    async fn reminds_due_bookings_once() {
        let fx = fixture().await;
        book(&fx.repos, fx.property.id, fx.owner.id, 3).await;
        book(&fx.repos, fx.property.id, fx.owner.id, 20).await;

        let mailer = Arc::new(RecordingMailer::default());
        let reminder = BookingReminder::new(fx.repos.clone(), mailer.clone(), settings());

        assert_eq!(reminder.run_once(day(1)).await.unwrap(), 1);
        assert_eq!(reminder.run_once(day(1)).await.unwrap(), 0);

        let sent = mailer.messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "owner@example.com");
        assert!(sent[0].body.contains("Lake House"));
    }

    #[tokio::test]
    async fn failed_send_is_retried_next_run() {
        let fx = fixture().await;
        book(&fx.repos, fx.property.id, fx.owner.id, 2).await;

        let failing = BookingReminder::new(
            fx.repos.clone(),
            Arc::new(RecordingMailer::failing()),
            settings(),
        );
        assert_eq!(failing.run_once(day(1)).await.unwrap(), 0);

        let working = BookingReminder::new(
            fx.repos.clone(),
            Arc::new(RecordingMailer::default()),
            settings(),
        );
        assert_eq!(working.run_once(day(1)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn task_stops_on_shutdown() {
        let fx = fixture().await;
        let reminder = Arc::new(BookingReminder::new(
            fx.repos.clone(),
            Arc::new(RecordingMailer::default()),
            settings(),
        ));
        let shutdown = ShutdownSignal::new();
        let handle = reminder.start(shutdown.clone());
        shutdown.trigger();
        tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
