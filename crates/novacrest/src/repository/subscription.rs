//! Email subscription repository.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use thiserror::Error;

use super::models::{NewSubscription, SubscriptionRecord};
use super::pool::{DbError, DbPool};
use super::util::{is_unique_violation, parse_datetime};
use crate::models::{validate_email, Subscription, ValidationError};
use crate::schema::email_subscriptions;
use crate::with_conn;

/// Errors from subscribing an address.
#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("This email is already subscribed.")]
    AlreadySubscribed,
    #[error("database error: {0}")]
    Database(#[from] DbError),
}

impl From<SubscriptionRecord> for Subscription {
    fn from(record: SubscriptionRecord) -> Self {
        Subscription {
            id: record.id,
            email: record.email,
            subscribed_at: parse_datetime(&record.subscribed_at),
        }
    }
}

#[derive(Clone)]
pub struct SubscriptionRepository {
    pool: DbPool,
}

impl SubscriptionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Subscription>, DbError> {
        with_conn!(self.pool, conn, {
            let records = email_subscriptions::table
                .order(email_subscriptions::id.asc())
                .load::<SubscriptionRecord>(&mut conn)
                .await?;
            Ok(records.into_iter().map(Subscription::from).collect())
        })
    }

    /// Validate and store an address. Duplicates are reported as
    /// [`SubscriptionError::AlreadySubscribed`].
    pub async fn subscribe(&self, email: &str) -> Result<Subscription, SubscriptionError> {
        let email = validate_email(email)?;
        let now = Utc::now().to_rfc3339();

        with_conn!(self.pool, conn, {
            let inserted = diesel::insert_into(email_subscriptions::table)
                .values(NewSubscription {
                    email: &email,
                    subscribed_at: &now,
                })
                .execute(&mut conn)
                .await;

            match inserted {
                Ok(_) => {}
                Err(e) if is_unique_violation(&e) => {
                    return Err(SubscriptionError::AlreadySubscribed);
                }
                Err(e) => return Err(e.into()),
            }

            let record = email_subscriptions::table
                .filter(email_subscriptions::email.eq(&email))
                .first::<SubscriptionRecord>(&mut conn)
                .await?;
            Ok(Subscription::from(record))
        })
    }
}
