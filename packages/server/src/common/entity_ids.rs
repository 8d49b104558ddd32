//! Typed id aliases for every persisted entity.

pub use super::id::Id;

/// Marker for operator accounts (identity comes from the session token).
pub struct Operator;

/// Marker for advertisers (clients).
pub struct Advertiser;

/// Marker for content records.
pub struct Content;

/// Marker for notification log rows.
pub struct Notification;

pub type OperatorId = Id<Operator>;
pub type AdvertiserId = Id<Advertiser>;
pub type ContentId = Id<Content>;
pub type NotificationId = Id<Notification>;
