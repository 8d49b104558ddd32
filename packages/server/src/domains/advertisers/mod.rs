pub mod models;

pub use models::{Advertiser, AdvertiserUpdate, NewAdvertiser};
