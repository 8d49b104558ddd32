pub mod advertiser;

pub use advertiser::{Advertiser, AdvertiserUpdate, NewAdvertiser};
