pub mod fields;
pub mod fingerprint;

pub use fields::FeedFields;
pub use fingerprint::Fingerprint;
