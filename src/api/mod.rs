pub mod njlottery;

pub use njlottery::{decode_catalog, fetch_catalog, ApiConfig, HttpTransport, RawResponse, Transport};
