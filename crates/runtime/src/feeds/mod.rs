pub mod messari;
pub mod pool_account;
pub mod price_file;
pub mod spot_price;

pub use messari::{parse_messari_body, HttpMessariClient, ParseMessariError};
pub use pool_account::{parse_pool_profile, HttpPoolAccountClient, ParsePoolProfileError};
pub use price_file::{append_rows, parse_price_file, JsonPriceFile, ParsePriceFileError};
pub use spot_price::{parse_tobtc_body, HttpSpotPriceClient, ParseSpotPriceError};
