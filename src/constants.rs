/// Maximum film description length, counted in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

/// Cinema epoch: the first public film screening (28 December 1895).
/// Release dates before this day are rejected.
pub const CINEMA_EPOCH_YEAR: i32 = 1895;
pub const CINEMA_EPOCH_MONTH: u32 = 12;
pub const CINEMA_EPOCH_DAY: u32 = 28;

/// Default tracing filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "filmorate_server=info,tower_http=debug";
