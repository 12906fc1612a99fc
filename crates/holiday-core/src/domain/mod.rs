//! Domain model (years, records, locations, publish results, errors).

pub mod errors;
pub mod location;
pub mod publish;
pub mod record;
pub mod state;
pub mod year;

pub use self::errors::{PushTarget, UpdateError};
pub use self::location::StorageLocation;
pub use self::publish::{COMMIT_HEADER, DiffSummary, PublishResult, TagName};
pub use self::record::{HolidayDay, HolidayRecord};
pub use self::state::RunState;
pub use self::year::{EPOCH_YEAR, Year};
