mod record;
pub use self::record::{Fetched, Record, RecordCollection};
