//! Row entities as they come off the wire, plus conversions into the typed
//! domain structs in ops_core. Enum columns are stored as text; decoding a
//! row with an unknown enum string is a data-layer error, not a panic.

mod rows;

pub use rows::*;
