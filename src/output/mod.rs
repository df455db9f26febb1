mod traits;

pub use traits::{OutputError, PointerSink};
