mod event;
mod metadata;

pub use event::{Event, EventBuilder, Properties};
pub use metadata::Metadata;

pub mod prelude {
    pub use crate::{Event, EventBuilder, Metadata, Properties};
}
