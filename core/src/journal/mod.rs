mod error;
mod event;
mod reader;

pub use error::ReaderError;
pub use event::{
    JournalEvent, MissionAccepted, MissionId, MissionKey, MissionRedirected, parse_line,
};
pub use reader::{JournalEvents, Reader, read_events};
