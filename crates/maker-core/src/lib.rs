//! maker-core: Piano-roll track model for the maker sequencer

pub mod config;
mod error;
mod instrument;
mod key;
pub mod playback;
mod segment;
mod segments;
mod track;

pub use config::{TrackConfig, DEFAULT_SIZE, TEMPO};
pub use error::{MakerError, Result};
pub use instrument::{Instrument, DEFAULT_INSTRUMENT};
pub use key::Key;
pub use playback::{ParamsIter, PlayEvent, PlayParameters, PlayParams};
pub use segment::{Segment, SegmentId, SegmentPatch};
pub use segments::Segments;
pub use track::Track;
