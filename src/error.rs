use thiserror::Error;

use crate::{Hz, MidiKey};

/// The pitch lookup error type
///
/// The public conversion functions never return this. They collapse it into
/// the matching sentinel value instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PitchError {
    /// The MIDI key is below or above the modeled piano range
    #[error("MIDI key {0} is outside the modeled range")]
    MidiOutOfRange(MidiKey),
    /// No table entry has this frequency
    #[error("No pitch has a frequency of {0} Hz")]
    UnknownFrequency(Hz),
    /// No table entry has this name
    #[error("Unknown pitch name: {0:?}")]
    UnknownName(String),
}

/// The pitch lookup result type
pub type PitchResult<T> = Result<T, PitchError>;
