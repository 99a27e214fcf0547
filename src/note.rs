use serde_derive::{Deserialize, Serialize};

use crate::{frequency_to_name, midi_to_frequency, Hz, Micros, MidiKey};

/// A source of audio samples addressed by time local to a note
pub trait Signal {
    /// Get the sample at a local time. The time may be negative or past the
    /// end of the note, and what to produce then is up to the signal.
    fn sample(&mut self, t: Micros) -> f32;
}

impl<F> Signal for F
where
    F: FnMut(Micros) -> f32,
{
    fn sample(&mut self, t: Micros) -> f32 {
        self(t)
    }
}

/// Something that can be told which note to play
pub trait Musical {
    /// Set the duration and pitch to play, replacing whatever was set before
    fn set_note(&mut self, duration: Micros, pitch: Hz);
}

/// A single note
///
/// The note sounds over the half-open window `[position, position + duration)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    position: Micros,
    duration: Micros,
    pitch: Hz,
}

impl Note {
    /// Create a new note from its absolute start time, its duration and its
    /// pitch in hertz
    pub fn new(position: Micros, duration: Micros, pitch: Hz) -> Note {
        Note {
            position,
            duration,
            pitch,
        }
    }
    /// Create a new note pitched at a MIDI key. Keys outside of the pitch
    /// table give a pitch of 0.
    pub fn from_midi(position: Micros, duration: Micros, midi: MidiKey) -> Note {
        Note::new(position, duration, midi_to_frequency(midi))
    }
    /// Get the absolute time this note starts at
    pub fn position(&self) -> Micros {
        self.position
    }
    /// Get how long the note is held down
    pub fn duration(&self) -> Micros {
        self.duration
    }
    /// Get the pitch in hertz
    pub fn pitch(&self) -> Hz {
        self.pitch
    }
    /// Get the first absolute time after the note has ended, clamped to the
    /// range of [`Micros`]
    pub fn end(&self) -> Micros {
        self.position.saturating_add(self.duration)
    }
    /// Get the name of this note's pitch
    pub fn name(&self) -> &'static str {
        frequency_to_name(self.pitch)
    }
    /// Converts from an absolute time to a time local to this note, where 0 is
    /// the start of the note.
    ///
    /// The result can be fed straight into an envelope or instrument, but it
    /// does not mean anything outside the life of the note. Overflow wraps.
    pub fn to_local_time(&self, us: Micros) -> Micros {
        us.wrapping_sub(self.position)
    }
    /// Check if an absolute time falls while this note is playing
    pub fn is_inside(&self, us: Micros) -> bool {
        let t = self.to_local_time(us);
        0 <= t && t < self.duration
    }
    /// Configure an instrument to play this note
    pub fn configure<M>(&self, musical: &mut M)
    where
        M: Musical + ?Sized,
    {
        musical.set_note(self.duration, self.pitch);
    }
    /// Get a sample from a signal at an absolute time.
    ///
    /// This does not check [`Note::is_inside`].
    pub fn sample<S>(&self, signal: &mut S, us: Micros) -> f32
    where
        S: Signal + ?Sized,
    {
        signal.sample(self.to_local_time(us))
    }
}
