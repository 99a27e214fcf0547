#![deny(missing_docs)]

/*!
The note and pitch model under the Ryvm synthesizer.

A [`Note`] is a pitch held over a window of absolute time. The sequencer asks each
note, once per sample, whether it [is sounding](Note::is_inside) and, if so, samples
its signal at the [note's local time](Note::to_local_time).

The pitch table maps the 88 piano keys between their MIDI numbers, their frequencies
and their names. Its conversions never fail. Keys, frequencies and names that are not
in the table give the sentinels [`NO_FREQUENCY`], [`NO_NAME`] and [`FALLBACK_INDEX`],
and the `lookup_*` functions give a [`PitchError`] instead for callers that need to
tell them apart.
*/

macro_rules! mods {
    ($($m:ident),*) => ($(mod $m; pub use $m::*;)*);
}

mods!(consts, error, note, pitch);
