//! The fixed piano-range pitch table
//!
//! Maps between MIDI key numbers 21 (A0) through 108 (C8), their frequencies
//! rounded to whole hertz, and their names. Names put the accidental after the
//! octave, so the key above A4 is `"A4#"`.

use std::{collections::HashMap, convert::TryFrom, fmt};

use itertools::Itertools;
use once_cell::sync::Lazy;
use serde_derive::Serialize;

use crate::{
    Hz, MidiKey, PitchError, PitchResult, FALLBACK_INDEX, KEY_COUNT, LOWEST_MIDI_KEY,
    NO_FREQUENCY, NO_NAME,
};

/// The frequency of every modeled key, starting at MIDI key 21
#[rustfmt::skip]
pub const FREQUENCIES: [Hz; KEY_COUNT] = [
    28, 29, 31, 33, 35, 37, 39, 41, 44, 46, 49, 52, 55, 58, 62, 65, 69, 73, 78,
    82, 87, 93, 98, 104, 110, 117, 123, 131, 139, 147, 156, 165, 175, 185,
    196, 208, 220, 233, 247, 262, 277, 294, 311, 330, 349, 370, 392, 415,
    440, 466, 494, 523, 554, 587, 622, 659, 698, 740, 784, 831, 880, 932,
    988, 1047, 1109, 1175, 1245, 1319, 1397, 1480, 1568, 1661, 1760, 1865,
    1976, 2093, 2217, 2349, 2489, 2637, 2794, 2960, 3136, 3322, 3520, 3729, 3951, 4186,
];

/// The name of every modeled key, starting at MIDI key 21
#[rustfmt::skip]
pub const NAMES: [&str; KEY_COUNT] = [
    "A0", "A0#", "B0",
    "C1", "C1#", "D1", "D1#", "E1", "F1", "F1#", "G1", "G1#", "A1", "A1#", "B1",
    "C2", "C2#", "D2", "D2#", "E2", "F2", "F2#", "G2", "G2#", "A2", "A2#", "B2",
    "C3", "C3#", "D3", "D3#", "E3", "F3", "F3#", "G3", "G3#", "A3", "A3#", "B3",
    "C4", "C4#", "D4", "D4#", "E4", "F4", "F4#", "G4", "G4#", "A4", "A4#", "B4",
    "C5", "C5#", "D5", "D5#", "E5", "F5", "F5#", "G5", "G5#", "A5", "A5#", "B5",
    "C6", "C6#", "D6", "D6#", "E6", "F6", "F6#", "G6", "G6#", "A6", "A6#", "B6",
    "C7", "C7#", "D7", "D7#", "E7", "F7", "F7#", "G7", "G7#", "A7", "A7#", "B7",
    "C8",
];

/// One row of the pitch table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PitchEntry {
    /// The MIDI key number
    pub midi: MidiKey,
    /// The frequency in hertz
    pub hz: Hz,
    /// The pitch name
    pub name: &'static str,
}

impl PitchEntry {
    fn at(index: usize) -> PitchEntry {
        PitchEntry {
            midi: LOWEST_MIDI_KEY + index as MidiKey,
            hz: FREQUENCIES[index],
            name: NAMES[index],
        }
    }
    /// The position of this entry in the table, if its key is in range
    pub fn index(&self) -> Option<usize> {
        index_of(self.midi).ok()
    }
}

impl fmt::Display for PitchEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (MIDI {}, {} Hz)", self.name, self.midi, self.hz)
    }
}

/// Lookups derived from the fixed tables
struct PitchMap {
    names: HashMap<Hz, &'static str>,
    indices: HashMap<&'static str, usize>,
}

impl PitchMap {
    fn build(freqs: &[Hz], names: &[&'static str]) -> PitchMap {
        // Later names for a frequency replace earlier ones, but the frequency
        // keeps the index it first appeared at
        let mut rows: HashMap<Hz, (&'static str, usize)> = HashMap::with_capacity(freqs.len());
        for (i, (&hz, &name)) in freqs.iter().zip_eq(names.iter()).enumerate() {
            rows.entry(hz)
                .and_modify(|row| row.0 = name)
                .or_insert((name, i));
        }
        // A name resolves to the lowest key sharing a frequency with any of its entries
        let mut indices: HashMap<&'static str, usize> = HashMap::with_capacity(rows.len());
        for &(name, i) in rows.values() {
            indices
                .entry(name)
                .and_modify(|j| *j = (*j).min(i))
                .or_insert(i);
        }
        let names: HashMap<Hz, &'static str> =
            rows.into_iter().map(|(hz, (name, _))| (hz, name)).collect();
        log::debug!("built pitch map with {} keys", names.len());
        PitchMap { names, indices }
    }
}

static PITCH_MAP: Lazy<PitchMap> = Lazy::new(|| PitchMap::build(&FREQUENCIES, &NAMES));

/// Build the process-wide pitch lookups
///
/// Lookups build them on first use anyway, so calling this is only a way to
/// move that work to startup. Calling it more than once does nothing.
pub fn build_pitch_map() {
    Lazy::force(&PITCH_MAP);
}

fn index_of(midi: MidiKey) -> PitchResult<usize> {
    midi.checked_sub(LOWEST_MIDI_KEY)
        .and_then(|i| usize::try_from(i).ok())
        .filter(|&i| i < KEY_COUNT)
        .ok_or(PitchError::MidiOutOfRange(midi))
}

/// Get the table entry for a MIDI key
pub fn entry(midi: MidiKey) -> Option<PitchEntry> {
    index_of(midi).ok().map(PitchEntry::at)
}

/// Iterate over every table entry in ascending MIDI order
pub fn entries() -> impl Iterator<Item = PitchEntry> {
    (0..KEY_COUNT).map(PitchEntry::at)
}

/// Get the frequency of a MIDI key
pub fn lookup_frequency(midi: MidiKey) -> PitchResult<Hz> {
    index_of(midi).map(|i| FREQUENCIES[i])
}

/// Get the name of the key with exactly this frequency
pub fn lookup_name(hz: Hz) -> PitchResult<&'static str> {
    PITCH_MAP
        .names
        .get(&hz)
        .copied()
        .ok_or(PitchError::UnknownFrequency(hz))
}

/// Get the table index of the key with this name
pub fn lookup_index(name: &str) -> PitchResult<usize> {
    PITCH_MAP
        .indices
        .get(name)
        .copied()
        .ok_or_else(|| PitchError::UnknownName(name.into()))
}

/// Converts from a MIDI key to a frequency in hertz.
///
/// Keys outside of 21..=108 are valid MIDI but not modeled, and give
/// [`NO_FREQUENCY`].
pub fn midi_to_frequency(midi: MidiKey) -> Hz {
    lookup_frequency(midi).unwrap_or(NO_FREQUENCY)
}

/// Converts from an exact frequency to a pitch name, or [`NO_NAME`]
pub fn frequency_to_name(hz: Hz) -> &'static str {
    lookup_name(hz).unwrap_or(NO_NAME)
}

/// Converts from a pitch name like `"C4"` to its index in the table.
///
/// Unknown names give [`FALLBACK_INDEX`], which is also the index of A0.
/// Use [`lookup_index`] to tell the two apart.
pub fn name_to_index(name: &str) -> usize {
    lookup_index(name).unwrap_or(FALLBACK_INDEX)
}

/// Converts from a MIDI key to a pitch name, or [`NO_NAME`]
pub fn midi_to_name(midi: MidiKey) -> &'static str {
    entry(midi).map_or(NO_NAME, |entry| entry.name)
}

/// Converts from a pitch name to a MIDI key
pub fn name_to_midi(name: &str) -> Option<MidiKey> {
    lookup_index(name)
        .ok()
        .map(|i| LOWEST_MIDI_KEY + i as MidiKey)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{A4_HZ, A4_MIDI_KEY, HIGHEST_MIDI_KEY};

    #[test]
    fn tables_line_up() {
        assert_eq!(FREQUENCIES.len(), NAMES.len());
        assert!(FREQUENCIES.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(FREQUENCIES[0], 28);
        assert_eq!(NAMES[KEY_COUNT - 1], "C8");
    }

    #[test]
    fn midi_to_frequency_in_range() {
        for (i, &hz) in FREQUENCIES.iter().enumerate() {
            assert_eq!(midi_to_frequency(LOWEST_MIDI_KEY + i as MidiKey), hz);
        }
        assert_eq!(midi_to_frequency(A4_MIDI_KEY), A4_HZ);
        assert_eq!(midi_to_frequency(60), 262);
    }

    #[test]
    fn midi_to_frequency_out_of_range() {
        assert_eq!(midi_to_frequency(20), NO_FREQUENCY);
        assert_eq!(midi_to_frequency(109), NO_FREQUENCY);
        assert_eq!(midi_to_frequency(0), NO_FREQUENCY);
        assert_eq!(midi_to_frequency(-5), NO_FREQUENCY);
        assert_eq!(midi_to_frequency(MidiKey::MIN), NO_FREQUENCY);
        assert_eq!(midi_to_frequency(MidiKey::MAX), NO_FREQUENCY);
        assert_eq!(midi_to_frequency(HIGHEST_MIDI_KEY), 4186);
        assert_eq!(lookup_frequency(20), Err(PitchError::MidiOutOfRange(20)));
    }

    #[test]
    fn frequency_to_name_matches_table() {
        build_pitch_map();
        for (&hz, &name) in FREQUENCIES.iter().zip(NAMES.iter()) {
            assert_eq!(frequency_to_name(hz), name);
        }
        assert_eq!(frequency_to_name(A4_HZ), "A4");
    }

    #[test]
    fn frequency_to_name_unknown() {
        assert_eq!(frequency_to_name(0), NO_NAME);
        assert_eq!(frequency_to_name(441), NO_NAME);
        assert_eq!(lookup_name(441), Err(PitchError::UnknownFrequency(441)));
    }

    #[test]
    fn lookups_work_without_building() {
        // Nothing in this test builds the map first
        assert_eq!(frequency_to_name(262), "C4");
        assert_eq!(name_to_index("C4"), 39);
    }

    #[test]
    fn build_is_idempotent() {
        build_pitch_map();
        build_pitch_map();
        assert_eq!(PITCH_MAP.names.len(), KEY_COUNT);
        assert_eq!(PITCH_MAP.indices.len(), KEY_COUNT);
    }

    #[test]
    fn name_to_index_known() {
        assert_eq!(name_to_index("A4"), 48);
        assert_eq!(FREQUENCIES[48], A4_HZ);
        assert_eq!(name_to_index("A0"), 0);
        assert_eq!(name_to_index("A0#"), 1);
        assert_eq!(name_to_index("C8"), KEY_COUNT - 1);
    }

    #[test]
    fn name_to_index_unknown() {
        assert_eq!(name_to_index("Z9"), FALLBACK_INDEX);
        assert_eq!(name_to_index(""), FALLBACK_INDEX);
        assert_eq!(name_to_index("a4"), FALLBACK_INDEX);
        assert_eq!(
            lookup_index("Z9"),
            Err(PitchError::UnknownName("Z9".into()))
        );
    }

    #[test]
    fn names_round_trip() {
        for (i, name) in NAMES.iter().enumerate() {
            let j = name_to_index(name);
            assert_eq!(FREQUENCIES[j], FREQUENCIES[i]);
        }
    }

    #[test]
    fn midi_names() {
        assert_eq!(midi_to_name(A4_MIDI_KEY), "A4");
        assert_eq!(midi_to_name(61), "C4#");
        assert_eq!(midi_to_name(109), NO_NAME);
        assert_eq!(name_to_midi("A4"), Some(A4_MIDI_KEY));
        assert_eq!(name_to_midi("H2"), None);
    }

    #[test]
    fn entry_rows() {
        let a4 = entry(A4_MIDI_KEY).unwrap();
        assert_eq!(
            a4,
            PitchEntry {
                midi: 69,
                hz: 440,
                name: "A4"
            }
        );
        assert_eq!(a4.index(), Some(48));
        assert_eq!(a4.to_string(), "A4 (MIDI 69, 440 Hz)");
        assert_eq!(entry(20), None);

        let all: Vec<_> = entries().collect();
        assert_eq!(all.len(), KEY_COUNT);
        assert_eq!(all[0].midi, LOWEST_MIDI_KEY);
        assert_eq!(all[KEY_COUNT - 1].midi, HIGHEST_MIDI_KEY);
        assert!(all.iter().enumerate().all(|(i, e)| e.index() == Some(i)));
    }

    #[test]
    fn entry_index_out_of_range() {
        let row = |midi| PitchEntry {
            midi,
            hz: 0,
            name: "",
        };
        assert_eq!(row(MidiKey::MIN).index(), None);
        assert_eq!(row(20).index(), None);
        assert_eq!(row(109).index(), None);
        assert_eq!(row(MidiKey::MAX).index(), None);
        assert_eq!(row(21).index(), Some(0));
    }

    #[test]
    fn repeated_names_resolve_to_lowest_key() {
        let map = PitchMap::build(&[10, 20, 30, 40], &["X", "Y", "Z", "Y"]);
        assert_eq!(map.names.len(), 4);
        assert_eq!(map.names.get(&40), Some(&"Y"));
        assert_eq!(map.indices.len(), 3);
        assert_eq!(map.indices.get("Y"), Some(&1));
        assert_eq!(map.indices.get("X"), Some(&0));
        assert_eq!(map.indices.get("Z"), Some(&2));
    }

    #[test]
    fn repeated_frequencies_keep_last_name() {
        let map = PitchMap::build(&[10, 20, 10, 30], &["X", "Y", "Z", "Y"]);
        // 10 Hz is named twice, and the later name wins
        assert_eq!(map.names.len(), 3);
        assert_eq!(map.names.get(&10), Some(&"Z"));
        assert_eq!(map.names.get(&20), Some(&"Y"));
        assert_eq!(map.names.get(&30), Some(&"Y"));
        // "Z" points at the first key with its frequency
        assert_eq!(map.indices.get("Z"), Some(&0));
        assert_eq!(map.indices.get("Y"), Some(&1));
        assert_eq!(map.indices.get("X"), None);
    }
}
