/// A frequency in hertz
pub type Hz = u32;
/// A point or span in time, in microseconds
pub type Micros = i64;
/// A MIDI key number. Signed so that callers can pass anything without casting.
pub type MidiKey = i32;

/// The MIDI key of the lowest modeled piano key (A0)
pub const LOWEST_MIDI_KEY: MidiKey = 21;
/// The number of modeled piano keys
pub const KEY_COUNT: usize = 88;
/// The MIDI key of the highest modeled piano key (C8)
pub const HIGHEST_MIDI_KEY: MidiKey = LOWEST_MIDI_KEY + KEY_COUNT as MidiKey - 1;

/// The A above middle C, often used to tune things
pub const A4_HZ: Hz = 440;
/// The MIDI key of the A above middle C
pub const A4_MIDI_KEY: MidiKey = 69;

/// The frequency reported for keys outside the modeled range
pub const NO_FREQUENCY: Hz = 0;
/// The name reported for frequencies that are not in the table
pub const NO_NAME: &str = "None";
/// The index reported for names that are not in the table
pub const FALLBACK_INDEX: usize = 0;
