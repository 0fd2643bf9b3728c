//! Pitch range and the twelve origin keys.

use std::fmt;
use std::str::FromStr;

use super::error::ScaleError;

/// Chromatic semitone number (60 = middle C).
pub type Pitch = u8;

/// No generated note is lower than this.
pub const MIN_PITCH: Pitch = 36;

/// No generated note is higher than this.
pub const MAX_PITCH: Pitch = 108;

/// Whether `pitch` lies in `MIN_PITCH..=MAX_PITCH`.
pub fn in_range(pitch: i64) -> bool {
    (i64::from(MIN_PITCH)..=i64::from(MAX_PITCH)).contains(&pitch)
}

/// One of the twelve chromatic keys an origin can be chosen from.
///
/// Each key maps to the pitch in the octave starting at middle C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OriginKey {
    A,
    ASharp,
    B,
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
}

impl OriginKey {
    /// All keys, in the order they are listed to users.
    pub const ALL: [OriginKey; 12] = [
        OriginKey::A,
        OriginKey::ASharp,
        OriginKey::B,
        OriginKey::C,
        OriginKey::CSharp,
        OriginKey::D,
        OriginKey::DSharp,
        OriginKey::E,
        OriginKey::F,
        OriginKey::FSharp,
        OriginKey::G,
        OriginKey::GSharp,
    ];

    /// The origin pitch for this key (C = 60 through B = 71).
    pub fn pitch(self) -> Pitch {
        match self {
            OriginKey::C => 60,
            OriginKey::CSharp => 61,
            OriginKey::D => 62,
            OriginKey::DSharp => 63,
            OriginKey::E => 64,
            OriginKey::F => 65,
            OriginKey::FSharp => 66,
            OriginKey::G => 67,
            OriginKey::GSharp => 68,
            OriginKey::A => 69,
            OriginKey::ASharp => 70,
            OriginKey::B => 71,
        }
    }

    /// Display name using sharps.
    pub fn name(self) -> &'static str {
        match self {
            OriginKey::A => "A",
            OriginKey::ASharp => "A#",
            OriginKey::B => "B",
            OriginKey::C => "C",
            OriginKey::CSharp => "C#",
            OriginKey::D => "D",
            OriginKey::DSharp => "D#",
            OriginKey::E => "E",
            OriginKey::F => "F",
            OriginKey::FSharp => "F#",
            OriginKey::G => "G",
            OriginKey::GSharp => "G#",
        }
    }

    /// The key whose origin pitch is `pitch`, if any.
    pub fn from_pitch(pitch: Pitch) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.pitch() == pitch)
    }
}

impl fmt::Display for OriginKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OriginKey {
    type Err = ScaleError;

    /// Accepts `C`, `c#`, `Db`, `E#` and similar spellings.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let s = input.trim();
        let unknown = || ScaleError::UnknownKey(input.to_string());

        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(unknown)?;
        let natural: i64 = match letter.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return Err(unknown()),
        };
        let accidental = match chars.as_str() {
            "" => 0,
            "#" | "♯" => 1,
            "b" | "♭" => -1,
            _ => return Err(unknown()),
        };

        let pitch = 60 + (natural + accidental).rem_euclid(12);
        Pitch::try_from(pitch)
            .ok()
            .and_then(Self::from_pitch)
            .ok_or_else(unknown)
    }
}

/// Parse an origin given either as a key name or as a raw pitch number.
pub fn parse_origin(text: &str) -> Result<Pitch, ScaleError> {
    let trimmed = text.trim();
    if let Ok(raw) = trimmed.parse::<i64>() {
        if !in_range(raw) {
            return Err(ScaleError::OriginOutOfRange(raw));
        }
        // In range, so it fits.
        return Ok(raw as Pitch);
    }
    trimmed.parse::<OriginKey>().map(OriginKey::pitch)
}
