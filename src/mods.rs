use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use thiserror::Error;

/// Acronyms in display order. NC and PF come before the mods whose bits
/// they contain so that those are skipped.
static ACRONYMS: [(&str, u32); 31] = [
    ("NF", GameMods::NF),
    ("EZ", GameMods::EZ),
    ("TD", GameMods::TD),
    ("HD", GameMods::HD),
    ("HR", GameMods::HR),
    ("PF", GameMods::PF),
    ("SD", GameMods::SD),
    ("NC", GameMods::NC),
    ("DT", GameMods::DT),
    ("RX", GameMods::RX),
    ("HT", GameMods::HT),
    ("FL", GameMods::FL),
    ("AT", GameMods::AT),
    ("SO", GameMods::SO),
    ("AP", GameMods::AP),
    ("4K", GameMods::K4),
    ("5K", GameMods::K5),
    ("6K", GameMods::K6),
    ("7K", GameMods::K7),
    ("8K", GameMods::K8),
    ("FI", GameMods::FI),
    ("RD", GameMods::RD),
    ("CN", GameMods::CN),
    ("TP", GameMods::TP),
    ("9K", GameMods::K9),
    ("CO", GameMods::CO),
    ("1K", GameMods::K1),
    ("3K", GameMods::K3),
    ("2K", GameMods::K2),
    ("V2", GameMods::V2),
    ("MR", GameMods::MR),
];

macro_rules! impl_mods_fn {
    ( $( $fn_name:ident => $const_name:ident, )* ) => {
        $(
            #[inline]
            pub const fn $fn_name(self) -> bool {
                self.0 & Self::$const_name == Self::$const_name
            }
        )*
    };
}

/// Set of game mods, stored as their legacy bit values.
///
/// See [https://github.com/ppy/osu-api/wiki#mods](https://github.com/ppy/osu-api/wiki#mods)
///
/// Nightcore always includes the DoubleTime bit (`576`) and Perfect always
/// includes the SuddenDeath bit (`16416`).
///
/// ```
/// use beatmap_pp::GameMods;
///
/// let mods: GameMods = "HDNC".parse().unwrap();
///
/// assert_eq!(mods.bits(), 8 + 576);
/// assert_eq!(mods.to_string(), "HDNC");
/// assert!(mods.dt());
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GameMods(u32);

impl GameMods {
    pub const NM: u32 = 0;
    pub const NF: u32 = 1 << 0;
    pub const EZ: u32 = 1 << 1;
    pub const TD: u32 = 1 << 2;
    pub const HD: u32 = 1 << 3;
    pub const HR: u32 = 1 << 4;
    pub const SD: u32 = 1 << 5;
    pub const DT: u32 = 1 << 6;
    pub const RX: u32 = 1 << 7;
    pub const HT: u32 = 1 << 8;
    pub const NC: u32 = Self::DT | (1 << 9);
    pub const FL: u32 = 1 << 10;
    pub const AT: u32 = 1 << 11;
    pub const SO: u32 = 1 << 12;
    pub const AP: u32 = 1 << 13;
    pub const PF: u32 = Self::SD | (1 << 14);
    pub const K4: u32 = 1 << 15;
    pub const K5: u32 = 1 << 16;
    pub const K6: u32 = 1 << 17;
    pub const K7: u32 = 1 << 18;
    pub const K8: u32 = 1 << 19;
    pub const FI: u32 = 1 << 20;
    pub const RD: u32 = 1 << 21;
    pub const CN: u32 = 1 << 22;
    pub const TP: u32 = 1 << 23;
    pub const K9: u32 = 1 << 24;
    pub const CO: u32 = 1 << 25;
    pub const K1: u32 = 1 << 26;
    pub const K3: u32 = 1 << 27;
    pub const K2: u32 = 1 << 28;
    pub const V2: u32 = 1 << 29;
    pub const MR: u32 = 1 << 30;

    /// No mods.
    #[inline]
    pub const fn new() -> Self {
        Self(Self::NM)
    }

    /// Mods from their bit values.
    ///
    /// Lone NC or PF bits are completed with the DT or SD bit.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        let mut bits = bits;

        if bits & (1 << 9) > 0 {
            bits |= Self::DT;
        }

        if bits & (1 << 14) > 0 {
            bits |= Self::SD;
        }

        Self(bits)
    }

    /// The legacy bit values.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether no mod is set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == Self::NM
    }

    /// Iterate over the acronyms of all contained mods.
    pub fn acronyms(self) -> impl Iterator<Item = &'static str> {
        let mut remaining = self.0;

        ACRONYMS.iter().filter_map(move |&(acronym, bits)| {
            if remaining & bits == bits {
                remaining &= !bits;

                Some(acronym)
            } else {
                None
            }
        })
    }

    impl_mods_fn! {
        nf => NF,
        ez => EZ,
        td => TD,
        hd => HD,
        hr => HR,
        sd => SD,
        dt => DT,
        rx => RX,
        ht => HT,
        nc => NC,
        fl => FL,
        so => SO,
        pf => PF,
        v2 => V2,
    }

    /// Whether the mods change the map's playback speed.
    #[inline]
    pub const fn change_speed(self) -> bool {
        self.0 & (Self::HT | Self::DT) > 0
    }

    /// Whether the mods change any of AR, OD, CS, HP or the clock rate.
    #[inline]
    pub const fn change_map(self) -> bool {
        self.0 & (Self::HT | Self::DT | Self::HR | Self::EZ) > 0
    }

    /// 1.5 for DT, 0.75 for HT and 1.0 otherwise.
    #[inline]
    pub fn clock_rate(self) -> f64 {
        if self.dt() {
            1.5
        } else if self.ht() {
            0.75
        } else {
            1.0
        }
    }

    /// 1.4 for HR, 0.5 for EZ and 1.0 otherwise.
    #[inline]
    pub fn od_ar_hp_multiplier(self) -> f64 {
        if self.hr() {
            1.4
        } else if self.ez() {
            0.5
        } else {
            1.0
        }
    }

    /// Key count forced by a mania key mod.
    pub fn mania_keys(self) -> Option<u32> {
        const KEYS: [(u32, u32); 9] = [
            (GameMods::K1, 1),
            (GameMods::K2, 2),
            (GameMods::K3, 3),
            (GameMods::K4, 4),
            (GameMods::K5, 5),
            (GameMods::K6, 6),
            (GameMods::K7, 7),
            (GameMods::K8, 8),
            (GameMods::K9, 9),
        ];

        KEYS.iter()
            .find(|(bits, _)| self.0 & bits > 0)
            .map(|(_, keys)| *keys)
    }
}

impl From<u32> for GameMods {
    #[inline]
    fn from(bits: u32) -> Self {
        Self::from_bits(bits)
    }
}

impl From<GameMods> for u32 {
    #[inline]
    fn from(mods: GameMods) -> Self {
        mods.bits()
    }
}

impl Display for GameMods {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.is_empty() {
            return f.write_str("NM");
        }

        for acronym in self.acronyms() {
            f.write_str(acronym)?;
        }

        Ok(())
    }
}

/// Failed to parse [`GameMods`] from acronyms.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ModsError {
    /// An acronym is not a known mod.
    #[error("unknown mod acronym `{0}`")]
    UnknownAcronym(String),
    /// The input does not consist of two-letter acronyms.
    #[error("mod acronyms must consist of two characters each, got `{0}`")]
    InvalidLength(String),
}

impl FromStr for GameMods {
    type Err = ModsError;

    /// Parse acronyms such as `"HDDT"`, `"+HD,DT"`, `"hd dt"` or `"NM"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s
            .trim_start_matches('+')
            .chars()
            .filter(|c| !matches!(c, ',' | ' ' | '|'))
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if chars.len() % 2 != 0 {
            return Err(ModsError::InvalidLength(s.to_owned()));
        }

        let mut bits = Self::NM;

        for pair in chars.chunks_exact(2) {
            let acronym: String = pair.iter().collect();

            if acronym == "NM" {
                continue;
            }

            let (_, mod_bits) = ACRONYMS
                .iter()
                .find(|(known, _)| *known == acronym)
                .ok_or_else(|| ModsError::UnknownAcronym(acronym.clone()))?;

            bits |= mod_bits;
        }

        Ok(Self(bits))
    }
}
