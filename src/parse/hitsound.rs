/// Abstract type to define hitsounds.
///
/// Implemented on the raw sound byte of hit objects and slider edges.
#[allow(missing_docs)]
pub trait HitSound {
    const HITSOUND_WHISTLE: u8 = 1 << 1;
    const HITSOUND_FINISH: u8 = 1 << 2;
    const HITSOUND_CLAP: u8 = 1 << 3;

    fn normal(self) -> bool;
    fn whistle(self) -> bool;
    fn finish(self) -> bool;
    fn clap(self) -> bool;
}

impl HitSound for u8 {
    #[inline]
    fn normal(self) -> bool {
        self & (Self::HITSOUND_WHISTLE | Self::HITSOUND_FINISH | Self::HITSOUND_CLAP) == 0
    }

    #[inline]
    fn whistle(self) -> bool {
        self & Self::HITSOUND_WHISTLE > 0
    }

    #[inline]
    fn finish(self) -> bool {
        self & Self::HITSOUND_FINISH > 0
    }

    #[inline]
    fn clap(self) -> bool {
        self & Self::HITSOUND_CLAP > 0
    }
}

/// Sound data of a single slider edge, i.e. its head, a repeat, or its tail.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeSound {
    /// Sound bit set, see [`HitSound`].
    pub sound: u8,
    /// Sample set of the normal sound.
    pub normal_set: u8,
    /// Sample set of the additions.
    pub addition_set: u8,
}

#[cfg(test)]
mod tests {
    use super::HitSound;

    #[test]
    fn sound_flags() {
        let sound: u8 = 2 | 8;

        assert!(!sound.normal());
        assert!(sound.whistle());
        assert!(!sound.finish());
        assert!(sound.clap());
        assert!(0_u8.normal());
        // bit 0 is set by some editors and still means a plain hit
        assert!(1_u8.normal());
    }
}
