/// A break period of a [`Beatmap`](crate::Beatmap).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Break {
    /// Start timestamp of the break.
    pub start_time: f64,
    /// End timestamp of the break.
    pub end_time: f64,
}

impl Break {
    /// Duration of the break.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// A line of the `[Events]` section.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Event {
    Background(String),
    Break(Break),
    /// Storyboard, video and sample events are not read.
    Other,
}

impl Event {
    /// Parse an event line, `None` if a background or break line is malformed.
    pub(crate) fn parse(line: &str) -> Option<Self> {
        let mut split = line.split(',').map(str::trim);

        match split.next()? {
            "0" => {
                let _start = split.next()?;
                let filename = split.next()?.trim_matches('"');

                (!filename.is_empty()).then(|| Self::Background(filename.to_owned()))
            }
            "2" | "Break" => {
                let start_time = split.next()?.parse::<f64>().ok()?;
                let end_time = split.next()?.parse::<f64>().ok()?;

                (start_time.is_finite() && end_time.is_finite()).then(|| {
                    Self::Break(Break {
                        start_time,
                        end_time: end_time.max(start_time),
                    })
                })
            }
            _ => Some(Self::Other),
        }
    }
}
