mod attributes;
mod bpm;
mod control_point;
mod error;
mod events;
mod hitobject;
mod hitsound;
mod pos2;
mod reader;

pub use attributes::BeatmapAttributes;
pub(crate) use attributes::difficulty_range;
pub use control_point::TimingPoint;
pub use error::{ParseError, ParseResult};
pub use events::Break;
pub use hitobject::{CurveType, HitObject, HitObjectKind, Slider};
pub use hitsound::{EdgeSound, HitSound};
pub use pos2::Pos2;

use control_point::{bpm_of, point_at, resolve, velocity_of};
use events::Event;
use reader::FileReader;

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::str::FromStr;

#[cfg(not(any(feature = "async_std", feature = "async_tokio")))]
use std::{fs::File, io::Read, path::Path};

#[cfg(feature = "async_tokio")]
use tokio::io::AsyncRead;

#[cfg(feature = "async_std")]
use async_std::io::Read;

#[cfg(all(feature = "async_tokio", feature = "async_std"))]
compile_error!("Only one of the features `async_tokio` and `async_std` can be enabled");

/// The mode of a beatmap.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameMode {
    /// osu!standard
    Osu = 0,
    /// osu!taiko
    Taiko = 1,
    /// osu!catch
    Catch = 2,
    /// osu!mania
    Mania = 3,
}

impl Default for GameMode {
    #[inline]
    fn default() -> Self {
        Self::Osu
    }
}

impl GameMode {
    /// `None` for values other than `0..=3`.
    #[inline]
    pub const fn from_u8(mode: u8) -> Option<Self> {
        match mode {
            0 => Some(Self::Osu),
            1 => Some(Self::Taiko),
            2 => Some(Self::Catch),
            3 => Some(Self::Mania),
            _ => None,
        }
    }
}

/// The parsed `.osu` file.
///
/// All derived values (slider end times and positions, object counts, max
/// combo and bpm range) are computed once while parsing.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Beatmap {
    pub mode: GameMode,
    /// File format version, `14` if the header was missing.
    pub version: u8,

    pub n_circles: u32,
    pub n_sliders: u32,
    pub n_spinners: u32,
    /// osu!mania hold notes.
    pub n_holds: u32,
    pub max_combo: u32,

    pub ar: f64,
    pub od: f64,
    pub cs: f64,
    pub hp: f64,
    pub slider_mult: f64,
    pub tick_rate: f64,

    /// Lowest bpm across uninherited timing points.
    pub bpm_min: f64,
    /// Highest bpm across uninherited timing points.
    pub bpm_max: f64,

    /// Verbatim `key: value` pairs of `[General]`, `[Metadata]` and `[Difficulty]`.
    pub properties: BTreeMap<String, String>,
    /// Background image filename.
    pub background: Option<String>,
    pub breaks: Vec<Break>,

    /// Sorted by offset, the first point is always uninherited.
    pub timing_points: Vec<TimingPoint>,
    /// Sorted by start time.
    pub hit_objects: Vec<HitObject>,
}

impl Default for Beatmap {
    fn default() -> Self {
        Self {
            mode: GameMode::Osu,
            version: Self::DEFAULT_VERSION,
            n_circles: 0,
            n_sliders: 0,
            n_spinners: 0,
            n_holds: 0,
            max_combo: 0,
            ar: 5.0,
            od: 5.0,
            cs: 5.0,
            hp: 5.0,
            slider_mult: 1.0,
            tick_rate: 1.0,
            bpm_min: TimingPoint::DEFAULT.bpm,
            bpm_max: TimingPoint::DEFAULT.bpm,
            properties: BTreeMap::new(),
            background: None,
            breaks: Vec::new(),
            timing_points: vec![TimingPoint::DEFAULT],
            hit_objects: Vec::new(),
        }
    }
}

pub(crate) const OSU_FILE_HEADER: &str = "osu file format v";

impl Beatmap {
    const DEFAULT_VERSION: u8 = 14;

    /// Parse a beatmap from anything that implements [`Read`].
    #[cfg(not(any(feature = "async_std", feature = "async_tokio")))]
    pub fn parse<R: Read>(input: R) -> ParseResult<Self> {
        let mut reader = FileReader::new(input);
        reader.read_all()?;

        Self::parse_str(&reader.content())
    }

    /// Parse a beatmap from anything that implements `tokio::io::AsyncRead`.
    #[cfg(feature = "async_tokio")]
    pub async fn parse<R: AsyncRead + Unpin>(input: R) -> ParseResult<Self> {
        let mut reader = FileReader::new(input);
        reader.read_all().await?;

        Self::parse_str(&reader.content())
    }

    /// Parse a beatmap from anything that implements `async_std::io::Read`.
    #[cfg(feature = "async_std")]
    pub async fn parse<R: Read + Unpin>(input: R) -> ParseResult<Self> {
        let mut reader = FileReader::new(input);
        reader.read_all().await?;

        Self::parse_str(&reader.content())
    }

    /// Read and parse the `.osu` file at the given path.
    #[cfg(not(any(feature = "async_std", feature = "async_tokio")))]
    pub fn from_path<P: AsRef<Path>>(path: P) -> ParseResult<Self> {
        Self::parse(File::open(path)?)
    }

    /// Parse a beatmap from its raw content. Invalid UTF-8 is replaced.
    pub fn from_bytes(bytes: &[u8]) -> ParseResult<Self> {
        Self::parse_str(&String::from_utf8_lossy(bytes))
    }

    fn parse_str(content: &str) -> ParseResult<Self> {
        let mut parser = Parser::default();

        for line in content.lines() {
            parser.line(line);
        }

        parser.finish()
    }

    /// The timing point that is active at `offset`.
    ///
    /// Offsets before the first timing point resolve to the first one.
    #[inline]
    pub fn timing_point_for(&self, offset: f64) -> &TimingPoint {
        point_at(&self.timing_points, offset)
    }

    /// The beatmap's unmodified AR, OD, CS and HP.
    #[inline]
    pub fn attributes(&self) -> BeatmapAttributes {
        BeatmapAttributes::new(self.ar, self.od, self.cs, self.hp)
    }

    /// Amount of hit objects.
    #[inline]
    pub fn n_objects(&self) -> usize {
        self.hit_objects.len()
    }

    /// The bpm that covers most of the map's playtime.
    pub fn bpm(&self) -> f64 {
        bpm::dominant_bpm(&self.timing_points, self.length())
    }

    /// Maximum combo of the given objects, i.e. a prefix of `hit_objects`.
    pub(crate) fn combo_of(&self, objects: &[HitObject]) -> u32 {
        objects.iter().fold(0_u32, |combo, h| {
            let n = match (&h.kind, self.mode) {
                (HitObjectKind::Circle, _) => 1,
                (HitObjectKind::Slider(slider), GameMode::Osu | GameMode::Catch) => {
                    let point = self.timing_point_for(h.start_time);

                    slider_combo(slider, point, self.slider_mult, self.tick_rate)
                }
                (HitObjectKind::Spinner { .. }, GameMode::Osu) => 1,
                (HitObjectKind::Hold { .. }, GameMode::Mania) => 1,
                _ => 0,
            };

            combo.saturating_add(n)
        })
    }

    /// Milliseconds until the end of the last hit object.
    pub fn length(&self) -> f64 {
        self.hit_objects
            .iter()
            .map(HitObject::end_time)
            .fold(0.0, f64::max)
    }

    /// Milliseconds between the first and the last hit object, excluding breaks.
    pub fn drain_length(&self) -> f64 {
        let start = match self.hit_objects.first() {
            Some(h) => h.start_time,
            None => return 0.0,
        };

        let end = self.length();

        let break_time: f64 = self
            .breaks
            .iter()
            .map(|b| b.end_time.min(end) - b.start_time.max(start))
            .filter(|duration| *duration > 0.0)
            .sum();

        (end - start - break_time).max(0.0)
    }
}

impl FromStr for Beatmap {
    type Err = ParseError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Section {
    None,
    General,
    Metadata,
    Difficulty,
    Events,
    TimingPoints,
    HitObjects,
    /// A section without relevance such as `[Editor]` or `[Colours]`.
    Other,
}

impl Section {
    /// `None` if the line is no section header.
    fn from_header(line: &str) -> Option<Self> {
        let name = line.strip_prefix('[')?.strip_suffix(']')?;

        if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return None;
        }

        let section = if name.eq_ignore_ascii_case("general") {
            Self::General
        } else if name.eq_ignore_ascii_case("metadata") {
            Self::Metadata
        } else if name.eq_ignore_ascii_case("difficulty") {
            Self::Difficulty
        } else if name.eq_ignore_ascii_case("events") {
            Self::Events
        } else if name.eq_ignore_ascii_case("timingpoints") {
            Self::TimingPoints
        } else if name.eq_ignore_ascii_case("hitobjects") {
            Self::HitObjects
        } else {
            Self::Other
        };

        Some(section)
    }
}

/// Accumulates lines until [`Parser::finish`] builds the [`Beatmap`].
struct Parser {
    map: Beatmap,
    section: Section,
    seen_first_line: bool,
    seen_hit_objects: bool,

    mode: Option<GameMode>,
    ar: Option<f64>,
    od: Option<f64>,
    cs: Option<f64>,
    hp: Option<f64>,
    slider_mult: Option<f64>,
    tick_rate: Option<f64>,

    timing_points: Vec<TimingPoint>,
}

impl Default for Parser {
    fn default() -> Self {
        Self {
            map: Beatmap {
                timing_points: Vec::new(),
                ..Default::default()
            },
            section: Section::None,
            seen_first_line: false,
            seen_hit_objects: false,
            mode: None,
            ar: None,
            od: None,
            cs: None,
            hp: None,
            slider_mult: None,
            tick_rate: None,
            timing_points: Vec::new(),
        }
    }
}

const CIRCLE_FLAG: u8 = 1 << 0;
const SLIDER_FLAG: u8 = 1 << 1;
const NEW_COMBO_FLAG: u8 = 1 << 2;
const SPINNER_FLAG: u8 = 1 << 3;
const COMBO_OFFSET_FLAG: u8 = (1 << 4) | (1 << 5) | (1 << 6);
const HOLD_FLAG: u8 = 1 << 7;

const MAX_REPEAT_COUNT: u32 = 9000;

impl Parser {
    fn line(&mut self, line: &str) {
        let line = line.trim_start_matches('\u{feff}').trim_end();

        if line.trim_start().is_empty() {
            return;
        }

        if !self.seen_first_line {
            self.seen_first_line = true;

            if let Some(idx) = line.find(OSU_FILE_HEADER) {
                let digits: String = line[idx + OSU_FILE_HEADER.len()..]
                    .chars()
                    .take_while(char::is_ascii_digit)
                    .collect();

                match digits.parse() {
                    Ok(version) => self.map.version = version,
                    Err(_) => log_warn!("unreadable file format version in `{}`", line),
                }

                return;
            }

            log_warn!(
                "missing file format header, assuming v{}",
                Beatmap::DEFAULT_VERSION
            );
        }

        if line.starts_with("//") {
            return;
        }

        if let Some(section) = Section::from_header(line.trim_start()) {
            if section == Section::HitObjects {
                self.seen_hit_objects = true;
            }

            self.section = section;

            return;
        }

        let parsed = match self.section {
            Section::General | Section::Metadata | Section::Difficulty => self.key_value(line),
            Section::Events => self.event(line),
            Section::TimingPoints => self.timing_point(line),
            Section::HitObjects => self.hit_object(line),
            Section::None | Section::Other => true,
        };

        if !parsed {
            log_warn!("skipping malformed line in {:?}: `{}`", self.section, line);
        }
    }

    fn key_value(&mut self, line: &str) -> bool {
        let (key, value) = match line.split_once(':') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => return false,
        };

        let valid = match key {
            "Mode" => match value.parse::<u8>() {
                Ok(mode) => {
                    self.mode = GameMode::from_u8(mode).or_else(|| {
                        log_warn!("unknown mode {}, falling back to osu!standard", mode);

                        Some(GameMode::Osu)
                    });

                    true
                }
                Err(_) => false,
            },
            "CircleSize" => set_float(&mut self.cs, value),
            "OverallDifficulty" => set_float(&mut self.od, value),
            "ApproachRate" => set_float(&mut self.ar, value),
            "HPDrainRate" => set_float(&mut self.hp, value),
            "SliderMultiplier" => set_float(&mut self.slider_mult, value),
            "SliderTickRate" => set_float(&mut self.tick_rate, value),
            _ => true,
        };

        if valid {
            self.map
                .properties
                .insert(key.to_owned(), value.to_owned());
        }

        valid
    }

    fn event(&mut self, line: &str) -> bool {
        match Event::parse(line) {
            Some(Event::Background(filename)) => self.map.background = Some(filename),
            Some(Event::Break(b)) => self.map.breaks.push(b),
            Some(Event::Other) => {}
            None => return false,
        }

        true
    }

    fn timing_point(&mut self, line: &str) -> bool {
        let mut split = line.split(',').map(str::trim);

        let offset = match split.next().and_then(parse_float) {
            Some(offset) => offset,
            None => return false,
        };

        let beat_length = match split.next().map(str::parse::<f64>) {
            Some(Ok(beat_length)) => beat_length,
            _ => return false,
        };

        let meter = split.next().and_then(|s| s.parse().ok()).unwrap_or(4);
        let sample_set = split.next().and_then(|s| s.parse().ok()).unwrap_or(0);
        let sample_index = split.next().and_then(|s| s.parse().ok()).unwrap_or(0);
        let volume = split.next().and_then(|s| s.parse().ok()).unwrap_or(100);

        let uninherited = split
            .next()
            .and_then(|s| s.parse::<i32>().ok())
            .map_or(beat_length >= 0.0, |flag| flag != 0);

        let kiai = split
            .next()
            .and_then(|s| s.parse::<u8>().ok())
            .map_or(false, |effects| effects & 1 > 0);

        let (velocity_multiplier, bpm) = if uninherited {
            (1.0, bpm_of(beat_length).unwrap_or(0.0))
        } else {
            (velocity_of(beat_length), 0.0)
        };

        self.timing_points.push(TimingPoint {
            offset,
            beat_length,
            uninherited,
            velocity_multiplier,
            bpm,
            meter,
            sample_set,
            sample_index,
            volume,
            kiai,
        });

        true
    }

    fn hit_object(&mut self, line: &str) -> bool {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();

        if fields.len() < 5 {
            return false;
        }

        let (x, y, start_time) = match (
            parse_float(fields[0]),
            parse_float(fields[1]),
            parse_float(fields[2]),
        ) {
            (Some(x), Some(y), Some(time)) => (x, y, time),
            _ => return false,
        };

        let (kind_byte, sound) = match (fields[3].parse::<u8>(), fields[4].parse::<u8>()) {
            (Ok(kind), Ok(sound)) => (kind, sound),
            _ => return false,
        };

        let pos = Pos2::new(x, y);
        let flags = kind_byte & (CIRCLE_FLAG | SLIDER_FLAG | SPINNER_FLAG | HOLD_FLAG);

        let kind = match flags {
            CIRCLE_FLAG => HitObjectKind::Circle,
            SLIDER_FLAG => match parse_slider(pos, &fields[5..]) {
                Some(slider) => HitObjectKind::Slider(slider),
                None => return false,
            },
            SPINNER_FLAG => match fields.get(5).copied().and_then(parse_float) {
                Some(end_time) => HitObjectKind::Spinner {
                    end_time: end_time.max(start_time),
                },
                None => return false,
            },
            HOLD_FLAG => {
                let end_time = fields
                    .get(5)
                    .and_then(|extras| extras.split(':').next())
                    .and_then(parse_float)
                    .map_or(start_time, |end_time| end_time.max(start_time));

                HitObjectKind::Hold { end_time }
            }
            _ => {
                log_warn!(
                    "unknown hit object type {} at {}ms, skipping",
                    kind_byte,
                    start_time
                );

                return true;
            }
        };

        self.map.hit_objects.push(HitObject {
            pos,
            start_time,
            new_combo: kind_byte & NEW_COMBO_FLAG > 0,
            combo_skip: (kind_byte & COMBO_OFFSET_FLAG) >> 4,
            sound,
            kind,
        });

        true
    }

    fn finish(self) -> ParseResult<Beatmap> {
        if !self.seen_hit_objects {
            return Err(ParseError::MissingSection("HitObjects"));
        }

        let Self {
            mut map,
            mode,
            ar,
            od,
            cs,
            hp,
            slider_mult,
            tick_rate,
            timing_points,
            ..
        } = self;

        map.mode = mode.unwrap_or_default();
        map.od = od.unwrap_or(5.0);
        map.ar = ar.unwrap_or(map.od);
        map.cs = cs.unwrap_or(5.0);
        map.hp = hp.unwrap_or(5.0);
        map.slider_mult = slider_mult.unwrap_or(1.0);
        map.tick_rate = tick_rate.unwrap_or(1.0);

        if timing_points.is_empty() {
            log_warn!("no timing points, using a default point of 60 bpm");
        }

        map.timing_points = resolve(timing_points);

        let (bpm_min, bpm_max) = map
            .timing_points
            .iter()
            .filter(|point| point.uninherited && point.bpm > 0.0)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), point| {
                (min.min(point.bpm), max.max(point.bpm))
            });

        if bpm_min.is_finite() {
            map.bpm_min = bpm_min;
            map.bpm_max = bpm_max;
        }

        map.hit_objects
            .sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        map.breaks.sort_by(|a, b| {
            a.start_time
                .partial_cmp(&b.start_time)
                .unwrap_or(Ordering::Equal)
        });

        for i in 0..map.hit_objects.len() {
            let start_time = map.hit_objects[i].start_time;
            let point = *map.timing_point_for(start_time);
            let pos = map.hit_objects[i].pos;

            match &mut map.hit_objects[i].kind {
                HitObjectKind::Circle => map.n_circles += 1,
                HitObjectKind::Slider(slider) => {
                    map.n_sliders += 1;
                    finish_slider(slider, pos, start_time, &point, map.slider_mult);
                }
                HitObjectKind::Spinner { .. } => map.n_spinners += 1,
                HitObjectKind::Hold { .. } => map.n_holds += 1,
            }
        }

        map.max_combo = map.combo_of(&map.hit_objects);

        Ok(map)
    }
}

/// Slider beats, `None` if the velocity denominator is unusable.
#[inline]
fn slider_beats(slider: &Slider, point: &TimingPoint, slider_mult: f64) -> Option<f64> {
    let denominator = slider_mult * 100.0 * point.velocity_multiplier;

    if denominator.is_finite() && denominator > 0.0 {
        Some(slider.pixel_length * f64::from(slider.repeat_count) / denominator)
    } else {
        None
    }
}

/// Compute a slider's duration, end time and end position.
fn finish_slider(
    slider: &mut Slider,
    head: Pos2,
    start_time: f64,
    point: &TimingPoint,
    slider_mult: f64,
) {
    let duration = slider_beats(slider, point, slider_mult)
        .map(|beats| (beats * point.beat_length).ceil())
        .filter(|duration| duration.is_finite() && *duration >= 0.0)
        .unwrap_or(0.0);

    slider.duration = duration;
    slider.end_time = start_time + duration;

    slider.end_pos = if slider.repeat_count % 2 == 0 {
        head
    } else {
        crate::curve::slider_end_point(
            slider.curve_type,
            slider.pixel_length,
            &slider.control_points,
        )
        .unwrap_or(head)
    };
}

/// Head, ticks, repeats and tail of a slider.
///
/// Sliders without spans or velocity count as a single object.
fn slider_combo(slider: &Slider, point: &TimingPoint, slider_mult: f64, tick_rate: f64) -> u32 {
    match slider_beats(slider, point, slider_mult) {
        Some(beats) if slider.repeat_count > 0 => {
            let repeats = f64::from(slider.repeat_count);
            let mut ticks = ((beats - 0.1) / repeats * tick_rate).ceil() - 1.0;
            ticks *= repeats;
            ticks += repeats + 1.0;

            ticks.max(0.0) as u32
        }
        _ => 1,
    }
}

fn parse_slider(head: Pos2, extras: &[&str]) -> Option<Slider> {
    let mut curve = extras.first()?.split('|');
    let curve_type = CurveType::from_token(curve.next()?.trim());

    let mut control_points = Vec::with_capacity(8);
    control_points.push(head);

    for point in curve {
        let (x, y) = point.split_once(':')?;
        control_points.push(Pos2::new(parse_float(x.trim())?, parse_float(y.trim())?));
    }

    let repeat_count: u32 = extras.get(1)?.parse().ok()?;

    if repeat_count > MAX_REPEAT_COUNT {
        return None;
    }

    let pixel_length = parse_float(extras.get(2)?)?.round();

    let n_edges = repeat_count as usize + 1;
    let mut edge_sounds = vec![EdgeSound::default(); n_edges];

    if let Some(sounds) = extras.get(3).filter(|s| !s.is_empty()) {
        for (edge, sound) in edge_sounds.iter_mut().zip(sounds.split('|')) {
            edge.sound = sound.trim().parse().unwrap_or(0);
        }
    }

    if let Some(sets) = extras.get(4).filter(|s| !s.is_empty()) {
        for (edge, set) in edge_sounds.iter_mut().zip(sets.split('|')) {
            let mut split = set.split(':').map(|s| s.trim().parse().unwrap_or(0));
            edge.normal_set = split.next().unwrap_or(0);
            edge.addition_set = split.next().unwrap_or(0);
        }
    }

    Some(Slider {
        curve_type,
        control_points,
        repeat_count,
        pixel_length,
        edge_sounds,
        duration: 0.0,
        end_time: 0.0,
        end_pos: head,
    })
}

/// Parse a finite float.
#[inline]
fn parse_float(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[inline]
fn set_float(field: &mut Option<f64>, value: &str) -> bool {
    match parse_float(value) {
        Some(n) => {
            *field = Some(n);

            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = "osu file format v14

[General]
AudioFilename: audio.mp3
Mode: 0

[Metadata]
Title:Example
Artist:Someone

[Difficulty]
HPDrainRate:6
CircleSize:4
OverallDifficulty:8
ApproachRate:9
SliderMultiplier:1.4
SliderTickRate:1

[Events]
//Background and Video events
0,0,\"bg.jpg\",0,0
2,3000,5000

[TimingPoints]
0,500,4,2,0,50,1,0
2000,-50,4,2,0,50,0,1

[HitObjects]
100,100,1000,1,0
200,100,1500,2,2,L|340:100,1,140,2|0,0:0|1:2,0:0:0:0:
256,192,2000,12,0,2500,0:0:0:0:
300,300,2600,6,0,B|350:300|350:350,2,70
";

    #[test]
    fn parse_example() {
        let map: Beatmap = MAP.parse().unwrap();

        assert_eq!(map.version, 14);
        assert_eq!(map.mode, GameMode::Osu);
        assert_eq!(map.n_circles, 1);
        assert_eq!(map.n_sliders, 2);
        assert_eq!(map.n_spinners, 1);
        assert_eq!(map.hit_objects.len(), 4);
        assert!((map.cs - 4.0).abs() < f64::EPSILON);
        assert!((map.ar - 9.0).abs() < f64::EPSILON);
        assert!((map.slider_mult - 1.4).abs() < f64::EPSILON);
        assert_eq!(map.background.as_deref(), Some("bg.jpg"));
        assert_eq!(map.breaks.len(), 1);
        assert_eq!(map.properties.get("Title").map(String::as_str), Some("Example"));
        assert_eq!(map.properties.get("AudioFilename").map(String::as_str), Some("audio.mp3"));
        assert!((map.bpm_min - 120.0).abs() < f64::EPSILON);
        assert!((map.bpm_max - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn slider_post_processing() {
        let map: Beatmap = MAP.parse().unwrap();

        let slider = match &map.hit_objects[1].kind {
            HitObjectKind::Slider(slider) => slider,
            _ => panic!("expected slider"),
        };

        // 140 / (1.4 * 100) = 1 beat of 500ms
        assert!((slider.duration - 500.0).abs() < f64::EPSILON);
        assert!((slider.end_time - 2000.0).abs() < f64::EPSILON);
        assert!((slider.end_pos.x - 340.0).abs() < 1e-9);
        assert!((slider.end_pos.y - 100.0).abs() < 1e-9);
        assert_eq!(slider.edge_sounds.len(), 2);
        assert_eq!(slider.edge_sounds[0].sound, 2);
        assert_eq!(slider.edge_sounds[1].normal_set, 1);
        assert_eq!(slider.edge_sounds[1].addition_set, 2);

        // inherited point doubles the velocity, two spans end at the head
        let slider = match &map.hit_objects[3].kind {
            HitObjectKind::Slider(slider) => slider,
            _ => panic!("expected slider"),
        };

        assert!((slider.duration - 250.0).abs() < f64::EPSILON);
        assert_eq!(slider.end_pos, map.hit_objects[3].pos);
        assert_eq!(slider.edge_sounds.len(), 3);
    }

    #[test]
    fn max_combo() {
        let map: Beatmap = MAP.parse().unwrap();

        // circle + (1 span: 2) + spinner + (2 spans, half a beat: 3)
        assert_eq!(map.max_combo, 1 + 2 + 1 + 3);
    }

    #[test]
    fn combo_bits() {
        let map: Beatmap = MAP.parse().unwrap();
        let last = &map.hit_objects[3];

        assert!(last.new_combo);
        assert_eq!(last.combo_skip, 0);
        assert!(map.hit_objects[2].new_combo);
    }

    #[test]
    fn missing_hit_objects() {
        let err = "osu file format v14\n[General]\nMode: 0\n"
            .parse::<Beatmap>()
            .unwrap_err();

        assert!(matches!(err, ParseError::MissingSection("HitObjects")));
    }

    #[test]
    fn malformed_lines_skipped() {
        let content = "osu file format v12
[Difficulty]
CircleSize: big
OverallDifficulty: 7
[TimingPoints]
nonsense
0,400,4,1,0,100,1,0
[HitObjects]
1,2
64,64,500,1,0
64,64,600,3,0
64,64,700,1,x
";

        let map: Beatmap = content.parse().unwrap();

        assert_eq!(map.version, 12);
        assert!((map.cs - 5.0).abs() < f64::EPSILON);
        assert!((map.ar - 7.0).abs() < f64::EPSILON);
        assert_eq!(map.timing_points.len(), 1);
        assert_eq!(map.hit_objects.len(), 1);
        assert_eq!(map.max_combo, 1);
    }

    #[test]
    fn malformed_events_skipped() {
        let mut parser = Parser::default();

        assert!(!parser.event("2,abc,def"));
        assert!(!parser.event("0,0"));
        assert!(parser.event("Sprite,Foreground,Centre,\"x.png\",320,240"));
        assert!(parser.event("2,100,200"));
        assert_eq!(parser.map.breaks.len(), 1);

        let content = MAP.replace("2,3000,5000", "2,abc,def\n2,3000,5000\nBreak,9000");
        let map: Beatmap = content.parse().unwrap();

        assert_eq!(map.breaks.len(), 1);
        assert!((map.breaks[0].start_time - 3000.0).abs() < f64::EPSILON);
        assert_eq!(map.background.as_deref(), Some("bg.jpg"));
        assert_eq!(map.hit_objects.len(), 4);
    }

    #[test]
    fn headerless_and_case_insensitive() {
        let content = "[HITOBJECTS]\n10,10,0,1,0\n[difficulty]\nCircleSize:3\n";
        let map: Beatmap = content.parse().unwrap();

        assert_eq!(map.version, 14);
        assert_eq!(map.hit_objects.len(), 1);
        assert!((map.cs - 3.0).abs() < f64::EPSILON);
        assert_eq!(map.timing_points, vec![TimingPoint::DEFAULT]);
    }

    #[test]
    fn unsorted_objects() {
        let content = "osu file format v14
[TimingPoints]
1000,300,4,1,0,100,1,0
0,500,4,1,0,100,1,0
[HitObjects]
0,0,2000,1,0
0,0,1000,1,0
0,0,1500,1,0
";

        let map: Beatmap = content.parse().unwrap();
        let times: Vec<_> = map.hit_objects.iter().map(|h| h.start_time).collect();

        assert_eq!(times, [1000.0, 1500.0, 2000.0]);
        assert!((map.timing_points[0].offset).abs() < f64::EPSILON);
        assert!((map.bpm_min - 120.0).abs() < f64::EPSILON);
        assert!((map.bpm_max - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn mania_holds() {
        let content = "osu file format v14
[General]
Mode: 3
[HitObjects]
64,192,1000,128,0,1500:0:0:0:0:
192,192,1000,1,0,0:0:0:0:
";

        let map: Beatmap = content.parse().unwrap();

        assert_eq!(map.mode, GameMode::Mania);
        assert_eq!(map.n_holds, 1);
        assert_eq!(map.max_combo, 2);
        assert!(map.hit_objects.iter().any(|h| (h.end_time() - 1500.0).abs() < f64::EPSILON));
    }

    #[test]
    fn lengths() {
        let map: Beatmap = MAP.parse().unwrap();

        // last slider: 2600 + 250
        assert!((map.length() - 2850.0).abs() < f64::EPSILON);
        // break 3000..5000 lies after the last object
        assert!((map.drain_length() - 1850.0).abs() < f64::EPSILON);
        assert!((map.bpm() - 120.0).abs() < 1e-9);
    }
}
