//! Library to parse [osu!] beatmaps and calculate their difficulty and performance attributes.
//!
//! ## Description
//!
//! `.osu` files are decoded into a [`Beatmap`] which carries its timing, slider
//! geometry, object counts and max combo. osu!standard maps are rated through
//! an aim and a speed strain whose section peaks turn into the star rating.
//! Performance points are available for all modes, osu!taiko, osu!catch and
//! osu!mania take their star rating from the caller.
//!
//! ## Usage
//!
//! ```
//! use beatmap_pp::{Beatmap, BeatmapExt, GameMods};
//!
//! # let content = "osu file format v14\n\n[HitObjects]\n256,192,1000,1,0\n100,100,1200,1,0\n";
//! // Decode the map
//! let map: Beatmap = content.parse().unwrap();
//!
//! let mods: GameMods = "HDHR".parse().unwrap();
//!
//! // Calculate difficulty attributes
//! let diff_attrs = map.stars()
//!     .mods(mods)
//!     .calculate();
//!
//! let stars = diff_attrs.stars;
//!
//! // Calculate performance attributes
//! let perf_attrs = map.pp()
//!     // To speed up the calculation significantly, we can re-use the previous
//!     // attributes.
//!     // **Note** that this should only be done if the map, mods, and
//!     // amount of passed objects stay the same. Otherwise, the resulting
//!     // attributes will be incorrect.
//!     .attributes(diff_attrs)
//!     .mods(mods)
//!     .combo(2)
//!     .accuracy(99.2)
//!     .misses(0)
//!     .calculate();
//!
//! let pp = perf_attrs.pp();
//!
//! println!("Stars: {} | PP: {}", stars, pp);
//! ```
//!
//! ## Features
//!
//! | Flag | Description | Dependencies
//! | - | - | -
//! | `default` | Enables the `tracing` feature |
//! | `tracing` | Skipped lines and other oddities encountered during beatmap decoding will be logged through `tracing::warn`. If this features is not enabled, they will be ignored silently. | [`tracing`]
//! | `serde` | Implements `Serialize` and `Deserialize` for the beatmap, mods and all attribute types. | [`serde`]
//! | `async_tokio` | Beatmap parsing will be async through [`tokio`] | [`tokio`]
//! | `async_std` | Beatmap parsing will be async through [`async-std`] | [`async-std`]
//!
//! [osu!]: https://osu.ppy.sh/home
//! [`tracing`]: https://docs.rs/tracing
//! [`serde`]: https://docs.rs/serde
//! [`tokio`]: https://github.com/tokio-rs/tokio
//! [`async-std`]: https://github.com/async-rs/async-std

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::struct_excessive_bools,
    clippy::match_same_arms,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::explicit_iter_loop,
    clippy::similar_names,
    clippy::cast_possible_wrap,
    clippy::float_cmp
)]

macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::warn!($($arg)*);
    }};
}

macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    }};
}

mod attributes;
mod curve;
mod ext;
mod grade;
mod math_util;
mod mods;
mod pp;
mod score_state;
mod stars;

/// Everything about decoding `.osu` files.
pub mod parse;

/// osu!standard stars and pp.
pub mod osu;

/// osu!taiko pp.
pub mod taiko;

/// osu!catch pp.
pub mod fruits;

/// osu!mania pp.
pub mod mania;

pub use attributes::{
    DifficultyAttributes, FruitsPerformanceAttributes, ManiaPerformanceAttributes,
    OsuPerformanceAttributes, OsuStrains, PerformanceAttributes, TaikoPerformanceAttributes,
};
pub use curve::{slider_end_point, Curve, PathPoint};
pub use ext::BeatmapExt;
pub use fruits::FruitsPP;
pub use grade::Grade;
pub use mania::ManiaPP;
pub use math_util::circumcircle;
pub use mods::{GameMods, ModsError};
pub use osu::{round_accuracy, OsuPP, OsuStars};
pub use parse::{
    Beatmap, BeatmapAttributes, CurveType, GameMode, HitObject, HitObjectKind, ParseError,
    ParseResult, Pos2, TimingPoint,
};
pub use pp::{AnyPP, AttributeProvider};
pub use score_state::ScoreState;
pub use stars::AnyStars;
pub use taiko::TaikoPP;

/// Decode a beatmap from its textual content.
///
/// ```
/// let map = beatmap_pp::parse("osu file format v14\n\n[HitObjects]\n256,192,500,1,0\n").unwrap();
///
/// assert_eq!(map.version, 14);
/// assert_eq!(map.max_combo, 1);
/// ```
#[inline]
pub fn parse(content: &str) -> ParseResult<Beatmap> {
    content.parse()
}

/// Difficulty attributes of a map of any mode.
///
/// Only osu!standard maps receive star values.
#[inline]
pub fn compute_difficulty(map: &Beatmap, mods: GameMods) -> DifficultyAttributes {
    AnyStars::new(map).mods(mods).calculate()
}

/// Performance attributes of a play on a map of any mode.
///
/// Missing hit results are treated as perfect hits. The star rating
/// for osu!taiko, osu!catch, and osu!mania is taken from [`ScoreState::stars`].
#[inline]
pub fn compute_performance(map: &Beatmap, mods: GameMods, state: ScoreState) -> PerformanceAttributes {
    AnyPP::new(map).mods(mods).state(state).calculate()
}
