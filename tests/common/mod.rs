#![allow(dead_code, unused_macros)]

use beatmap_pp::Beatmap;

pub const OSU: &str = "osu file format v14

[General]
AudioFilename: audio.mp3
Mode: 0

[Metadata]
Title:Integration
Artist:Someone
Version:Insane

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
//Break Periods
2,5000,7000

[TimingPoints]
0,500,4,2,0,60,1,0
2000,-50,4,2,0,60,0,1
8000,400,4,2,0,60,1,0

[HitObjects]
100,100,500,1,0,0:0:0:0:
200,100,750,1,0,0:0:0:0:
300,200,1000,2,0,L|400:200,1,70
100,300,2000,2,0,B|150:250|200:300|250:250,2,140
256,192,3000,12,0,4500,0:0:0:0:
400,100,7500,5,0,0:0:0:0:
100,200,8000,2,0,P|150:150|200:200,1,100
300,300,8400,2,0,C|350:350|400:300,1,90
480,380,8800,1,0,0:0:0:0:
";

pub const TAIKO: &str = "osu file format v14

[General]
Mode: 1

[Difficulty]
HPDrainRate:5
CircleSize:5
OverallDifficulty:6
SliderMultiplier:1.4

[TimingPoints]
0,400,4,2,0,60,1,0

[HitObjects]
256,192,400,1,0,0:0:0:0:
256,192,600,1,8,0:0:0:0:
256,192,800,1,2,0:0:0:0:
256,192,1000,2,0,L|356:192,1,70
256,192,1600,1,0,0:0:0:0:
256,192,2000,12,0,3000,0:0:0:0:
";

pub const CATCH: &str = "osu file format v14

[General]
Mode: 2

[Difficulty]
HPDrainRate:5
CircleSize:4
OverallDifficulty:8
ApproachRate:8.5
SliderMultiplier:1.4

[TimingPoints]
0,500,4,2,0,60,1,0

[HitObjects]
64,192,500,1,0,0:0:0:0:
192,192,1000,2,0,L|292:192,1,70
320,192,1500,1,0,0:0:0:0:
256,192,2000,12,0,3000,0:0:0:0:
";

pub const MANIA: &str = "osu file format v14

[General]
Mode: 3

[Difficulty]
HPDrainRate:8
CircleSize:4
OverallDifficulty:8

[TimingPoints]
0,300,4,2,0,60,1,0

[HitObjects]
64,192,300,1,0,0:0:0:0:
192,192,300,128,0,900:0:0:0:0:
320,192,600,1,0,0:0:0:0:
448,192,900,128,0,1500:0:0:0:0:
64,192,1200,1,0,0:0:0:0:
";

#[rustfmt::skip]
macro_rules! test_map {
    ($content:expr) => {{
        #[cfg(not(any(feature = "async_tokio", feature = "async_std")))]
        { $crate::common::test_map($content) }
        #[cfg(any(feature = "async_tokio", feature = "async_std"))]
        { $crate::common::test_map($content).await }
    }};
}

#[cfg(not(any(feature = "async_tokio", feature = "async_std")))]
pub fn test_map(content: &str) -> Beatmap {
    Beatmap::parse(content.as_bytes()).unwrap()
}

#[cfg(any(feature = "async_tokio", feature = "async_std"))]
pub async fn test_map(content: &str) -> Beatmap {
    Beatmap::parse(content.as_bytes()).await.unwrap()
}

#[track_caller]
pub fn assert_eq_float(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {} but got {}",
        expected,
        actual
    );
}
