mod common;

use beatmap_pp::{
    compute_performance, AnyPP, Beatmap, BeatmapExt, GameMods, Grade, OsuPP,
    PerformanceAttributes, ScoreState,
};

use self::common::{assert_eq_float, CATCH, MANIA, OSU, TAIKO};

fn map(content: &str) -> Beatmap {
    content.parse().unwrap()
}

#[test]
fn full_accuracy_value() {
    let map = map(OSU);
    let attrs = OsuPP::new(&map).calculate();

    // 4 circles, OD 8, AR 9 and every circle hit perfectly
    let expected = 1.4_f64.powf(8.0) * 10.0 * (4.0_f64 / 1000.0).powf(0.3);

    assert_eq_float(attrs.pp_acc, expected);
    assert_eq_float(attrs.accuracy, 100.0);
    assert_eq!(attrs.grade, Grade::X);
}

#[test]
fn misses_lower_accuracy_value() {
    let map = map(OSU);
    let n_objects = map.n_objects() as u32;

    let perfect = OsuPP::new(&map).n300(n_objects).calculate();
    let missed = OsuPP::new(&map).n300(n_objects - 2).misses(2).calculate();

    assert!(perfect.pp_acc > missed.pp_acc);
    assert!(perfect.pp > missed.pp);
    assert_eq!(missed.grade, Grade::C);
}

#[test]
fn reused_attributes_match() {
    let map = map(OSU);
    let mods = GameMods::from(GameMods::HD | GameMods::HR);

    let fresh = OsuPP::new(&map).mods(mods).accuracy(97.5).calculate();

    let reused = OsuPP::new(&map)
        .attributes(fresh.difficulty.clone())
        .mods(mods)
        .accuracy(97.5)
        .calculate();

    assert_eq!(fresh, reused);

    let via_perf = OsuPP::new(&map)
        .attributes(fresh.clone())
        .mods(mods)
        .accuracy(97.5)
        .calculate();

    assert_eq!(fresh, via_perf);
}

#[test]
fn max_pp_per_mode() {
    for content in [OSU, TAIKO, CATCH, MANIA] {
        let map = map(content);
        let attrs = map.max_pp(GameMods::new());

        assert!(attrs.pp() >= 0.0);
        assert_eq!(attrs.max_combo(), map.max_combo);
        assert!(attrs.accuracy() > 99.99);
    }
}

#[test]
fn provided_stars_are_used() {
    let map = map(TAIKO);

    let easy = AnyPP::new(&map).stars(2.0).calculate();
    let hard = AnyPP::new(&map).stars(5.0).calculate();

    assert!(matches!(hard, PerformanceAttributes::Taiko(_)));
    assert_eq_float(hard.stars(), 5.0);
    assert!(hard.pp() > easy.pp());
}

#[test]
fn score_state_dispatch() {
    let map = map(OSU);

    let state = ScoreState {
        max_combo: Some(10),
        n300: 7,
        n100: 1,
        n_misses: 1,
        ..ScoreState::new()
    };

    let attrs = compute_performance(&map, GameMods::new(), state);

    match attrs {
        PerformanceAttributes::Osu(attrs) => {
            assert_eq_float(attrs.accuracy, 100.0 * (7.0 * 300.0 + 100.0) / (9.0 * 300.0));
            assert!(attrs.pp > 0.0);
        }
        other => panic!("expected osu!standard attributes, got {:?}", other),
    }

    let empty = compute_performance(&map, GameMods::new(), ScoreState::new());
    assert_eq_float(empty.accuracy(), 100.0);
}

#[test]
fn score_state_stars() {
    for content in [TAIKO, CATCH, MANIA] {
        let map = map(content);

        let state = ScoreState {
            stars: Some(5.0),
            ..ScoreState::new()
        };

        let attrs = compute_performance(&map, GameMods::new(), state);
        let expected = AnyPP::new(&map).stars(5.0).calculate();

        assert_eq_float(attrs.stars(), 5.0);
        assert_eq_float(attrs.pp(), expected.pp());
        assert!(attrs.pp() > 0.0);
    }

    let map = map(TAIKO);
    let unrated = compute_performance(&map, GameMods::new(), ScoreState::new());
    let rated = compute_performance(
        &map,
        GameMods::new(),
        ScoreState {
            stars: Some(5.0),
            ..ScoreState::new()
        },
    );

    assert!(rated.pp() > unrated.pp());
}

#[test]
fn mania_score_scaling() {
    let map = map(MANIA);

    let high = AnyPP::new(&map).stars(3.0).score(950_000).calculate();
    let low = AnyPP::new(&map).stars(3.0).score(600_000).calculate();

    assert!(high.pp() > low.pp());
}
