use beatmap_pp::{GameMods, ModsError};

const SINGLE_MODS: [u32; 29] = [
    GameMods::NF,
    GameMods::EZ,
    GameMods::TD,
    GameMods::HD,
    GameMods::HR,
    GameMods::SD,
    GameMods::DT,
    GameMods::RX,
    GameMods::HT,
    GameMods::NC,
    GameMods::FL,
    GameMods::AT,
    GameMods::SO,
    GameMods::AP,
    GameMods::PF,
    GameMods::K4,
    GameMods::K5,
    GameMods::K6,
    GameMods::K7,
    GameMods::K8,
    GameMods::FI,
    GameMods::RD,
    GameMods::CN,
    GameMods::TP,
    GameMods::K9,
    GameMods::CO,
    GameMods::K1,
    GameMods::K3,
    GameMods::K2,
];

#[test]
fn single_mods_round_trip() {
    for bits in SINGLE_MODS.iter().copied().chain([GameMods::V2, GameMods::MR]) {
        let mods = GameMods::from(bits);
        let acronyms = mods.to_string();

        assert_eq!(acronyms.len(), 2, "{} has more than one acronym", acronyms);

        let parsed: GameMods = acronyms.parse().unwrap();
        assert_eq!(parsed.bits(), bits, "{} did not round trip", acronyms);
    }
}

#[test]
fn implied_mods_collapse() {
    let mods = GameMods::from(GameMods::DT | GameMods::NC);
    assert_eq!(mods.to_string(), "NC");
    assert_eq!("NC".parse::<GameMods>().unwrap(), mods);

    let mods = GameMods::from(GameMods::SD | GameMods::PF);
    assert_eq!(mods.to_string(), "PF");
    assert_eq!("PF".parse::<GameMods>().unwrap(), mods);

    // the lone bits are completed
    assert_eq!(GameMods::from(1 << 9).bits(), GameMods::NC);
    assert_eq!(GameMods::from(1 << 14).bits(), GameMods::PF);
}

#[test]
fn combinations() {
    let mods: GameMods = "+HD,HR".parse().unwrap();
    assert_eq!(mods.bits(), 24);
    assert_eq!(mods.to_string(), "HDHR");

    let mods: GameMods = "hdfl".parse().unwrap();
    assert!(mods.hd() && mods.fl());

    assert!("NM".parse::<GameMods>().unwrap().is_empty());
    assert!("".parse::<GameMods>().unwrap().is_empty());
}

#[test]
fn invalid_acronyms() {
    assert_eq!(
        "HDXY".parse::<GameMods>(),
        Err(ModsError::UnknownAcronym("XY".to_owned()))
    );

    assert!(matches!(
        "HDH".parse::<GameMods>(),
        Err(ModsError::InvalidLength(_))
    ));
}

#[test]
fn speed_and_multipliers() {
    assert!((GameMods::from(GameMods::NC).clock_rate() - 1.5).abs() < f64::EPSILON);
    assert!((GameMods::from(GameMods::HT).clock_rate() - 0.75).abs() < f64::EPSILON);
    assert!((GameMods::new().clock_rate() - 1.0).abs() < f64::EPSILON);

    assert!((GameMods::from(GameMods::HR).od_ar_hp_multiplier() - 1.4).abs() < f64::EPSILON);
    assert!((GameMods::from(GameMods::EZ).od_ar_hp_multiplier() - 0.5).abs() < f64::EPSILON);

    assert_eq!(GameMods::from(GameMods::K7).mania_keys(), Some(7));
    assert_eq!(GameMods::new().mania_keys(), None);
}
