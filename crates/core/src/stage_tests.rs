// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    fetched = { Stage::Fetched, Stage::Peeled },
    peeled = { Stage::Peeled, Stage::Squeezed },
    squeezed = { Stage::Squeezed, Stage::Bottled },
    bottled = { Stage::Bottled, Stage::Processed },
)]
fn next_moves_one_step_forward(from: Stage, expected: Stage) {
    assert_eq!(from.next(), Ok(expected));
    assert_eq!(expected.index(), from.index() + 1);
}

#[test]
fn next_fails_on_terminal_stage() {
    assert_eq!(
        Stage::Processed.next(),
        Err(StageError::AlreadyTerminal(Stage::Processed))
    );
}

#[test]
fn all_is_in_processing_order() {
    for (i, stage) in Stage::ALL.iter().enumerate() {
        assert_eq!(stage.index(), i);
    }
    assert_eq!(Stage::ALL[0], Stage::INITIAL);
    assert_eq!(Stage::ALL[4], Stage::TERMINAL);
    assert!(Stage::ALL.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn only_processed_is_terminal() {
    let terminal: Vec<_> = Stage::ALL.iter().filter(|s| s.is_terminal()).collect();
    assert_eq!(terminal, vec![&Stage::Processed]);
    assert!(Stage::WORK.iter().all(|s| !s.is_terminal()));
}

#[parameterized(
    fetched = { Stage::Fetched, 15 },
    peeled = { Stage::Peeled, 38 },
    squeezed = { Stage::Squeezed, 29 },
    bottled = { Stage::Bottled, 17 },
    processed = { Stage::Processed, 1 },
)]
fn default_durations(stage: Stage, millis: u64) {
    assert_eq!(stage.default_duration(), Duration::from_millis(millis));
}

#[test]
fn deserializes_from_lowercase_names() {
    #[derive(Deserialize)]
    struct Wrapper {
        stage: Stage,
    }
    let parsed: Wrapper = toml::from_str(r#"stage = "squeezed""#).unwrap();
    assert_eq!(parsed.stage, Stage::Squeezed);
    assert!(toml::from_str::<Wrapper>(r#"stage = "Squeezed""#).is_err());
}

#[test]
fn display_uses_stage_name() {
    assert_eq!(Stage::Bottled.to_string(), "Bottled");
    assert_eq!(Stage::Squeezed.role(), "Juicer");
}
