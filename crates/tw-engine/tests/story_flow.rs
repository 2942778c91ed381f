//! End-to-end play-throughs of small stories loaded from JSON.

use std::sync::Arc;

use tw_core::{LootKind, StoryGraph};
use tw_engine::{
    ActionRejected, EngineConfig, EngineError, GameSession, JournalEntry, Phase, Prompt,
    validate_story,
};

fn session(json: &str) -> GameSession {
    let graph = Arc::new(StoryGraph::from_json(json).unwrap());
    GameSession::new(graph, EngineConfig::default().with_seed(7))
}

const LANTERN: &str = r#"{
    "title": "The Shed",
    "rooms": [
        {
            "id": 0,
            "versions": [{
                "text": "You wake in a shed.\nA guide nods at you.",
                "achievements": [{"label": "met_guide"}],
                "items": [{
                    "label": "lantern",
                    "inventory": "A brass lantern",
                    "lyric": "A lantern hangs by the door.",
                    "autoloot": "False"
                }],
                "choices": [
                    {"text": "go north", "goto": 1, "get_item": "lantern"},
                    {"text": "sleep", "goto": 0}
                ]
            }]
        },
        {
            "id": 1,
            "versions": [
                {
                    "text": "Your lantern lights the path.",
                    "conditions": {"items": ["lantern"]}
                },
                {"text": "It is pitch black."}
            ]
        }
    ]
}"#;

#[test]
fn met_guide_then_lantern() {
    let mut s = session(LANTERN);
    assert_eq!(s.current_room(), "0");
    assert!(s.player().has_label(LootKind::Achievement, "met_guide"));
    assert!(s.player().items().is_empty());

    let view = s.view();
    assert_eq!(view.lines, vec!["You wake in a shed.", "A guide nods at you."]);
    assert_eq!(view.flavor, vec!["A lantern hangs by the door."]);

    let res = s.choose(0).unwrap();
    assert_eq!(res.goto, "1");
    assert_eq!(s.current_room(), "1");
    assert_eq!(s.player().count_label(LootKind::Item, "lantern"), 1);
    assert_eq!(s.player().items().len(), 1);

    let view = s.view();
    assert_eq!(view.version_index, Some(0));
    assert_eq!(view.lines, vec!["Your lantern lights the path."]);
    assert_eq!(view.inventory, vec!["A brass lantern"]);
    assert_eq!(view.prompt, Prompt::End);
}

#[test]
fn reset_all_clears_before_own_loot() {
    let json = r#"{
        "start": "hub",
        "rooms": [
            {"id": "hub", "versions": [{
                "text": "Treasure everywhere.",
                "items": [{"label": "a"}, {"label": "b"}, {"label": "c"}],
                "achievements": [{"label": "x"}, {"label": "y"}],
                "choices": [{"text": "jump", "goto": "void"}]
            }]},
            {"id": "void", "versions": [{
                "text": "Everything fades.",
                "triggers": "reset_all",
                "achievements": [{"label": "reborn"}]
            }]}
        ]
    }"#;
    let mut s = session(json);
    assert_eq!(s.player().items().len(), 3);
    assert_eq!(s.player().achievements().len(), 2);

    s.choose(0).unwrap();
    assert!(s.player().items().is_empty());
    let labels: Vec<_> = s
        .player()
        .achievements()
        .iter()
        .filter_map(|e| e.label.as_deref())
        .collect();
    assert_eq!(labels, vec!["reborn"]);
}

const DICE: &str = r#"{
    "rooms": [
        {"id": "0", "versions": [{
            "text": "Roll for it.",
            "dice": [
                {"val": "1-3", "text": "low", "goto": "A"},
                {"val": "4-6", "text": "high", "goto": "B"}
            ]
        }]},
        {"id": "A", "versions": [{"text": "Low road."}]},
        {"id": "B", "versions": [{"text": "High road."}]}
    ]
}"#;

#[test]
fn forced_roll_of_four_lands_in_b() {
    let mut s = session(DICE);
    assert_eq!(s.phase(), &Phase::AwaitingRoll);

    let handle = s.request_roll().unwrap();
    let res = s.commit_roll_with(&handle, 4).unwrap();
    assert_eq!(res.text, "high");
    assert_eq!(s.current_room(), "B");
    assert!(matches!(
        s.journal().entries(),
        [JournalEntry::Roll { roll: 4, .. }]
    ));
}

#[test]
fn duplicate_roll_request_is_idempotent() {
    let mut once = session(DICE);
    let mut twice = session(DICE);

    once.request_roll().unwrap();
    let handle = twice.request_roll().unwrap();
    let err = twice.request_roll().unwrap_err();
    assert_eq!(err, EngineError::Rejected(ActionRejected::RollInProgress));

    assert_eq!(once.player(), twice.player());
    assert_eq!(once.current_room(), twice.current_room());

    twice.commit_roll_with(&handle, 1).unwrap();
    assert_eq!(twice.current_room(), "A");
    assert!(twice.commit_roll_with(&handle, 6).is_err());
    assert_eq!(twice.current_room(), "A");
}

#[test]
fn sessions_share_a_story() {
    let graph = Arc::new(StoryGraph::from_json(LANTERN).unwrap());
    let mut a = GameSession::new(graph.clone(), EngineConfig::default());
    let b = GameSession::new(graph, EngineConfig::default());

    a.choose(0).unwrap();
    assert_eq!(a.current_room(), "1");
    assert_eq!(b.current_room(), "0");
    assert!(b.player().items().is_empty());
    assert_ne!(a.id(), b.id());
}

#[test]
fn story_files_validate() {
    for json in [LANTERN, DICE] {
        let graph = StoryGraph::from_json(json).unwrap();
        let issues = validate_story(&graph, 6);
        assert!(issues.is_empty(), "{issues:?}");
    }
}
