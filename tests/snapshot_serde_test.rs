use blockfall::core::{GameSession, GameSnapshot, ScriptedSource};
use blockfall::types::{PieceKind, Position};

#[test]
fn snapshot_serializes_to_json() {
    let mut game = GameSession::with_random(ScriptedSource::new([PieceKind::J]));
    game.start();
    game.hard_drop();

    let snap = game.snapshot();
    let value = serde_json::to_value(snap).unwrap();

    assert_eq!(value["score"], 0);
    assert_eq!(value["level"], 1);
    assert_eq!(value["running"], true);
    assert_eq!(value["board"][19][3], 6);
    assert_eq!(value["active"]["kind"], "J");

    let back: GameSnapshot = serde_json::from_value(value).unwrap();
    assert_eq!(back, snap);
    assert_eq!(back.active.unwrap().position, Position::new(3, 0));
}

fn active_snapshot_json() -> serde_json::Value {
    let mut game = GameSession::with_random(ScriptedSource::new([PieceKind::T]));
    game.start();
    serde_json::to_value(game.snapshot()).unwrap()
}

#[test]
fn snapshot_rejects_oversized_shape_matrix() {
    let mut value = active_snapshot_json();
    value["active"]["matrix"]["width"] = 9.into();

    assert!(serde_json::from_value::<GameSnapshot>(value).is_err());
}

#[test]
fn snapshot_rejects_empty_shape_matrix() {
    let mut value = active_snapshot_json();
    value["active"]["matrix"]["height"] = 0.into();

    assert!(serde_json::from_value::<GameSnapshot>(value).is_err());
}

#[test]
fn snapshot_rejects_cells_outside_matrix_bounds() {
    let mut value = active_snapshot_json();
    // T is 3x2; column 3 lies outside it
    value["active"]["matrix"]["cells"][0][3] = true.into();

    assert!(serde_json::from_value::<GameSnapshot>(value).is_err());
}

#[test]
fn deserialized_snapshot_cells_are_usable() {
    let back: GameSnapshot = serde_json::from_value(active_snapshot_json()).unwrap();
    assert_eq!(back.active.unwrap().cells().count(), 4);
}
