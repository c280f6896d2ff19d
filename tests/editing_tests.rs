//! Integrationstests für die Editing-Use-Cases:
//! - DeleteSelected mit und ohne fit_parent_bbox_on_delete
//! - Box- und Textänderungen, Verschieben, Einfügen
//! - Undo/Redo über den Controller

use hocr_editor::{AppController, AppIntent, AppState};
use hocr_editor::{BBox, NodeId, NodeKind};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

struct Sample {
    par: NodeId,
    lines: [NodeId; 2],
    words: [NodeId; 4],
}

/// Seite → Absatz → zwei Zeilen mit je zwei Wörtern.
fn sample_state() -> (AppState, Sample) {
    let mut state = AppState::new();
    let doc = &mut state.document;
    let page = doc.add_root(NodeKind::Page, BBox::new(0, 0, 1000, 1000));
    let par = doc
        .append_child(page, NodeKind::Paragraph, BBox::new(10, 10, 600, 200))
        .expect("Absatz");
    let l1 = doc
        .append_child(par, NodeKind::Line, BBox::new(10, 10, 600, 50))
        .expect("Zeile 1");
    let w0 = doc
        .add_word(l1, BBox::new(10, 10, 100, 50), "Hallo")
        .expect("w0");
    let w1 = doc
        .add_word(l1, BBox::new(110, 10, 200, 50), "Welt")
        .expect("w1");
    let l2 = doc
        .append_child(par, NodeKind::Line, BBox::new(10, 60, 600, 100))
        .expect("Zeile 2");
    let w2 = doc
        .add_word(l2, BBox::new(10, 60, 120, 100), "zweite")
        .expect("w2");
    let w3 = doc
        .add_word(l2, BBox::new(130, 60, 250, 100), "Zeile")
        .expect("w3");
    (
        state,
        Sample {
            par,
            lines: [l1, l2],
            words: [w0, w1, w2, w3],
        },
    )
}

fn bbox_of(state: &AppState, id: NodeId) -> Option<BBox> {
    state.document.node(id).map(|n| n.bbox)
}

// ─── DeleteSelected ─────────────────────────────────────────────────────────

#[test]
fn test_delete_word_passt_zeilenbox_an_und_undo_stellt_her() {
    init_logger();
    let mut controller = AppController::new();
    let (mut state, s) = sample_state();
    state.document.select(s.words[1]);

    controller
        .handle_intent(&mut state, AppIntent::DeleteSelectedRequested)
        .expect("DeleteSelectedRequested darf nicht fehlschlagen");

    assert!(!state.document.contains(s.words[1]));
    assert_eq!(bbox_of(&state, s.lines[0]), Some(BBox::new(10, 10, 100, 50)));
    assert_eq!(state.history.len(), 1, "Löschen + Anpassen = ein Schritt");
    state.document.check_consistency().expect("konsistent");

    controller
        .handle_intent(&mut state, AppIntent::UndoRequested)
        .expect("Undo");

    assert_eq!(state.document.children(s.lines[0]), &[s.words[0], s.words[1]]);
    assert_eq!(bbox_of(&state, s.lines[0]), Some(BBox::new(10, 10, 600, 50)));
    state.document.check_consistency().expect("konsistent");
}

#[test]
fn test_delete_ohne_bbox_anpassung_laesst_zeilenbox_unveraendert() {
    init_logger();
    let mut controller = AppController::new();
    let (mut state, s) = sample_state();
    state.options.fit_parent_bbox_on_delete = false;
    state.document.select(s.words[1]);

    controller
        .handle_intent(&mut state, AppIntent::DeleteSelectedRequested)
        .expect("DeleteSelectedRequested darf nicht fehlschlagen");

    assert!(!state.document.contains(s.words[1]));
    assert_eq!(bbox_of(&state, s.lines[0]), Some(BBox::new(10, 10, 600, 50)));
}

#[test]
fn test_delete_zeile_und_wort_entfernt_nachfahren_und_passt_von_innen_nach_aussen_an() {
    init_logger();
    let mut controller = AppController::new();
    let (mut state, s) = sample_state();
    state.document.select(s.lines[0]);
    state.document.select(s.words[2]);

    controller
        .handle_intent(&mut state, AppIntent::DeleteSelectedRequested)
        .expect("DeleteSelectedRequested darf nicht fehlschlagen");

    assert_eq!(state.document.node_count(), 4);
    assert!(!state.document.contains(s.words[0]));
    assert!(!state.document.contains(s.words[1]));
    assert!(state.document.selection().is_empty());
    // Zeile 2 wird vor dem Absatz angepasst
    assert_eq!(bbox_of(&state, s.lines[1]), Some(BBox::new(130, 60, 250, 100)));
    assert_eq!(bbox_of(&state, s.par), Some(BBox::new(130, 60, 250, 100)));
    state.document.check_consistency().expect("konsistent");

    controller
        .handle_intent(&mut state, AppIntent::UndoRequested)
        .expect("Undo");

    assert_eq!(state.document.node_count(), 8);
    assert_eq!(state.document.children(s.par), &s.lines);
    assert_eq!(state.document.children(s.lines[1]), &[s.words[2], s.words[3]]);
    assert_eq!(bbox_of(&state, s.par), Some(BBox::new(10, 10, 600, 200)));
    assert_eq!(bbox_of(&state, s.lines[1]), Some(BBox::new(10, 60, 600, 100)));
    assert!(
        state.document.selection().is_empty(),
        "Undo einer Löschung stellt die Selektion nicht wieder her"
    );
    state.document.check_consistency().expect("konsistent");
}

#[test]
fn test_delete_ohne_selektion_erzeugt_keinen_schritt() {
    let mut controller = AppController::new();
    let (mut state, _) = sample_state();

    controller
        .handle_intent(&mut state, AppIntent::DeleteSelectedRequested)
        .expect("DeleteSelectedRequested darf nicht fehlschlagen");

    assert!(state.history.is_empty());
    assert_eq!(state.document.node_count(), 8);
}

// ─── Eigenschaften ──────────────────────────────────────────────────────────

#[test]
fn test_set_bbox_undo_redo() {
    init_logger();
    let mut controller = AppController::new();
    let (mut state, s) = sample_state();
    let neu = BBox::new(12, 12, 98, 48);

    controller
        .handle_intent(
            &mut state,
            AppIntent::SetNodeBBoxRequested {
                id: s.words[0],
                bbox: neu,
            },
        )
        .expect("SetNodeBBox");
    assert_eq!(bbox_of(&state, s.words[0]), Some(neu));

    controller
        .handle_intent(&mut state, AppIntent::UndoRequested)
        .expect("Undo");
    assert_eq!(bbox_of(&state, s.words[0]), Some(BBox::new(10, 10, 100, 50)));

    controller
        .handle_intent(&mut state, AppIntent::RedoRequested)
        .expect("Redo");
    assert_eq!(bbox_of(&state, s.words[0]), Some(neu));
}

#[test]
fn test_unveraenderte_bbox_erzeugt_keinen_schritt() {
    let mut controller = AppController::new();
    let (mut state, s) = sample_state();

    controller
        .handle_intent(
            &mut state,
            AppIntent::SetNodeBBoxRequested {
                id: s.words[0],
                bbox: BBox::new(10, 10, 100, 50),
            },
        )
        .expect("SetNodeBBox");

    assert!(state.history.is_empty());
}

#[test]
fn test_fit_to_children_berechnet_beim_anwenden() {
    let mut controller = AppController::new();
    let (mut state, s) = sample_state();

    controller
        .handle_intent(
            &mut state,
            AppIntent::FitNodeToChildrenRequested { id: s.lines[1] },
        )
        .expect("FitNodeToChildren");
    assert_eq!(bbox_of(&state, s.lines[1]), Some(BBox::new(10, 60, 250, 100)));

    controller
        .handle_intent(&mut state, AppIntent::UndoRequested)
        .expect("Undo");
    assert_eq!(bbox_of(&state, s.lines[1]), Some(BBox::new(10, 60, 600, 100)));
}

#[test]
fn test_set_word_text_und_nicht_wort_wird_ignoriert() {
    let mut controller = AppController::new();
    let (mut state, s) = sample_state();

    controller
        .handle_intent(
            &mut state,
            AppIntent::SetWordTextRequested {
                id: s.words[1],
                text: "Wald".to_string(),
            },
        )
        .expect("SetWordText");
    assert_eq!(
        state.document.node(s.words[1]).map(|n| n.text.as_str()),
        Some("Wald")
    );
    assert_eq!(state.history.undo_description(), Some("Text von #5 ändern"));

    controller
        .handle_intent(
            &mut state,
            AppIntent::SetWordTextRequested {
                id: s.lines[0],
                text: "Zeile".to_string(),
            },
        )
        .expect("SetWordText auf Zeile");
    assert_eq!(state.history.len(), 1, "Zeilen haben keinen Text");
}

// ─── Struktur ───────────────────────────────────────────────────────────────

#[test]
fn test_move_node_within_parent_und_undo() {
    let mut controller = AppController::new();
    let (mut state, s) = sample_state();

    controller
        .handle_intent(
            &mut state,
            AppIntent::MoveNodeRequested {
                id: s.words[3],
                to_index: 0,
            },
        )
        .expect("MoveNode");
    assert_eq!(state.document.children(s.lines[1]), &[s.words[3], s.words[2]]);

    controller
        .handle_intent(&mut state, AppIntent::UndoRequested)
        .expect("Undo");
    assert_eq!(state.document.children(s.lines[1]), &[s.words[2], s.words[3]]);
}

#[test]
fn test_move_ausserhalb_der_grenzen_wird_abgelehnt() {
    let mut controller = AppController::new();
    let (mut state, s) = sample_state();

    controller
        .handle_intent(
            &mut state,
            AppIntent::MoveNodeRequested {
                id: s.words[0],
                to_index: 7,
            },
        )
        .expect("MoveNode");

    assert!(state.history.is_empty());
    assert_eq!(state.document.children(s.lines[0]), &[s.words[0], s.words[1]]);
}

#[test]
fn test_insert_word_redo_behaelt_id() {
    init_logger();
    let mut controller = AppController::new();
    let (mut state, s) = sample_state();

    controller
        .handle_intent(
            &mut state,
            AppIntent::InsertWordRequested {
                parent: s.lines[0],
                index: Some(1),
                bbox: BBox::new(102, 10, 108, 50),
                text: "liebe".to_string(),
            },
        )
        .expect("InsertWord");

    let children = state.document.children(s.lines[0]).to_vec();
    assert_eq!(children.len(), 3);
    let neu = children[1];
    assert_eq!(
        state.document.node(neu).map(|n| n.text.as_str()),
        Some("liebe")
    );
    state.document.check_consistency().expect("konsistent");

    controller
        .handle_intent(&mut state, AppIntent::UndoRequested)
        .expect("Undo");
    assert!(!state.document.contains(neu));

    controller
        .handle_intent(&mut state, AppIntent::RedoRequested)
        .expect("Redo");
    assert_eq!(state.document.children(s.lines[0])[1], neu);
    state.document.check_consistency().expect("konsistent");
}

#[test]
fn test_insert_word_am_ende_und_selektion_per_option() {
    let mut controller = AppController::new();
    let (mut state, s) = sample_state();
    state.options.select_inserted_nodes = true;
    state.document.select(s.words[0]);

    controller
        .handle_intent(
            &mut state,
            AppIntent::InsertWordRequested {
                parent: s.lines[1],
                index: None,
                bbox: BBox::new(260, 60, 300, 100),
                text: "!".to_string(),
            },
        )
        .expect("InsertWord");

    let neu = *state
        .document
        .children(s.lines[1])
        .last()
        .expect("eingefügtes Wort");
    assert_eq!(state.document.selected_ids(), vec![neu]);
}

#[test]
fn test_neuer_schritt_nach_undo_verwirft_redo() {
    let mut controller = AppController::new();
    let (mut state, s) = sample_state();

    controller
        .handle_intent(
            &mut state,
            AppIntent::SetWordTextRequested {
                id: s.words[0],
                text: "Servus".to_string(),
            },
        )
        .expect("SetWordText");
    controller
        .handle_intent(&mut state, AppIntent::UndoRequested)
        .expect("Undo");
    assert!(state.can_redo());

    controller
        .handle_intent(
            &mut state,
            AppIntent::FitNodeToChildrenRequested { id: s.lines[0] },
        )
        .expect("FitNodeToChildren");

    assert!(!state.can_redo());
    controller
        .handle_intent(&mut state, AppIntent::RedoRequested)
        .expect("Redo ohne Wirkung");
    assert_eq!(
        state.document.node(s.words[0]).map(|n| n.text.as_str()),
        Some("Hallo")
    );
}
