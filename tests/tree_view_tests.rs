use jsonsmith::config::Config;
use jsonsmith::editor::state::EditorState;
use jsonsmith::ui::tree_view::{
    child_ids, count_nodes, flatten_visible_nodes, matches_search, render_outline,
};

fn state_with(json: &str) -> EditorState {
    let mut state = EditorState::new(&Config::default());
    state.import_json(json).unwrap();
    state
}

#[test]
fn test_flatten_fully_expanded() {
    let state = state_with(r#"{"a": {"b": 1}, "c": [true]}"#);
    let lines = flatten_visible_nodes(state.tree().nodes());

    let summary: Vec<_> = lines.iter().map(|l| (l.node.key(), l.depth)).collect();
    assert_eq!(
        summary,
        vec![("root", 0), ("a", 1), ("b", 2), ("c", 1), ("0", 2)]
    );
    assert_eq!(lines.len(), count_nodes(state.tree().nodes()));
}

#[test]
fn test_collapse_all_shows_only_roots() {
    let mut state = state_with(r#"{"a": {"b": 1}, "c": [true]}"#);
    state.collapse_all();

    let lines = flatten_visible_nodes(state.tree().nodes());
    assert_eq!(lines.len(), 1);
    assert!(lines[0].has_children);
    assert!(!lines[0].is_expanded);
    assert_eq!(count_nodes(state.tree().nodes()), 5);
}

#[test]
fn test_empty_container_is_still_a_container() {
    let state = state_with(r#"{"empty": []}"#);
    let lines = flatten_visible_nodes(state.tree().nodes());
    assert!(lines[1].has_children);
    assert!(child_ids(lines[1].node).is_empty());
}

#[test]
fn test_search_matches_values_and_keys() {
    let state = state_with(r#"{"user": {"email": "ALICE@example.com", "age": 30}}"#);
    let lines = flatten_visible_nodes(state.tree().nodes());

    let hits: Vec<_> = lines
        .iter()
        .filter(|l| matches_search(l.node, "alice"))
        .map(|l| l.node.key())
        .collect();
    assert_eq!(hits, vec!["email"]);

    let hits: Vec<_> = lines
        .iter()
        .filter(|l| matches_search(l.node, "30"))
        .map(|l| l.node.key())
        .collect();
    assert_eq!(hits, vec!["age"]);
}

#[test]
fn test_render_outline() {
    let mut state = state_with(r#"{"list": [1, null], "obj": {"k": "v"}}"#);
    let obj = state.tree().get_node(&[0, 1]).unwrap().id();
    assert!(state.set_expanded(obj, false));

    let outline = render_outline(&flatten_visible_nodes(state.tree().nodes()), "");
    assert_eq!(
        outline,
        "  - root: {2}\n    - list: [2]\n        0: 1\n        1: null\n    + obj: {1}\n"
    );
}
