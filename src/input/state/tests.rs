use super::*;
use crate::clock::ManualClock;
use crate::config::{Action, Config};
use crate::draw::color::{BLUE, GREEN, RED};
use crate::draw::{ObjectKind, ObjectRef, SceneObject};
use crate::fade::TimerTransition;
use crate::input::{Key, Modifiers, Tool};
use crate::util::{Point, Rect};

fn create_test_input_state() -> (InputState, ManualClock) {
    let clock = ManualClock::new(0.0);
    let state = InputState::from_config(&Config::default(), Box::new(clock.clone()));
    (state, clock)
}

fn none() -> Modifiers {
    Modifiers::new()
}

fn drag(state: &mut InputState, from: (f64, f64), to: (f64, f64), modifiers: Modifiers) {
    state.on_pointer_down(Point::new(from.0, from.1), modifiers, 1);
    state.on_pointer_move(Point::new(to.0, to.1), modifiers);
    state.on_pointer_up(Point::new(to.0, to.1), modifiers);
}

fn click(state: &mut InputState, at: (f64, f64)) {
    state.on_pointer_down(Point::new(at.0, at.1), none(), 1);
    state.on_pointer_up(Point::new(at.0, at.1), none());
}

fn type_keys(state: &mut InputState, text: &str) {
    for c in text.chars() {
        let key = if c == ' ' { Key::Space } else { Key::Char(c) };
        state.on_key_press(key);
    }
}

#[test]
fn test_adjust_font_size_increase() {
    let (mut state, _) = create_test_input_state();
    assert_eq!(state.current_font_size, 32.0);

    state.adjust_font_size(2.0);
    assert_eq!(state.current_font_size, 34.0);
    assert!(state.needs_redraw);
}

#[test]
fn test_adjust_font_size_clamps_to_range() {
    let (mut state, _) = create_test_input_state();
    state.current_font_size = 10.0;
    state.adjust_font_size(-5.0);
    assert_eq!(state.current_font_size, 8.0);

    state.current_font_size = 70.0;
    state.adjust_font_size(5.0);
    assert_eq!(state.current_font_size, 72.0);
}

#[test]
fn test_font_size_keybinding() {
    let (mut state, _) = create_test_input_state();
    state.on_key_press(Key::Ctrl);
    state.on_key_press(Key::Shift);
    state.on_key_press(Key::Char('+'));
    assert_eq!(state.current_font_size, 34.0);
}

#[test]
fn line_drag_appends_on_release() {
    let (mut state, clock) = create_test_input_state();
    state.set_tool(Tool::Line);
    clock.set(2.0);
    state.on_pointer_down(Point::new(10.0, 10.0), none(), 1);
    state.on_pointer_move(Point::new(50.0, 40.0), none());
    assert!(state.scene.in_progress.line.is_some());
    assert!(state.scene.is_empty());

    state.on_pointer_up(Point::new(60.0, 40.0), none());
    let line = &state.scene.collections().lines[0];
    assert_eq!(line.start, Point::new(10.0, 10.0));
    assert_eq!(line.end, Point::new(60.0, 40.0));
    assert_eq!(line.creation_time, Some(2.0));
    assert!(state.scene.in_progress.is_empty());
    assert!(matches!(state.state, DrawingState::Idle));
    assert_eq!(state.history.undo_len(), 1);
}

#[test]
fn shift_snaps_line_end_to_horizontal() {
    let (mut state, _) = create_test_input_state();
    state.set_tool(Tool::Line);
    drag(&mut state, (100.0, 100.0), (150.0, 110.0), Modifiers::shift());
    let line = &state.scene.collections().lines[0];
    assert_eq!(line.end.y, 100.0);
    assert!(line.end.x > 100.0);
}

#[test]
fn shift_is_sampled_on_every_move() {
    let (mut state, _) = create_test_input_state();
    state.set_tool(Tool::Arrow);
    state.on_pointer_down(Point::new(100.0, 100.0), none(), 1);
    state.on_pointer_move(Point::new(150.0, 110.0), Modifiers::shift());
    assert_eq!(state.scene.in_progress.arrow.as_ref().unwrap().end.y, 100.0);
    state.on_pointer_move(Point::new(150.0, 110.0), none());
    assert_eq!(state.scene.in_progress.arrow.as_ref().unwrap().end.y, 110.0);
}

#[test]
fn shift_turns_pen_into_straight_segment() {
    let (mut state, _) = create_test_input_state();
    state.on_pointer_down(Point::new(0.0, 0.0), none(), 1);
    state.on_pointer_move(Point::new(5.0, 3.0), Modifiers::shift());
    state.on_pointer_move(Point::new(40.0, 38.0), Modifiers::shift());
    state.on_pointer_up(Point::new(40.0, 38.0), Modifiers::shift());

    let stroke = &state.scene.collections().pens[0];
    assert_eq!(stroke.points.len(), 2);
    let end = stroke.points[1].point;
    assert!((end.x - end.y).abs() < 1e-9);
}

#[test]
fn freehand_stroke_records_timestamps() {
    let (mut state, clock) = create_test_input_state();
    state.on_pointer_down(Point::new(0.0, 0.0), none(), 1);
    clock.advance(0.1);
    state.on_pointer_move(Point::new(1.0, 1.0), none());
    clock.advance(0.1);
    state.on_pointer_up(Point::new(2.0, 1.0), none());

    let times: Vec<f64> = state.scene.collections().pens[0]
        .points
        .iter()
        .map(|p| p.timestamp)
        .collect();
    assert_eq!(times.len(), 3);
    assert!(times.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn single_click_with_pen_keeps_a_dot() {
    let (mut state, _) = create_test_input_state();
    state.on_pointer_down(Point::new(5.0, 5.0), none(), 1);
    state.on_pointer_up(Point::new(5.0, 5.0), none());
    assert_eq!(state.scene.len(ObjectKind::Pen), 1);
}

#[test]
fn zero_size_shape_is_discarded() {
    let (mut state, _) = create_test_input_state();
    state.set_tool(Tool::Rectangle);
    click(&mut state, (30.0, 30.0));
    assert!(state.scene.is_empty());
    assert!(!state.history.can_undo());
}

#[test]
fn alt_draws_rectangle_around_anchor() {
    let (mut state, _) = create_test_input_state();
    state.set_tool(Tool::Rectangle);
    drag(&mut state, (100.0, 100.0), (120.0, 130.0), Modifiers::alt());
    let rect = &state.scene.collections().rectangles[0];
    assert_eq!(rect.bounding_box(), Rect::from_min_max(80.0, 70.0, 120.0, 130.0));
}

#[test]
fn toggling_alt_mid_drag_recenters_on_current_box() {
    let (mut state, _) = create_test_input_state();
    state.set_tool(Tool::Circle);
    state.on_pointer_down(Point::new(0.0, 0.0), none(), 1);
    state.on_pointer_move(Point::new(40.0, 20.0), none());
    // Box center is (20, 10); growing from there keeps it centered.
    state.on_pointer_move(Point::new(50.0, 30.0), Modifiers::alt());
    let circle = state.scene.in_progress.circle.clone().unwrap();
    assert_eq!(circle.bounding_box().center(), Point::new(20.0, 10.0));

    state.on_pointer_move(Point::new(60.0, 40.0), none());
    let circle = state.scene.in_progress.circle.clone().unwrap();
    assert_eq!(circle.start, Point::new(-10.0, -10.0));
    assert_eq!(circle.end, Point::new(60.0, 40.0));
}

#[test]
fn counters_number_up_and_undo_restores_numbering() {
    let (mut state, _) = create_test_input_state();
    state.set_tool(Tool::Counter);
    for x in [10.0, 60.0, 110.0] {
        click(&mut state, (x, 10.0));
    }
    let numbers: Vec<u32> = state
        .scene
        .collections()
        .counters
        .iter()
        .map(|c| c.number)
        .collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(state.scene.next_counter_number(), 4);

    state.on_key_command(Action::Undo);
    assert_eq!(state.scene.next_counter_number(), 3);
    state.on_key_command(Action::Redo);
    assert_eq!(state.scene.next_counter_number(), 4);
}

#[test]
fn per_tool_styles_are_remembered() {
    let (mut state, _) = create_test_input_state();
    state.set_color(BLUE);
    state.set_line_width(7.0);

    state.set_tool(Tool::Highlighter);
    assert!(state.current_color().a < 1.0);
    assert_eq!(state.current_thickness(), 16.0);
    state.set_color(GREEN);

    state.set_tool(Tool::Pen);
    assert_eq!(state.current_color(), BLUE);
    assert_eq!(state.current_thickness(), 7.0);

    drag(&mut state, (0.0, 0.0), (10.0, 10.0), none());
    assert_eq!(state.scene.collections().pens[0].color, BLUE);

    // Existing objects keep their style.
    state.set_color(RED);
    assert_eq!(state.scene.collections().pens[0].color, BLUE);
}

#[test]
fn line_width_is_clamped() {
    let (mut state, _) = create_test_input_state();
    state.set_line_width(100.0);
    assert_eq!(state.current_thickness(), 40.0);
    state.on_key_command(Action::IncreaseThickness);
    assert_eq!(state.current_thickness(), 40.0);
}

#[test]
fn non_finite_settings_are_ignored() {
    let (mut state, _) = create_test_input_state();
    let width = state.current_thickness();
    let font_size = state.current_font_size;
    let duration = state.scene.fade.duration;

    state.set_line_width(f64::NAN);
    state.set_font_size(f64::INFINITY);
    state.set_fade_duration(f64::NAN);
    assert_eq!(state.current_thickness(), width);
    assert_eq!(state.current_font_size, font_size);
    assert_eq!(state.scene.fade.duration, duration);

    state.set_tool(Tool::Line);
    state.set_line_width(f64::NAN);
    drag(&mut state, (0.0, 0.0), (40.0, 0.0), none());
    assert!(state.scene.collections().lines[0].line_width.is_finite());
}

#[test]
fn text_session_commits_on_return() {
    let (mut state, _) = create_test_input_state();
    state.set_tool(Tool::Text);
    click(&mut state, (50.0, 50.0));
    assert!(matches!(state.state, DrawingState::TextInput(_)));

    type_keys(&mut state, "hi there");
    state.on_key_press(Key::Backspace);
    state.on_key_press(Key::Return);

    assert!(matches!(state.state, DrawingState::Idle));
    let text = &state.scene.collections().texts[0];
    assert_eq!(text.text, "hi ther");
    assert_eq!(text.position, Point::new(50.0, 50.0));
    assert_eq!(text.font_size, 32.0);
}

#[test]
fn shift_return_inserts_newline() {
    let (mut state, _) = create_test_input_state();
    state.set_tool(Tool::Text);
    click(&mut state, (0.0, 0.0));
    type_keys(&mut state, "a");
    state.on_key_press(Key::Shift);
    state.on_key_press(Key::Return);
    state.on_key_release(Key::Shift);
    type_keys(&mut state, "b");
    state.on_key_press(Key::Return);
    assert_eq!(state.scene.collections().texts[0].text, "a\nb");
}

#[test]
fn letters_do_not_trigger_actions_while_typing() {
    let (mut state, _) = create_test_input_state();
    state.set_tool(Tool::Text);
    click(&mut state, (0.0, 0.0));
    type_keys(&mut state, "rb1");
    assert_eq!(state.tool(), Tool::Text);
    assert_eq!(state.current_color(), RED);
}

#[test]
fn empty_text_session_adds_nothing() {
    let (mut state, _) = create_test_input_state();
    state.set_tool(Tool::Text);
    click(&mut state, (0.0, 0.0));
    state.on_key_press(Key::Return);
    assert!(state.scene.is_empty());
    assert!(!state.history.can_undo());
}

#[test]
fn escape_cancels_text_session() {
    let (mut state, _) = create_test_input_state();
    state.set_tool(Tool::Text);
    click(&mut state, (0.0, 0.0));
    type_keys(&mut state, "draft");
    state.on_key_press(Key::Escape);
    assert!(matches!(state.state, DrawingState::Idle));
    assert!(state.scene.is_empty());
}

#[test]
fn clicking_elsewhere_commits_pending_text() {
    let (mut state, _) = create_test_input_state();
    state.set_tool(Tool::Text);
    click(&mut state, (0.0, 0.0));
    type_keys(&mut state, "first");
    click(&mut state, (300.0, 300.0));
    assert_eq!(state.scene.collections().texts.len(), 1);
    assert!(matches!(state.state, DrawingState::TextInput(_)));
}

#[test]
fn switching_tool_commits_pending_text() {
    let (mut state, _) = create_test_input_state();
    state.set_tool(Tool::Text);
    click(&mut state, (0.0, 0.0));
    type_keys(&mut state, "note");
    state.set_tool(Tool::Pen);
    assert_eq!(state.scene.collections().texts[0].text, "note");
}

fn place_text(state: &mut InputState, at: (f64, f64), text: &str) {
    state.set_tool(Tool::Text);
    click(state, at);
    type_keys(state, text);
    state.on_key_press(Key::Return);
}

#[test]
fn double_click_edits_text_in_place() {
    let (mut state, _) = create_test_input_state();
    place_text(&mut state, (100.0, 100.0), "old");
    let order = state.scene.collections().texts[0].order;

    state.on_pointer_down(Point::new(110.0, 110.0), none(), 2);
    let frame = state.render_frame(0.0);
    assert!(frame.items.iter().all(|item| item.in_progress));

    state.on_key_press(Key::Backspace);
    state.on_key_press(Key::Backspace);
    state.on_key_press(Key::Backspace);
    type_keys(&mut state, "new");
    state.on_key_press(Key::Return);

    let text = &state.scene.collections().texts[0];
    assert_eq!(text.text, "new");
    assert_eq!(text.order, order);

    state.on_key_command(Action::Undo);
    assert_eq!(state.scene.collections().texts[0].text, "old");
}

#[test]
fn emptying_edited_text_deletes_it() {
    let (mut state, _) = create_test_input_state();
    place_text(&mut state, (100.0, 100.0), "x");
    state.on_pointer_down(Point::new(105.0, 105.0), none(), 2);
    state.on_key_press(Key::Backspace);
    state.on_key_press(Key::Return);
    assert!(state.scene.collections().texts.is_empty());

    state.on_key_command(Action::Undo);
    assert_eq!(state.scene.collections().texts[0].text, "x");
}

#[test]
fn dragging_text_moves_it_with_one_undo_entry() {
    let (mut state, _) = create_test_input_state();
    place_text(&mut state, (100.0, 100.0), "drag me");
    let entries = state.history.undo_len();

    state.on_pointer_down(Point::new(110.0, 110.0), none(), 1);
    state.on_pointer_move(Point::new(150.0, 120.0), none());
    state.on_pointer_up(Point::new(210.0, 160.0), none());
    assert_eq!(
        state.scene.collections().texts[0].position,
        Point::new(200.0, 150.0)
    );
    assert_eq!(state.history.undo_len(), entries + 1);

    state.on_key_command(Action::Undo);
    assert_eq!(
        state.scene.collections().texts[0].position,
        Point::new(100.0, 100.0)
    );
}

fn scene_with_two_lines() -> (InputState, ManualClock) {
    let (mut state, clock) = create_test_input_state();
    state.set_tool(Tool::Line);
    drag(&mut state, (0.0, 0.0), (100.0, 0.0), none());
    drag(&mut state, (0.0, 100.0), (100.0, 100.0), none());
    state.set_tool(Tool::Select);
    (state, clock)
}

#[test]
fn clicking_an_object_selects_and_moves_it() {
    let (mut state, _) = scene_with_two_lines();
    drag(&mut state, (50.0, 100.0), (50.0, 130.0), none());

    let selected: Vec<ObjectRef> = state.scene.selection().iter().copied().collect();
    assert_eq!(selected, vec![ObjectRef::new(ObjectKind::Line, 1)]);
    assert_eq!(state.scene.collections().lines[1].start, Point::new(0.0, 130.0));
    assert_eq!(state.scene.collections().lines[0].start, Point::new(0.0, 0.0));

    state.on_key_command(Action::Undo);
    assert_eq!(state.scene.collections().lines[1].start, Point::new(0.0, 100.0));
    state.on_key_command(Action::Redo);
    assert_eq!(state.scene.collections().lines[1].start, Point::new(0.0, 130.0));
}

#[test]
fn clicking_empty_space_starts_a_rubber_band() {
    let (mut state, _) = scene_with_two_lines();
    state.on_pointer_down(Point::new(-10.0, -10.0), none(), 1);
    state.on_pointer_move(Point::new(120.0, 50.0), none());
    let frame = state.render_frame(0.0);
    assert_eq!(frame.marquee, Some(Rect::from_min_max(-10.0, -10.0, 120.0, 50.0)));

    state.on_pointer_up(Point::new(120.0, 50.0), none());
    let selected: Vec<ObjectRef> = state.scene.selection().iter().copied().collect();
    assert_eq!(selected, vec![ObjectRef::new(ObjectKind::Line, 0)]);

    let frame = state.render_frame(0.0);
    assert!(frame.marquee.is_none());
    assert_eq!(frame.selection_bounds, Some(Rect::new(-5.0, -5.0, 110.0, 10.0)));
}

#[test]
fn shift_rubber_band_adds_to_selection() {
    let (mut state, _) = scene_with_two_lines();
    click(&mut state, (50.0, 100.0));
    assert_eq!(state.scene.selection().len(), 1);

    drag(&mut state, (-10.0, -10.0), (120.0, 50.0), Modifiers::shift());
    let selected: Vec<ObjectRef> = state.scene.selection().iter().copied().collect();
    assert_eq!(
        selected,
        vec![
            ObjectRef::new(ObjectKind::Line, 0),
            ObjectRef::new(ObjectKind::Line, 1)
        ]
    );
}

#[test]
fn clicking_empty_space_clears_selection() {
    let (mut state, _) = scene_with_two_lines();
    state.on_key_command(Action::SelectAll);
    assert_eq!(state.scene.selection().len(), 2);
    click(&mut state, (500.0, 500.0));
    assert!(state.scene.selection().is_empty());
}

#[test]
fn select_all_only_works_with_select_tool() {
    let (mut state, _) = scene_with_two_lines();
    state.set_tool(Tool::Pen);
    state.on_key_command(Action::SelectAll);
    assert!(state.scene.selection().is_empty());
}

#[test]
fn delete_with_selection_removes_selected_objects() {
    let (mut state, _) = scene_with_two_lines();
    state.on_key_command(Action::SelectAll);
    state.on_key_press(Key::Delete);
    assert!(state.scene.is_empty());
    assert!(state.scene.selection().is_empty());

    // One undo entry per removed object.
    state.on_key_command(Action::Undo);
    assert_eq!(state.scene.len(ObjectKind::Line), 1);
    state.on_key_command(Action::Undo);
    assert_eq!(state.scene.len(ObjectKind::Line), 2);
}

#[test]
fn delete_without_selection_removes_last_of_current_kind() {
    let (mut state, _) = create_test_input_state();
    state.set_tool(Tool::Line);
    drag(&mut state, (0.0, 0.0), (10.0, 0.0), none());
    state.set_tool(Tool::Rectangle);
    drag(&mut state, (0.0, 0.0), (10.0, 10.0), none());
    state.set_tool(Tool::Line);

    state.on_key_press(Key::Backspace);
    assert_eq!(state.scene.len(ObjectKind::Line), 0);
    assert_eq!(state.scene.len(ObjectKind::Rectangle), 1);

    state.on_key_command(Action::Undo);
    assert_eq!(state.scene.len(ObjectKind::Line), 1);
}

#[test]
fn delete_on_empty_collection_is_a_noop() {
    let (mut state, _) = create_test_input_state();
    state.set_tool(Tool::Arrow);
    state.on_key_command(Action::DeleteLast);
    assert!(state.scene.is_empty());
    assert!(!state.history.can_undo());
}

#[test]
fn ctrl_delete_clears_everything() {
    let (mut state, _) = scene_with_two_lines();
    state.on_key_press(Key::Ctrl);
    state.on_key_press(Key::Delete);
    state.on_key_release(Key::Ctrl);
    assert!(state.scene.is_empty());

    state.on_key_command(Action::Undo);
    assert_eq!(state.scene.len(ObjectKind::Line), 2);
}

#[test]
fn clear_all_on_empty_scene_records_nothing() {
    let (mut state, _) = create_test_input_state();
    state.on_key_command(Action::ClearAll);
    assert!(!state.history.can_undo());
}

#[test]
fn keybinding_switches_tool_and_leaving_select_clears_selection() {
    let (mut state, _) = scene_with_two_lines();
    state.on_key_command(Action::SelectAll);
    state.on_key_press(Key::Char('1'));
    assert_eq!(state.tool(), Tool::Pen);
    assert!(state.scene.selection().is_empty());
}

#[test]
fn escape_drops_drawing_and_then_selection() {
    let (mut state, _) = scene_with_two_lines();
    state.on_key_command(Action::SelectAll);
    state.on_key_press(Key::Escape);
    assert!(state.scene.selection().is_empty());

    state.set_tool(Tool::Arrow);
    state.on_pointer_down(Point::new(0.0, 0.0), none(), 1);
    state.on_pointer_move(Point::new(30.0, 30.0), none());
    state.on_key_press(Key::Escape);
    assert!(state.scene.in_progress.is_empty());
    assert_eq!(state.scene.len(ObjectKind::Arrow), 0);
}

#[test]
fn undo_after_adds_returns_to_empty_scene() {
    let (mut state, _) = create_test_input_state();
    state.set_tool(Tool::Counter);
    click(&mut state, (10.0, 10.0));
    state.set_tool(Tool::Circle);
    drag(&mut state, (0.0, 0.0), (20.0, 20.0), none());
    state.set_tool(Tool::Counter);
    click(&mut state, (40.0, 10.0));

    for _ in 0..3 {
        state.on_key_command(Action::Undo);
    }
    assert!(state.scene.is_empty());
    assert_eq!(state.scene.next_counter_number(), 1);
}

#[test]
fn fade_prunes_on_render_and_drives_the_timer() {
    let (mut state, clock) = create_test_input_state();
    state.set_tool(Tool::Rectangle);
    state.on_key_command(Action::ToggleFade);
    assert_eq!(state.take_timer_transition(), None);

    drag(&mut state, (0.0, 0.0), (50.0, 50.0), none());
    assert_eq!(state.take_timer_transition(), Some(TimerTransition::Start));
    assert!(state.is_anything_fading());

    clock.set(0.3);
    assert_eq!(state.render_now().items[0].alpha, 1.0);

    let fading = state.render_frame(1.0).items[0].alpha;
    assert!(fading > 0.0 && fading < 1.0);

    assert!(state.render_frame(1.25).is_empty());
    assert!(state.scene.is_empty());
    assert!(!state.is_anything_fading());
    assert_eq!(state.take_timer_transition(), Some(TimerTransition::Stop));
}

#[test]
fn faded_object_cannot_be_undone() {
    let (mut state, _) = create_test_input_state();
    state.set_fade_mode(true);
    state.set_tool(Tool::Line);
    drag(&mut state, (0.0, 0.0), (50.0, 0.0), none());
    state.render_frame(10.0);
    assert!(state.scene.is_empty());

    state.on_key_command(Action::Undo);
    assert!(!state.history.can_undo());
    assert!(!state.history.can_redo());
}

#[test]
fn text_survives_fade_mode() {
    let (mut state, _) = create_test_input_state();
    state.set_fade_mode(true);
    place_text(&mut state, (0.0, 0.0), "stays");
    assert!(!state.is_anything_fading());
    let frame = state.render_frame(100.0);
    assert!(matches!(frame.items[0].object, SceneObject::Text(_)));
}

#[test]
fn invalid_keybindings_fall_back_to_defaults() {
    let mut config = Config::default();
    config.keybindings.undo = vec!["Ctrl+Z".to_string()];
    config.keybindings.redo = vec!["Ctrl+Z".to_string()];
    let mut state = InputState::from_config(&config, Box::new(ManualClock::new(0.0)));
    state.set_tool(Tool::Counter);
    click(&mut state, (10.0, 10.0));
    state.on_key_press(Key::Ctrl);
    state.on_key_press(Key::Char('z'));
    assert!(state.scene.is_empty());
}
