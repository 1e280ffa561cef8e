//! End-to-end menu engine behaviour with in-memory adapters.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::Cursor;
use std::rc::Rc;

use magic_adapters::{FixedSize, LineKeyReader, MemoryOutput, ScriptedKeys};
use magic_core::application::{MenuNavigation, MenuRenderer};
use magic_core::application::services::NavContext;
use magic_core::prelude::*;

use magic_core::domain::KeyEvent::*;

fn settings() -> DisplaySettings {
    DisplaySettings {
        color: false,
        show_directory: false,
        size_check_interval_ms: 0,
        ..DisplaySettings::default()
    }
}

fn session_with(
    keys: impl KeyReader + 'static,
    size: FixedSize,
    settings: DisplaySettings,
) -> (Session, MemoryOutput) {
    let out = MemoryOutput::new();
    let session = Session::builder()
        .settings(settings)
        .keys(Box::new(keys))
        .output(Box::new(out.clone()))
        .size_source(Box::new(size))
        .build()
        .unwrap();
    (session, out)
}

/// A menu of `n` items whose actions hand back their own label.
fn labelled(n: usize) -> Menu {
    (1..=n).fold(Menu::new("Main Menu"), |menu, i| {
        let label = format!("Item {i}");
        let value = label.clone();
        menu.item(label, move |_| Ok(Signal::Value(value.clone())))
    })
}

#[test]
fn up_from_first_item_selects_last() {
    let (mut session, _) = session_with(
        ScriptedKeys::raw([Up, Enter]),
        FixedSize::new(80, 24),
        settings(),
    );
    let outcome = labelled(5).run(&mut session).unwrap();
    assert_eq!(outcome, MenuOutcome::Value("Item 5".into()));
}

#[test]
fn down_from_last_item_wraps_to_first() {
    let (mut session, _) = session_with(
        ScriptedKeys::raw([End, Down, Enter]),
        FixedSize::new(80, 24),
        settings(),
    );
    let outcome = labelled(5).run(&mut session).unwrap();
    assert_eq!(outcome, MenuOutcome::Value("Item 1".into()));
}

#[test]
fn scroll_offset_tracks_selection_minimally() {
    let (mut session, _) = session_with(
        ScriptedKeys::raw([]),
        FixedSize::new(80, 10),
        settings(),
    );
    session.terminal_mut().refresh();

    let items: Vec<MenuItem> = (0..20)
        .map(|i| MenuItem::new(format!("Item {i}"), |_| Ok(Signal::Stay)))
        .collect();
    let mut nav = MenuNavigation::new("Main Menu", items.len()).unwrap();
    let mut renderer = MenuRenderer::new("Main Menu");
    renderer.render(&mut session, &items, 0, true).unwrap();

    let steps = [
        Down, Down, Down, Down, Down, Up, Up, Up, Up, Up, Up, Up, Down, Down, Down, Up, Down,
        Down, Down, Down, Down, Down,
    ];
    for event in steps {
        let before = renderer.viewport().offset();
        let ctx = NavContext::new(InputMode::Raw, renderer.page_size(), session.settings());
        nav.apply(event, &ctx);
        renderer
            .render(&mut session, &items, nav.selected(), false)
            .unwrap();

        let offset = renderer.viewport().offset();
        let visible = renderer.viewport().visible();
        let selected = nav.selected();
        assert!(offset <= selected && selected < offset + visible);

        // Minimal adjustment: either unchanged, or the selection sits on
        // the edge it scrolled towards.
        if offset != before {
            let wrapped = selected == 0 || selected == items.len() - 1;
            assert!(
                wrapped || selected == offset || selected == offset + visible - 1,
                "offset jumped from {before} to {offset} for selection {selected}"
            );
        }
    }
}

#[test]
fn numeric_fallback_resolves_typed_number() {
    let keys = LineKeyReader::new(Cursor::new(b"3\n".to_vec()));
    let (mut session, _) = session_with(keys, FixedSize::unavailable(), DisplaySettings::plain());
    let outcome = labelled(5).run(&mut session).unwrap();
    assert_eq!(outcome, MenuOutcome::Value("Item 3".into()));
}

#[test]
fn numeric_fallback_reprompts_out_of_range() {
    let keys = LineKeyReader::new(Cursor::new(b"9\nabc\n2\n".to_vec()));
    let (mut session, out) = session_with(keys, FixedSize::unavailable(), DisplaySettings::plain());
    let outcome = labelled(5).run(&mut session).unwrap();

    assert_eq!(outcome, MenuOutcome::Value("Item 2".into()));
    let text = out.contents();
    assert_eq!(text.matches("Please enter a number between 1 and 5").count(), 2);
    assert!(!text.contains('\x1b'), "plain output must not contain escape codes");
}

#[test]
fn numeric_fallback_eof_cancels() {
    let keys = LineKeyReader::new(Cursor::new(Vec::new()));
    let (mut session, _) = session_with(keys, FixedSize::unavailable(), DisplaySettings::plain());
    assert!(labelled(3).run(&mut session).unwrap().is_cancelled());
}

#[test]
fn full_redraw_twice_is_identical() {
    let (mut session, out) = session_with(
        ScriptedKeys::raw([]),
        FixedSize::new(80, 24),
        settings(),
    );
    session.terminal_mut().refresh();
    let items: Vec<MenuItem> = (0..7)
        .map(|i| MenuItem::new(format!("Item {i}"), |_| Ok(Signal::Stay)))
        .collect();
    let mut renderer = MenuRenderer::new("Main Menu");

    renderer.render(&mut session, &items, 3, true).unwrap();
    let first = out.contents();
    out.clear();
    renderer.render(&mut session, &items, 3, true).unwrap();
    assert_eq!(first, out.contents());
}

#[test]
fn read_failure_restores_terminal() {
    let keys = ScriptedKeys::raw([Down, Down]).fail_when_exhausted();
    let (mut session, out) = session_with(keys.clone(), FixedSize::new(80, 24), settings());

    let err = labelled(4).run(&mut session).unwrap_err();
    assert!(matches!(err, MenuError::Io(_)));
    assert!(!keys.is_active());
    assert!(!session.cursor_hidden());
    assert!(out.contents().ends_with("\x1b[?25h"));
    assert!(session.breadcrumb().is_empty());
}

#[test]
fn render_failure_restores_input_mode() {
    let keys = ScriptedKeys::raw([Enter]);
    let out = MemoryOutput::failing_after(64);
    let mut session = Session::builder()
        .settings(settings())
        .keys(Box::new(keys.clone()))
        .output(Box::new(out))
        .size_source(Box::new(FixedSize::new(80, 24)))
        .build()
        .unwrap();

    assert!(labelled(4).run(&mut session).is_err());
    assert_eq!(keys.rounds(), 1);
    assert!(!keys.is_active());
    assert!(!session.cursor_hidden());
}

#[test]
fn five_items_on_a_tall_terminal_never_scroll() {
    let (mut session, out) = session_with(
        ScriptedKeys::raw([Down, Down, Down, Down, Down, Up, Up, Enter]),
        FixedSize::new(80, 24),
        settings(),
    );
    let outcome = labelled(5).run(&mut session).unwrap();
    assert_eq!(outcome, MenuOutcome::Value("Item 4".into()));
    let text = out.plain_text();
    assert!(!text.contains("more above"));
    assert!(!text.contains("more below"));
}

#[test]
fn twenty_items_on_ten_rows_show_indicators() {
    let mut events = vec![Down; 10];
    events.push(Enter);
    let (mut session, out) = session_with(
        ScriptedKeys::raw(events),
        FixedSize::new(80, 10),
        settings(),
    );
    let outcome = labelled(20).run(&mut session).unwrap();
    assert_eq!(outcome, MenuOutcome::Value("Item 11".into()));

    let text = out.plain_text();
    assert!(text.contains("16 more below"));
    assert!(text.contains("more above"));
    assert!(text.contains("7 more above"));
}

#[test]
fn ctrl_c_in_submenu_backs_out_one_level() {
    let reached = Rc::new(RefCell::new(Vec::new()));
    let log = reached.clone();
    let mut root = Menu::new("Main Menu")
        .submenu("Git Operations", || {
            Menu::new("Git Operations")
                .item("Status", |_| Ok(Signal::Stay))
                .item("Log", |_| Ok(Signal::Stay))
        })
        .item("Settings", move |_| {
            log.borrow_mut().push("settings");
            Ok(Signal::Stay)
        })
        .item("Exit", |_| Ok(Signal::Exit));

    let (mut session, _) = session_with(
        ScriptedKeys::raw([Enter, Down, CtrlC, Down, Enter, Down, Enter]),
        FixedSize::new(80, 24),
        settings(),
    );
    let outcome = root.run(&mut session).unwrap();

    assert_eq!(outcome, MenuOutcome::Exited);
    assert_eq!(*reached.borrow(), ["settings"]);
}

#[test]
fn ctrl_c_at_root_returns_cancelled() {
    let (mut session, _) = session_with(
        ScriptedKeys::raw([Down, CtrlC]),
        FixedSize::new(80, 24),
        settings(),
    );
    assert!(labelled(3).run(&mut session).unwrap().is_cancelled());
}

#[test]
fn failing_action_keeps_the_menu_alive() {
    let mut menu = Menu::new("Main Menu")
        .item("Pull", |_| Err("remote 'origin' not found".into()))
        .item("Exit", |_| Ok(Signal::Exit));
    let keys = ScriptedKeys::raw([Enter, Enter, Down, Enter]);
    let (mut session, out) = session_with(keys.clone(), FixedSize::new(80, 24), settings());

    assert_eq!(menu.run(&mut session).unwrap(), MenuOutcome::Exited);
    assert!(out.plain_text().contains("remote 'origin' not found"));
    assert_eq!(keys.remaining(), 0);
}

#[test]
fn short_terminal_degrades_to_listing() {
    let (mut session, out) = session_with(
        ScriptedKeys::raw([Down, Enter]),
        FixedSize::new(80, 6),
        settings(),
    );
    let outcome = labelled(3).run(&mut session).unwrap();
    assert_eq!(outcome, MenuOutcome::Value("Item 2".into()));

    let text = out.contents();
    assert!(!text.contains("\x1b[2J"));
    assert!(text.contains("> 2. Item 2"));
}

/// Raw keys that resize the terminal when they hit a `Resize` and note how
/// many full repaints were on screen at every read.
struct ResizingKeys {
    events: VecDeque<KeyEvent>,
    size: FixedSize,
    out: MemoryOutput,
    clears_at_read: Rc<RefCell<Vec<usize>>>,
}

impl KeyReader for ResizingKeys {
    fn mode(&self) -> InputMode {
        InputMode::Raw
    }

    fn enter(&mut self) -> MenuResult<()> {
        Ok(())
    }

    fn leave(&mut self) -> MenuResult<()> {
        Ok(())
    }

    fn read_event(&mut self) -> MenuResult<KeyEvent> {
        self.clears_at_read
            .borrow_mut()
            .push(self.out.contents().matches("\x1b[2J").count());
        let event = self.events.pop_front().unwrap_or(CtrlC);
        if event == Resize {
            self.size.resize(100, 40);
        }
        Ok(event)
    }
}

#[test]
fn resize_repaints_before_the_next_read() {
    let size = FixedSize::new(80, 24);
    let out = MemoryOutput::new();
    let clears = Rc::new(RefCell::new(Vec::new()));
    let keys = ResizingKeys {
        events: VecDeque::from([Resize, Enter]),
        size: size.clone(),
        out: out.clone(),
        clears_at_read: clears.clone(),
    };
    let mut session = Session::builder()
        .settings(DisplaySettings {
            size_check_interval_ms: 60_000,
            ..settings()
        })
        .keys(Box::new(keys))
        .output(Box::new(out.clone()))
        .size_source(Box::new(size))
        .build()
        .unwrap();

    let outcome = labelled(3).run(&mut session).unwrap();
    assert_eq!(outcome, MenuOutcome::Value("Item 1".into()));
    assert_eq!(*clears.borrow(), [1, 2]);
    assert_eq!(session.terminal().size().width, 100);
}

#[test]
fn undecodable_line_is_reprompted() {
    let keys = LineKeyReader::new(Cursor::new(b"\xff\xfe\n3\n".to_vec()));
    let (mut session, out) = session_with(keys, FixedSize::unavailable(), DisplaySettings::plain());
    let outcome = labelled(5).run(&mut session).unwrap();

    assert_eq!(outcome, MenuOutcome::Value("Item 3".into()));
    assert!(out.contents().contains("Please enter a number between 1 and 5"));
}

#[test]
fn empty_submenu_is_reported_and_the_parent_carries_on() {
    let mut root = Menu::new("Main Menu")
        .submenu("Plugins", || Menu::new("Plugins"))
        .item("Exit", |_| Ok(Signal::Exit));
    let keys = ScriptedKeys::raw([Enter, Enter, Down, Enter]);
    let (mut session, out) = session_with(keys.clone(), FixedSize::new(80, 24), settings());

    assert_eq!(root.run(&mut session).unwrap(), MenuOutcome::Exited);
    assert!(out.plain_text().contains("has no items"));
    assert_eq!(keys.remaining(), 0);
    assert!(session.breadcrumb().is_empty());
}
