// Keyshow End-to-End Scenarios
//
// Drives the full pipeline: EventSender -> capture session thread ->
// LabelEngine -> listener callbacks, the way the overlay window uses it.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use keyshow_core::{
    ButtonEvent, CaptureEvent, DisplayManager, KeyEvent, LabelEngine, ModState, Options,
    StaticFonts,
};

type Labels = Arc<Mutex<Vec<(Option<String>, bool)>>>;
type Images = Arc<Mutex<Vec<Option<(u8, bool)>>>>;

fn manager_with(opts: Options) -> (DisplayManager, Labels, Images) {
    let labels: Labels = Arc::new(Mutex::new(Vec::new()));
    let images: Images = Arc::new(Mutex::new(Vec::new()));
    let l = Arc::clone(&labels);
    let i = Arc::clone(&images);
    let engine = LabelEngine::new(
        opts,
        Box::new(StaticFonts::none()),
        Box::new(move |m, synthetic| l.lock().push((m.map(String::from), synthetic))),
        Box::new(move |b| i.lock().push(b.map(|b| (b.button, b.pressed)))),
    );
    (DisplayManager::new(engine), labels, images)
}

fn press(symbol: &str, string: Option<&str>) -> CaptureEvent {
    CaptureEvent::Key(KeyEvent {
        string: string.map(String::from),
        ..KeyEvent::press(Instant::now(), symbol)
    })
}

fn press_mods(symbol: &str, mods: ModState) -> CaptureEvent {
    CaptureEvent::Key(KeyEvent {
        mods,
        ..KeyEvent::press(Instant::now(), symbol)
    })
}

#[test]
fn typed_keys_flow_through_to_the_label() {
    let (mut manager, labels, _) = manager_with(Options::default());
    let sender = manager.start().unwrap();

    sender.send(press("a", Some("a"))).unwrap();
    sender.send(press("b", Some("b"))).unwrap();
    manager.stop();

    let seen = labels.lock().clone();
    assert_eq!(seen.len(), 2);
    let last = seen[1].0.as_deref().unwrap();
    assert!(last.contains('a') && last.contains('b'), "got: {last}");
}

#[test]
fn baked_backspace_end_to_end() {
    // translated input, baked backspace: [a, b, BackSpace] leaves just "a"
    let (mut manager, labels, _) = manager_with(Options::default());
    let sender = manager.start().unwrap();

    sender.send(press("a", Some("a"))).unwrap();
    sender.send(press("b", Some("b"))).unwrap();
    sender.send(press("BackSpace", None)).unwrap();
    manager.stop();

    let engine = manager.engine();
    let engine = engine.lock();
    let keys: Vec<_> = engine.transcript().iter().map(|k| k.markup.clone()).collect();
    assert_eq!(keys, vec!["a"]);

    let last = labels.lock().last().cloned().unwrap().0.unwrap();
    assert!(last.contains('a') && !last.contains('b'), "got: {last}");
}

#[test]
fn stealth_toggle_silences_the_stream() {
    let (mut manager, labels, images) = manager_with(Options::default());
    let sender = manager.start().unwrap();

    let shift_self = ModState { shift: true, ..Default::default() };
    sender.send(press_mods("Shift_L", shift_self)).unwrap();
    sender.send(press("a", Some("a"))).unwrap();
    sender.send(press("b", Some("b"))).unwrap();
    manager.stop();

    assert!(labels.lock().is_empty());
    // the toggle-off reset is the last image signal
    assert_eq!(*images.lock().last().unwrap(), None);
    assert!(manager.engine().lock().transcript().is_empty());
}

#[test]
fn mouse_buttons_reach_the_image_listener() {
    let (mut manager, labels, images) = manager_with(Options::default());
    let sender = manager.start().unwrap();

    sender
        .send(CaptureEvent::Button(ButtonEvent {
            stamp: Instant::now(),
            button: 3,
            pressed: true,
        }))
        .unwrap();
    sender
        .send(CaptureEvent::Button(ButtonEvent {
            stamp: Instant::now(),
            button: 9,
            pressed: true,
        }))
        .unwrap();
    manager.stop();

    assert_eq!(*images.lock(), vec![Some((3, true))]);
    // the extra button went to the label instead
    let last = labels.lock().last().cloned().unwrap().0.unwrap();
    assert!(last.contains("M5"), "got: {last}");
}

#[test]
fn capture_failure_surfaces_null_label() {
    let (mut manager, labels, _) = manager_with(Options::default());
    let sender = manager.start().unwrap();

    sender.send(CaptureEvent::Failed).unwrap();
    manager.stop();

    assert_eq!(*labels.lock(), vec![(None, false)]);
}

#[test]
fn stop_closes_the_channel_and_joins() {
    let (mut manager, labels, _) = manager_with(Options::default());
    let sender = manager.start().unwrap();

    sender.send(press("a", Some("a"))).unwrap();
    manager.stop();
    let count = labels.lock().len();

    // no callback can fire after stop returns, and the channel is gone
    assert!(sender.send(press("b", Some("b"))).is_err());
    assert_eq!(labels.lock().len(), count);

    // stop is idempotent
    manager.stop();
}

#[test]
fn restart_replaces_the_previous_session() {
    let (mut manager, labels, _) = manager_with(Options::default());
    let first = manager.start().unwrap();
    let second = manager.start().unwrap();

    assert!(first.send(press("a", Some("a"))).is_err());
    second.send(press("b", Some("b"))).unwrap();
    manager.stop();

    let seen = labels.lock().clone();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].0.as_deref().unwrap().contains('b'));
}

#[test]
fn clear_and_refresh_from_the_timer_side() {
    let (mut manager, labels, _) = manager_with(Options::default());
    let sender = manager.start().unwrap();
    sender.send(press("a", Some("a"))).unwrap();
    manager.stop();

    manager.clear();
    manager.queue_refresh();

    let seen = labels.lock().clone();
    let (markup, synthetic) = seen.last().cloned().unwrap();
    assert!(synthetic);
    assert_eq!(markup.as_deref(), Some(""));
}
