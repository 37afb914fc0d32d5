use panelkit_drawer::{DrawerConfig, DrawerState, Pin, TraySession, Visibility};
use panelkit_gesture::PointerEvent;
use panelkit_testing::ImmediateDriver;
use panelkit_ui_graphics::Size;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn swiped_tray_hides_before_reporting_close() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let visibility_log = Rc::clone(&log);
    let close_log = Rc::clone(&log);

    let tray = TraySession::builder(DrawerConfig::default())
        .title("Send")
        .viewport(Size::new(390.0, 844.0))
        .on_visibility_change(move |visibility| {
            visibility_log.borrow_mut().push(match visibility {
                Visibility::Visible => "visible",
                Visibility::Hidden => "hidden",
            })
        })
        .on_close_complete(move || close_log.borrow_mut().push("closed"))
        .build(ImmediateDriver::new(Pin::Bottom, 0.0))
        .expect("valid config");

    tray.mount();
    assert_eq!(tray.drawer().state(), DrawerState::Open);
    assert_eq!(log.borrow().as_slice(), &["visible"]);

    let drawer = tray.drawer();
    drawer.on_pointer_event(&PointerEvent::down(195.0, 500.0, 0));
    for step in 1..=10 {
        drawer.on_pointer_event(&PointerEvent::moved(195.0, 500.0 + step as f32 * 20.0, step * 100));
    }
    drawer.on_pointer_event(&PointerEvent::up(195.0, 700.0, 1_200));

    assert_eq!(drawer.state(), DrawerState::Closed);
    assert_eq!(log.borrow().as_slice(), &["visible", "hidden", "closed"]);
}

#[test]
fn tray_is_always_bottom_pinned() {
    let tray = TraySession::builder(DrawerConfig::new(Pin::Left))
        .build(ImmediateDriver::new(Pin::Bottom, 0.0))
        .expect("valid config");
    assert_eq!(tray.drawer().geometry().pin(), Pin::Bottom);
}

#[test]
fn mounting_twice_reports_visible_once() {
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let tray = TraySession::builder(DrawerConfig::default())
        .on_visibility_change(move |_| *sink.borrow_mut() += 1)
        .build(ImmediateDriver::new(Pin::Bottom, 0.0))
        .expect("valid config");

    tray.mount();
    tray.mount();
    assert_eq!(*count.borrow(), 1);
}
