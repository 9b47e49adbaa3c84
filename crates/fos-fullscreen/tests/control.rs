//! Fullscreen control tests
//!
//! Drives a `MapPage` through clicks, keys, native change events and the
//! clock, against each user agent profile.

use std::cell::RefCell;
use std::rc::Rc;

use fos_dom::{DomEvent, DomEventType, FullscreenPolicy, UserAgentProfile};
use fos_fullscreen::{
    BuiltinIcon, CONTROL_CLASS, ControlConfiguration, ControlContext, ControlError, FullscreenMode,
    IconSource, MapPage, MapWidget, PSEUDO_FULLSCREEN_CLASS,
};

type Reports = Rc<RefCell<Vec<bool>>>;

fn page_with(profile: UserAgentProfile, config: ControlConfiguration) -> (MapPage, Reports) {
    let reports: Reports = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&reports);
    let config = config.on_fullscreen_change(move |on| sink.borrow_mut().push(on));
    let mut page = MapPage::new(profile, config);
    page.attach().expect("attach");
    (page, reports)
}

fn standard_page() -> (MapPage, Reports) {
    page_with(UserAgentProfile::standard(), ControlConfiguration::default())
}

fn has_pseudo_marker(page: &MapPage) -> bool {
    page.document
        .tree
        .element(page.map.container())
        .is_some_and(|el| el.class_list.contains(PSEUDO_FULLSCREEN_CLASS))
}

fn enter_icon() -> String {
    IconSource::Builtin(BuiltinIcon::Enter).css_background()
}

fn exit_icon() -> String {
    IconSource::Builtin(BuiltinIcon::Exit).css_background()
}

// ============================================================================
// ATTACH / DETACH
// ============================================================================

#[test]
fn test_attach_builds_surface() {
    let (page, _) = standard_page();
    let container = page.control.container().unwrap();

    let el = page.document.tree.element(container).unwrap();
    assert!(el.class_list.contains(CONTROL_CLASS));
    assert!(el.class_list.contains("leaflet-bar"));
    assert_eq!(page.document.tree.parent(container), Some(page.map.container()));

    assert_eq!(page.control_title().as_deref(), Some("Toggle fullscreen"));
    assert_eq!(page.control_icon(), Some(enter_icon()));
    assert_eq!(page.mode(), FullscreenMode::None);

    // click + keydown + four vendor change events
    assert_eq!(page.control.subscription_count(), 6);
    assert_eq!(page.document.listener_count(), 6);
    assert!(page.document.get_element_by_id("leaflet-fullscreen-styles").is_some());
}

#[test]
fn test_attach_twice_is_rejected() {
    let (mut page, _) = standard_page();
    assert!(matches!(page.attach(), Err(ControlError::AlreadyAttached)));
    assert_eq!(page.document.listener_count(), 6);
}

#[test]
fn test_toggle_before_attach_is_harmless() {
    let mut page = MapPage::new(UserAgentProfile::standard(), ControlConfiguration::default());
    assert_eq!(page.toggle(), FullscreenMode::None);
    assert!(!page.click_control());
    assert_eq!(page.document.fullscreen().element(), None);
}

#[test]
fn test_detach_releases_everything() {
    let (mut page, reports) = standard_page();
    let container = page.control.container().unwrap();

    page.detach();

    assert!(!page.control.is_attached());
    assert_eq!(page.document.listener_count(), 0);
    assert_eq!(page.document.tree.parent(container), None);
    assert!(!page.click_control());
    assert!(!page.press_key("F11"));
    assert!(reports.borrow().is_empty());

    // Detaching again is a no-op
    page.detach();
}

#[test]
fn test_detach_while_notice_visible() {
    let (mut page, reports) = standard_page();
    page.click_control();
    assert_eq!(page.notifications().len(), 1);
    assert!(page.event_loop.pending_timers() > 0);

    page.advance(3500);
    page.detach();

    assert!(page.notifications().is_empty());
    assert_eq!(page.event_loop.pending_timers(), 0);
    page.advance(5000);

    // Platform events after detach reach nobody
    assert!(page.document.revoke_fullscreen());
    page.pump();
    assert_eq!(*reports.borrow(), vec![true]);
}

#[test]
fn test_detach_cancels_pending_dispatch() {
    let (mut page, reports) = standard_page();
    let map = page.map.container();
    smol::block_on(page.document.request_fullscreen_via(map, "requestFullscreen")).unwrap();

    let event = page.document.next_queued_event().unwrap();
    page.dispatch(event);
    assert!(page.control.is_handling_change());
    assert_eq!(page.event_loop.pending_frames(), 1);

    page.detach();
    assert_eq!(page.event_loop.pending_frames(), 0);
    assert!(!page.control.is_handling_change());
    page.pump();
    assert!(reports.borrow().is_empty());
}

// ============================================================================
// NATIVE FULLSCREEN
// ============================================================================

#[test]
fn test_native_enter_with_notification() {
    let config = ControlConfiguration::default().with_notifications(true);
    let (mut page, reports) = page_with(UserAgentProfile::standard(), config);

    assert!(page.click_control());

    assert_eq!(page.mode(), FullscreenMode::Native);
    assert_eq!(page.document.fullscreen().element(), Some(page.map.container()));
    assert_eq!(page.control_icon(), Some(exit_icon()));
    assert_eq!(page.control_title().as_deref(), Some("Exit fullscreen mode"));
    assert_eq!(*reports.borrow(), vec![true]);
    assert_eq!(page.notification_text().as_deref(), Some("Full-screen mode is ON"));

    page.advance(3999);
    assert_eq!(page.notifications().len(), 1);
    page.advance(1);
    assert!(page.notifications().is_empty());
}

#[test]
fn test_every_vendor_profile_round_trips() {
    for profile in [
        UserAgentProfile::standard(),
        UserAgentProfile::gecko_legacy(),
        UserAgentProfile::webkit_legacy(),
        UserAgentProfile::trident_legacy(),
        UserAgentProfile::webkit_transitional(),
    ] {
        let name = profile.name;
        let (mut page, reports) = page_with(profile, ControlConfiguration::default());

        page.click_control();
        assert_eq!(page.mode(), FullscreenMode::Native, "{name}");
        page.advance(500);

        page.click_control();
        assert_eq!(page.mode(), FullscreenMode::None, "{name}");
        assert_eq!(page.control_title().as_deref(), Some("Enter fullscreen mode"), "{name}");
        assert_eq!(*reports.borrow(), vec![true, false], "{name}");
        assert!(!has_pseudo_marker(&page), "{name}");
    }
}

#[test]
fn test_native_exit_by_user_agent() {
    let (mut page, reports) = standard_page();
    page.click_control();
    page.advance(1000);

    // User pressed Esc
    assert!(page.document.revoke_fullscreen());
    page.pump();

    assert_eq!(page.mode(), FullscreenMode::None);
    assert_eq!(page.control_icon(), Some(enter_icon()));
    assert_eq!(page.control_title().as_deref(), Some("Enter fullscreen mode"));
    assert_eq!(*reports.borrow(), vec![true, false]);
    assert_eq!(page.notification_text().as_deref(), Some("Full-screen mode is OFF"));
}

#[test]
fn test_layout_invalidated_on_transitions() {
    let (mut page, _) = standard_page();
    assert_eq!(page.map.invalidations(), 0);

    page.click_control();
    let after_enter = page.map.invalidations();
    assert!(after_enter >= 1);

    page.advance(500);
    page.click_control();
    assert!(page.map.invalidations() > after_enter);
}

// ============================================================================
// PSEUDO FULLSCREEN
// ============================================================================

#[test]
fn test_pseudo_fallback_without_native_api() {
    let (mut page, reports) = page_with(UserAgentProfile::unsupported(), ControlConfiguration::default());

    page.click_control();

    assert!(has_pseudo_marker(&page));
    assert_eq!(page.mode(), FullscreenMode::Pseudo);
    assert!(page.map.invalidations() >= 1);
    assert_eq!(*reports.borrow(), vec![true]);
    assert_eq!(page.control_icon(), Some(exit_icon()));
    assert_eq!(page.document.fullscreen().element(), None);

    page.advance(500);
    page.click_control();

    assert!(!has_pseudo_marker(&page));
    assert_eq!(page.mode(), FullscreenMode::None);
    assert_eq!(*reports.borrow(), vec![true, false]);
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
fn test_rejected_request() {
    let (mut page, reports) = standard_page();
    page.document.fullscreen_mut().set_policy(FullscreenPolicy::Deny);

    page.click_control();

    assert_eq!(page.mode(), FullscreenMode::None);
    assert_eq!(page.control_icon(), Some(enter_icon()));
    assert_eq!(page.control_title().as_deref(), Some("Toggle fullscreen"));
    assert_eq!(page.notification_text().as_deref(), Some("Error switching to full-screen mode"));
    assert!(reports.borrow().is_empty());

    // Still interactive once the user agent allows it
    page.document.fullscreen_mut().set_policy(FullscreenPolicy::Allow);
    page.advance(500);
    page.click_control();
    assert_eq!(page.mode(), FullscreenMode::Native);
    assert_eq!(*reports.borrow(), vec![true]);
}

#[test]
fn test_rejected_request_without_notifications() {
    let config = ControlConfiguration::default().with_notifications(false);
    let (mut page, reports) = page_with(UserAgentProfile::standard(), config);
    page.document.fullscreen_mut().set_policy(FullscreenPolicy::Deny);

    page.click_control();

    assert!(page.notifications().is_empty());
    assert!(reports.borrow().is_empty());
}

#[test]
fn test_unexpected_surface_is_left_alone() {
    let (mut page, _) = standard_page();
    let container = page.control.container().unwrap();
    page.document
        .tree
        .element_mut(container)
        .unwrap()
        .class_list
        .remove(CONTROL_CLASS);

    page.click_control();

    assert_eq!(page.mode(), FullscreenMode::Native);
    assert_eq!(page.control_icon(), Some(enter_icon()));
    assert_eq!(page.control_title().as_deref(), Some("Toggle fullscreen"));
}

// ============================================================================
// DUPLICATE NOTIFICATIONS
// ============================================================================

#[test]
fn test_four_vendor_events_fire_callback_once() {
    let (mut page, reports) = standard_page();
    let map = page.map.container();

    // Application code enters fullscreen itself; every vendor event fires
    smol::block_on(page.document.request_fullscreen_via(map, "requestFullscreen")).unwrap();
    for event_type in [
        DomEventType::MozFullscreenChange,
        DomEventType::WebkitFullscreenChange,
        DomEventType::MsFullscreenChange,
    ] {
        page.document.queue_event(DomEvent::fullscreen_change(event_type, map));
    }
    page.pump();

    assert_eq!(*reports.borrow(), vec![true]);
    assert_eq!(page.control_title().as_deref(), Some("Exit fullscreen mode"));
    assert_eq!(page.notifications().len(), 1);
}

#[test]
fn test_transitional_profile_duplicates_collapse() {
    let (mut page, reports) = page_with(UserAgentProfile::webkit_transitional(), ControlConfiguration::default());

    page.click_control();
    assert_eq!(*reports.borrow(), vec![true]);

    page.advance(200);
    page.document.revoke_fullscreen();
    page.pump();
    assert_eq!(*reports.borrow(), vec![true, false]);
}

#[test]
fn test_guard_coalesces_until_frame_runs() {
    let (mut page, reports) = standard_page();
    let map = page.map.container();
    smol::block_on(page.document.request_fullscreen_via(map, "requestFullscreen")).unwrap();
    while page.document.next_queued_event().is_some() {}

    {
        let mut ctx = ControlContext {
            document: &mut page.document,
            event_loop: &mut page.event_loop,
            map: &mut page.map,
        };
        page.control.handle_fullscreen_change(&mut ctx);
        page.control.handle_fullscreen_change(&mut ctx);
    }
    assert!(page.control.is_handling_change());
    assert_eq!(page.event_loop.pending_frames(), 1);

    page.pump();
    assert!(!page.control.is_handling_change());
    assert_eq!(*reports.borrow(), vec![true]);
}

#[test]
fn test_spurious_change_reports_nothing() {
    let (mut page, reports) = standard_page();
    let map = page.map.container();

    page.document
        .queue_event(DomEvent::fullscreen_change(DomEventType::FullscreenChange, map));
    page.pump();

    assert!(reports.borrow().is_empty());
    assert!(page.notifications().is_empty());
    assert_eq!(page.control_title().as_deref(), Some("Enter fullscreen mode"));
}

// ============================================================================
// THROTTLE WINDOW
// ============================================================================

#[test]
fn test_rapid_double_toggle_reports_both() {
    for profile in [UserAgentProfile::standard(), UserAgentProfile::unsupported()] {
        let name = profile.name;
        let (mut page, reports) = page_with(profile, ControlConfiguration::default());

        page.click_control();
        page.advance(50);
        page.click_control();

        assert_eq!(page.mode(), FullscreenMode::None, "{name}");
        assert_eq!(*reports.borrow(), vec![true, false], "{name}");
        assert_eq!(page.notification_text().as_deref(), Some("Full-screen mode is OFF"), "{name}");
        assert_eq!(page.control_title().as_deref(), Some("Enter fullscreen mode"), "{name}");

        page.advance(1000);
        page.click_control();
        assert_eq!(*reports.borrow(), vec![true, false, true], "{name}");
        assert_eq!(page.notification_text().as_deref(), Some("Full-screen mode is ON"), "{name}");
    }
}

#[test]
fn test_revoke_inside_window_resyncs() {
    let (mut page, reports) = standard_page();
    page.click_control();
    page.advance(50);

    assert!(page.document.revoke_fullscreen());
    page.pump();

    // Icon follows the platform at once; the report waits for the window to close
    assert_eq!(page.mode(), FullscreenMode::None);
    assert_eq!(page.control_icon(), Some(enter_icon()));
    assert_eq!(page.control_title().as_deref(), Some("Enter fullscreen mode"));
    assert_eq!(*reports.borrow(), vec![true]);

    page.advance(50);
    assert_eq!(*reports.borrow(), vec![true, false]);
    assert_eq!(page.notification_text().as_deref(), Some("Full-screen mode is OFF"));

    page.advance(5000);
    assert_eq!(*reports.borrow(), vec![true, false]);
    assert_eq!(page.control_title().as_deref(), Some("Enter fullscreen mode"));
}

#[test]
fn test_detach_cancels_throttled_resync() {
    let (mut page, reports) = standard_page();
    let map = page.map.container();
    for event_type in [DomEventType::FullscreenChange, DomEventType::WebkitFullscreenChange] {
        page.document.queue_event(DomEvent::fullscreen_change(event_type, map));
    }
    page.pump();
    assert_eq!(page.event_loop.pending_timers(), 1);

    page.detach();
    assert_eq!(page.event_loop.pending_timers(), 0);
    page.advance(500);
    assert!(reports.borrow().is_empty());
}

#[test]
fn test_detach_in_pseudo_mode_clears_marker() {
    let (mut page, reports) = page_with(UserAgentProfile::unsupported(), ControlConfiguration::default());
    page.click_control();
    assert!(has_pseudo_marker(&page));
    let invalidations = page.map.invalidations();

    page.detach();

    assert!(!has_pseudo_marker(&page));
    assert!(page.map.invalidations() > invalidations);
    assert_eq!(*reports.borrow(), vec![true]);
}

// ============================================================================
// KEYBOARD
// ============================================================================

#[test]
fn test_toggle_key_is_intercepted() {
    let (mut page, reports) = standard_page();

    assert!(page.press_key("F11"));
    assert_eq!(page.mode(), FullscreenMode::Native);

    page.advance(500);
    assert!(page.press_key("F11"));
    assert_eq!(page.mode(), FullscreenMode::None);
    assert_eq!(*reports.borrow(), vec![true, false]);

    assert!(!page.press_key("Escape"));
}

#[test]
fn test_toggle_key_suppressed_only() {
    let config = ControlConfiguration::default().with_keyboard_toggle(false);
    let (mut page, reports) = page_with(UserAgentProfile::standard(), config);

    assert!(page.press_key("F11"));
    assert_eq!(page.mode(), FullscreenMode::None);
    assert!(reports.borrow().is_empty());
}

// ============================================================================
// INVARIANTS ACROSS SEQUENCES
// ============================================================================

#[test]
fn test_icon_tracks_platform_state() {
    let (mut page, _) = standard_page();

    for step in 0..6 {
        match step % 3 {
            0 => {
                page.click_control();
            }
            1 => {
                page.press_key("F11");
            }
            _ => {
                if page.document.revoke_fullscreen() {
                    page.pump();
                } else {
                    page.click_control();
                }
            }
        }
        page.advance(250);

        let expected = if page.mode().is_active() {
            "Exit fullscreen mode"
        } else {
            "Enter fullscreen mode"
        };
        assert_eq!(page.control_title().as_deref(), Some(expected), "step {step}");
        assert!(page.notifications().len() <= 1, "step {step}");
    }
}

#[test]
fn test_single_notice_across_success_and_failure() {
    let (mut page, _) = standard_page();

    page.click_control();
    assert_eq!(page.notifications().len(), 1);

    page.advance(150);
    page.document.revoke_fullscreen();
    page.pump();
    assert_eq!(page.notifications().len(), 1);
    assert_eq!(page.notification_text().as_deref(), Some("Full-screen mode is OFF"));

    page.document.fullscreen_mut().set_policy(FullscreenPolicy::Deny);
    page.click_control();
    assert_eq!(page.notifications().len(), 1);
    assert_eq!(page.notification_text().as_deref(), Some("Error switching to full-screen mode"));

    page.advance(4000);
    assert!(page.notifications().is_empty());
}

#[test]
fn test_config_from_json_drives_page() {
    let config = ControlConfiguration::from_json(
        r#"{"title": "Fullscreen", "enterTitle": "Go fullscreen", "exitTitle": "Leave fullscreen",
            "exitIcon": {"url": "./markers/general_screen.png"}, "showNotification": false}"#,
    )
    .unwrap();
    let (mut page, reports) = page_with(UserAgentProfile::gecko_legacy(), config);
    assert_eq!(page.control_title().as_deref(), Some("Fullscreen"));

    page.click_control();

    assert_eq!(page.control_title().as_deref(), Some("Leave fullscreen"));
    assert_eq!(page.control_icon().as_deref(), Some("url(\"./markers/general_screen.png\")"));
    assert!(page.notifications().is_empty());
    assert_eq!(*reports.borrow(), vec![true]);
}
