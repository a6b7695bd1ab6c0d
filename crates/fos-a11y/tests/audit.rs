//! End-to-end tests for fos-a11y
//!
//! Parses real markup, runs collection passes, and drives the live-region
//! monitor and announcement scheduler the way a host page would.

use fos_a11y::{
    AnnounceMode, AnnouncementScheduler, Auditor, Category, ControlSignal, ElementMeta,
    HoverTracker, ListenerRegistry, LiveLevel, LiveRegionMonitor, LiveUpdate, Settings, TipLayout,
    TipType,
};
use fos_dom::{DOMRect, Document, DocumentId, Page, ReadyState};

fn parse(html: &str) -> Document {
    fos_html::parse(html).unwrap()
}

fn contents(meta: &ElementMeta, tip_type: TipType) -> Vec<&str> {
    meta.tips
        .iter()
        .filter(|t| t.tip_type == tip_type)
        .map(|t| t.content.as_str())
        .collect()
}

// ============================================================================
// COLLECTION
// ============================================================================

#[test]
fn test_image_without_alt() {
    let page = Page::new(parse(r#"<img src="logo.png">"#));
    let snapshot = Auditor::new(Settings::default()).collect(&page);
    let images = snapshot.get(Category::Image);
    assert_eq!(images.len(), 1);
    assert_eq!(contents(&images[0], TipType::Error), vec!["messages.noAltImage"]);
}

#[test]
fn test_image_with_empty_alt_warns() {
    let page = Page::new(parse(r#"<img src="spacer.gif" alt="">"#));
    let snapshot = Auditor::new(Settings::default()).collect(&page);
    let images = snapshot.get(Category::Image);
    assert_eq!(contents(&images[0], TipType::Warning), vec!["messages.emptyAltImage"]);
    assert!(contents(&images[0], TipType::Error).is_empty());
}

#[test]
fn test_named_image() {
    let page = Page::new(parse(r#"<img src="cat.png" alt="A sleeping cat">"#));
    let snapshot = Auditor::new(Settings::default()).collect(&page);
    let images = snapshot.get(Category::Image);
    assert_eq!(contents(&images[0], TipType::Name), vec!["A sleeping cat"]);
}

#[test]
fn test_lone_radio_is_flagged() {
    let page = Page::new(parse(
        r#"<form><label><input type=radio name=size value=s> Small</label></form>
           <form><input type=radio name=color value=r aria-label=Red>
                 <input type=radio name=color value=g aria-label=Green></form>"#,
    ));
    let snapshot = Auditor::new(Settings::default()).collect(&page);
    let radios: Vec<&ElementMeta> = snapshot
        .get(Category::FormControl)
        .iter()
        .filter(|m| m.categories.contains(&Category::FormControl))
        .collect();
    let flagged = radios
        .iter()
        .filter(|m| contents(m, TipType::Error).contains(&"messages.noRadioGroup"))
        .count();
    assert_eq!(flagged, 1);
}

#[test]
fn test_collect_is_idempotent() {
    let page = Page::new(parse(
        r#"<h1>Shop</h1><nav><a href="/">Home</a></nav>
           <button aria-hidden="true">X</button><img src=a.png alt="">"#,
    ));
    let auditor = Auditor::new(Settings::default());
    let first = auditor.collect(&page);
    let second = auditor.collect(&page);
    assert_eq!(first, second);
}

#[test]
fn test_tip_types_stay_within_category_outputs() {
    let page = Page::new(parse(
        r#"<html lang="en"><head><title>Store</title></head><body>
           <h2 role="heading">Deals</h2><main><section aria-label="Offers">
           <table><tr><th>Item</th><th>Price</th></tr><tr><td>Tea</td><td>3</td></tr></table>
           <input type=checkbox id=c><label for=c>Gift</label>
           <a href="/cart" target="_blank">Cart</a><button disabled>Buy</button>
           <div aria-hidden="true"><a href="/x">Hidden</a></div>
           <p lang="xx-1">Mixed</p><svg></svg></section></main></body></html>"#,
    ));
    let settings = Settings {
        button: true,
        link: true,
        ..Settings::default()
    };
    let snapshot = Auditor::new(settings.clone()).collect(&page);
    assert!(!snapshot.is_empty());

    for meta in snapshot.iter() {
        assert!(!meta.categories.is_empty());
        let allowed: Vec<TipType> = meta
            .categories
            .iter()
            .filter(|&&c| settings.category_enabled(c))
            .flat_map(|c| c.outputs())
            .collect();
        for tip in &meta.tips {
            assert!(allowed.contains(&tip.tip_type), "{:?} not in {:?}", tip.tip_type, allowed);
        }
    }
}

// ============================================================================
// FRAMES
// ============================================================================

#[test]
fn test_frames_skipped_when_unreadable() {
    let mut main = parse("<iframe id=a></iframe><iframe id=b></iframe><iframe id=c></iframe>");
    let a = main.get_element_by_id("a").unwrap();
    let b = main.get_element_by_id("b").unwrap();
    main.set_rect(a, DOMRect::from_xywh(0.0, 50.0, 300.0, 200.0));
    let mut page = Page::new(main);

    let mut inner = parse("<h1>Inside</h1>");
    let h1 = inner.descendants().find(|&id| inner.tag(id) == Some("h1")).unwrap();
    inner.set_rect(h1, DOMRect::from_xywh(5.0, 10.0, 100.0, 30.0));
    page.attach_frame(DocumentId::MAIN, a, inner).unwrap();
    page.attach_cross_origin_frame(DocumentId::MAIN, b).unwrap();

    let snapshot = Auditor::new(Settings::default()).collect(&page);
    let headings = snapshot.get(Category::Heading);
    assert_eq!(headings.len(), 1);
    assert_eq!((headings[0].x, headings[0].y), (5.0, 60.0));
}

// ============================================================================
// ANNOTATION LAYOUT
// ============================================================================

#[test]
fn test_hover_never_stacks_listeners() {
    let mut doc = parse("<h1 id=h>Title</h1>");
    let h = doc.get_element_by_id("h").unwrap();
    doc.set_rect(h, DOMRect::from_xywh(0.0, 100.0, 200.0, 40.0));
    let page = Page::new(doc);
    let settings = Settings::default();
    let snapshot = Auditor::new(settings.clone()).collect(&page);
    let meta = &snapshot.get(Category::Heading)[0];

    let mut pointer = ListenerRegistry::new();
    let mut tracker = HoverTracker::new(meta, settings.interactive_mode);
    for _ in 0..10 {
        tracker.pointer_entered(&mut pointer);
        tracker.pointer_moved(&mut pointer, 50.0, 120.0);
        assert_eq!(pointer.active(), 1);
    }
    let layout =
        TipLayout::compute(meta, &snapshot.bounds, &settings, tracker.is_hovered()).unwrap();
    assert_eq!(layout.opacity, 1.0);

    tracker.pointer_moved(&mut pointer, 500.0, 500.0);
    assert_eq!(pointer.active(), 0);
}

// ============================================================================
// LIVE REGIONS AND ANNOUNCEMENTS
// ============================================================================

fn monitor_for(page: &Page) -> LiveRegionMonitor {
    let mut monitor = LiveRegionMonitor::new(AnnounceMode::SelfAnnounce);
    monitor.apply_settings(&Settings::default());
    monitor.observe_live_regions(page);
    monitor
}

#[test]
fn test_atomic_region_reports_whole_text() {
    let mut page = Page::new(parse(
        r#"<div id=r aria-live=polite aria-atomic=true>Total: <span id=n>3</span> items</div>"#,
    ));
    let monitor = monitor_for(&page);
    let mut scheduler = AnnouncementScheduler::default();

    let doc = page.main_mut();
    let n = doc.get_element_by_id("n").unwrap();
    doc.set_text_content(n, "4").unwrap();
    let records = doc.take_records();
    monitor.handle_batch(DocumentId::MAIN, doc, &records, &mut scheduler, 0);

    let shown = scheduler.announcements();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].content, "Total: 4 items");
    assert_eq!(shown[0].level, LiveLevel::Polite);
}

#[test]
fn test_assertive_interrupts_polite() {
    let mut page = Page::new(parse(
        r#"<div id=s role=status></div><div id=a role=alert></div>"#,
    ));
    let monitor = monitor_for(&page);
    let mut scheduler = AnnouncementScheduler::default();

    let doc = page.main_mut();
    let status = doc.get_element_by_id("s").unwrap();
    let alert = doc.get_element_by_id("a").unwrap();
    doc.set_text_content(status, "Draft saved").unwrap();
    let records = doc.take_records();
    monitor.handle_batch(DocumentId::MAIN, doc, &records, &mut scheduler, 0);
    assert_eq!(scheduler.announcements().len(), 1);

    doc.set_text_content(alert, "Connection lost").unwrap();
    let records = doc.take_records();
    monitor.handle_batch(DocumentId::MAIN, doc, &records, &mut scheduler, 500);

    let shown: Vec<_> = scheduler.announcements().iter().map(|a| a.content.as_str()).collect();
    assert_eq!(shown, vec!["Connection lost"]);
    assert_eq!(scheduler.announcements()[0].level, LiveLevel::Assertive);
}

#[test]
fn test_pause_resume_cycle() {
    let mut scheduler = AnnouncementScheduler::default();
    let update = LiveUpdate {
        content: "Ten chars!".to_string(),
        level: LiveLevel::Polite,
    };
    scheduler.receive(&[update], 1_000);
    assert_eq!(scheduler.announcements()[0].until, 6_000);

    scheduler.signal(ControlSignal::from_key("Shift").unwrap(), 2_000);
    assert!(scheduler.announcements().is_empty());
    assert_eq!(scheduler.paused()[0].rest, 4_000);
    assert!(!scheduler.tick(7_000));

    scheduler.signal(ControlSignal::TogglePause, 20_000);
    assert_eq!(scheduler.announcements()[0].until, 24_000);
    assert!(scheduler.tick(24_000));
    assert!(scheduler.announcements().is_empty());

    let revision = scheduler.revision();
    assert!(!scheduler.signal(ControlSignal::focus_changed(), 25_000));
    assert_eq!(scheduler.revision(), revision);
}

#[test]
fn test_frame_regions_join_when_ready() {
    let main = parse("<iframe id=f></iframe>");
    let f = main.get_element_by_id("f").unwrap();
    let mut page = Page::new(main);
    let mut inner = parse("<div role=log></div>");
    inner.set_ready_state(ReadyState::Loading);
    let child = page.attach_frame(DocumentId::MAIN, f, inner).unwrap();

    let mut monitor = monitor_for(&page);
    assert_eq!(monitor.regions().count(), 0);

    page.document_mut(child).unwrap().set_ready_state(ReadyState::Complete);
    assert_eq!(monitor.observe_live_regions(&page), 1);
    assert!(monitor.regions().all(|r| r.document == child));
}

// ============================================================================
// SETTINGS
// ============================================================================

#[test]
fn test_settings_json_drives_collection() {
    let settings = Settings::from_json(r#"{"image": false, "link": true}"#).unwrap();
    let page = Page::new(parse(r#"<img src=a.png><a href="/">Home</a>"#));
    let snapshot = Auditor::new(settings).collect(&page);
    assert!(snapshot.get(Category::Image).is_empty());
    assert_eq!(snapshot.get(Category::Link).len(), 1);
}

#[test]
fn test_settings_rejects_bad_values() {
    assert!(Settings::from_json(r#"{"announcementMaxSeconds": -1}"#).is_err());
    assert!(Settings::from_json(r#"{"tipOpacityPercent": "high"}"#).is_err());
}
