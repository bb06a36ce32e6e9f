// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end drags over an Understory Scene.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use kurbo::{Affine, Point, Rect, Size, Vec2};
use proptest::prelude::*;
use understory_scene::{FlowLayout, LocalNode, NodeFlags, NodeId, Scene};

use crate::adapters::scene::{ListRenderer, SceneHost};
use crate::*;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Card(&'static str);

impl Item for Card {
    type Id = &'static str;

    fn id(&self) -> &'static str {
        self.0
    }
}

type Hook = Rc<dyn Fn(&Card, usize) -> Affine>;

/// What the harness passes to `configure` besides the list.
#[derive(Clone, Default)]
struct Settings {
    zone_type: Option<&'static str>,
    flip_duration_ms: u64,
    flags: ZoneFlags,
    style: Option<DropTargetStyle>,
    hook: Option<Hook>,
}

impl Settings {
    fn options(&self, items: Vec<Entry<Card>>) -> ZoneOptions<Card> {
        let mut o = ZoneOptions::with_entries(items)
            .flip_duration_ms(self.flip_duration_ms)
            .flags(self.flags);
        if let Some(t) = self.zone_type {
            o = o.zone_type(t);
        }
        if let Some(style) = &self.style {
            o = o.drop_target_style(style.clone());
        }
        if let Some(hook) = &self.hook {
            let hook = hook.clone();
            o = o.transform_dragged(move |c, i| hook(c, i));
        }
        o
    }
}

fn card(_: &Card) -> LocalNode {
    LocalNode {
        bounds: Rect::new(0.0, 0.0, 200.0, 50.0),
        ..Default::default()
    }
}

/// A host that renders every notification and hands the new list back to the engine, the way
/// a UI framework would.
struct Harness {
    host: SceneHost,
    lists: ListRenderer<&'static str>,
    engine: DragEngine<NodeId, Card>,
    settings: BTreeMap<NodeId, Settings>,
    now: u64,
}

impl Harness {
    fn new() -> Self {
        Self {
            host: SceneHost::new(Scene::new(Size::new(800.0, 600.0))),
            lists: ListRenderer::new(),
            engine: DragEngine::default(),
            settings: BTreeMap::new(),
            now: 0,
        }
    }

    fn zone(&mut self, bounds: Rect, ids: &[&'static str]) -> NodeId {
        self.zone_with(bounds, ids, Settings::default())
    }

    fn zone_with(&mut self, bounds: Rect, ids: &[&'static str], settings: Settings) -> NodeId {
        let root = self.host.scene.root();
        self.zone_in(root, bounds, ids, settings)
    }

    fn zone_in(
        &mut self,
        parent: NodeId,
        bounds: Rect,
        ids: &[&'static str],
        settings: Settings,
    ) -> NodeId {
        let zone = self.host.scene.insert(
            parent,
            LocalNode {
                bounds,
                ..Default::default()
            },
        );
        self.host.scene.set_layout(zone, Some(FlowLayout::column()));
        let items: Vec<Entry<Card>> = ids.iter().map(|&id| Entry::Item(Card(id))).collect();
        self.lists.render(&mut self.host.scene, zone, &items, card);
        self.engine
            .configure(&mut self.host, zone, settings.options(items));
        self.settings.insert(zone, settings);
        zone
    }

    fn node(&self, zone: NodeId, id: &'static str) -> NodeId {
        self.lists.node_of(zone, &id).expect("item is rendered")
    }

    fn ids(&self, zone: NodeId) -> Vec<&'static str> {
        self.engine
            .registry()
            .config(zone)
            .expect("zone is registered")
            .items
            .iter()
            .map(Entry::id)
            .collect()
    }

    /// Render and commit every notification, then return them.
    fn apply(&mut self, notes: Vec<Notification<NodeId, Card>>) -> Vec<Notification<NodeId, Card>> {
        for note in &notes {
            let event = note.event();
            self.lists
                .render(&mut self.host.scene, event.zone, &event.items, card);
            let settings = self.settings[&event.zone].clone();
            self.engine
                .configure(&mut self.host, event.zone, settings.options(event.items.clone()));
        }
        notes
    }

    fn reconfigure(&mut self, zone: NodeId, change: impl FnOnce(&mut Settings)) {
        let settings = self.settings.get_mut(&zone).expect("zone is known");
        change(settings);
        let items = self.engine.registry().config(zone).unwrap().items.clone();
        let options = settings.options(items);
        self.engine.configure(&mut self.host, zone, options);
    }

    fn press(&mut self, zone: NodeId, id: &'static str, at: Point) {
        let node = self.node(zone, id);
        self.engine
            .pointer_down(&self.host, zone, node, at, PointerButton::Primary)
            .unwrap();
    }

    fn move_to(&mut self, at: Point) -> Vec<Notification<NodeId, Card>> {
        let notes = self.engine.pointer_move(&mut self.host, self.now, at);
        self.apply(notes)
    }

    /// Run the next due timer.
    fn tick(&mut self) -> Vec<Notification<NodeId, Card>> {
        let Some(due) = self.engine.next_deadline() else {
            return Vec::new();
        };
        self.now = self.now.max(due);
        let notes = self.engine.advance(&mut self.host, self.now);
        self.apply(notes)
    }

    /// Move, then let the observer look.
    fn drag_to(&mut self, at: Point) -> Vec<Notification<NodeId, Card>> {
        let mut notes = self.move_to(at);
        notes.extend(self.tick());
        notes
    }

    fn release(&mut self) -> Vec<Notification<NodeId, Card>> {
        let notes = self.engine.pointer_up(&mut self.host, self.now);
        self.apply(notes)
    }

    /// Press on `id` and move just past the threshold; the first observation runs too.
    fn start(&mut self, zone: NodeId, id: &'static str) -> Vec<Notification<NodeId, Card>> {
        let rect = self
            .host
            .scene
            .client_rect(self.node(zone, id))
            .expect("item is rendered");
        let at = rect.center();
        self.press(zone, id, at);
        self.drag_to(at + Vec2::new(0.0, 5.0))
    }

    /// Pointer position that puts the center of the dragged visual at `center`.
    fn pointer_for(&self, center: Point) -> Point {
        let session = self.engine.session().expect("dragging");
        let rect = self
            .host
            .scene
            .client_rect(session.dragged())
            .expect("floating copy exists");
        session.pointer() + (center - rect.center())
    }

    fn drag_center_to(&mut self, center: Point) -> Vec<Notification<NodeId, Card>> {
        let at = self.pointer_for(center);
        self.drag_to(at)
    }

    fn lists(&self) -> BTreeMap<NodeId, Vec<Entry<Card>>> {
        let registry = self.engine.registry();
        registry
            .zones()
            .filter_map(|z| Some((z, registry.config(z)?.items.clone())))
            .collect()
    }

    fn shadows(&self) -> usize {
        let registry = self.engine.registry();
        registry
            .zones()
            .filter_map(|z| registry.config(z))
            .map(|c| c.items.iter().filter(|e| e.is_shadow()).count())
            .sum()
    }

    fn key(&mut self, zone: NodeId, id: &'static str, key: Key) -> Vec<Notification<NodeId, Card>> {
        let node = self.node(zone, id);
        let notes = self
            .engine
            .key_down(&mut self.host, zone, node, key)
            .unwrap();
        self.apply(notes)
    }
}

fn triggers(notes: &[Notification<NodeId, Card>]) -> Vec<(NodeId, Trigger, bool)> {
    notes
        .iter()
        .map(|n| (n.zone(), n.event().info.trigger, n.is_finalize()))
        .collect()
}

fn ids_of(event: &ZoneEvent<NodeId, Card>) -> Vec<&'static str> {
    event.items.iter().map(Entry::id).collect()
}

const X: Rect = Rect::new(0.0, 0.0, 200.0, 300.0);
const Y: Rect = Rect::new(300.0, 0.0, 500.0, 300.0);

#[test]
fn reorder_within_one_zone() {
    let mut h = Harness::new();
    let x = h.zone(X, &["a", "b", "c"]);

    let started = h.start(x, "a");
    assert_eq!(triggers(&started), [(x, Trigger::DragStarted, false)]);
    assert!(started[0].event().items[0].is_shadow());
    assert_eq!(started[0].event().info.source, Source::Pointer);
    assert_eq!(h.engine.state(), DragState::Dragging);

    let over = h.drag_center_to(Point::new(100.0, 125.0));
    assert_eq!(triggers(&over), [(x, Trigger::DraggedOverIndex, false)]);
    assert_eq!(ids_of(over[0].event()), ["b", "c", "a"]);
    assert_eq!(h.shadows(), 1);

    let dropped = h.release();
    assert_eq!(triggers(&dropped), [(x, Trigger::DroppedIntoZone, true)]);
    assert_eq!(
        dropped[0].event().items_without_shadow(),
        [Card("b"), Card("c"), Card("a")]
    );
    assert_eq!(h.shadows(), 0);
    assert_eq!(h.engine.state(), DragState::Finalizing);

    h.tick();
    assert_eq!(h.engine.state(), DragState::Idle);
    assert_eq!(h.host.floating().count(), 0, "floating copy is removed");
    assert_eq!(h.host.active_zones().count(), 0, "highlights are cleared");
}

#[test]
fn move_between_zones() {
    let mut h = Harness::new();
    let x = h.zone(X, &["x1", "x2"]);
    let y = h.zone(Y, &["y1", "y2"]);

    h.start(x, "x1");
    assert_eq!(
        h.host.active_zones().collect::<Vec<_>>(),
        [x, y],
        "both zones accept the item"
    );

    let moved = h.drag_center_to(Point::new(400.0, 75.0));
    assert_eq!(
        triggers(&moved),
        [
            (x, Trigger::DraggedLeft, false),
            (y, Trigger::DraggedEntered, false)
        ]
    );
    assert_eq!(ids_of(moved[0].event()), ["x2"]);
    assert_eq!(ids_of(moved[1].event()), ["y1", "x1", "y2"]);
    assert_eq!(h.shadows(), 1);

    let dropped = h.release();
    assert_eq!(
        triggers(&dropped),
        [
            (y, Trigger::DroppedIntoZone, true),
            (x, Trigger::DroppedIntoAnother, true)
        ]
    );
    assert_eq!(ids_of(dropped[0].event()), ["y1", "x1", "y2"]);
    assert_eq!(ids_of(dropped[1].event()), ["x2"]);
    assert_eq!(h.engine.session().unwrap().landing_zone(), Some(y));
}

#[test]
fn dropping_outside_returns_home() {
    let mut h = Harness::new();
    let x = h.zone(X, &["a", "b", "c"]);
    h.start(x, "a");

    let left = h.drag_center_to(Point::new(600.0, 400.0));
    assert_eq!(triggers(&left), [(x, Trigger::DraggedLeftAll, false)]);
    assert_eq!(ids_of(left[0].event()), ["a", "b", "c"]);
    assert!(left[0].event().items[0].is_shadow());
    assert!(!h.engine.session().unwrap().is_over_zone());

    let dropped = h.release();
    assert_eq!(triggers(&dropped), [(x, Trigger::DroppedOutsideOfAny, true)]);
    assert_eq!(ids_of(dropped[0].event()), ["a", "b", "c"]);
}

#[test]
fn coming_back_after_leaving_restores_the_zone() {
    let mut h = Harness::new();
    let x = h.zone(X, &["a", "b", "c"]);
    h.start(x, "a");
    h.drag_center_to(Point::new(600.0, 400.0));

    let back = h.drag_center_to(Point::new(100.0, 75.0));
    assert_eq!(triggers(&back), [(x, Trigger::DraggedEntered, false)]);
    assert_eq!(ids_of(back[0].event()), ["b", "a", "c"]);
    let dropped = h.release();
    assert_eq!(triggers(&dropped), [(x, Trigger::DroppedIntoZone, true)]);
}

#[test]
fn inner_zone_wins_over_its_container() {
    let mut h = Harness::new();
    let outer = h.zone(Rect::new(0.0, 0.0, 400.0, 500.0), &["o1", "o2"]);
    let o1 = h.node(outer, "o1");
    h.host.scene.set_size(o1, Size::new(400.0, 300.0));
    let inner = h.zone_in(
        o1,
        Rect::new(20.0, 20.0, 380.0, 220.0),
        &["i1"],
        Settings::default(),
    );

    h.start(outer, "o2");
    let moved = h.drag_center_to(Point::new(100.0, 100.0));
    assert_eq!(
        triggers(&moved),
        [
            (outer, Trigger::DraggedLeft, false),
            (inner, Trigger::DraggedEntered, false)
        ]
    );
    assert_eq!(h.ids(inner), ["i1", "o2"], "phantom slot is nearest");
    assert_eq!(h.ids(outer), ["o1"]);

    let dropped = h.release();
    assert_eq!(
        triggers(&dropped),
        [
            (inner, Trigger::DroppedIntoZone, true),
            (outer, Trigger::DroppedIntoAnother, true)
        ]
    );
}

#[test]
fn threshold_gates_the_drag() {
    let mut h = Harness::new();
    let x = h.zone(X, &["a", "b"]);
    h.press(x, "a", Point::new(100.0, 25.0));
    assert_eq!(h.engine.state(), DragState::Pending);
    assert!(h.move_to(Point::new(102.0, 27.0)).is_empty());
    assert_eq!(h.engine.state(), DragState::Pending);
    assert!(h.engine.next_deadline().is_none(), "no timers before the drag");

    let started = h.move_to(Point::new(100.0, 28.0));
    assert_eq!(triggers(&started), [(x, Trigger::DragStarted, false)]);
    assert_eq!(h.engine.session().unwrap().origin_index(), 0);
}

#[test]
fn release_before_threshold_is_a_click() {
    let mut h = Harness::new();
    let x = h.zone(X, &["a", "b"]);
    h.press(x, "a", Point::new(100.0, 25.0));
    assert!(h.release().is_empty());
    assert_eq!(h.engine.state(), DragState::Idle);
    assert_eq!(h.ids(x), ["a", "b"]);
}

#[test]
fn only_primary_presses_on_draggable_zones_count() {
    let mut h = Harness::new();
    let x = h.zone(X, &["a"]);
    let locked = h.zone_with(
        Y,
        &["b"],
        Settings {
            flags: ZoneFlags::DRAG_DISABLED,
            ..Default::default()
        },
    );
    let a = h.node(x, "a");
    h.engine
        .pointer_down(&h.host, x, a, Point::new(1.0, 1.0), PointerButton::Secondary)
        .unwrap();
    assert_eq!(h.engine.state(), DragState::Idle);

    h.press(locked, "b", Point::new(310.0, 10.0));
    assert_eq!(h.engine.state(), DragState::Idle);
}

#[test]
fn caller_errors() {
    let mut h = Harness::new();
    let x = h.zone(X, &["a"]);
    let y = h.zone(Y, &["b"]);
    let stray = h.host.scene.insert(h.host.scene.root(), LocalNode::default());
    let a = h.node(x, "a");

    assert_eq!(
        h.engine
            .pointer_down(&h.host, stray, a, Point::ZERO, PointerButton::Primary),
        Err(DndError::unknown_zone(stray))
    );
    assert_eq!(
        h.engine
            .pointer_down(&h.host, x, stray, Point::ZERO, PointerButton::Primary),
        Err(DndError::unknown_item_node(x, stray))
    );
    assert_eq!(
        h.engine.key_down(&mut h.host, y, a, Key::Enter),
        Err(DndError::unknown_item_node(y, a))
    );

    h.start(x, "a");
    assert_eq!(h.engine.unregister(x).unwrap_err(), DndError::zone_in_use(x));
    assert_eq!(
        h.engine.set_options(EngineOptions::default()),
        Err(DndError::SessionActive)
    );
    let before = h.engine.registry().active_count();
    assert!(h.engine.unregister(y).is_ok(), "uninvolved zones can go");
    assert_eq!(h.engine.registry().active_count(), before - 1);
}

#[test]
fn unregistering_the_pressed_zone_abandons_the_press() {
    let mut h = Harness::new();
    let x = h.zone(X, &["a"]);
    h.press(x, "a", Point::new(100.0, 25.0));
    assert!(h.engine.unregister(x).is_ok());
    assert_eq!(h.engine.state(), DragState::Idle);
    assert!(h.engine.pointer_move(&mut h.host, 0, Point::new(150.0, 90.0)).is_empty());
}

#[test]
fn leaving_the_document_drops() {
    let mut h = Harness::new();
    let x = h.zone(X, &["a", "b"]);
    h.start(x, "a");

    let notes = h.drag_center_to(Point::new(2000.0, 2000.0));
    assert_eq!(triggers(&notes), [(x, Trigger::DroppedOutsideOfAny, true)]);
    assert_eq!(ids_of(notes[0].event()), ["a", "b"]);
    assert_eq!(h.engine.state(), DragState::Finalizing);
    // Only the drop cleanup is left; observation stopped.
    h.tick();
    assert_eq!(h.engine.state(), DragState::Idle);
    assert!(h.engine.next_deadline().is_none());
}

#[test]
fn cleanup_waits_for_the_flip_animation() {
    let mut h = Harness::new();
    let x = h.zone_with(
        X,
        &["a", "b"],
        Settings {
            flip_duration_ms: 150,
            ..Default::default()
        },
    );
    h.start(x, "a");
    let dropped_at = h.now;
    h.release();
    assert_eq!(h.engine.next_deadline(), Some(dropped_at + 150));
    h.engine.advance(&mut h.host, dropped_at + 149);
    assert_eq!(h.engine.state(), DragState::Finalizing);
    h.engine.advance(&mut h.host, dropped_at + 150);
    assert_eq!(h.engine.state(), DragState::Idle);

    // A new drag is accepted once idle.
    h.press(x, "b", Point::new(100.0, 75.0));
    assert_eq!(h.engine.state(), DragState::Pending);
}

#[test]
fn press_while_finalizing_is_ignored() {
    let mut h = Harness::new();
    let x = h.zone_with(
        X,
        &["a", "b"],
        Settings {
            flip_duration_ms: 150,
            ..Default::default()
        },
    );
    h.start(x, "a");
    h.release();
    h.press(x, "b", Point::new(100.0, 75.0));
    assert_eq!(h.engine.state(), DragState::Finalizing);
}

#[test]
fn zones_refusing_others_are_skipped() {
    let mut h = Harness::new();
    let x = h.zone(X, &["x1", "x2"]);
    let y = h.zone_with(
        Y,
        &["y1"],
        Settings {
            flags: ZoneFlags::DROP_FROM_OTHERS_DISABLED,
            ..Default::default()
        },
    );
    h.start(x, "x1");
    assert!(h.host.active_style(y).is_none(), "refusing zone is not highlighted");

    let over = h.drag_center_to(Point::new(400.0, 25.0));
    assert_eq!(triggers(&over), [(x, Trigger::DraggedLeftAll, false)]);
    assert_eq!(h.ids(x), ["x1", "x2"]);
    assert_eq!(h.ids(y), ["y1"]);
    assert_eq!(h.shadows(), 1);

    let dropped = h.release();
    assert_eq!(triggers(&dropped), [(x, Trigger::DroppedOutsideOfAny, true)]);
}

#[test]
fn other_types_are_invisible_to_the_drag() {
    let mut h = Harness::new();
    let x = h.zone(X, &["x1"]);
    let y = h.zone_with(
        Y,
        &["y1"],
        Settings {
            zone_type: Some("other"),
            ..Default::default()
        },
    );
    h.start(x, "x1");
    let over = h.drag_center_to(Point::new(400.0, 25.0));
    assert_eq!(triggers(&over), [(x, Trigger::DraggedLeftAll, false)]);
    assert_eq!(h.ids(y), ["y1"]);
}

#[test]
fn reconfiguring_mid_drag_restyles() {
    let mut h = Harness::new();
    let x = h.zone(X, &["x1"]);
    let y = h.zone(Y, &["y1"]);
    h.start(x, "x1");
    assert_eq!(h.host.active_style(y), Some(&DropTargetStyle::default()));

    let blue = DropTargetStyle::outline("blue solid 1px");
    h.reconfigure(y, |s| s.style = Some(blue.clone()));
    assert_eq!(h.host.active_style(y), Some(&blue));

    h.reconfigure(y, |s| s.flags = ZoneFlags::DROP_FROM_OTHERS_DISABLED);
    assert!(h.host.active_style(y).is_none());

    h.reconfigure(y, |s| s.flags = ZoneFlags::empty());
    assert_eq!(h.host.active_style(y), Some(&blue));

    // The origin keeps its highlight even when it stops accepting others.
    h.reconfigure(x, |s| s.flags = ZoneFlags::DROP_FROM_OTHERS_DISABLED);
    assert!(h.host.active_style(x).is_some());
}

#[test]
fn stale_placeholders_are_dropped_on_configure() {
    let mut h = Harness::new();
    let x = h.zone(X, &["x1"]);
    let y = h.zone(Y, &["y1"]);
    h.start(x, "x1");
    let stale = alloc::vec![Entry::Item(Card("y1")), Entry::Shadow(Card("x1"))];
    h.engine
        .configure(&mut h.host, y, ZoneOptions::with_entries(stale));
    assert_eq!(h.ids(y), ["y1"]);
    assert_eq!(h.shadows(), 1);
}

#[test]
fn transform_hook_reshapes_the_floating_copy() {
    let calls: Rc<RefCell<Vec<(&'static str, usize)>>> = Rc::default();
    let seen = calls.clone();
    let mut h = Harness::new();
    let x = h.zone_with(
        X,
        &["a", "b"],
        Settings {
            hook: Some(Rc::new(move |c: &Card, i: usize| {
                seen.borrow_mut().push((c.0, i));
                Affine::scale(2.0)
            })),
            ..Default::default()
        },
    );
    h.start(x, "a");
    assert_eq!(calls.borrow().as_slice(), [("a", 0)]);
    let dragged = h.engine.session().unwrap().dragged();
    assert_eq!(
        h.host.scene.local(dragged).unwrap().transform,
        Affine::translate(Vec2::new(0.0, 5.0)) * Affine::scale(2.0)
    );
}

#[test]
fn floating_copy_morphs_into_the_target_slot() {
    let mut h = Harness::new();
    let x = h.zone(X, &["x1"]);
    let y = h.zone(Y, &["y1"]);
    let y1 = h.node(y, "y1");
    h.host.scene.set_size(y1, Size::new(100.0, 40.0));
    h.start(x, "x1");
    h.drag_center_to(Point::new(350.0, 20.0));
    assert_eq!(h.ids(y), ["x1", "y1"]);
    let shadow = h.node(y, "x1");
    h.host.scene.set_size(shadow, Size::new(100.0, 40.0));
    // The host re-renders the list with the new size.
    let items = h.engine.registry().config(y).unwrap().items.clone();
    h.engine
        .configure(&mut h.host, y, ZoneOptions::with_entries(items));
    let dragged = h.engine.session().unwrap().dragged();
    assert_eq!(
        h.host.scene.local(dragged).unwrap().bounds.size(),
        Size::new(100.0, 40.0)
    );
}

#[test]
fn fast_first_move_reorders_in_place() {
    let mut h = Harness::new();
    let x = h.zone(X, &["a", "b", "c"]);
    h.press(x, "a", Point::new(100.0, 25.0));
    // The first observation already finds the visual over "c".
    let mut notes = h.move_to(Point::new(100.0, 125.0));
    notes.extend(h.tick());
    assert_eq!(
        triggers(&notes),
        [
            (x, Trigger::DragStarted, false),
            (x, Trigger::DraggedOverIndex, false)
        ]
    );
    assert_eq!(ids_of(notes[1].event()), ["b", "c", "a"]);
    assert!(notes[1].event().items[2].is_shadow());
}

#[test]
fn auto_scroll_follows_the_placeholder_down_the_list() {
    let mut h = Harness::new();
    let ids = ["r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9"];
    let x = h.zone(X, &ids);
    h.host
        .scene
        .set_flags(x, NodeFlags::default() | NodeFlags::SCROLL_Y);
    h.start(x, "r0");

    // 20 px above the bottom edge: 10 px per step.
    let parked = h.drag_center_to(Point::new(100.0, 280.0));
    assert_eq!(triggers(&parked), [(x, Trigger::DraggedOverIndex, false)]);
    assert_eq!(h.host.scene.scroll_offset(x), Vec2::new(0.0, 10.0));
    assert_eq!(h.ids(x).iter().position(|id| *id == "r0"), Some(5));

    // Six frames, then the next observation scrolls once more and sees later rows.
    let mut notes = Vec::new();
    while h.now < 214 {
        notes.extend(h.tick());
    }
    assert_eq!(h.host.scene.scroll_offset(x), Vec2::new(0.0, 80.0));
    assert_eq!(triggers(&notes), [(x, Trigger::DraggedOverIndex, false)]);
    assert_eq!(
        notes[0].event().items.iter().position(Entry::is_shadow),
        Some(7)
    );

    // Back to the middle: the next observation stops the scroll loop.
    let at = h.pointer_for(Point::new(100.0, 160.0));
    h.move_to(at);
    let mut notes = Vec::new();
    while h.now < 321 {
        notes.extend(h.tick());
    }
    assert_eq!(h.host.scene.scroll_offset(x), Vec2::new(0.0, 150.0));
    assert_eq!(triggers(&notes), [(x, Trigger::DraggedOverIndex, false)]);
    assert_eq!(h.engine.scheduler.len(), 1, "only the observer tick is left");
    assert_eq!(h.engine.next_deadline(), Some(321 + 107));

    let dropped = h.release();
    assert_eq!(triggers(&dropped), [(x, Trigger::DroppedIntoZone, true)]);
    assert_eq!(
        ids_of(dropped[0].event()),
        ["r1", "r2", "r3", "r4", "r5", "r6", "r0", "r7", "r8", "r9"]
    );
    h.tick();
    assert_eq!(h.engine.state(), DragState::Idle);
    assert!(h.engine.scheduler.is_empty());
}

#[test]
fn keyboard_reorder_and_stop() {
    let mut h = Harness::new();
    let x = h.zone(X, &["a", "b", "c"]);

    let started = h.key(x, "a", Key::Enter);
    assert_eq!(triggers(&started), [(x, Trigger::DragStarted, false)]);
    assert_eq!(started[0].event().info.source, Source::Keyboard);
    assert_eq!(h.engine.state(), DragState::KeyboardDragging);
    assert_eq!(h.host.active_zones().collect::<Vec<_>>(), [x]);

    assert!(h.key(x, "a", Key::ArrowUp).is_empty(), "already first");
    let moved = h.key(x, "a", Key::ArrowDown);
    assert_eq!(triggers(&moved), [(x, Trigger::DroppedIntoZone, true)]);
    assert_eq!(ids_of(moved[0].event()), ["b", "a", "c"]);
    let moved = h.key(x, "a", Key::ArrowRight);
    assert_eq!(ids_of(moved[0].event()), ["b", "c", "a"]);
    assert!(h.key(x, "a", Key::ArrowDown).is_empty(), "already last");
    let moved = h.key(x, "a", Key::ArrowLeft);
    assert_eq!(ids_of(moved[0].event()), ["b", "a", "c"]);

    let stopped = h.key(x, "a", Key::Escape);
    assert_eq!(triggers(&stopped), [(x, Trigger::DragStopped, false)]);
    assert_eq!(h.engine.state(), DragState::Idle);
    assert_eq!(h.host.active_zones().count(), 0);
}

#[test]
fn keyboard_moves_between_zones_by_focus() {
    let mut h = Harness::new();
    let x = h.zone(X, &["x1", "x2"]);
    let y = h.zone(Y, &["y1"]);
    h.key(x, "x1", Key::Space);

    let notes = h.engine.focus_zone(&mut h.host, y).unwrap();
    let notes = h.apply(notes);
    assert_eq!(
        triggers(&notes),
        [
            (x, Trigger::DroppedIntoAnother, true),
            (y, Trigger::DroppedIntoZone, true)
        ]
    );
    assert_eq!(h.ids(y), ["x1", "y1"], "zone to the right: front");
    assert_eq!(h.engine.keyboard_session().unwrap().zone(), y);

    let notes = h.engine.focus_zone(&mut h.host, x).unwrap();
    h.apply(notes);
    assert_eq!(h.ids(x), ["x2", "x1"], "zone to the left: back");
    assert!(h.engine.focus_zone(&mut h.host, x).unwrap().is_empty());

    let stopped = h.key(x, "x1", Key::Enter);
    assert_eq!(triggers(&stopped), [(x, Trigger::DragStopped, false)]);
}

#[test]
fn keyboard_focus_respects_refusing_zones() {
    let mut h = Harness::new();
    let x = h.zone(X, &["x1"]);
    let y = h.zone_with(
        Y,
        &["y1"],
        Settings {
            flags: ZoneFlags::DROP_FROM_OTHERS_DISABLED,
            ..Default::default()
        },
    );
    h.key(x, "x1", Key::Enter);
    assert!(h.engine.focus_zone(&mut h.host, y).unwrap().is_empty());
    assert_eq!(h.ids(y), ["y1"]);
}

#[test]
fn clicks_end_or_switch_a_keyboard_drag() {
    let mut h = Harness::new();
    let x = h.zone(X, &["a", "b"]);
    h.key(x, "a", Key::Enter);

    let b = h.node(x, "b");
    let switched = h.engine.click_item(&mut h.host, x, b).unwrap();
    assert_eq!(triggers(&switched), [(x, Trigger::DragStarted, false)]);
    assert_eq!(switched[0].event().info.id, "b");
    assert_eq!(h.engine.keyboard_session().unwrap().item_id(), &"b");

    let stopped = h.engine.click_outside(&mut h.host);
    assert_eq!(triggers(&stopped), [(x, Trigger::DragStopped, false)]);
    assert!(h.engine.click_outside(&mut h.host).is_empty());
}

#[test]
fn escape_anywhere_stops_a_keyboard_drag() {
    let mut h = Harness::new();
    let x = h.zone(X, &["a", "b"]);
    assert!(h.engine.escape(&mut h.host).is_empty(), "nothing to stop");
    h.key(x, "a", Key::Enter);
    h.key(x, "a", Key::ArrowDown);

    let stopped = h.engine.escape(&mut h.host);
    assert_eq!(triggers(&stopped), [(x, Trigger::DragStopped, false)]);
    assert_eq!(ids_of(stopped[0].event()), ["b", "a"]);
    assert_eq!(h.engine.state(), DragState::Idle);
    assert_eq!(h.host.active_zones().count(), 0);
}

#[test]
fn keyboard_and_pointer_drags_exclude_each_other() {
    let mut h = Harness::new();
    let x = h.zone(X, &["a", "b"]);
    h.key(x, "a", Key::Enter);
    h.press(x, "b", Point::new(100.0, 75.0));
    assert_eq!(h.engine.state(), DragState::KeyboardDragging);
    assert_eq!(h.engine.unregister(x).unwrap_err(), DndError::zone_in_use(x));
    h.key(x, "a", Key::Escape);

    h.start(x, "a");
    assert!(h.key(x, "b", Key::Enter).is_empty());
    assert_eq!(h.engine.state(), DragState::Dragging);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn exactly_one_placeholder_while_dragging(
        path in prop::collection::vec((0.0..800.0_f64, 0.0..600.0_f64), 1..12)
    ) {
        let mut h = Harness::new();
        let x = h.zone(X, &["x1", "x2", "x3"]);
        let y = h.zone(Y, &["y1", "y2"]);
        h.start(x, "x2");
        for (cx, cy) in path {
            // Lists as the host saw them, updated with the considers of this batch as emitted.
            let mut seen = h.lists();
            let notes = h.drag_center_to(Point::new(cx, cy));
            for note in &notes {
                prop_assert!(!note.is_finalize());
                seen.insert(note.zone(), note.event().items.clone());
            }
            let emitted = seen.values().flatten().filter(|e| e.is_shadow()).count();
            prop_assert_eq!(emitted, 1);
            prop_assert_eq!(h.shadows(), 1);
        }
        let dropped = h.release();
        prop_assert!(dropped.iter().any(Notification::is_finalize));
        prop_assert_eq!(h.shadows(), 0);
        let mut all: Vec<&str> = h.ids(x);
        all.extend(h.ids(y));
        all.sort_unstable();
        prop_assert_eq!(all, ["x1", "x2", "x3", "y1", "y2"]);
    }
}
