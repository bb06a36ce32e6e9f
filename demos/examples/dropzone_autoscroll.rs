// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Auto-scrolling a long list while dragging.
//!
//! The list shows five of its thirty rows. Holding the dragged row inside the bottom scroll band
//! scrolls the list one frame at a time; the placeholder follows the rows passing underneath.
//!
//! Run:
//! - `cargo run -p understory_demos --example dropzone_autoscroll`

use kurbo::{Rect, Size, Vec2};
use understory_dropzone::adapters::scene::{ListRenderer, SceneHost};
use understory_dropzone::host::Scrolling;
use understory_dropzone::{DragEngine, Entry, Item, PointerButton, ZoneOptions};
use understory_scene::{FlowLayout, LocalNode, NodeFlags, NodeId, Scene};

#[derive(Clone, Debug)]
struct Row(u32);

impl Item for Row {
    type Id = u32;

    fn id(&self) -> u32 {
        self.0
    }
}

fn row(_: &Row) -> LocalNode {
    LocalNode {
        bounds: Rect::new(0.0, 0.0, 300.0, 40.0),
        ..Default::default()
    }
}

fn main() {
    env_logger::init();

    let mut host = SceneHost::new(Scene::new(Size::new(800.0, 600.0)));
    let root = host.scene.root();
    let list = host.scene.insert(
        root,
        LocalNode {
            bounds: Rect::new(50.0, 50.0, 350.0, 250.0),
            flags: NodeFlags::default() | NodeFlags::SCROLL_Y,
            ..Default::default()
        },
    );
    host.scene.set_layout(list, Some(FlowLayout::column()));

    let mut lists = ListRenderer::new();
    let mut engine: DragEngine<NodeId, Row> = DragEngine::default();
    let entries: Vec<Entry<Row>> = (0..30).map(|i| Entry::Item(Row(i))).collect();
    lists.render(&mut host.scene, list, &entries, row);
    engine.configure(&mut host, list, ZoneOptions::with_entries(entries));

    let first = lists.nodes(list)[0];
    let grab = host.scene.client_rect(first).expect("rendered").center();
    engine
        .pointer_down(&host, list, first, grab, PointerButton::Primary)
        .expect("registered zone and item");

    // Park the row 10 px above the list's bottom edge.
    let park = grab + Vec2::new(0.0, 200.0 - 20.0 - 10.0);
    let mut notes = engine.pointer_move(&mut host, 0, grab + Vec2::new(0.0, 5.0));
    notes.extend(engine.pointer_move(&mut host, 0, park));

    let mut now = 0;
    let mut last_offset = 0.0;
    while now <= 1000 {
        for note in notes.drain(..) {
            let event = note.event();
            let shadow_at = event.items.iter().position(Entry::is_shadow);
            println!(
                "{now:>5} ms  {:<16} placeholder at {shadow_at:?}",
                event.info.trigger
            );
            lists.render(&mut host.scene, event.zone, &event.items, row);
            engine.configure(
                &mut host,
                event.zone,
                ZoneOptions::with_entries(event.items.clone()),
            );
        }
        let Some(due) = engine.next_deadline() else {
            break;
        };
        now = due;
        notes = engine.advance(&mut host, now);
        let offset = host.scroll_metrics(list).map_or(0.0, |m| m.offset.y);
        if offset - last_offset >= 100.0 {
            println!("{now:>5} ms  scrolled to {offset}");
            last_offset = offset;
        }
    }

    let notes = engine.pointer_up(&mut host, now);
    for note in &notes {
        let shadowless: Vec<u32> = note.event().items_without_shadow().iter().map(|r| r.0).collect();
        println!("finalize: {:?}", &shadowless[..8]);
    }
}
