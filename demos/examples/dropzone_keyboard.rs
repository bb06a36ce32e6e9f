// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard dragging: no floating visual, every move commits at once.
//!
//! Run:
//! - `cargo run -p understory_demos --example dropzone_keyboard`

use kurbo::{Rect, Size};
use understory_dropzone::adapters::scene::{ListRenderer, SceneHost};
use understory_dropzone::{DragEngine, Entry, Item, Key, Notification, ZoneOptions};
use understory_scene::{FlowLayout, LocalNode, NodeId, Scene};

#[derive(Clone, Debug)]
struct Chip(char);

impl Item for Chip {
    type Id = char;

    fn id(&self) -> char {
        self.0
    }
}

fn chip(_: &Chip) -> LocalNode {
    LocalNode {
        bounds: Rect::new(0.0, 0.0, 60.0, 30.0),
        ..Default::default()
    }
}

fn render(
    host: &mut SceneHost,
    lists: &mut ListRenderer<char>,
    engine: &mut DragEngine<NodeId, Chip>,
    notes: Vec<Notification<NodeId, Chip>>,
) {
    for note in notes {
        let event = note.event();
        let chips: String = event.items.iter().map(Entry::id).collect();
        println!(
            "{:<8} {:<20} {chips}",
            if note.is_finalize() { "finalize" } else { "consider" },
            event.info.trigger
        );
        lists.render(&mut host.scene, event.zone, &event.items, chip);
        engine.configure(host, event.zone, ZoneOptions::with_entries(event.items.clone()));
    }
}

fn main() {
    env_logger::init();

    let mut host = SceneHost::new(Scene::new(Size::new(800.0, 600.0)));
    let mut lists = ListRenderer::new();
    let mut engine: DragEngine<NodeId, Chip> = DragEngine::default();

    let mut zones = Vec::new();
    for (y, chips) in [(20.0, "abcd"), (100.0, "xyz")] {
        let root = host.scene.root();
        let zone = host.scene.insert(
            root,
            LocalNode {
                bounds: Rect::new(20.0, y, 420.0, y + 50.0),
                ..Default::default()
            },
        );
        host.scene.set_layout(zone, Some(FlowLayout::row()));
        let entries: Vec<Entry<Chip>> = chips.chars().map(|c| Entry::Item(Chip(c))).collect();
        lists.render(&mut host.scene, zone, &entries, chip);
        engine.configure(&mut host, zone, ZoneOptions::with_entries(entries));
        zones.push(zone);
    }
    let (top, bottom) = (zones[0], zones[1]);

    let b = lists.node_of(top, &'b').expect("rendered");
    for key in [Key::Enter, Key::ArrowRight, Key::ArrowRight] {
        let notes = engine
            .key_down(&mut host, top, b, key)
            .expect("registered zone and item");
        render(&mut host, &mut lists, &mut engine, notes);
    }

    // Tabbing into the lower list moves the chip to its front.
    let notes = engine.focus_zone(&mut host, bottom).expect("registered zone");
    render(&mut host, &mut lists, &mut engine, notes);

    let b = lists.node_of(bottom, &'b').expect("rendered");
    let notes = engine
        .key_down(&mut host, bottom, b, Key::Escape)
        .expect("registered zone and item");
    render(&mut host, &mut lists, &mut engine, notes);
    println!("engine state: {:?}", engine.state());
}
