// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer drag between two lists rendered into a scene.
//!
//! A scripted pointer picks up the first task of "todo", hovers over "done", and drops it
//! between the two finished tasks. Every notification is rendered and fed back to the engine,
//! the way a UI framework would.
//!
//! Run:
//! - `cargo run -p understory_demos --example dropzone_reorder`
//! - `RUST_LOG=understory_dropzone=debug cargo run -p understory_demos --example dropzone_reorder`

use std::collections::BTreeMap;

use kurbo::{Point, Rect, Size};
use understory_dropzone::adapters::scene::{ListRenderer, SceneHost};
use understory_dropzone::{DragEngine, Entry, Item, Notification, PointerButton, ZoneOptions};
use understory_scene::{FlowLayout, LocalNode, NodeId, Scene};

#[derive(Clone, Debug)]
struct Task {
    id: u32,
    title: &'static str,
}

impl Item for Task {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

fn row(_: &Task) -> LocalNode {
    LocalNode {
        bounds: Rect::new(0.0, 0.0, 180.0, 40.0),
        ..Default::default()
    }
}

struct Board {
    host: SceneHost,
    lists: ListRenderer<u32>,
    engine: DragEngine<NodeId, Task>,
    names: BTreeMap<NodeId, &'static str>,
}

impl Board {
    fn list(&mut self, name: &'static str, bounds: Rect, tasks: Vec<Task>) -> NodeId {
        let root = self.host.scene.root();
        let zone = self.host.scene.insert(
            root,
            LocalNode {
                bounds,
                ..Default::default()
            },
        );
        let layout = FlowLayout::column().with_gap(8.0).with_padding(8.0);
        self.host.scene.set_layout(zone, Some(layout));
        let entries: Vec<Entry<Task>> = tasks.into_iter().map(Entry::Item).collect();
        self.lists.render(&mut self.host.scene, zone, &entries, row);
        self.engine.configure(
            &mut self.host,
            zone,
            ZoneOptions::with_entries(entries).flip_duration_ms(150),
        );
        self.names.insert(zone, name);
        zone
    }

    fn apply(&mut self, notes: Vec<Notification<NodeId, Task>>) {
        for note in notes {
            let kind = if note.is_finalize() { "finalize" } else { "consider" };
            let event = note.event();
            let titles: Vec<String> = event
                .items
                .iter()
                .map(|e| match e {
                    Entry::Item(t) => t.title.to_owned(),
                    Entry::Shadow(t) => format!("[{}]", t.title),
                })
                .collect();
            println!(
                "{kind:>8} {:<5} {:<22} {}",
                self.names[&event.zone],
                event.info.trigger,
                titles.join(", ")
            );
            self.lists
                .render(&mut self.host.scene, event.zone, &event.items, row);
            self.engine.configure(
                &mut self.host,
                event.zone,
                ZoneOptions::with_entries(event.items.clone()).flip_duration_ms(150),
            );
        }
    }

    /// Run every timer due up to `until`.
    fn run_until(&mut self, until: u64) {
        while let Some(due) = self.engine.next_deadline().filter(|d| *d <= until) {
            let notes = self.engine.advance(&mut self.host, due);
            self.apply(notes);
        }
    }
}

fn main() {
    env_logger::init();

    let mut board = Board {
        host: SceneHost::new(Scene::new(Size::new(640.0, 480.0))),
        lists: ListRenderer::new(),
        engine: DragEngine::default(),
        names: BTreeMap::new(),
    };
    let todo = board.list(
        "todo",
        Rect::new(20.0, 20.0, 216.0, 400.0),
        vec![
            Task { id: 1, title: "write parser" },
            Task { id: 2, title: "review PR" },
            Task { id: 3, title: "update docs" },
        ],
    );
    let done = board.list(
        "done",
        Rect::new(260.0, 20.0, 456.0, 400.0),
        vec![
            Task { id: 4, title: "triage issues" },
            Task { id: 5, title: "release 0.1" },
        ],
    );

    let first = board.lists.nodes(todo)[0];
    let grab = board
        .host
        .scene
        .client_rect(first)
        .expect("rendered")
        .center();
    board
        .engine
        .pointer_down(&board.host, todo, first, grab, PointerButton::Primary)
        .expect("registered zone and item");

    // Slide right in small steps, sampling like a real pointer would.
    let target = Point::new(grab.x + 240.0, grab.y + 30.0);
    let mut now = 0;
    for step in 1..=20 {
        now += 16;
        let t = f64::from(step) / 20.0;
        let at = grab.lerp(target, t);
        let notes = board.engine.pointer_move(&mut board.host, now, at);
        board.apply(notes);
        board.run_until(now);
    }
    // Let the observer take one more look at the final position.
    now += 200;
    board.run_until(now);

    let notes = board.engine.pointer_up(&mut board.host, now);
    board.apply(notes);
    board.run_until(now + 150);
    println!("engine state after the drop: {:?}", board.engine.state());
    println!(
        "todo has {} items, done has {}",
        board.lists.nodes(todo).len(),
        board.lists.nodes(done).len()
    );
}
