// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collapsible org chart: JSON input, initial depth, toggles, and pan/zoom.
//!
//! This example shows how a host drives `understory_tidy_tree`:
//! - load hierarchical data from JSON (the `serde` feature),
//! - open the chart two levels deep and follow an auto-expand path,
//! - feed clicks with host timestamps and watch the busy window,
//! - map layout positions to the screen through the viewport transform.
//!
//! Run:
//! - `cargo run -p understory_demos --example collapsible_org_chart`

use kurbo::{Point, Vec2};
use understory_tidy_tree::{
    LiveNode, LiveTree, RawNode, TreeConfig, TreeObserver, TreeView, Update,
};

const ORG: &str = r#"{
    "name": "CEO",
    "attributes": { "office": "HQ" },
    "children": [
        {
            "name": "CTO",
            "children": [
                { "name": "Platform", "children": [ { "name": "SRE" }, { "name": "Build" } ] },
                { "name": "Product", "children": [ { "name": "Web" } ] }
            ]
        },
        { "name": "CFO", "children": [ { "name": "Payroll" } ] },
        { "name": "COO" }
    ]
}"#;

/// Logs every callback the view reports.
struct Log;

impl TreeObserver for Log {
    fn on_click(&mut self, node: &LiveNode) {
        tracing::info!(name = node.name(), "clicked");
    }

    fn on_update(&mut self, update: Update<'_>) {
        tracing::info!(
            node = update.node.map(LiveNode::name),
            zoom = update.zoom,
            "update"
        );
    }
}

fn print_view(view: &TreeView) {
    let layout = view.layout();
    let viewport = view.viewport();
    for node in layout.views(view.tree()) {
        let screen = viewport.to_screen(node.position);
        println!(
            "  {indent}{name:<10} {mark} layout=({x:7.1}, {y:6.1}) screen=({sx:7.1}, {sy:6.1})",
            indent = "  ".repeat(node.depth as usize),
            name = node.name,
            mark = match (node.collapsed, node.active) {
                (_, true) => "*",
                (true, false) => "+",
                (false, false) => "-",
            },
            x = node.position.x,
            y = node.position.y,
            sx = screen.x,
            sy = screen.y,
        );
    }
    println!("  {} links", layout.links.len());
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let raw: RawNode = serde_json::from_str(ORG)?;

    let config = TreeConfig {
        initial_depth: Some(2),
        collapse_neighbors: true,
        ..TreeConfig::default()
    };
    // Follow the first child whenever a collapsed node is opened.
    let first = |_: &LiveTree, node: &LiveNode| node.children().first().copied();
    let mut view = TreeView::new(config)
        .with_child_selector(first)
        .with_observer(Log);
    view.set_data(&raw)?;

    println!("== Initial (depth 2, auto-expanded) ==");
    print_view(&view);

    let find = |view: &TreeView, name: &str| {
        view.tree()
            .iter_visible()
            .find(|node| node.name() == name)
            .map(LiveNode::id)
    };

    // Host timestamps in milliseconds.
    let mut now = 0;
    if let Some(cfo) = find(&view, "CFO") {
        println!("\n== Toggle CFO at {now} ms ==");
        println!("  outcome: {:?}", view.toggle(cfo, now)?);
        print_view(&view);

        now += 200;
        println!("\n== Toggle CFO again at {now} ms ==");
        println!("  outcome: {:?}", view.toggle(cfo, now)?);

        now += 400;
        println!("\n== Toggle CFO once more at {now} ms ==");
        println!("  outcome: {:?}", view.toggle(cfo, now)?);
        print_view(&view);
    }

    println!("\n== Pan and zoom ==");
    view.pan_by(Vec2::new(400.0, 300.0));
    view.zoom_about(0.5, Point::new(400.0, 300.0));
    print_view(&view);

    Ok(())
}
