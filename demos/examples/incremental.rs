// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grow a tree one point at a time and print its shape.

use kurbo::Point;
use understory_quadtree::{Identity, Node, QuadTree};

fn print_cells(node: &Node<Point>) {
    let indent = "  ".repeat(node.depth() as usize);
    let r = node.bounds().to_rect();
    println!(
        "{indent}[{:.3}, {:.3}] - [{:.3}, {:.3}] {:?}",
        r.x0,
        r.y0,
        r.x1,
        r.y1,
        node.elements()
    );
    for (_, child) in node.children() {
        print_cells(child);
    }
}

fn main() {
    let mut tree = QuadTree::empty(Point::new(0.5, 0.5), 0.5, Identity, 3).unwrap();
    let points = [
        (0.1, 0.1),
        (0.9, 0.1),
        (0.1, 0.9),
        (0.9, 0.9),
        (0.5, 0.5),
        (0.2, 0.2),
        (0.15, 0.05),
        (0.3, 0.4),
        (1.5, 0.5),
    ];
    for (x, y) in points {
        let rejected = tree.insert([Point::new(x, y)]);
        if !rejected.is_empty() {
            println!("rejected {:?}", rejected.into_vec());
        }
        println!("count after ({x}, {y}): {}", tree.count());
    }
    print_cells(tree.root());
}
