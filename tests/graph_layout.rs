//! Graph projection, layout, and scene pipeline over a real collection

mod common;

use common::{id, seeded_collection};
use lattice::article;
use lattice::geometry::Vec2;
use lattice::graph::{self, EdgeKind};
use lattice::view::{GraphController, MAIN_RADIUS, NODE_RADIUS, UNASSIGNED_RADIUS};

#[test]
fn resolved_collection_projects_to_expected_edges() {
    let mut articles = seeded_collection();
    article::normalize_collection(&mut articles);
    article::resolve(&mut articles);

    let (nodes, edges) = graph::build(&articles);
    assert_eq!(nodes.len(), 4);
    assert!(nodes.iter().find(|n| n.id == id("main")).unwrap().is_main);
    assert!(nodes.iter().find(|n| n.id == id("u")).unwrap().is_unassigned);

    // One parent edge, oriented child -> parent.
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].source, id("a"));
    assert_eq!(edges[0].target, id("main"));
    assert_eq!(edges[0].kind, EdgeKind::Parent);
}

#[test]
fn controller_settles_into_a_complete_scene() {
    let mut view = GraphController::new(&seeded_collection(), 800.0, 600.0);
    let mut ticks = 0;
    while view.tick() {
        ticks += 1;
        assert!(ticks < 1000, "layout failed to settle");
    }
    assert!(view.is_settled());

    let scene = view.scene();
    assert_eq!(scene.nodes.len(), 4);
    assert_eq!(scene.edges.len(), 1);
    for node in &scene.nodes {
        assert!(node.x.is_finite() && node.y.is_finite());
    }

    let radius_of = |key: &str| {
        scene
            .nodes
            .iter()
            .find(|n| n.id == id(key))
            .unwrap()
            .radius
    };
    assert_eq!(radius_of("main"), MAIN_RADIUS);
    assert_eq!(radius_of("u"), UNASSIGNED_RADIUS);
    assert_eq!(radius_of("a"), NODE_RADIUS);
}

#[test]
fn scene_edge_terminates_on_the_target_boundary() {
    let mut view = GraphController::new(&seeded_collection(), 800.0, 600.0);
    while view.tick() {}

    let scene = view.scene();
    let main = scene.nodes.iter().find(|n| n.id == id("main")).unwrap();
    let edge = &scene.edges[0];
    let end = Vec2::new(edge.path.p3.x, edge.path.p3.y);
    let dist = end.distance(Vec2::new(main.x, main.y));
    assert!(
        (dist - MAIN_RADIUS).abs() < 1.0,
        "edge ends {dist} from the center, wanted ~{MAIN_RADIUS}"
    );
    let tip = Vec2::new(edge.arrow.x, edge.arrow.y);
    assert!(tip.distance(Vec2::new(main.x, main.y)) >= MAIN_RADIUS - 1.0);
}

#[test]
fn dragged_node_stays_pinned_while_the_rest_keeps_moving() {
    let mut view = GraphController::new(&seeded_collection(), 800.0, 600.0);
    for _ in 0..10 {
        view.tick();
    }

    let dragged = id("b");
    view.on_drag_start(&dragged);
    view.on_drag_move(&dragged, 400.0, 300.0);
    for _ in 0..50 {
        view.tick();
    }

    let scene = view.scene();
    let b = scene.nodes.iter().find(|n| n.id == dragged).unwrap();
    assert_eq!((b.x, b.y), (400.0, 300.0));

    view.on_drag_end(&dragged);
    while view.tick() {}
    let scene = view.scene();
    let b = scene.nodes.iter().find(|n| n.id == dragged).unwrap();
    let moved = Vec2::new(b.x, b.y).distance(Vec2::new(400.0, 300.0));
    assert!(moved > 1.0, "released node never rejoined the layout");
}

#[test]
fn hit_test_works_through_zoom_and_pan() {
    let mut view = GraphController::new(&seeded_collection(), 800.0, 600.0);
    while view.tick() {}

    view.on_zoom(1.5, Vec2::new(400.0, 300.0));
    view.on_pan(Vec2::new(-35.0, 12.0));

    let scene = view.scene();
    let main = scene.nodes.iter().find(|n| n.id == id("main")).unwrap();
    let screen = view.viewport().world_to_screen(Vec2::new(main.x, main.y));
    assert_eq!(view.hit_test(screen), Some(id("main")));

    let far = view
        .viewport()
        .world_to_screen(Vec2::new(main.x + 10_000.0, main.y));
    assert_eq!(view.hit_test(far), None);
}
