use polyzone_core::geometry::{generate_polygon_points, random_vertex_count};
use polyzone_core::{format_points, parse_points, view_box, PolygonShape, ShapeRng};

#[test]
fn generated_polygons_stay_in_bounds() {
    let mut rng = ShapeRng::new(0x5EED);
    for size in [16.0f32, 40.0, 120.0] {
        for _ in 0..400 {
            let shape = PolygonShape::random(&mut rng, size, 3, 8);
            assert!((3..=8).contains(&shape.vertices));
            assert_eq!(shape.points.len(), shape.vertices as usize);
            assert!(shape.hue < 360);
            for (x, y) in &shape.points {
                assert!(*x >= 0.0 && *x <= size, "x {x} outside 0..={size}");
                assert!(*y >= 0.0 && *y <= size, "y {y} outside 0..={size}");
            }
        }
    }
}

#[test]
fn vertex_count_respects_narrowed_range() {
    let mut rng = ShapeRng::new(99);
    for _ in 0..200 {
        let count = random_vertex_count(&mut rng, 5, 6);
        assert!(count == 5 || count == 6);
    }
    // Out-of-range requests are pulled back into 3..=8.
    for _ in 0..200 {
        let count = random_vertex_count(&mut rng, 0, 40);
        assert!((3..=8).contains(&count));
    }
}

#[test]
fn vertices_are_spread_by_angle() {
    let mut rng = ShapeRng::new(3);
    let points = generate_polygon_points(4, 40.0, &mut rng);
    // Vertex 0 sits on the +x axis, vertex 1 straight below the centre.
    assert!(points[0].0 > 20.0);
    assert!((points[0].1 - 20.0).abs() < 1e-4);
    assert!((points[1].0 - 20.0).abs() < 1e-4);
    assert!(points[1].1 > 20.0);
}

#[test]
fn same_seed_same_shapes() {
    let mut a = ShapeRng::new(42);
    let mut b = ShapeRng::new(42);
    for _ in 0..10 {
        assert_eq!(
            PolygonShape::random(&mut a, 40.0, 3, 8),
            PolygonShape::random(&mut b, 40.0, 3, 8)
        );
    }
}

#[test]
fn points_text_matches_svg_attribute_format() {
    let text = format_points(&[(1.5, 2.0), (30.25, 4.0), (8.0, 39.0)]);
    assert_eq!(text, "1.5,2 30.25,4 8,39");
    assert_eq!(parse_points(&text).unwrap(), vec![(1.5, 2.0), (30.25, 4.0), (8.0, 39.0)]);
    assert_eq!(view_box(40.0), "0 0 40 40");
}

#[test]
fn from_parts_rejects_bad_shapes() {
    assert!(PolygonShape::from_parts(2, vec![(0.0, 0.0), (1.0, 1.0)], 40.0, 0).is_err());
    assert!(PolygonShape::from_parts(3, vec![(0.0, 0.0), (1.0, 1.0)], 40.0, 0).is_err());
    let shape = PolygonShape::from_parts(3, vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)], f32::NAN, 400)
        .unwrap();
    assert_eq!(shape.size, 40.0);
    assert_eq!(shape.hue, 40);
}
