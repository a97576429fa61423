use std::fs;

use inplace_scene::{
    parse_scene_json, Axis, DocumentAdapter, DocumentError, Interpolation, JsonDocument, Property,
    SceneTime, TimeMode,
};

#[test]
fn loads_mixamo_fixture_with_hierarchy_and_curves() {
    let path = inplace_test_fixtures::scenes::path("mixamo-walk").expect("fixture path");
    let scene = JsonDocument::new().load(&path).expect("load mixamo-walk");

    assert_eq!(scene.name, "Walking");
    assert_eq!(scene.time_mode, TimeMode::Frames30);
    assert_eq!(scene.stack_count(), 2);
    assert!(scene.current_stack().is_none());

    let hips = scene.root().find("mixamorig:Hips").expect("hips node");
    assert!(hips.is_skeleton_joint());
    assert_eq!(hips.child_count(), 1);

    let stack = &scene.animation_stacks[0];
    assert_eq!(stack.name, "mixamo.com");
    assert_eq!(stack.local_time_span.frame_range(scene.time_mode).stop, 4);

    let layer = &stack.layers[0];
    let x = layer
        .translation_curve("mixamorig:Hips", Axis::X)
        .expect("x curve");
    assert_eq!(x.key_count(), 6);
    let y = layer
        .translation_curve("mixamorig:Hips", Axis::Y)
        .expect("y curve");
    assert_eq!(y.key(0).map(|k| k.interpolation), Some(Interpolation::Cubic));
    assert_eq!(y.key(0).map(|k| k.slopes.right), Some(4.0));
    assert!(layer
        .curve_node("mixamorig:Hips", Property::Rotation)
        .is_some());
}

#[test]
fn save_then_load_preserves_scene() {
    let dir = inplace_test_fixtures::scratch_dir("save_then_load").expect("scratch dir");
    let input = inplace_test_fixtures::scenes::path("mixamo-walk").expect("fixture path");
    let doc = JsonDocument::pretty();
    let scene = doc.load(&input).expect("load");

    let out = dir.join("walk_copy.json");
    doc.save(&scene, &out).expect("save");
    let reloaded = doc.load(&out).expect("reload");
    assert_eq!(reloaded, scene);

    // No temporary files are left behind next to the output.
    let leftovers: Vec<_> = fs::read_dir(&dir)
        .expect("read scratch dir")
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn failed_save_leaves_existing_output_untouched() {
    let dir = inplace_test_fixtures::scratch_dir("failed_save").expect("scratch dir");
    let scene = JsonDocument::new()
        .load(&inplace_test_fixtures::scenes::path("no-animation").expect("fixture path"))
        .expect("load");

    // Renaming a file over a directory fails on every platform.
    let out = dir.join("occupied");
    fs::create_dir(&out).expect("create blocking dir");
    let err = JsonDocument::new().save(&scene, &out).unwrap_err();
    assert!(matches!(err, DocumentError::Io { .. }));
    assert!(out.is_dir());
    let entries = fs::read_dir(&dir).expect("read scratch dir").count();
    assert_eq!(entries, 1, "temporary file should have been cleaned up");
}

#[test]
fn missing_input_is_an_io_error() {
    let err = JsonDocument::new()
        .load(std::path::Path::new("definitely/not/here.json"))
        .unwrap_err();
    assert_eq!(err.category(), "io");
}

#[test]
fn out_of_order_keys_fail_validation() {
    let json = r#"{
        "root": { "name": "Scene" },
        "animation_stacks": [{
            "name": "Take",
            "local_time_span": { "start": 0, "stop": 10 },
            "layers": [{
                "name": "BaseLayer",
                "curve_nodes": [{
                    "node": "Hips",
                    "property": "translation",
                    "x": { "keys": [ { "time": 5, "value": 1.0 }, { "time": 2, "value": 0.0 } ] }
                }]
            }]
        }]
    }"#;
    let err = parse_scene_json(json).unwrap_err();
    match err {
        DocumentError::Invalid { reason } => assert!(reason.contains("Hips"), "{reason}"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn inverted_stack_span_fails_validation() {
    let json = r#"{
        "root": { "name": "Scene" },
        "animation_stacks": [{ "name": "Take", "local_time_span": { "start": 10, "stop": 0 } }]
    }"#;
    assert!(matches!(
        parse_scene_json(json),
        Err(DocumentError::Invalid { .. })
    ));
}

#[test]
fn custom_time_mode_round_trips() {
    let json = r#"{
        "root": { "name": "Scene" },
        "time_mode": { "custom": { "fps": 12.5 } }
    }"#;
    let scene = parse_scene_json(json).expect("parse");
    assert_eq!(scene.time_mode, TimeMode::Custom { fps: 12.5 });
    let t = SceneTime::from_frame(5, scene.time_mode);
    assert_eq!(t.frame(scene.time_mode), 5);
    let text = JsonDocument::new().to_string(&scene).expect("encode");
    assert_eq!(parse_scene_json(&text).expect("reparse"), scene);
}

#[test]
fn save_keeps_attribute_spelling_and_omits_absent_fields() {
    let path = inplace_test_fixtures::scenes::path("mixamo-walk").expect("fixture path");
    let doc = JsonDocument::new();
    let scene = doc.load(&path).expect("load");
    let text = doc.to_string(&scene).expect("encode");

    assert!(text.contains(r#""type":"eSkeleton""#), "{text}");
    assert!(!text.contains(":null"), "{text}");
    assert!(!text.contains(r#""children":[]"#), "{text}");
    assert!(!text.contains("current_stack"), "{text}");

    let reparsed = parse_scene_json(&text).expect("reparse");
    let hips = reparsed.root().find("mixamorig:Hips").expect("hips node");
    assert!(hips.is_skeleton_joint());
    assert_eq!(hips.attribute_type_name(), "Skeleton");
}
