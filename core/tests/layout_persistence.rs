use polyzone_core::{
    DragOrigin, Editor, EditorConfig, LayoutStore, MemoryStore, PolygonRecord, ZoneError,
};

fn editor_with_board(placed: usize) -> Editor {
    let mut editor = Editor::new(EditorConfig::default(), 7);
    editor.viewport_mut().resize(800.0, 600.0);
    editor.create_polygons();
    for index in 0..placed {
        let id = editor.tray().iter().next().map(|polygon| polygon.id).unwrap();
        let raw = editor
            .begin_drag(id, DragOrigin::Tray)
            .unwrap()
            .encode()
            .unwrap();
        let offset = 40.0 * index as f32;
        editor
            .drop_on_work_zone(&raw, (offset + 10.0, offset + 20.0), (0.0, 0.0))
            .unwrap();
    }
    editor
}

#[test]
fn save_then_load_restores_board() {
    let editor = editor_with_board(3);
    let store = MemoryStore::new();
    assert_eq!(editor.save(&store).unwrap(), 3);

    let mut restored = Editor::new(EditorConfig::default(), 99);
    assert_eq!(restored.load(&store).unwrap(), 3);
    let before: Vec<_> = editor.board().iter().collect();
    let after: Vec<_> = restored.board().iter().collect();
    for (saved, loaded) in before.iter().zip(after.iter()) {
        assert_eq!(saved.shape, loaded.shape);
        assert_eq!((saved.left, saved.top), (loaded.left, loaded.top));
        assert_eq!(loaded.transform_scale, 1.0);
    }
}

#[test]
fn saved_records_use_css_strings() {
    let editor = editor_with_board(1);
    let store = MemoryStore::new();
    editor.save(&store).unwrap();
    let raw = store.raw().unwrap();
    let records: Vec<PolygonRecord> = serde_json::from_str(&raw).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].position.left, "10px");
    assert_eq!(records[0].position.top, "20px");
    assert_eq!(records[0].transform.as_deref(), Some("scale(1)"));
    assert_eq!(records[0].scale, Some(1.0));
}

#[test]
fn load_at_other_scale_uses_ratio() {
    let mut editor = editor_with_board(2);
    editor.viewport_mut().zoom_to(2.0, 0.0, 0.0);
    let store = MemoryStore::new();
    editor.save(&store).unwrap();

    let mut restored = Editor::new(EditorConfig::default(), 1);
    restored.load(&store).unwrap();
    for polygon in restored.board().iter() {
        assert_eq!(polygon.transform_scale, 0.5);
        assert_eq!(polygon.transform_css(), "scale(0.5)");
    }
}

#[test]
fn missing_layout_leaves_board_untouched() {
    let mut editor = editor_with_board(2);
    let store = MemoryStore::new();
    assert_eq!(editor.load(&store).unwrap(), 0);
    assert_eq!(editor.board().len(), 2);
}

#[test]
fn malformed_layout_errors_with_empty_board() {
    let mut editor = editor_with_board(2);
    let store = MemoryStore::with_raw("[{\"vertices\":3");
    let err = editor.load(&store).unwrap_err();
    assert!(matches!(err, ZoneError::Json(_)));
    assert!(editor.board().is_empty());

    let store = MemoryStore::with_raw(
        r#"[{"vertices":3,"points":"1,1 2,2 3,3","position":{"left":"1em","top":"0px"}}]"#,
    );
    let err = editor.load(&store).unwrap_err();
    assert!(matches!(err, ZoneError::MalformedLength(_)));
    assert!(editor.board().is_empty());
}

#[test]
fn reset_clears_board_and_storage() {
    let mut editor = editor_with_board(2);
    let store = MemoryStore::new();
    editor.save(&store).unwrap();
    assert!(store.load_raw().unwrap().is_some());

    editor.reset(&store).unwrap();
    assert!(editor.board().is_empty());
    assert!(store.raw().is_none());
    assert_eq!(editor.load(&store).unwrap(), 0);
}

#[test]
fn loaded_polygons_get_fresh_ids() {
    let editor = editor_with_board(2);
    let store = MemoryStore::new();
    editor.save(&store).unwrap();

    let mut restored = editor_with_board(0);
    restored.load(&store).unwrap();
    let board_ids: Vec<_> = restored.board().iter().map(|polygon| polygon.id).collect();
    assert!(restored
        .tray()
        .iter()
        .all(|polygon| !board_ids.contains(&polygon.id)));
}
