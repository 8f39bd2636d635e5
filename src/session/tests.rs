use super::*;
use crate::draw::{ElementTool, Point};
use crate::input::{EditorState, PointerTarget, Tool};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct MockStore {
    notes: Mutex<HashMap<String, Note>>,
    fail_writes: bool,
    creates: Mutex<usize>,
}

#[async_trait]
impl NoteStore for MockStore {
    async fn load(&self, id: &str) -> Result<Note, StoreError> {
        self.notes
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn create(&self, note: &Note) -> Result<String, StoreError> {
        if self.fail_writes {
            return Err(StoreError::Task("offline".into()));
        }
        let mut creates = self.creates.lock().unwrap();
        *creates += 1;
        let id = format!("mock-{}", *creates);
        self.notes.lock().unwrap().insert(id.clone(), note.clone());
        Ok(id)
    }

    async fn update(&self, id: &str, note: &Note) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Task("offline".into()));
        }
        let mut notes = self.notes.lock().unwrap();
        match notes.get_mut(id) {
            Some(existing) => {
                *existing = note.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }
}

fn draw_rectangle(editor: &mut EditorState, from: Point, to: Point) {
    editor.set_tool(Tool::Rectangle);
    let mut no_text = |_: Point| -> Option<String> { None };
    editor.pointer_down(from, PointerTarget::Canvas, &mut no_text);
    editor.pointer_moved(to);
    editor.pointer_up();
}

#[tokio::test]
async fn blank_session_creates_then_updates() {
    let store = Arc::new(MockStore::default());
    let mut session = DrawingSession::new_blank(store.clone(), EditorState::new());
    assert_eq!(session.phase(), SessionPhase::Ready);

    let editor = session.editor_mut().unwrap();
    draw_rectangle(editor, Point::new(10.0, 10.0), Point::new(50.0, 40.0));

    let id = session.save().await.unwrap();
    assert_eq!(session.note_id(), Some(id.as_str()));

    let editor = session.editor_mut().unwrap();
    draw_rectangle(editor, Point::new(0.0, 0.0), Point::new(5.0, 5.0));
    let second = session.save().await.unwrap();

    assert_eq!(id, second);
    assert_eq!(*store.creates.lock().unwrap(), 1);

    let stored = store.notes.lock().unwrap().get(&id).cloned().unwrap();
    assert_eq!(stored.title, UNTITLED_DRAWING);
    assert_eq!(stored.note_type, NoteType::Drawing);
    assert_eq!(decode_scene(&stored.content, 0).unwrap().len(), 2);
}

#[tokio::test]
async fn open_round_trips_through_store() {
    let store = Arc::new(MockStore::default());
    let mut session = DrawingSession::new_blank(store.clone(), EditorState::new());
    session.title = "Floor plan".to_string();
    draw_rectangle(
        session.editor_mut().unwrap(),
        Point::new(10.0, 10.0),
        Point::new(50.0, 40.0),
    );
    let id = session.save().await.unwrap();
    let saved_frame = session.editor().unwrap().frame().clone();

    let reopened = DrawingSession::open(store, id, EditorState::new())
        .await
        .unwrap();
    assert_eq!(reopened.title, "Floor plan");
    assert_eq!(reopened.editor().unwrap().frame(), &saved_frame);
    assert!(!reopened.editor().unwrap().can_redo());
}

#[tokio::test]
async fn loading_session_hides_editor_until_loaded() {
    let store = Arc::new(MockStore::default());
    store.notes.lock().unwrap().insert(
        "legacy".into(),
        Note::drawing(
            "Old",
            r#"[{"tool": "pen", "type": "line", "points": [1, 2, 3, 4]}]"#.into(),
        ),
    );

    let mut session = DrawingSession::loading(store, "legacy", EditorState::new());
    assert_eq!(session.phase(), SessionPhase::Loading);
    assert!(session.editor().is_none());
    assert!(matches!(session.save().await, Err(SessionError::NotReady)));

    session.load().await.unwrap();
    let editor = session.editor().unwrap();
    assert_eq!(editor.elements().len(), 1);
    assert!(editor.elements()[0].id.starts_with("el-0-"));
    assert_eq!(editor.elements()[0].tool, ElementTool::Pen);
}

#[tokio::test]
async fn missing_note_is_a_load_failure() {
    let store = Arc::new(MockStore::default());
    let result = DrawingSession::open(store, "nope", EditorState::new()).await;

    match result {
        Err(SessionError::Load {
            id,
            source: PersistError::Store(StoreError::NotFound(_)),
        }) => assert_eq!(id, "nope"),
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("expected a load failure"),
    }
}

#[tokio::test]
async fn malformed_content_is_a_load_failure() {
    let store = Arc::new(MockStore::default());
    store
        .notes
        .lock()
        .unwrap()
        .insert("bad".into(), Note::drawing("Bad", "{oops".into()));

    let mut session = DrawingSession::loading(store, "bad", EditorState::new());
    let err = session.load().await.unwrap_err();

    assert!(matches!(
        err,
        SessionError::Load {
            source: PersistError::Codec(CodecError::Malformed(_)),
            ..
        }
    ));
    assert_eq!(session.phase(), SessionPhase::Loading);
}

#[tokio::test]
async fn failed_save_keeps_scene() {
    let store = Arc::new(MockStore {
        fail_writes: true,
        ..MockStore::default()
    });
    let mut session = DrawingSession::new_blank(store, EditorState::new());
    draw_rectangle(
        session.editor_mut().unwrap(),
        Point::new(0.0, 0.0),
        Point::new(3.0, 3.0),
    );

    let err = session.save().await.unwrap_err();
    assert!(matches!(err, SessionError::Save(PersistError::Store(_))));
    assert_eq!(session.note_id(), None);
    assert_eq!(session.editor().unwrap().elements().len(), 1);
}

#[tokio::test]
async fn non_finite_scene_fails_to_save() {
    let store = Arc::new(MockStore::default());
    let mut broken = crate::draw::Element::new("rect-1", ElementTool::Rectangle);
    broken.y = f64::INFINITY;
    let mut editor = EditorState::new();
    editor.load_scene(crate::draw::Frame::from_elements(vec![broken]));

    let mut session = DrawingSession::new_blank(store.clone(), editor);
    let err = session.save().await.unwrap_err();

    assert!(matches!(
        err,
        SessionError::Save(PersistError::Codec(CodecError::NonFinite(_)))
    ));
    assert_eq!(session.note_id(), None);
    assert!(store.notes.lock().unwrap().is_empty());
    assert_eq!(session.editor().unwrap().elements().len(), 1);
}

#[tokio::test]
async fn file_store_create_load_update() {
    let temp = tempfile::tempdir().unwrap();
    let store = FileNoteStore::new(temp.path().join("notes"));

    let id = store
        .create(&Note::drawing("First", "[]".into()))
        .await
        .unwrap();
    let path = store.note_path(&id).unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());

    store
        .update(&id, &Note::drawing("Second", "[]".into()))
        .await
        .unwrap();
    let loaded = store.load(&id).await.unwrap();
    assert_eq!(loaded.title, "Second");

    let other = store
        .create(&Note::drawing("Other", "[]".into()))
        .await
        .unwrap();
    assert_ne!(id, other);
}

#[tokio::test]
async fn file_store_errors() {
    let temp = tempfile::tempdir().unwrap();
    let store = FileNoteStore::new(temp.path());

    assert!(matches!(
        store.load("absent").await,
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        store.update("absent", &Note::drawing("x", String::new())).await,
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        store.load("../escape").await,
        Err(StoreError::InvalidId(_))
    ));

    std::fs::write(temp.path().join("broken.json"), "not json").unwrap();
    assert!(matches!(
        store.load("broken").await,
        Err(StoreError::Parse { .. })
    ));
}

#[tokio::test]
async fn session_over_file_store() {
    let temp = tempfile::tempdir().unwrap();
    let store: Arc<dyn NoteStore> = Arc::new(FileNoteStore::new(temp.path()));

    let mut session = DrawingSession::new_blank(store.clone(), EditorState::new());
    draw_rectangle(
        session.editor_mut().unwrap(),
        Point::new(1.0, 2.0),
        Point::new(4.0, 6.0),
    );
    let id = session.save().await.unwrap();

    let reopened = DrawingSession::open(store, id, EditorState::new())
        .await
        .unwrap();
    let rect = &reopened.editor().unwrap().elements()[0];
    assert_eq!((rect.width, rect.height), (Some(3.0), Some(4.0)));
}
