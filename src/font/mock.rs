//! In-memory font engine and platform for tests

use anyhow::{anyhow, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::engine::{FaceInfo, FontEngine};
use super::family::{FallbackList, Family};
use super::platform::FontPlatform;

const BLOB_PREFIX: &str = "mockfont:";

/// Description of one fake face
#[derive(Debug, Clone)]
pub struct MockFont {
    pub family: Option<String>,
    /// Characters the face has glyphs for
    pub covers: String,
    pub bold: bool,
    pub italic: bool,
    pub unicode_charmap: bool,
    pub sizable: bool,
}

impl MockFont {
    pub fn covering(family: &str, covers: &str) -> Self {
        Self {
            family: Some(family.to_string()),
            covers: covers.to_string(),
            bold: false,
            italic: false,
            unicode_charmap: true,
            sizable: true,
        }
    }

    pub fn styled(mut self, bold: bool, italic: bool) -> Self {
        self.bold = bold;
        self.italic = italic;
        self
    }
}

#[derive(Debug)]
struct LiveGuard(Rc<Cell<usize>>);

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

#[derive(Debug, Clone)]
pub struct MockFace {
    pub id: usize,
    pub font: Rc<MockFont>,
    pub face_count: u32,
    pub width: u32,
    pub height: u32,
    _live: Rc<LiveGuard>,
}

#[derive(Default)]
struct EngineState {
    files: HashMap<PathBuf, Vec<MockFont>>,
    blobs: Vec<Vec<MockFont>>,
    opened: usize,
}

/// Fake engine; clones share state so tests can inspect counters
#[derive(Clone, Default)]
pub struct MockEngine {
    state: Rc<RefCell<EngineState>>,
    live: Rc<Cell<usize>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: &str, font: MockFont) {
        self.add_file_faces(path, vec![font]);
    }

    pub fn add_file_faces(&self, path: &str, faces: Vec<MockFont>) {
        self.state.borrow_mut().files.insert(PathBuf::from(path), faces);
    }

    /// Bytes standing for an in-memory font
    pub fn attachment(&self, font: MockFont) -> Rc<Vec<u8>> {
        self.attachment_faces(vec![font])
    }

    pub fn attachment_faces(&self, faces: Vec<MockFont>) -> Rc<Vec<u8>> {
        let mut state = self.state.borrow_mut();
        state.blobs.push(faces);
        Rc::new(format!("{}{}", BLOB_PREFIX, state.blobs.len() - 1).into_bytes())
    }

    /// Number of faces created so far
    pub fn opened(&self) -> usize {
        self.state.borrow().opened
    }

    /// Number of faces not yet destroyed
    pub fn live_faces(&self) -> usize {
        self.live.get()
    }

    fn make_face(&self, faces: &[MockFont], index: u32) -> Result<MockFace> {
        let font = faces
            .get(index as usize)
            .ok_or_else(|| anyhow!("face index {} out of range", index))?;
        let mut state = self.state.borrow_mut();
        state.opened += 1;
        self.live.set(self.live.get() + 1);
        Ok(MockFace {
            id: state.opened,
            font: Rc::new(font.clone()),
            face_count: faces.len() as u32,
            width: 0,
            height: 0,
            _live: Rc::new(LiveGuard(Rc::clone(&self.live))),
        })
    }
}

impl FontEngine for MockEngine {
    type Face = MockFace;

    fn face_from_file(&self, path: &Path, index: u32) -> Result<MockFace> {
        let faces = self
            .state
            .borrow()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("cannot open resource"))?;
        self.make_face(&faces, index)
    }

    fn face_from_memory(&self, data: Rc<Vec<u8>>, index: u32) -> Result<MockFace> {
        let text = String::from_utf8_lossy(&data);
        let blob = text
            .strip_prefix(BLOB_PREFIX)
            .and_then(|n| n.parse::<usize>().ok())
            .ok_or_else(|| anyhow!("unknown file format"))?;
        let faces = self
            .state
            .borrow()
            .blobs
            .get(blob)
            .cloned()
            .ok_or_else(|| anyhow!("unknown file format"))?;
        self.make_face(&faces, index)
    }

    fn select_unicode_charmap(&self, face: &mut MockFace) -> bool {
        face.font.unicode_charmap
    }

    fn set_pixel_size(&self, face: &mut MockFace, width: u32, height: u32) -> bool {
        if !face.font.sizable {
            return false;
        }
        face.width = width;
        face.height = height;
        true
    }

    fn has_glyph(&self, face: &MockFace, codepoint: u32) -> bool {
        char::from_u32(codepoint).is_some_and(|c| face.font.covers.contains(c))
    }

    fn describe(&self, face: &MockFace) -> FaceInfo {
        FaceInfo {
            family: face.font.family.clone(),
            bold: face.font.bold,
            italic: face.font.italic,
            face_count: face.face_count,
        }
    }
}

/// Fake platform counting callback invocations
#[derive(Default)]
pub struct MockPlatform {
    families: HashMap<String, Family>,
    fallbacks: HashMap<String, FallbackList>,
    streams: Vec<Rc<Vec<u8>>>,
    family_calls: RefCell<HashMap<String, usize>>,
    fallback_calls: Cell<usize>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_family(&mut self, family: Family) {
        self.families.insert(family.name.clone(), family);
    }

    /// Register the fallback list returned for `name`
    pub fn add_fallbacks(&mut self, name: &str, stubs: &[&str]) {
        let list = stubs.iter().map(|s| Family::stub(s)).collect();
        self.fallbacks.insert(name.to_lowercase(), list);
    }

    pub fn add_stream(&mut self, data: Rc<Vec<u8>>) {
        self.streams.push(data);
    }

    /// Family lookups made for `name`
    pub fn family_calls(&self, name: &str) -> usize {
        self.family_calls
            .borrow()
            .get(&name.to_lowercase())
            .copied()
            .unwrap_or(0)
    }

    pub fn fallback_calls(&self) -> usize {
        self.fallback_calls.get()
    }
}

impl FontPlatform for MockPlatform {
    fn family(&self, name: &str) -> Option<Family> {
        let key = name.to_lowercase();
        *self.family_calls.borrow_mut().entry(key.clone()).or_default() += 1;
        self.families.get(&key).cloned()
    }

    fn fallbacks(&self, name: &str, _codepoint: u32) -> Option<FallbackList> {
        self.fallback_calls.set(self.fallback_calls.get() + 1);
        self.fallbacks.get(&name.to_lowercase()).cloned()
    }

    fn font_stream(&self, index: i64) -> Option<Rc<Vec<u8>>> {
        usize::try_from(index).ok().and_then(|i| self.streams.get(i)).cloned()
    }
}
