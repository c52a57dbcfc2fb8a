//! Loaded face cache
//!
//! Faces are keyed by (source, face index, pixel height, pixel width) and
//! live until the cache is dropped. A hit returns the stored handle without
//! re-validating it.

use log::{debug, error};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::engine::FontEngine;
use super::family::FontSource;
use super::platform::FontPlatform;
use crate::error::{FontError, FontResult};
use crate::style::{RenderTarget, TextStyle};

/// Cache key of one loaded face
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FaceKey {
    pub source: FontSource,
    pub index: u32,
    pub height: u32,
    pub width: u32,
}

impl fmt::Display for FaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {} - {}", self.source, self.index, self.height, self.width)
    }
}

pub struct FaceCache<E: FontEngine> {
    engine: E,
    target: RenderTarget,
    /// Host-owned font attachment bytes, indexed by `:/<index>`
    attachments: Vec<Rc<Vec<u8>>>,
    faces: HashMap<FaceKey, E::Face>,
}

impl<E: FontEngine> FaceCache<E> {
    pub fn new(engine: E, target: RenderTarget) -> Self {
        Self {
            engine,
            target,
            attachments: Vec::new(),
            faces: HashMap::new(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn target(&self) -> RenderTarget {
        self.target
    }

    /// Register font attachment bytes; returns the attachment index
    pub fn add_attachment(&mut self, data: Rc<Vec<u8>>) -> usize {
        self.attachments.push(data);
        self.attachments.len() - 1
    }

    pub fn attachment_count(&self) -> usize {
        self.attachments.len()
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn key_for(&self, source: &FontSource, index: u32, style: &TextStyle) -> FaceKey {
        let size = self.target.pixel_size(style);
        FaceKey {
            source: source.clone(),
            index,
            height: size.height,
            width: size.width,
        }
    }

    /// Get the face for `source`/`index` sized for `style`, loading it on miss
    ///
    /// A face that fails charmap selection or sizing is dropped before the
    /// error is returned; nothing partial is ever cached.
    pub fn acquire<P: FontPlatform + ?Sized>(
        &mut self,
        source: &FontSource,
        index: u32,
        style: &TextStyle,
        platform: &P,
    ) -> FontResult<E::Face> {
        let key = self.key_for(source, index, style);
        if let Some(face) = self.faces.get(&key) {
            return Ok(face.clone());
        }

        let mut face = self.open(&key, platform)?;

        if !self.engine.select_unicode_charmap(&mut face) {
            error!("LoadFace: Error selecting charmap for {}", key);
            return Err(FontError::CharmapUnavailable {
                key: key.to_string(),
            });
        }

        if !self.engine.set_pixel_size(&mut face, key.width, key.height) {
            error!("LoadFace: Failed to set font size for {}", key);
            return Err(FontError::PixelSizeFailed {
                key: key.to_string(),
            });
        }

        debug!("LoadFace: loaded {}", key);
        self.faces.insert(key, face.clone());
        Ok(face)
    }

    fn open<P: FontPlatform + ?Sized>(&self, key: &FaceKey, platform: &P) -> FontResult<E::Face> {
        let created = match &key.source {
            FontSource::Attachment(i) => {
                let data = usize::try_from(*i)
                    .ok()
                    .and_then(|i| self.attachments.get(i))
                    .ok_or_else(|| {
                        error!("LoadFace: Invalid font attachment index {}", i);
                        FontError::AttachmentIndexInvalid {
                            index: *i,
                            count: self.attachments.len(),
                        }
                    })?;
                self.engine.face_from_memory(Rc::clone(data), key.index)
            }
            FontSource::Stream(i) => match platform.font_stream(*i) {
                Some(data) => self.engine.face_from_memory(data, key.index),
                None => Err(anyhow::anyhow!("invalid font stream index {}", i)),
            },
            FontSource::File(path) => self.engine.face_from_file(path, key.index),
        };

        created.map_err(|e| {
            error!("LoadFace: Error creating face for {}: {}", key, e);
            FontError::FaceCreationFailed {
                key: key.to_string(),
                reason: e.to_string(),
            }
        })
    }
}
