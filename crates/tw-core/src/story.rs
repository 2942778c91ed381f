use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CoreError, CoreResult};
use crate::room::{Room, deserialize_opt_id};

/// Room id a story starts in unless it names another.
pub const DEFAULT_START_ROOM: &str = "0";

/// The immutable story: an ordered list of rooms indexed by id.
///
/// Loaded once and shared read-only between sessions.
#[derive(Debug, Clone)]
pub struct StoryGraph {
    title: Option<String>,
    start: String,
    rooms: Vec<Room>,
    by_id: HashMap<String, usize>,
}

#[derive(Deserialize)]
struct RawStory {
    #[serde(default)]
    title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    start: Option<String>,
    rooms: Vec<Room>,
}

impl StoryGraph {
    /// Build a story from rooms, starting at [`DEFAULT_START_ROOM`].
    pub fn new(rooms: Vec<Room>) -> CoreResult<Self> {
        if rooms.is_empty() {
            return Err(CoreError::EmptyStory);
        }

        let mut by_id = HashMap::with_capacity(rooms.len());
        for (index, room) in rooms.iter().enumerate() {
            if by_id.insert(room.id.clone(), index).is_some() {
                return Err(CoreError::DuplicateRoom(room.id.clone()));
            }
        }

        Ok(Self {
            title: None,
            start: DEFAULT_START_ROOM.to_string(),
            rooms,
            by_id,
        })
    }

    /// Set the start room.
    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = start.into();
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Parse a story document.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let raw: RawStory = serde_json::from_str(json)?;
        let mut story = Self::new(raw.rooms)?;
        story.title = raw.title;
        if let Some(start) = raw.start {
            story.start = start;
        }
        Ok(story)
    }

    /// Read and parse a story file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The story title, if the document has one.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Id of the room a new session starts in.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Look up a room by id.
    pub fn room(&self, id: &str) -> Option<&Room> {
        self.by_id.get(id).map(|&i| &self.rooms[i])
    }

    /// Whether a room with the id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// All rooms in declaration order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// All room ids in declaration order.
    pub fn room_ids(&self) -> impl Iterator<Item = &str> {
        self.rooms.iter().map(|r| r.id.as_str())
    }

    /// Number of rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether the story has no rooms. Always false for a loaded story.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
