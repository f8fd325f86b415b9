use crate::types::Vec3;

/// One participant currently alive in the session.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    /// Display name, used only in logs.
    pub name: String,
    pub position: Vec3,
    /// True for human-controlled participants, false for autonomous ones.
    pub human: bool,
}

impl Participant {
    pub fn new(name: &str, position: Vec3, human: bool) -> Self {
        Self {
            name: name.to_string(),
            position,
            human,
        }
    }
}

/// The session's read-only window onto the surrounding world, passed into
/// every pump call so the session never holds engine state across frames.
pub trait WorldView {
    /// Identifier of the map the session runs on.
    fn map_id(&self) -> &str;

    /// Everyone currently alive and present.
    fn participants(&self) -> Vec<Participant>;
}
