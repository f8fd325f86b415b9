/// A point or offset in world space. The vertical axis is `y`, matching the
/// engines this crate embeds into.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Returns this point shifted horizontally, leaving height untouched.
    pub fn offset(&self, dx: f32, dz: f32) -> Self {
        Self::new(self.x + dx, self.y, self.z + dz)
    }

    /// Returns this point with its height replaced.
    pub fn with_y(&self, y: f32) -> Self {
        Self::new(self.x, y, self.z)
    }

    /// Distance to another point, ignoring the vertical axis.
    pub fn horizontal_distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }
}

/// The session participant's authority standing, resolved once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Decides strike scheduling and broadcasts outcomes to observers.
    Host,
    /// Observes; replays cues received over the wire.
    Client,
    /// Not resolved yet.
    Unknown,
}

impl Role {
    pub fn is_host(&self) -> bool {
        matches!(self, Role::Host)
    }
}
