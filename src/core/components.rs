//! Core domain: camera components.

use bevy::prelude::*;

#[derive(Component, Debug)]
pub struct MainCamera;

/// Keeps the camera at a fixed offset from the player.
///
/// The offset is captured the first time a player is seen and kept for the
/// rest of the run, so a respawned player is followed the same way.
#[derive(Component, Debug, Default)]
pub struct CameraFollow {
    offset: Option<Vec2>,
}

impl CameraFollow {
    pub fn offset(&self) -> Option<Vec2> {
        self.offset
    }

    /// Camera position for this frame, or `None` to leave it where it is.
    /// The frame that captures the offset does not move the camera.
    pub fn target(&mut self, camera: Vec2, player: Option<Vec2>) -> Option<Vec2> {
        let player = player?;
        match self.offset {
            Some(offset) => Some(player + offset),
            None => {
                self.offset = Some(camera - player);
                info!("Camera following player at offset {:?}", camera - player);
                None
            }
        }
    }
}
