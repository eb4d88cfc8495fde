//! A screen, a window, and one request for it, bundled so a solve can be
//! reproduced from a TOML file.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::placement::PlacementPolicy;
use super::screen::StaticScreen;
use super::window::{FrameExtents, WindowState};
use crate::constraints::{MoveResizeFlags, MoveResizeRequest};
use crate::geometry::{Gravity, Rect};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    pub screen: StaticScreen,
    pub window: WindowState,
    pub request: SceneRequest,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SceneRequest {
    #[serde(rename = "move", default)]
    pub moves: bool,
    #[serde(rename = "resize", default)]
    pub resizes: bool,
    /// The request comes from the user dragging, not from the client.
    #[serde(default)]
    pub user: bool,
    #[serde(default)]
    pub gravity: Gravity,
    pub orig: Rect,
    pub new: Rect,
    #[serde(default)]
    pub frame: Option<FrameExtents>,
    #[serde(default)]
    pub placement: PlacementPolicy,
}

impl SceneRequest {
    pub fn flags(&self) -> MoveResizeFlags {
        let mut flags = MoveResizeFlags::empty();
        flags.set(MoveResizeFlags::MOVE, self.moves);
        flags.set(MoveResizeFlags::RESIZE, self.resizes);
        flags.set(MoveResizeFlags::USER_ACTION, self.user);
        flags
    }

    pub fn to_request(&self) -> MoveResizeRequest {
        let request = MoveResizeRequest::new(self.flags(), self.orig, self.new).with_gravity(self.gravity);
        match self.frame {
            Some(frame) => request.with_frame(frame),
            None => request,
        }
    }
}

impl Scene {
    pub fn read(path: &Path) -> anyhow::Result<Scene> {
        let buf = std::fs::read_to_string(path)
            .with_context(|| format!("reading scene {}", path.display()))?;
        Self::parse(&buf).with_context(|| format!("parsing scene {}", path.display()))
    }

    pub fn parse(buf: &str) -> anyhow::Result<Scene> { Ok(toml::from_str(buf)?) }
}
