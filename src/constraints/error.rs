use thiserror::Error;

use super::context::MoveResizeFlags;
use crate::model::window::WindowId;

#[derive(Debug, Error)]
pub enum ConstraintError {
    #[error("Move/resize request has neither MOVE nor RESIZE set: {0:?}")]
    NoAction(MoveResizeFlags),
    #[error("No monitor found for window {0}")]
    NoMonitors(WindowId),
}
