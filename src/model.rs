pub mod placement;
pub mod scene;
pub mod screen;
pub mod window;

pub use placement::{CenterPlacement, KeepPosition, Placement, PlacementPolicy};
pub use scene::{SceneRequest, Scene};
pub use screen::{Monitor, MonitorInfo, ScreenLayout, Side, StaticScreen, Strut};
pub use window::{AspectRange, FrameExtents, Ratio, SizeHints, WindowId, WindowState};
