pub mod apps;
pub mod registry;
pub mod server;
pub mod window;

pub use registry::{RegistryEvent, SubscriptionId, WindowRegistry, frontmost_visible_in};
pub use window::{
    MIN_HEIGHT, MIN_SIZE, MIN_WIDTH, OpenRequest, WindowId, WindowPatch, WindowRecord, ZIndex,
};
