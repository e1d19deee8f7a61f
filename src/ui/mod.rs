//! UI support module
//!
//! Everything a front end needs to bind to the gallery without depending on a
//! specific UI framework:
//!
//! - `events` - State-change events and the channel-based `EventBus`
//! - `alert` - Alerts and the `ErrorPresenter` implementations

pub mod alert;
pub mod events;

pub use alert::{
    Alert, ChannelPresenter, ConfiguredPresenter, ConsolePresenter, DialogPresenter,
    ErrorPresenter,
};
pub use events::{EventBus, GalleryEvent};
