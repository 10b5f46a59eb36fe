#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

//! Media-locked animation scheduling for narrated 3D presentations.
//!
//! A roster of entities appears and disappears on a timeline that follows an
//! external narration clock. When narration ends the entities settle into a
//! row and the pointer takes over: hover picks an entity, dragging spins it.
//!
//! The host owns rendering, asset decoding, the media element and the camera
//! controller. It builds one [`Presentation`], feeds it loaded assets, pointer
//! events and panel edits, and calls [`Presentation::tick`] every frame.

pub mod animation;
pub mod config;
pub mod errors;
pub mod focus;
pub mod interaction;
pub mod layout;
pub mod media;
pub mod presentation;
pub mod roster;
pub mod scene;
pub mod stage;

pub use animation::{Easing, MasterTimeline, TimelineScheduler, Tweener};
pub use config::{EntityConfig, PresentationConfig};
pub use errors::{Result, ShowreelError};
pub use interaction::{InteractionController, InteractionState, PointerEvent, Viewport};
pub use layout::LayoutEngine;
pub use media::{MediaClock, MediaClockSync, SyncOutcome, VirtualMedia};
pub use presentation::{EntityEdit, Presentation};
pub use roster::{AssetNode, Entity, EntityId, LoadQueue, Roster};
pub use scene::{BoundingBox, CameraRig, RecordingRig, Scene};
