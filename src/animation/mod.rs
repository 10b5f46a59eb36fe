pub mod easing;
pub mod scheduler;
pub mod timeline;
pub mod tracks;
pub mod tween;
pub mod values;

pub use easing::Easing;
pub use scheduler::TimelineScheduler;
pub use timeline::{MasterTimeline, TimelineState};
pub use tracks::{Keyframe, TargetProperty, TimelineTrack, TrackChannel};
pub use tween::{Tween, TweenGroupId, Tweener};
pub use values::{Interpolatable, TrackValue};
