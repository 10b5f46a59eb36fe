use std::future::Future;

use futures::future::{BoxFuture, FutureExt, join_all};
use glam::Vec3;
use rustc_hash::FxHashSet;

use crate::config::EntityConfig;
use crate::errors::Result;
use crate::scene::BoundingBox;

/// A decoded visual asset, as handed over by the external loader.
///
/// The core only needs the ownership tree and the local bounds of the nodes
/// that carry geometry.
#[derive(Debug, Clone, Default)]
pub struct AssetNode {
    pub name: String,
    pub translation: Vec3,
    /// Local-space bounds of this node's geometry, if it has any.
    pub bounds: Option<BoundingBox>,
    pub children: Vec<AssetNode>,
}

impl AssetNode {
    /// A geometry-carrying leaf.
    #[must_use]
    pub fn mesh(name: impl Into<String>, bounds: BoundingBox) -> Self {
        Self {
            name: name.into(),
            bounds: Some(bounds),
            ..Self::default()
        }
    }

    /// A transform-only grouping node.
    #[must_use]
    pub fn group(name: impl Into<String>, children: Vec<AssetNode>) -> Self {
        Self {
            name: name.into(),
            children,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    /// Number of nodes in this subtree, itself included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(AssetNode::node_count).sum::<usize>()
    }
}

/// External asset loader boundary.
pub trait AssetLoader {
    fn load(&self, path: &str) -> BoxFuture<'static, Result<AssetNode>>;
}

/// One resolved load, tagged with the configuration slot it belongs to.
#[derive(Debug)]
pub struct LoadCompletion {
    pub order_index: usize,
    pub result: Result<AssetNode>,
}

/// Loading progress as `(loaded, total)` plus failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadProgress {
    pub loaded: usize,
    pub failed: usize,
    pub total: usize,
}

impl LoadProgress {
    #[inline]
    #[must_use]
    pub fn resolved(&self) -> usize {
        self.loaded + self.failed
    }

    /// Rounded percentage of resolved loads, for the loading text.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        ((self.resolved() as f32 / self.total as f32) * 100.0).round() as u32
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.resolved() >= self.total
    }
}

/// Hands out completion slots for a fixed number of loads and collects the
/// results on a channel, to be drained once per tick.
///
/// Completions are consumed in arrival order, but each carries its own
/// `order_index`, so nothing downstream depends on that order.
pub struct LoadQueue {
    sender: flume::Sender<LoadCompletion>,
    receiver: flume::Receiver<LoadCompletion>,
    progress: LoadProgress,
    resolved_slots: FxHashSet<usize>,
}

impl LoadQueue {
    #[must_use]
    pub fn new(total: usize) -> Self {
        let (sender, receiver) = flume::unbounded();
        Self {
            sender,
            receiver,
            progress: LoadProgress {
                total,
                ..LoadProgress::default()
            },
            resolved_slots: FxHashSet::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn progress(&self) -> LoadProgress {
        self.progress
    }

    /// A one-shot completion slot for callback-style loaders.
    #[must_use]
    pub fn completer(&self, order_index: usize) -> LoadCompleter {
        LoadCompleter {
            order_index,
            sender: self.sender.clone(),
        }
    }

    /// Wraps a load future so that its result lands in the queue.
    pub fn track<F>(&self, order_index: usize, load: F) -> impl Future<Output = ()> + Send + use<F>
    where
        F: Future<Output = Result<AssetNode>> + Send + 'static,
    {
        let completer = self.completer(order_index);
        async move {
            let result = load.await;
            completer.complete(result);
        }
    }

    /// Starts one tracked load per configured entity and resolves when all
    /// of them have reported.
    pub fn load_all(&self, loader: &dyn AssetLoader, configs: &[EntityConfig]) -> BoxFuture<'static, ()> {
        let loads: Vec<_> = configs
            .iter()
            .enumerate()
            .map(|(order_index, config)| self.track(order_index, loader.load(&config.path)))
            .collect();
        join_all(loads).map(|_| ()).boxed()
    }

    /// Takes every completion that arrived since the last drain.
    ///
    /// Each slot resolves once. A later completion for a slot that already
    /// resolved is discarded.
    pub fn drain(&mut self) -> Vec<LoadCompletion> {
        let mut drained = Vec::new();
        for completion in self.receiver.try_iter() {
            if !self.resolved_slots.insert(completion.order_index) {
                log::warn!(
                    "Discarding duplicate completion for slot {}",
                    completion.order_index
                );
                continue;
            }
            if completion.result.is_ok() {
                self.progress.loaded += 1;
            } else {
                self.progress.failed += 1;
            }
            drained.push(completion);
        }
        drained
    }
}

/// Sending half of a single load's completion.
pub struct LoadCompleter {
    order_index: usize,
    sender: flume::Sender<LoadCompletion>,
}

impl LoadCompleter {
    pub fn complete(self, result: Result<AssetNode>) {
        let completion = LoadCompletion {
            order_index: self.order_index,
            result,
        };
        if self.sender.send(completion).is_err() {
            log::debug!("Load queue dropped before slot {} completed", self.order_index);
        }
    }
}
