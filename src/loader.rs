use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::Result;

use crate::model::{ChildDescriptor, NodeKey};

pub type LoadFuture = Pin<Box<dyn Future<Output = Result<Vec<ChildDescriptor>>> + Send + 'static>>;

/// Asynchronous child fetch for the browsed namespace.
///
/// Calling `load_children` counts as one invocation; the returned future is
/// driven on the runtime and its result applied back on the UI thread.
pub trait ChildLoader: Send + Sync {
    fn load_children(&self, identity: &NodeKey) -> LoadFuture;
}

pub type SharedLoader = Arc<dyn ChildLoader>;

/// Adapts an async closure into a [`ChildLoader`].
pub struct FnLoader<F>(pub F);

impl<F, Fut> ChildLoader for FnLoader<F>
where
    F: Fn(NodeKey) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<ChildDescriptor>>> + Send + 'static,
{
    fn load_children(&self, identity: &NodeKey) -> LoadFuture {
        Box::pin((self.0)(identity.clone()))
    }
}

pub fn loader_fn<F, Fut>(f: F) -> SharedLoader
where
    F: Fn(NodeKey) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<ChildDescriptor>>> + Send + 'static,
{
    Arc::new(FnLoader(f))
}
