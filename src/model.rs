mod ids;
mod node;

pub use self::ids::{NodeId, NodeKey};
pub use self::node::{ChildDescriptor, Children, ExpandPhase, TreeNode};
