/// Declares a `Copy` handle type that views a [`NodeId`](crate::ir::syntax_node::NodeId)
/// as one concrete node kind.
macro_rules! typed_node {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) $crate::ir::syntax_node::NodeId);

        impl $name {
            /// Views `id` as this kind, if it is one.
            pub fn cast(
                tree: &$crate::ir::syntax_node::SyntaxTree,
                id: $crate::ir::syntax_node::NodeId,
            ) -> Option<Self> {
                let data = tree.get(id).ok()?;
                (data.node_type() == $crate::ir::syntax_node::NodeType::$name).then_some($name(id))
            }

            pub fn id(self) -> $crate::ir::syntax_node::NodeId {
                self.0
            }
        }

        impl From<$name> for $crate::ir::syntax_node::NodeId {
            fn from(node: $name) -> Self {
                node.0
            }
        }
    };
}
