/// **(internal)** Utility methods for constructing and inspecting signed networks.
pub mod _impl_misc;

/// **(internal)** Builds signed networks from edge lists, regulation strings and edge tables.
pub mod _impl_parser;
