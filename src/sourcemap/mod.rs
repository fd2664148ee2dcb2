//! Line-map engine: parses a map file into an index over the generated
//! script and answers forward and reverse position queries.

pub mod char_map;
pub mod index;
pub mod loader;
pub mod parser;
pub mod record;

pub use char_map::{CharEntry, CharacterMap};
pub use index::{GeneratedLocation, SourceMap};
pub use loader::{load_source_map, FsLoader, LineLoader, MemoryLoader};
pub use record::{MappingId, MappingRecord};
