pub mod context;
pub mod mapper;
pub mod names;

pub use context::{CompilerContext, ModuleContext, OriginalLocation};
pub use mapper::{MappedSource, Mapper, MapperRegistry};
pub use names::{convert_name, ConvertedName, NameStyle};
