pub mod config;
pub mod parser;
pub mod projector;
pub mod tree;
pub mod workspace;

pub use config::Config;
pub use parser::{GoParser, ParseError};
pub use projector::{
    project, project_models_dir, project_symbol_dirs, project_symbols_dir, DataRecord, Field, ModelProjector, ProjectionError,
    ProjectionMode, ProjectionRun, RecordCatalog, SkippedFile, SymbolProjector, SymbolTable,
};
pub use tree::TreeNode;
pub use workspace::{load_dir, LoadError, LoadOptions, ParseErrorPolicy};
