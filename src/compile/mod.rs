pub mod loader;
pub mod platform;
pub mod row;
pub mod suite;

pub use loader::{compile_configuration, CompileError, CompiledConfiguration};
pub use platform::{compile_platform, AgentRequirement, PlatformDescriptor};
pub use row::{columns, parse_run_list, SpecRow};
pub use suite::{compile_suite, SuiteDescriptor, SuiteResolution};
