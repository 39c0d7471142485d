pub mod mapper_registry;

pub use mapper_registry::MapperRegistry;
