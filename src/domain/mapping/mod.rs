pub mod row_mapper;

pub use row_mapper::{Mapping, MappingError, RowMapper, validate_row};
