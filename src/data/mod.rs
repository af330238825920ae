pub mod dataset;
pub mod import;
pub mod profile;
pub mod registry;
pub mod validate;
pub mod weapon;
pub mod workbook;
pub mod zone;
