pub mod import;
pub mod interviews;
