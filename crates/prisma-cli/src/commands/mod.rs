pub mod fields;
pub mod values;
pub mod view;
