pub mod pair;
pub mod value;
