pub mod count;
pub mod ordered_map;
