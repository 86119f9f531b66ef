pub mod feature;
pub mod map_layer;
