mod movie;

pub use movie::{Movie, NewMovie, UpdateMovie};
