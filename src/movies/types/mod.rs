mod detail;
mod fields;
mod movie;
mod response;

pub use detail::MovieDetail;
pub use movie::Movie;
pub use response::{MovieAliases, MovieImages, MoviesResponse};
