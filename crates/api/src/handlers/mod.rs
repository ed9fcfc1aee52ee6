pub mod areas;
pub mod commercial;
pub mod population;
