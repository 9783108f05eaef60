pub mod bins;
pub mod load;
