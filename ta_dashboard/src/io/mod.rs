pub mod dataframe;
pub mod sink;
