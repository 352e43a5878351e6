pub mod darts;
