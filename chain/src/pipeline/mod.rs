pub mod vacuum;
