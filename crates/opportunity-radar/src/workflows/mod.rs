pub mod radar;
