pub mod ascii;
pub mod level_config_file;
pub mod seed;
