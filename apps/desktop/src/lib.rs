pub mod duration_input;
