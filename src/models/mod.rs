pub mod tribute;
