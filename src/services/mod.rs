pub mod clipboard;
pub mod hashing;
