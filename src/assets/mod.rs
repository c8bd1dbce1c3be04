//! Asset loading from the local filesystem.

pub mod io;

pub use io::FileAssetLoader;
