pub mod disk;

pub use disk::{SNAPSHOT_FILE, SnapshotStore};
