mod folder;
mod storage_error;

pub use folder::{
    extract_date_from_file_name, list_snapshot_files, load_snapshots_from_folder,
    snapshot_file_name, SNAPSHOT_FILE_EXT, SNAPSHOT_FILE_PREFIX,
};
pub use storage_error::StorageError;
